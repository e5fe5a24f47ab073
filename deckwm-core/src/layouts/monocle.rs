use super::LayoutArea;
use crate::models::Xyhw;

/// Every window covers the whole area; only the focused one is raised to the top.
pub fn update(area: &LayoutArea, borders: &[i32]) -> Vec<Xyhw> {
    let g = area.gaps;
    borders
        .iter()
        .map(|&b| {
            let b = if area.monocle_borders { 2 * b } else { 0 };
            Xyhw::new(
                g,
                area.top + g,
                area.width - 2 * g - b,
                area.height - 2 * g - b,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts::tests::area;

    #[test]
    fn all_windows_share_one_rectangle() {
        let rects = update(&area(800, 600, 4), &[2, 2, 2]);
        assert!(rects.iter().all(|r| *r == Xyhw::new(4, 4, 792, 592)));
    }

    #[test]
    fn borders_are_subtracted_when_enabled() {
        let mut area = area(800, 600, 0);
        area.monocle_borders = true;
        let rects = update(&area, &[3, 3]);
        assert_eq!(rects[0], Xyhw::new(0, 0, 794, 594));
    }
}
