use super::LayoutArea;
use crate::models::Xyhw;

/// Equal columns, or equal rows when inverted. The first window carries the outer gap.
pub fn update(area: &LayoutArea, borders: &[i32]) -> Vec<Xyhw> {
    let n = borders.len() as i32;
    let g = area.gaps;
    borders
        .iter()
        .enumerate()
        .map(|(j, &b)| {
            let j = j as i32;
            let (lead, inner) = if j == 0 { (g, 2 * g) } else { (0, g) };
            if area.invert {
                Xyhw::new(
                    g,
                    area.top + area.height / n * j + lead,
                    area.width - 2 * b - 2 * g,
                    area.height / n - 2 * b - inner,
                )
            } else {
                Xyhw::new(
                    area.width / n * j + lead,
                    area.top + g,
                    area.width / n - 2 * b - inner,
                    area.height - 2 * b - 2 * g,
                )
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts::tests::area;

    #[test]
    fn columns_share_the_width() {
        let rects = update(&area(900, 600, 10), &[0; 3]);
        assert_eq!(
            rects,
            vec![
                Xyhw::new(10, 10, 280, 580),
                Xyhw::new(300, 10, 290, 580),
                Xyhw::new(600, 10, 290, 580),
            ]
        );
    }

    #[test]
    fn inverted_uses_rows() {
        let mut area = area(900, 600, 0);
        area.invert = true;
        let rects = update(&area, &[1, 1]);
        assert_eq!(rects[0], Xyhw::new(0, 0, 898, 298));
        assert_eq!(rects[1], Xyhw::new(0, 300, 898, 298));
    }
}
