use super::LayoutArea;
use crate::models::Xyhw;

/// Arranges the windows in columns of near equal rows. When the count does not divide evenly the
/// rightmost columns get one row more.
pub fn update(area: &LayoutArea, borders: &[i32]) -> Vec<Xyhw> {
    let n = borders.len() as i32;
    if n == 0 {
        return vec![];
    }

    let mut cols = 0;
    while cols <= n / 2 {
        if cols * cols >= n {
            break;
        }
        cols += 1;
    }
    if n == 5 {
        cols = 2;
    }

    let g = area.gaps;
    let mut rows = n / cols;
    let ch = area.height - g;
    let cw = (area.width - g) / cols;
    let (mut cn, mut rn) = (0, 0);

    let mut rects = Vec::with_capacity(borders.len());
    for (i, &b) in borders.iter().enumerate() {
        let i = i as i32;
        if i / rows + 1 > cols - n % cols {
            rows = n / cols + 1;
        }
        rects.push(Xyhw::new(
            cn * cw + g,
            area.top + rn * ch / rows + g,
            cw - 2 * b - g,
            ch / rows - 2 * b - g,
        ));
        rn += 1;
        if rn >= rows {
            rn = 0;
            cn += 1;
        }
    }
    rects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts::tests::area;

    fn columns(rects: &[Xyhw]) -> Vec<usize> {
        let mut xs: Vec<i32> = rects.iter().map(|r| r.x).collect();
        xs.dedup();
        xs.iter()
            .map(|x| rects.iter().filter(|r| r.x == *x).count())
            .collect()
    }

    #[test]
    fn five_windows_use_two_columns_with_three_rows_on_the_right() {
        for gaps in [0, 1, 4, 10, 33] {
            let rects = update(&area(1280, 782, gaps), &[2; 5]);
            assert_eq!(columns(&rects), vec![2, 3], "gaps={gaps}");
        }
    }

    #[test]
    fn four_windows_make_a_square() {
        let rects = update(&area(1000, 800, 0), &[0; 4]);
        assert_eq!(
            rects,
            vec![
                Xyhw::new(0, 0, 500, 400),
                Xyhw::new(0, 400, 500, 400),
                Xyhw::new(500, 0, 500, 400),
                Xyhw::new(500, 400, 500, 400),
            ]
        );
    }

    #[test]
    fn seven_windows_put_the_remainder_on_the_right() {
        let rects = update(&area(900, 600, 0), &[0; 7]);
        assert_eq!(columns(&rects), vec![2, 2, 3]);
    }
}
