use super::LayoutArea;
use crate::models::Xyhw;

/// Master in the middle with a stack on each side. The left stack gets the extra window when the
/// stack count is odd. Inverted, the stacks become a top and a bottom row.
pub fn update(area: &LayoutArea, borders: &[i32]) -> Vec<Xyhw> {
    let Some((&master_border, stack)) = borders.split_first() else {
        return vec![];
    };
    let n = stack.len() as i32;
    if n == 0 {
        return vec![area.full_cover(master_border)];
    }

    let g = area.gaps;
    let hh = area.height;
    let ww = area.width;
    let ma = area.master_extent(if area.invert {
        area.monitor_height
    } else {
        ww
    });
    let l = (n - 1) / 2 + 1;
    let r = n - l;

    let mut rects = Vec::with_capacity(borders.len());
    let b = master_border;
    rects.push(if area.invert {
        Xyhw::new(
            g,
            area.top + (hh - ma) / 2 + g,
            ww - 2 * (b + g),
            if n > 1 {
                ma - 2 * g - 2 * b
            } else {
                ma + (hh - ma) / 2 - 2 * b - 2 * g
            },
        )
    } else {
        Xyhw::new(
            (ww - ma) / 2 + b + g,
            area.top + g,
            if n > 1 {
                ma - 4 * b - 2 * g
            } else {
                ma + (ww - ma) / 2 - 3 * b - 2 * g
            },
            hh - 2 * (b + g),
        )
    });

    let mut cx = g;
    let cw = (ww - ma) / 2 - master_border - g;
    let ch = hh;
    let mut cy = area.top + g;

    for (index, &b) in stack.iter().enumerate() {
        let d = index as i32 + 1;
        let rows = if d <= l { l } else { r };
        if area.invert {
            if d == l + 1 {
                cx = g;
            }
            if d > 1 && d != l + 1 {
                cx += (ww - g) / rows;
            }
            rects.push(Xyhw::new(
                cx,
                if d <= l {
                    cy
                } else {
                    cy + (hh - ma) / 2 + ma - g
                },
                (ww - g) / rows - 2 * b - g,
                (hh - ma) / 2 - 2 * b - g,
            ));
        } else {
            if d == l + 1 {
                cy = area.top + g;
            }
            if d > 1 && d != l + 1 {
                cy += (ch - g) / rows;
            }
            rects.push(Xyhw::new(
                if d <= l { cx } else { ww - cw - 2 * b - g },
                cy,
                cw,
                (ch - g) / rows - 2 * b - g,
            ));
        }
    }
    rects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts::tests::area;

    #[test]
    fn master_sits_between_two_stacks() {
        let mut area = area(1000, 800, 0);
        area.master_ratio = 0.5;
        let rects = update(&area, &[0; 4]);
        assert_eq!(rects[0], Xyhw::new(250, 0, 500, 800));
        // left stack holds two windows, right stack one
        assert_eq!(rects[1], Xyhw::new(0, 0, 250, 400));
        assert_eq!(rects[2], Xyhw::new(0, 400, 250, 400));
        assert_eq!(rects[3], Xyhw::new(750, 0, 250, 800));
    }

    #[test]
    fn a_single_stack_window_widens_the_master() {
        let mut area = area(1000, 800, 0);
        area.master_ratio = 0.5;
        let rects = update(&area, &[0; 2]);
        assert_eq!(rects[0], Xyhw::new(250, 0, 750, 800));
        assert_eq!(rects[1], Xyhw::new(0, 0, 250, 800));
    }

    #[test]
    fn inverted_uses_rows() {
        let mut area = area(1000, 800, 0);
        area.master_ratio = 0.5;
        area.invert = true;
        let rects = update(&area, &[0; 3]);
        assert_eq!(rects[0], Xyhw::new(0, 200, 1000, 400));
        assert_eq!(rects[1], Xyhw::new(0, 0, 1000, 200));
        assert_eq!(rects[2], Xyhw::new(0, 600, 1000, 200));
    }
}
