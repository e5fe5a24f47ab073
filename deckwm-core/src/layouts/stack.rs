use super::LayoutArea;
use crate::models::Xyhw;

/// Master window plus a stack of the remaining windows, either beside it (`bottom == false`) or
/// below it.
///
/// The stack axis is split into `n` equal slices. Whatever does not divide evenly, plus the
/// display's growth, is handed to the first stack window.
pub fn update(area: &LayoutArea, borders: &[i32], bottom: bool) -> Vec<Xyhw> {
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
    let ma = area.master_extent(if bottom { area.monitor_height } else { ww });

    let mut z = if bottom { ww } else { hh };
    let mut d = 0;
    if n > 1 {
        d = (z - area.growth) % n + area.growth;
        z = (z - area.growth) / n;
    }

    let mut rects = Vec::with_capacity(borders.len());
    let b = master_border;
    rects.push(if bottom {
        Xyhw::new(
            g,
            if area.invert {
                area.top + hh - ma + g
            } else {
                area.top + g
            },
            ww - 2 * (b + g),
            ma - 2 * (b + g),
        )
    } else {
        Xyhw::new(
            if area.invert { ww - ma + g } else { g },
            area.top + g,
            ma - 2 * (b + g),
            hh - 2 * (b + g),
        )
    });

    // every stack window is sized with the first stack window's border
    let b = stack[0];
    let mut cx = if bottom {
        0
    } else if area.invert {
        g
    } else {
        ma
    };
    let mut cy = area.top;
    let cw = (if bottom { hh } else { ww }) - 2 * b - ma - g;
    let ch = z - 2 * b - g;

    if bottom {
        cx += g;
        cy += if area.invert { g } else { ma };
        rects.push(Xyhw::new(cx, cy, ch - g + d, cw));
        cx += z + d - g;
    } else {
        cy += g;
        rects.push(Xyhw::new(cx, cy, cw, ch - g + d));
        cy += z + d - g;
    }

    for _ in 1..n {
        if bottom {
            rects.push(Xyhw::new(cx, cy, ch, cw));
            cx += z;
        } else {
            rects.push(Xyhw::new(cx, cy, cw, ch));
            cy += z;
        }
    }
    rects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts::tests::area;

    #[test]
    fn master_takes_its_share_of_the_width() {
        let rects = update(&area(1000, 800, 0), &[0, 0], false);
        assert_eq!(rects[0], Xyhw::new(0, 0, 520, 800));
        assert_eq!(rects[1], Xyhw::new(520, 0, 480, 800));
    }

    #[test]
    fn stack_slices_cover_the_height_exactly() {
        for gaps in [0, 4, 7] {
            for growth in [0, 13, -9] {
                for n in 2..7 {
                    let mut area = area(1366, 750, gaps);
                    area.growth = growth;
                    let borders = vec![2; n + 1];
                    let rects = update(&area, &borders, false);
                    let stack = &rects[1..];
                    let outer: i32 = stack.iter().map(|r| r.h + 4).sum();
                    assert_eq!(outer + gaps * (n as i32 + 1), 750, "n={n} gaps={gaps}");
                    for pair in stack.windows(2) {
                        assert_eq!(pair[1].y - (pair[0].y + pair[0].h + 4), gaps);
                    }
                    assert_eq!(stack[0].y, gaps);
                }
            }
        }
    }

    #[test]
    fn first_stack_window_receives_growth_and_remainder() {
        let mut area = area(1000, 100, 0);
        area.growth = 10;
        let rects = update(&area, &[0, 0, 0, 0], false);
        // (100 - 10) / 3 = 30, remainder 0, so the first slice is 30 + 10
        assert_eq!(rects[1].h, 40);
        assert_eq!(rects[2].h, 30);
        assert_eq!(rects[3].h, 30);
        assert_eq!(rects[3].y + rects[3].h, 100);
    }

    #[test]
    fn inverted_stack_puts_the_master_right() {
        let mut area = area(1000, 800, 0);
        area.invert = true;
        let rects = update(&area, &[0, 0], false);
        assert_eq!(rects[0], Xyhw::new(480, 0, 520, 800));
        assert_eq!(rects[1].x, 0);
        assert_eq!(rects[1].w, 480);
    }

    #[test]
    fn bottom_stack_splits_the_width() {
        let area = area(900, 1000, 0);
        let rects = update(&area, &[0, 0, 0, 0], true);
        assert_eq!(rects[0], Xyhw::new(0, 0, 900, 520));
        assert_eq!(rects[1], Xyhw::new(0, 520, 300, 480));
        assert_eq!(rects[2], Xyhw::new(300, 520, 300, 480));
        assert_eq!(rects[3], Xyhw::new(600, 520, 300, 480));
    }

    #[test]
    fn master_size_adjustment_moves_the_split() {
        let mut area = area(1000, 800, 0);
        area.master_size = 30;
        let rects = update(&area, &[0, 0], false);
        assert_eq!(rects[0].w, 550);
        assert_eq!(rects[1].x, 550);
    }
}
