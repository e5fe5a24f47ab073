use super::LayoutArea;
use crate::models::Xyhw;

/// Every window takes half of the space left by the previous one, alternating between splitting
/// the width and the height. Splitting stops once a cell would drop below twice the minimum
/// window size; the windows that no longer fit share the last cell.
pub fn update(area: &LayoutArea, borders: &[i32]) -> Vec<Xyhw> {
    let Some(&head_border) = borders.first() else {
        return vec![];
    };
    let g = area.gaps;
    let count = borders.len();

    let mut x = g;
    let mut y = area.top;
    let mut cw = area.width - 2 * g - 2 * head_border;
    let mut ch = area.height - 2 * g - 2 * head_border;
    let mut last_split = 0;
    let mut last_cell = None;

    let mut rects = Vec::with_capacity(count);
    for (j, &b) in borders.iter().enumerate() {
        let has_next = j + 1 < count;
        let odd = j % 2 == 1;
        let limit = area.min_window_size * 2 + b + g;

        if has_next && ch > limit && cw > limit {
            if odd {
                ch = ch / 2 - b - g / 2;
            } else {
                cw = cw / 2 - b - g / 2;
            }
            last_split = j;
        }

        if j > 0 {
            if odd {
                x += cw + 2 * b + g;
            } else if area.invert {
                y -= ch + 2 * b + g;
            } else {
                y += ch + 2 * b + g;
            }
            if odd && has_next && area.invert {
                y += ch + 2 * b + g;
            }
        }

        if j <= last_split + 1 {
            let cell = Xyhw::new(x, y + g, cw, ch);
            last_cell = Some(cell);
            rects.push(cell);
        } else if let Some(cell) = last_cell {
            rects.push(cell);
        }
    }
    rects
}
