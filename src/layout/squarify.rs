use super::Rect;

/// Partition `area` among `weights` with the squarified strategy.
///
/// Weights are taken in the given order (callers pass them value-descending). Items are
/// grouped into rows; each row runs along the shorter side of the remaining free
/// rectangle and keeps growing while the worst aspect ratio of its members, measured
/// against `ratio`, does not get worse. Returns one rectangle per weight, in order.
///
/// Zero weights get zero-area rectangles. If all weights are zero, every rectangle
/// collapses onto the edge of `area`.
pub fn squarify(weights: &[f64], area: Rect, ratio: f64) -> Vec<Rect> {
    let n = weights.len();
    let mut out = Vec::with_capacity(n);
    let ratio = ratio.max(1.0);

    let Rect {
        mut x0,
        mut y0,
        x1,
        y1,
    } = area;
    let mut remaining: f64 = weights.iter().sum();

    let mut i0 = 0;
    let mut i1 = 0;
    while i0 < n {
        let dx = x1 - x0;
        let dy = y1 - y0;

        // Leading zero weights join whatever row comes next.
        let mut row_sum;
        loop {
            row_sum = weights[i1];
            i1 += 1;
            if row_sum > 0.0 || i1 >= n {
                break;
            }
        }

        let mut min_value = row_sum;
        let mut max_value = row_sum;
        let alpha = (dy / dx).max(dx / dy) / (remaining * ratio);
        let mut beta = row_sum * row_sum * alpha;
        let mut min_ratio = (max_value / beta).max(beta / min_value);

        // Keep adding items while the row's worst aspect ratio holds or improves.
        while i1 < n {
            let w = weights[i1];
            let sum = row_sum + w;
            let lo = min_value.min(w);
            let hi = max_value.max(w);
            beta = sum * sum * alpha;
            let new_ratio = (hi / beta).max(beta / lo);
            if new_ratio > min_ratio {
                break;
            }
            row_sum = sum;
            min_value = lo;
            max_value = hi;
            min_ratio = new_ratio;
            i1 += 1;
        }

        let row = &weights[i0..i1];
        if dx < dy {
            // Row spans the full width, takes a horizontal band.
            let band_y1 = if remaining > 0.0 {
                y0 + dy * row_sum / remaining
            } else {
                y1
            };
            dice(row, row_sum, x0, y0, x1, band_y1, &mut out);
            if remaining > 0.0 {
                y0 = band_y1;
            }
        } else {
            // Row spans the full height, takes a vertical band.
            let band_x1 = if remaining > 0.0 {
                x0 + dx * row_sum / remaining
            } else {
                x1
            };
            slice(row, row_sum, x0, y0, band_x1, y1, &mut out);
            if remaining > 0.0 {
                x0 = band_x1;
            }
        }

        remaining -= row_sum;
        i0 = i1;
    }

    out
}

/// Lay `row` out left to right, each item as wide as its share of `total`.
fn dice(row: &[f64], total: f64, x0: f64, y0: f64, x1: f64, y1: f64, out: &mut Vec<Rect>) {
    let k = if total > 0.0 { (x1 - x0) / total } else { 0.0 };
    let mut x = x0;
    for &w in row {
        let next = x + w * k;
        out.push(Rect::new(x, y0, next, y1));
        x = next;
    }
}

/// Lay `row` out top to bottom, each item as tall as its share of `total`.
fn slice(row: &[f64], total: f64, x0: f64, y0: f64, x1: f64, y1: f64, out: &mut Vec<Rect>) {
    let k = if total > 0.0 { (y1 - y0) / total } else { 0.0 };
    let mut y = y0;
    for &w in row {
        let next = y + w * k;
        out.push(Rect::new(x0, y, x1, next));
        y = next;
    }
}
