//! Scanline polygon filling.

use image::{GrayImage, Luma};
use ncollide2d::na::Point2;

/// Columns of row `row` whose pixel centers lie inside the polygon under the even-odd rule. The
/// polygon is implicitly closed. Each returned span is half open.
pub fn row_spans(vertices: &[Point2<f64>], row: u32, width: u32) -> Vec<(u32, u32)> {
    let yc = row as f64 + 0.5;
    let mut crossings: Vec<f64> = Vec::new();

    for (i, a) in vertices.iter().enumerate() {
        let b = &vertices[(i + 1) % vertices.len()];
        if (a.y > yc) != (b.y > yc) {
            let f = (yc - a.y) / (b.y - a.y);
            crossings.push(a.x + f * (b.x - a.x));
        }
    }
    crossings.sort_by(|a, b| a.total_cmp(b));

    crossings
        .chunks_exact(2)
        .filter_map(|pair| {
            let x0 = (pair[0] - 0.5).ceil().max(0.0);
            let x1 = (pair[1] - 0.5).ceil().min(width as f64);
            if x1 > x0 {
                Some((x0 as u32, x1 as u32))
            } else {
                None
            }
        })
        .collect()
}

/// Sets every pixel whose center lies inside the polygon to `value`
pub fn fill_even_odd(image: &mut GrayImage, vertices: &[Point2<f64>], value: u8) {
    if vertices.len() < 3 {
        return;
    }

    let (width, height) = image.dimensions();
    for row in 0..height {
        for (x0, x1) in row_spans(vertices, row, width) {
            for x in x0..x1 {
                image.put_pixel(x, row, Luma([value]));
            }
        }
    }
}
