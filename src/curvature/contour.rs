use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType};
use ncollide2d::na::Point2;

/// A closed, ordered loop of boundary pixels. Consecutive points are 8-connected and the last
/// point connects back to the first. Coordinates are `(column, row)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub points: Vec<Point2<usize>>,
}

impl Contour {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Marks every pixel darker than `threshold` as foreground (255) and everything else as
/// background (0).
pub fn binarize(image: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        if image.get_pixel(x, y).0[0] < threshold {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Traces the outermost boundaries of the dark regions of `image`. Hole borders and anything
/// nested inside another region are dropped.
pub fn find_outer_contours(image: &GrayImage, threshold: u8) -> Vec<Contour> {
    let binary = binarize(image, threshold);

    find_contours::<u32>(&binary)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| Contour {
            points: c
                .points
                .iter()
                .map(|p| Point2::new(p.x as usize, p.y as usize))
                .collect(),
        })
        .filter(|c| !c.is_empty())
        .collect()
}
