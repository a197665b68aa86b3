//! Projection of a boundary into a fixed size pixel frame and filling of the enclosed silhouette.

use crate::errors::RasterizationFailure;
use crate::geometry::aabb2::{aabb_extents, aabb_of_points};
use crate::params::RasterParams;
use image::{GrayImage, Luma};
use ncollide2d::na::Point2;
use tracing::debug;

pub mod fill;

/// Intensity of pixels outside of the silhouette
pub const BACKGROUND: u8 = 255;

/// Intensity of pixels inside of the silhouette
pub const FOREGROUND: u8 = 0;

/// Uniform scale and translation taking boundary coordinates to continuous pixel coordinates. The
/// y axis is flipped so that larger y values appear closer to the top row of the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub x_min: f64,
    pub y_max: f64,
}

impl Projection {
    /// Fits the bounding box of `points` into the frame described by `params`, centered, with the
    /// same scale on both axes.
    pub fn fit(
        points: &[Point2<f64>],
        params: &RasterParams,
    ) -> Result<Projection, RasterizationFailure> {
        let usable = 1.0 - 2.0 * params.padding;
        let avail_w = params.width as f64 * usable;
        let avail_h = params.height as f64 * usable;
        if avail_w <= 0.0 || avail_h <= 0.0 {
            return Err(RasterizationFailure::EmptyFrame {
                width: params.width,
                height: params.height,
            });
        }

        let aabb = aabb_of_points(points).ok_or(RasterizationFailure::NotEnoughPoints(0))?;
        let (dx, dy) = aabb_extents(&aabb);
        if !(dx > 0.0 && dy > 0.0 && dx.is_finite() && dy.is_finite()) {
            return Err(RasterizationFailure::DegenerateBounds { dx, dy });
        }

        let scale = (avail_w / dx).min(avail_h / dy);
        Ok(Projection {
            scale,
            offset_x: (params.width as f64 - dx * scale) / 2.0,
            offset_y: (params.height as f64 - dy * scale) / 2.0,
            x_min: aabb.mins.x,
            y_max: aabb.maxs.y,
        })
    }

    /// Continuous pixel coordinates of a boundary point
    pub fn project(&self, p: &Point2<f64>) -> Point2<f64> {
        Point2::new(
            self.offset_x + (p.x - self.x_min) * self.scale,
            self.offset_y + (self.y_max - p.y) * self.scale,
        )
    }

    /// Pixel coordinates of a boundary point, snapped to the nearest pixel corner
    pub fn to_pixel(&self, p: &Point2<f64>) -> Point2<f64> {
        let q = self.project(p);
        Point2::new(q.x.round(), q.y.round())
    }
}

/// A filled silhouette together with the projection which produced it
#[derive(Debug, Clone)]
pub struct Raster {
    pub image: GrayImage,
    pub projection: Projection,
}

impl Raster {
    pub fn foreground_count(&self) -> usize {
        self.image.pixels().filter(|p| p.0[0] == FOREGROUND).count()
    }
}

/// Rasterizes the polygon bounded by `points` into a `params.width` x `params.height` image. The
/// polygon is implicitly closed and filled with the even-odd rule, sampling at pixel centers.
pub fn rasterize(
    points: &[Point2<f64>],
    params: &RasterParams,
) -> Result<Raster, RasterizationFailure> {
    if points.len() < 3 {
        return Err(RasterizationFailure::NotEnoughPoints(points.len()));
    }

    let projection = Projection::fit(points, params)?;
    let vertices: Vec<Point2<f64>> = points.iter().map(|p| projection.to_pixel(p)).collect();

    let mut image = GrayImage::from_pixel(params.width, params.height, Luma([BACKGROUND]));
    fill::fill_even_odd(&mut image, &vertices, FOREGROUND);

    debug!(
        scale = projection.scale,
        width = params.width,
        height = params.height,
        "rasterized silhouette"
    );

    Ok(Raster { image, projection })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    fn unit_square() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    fn foreground_bounds(image: &GrayImage) -> (u32, u32, u32, u32) {
        let mut b = (u32::MAX, u32::MAX, 0, 0);
        for (x, y, p) in image.enumerate_pixels() {
            if p.0[0] == FOREGROUND {
                b = (b.0.min(x), b.1.min(y), b.2.max(x), b.3.max(y));
            }
        }
        b
    }

    #[test]
    fn test_unit_square_area() {
        let raster = rasterize(&unit_square(), &RasterParams::new(100, 100, 0.05)).unwrap();
        assert_eq!((100, 100), raster.image.dimensions());

        let expected = raster.projection.scale * raster.projection.scale;
        let area = raster.foreground_count() as f64;
        assert!((area - expected).abs() / expected < 0.02);
        assert_relative_eq!(90.0, raster.projection.scale, epsilon = 1e-12);
    }

    #[test]
    fn test_square_without_padding_fills_frame() {
        let raster = rasterize(&unit_square(), &RasterParams::new(40, 40, 0.0)).unwrap();
        assert_eq!(1600, raster.foreground_count());
    }

    #[test]
    fn test_aspect_ratio_preserved() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let raster = rasterize(&points, &RasterParams::new(100, 100, 0.05)).unwrap();
        let (x0, y0, x1, y1) = foreground_bounds(&raster.image);

        assert_eq!(90, x1 - x0 + 1);
        assert_eq!(45, y1 - y0 + 1);
        assert_eq!(4050, raster.foreground_count());
    }

    #[test]
    fn test_shape_is_height_by_width() {
        let raster = rasterize(&unit_square(), &RasterParams::new(64, 32, 0.1)).unwrap();
        assert_eq!(64, raster.image.width());
        assert_eq!(32, raster.image.height());
        assert!(raster.foreground_count() > 0);
    }

    #[test]
    fn test_y_axis_points_up() {
        // A triangle whose wide end sits at the top of the data frame
        let points = vec![
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.5, 0.0),
        ];
        let raster = rasterize(&points, &RasterParams::new(50, 50, 0.1)).unwrap();
        let row_count = |y: u32| {
            (0..50)
                .filter(|x| raster.image.get_pixel(*x, y).0[0] == FOREGROUND)
                .count()
        };

        assert!(row_count(8) > row_count(40));
    }

    #[test]
    fn test_rasterization_is_deterministic() {
        let points: Vec<Point2<f64>> = (0..37)
            .map(|i| {
                let t = i as f64 * std::f64::consts::TAU / 37.0;
                Point2::new(t.cos() * 1.7, t.sin() * 0.4 + 0.1 * (3.0 * t).sin())
            })
            .collect();
        let params = RasterParams::new(128, 64, 0.05);

        let a = rasterize(&points, &params).unwrap();
        let b = rasterize(&points, &params).unwrap();
        assert_eq!(a.image.as_raw(), b.image.as_raw());
    }

    #[test_case(vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)])]
    #[test_case(vec![(0.5, 0.0), (0.5, 1.0), (0.5, 2.0)])]
    #[test_case(vec![(0.5, 0.5), (0.5, 0.5), (0.5, 0.5)])]
    fn test_degenerate_bounds(p: Vec<(f64, f64)>) {
        let points: Vec<Point2<f64>> = p.iter().map(|(x, y)| Point2::new(*x, *y)).collect();
        let result = rasterize(&points, &RasterParams::default());
        assert!(matches!(
            result,
            Err(RasterizationFailure::DegenerateBounds { .. })
        ));
    }

    #[test]
    fn test_too_few_points() {
        let points = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)];
        let result = rasterize(&points, &RasterParams::default());
        assert!(matches!(result, Err(RasterizationFailure::NotEnoughPoints(2))));
    }

    #[test]
    fn test_empty_frame() {
        let result = rasterize(&unit_square(), &RasterParams::new(0, 10, 0.05));
        assert!(matches!(
            result,
            Err(RasterizationFailure::EmptyFrame {
                width: 0,
                height: 10
            })
        ));
    }
}
