use crate::algorithms::reflect_101;
use image::GrayImage;
use ncollide2d::na::{DMatrix, Vector2};

type Kernel3 = [[f64; 3]; 3];

const SCHARR_X: Kernel3 = [[-3.0, 0.0, 3.0], [-10.0, 0.0, 10.0], [-3.0, 0.0, 3.0]];
const SCHARR_Y: Kernel3 = [[-3.0, -10.0, -3.0], [0.0, 0.0, 0.0], [3.0, 10.0, 3.0]];

/// Horizontal and vertical intensity derivatives of an image, one sample per pixel. Both matrices
/// are indexed `(row, column)`.
#[derive(Debug, Clone)]
pub struct GradientField {
    pub gx: DMatrix<f64>,
    pub gy: DMatrix<f64>,
}

impl GradientField {
    pub fn at(&self, row: usize, col: usize) -> Vector2<f64> {
        Vector2::new(self.gx[(row, col)], self.gy[(row, col)])
    }

    pub fn shape(&self) -> (usize, usize) {
        self.gx.shape()
    }
}

/// Scharr derivatives of `image` on the raw 0-255 intensity scale. Borders are mirrored without
/// repeating the edge pixel. `bias` is added to every horizontal sample so that no gradient is
/// exactly the zero vector in flat regions.
pub fn scharr_gradients(image: &GrayImage, bias: f64) -> GradientField {
    let (w, h) = (image.width() as usize, image.height() as usize);
    let mut gx = DMatrix::zeros(h, w);
    let mut gy = DMatrix::zeros(h, w);

    let value = |row: usize, col: usize| image.get_pixel(col as u32, row as u32).0[0] as f64;

    for row in 0..h {
        let rows = [-1isize, 0, 1].map(|d| reflect_101(row as isize + d, h));
        for col in 0..w {
            let cols = [-1isize, 0, 1].map(|d| reflect_101(col as isize + d, w));

            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for (ky, r) in rows.iter().enumerate() {
                for (kx, c) in cols.iter().enumerate() {
                    let v = value(*r, *c);
                    sum_x += v * SCHARR_X[ky][kx];
                    sum_y += v * SCHARR_Y[ky][kx];
                }
            }

            gx[(row, col)] = sum_x + bias;
            gy[(row, col)] = sum_y;
        }
    }

    GradientField { gx, gy }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::Luma;

    #[test]
    fn test_flat_image_has_only_bias() {
        let image = GrayImage::from_pixel(6, 4, Luma([255]));
        let field = scharr_gradients(&image, 1e-4);

        assert_eq!((4, 6), field.shape());
        assert!(field.gx.iter().all(|v| *v == 1e-4));
        assert!(field.gy.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_vertical_step_edge() {
        // Dark on the left, bright on the right
        let image = GrayImage::from_fn(6, 5, |x, _| if x < 3 { Luma([0]) } else { Luma([255]) });
        let field = scharr_gradients(&image, 1e-4);

        assert_relative_eq!(4080.0 + 1e-4, field.gx[(2, 2)], epsilon = 1e-9);
        assert_relative_eq!(4080.0 + 1e-4, field.gx[(2, 3)], epsilon = 1e-9);
        assert_relative_eq!(1e-4, field.gx[(2, 0)], epsilon = 1e-9);
        assert_relative_eq!(0.0, field.gy[(2, 2)], epsilon = 1e-9);
    }

    #[test]
    fn test_horizontal_step_edge_points_down() {
        // Bright above, dark below, so intensity decreases with the row index
        let image = GrayImage::from_fn(5, 6, |_, y| if y < 3 { Luma([255]) } else { Luma([0]) });
        let field = scharr_gradients(&image, 0.0);

        let g = field.at(3, 2);
        assert_relative_eq!(0.0, g.x, epsilon = 1e-9);
        assert_relative_eq!(-4080.0, g.y, epsilon = 1e-9);
    }

    #[test]
    fn test_border_is_mirrored() {
        // With reflect-101 a step touching the frame edge still registers at the first column
        let image = GrayImage::from_fn(4, 3, |x, _| if x == 0 { Luma([0]) } else { Luma([255]) });
        let field = scharr_gradients(&image, 0.0);

        assert_relative_eq!(0.0, field.gx[(1, 0)], epsilon = 1e-9);
        assert_relative_eq!(4080.0, field.gx[(1, 1)], epsilon = 1e-9);
    }
}
