use crate::algorithms::reflect_101;
use crate::params::{SigmaMode, SmoothParams};
use ncollide2d::na::DMatrix;

/// Sigma used when the requested one is not positive, derived from the kernel size alone
pub fn default_sigma(kernel: usize) -> f64 {
    0.3 * ((kernel as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1D Gaussian weights of odd length `size`
pub fn gaussian_kernel(size: usize, sigma: f64) -> Vec<f64> {
    let sigma = if sigma > 0.0 && sigma.is_finite() {
        sigma
    } else {
        default_sigma(size)
    };

    let center = (size as f64 - 1.0) / 2.0;
    let weights: Vec<f64> = (0..size)
        .map(|i| {
            let d = i as f64 - center;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let total: f64 = weights.iter().sum();

    weights.iter().map(|w| w / total).collect()
}

/// Resolves the sigma of a smoothing pass over `heatmap`
pub fn resolve_sigma(heatmap: &DMatrix<f64>, mode: SigmaMode) -> f64 {
    match mode {
        SigmaMode::PeakValue => heatmap.iter().copied().fold(0.0, f64::max),
        SigmaMode::Fixed(s) => s,
    }
}

/// Separable Gaussian blur with mirrored borders. The output has the same shape as the input and,
/// since every output sample is a convex combination of inputs, never exceeds the input range.
pub fn smooth_heatmap(heatmap: &DMatrix<f64>, params: &SmoothParams) -> DMatrix<f64> {
    let (rows, cols) = heatmap.shape();
    if rows == 0 || cols == 0 || params.kernel <= 1 {
        return heatmap.clone();
    }

    let kernel = gaussian_kernel(params.kernel, resolve_sigma(heatmap, params.sigma));
    let half = (params.kernel / 2) as isize;

    let mut horizontal = DMatrix::<f64>::zeros(rows, cols);
    for r in 0..rows {
        for c in 0..cols {
            horizontal[(r, c)] = kernel
                .iter()
                .enumerate()
                .map(|(k, w)| w * heatmap[(r, reflect_101(c as isize + k as isize - half, cols))])
                .sum();
        }
    }

    let mut result = DMatrix::zeros(rows, cols);
    for r in 0..rows {
        for c in 0..cols {
            result[(r, c)] = kernel
                .iter()
                .enumerate()
                .map(|(k, w)| w * horizontal[(reflect_101(r as isize + k as isize - half, rows), c)])
                .sum();
        }
    }

    result
}
