use ncollide2d::na::RealField;

/// Finds the index of the last value in an ascending slice which is less than or equal to the
/// test value. Values below the first element return 0 and values above the last element return
/// the last index.
pub fn preceding_index_search<N: RealField + Copy>(slice: &[N], test_value: N) -> usize {
    if slice.len() <= 1 || slice[1] > test_value {
        return 0;
    }

    let mut a = 1;
    let mut b = slice.len() - 1;
    if slice[b] <= test_value {
        return b;
    }

    while b > a + 1 {
        let check = (a + b) / 2;
        if test_value >= slice[check] {
            a = check;
        } else {
            b = check;
        }
    }
    a
}

/// Generates `count` evenly spaced values from `start` to `end`, both ends included exactly.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count - 1).map(|i| start + step * i as f64).collect();
            values.push(end);
            values
        }
    }
}

/// Piecewise linear interpolation of `ys` over the ascending knots `xs`, evaluated at `x`. Values
/// outside of the knot range are clamped to the first/last y value. Evaluating exactly at a knot
/// returns that knot's y value unchanged.
///
/// The caller is responsible for `xs` being non-decreasing and the same length as `ys`.
pub fn interp(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }

    let last = xs.len() - 1;
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[last] {
        return ys[last];
    }

    let i = preceding_index_search(xs, x);
    let span = xs[i + 1] - xs[i];
    if span <= 0.0 {
        return ys[i];
    }

    let f = (x - xs[i]) / span;
    ys[i] + f * (ys[i + 1] - ys[i])
}

/// Maps an index which may fall outside of `0..n` back inside by mirroring around the first and
/// last elements without repeating them, e.g. `-1 -> 1` and `n -> n - 2`.
pub fn reflect_101(i: isize, n: usize) -> usize {
    if n <= 1 {
        return 0;
    }

    let period = 2 * (n as isize - 1);
    let m = i.rem_euclid(period);
    if m >= n as isize {
        (period - m) as usize
    } else {
        m as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::prelude::*;
    use test_case::test_case;

    fn naive(slice: &[f64], test_value: f64) -> usize {
        if slice.len() <= 1 || slice[1] > test_value {
            return 0;
        }

        if slice[slice.len() - 1] <= test_value {
            return slice.len() - 1;
        }

        for (i, v) in slice.iter().skip(1).enumerate() {
            if *v > test_value {
                return i;
            }
        }

        slice.len() - 1
    }

    #[test_case(0, -1.0)]
    #[test_case(0, 0.05)]
    #[test_case(1, 0.1)]
    #[test_case(2, 0.25)]
    #[test_case(4, 0.5)]
    fn test_simple_binary_search(e: usize, v: f64) {
        let test = [0.0, 0.1, 0.2, 0.3, 0.4];
        assert_eq!(e, preceding_index_search(&test, v));
    }

    #[test]
    fn test_binary_search_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let count: usize = rng.gen_range(2..200);
            let mut values: Vec<f64> = (0..count).map(|_| rng.gen_range(-10.0..10.0)).collect();
            values.sort_by(|a, b| a.partial_cmp(b).unwrap());

            for _ in 0..100 {
                let test = rng.gen_range(-11.0..11.0);
                assert_eq!(naive(&values, test), preceding_index_search(&values, test));
            }
        }
    }

    #[test]
    fn test_linspace_ends_exact() {
        let values = linspace(0.001, 0.997, 7);
        assert_eq!(7, values.len());
        assert_eq!(0.001, values[0]);
        assert_eq!(0.997, values[6]);
        assert_relative_eq!(0.001 + 0.996 / 2.0, values[3], epsilon = 1e-12);
    }

    #[test_case(0, 0)]
    #[test_case(1, 1)]
    #[test_case(2, 2)]
    fn test_linspace_small_counts(count: usize, expected: usize) {
        assert_eq!(expected, linspace(1.0, 2.0, count).len());
    }

    #[test_case(-1.0, 0.0)]
    #[test_case(0.0, 0.0)]
    #[test_case(0.5, 1.0)]
    #[test_case(1.0, 2.0)]
    #[test_case(1.25, 1.5)]
    #[test_case(3.0, 0.0)]
    fn test_interp(x: f64, e: f64) {
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, 2.0, 0.0];
        assert_relative_eq!(e, interp(&xs, &ys, x), epsilon = 1e-12);
    }

    #[test]
    fn test_interp_at_knot_is_bit_identical() {
        let xs = [0.1, 0.3, 0.7];
        let ys: [f64; 3] = [0.123456789, -0.0417, 0.9];
        assert_eq!(ys[1].to_bits(), interp(&xs, &ys, 0.3).to_bits());
    }

    #[test]
    fn test_interp_repeated_knot() {
        let xs = [0.0, 1.0, 1.0, 2.0];
        let ys = [0.0, 1.0, 5.0, 5.0];
        assert_relative_eq!(0.5, interp(&xs, &ys, 0.5), epsilon = 1e-12);
        assert_relative_eq!(5.0, interp(&xs, &ys, 1.5), epsilon = 1e-12);
    }

    #[test_case(-1, 5, 1)]
    #[test_case(-2, 5, 2)]
    #[test_case(0, 5, 0)]
    #[test_case(4, 5, 4)]
    #[test_case(5, 5, 3)]
    #[test_case(6, 5, 2)]
    #[test_case(-3, 2, 1)]
    #[test_case(7, 1, 0)]
    fn test_reflect_101(i: isize, n: usize, e: usize) {
        assert_eq!(e, reflect_101(i, n));
    }
}
