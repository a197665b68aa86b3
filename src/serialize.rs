use itertools::Itertools;
use std::num::ParseFloatError;

/// Joins numeric values into a single whitespace separated string, the format used for coordinate
/// columns in the tabular datasets.
pub fn floats_to_string(values: &[f64]) -> String {
    values.iter().join(" ")
}

/// Parses a whitespace separated string of numbers back into a vector.
pub fn string_to_floats(text: &str) -> Result<Vec<f64>, ParseFloatError> {
    text.split_whitespace().map(str::parse::<f64>).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(&[], "")]
    #[test_case(&[1.0], "1")]
    #[test_case(&[0.5, -0.025, 1e-7], "0.5 -0.025 0.0000001")]
    fn test_floats_to_string(values: &[f64], e: &str) {
        assert_eq!(e, floats_to_string(values));
    }

    #[test]
    fn test_string_to_floats_tolerates_extra_whitespace() {
        let values = string_to_floats("  1.0\t0.25   -3e-2\n").unwrap();
        assert_eq!(vec![1.0, 0.25, -0.03], values);
    }

    #[test]
    fn test_string_to_floats_rejects_garbage() {
        assert!(string_to_floats("1.0 abc").is_err());
    }
}
