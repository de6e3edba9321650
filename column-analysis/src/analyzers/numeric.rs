//! Locale-independent numeric parsing for column fields.

/// Parses a field as a finite floating-point number.
///
/// Surrounding whitespace is ignored. The grammar is Rust's float syntax:
/// `.` as the decimal separator, optional sign and exponent. Anything else,
/// including `NaN`, `inf` and literals that overflow to infinity, is
/// unparsable and returns `None`.
pub fn parse_numeric(field: &str) -> Option<f64> {
    let value: f64 = field.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Returns true when the value is exactly `0.0` or `1.0`.
pub(crate) fn is_binary(value: f64) -> bool {
    value == 0.0 || value == 1.0
}

/// Arithmetic mean of finite values, `None` when there are none.
///
/// The plain sum is used while it stays finite. If it overflows, the mean is
/// rebuilt one value at a time so inputs near `f64::MAX` keep a finite mean.
pub(crate) fn finite_mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
    I::IntoIter: Clone,
{
    let values = values.into_iter();
    let (sum, count) = values
        .clone()
        .fold((0.0, 0u64), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return None;
    }
    let mean = sum / count as f64;
    if mean.is_finite() {
        return Some(mean);
    }
    let running = values.enumerate().fold(0.0, |acc, (i, v)| {
        let seen = (i + 1) as f64;
        acc * (i as f64 / seen) + v / seen
    });
    Some(running)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_numeric("1"), Some(1.0));
        assert_eq!(parse_numeric("-2.5"), Some(-2.5));
        assert_eq!(parse_numeric("+.5"), Some(0.5));
        assert_eq!(parse_numeric("1e3"), Some(1000.0));
        assert_eq!(parse_numeric("  4.25\t"), Some(4.25));
    }

    #[test]
    fn test_unparsable() {
        for field in ["", "abc", "1,5", "1.2.3", "NaN", "inf", "-Infinity", "1e400", "0x10"] {
            assert_eq!(parse_numeric(field), None, "field {field:?}");
        }
    }

    #[test]
    fn test_finite_mean() {
        assert_eq!(finite_mean(Vec::<f64>::new()), None);
        assert_eq!(finite_mean(vec![1.0, 2.0, 3.0, 4.0]), Some(2.5));
        assert_eq!(finite_mean(vec![1e308, 1e308]), Some(1e308));

        let mixed = finite_mean(vec![1e308, 1e308, -1e308]).unwrap();
        assert!(mixed.is_finite());
        assert!((mixed / 1e308 - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_binary_values() {
        assert!(is_binary(0.0));
        assert!(is_binary(-0.0));
        assert!(is_binary(1.0));
        assert!(!is_binary(0.5));
        assert!(!is_binary(2.0));
    }
}
