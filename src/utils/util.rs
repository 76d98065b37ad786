use crate::error::VcfFrameResult;
use log;
use std::{fmt::Display, sync::Once};

pub type Result<T> = VcfFrameResult<T>;

pub const MISSING_INTEGER: i32 = i32::MIN;
pub const VECTOR_END_INTEGER: i32 = i32::MIN + 1;
pub const MISSING_FLOAT: f32 = f32::from_bits(0x7F80_0001);
pub const VECTOR_END_FLOAT: f32 = f32::from_bits(0x7F80_0002);

#[allow(unused)]
static INIT_LOG: Once = Once::new();

#[allow(unused)]
pub fn init_logger() {
    INIT_LOG.call_once(|| {
        env_logger::builder()
            .filter_level(log::LevelFilter::Trace)
            .is_test(true)
            .init();
    });
}

pub fn handle_error_and_exit(err: impl Display) -> ! {
    log::error!("{err}");
    std::process::exit(1);
}

/// Splits `value` on the first occurrence of `sep`.
///
/// Returns the head and, when the separator occurs, the untouched tail.
pub fn split_first(value: &str, sep: char) -> (&str, Option<&str>) {
    match value.split_once(sep) {
        Some((head, tail)) => (head, Some(tail)),
        None => (value, None),
    }
}

/// Widens an htslib float through its shortest decimal form, so `0.1f32`
/// becomes `0.1` rather than `0.10000000149011612`.
pub fn widen_f32(value: f32) -> f64 {
    value.to_string().parse().unwrap_or(f64::from(value))
}

pub fn round_to(value: f64, precision: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(precision as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

pub fn format_number_with_commas(n: usize) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let mut result = String::with_capacity(digits.len() + (digits.len() - 1) / 3);
    for (digit_count, c) in digits.chars().rev().enumerate() {
        if digit_count > 0 && digit_count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_split_first() {
        assert_eq!(split_first("A,G", ','), ("A", Some("G")));
        assert_eq!(split_first("A,G,T", ','), ("A", Some("G,T")));
        assert_eq!(split_first("A", ','), ("A", None));
        assert_eq!(split_first("", ','), ("", None));
        assert_eq!(split_first("benign:0.01", ':'), ("benign", Some("0.01")));
    }

    #[test]
    fn test_widen_f32() {
        assert_eq!(widen_f32(0.1), 0.1);
        assert_eq!(widen_f32(50.0), 50.0);
        assert_eq!(widen_f32(0.998), 0.998);
    }

    #[test]
    fn test_round_to() {
        assert_relative_eq!(round_to(0.123_456_789, 6), 0.123_457);
        assert_relative_eq!(round_to(0.5, 0), 1.0);
        assert_relative_eq!(round_to(12.0, 3), 12.0);
        assert!(round_to(f64::NAN, 2).is_nan());
        assert_eq!(round_to(f64::INFINITY, 2), f64::INFINITY);
    }

    #[test]
    fn test_format_number_with_commas() {
        assert_eq!(format_number_with_commas(0), "0");
        assert_eq!(format_number_with_commas(100), "100");
        assert_eq!(format_number_with_commas(1_000), "1,000");
        assert_eq!(format_number_with_commas(1_234_567), "1,234,567");
    }
}
