use crate::error::{ProcessingError, Result};

/// Parse a measurement of the form `-?digit+(.digit+)?` into an `f64`.
///
/// Integer digits accumulate as `result * 10 + digit`; each fractional digit
/// adds `digit / divisor` with the divisor growing tenfold. Nothing is
/// allocated and no library float parser is involved.
///
/// The result is not correctly rounded for long fractional parts. With at
/// most one fractional digit it matches `str::parse::<f64>`.
///
/// # Examples
/// ```
/// use station_aggregator::utils::parse_decimal;
///
/// assert_eq!(parse_decimal(b"-12.3").unwrap(), -12.3);
/// assert!(parse_decimal(b"1e5").is_err());
/// ```
pub fn parse_decimal(span: &[u8]) -> Result<f64> {
    parse_decimal_at(span, 0)
}

/// Same as [`parse_decimal`], reporting `offset` as the span's position in
/// the input when the span is malformed.
pub fn parse_decimal_at(span: &[u8], offset: usize) -> Result<f64> {
    let malformed = || ProcessingError::MalformedNumber {
        value: String::from_utf8_lossy(span).into_owned(),
        offset,
    };

    let (negative, digits) = match span.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, span),
    };

    let mut result = 0.0_f64;
    let mut divisor = 1.0_f64;
    let mut integer_digits = 0usize;
    let mut fraction_digits = 0usize;
    let mut seen_point = false;

    for &byte in digits {
        match byte {
            b'0'..=b'9' => {
                let digit = f64::from(byte - b'0');
                if seen_point {
                    divisor *= 10.0;
                    result += digit / divisor;
                    fraction_digits += 1;
                } else {
                    result = result * 10.0 + digit;
                    integer_digits += 1;
                }
            }
            b'.' if !seen_point => seen_point = true,
            _ => return Err(malformed()),
        }
    }

    if integer_digits == 0 || (seen_point && fraction_digits == 0) {
        return Err(malformed());
    }

    Ok(if negative { -result } else { result })
}
