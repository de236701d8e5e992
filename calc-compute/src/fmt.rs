//! Formats results to fit a fixed-width display.
//!
//! A result is rendered with as many significant digits as the display allows: the formatter tries
//! every precision from the display width down to [`MIN_PRECISION`], renders the value in general
//! notation (fixed or scientific, whichever suits the magnitude), trims redundant characters, and
//! keeps the first rendering that fits.

use calc_error::Error;
use crate::{error::NotANumber, locale::Locale};

/// The lowest precision the formatter will try. If the value does not fit the display at this
/// precision, it is shown anyway.
pub const MIN_PRECISION: usize = 7;

/// Formats `value` with `precision` significant digits in general notation, like C's `%g` without
/// the `#` flag.
///
/// After rounding to `precision` significant digits, values whose decimal exponent lies in
/// `-4..precision` are written in fixed notation, and all others in scientific notation with a
/// signed, two-digit exponent. Trailing zeros are kept; see [`strip`].
pub fn format_general(value: f64, precision: usize) -> String {
    let precision = precision.max(1);
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return format!("{:.*}", precision - 1, value);
    }

    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent = exponent.parse::<i32>().unwrap_or(0);

    if (-4..precision as i32).contains(&exponent) {
        format!("{:.*}", (precision as i32 - 1 - exponent) as usize, value)
    } else {
        format!(
            "{}e{}{:02}",
            mantissa,
            if exponent < 0 { '-' } else { '+' },
            exponent.unsigned_abs(),
        )
    }
}

/// Removes redundant characters from a number in general notation:
///
/// - a `+` and leading zeros in the exponent (`1.5e+07` becomes `1.5e7`),
/// - trailing zeros in the fractional part of the mantissa, and the decimal separator if nothing
///   is left after it (`2.500` becomes `2.5`, `4.000` becomes `4`).
///
/// Both `.` and `,` are accepted as the decimal separator.
pub fn strip(rendered: &str) -> String {
    let (mantissa, exponent) = match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent = exponent.strip_prefix('+').unwrap_or(exponent);
            let exponent = match exponent.parse::<i32>() {
                Ok(exponent) => exponent.to_string(),
                Err(_) => exponent.to_string(),
            };
            (mantissa, Some(exponent))
        },
        None => (rendered, None),
    };

    let mantissa = match mantissa.find(|c: char| c == '.' || c == ',') {
        Some(separator) => {
            let trimmed = mantissa.trim_end_matches('0');
            if trimmed.len() == separator + 1 {
                &trimmed[..separator]
            } else {
                trimmed
            }
        },
        None => mantissa,
    };

    // never strip the mantissa down to nothing, e.g. for a malformed ".000"
    let mantissa = if mantissa.is_empty() || mantissa == "-" {
        format!("{}0", mantissa)
    } else {
        mantissa.to_string()
    };

    match exponent {
        Some(exponent) => format!("{}e{}", mantissa, exponent),
        None => mantissa,
    }
}

/// Renders `value` in at most `width` characters where possible, preferring higher precision.
///
/// The rendered length is only a soft target: if the value does not fit at [`MIN_PRECISION`], or
/// the width itself is below [`MIN_PRECISION`], the rendering at [`MIN_PRECISION`] is returned.
///
/// The returned string uses ASCII signs; see [`format_result`] for the display form.
pub fn fit_width(value: f64, width: usize) -> String {
    let mut result = None;
    for precision in (MIN_PRECISION..=width).rev() {
        let rendered = strip(&format_general(value, precision));
        let fits = rendered.chars().count() <= width;
        result = Some(rendered);
        if fits {
            break;
        }
    }

    result.unwrap_or_else(|| strip(&format_general(value, MIN_PRECISION)))
}

/// Formats an evaluation result for the display: fits it to `width` (see [`fit_width`]), then
/// substitutes the locale's minus sign for a leading `-`, and the locale's infinity glyph for
/// infinite values.
///
/// Returns an error if the value is NaN.
pub fn format_result(value: f64, width: usize, locale: &Locale) -> Result<String, Error> {
    if value.is_nan() {
        return Err(Error::new(Vec::new(), NotANumber));
    }

    if value.is_infinite() {
        return Ok(if value.is_sign_negative() {
            format!("{}{}", locale.minus, locale.infinity)
        } else {
            locale.infinity.clone()
        });
    }

    let rendered = fit_width(value, width);
    Ok(match rendered.strip_prefix('-') {
        Some(magnitude) => format!("{}{}", locale.minus, magnitude),
        None => rendered,
    })
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_is_relative_eq,
        afe_relative_error_msg,
        afe_abs,
        assert_float_relative_eq,
    };
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn general_notation() {
        assert_eq!(format_general(4.0, 10), "4.000000000");
        assert_eq!(format_general(1.0 / 3.0, 8), "0.33333333");
        assert_eq!(format_general(-0.00001, 8), "-1.0000000e-05");
        assert_eq!(format_general(0.0001, 7), "0.0001000000");
        assert_eq!(format_general(1234567.0, 7), "1234567");
        assert_eq!(format_general(12345678.0, 7), "1.234568e+07");
        assert_eq!(format_general(0.0, 7), "0.000000");
        assert_eq!(format_general(1e300, 7), "1.000000e+300");
    }

    #[test]
    fn rounding_moves_exponent() {
        // 9999999.6 rounds up to 1.000000e7 at 7 digits, which is too large for fixed notation
        assert_eq!(format_general(9999999.6, 7), "1.000000e+07");
    }

    #[test]
    fn strip_redundant_characters() {
        assert_eq!(strip("4.000000000"), "4");
        assert_eq!(strip("2.500"), "2.5");
        assert_eq!(strip("-1.0000000e-05"), "-1e-5");
        assert_eq!(strip("1.500000e+07"), "1.5e7");
        assert_eq!(strip("1234567"), "1234567");
        assert_eq!(strip("2,500"), "2,5");
        assert_eq!(strip("100"), "100");
        assert_eq!(strip(".000"), "0");
    }

    #[test]
    fn strip_is_idempotent() {
        for minimal in ["4", "2.5", "-1e-5", "1.5e7", "0.33333333", "1e300"] {
            assert_eq!(strip(minimal), minimal);
            assert_eq!(strip(&strip(minimal)), minimal);
        }
    }

    #[test]
    fn fits_width() {
        assert_eq!(fit_width(4.0, 10), "4");
        assert_eq!(fit_width(1.0 / 3.0, 10), "0.33333333");
        assert_eq!(fit_width(-0.00001, 8), "-1e-5");
        assert_eq!(fit_width(2.0f64.sqrt(), 12), "1.4142135624");
    }

    #[test]
    fn width_is_soft_below_floor() {
        // nothing fits in 3 characters; the floor precision is used
        assert_eq!(fit_width(1.0 / 3.0, 3), "0.3333333");
        assert_eq!(fit_width(2.0, 3), "2");
        assert_eq!(fit_width(-1.0 / 3.0, 8), "-0.3333333");
        assert_eq!(fit_width(123456789012.0, 10), "1.234568e11");
    }

    #[test]
    fn width_bound() {
        let values = [1.0 / 3.0, -2.0 / 7.0, 1e-9, 6.02214076e23, 123456.789, -98765.4321];
        for width in 1..=16 {
            for value in values {
                let rendered = fit_width(value, width);
                let floor = strip(&format_general(value, MIN_PRECISION));
                assert!(
                    rendered.chars().count() <= width || rendered == floor,
                    "{} at width {}: {}", value, width, rendered,
                );
            }
        }
    }

    #[test]
    fn round_trip() {
        let values = [1.0 / 3.0, std::f64::consts::PI, -2.0 / 7.0, 6.02214076e23, 1.5e-8];
        for value in values {
            let rendered = fit_width(value, 16);
            let parsed = rendered.parse::<f64>().unwrap();
            assert_float_relative_eq!(parsed, value, 1e-9);
        }
    }

    #[test]
    fn display_glyphs() {
        let locale = Locale::default();
        assert_eq!(format_result(-0.00001, 8, &locale).unwrap(), "\u{2212}1e-5");
        assert_eq!(format_result(-4.0, 10, &locale).unwrap(), "\u{2212}4");
        assert_eq!(format_result(f64::INFINITY, 10, &locale).unwrap(), "\u{221e}");
        assert_eq!(format_result(f64::NEG_INFINITY, 10, &locale).unwrap(), "\u{2212}\u{221e}");
        assert!(format_result(f64::NAN, 10, &locale).unwrap_err().is::<NotANumber>());
    }
}
