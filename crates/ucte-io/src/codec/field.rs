//! Fixed-width field codec.
//!
//! Decoding is lenient: a blank or unparseable slice is an absent value, never
//! an error. Rendering always produces a string for any input, clamping
//! numbers that do not fit the column.
//!
//! Numbers are rendered with as many decimals as the column allows:
//!
//! | rule | condition (`v`, width `w`)          | output                       |
//! |------|--------------------------------------|------------------------------|
//! | 1    | absent                               | `w` blanks                   |
//! | 2    | text                                 | left-justified, cut to `w`   |
//! | 3    | `v > 10^w-1` / `v < -10^(w-1)+1`     | the bound, unpadded          |
//! | 4    | `v > 10^(w-2)-1`                     | no decimals, width `w`       |
//! | 5    | `v < -10^(w-3)+1`                    | no decimals, width `w`       |
//! | 6    | otherwise                            | dynamic decimals, width `w`  |
//!
//! Decimal rounding is correctly rounded on the exact binary value with ties
//! to even, so `2.5` renders as `2` in a one-character column.

use std::fmt;

/// Value type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Real,
}

/// A decoded, non-absent field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Real(f64),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            FieldValue::Real(v) => Some(*v),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Real(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Real(v) => write!(f, "{}", v),
        }
    }
}

/// Decode one column slice. Blank text is absent as well.
pub fn decode_field(raw: &str, kind: FieldKind) -> Option<FieldValue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match kind {
        FieldKind::Text => Some(FieldValue::Text(trimmed.to_string())),
        FieldKind::Integer => trimmed.parse::<i64>().ok().map(FieldValue::Integer),
        FieldKind::Real => trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(FieldValue::Real),
    }
}

/// Render a value into a column of `width` characters.
pub fn render(value: Option<&FieldValue>, width: usize) -> String {
    match value {
        None => " ".repeat(width),
        Some(FieldValue::Text(text)) => render_text(text, width),
        Some(FieldValue::Integer(i)) => render_number(*i as f64, true, width),
        Some(FieldValue::Real(v)) if v.is_finite() => render_number(*v, false, width),
        Some(FieldValue::Real(_)) => " ".repeat(width),
    }
}

fn render_text(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width - len));
    out
}

fn render_number(v: f64, integer: bool, width: usize) -> String {
    let w = width as i32;
    let upper = 10f64.powi(w) - 1.0;
    let lower = 1.0 - 10f64.powi(w - 1);

    if v > upper {
        return format!("{}", upper as i64);
    }
    if v < lower {
        return format!("{}", lower as i64);
    }
    if v > 10f64.powi(w - 2) - 1.0 {
        return format!("{:>width$.0}", v, width = width);
    }
    if v < 1.0 - 10f64.powi(w - 3) {
        return format!("{:>width$.0}", v, width = width);
    }

    let mut decimals = if integer {
        0
    } else {
        w - (v.trunc() as i64).to_string().len() as i32 - 1
    };
    if v.is_sign_negative() {
        decimals -= 1;
    }
    let mut decimals = decimals.max(0) as usize;

    let mut out = format!("{:>width$.prec$}", v, width = width, prec = decimals);
    // Rounding can carry into a new integer digit (9.996 -> 10.00).
    while out.len() > width && decimals > 0 {
        decimals -= 1;
        out = format!("{:>width$.prec$}", v, width = width, prec = decimals);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn real(v: f64, w: usize) -> String {
        render(Some(&FieldValue::Real(v)), w)
    }

    fn int(v: i64, w: usize) -> String {
        render(Some(&FieldValue::Integer(v)), w)
    }

    #[test]
    fn test_absent_and_text() {
        assert_eq!(render(None, 6), "      ");
        assert_eq!(render(Some(&"SK".into()), 4), "SK  ");
        assert_eq!(render(Some(&"BYSTRICANY 380".into()), 12), "BYSTRICANY 3");
        assert_eq!(render(Some(&"ŽILINA".into()), 8), "ŽILINA  ");
    }

    #[test]
    fn test_saturation() {
        assert_eq!(real(1_000_000.0, 6), "999999");
        assert_eq!(real(-1_000_000.0, 6), "-99999");
        assert_eq!(int(12, 1), "9");
        assert_eq!(int(-3, 1), "0");
    }

    #[test]
    fn test_integer_digits_only_when_wide() {
        assert_eq!(real(1_234_567.8, 7), "1234568");
        assert_eq!(real(99_999.5, 7), " 100000");
        assert_eq!(real(-12_345.6, 7), " -12346");
        assert_eq!(real(-10_000.0, 7), " -10000");
    }

    #[test]
    fn test_sign_consumes_a_decimal() {
        assert_eq!(real(123.456, 7), "123.456");
        assert_eq!(real(-123.456, 7), " -123.5");
        assert_eq!(real(-150.0, 7), " -150.0");
        assert_eq!(real(-0.5, 6), "-0.500");
        assert_eq!(real(-0.0, 6), "-0.000");
        assert_eq!(real(-999.99, 7), "-1000.0");
        assert_eq!(real(-9999.0, 7), "  -9999");
    }

    #[test]
    fn test_dynamic_decimals() {
        assert_eq!(real(380.0, 6), "380.00");
        assert_eq!(real(10.0, 5), "10.00");
        assert_eq!(real(0.1234, 6), "0.1234");
        assert_eq!(real(0.0012, 6), "0.0012");
        assert_eq!(real(0.5, 6), "0.5000");
        assert_eq!(real(1.25, 5), "1.250");
        assert_eq!(real(1.0, 8), "1.000000");
        assert_eq!(real(-30.0, 5), "  -30");
    }

    #[test]
    fn test_integers() {
        assert_eq!(int(400, 6), "   400");
        assert_eq!(int(0, 1), "0");
        assert_eq!(int(5, 3), "  5");
        assert_eq!(int(16, 3), " 16");
        assert_eq!(int(12, 2), "12");
        assert_eq!(int(-5, 3), " -5");
        assert_eq!(int(-8, 3), " -8");
        assert_eq!(int(-3, 2), "-3");
        assert_eq!(int(0, 2), " 0");
        assert_eq!(int(0, 3), "  0");
    }

    #[test]
    fn test_ties_round_to_even() {
        assert_eq!(real(2.5, 1), "2");
        assert_eq!(real(1.5, 1), "2");
        assert_eq!(real(2.5, 3), "2.5");
    }

    #[test]
    fn test_rounding_carry_stays_in_column() {
        assert_eq!(real(9.996, 4), "10.0");
        assert_eq!(real(9.96, 3), " 10");
    }

    #[test]
    fn test_non_finite_is_absent() {
        assert_eq!(real(f64::NAN, 5), "     ");
        assert_eq!(real(f64::INFINITY, 5), "     ");
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode_field(" 0.123", FieldKind::Real), Some(FieldValue::Real(0.123)));
        assert_eq!(decode_field("   400", FieldKind::Integer), Some(FieldValue::Integer(400)));
        assert_eq!(decode_field("  SK  ", FieldKind::Text), Some("SK".into()));
        assert_eq!(decode_field("      ", FieldKind::Real), None);
        assert_eq!(decode_field("      ", FieldKind::Text), None);
        assert_eq!(decode_field(" 1.5  ", FieldKind::Integer), None);
        assert_eq!(decode_field("abc", FieldKind::Real), None);
        assert_eq!(decode_field("   nan", FieldKind::Real), None);
        assert_eq!(decode_field("   .25", FieldKind::Real), Some(FieldValue::Real(0.25)));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    /// Digits left of the decimal point, sign and padding excluded.
    fn integer_digits(rendered: &str) -> usize {
        rendered
            .trim()
            .trim_start_matches('-')
            .split('.')
            .next()
            .map_or(0, str::len)
    }

    fn check_magnitude_never_loses_digits(a: f64, b: f64, width: usize) -> Result<(), TestCaseError> {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        for sign in [1.0, -1.0] {
            let lo = render(Some(&FieldValue::Real(sign * small)), width);
            let hi = render(Some(&FieldValue::Real(sign * large)), width);
            prop_assert!(
                integer_digits(&lo) <= integer_digits(&hi),
                "{} -> `{}` has more integer digits than {} -> `{}`",
                sign * small,
                lo,
                sign * large,
                hi
            );
        }
        Ok(())
    }

    fn check_width_bound(v: f64, width: usize) -> Result<(), TestCaseError> {
        let out = render(Some(&FieldValue::Real(v)), width);
        prop_assert!(out.len() <= width, "{} rendered as `{}` in width {}", v, out, width);
        Ok(())
    }

    fn check_integer_roundtrip(v: i64, width: usize) -> Result<(), TestCaseError> {
        let out = render(Some(&FieldValue::Integer(v)), width);
        prop_assert_eq!(out.len(), width);
        prop_assert_eq!(decode_field(&out, FieldKind::Integer), Some(FieldValue::Integer(v)));
        Ok(())
    }

    fn check_cents_redecode(cents: i64, width: usize) -> Result<(), TestCaseError> {
        let v = cents as f64 / 100.0;
        let out = render(Some(&FieldValue::Real(v)), width);
        prop_assert_eq!(out.len(), width);
        prop_assert_eq!(decode_field(&out, FieldKind::Real), Some(FieldValue::Real(v)));
        Ok(())
    }

    proptest! {
        #[test]
        fn magnitude_never_loses_digits(a in 0.0f64..1e9, b in 0.0f64..1e9, width in 2usize..=8) {
            check_magnitude_never_loses_digits(a, b, width)?;
        }

        #[test]
        fn rendering_fits_column(v in 0.0f64..1e9, width in 2usize..=8) {
            check_width_bound(v, width)?;
            check_width_bound(-v, width)?;
        }

        #[test]
        fn overflow_saturates(excess in 0.5f64..1e6, width in 2usize..=8) {
            let bound = 10f64.powi(width as i32);
            let positive = render(Some(&FieldValue::Real(bound + excess)), width);
            prop_assert_eq!(positive, "9".repeat(width));
            let negative = render(Some(&FieldValue::Real(-bound / 10.0 - excess)), width);
            prop_assert_eq!(negative, format!("-{}", "9".repeat(width - 1)));
        }

        #[test]
        fn positive_integers_roundtrip(width in 1usize..=6, seed in 0i64..1_000_000) {
            let v = 1 + seed % (10i64.pow(width as u32) - 1);
            check_integer_roundtrip(v, width)?;
        }

        #[test]
        fn negative_integers_roundtrip(width in 2usize..=6, seed in 0i64..1_000_000) {
            let v = -1 - seed % (10i64.pow(width as u32 - 1) - 1);
            check_integer_roundtrip(v, width)?;
        }

        #[test]
        fn two_decimal_reals_redecode(cents in 0i64..9000, width in 6usize..=8) {
            check_cents_redecode(cents, width)?;
        }

        #[test]
        fn negative_two_decimal_reals_redecode(cents in -9000i64..0, width in 7usize..=8) {
            check_cents_redecode(cents, width)?;
        }
    }
}
