use crate::locale::{group_thousands, Locale};

/// Upper bound for fraction digits; larger `fixed` settings are clamped to it.
pub(crate) const MAX_FRACTION_DIGITS: usize = 20;

/// Default fraction digits for float columns without a `fixed` setting.
pub(crate) const FLOAT_DEFAULT_FRACTION_DIGITS: usize = 2;

/// Locale-aware fixed-point number formatter with thousands grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormatter {
    locale: &'static Locale,
    min_fraction_digits: usize,
    max_fraction_digits: usize,
    truncate: bool,
}

impl NumberFormatter {
    pub fn new(
        locale: &'static Locale,
        min_fraction_digits: usize,
        max_fraction_digits: usize,
    ) -> Self {
        let max_fraction_digits = max_fraction_digits.min(MAX_FRACTION_DIGITS);
        Self {
            locale,
            min_fraction_digits: min_fraction_digits.min(max_fraction_digits),
            max_fraction_digits,
            truncate: false,
        }
    }

    /// Formatter for integer columns: values are truncated toward zero, then shown with `fixed`
    /// fraction digits (zero by default).
    pub fn integer(locale: &'static Locale, fixed: Option<u32>) -> Self {
        let digits = fixed.map_or(0, |d| d as usize);
        Self {
            truncate: true,
            ..Self::new(locale, digits, digits)
        }
    }

    /// Formatter for float columns.
    pub fn float(locale: &'static Locale, fixed: Option<u32>) -> Self {
        let digits = fixed.map_or(FLOAT_DEFAULT_FRACTION_DIGITS, |d| d as usize);
        Self::new(locale, digits, digits)
    }

    pub fn min_fraction_digits(&self) -> usize {
        self.min_fraction_digits
    }

    pub fn max_fraction_digits(&self) -> usize {
        self.max_fraction_digits
    }

    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value < 0.0 { "-∞" } else { "∞" }.to_string();
        }

        let value = if self.truncate { value.trunc() } else { value };
        let rounded = round_to(value.abs(), self.max_fraction_digits);
        let digits = format!("{:.*}", self.max_fraction_digits, rounded);
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

        let mut frac_part = frac_part.to_string();
        while frac_part.len() > self.min_fraction_digits && frac_part.ends_with('0') {
            frac_part.pop();
        }

        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        // Negative zero (e.g. -0.001 at two digits) renders unsigned.
        if value < 0.0 && rounded != 0.0 {
            out.push('-');
        }
        out.push_str(&group_thousands(int_part, self.locale.thousands_separator));
        if !frac_part.is_empty() {
            out.push(self.locale.decimal_separator);
            out.push_str(&frac_part);
        }
        out
    }
}

/// Round half away from zero at `decimals` fraction digits.
fn round_to(value: f64, decimals: usize) -> f64 {
    if decimals == 0 {
        return value.round();
    }
    let factor = 10_f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Shortest round-trip rendering used when a number has no formatter (e.g. in a string column).
pub(crate) fn format_plain(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞" } else { "∞" }.to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{DE_DE, EN_US, FR_FR};

    #[test]
    fn fixed_overrides_float_precision() {
        let fmt = NumberFormatter::float(&EN_US, Some(3));
        assert_eq!(fmt.format(12345.6789), "12,345.679");
        assert_eq!(fmt.format(-0.5), "-0.500");
    }

    #[test]
    fn float_defaults_to_two_digits() {
        let fmt = NumberFormatter::float(&EN_US, None);
        assert_eq!(fmt.format(1234567.891), "1,234,567.89");
        assert_eq!(fmt.format(2.0), "2.00");
        assert_eq!(fmt.format(0.125), "0.13");
    }

    #[test]
    fn integer_truncates_instead_of_rounding() {
        let fmt = NumberFormatter::integer(&EN_US, None);
        assert_eq!(fmt.format(12345.6789), "12,345");
        assert_eq!(fmt.format(-12345.6789), "-12,345");
        assert_eq!(fmt.format(-0.9), "0");
    }

    #[test]
    fn min_fraction_digits_keep_trailing_zeros() {
        let fmt = NumberFormatter::new(&EN_US, 1, 4);
        assert_eq!(fmt.format(1.5), "1.5");
        assert_eq!(fmt.format(1.0), "1.0");
        assert_eq!(fmt.format(1.23456), "1.2346");
    }

    #[test]
    fn uses_locale_separators() {
        assert_eq!(NumberFormatter::float(&DE_DE, None).format(1234.5), "1.234,50");
        assert_eq!(
            NumberFormatter::float(&FR_FR, Some(1)).format(-1234567.25),
            "-1\u{00A0}234\u{00A0}567,3"
        );
    }

    #[test]
    fn non_finite_values_have_fixed_spellings() {
        let fmt = NumberFormatter::float(&EN_US, None);
        assert_eq!(fmt.format(f64::NAN), "NaN");
        assert_eq!(fmt.format(f64::INFINITY), "∞");
        assert_eq!(fmt.format(f64::NEG_INFINITY), "-∞");
    }

    #[test]
    fn fraction_digits_are_clamped() {
        let fmt = NumberFormatter::float(&EN_US, Some(500));
        assert_eq!(fmt.max_fraction_digits(), MAX_FRACTION_DIGITS);
        assert_eq!(fmt.min_fraction_digits(), MAX_FRACTION_DIGITS);
    }

    #[test]
    fn plain_rendering_avoids_negative_zero() {
        assert_eq!(format_plain(-0.0), "0");
        assert_eq!(format_plain(1.5), "1.5");
    }
}
