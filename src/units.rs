//! Engineering-notation values for the command line (`100mV`, `4.7k`, `12`).
//!
//! A value is a decimal number, an optional SI prefix and an optional unit:
//! `V` for voltages, `ohm` or `Ω` for resistances. Unlike SPICE, `M` is mega
//! and `m` is milli; `meg` is accepted as well.

/// SI prefixes and their scale.
const PREFIXES: &[(&str, f64)] = &[
    ("meg", 1e6),
    ("p", 1e-12),
    ("n", 1e-9),
    ("u", 1e-6),
    ("µ", 1e-6),
    ("m", 1e-3),
    ("k", 1e3),
    ("K", 1e3),
    ("M", 1e6),
    ("G", 1e9),
];

const UNITS: &[&str] = &["ohm", "Ω", "V", "v"];

/// Parse a value such as `100mV`, `4.7k` or `1e-3`.
///
/// Returns `None` for anything that is not a finite number after scaling.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    let body = UNITS
        .iter()
        .find_map(|unit| text.strip_suffix(unit))
        .unwrap_or(text);
    let (number, scale) = PREFIXES
        .iter()
        .find_map(|&(prefix, scale)| body.strip_suffix(prefix).map(|n| (n, scale)))
        .unwrap_or((body, 1.0));

    let value = number.trim_end().parse::<f64>().ok()? * scale;
    value.is_finite().then_some(value)
}

/// clap value parser built on [`parse_value`].
#[cfg(feature = "cli")]
pub fn parse_arg(text: &str) -> std::result::Result<f64, String> {
    parse_value(text)
        .ok_or_else(|| format!("invalid value '{text}' (expected e.g. 12, 100mV, 4.7k)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn value(text: &str) -> f64 {
        parse_value(text).unwrap_or_else(|| panic!("'{text}' did not parse"))
    }

    #[test]
    fn test_plain_and_prefixed() {
        assert_relative_eq!(value("12"), 12.0);
        assert_relative_eq!(value(" 0.7 "), 0.7);
        assert_relative_eq!(value("1e-3"), 1e-3);
        assert_relative_eq!(value("10k"), 10_000.0);
        assert_relative_eq!(value("4.7K"), 4_700.0);
        assert_relative_eq!(value("4.7u"), 4.7e-6);
        assert_relative_eq!(value("2µ"), 2e-6);
        assert_relative_eq!(value("33n"), 33e-9);
    }

    #[test]
    fn test_milli_and_mega_differ_by_case() {
        assert_relative_eq!(value("100m"), 0.1);
        assert_relative_eq!(value("1M"), 1e6);
        assert_relative_eq!(value("2.2meg"), 2.2e6);
    }

    #[test]
    fn test_unit_suffix() {
        assert_relative_eq!(value("12V"), 12.0);
        assert_relative_eq!(value("100mV"), 0.1);
        assert_relative_eq!(value("50mv"), 0.05);
        assert_relative_eq!(value("9 V"), 9.0);
        assert_relative_eq!(value("4.7kohm"), 4_700.0);
        assert_relative_eq!(value("470Ω"), 470.0);
    }

    #[test]
    fn test_rejects_non_numbers() {
        for text in ["", "k", "V", "mV", "12x", "1.2.3", "inf", "NaN", "1e400", "1e306G"] {
            assert_eq!(parse_value(text), None, "{text}");
        }
    }
}
