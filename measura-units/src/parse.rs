//! Measure string parsing - split "5 m", "1.5e3kg" or "-40 degF" into numeral and unit

use measura_core::UnitError;

/// Split a measure string into its numeric value and unit token.
///
/// Grammar: optional sign, digits, optional fraction, optional exponent
/// (`e`/`E`, optional sign, digits), optional whitespace, unit token.
/// Surrounding whitespace is ignored. An `e` that is not followed by
/// exponent digits starts the unit token instead ("5each").
pub fn split_measure(text: &str) -> Result<(f64, &str), UnitError> {
    let s = text.trim();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut pos = 0;

    if pos < len && (bytes[pos] == b'+' || bytes[pos] == b'-') {
        pos += 1;
    }

    let int_start = pos;
    while pos < len && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = pos - int_start;

    let mut frac_digits = 0;
    if pos < len && bytes[pos] == b'.' {
        pos += 1;
        let frac_start = pos;
        while pos < len && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        frac_digits = pos - frac_start;
    }

    if int_digits + frac_digits == 0 {
        return Err(UnitError::invalid_format(format!("no number found in '{}'", s)));
    }

    if pos < len && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp = pos + 1;
        if exp < len && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        let exp_start = exp;
        while exp < len && bytes[exp].is_ascii_digit() {
            exp += 1;
        }
        if exp > exp_start {
            pos = exp;
        }
    }

    let numeral = &s[..pos];
    let unit = s[pos..].trim();

    if unit.is_empty() {
        return Err(UnitError::invalid_format(format!("missing unit in '{}'", s)));
    }

    let value: f64 = numeral
        .parse()
        .map_err(|_| UnitError::invalid_format(format!("invalid number: {}", numeral)))?;

    Ok((value, unit))
}

/// Parse a conversion request like "kg->lb", "C→F" or "km to mi".
///
/// Word separators split at their last occurrence, so the inch symbol
/// survives on the left: "12 in in ft" is ("12 in", "ft").
pub fn parse_conversion(s: &str) -> Result<(&str, &str), UnitError> {
    let arrows = ["->", "→"];
    let words = [" to ", " in "];

    let split = arrows
        .iter()
        .find_map(|sep| s.split_once(sep).filter(|(_, to)| !to.contains(sep)))
        .or_else(|| words.iter().find_map(|sep| s.rsplit_once(sep)));

    if let Some((from, to)) = split {
        let (from, to) = (from.trim(), to.trim());
        if !from.is_empty() && !to.is_empty() {
            return Ok((from, to));
        }
    }

    Err(UnitError::invalid_format(format!(
        "invalid conversion format: {}, expected 'unit1->unit2'",
        s
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple() {
        assert_eq!(split_measure("5 m").unwrap(), (5.0, "m"));
        assert_eq!(split_measure("100kg").unwrap(), (100.0, "kg"));
        assert_eq!(split_measure("  -3.25 degC  ").unwrap(), (-3.25, "degC"));
        assert_eq!(split_measure("+2 ft").unwrap(), (2.0, "ft"));
    }

    #[test]
    fn test_split_fraction_forms() {
        assert_eq!(split_measure(".5 l").unwrap(), (0.5, "l"));
        assert_eq!(split_measure("5. l").unwrap(), (5.0, "l"));
    }

    #[test]
    fn test_split_exponent() {
        assert_eq!(split_measure("1.5e3 g").unwrap(), (1500.0, "g"));
        assert_eq!(split_measure("2E-2m").unwrap(), (0.02, "m"));
        assert_eq!(split_measure("1e+1 pcs").unwrap(), (10.0, "pcs"));
    }

    #[test]
    fn test_e_starts_unit_without_exponent_digits() {
        assert_eq!(split_measure("5each").unwrap(), (5.0, "each"));
        assert_eq!(split_measure("5 ea").unwrap(), (5.0, "ea"));
    }

    #[test]
    fn test_multi_word_unit() {
        assert_eq!(split_measure("3 metric ton").unwrap(), (3.0, "metric ton"));
    }

    #[test]
    fn test_invalid_format() {
        assert!(matches!(split_measure("invalid"), Err(UnitError::InvalidFormat(_))));
        assert!(matches!(split_measure(""), Err(UnitError::InvalidFormat(_))));
        assert!(matches!(split_measure("42"), Err(UnitError::InvalidFormat(_))));
        assert!(matches!(split_measure("-m"), Err(UnitError::InvalidFormat(_))));
        assert!(matches!(split_measure(". m"), Err(UnitError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_conversion() {
        assert_eq!(parse_conversion("km->mi").unwrap(), ("km", "mi"));
        assert_eq!(parse_conversion("C→F").unwrap(), ("C", "F"));
        assert_eq!(parse_conversion("kg to lb").unwrap(), ("kg", "lb"));
        assert!(parse_conversion("kg lb").is_err());
        assert!(parse_conversion("->lb").is_err());
        assert!(parse_conversion("kg->lb->g").is_err());
    }

    #[test]
    fn test_parse_conversion_inch_source() {
        assert_eq!(parse_conversion("12 in in ft").unwrap(), ("12 in", "ft"));
        assert_eq!(parse_conversion("12 in to ft").unwrap(), ("12 in", "ft"));
        assert_eq!(parse_conversion("3 ft in in").unwrap(), ("3 ft", "in"));
    }
}
