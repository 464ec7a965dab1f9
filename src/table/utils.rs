/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// Cell spellings read as a missing value, whatever the column type.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// True when the cleaned cell is blank or one of the usual missing-value markers.
pub fn is_missing(raw: &str) -> bool {
    MISSING_MARKERS.contains(&clean_str(raw).as_str())
}

/// True when the cell carries a value.
pub fn is_present(raw: &str) -> bool {
    !is_missing(raw)
}

/// True when a present cell reads as a number (infinities included).
pub fn is_number(raw: &str) -> bool {
    clean_str(raw).parse::<f64>().is_ok()
}

/// Parse a cleaned cell as a float. Missing markers and non-finite values are missing.
pub fn parse_f64(raw: &str) -> Option<f64> {
    if is_missing(raw) {
        return None;
    }
    clean_str(raw).parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_str_strips_quotes_and_whitespace() {
        assert_eq!(clean_str("  \"World\" "), "World");
        assert_eq!(clean_str("\""), "\"");
        assert_eq!(clean_str(" 12.5 "), "12.5");
    }

    #[test]
    fn parse_f64_treats_blank_and_nan_as_missing() {
        assert_eq!(parse_f64("3.25"), Some(3.25));
        assert_eq!(parse_f64("1e3"), Some(1000.0));
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_f64("NaN"), None);
        assert_eq!(parse_f64("World"), None);
        assert_eq!(parse_f64("inf"), None);
    }

    #[test]
    fn missing_markers_are_not_present() {
        for raw in ["", "  ", "NaN", "nan", "NA", "N/A", "null", "\"NaN\""] {
            assert!(is_missing(raw), "{raw:?} should be missing");
            assert!(!is_present(raw));
        }
        assert!(is_present("0"));
        assert!(is_present("World"));
        assert!(is_present("Nanjing"));
    }

    #[test]
    fn is_number_accepts_infinities_but_not_words() {
        assert!(is_number("12"));
        assert!(is_number(" -3.5e2 "));
        assert!(is_number("inf"));
        assert!(!is_number("World"));
        assert!(!is_number("12 TWh"));
    }
}
