//! Field normalizers applied as staff type

/// Digits kept for a North American number
const PHONE_DIGITS: usize = 10;

/// Formats raw keystrokes as `(555) 123-4567`.
///
/// Partial input keeps the longest valid prefix of the pattern:
/// `555`, `(555) 12`, `(555) 123-45`. Digits past the tenth are dropped.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_DIGITS)
        .collect();

    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}

/// Collapses a formatted phone back to digits
pub fn normalize_phone(formatted: &str) -> String {
    formatted.chars().filter(char::is_ascii_digit).collect()
}

/// Upper-cases the first letter of every word and lower-cases the rest.
/// Whitespace is kept as typed so a trailing space survives mid-entry.
pub fn capitalize_words(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for c in input.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            // Multi-char expansions (ß -> SS) would not survive a second pass
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) => out.push(u),
                _ => out.push(c),
            }
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_partial_input() {
        assert_eq!(format_phone(""), "");
        assert_eq!(format_phone("5"), "5");
        assert_eq!(format_phone("555"), "555");
        assert_eq!(format_phone("5551"), "(555) 1");
        assert_eq!(format_phone("555123"), "(555) 123");
        assert_eq!(format_phone("5551234"), "(555) 123-4");
        assert_eq!(format_phone("5551234567"), "(555) 123-4567");
    }

    #[test]
    fn ignores_punctuation_and_overflow() {
        assert_eq!(format_phone("(555) 123-45678"), "(555) 123-4567");
        assert_eq!(format_phone("555.123.4567 ext"), "(555) 123-4567");
        assert_eq!(format_phone("abc"), "");
    }

    #[test]
    fn formatting_is_idempotent() {
        let samples = ["", "5", "55", "555", "5551", "55512", "555123", "5551234", "555123456", "5551234567", "1-800-555-1234-99"];
        for raw in samples {
            let once = format_phone(raw);
            assert_eq!(format_phone(&once), once, "input {raw:?}");
        }
    }

    #[test]
    fn normalize_inverts_format() {
        let digits = "5551234567";
        for len in 0..=digits.len() {
            let raw = &digits[..len];
            assert_eq!(normalize_phone(&format_phone(raw)), raw);
        }
    }

    #[test]
    fn capitalizes_each_word() {
        assert_eq!(capitalize_words("john smith"), "John Smith");
        assert_eq!(capitalize_words("mARY  o'NEIL"), "Mary  O'neil");
        assert_eq!(capitalize_words("jo "), "Jo ");
        assert_eq!(capitalize_words(""), "");
    }

    #[test]
    fn capitalization_is_idempotent() {
        for s in ["john smith", "ÉLODIE dupont", "  leading", "a b c", "ßtraße", "xİstanbul"] {
            let once = capitalize_words(s);
            assert_eq!(capitalize_words(&once), once, "input {s:?}");
        }
    }

    #[test]
    fn lowercases_email() {
        assert_eq!(normalize_email(" JOHN@X.COM "), "john@x.com");
    }
}
