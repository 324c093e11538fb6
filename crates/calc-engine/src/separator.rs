//! Digit-grouping separators for display formatting.
//!
//! Separators are a pure display concern: every edit and every evaluation
//! works on stripped text, and the grouped form is reinserted only when the
//! expression is rendered. `strip_separators` is idempotent and the exact
//! left inverse of `insert_separators` on stripped input.

use calc_model::NumberSeparator;

/// The grouping separator character.
pub const SEPARATOR: char = ',';

/// Remove every grouping separator. Digits, operators, decimal points and
/// function names pass through untouched.
pub fn strip_separators(text: &str) -> String {
    text.chars().filter(|&c| c != SEPARATOR).collect()
}

/// Insert grouping separators into every integer digit run of `text`.
///
/// A digit run is fractional (and left alone) when it directly follows a
/// decimal point; runs following a letter (exponent digits in a formatted
/// result) are also left alone. Grouping scans leftward from the end of the
/// run: Western inserts a separator every 3 digits, Indian after the first
/// 3 and then every 2.
pub fn insert_separators(text: &str, mode: NumberSeparator) -> String {
    if mode == NumberSeparator::Off {
        return text.to_string();
    }

    // Regroup from scratch so stale separators from a previous mode never
    // split a digit run.
    let text = strip_separators(text);
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + text.len() / 3);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() {
            let prev = if i == 0 { None } else { Some(chars[i - 1]) };
            let mut end = i;
            while end < chars.len() && chars[end].is_ascii_digit() {
                end += 1;
            }
            let run: String = chars[i..end].iter().collect();
            let integer_part = !matches!(prev, Some('.')) && !prev.is_some_and(char::is_alphabetic);
            if integer_part {
                out.push_str(&group_digits(&run, mode));
            } else {
                out.push_str(&run);
            }
            i = end;
        } else {
            out.push(c);
            i += 1;
        }
    }
    out
}

fn group_digits(run: &str, mode: NumberSeparator) -> String {
    let n = run.len();
    let mut out = String::with_capacity(n + n / 2);
    for (i, c) in run.chars().enumerate() {
        let from_right = n - i;
        let boundary = match mode {
            NumberSeparator::Off => false,
            NumberSeparator::Western => from_right % 3 == 0,
            NumberSeparator::Indian => {
                from_right == 3 || (from_right > 3 && (from_right - 3) % 2 == 0)
            }
        };
        if i > 0 && boundary {
            out.push(SEPARATOR);
        }
        out.push(c);
    }
    out
}

/// True iff `text` (after separator stripping) is a single signed decimal
/// numeral, optionally with an exponent.
pub fn is_number(text: &str) -> bool {
    let stripped = strip_separators(text);
    let s = stripped.trim();
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let mut saw_digit = false;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        saw_digit = true;
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            saw_digit = true;
            i += 1;
        }
    }
    if !saw_digit {
        return false;
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_is_idempotent() {
        assert_eq!(strip_separators("1,234,567"), "1234567");
        assert_eq!(strip_separators("1234567"), "1234567");
        assert_eq!(strip_separators(strip_separators("1,234").as_str()), "1234");
    }

    #[test]
    fn western_grouping() {
        assert_eq!(insert_separators("1234567", NumberSeparator::Western), "1,234,567");
        assert_eq!(insert_separators("123", NumberSeparator::Western), "123");
        assert_eq!(insert_separators("1234", NumberSeparator::Western), "1,234");
    }

    #[test]
    fn indian_grouping() {
        assert_eq!(insert_separators("1234567", NumberSeparator::Indian), "12,34,567");
        assert_eq!(insert_separators("123456", NumberSeparator::Indian), "1,23,456");
        assert_eq!(insert_separators("1234", NumberSeparator::Indian), "1,234");
        assert_eq!(insert_separators("123", NumberSeparator::Indian), "123");
    }

    #[test]
    fn off_mode_returns_input() {
        assert_eq!(insert_separators("1234567", NumberSeparator::Off), "1234567");
    }

    #[test]
    fn fractional_digits_are_not_grouped() {
        assert_eq!(
            insert_separators("1234.56789", NumberSeparator::Western),
            "1,234.56789"
        );
        assert_eq!(
            insert_separators("1234.56789", NumberSeparator::Indian),
            "1,234.56789"
        );
    }

    #[test]
    fn grouping_applies_per_run_inside_expressions() {
        assert_eq!(
            insert_separators("1234+5678×sin(9012)", NumberSeparator::Western),
            "1,234+5,678×sin(9,012)"
        );
    }

    #[test]
    fn regrouping_already_grouped_text_is_stable() {
        let grouped = insert_separators("1234567", NumberSeparator::Western);
        assert_eq!(insert_separators(&grouped, NumberSeparator::Western), grouped);
        // Switching modes regroups from scratch.
        assert_eq!(insert_separators(&grouped, NumberSeparator::Indian), "12,34,567");
    }

    #[test]
    fn exponent_digits_are_not_grouped() {
        assert_eq!(insert_separators("1.5e15", NumberSeparator::Western), "1.5e15");
    }

    #[test]
    fn is_number_accepts_numerals() {
        assert!(is_number("0"));
        assert!(is_number("-5"));
        assert!(is_number("3.25"));
        assert!(is_number("1,234.5"));
        assert!(is_number("1.5e-3"));
        assert!(is_number(".5"));
    }

    #[test]
    fn is_number_rejects_expressions() {
        assert!(!is_number(""));
        assert!(!is_number("2+2"));
        assert!(!is_number("sin(90)"));
        assert!(!is_number("1.2.3"));
        assert!(!is_number("-"));
        assert!(!is_number("1e"));
    }
}
