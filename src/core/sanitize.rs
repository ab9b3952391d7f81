//! Character whitelist applied before evaluation.

/// Whether `c` may reach the evaluator.
pub fn is_allowed(c: char) -> bool {
    matches!(c, '0'..='9' | '+' | '-' | '*' | '/' | '(' | ')' | '.')
}

/// Strip every character outside `0-9 + - * / ( ) .`, keeping order.
pub fn sanitize(raw: &str) -> String {
    raw.chars().filter(|c| is_allowed(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_arithmetic_characters() {
        assert_eq!(sanitize("(1.5+2)*3/4-5"), "(1.5+2)*3/4-5");
    }

    #[test]
    fn strips_everything_else() {
        assert_eq!(sanitize("alert(1)"), "(1)");
        assert_eq!(sanitize("2 + 2"), "2+2");
        assert_eq!(sanitize("1e3"), "13");
        assert_eq!(sanitize("2^3%4"), "234");
    }

    #[test]
    fn non_ascii_digits_are_removed() {
        assert_eq!(sanitize("٣+1"), "+1");
    }

    #[test]
    fn empty_after_filtering() {
        assert_eq!(sanitize("Error"), "");
        assert_eq!(sanitize(""), "");
    }
}
