/// Digits-only phone number, or `None` when the input is not a plausible phone.
pub fn normalize_phone(raw: &str) -> Option<String> {
    if raw
        .chars()
        .any(|c| !(c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '(' | ')')))
    {
        return None;
    }
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    (8..=12).contains(&digits.len()).then_some(digits)
}
