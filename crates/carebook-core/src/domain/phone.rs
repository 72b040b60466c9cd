pub const MIN_PHONE_LEN: usize = 10;

/// True when every character is a digit, space, `-`, `(`, `)` or `+`.
pub fn is_valid_phone_format(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, ' ' | '-' | '(' | ')' | '+'))
}
