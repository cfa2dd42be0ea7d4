/// Parse the leading integer of a length token, `parseInt` style.
///
/// `"10px"` → 10, `"-3px"` → -3, `"12.7%"` → 12. A token without leading
/// digits (`"auto"`, `""`, `"px"`) parses as 0 rather than failing.
pub fn parse_px(value: &str) -> i64 {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut result: i64 = 0;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        result = result
            .saturating_mul(10)
            .saturating_add(i64::from(b - b'0'));
    }

    if negative {
        -result
    } else {
        result
    }
}

/// Format a pixel length token.
pub fn px(value: i64) -> String {
    format!("{}px", value)
}
