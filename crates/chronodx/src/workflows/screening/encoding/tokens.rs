/// Shared categorical lookup used by every binary field across the heart and
/// kidney schemas. Tokens are matched case-insensitively; a token outside
/// the table has no code, and the caller decides what that means.
pub(crate) fn binary_code(token: &str) -> Option<u8> {
    match token.to_ascii_lowercase().as_str() {
        "yes" | "present" | "good" => Some(1),
        "no" | "notpresent" | "poor" | "normal" => Some(0),
        "abnormal" => Some(1),
        _ => None,
    }
}

/// The heart `sex` field is deliberately not part of the shared table: it
/// uses different tokens and a different default, where anything that is not
/// `male` codes as 0.
pub(crate) fn sex_code(token: &str) -> u8 {
    if token.eq_ignore_ascii_case("male") {
        1
    } else {
        0
    }
}
