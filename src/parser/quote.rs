// Quote normalizer: rewrites SQL string-literal quoting into CSV quoting
// before field splitting, and restores the literal text afterwards.
//
// Doublequotes already present in the dump (bare or backslash-escaped) are
// parked behind SENTINEL so the CSV reader never sees them. Single quotes and
// the remaining backslashes both become CSV doublequotes, which turns
// `'it\'s'` into `"it""s"` and lets the reader unescape it to `it"s`.

/// Placeholder for a doublequote while a value list is being split.
/// Input that already contains this sequence is not converted faithfully.
pub const SENTINEL: &str = "<<<DQ>>>";

/// SQL quoting -> CSV quoting. Applied once per INSERT value list.
pub fn to_internal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'"') => {
                chars.next();
                out.push_str(SENTINEL);
            }
            '"' => out.push_str(SENTINEL),
            '\'' | '\\' => out.push('"'),
            _ => out.push(c),
        }
    }
    out
}

/// Restores a split text field: CSV doublequotes back to single quotes, then
/// parked doublequotes back to `"`.
pub fn to_external(field: &str) -> String {
    field.replace('"', "'").replace(SENTINEL, "\"")
}
