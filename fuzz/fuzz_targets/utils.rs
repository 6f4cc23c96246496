use std::str;

pub const MAX_INPUT_SIZE: usize = 16 * 1024;

/// Returns a UTF-8 view of `data` truncated to `MAX_INPUT_SIZE`.
///
/// If the truncated data is not valid UTF-8, only up to 3 bytes are trimmed to
/// recover from cutting a multibyte codepoint.
#[inline]
pub fn truncate_utf8(data: &[u8]) -> Option<&str> {
    let cap = data.len().min(MAX_INPUT_SIZE);
    for trim in 0..=3 {
        if cap < trim {
            break;
        }
        if let Ok(text) = str::from_utf8(&data[..cap - trim]) {
            return Some(text);
        }
    }
    None
}

pub fn assert_safe_slice(text: &str, start: usize, end: usize) {
    assert!(start <= end, "invalid range: {start} > {end}");
    assert!(
        end <= text.len(),
        "range end out of bounds: {end} > {}",
        text.len()
    );
    assert!(
        text.is_char_boundary(start) && text.is_char_boundary(end),
        "range {start}..{end} not on char boundaries"
    );
}
