/*!
 * Encoding Helpers
 * Character boundaries over possibly-invalid UTF-8 byte runs
 *
 * Sink content is an opaque byte sequence, but `putc` and the width and
 * precision of `%s`/`%c` work in characters. A valid UTF-8 sequence counts
 * as one character; any byte that does not start a valid sequence counts
 * as one character on its own.
 */

/// Expected sequence length for a UTF-8 lead byte (0 for continuation/invalid bytes)
#[inline]
fn sequence_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

/// Decode the first character of `bytes`
///
/// Returns the character (if the leading run is valid UTF-8) and the number of
/// bytes it occupies. Returns `None` for empty input.
pub fn decode_leading(bytes: &[u8]) -> Option<(Option<char>, usize)> {
    let lead = *bytes.first()?;
    let width = sequence_width(lead);

    if width == 0 || width > bytes.len() {
        return Some((None, 1));
    }

    match std::str::from_utf8(&bytes[..width]) {
        Ok(s) => Some((s.chars().next(), width)),
        Err(_) => Some((None, 1)),
    }
}

/// Byte length of the first character, 0 for empty input
#[inline]
pub fn leading_char_len(bytes: &[u8]) -> usize {
    decode_leading(bytes).map_or(0, |(_, len)| len)
}

/// Number of characters in `bytes`
pub fn char_count(bytes: &[u8]) -> usize {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.chars().count();
    }

    let mut rest = bytes;
    let mut count = 0;
    while !rest.is_empty() {
        rest = &rest[leading_char_len(rest)..];
        count += 1;
    }
    count
}

/// Byte offset just past the first `n` characters (or the full length)
pub fn char_boundary(bytes: &[u8], n: usize) -> usize {
    let mut offset = 0;
    for _ in 0..n {
        if offset >= bytes.len() {
            break;
        }
        offset += leading_char_len(&bytes[offset..]);
    }
    offset
}
