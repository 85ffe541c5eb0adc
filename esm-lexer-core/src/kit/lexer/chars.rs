//! Character classification for ECMAScript source text

/// Line terminators: LF, CR, LINE SEPARATOR, PARAGRAPH SEPARATOR
pub fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// WhiteSpace or LineTerminator
pub fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\x0B'
            | '\x0C'
            | ' '
            | '\u{00A0}'
            | '\u{FEFF}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    ) || is_line_terminator(c)
}

pub fn is_id_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphabetic()
}

pub fn is_id_continue(c: char) -> bool {
    c == '$' || c == '_' || c == '\u{200C}' || c == '\u{200D}' || c.is_alphanumeric()
}

/// ASCII fast path of [`is_id_start`]; `\` starts a unicode escape
#[inline]
pub fn is_ascii_id_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'$' || b == b'_' || b == b'\\'
}

#[inline]
pub fn is_ascii_id_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'$' || b == b'_' || b == b'\\'
}

/// Length in bytes of the line terminator starting at `bytes[i]`, or 0
#[inline]
pub fn line_terminator_len(bytes: &[u8], i: usize) -> usize {
    match bytes.get(i) {
        Some(b'\n') => 1,
        Some(b'\r') => {
            if bytes.get(i + 1) == Some(&b'\n') {
                2
            } else {
                1
            }
        }
        // U+2028 / U+2029 encode as E2 80 A8 / E2 80 A9
        Some(0xE2) if bytes.get(i + 1) == Some(&0x80) => match bytes.get(i + 2) {
            Some(0xA8) | Some(0xA9) => 3,
            _ => 0,
        },
        _ => 0,
    }
}
