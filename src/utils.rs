//! Byte-level helpers for line handling.
//!

use std::borrow::Cow;

use bytes::Bytes;

/// Splits `buf` into lines on `\n`, `\r\n` or a lone `\r`.
///
/// Each line is a zero-copy slice of `buf` without its terminator. A
/// trailing terminator does not produce an extra empty line.
pub fn split_lines(buf: &Bytes) -> Vec<Bytes> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < buf.len() {
        match buf[i] {
            b'\n' => {
                lines.push(buf.slice(start..i));
                start = i + 1;
            }
            b'\r' => {
                lines.push(buf.slice(start..i));
                if buf.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if start < buf.len() {
        lines.push(buf.slice(start..));
    }
    lines
}

/// Views a raw line as text.
///
/// Invalid UTF-8 sequences become U+FFFD, which is not alphabetic and is
/// therefore dropped by the tokenizer.
#[inline]
pub fn line_text(line: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(line)
}
