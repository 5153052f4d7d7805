//! Bounded copies into caller-supplied byte buffers.
//!
//! A buffer of length `n` always ends up holding a zero-terminated byte
//! string: at most `n - 1` bytes of the source followed by zero bytes up to
//! and including index `n - 1`. Nothing past `n` is ever written.

/// Copies as much of `src` as fits into `dst` and terminates it.
///
/// Returns the number of source bytes copied. An empty `dst` is left alone.
/// Truncation is byte-wise, so a multi-byte character may be cut.
pub fn copy_terminated(src: &str, dst: &mut [u8]) -> usize {
    let cap = match dst.len() {
        0 => return 0,
        n => n,
    };
    let n = src.len().min(cap - 1);
    dst[..n].copy_from_slice(&src.as_bytes()[..n]);
    dst[n..].fill(0);
    n
}

/// The bytes of `buf` before its first zero byte.
pub fn terminated(buf: &[u8]) -> &[u8] {
    match buf.iter().position(|&b| b == 0) {
        Some(end) => &buf[..end],
        None => buf,
    }
}
