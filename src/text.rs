//! Fixed-capacity text helpers.

use heapless::String;

/// Copy `s` into a `String<N>`, cut at the last char boundary that fits.
pub(crate) fn bounded<const N: usize>(s: &str) -> String<N> {
    let mut end = s.len().min(N);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = String::new();
    // `end <= N` bytes always fit.
    let _ = out.push_str(&s[..end]);
    out
}
