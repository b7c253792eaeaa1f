//! Visible-width text operations.
//!
//! Cell strings may carry embedded SGR escape sequences (`ESC [ ... m`).
//! The functions here measure, crop and pad text by its *visible* width:
//! escape bytes contribute zero width but are preserved in output. Widths
//! are terminal cell widths, so CJK characters and wide emoji count as 2.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_width::UnicodeWidthChar;

/// Matches one SGR escape sequence.
pub static ANSI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("valid SGR pattern"));

/// Minimum string length to cache (shorter strings have minimal overhead).
const CACHE_MIN_LEN: usize = 8;

/// LRU cache for `visible_len` calculations.
static VISIBLE_LEN_CACHE: Lazy<Mutex<LruCache<String, usize>>> =
    Lazy::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(1024).expect("non-zero"))));

/// Get the cell width of a single character.
///
/// Most characters are 1 cell wide, CJK and some emoji are 2.
/// Control characters have 0 width.
#[must_use]
pub fn char_cell_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

#[inline]
fn compute_visible_width(text: &str) -> usize {
    ANSI_RE
        .replace_all(text, "")
        .chars()
        .map(char_cell_width)
        .sum()
}

/// Visible cell width of a string, ignoring SGR escape sequences.
///
/// Results for longer strings are memoized in an LRU cache.
#[must_use]
pub fn visible_len(text: &str) -> usize {
    if text.len() < CACHE_MIN_LEN {
        return compute_visible_width(text);
    }

    if let Ok(mut cache) = VISIBLE_LEN_CACHE.lock()
        && let Some(&cached) = cache.get(text)
    {
        return cached;
    }

    let width = compute_visible_width(text);

    if let Ok(mut cache) = VISIBLE_LEN_CACHE.lock() {
        cache.put(text.to_string(), width);
    }

    width
}

/// Remove all SGR escape sequences from a string.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    ANSI_RE.replace_all(text, "").into_owned()
}

/// Take a prefix of at most `width` visible cells, passing escapes through.
///
/// A wide character that would straddle the boundary is dropped, so the
/// result may come up one cell short.
fn take_visible(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    let mut i = 0;

    while i < text.len() {
        if text.as_bytes()[i] == 0x1b
            && let Some(m) = ANSI_RE.find(&text[i..])
            && m.start() == 0
        {
            out.push_str(m.as_str());
            i += m.end();
            continue;
        }
        let c = text[i..].chars().next().expect("non-empty remainder");
        let w = char_cell_width(c);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
        i += c.len_utf8();
    }

    out
}

/// Crop a string to at most `width` visible cells.
///
/// Escape sequences pass through unmodified. When `ellipsis` is set,
/// truncation with `width >= 2` replaces the trailing visible cell with a
/// single `…` so the visible length is exactly `width`.
#[must_use]
pub fn crop_visible(text: &str, width: usize, ellipsis: bool) -> String {
    if width == 0 {
        return String::new();
    }
    if visible_len(text) <= width {
        return text.to_string();
    }
    if ellipsis && width >= 2 {
        let mut out = take_visible(text, width - 1);
        out.push('…');
        out
    } else {
        take_visible(text, width)
    }
}

/// Left-justify a string to an exact visible width without disturbing
/// embedded escapes. Strings already wider than `width` are returned as-is.
#[must_use]
pub fn ljust_visible(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_len(text));
    if pad == 0 {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + pad);
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', pad));
    out
}
