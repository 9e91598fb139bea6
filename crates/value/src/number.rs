//! JavaScript-compatible number text.
//!
//! Numbers are rendered and parsed the way untrusted JSON/JS producers write
//! them, so that `"42"` round-trips to `42` and back to `"42"`.

/// Renders a number like JavaScript's `String(n)`.
#[must_use]
pub fn format(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if n == 0.0 {
        return "0".to_owned();
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }
    let exponential = format!("{n:e}");
    match exponential.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => exponential,
    }
}

/// Parses numeric text the way `Number(text)` does for the forms a template
/// pattern can capture: optional sign, decimal digits with optional fraction
/// and exponent, `0b`/`0o`/`0x` integer prefixes, and `Infinity`.
///
/// Returns `None` for text JavaScript would turn into `NaN`.
#[must_use]
pub fn parse_js(text: &str) -> Option<f64> {
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
        }
    }
    match text {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    let well_formed = !text.is_empty()
        && text.bytes().any(|b| b.is_ascii_digit())
        && text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !well_formed {
        return None;
    }
    text.parse::<f64>().ok()
}

/// True if `key` is exactly how `format` would render the number it denotes
/// (`"1"`, `"-2.5"`), i.e. it is an array-index-like or numeric property key.
#[must_use]
pub fn is_canonical_numeric_key(key: &str) -> bool {
    parse_js(key).is_some_and(|n| format(n) == key)
}
