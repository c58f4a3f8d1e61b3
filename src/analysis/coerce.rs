//! Coerce-with-default helpers applied at the parse boundary
//!
//! Attribute values arrive as raw text. A missing attribute becomes `0` (or the
//! default string); a present one goes through the permissive string-to-number
//! rule below. Text that is not a number becomes NaN and is passed through.

/// Fill used when a rectangle has no `fill` attribute
pub const DEFAULT_FILL: &str = "#000000";

/// Coerce an optional attribute value to a number, `0` when absent
pub fn number(value: Option<&str>) -> f64 {
    match value {
        Some(text) => to_number(text),
        None => 0.0,
    }
}

/// Coerce an optional attribute value to a string, `default` when absent
pub fn text_or(value: Option<&str>, default: &str) -> String {
    value.unwrap_or(default).to_string()
}

/// Permissive string-to-number conversion
///
/// - surrounding whitespace is ignored, and blank text is `0`
/// - decimal literals with optional sign, fraction and exponent
/// - unsigned `0x`, `0o` and `0b` integer literals
/// - `Infinity` with an optional sign
/// - anything else is NaN (`"100px"`, `"nan"`, `"inf"`, `"1,5"`)
pub fn to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(value) = radix_literal(trimmed) {
        return value;
    }

    if is_decimal_literal(trimmed) {
        return trimmed.parse::<f64>().unwrap_or(f64::NAN);
    }

    f64::NAN
}

fn radix_literal(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let digits = &text[2..];
    let value = digits.chars().try_fold(0.0f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
    });
    // Prefix with no valid digits after it is not a number at all
    Some(value.unwrap_or(f64::NAN))
}

/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`
fn is_decimal_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}
