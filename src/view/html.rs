//! Minimal HTML fragment helpers.
//!
//! The dashboards build their fragments with `format!` templates, the
//! same shape as the original markup; everything interpolated from the
//! backend goes through [`escape`] first.

/// Escapes text for safe interpolation into element content or
/// double-quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
