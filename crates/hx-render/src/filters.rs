//! Text filters available to every template.
//!
//! - `anchor`: identifier for node ids and needs-side ports
//! - `anchor_p`: identifier for provides-side ports and resources
//! - `escape`: backslash-escapes characters that break record labels
//! - `html_escape`: entity-escapes text placed inside HTML-like labels

use sha2::{Digest, Sha256};

/// Hex digits of the digest kept in an anchor.
pub const ANCHOR_HEX_WIDTH: usize = 6;

const NEEDS_PREFIX: &str = "id";
const PROVIDES_PREFIX: &str = "idp";

/// Stable identifier for `name`, safe to use as a DOT node or port id.
pub fn anchor(name: &str) -> String {
    format!("{}{}", NEEDS_PREFIX, digest_prefix(name))
}

/// Like [`anchor`], with a distinct prefix so a provides port never collides
/// with a needs port of the same name.
pub fn anchor_p(name: &str) -> String {
    format!("{}{}", PROVIDES_PREFIX, digest_prefix(name))
}

/// Backslash-escape `{ } | " < >`.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '{' | '}' | '|' | '"' | '<' | '>') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Replace `& < > "` with HTML entities.
///
/// Graphviz HTML-like labels (`label=<...>`) ignore backslashes, so table
/// cells need entities instead of [`escape`].
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn digest_prefix(name: &str) -> String {
    let digest = Sha256::digest(name.as_bytes());
    let mut hex = format!("{:x}", digest);
    hex.truncate(ANCHOR_HEX_WIDTH);
    hex
}
