//! Plain-text paste conversion.
//!
//! When the clipboard carries no markup, the text is converted to note-safe
//! markup: escaped, tabs expanded, runs of spaces hardened so they survive
//! HTML whitespace collapsing, lines joined with `<br>`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" ( +)").unwrap());

/// Convert pasted plain text to markup.
pub fn text_to_html(text: &str) -> String {
    let lines: Vec<String> = text
        .split('\n')
        .map(|line| {
            let escaped = html_escape::encode_safe(line).replace('\t', "    ");
            // The second and subsequent spaces of a run become non-breaking.
            SPACE_RUNS
                .replace_all(&escaped, |caps: &Captures| {
                    format!("{} ", caps[1].replace(' ', "&nbsp;"))
                })
                .into_owned()
        })
        .collect();
    lines.join("<br>")
}
