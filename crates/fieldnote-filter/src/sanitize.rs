//! Active-content sanitization.
//!
//! A thin wrapper around `ammonia`, configured once. The tag set here is a
//! generous superset of everything the later filters may retain — tag-level
//! *policy* belongs to the tag filter, this stage only guarantees that no
//! script-executing construct survives into the parsed tree.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use ammonia::{Builder, UrlRelative};

/// Tags tolerated by the sanitizer.
const SANITIZER_TAGS: &[&str] = &[
    "a", "b", "blockquote", "br", "code", "dd", "div", "dl", "dt", "em", "font", "h1", "h2", "h3",
    "h4", "h5", "h6", "i", "img", "li", "ol", "p", "pre", "rp", "rt", "ruby", "s", "span",
    "strong", "sub", "sup", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "u", "ul",
];

/// Attributes allowed on any tolerated tag. Everything else — above all the
/// `on*` handlers — is dropped here.
const GENERIC_ATTRIBUTES: &[&str] = &["style", "class", "id", "dir", "lang", "title"];

/// Removed together with their contents: text inside these has no meaning
/// worth keeping.
const DISCARDED_WITH_CONTENT: &[&str] = &["script", "style", "title"];

static SANITIZER: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let mut tag_attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    tag_attributes.insert("a", ["href"].into_iter().collect());
    tag_attributes.insert("img", ["src", "alt", "width", "height"].into_iter().collect());
    tag_attributes.insert("font", ["color"].into_iter().collect());
    tag_attributes.insert("tr", ["rowspan"].into_iter().collect());
    tag_attributes.insert("td", ["colspan", "rowspan"].into_iter().collect());
    tag_attributes.insert("th", ["colspan", "rowspan"].into_iter().collect());
    tag_attributes.insert("ol", ["start"].into_iter().collect());

    let mut builder = Builder::default();
    builder
        .tags(SANITIZER_TAGS.iter().copied().collect())
        .generic_attributes(GENERIC_ATTRIBUTES.iter().copied().collect())
        .tag_attributes(tag_attributes)
        .clean_content_tags(DISCARDED_WITH_CONTENT.iter().copied().collect())
        .link_rel(None)
        .url_relative(UrlRelative::PassThrough);
    builder
});

/// Strip active content from raw markup. Runs on the string, before any
/// parse; the rest of the pipeline relies on its output being inert.
pub fn sanitize(html: &str) -> String {
    SANITIZER.clean(html).to_string()
}
