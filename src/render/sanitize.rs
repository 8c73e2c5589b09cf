//! Markup sanitization.
//!
//! Rendered markup passes through a fixed allow-list before any styling is
//! injected. Script and embedding tags, event-handler attributes, and
//! non-http(s)/mailto/tel URLs never survive; inline `style` does, so
//! author-supplied presentation can be merged with injected templates.

use ammonia::Builder;
use std::collections::{HashMap, HashSet};

const ALLOWED_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "br", "hr", "ul", "ol", "li", "strong", "em", "del",
    "code", "pre", "blockquote", "a", "img", "span", "table", "thead", "tbody", "tfoot", "tr",
    "th", "td",
];

/// Sanitize rendered markup against the fixed allow-list.
pub(crate) fn sanitize(html: &str) -> String {
    builder().clean(html).to_string()
}

fn builder() -> Builder<'static> {
    let mut tag_attributes = HashMap::new();
    tag_attributes.insert("a", HashSet::from(["href", "title"]));
    tag_attributes.insert("img", HashSet::from(["src", "alt", "title", "width", "height"]));
    tag_attributes.insert("th", HashSet::from(["colspan", "rowspan", "align"]));
    tag_attributes.insert("td", HashSet::from(["colspan", "rowspan", "align"]));

    let mut builder = Builder::default();
    builder
        .tags(ALLOWED_TAGS.iter().copied().collect())
        .tag_attributes(tag_attributes)
        .generic_attributes(HashSet::from(["style"]))
        .url_schemes(HashSet::from(["http", "https", "mailto", "tel"]));
    builder
}
