//! HTML text extraction.
//!
//! Walks a parsed document and yields the translatable
//! `(fragment handle, original text)` pairs: the direct text of content
//! elements, trimmed, excluding non-content tags, anything carrying the
//! opt-out attribute, and anything nested under an excluded ancestor.
//! Extraction runs once per page; the resulting snapshot is never
//! refreshed.

use scraper::{ElementRef, Html, Node, Selector};
use translate::{Fragment, FragmentId, PageSnapshot};

/// Tags whose direct text is translatable page copy.
const CONTENT_TAGS: &[&str] = &[
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "p",
    "span",
    "div",
    "a",
    "li",
    "td",
    "th",
    "label",
    "button",
    "strong",
    "em",
    "small",
    "blockquote",
    "figcaption",
    "legend",
];

/// Tags never worth translating, subtree included.
const EXCLUDED_TAGS: &[&str] = &["script", "style", "noscript", "code", "pre"];

/// Attribute that opts an element and its subtree out of translation.
const OPT_OUT_ATTR: &str = "data-no-translate";

/// Configurable HTML fragment extractor.
#[derive(Debug, Clone)]
pub struct Extractor {
    content_tags: Vec<String>,
    excluded_tags: Vec<String>,
    opt_out_attr: String,
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            content_tags: CONTENT_TAGS.iter().map(|t| (*t).to_owned()).collect(),
            excluded_tags: EXCLUDED_TAGS.iter().map(|t| (*t).to_owned()).collect(),
            opt_out_attr: OPT_OUT_ATTR.to_owned(),
        }
    }
}

impl Extractor {
    /// Extractor with the default content and exclusion sets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag to the exclusion set.
    pub fn exclude_tag(mut self, tag: impl Into<String>) -> Self {
        self.excluded_tags.push(tag.into());
        self
    }

    /// Add a tag to the content set.
    pub fn include_tag(mut self, tag: impl Into<String>) -> Self {
        self.content_tags.push(tag.into());
        self
    }

    /// Use a different opt-out attribute.
    pub fn opt_out_attr(mut self, attr: impl Into<String>) -> Self {
        self.opt_out_attr = attr.into();
        self
    }

    /// Extract the page's translatable fragments, in document order.
    ///
    /// Each fragment is one element's direct text (child elements report
    /// their own text separately), trimmed; elements whose direct text
    /// trims to empty produce no fragment.
    pub fn extract(&self, html: &str) -> PageSnapshot {
        let document = Html::parse_document(html);
        let any = Selector::parse("*").expect("valid selector");

        let mut fragments = Vec::new();
        let mut next_id = 0u64;
        for element in document.select(&any) {
            let tag = element.value().name();
            if !self.content_tags.iter().any(|t| t == tag) {
                continue;
            }
            if self.is_excluded(element) {
                continue;
            }
            let text = direct_text(element);
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            fragments.push(Fragment::new(FragmentId(next_id), text));
            next_id += 1;
        }

        PageSnapshot::capture(fragments)
    }

    /// Whether the element, or any ancestor, is excluded by tag or by the
    /// opt-out attribute.
    fn is_excluded(&self, element: ElementRef) -> bool {
        std::iter::once(element)
            .chain(element.ancestors().filter_map(ElementRef::wrap))
            .any(|el| {
                self.excluded_tags.iter().any(|t| t == el.value().name())
                    || el.value().attr(&self.opt_out_attr).is_some()
            })
    }
}

/// The concatenated text of an element's direct text-node children.
fn direct_text(element: ElementRef) -> String {
    element
        .children()
        .filter_map(|child| match child.value() {
            Node::Text(text) => Some(text.to_string()),
            _ => None,
        })
        .collect()
}
