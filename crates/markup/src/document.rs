//! The parsed document handed to downstream extraction.

use ego_tree::NodeId;
use scraper::element_ref::Select;
use scraper::{ElementRef, Html, Selector};

use crate::consts;

/// A parsed HTML document together with its effective root.
///
/// A browser-grade parser always builds `<html><head><body>`, even for a lone
/// `<div>`. Downstream code wants the element the markup actually described:
/// the `<html>` element when the markup starts like a full document, the only
/// element inside `<body>` when there is exactly one and nothing else, and
/// `<body>` otherwise.
#[derive(Clone, Debug)]
pub struct Document {
    html: Html,
    root: NodeId,
}
impl Document {
    /// Wrap an already parsed document; `<html>` is the root.
    pub fn new(html: Html) -> Self {
        let root = html.root_element().id();
        Self { html, root }
    }

    /// Wrap a parsed fragment, picking the element the markup described as
    /// the root (see the type documentation).
    pub(crate) fn from_fragment(html: Html) -> Self {
        let root = html
            .select(&consts::BODY_SELECTOR)
            .next()
            .map(|body| Self::only_child(body).unwrap_or(body).id())
            .unwrap_or_else(|| html.root_element().id());
        Self { html, root }
    }

    fn only_child(body: ElementRef<'_>) -> Option<ElementRef<'_>> {
        let blank = body.children().filter_map(|node| node.value().as_text()).all(|text| text.trim().is_empty());
        let mut elements = body.child_elements();
        match (elements.next(), elements.next()) {
            (Some(only), None) if blank => Some(only),
            _ => None,
        }
    }

    /// The whole parsed tree.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// The effective root element.
    pub fn root(&self) -> ElementRef<'_> {
        self.html.tree.get(self.root).and_then(ElementRef::wrap).unwrap_or_else(|| self.html.root_element())
    }

    /// Number of element children of the effective root. An empty `<head>`,
    /// which the parser adds to every document, isn't counted.
    pub fn child_count(&self) -> usize {
        self.root().child_elements().filter(|child| !(child.value().name() == "head" && !child.has_children())).count()
    }

    /// Text content of the effective root.
    pub fn text(&self) -> String {
        self.root().text().collect()
    }

    /// Elements below the effective root matching `selector`.
    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> Select<'a, 'b> {
        self.root().select(selector)
    }

    pub fn into_html(self) -> Html {
        self.html
    }
}
impl From<Html> for Document {
    fn from(html: Html) -> Self {
        Self::new(html)
    }
}
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.html == other.html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("<div><p>a</p><p>b</p></div>", "div", 2)]
    #[case("  <div><p>a</p></div>\n", "div", 1)]
    #[case("<p>a</p><p>b</p>", "body", 2)]
    #[case("loose <p>a</p>", "body", 1)]
    #[case("just text", "body", 0)]
    fn test_fragment_root(#[case] markup: &str, #[case] root: &str, #[case] children: usize) {
        let document = Document::from_fragment(Html::parse_document(markup));
        assert_eq!(document.root().value().name(), root);
        assert_eq!(document.child_count(), children);
    }

    #[rstest]
    #[case("<html><body><p>hello</p></body></html>", 1)]
    #[case("<html><head><title>hello</title></head><body></body></html>", 2)]
    #[case("<!DOCTYPE note SYSTEM \"Note.dtd\">\n<note>hello</note>", 1)]
    fn test_document_root(#[case] markup: &str, #[case] children: usize) {
        let document = Document::new(Html::parse_document(markup));
        assert_eq!(document.root().value().name(), "html");
        assert_eq!(document.child_count(), children);
        assert_eq!(document.text(), "hello");
    }

    #[test]
    fn test_select_is_scoped_to_root() {
        let document = Document::from_fragment(Html::parse_document("<div><p>a</p><p>b</p></div>"));
        let selector = Selector::parse("p").unwrap();
        assert_eq!(document.select(&selector).count(), 2);
        assert_eq!(document.html().select(&selector).count(), 2);
    }
}
