//! Two-pass parsing with plausibility checks.
//!
//! | From                 | Condition                              | To                   |
//! |----------------------|----------------------------------------|----------------------|
//! | `NotTried`           | markup declares a byte encoding        | `BytesParseFallback` |
//! | `NotTried`           | otherwise                              | `StringParsed`       |
//! | `StringParsed`       | no tree, or a root without children    | bytes parse, judged  |
//! | `StringParsed`       | otherwise                              | judged               |
//! | `BytesParseFallback` |                                        | judged               |
//!
//! Judging rejects a missing tree, and a dubious one with too few children.

use std::borrow::Cow;

use ego_tree::Tree;
use html5ever::driver::{self, ParseOpts};
use scraper::{Html, HtmlTreeSink, Node};
use tendril::TendrilSink;
use tracing::instrument;

use crate::{Document, consts};

/// Everything about the markup that is decided before parsing starts.
#[derive(Debug)]
pub(crate) struct Job<'a> {
    pub(crate) markup: Cow<'a, str>,
    /// The first few characters don't mention `html`.
    pub(crate) dubious: bool,
    /// The markup opens with `<html` or a doctype rather than being a fragment.
    pub(crate) full: bool,
    /// Children a dubious tree needs to be believed.
    pub(crate) min_children: usize,
}
impl<'a> Job<'a> {
    pub(crate) fn new(markup: &'a str, sniff_chars: usize, min_children: usize) -> Self {
        let beginning = markup.chars().take(sniff_chars).collect::<String>().to_lowercase();
        let markup = if beginning.contains("doctype") { repair_doctype(markup) } else { Cow::Borrowed(markup) };
        let full = consts::FULL_DOCUMENT.is_match(&markup);
        Self { markup, dubious: !beginning.contains("html"), full, min_children }
    }

    fn wrap(&self, mut html: Html) -> Document {
        strip_comments(&mut html);
        if self.full { Document::new(html) } else { Document::from_fragment(html) }
    }

    fn is_blank(&self) -> bool {
        if self.markup.trim().is_empty() {
            tracing::debug!("empty markup, nothing to parse");
            return true;
        }
        false
    }

    fn parse_str(&self) -> Option<Document> {
        if self.is_blank() {
            return None;
        }
        Some(self.wrap(Html::parse_document(&self.markup)))
    }

    fn parse_bytes(&self) -> Option<Document> {
        if self.is_blank() {
            return None;
        }
        let html = driver::parse_document(HtmlTreeSink::new(Html::new_document()), ParseOpts::default())
            .from_utf8()
            .one(self.markup.as_bytes());
        Some(self.wrap(html))
    }

    fn judge(&self, document: Option<Document>) -> Parse {
        match document {
            None => Parse::Rejected,
            Some(document) if self.dubious && document.child_count() < self.min_children => {
                tracing::error!(
                    child_count = document.child_count(),
                    "parsed tree too small for markup not mentioning html, discarding it"
                );
                Parse::Rejected
            },
            Some(document) => Parse::Accepted(document),
        }
    }
}

/// Parse progress.
#[derive(Debug)]
pub(crate) enum Parse {
    NotTried,
    StringParsed(Option<Document>),
    BytesParseFallback(Option<Document>),
    Rejected,
    Accepted(Document),
}
impl Parse {
    pub(crate) fn advance(self, job: &Job<'_>) -> Self {
        match self {
            Parse::NotTried if consts::XML_ENCODING_DECLARATION.is_match(&job.markup) => {
                tracing::debug!("markup declares a byte encoding, parsing as bytes");
                Parse::BytesParseFallback(job.parse_bytes())
            },
            Parse::NotTried => Parse::StringParsed(job.parse_str()),
            Parse::StringParsed(document) => match document {
                Some(document) if document.child_count() >= 1 => job.judge(Some(document)),
                _ => {
                    tracing::debug!("string parse produced no usable tree, parsing as bytes");
                    job.judge(job.parse_bytes())
                },
            },
            Parse::BytesParseFallback(document) => job.judge(document),
            terminal @ (Parse::Rejected | Parse::Accepted(_)) => terminal,
        }
    }
}

/// Run a job to completion.
#[instrument(level = "debug", skip(job), fields(input_size = job.markup.len(), dubious = job.dubious))]
pub(crate) fn run(job: &Job<'_>) -> Option<Document> {
    let mut state = Parse::NotTried;
    loop {
        match state {
            Parse::Accepted(document) => return Some(document),
            Parse::Rejected => return None,
            pending => state = pending.advance(job),
        }
    }
}

/// Drop a self-closing doctype from the first line.
pub(crate) fn repair_doctype(markup: &str) -> Cow<'_, str> {
    let (first, rest) = match markup.split_once('\n') {
        Some((first, rest)) => (first, Some(rest)),
        None => (markup, None),
    };
    let Some(doctype) = consts::DOCTYPE_TAG.find(first) else {
        return Cow::Borrowed(markup);
    };
    let mut repaired = String::with_capacity(markup.len());
    repaired.push_str(&first[doctype.end()..]);
    if let Some(rest) = rest {
        repaired.push('\n');
        repaired.push_str(rest);
    }
    Cow::Owned(repaired)
}

/// Comments (and processing instructions, which the HTML parser turns into
/// comments) carry nothing worth extracting.
///
/// Detaching a node leaves it in the tree's arena, so the tree is rebuilt
/// without them instead.
fn strip_comments(html: &mut Html) {
    if !html.tree.values().any(Node::is_comment) {
        return;
    }
    let source = &html.tree;
    let mut tree = Tree::new(source.root().value().clone());
    let mut pending = vec![(source.root(), tree.root().id())];
    while let Some((from, to)) = pending.pop() {
        for child in from.children().filter(|child| !child.value().is_comment()) {
            if let Some(mut parent) = tree.get_mut(to) {
                let copied = parent.append(child.value().clone()).id();
                pending.push((child, copied));
            }
        }
    }
    html.tree = tree;
}
