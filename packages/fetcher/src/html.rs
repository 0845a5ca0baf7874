//! Readable-text extraction from raw HTML.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid selector"));

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("valid selector"));

/// Subtrees that never carry article text.
const SKIP_TAGS: &[&str] = &["script", "style", "noscript", "svg", "nav", "footer"];

/// Extract article text from an HTML page.
///
/// Joins the text of all `<p>` elements with single spaces. Pages without
/// paragraphs fall back to the whole body text.
pub fn extract_article_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let paragraphs: Vec<String> = document
        .select(&PARAGRAPH)
        .map(|p| collapse_whitespace(&element_text(p)))
        .filter(|text| !text.is_empty())
        .collect();

    if !paragraphs.is_empty() {
        return paragraphs.join(" ");
    }

    let root = document
        .select(&BODY)
        .next()
        .unwrap_or_else(|| document.root_element());
    collapse_whitespace(&element_text(root))
}

/// Collect the text below an element, skipping script/style subtrees.
fn element_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            if SKIP_TAGS.contains(&child_element.value().name()) {
                continue;
            }
            out.push_str(&element_text(child_element));
            out.push(' ');
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
    out
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
