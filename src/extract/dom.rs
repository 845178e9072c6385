//! Small helpers over `scraper` element trees

use crate::ExtractionError;
use scraper::{ElementRef, Html, Selector};

pub(crate) fn selector(css: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(css).map_err(|e| ExtractionError::Pattern(format!("{css}: {e}")))
}

/// Newlines removed, surrounding whitespace trimmed
pub(crate) fn clean(text: &str) -> String {
    text.replace('\n', "").trim().to_string()
}

/// The text that precedes the element's first child element
///
/// Empty when the element opens with another element.
pub(crate) fn own_text(element: ElementRef<'_>) -> String {
    element
        .children()
        .next()
        .and_then(|node| node.value().as_text().map(|text| clean(text)))
        .unwrap_or_default()
}

/// All descendant text, concatenated
pub(crate) fn text_content(element: ElementRef<'_>) -> String {
    clean(&element.text().collect::<String>())
}

/// Direct child elements named `name`
pub(crate) fn children_named<'a>(
    element: ElementRef<'a>,
    name: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name() == name)
}

/// The first match of `css` in the document, or `MissingField(field)`
pub(crate) fn require<'a>(
    document: &'a Html,
    css: &str,
    field: &str,
) -> Result<ElementRef<'a>, ExtractionError> {
    document
        .select(&selector(css)?)
        .next()
        .ok_or_else(|| ExtractionError::missing(field))
}

/// The first match of `css` below `element`, or `MissingField(field)`
pub(crate) fn require_in<'a>(
    element: ElementRef<'a>,
    css: &str,
    field: &str,
) -> Result<ElementRef<'a>, ExtractionError> {
    element
        .select(&selector(css)?)
        .next()
        .ok_or_else(|| ExtractionError::missing(field))
}

/// The only match of `css`, or `None` when the match count is not one
pub(crate) fn exactly_one<'a>(
    document: &'a Html,
    css: &str,
) -> Result<Option<ElementRef<'a>>, ExtractionError> {
    let selector = selector(css)?;
    let mut matches = document.select(&selector);
    Ok(match (matches.next(), matches.next()) {
        (Some(only), None) => Some(only),
        _ => None,
    })
}
