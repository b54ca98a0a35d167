use scraper::{ElementRef, Html, Node};

use crate::domain::{HtmlElement, HtmlNode};

/// Parses a document into the typed tree rooted at `<html>`.
///
/// Comments, doctypes and processing instructions are discarded. Fragments
/// are accepted; the parser supplies the missing `<html>`/`<body>` wrapper.
pub fn parse_html(source: &str) -> HtmlElement {
    let document = Html::parse_document(source);
    convert_element(document.root_element())
}

fn convert_element(element: ElementRef<'_>) -> HtmlElement {
    let value = element.value();
    let mut converted = HtmlElement {
        tag: value.name().to_ascii_lowercase(),
        attributes: value
            .attrs()
            .map(|(name, value)| (name.to_ascii_lowercase(), value.to_string()))
            .collect(),
        children: Vec::new(),
    };

    for child in element.children() {
        match child.value() {
            Node::Text(text) => converted.children.push(HtmlNode::Text(text.to_string())),
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    converted
                        .children
                        .push(HtmlNode::Element(convert_element(child_element)));
                }
            }
            _ => {}
        }
    }

    converted
}
