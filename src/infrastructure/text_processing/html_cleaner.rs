use crate::domain::{HtmlElement, HtmlNode};

/// Elements removed together with their whole subtree.
const NON_CONTENT_TAGS: &[&str] = &[
    "head", "title", "meta", "link", "style", "script", "noscript", "img", "svg", "iframe",
    "object", "embed",
];

/// Link targets allowed to survive; anything else (`javascript:`, `data:`,
/// relative page links) is dropped with the `href`.
const SAFE_HREF_PREFIXES: &[&str] = &["http://", "https://", "mailto:", "#"];

/// Drops non-content subtrees and every attribute except a safe `href` on
/// links. Links left without an `href` are unwrapped, which also removes the
/// `<a name=N></a>` page anchors written by `pdftohtml`.
pub fn strip_non_content(mut element: HtmlElement) -> HtmlElement {
    let tag = &element.tag;
    element
        .attributes
        .retain(|(name, value)| is_allowed_attribute(tag, name, value));

    element.children = std::mem::take(&mut element.children)
        .into_iter()
        .flat_map(strip_node)
        .collect();

    element
}

fn strip_node(node: HtmlNode) -> Vec<HtmlNode> {
    match node {
        HtmlNode::Text(text) => vec![HtmlNode::Text(text)],
        HtmlNode::Element(element) if is_non_content(&element) => Vec::new(),
        HtmlNode::Element(element) => {
            let element = strip_non_content(element);
            if element.is("a") && element.attribute("href").is_none() {
                element.children
            } else {
                vec![HtmlNode::Element(element)]
            }
        }
    }
}

fn is_non_content(element: &HtmlElement) -> bool {
    NON_CONTENT_TAGS.contains(&element.tag.as_str())
}

fn is_allowed_attribute(tag: &str, name: &str, value: &str) -> bool {
    tag == "a" && name == "href" && is_safe_href(value)
}

fn is_safe_href(href: &str) -> bool {
    let href = href.trim().to_ascii_lowercase();
    SAFE_HREF_PREFIXES
        .iter()
        .any(|prefix| href.starts_with(prefix))
}
