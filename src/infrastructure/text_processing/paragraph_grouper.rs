use crate::domain::{HtmlElement, HtmlNode, ParagraphBlock};

use super::text_sanitizer::{escape_attribute, escape_text};

/// Containers that always start a new paragraph.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "blockquote", "pre", "h1", "h2", "h3", "h4", "h5", "h6",
    "li", "ul", "ol", "table", "thead", "tbody", "tfoot", "tr", "td", "th", "header", "footer",
    "main", "nav", "aside", "center", "dl", "dt", "dd", "figure", "figcaption", "address",
];

/// Inline wrappers that carry only presentation; their children are kept,
/// the tag itself is not.
const UNWRAPPED_TAGS: &[&str] = &["span", "font"];

/// Page separator written by `pdftohtml`. Never rendered.
const PAGE_BREAK_TAG: &str = "hr";

/// Regroups a sequence of sibling nodes into paragraphs.
///
/// Rules, applied to each node in document order:
///
/// * non-blank text and inline elements accumulate in a pending paragraph;
/// * whitespace-only text containing a line break ends the pending paragraph,
///   unless it directly follows a `<br>`; plain spaces only separate words;
/// * one `<br>` is a soft line break, a second consecutive `<br>` ends the
///   pending paragraph;
/// * an `<hr>` page break ends the pending paragraph;
/// * a non-blank block container ends the pending paragraph and becomes its
///   own paragraph. If it nests further block containers it is descended
///   into instead, so each nested block becomes a paragraph. Inline elements
///   wrapping block containers are descended into the same way;
/// * blank inline elements leave a single space if they held whitespace;
/// * blank containers are dropped without ending the pending paragraph.
pub fn group_paragraphs(nodes: &[HtmlNode]) -> Vec<ParagraphBlock> {
    let mut grouper = ParagraphGrouper::default();
    grouper.walk(nodes);
    grouper.flush();
    grouper.blocks
}

#[derive(Default)]
struct ParagraphGrouper {
    blocks: Vec<ParagraphBlock>,
    pending: LineBuffer,
    after_line_break: bool,
}

impl ParagraphGrouper {
    fn walk(&mut self, nodes: &[HtmlNode]) {
        for node in nodes {
            match node {
                HtmlNode::Text(text) if text.trim().is_empty() => {
                    if !text.contains('\n') {
                        self.pending.push_raw(text);
                    } else if !self.after_line_break {
                        self.flush();
                    }
                }
                HtmlNode::Text(text) => {
                    self.pending.push_raw(&escape_text(text));
                    self.after_line_break = false;
                }
                HtmlNode::Element(element) => self.visit_element(element),
            }
        }
    }

    fn visit_element(&mut self, element: &HtmlElement) {
        if element.is("br") {
            if self.after_line_break {
                self.flush();
            } else {
                self.pending.break_line();
                self.after_line_break = true;
            }
        } else if element.is(PAGE_BREAK_TAG) {
            self.flush();
        } else if is_block(element) || contains_block(element) {
            if element.is_blank() {
                return;
            }
            self.flush();
            if contains_block(element) {
                self.walk(&element.children);
                self.flush();
            } else {
                let mut lines = LineBuffer::default();
                lines.append_inline(&element.children);
                self.emit(lines.take_lines());
            }
        } else if is_unwrapped(element) {
            self.walk(&element.children);
        } else if !element.is_blank() {
            self.pending.push_raw(&render_inline(element));
            self.after_line_break = false;
        } else if holds_whitespace(element) {
            self.pending.push_raw(" ");
        }
    }

    fn flush(&mut self) {
        let lines = self.pending.take_lines();
        self.emit(lines);
        self.after_line_break = false;
    }

    fn emit(&mut self, lines: Vec<String>) {
        if let Some(block) = ParagraphBlock::new(lines) {
            self.blocks.push(block);
        }
    }
}

/// Escaped HTML accumulated line by line; each line becomes one unit of a
/// paragraph block.
#[derive(Default)]
struct LineBuffer {
    lines: Vec<String>,
    current: String,
}

impl LineBuffer {
    fn push_raw(&mut self, html: &str) {
        self.current.push_str(html);
    }

    fn break_line(&mut self) {
        let line = std::mem::take(&mut self.current);
        if !line.trim().is_empty() {
            self.lines.push(line);
        }
    }

    fn append_inline(&mut self, nodes: &[HtmlNode]) {
        for node in nodes {
            match node {
                HtmlNode::Text(text) => self.push_raw(&escape_text(text)),
                HtmlNode::Element(element) if element.is("br") || element.is(PAGE_BREAK_TAG) => {
                    self.break_line()
                }
                HtmlNode::Element(element) if is_unwrapped(element) => {
                    self.append_inline(&element.children)
                }
                HtmlNode::Element(element) if !element.is_blank() => {
                    self.push_raw(&render_inline(element))
                }
                HtmlNode::Element(element) if holds_whitespace(element) => self.push_raw(" "),
                HtmlNode::Element(_) => {}
            }
        }
    }

    fn take_lines(&mut self) -> Vec<String> {
        self.break_line();
        std::mem::take(&mut self.lines)
    }
}

fn render_inline(element: &HtmlElement) -> String {
    let mut out = format!("<{}", element.tag);
    for (name, value) in &element.attributes {
        out.push_str(&format!(" {name}=\"{}\"", escape_attribute(value)));
    }
    out.push('>');
    render_inline_children(&element.children, &mut out);
    out.push_str(&format!("</{}>", element.tag));
    out
}

fn render_inline_children(nodes: &[HtmlNode], out: &mut String) {
    for node in nodes {
        match node {
            HtmlNode::Text(text) => out.push_str(&escape_text(text)),
            HtmlNode::Element(element) if element.is("br") || element.is(PAGE_BREAK_TAG) => {
                out.push(' ')
            }
            HtmlNode::Element(element) if is_unwrapped(element) => {
                render_inline_children(&element.children, out)
            }
            HtmlNode::Element(element) => out.push_str(&render_inline(element)),
        }
    }
}

fn is_block(element: &HtmlElement) -> bool {
    BLOCK_TAGS.contains(&element.tag.as_str())
}

fn is_unwrapped(element: &HtmlElement) -> bool {
    UNWRAPPED_TAGS.contains(&element.tag.as_str())
}

fn holds_whitespace(element: &HtmlElement) -> bool {
    !element.text_content().is_empty()
}

fn contains_block(element: &HtmlElement) -> bool {
    element
        .children
        .iter()
        .filter_map(HtmlNode::as_element)
        .any(|child| is_block(child) || contains_block(child))
}
