//! Turn a [`DomNode`] tree back into markup, optionally dropping elements
//! and attributes on the way.

use std::sync::OnceLock;

use regex::Regex;

use crate::dom::{DomNode, NodeType};

/// Elements that never have a closing tag.
const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text is emitted without entity escaping.
const RAW_TEXT: &[&str] = &["script", "style"];

#[derive(Debug, Clone, Default)]
pub struct SerializeOptions<'a> {
    /// Elements dropped together with their subtree.
    pub skip_tags: &'a [&'a str],
    /// Attributes whose name starts with this prefix are dropped.
    pub skip_attr_prefix: Option<&'a str>,
}

pub fn to_markup(node: &DomNode, opts: &SerializeOptions<'_>) -> String {
    let mut out = String::new();
    write_node(node, opts, false, &mut out);
    out
}

fn write_node(node: &DomNode, opts: &SerializeOptions<'_>, raw: bool, out: &mut String) {
    match node.node_type {
        NodeType::Text => {
            if raw {
                out.push_str(&node.text);
            } else {
                out.push_str(&escape_text(&node.text));
            }
        }
        NodeType::Element => {
            if opts.skip_tags.contains(&node.tag.as_str()) {
                return;
            }
            out.push('<');
            out.push_str(&node.tag);
            for (name, value) in &node.attributes {
                if let Some(prefix) = opts.skip_attr_prefix {
                    if name.starts_with(prefix) {
                        continue;
                    }
                }
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }
            out.push('>');
            if VOID.contains(&node.tag.as_str()) {
                return;
            }
            let raw_children = RAW_TEXT.contains(&node.tag.as_str());
            for child in &node.children {
                write_node(child, opts, raw_children, out);
            }
            out.push_str("</");
            out.push_str(&node.tag);
            out.push('>');
        }
    }
}

/// Collapse whitespace runs and put every tag on its own line.
pub fn format_markup(markup: &str) -> String {
    static WS: OnceLock<Regex> = OnceLock::new();
    static BETWEEN_TAGS: OnceLock<Regex> = OnceLock::new();
    let ws = WS.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"));
    let between =
        BETWEEN_TAGS.get_or_init(|| Regex::new(r">\s*<").expect("valid tag boundary regex"));

    let collapsed = ws.replace_all(markup, " ");
    between.replace_all(&collapsed, ">\n<").trim().to_string()
}

pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parser::parse_html;

    const STRIP: SerializeOptions<'static> = SerializeOptions {
        skip_tags: &["script"],
        skip_attr_prefix: Some("data-"),
    };

    #[test]
    fn drops_scripts_and_data_attributes() {
        let tree = parse_html(
            r#"<html><body><svg data-value="3"><rect width="10"></rect></svg>
            <script>alert(1)</script></body></html>"#,
            "",
        );
        let markup = to_markup(&tree.root, &STRIP);
        assert!(markup.contains(r#"<rect width="10"></rect>"#));
        assert!(markup.contains("<svg>"));
        assert!(!markup.contains("data-value"));
        assert!(!markup.contains("alert"));
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let tree = parse_html(r#"<html><head><meta charset="utf-8"></head><body><br></body></html>"#, "");
        let markup = to_markup(&tree.root, &SerializeOptions::default());
        assert!(markup.contains(r#"<meta charset="utf-8">"#));
        assert!(!markup.contains("</meta>"));
        assert!(!markup.contains("</br>"));
    }

    #[test]
    fn escapes_text_but_not_style() {
        let tree = parse_html(
            "<html><head><style>a > b { color: red; }</style></head><body><p>1 &lt; 2</p></body></html>",
            "",
        );
        let markup = to_markup(&tree.root, &SerializeOptions::default());
        assert!(markup.contains("<style>a > b { color: red; }</style>"));
        assert!(markup.contains("<p>1 &lt; 2</p>"));
    }

    #[test]
    fn formats_one_tag_per_line() {
        let formatted = format_markup("<div>\n   <p>Hi   there</p>  <span></span>\n</div>");
        assert_eq!(formatted, "<div>\n<p>Hi there</p>\n<span>\n</span>\n</div>");
    }
}
