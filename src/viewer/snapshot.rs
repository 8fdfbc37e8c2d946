//! Point-in-time capture of a document's HTML, CSS and JavaScript.

use std::borrow::Cow;

use super::Tab;
use crate::dom::parser::parse_html;
use crate::dom::serialize::{format_markup, to_markup, SerializeOptions};
use crate::dom::DomNode;

pub const NO_CSS: &str = "/* No CSS styles found */";
pub const NO_JS: &str = "/* No JavaScript code found */";

/// Inline scripts mentioning this marker belong to the viewer itself.
pub const DEFAULT_SELF_MARKER: &str = "CodeViewer";

const HTML_VIEW: SerializeOptions<'static> = SerializeOptions {
    skip_tags: &["script"],
    skip_attr_prefix: Some("data-"),
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceSnapshot {
    pub html: String,
    pub css: String,
    pub javascript: String,
}

impl SourceSnapshot {
    /// Parse `document` and capture its three source views.
    pub fn capture(document: &str, self_marker: &str) -> Self {
        let tree = parse_html(document, "");
        Self::from_root(&tree.root, self_marker)
    }

    pub fn from_root(root: &DomNode, self_marker: &str) -> Self {
        Self {
            html: format_markup(&to_markup(root, &HTML_VIEW)),
            css: extract_css(root),
            javascript: extract_javascript(root, self_marker),
        }
    }

    /// Text shown on `tab`.
    pub fn text(&self, tab: Tab) -> Cow<'_, str> {
        match tab {
            Tab::Html => Cow::Borrowed(&self.html),
            Tab::Css => Cow::Borrowed(&self.css),
            Tab::Javascript => Cow::Borrowed(&self.javascript),
            Tab::All => Cow::Owned(self.combined()),
        }
    }

    /// HTML, CSS and JS in one commented view, as shown on the "all" tab.
    pub fn combined(&self) -> String {
        format!(
            "<!-- HTML -->\n{}\n\n<style>\n/* CSS */\n{}\n</style>\n\n<script>\n// JavaScript\n{}\n</script>",
            self.html, self.css, self.javascript
        )
    }

    /// Self-contained document embedding the CSS and JS.
    pub fn complete_document(&self) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Infographic Animation Code</title>
    <style>
{}
    </style>
</head>
<body>
{}
    <script>
{}
    </script>
</body>
</html>"#,
            self.css, self.html, self.javascript
        )
    }
}

fn extract_css(root: &DomNode) -> String {
    let mut blocks: Vec<String> = root
        .elements_named("style")
        .into_iter()
        .map(|s| s.raw_text().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let external: Vec<&str> = root
        .elements_named("link")
        .into_iter()
        .filter(|l| {
            l.attr("rel")
                .map(|r| r.split_whitespace().any(|t| t.eq_ignore_ascii_case("stylesheet")))
                .unwrap_or(false)
        })
        .filter_map(|l| l.attr("href"))
        .collect();

    if !external.is_empty() {
        let mut note = String::from("/* External stylesheets */\n");
        for href in external {
            note.push_str(&format!("/* {} */\n", href));
        }
        note.push_str("/* Their rules are not part of this snapshot */");
        blocks.push(note);
    }

    if blocks.is_empty() {
        NO_CSS.to_string()
    } else {
        blocks.join("\n\n")
    }
}

fn extract_javascript(root: &DomNode, self_marker: &str) -> String {
    let blocks: Vec<String> = root
        .elements_named("script")
        .into_iter()
        .filter(|s| s.attr("src").is_none())
        .map(|s| s.raw_text().trim().to_string())
        .filter(|s| !s.is_empty() && (self_marker.is_empty() || !s.contains(self_marker)))
        .collect();

    if blocks.is_empty() {
        NO_JS.to_string()
    } else {
        blocks.join("\n\n")
    }
}
