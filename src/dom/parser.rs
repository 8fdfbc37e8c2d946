use crate::dom::{DomNode, DomTree};
use scraper::{ElementRef, Html, Node};

/// Elements whose text is kept byte-for-byte, whitespace included.
const RAW_TEXT: &[&str] = &["script", "style", "pre", "textarea"];

/// Parse raw HTML string into a DomTree rooted at `<html>`.
pub fn parse_html(html: &str, url: &str) -> DomTree {
    let document = Html::parse_document(html);

    // Extract <title>
    let title = scraper::Selector::parse("title")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default();

    let root = convert_element(document.root_element());

    DomTree {
        root,
        url: url.to_string(),
        title: title.trim().to_string(),
    }
}

fn convert_element(el: ElementRef<'_>) -> DomNode {
    let tag = el.value().name.local.as_ref().to_string();
    let attributes: Vec<(String, String)> = el
        .value()
        .attrs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let keep_whitespace = RAW_TEXT.contains(&tag.as_str());

    let mut children = Vec::new();

    for child_ref in el.children() {
        match child_ref.value() {
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child_ref) {
                    children.push(convert_element(child_el));
                }
            }
            Node::Text(t) => {
                let s = t.text.to_string();
                if keep_whitespace || !s.trim().is_empty() {
                    children.push(DomNode::text(s));
                }
            }
            _ => {}
        }
    }

    DomNode::element(tag, attributes, children)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_html() {
        let html = r#"
        <html>
            <head><title>Bar Chart</title></head>
            <body>
                <h1>Growth</h1>
                <p>Content paragraph</p>
            </body>
        </html>
        "#;

        let tree = parse_html(html, "file:///site/bar.html");
        assert_eq!(tree.title, "Bar Chart");
        assert_eq!(tree.root.tag, "html");
        assert!(tree.root.collect_text().contains("Growth"));
    }

    #[test]
    fn keeps_script_and_style_bodies() {
        let html = r#"
        <html><head><style>
  .bar { fill: red; }
</style></head><body>
            <p>Visible</p>
            <script>const n = 1;
console.log(n);</script>
        </body></html>
        "#;

        let tree = parse_html(html, "file:///site/bar.html");
        let style = tree.root.elements_named("style");
        assert_eq!(style[0].raw_text(), "\n  .bar { fill: red; }\n");
        let script = tree.root.elements_named("script");
        assert_eq!(script[0].raw_text(), "const n = 1;\nconsole.log(n);");
    }

    #[test]
    fn keeps_all_attributes() {
        let tree = parse_html(
            r#"<html><body><div id="a" class="b" data-x="1"></div></body></html>"#,
            "",
        );
        let div = tree.root.elements_named("div")[0];
        assert_eq!(div.attributes.len(), 3);
        assert_eq!(div.attr("data-x"), Some("1"));
        assert_eq!(div.attr("id"), Some("a"));
    }
}
