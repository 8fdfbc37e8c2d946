pub mod parser;
pub mod serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Element,
    Text,
}

/// Owned DOM node.
#[derive(Debug, Clone, PartialEq)]
pub struct DomNode {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<DomNode>,
    pub node_type: NodeType,
}

impl DomNode {
    pub fn element(
        tag: impl Into<String>,
        attrs: Vec<(String, String)>,
        children: Vec<DomNode>,
    ) -> Self {
        Self {
            tag: tag.into(),
            attributes: attrs,
            text: String::new(),
            children,
            node_type: NodeType::Element,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            tag: String::new(),
            attributes: Vec::new(),
            text: content.into(),
            children: Vec::new(),
            node_type: NodeType::Text,
        }
    }

    /// Recursively count all nodes in this subtree
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Concatenated raw text of all descendant text nodes, unmodified.
    /// This is what `<style>`/`<script>` bodies need.
    pub fn raw_text(&self) -> String {
        let mut buf = String::new();
        self.raw_text_inner(&mut buf);
        buf
    }

    fn raw_text_inner(&self, buf: &mut String) {
        buf.push_str(&self.text);
        for child in &self.children {
            child.raw_text_inner(buf);
        }
    }

    /// Collect all text content recursively, space separated and trimmed
    pub fn collect_text(&self) -> String {
        let mut buf = String::new();
        self.collect_text_inner(&mut buf);
        buf
    }

    fn collect_text_inner(&self, buf: &mut String) {
        let t = self.text.trim();
        if !t.is_empty() {
            if !buf.is_empty() {
                buf.push(' ');
            }
            buf.push_str(t);
        }
        for child in &self.children {
            child.collect_text_inner(buf);
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_element(&self, tag: &str) -> bool {
        self.node_type == NodeType::Element && self.tag == tag
    }

    /// All descendant elements (including self) with the given tag, in
    /// document order.
    pub fn elements_named<'a>(&'a self, tag: &str) -> Vec<&'a DomNode> {
        let mut out = Vec::new();
        self.elements_named_inner(tag, &mut out);
        out
    }

    fn elements_named_inner<'a>(&'a self, tag: &str, out: &mut Vec<&'a DomNode>) {
        if self.is_element(tag) {
            out.push(self);
        }
        for child in &self.children {
            child.elements_named_inner(tag, out);
        }
    }
}

/// Parsed DOM tree with metadata
#[derive(Debug, Clone)]
pub struct DomTree {
    pub root: DomNode,
    pub url: String,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DomNode {
        DomNode::element(
            "div",
            vec![("class".into(), "chart".into())],
            vec![
                DomNode::element("p", Vec::new(), vec![DomNode::text("  Hello ")]),
                DomNode::element(
                    "div",
                    Vec::new(),
                    vec![DomNode::element("p", Vec::new(), vec![DomNode::text("World")])],
                ),
            ],
        )
    }

    #[test]
    fn finds_nested_elements_in_order() {
        let root = sample();
        let ps = root.elements_named("p");
        assert_eq!(ps.len(), 2);
        assert_eq!(ps[1].collect_text(), "World");
        assert_eq!(root.elements_named("div").len(), 2);
    }

    #[test]
    fn text_helpers() {
        let root = sample();
        assert_eq!(root.collect_text(), "Hello World");
        assert_eq!(root.raw_text(), "  Hello World");
        assert_eq!(root.attr("class"), Some("chart"));
        assert_eq!(root.attr("id"), None);
        assert_eq!(root.node_count(), 6);
    }
}
