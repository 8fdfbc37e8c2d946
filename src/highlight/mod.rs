//! Regex-driven syntax highlighting for the code viewer.
//!
//! Rules come from an optional external rule document (see [`loader`]); the
//! built-in [`Highlighter::basic`] set is used when none is configured or the
//! document cannot be loaded in time.

pub mod loader;

use std::collections::HashMap;
use std::ops::Range;

use regex::Regex;
use serde::Deserialize;

use crate::error::{GalleryError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[serde(alias = "markup")]
    Html,
    Css,
    #[serde(alias = "js")]
    Javascript,
}

impl Language {
    pub fn name(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Css => "css",
            Self::Javascript => "javascript",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Tag,
    Attribute,
    Selector,
    Property,
    Color,
    Keyword,
    Number,
    String,
    Comment,
}

/// A highlighted byte range of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub range: Range<usize>,
    pub kind: TokenKind,
}

#[derive(Debug, Clone)]
struct Rule {
    kind: TokenKind,
    regex: Regex,
    group: usize,
}

/// One rule as written in the rule document.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleDef {
    pub kind: TokenKind,
    pub pattern: String,
    #[serde(default)]
    pub group: usize,
}

#[derive(Debug, Clone)]
pub struct Highlighter {
    rules: HashMap<Language, Vec<Rule>>,
}

impl Highlighter {
    /// Compile rule definitions. Earlier rules win where matches overlap.
    pub fn from_defs(defs: HashMap<Language, Vec<RuleDef>>) -> Result<Self> {
        let mut rules = HashMap::new();
        for (lang, list) in defs {
            let mut compiled = Vec::with_capacity(list.len());
            for def in list {
                let regex = Regex::new(&def.pattern).map_err(|e| GalleryError::HighlightRule {
                    language: lang.name().to_string(),
                    message: e.to_string(),
                })?;
                if def.group >= regex.captures_len() {
                    return Err(GalleryError::HighlightRule {
                        language: lang.name().to_string(),
                        message: format!("pattern {:?} has no group {}", def.pattern, def.group),
                    });
                }
                compiled.push(Rule {
                    kind: def.kind,
                    regex,
                    group: def.group,
                });
            }
            rules.insert(lang, compiled);
        }
        Ok(Self { rules })
    }

    /// Parse a JSON rule document keyed by language name.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let defs: HashMap<Language, Vec<RuleDef>> = serde_json::from_slice(bytes)?;
        Self::from_defs(defs)
    }

    /// Minimal built-in rules: tags and attributes, selectors, properties and
    /// colors, keywords, numbers, strings and comments.
    pub fn basic() -> Self {
        let def = |kind, pattern: &str, group| RuleDef {
            kind,
            pattern: pattern.to_string(),
            group,
        };
        let mut defs = HashMap::new();
        defs.insert(
            Language::Html,
            vec![
                def(TokenKind::Comment, r"<!--[\s\S]*?-->", 0),
                def(TokenKind::Attribute, r"([\w-]+)=", 1),
                def(TokenKind::Tag, r"</?[A-Za-z][\w-]*", 0),
                def(TokenKind::Tag, r"/?>", 0),
            ],
        );
        defs.insert(
            Language::Css,
            vec![
                def(TokenKind::Comment, r"/\*[\s\S]*?\*/", 0),
                def(TokenKind::Color, r"#[0-9a-fA-F]{3,8}\b", 0),
                def(TokenKind::Property, r"([\w-]+)\s*:", 1),
                def(TokenKind::Selector, r"[.#][A-Za-z_][\w-]*", 0),
            ],
        );
        defs.insert(
            Language::Javascript,
            vec![
                def(TokenKind::Comment, r"//[^\n]*", 0),
                def(TokenKind::Comment, r"/\*[\s\S]*?\*/", 0),
                def(TokenKind::String, r#"'(?:[^'\\\n]|\\.)*'|"(?:[^"\\\n]|\\.)*""#, 0),
                def(
                    TokenKind::Keyword,
                    r"\b(?:function|const|let|var|if|else|for|while|return|new|class|async|await)\b",
                    0,
                ),
                def(TokenKind::Number, r"\b\d+(?:\.\d+)?\b", 0),
            ],
        );
        // The built-in patterns are fixed and known to compile.
        Self::from_defs(defs).unwrap_or_else(|_| Self {
            rules: HashMap::new(),
        })
    }

    /// Fill every language this rule set does not cover from [`basic`].
    ///
    /// [`basic`]: Highlighter::basic
    pub fn or_basic(mut self) -> Self {
        for (lang, rules) in Self::basic().rules {
            if !self.supports(lang) {
                self.rules.insert(lang, rules);
            }
        }
        self
    }

    pub fn supports(&self, lang: Language) -> bool {
        self.rules.get(&lang).map(|r| !r.is_empty()).unwrap_or(false)
    }

    /// Non-overlapping spans sorted by start offset.
    pub fn highlight(&self, lang: Language, text: &str) -> Vec<Span> {
        let Some(rules) = self.rules.get(&lang) else {
            return Vec::new();
        };

        let mut taken = vec![false; text.len()];
        let mut spans = Vec::new();
        for rule in rules {
            for caps in rule.regex.captures_iter(text) {
                let Some(m) = caps.get(rule.group) else {
                    continue;
                };
                let range = m.range();
                if range.is_empty() || taken[range.clone()].iter().any(|t| *t) {
                    continue;
                }
                taken[range.clone()].iter_mut().for_each(|t| *t = true);
                spans.push(Span {
                    range,
                    kind: rule.kind,
                });
            }
        }
        spans.sort_by_key(|s| s.range.start);
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens<'a>(text: &'a str, spans: &[Span]) -> Vec<(&'a str, TokenKind)> {
        spans
            .iter()
            .map(|s| (&text[s.range.clone()], s.kind))
            .collect()
    }

    #[test]
    fn html_tags_and_attributes() {
        let h = Highlighter::basic();
        let text = r#"<rect class="bar"></rect>"#;
        let spans = h.highlight(Language::Html, text);
        assert_eq!(
            tokens(text, &spans),
            vec![
                ("<rect", TokenKind::Tag),
                ("class", TokenKind::Attribute),
                (">", TokenKind::Tag),
                ("</rect", TokenKind::Tag),
                (">", TokenKind::Tag),
            ]
        );
    }

    #[test]
    fn css_colors_win_over_selectors() {
        let h = Highlighter::basic();
        let text = ".bar { fill: #4299e1; }";
        let spans = h.highlight(Language::Css, text);
        assert_eq!(
            tokens(text, &spans),
            vec![
                (".bar", TokenKind::Selector),
                ("fill", TokenKind::Property),
                ("#4299e1", TokenKind::Color),
            ]
        );
    }

    #[test]
    fn js_comments_swallow_keywords() {
        let h = Highlighter::basic();
        let text = "const n = 42; // return early";
        let spans = h.highlight(Language::Javascript, text);
        assert_eq!(
            tokens(text, &spans),
            vec![
                ("const", TokenKind::Keyword),
                ("42", TokenKind::Number),
                ("// return early", TokenKind::Comment),
            ]
        );
    }

    #[test]
    fn spans_never_overlap() {
        let h = Highlighter::basic();
        let text = "let s = 'if 3 else'; /* for 9 */ while (x) { return 1.5; }";
        let spans = h.highlight(Language::Javascript, text);
        for pair in spans.windows(2) {
            assert!(pair[0].range.end <= pair[1].range.start);
        }
    }

    #[test]
    fn rule_documents_compile() {
        let json = br#"{"js": [{"kind": "keyword", "pattern": "\\bplot\\b"}]}"#;
        let h = Highlighter::from_json(json).unwrap();
        assert!(h.supports(Language::Javascript));
        assert!(!h.supports(Language::Css));
        assert_eq!(h.highlight(Language::Javascript, "plot(x)").len(), 1);
        assert!(h.highlight(Language::Css, "a {}").is_empty());
    }

    #[test]
    fn partial_documents_fill_in_builtin_rules() {
        let json = br#"{"css": [{"kind": "number", "pattern": "\\d+px"}]}"#;
        let h = Highlighter::from_json(json).unwrap().or_basic();
        for lang in [Language::Html, Language::Css, Language::Javascript] {
            assert!(h.supports(lang), "{}", lang.name());
        }
        // Loaded rules replace the built-in ones for their own language.
        assert_eq!(
            tokens(".bar { width: 10px; }", &h.highlight(Language::Css, ".bar { width: 10px; }")),
            vec![("10px", TokenKind::Number)]
        );
    }

    #[test]
    fn bad_rules_are_rejected() {
        let bad_regex = br#"{"css": [{"kind": "color", "pattern": "(#"}]}"#;
        assert!(matches!(
            Highlighter::from_json(bad_regex),
            Err(GalleryError::HighlightRule { .. })
        ));
        let bad_group = br##"{"css": [{"kind": "color", "pattern": "#", "group": 2}]}"##;
        assert!(Highlighter::from_json(bad_group).is_err());
    }
}
