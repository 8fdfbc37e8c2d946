//! Stateless egui helpers shared by the app panels.

use eframe::egui;
use egui::text::{LayoutJob, TextFormat};
use egui::{Color32, FontId};

use infographic_gallery::highlight::{Span, TokenKind};

// ─── Code rendering ──────────────────────────────────────────────────────────

/// Token colours, loosely after the "tomorrow" palette.
pub fn token_color(kind: TokenKind, dark: bool) -> Color32 {
    match (kind, dark) {
        (TokenKind::Tag, true) => Color32::from_rgb(0xe2, 0x77, 0x7a),
        (TokenKind::Tag, false) => Color32::from_rgb(0xc8, 0x28, 0x29),
        (TokenKind::Attribute | TokenKind::Property, true) => Color32::from_rgb(0xf8, 0xc5, 0x55),
        (TokenKind::Attribute | TokenKind::Property, false) => Color32::from_rgb(0xb0, 0x6d, 0x00),
        (TokenKind::Selector, true) => Color32::from_rgb(0x7e, 0xc6, 0x99),
        (TokenKind::Selector, false) => Color32::from_rgb(0x2e, 0x7d, 0x32),
        (TokenKind::Color | TokenKind::Number, true) => Color32::from_rgb(0xf0, 0x8d, 0x49),
        (TokenKind::Color | TokenKind::Number, false) => Color32::from_rgb(0xc4, 0x5d, 0x00),
        (TokenKind::Keyword, true) => Color32::from_rgb(0xcc, 0x99, 0xcd),
        (TokenKind::Keyword, false) => Color32::from_rgb(0x89, 0x59, 0xa8),
        (TokenKind::String, true) => Color32::from_rgb(0x7e, 0xc6, 0x99),
        (TokenKind::String, false) => Color32::from_rgb(0x71, 0x8c, 0x00),
        (TokenKind::Comment, _) => Color32::from_rgb(0x99, 0x99, 0x99),
    }
}

/// Monospace layout of `text`; plain when `spans` is `None`.
pub fn code_layout(text: &str, spans: Option<&[Span]>, dark: bool) -> LayoutJob {
    let font = FontId::monospace(13.0);
    let plain = TextFormat::simple(
        font.clone(),
        if dark {
            Color32::from_gray(220)
        } else {
            Color32::from_gray(30)
        },
    );

    let mut job = LayoutJob::default();
    let mut pos = 0;
    for span in spans.unwrap_or(&[]) {
        let (start, end) = (span.range.start, span.range.end);
        if start < pos || end > text.len() || !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            continue;
        }
        if start > pos {
            job.append(&text[pos..start], 0.0, plain.clone());
        }
        job.append(
            &text[start..end],
            0.0,
            TextFormat::simple(font.clone(), token_color(span.kind, dark)),
        );
        pos = end;
    }
    if pos < text.len() {
        job.append(&text[pos..], 0.0, plain);
    }
    job
}

/// Badge colour for a difficulty label.
pub fn difficulty_color(label: &str) -> Color32 {
    match label {
        "beginner" => Color32::from_rgb(0x38, 0xa1, 0x69),
        "medium" => Color32::from_rgb(0xd6, 0x9e, 0x2e),
        "advanced" => Color32::from_rgb(0xe5, 0x3e, 0x3e),
        _ => Color32::GRAY,
    }
}

// ─── Text utilities ───────────────────────────────────────────────────────────

/// Truncate `s` to at most `max_chars` Unicode scalar values, appending `"..."` if truncated.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let t: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infographic_gallery::highlight::{Highlighter, Language};

    fn job_text(job: &LayoutJob) -> String {
        job.sections
            .iter()
            .map(|s| &job.text[s.byte_range.clone()])
            .collect()
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_str("Bar Chart", 40), "Bar Chart");
        assert_eq!(truncate_str("abcdefgh", 6), "abc...");
    }

    #[test]
    fn code_layout_covers_whole_text() {
        let text = ".bar { fill: #4299e1; }";
        let spans = Highlighter::basic().highlight(Language::Css, text);
        let job = code_layout(text, Some(&spans), true);
        assert_eq!(job.text, text);
        assert_eq!(job_text(&job), text);
        assert!(job.sections.len() > 1);
    }

    #[test]
    fn plain_layout_is_one_section() {
        let job = code_layout("let x = 1;", None, false);
        assert_eq!(job.sections.len(), 1);
        assert_eq!(job.text, "let x = 1;");
    }
}
