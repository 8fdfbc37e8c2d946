//! Card model for the grid view.

use crate::catalog::{Catalog, ContentRecord};

/// Description excerpt length on a card, in characters.
pub const DESCRIPTION_LIMIT: usize = 100;
/// Number of tag chips shown on a card.
pub const CARD_TAGS: usize = 3;

const DEFAULT_DIFFICULTY: &str = "medium";
const DEFAULT_DURATION: &str = "medium";

#[derive(Debug, Clone, PartialEq)]
pub struct GridCard {
    pub id: String,
    pub title: String,
    pub category: String,
    pub thumbnail: String,
    pub excerpt: String,
    pub difficulty: String,
    pub duration: String,
    pub tags: Vec<String>,
}

impl GridCard {
    pub fn from_record(record: &ContentRecord, thumbnail: &str) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            category: record.category.clone(),
            thumbnail: thumbnail.to_string(),
            excerpt: excerpt(&record.description, DESCRIPTION_LIMIT),
            difficulty: record
                .difficulty
                .as_ref()
                .map(|d| d.label().to_string())
                .unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string()),
            duration: record
                .duration
                .clone()
                .unwrap_or_else(|| DEFAULT_DURATION.to_string()),
            tags: record.tags.iter().take(CARD_TAGS).cloned().collect(),
        }
    }
}

/// One card per record, in catalog order.
pub fn build_cards(catalog: &Catalog, thumbnail: &str) -> Vec<GridCard> {
    catalog
        .records()
        .iter()
        .map(|r| GridCard::from_record(r, thumbnail))
        .collect()
}

/// First `limit` characters of `s`, followed by `...` when anything was cut.
pub fn excerpt(s: &str, limit: usize) -> String {
    let mut chars = s.chars();
    let head: String = chars.by_ref().take(limit).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{record, sample_catalog};

    #[test]
    fn card_shows_first_three_tags() {
        let catalog = sample_catalog();
        let cards = build_cards(&catalog, "assets/thumbnails/default.jpg");
        assert_eq!(cards.len(), catalog.len());

        let bar = &cards[0];
        assert_eq!(bar.id, "bar-chart");
        assert_eq!(bar.tags, vec!["chart", "svg", "bars"]);
        assert_eq!(bar.difficulty, "beginner");
        assert_eq!(bar.thumbnail, "assets/thumbnails/default.jpg");
    }

    #[test]
    fn long_descriptions_are_truncated() {
        let mut r = record("long", "charts", "medium");
        r.description = "あ".repeat(150);
        let card = GridCard::from_record(&r, "t.jpg");
        assert_eq!(card.excerpt.chars().count(), DESCRIPTION_LIMIT + 3);
        assert!(card.excerpt.ends_with("..."));

        assert_eq!(excerpt("short", DESCRIPTION_LIMIT), "short");
    }

    #[test]
    fn missing_metadata_uses_defaults() {
        let mut r = record("bare", "charts", "medium");
        r.difficulty = None;
        r.duration = None;
        let card = GridCard::from_record(&r, "t.jpg");
        assert_eq!(card.difficulty, "medium");
        assert_eq!(card.duration, "medium");
    }
}
