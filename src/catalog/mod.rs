//! Content catalog: the records behind every gallery entry.
//!
//! The catalog is loaded once, validated for id uniqueness and then shared
//! read-only (`Arc<Catalog>`) by the navigation panel, grid and detail view.

pub mod loader;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::error::{GalleryError, Result};

/// Difficulty label of a content record.
///
/// The three well-known labels get their own variants for badge styling;
/// anything else is kept verbatim so filters still compare exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Beginner,
    Medium,
    Advanced,
    Other(String),
}

impl Difficulty {
    pub fn from_label(label: &str) -> Self {
        match label {
            "beginner" => Self::Beginner,
            "medium" => Self::Medium,
            "advanced" => Self::Advanced,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Beginner => "beginner",
            Self::Medium => "medium",
            Self::Advanced => "advanced",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

/// One catalog entry describing a single animation demo.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub usage: String,
    #[serde(default)]
    pub points: Vec<String>,
    #[serde(default)]
    pub learning_objectives: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

impl ContentRecord {
    /// Case-insensitive match of an already-lowercased term against title,
    /// description, category, keywords and tags.
    pub fn matches_lowered(&self, term: &str) -> bool {
        let hit = |s: &str| s.to_lowercase().contains(term);
        hit(&self.title)
            || hit(&self.description)
            || hit(&self.category)
            || self.keywords.iter().any(|k| hit(k))
            || self.tags.iter().any(|t| hit(t))
    }

    pub fn matches_search(&self, term: &str) -> bool {
        self.matches_lowered(&term.to_lowercase())
    }

    /// Whether `video_url` points at an HTML animation document.
    pub fn is_html_animation(&self) -> bool {
        self.video_url
            .as_deref()
            .map(|u| u.ends_with(".html"))
            .unwrap_or(false)
    }
}

/// Validated, immutable list of content records.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<ContentRecord>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(records: Vec<ContentRecord>) -> Result<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if index.insert(record.id.clone(), i).is_some() {
                return Err(GalleryError::DuplicateId {
                    id: record.id.clone(),
                });
            }
        }
        Ok(Self { records, index })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let records: Vec<ContentRecord> = serde_json::from_slice(bytes)?;
        Self::new(records)
    }

    pub fn get(&self, id: &str) -> Option<&ContentRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn records(&self) -> &[ContentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct categories in first-appearance order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for r in &self.records {
            if !seen.contains(&r.category.as_str()) {
                seen.push(r.category.as_str());
            }
        }
        seen
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn record(id: &str, category: &str, difficulty: &str) -> ContentRecord {
        ContentRecord {
            id: id.to_string(),
            title: format!("{} title", id),
            category: category.to_string(),
            subcategory: "basics".to_string(),
            description: format!("Animated {} demo", id),
            usage: "Reports".to_string(),
            points: vec!["Smooth easing".into()],
            learning_objectives: vec!["Read the axis".into()],
            tags: vec!["svg".into()],
            keywords: Vec::new(),
            difficulty: Some(Difficulty::from_label(difficulty)),
            duration: Some("short".into()),
            video_url: Some(format!("assets/animations/{}.html", id)),
        }
    }

    /// Five records over three categories.
    pub fn sample_catalog() -> Catalog {
        let mut bar = record("bar-chart", "charts", "beginner");
        bar.title = "Bar Chart Growth".into();
        bar.tags = vec!["chart".into(), "svg".into(), "bars".into(), "growth".into()];
        let mut pie = record("pie-chart", "charts", "advanced");
        pie.title = "Pie Chart Reveal".into();
        let mut counter = record("number-counter", "techniques", "beginner");
        counter.keywords = vec!["count-up".into()];
        let mut dashboard = record("sales-dashboard", "use-cases", "medium");
        dashboard.description = "KPI dashboard with a line chart".into();
        let mut timeline = record("timeline", "use-cases", "beginner");
        timeline.video_url = Some("media/timeline.mp4".into());

        Catalog::new(vec![bar, pie, counter, dashboard, timeline]).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn parses_catalog_json() {
        let json = br#"[
            {"id": "bar", "title": "Bar", "category": "charts", "subcategory": "basic",
             "description": "d", "usage": "u", "points": ["p"], "learning_objectives": ["o"],
             "tags": ["t"], "keywords": ["k"], "difficulty": "beginner", "duration": "3s",
             "video_url": "assets/animations/bar.html"},
            {"id": "line", "title": "Line", "category": "charts", "difficulty": "expert"}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        let bar = catalog.get("bar").unwrap();
        assert_eq!(bar.difficulty, Some(Difficulty::Beginner));
        assert!(bar.is_html_animation());

        let line = catalog.get("line").unwrap();
        assert_eq!(line.difficulty, Some(Difficulty::Other("expert".into())));
        assert!(line.tags.is_empty());
        assert!(line.video_url.is_none());
    }

    #[test]
    fn untitled_records_still_load() {
        let json = br#"[
            {"id": "bar", "category": "charts"},
            {"id": "line", "title": "Line", "category": "charts"}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("bar").unwrap().title, "");
        assert!(Catalog::from_json(br#"[{"id": "x", "title": "X"}]"#).is_err());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new(vec![
            record("a", "charts", "beginner"),
            record("a", "charts", "medium"),
        ])
        .unwrap_err();
        assert!(matches!(err, GalleryError::DuplicateId { id } if id == "a"));
    }

    #[test]
    fn search_matches_all_fields_case_insensitively() {
        let catalog = sample_catalog();
        assert!(catalog.get("bar-chart").unwrap().matches_search("GROWTH"));
        assert!(catalog.get("number-counter").unwrap().matches_search("count-up"));
        assert!(catalog.get("sales-dashboard").unwrap().matches_search("line chart"));
        assert!(catalog.get("pie-chart").unwrap().matches_search("Charts"));
        assert!(!catalog.get("timeline").unwrap().matches_search("chart"));
    }

    #[test]
    fn categories_keep_first_appearance_order() {
        let catalog = sample_catalog();
        assert_eq!(catalog.categories(), vec!["charts", "techniques", "use-cases"]);
    }
}
