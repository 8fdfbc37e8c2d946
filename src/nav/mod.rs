//! Navigation & filter panel.
//!
//! Holds the category tree (one accordion group per category), the search
//! and difficulty filters, the grid/tree view toggle and the active item.
//! All state changes go through [`NavigationPanel::handle`].
//!
//! Search and difficulty filters compose: an item is visible only when it
//! satisfies both.

pub mod grid;

use std::sync::Arc;

use crate::catalog::{Catalog, Difficulty};

/// Expand/collapse state of one category group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccordionState {
    #[default]
    Collapsed,
    Expanded,
}

impl AccordionState {
    pub fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            Self::Collapsed => "\u{25BC}",
            Self::Expanded => "\u{25B2}",
        }
    }

    pub fn is_expanded(self) -> bool {
        self == Self::Expanded
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    /// `"all"` is the sentinel; anything else filters on that exact label.
    pub fn from_label(label: &str) -> Self {
        if label == "all" {
            Self::All
        } else {
            Self::Only(Difficulty::from_label(label))
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Only(d) => d.label(),
        }
    }

    pub fn admits(&self, difficulty: Option<&Difficulty>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => difficulty == Some(wanted),
        }
    }
}

/// Which browsing surface is shown. Never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelView {
    #[default]
    Tree,
    Grid,
}

#[derive(Debug, Clone)]
pub struct CategoryGroup {
    pub name: String,
    /// Record indices into the catalog, in catalog order.
    pub items: Vec<usize>,
    pub state: AccordionState,
}

/// Input to the panel's transition function.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    ToggleGroup(usize),
    Search(String),
    FilterDifficulty(DifficultyFilter),
    ToggleGrid,
    /// Click on a category-tree item.
    SelectItem(String),
    /// Click on a grid card; also returns to the tree view.
    SelectCard(String),
}

pub struct NavigationPanel {
    catalog: Arc<Catalog>,
    groups: Vec<CategoryGroup>,
    visible: Vec<bool>,
    search: String,
    difficulty: DifficultyFilter,
    view: PanelView,
    active: Option<usize>,
}

impl NavigationPanel {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let groups = catalog
            .categories()
            .into_iter()
            .map(|name| CategoryGroup {
                name: name.to_string(),
                items: catalog
                    .records()
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| r.category == name)
                    .map(|(i, _)| i)
                    .collect(),
                state: AccordionState::Collapsed,
            })
            .collect();
        let visible = vec![true; catalog.len()];

        Self {
            catalog,
            groups,
            visible,
            search: String::new(),
            difficulty: DifficultyFilter::All,
            view: PanelView::Tree,
            active: None,
        }
    }

    /// Apply one event. Returns the id of the content to display, if the
    /// event selected one.
    pub fn handle(&mut self, event: NavEvent) -> Option<String> {
        match event {
            NavEvent::ToggleGroup(idx) => {
                match self.groups.get_mut(idx) {
                    Some(group) => {
                        group.state = group.state.toggled();
                        log::debug!("Accordion '{}' -> {:?}", group.name, group.state);
                    }
                    None => log::error!("Category group {} not found", idx),
                }
                None
            }
            NavEvent::Search(term) => {
                self.search = term;
                self.refresh_visibility();
                if !self.search.is_empty() {
                    for gi in 0..self.groups.len() {
                        if self.group_visible_count(gi) > 0 {
                            self.groups[gi].state = AccordionState::Expanded;
                        }
                    }
                }
                log::debug!(
                    "Search '{}': {} visible",
                    self.search,
                    self.visible.iter().filter(|v| **v).count()
                );
                None
            }
            NavEvent::FilterDifficulty(filter) => {
                self.difficulty = filter;
                self.refresh_visibility();
                log::debug!("Filtered by difficulty: {}", self.difficulty.label());
                None
            }
            NavEvent::ToggleGrid => {
                self.view = match self.view {
                    PanelView::Tree => PanelView::Grid,
                    PanelView::Grid => PanelView::Tree,
                };
                None
            }
            NavEvent::SelectItem(id) => self.select(&id),
            NavEvent::SelectCard(id) => {
                let selected = self.select(&id);
                if selected.is_some() {
                    self.view = PanelView::Tree;
                }
                selected
            }
        }
    }

    pub fn toggle_group(&mut self, idx: usize) {
        self.handle(NavEvent::ToggleGroup(idx));
    }

    pub fn search(&mut self, term: &str) {
        self.handle(NavEvent::Search(term.to_string()));
    }

    pub fn filter_by_difficulty(&mut self, label: &str) {
        self.handle(NavEvent::FilterDifficulty(DifficultyFilter::from_label(label)));
    }

    pub fn toggle_grid(&mut self) {
        self.handle(NavEvent::ToggleGrid);
    }

    fn select(&mut self, id: &str) -> Option<String> {
        match self.catalog.position(id) {
            Some(idx) => {
                self.active = Some(idx);
                Some(id.to_string())
            }
            None => {
                log::error!("Content not found: {}", id);
                None
            }
        }
    }

    fn refresh_visibility(&mut self) {
        let term = self.search.to_lowercase();
        for (i, record) in self.catalog.records().iter().enumerate() {
            let search_ok = term.is_empty() || record.matches_lowered(&term);
            let difficulty_ok = self.difficulty.admits(record.difficulty.as_ref());
            self.visible[i] = search_ok && difficulty_ok;
        }
    }

    fn group_visible_count(&self, gi: usize) -> usize {
        self.groups[gi]
            .items
            .iter()
            .filter(|&&i| self.visible[i])
            .count()
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    pub fn is_item_visible(&self, idx: usize) -> bool {
        self.visible.get(idx).copied().unwrap_or(false)
    }

    /// A group with no visible items is itself hidden.
    pub fn is_group_visible(&self, gi: usize) -> bool {
        gi < self.groups.len() && self.group_visible_count(gi) > 0
    }

    pub fn visible_ids(&self) -> Vec<&str> {
        self.catalog
            .records()
            .iter()
            .enumerate()
            .filter(|(i, _)| self.visible[*i])
            .map(|(_, r)| r.id.as_str())
            .collect()
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn difficulty(&self) -> &DifficultyFilter {
        &self.difficulty
    }

    pub fn view(&self) -> PanelView {
        self.view
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active
            .and_then(|i| self.catalog.records().get(i))
            .map(|r| r.id.as_str())
    }

    pub fn is_active(&self, idx: usize) -> bool {
        self.active == Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::sample_catalog;

    fn panel() -> NavigationPanel {
        NavigationPanel::new(Arc::new(sample_catalog()))
    }

    fn states(p: &NavigationPanel) -> Vec<AccordionState> {
        p.groups().iter().map(|g| g.state).collect()
    }

    #[test]
    fn builds_one_group_per_category() {
        let p = panel();
        let names: Vec<&str> = p.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["charts", "techniques", "use-cases"]);
        assert_eq!(p.groups()[0].items, vec![0, 1]);
        assert!(p.groups().iter().all(|g| g.state == AccordionState::Collapsed));
        assert_eq!(p.visible_ids().len(), 5);
    }

    #[test]
    fn accordion_groups_toggle_independently() {
        let mut p = panel();
        p.toggle_group(1);
        assert_eq!(
            states(&p),
            vec![
                AccordionState::Collapsed,
                AccordionState::Expanded,
                AccordionState::Collapsed
            ]
        );
        assert_eq!(p.groups()[1].state.indicator(), "\u{25B2}");
        p.toggle_group(1);
        assert_eq!(p.groups()[1].state, AccordionState::Collapsed);
        // Out of range is a logged no-op
        p.toggle_group(9);
        assert_eq!(p.groups().len(), 3);
    }

    #[test]
    fn search_shows_exact_matching_subset_and_expands() {
        let mut p = panel();
        p.search("Chart");

        let expected: Vec<&str> = p
            .catalog()
            .records()
            .iter()
            .filter(|r| r.matches_search("chart"))
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(p.visible_ids(), expected);
        assert_eq!(p.visible_ids(), vec!["bar-chart", "pie-chart", "sales-dashboard"]);

        assert!(p.is_group_visible(0));
        assert!(!p.is_group_visible(1));
        assert!(p.is_group_visible(2));
        assert_eq!(p.groups()[0].state, AccordionState::Expanded);
        assert_eq!(p.groups()[1].state, AccordionState::Collapsed);
        assert_eq!(p.groups()[2].state, AccordionState::Expanded);
    }

    #[test]
    fn empty_search_restores_without_touching_accordions() {
        let mut p = panel();
        p.search("pie");
        p.toggle_group(2);
        let before = states(&p);

        p.search("");
        assert_eq!(p.visible_ids().len(), 5);
        assert_eq!(states(&p), before);
    }

    #[test]
    fn all_difficulty_is_identity() {
        let mut p = panel();
        p.filter_by_difficulty("advanced");
        assert_eq!(p.visible_ids(), vec!["pie-chart"]);
        p.filter_by_difficulty("all");
        assert_eq!(p.visible_ids().len(), 5);
        assert_eq!(*p.difficulty(), DifficultyFilter::All);
    }

    #[test]
    fn difficulty_then_search_is_intersection() {
        let mut p = panel();
        p.filter_by_difficulty("beginner");
        p.search("chart");
        assert_eq!(p.visible_ids(), vec!["bar-chart"]);

        // Clearing the search keeps the difficulty filter in force
        p.search("");
        assert_eq!(p.visible_ids(), vec!["bar-chart", "number-counter", "timeline"]);
    }

    #[test]
    fn toggle_grid_twice_is_identity() {
        let mut p = panel();
        assert_eq!(p.view(), PanelView::Tree);
        p.toggle_grid();
        assert_eq!(p.view(), PanelView::Grid);
        p.toggle_grid();
        assert_eq!(p.view(), PanelView::Tree);
    }

    #[test]
    fn selecting_a_card_returns_to_tree() {
        let mut p = panel();
        p.toggle_grid();
        let shown = p.handle(NavEvent::SelectCard("pie-chart".into()));
        assert_eq!(shown.as_deref(), Some("pie-chart"));
        assert_eq!(p.view(), PanelView::Tree);
        assert_eq!(p.active_id(), Some("pie-chart"));
        assert!(p.is_active(1));
    }

    #[test]
    fn unknown_selection_changes_nothing() {
        let mut p = panel();
        p.handle(NavEvent::SelectItem("bar-chart".into()));
        p.toggle_grid();
        assert_eq!(p.handle(NavEvent::SelectCard("missing".into())), None);
        assert_eq!(p.active_id(), Some("bar-chart"));
        assert_eq!(p.view(), PanelView::Grid);
    }

    #[test]
    fn empty_catalog_has_no_groups() {
        let mut p = NavigationPanel::new(Arc::new(Catalog::empty()));
        p.search("anything");
        assert!(p.groups().is_empty());
        assert!(p.visible_ids().is_empty());
        assert!(!p.is_group_visible(0));
    }
}
