//! Toolbar rendering for `GalleryApp`.
//!
//! Search box, difficulty filter, grid toggle and theme switch, with the
//! popular search tags on a second row.

use eframe::egui;

use infographic_gallery::nav::{DifficultyFilter, NavEvent, PanelView};

use super::GalleryApp;

const DIFFICULTIES: [&str; 4] = ["all", "beginner", "medium", "advanced"];

impl GalleryApp {
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let mut events = Vec::new();

        ui.horizontal(|ui| {
            ui.add_space(4.0);
            ui.heading("Infographic Animations");
            ui.separator();

            let response = ui.add_sized(
                [260.0, 24.0],
                egui::TextEdit::singleline(&mut self.search_input).hint_text("Search animations..."),
            );
            if response.changed() {
                events.push(NavEvent::Search(self.search_input.clone()));
            }
            if ui
                .add_enabled(!self.search_input.is_empty(), egui::Button::new("\u{2715}"))
                .on_hover_text("Clear search")
                .clicked()
            {
                self.search_input.clear();
                events.push(NavEvent::Search(String::new()));
            }

            ui.separator();

            let current = self.nav.difficulty().label().to_string();
            egui::ComboBox::from_id_salt("difficulty")
                .selected_text(&current)
                .show_ui(ui, |ui| {
                    for label in DIFFICULTIES {
                        if ui.selectable_label(current == label, label).clicked() && current != label {
                            events.push(NavEvent::FilterDifficulty(DifficultyFilter::from_label(label)));
                        }
                    }
                });

            let grid_label = match self.nav.view() {
                PanelView::Tree => "\u{25A6} Grid",
                PanelView::Grid => "\u{2630} List",
            };
            if ui.button(grid_label).clicked() {
                events.push(NavEvent::ToggleGrid);
            }

            let dark_label = if self.dark_mode { "\u{263E}" } else { "\u{2600}" };
            if ui.button(dark_label).clicked() {
                self.dark_mode = !self.dark_mode;
            }

            if self.loading {
                ui.spinner();
            } else if ui.button("\u{21BB}").on_hover_text("Reload content").clicked() {
                self.start_catalog_load(ctx);
            }
        });

        if !self.config.popular_tags.is_empty() {
            ui.horizontal_wrapped(|ui| {
                ui.add_space(4.0);
                ui.weak("Popular:");
                for tag in &self.config.popular_tags {
                    if ui.small_button(format!("#{}", tag)).clicked() {
                        self.search_input = tag.clone();
                        events.push(NavEvent::Search(tag.clone()));
                    }
                }
            });
        }

        for event in events {
            self.apply_nav(event);
        }
    }
}
