//! Panel rendering for `GalleryApp`.
//!
//! Category tree, grid view, detail panel with its media slot and code
//! viewer, the fullscreen code window and the manual-copy dialog.

use std::time::Instant;

use eframe::egui;

use infographic_gallery::detail::{DisplayState, MediaView};
use infographic_gallery::nav::{NavEvent, PanelView};
use infographic_gallery::net::resolve_url;
use infographic_gallery::viewer::{Key, Tab, ViewerEvent};

use crate::ui::{code_layout, difficulty_color, truncate_str};

use super::GalleryApp;

const CARD_WIDTH: f32 = 220.0;

impl GalleryApp {
    pub fn draw_category_tree(&mut self, ui: &mut egui::Ui, _ctx: &egui::Context) {
        let mut events = Vec::new();
        let catalog = std::sync::Arc::clone(self.nav.catalog());

        egui::ScrollArea::vertical().show(ui, |ui| {
            for (gi, group) in self.nav.groups().iter().enumerate() {
                if !self.nav.is_group_visible(gi) {
                    continue;
                }
                let header = format!("{}  {}", group.name, group.state.indicator());
                if ui
                    .add(egui::Button::new(egui::RichText::new(header).strong()).frame(false))
                    .clicked()
                {
                    events.push(NavEvent::ToggleGroup(gi));
                }
                if !group.state.is_expanded() {
                    continue;
                }
                ui.indent(("group", gi), |ui| {
                    for &idx in &group.items {
                        if !self.nav.is_item_visible(idx) {
                            continue;
                        }
                        let record = &catalog.records()[idx];
                        if ui
                            .selectable_label(self.nav.is_active(idx), &record.title)
                            .clicked()
                        {
                            events.push(NavEvent::SelectItem(record.id.clone()));
                        }
                    }
                });
            }

            if catalog.is_empty() && !self.loading {
                ui.weak("No content loaded");
            }
        });

        for event in events {
            self.apply_nav(event);
        }
    }

    pub fn draw_content(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        if self.nav.view() == PanelView::Grid {
            self.draw_grid(ui);
            return;
        }

        let locked = self.viewer.as_ref().map(|v| v.scroll_locked()).unwrap_or(false);
        let welcome = matches!(self.detail.display(), DisplayState::Welcome);
        egui::ScrollArea::vertical()
            .enable_scrolling(!locked)
            .show(ui, |ui| {
                if welcome {
                    draw_welcome(ui, self.loading);
                } else {
                    self.draw_detail(ui, ctx);
                }
            });
    }

    fn draw_grid(&mut self, ui: &mut egui::Ui) {
        let mut selected = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for card in &self.cards {
                    let mut thumb = resolve_url(&self.site_root, &card.thumbnail).ok();
                    if thumb.as_ref().map(|u| self.image_loader.has_failed(u.as_str())).unwrap_or(false) {
                        thumb = resolve_url(&self.site_root, &self.config.thumbnail).ok();
                    }
                    if let Some(url) = &thumb {
                        self.image_loader.request(url);
                    }

                    let frame = egui::Frame::group(ui.style()).inner_margin(8.0);
                    let response = frame
                        .show(ui, |ui| {
                            ui.set_width(CARD_WIDTH);
                            ui.vertical(|ui| {
                                let texture = thumb
                                    .as_ref()
                                    .and_then(|u| self.image_textures.get(u.as_str()));
                                match texture {
                                    Some(tex) => {
                                        let size = tex.size_vec2() * (CARD_WIDTH / tex.size_vec2().x.max(1.0));
                                        ui.image((tex.id(), size));
                                    }
                                    None => {
                                        ui.add_sized([CARD_WIDTH, 100.0], egui::Label::new("\u{1F5BC}"));
                                    }
                                }
                                ui.strong(truncate_str(&card.title, 40));
                                ui.label(&card.excerpt);
                                ui.horizontal_wrapped(|ui| {
                                    ui.colored_label(difficulty_color(&card.difficulty), &card.difficulty);
                                    ui.weak(&card.duration);
                                    for tag in &card.tags {
                                        ui.small(format!("#{}", tag));
                                    }
                                });
                            });
                        })
                        .response
                        .interact(egui::Sense::click())
                        .on_hover_cursor(egui::CursorIcon::PointingHand);
                    if response.clicked() {
                        selected = Some(card.id.clone());
                    }
                }
            });
        });

        if let Some(id) = selected {
            self.apply_nav(NavEvent::SelectCard(id));
        }
    }

    fn draw_detail(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let Some(view) = self.detail.current().cloned() else {
            return;
        };

        ui.heading(&view.title);
        ui.weak(&view.category_line);
        ui.horizontal(|ui| {
            if let Some(d) = &view.difficulty {
                ui.colored_label(difficulty_color(d.label()), d.label());
            }
            if let Some(d) = &view.duration {
                ui.label(format!("\u{23F1} {}", d));
            }
        });
        ui.add_space(8.0);

        self.draw_media(ui, ctx);
        ui.add_space(12.0);

        if !view.description.is_empty() {
            ui.label(&view.description);
            ui.add_space(6.0);
        }
        if !view.usage.is_empty() {
            ui.strong("Usage");
            ui.label(&view.usage);
            ui.add_space(6.0);
        }
        draw_bullets(ui, "Key points", &view.points);
        draw_bullets(ui, "Learning objectives", &view.learning_objectives);
        if !view.tags.is_empty() {
            ui.horizontal_wrapped(|ui| {
                for tag in &view.tags {
                    ui.label(egui::RichText::new(format!("#{}", tag)).small().background_color(ui.visuals().faint_bg_color));
                }
            });
        }
    }

    fn draw_media(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let Some(slot) = self.detail.media().cloned() else {
            return;
        };

        match &slot.view {
            MediaView::Placeholder { message } => {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_min_height(120.0);
                    ui.centered_and_justified(|ui| ui.weak(*message));
                });
            }
            MediaView::Video { src } => match resolve_url(&self.site_root, src) {
                Ok(url) => {
                    ui.hyperlink_to("\u{25B6} Play video", url.as_str());
                }
                Err(e) => {
                    ui.colored_label(egui::Color32::RED, e.to_string());
                }
            },
            MediaView::Frame { src, height, title, .. } => {
                let now = Instant::now();
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_min_height(*height as f32 / 4.0);
                    if !slot.is_ready(now) {
                        ui.spinner();
                        ctx.request_repaint_after(slot.remaining(now));
                        return;
                    }
                    ui.horizontal(|ui| {
                        ui.strong(self.asset_title.as_deref().unwrap_or(title));
                        ui.weak(format!("{} px", height));
                    });
                    match resolve_url(&self.site_root, src) {
                        Ok(url) => {
                            ui.hyperlink_to("Open animation", url.as_str());
                        }
                        Err(e) => {
                            ui.colored_label(egui::Color32::RED, e.to_string());
                        }
                    }
                });
                ui.add_space(6.0);
                self.draw_code_viewer(ui, ctx);
            }
        }
    }

    fn draw_code_viewer(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let dark = self.dark_mode;
        let Some(viewer) = self.viewer.as_mut() else {
            if self.asset_rx.is_some() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.weak("Loading source...");
                });
            }
            return;
        };

        let mut copy = false;
        let mut download = false;

        if ui.button(viewer.toggle_label()).clicked() {
            viewer.handle(ViewerEvent::ToggleVisible);
        }
        if !viewer.is_visible() {
            return;
        }

        egui::Frame::group(ui.style()).show(ui, |ui| {
            let mut strip_focused = false;
            let mut ids = Vec::with_capacity(Tab::ALL.len());
            ui.horizontal(|ui| {
                for tab in Tab::ALL {
                    let response = ui.selectable_label(viewer.is_selected(tab), tab.label());
                    ids.push(response.id);
                    if response.clicked() {
                        viewer.handle(ViewerEvent::ActivateTab(tab));
                    }
                    if response.has_focus() {
                        strip_focused = true;
                        if viewer.focused_tab() != tab {
                            viewer.handle(ViewerEvent::FocusTab(tab));
                        }
                    }
                }

                ui.separator();
                let now = Instant::now();
                copy = ui.button(viewer.copy_label(now)).clicked();
                download = ui.button("\u{2B07} Download").clicked();
                if ui.button("\u{26F6} Fullscreen").clicked() {
                    viewer.handle(ViewerEvent::OpenFullscreen);
                }
            });

            if strip_focused {
                let keys = [
                    (egui::Key::ArrowLeft, Key::ArrowLeft),
                    (egui::Key::ArrowRight, Key::ArrowRight),
                    (egui::Key::Enter, Key::Enter),
                    (egui::Key::Space, Key::Space),
                ];
                for (egui_key, key) in keys {
                    if ui.input(|i| i.key_pressed(egui_key)) {
                        viewer.handle(ViewerEvent::Key(key));
                    }
                }
                let target = Tab::ALL
                    .iter()
                    .position(|t| viewer.tab_index(*t) == 0)
                    .and_then(|i| ids.get(i));
                if let Some(id) = target {
                    ui.memory_mut(|m| m.request_focus(*id));
                }
            }

            egui::ScrollArea::both()
                .id_salt("code")
                .max_height(360.0)
                .show(ui, |ui| {
                    let text = viewer.active_text();
                    ui.label(code_layout(&text, viewer.highlighted(), dark));
                });
        });

        if copy {
            self.copy_code(ctx);
        }
        if download {
            self.download_code();
        }
    }

    pub fn draw_fullscreen(&mut self, ctx: &egui::Context) {
        let dark = self.dark_mode;
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };
        if !viewer.is_fullscreen() {
            return;
        }

        let screen = ctx.screen_rect();
        let mut close = false;
        egui::Window::new(format!("{} code", viewer.active_tab().label()))
            .id(egui::Id::new("code_fullscreen"))
            .collapsible(false)
            .resizable(false)
            .fixed_rect(screen.shrink(24.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for tab in Tab::ALL {
                        if ui.selectable_label(viewer.is_selected(tab), tab.label()).clicked() {
                            viewer.handle(ViewerEvent::ActivateTab(tab));
                        }
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        close = ui.button("\u{2715} Close").clicked();
                    });
                });
                ui.separator();
                egui::ScrollArea::both().id_salt("code_fullscreen").show(ui, |ui| {
                    let text = viewer.active_text();
                    ui.label(code_layout(&text, viewer.highlighted(), dark));
                });
            });

        if close {
            viewer.handle(ViewerEvent::CloseFullscreen);
        }
    }

    /// Shown when the clipboard is unavailable: the text, ready to select.
    pub fn draw_selection_dialog(&mut self, ctx: &egui::Context) {
        let Some(text) = self.selection.pending_mut() else {
            return;
        };
        let mut done = false;
        egui::Window::new("Copy code")
            .collapsible(false)
            .default_size([640.0, 420.0])
            .show(ctx, |ui| {
                ui.label("The clipboard is unavailable. Select the text below and copy it manually.");
                egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                    let output = egui::TextEdit::multiline(text)
                        .code_editor()
                        .desired_width(f32::INFINITY)
                        .show(ui);
                    if !output.response.has_focus() {
                        output.response.request_focus();
                    }
                });
                done = ui.button("Done").clicked();
            });
        if done {
            self.selection.dismiss();
        }
    }

    pub fn draw_status_line(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let catalog = self.nav.catalog();
            ui.weak(format!(
                "{} animations, {} shown",
                catalog.len(),
                self.nav.visible_ids().len()
            ));
            if !self.nav.search_term().is_empty() {
                ui.weak(format!("search: \"{}\"", self.nav.search_term()));
            }
            if let Some(status) = &self.status {
                ui.separator();
                ui.colored_label(egui::Color32::from_rgb(200, 80, 80), status);
            }
        });
    }
}

fn draw_welcome(ui: &mut egui::Ui, loading: bool) {
    ui.vertical_centered(|ui| {
        ui.add_space(100.0);
        ui.heading("Infographic Animation Gallery");
        ui.add_space(12.0);
        if loading {
            ui.spinner();
        } else {
            ui.label("Pick an animation from the list, or switch to the grid view.");
        }
    });
}

fn draw_bullets(ui: &mut egui::Ui, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    ui.strong(heading);
    for item in items {
        ui.horizontal(|ui| {
            ui.label("  \u{2022}");
            ui.label(item);
        });
    }
    ui.add_space(6.0);
}
