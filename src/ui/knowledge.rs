//! Knowledge panel
//!
//! Search/filter bar, item cards and the add-knowledge dialog.

use crate::api::NewKnowledgeItem;
use crate::state::{AppState, Msg};
use crate::ui::components::{primary_button, secondary_button};
use eframe::egui;

/// Render the knowledge list panel
pub fn render_knowledge(ui: &mut egui::Ui, state: &AppState, out: &mut Vec<Msg>) {
    let cache = &state.knowledge;

    ui.horizontal(|ui| {
        ui.heading("Knowledge Base");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if primary_button(ui, "+ Add", true).clicked() {
                out.push(Msg::OpenEditor);
            }
            if secondary_button(ui, "Refresh").clicked() {
                out.push(Msg::RefreshKnowledge);
            }
        });
    });
    ui.separator();

    ui.horizontal(|ui| {
        let mut search = cache.search.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut search)
                .id_source("knowledge_search")
                .hint_text("Search knowledge..."),
        );
        if response.changed() {
            out.push(Msg::SearchChanged(search));
        }

        let selected = cache.category.clone().unwrap_or_else(|| "All categories".to_string());
        egui::ComboBox::from_id_source("category_filter")
            .selected_text(selected)
            .show_ui(ui, |ui| {
                if ui
                    .selectable_label(cache.category.is_none(), "All categories")
                    .clicked()
                {
                    out.push(Msg::CategoryChanged(None));
                }
                for category in cache.categories() {
                    let is_selected = cache.category.as_deref() == Some(category.as_str());
                    if ui.selectable_label(is_selected, &category).clicked() {
                        out.push(Msg::CategoryChanged(Some(category)));
                    }
                }
            });
    });
    ui.add_space(8.0);

    let items = cache.visible();
    egui::ScrollArea::vertical()
        .id_source("knowledge_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            if items.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.label(
                        egui::RichText::new("No items in the knowledge base.")
                            .italics()
                            .weak(),
                    );
                });
                return;
            }

            for item in items {
                ui.group(|ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(&item.title).strong().size(15.0));
                        ui.label(egui::RichText::new(&item.category).monospace().weak());
                    });
                    ui.label(item.preview());
                    ui.label(
                        egui::RichText::new(format!("Updated: {}", item.updated_date()))
                            .weak()
                            .small(),
                    );
                });
                ui.add_space(4.0);
            }
        });
}

/// Render the add-knowledge dialog when open
pub fn render_editor(ctx: &egui::Context, state: &AppState, out: &mut Vec<Msg>) {
    let editor = &state.knowledge.editor;
    if !editor.open {
        return;
    }

    let mut draft: NewKnowledgeItem = editor.draft.clone();

    egui::Window::new("Add Knowledge")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let mut changed = false;
            egui::Grid::new("knowledge_form")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Title");
                    changed |= ui.text_edit_singleline(&mut draft.title).changed();
                    ui.end_row();

                    ui.label("Category");
                    changed |= ui.text_edit_singleline(&mut draft.category).changed();
                    ui.end_row();

                    ui.label("Content");
                    changed |= ui
                        .add(egui::TextEdit::multiline(&mut draft.content).desired_rows(6))
                        .changed();
                    ui.end_row();
                });
            // Queued ahead of Save so the saved draft includes this frame's edits
            if changed {
                out.push(Msg::EditDraft(draft.clone()));
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let saving = state.knowledge.is_saving();
                let label = if saving { "Saving..." } else { "Save" };
                if primary_button(ui, label, !saving).clicked() {
                    out.push(Msg::SaveKnowledge);
                }
                if secondary_button(ui, "Cancel").clicked() {
                    out.push(Msg::CloseEditor);
                }
            });
        });
}
