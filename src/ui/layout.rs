//! Main application layout
//!
//! Menu bar, navigation, status bar, central section and modal dialogs.

use crate::state::{AppState, Msg, NoticeLevel, Section};
use crate::ui::analytics::render_analytics;
use crate::ui::chat::render_chat;
use crate::ui::components::{connection_indicator, primary_button, secondary_button};
use crate::ui::knowledge::{render_editor, render_knowledge};
use crate::ui::settings::render_settings;
use eframe::egui;

/// Render the whole application and collect the events it produced
///
/// Views only read `state`; every change goes through the returned messages.
pub fn render_app_layout(ctx: &egui::Context, state: &AppState) -> Vec<Msg> {
    let mut out = Vec::new();

    render_menu_bar(ctx, state, &mut out);
    render_status_bar(ctx, state);
    render_navigation(ctx, state, &mut out);

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(8.0);
        match state.section {
            Section::Chat => render_chat(ui, state, &mut out),
            Section::Knowledge => render_knowledge(ui, state, &mut out),
            Section::Analytics => render_analytics(ui, state),
            Section::Settings => render_settings(ui, state, &mut out),
        }
    });

    render_editor(ctx, state, &mut out);
    render_confirm(ctx, state, &mut out);
    render_notice(ctx, state, &mut out);
    if state.is_busy() {
        render_loading_overlay(ctx);
    }

    out
}

/// Render the top menu bar
fn render_menu_bar(ctx: &egui::Context, state: &AppState, out: &mut Vec<Msg>) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Export chat").clicked() {
                    out.push(Msg::RequestExport);
                    ui.close_menu();
                }
                if ui.button("Clear chat").clicked() {
                    out.push(Msg::RequestClear);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                let mut dark_mode = state.settings.dark_mode;
                if ui.checkbox(&mut dark_mode, "Dark Mode").changed() {
                    out.push(Msg::DarkModeChanged(dark_mode));
                }
                ui.separator();
                for section in Section::ALL {
                    if ui.button(section.label()).clicked() {
                        out.push(Msg::SwitchSection(section));
                        ui.close_menu();
                    }
                }
            });

            ui.menu_button("Help", |ui| {
                ui.label(format!("Agent Console v{}", env!("CARGO_PKG_VERSION")));
            });
        });
    });
}

/// Render the left navigation
fn render_navigation(ctx: &egui::Context, state: &AppState, out: &mut Vec<Msg>) {
    egui::SidePanel::left("navigation")
        .resizable(false)
        .exact_width(180.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading("AI Assistant");
            ui.add_space(4.0);
            ui.separator();
            ui.add_space(4.0);

            for section in Section::ALL {
                let selected = state.section == section;
                let response = ui.add_sized(
                    [ui.available_width(), 28.0],
                    egui::SelectableLabel::new(selected, section.label()),
                );
                if response.clicked() && !selected {
                    out.push(Msg::SwitchSection(section));
                }
            }
        });
}

/// Render the bottom status bar with the connection indicator
fn render_status_bar(ctx: &egui::Context, state: &AppState) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            connection_indicator(ui, state.status.connection);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!("{} messages", state.chat.messages().len()))
                        .weak()
                        .small(),
                );
            });
        });
    });
}

/// Render the pending confirmation, if any
fn render_confirm(ctx: &egui::Context, state: &AppState, out: &mut Vec<Msg>) {
    let Some(confirm) = state.confirm else {
        return;
    };

    egui::Window::new("Confirm")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(confirm.prompt());
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if primary_button(ui, "OK", true).clicked() {
                    out.push(Msg::Confirm(true));
                }
                if secondary_button(ui, "Cancel").clicked() {
                    out.push(Msg::Confirm(false));
                }
            });
        });
}

/// Render the blocking notice, if any
fn render_notice(ctx: &egui::Context, state: &AppState, out: &mut Vec<Msg>) {
    let Some(notice) = &state.notice else {
        return;
    };

    let (title, color) = match notice.level {
        NoticeLevel::Info => ("Information", ctx.style().visuals.text_color()),
        NoticeLevel::Warning => ("Warning", egui::Color32::from_rgb(220, 180, 0)),
        NoticeLevel::Error => ("Error", egui::Color32::from_rgb(220, 0, 0)),
    };

    egui::Window::new(title)
        .id(egui::Id::new("notice"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, -40.0])
        .show(ctx, |ui| {
            ui.colored_label(color, &notice.text);
            ui.add_space(8.0);
            if primary_button(ui, "OK", true).clicked() {
                out.push(Msg::DismissNotice);
            }
        });
}

/// Spinner shown while a chat request or connection test runs
fn render_loading_overlay(ctx: &egui::Context) {
    egui::Area::new(egui::Id::new("loading_overlay"))
        .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -60.0])
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading...");
                });
            });
        });
}
