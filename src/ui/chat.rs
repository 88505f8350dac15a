//! Chat panel
//!
//! Message log, input box and the clear/export controls.

use crate::state::{AppState, Msg, Sender};
use crate::ui::components::{confidence_badge, primary_button, secondary_button};
use eframe::egui;

/// Render the chat panel
pub fn render_chat(ui: &mut egui::Ui, state: &AppState, out: &mut Vec<Msg>) {
    ui.horizontal(|ui| {
        ui.heading("Chat");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if secondary_button(ui, "Export").clicked() {
                out.push(Msg::RequestExport);
            }
            if secondary_button(ui, "Clear").clicked() {
                out.push(Msg::RequestClear);
            }
        });
    });
    ui.separator();

    let input_height = 90.0;
    egui::ScrollArea::vertical()
        .id_source("chat_messages_scroll")
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .max_height((ui.available_height() - input_height).max(100.0))
        .show(ui, |ui| {
            for message in state.chat.messages() {
                render_message(ui, &message.render());
                ui.add_space(8.0);
            }
        });

    ui.separator();
    render_input(ui, state, out);
}

fn render_message(ui: &mut egui::Ui, message: &crate::state::chat::RenderedMessage) {
    let (avatar, name, color) = match message.sender {
        Sender::User => ("👤", "You", egui::Color32::from_rgb(100, 150, 255)),
        Sender::Bot => ("🤖", "Assistant", egui::Color32::from_rgb(150, 220, 150)),
    };

    ui.group(|ui| {
        ui.horizontal_top(|ui| {
            ui.label(egui::RichText::new(avatar).size(18.0));
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(color, egui::RichText::new(name).strong());
                    ui.label(egui::RichText::new(&message.time).weak().small());
                });
                ui.label(&message.text);

                if let Some((tier, text)) = &message.badge {
                    ui.add_space(4.0);
                    confidence_badge(ui, *tier, text);
                }
                if let Some(sources) = &message.sources {
                    ui.label(egui::RichText::new(sources).small().weak());
                }
                if let Some(class) = &message.classification {
                    ui.label(egui::RichText::new(class).small().weak());
                }
            });
        });
    });
}

fn render_input(ui: &mut egui::Ui, state: &AppState, out: &mut Vec<Msg>) {
    let input_id = egui::Id::new("chat_input");
    let mut input = state.chat.input().to_string();

    // Take plain Enter before the multiline editor turns it into a newline
    let mut send = ui.memory(|m| m.has_focus(input_id))
        && ui.input_mut(|i| {
            !i.modifiers.shift && i.consume_key(egui::Modifiers::NONE, egui::Key::Enter)
        });

    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::multiline(&mut input)
                .id(input_id)
                .desired_rows(2)
                .desired_width(ui.available_width() - 80.0)
                .hint_text("Type your question... (Enter to send, Shift+Enter for a new line)"),
        );
        if response.changed() {
            out.push(Msg::ChatInputChanged(input.clone()));
        }

        let can_send = state.chat.can_send(&input);
        if primary_button(ui, "Send", can_send).clicked() {
            send = true;
        }
    });

    ui.label(
        egui::RichText::new(format!("{} characters", state.chat.char_count()))
            .weak()
            .small(),
    );

    // Pending requests are rejected by the state, so no extra guard here
    if send {
        out.push(Msg::Send(input));
    }
}
