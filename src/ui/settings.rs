//! Settings panel
//!
//! Backend service status, connection test and local preferences.

use crate::state::{AppState, Msg};
use crate::ui::components::{primary_button, service_badge};
use eframe::egui;

/// Render the settings panel
pub fn render_settings(ui: &mut egui::Ui, state: &AppState, out: &mut Vec<Msg>) {
    ui.heading("Settings");
    ui.separator();
    ui.add_space(8.0);

    ui.label(egui::RichText::new("System status").heading().size(16.0));
    ui.add_space(4.0);
    egui::Grid::new("service_status")
        .num_columns(2)
        .spacing([24.0, 6.0])
        .striped(true)
        .show(ui, |ui| {
            for (label, online) in state.status.tracked() {
                ui.label(label);
                service_badge(ui, online);
                ui.end_row();
            }
        });

    ui.add_space(8.0);
    if primary_button(ui, "Test connection", !state.status.testing).clicked() {
        out.push(Msg::TestConnection);
    }

    ui.add_space(16.0);
    ui.separator();
    ui.label(egui::RichText::new("Model").heading().size(16.0));
    ui.add_space(4.0);

    let mut temperature = state.settings.temperature;
    ui.horizontal(|ui| {
        ui.label("Temperature");
        let response = ui.add(egui::Slider::new(&mut temperature, 0.0..=1.0).step_by(0.1));
        if response.changed() {
            out.push(Msg::TemperatureChanged(temperature));
        }
    });

    let mut threshold = state.settings.confidence_threshold;
    ui.horizontal(|ui| {
        ui.label("Confidence threshold");
        let response = ui.add(egui::Slider::new(&mut threshold, 0.0..=1.0).step_by(0.05));
        if response.changed() {
            out.push(Msg::ConfidenceThresholdChanged(threshold));
        }
    });
}
