//! Analytics panel
//!
//! Four counters and the category/trend charts.

use crate::state::analytics::TREND_LABELS;
use crate::state::AppState;
use crate::ui::components::{category_chart, trend_chart};
use eframe::egui;

/// Render the analytics panel
pub fn render_analytics(ui: &mut egui::Ui, state: &AppState) {
    let metrics = &state.metrics;

    ui.heading("Analytics");
    ui.separator();
    ui.add_space(8.0);

    ui.columns(4, |columns| {
        for (column, (label, value)) in columns.iter_mut().zip(metrics.counters()) {
            column.group(|ui| {
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(value).size(22.0).strong());
                    ui.label(egui::RichText::new(label).weak());
                });
            });
        }
    });

    ui.add_space(16.0);
    ui.label(egui::RichText::new("Queries by category").heading().size(16.0));
    ui.add_space(4.0);
    category_chart(ui, &metrics.category_data, metrics.max_category());

    ui.add_space(16.0);
    ui.label(egui::RichText::new("Weekly trend").heading().size(16.0));
    ui.add_space(4.0);
    trend_chart(ui, &TREND_LABELS, &metrics.trend_data);
}
