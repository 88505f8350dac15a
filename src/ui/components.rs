//! Reusable UI components
//!
//! Badges, buttons and the two painted charts.

use crate::state::{ConfidenceTier, ConnectionState};
use eframe::egui;

/// Palette shared by the charts (blue, green, yellow, red, gray)
pub const CHART_COLORS: [egui::Color32; 5] = [
    egui::Color32::from_rgb(0, 123, 255),
    egui::Color32::from_rgb(40, 167, 69),
    egui::Color32::from_rgb(255, 193, 7),
    egui::Color32::from_rgb(220, 53, 69),
    egui::Color32::from_rgb(108, 117, 125),
];

const GREEN: egui::Color32 = egui::Color32::from_rgb(0, 200, 0);
const YELLOW: egui::Color32 = egui::Color32::from_rgb(220, 180, 0);
const RED: egui::Color32 = egui::Color32::from_rgb(220, 0, 0);

/// Color for a confidence tier: High (green), Medium (yellow), Low (red)
pub fn tier_color(tier: ConfidenceTier) -> egui::Color32 {
    match tier {
        ConfidenceTier::High => GREEN,
        ConfidenceTier::Medium => YELLOW,
        ConfidenceTier::Low => RED,
    }
}

/// Render a confidence badge with a colored frame
pub fn confidence_badge(ui: &mut egui::Ui, tier: ConfidenceTier, text: &str) {
    let color = tier_color(tier);
    egui::Frame::none()
        .stroke(egui::Stroke::new(1.0, color))
        .rounding(egui::Rounding::same(4.0))
        .inner_margin(egui::Margin::symmetric(6.0, 2.0))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).color(color).small());
        });
}

/// Render an online/offline label for one service
pub fn service_badge(ui: &mut egui::Ui, online: bool) {
    let (text, color) = if online {
        ("Online", GREEN)
    } else {
        ("Offline", RED)
    };
    ui.colored_label(color, text);
}

/// Render the connection dot and its label
pub fn connection_indicator(ui: &mut egui::Ui, state: ConnectionState) {
    let color = match state {
        ConnectionState::Unknown => egui::Color32::GRAY,
        ConnectionState::Connected => GREEN,
        ConnectionState::Disconnected => RED,
    };
    let (rect, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
    ui.painter().circle_filled(rect.center(), 5.0, color);
    ui.label(state.label());
}

/// Render a primary action button
pub fn primary_button(ui: &mut egui::Ui, text: &str, enabled: bool) -> egui::Response {
    ui.add_enabled(enabled, egui::Button::new(egui::RichText::new(text).strong()))
}

/// Render a secondary button
pub fn secondary_button(ui: &mut egui::Ui, text: &str) -> egui::Response {
    ui.button(text)
}

/// Horizontal bar histogram with one colored bar per category
pub fn category_chart(ui: &mut egui::Ui, data: &[(String, u32)], max: u32) {
    let row_height = 22.0;
    let label_width = 130.0;
    let width = ui.available_width().max(label_width + 80.0);
    let height = row_height * data.len() as f32;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let text_color = ui.visuals().text_color();
    let bar_space = rect.width() - label_width - 40.0;

    for (i, (label, value)) in data.iter().enumerate() {
        let top = rect.top() + i as f32 * row_height;
        let color = CHART_COLORS[i % CHART_COLORS.len()];
        let fraction = if max == 0 {
            0.0
        } else {
            *value as f32 / max as f32
        };

        painter.text(
            egui::pos2(rect.left(), top + row_height / 2.0),
            egui::Align2::LEFT_CENTER,
            label,
            egui::FontId::proportional(12.0),
            text_color,
        );
        let bar = egui::Rect::from_min_size(
            egui::pos2(rect.left() + label_width, top + 4.0),
            egui::vec2(bar_space * fraction, row_height - 8.0),
        );
        painter.rect_filled(bar, 2.0, color);
        painter.text(
            egui::pos2(bar.right() + 6.0, top + row_height / 2.0),
            egui::Align2::LEFT_CENTER,
            value.to_string(),
            egui::FontId::proportional(12.0),
            text_color,
        );
    }
}

/// Line chart of `values` over `labels`, y axis starting at zero
pub fn trend_chart(ui: &mut egui::Ui, labels: &[&str], values: &[u32]) {
    let height = 160.0;
    let width = ui.available_width().max(200.0);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let text_color = ui.visuals().text_color();
    let color = CHART_COLORS[0];

    let plot = egui::Rect::from_min_max(
        rect.left_top() + egui::vec2(8.0, 8.0),
        rect.right_bottom() - egui::vec2(8.0, 20.0),
    );
    painter.line_segment(
        [plot.left_bottom(), plot.right_bottom()],
        egui::Stroke::new(1.0, ui.visuals().weak_text_color()),
    );

    let max = values.iter().copied().max().unwrap_or(0).max(1) as f32;
    let step = if values.len() > 1 {
        plot.width() / (values.len() - 1) as f32
    } else {
        0.0
    };
    let points: Vec<egui::Pos2> = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            egui::pos2(
                plot.left() + step * i as f32,
                plot.bottom() - plot.height() * (*v as f32 / max),
            )
        })
        .collect();

    for pair in points.windows(2) {
        painter.line_segment([pair[0], pair[1]], egui::Stroke::new(2.0, color));
    }
    for (point, label) in points.iter().zip(labels) {
        painter.circle_filled(*point, 3.0, color);
        painter.text(
            egui::pos2(point.x, rect.bottom() - 2.0),
            egui::Align2::CENTER_BOTTOM,
            *label,
            egui::FontId::proportional(11.0),
            text_color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_colors_distinct() {
        assert_ne!(tier_color(ConfidenceTier::High), tier_color(ConfidenceTier::Medium));
        assert_ne!(tier_color(ConfidenceTier::Medium), tier_color(ConfidenceTier::Low));
    }
}
