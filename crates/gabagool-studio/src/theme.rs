//! Dark egui look for the sandbox.

use egui::{Color32, CornerRadius, Stroke};

pub const WINDOW_FILL: Color32 = Color32::from_rgb(0x1b, 0x1c, 0x20);
const PANEL_FILL: Color32 = Color32::from_rgb(0x15, 0x16, 0x19);
const ACCENT: Color32 = Color32::from_rgb(0xd9, 0x5d, 0x39);

/// Applies the theme to `ctx`. Safe to call repeatedly.
pub fn apply(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.window_fill = WINDOW_FILL;
    visuals.panel_fill = PANEL_FILL;
    visuals.extreme_bg_color = Color32::from_rgb(0x0e, 0x0f, 0x11);
    visuals.window_corner_radius = CornerRadius::same(4);
    visuals.window_stroke = Stroke::new(1.0, Color32::from_rgb(0x2c, 0x2e, 0x33));
    visuals.selection.bg_fill = ACCENT.gamma_multiply(0.6);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);
    visuals.hyperlink_color = ACCENT;
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
        style.spacing.window_margin = egui::Margin::same(10);
    });

    log::debug!("theme applied");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_sets_dark_visuals() {
        let ctx = egui::Context::default();
        apply(&ctx);
        apply(&ctx);

        let style = ctx.style();
        assert!(style.visuals.dark_mode);
        assert_eq!(style.visuals.window_fill, WINDOW_FILL);
    }
}
