//! Full-window, click-through text overlay: FPS and the state dump.

use gabagool_engine::module::FrameRegistry;
use gabagool_engine::state::State;

pub fn init(frame: &mut FrameRegistry, _state: &mut State) -> anyhow::Result<()> {
    frame.add_ui_panel(|ctx, state| {
        egui::Area::new(egui::Id::new("gabagool overlay"))
            .order(egui::Order::Background)
            .fixed_pos(egui::pos2(8.0, 8.0))
            .interactable(false)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(format!("{:.1} FPS", state.frame.fps)).monospace());
                if state.display_debug {
                    ui.add_space(4.0);
                    ui.label(egui::RichText::new(state.to_string()).monospace());
                }
            });
    });
    Ok(())
}
