use gabagool_engine::module::FrameRegistry;
use gabagool_engine::state::State;

use crate::theme;

pub fn init(frame: &mut FrameRegistry, _state: &mut State) -> anyhow::Result<()> {
    frame.add_ui_panel(|ctx, state| {
        egui::Window::new("gabagool").show(ctx, |ui| {
            ui.label("gabagoolx2");
            if ui.button("Close Window").clicked() {
                state.request_close();
            }
            if ui.button("Reload theme").clicked() {
                theme::apply(ctx);
            }
            super::clear_color_editor(ui, state);
        });
    });
    Ok(())
}
