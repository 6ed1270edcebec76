//! Modules shipped with the studio.

use std::cell::RefCell;
use std::rc::Rc;

use gabagool_engine::config::ConfigManager;
use gabagool_engine::module::ModuleRegistry;
use gabagool_engine::state::State;

mod background;
mod debug_window;
mod overlay;
mod simple_window;

pub type SharedConfig = Rc<RefCell<ConfigManager>>;

/// Registers every studio module, in draw order.
pub fn register_all(modules: &mut ModuleRegistry, config: &SharedConfig) {
    let debug_config = Rc::clone(config);
    modules
        .register("background", background::init)
        .register("simple_window", simple_window::init)
        .register("debug_window", move |frame, state| debug_window::init(frame, state, &debug_config))
        .register("overlay", overlay::init);
}

/// RGB editor for the clear color; alpha is left alone.
fn clear_color_editor(ui: &mut egui::Ui, state: &mut State) {
    let [r, g, b, a] = state.clear_color;
    let mut rgb = [r, g, b];
    ui.horizontal(|ui| {
        ui.color_edit_button_rgb(&mut rgb);
        ui.label("Clear Color");
    });
    state.clear_color = [rgb[0], rgb[1], rgb[2], a];
}

#[cfg(test)]
mod tests {
    use gabagool_engine::module::FrameRegistry;
    use tempfile::TempDir;

    use super::debug_window::{TestConfig, TEST_SECTION};
    use super::*;

    fn shared(dir: &TempDir) -> SharedConfig {
        Rc::new(RefCell::new(ConfigManager::new(dir.path().join("gabagool.toml"))))
    }

    #[test]
    fn studio_modules_register_expected_callbacks() {
        let dir = TempDir::new().unwrap();
        let config = shared(&dir);
        let mut modules = ModuleRegistry::new();
        register_all(&mut modules, &config);
        assert_eq!(
            modules.names().collect::<Vec<_>>(),
            vec!["background", "simple_window", "debug_window", "overlay"]
        );

        let mut frame = FrameRegistry::new();
        let mut state = State::new();
        let report = modules.run_all(&mut frame, &mut state);

        assert!(report.all_succeeded());
        assert_eq!(frame.render_pass_count(), 1);
        assert_eq!(frame.ui_panel_count(), 3);
        assert_eq!(frame.cleanup_count(), 1);
        assert!(config.borrow().has_section(TEST_SECTION));
    }

    #[test]
    fn reload_keeps_config_values() {
        let dir = TempDir::new().unwrap();
        let config = shared(&dir);
        let mut modules = ModuleRegistry::new();
        register_all(&mut modules, &config);

        let mut frame = FrameRegistry::new();
        let mut state = State::new();
        modules.run_all(&mut frame, &mut state);

        let test = config.borrow().get_section::<TestConfig>(TEST_SECTION).unwrap();
        test.borrow_mut().x = 7;

        frame.run_cleanups();
        frame.clear();
        assert!(modules.run_all(&mut frame, &mut state).all_succeeded());
        assert_eq!(test.borrow().x, 7);
    }

    #[test]
    fn first_init_loads_existing_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("gabagool.toml"), "[test]\nx = 7\ny = \"abc\"\n").unwrap();
        let config = shared(&dir);
        let mut modules = ModuleRegistry::new();
        register_all(&mut modules, &config);
        modules.run_all(&mut FrameRegistry::new(), &mut State::new());

        let test = config.borrow().get_section::<TestConfig>(TEST_SECTION).unwrap();
        assert_eq!(*test.borrow(), TestConfig { x: 7, y: "abc".into() });
    }

    #[test]
    fn panels_draw_without_a_window() {
        let dir = TempDir::new().unwrap();
        let config = shared(&dir);
        let mut modules = ModuleRegistry::new();
        register_all(&mut modules, &config);

        let mut frame = FrameRegistry::new();
        let mut state = State::new();
        state.display_debug = true;
        modules.run_all(&mut frame, &mut state);

        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| frame.run_ui_panels(ctx, &mut state));
        assert!(!state.close_requested());
        assert!(!state.queue_reload);
    }
}
