//! Tabbed debug window: reload, fullscreen, the `test` config section and
//! window/theme controls.

use anyhow::anyhow;
use gabagool_engine::config::SectionHandle;
use gabagool_engine::module::FrameRegistry;
use gabagool_engine::state::State;
use gabagool_engine::window::FullscreenMode;
use serde::{Deserialize, Serialize};

use super::SharedConfig;
use crate::theme;

pub const TEST_SECTION: &str = "test";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestConfig {
    pub x: i32,
    pub y: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self { x: 10, y: "gabagool".into() }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
enum Tab {
    #[default]
    Debugging,
    Config,
    WindowTheme,
}

pub fn init(frame: &mut FrameRegistry, _state: &mut State, config: &SharedConfig) -> anyhow::Result<()> {
    let first_run = !config.borrow().has_section(TEST_SECTION);
    let test = config
        .borrow_mut()
        .section::<TestConfig>(TEST_SECTION)
        .ok_or_else(|| anyhow!("config section [{TEST_SECTION}] belongs to another type"))?;

    if first_run && config.borrow().path().exists() {
        // Errors are logged by the manager; defaults stay in place.
        let _ = config.borrow_mut().load();
    }

    let config = SharedConfig::clone(config);
    let mut tab = Tab::default();
    frame.add_ui_panel(move |ctx, state| {
        egui::Window::new("debug")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut tab, Tab::Debugging, "Debugging");
                    ui.selectable_value(&mut tab, Tab::Config, "Config");
                    ui.selectable_value(&mut tab, Tab::WindowTheme, "Window & Theme");
                });
                ui.separator();

                match tab {
                    Tab::Debugging => debugging_tab(ui, state),
                    Tab::Config => config_tab(ui, &config, &test),
                    Tab::WindowTheme => window_tab(ui, ctx, state),
                }
            });
    });
    Ok(())
}

fn debugging_tab(ui: &mut egui::Ui, state: &mut State) {
    ui.horizontal(|ui| {
        if ui.button("Reload modules").clicked() {
            state.queue_reload = true;
        }
        ui.checkbox(&mut state.display_debug, "Display Debug Info");
    });

    ui.add_space(4.0);
    ui.label("Fullscreen (F11 toggles borderless)");
    let current = state.fullscreen_mode();
    let mut mode = current;
    ui.horizontal(|ui| {
        for m in [FullscreenMode::Windowed, FullscreenMode::Borderless, FullscreenMode::Fullscreen] {
            ui.radio_value(&mut mode, m, m.to_string());
        }
    });
    if mode != current {
        state.request_fullscreen(mode);
    }
}

fn config_tab(ui: &mut egui::Ui, config: &SharedConfig, test: &SectionHandle<TestConfig>) {
    ui.label("Test Configuration:");
    {
        let mut values = test.borrow_mut();
        ui.horizontal(|ui| {
            ui.add(egui::DragValue::new(&mut values.x));
            ui.label("Value X");
        });
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut values.y);
            ui.label("Value Y");
        });
    }

    ui.separator();

    ui.horizontal(|ui| {
        if ui.button("Save Config").clicked() && config.borrow().save().is_ok() {
            let v = test.borrow();
            log::info!("config saved. x: {}, y: '{}'", v.x, v.y);
        }
        if ui.button("Load Config").clicked() && config.borrow_mut().load().is_ok() {
            let v = test.borrow();
            log::info!("config loaded. x: {}, y: '{}'", v.x, v.y);
        }
    });

    ui.label("Note: 'Load Config' will overwrite any unsaved changes made here.");
}

fn window_tab(ui: &mut egui::Ui, ctx: &egui::Context, state: &mut State) {
    ui.horizontal(|ui| {
        if ui.button("Close Window").clicked() {
            state.request_close();
        }
        if ui.button("Reload theme").clicked() {
            theme::apply(ctx);
        }
    });
    super::clear_color_editor(ui, state);
}
