use std::cell::RefCell;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use gabagool_engine::config::ConfigManager;
use gabagool_engine::device::GpuInit;
use gabagool_engine::logging::{init_logging, LoggingConfig};
use gabagool_engine::module::ModuleRegistry;
use gabagool_engine::sandbox::SandboxApp;
use gabagool_engine::window::{Runtime, RuntimeConfig};

mod modules;
mod theme;

const CONFIG_ENV: &str = "GABAGOOL_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "gabagool.toml";

fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let config = Rc::new(RefCell::new(ConfigManager::new(config_path())));
    log::info!("config file: {}", config.borrow().path().display());

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &config);
    log::info!("registered modules: {:?}", registry);

    let app = SandboxApp::new(registry).with_ui_setup(theme::apply);

    match Runtime::run(RuntimeConfig::default(), GpuInit::default(), app) {
        Ok(()) => {
            log::info!("bye");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
