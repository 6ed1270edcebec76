use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::error::ConfigError;
use super::section::{LoadReport, Section, SectionData, SectionHandle, TypedSection};

/// Named, typed sections persisted to a single TOML file.
///
/// Sections are registered by modules at init time and edited through the
/// returned handles. `load` overlays the file onto the live values; `save`
/// writes all of them back.
pub struct ConfigManager {
    path: PathBuf,
    sections: BTreeMap<String, Box<dyn Section>>,
}

impl ConfigManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), sections: BTreeMap::new() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Registers a section initialised to `T::default()`.
    ///
    /// Returns `None` (and logs) if `name` is already taken.
    pub fn add_section<T: SectionData>(&mut self, name: &str) -> Option<SectionHandle<T>> {
        if self.sections.contains_key(name) {
            log::error!("config: section [{name}] already exists");
            return None;
        }
        let section = TypedSection::<T>::new();
        let handle = Rc::clone(&section.value);
        self.sections.insert(name.to_owned(), Box::new(section));
        Some(handle)
    }

    /// Looks up an existing section. `None` when it is missing or was
    /// registered with a different type.
    pub fn get_section<T: SectionData>(&self, name: &str) -> Option<SectionHandle<T>> {
        let Some(section) = self.sections.get(name) else {
            log::warn!("config: no section named [{name}]");
            return None;
        };
        match section.as_any().downcast_ref::<TypedSection<T>>() {
            Some(typed) => Some(Rc::clone(&typed.value)),
            None => {
                log::error!(
                    "config: section [{name}] is not a {}",
                    std::any::type_name::<T>()
                );
                None
            }
        }
    }

    /// Get-or-add. Modules call this from init so a reload reuses the value
    /// that was already loaded instead of tripping the duplicate check.
    pub fn section<T: SectionData>(&mut self, name: &str) -> Option<SectionHandle<T>> {
        if self.has_section(name) {
            self.get_section(name)
        } else {
            self.add_section(name)
        }
    }

    /// Reads the file and overlays it onto every registered section.
    ///
    /// On any IO or parse error nothing is modified. Otherwise returns what
    /// could not be applied.
    pub fn load(&mut self) -> Result<LoadReport, ConfigError> {
        let result = self.read_document().map(|doc| self.apply(&doc));
        match &result {
            Ok(report) if report.is_clean() => log::info!("config: loaded {}", self.path.display()),
            Ok(_) => log::info!("config: loaded {} with warnings", self.path.display()),
            Err(e) => log::error!("config: {e}: {}", error_chain(e)),
        }
        result
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let result = self.write_document();
        match &result {
            Ok(()) => log::info!("config: saved {}", self.path.display()),
            Err(e) => log::error!("config: {e}: {}", error_chain(e)),
        }
        result
    }

    fn read_document(&self) -> Result<toml::Table, ConfigError> {
        let text = fs::read_to_string(&self.path)
            .map_err(|source| ConfigError::Io { path: self.path.clone(), source })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse { path: self.path.clone(), source })
    }

    fn apply(&self, doc: &toml::Table) -> LoadReport {
        let mut report = LoadReport::default();
        for (name, section) in &self.sections {
            match doc.get(name) {
                Some(toml::Value::Table(table)) => section.merge(name, table, &mut report),
                Some(_) => {
                    log::warn!("config: [{name}] is not a table, skipping");
                    report.missing_sections.push(name.clone());
                }
                None => {
                    log::warn!("config: file has no section [{name}], skipping");
                    report.missing_sections.push(name.clone());
                }
            }
        }
        for name in doc.keys().filter(|k| !self.sections.contains_key(*k)) {
            log::debug!("config: ignoring unknown section [{name}]");
        }
        report
    }

    fn write_document(&self) -> Result<(), ConfigError> {
        let mut doc = toml::Table::new();
        for (name, section) in &self.sections {
            doc.insert(name.clone(), toml::Value::Table(section.to_table(name)?));
        }
        let text = toml::to_string_pretty(&doc)
            .map_err(|source| ConfigError::Encode { path: self.path.clone(), source })?;
        fs::write(&self.path, text).map_err(|source| ConfigError::Io { path: self.path.clone(), source })
    }
}

fn error_chain(e: &ConfigError) -> String {
    match std::error::Error::source(e) {
        Some(source) => source.to_string(),
        None => String::new(),
    }
}

impl std::fmt::Debug for ConfigManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigManager")
            .field("path", &self.path)
            .field("sections", &self.sections.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestConfig {
        x: i32,
        y: String,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self { x: 10, y: "gabagool".into() }
        }
    }

    fn manager(dir: &TempDir) -> ConfigManager {
        ConfigManager::new(dir.path().join("gabagool.toml"))
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut cfg = manager(&dir);
        let test = cfg.add_section::<TestConfig>("test").unwrap();
        *test.borrow_mut() = TestConfig { x: 7, y: "abc".into() };
        cfg.save().unwrap();

        let mut fresh = manager(&dir);
        let loaded = fresh.add_section::<TestConfig>("test").unwrap();
        assert!(fresh.load().unwrap().is_clean());
        assert_eq!(*loaded.borrow(), TestConfig { x: 7, y: "abc".into() });
    }

    #[test]
    fn missing_field_keeps_current_value() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("gabagool.toml"), "[test]\nx = 3\n").unwrap();

        let mut cfg = manager(&dir);
        let test = cfg.add_section::<TestConfig>("test").unwrap();
        let report = cfg.load().unwrap();
        assert_eq!(*test.borrow(), TestConfig { x: 3, y: "gabagool".into() });
        assert_eq!(report.missing_fields, vec![("test".to_string(), "y".to_string())]);
        assert!(report.rejected_fields.is_empty());
    }

    #[test]
    fn wrong_type_keeps_current_value() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("gabagool.toml"), "[test]\nx = \"seven\"\ny = \"abc\"\n").unwrap();

        let mut cfg = manager(&dir);
        let test = cfg.add_section::<TestConfig>("test").unwrap();
        let report = cfg.load().unwrap();
        assert_eq!(*test.borrow(), TestConfig { x: 10, y: "abc".into() });
        assert_eq!(report.rejected_fields, vec![("test".to_string(), "x".to_string())]);
    }

    #[test]
    fn missing_section_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("gabagool.toml"), "[other]\nz = 1\n").unwrap();

        let mut cfg = manager(&dir);
        let test = cfg.add_section::<TestConfig>("test").unwrap();
        let report = cfg.load().unwrap();
        assert_eq!(*test.borrow(), TestConfig::default());
        assert_eq!(report.missing_sections, vec!["test".to_string()]);
    }

    #[test]
    fn parse_error_leaves_values_untouched() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("gabagool.toml"), "[test\nx = 1").unwrap();

        let mut cfg = manager(&dir);
        let test = cfg.add_section::<TestConfig>("test").unwrap();
        test.borrow_mut().x = 99;

        assert!(matches!(cfg.load(), Err(ConfigError::Parse { .. })));
        assert_eq!(test.borrow().x, 99);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let mut cfg = manager(&dir);
        assert!(matches!(cfg.load(), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn error_messages_name_the_target() {
        // A bare integer is not a TOML document.
        let source = toml::to_string(&Some(1u8)).unwrap_err();
        let err = ConfigError::Encode { path: PathBuf::from("gabagool.toml"), source };
        assert_eq!(err.to_string(), "failed to encode config file gabagool.toml");

        let source = toml::to_string(&Some(1u8)).unwrap_err();
        let err = ConfigError::Serialize { section: "test".into(), source };
        assert_eq!(err.to_string(), "failed to serialize config section [test]");
    }

    #[test]
    fn duplicate_section_is_rejected() {
        let mut cfg = ConfigManager::new("unused.toml");
        assert!(cfg.add_section::<TestConfig>("test").is_some());
        assert!(cfg.add_section::<TestConfig>("test").is_none());
    }

    #[test]
    fn get_or_add_returns_same_value() {
        let mut cfg = ConfigManager::new("unused.toml");
        let first = cfg.section::<TestConfig>("test").unwrap();
        first.borrow_mut().x = 42;
        let again = cfg.section::<TestConfig>("test").unwrap();
        assert!(Rc::ptr_eq(&first, &again));
        assert!(cfg.get_section::<u32>("test").is_none());
    }
}
