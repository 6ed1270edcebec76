use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ConfigError;

/// Bound for types stored as config sections.
pub trait SectionData: Serialize + DeserializeOwned + Default + 'static {}

impl<T> SectionData for T where T: Serialize + DeserializeOwned + Default + 'static {}

/// Shared handle to a section's live value. Modules keep a clone and edit
/// it from their UI; the manager reads it back on save.
pub type SectionHandle<T> = Rc<RefCell<T>>;

/// What [`ConfigManager::load`](super::ConfigManager::load) could not apply.
/// Every entry was also logged as a warning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub missing_sections: Vec<String>,
    /// `(section, field)` pairs absent from the file.
    pub missing_fields: Vec<(String, String)>,
    /// `(section, field)` pairs whose value had the wrong type.
    pub rejected_fields: Vec<(String, String)>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.missing_sections.is_empty() && self.missing_fields.is_empty() && self.rejected_fields.is_empty()
    }
}

/// Type-erased view of one section, as the manager stores it.
pub(crate) trait Section {
    fn to_table(&self, name: &str) -> Result<toml::Table, ConfigError>;

    /// Overlays `incoming` onto the live value field by field. Fields that
    /// are missing or fail to deserialize keep their current value.
    fn merge(&self, name: &str, incoming: &toml::Table, report: &mut LoadReport);

    fn as_any(&self) -> &dyn Any;
}

pub(crate) struct TypedSection<T> {
    pub(crate) value: SectionHandle<T>,
}

impl<T: SectionData> TypedSection<T> {
    pub(crate) fn new() -> Self {
        Self { value: Rc::new(RefCell::new(T::default())) }
    }
}

impl<T: SectionData> Section for TypedSection<T> {
    fn to_table(&self, name: &str) -> Result<toml::Table, ConfigError> {
        let value = toml::Value::try_from(&*self.value.borrow()).map_err(|source| {
            ConfigError::Serialize { section: name.to_owned(), source }
        })?;
        match value {
            toml::Value::Table(table) => Ok(table),
            other => Ok(toml::Table::from_iter([("value".to_owned(), other)])),
        }
    }

    fn merge(&self, name: &str, incoming: &toml::Table, report: &mut LoadReport) {
        let mut merged = match self.to_table(name) {
            Ok(table) => table,
            Err(e) => {
                log::warn!("config: cannot read current value of [{name}]: {e}");
                return;
            }
        };

        for key in merged.keys() {
            if !incoming.contains_key(key) {
                log::warn!("config: [{name}] has no field '{key}', keeping current value");
                report.missing_fields.push((name.to_owned(), key.clone()));
            }
        }

        for (key, value) in incoming {
            let mut candidate = merged.clone();
            candidate.insert(key.clone(), value.clone());
            match toml::Value::Table(candidate).try_into::<T>() {
                Ok(_) => {
                    merged.insert(key.clone(), value.clone());
                }
                Err(e) => {
                    log::warn!(
                        "config: [{name}].{key} has an unexpected type, keeping current value ({})",
                        e.message()
                    );
                    report.rejected_fields.push((name.to_owned(), key.clone()));
                }
            }
        }

        match toml::Value::Table(merged).try_into::<T>() {
            Ok(v) => *self.value.borrow_mut() = v,
            Err(e) => log::warn!("config: [{name}] could not be applied: {}", e.message()),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
