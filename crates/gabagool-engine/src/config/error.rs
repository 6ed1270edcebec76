use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config section [{section}]")]
    Serialize {
        section: String,
        #[source]
        source: toml::ser::Error,
    },

    #[error("failed to encode config file {path}")]
    Encode {
        path: PathBuf,
        #[source]
        source: toml::ser::Error,
    },
}
