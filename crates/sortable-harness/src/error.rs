use std::path::PathBuf;

use sortable_widgets::SortableConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("cannot read script {path}: {source}")]
    ReadScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid script: {0}")]
    Script(#[from] serde_json::Error),

    #[error("cannot write report: {0}")]
    Output(#[source] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] SortableConfigError),

    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("step {step} refers to item {item}, but the script defines {count} items")]
    UnknownItem {
        step: usize,
        item: usize,
        count: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
