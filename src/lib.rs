pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::console::Console;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::RosterConfig, Settings};

pub use crate::core::session::Session;
pub use crate::core::store::{RecordSelector, RecordStore};
pub use domain::model::{PersonRecord, RecordId, Size};
pub use utils::error::{Result, RosterError};
