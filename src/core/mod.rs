pub mod aggregate;
pub mod collation;
pub mod session;
pub mod store;

pub use crate::domain::model::{PersonRecord, RecordId, SeedRecord, Size};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
