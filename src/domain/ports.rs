use crate::domain::model::{ExportFormat, SeedRecord};
use crate::utils::error::Result;

pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn title(&self) -> &str;
    fn chart_width(&self) -> usize;
    /// Format used when an export path carries no recognised extension.
    fn export_format(&self) -> ExportFormat;
    fn seed_records(&self) -> Vec<SeedRecord>;
}
