use crate::core::Storage;
use crate::domain::model::{ExportFormat, PersonRecord};
use crate::utils::error::{RosterError, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: u64,
    name: &'a str,
    hat_size: &'static str,
    cloth_size: &'static str,
    allergies: &'a str,
    registered_at: String,
}

impl<'a> From<&'a PersonRecord> for ExportRow<'a> {
    fn from(record: &'a PersonRecord) -> Self {
        Self {
            id: record.id.0,
            name: &record.name,
            hat_size: record.hat_size.as_str(),
            cloth_size: record.cloth_size.as_str(),
            allergies: &record.allergies,
            registered_at: record.registered_at.to_rfc3339(),
        }
    }
}

/// Serializes rows in the order given.
pub fn encode(rows: &[&PersonRecord], format: ExportFormat) -> Result<Vec<u8>> {
    let rows: Vec<ExportRow> = rows.iter().map(|r| ExportRow::from(*r)).collect();
    match format {
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for row in &rows {
                writer.serialize(row)?;
            }
            writer
                .into_inner()
                .map_err(|e| RosterError::IoError(e.into_error()))
        }
        ExportFormat::Json => Ok(serde_json::to_vec_pretty(&rows)?),
    }
}

/// Writes a one-way snapshot. The format follows the path's extension when it
/// names one, otherwise `fallback`.
pub fn export_roster<S: Storage>(
    storage: &S,
    rows: &[&PersonRecord],
    path: &str,
    fallback: ExportFormat,
) -> Result<ExportFormat> {
    if path.trim().is_empty() || path.contains('\0') {
        return Err(RosterError::validation(
            "export path",
            format!("'{}' is not a usable export path", path.escape_default()),
        ));
    }
    let format = ExportFormat::from_path(path).unwrap_or(fallback);
    let data = encode(rows, format)?;
    tracing::info!("Exporting {} records as {:?} to {}", rows.len(), format, path);
    storage.write_file(path, &data)?;
    Ok(format)
}
