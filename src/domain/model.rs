use crate::utils::error::RosterError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display value stored when a person has no allergies.
pub const NO_ALLERGIES: &str = "없음";

/// Separator used when joining allergy tags into the display string.
pub const ALLERGY_SEPARATOR: &str = ", ";

pub const ALLERGY_OPTIONS: [&str; 14] = [
    "유제품: 우유",
    "난류: 달걀",
    "견과류: 땅콩",
    "견과류: 호두",
    "견과류: 밤",
    "곡류: 밀",
    "곡류: 메밀",
    "콩류: 대두(콩)",
    "해산물: 생선(고등어 등)",
    "해산물: 조개",
    "해산물: 갑각류(새우, 게)",
    "육류: 닭고기",
    "과일 및 채소: 복숭아",
    "과일 및 채소: 토마토",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Size {
    S,
    M,
    L,
    XL,
    XXL,
    XXXL,
}

impl Size {
    /// Canonical presentation order.
    pub const ALL: [Size; 6] = [Size::S, Size::M, Size::L, Size::XL, Size::XXL, Size::XXXL];

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::XL => "XL",
            Size::XXL => "XXL",
            Size::XXXL => "XXXL",
        }
    }

    pub const DEFAULT_HAT: Size = Size::M;
    pub const DEFAULT_CLOTH: Size = Size::L;
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Size::ALL
            .iter()
            .copied()
            .find(|size| size.as_str() == upper)
            .ok_or_else(|| RosterError::UnknownSizeError {
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub id: RecordId,
    pub name: String,
    pub hat_size: Size,
    pub cloth_size: Size,
    pub allergies: String,
    pub registered_at: DateTime<Utc>,
}

impl PersonRecord {
    pub fn has_allergies(&self) -> bool {
        !self.allergies.is_empty() && self.allergies != NO_ALLERGIES
    }

    /// Splits the display string strictly on ',' so a tag containing a comma
    /// contributes one entry per fragment.
    pub fn allergy_tags(&self) -> Vec<&str> {
        if !self.has_allergies() {
            return Vec::new();
        }
        self.allergies
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

pub fn join_allergies<S: AsRef<str>>(tags: &[S]) -> String {
    if tags.is_empty() {
        return NO_ALLERGIES.to_string();
    }
    tags.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(ALLERGY_SEPARATOR)
}

/// Resolves a 1-based position in [`ALLERGY_OPTIONS`].
pub fn allergy_option(number: usize) -> Option<&'static str> {
    number
        .checked_sub(1)
        .and_then(|index| ALLERGY_OPTIONS.get(index).copied())
}

/// A record supplied at startup, either from the built-in sample roster or
/// from the `[[seed]]` tables of a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedRecord {
    pub name: String,
    #[serde(default = "default_hat")]
    pub hat_size: Size,
    #[serde(default = "default_cloth")]
    pub cloth_size: Size,
    #[serde(default)]
    pub allergies: Vec<String>,
}

fn default_hat() -> Size {
    Size::DEFAULT_HAT
}

fn default_cloth() -> Size {
    Size::DEFAULT_CLOTH
}

pub fn sample_roster() -> Vec<SeedRecord> {
    vec![
        SeedRecord {
            name: "김민수".to_string(),
            hat_size: Size::M,
            cloth_size: Size::L,
            allergies: vec!["난류: 달걀".to_string(), "해산물: 갑각류(새우, 게)".to_string()],
        },
        SeedRecord {
            name: "이영희".to_string(),
            hat_size: Size::S,
            cloth_size: Size::M,
            allergies: vec!["견과류: 땅콩".to_string(), "견과류: 호두".to_string()],
        },
        SeedRecord {
            name: "박철수".to_string(),
            hat_size: Size::XL,
            cloth_size: Size::XL,
            allergies: vec!["해산물: 생선(고등어 등)".to_string()],
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub const NAMES: [&'static str; 2] = ["csv", "json"];

    pub fn from_path(path: &str) -> Option<Self> {
        let extension = std::path::Path::new(path).extension()?.to_str()?;
        extension.parse().ok()
    }
}

impl FromStr for ExportFormat {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(RosterError::InvalidConfigValueError {
                field: "export.format".to_string(),
                value: other.to_string(),
                reason: format!("Valid values: {}", Self::NAMES.join(", ")),
            }),
        }
    }
}
