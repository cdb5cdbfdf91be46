use crate::core::collation::sort_by_name;
use crate::domain::model::{join_allergies, PersonRecord, RecordId, SeedRecord, Size};
use crate::utils::error::{RosterError, Result};
use crate::utils::validation::validate_non_empty_string;
use chrono::Utc;

/// How a delete request picks its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSelector {
    /// Index into insertion order.
    Position(usize),
    Id(RecordId),
    /// First record in insertion order whose name matches exactly. With
    /// duplicate names this cannot tell people apart; prefer `Id`.
    Name(String),
}

impl std::fmt::Display for RecordSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Position(index) => write!(f, "position {}", index),
            Self::Id(id) => write!(f, "record {}", id),
            Self::Name(name) => write!(f, "name '{}'", name),
        }
    }
}

/// Insertion-ordered person records for one session.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<PersonRecord>,
    next_id: u64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: &[SeedRecord]) -> Self {
        let mut store = Self::new();
        for record in seed {
            if let Err(e) = store.add(&record.name, record.hat_size, record.cloth_size, &record.allergies) {
                tracing::warn!("Skipping seed record: {}", e);
            }
        }
        store
    }

    pub fn add<S: AsRef<str>>(
        &mut self,
        name: &str,
        hat_size: Size,
        cloth_size: Size,
        allergies: &[S],
    ) -> Result<RecordId> {
        validate_non_empty_string("name", name)?;

        self.next_id += 1;
        let id = RecordId(self.next_id);
        let record = PersonRecord {
            id,
            name: name.trim().to_string(),
            hat_size,
            cloth_size,
            allergies: join_allergies(allergies),
            registered_at: Utc::now(),
        };

        tracing::info!("Added {} ({}) hat={} cloth={}", record.name, id, hat_size, cloth_size);
        tracing::debug!("Allergies for {}: {}", id, record.allergies);
        self.records.push(record);
        Ok(id)
    }

    /// Removes the selected record. A selector matching nothing leaves the
    /// store untouched and reports `NotFoundError`.
    pub fn delete(&mut self, selector: &RecordSelector) -> Result<PersonRecord> {
        let index = self
            .position_of(selector)
            .ok_or_else(|| RosterError::not_found(selector.to_string()))?;

        let removed = self.records.remove(index);
        tracing::info!("Deleted {} ({})", removed.name, removed.id);
        Ok(removed)
    }

    fn position_of(&self, selector: &RecordSelector) -> Option<usize> {
        match selector {
            RecordSelector::Position(index) => (*index < self.records.len()).then_some(*index),
            RecordSelector::Id(id) => self.records.iter().position(|r| r.id == *id),
            RecordSelector::Name(name) => self.records.iter().position(|r| r.name == *name),
        }
    }

    pub fn list(&self) -> &[PersonRecord] {
        &self.records
    }

    /// Records ordered by the Hangul collation key of their names.
    pub fn sorted(&self) -> Vec<&PersonRecord> {
        let mut view: Vec<&PersonRecord> = self.records.iter().collect();
        sort_by_name(&mut view, |r| r.name.as_str());
        view
    }

    pub fn get(&self, id: RecordId) -> Option<&PersonRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{sample_roster, NO_ALLERGIES};

    const NONE: [&str; 0] = [];

    #[test]
    fn test_add_rejects_empty_name() {
        let mut store = RecordStore::with_seed(&sample_roster());
        let before = store.list().to_vec();

        let err = store.add("", Size::M, Size::L, &NONE).unwrap_err();
        assert!(matches!(err, RosterError::ValidationError { .. }));
        let err = store.add("   ", Size::M, Size::L, &NONE).unwrap_err();
        assert!(matches!(err, RosterError::ValidationError { .. }));

        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn test_add_without_allergies_uses_sentinel() {
        let mut store = RecordStore::with_seed(&sample_roster());
        let before = store.len();

        let id = store.add("홍길동", Size::M, Size::L, &NONE).unwrap();

        assert_eq!(store.len(), before + 1);
        let record = store.get(id).unwrap();
        assert_eq!(record.allergies, NO_ALLERGIES);
        assert_eq!(store.list().last().unwrap().id, id);
    }

    #[test]
    fn test_add_joins_allergies_and_trims_name() {
        let mut store = RecordStore::new();
        let id = store
            .add("  홍길동 ", Size::S, Size::XXL, &["곡류: 밀", "육류: 닭고기"])
            .unwrap();
        let record = store.get(id).unwrap();
        assert_eq!(record.name, "홍길동");
        assert_eq!(record.allergies, "곡류: 밀, 육류: 닭고기");
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut store = RecordStore::new();
        let first = store.add("가", Size::M, Size::L, &NONE).unwrap();
        store.delete(&RecordSelector::Id(first)).unwrap();
        let second = store.add("가", Size::M, Size::L, &NONE).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_delete_out_of_range_is_noop() {
        let mut store = RecordStore::with_seed(&sample_roster());
        let err = store.delete(&RecordSelector::Position(3)).unwrap_err();
        assert!(matches!(err, RosterError::NotFoundError { .. }));
        assert_eq!(store.len(), 3);

        let removed = store.delete(&RecordSelector::Position(0)).unwrap();
        assert_eq!(removed.name, "김민수");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_delete_by_name_removes_first_match_only() {
        let mut store = RecordStore::new();
        let first = store.add("김민수", Size::S, Size::S, &NONE).unwrap();
        let second = store.add("김민수", Size::XL, Size::XL, &NONE).unwrap();

        let removed = store.delete(&RecordSelector::Name("김민수".to_string())).unwrap();
        assert_eq!(removed.id, first);
        assert!(store.get(second).is_some());

        assert!(store.delete(&RecordSelector::Name("없는사람".to_string())).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_by_id_targets_the_right_duplicate() {
        let mut store = RecordStore::new();
        let first = store.add("김민수", Size::S, Size::S, &NONE).unwrap();
        let second = store.add("김민수", Size::XL, Size::XL, &NONE).unwrap();

        store.delete(&RecordSelector::Id(second)).unwrap();
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.list()[0].id, first);
    }

    #[test]
    fn test_sorted_view_does_not_mutate() {
        let mut store = RecordStore::with_seed(&sample_roster());
        store.add("Zed", Size::M, Size::L, &NONE).unwrap();
        store.add("강감찬", Size::M, Size::L, &NONE).unwrap();

        let names: Vec<&str> = store.sorted().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["강감찬", "김민수", "박철수", "이영희", "Zed"]);

        let insertion: Vec<&str> = store.list().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(insertion, vec!["김민수", "이영희", "박철수", "Zed", "강감찬"]);
    }

    #[test]
    fn test_list_is_idempotent() {
        let store = RecordStore::with_seed(&sample_roster());
        let first = store.list().to_vec();
        let second = store.list().to_vec();
        assert_eq!(first, second);
    }
}
