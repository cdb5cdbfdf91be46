use crate::domain::model::{PersonRecord, Size};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// One (label, count) pair of a count table, ready for charting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub label: String,
    pub count: usize,
    /// Fraction of the table total in `0.0..=1.0`.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CountTable {
    entries: Vec<(String, usize)>,
}

impl CountTable {
    fn from_entries(entries: Vec<(String, usize)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, count)| *count)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn slices(&self) -> Vec<ChartSlice> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        self.entries
            .iter()
            .map(|(label, count)| ChartSlice {
                label: label.clone(),
                count: *count,
                share: *count as f64 / total as f64,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RosterStats {
    pub hat_sizes: CountTable,
    pub cloth_sizes: CountTable,
    pub allergies: CountTable,
}

/// Tabulates all three charts from scratch.
pub fn tabulate<'a, I>(records: I) -> RosterStats
where
    I: IntoIterator<Item = &'a PersonRecord>,
{
    let records: Vec<&PersonRecord> = records.into_iter().collect();
    let stats = RosterStats {
        hat_sizes: size_counts(records.iter().map(|r| r.hat_size)),
        cloth_sizes: size_counts(records.iter().map(|r| r.cloth_size)),
        allergies: allergy_counts(records.iter().copied()),
    };
    tracing::debug!(
        "Tabulated {} records: {} hat sizes, {} cloth sizes, {} allergy tags",
        records.len(),
        stats.hat_sizes.entries().len(),
        stats.cloth_sizes.entries().len(),
        stats.allergies.entries().len()
    );
    stats
}

/// Counts per size in canonical order. Sizes never seen get no entry.
pub fn size_counts<I>(sizes: I) -> CountTable
where
    I: IntoIterator<Item = Size>,
{
    let mut counts: BTreeMap<Size, usize> = BTreeMap::new();
    for size in sizes {
        *counts.entry(size).or_insert(0) += 1;
    }
    CountTable::from_entries(
        counts
            .into_iter()
            .map(|(size, count)| (size.to_string(), count))
            .collect(),
    )
}

/// Counts per allergy tag, descending by count with ties kept in
/// first-encountered order.
pub fn allergy_counts<'a, I>(records: I) -> CountTable
where
    I: IntoIterator<Item = &'a PersonRecord>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<(String, usize)> = Vec::new();

    for record in records {
        for tag in record.allergy_tags() {
            match index.get(tag) {
                Some(&slot) => entries[slot].1 += 1,
                None => {
                    index.insert(tag, entries.len());
                    entries.push((tag.to_string(), 1));
                }
            }
        }
    }

    // `sort_by` is stable.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    CountTable::from_entries(entries)
}
