//! In-memory medal records, loaded once at startup

use ahash::{AHashMap, AHashSet};
use gm_core::{GamesYear, MedalRecord};

use crate::sources::MedalSource;
use crate::DataError;

/// A country that appears in at least one medal table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryEntry {
    pub code: String,
    pub name: String,
}

/// Figures gathered while building the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub record_count: usize,
    pub country_count: usize,
    /// Records whose total differs from gold + silver + bronze
    pub total_mismatches: usize,
}

/// Read-only collection of medal records, one per country and Games
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<MedalRecord>,
    /// Country code to display name, from the first record seen
    names: AHashMap<String, String>,
    stats: StoreStats,
}

impl RecordStore {
    /// Build a store, rejecting a second record for the same country and year
    pub fn from_records(records: Vec<MedalRecord>) -> Result<Self, DataError> {
        let mut seen = AHashSet::with_capacity(records.len());
        let mut names = AHashMap::new();
        let mut total_mismatches = 0;

        for record in &records {
            if !seen.insert((record.country_code.as_str(), record.year)) {
                return Err(DataError::DuplicateRecord {
                    country_code: record.country_code.clone(),
                    year: record.year.get(),
                });
            }

            if !record.counts.is_consistent() {
                total_mismatches += 1;
                tracing::warn!(
                    "{} {}: total {} differs from gold + silver + bronze = {}, using the source total",
                    record.country_code,
                    record.year,
                    record.counts.total,
                    record.counts.component_sum()
                );
            }

            names
                .entry(record.country_code.clone())
                .or_insert_with(|| record.country_name.clone());
        }
        drop(seen);

        let stats = StoreStats {
            record_count: records.len(),
            country_count: names.len(),
            total_mismatches,
        };
        tracing::info!(
            "Record store ready: {} records, {} countries, {} total mismatches",
            stats.record_count,
            stats.country_count,
            stats.total_mismatches
        );

        Ok(Self { records, names, stats })
    }

    /// Load every source in turn and build a store from the union
    pub async fn load_from<S: MedalSource>(sources: &[S]) -> anyhow::Result<Self> {
        let mut records = Vec::new();
        for source in sources {
            let batch = source.load().await.map_err(|e| e.context(format!("loading {}", source.source_name())))?;
            records.extend(batch);
        }
        Ok(Self::from_records(records)?)
    }

    pub fn records(&self) -> &[MedalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> StoreStats {
        self.stats
    }

    pub fn contains_country(&self, code: &str) -> bool {
        self.names.contains_key(code)
    }

    pub fn country_name(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    pub fn get(&self, code: &str, year: GamesYear) -> Option<&MedalRecord> {
        self.records
            .iter()
            .find(|r| r.year == year && r.country_code == code)
    }

    /// Countries with at least one record, sorted by display name
    pub fn countries(&self) -> Vec<CountryEntry> {
        let mut countries: Vec<CountryEntry> = self
            .names
            .iter()
            .map(|(code, name)| CountryEntry {
                code: code.clone(),
                name: name.clone(),
            })
            .collect();
        countries.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.code.cmp(&b.code))
        });
        countries
    }
}
