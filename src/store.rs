//! Static truth content, loaded once at startup.
//!
//! The content file is a JSON array of truth records. Loading validates the
//! full set (unique ids, non-empty text and category, no duplicate content)
//! and fails closed: a corrupt or empty file means the process never starts
//! serving. After load the store is shared read-only and never mutated.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::config::{ConfigError, TruthsConfig};

/// Coarse importance tier used to bias selection by weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightTier {
    Low,
    Medium,
    High,
}

impl WeightTier {
    pub const ALL: [WeightTier; 3] = [WeightTier::Low, WeightTier::Medium, WeightTier::High];

    fn index(self) -> usize {
        match self {
            WeightTier::Low => 0,
            WeightTier::Medium => 1,
            WeightTier::High => 2,
        }
    }
}

impl fmt::Display for WeightTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightTier::Low => write!(f, "low"),
            WeightTier::Medium => write!(f, "medium"),
            WeightTier::High => write!(f, "high"),
        }
    }
}

/// One static content item served by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct TruthRecord {
    pub id: String,
    pub text: String,
    pub category: String,
    pub weight: WeightTier,
}

/// Immutable set of truth records with per-tier buckets.
#[derive(Debug)]
pub struct TruthStore {
    records: Vec<TruthRecord>,
    buckets: [Vec<usize>; 3],
}

impl TruthStore {
    /// Loads and validates the content file named by the configuration.
    pub fn load(cfg: &TruthsConfig) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(&cfg.file)?;
        let records: Vec<TruthRecord> = serde_json::from_str(&contents)?;
        Self::from_records(records, cfg.min_count)
    }

    /// Builds a store from in-memory records, enforcing the set invariants.
    pub fn from_records(
        records: Vec<TruthRecord>,
        min_count: usize,
    ) -> Result<Self, ConfigError> {
        if records.is_empty() {
            return Err(ConfigError::Validation(
                "Content set is empty".to_string(),
            ));
        }
        if records.len() < min_count {
            return Err(ConfigError::Validation(format!(
                "Content set has {} records, minimum is {}",
                records.len(),
                min_count
            )));
        }

        let mut ids = HashSet::new();
        let mut normalized = HashSet::new();
        let mut buckets: [Vec<usize>; 3] = Default::default();

        for (index, record) in records.iter().enumerate() {
            if record.id.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Record at position {} has an empty id",
                    index
                )));
            }
            if !ids.insert(record.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "Duplicate record id '{}'",
                    record.id
                )));
            }
            if record.text.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Record '{}' has empty text",
                    record.id
                )));
            }
            if record.category.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Record '{}' has an empty category",
                    record.id
                )));
            }
            // Two records that differ only in case or surrounding whitespace
            // are the same truth.
            if !normalized.insert(record.text.trim().to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "Record '{}' duplicates the text of an earlier record",
                    record.id
                )));
            }
            buckets[record.weight.index()].push(index);
        }

        Ok(Self { records, buckets })
    }

    pub fn records(&self) -> &[TruthRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Record indices for one weight tier; may be empty.
    pub fn bucket(&self, tier: WeightTier) -> &[usize] {
        &self.buckets[tier.index()]
    }

    /// Looks up a record by id.
    pub fn get(&self, id: &str) -> Option<&TruthRecord> {
        self.records.iter().find(|record| record.id == id)
    }
}
