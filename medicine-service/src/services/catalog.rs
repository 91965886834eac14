//! In-memory medicine table, loaded once from CSV and read-only afterwards.

use crate::models::{MedicineKind, MedicineRecord, MedicineSummary};
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to open medicine catalog {path}: {source}")]
    Open { path: String, source: csv::Error },

    #[error("Invalid medicine catalog row: {0}")]
    Row(#[from] csv::Error),
}

#[derive(Debug)]
struct CatalogEntry {
    record: MedicineRecord,
    name_lower: String,
    kind: MedicineKind,
}

#[derive(Debug, Default)]
pub struct MedicineCatalog {
    entries: Vec<CatalogEntry>,
}

impl MedicineCatalog {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_path(path)
            .map_err(|source| CatalogError::Open {
                path: path.display().to_string(),
                source,
            })?;

        let catalog = Self::from_csv(reader)?;

        tracing::info!(
            path = %path.display(),
            medicines = catalog.len(),
            "Medicine catalog loaded"
        );

        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        Self::from_csv(reader)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, CatalogError> {
        let records = reader
            .deserialize::<MedicineRecord>()
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<MedicineRecord>) -> Self {
        let entries = records
            .into_iter()
            .map(|record| CatalogEntry {
                name_lower: record.name.to_lowercase(),
                kind: MedicineKind::classify(&record.name),
                record,
            })
            .collect();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &MedicineRecord> {
        self.entries.iter().map(|entry| &entry.record)
    }

    /// First record whose identifier equals `id` exactly.
    pub fn find_by_id(&self, id: &str) -> Option<&MedicineRecord> {
        self.records().find(|record| record.id == id)
    }

    /// Records whose lowercased name contains at least one token, most
    /// matched tokens first. Ties keep table order. Tokens are expected to
    /// be lowercase already.
    pub fn match_tokens(&self, tokens: &BTreeSet<String>) -> Vec<MedicineSummary> {
        let mut ranked: Vec<(usize, &CatalogEntry)> = self
            .entries
            .iter()
            .map(|entry| {
                let count = tokens
                    .iter()
                    .filter(|token| entry.name_lower.contains(token.as_str()))
                    .count();
                (count, entry)
            })
            .filter(|(count, _)| *count > 0)
            .collect();

        // sort_by is stable
        ranked.sort_by(|(a, _), (b, _)| b.cmp(a));

        ranked
            .into_iter()
            .map(|(_, entry)| MedicineSummary::new(&entry.record, entry.kind))
            .collect()
    }
}
