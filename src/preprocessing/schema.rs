//! Training column schema: the fixed column layout shared by training and inference.
//!
//! The schema is persisted as a small versioned JSON descriptor holding the
//! ordered column names and the categorical domains used to produce them.
//! Inference never derives columns on its own; every encoded record is
//! reindexed against this list, so a descriptor from a different contract
//! version is rejected instead of silently misaligning features.

use crate::error::{Result, ScreeningError};
use crate::preprocessing::encoding::{
    CategoricalDomain, EncodedRow, FittedOneHotEncoder, OneHotEncoder, NUMERIC_COLUMNS,
};
use crate::preprocessing::traits::Transformer;
use crate::record::{CategoricalField, RawRecord};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Version of the schema descriptor format written by this crate.
pub const SCHEMA_VERSION: u32 = 1;

/// On-disk form of a [`TrainingColumnSchema`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    pub version: u32,
    pub columns: Vec<String>,
    pub domains: Vec<CategoricalDomain>,
}

/// Ordered training columns plus the encoder that produces them.
#[derive(Clone, Debug)]
pub struct TrainingColumnSchema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    encoder: FittedOneHotEncoder,
}

impl TrainingColumnSchema {
    /// Build a schema from explicit columns and domains.
    ///
    /// # Errors
    /// [`ScreeningError::SchemaMismatch`] if `columns` is empty or has
    /// duplicates, if the domains don't cover each categorical field exactly
    /// once with sorted, unique categories, or if a column the encoder
    /// produces is absent from `columns`. Schema columns the encoder never
    /// produces are allowed and align to `0.0`.
    pub fn new(columns: Vec<String>, domains: Vec<CategoricalDomain>) -> Result<Self> {
        if columns.is_empty() {
            return Err(ScreeningError::SchemaMismatch(
                "training column schema is empty".to_string(),
            ));
        }

        let mut index = HashMap::with_capacity(columns.len());
        for (i, col) in columns.iter().enumerate() {
            if index.insert(col.clone(), i).is_some() {
                return Err(ScreeningError::SchemaMismatch(format!(
                    "duplicate column '{}'",
                    col
                )));
            }
        }

        validate_domains(&domains)?;
        let encoder = FittedOneHotEncoder::from_domains(domains);

        for name in encoder.feature_names() {
            if !index.contains_key(&name) {
                return Err(ScreeningError::SchemaMismatch(format!(
                    "column '{}' produced by the encoder is missing from the schema",
                    name
                )));
            }
        }

        Ok(Self {
            columns,
            index,
            encoder,
        })
    }

    /// Rebuild a schema from its descriptor, checking the contract version.
    pub fn from_descriptor(descriptor: SchemaDescriptor) -> Result<Self> {
        if descriptor.version != SCHEMA_VERSION {
            return Err(ScreeningError::SchemaVersion {
                expected: SCHEMA_VERSION,
                found: descriptor.version,
            });
        }
        Self::new(descriptor.columns, descriptor.domains)
    }

    pub fn to_descriptor(&self) -> SchemaDescriptor {
        SchemaDescriptor {
            version: SCHEMA_VERSION,
            columns: self.columns.clone(),
            domains: self.encoder.domains().to_vec(),
        }
    }

    /// Columns in stored order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn encoder(&self) -> &FittedOneHotEncoder {
        &self.encoder
    }

    /// Reindex an encoded row onto the schema.
    ///
    /// Schema columns the row lacks are `0.0`; row columns the schema lacks
    /// are dropped.
    pub fn align(&self, row: &EncodedRow) -> Array1<f64> {
        let mut aligned = Array1::zeros(self.columns.len());
        for (name, value) in row.columns() {
            match self.index.get(name) {
                Some(&i) => aligned[i] = *value,
                None => log::trace!("dropping column '{}' absent from schema", name),
            }
        }
        aligned
    }

    /// Encode and align one record.
    pub fn encode(&self, record: &RawRecord) -> Array1<f64> {
        self.align(&self.encoder.encode(record))
    }

    /// Encode and align many records into a `(records, columns)` matrix.
    pub fn encode_batch(&self, records: &[RawRecord]) -> Array2<f64> {
        let mut out = Array2::zeros((records.len(), self.columns.len()));
        for (mut row, record) in out.rows_mut().into_iter().zip(records) {
            row.assign(&self.encode(record));
        }
        out
    }

    /// Write the versioned descriptor as pretty JSON.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.to_descriptor())?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let descriptor: SchemaDescriptor = serde_json::from_str(&text)?;
        Self::from_descriptor(descriptor)
    }
}

fn validate_domains(domains: &[CategoricalDomain]) -> Result<()> {
    for field in CategoricalField::ALL {
        let count = domains.iter().filter(|d| d.field == field).count();
        if count != 1 {
            return Err(ScreeningError::SchemaMismatch(format!(
                "expected one domain for '{}', found {}",
                field, count
            )));
        }
    }

    for domain in domains {
        if domain.categories.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ScreeningError::SchemaMismatch(format!(
                "categories of '{}' are not sorted and unique",
                domain.field
            )));
        }
        if let Some(other) = &domain.overflow {
            if !domain.contains(other) {
                return Err(ScreeningError::SchemaMismatch(format!(
                    "overflow category '{}' missing from '{}'",
                    other, domain.field
                )));
            }
        }
    }
    Ok(())
}

/// Fits a [`TrainingColumnSchema`] from training records.
///
/// Column order: numeric columns, then each categorical field's one-hot
/// columns in field order with categories sorted.
#[derive(Clone, Debug, Default)]
pub struct SchemaBuilder {
    encoder: OneHotEncoder,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top_courses(mut self, top_courses: usize) -> Self {
        self.encoder = self.encoder.with_top_courses(top_courses);
        self
    }
}

impl Transformer for SchemaBuilder {
    type Data = [RawRecord];
    type Fitted = TrainingColumnSchema;

    fn fit(&self, data: &Self::Data) -> Result<Self::Fitted> {
        let encoder = self.encoder.fit(data)?;
        let columns = encoder.feature_names();
        debug_assert_eq!(&columns[..NUMERIC_COLUMNS.len()], &NUMERIC_COLUMNS[..]);
        TrainingColumnSchema::new(columns, encoder.into_domains())
    }
}
