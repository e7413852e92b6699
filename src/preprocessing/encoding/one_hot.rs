//! One-hot encoding of survey records into named columns.
//!
//! Numeric fields pass through under their own column name; every
//! categorical field contributes a single `field_value` column set to `1.0`.
//! The result is sparse and unordered with respect to the training schema;
//! [`TrainingColumnSchema::align`](crate::preprocessing::TrainingColumnSchema::align)
//! turns it into the fixed-width row the scaler expects.

use crate::error::{Result, ScreeningError};
use crate::preprocessing::encoding::domain::{CategoricalDomain, DEFAULT_TOP_COURSES};
use crate::preprocessing::encoding::NUMERIC_COLUMNS;
use crate::preprocessing::traits::Transformer;
use crate::record::{CategoricalField, RawRecord};

/// A record expanded into `(column name, value)` pairs.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedRow {
    columns: Vec<(String, f64)>,
}

impl EncodedRow {
    pub fn new(columns: Vec<(String, f64)>) -> Self {
        Self { columns }
    }

    /// Value of `name`, if this row produced that column.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .find(|(col, _)| col == name)
            .map(|(_, v)| *v)
    }

    pub fn columns(&self) -> &[(String, f64)] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One-hot encoder (unfitted): learns categorical domains from training records.
#[derive(Clone, Debug)]
pub struct OneHotEncoder {
    /// Number of most frequent courses that keep their own column.
    top_courses: usize,
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self {
            top_courses: DEFAULT_TOP_COURSES,
        }
    }

    /// Set how many courses keep their own column before folding into `other`.
    pub fn with_top_courses(mut self, top_courses: usize) -> Self {
        self.top_courses = top_courses;
        self
    }
}

impl Default for OneHotEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer for OneHotEncoder {
    type Data = [RawRecord];
    type Fitted = FittedOneHotEncoder;

    fn fit(&self, data: &Self::Data) -> Result<Self::Fitted> {
        if data.is_empty() {
            return Err(ScreeningError::EmptyData(
                "Cannot fit OneHotEncoder on empty data".to_string(),
            ));
        }

        let domains = CategoricalField::ALL
            .iter()
            .map(|field| {
                let canonical: Vec<String> = data
                    .iter()
                    .map(|r| field.canonicalize(field.value_of(r)))
                    .collect();
                let top_n = match field {
                    CategoricalField::Course => Some(self.top_courses),
                    _ => None,
                };
                CategoricalDomain::fit(*field, canonical.iter().map(String::as_str), top_n)
            })
            .collect();

        Ok(FittedOneHotEncoder { domains })
    }
}

/// Fitted one-hot encoder: one closed domain per categorical field.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedOneHotEncoder {
    domains: Vec<CategoricalDomain>,
}

impl FittedOneHotEncoder {
    pub fn from_domains(domains: Vec<CategoricalDomain>) -> Self {
        Self { domains }
    }

    pub fn domains(&self) -> &[CategoricalDomain] {
        &self.domains
    }

    pub fn into_domains(self) -> Vec<CategoricalDomain> {
        self.domains
    }

    /// Output column names: numeric columns, then each field's one-hot columns.
    pub fn feature_names(&self) -> Vec<String> {
        NUMERIC_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.domains.iter().flat_map(|d| d.columns()))
            .collect()
    }

    /// Expand one record into named columns.
    ///
    /// Never fails: values outside a domain without an overflow bucket produce a
    /// column the schema does not know, which alignment drops.
    pub fn encode(&self, record: &RawRecord) -> EncodedRow {
        let mut columns: Vec<(String, f64)> = vec![
            (NUMERIC_COLUMNS[0].to_string(), f64::from(record.age)),
            (NUMERIC_COLUMNS[1].to_string(), f64::from(record.year_of_study)),
            (NUMERIC_COLUMNS[2].to_string(), record.cgpa),
        ];

        for domain in &self.domains {
            let canonical = domain.field.canonicalize(domain.field.value_of(record));
            let category = domain.resolve(&canonical);
            if !domain.contains(category) {
                log::debug!(
                    "unseen {} category '{}' contributes no features",
                    domain.field,
                    category
                );
            }
            columns.push((domain.field.column(category), 1.0));
        }

        EncodedRow::new(columns)
    }
}
