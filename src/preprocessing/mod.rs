//! Data preprocessing: from survey record to the scaled feature row.
//!
//! # Design Philosophy
//!
//! - **Fit once, load read-only**: every transformer has an unfitted form used
//!   by the artifact producer and a fitted form loaded by inference.
//! - **Schema is the authority**: encoded rows are always reindexed against the
//!   stored [`TrainingColumnSchema`] before scaling.
//! - **Serializable**: fitted parameters are plain data, saved with bincode
//!   (scaler) or as a versioned JSON descriptor (schema).
//!
//! # Core Traits
//!
//! - [`Transformer`]: Unfitted transformer with hyperparameters
//! - [`FittedTransformer`]: Fitted transformer ready for inference
//!
//! # Example
//!
//! ```ignore
//! use mindscreen::preprocessing::{SchemaBuilder, StandardScaler, Transformer, FittedTransformer};
//!
//! let schema = SchemaBuilder::new().fit(&training_records)?;
//! let scaler = StandardScaler::new().fit(&schema.encode_batch(&training_records))?;
//!
//! let scaled = scaler.transform(&schema.encode(&record))?;
//! ```

pub mod encoding;
pub mod scaling;
pub mod schema;
pub mod traits;

pub use encoding::{
    CategoricalDomain, EncodedRow, FittedOneHotEncoder, OneHotEncoder, NUMERIC_COLUMNS,
    OVERFLOW_CATEGORY,
};
pub use scaling::{FittedStandardScaler, StandardScaler, StandardScalerParams};
pub use schema::{SchemaBuilder, SchemaDescriptor, TrainingColumnSchema, SCHEMA_VERSION};
pub use traits::{FittedTransformer, Transformer};
