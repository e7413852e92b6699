//! # mindscreen
//!
//! Screening of student survey answers for depression, anxiety and panic-attack
//! risk. A record is encoded into the fixed training column layout, scaled with
//! the fitted standardization parameters and scored by one independent
//! classifier per condition. Each probability is mapped to a discrete
//! [`RiskTier`].
//!
//! This is not a diagnostic tool.
//!
//! ## Core Design Principles
//!
//! - **Fixed artifacts**: schema, scaler and classifier ensemble are produced
//!   once and loaded read-only. Any missing or inconsistent artifact fails the
//!   load; there is never a partial context.
//! - **Schema is the authority**: inference never derives its own columns.
//! - **Independent conditions**: probabilities are never normalised against
//!   each other.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mindscreen::{context, ArtifactConfig, RawRecord};
//!
//! fn main() -> Result<(), mindscreen::ScreeningError> {
//!     let ctx = context::init(&ArtifactConfig::with_dir("artifacts"))?;
//!     let record = RawRecord::new("Female", 21, "Engineering", 2, 3.2, "Single");
//!     for (condition, result) in ctx.assess(&record)?.iter() {
//!         println!("{}: {} ({:.0}%)", condition, result.tier, result.probability * 100.0);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - `record` — Raw survey record and field canonicalisation
//! - `preprocessing` — Categorical encoding, training column schema, standard scaling
//! - `model` — Per-condition classifiers (logistic, random forest) and the ensemble
//! - `risk` — Probability to risk tier mapping
//! - `context` — Artifact loading and the `assess` pipeline
//! - `guidance` — Advice text and recommendation lists
//! - `dataset` — Survey CSV loading for producing artifacts
//! - `config` — Artifact locations and recommendation policy

pub mod assessment;
pub mod config;
pub mod context;
pub mod dataset;
pub mod error;
pub mod guidance;
pub mod model;
pub mod preprocessing;
pub mod record;
pub mod risk;
pub mod serialization;

pub use assessment::{Assessment, ConditionResult};
pub use config::{ArtifactConfig, RecommendationPolicy, ScreeningConfig};
pub use context::InferenceContext;
pub use error::{ArtifactKind, Result, ScreeningError};
pub use model::{ClassifierEnsemble, Condition, ConditionModel, ProbabilisticClassifier};
pub use record::RawRecord;
pub use risk::RiskTier;
