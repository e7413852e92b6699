//! Raw survey records and the canonical form of their fields.
//!
//! A [`RawRecord`] is what the presentation layer (a form, a CSV row, a JSON
//! payload) hands to the screening core. Numeric fields are already typed;
//! categorical fields stay as free text and are canonicalised by
//! [`CategoricalField::canonicalize`], the single rule shared by schema fitting
//! and inference.

use crate::error::{Result, ScreeningError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Youngest accepted respondent.
pub const MIN_AGE: u32 = 16;
/// Oldest accepted respondent.
pub const MAX_AGE: u32 = 60;
/// Highest accepted year of study.
pub const MAX_YEAR_OF_STUDY: u32 = 6;
/// Upper bound of the CGPA scale.
pub const MAX_CGPA: f64 = 10.0;

/// Bucketed CGPA answers and the value each stands for.
const CGPA_BUCKETS: [(&str, f64); 4] = [
    ("3.50 - 4.00", 3.75),
    ("2.50 - 3.49", 3.0),
    ("1.50 - 2.49", 2.0),
    ("0.00 - 1.49", 1.0),
];

/// Field names accepted by [`RawRecord::from_fields`].
pub mod field {
    pub const GENDER: &str = "gender";
    pub const AGE: &str = "age";
    pub const COURSE: &str = "course";
    pub const YEAR_OF_STUDY: &str = "year_of_study";
    pub const CGPA: &str = "cgpa";
    pub const MARITAL_STATUS: &str = "marital_status";

    pub const ALL: [&str; 6] = [GENDER, AGE, COURSE, YEAR_OF_STUDY, CGPA, MARITAL_STATUS];
}

/// Categorical survey fields, in encoding order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    Gender,
    Course,
    MaritalStatus,
}

impl CategoricalField {
    /// All categorical fields in the order their columns appear in the schema.
    pub const ALL: [CategoricalField; 3] = [
        CategoricalField::Gender,
        CategoricalField::Course,
        CategoricalField::MaritalStatus,
    ];

    /// Column-name prefix for this field.
    pub fn name(&self) -> &'static str {
        match self {
            CategoricalField::Gender => field::GENDER,
            CategoricalField::Course => field::COURSE,
            CategoricalField::MaritalStatus => field::MARITAL_STATUS,
        }
    }

    /// Canonical category value: trimmed, lowercased, inner whitespace as `_`.
    ///
    /// Gender accepts the single-letter aliases used by the survey export.
    pub fn canonicalize(&self, raw: &str) -> String {
        let value = raw
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("_");

        match (self, value.as_str()) {
            (CategoricalField::Gender, "m") => "male".to_string(),
            (CategoricalField::Gender, "f") => "female".to_string(),
            _ => value,
        }
    }

    /// Name of the one-hot column for a canonical value.
    pub fn column(&self, canonical: &str) -> String {
        format!("{}_{}", self.name(), canonical)
    }

    /// Raw value of this field in `record`.
    pub fn value_of<'a>(&self, record: &'a RawRecord) -> &'a str {
        match self {
            CategoricalField::Gender => &record.gender,
            CategoricalField::Course => &record.course,
            CategoricalField::MaritalStatus => &record.marital_status,
        }
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// CGPA as answered: a number or one of the survey's range buckets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CgpaInput {
    Value(f64),
    Range(String),
}

impl CgpaInput {
    /// Numeric CGPA used as a feature.
    pub fn resolve(&self) -> Result<f64> {
        match self {
            CgpaInput::Value(v) => Ok(*v),
            CgpaInput::Range(text) => parse_cgpa(text),
        }
    }
}

/// Parse a CGPA answer, either numeric (`"3.2"`) or a range bucket (`"2.50 - 3.49"`).
pub fn parse_cgpa(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    if let Ok(v) = trimmed.parse::<f64>() {
        return Ok(v);
    }

    let normalized: String = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    CGPA_BUCKETS
        .iter()
        .find(|(bucket, _)| *bucket == normalized)
        .map(|(_, value)| *value)
        .ok_or_else(|| ScreeningError::InvalidRecord(format!("unrecognised CGPA '{}'", text)))
}

/// Parse a year of study such as `"2"`, `"year 2"` or `"Year 3"`.
pub fn parse_year_of_study(text: &str) -> Result<u32> {
    let lowered = text.trim().to_lowercase();
    let digits = lowered.strip_prefix("year").unwrap_or(&lowered).trim();
    digits
        .parse::<u32>()
        .map_err(|_| ScreeningError::InvalidRecord(format!("unrecognised year of study '{}'", text)))
}

/// One student's survey answers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub gender: String,
    pub age: u32,
    pub course: String,
    pub year_of_study: u32,
    #[serde(deserialize_with = "deserialize_cgpa")]
    pub cgpa: f64,
    pub marital_status: String,
}

fn deserialize_cgpa<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    CgpaInput::deserialize(deserializer)?
        .resolve()
        .map_err(serde::de::Error::custom)
}

impl RawRecord {
    pub fn new(
        gender: impl Into<String>,
        age: u32,
        course: impl Into<String>,
        year_of_study: u32,
        cgpa: f64,
        marital_status: impl Into<String>,
    ) -> Self {
        Self {
            gender: gender.into(),
            age,
            course: course.into(),
            year_of_study,
            cgpa,
            marital_status: marital_status.into(),
        }
    }

    /// Build a record from `(field, value)` pairs in any order.
    ///
    /// Keys are matched after trimming and lowercasing. Every field in
    /// [`field::ALL`] must be present; unknown keys are ignored.
    pub fn from_fields<I, K, V>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut slots: [Option<String>; 6] = Default::default();
        for (key, value) in fields {
            let key = key.as_ref().trim().to_lowercase();
            if let Some(idx) = field::ALL.iter().position(|f| *f == key) {
                slots[idx] = Some(value.as_ref().to_string());
            }
        }

        let mut take = |idx: usize| {
            slots[idx]
                .take()
                .ok_or_else(|| ScreeningError::InvalidRecord(format!("missing field '{}'", field::ALL[idx])))
        };

        let gender = take(0)?;
        let age_text = take(1)?;
        let course = take(2)?;
        let year_text = take(3)?;
        let cgpa_text = take(4)?;
        let marital_status = take(5)?;

        let age = age_text
            .trim()
            .parse::<u32>()
            .map_err(|_| ScreeningError::InvalidRecord(format!("unrecognised age '{}'", age_text)))?;

        Ok(Self {
            gender,
            age,
            course,
            year_of_study: parse_year_of_study(&year_text)?,
            cgpa: parse_cgpa(&cgpa_text)?,
            marital_status,
        })
    }

    /// Check numeric fields against the accepted survey ranges.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(ScreeningError::InvalidRecord(format!(
                "age {} outside {}..={}",
                self.age, MIN_AGE, MAX_AGE
            )));
        }
        if !(1..=MAX_YEAR_OF_STUDY).contains(&self.year_of_study) {
            return Err(ScreeningError::InvalidRecord(format!(
                "year of study {} outside 1..={}",
                self.year_of_study, MAX_YEAR_OF_STUDY
            )));
        }
        if !self.cgpa.is_finite() || self.cgpa < 0.0 || self.cgpa > MAX_CGPA {
            return Err(ScreeningError::InvalidRecord(format!(
                "CGPA {} outside 0..={}",
                self.cgpa, MAX_CGPA
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sample_fields() -> Vec<(&'static str, &'static str)> {
        vec![
            ("gender", "Female"),
            ("age", "21"),
            ("course", "Engineering"),
            ("year_of_study", "year 2"),
            ("cgpa", "3.2"),
            ("marital_status", "Single"),
        ]
    }

    #[test]
    fn test_canonicalize_gender_aliases() {
        assert_eq!(CategoricalField::Gender.canonicalize(" M "), "male");
        assert_eq!(CategoricalField::Gender.canonicalize("f"), "female");
        assert_eq!(CategoricalField::Gender.canonicalize("Female"), "female");
        assert_eq!(CategoricalField::Course.canonicalize("m"), "m");
    }

    #[test]
    fn test_canonicalize_collapses_whitespace() {
        assert_eq!(
            CategoricalField::Course.canonicalize("  Islamic   Education "),
            "islamic_education"
        );
        assert_eq!(
            CategoricalField::Course.column("islamic_education"),
            "course_islamic_education"
        );
    }

    #[test]
    fn test_parse_cgpa_buckets() {
        assert_eq!(parse_cgpa("3.50 - 4.00").unwrap(), 3.75);
        assert_eq!(parse_cgpa(" 2.50 - 3.49 ").unwrap(), 3.0);
        assert_eq!(parse_cgpa("1.50 - 2.49").unwrap(), 2.0);
        assert_eq!(parse_cgpa("0.00 - 1.49").unwrap(), 1.0);
        assert_eq!(parse_cgpa("3.2").unwrap(), 3.2);
        assert!(parse_cgpa("4.00 - 5.00").is_err());
    }

    #[test]
    fn test_cgpa_input_untagged() {
        let value: CgpaInput = serde_json::from_str("3.4").unwrap();
        assert_eq!(value.resolve().unwrap(), 3.4);
        let range: CgpaInput = serde_json::from_str("\"3.50 - 4.00\"").unwrap();
        assert_eq!(range.resolve().unwrap(), 3.75);
    }

    #[test]
    fn test_record_json_accepts_cgpa_bucket() {
        let json = r#"{"gender":"Male","age":19,"course":"BIT","year_of_study":1,
                       "cgpa":"3.50 - 4.00","marital_status":"No"}"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.cgpa, 3.75);

        let bad = json.replace("3.50 - 4.00", "excellent");
        assert!(serde_json::from_str::<RawRecord>(&bad).is_err());
    }

    #[test]
    fn test_parse_year_of_study() {
        assert_eq!(parse_year_of_study("year 1").unwrap(), 1);
        assert_eq!(parse_year_of_study("Year 3").unwrap(), 3);
        assert_eq!(parse_year_of_study(" 2 ").unwrap(), 2);
        assert!(parse_year_of_study("second").is_err());
    }

    #[test]
    fn test_parse_year_of_study_single_prefix() {
        assert_eq!(parse_year_of_study("year 2").unwrap(), 2);
        assert_eq!(parse_year_of_study("YEAR4").unwrap(), 4);
        assert!(matches!(
            parse_year_of_study("yearyear 2"),
            Err(ScreeningError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_from_fields_order_independent() {
        let forward = RawRecord::from_fields(sample_fields()).unwrap();
        let mut reversed_fields = sample_fields();
        reversed_fields.reverse();
        let reversed = RawRecord::from_fields(reversed_fields).unwrap();
        let hashed: HashMap<_, _> = sample_fields().into_iter().collect();
        let from_map = RawRecord::from_fields(hashed).unwrap();

        assert_eq!(forward, reversed);
        assert_eq!(forward, from_map);
        assert_eq!(forward.year_of_study, 2);
        assert_eq!(forward.cgpa, 3.2);
    }

    #[test]
    fn test_from_fields_missing_field() {
        let fields: Vec<_> = sample_fields()
            .into_iter()
            .filter(|(k, _)| *k != "cgpa")
            .collect();
        let err = RawRecord::from_fields(fields).unwrap_err();
        assert!(matches!(err, ScreeningError::InvalidRecord(msg) if msg.contains("cgpa")));
    }

    #[test]
    fn test_validate_bounds() {
        let ok = RawRecord::new("female", 21, "Engineering", 2, 3.2, "Single");
        assert!(ok.validate().is_ok());

        let young = RawRecord { age: 15, ..ok.clone() };
        assert!(young.validate().is_err());

        let edge = RawRecord { age: 60, ..ok.clone() };
        assert!(edge.validate().is_ok());

        let no_year = RawRecord { year_of_study: 0, ..ok.clone() };
        assert!(no_year.validate().is_err());

        let nan = RawRecord { cgpa: f64::NAN, ..ok };
        assert!(nan.validate().is_err());
    }
}
