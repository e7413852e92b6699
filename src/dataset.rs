//! Survey CSV loading for the artifact producer side.
//!
//! The survey export has one row per student with free-text headers. Only the
//! columns below are read; everything else (timestamps, treatment questions)
//! is ignored.
//!
//! | header (or cleaned alias)                     | field          |
//! |-----------------------------------------------|----------------|
//! | `Choose your gender` / `Gender`               | gender         |
//! | `Age`                                         | age            |
//! | `What is your course?` / `course`             | course         |
//! | `Your current year of Study` / `year of Study`| year of study  |
//! | `What is your CGPA?` / `CGPA?`                | CGPA           |
//! | `Marital status`                              | marital status |
//! | `Do you have <condition>?` / `<condition>`    | label (Yes/No) |

use crate::error::{Result, ScreeningError};
use crate::model::Condition;
use crate::record::{field, RawRecord};
use csv::{ReaderBuilder, StringRecord};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const FEATURE_HEADERS: [(&[&str], &str); 6] = [
    (&["Choose your gender", "Gender"], field::GENDER),
    (&["Age"], field::AGE),
    (&["What is your course?", "course"], field::COURSE),
    (&["Your current year of Study", "year of Study"], field::YEAR_OF_STUDY),
    (&["What is your CGPA?", "CGPA?"], field::CGPA),
    (&["Marital status"], field::MARITAL_STATUS),
];

fn label_headers(condition: Condition) -> [String; 2] {
    [
        format!("Do you have {}?", condition.name()),
        condition.name().to_string(),
    ]
}

/// One parsed survey row.
#[derive(Clone, Debug, PartialEq)]
pub struct SurveyRow {
    pub record: RawRecord,
    /// Known answers per condition; empty when the file has no label columns.
    pub labels: BTreeMap<Condition, bool>,
}

/// Parsed survey rows plus how many rows were skipped.
#[derive(Clone, Debug, Default)]
pub struct SurveyDataset {
    rows: Vec<SurveyRow>,
    skipped: usize,
}

impl SurveyDataset {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        read_survey_csv(BufReader::new(file))
    }

    pub fn rows(&self) -> &[SurveyRow] {
        &self.rows
    }

    pub fn records(&self) -> Vec<RawRecord> {
        self.rows.iter().map(|r| r.record.clone()).collect()
    }

    /// Labels for `condition`, or `None` if any row lacks one.
    pub fn labels(&self, condition: Condition) -> Option<Vec<bool>> {
        self.rows
            .iter()
            .map(|r| r.labels.get(&condition).copied())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Read a survey CSV.
///
/// # Errors
/// [`ScreeningError::InvalidRecord`] if a feature column is missing from the
/// header; I/O and CSV errors are propagated. Rows that fail to parse are
/// skipped with a warning.
pub fn read_survey_csv<R: Read>(reader: R) -> Result<SurveyDataset> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let position = |aliases: &[&str]| {
        aliases
            .iter()
            .find_map(|a| headers.iter().position(|h| h.eq_ignore_ascii_case(a)))
    };

    let mut features = Vec::with_capacity(FEATURE_HEADERS.len());
    for (aliases, name) in FEATURE_HEADERS {
        let idx = position(aliases).ok_or_else(|| {
            ScreeningError::InvalidRecord(format!("survey file has no '{}' column", aliases[0]))
        })?;
        features.push((name, idx));
    }

    let label_columns: Vec<(Condition, usize)> = Condition::ALL
        .iter()
        .filter_map(|c| {
            let [long, short] = label_headers(*c);
            position(&[long.as_str(), short.as_str()][..]).map(|idx| (*c, idx))
        })
        .collect();

    let mut dataset = SurveyDataset::default();
    for (line, result) in rdr.records().enumerate() {
        let row = result?;
        match parse_row(&row, &features, &label_columns) {
            Ok(parsed) => dataset.rows.push(parsed),
            Err(e) => {
                // header is line 1
                log::warn!("skipping survey row {}: {}", line + 2, e);
                dataset.skipped += 1;
            }
        }
    }

    log::info!(
        "read {} survey rows ({} skipped)",
        dataset.rows.len(),
        dataset.skipped
    );
    Ok(dataset)
}

fn parse_row(
    row: &StringRecord,
    features: &[(&str, usize)],
    label_columns: &[(Condition, usize)],
) -> Result<SurveyRow> {
    let fields = features
        .iter()
        .map(|(name, idx)| row.get(*idx).map(|value| (*name, value)))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| ScreeningError::InvalidRecord("row is shorter than the header".into()))?;

    let record = RawRecord::from_fields(fields)?;
    record.validate()?;

    let mut labels = BTreeMap::new();
    for (condition, idx) in label_columns {
        let answer = row.get(*idx).unwrap_or("").trim();
        let value = match answer.to_lowercase().as_str() {
            "yes" => true,
            "no" => false,
            _ => {
                return Err(ScreeningError::InvalidRecord(format!(
                    "unrecognised answer '{}' for {}",
                    answer, condition
                )))
            }
        };
        labels.insert(*condition, value);
    }

    Ok(SurveyRow { record, labels })
}
