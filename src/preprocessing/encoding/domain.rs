//! Closed category sets for the categorical survey fields.

use crate::record::CategoricalField;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Category that absorbs course values outside the kept set.
pub const OVERFLOW_CATEGORY: &str = "other";

/// How many of the most frequent courses keep their own column.
pub const DEFAULT_TOP_COURSES: usize = 5;

/// The categories a field may take, fixed when the schema is fitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalDomain {
    pub field: CategoricalField,
    /// Canonical categories, sorted; includes the overflow category if any.
    pub categories: Vec<String>,
    /// Category out-of-domain values are mapped to, if the field has one.
    pub overflow: Option<String>,
}

impl CategoricalDomain {
    /// Fit the domain of `field` from canonical training values.
    ///
    /// With `top_n` set, only the `top_n` most frequent values are kept (ties
    /// broken lexicographically) and everything else maps to
    /// [`OVERFLOW_CATEGORY`].
    pub fn fit<'a, I>(field: CategoricalField, canonical_values: I, top_n: Option<usize>) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for value in canonical_values {
            *counts.entry(value).or_insert(0) += 1;
        }

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let (mut categories, overflow): (Vec<String>, _) = match top_n {
            Some(n) => {
                let kept = ranked.iter().take(n).map(|(v, _)| v.to_string()).collect();
                (kept, Some(OVERFLOW_CATEGORY.to_string()))
            }
            None => (ranked.iter().map(|(v, _)| v.to_string()).collect(), None),
        };

        if let Some(other) = &overflow {
            if !categories.contains(other) {
                categories.push(other.clone());
            }
        }
        categories.sort();

        Self {
            field,
            categories,
            overflow,
        }
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.categories.binary_search_by(|c| c.as_str().cmp(canonical)).is_ok()
    }

    /// Category a canonical value is encoded as.
    ///
    /// Values in the domain map to themselves; others go to the overflow
    /// category when the field has one and stay as-is otherwise (the column
    /// they produce is later dropped by schema alignment).
    pub fn resolve<'a>(&'a self, canonical: &'a str) -> &'a str {
        if self.contains(canonical) {
            return canonical;
        }
        match &self.overflow {
            Some(other) => other.as_str(),
            None => canonical,
        }
    }

    /// One-hot column names of this field, in schema order.
    pub fn columns(&self) -> impl Iterator<Item = String> + '_ {
        self.categories.iter().map(|c| self.field.column(c))
    }
}
