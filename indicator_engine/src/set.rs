//! Named indicator columns bound to a base series length.

use indexmap::IndexMap;
use indexmap::map::Iter;

use crate::error::{IndicatorError, Result};

/// Insertion-ordered mapping from column name to indicator values.
///
/// Every column must have exactly `len` rows. Inserting an existing name
/// replaces its values but keeps its original position.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    len: usize,
    columns: IndexMap<String, Vec<f64>>,
}

impl IndicatorSet {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            columns: IndexMap::new(),
        }
    }

    /// Add or overwrite a column.
    ///
    /// Returns the previous values when `name` was already present.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Option<Vec<f64>>> {
        let name = name.into();
        if values.len() != self.len {
            return Err(IndicatorError::LengthMismatch {
                name,
                expected: self.len,
                actual: values.len(),
            });
        }
        Ok(self.columns.insert(name, values))
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Rows per column.
    pub fn rows(&self) -> usize {
        self.len
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn iter(&self) -> Iter<'_, String, Vec<f64>> {
        self.columns.iter()
    }
}

impl<'a> IntoIterator for &'a IndicatorSet {
    type Item = (&'a String, &'a Vec<f64>);
    type IntoIter = Iter<'a, String, Vec<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
