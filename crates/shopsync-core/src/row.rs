use std::collections::HashMap;

use crate::fields::Field;

/// One data row from the sheet, keyed by header name.
///
/// Values are stored trimmed; cells that are empty after trimming are not
/// stored at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: HashMap<String, String>,
}

impl RawRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row from `(header, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut row = Self::new();
        for (k, v) in pairs {
            row.insert(k, v.as_ref());
        }
        row
    }

    pub fn insert(&mut self, header: impl Into<String>, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        self.cells.insert(header.into(), value.to_string());
    }

    /// Value of the first alias of `field` that has a non-empty cell.
    #[must_use]
    pub fn field(&self, field: Field) -> Option<&str> {
        field
            .aliases()
            .iter()
            .find_map(|alias| self.cells.get(*alias))
            .map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
