//! Column inference.

use logsieve_proto::Record;

/// Columns of a dataset.
///
/// Records carry no declared schema, so the columns are the top-level keys of
/// the first record, in order. Later records may have more or fewer keys;
/// the column list does not change for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    /// Infer the columns of a dataset.
    pub fn infer(records: &[Record]) -> Self {
        let columns = records
            .first()
            .map(|r| r.keys().map(str::to_string).collect())
            .unwrap_or_default();
        Self { columns }
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Look up a column, ignoring ASCII case.
    pub fn find(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
