//! Schema-stable result tables.
//!
//! Every engine operation returns a [`Table`]: a list of typed rows plus the
//! fixed, ordered column names of that row type. An empty table still carries
//! its columns, so callers never have to special-case "no data".
//!
//! ```text
//! {"columns": ["month", "total_consumption"], "rows": []}
//! ```

use polars::prelude::{DataFrame, PolarsResult};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// A row type with a fixed column schema.
pub trait TableRow: Sized {
    /// Column names, in output order.
    const COLUMNS: &'static [&'static str];

    /// Build a DataFrame holding `rows`, with exactly [`Self::COLUMNS`].
    fn to_frame(rows: &[Self]) -> PolarsResult<DataFrame>;
}

/// Ordered rows of a single [`TableRow`] type.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T> {
    rows: Vec<T>,
}

impl<T: TableRow> Table<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        T::COLUMNS
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        T::to_frame(&self.rows)
    }
}

impl<T: TableRow> Default for Table<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: TableRow> FromIterator<T> for Table<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Table<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl<T: TableRow + Serialize> Serialize for Table<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Table", 2)?;
        state.serialize_field("columns", T::COLUMNS)?;
        state.serialize_field("rows", &self.rows)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Reading {
        label: String,
        value: f64,
    }

    impl TableRow for Reading {
        const COLUMNS: &'static [&'static str] = &["label", "value"];

        fn to_frame(rows: &[Self]) -> PolarsResult<DataFrame> {
            let labels: Vec<String> = rows.iter().map(|r| r.label.clone()).collect();
            let values: Vec<f64> = rows.iter().map(|r| r.value).collect();
            polars::df!("label" => labels, "value" => values)
        }
    }

    #[test]
    fn test_empty_table_keeps_columns() {
        let table: Table<Reading> = Table::empty();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["columns"], serde_json::json!(["label", "value"]));
        assert_eq!(json["rows"], serde_json::json!([]));
    }

    #[test]
    fn test_empty_dataframe_has_schema() {
        let table: Table<Reading> = Table::empty();
        let df = table.to_dataframe().unwrap();
        assert_eq!(df.height(), 0);
        let names: Vec<String> = df.get_column_names().iter().map(|n| n.to_string()).collect();
        assert_eq!(names, vec!["label", "value"]);
    }

    #[test]
    fn test_collect_into_table() {
        let table: Table<Reading> = (0..3)
            .map(|i| Reading {
                label: format!("r{}", i),
                value: i as f64,
            })
            .collect();
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[2].label, "r2");
    }
}
