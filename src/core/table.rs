use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::record::{DataSet, Record};
use crate::error::{WidgetError, WidgetResult};

/// Table-like input: named columns and rows in a stable order.
///
/// Every row carries exactly one value per column. Column names are unique.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTable {
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<Value>>,
}

impl TryFrom<RawTable> for Table {
    type Error = WidgetError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        let mut table = Self::new(raw.columns)?;
        for row in raw.rows {
            table.push_row(row)?;
        }
        Ok(table)
    }
}

impl Table {
    pub fn new<I, S>(columns: I) -> WidgetResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        for (index, name) in columns.iter().enumerate() {
            if columns[..index].contains(name) {
                return Err(WidgetError::InvalidTable(format!(
                    "duplicate column `{name}`"
                )));
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    /// Builds a table from column-major data.
    pub fn from_columns<S>(columns: Vec<(S, Vec<Value>)>) -> WidgetResult<Self>
    where
        S: Into<String>,
    {
        let mut names = Vec::with_capacity(columns.len());
        let mut values = Vec::with_capacity(columns.len());
        for (name, column) in columns {
            names.push(name.into());
            values.push(column);
        }

        let height = values.first().map_or(0, Vec::len);
        if let Some((index, column)) = values
            .iter()
            .enumerate()
            .find(|(_, column)| column.len() != height)
        {
            return Err(WidgetError::InvalidTable(format!(
                "column `{}` has {} values, expected {height}",
                names[index],
                column.len()
            )));
        }

        let mut table = Self::new(names)?;
        let mut iters: Vec<_> = values.into_iter().map(Vec::into_iter).collect();
        for _ in 0..height {
            let row = iters.iter_mut().filter_map(Iterator::next).collect();
            table.rows.push(row);
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> WidgetResult<()> {
        if row.len() != self.columns.len() {
            return Err(WidgetError::InvalidTable(format!(
                "row {} has {} values, expected {}",
                self.rows.len(),
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn with_row(mut self, row: Vec<Value>) -> WidgetResult<Self> {
        self.push_row(row)?;
        Ok(self)
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<Record> {
        self.rows.get(index).map(|row| self.zip_row(row))
    }

    /// Iterates rows as records, in row order.
    pub fn iter_records(&self) -> impl Iterator<Item = Record> + '_ {
        self.rows.iter().map(|row| self.zip_row(row))
    }

    /// Converts to one record per row, preserving row and column order.
    #[must_use]
    pub fn to_records(&self) -> DataSet {
        DataSet::from_records(self.iter_records().collect())
    }

    fn zip_row(&self, row: &[Value]) -> Record {
        self.columns
            .iter()
            .cloned()
            .zip(row.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn duplicate_columns_are_rejected() {
        assert!(Table::new(["a", "b", "a"]).is_err());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let mut table = Table::new(["a", "b"]).expect("table");
        assert!(table.push_row(vec![json!(1)]).is_err());
        assert_eq!(table.height(), 0);
    }

    #[test]
    fn from_columns_rejects_uneven_lengths() {
        let err = Table::from_columns(vec![
            ("label", vec![json!("a"), json!("b")]),
            ("value", vec![json!(1)]),
        ])
        .expect_err("uneven columns");
        assert!(err.to_string().contains("value"));
    }

    #[test]
    fn deserialization_revalidates_rows() {
        let parsed: Result<Table, _> =
            serde_json::from_value(json!({"columns": ["a"], "rows": [[1, 2]]}));
        assert!(parsed.is_err());
    }
}
