use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of chart input: column name to scalar value, in column order.
pub type Record = Map<String, Value>;

/// Ordered sequence of row records as held by a synchronized data field.
///
/// Entries are kept exactly as supplied. Sequences coming from a `Table` are
/// uniform objects; sequences supplied by the host pass through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataSet(Vec<Value>);

impl DataSet {
    #[must_use]
    pub fn new(rows: Vec<Value>) -> Self {
        Self(rows)
    }

    #[must_use]
    pub fn from_records(records: Vec<Record>) -> Self {
        Self(records.into_iter().map(Value::Object).collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// Entries that are JSON objects, in order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.0.iter().filter_map(Value::as_object)
    }

    /// Union of record keys in first-seen order.
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for record in self.records() {
            for key in record.keys() {
                if !names.iter().any(|name| name == key) {
                    names.push(key.clone());
                }
            }
        }
        names
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Array(self.0.clone())
    }
}

impl From<Vec<Value>> for DataSet {
    fn from(rows: Vec<Value>) -> Self {
        Self(rows)
    }
}

impl From<Vec<Record>> for DataSet {
    fn from(records: Vec<Record>) -> Self {
        Self::from_records(records)
    }
}

impl<'a> IntoIterator for &'a DataSet {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
