use serde::{Deserialize, Serialize};

/// Loosely-typed, insertion-ordered map handed to serializers.
pub type DynamicMap = serde_json::Map<String, serde_json::Value>;

/// One selected (and possibly converted) field of a source object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub key: Option<String>,
    pub value: serde_json::Value,
}

impl FieldRecord {
    pub fn new(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: Some(key.into()),
            value,
        }
    }
}

/// Ordered rows of field records, one row per shaped source object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapedCollection {
    rows: Vec<Vec<FieldRecord>>,
}

impl ShapedCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Vec<FieldRecord>>) -> Self {
        Self { rows }
    }

    pub fn push_row(&mut self, row: Vec<FieldRecord>) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Vec<FieldRecord>] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vec<FieldRecord>> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Vec<FieldRecord>> {
        self.rows
    }
}

impl<'a> IntoIterator for &'a ShapedCollection {
    type Item = &'a Vec<FieldRecord>;
    type IntoIter = std::slice::Iter<'a, Vec<FieldRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl From<Vec<Vec<FieldRecord>>> for ShapedCollection {
    fn from(rows: Vec<Vec<FieldRecord>>) -> Self {
        Self::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_serializes_as_nested_arrays() {
        let mut collection = ShapedCollection::new();
        collection.push_row(vec![FieldRecord::new("id", json!(1))]);

        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value, json!([[{"key": "id", "value": 1}]]));
    }

    #[test]
    fn test_push_row_keeps_order() {
        let mut collection = ShapedCollection::new();
        collection.push_row(vec![FieldRecord::new("a", json!(1))]);
        collection.push_row(vec![FieldRecord::new("a", json!(2))]);

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.rows()[1][0].value, json!(2));
    }
}
