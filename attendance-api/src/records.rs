use serde_json::{Map, Value};

/// A column/row table of display strings.
///
/// Built either from a JSON listing returned by the backend or from the
/// reshaped attendance export. Column order is the order in which keys are
/// first seen, so rows with differing keys still line up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RecordTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Reshape an arbitrary JSON response. Arrays of objects become one row
    /// per object; a lone object becomes a single row; `null` and empty
    /// arrays become an empty table; scalars become a single `value` cell.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::default(),
            Value::Array(items) => Self::from_items(items),
            Value::Object(obj) => Self::from_objects(std::iter::once(obj)),
            scalar => Self::new(vec!["value".to_string()], vec![vec![cell_text(scalar)]]),
        }
    }

    fn from_items(items: &[Value]) -> Self {
        if items.iter().all(Value::is_object) {
            return Self::from_objects(items.iter().filter_map(Value::as_object));
        }

        Self::new(
            vec!["value".to_string()],
            items.iter().map(|v| vec![cell_text(v)]).collect(),
        )
    }

    fn from_objects<'a>(objects: impl Iterator<Item = &'a Map<String, Value>> + Clone) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for obj in objects.clone() {
            for key in obj.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = objects
            .map(|obj| {
                columns
                    .iter()
                    .map(|col| obj.get(col).map(cell_text).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested => nested.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn columns_follow_first_appearance() {
        let value = json!([
            {"id": 1, "name": "Asha", "email": "asha@example.com"},
            {"id": 2, "name": "Ravi", "is_active": false},
        ]);
        let table = RecordTable::from_json(&value);

        assert_eq!(table.columns, vec!["id", "name", "email", "is_active"]);
        assert_eq!(
            table.rows,
            vec![
                vec!["1", "Asha", "asha@example.com", ""],
                vec!["2", "Ravi", "", "false"],
            ]
        );
    }

    #[test]
    fn empty_and_null_responses_are_empty() {
        assert!(RecordTable::from_json(&json!([])).is_empty());
        assert!(RecordTable::from_json(&Value::Null).is_empty());
    }

    #[test]
    fn single_object_is_one_row() {
        let table = RecordTable::from_json(&json!({"message": "ok", "count": 3}));
        assert_eq!(table.columns, vec!["message", "count"]);
        assert_eq!(table.rows, vec![vec!["ok", "3"]]);
    }

    #[test]
    fn nested_values_render_as_json() {
        let table = RecordTable::from_json(&json!([{"meta": {"a": 1}}]));
        assert_eq!(table.rows[0][0], r#"{"a":1}"#);
    }
}
