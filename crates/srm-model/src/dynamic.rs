//! Records whose shape is described at runtime.
//!
//! The CLI maps files into [`DynamicRecord`]s built from a [`SchemaFile`],
//! which lists field names and kinds in JSON:
//!
//! ```json
//! { "fields": [ { "name": "id", "kind": "int" }, { "name": "note", "kind": "text", "optional": true } ] }
//! ```

use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::schema::{Field, Schema};
use crate::value::{ScalarKind, Value};

/// Declaration of one runtime field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: ScalarKind,
    /// Optional fields hold `null` for empty cells.
    #[serde(default)]
    pub optional: bool,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: false,
        }
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Runtime schema description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaFile {
    pub fields: Vec<FieldSpec>,
}

impl SchemaFile {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Builds the schema for [`DynamicRecord`]s of this shape.
    pub fn schema(&self) -> Schema<DynamicRecord> {
        let names: Arc<[String]> = self.fields.iter().map(|f| f.name.clone()).collect();
        let blanks: Vec<Value> = self
            .fields
            .iter()
            .map(|f| Value::default_for(f.kind, f.optional))
            .collect();
        let mut schema = Schema::new(move || DynamicRecord {
            names: Arc::clone(&names),
            values: blanks.clone(),
        });
        for (idx, spec) in self.fields.iter().enumerate() {
            schema.push(Field::dynamic(
                spec.name.clone(),
                spec.kind,
                spec.optional,
                move |record: &mut DynamicRecord, value| match record.values.get_mut(idx) {
                    Some(slot) => {
                        *slot = value;
                        Ok(())
                    }
                    None => Err(format!("record has no slot {idx}")),
                },
                move |record: &DynamicRecord| record.values.get(idx).cloned().unwrap_or(Value::Null),
            ));
        }
        schema
    }
}

/// A record holding one [`Value`] per runtime field.
///
/// Serializes as a JSON object in field order.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
    names: Arc<[String]>,
    values: Vec<Value>,
}

impl DynamicRecord {
    pub fn get(&self, name: &str) -> Option<&Value> {
        let idx = self.names.iter().position(|n| n == name)?;
        self.values.get(idx)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl Serialize for DynamicRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.names.iter().zip(&self.values) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SchemaFile {
        SchemaFile::new(vec![
            FieldSpec::new("id", ScalarKind::Int),
            FieldSpec::new("note", ScalarKind::Text).optional(),
            FieldSpec::new("seen", ScalarKind::Date),
        ])
    }

    #[test]
    fn test_blank_record_defaults() {
        let schema = sample().schema();
        let record = schema.instantiate();
        assert_eq!(record.get("id"), Some(&Value::Int(0)));
        assert_eq!(record.get("note"), Some(&Value::Null));
        assert_eq!(record.get("seen"), Some(&Value::Null));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_dynamic_fields_assign() {
        let schema = sample().schema();
        let mut record = schema.instantiate();
        schema.fields()[0].assign(&mut record, Value::Int(5)).unwrap();
        assert_eq!(schema.fields()[0].read(&record), Value::Int(5));
        assert_eq!(schema.fields()[1].kind(), ScalarKind::Text);
        assert!(schema.fields()[1].is_nullable());
    }

    #[test]
    fn test_schema_file_json() {
        let parsed: SchemaFile = serde_json::from_str(
            r#"{"fields":[{"name":"id","kind":"integer"},{"name":"at","kind":"datetime","optional":true}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.fields[0].kind, ScalarKind::Int);
        assert!(!parsed.fields[0].optional);
        assert_eq!(parsed.fields[1].kind, ScalarKind::DateTime);
        assert!(parsed.fields[1].optional);
    }

    #[test]
    fn test_record_serializes_in_field_order() {
        let schema = sample().schema();
        let mut record = schema.instantiate();
        schema.fields()[1]
            .assign(&mut record, Value::Text("hi".into()))
            .unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":0,"note":"hi","seen":null}"#);
    }
}
