use chrono::NaiveDate;
use srm_model::{
    CellValue, ColumnMapping, ColumnRename, FieldSpec, Grid, ModelError, Record, ScalarKind,
    SchemaFile, Value, record_schema,
};

#[derive(Debug, Default, PartialEq)]
struct Shipment {
    id: u32,
    destination: String,
    weight: Option<f64>,
    shipped: Option<NaiveDate>,
    fragile: bool,
}

record_schema!(Shipment {
    id: u32,
    destination as "Destination": String,
    weight: Option<f64>,
    shipped: Option<NaiveDate>,
    fragile: bool,
});

#[test]
fn record_schema_macro_declares_fields_in_order() {
    let schema = Shipment::schema();
    assert_eq!(
        schema.field_names(),
        vec!["id", "Destination", "weight", "shipped", "fragile"]
    );
    let kinds: Vec<ScalarKind> = schema.fields().iter().map(|f| f.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            ScalarKind::Int,
            ScalarKind::Text,
            ScalarKind::Float,
            ScalarKind::Date,
            ScalarKind::Bool
        ]
    );
    assert!(schema.fields()[2].is_nullable());
    assert!(schema.validate().is_ok());
}

#[test]
fn record_schema_setters_write_through() {
    let schema = Shipment::schema();
    let mut record = schema.instantiate();
    let shipped = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    schema.fields()[0].assign(&mut record, Value::Int(12)).unwrap();
    schema.fields()[1]
        .assign(&mut record, Value::Text("Oslo".into()))
        .unwrap();
    schema.fields()[3]
        .assign(&mut record, Value::Date(shipped))
        .unwrap();

    assert_eq!(
        record,
        Shipment {
            id: 12,
            destination: "Oslo".into(),
            weight: None,
            shipped: Some(shipped),
            fragile: false,
        }
    );
    assert_eq!(schema.fields()[2].read(&record), Value::Null);
}

#[test]
fn schema_file_builds_dynamic_schema() {
    let file = SchemaFile::new(vec![
        FieldSpec::new("sku", ScalarKind::Text),
        FieldSpec::new("qty", ScalarKind::Int),
        FieldSpec::new("sku", ScalarKind::Float),
    ]);
    let schema = file.schema();
    assert_eq!(schema.len(), 3);
    assert_eq!(
        schema.validate(),
        Err(ModelError::DuplicateField { name: "sku".into() })
    );
}

#[test]
fn column_mapping_loads_from_json() {
    let mapping: ColumnMapping = serde_json::from_str(
        r#"[{"column":"Part No","field":"sku"},{"column":"Count","field":"qty"}]"#,
    )
    .expect("parse mapping");
    assert_eq!(mapping.len(), 2);
    assert_eq!(
        mapping.iter().next(),
        Some(&ColumnRename::new("Part No", "sku"))
    );
}

#[test]
fn grid_serializes_tagged_cells() {
    let grid = Grid::with_header(
        vec!["a".into(), "b".into()],
        vec![vec![CellValue::Int(1), CellValue::Missing]],
    );
    let json = serde_json::to_string(&grid).expect("serialize grid");
    assert_eq!(
        json,
        r#"{"header":["a","b"],"rows":[[{"kind":"Int","value":1},{"kind":"Missing"}]]}"#
    );
    let back: Grid = serde_json::from_str(&json).expect("deserialize grid");
    assert_eq!(back, grid);
}
