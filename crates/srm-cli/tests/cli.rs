//! End-to-end tests for argument parsing and the command runners.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use srm_cli::cli::{Cli, Command, LogFormatArg, MapArgs, SourceArgs, parse_sheet};
use srm_cli::commands::{MapOutcome, run_convert, run_inspect, run_map};
use srm_ingest::{SheetSelector, read_sheet};
use srm_model::CellValue;
use tempfile::TempDir;

const SCHEMA: &str = r#"{
  "fields": [
    { "name": "id", "kind": "int" },
    { "name": "name", "kind": "text" },
    { "name": "joined", "kind": "date", "optional": true }
  ]
}"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn map_args(input: &Path, schema: &Path) -> MapArgs {
    MapArgs {
        input: input.to_path_buf(),
        schema: schema.to_path_buf(),
        mapping: None,
        source: SourceArgs {
            sheet: None,
            no_header: false,
        },
        allow_empty: false,
        output: None,
    }
}

#[test]
fn parses_map_command() {
    let cli = Cli::try_parse_from([
        "srm",
        "map",
        "people.xlsx",
        "--schema",
        "schema.json",
        "--sheet",
        "2",
        "--log-format",
        "json",
        "-o",
        "out.json",
    ])
    .unwrap();

    assert!(matches!(cli.log_format, LogFormatArg::Json));
    let Command::Map(args) = cli.command else {
        panic!("expected map command");
    };
    assert_eq!(args.schema, PathBuf::from("schema.json"));
    assert_eq!(args.source.sheet, Some(SheetSelector::Index(1)));
    assert!(args.source.has_header());
    assert_eq!(args.output, Some(PathBuf::from("out.json")));
}

#[test]
fn map_requires_schema() {
    assert!(Cli::try_parse_from(["srm", "map", "people.csv"]).is_err());
}

#[test]
fn parses_sheet_selector() {
    assert_eq!(parse_sheet("1"), Ok(SheetSelector::Index(0)));
    assert_eq!(parse_sheet("Staff"), Ok(SheetSelector::Name("Staff".into())));
    assert_eq!(parse_sheet("Q3 2024"), Ok(SheetSelector::Name("Q3 2024".into())));
    assert!(parse_sheet("0").is_err());
    assert!(parse_sheet("  ").is_err());
}

#[test]
fn map_renders_records_as_json() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "people.csv", "id,name,joined\n1,Ada,2024-03-15\n2,Grace,\n");
    let schema = write(&dir, "schema.json", SCHEMA);

    let outcome = run_map(&map_args(&input, &schema)).unwrap();
    let MapOutcome::Mapped { records, json, .. } = outcome else {
        panic!("expected mapped outcome");
    };
    assert_eq!(records, 2);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            { "id": 1, "name": "Ada", "joined": "2024-03-15" },
            { "id": 2, "name": "Grace", "joined": null }
        ])
    );
}

#[test]
fn map_applies_mapping_file_and_writes_output() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "people.csv", "Employee ID,Full Name\n7,Linus\n");
    let schema = write(
        &dir,
        "schema.json",
        r#"{"fields":[{"name":"id","kind":"int"},{"name":"name","kind":"text"}]}"#,
    );
    let mapping = write(
        &dir,
        "mapping.json",
        r#"[{"column":"Employee ID","field":"id"},{"column":"Full Name","field":"name"}]"#,
    );
    let output = dir.path().join("people.json");

    let mut args = map_args(&input, &schema);
    args.mapping = Some(mapping);
    args.output = Some(output.clone());

    let outcome = run_map(&args).unwrap();
    assert!(matches!(outcome, MapOutcome::Mapped { records: 1, .. }));
    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written, serde_json::json!([{ "id": 7, "name": "Linus" }]));
}

#[test]
fn map_reports_every_failed_cell() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "people.csv", "id,name,joined\nx,Ada,2024-03-15\n2,Grace,soon\n");
    let schema = write(&dir, "schema.json", SCHEMA);

    let outcome = run_map(&map_args(&input, &schema)).unwrap();
    let MapOutcome::Failed { failures } = outcome else {
        panic!("expected failed outcome");
    };
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].row, 0);
    assert_eq!(failures[0].field, "id");
    assert_eq!(failures[1].row, 1);
    assert_eq!(failures[1].column, "joined");
}

#[test]
fn map_without_header_matches_by_position() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "people.csv", "3,Edsger\n");
    let schema = write(&dir, "schema.json", SCHEMA);

    let mut args = map_args(&input, &schema);
    args.source.no_header = true;
    let MapOutcome::Mapped { json, .. } = run_map(&args).unwrap() else {
        panic!("expected mapped outcome");
    };
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{ "id": 3, "name": "Edsger", "joined": null }])
    );
}

#[test]
fn map_fails_when_mapping_names_missing_column() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "people.csv", "id,surname\n1,Hopper\n");
    let schema = write(&dir, "schema.json", SCHEMA);
    let mapping = write(&dir, "mapping.json", r#"[{"column":"identifier","field":"id"}]"#);

    let mut args = map_args(&input, &schema);
    args.mapping = Some(mapping);
    let error = run_map(&args).unwrap_err();
    assert!(format!("{error:#}").contains("'identifier'"));
}

#[test]
fn convert_csv_to_xlsx_and_inspect() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "people.csv", "id,name\n1,Ada\n2,Grace\n");
    let output = dir.path().join("people.xlsx");

    let cli = Cli::try_parse_from([
        "srm",
        "convert",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--sheet-name",
        "People",
    ])
    .unwrap();
    let Command::Convert(args) = cli.command else {
        panic!("expected convert command");
    };
    let grid = run_convert(&args).unwrap();
    assert_eq!(grid.height(), 2);

    let sheet = read_sheet(&output, &SheetSelector::Name("People".into()), true).unwrap();
    assert_eq!(sheet.header(), Some(&["id".to_string(), "name".to_string()][..]));
    assert_eq!(sheet.rows[1][1], CellValue::Text("Grace".into()));

    let cli = Cli::try_parse_from(["srm", "inspect", output.to_str().unwrap(), "--rows", "1"])
        .unwrap();
    let Command::Inspect(args) = cli.command else {
        panic!("expected inspect command");
    };
    assert_eq!(args.rows, 1);
    assert_eq!(run_inspect(&args).unwrap().height(), 2);
}

#[test]
fn sheet_flag_is_rejected_for_csv() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "people.csv", "id\n1\n");
    let cli = Cli::try_parse_from(["srm", "inspect", input.to_str().unwrap(), "--sheet", "1"])
        .unwrap();
    let Command::Inspect(args) = cli.command else {
        panic!("expected inspect command");
    };
    assert!(run_inspect(&args).is_err());
}
