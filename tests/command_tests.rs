use std::fs;
use std::path::Path;
use edge_graph::chart::{ChartConfig, ChartStyle};
use edge_graph::commands::{execute_graph, GraphArgs};
use edge_graph::output::read_series;

fn write_csv(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_graph_single_file() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(dir.path(), "edges.csv", "1,7,100\n1,8,20\n2,7,90\n2,8,40\n");

    let args = GraphArgs {
        input: dir.path().join("edges.csv"),
        ..Default::default()
    };
    let report = execute_graph(&args).unwrap();

    let chart = dir.path().join("edges.svg");
    assert_eq!(report.charts, vec![chart.clone()]);
    let svg = fs::read_to_string(chart).unwrap();
    assert!(svg.contains("Value weight at time"));
}

#[test]
fn test_graph_directory_writes_one_chart_per_csv() {
    let dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_csv(dir.path(), "edges_0.csv", "1,a,1\n2,a,2\n");
    write_csv(dir.path(), "edges_1.csv", "1,b,3\n1,c,4\n");
    write_csv(dir.path(), "readme.txt", "not a csv");

    let args = GraphArgs {
        input: dir.path().to_path_buf(),
        output_dir: Some(out.path().to_path_buf()),
        chart: ChartConfig::new().with_style(ChartStyle::Bar),
        write_json: true,
        ..Default::default()
    };
    let report = execute_graph(&args).unwrap();

    assert_eq!(
        report.charts,
        vec![out.path().join("edges_0.svg"), out.path().join("edges_1.svg")]
    );
    assert_eq!(report.exports.len(), 2);
    assert!(report.skipped.is_empty());

    let export = read_series(out.path().join("edges_1.json")).unwrap();
    assert_eq!(export.timestamps, vec!["1"]);
    assert_eq!(export.series[1].category, "c");
}

#[test]
fn test_graph_empty_file_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(dir.path(), "empty.csv", "");

    let args = GraphArgs {
        input: dir.path().join("empty.csv"),
        ..Default::default()
    };
    let report = execute_graph(&args).unwrap();

    assert!(report.charts.is_empty());
    assert_eq!(report.skipped, vec![dir.path().join("empty.csv")]);
    assert!(!dir.path().join("empty.svg").exists());
}

#[test]
fn test_graph_malformed_row_aborts() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(dir.path(), "bad.csv", "1,a,1\n2,a\n");

    let args = GraphArgs {
        input: dir.path().join("bad.csv"),
        ..Default::default()
    };
    let err = execute_graph(&args).unwrap_err();

    assert!(format!("{:#}", err).contains("expected 3 fields, found 2"));
}

#[test]
fn test_graph_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let args = GraphArgs {
        input: dir.path().join("edges.csv"),
        ..Default::default()
    };

    assert!(execute_graph(&args).is_err());
}
