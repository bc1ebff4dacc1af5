use crate::unit::common::fixture_path;
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;
use velodegree::{ConfigError, DegreeError, MedianDegreePipeline, PipelineConfig};

#[test]
fn test_venmo_fixture_matches_expected_output() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("venmo_output").join("output.txt");

    let config = PipelineConfig::new()
        .with_input(fixture_path("venmo-trans.txt"))
        .with_output(&output);
    let mut pipeline = MedianDegreePipeline::new(config).unwrap();
    let stats = pipeline.run_files().unwrap();

    let expected = fs::read_to_string(fixture_path("expected-output.txt")).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), expected);

    assert_eq!(stats.records, 9);
    assert_eq!(stats.stale_dropped, 1);
    assert_eq!(stats.evictions, 6);
    assert_eq!(stats.empty_outputs, 0);
    assert_eq!(stats.peak_active_edges, 4);
    assert_eq!(pipeline.cache().active_edges(), 1);
}

#[test]
fn test_yaml_config_with_custom_fields() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("medians.txt");

    let config = PipelineConfig::from_yaml_file(fixture_path("ledger-epoch.yaml"))
        .unwrap()
        .with_input(fixture_path("ledger-epoch.txt"))
        .with_output(&output);
    assert_eq!(config.window_size, 30);

    let mut pipeline = MedianDegreePipeline::new(config).unwrap();
    let stats = pipeline.run_files().unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "-\n1.00\n1.00\n1.50\n1.00\n"
    );
    assert_eq!(stats.records, 5);
    assert_eq!(stats.empty_outputs, 1);
    assert_eq!(pipeline.reducer().degree_of(&"4".to_string()), Some(1));
}

#[test]
fn test_config_file_written_at_runtime() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("velo-degree.yaml");
    let output = temp_dir.path().join("out").join("medians.txt");
    fs::write(
        &config_path,
        format!(
            "window_size: 1\ninput: {}\noutput: {}\n",
            fixture_path("venmo-trans.txt").display(),
            output.display()
        ),
    )
    .unwrap();

    let config = PipelineConfig::from_yaml_file(&config_path).unwrap();
    MedianDegreePipeline::new(config).unwrap().run_files().unwrap();

    // Only same-second edges share a one-second window
    let lines: Vec<String> = fs::read_to_string(&output)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(lines.len(), 9);
    assert!(lines.iter().all(|line| line == "1.00"));
}

#[test]
fn test_missing_config_file() {
    let err = PipelineConfig::from_yaml_file("/nonexistent/velo-degree.yaml").unwrap_err();
    assert!(err.to_string().contains("File not found"));
}

#[test]
fn test_missing_input_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let config = PipelineConfig::new()
        .with_input(temp_dir.path().join("absent.txt"))
        .with_output(temp_dir.path().join("output.txt"));

    let err = MedianDegreePipeline::new(config)
        .unwrap()
        .run_files()
        .unwrap_err();
    assert!(matches!(err, DegreeError::Io { .. }));
    assert!(!temp_dir.path().join("output.txt").exists());
}

#[test]
fn test_invalid_window_from_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bad.yaml");
    fs::write(&config_path, "window_size: -10\n").unwrap();

    let err = PipelineConfig::from_yaml_file(&config_path).unwrap_err();
    assert!(err.to_string().contains("-10"));
}

#[test]
fn test_oversized_window_rejected_before_allocation() {
    let config = PipelineConfig::new().with_window_size(i64::MAX);
    let err = MedianDegreePipeline::new(config).err().unwrap();
    assert!(matches!(
        err,
        DegreeError::Config(ConfigError::WindowTooLarge { size: i64::MAX, .. })
    ));
}

#[test]
fn test_run_stops_at_first_bad_record() {
    let input = concat!(
        r#"{"created_time": "2016-03-29T02:05:17Z", "target": "b", "actor": "a"}"#,
        "\n",
        r#"{"created_time": "2016-03-29T02:05:18Z", "target": "c", "actor": "a"}"#,
        "\n",
        r#"{"created_time": "yesterday", "target": "d", "actor": "a"}"#,
        "\n",
        r#"{"created_time": "2016-03-29T02:05:19Z", "target": "e", "actor": "a"}"#,
        "\n",
    );
    let mut pipeline = MedianDegreePipeline::new(PipelineConfig::default()).unwrap();
    let mut output = Vec::new();

    let err = pipeline.run(Cursor::new(input), &mut output).unwrap_err();
    assert!(matches!(err, DegreeError::Datasource(ref e) if e.line() == 3));
    assert_eq!(String::from_utf8(output).unwrap(), "1.00\n1.00\n");
    assert_eq!(pipeline.stats().records, 2);
}
