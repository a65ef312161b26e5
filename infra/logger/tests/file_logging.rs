use agrisk_logger::{LevelFilter, Logger};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn file_logging_writes_json_lines() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let logger = Logger::builder()
        .name("agrisk-file-logging")
        .console(false)
        .level(LevelFilter::INFO)
        .path(&log_dir)
        .json(true)
        .init()?;

    tracing::info!(ward = "Chania Ward", probability = 0.475, "estimate computed");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let content = fs::read_to_string(&log_file)?;
    let line = content.lines().find(|l| l.contains("estimate computed")).expect("event logged");
    assert!(line.starts_with('{'), "file layer should emit JSON: {line}");
    assert!(line.contains("Chania Ward"));

    Ok(())
}
