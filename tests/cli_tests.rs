use std::fs;
use std::process::Command;
use station_aggregator::ProcessingError;
use tempfile::TempDir;

fn aggregator() -> Command {
    Command::new(env!("CARGO_BIN_EXE_station-aggregator"))
}

#[test]
fn test_cli_process_writes_report() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = temp_dir.path().join("measurements.txt");
    let output = temp_dir.path().join("result.txt");
    fs::write(&input, b"A;1.0\nB;2.0\nA;3.0\n").unwrap();

    let status = aggregator()
        .args(["-q", "process", "-w", "2", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .status()
        .unwrap();

    assert!(status.success());
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "{A=1.0/2.0/3.0, B=2.0/2.0/2.0}"
    );
}

#[test]
fn test_cli_failure_reported_once() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = temp_dir.path().join("empty.txt");
    let output = temp_dir.path().join("result.txt");
    fs::write(&input, b"").unwrap();

    let result = aggregator()
        .args(["-q", "process", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(1));
    assert!(!output.exists());

    let stderr = String::from_utf8_lossy(&result.stderr);
    let message = ProcessingError::EmptyResult.to_string();
    assert_eq!(stderr.matches(message.as_str()).count(), 1, "stderr: {}", stderr);
}
