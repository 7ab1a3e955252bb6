use question_reader::{logger, Config};

#[test]
fn test_log_file_is_appended() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("cohere_chat.log");
    std::fs::write(&log_path, "previous run\n").unwrap();

    let config = Config {
        log_file: log_path.to_string_lossy().into_owned(),
        ..Config::default()
    };

    let guard = logger::init(&config);
    tracing::error!("logging smoke test marker");
    drop(guard);

    let contents = std::fs::read_to_string(&log_path).unwrap();
    assert!(contents.starts_with("previous run"));
    assert!(contents.contains("logging smoke test marker"));
}
