use agrisk_logger::{LevelFilter, Logger, LoggerError, parse_level};

#[test]
fn console_only_logger_has_no_guard_and_cannot_init_twice() {
    let level = parse_level("info").expect("valid level");
    let logger = Logger::builder()
        .name("agrisk-console-only")
        .console(true)
        .level(level)
        .init()
        .expect("logger should initialize");

    assert!(logger.guard().is_none(), "console-only logger should not create a file guard");

    let err = Logger::builder()
        .name("agrisk-console-only-second")
        .level(LevelFilter::INFO)
        .init()
        .expect_err("second init should fail");

    assert!(matches!(err, LoggerError::Subscriber { .. }));
}
