use agrisk_kernel::config::{env_layer, load_config, load_config_with};
use agrisk_kernel::domain::config::DashboardConfig;
use std::collections::HashMap;
use std::io::Write;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn file_values_are_loaded() {
    let file = write_config(
        r#"
        [server]
        port = 9000

        [model]
        path = "models/stress.json"

        [history]
        seed = 11
        "#,
    );

    let cfg: DashboardConfig = load_config(Some(file.path())).expect("config loads");
    assert_eq!(cfg.server.port, 9000);
    assert_eq!(cfg.model.path.as_deref(), Some(std::path::Path::new("models/stress.json")));
    assert_eq!(cfg.history.seed, Some(11));
    assert_eq!(cfg.history.first_year, 2018);
}

#[test]
fn environment_overrides_file() {
    let file = write_config("[assessment]\nclamp_probability = false\n");
    let vars = HashMap::from([
        ("AGRISK__ASSESSMENT__CLAMP_PROBABILITY".to_owned(), "true".to_owned()),
        ("AGRISK__SERVER__PORT".to_owned(), "8081".to_owned()),
    ]);

    let cfg: DashboardConfig =
        load_config_with(Some(file.path()), env_layer().source(Some(vars))).expect("config loads");
    assert!(cfg.assessment.clamp_probability);
    assert_eq!(cfg.server.port, 8081);
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent.toml");
    let res: Result<DashboardConfig, _> = load_config(Some(missing));
    assert!(res.is_err());
}

#[test]
fn malformed_values_are_reported() {
    let file = write_config("[server]\nport = \"not-a-port\"\n");
    let err = load_config::<DashboardConfig>(Some(file.path())).expect_err("port must be numeric");
    assert!(err.to_string().contains("Failed to deserialize config"));
}
