use agrisk_derive::agrisk_error;
use std::borrow::Cow;

#[agrisk_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn missing_file() -> Result<(), DemoError> {
    std::fs::read("/definitely/not/here.bin").context("Loading model artifact")?;
    Ok(())
}

#[test]
fn agrisk_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/agrisk_error_pass.rs");
}

#[test]
fn source_errors_convert_with_context() {
    let err = missing_file().expect_err("file must not exist");
    assert!(matches!(err, DemoError::Io { context: Some(_), .. }));
    assert!(err.to_string().starts_with("IO error (Loading model artifact): "));
}

#[test]
fn context_is_attached_to_existing_errors() {
    let res: Result<(), DemoError> =
        Err(DemoError::Rejected { message: "bad input".into(), context: None });
    let err = res.context("Validating observation").expect_err("error must survive");
    assert_eq!(err.to_string(), "Rejected (Validating observation): bad input");
}

#[test]
fn strings_map_to_internal_variant() {
    let err: DemoError = "unexpected state".into();
    assert_eq!(err.to_string(), "Internal error: unexpected state");

    let err: DemoError = format!("code {}", 7).into();
    assert!(matches!(err, DemoError::Internal { .. }));
}
