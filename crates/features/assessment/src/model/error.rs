use std::borrow::Cow;

/// Failures while reading a classifier artifact from disk.
#[agrisk_derive::agrisk_error]
pub enum ArtifactError {
    #[error("Artifact I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },
    #[error("Artifact JSON error{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },
    #[error("Artifact binary error{}: {source}", format_context(.context))]
    Binary { source: postcard::Error, context: Option<Cow<'static, str>> },
}
