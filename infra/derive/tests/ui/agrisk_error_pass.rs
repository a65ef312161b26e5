use agrisk_derive::agrisk_error;
use std::borrow::Cow;

#[agrisk_error]
pub enum ArtifactError {
    #[error("Artifact I/O error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Unsupported artifact{}: {message}", format_context(.context))]
    Unsupported { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read(path: &str) -> Result<Vec<u8>, ArtifactError> {
    std::fs::read(path).context("Reading artifact")
}

fn main() {
    let _ = read("missing.bin");
    let _: ArtifactError = "fallback".into();
}
