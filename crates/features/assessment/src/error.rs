use std::borrow::Cow;

/// A specialized [`AssessmentError`] enum of this crate.
#[agrisk_derive::agrisk_error]
pub enum AssessmentError {
    /// Invalid assessment configuration.
    #[error("Assessment config error{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal assessment error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
