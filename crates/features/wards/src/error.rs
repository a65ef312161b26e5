use std::borrow::Cow;

/// A specialized [`WardsError`] enum of this crate.
#[agrisk_derive::agrisk_error]
pub enum WardsError {
    #[error("Ward not found{}: {name}", format_context(.context))]
    NotFound { name: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Internal wards error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
