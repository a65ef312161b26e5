use std::borrow::Cow;

/// A specialized [`HistoryError`] enum of this crate.
#[agrisk_derive::agrisk_error]
pub enum HistoryError {
    #[error("History config error{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Ward not found{}: {name}", format_context(.context))]
    UnknownWard { name: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
