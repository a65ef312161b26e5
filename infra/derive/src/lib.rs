#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the dashboard crates.
//!
//! * [`agrisk_error`] turns an enum into a `thiserror` error with context support.
//! * [`feature_slice`] wraps a feature's state into a cheap, shareable slice handle.
//! * [`api_model`] and [`api_handler`] keep DTOs and handlers consistent with `OpenAPI`.
//! * [`main`] bootstraps the Tokio runtime profile (re-exported by `agrisk-runtime`).
//!
//! Examples are `ignore`d because they need the consuming crates to compile.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro to bootstrap the dashboard's Tokio runtime.
///
/// Turns an `async fn main` returning a `Result` into a plain `fn main` that builds a
/// runtime from one of the `agrisk_runtime::RuntimeConfig` profiles.
///
/// # Arguments
///
/// * `single_threaded` - Current-thread scheduler (the default).
/// * `multi_threaded` - Work-stealing scheduler sized to the available parallelism.
///
/// # Examples
///
/// ```rust,ignore
/// #[agrisk_runtime::main(single_threaded)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Attribute macro for API data transfer objects.
///
/// Adds `Debug`, `Serialize` and `Deserialize` when missing, derives `utoipa::ToSchema`
/// when the consuming crate's `server` feature is enabled, and applies
/// `#[serde(rename_all = "camelCase", deny_unknown_fields)]`.
///
/// # Arguments
///
/// * `rename_all = "..."` - Overrides the camelCase policy.
/// * `deny_unknown_fields = false` - Accepts unknown fields.
///
/// # Example
///
/// ```rust,ignore
/// #[agrisk_derive::api_model]
/// pub struct WardSummary {
///     pub name: String,
///     pub avg_yield: f64,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro to bridge Axum handlers with `OpenAPI` documentation.
///
/// Accepts the `utoipa::path` arguments (`get`, `post`, `path = "..."`, `params(...)`,
/// `responses(...)`, `tag = ...`) and forwards them when the `server` feature is on.
///
/// # Example
///
/// ```rust,ignore
/// #[agrisk_derive::api_handler(
///     get,
///     path = "/api/wards",
///     responses((status = OK, body = [WardSummary])),
///     tag = WARDS_TAG,
/// )]
/// pub(crate) async fn list_wards(State(state): State<ApiState>) -> Json<Vec<WardSummary>> {
///     // ...
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Declares a domain error enum.
///
/// * Derives `Debug` and `thiserror::Error` unless already present.
/// * Generates a `<Name>Ext` trait adding `.context(...)` to `Result<T, Name>` and to
///   `Result<T, Source>` for every variant carrying a `source` field.
/// * Generates `From<Source>` for those variants.
/// * Generates `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * Generates a private `format_context` helper for use in `#[error(...)]` strings.
///
/// Variants must use named fields. Variants with a source must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[agrisk_derive::agrisk_error]
/// pub enum ArtifactError {
///     #[error("Artifact I/O error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &std::path::Path) -> Result<Vec<u8>, ArtifactError> {
///     std::fs::read(path).context("Reading model artifact")
/// }
/// ```
#[proc_macro_attribute]
pub fn agrisk_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Declares a feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` is generated as an `Arc`
/// wrapper that derefs to the inner state and implements
/// `agrisk_kernel::domain::registry::FeatureSlice`.
///
/// # Example
///
/// ```rust,ignore
/// #[agrisk_derive::feature_slice]
/// pub struct Wards {
///     pub registry: Arc<WardRegistry>,
/// }
///
/// let slice = Wards::new(WardsInner { registry });
/// ```
#[proc_macro_attribute]
pub fn feature_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
