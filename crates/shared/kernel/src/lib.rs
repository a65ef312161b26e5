//! Kernel utilities shared across slices.
//! Keep this crate lightweight: layered config loading, the shared API state and the
//! HTTP plumbing every feature router relies on.
//!
//! ## Config loading
//! ```rust,ignore
//! use agrisk_kernel::config::{DEFAULT_CONFIG_FILE, load_config};
//! let cfg: agrisk_kernel::domain::config::DashboardConfig =
//!     load_config(Some(DEFAULT_CONFIG_FILE)).unwrap();
//! ```
pub mod config;
pub mod prelude;
pub mod random;
#[cfg(feature = "server")]
pub mod server;

pub use agrisk_domain as domain;
