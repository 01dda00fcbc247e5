//! builder — the reusable core of a client-side resume/CV/portfolio builder.
//!
//! The crate owns everything between the form controls and the backend: a
//! schema-checked document model with a closed mutation set
//! ([`document`]), the static template catalog ([`catalog`]), an HTTP
//! client for the persistence gateway ([`gateway`]), a durable draft cache
//! ([`cache`]), submit-time validation and the session that ties them
//! together ([`session`]), and a markdown renderer ([`render`]). It draws
//! no UI and serves no HTTP; a frontend binds controls to a
//! [`FormSession`] and the crate does the rest.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod document;
pub mod errors;
pub mod gateway;
pub mod render;
pub mod session;

pub use config::Config;
pub use document::{Document, DocumentError, DocumentKind, Edit, FieldValue};
pub use errors::BuilderError;
pub use session::FormSession;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the process-wide tracing subscriber: `RUST_LOG` when set,
/// otherwise this crate at `default_filter`. Call once at startup; the
/// library never installs one on its own.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), default_filter))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
