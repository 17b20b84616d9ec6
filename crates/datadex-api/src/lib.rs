// datadex-api: Async Rust client for the data catalog frontend services
//
// One `CatalogClient` covers the metadata, search, preview, issue, mail,
// and announcement services. Endpoint groups live in their own modules as
// inherent methods; `client` owns transport and envelope handling.

pub mod announcements;
pub mod auth;
pub mod bookmarks;
pub mod client;
pub mod error;
pub mod issues;
pub mod mail;
pub mod metadata;
pub mod models;
pub mod preview;
pub mod search;
pub mod transport;
pub mod user;

pub use auth::Credentials;
pub use client::CatalogClient;
pub use error::Error;
pub use models::*;
pub use transport::{TlsMode, TransportConfig};
