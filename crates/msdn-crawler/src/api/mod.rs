//! Catalog site API.
//!
//! Transport, wire types and decoders for the root page and the four
//! form-POST JSON endpoints, plus a client tying them together per level.

pub mod client;
pub mod decode;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{id_form, listing_form, CatalogClient};
pub use error::{FetchError, Resource};
pub use transport::{Headers, HttpTransport, Request, Transport};
pub use types::*;
