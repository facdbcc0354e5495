//! Remote access to a MovieLibrary REST server
//!
//! [`RemoteLibraryAccess`] mirrors the local catalog operations over HTTP.
//! Titles are percent-encoded into the request path, and error statuses
//! come back as [`NetworkError`] variants.

mod client;
mod error;

pub use client::{ClientConfig, RemoteLibraryAccess};
pub use error::{NetworkError, NetworkResult};
