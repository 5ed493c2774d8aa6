//! Resource handling for IMS LTI Assignment & Grade Services.
//!
//! The protocol core (`error`, `scope`, `url`, `resource`, `repository`)
//! is pure and synchronous apart from the repository contracts. The
//! `backend` feature adds the platform-side HTTP server (`api`) and the
//! tool-side service clients (`client`).

pub mod error;
pub mod repository;
pub mod resource;
pub mod scope;
pub mod url;

#[cfg(feature = "backend")]
pub mod api;
#[cfg(feature = "backend")]
pub mod client;


pub use error::{AgsError, AgsResult};
