//! Tool-side AGS clients.
//!
//! The service clients build endpoint URLs and wire bodies; the actual
//! HTTP exchange goes through a [`ServiceClient`], by default
//! [`HttpServiceClient`] on reqwest.

mod error;
mod line_items;
mod results;
mod scores;
mod service;


pub use error::{ClientError, ClientResult};
pub use line_items::{LineItemFilter, LineItemServiceClient};
pub use results::ResultServiceClient;
pub use scores::ScoreServiceClient;
pub use service::{
    AccessTokenProvider, HttpServiceClient, Registration, ServiceClient, ServiceRequest,
    ServiceResponse, StaticAccessTokenProvider,
};
