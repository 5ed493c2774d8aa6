//! AGS resources: typed models and their wire representation.
//!
//! # Architecture
//!
//! - `models`: line items, scores, results and their containers
//! - `validator`: structural checks of inbound payloads
//! - `factory`: construction of models from validated payloads
//! - `normalizer`: models to wire JSON
//! - `codec`: JSON encoding/decoding around the normalizers and factories

mod codec;
mod factory;
mod models;
mod normalizer;
mod validator;

#[cfg(test)]
mod codec_test;
#[cfg(test)]
mod models_test;

pub use codec::{deserialize, deserialize_line_item, deserialize_result, deserialize_score, serialize};
pub use factory::{create_line_item, create_result, create_score};
pub use models::*;
pub use normalizer::{
    format_timestamp, normalize_line_item, normalize_line_item_container, normalize_result,
    normalize_result_container, normalize_score,
};
pub use validator::{parse_payload, validate_line_item, validate_score};
