//! JSON codec for AGS resources.
//!
//! The serde implementations of the resource models go through the
//! normalizers and factories, so `serde_json` output is always the wire
//! format. The two failure modes surfaced here are encoding a non-finite
//! number and decoding malformed JSON.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::factory::{create_line_item, create_result, create_score};
use super::models::{GradeResult, LineItem, LineItemContainer, ResultContainer, Score};
use super::normalizer::{
    normalize_line_item, normalize_line_item_container, normalize_result,
    normalize_result_container, normalize_score,
};
use crate::error::{AgsError, AgsResult};

/// Encode a value as JSON.
pub fn serialize<T: Serialize + ?Sized>(value: &T) -> AgsResult<String> {
    serde_json::to_string(value).map_err(|e| AgsError::Serialization {
        message: format!("Failed to encode JSON: {}", e),
    })
}

/// Decode a value from JSON.
pub fn deserialize<T: DeserializeOwned>(json: &str) -> AgsResult<T> {
    serde_json::from_str(json).map_err(|e| AgsError::MalformedInput {
        message: format!("Failed to decode JSON: {}", e),
    })
}

/// Decode a score, reporting factory failures as such.
pub fn deserialize_score(json: &str) -> AgsResult<Score> {
    let data: Map<String, Value> = deserialize(json)?;
    create_score(&data)
}

/// Decode a line item. The wire form has no context, so the caller supplies it.
pub fn deserialize_line_item(json: &str, context_id: &str) -> AgsResult<LineItem> {
    let data: Map<String, Value> = deserialize(json)?;
    create_line_item(context_id, &data)
}

pub fn deserialize_result(json: &str) -> AgsResult<GradeResult> {
    let data: Map<String, Value> = deserialize(json)?;
    create_result(&data)
}

// =============================================================================
// serde glue
// =============================================================================

impl Serialize for LineItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        normalize_line_item(self)
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}

impl Serialize for LineItemContainer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        normalize_line_item_container(self)
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        normalize_score(self)
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let data = Map::<String, Value>::deserialize(deserializer)?;
        create_score(&data).map_err(de::Error::custom)
    }
}

impl Serialize for GradeResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        normalize_result(self)
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GradeResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let data = Map::<String, Value>::deserialize(deserializer)?;
        create_result(&data).map_err(de::Error::custom)
    }
}

impl Serialize for ResultContainer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        normalize_result_container(self)
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}
