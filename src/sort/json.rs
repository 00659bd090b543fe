/// Sorting untyped JSON input.
///
/// Callers holding dynamic data pass it here unchecked. Shapes that cannot
/// be sorted degrade to a no-op instead of an error.
use serde::Deserialize;
use serde_json::Value as Json;
use thiserror::Error;
use tracing::debug;

use super::core::{Criteria, sort};

/// Why a JSON value is not usable as sort criteria.
#[derive(Debug, Error)]
pub enum CriteriaError {
    #[error("sort criteria must be a string or an array of strings, got {0}")]
    Shape(&'static str),
    #[error("invalid sort criteria: {0}")]
    Invalid(#[from] serde_json::Error),
}

fn json_kind(v: &Json) -> &'static str {
    match v {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

impl TryFrom<&Json> for Criteria {
    type Error = CriteriaError;

    fn try_from(value: &Json) -> Result<Self, Self::Error> {
        match value {
            Json::Null | Json::String(_) | Json::Array(_) => Ok(Criteria::deserialize(value)?),
            other => Err(CriteriaError::Shape(json_kind(other))),
        }
    }
}

/// Sort a JSON array of objects in place.
///
/// A `collection` that is not an array and `criteria` of any shape other
/// than `null`, a string or an array of strings leave everything untouched.
/// Array elements that are not objects have no fields and read as undefined.
pub fn sort_json(collection: &mut Json, criteria: &Json) {
    let criteria = match Criteria::try_from(criteria) {
        Ok(c) => c,
        Err(e) => {
            debug!("ignoring sort request: {}", e);
            return;
        }
    };
    match collection {
        Json::Array(records) => sort(records.as_mut_slice(), criteria),
        other => debug!("ignoring sort request: collection is {}", json_kind(other)),
    }
}
