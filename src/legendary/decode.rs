use serde::de::DeserializeOwned;

use crate::error::Error;

/// Decode a JSON payload into a typed record.
///
/// Unknown fields are ignored so legendary can evolve its schema
/// underneath us; `Option` fields absorb missing and `null` keys. A
/// payload that is not valid JSON, or that violates a required field
/// or enum constraint, is an [`Error::Decode`] tagged with the target
/// type. It is never coerced into an empty result.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, Error> {
    serde_json::from_str(json).map_err(|source| Error::Decode {
        what: std::any::type_name::<T>(),
        source,
    })
}
