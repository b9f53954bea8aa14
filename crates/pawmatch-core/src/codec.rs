//! Opaque, copy-pasteable tokens for sharing sessions and votes.
//!
//! A token is the compact JSON form of a payload, base64-encoded over its
//! UTF-8 bytes, so accented text survives and the result is one line of
//! printable ASCII. Tokens pasted without their trailing `=` padding are
//! still accepted.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, general_purpose};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::candidate::{NameCandidate, Species};
use crate::error::{PawError, Result};

/// Standard alphabet, padded output, padding optional on input.
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    general_purpose::PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// What the host shares so guests can vote on the same list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    pub names: Vec<NameCandidate>,
    pub species: Species,
}

/// What every participant shares from the results screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotePayload {
    pub likes: Vec<String>,
}

/// Serializes `payload` to a token.
pub fn encode<T: Serialize + ?Sized>(payload: &T) -> Result<String> {
    let json = serde_json::to_string(payload)?;
    Ok(TOKEN_ENGINE.encode(json.as_bytes()))
}

/// Decodes a token into untyped JSON.
pub fn decode_value(token: &str) -> Result<Value> {
    let bytes = TOKEN_ENGINE
        .decode(token.trim())
        .map_err(|e| PawError::decode(format!("invalid base64: {e}")))?;
    let text =
        String::from_utf8(bytes).map_err(|e| PawError::decode(format!("invalid UTF-8: {e}")))?;
    serde_json::from_str(&text).map_err(|e| PawError::decode(format!("invalid JSON: {e}")))
}

/// Decodes a token into `T`.
///
/// Malformed tokens are `DecodeError`; well-formed JSON of the wrong shape is
/// `ShapeValidationFailure` on the `payload` field.
pub fn decode<T: DeserializeOwned>(token: &str) -> Result<T> {
    let value = decode_value(token)?;
    serde_json::from_value(value).map_err(|e| {
        tracing::debug!(
            payload = std::any::type_name::<T>(),
            "token has the wrong shape: {}",
            e
        );
        PawError::shape("payload")
    })
}

pub fn encode_session(names: &[NameCandidate], species: Species) -> Result<String> {
    #[derive(Serialize)]
    struct SessionRef<'a> {
        names: &'a [NameCandidate],
        species: Species,
    }
    encode(&SessionRef { names, species })
}

/// Decodes a session token.
///
/// `names` must be a list of candidates. A missing or unrecognized `species`
/// falls back to the default species.
pub fn decode_session(token: &str) -> Result<SessionPayload> {
    let mut value = decode_value(token)?;
    let names = match value.get_mut("names").map(Value::take) {
        Some(names @ Value::Array(_)) => names,
        _ => return Err(PawError::shape("names")),
    };
    let names: Vec<NameCandidate> =
        serde_json::from_value(names).map_err(|_| PawError::shape("names"))?;

    let species = value
        .get("species")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<Species>().ok())
        .unwrap_or_default();

    Ok(SessionPayload { names, species })
}

pub fn encode_votes(likes: &[String]) -> Result<String> {
    #[derive(Serialize)]
    struct VotesRef<'a> {
        likes: &'a [String],
    }
    encode(&VotesRef { likes })
}

/// Decodes a vote token; `likes` must be a list of candidate ids.
///
/// Every failure is reported as `InvalidVoteCode`.
pub fn decode_votes(token: &str) -> Result<VotePayload> {
    let mut value = decode_value(token).map_err(PawError::vote_code)?;
    match value.get_mut("likes").map(Value::take) {
        Some(likes @ Value::Array(_)) => {
            let likes = serde_json::from_value(likes)
                .map_err(|_| PawError::vote_code(PawError::shape("likes")))?;
            Ok(VotePayload { likes })
        }
        _ => Err(PawError::vote_code(PawError::shape("likes"))),
    }
}
