//! Canonical byte encoding of [`MetadataPayload`].
//!
//! `deserialize(serialize(p)) == p` holds for every valid payload: the JSON
//! encoding is deterministic (fixed field order, sorted map keys) and both
//! directions run the same validation.

use crate::error::MeowError;
use crate::payload::schema::{MetadataPayload, PAYLOAD_VERSION};
use crate::result::Result;

/// Serialize a payload into its canonical byte form.
///
/// Rejects payloads that would not survive a round trip: unsupported
/// versions and out-of-range confidences are refused at embed time rather
/// than discovered at extraction.
pub fn serialize(payload: &MetadataPayload) -> Result<Vec<u8>> {
    validate(payload)?;
    serde_json::to_vec(payload).map_err(MeowError::PayloadSerialization)
}

/// Reconstruct a payload from its canonical byte form.
pub fn deserialize(bytes: &[u8]) -> Result<MetadataPayload> {
    let payload: MetadataPayload =
        serde_json::from_slice(bytes).map_err(MeowError::PayloadFormat)?;
    validate(&payload)?;
    Ok(payload)
}

fn validate(payload: &MetadataPayload) -> Result<()> {
    if payload.version != PAYLOAD_VERSION {
        return Err(MeowError::UnsupportedPayloadVersion(payload.version));
    }

    for bbox in &payload.ai_annotations.bounding_boxes {
        ensure_confidence(bbox.confidence)?;
    }
    if let Some(record) = &payload.generation_record {
        ensure_confidence(record.confidence_score)?;
    }

    Ok(())
}

fn ensure_confidence(value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(MeowError::ConfidenceOutOfRange(value))
    }
}
