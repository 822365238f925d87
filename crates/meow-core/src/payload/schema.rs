//! The metadata entity carried inside a MEOW image.
//!
//! Fields serialize in declaration order and every open-ended mapping is a
//! `BTreeMap`, so the canonical byte encoding of a payload is deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Payload schema version this build reads and writes.
pub const PAYLOAD_VERSION: u32 = 1;

/// The structured metadata embedded into a carrier image.
///
/// A payload is constructed by whatever upstream component computed the
/// feature values, embedded once, and reconstructed fresh on every
/// successful extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataPayload {
    /// Schema version; extraction rejects unsupported values.
    pub version: u32,

    /// When the payload was produced, RFC 3339 text supplied by the caller.
    #[serde(default)]
    pub creation_timestamp: String,

    /// Precomputed feature summaries, e.g. dimensions, edge density,
    /// brightness.
    #[serde(default)]
    pub features: BTreeMap<String, FeatureValue>,

    /// Detected-object annotations.
    #[serde(default)]
    pub ai_annotations: AiAnnotations,

    /// Region key to scalar saliency.
    #[serde(default)]
    pub attention_maps: BTreeMap<String, f64>,

    /// Provenance of AI-generated imagery, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_record: Option<GenerationRecord>,

    /// Free-form forward-compatibility extensions, bounded to primitive
    /// values.
    #[serde(default)]
    pub extensions: BTreeMap<String, ExtensionValue>,
}

impl MetadataPayload {
    /// A payload of the current schema version with the given timestamp.
    pub fn new(creation_timestamp: impl Into<String>) -> Self {
        Self {
            version: PAYLOAD_VERSION,
            creation_timestamp: creation_timestamp.into(),
            features: BTreeMap::new(),
            ai_annotations: AiAnnotations::default(),
            attention_maps: BTreeMap::new(),
            generation_record: None,
            extensions: BTreeMap::new(),
        }
    }
}

/// A feature is either a single number or a fixed vector of numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Scalar(f64),
    Vector(Vec<f64>),
}

/// Semantic annotations produced by detection models.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiAnnotations {
    /// Detected classes; the order is significant.
    #[serde(default)]
    pub object_classes: Vec<String>,

    #[serde(default)]
    pub bounding_boxes: Vec<BoundingBox>,

    /// Model preprocessing hints, e.g. normalization means.
    #[serde(default)]
    pub preprocessing_params: BTreeMap<String, f64>,

    /// Who produced the annotations.
    #[serde(default)]
    pub source: String,

    #[serde(default)]
    pub ai_enhanced: bool,
}

/// A detected object with its location and detection confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub class: String,
    /// x1, y1, x2, y2
    pub bbox: [f64; 4],
    /// Detection confidence in `[0, 1]`.
    pub confidence: f64,
}

/// Provenance for AI-generated or AI-enhanced imagery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub ai_generated: bool,

    /// Generation service, e.g. a model vendor.
    #[serde(default)]
    pub service: String,

    #[serde(default)]
    pub platform: String,

    #[serde(default)]
    pub model_version: String,

    /// When the image was generated, RFC 3339 text.
    #[serde(default)]
    pub generation_time: String,

    #[serde(default)]
    pub prompt: String,

    #[serde(default)]
    pub has_reference_image: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_image_url: Option<String>,

    #[serde(default)]
    pub generation_settings: BTreeMap<String, ExtensionValue>,

    #[serde(default)]
    pub watermark_detected: bool,

    /// Detection confidence in `[0, 1]`.
    #[serde(default)]
    pub confidence_score: f64,
}

/// Primitive values allowed in the open extension maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtensionValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_values_keep_their_variant_through_json() {
        let cases = vec![
            ExtensionValue::Bool(true),
            ExtensionValue::Integer(42),
            ExtensionValue::Float(2.5),
            ExtensionValue::Text("imagenet".into()),
        ];
        for value in cases {
            let json = serde_json::to_string(&value).unwrap();
            let back: ExtensionValue = serde_json::from_str(&json).unwrap();
            assert_eq!(back, value, "json was {json}");
        }
    }

    #[test]
    fn feature_values_accept_scalars_and_vectors() {
        let scalar: FeatureValue = serde_json::from_str("113.5").unwrap();
        assert_eq!(scalar, FeatureValue::Scalar(113.5));

        let vector: FeatureValue = serde_json::from_str("[200.0, 200.0]").unwrap();
        assert_eq!(vector, FeatureValue::Vector(vec![200.0, 200.0]));
    }

    #[test]
    fn map_keys_serialize_in_sorted_order() {
        let mut payload = MetadataPayload::new("2026-08-06T12:00:00Z");
        payload
            .features
            .insert("edge_density".into(), FeatureValue::Scalar(0.25));
        payload
            .features
            .insert("brightness".into(), FeatureValue::Scalar(128.0));

        let json = String::from_utf8(serde_json::to_vec(&payload).unwrap()).unwrap();
        let brightness = json.find("brightness").unwrap();
        let edge_density = json.find("edge_density").unwrap();
        assert!(brightness < edge_density);
    }
}
