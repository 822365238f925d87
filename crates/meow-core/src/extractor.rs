//! Extraction orchestration: bit-plane mapper, error correction, payload
//! codec, with soft failure on every stage.
//!
//! Corruption-class failures never escape as errors. They collapse into
//! [`PayloadOutcome::Missing`] so the fallback loader's universal
//! compatibility guarantee holds; the reason stays available for
//! diagnostics.

use std::io::Read;

use image::RgbaImage;

use crate::carrier::bit_plane::{self, BitPlaneReader};
use crate::ecc;
use crate::error::MeowError;
use crate::frame::{StreamHeader, HEADER_CODEWORD_LEN, MAGIC};
use crate::payload::{self, MetadataPayload};

/// Decode-time configuration, passed explicitly per call so harnesses can
/// compare ECC-enabled and ECC-disabled decoding of the identical buffer.
#[derive(Debug, Clone, Copy)]
pub struct ExtractConfig {
    /// When false, parity symbols are skipped instead of used for
    /// correction, the strictly weaker baseline path.
    pub ecc: bool,
    /// LSB group size per color channel, must match the embed side.
    pub bits_per_channel: u8,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            ecc: true,
            bits_per_channel: 2,
        }
    }
}

/// The result of asking an image for its hidden payload. Absence is
/// normal, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadOutcome {
    Recovered(MetadataPayload),
    Missing(MissingReason),
}

/// Why no payload came back, kept distinguishable for diagnostics even
/// though all reasons read as "no data" to MEOW-unaware callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingReason {
    /// The image carries no recognizable stream at all.
    NotPresent,
    /// A stream is present but corruption exceeds what can be repaired.
    Corrupted,
    /// The stream decoded cleanly to a payload version this build does
    /// not understand.
    UnsupportedVersion,
}

impl PayloadOutcome {
    pub fn is_recovered(&self) -> bool {
        matches!(self, PayloadOutcome::Recovered(_))
    }

    /// Collapse to the nullable shape of the external API contract.
    pub fn into_option(self) -> Option<MetadataPayload> {
        match self {
            PayloadOutcome::Recovered(payload) => Some(payload),
            PayloadOutcome::Missing(_) => None,
        }
    }
}

/// Recover the hidden payload from a pixel buffer with the default
/// configuration. Pure function, no I/O.
pub fn extract(image: &RgbaImage) -> PayloadOutcome {
    extract_with_config(image, &ExtractConfig::default())
}

/// Recover the hidden payload using an explicit configuration.
pub fn extract_with_config(image: &RgbaImage, config: &ExtractConfig) -> PayloadOutcome {
    if bit_plane::ensure_bit_depth(config.bits_per_channel).is_err() {
        log::warn!(
            "extraction with unsupported bits per channel {} reads nothing",
            config.bits_per_channel
        );
        return PayloadOutcome::Missing(MissingReason::NotPresent);
    }

    let mut reader = BitPlaneReader::new(image, config.bits_per_channel);

    let mut header_codeword = [0u8; HEADER_CODEWORD_LEN];
    if reader.read_exact(&mut header_codeword).is_err() {
        return PayloadOutcome::Missing(MissingReason::NotPresent);
    }

    let header_bytes = if config.ecc {
        match StreamHeader::decode_codeword(&header_codeword) {
            Ok(bytes) => bytes,
            Err(_) => {
                // an unrepairable header on a carrier that never held a
                // stream is plain absence, not corruption
                return match StreamHeader::strip_codeword(&header_codeword) {
                    Ok(raw) if raw.starts_with(&MAGIC) => {
                        PayloadOutcome::Missing(MissingReason::Corrupted)
                    }
                    _ => PayloadOutcome::Missing(MissingReason::NotPresent),
                };
            }
        }
    } else {
        match StreamHeader::strip_codeword(&header_codeword) {
            Ok(bytes) => bytes,
            Err(_) => return PayloadOutcome::Missing(MissingReason::NotPresent),
        }
    };

    let Some(header) = StreamHeader::parse(&header_bytes) else {
        return PayloadOutcome::Missing(MissingReason::NotPresent);
    };

    let body_len = header.body_len as usize;
    let body_codeword_len = ecc::encoded_len(body_len, header.redundancy);

    // a corrupted length that points past the carrier is not readable
    let stream_bits = ((HEADER_CODEWORD_LEN + body_codeword_len) as u64) * 8;
    if stream_bits > bit_plane::capacity_bits(image, config.bits_per_channel) {
        return PayloadOutcome::Missing(MissingReason::Corrupted);
    }

    let mut body_codeword = vec![0u8; body_codeword_len];
    if reader.read_exact(&mut body_codeword).is_err() {
        return PayloadOutcome::Missing(MissingReason::Corrupted);
    }

    let body = if config.ecc {
        ecc::decode(&body_codeword, body_len, header.redundancy)
    } else {
        ecc::strip(&body_codeword, body_len, header.redundancy)
    };
    let body = match body {
        Ok(bytes) => bytes,
        Err(_) => {
            log::debug!("body stage failed: corruption beyond correction capacity");
            return PayloadOutcome::Missing(MissingReason::Corrupted);
        }
    };

    match payload::deserialize(&body) {
        Ok(payload) => PayloadOutcome::Recovered(payload),
        Err(MeowError::UnsupportedPayloadVersion(version)) => {
            log::debug!("payload version {version} is not supported");
            PayloadOutcome::Missing(MissingReason::UnsupportedVersion)
        }
        Err(_) => PayloadOutcome::Missing(MissingReason::Corrupted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::{embed, EmbedConfig};
    use crate::test_utils::{prepare_noise_image, sample_payload};
    use std::io::Write;

    #[test]
    fn extraction_inverts_embedding() {
        let carrier = prepare_noise_image(96, 96);
        let payload = sample_payload();
        let stego = embed(&carrier, &payload, &EmbedConfig::default()).unwrap();

        assert_eq!(extract(&stego), PayloadOutcome::Recovered(payload));
    }

    #[test]
    fn extraction_is_idempotent() {
        let carrier = prepare_noise_image(96, 96);
        let stego = embed(&carrier, &sample_payload(), &EmbedConfig::default()).unwrap();

        let first = extract(&stego);
        let second = extract(&stego);
        assert!(first.is_recovered());
        assert_eq!(first, second);
    }

    #[test]
    fn a_plain_image_has_no_payload() {
        let image = prepare_noise_image(64, 64);
        assert_eq!(
            extract(&image),
            PayloadOutcome::Missing(MissingReason::NotPresent)
        );
    }

    #[test]
    fn a_tiny_image_has_no_payload() {
        let image = prepare_noise_image(2, 2);
        assert_eq!(
            extract(&image),
            PayloadOutcome::Missing(MissingReason::NotPresent)
        );
    }

    #[test]
    fn every_redundancy_level_round_trips() {
        use crate::ecc::Redundancy;
        for redundancy in [
            Redundancy::None,
            Redundancy::Low,
            Redundancy::Medium,
            Redundancy::High,
        ] {
            let carrier = prepare_noise_image(96, 96);
            let payload = sample_payload();
            let config = EmbedConfig {
                redundancy,
                bits_per_channel: 2,
            };
            let stego = embed(&carrier, &payload, &config).unwrap();
            assert_eq!(
                extract(&stego),
                PayloadOutcome::Recovered(payload),
                "redundancy {redundancy}"
            );
        }
    }

    #[test]
    fn every_bit_depth_round_trips() {
        for bits_per_channel in crate::carrier::SUPPORTED_BIT_DEPTHS {
            let carrier = prepare_noise_image(96, 96);
            let payload = sample_payload();
            let config = EmbedConfig {
                redundancy: crate::ecc::Redundancy::Medium,
                bits_per_channel,
            };
            let stego = embed(&carrier, &payload, &config).unwrap();

            let extract_config = ExtractConfig {
                ecc: true,
                bits_per_channel,
            };
            assert_eq!(
                extract_with_config(&stego, &extract_config),
                PayloadOutcome::Recovered(payload),
                "bits_per_channel {bits_per_channel}"
            );
        }
    }

    #[test]
    fn disabled_ecc_still_reads_a_clean_stream() {
        let carrier = prepare_noise_image(96, 96);
        let payload = sample_payload();
        let stego = embed(&carrier, &payload, &EmbedConfig::default()).unwrap();

        let config = ExtractConfig {
            ecc: false,
            bits_per_channel: 2,
        };
        assert_eq!(
            extract_with_config(&stego, &config),
            PayloadOutcome::Recovered(payload)
        );
    }

    #[test]
    fn an_unsupported_version_decodes_to_no_data() {
        use crate::ecc::{self, Redundancy};
        use crate::frame::StreamHeader;

        // hand-build a stream whose payload is bit-exact but carries a
        // version this build does not know
        let mut payload_json =
            serde_json::to_value(sample_payload()).expect("payload serializes");
        payload_json["version"] = serde_json::json!(99);
        let body = serde_json::to_vec(&payload_json).expect("json serializes");

        let header = StreamHeader {
            redundancy: Redundancy::Medium,
            body_len: body.len() as u32,
        };

        let mut image = prepare_noise_image(96, 96);
        let mut writer = crate::carrier::BitPlaneWriter::new(&mut image, 2);
        writer.write_all(&header.to_codeword()).unwrap();
        writer
            .write_all(&ecc::encode(&body, Redundancy::Medium))
            .unwrap();

        assert_eq!(
            extract(&image),
            PayloadOutcome::Missing(MissingReason::UnsupportedVersion)
        );
    }

    #[test]
    fn unsupported_bit_depth_reads_nothing() {
        let image = prepare_noise_image(64, 64);
        let config = ExtractConfig {
            ecc: true,
            bits_per_channel: 5,
        };
        assert_eq!(
            extract_with_config(&image, &config),
            PayloadOutcome::Missing(MissingReason::NotPresent)
        );
    }
}
