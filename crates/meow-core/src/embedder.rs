//! Embedding orchestration: payload codec, error correction, then the
//! bit-plane mapper, onto a fresh copy of the carrier.

use std::io::Write;

use image::RgbaImage;

use crate::carrier::bit_plane::{self, BitPlaneWriter};
use crate::ecc::{self, Redundancy};
use crate::error::MeowError;
use crate::frame::{StreamHeader, HEADER_CODEWORD_LEN};
use crate::payload::{self, MetadataPayload};
use crate::result::Result;

/// Embed-time configuration, passed explicitly per call.
#[derive(Debug, Clone, Copy)]
pub struct EmbedConfig {
    /// Parity level protecting the payload body.
    pub redundancy: Redundancy,
    /// LSB group size per color channel, one of 1, 2 or 4.
    pub bits_per_channel: u8,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            redundancy: Redundancy::High,
            bits_per_channel: 2,
        }
    }
}

/// Hide `payload` in a copy of `carrier` and return the copy.
///
/// The caller's buffer is never mutated; viewer and test harnesses keep
/// using the original afterwards. Fails with
/// [`MeowError::CapacityError`] before anything is written when the
/// encoded stream does not fit the carrier.
pub fn embed(
    carrier: &RgbaImage,
    payload: &MetadataPayload,
    config: &EmbedConfig,
) -> Result<RgbaImage> {
    bit_plane::ensure_bit_depth(config.bits_per_channel)?;

    let body = payload::serialize(payload)?;
    let capacity = bit_plane::capacity_bits(carrier, config.bits_per_channel);

    let body_len = u32::try_from(body.len()).map_err(|_| MeowError::CapacityError {
        width: carrier.width(),
        height: carrier.height(),
        capacity,
        required: u64::MAX,
    })?;

    let header = StreamHeader {
        redundancy: config.redundancy,
        body_len,
    };
    let header_codeword = header.to_codeword();
    let body_codeword = ecc::encode(&body, config.redundancy);

    let required = (HEADER_CODEWORD_LEN + body_codeword.len()) as u64 * 8;
    if required > capacity {
        return Err(MeowError::CapacityError {
            width: carrier.width(),
            height: carrier.height(),
            capacity,
            required,
        });
    }

    let mut stego = carrier.clone();
    {
        let mut writer = BitPlaneWriter::new(&mut stego, config.bits_per_channel);
        writer
            .write_all(&header_codeword)
            .and_then(|_| writer.write_all(&body_codeword))
            .map_err(|e| {
                log::error!("bit-plane write failed after capacity check: {e}");
                MeowError::ImageEncodingError
            })?;
    }

    log::debug!(
        "embedded {} payload bytes as {} stream bits ({} redundancy, {} bits/channel)",
        body.len(),
        required,
        config.redundancy,
        config.bits_per_channel,
    );

    Ok(stego)
}
