//! Thin path-level operations used by command-line front ends.

use std::path::Path;

use crate::embedder::EmbedConfig;
use crate::extractor::{ExtractConfig, PayloadOutcome};
use crate::payload::MetadataPayload;
use crate::result::Result;

/// Embed `payload` from `source` into a new carrier at `destination`.
pub fn embed(
    source: &Path,
    destination: &Path,
    payload: MetadataPayload,
    config: EmbedConfig,
) -> Result<()> {
    crate::api::embed::prepare()
        .with_image(source)
        .with_output(destination)
        .with_payload(payload)
        .with_config(config)
        .execute()
}

/// Load `source` and attempt payload recovery.
pub fn extract(source: &Path, config: ExtractConfig) -> Result<PayloadOutcome> {
    let (_, outcome) = crate::api::extract::prepare()
        .from_image(source)
        .with_config(config)
        .execute()?;
    Ok(outcome)
}

/// The carrier bit budget of an image file at the given group size.
pub fn capacity(source: &Path, bits_per_channel: u8) -> Result<u64> {
    crate::carrier::bit_plane::ensure_bit_depth(bits_per_channel)?;
    let image = crate::loader::load(source)?;
    Ok(crate::carrier::capacity_bits(&image, bits_per_channel))
}
