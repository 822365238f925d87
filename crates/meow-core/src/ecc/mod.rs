//! Forward error correction for the embedded stream.
//!
//! Data is protected by systematic Reed-Solomon blocks; the redundancy
//! level selects how many parity symbols guard each block, trading carrier
//! capacity for resilience. `Redundancy::None` is the identity transform
//! and serves as the baseline the resilience benchmarks compare against.

pub(crate) mod gf256;
pub(crate) mod reed_solomon;

use crate::error::MeowError;
use crate::result::Result;

use reed_solomon::BLOCK_LEN;

/// How many parity symbols protect each Reed-Solomon block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Redundancy {
    /// No protection, the identity transform
    None,
    /// 16 parity symbols per block, corrects 8 symbol errors
    Low,
    /// 32 parity symbols per block, corrects 16 symbol errors
    Medium,
    /// 64 parity symbols per block, corrects 32 symbol errors
    #[default]
    High,
}

impl Redundancy {
    /// Parity symbols appended to each block.
    pub const fn parity_len(self) -> usize {
        match self {
            Redundancy::None => 0,
            Redundancy::Low => 16,
            Redundancy::Medium => 32,
            Redundancy::High => 64,
        }
    }

    /// Data bytes carried by one full block.
    pub const fn data_per_block(self) -> usize {
        BLOCK_LEN - self.parity_len()
    }

    /// Symbol errors each block survives.
    pub const fn correctable_per_block(self) -> usize {
        self.parity_len() / 2
    }

    /// Wire tag used in the stream header.
    pub(crate) const fn tag(self) -> u8 {
        match self {
            Redundancy::None => 0,
            Redundancy::Low => 1,
            Redundancy::Medium => 2,
            Redundancy::High => 3,
        }
    }

    pub(crate) const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Redundancy::None),
            1 => Some(Redundancy::Low),
            2 => Some(Redundancy::Medium),
            3 => Some(Redundancy::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for Redundancy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Redundancy::None => "none",
            Redundancy::Low => "low",
            Redundancy::Medium => "medium",
            Redundancy::High => "high",
        };
        f.write_str(name)
    }
}

/// Encoded length of `data_len` bytes at the given redundancy.
pub fn encoded_len(data_len: usize, level: Redundancy) -> usize {
    encoded_len_with_parity(data_len, level.parity_len())
}

pub(crate) fn encoded_len_with_parity(data_len: usize, parity: usize) -> usize {
    if parity == 0 {
        return data_len;
    }
    let data_per_block = BLOCK_LEN - parity;
    let full_blocks = data_len / data_per_block;
    let remainder = data_len % data_per_block;
    let mut total = full_blocks * BLOCK_LEN;
    if remainder > 0 {
        total += remainder + parity;
    }
    total
}

/// Protect `data`, splitting it across consecutive independently coded
/// blocks. The final block may be a shortened code.
pub fn encode(data: &[u8], level: Redundancy) -> Vec<u8> {
    encode_with_parity(data, level.parity_len())
}

pub(crate) fn encode_with_parity(data: &[u8], parity: usize) -> Vec<u8> {
    if parity == 0 {
        return data.to_vec();
    }
    let data_per_block = BLOCK_LEN - parity;
    let mut encoded = Vec::with_capacity(encoded_len_with_parity(data.len(), parity));
    for chunk in data.chunks(data_per_block) {
        encoded.extend_from_slice(&reed_solomon::encode_block(chunk, parity));
    }
    encoded
}

/// Recover `data_len` bytes from `encoded`, correcting up to
/// `parity / 2` symbol errors in every block.
pub fn decode(encoded: &[u8], data_len: usize, level: Redundancy) -> Result<Vec<u8>> {
    decode_with_parity(encoded, data_len, level.parity_len())
}

pub(crate) fn decode_with_parity(encoded: &[u8], data_len: usize, parity: usize) -> Result<Vec<u8>> {
    if parity == 0 {
        if encoded.len() < data_len {
            return Err(MeowError::EccFailure);
        }
        return Ok(encoded[..data_len].to_vec());
    }

    let data_per_block = BLOCK_LEN - parity;
    let mut decoded = Vec::with_capacity(data_len);
    let mut corrected = 0usize;
    let mut blocks = 0usize;
    let mut remaining = data_len;
    let mut offset = 0usize;

    while remaining > 0 {
        let chunk_len = remaining.min(data_per_block);
        let codeword_len = chunk_len + parity;
        let block = encoded
            .get(offset..offset + codeword_len)
            .ok_or(MeowError::EccFailure)?;

        let (data, errors) = reed_solomon::decode_block(block, chunk_len, parity)?;
        decoded.extend_from_slice(&data);
        corrected += errors;
        blocks += 1;

        offset += codeword_len;
        remaining -= chunk_len;
    }

    if corrected > 0 {
        log::debug!("corrected {corrected} symbol errors across {blocks} blocks");
    }

    Ok(decoded)
}

/// Walk the same block layout but take the data symbols verbatim, with no
/// correction. This is the ECC-disabled decode path, strictly weaker than
/// [`decode`] on the identical buffer.
pub fn strip(encoded: &[u8], data_len: usize, level: Redundancy) -> Result<Vec<u8>> {
    strip_with_parity(encoded, data_len, level.parity_len())
}

pub(crate) fn strip_with_parity(encoded: &[u8], data_len: usize, parity: usize) -> Result<Vec<u8>> {
    if parity == 0 {
        if encoded.len() < data_len {
            return Err(MeowError::EccFailure);
        }
        return Ok(encoded[..data_len].to_vec());
    }

    let data_per_block = BLOCK_LEN - parity;
    let mut stripped = Vec::with_capacity(data_len);
    let mut remaining = data_len;
    let mut offset = 0usize;

    while remaining > 0 {
        let chunk_len = remaining.min(data_per_block);
        let block = encoded
            .get(offset..offset + chunk_len)
            .ok_or(MeowError::EccFailure)?;
        stripped.extend_from_slice(block);

        offset += chunk_len + parity;
        remaining -= chunk_len;
    }

    Ok(stripped)
}
