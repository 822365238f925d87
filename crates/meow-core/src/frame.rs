//! Fixed-width framing of the embedded stream.
//!
//! The stream is `header codeword || body codeword`. The plain header is
//! 10 bytes (magic, stream version, redundancy tag, body length) and is
//! always Reed-Solomon protected with its own fixed parity, independent of
//! the body redundancy: a corrupted header would otherwise be catastrophic
//! for an otherwise recoverable stream.

use std::io::Cursor;

use byteorder::{BigEndian, ReadBytesExt};

use crate::ecc::{self, Redundancy};
use crate::result::Result;

pub(crate) const MAGIC: [u8; 4] = *b"MEOW";
pub(crate) const STREAM_VERSION: u8 = 1;

/// Plain header length: magic, version, redundancy tag, body length.
pub(crate) const HEADER_LEN: usize = 10;

/// Parity symbols protecting the header, fixed for all streams.
pub(crate) const HEADER_PARITY: usize = 16;

/// On-carrier size of the protected header.
pub(crate) const HEADER_CODEWORD_LEN: usize = HEADER_LEN + HEADER_PARITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StreamHeader {
    pub redundancy: Redundancy,
    pub body_len: u32,
}

impl StreamHeader {
    pub fn to_bytes(self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[..4].copy_from_slice(&MAGIC);
        bytes[4] = STREAM_VERSION;
        bytes[5] = self.redundancy.tag();
        bytes[6..].copy_from_slice(&self.body_len.to_be_bytes());
        bytes
    }

    /// Parse the plain header fields. `None` means the bytes are not a
    /// MEOW stream at all: wrong magic, unknown stream version or an
    /// unknown redundancy tag.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != HEADER_LEN || bytes[..4] != MAGIC {
            return None;
        }

        let mut rest = Cursor::new(&bytes[4..]);
        let version = rest.read_u8().ok()?;
        if version != STREAM_VERSION {
            return None;
        }
        let redundancy = Redundancy::from_tag(rest.read_u8().ok()?)?;
        let body_len = rest.read_u32::<BigEndian>().ok()?;

        Some(Self {
            redundancy,
            body_len,
        })
    }

    /// The protected header as it goes onto the carrier.
    pub fn to_codeword(self) -> Vec<u8> {
        ecc::encode_with_parity(&self.to_bytes(), HEADER_PARITY)
    }

    /// Recover the plain header bytes from a received codeword,
    /// correcting up to `HEADER_PARITY / 2` symbol errors.
    pub fn decode_codeword(codeword: &[u8]) -> Result<Vec<u8>> {
        ecc::decode_with_parity(codeword, HEADER_LEN, HEADER_PARITY)
    }

    /// The raw header bytes with parity stripped and no correction, the
    /// ECC-disabled path.
    pub fn strip_codeword(codeword: &[u8]) -> Result<Vec<u8>> {
        ecc::strip_with_parity(codeword, HEADER_LEN, HEADER_PARITY)
    }
}
