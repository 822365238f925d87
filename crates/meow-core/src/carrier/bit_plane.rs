//! The bit-plane channel mapper.
//!
//! [`BitPlaneWriter`] and [`BitPlaneReader`] map a byte stream onto the low
//! bit planes of an image and back: each visited channel carries
//! `bits_per_channel` bits, most significant bit of the group first, in the
//! channel's lowest bits. Higher bits are untouched, which bounds the
//! visual change per channel to `2^bits_per_channel - 1`.

use std::io::{Cursor, Read, Result, Write};

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use image::RgbaImage;

use crate::carrier::iterators::{ChannelIter, ChannelIterMut};
use crate::error::MeowError;

/// Group sizes that pack whole bytes onto channel boundaries.
pub const SUPPORTED_BIT_DEPTHS: [u8; 3] = [1, 2, 4];

/// Payload bits a carrier can hold at the given group size.
pub fn capacity_bits(image: &RgbaImage, bits_per_channel: u8) -> u64 {
    u64::from(image.height()) * u64::from(image.width()) * 3 * u64::from(bits_per_channel)
}

/// Fails with [`MeowError::UnsupportedBitDepth`] unless the group size
/// divides a byte evenly.
pub fn ensure_bit_depth(bits_per_channel: u8) -> crate::result::Result<()> {
    if SUPPORTED_BIT_DEPTHS.contains(&bits_per_channel) {
        Ok(())
    } else {
        Err(MeowError::UnsupportedBitDepth(bits_per_channel))
    }
}

/// Writes a byte stream into the low bit planes of an image.
pub struct BitPlaneWriter<'i> {
    channels: ChannelIterMut<'i>,
    bits_per_channel: u32,
    mask: u8,
}

impl<'i> BitPlaneWriter<'i> {
    /// The caller owns the image buffer; writing mutates it in place, so
    /// orchestration layers hand a fresh copy to this writer.
    pub fn new(image: &'i mut RgbaImage, bits_per_channel: u8) -> Self {
        Self {
            channels: ChannelIterMut::new(image),
            bits_per_channel: u32::from(bits_per_channel),
            mask: (1u8 << bits_per_channel) - 1,
        }
    }
}

impl Write for BitPlaneWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        let mut groups = BitReader::endian(Cursor::new(buf), BigEndian);
        let mut bits_written = 0usize;

        while let Ok(group) = groups.read::<u8>(self.bits_per_channel) {
            match self.channels.next() {
                Some(channel) => {
                    *channel = (*channel & !self.mask) | group;
                    bits_written += self.bits_per_channel as usize;
                }
                // carrier exhausted; report the shortfall through the
                // write contract so `write_all` surfaces `WriteZero`
                None => break,
            }
        }

        Ok(bits_written / 8)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Reads a byte stream back from the low bit planes of an image.
pub struct BitPlaneReader<'i> {
    channels: ChannelIter<'i>,
    bits_per_channel: u32,
    mask: u8,
}

impl<'i> BitPlaneReader<'i> {
    pub fn new(image: &'i RgbaImage, bits_per_channel: u8) -> Self {
        Self {
            channels: ChannelIter::new(image),
            bits_per_channel: u32::from(bits_per_channel),
            mask: (1u8 << bits_per_channel) - 1,
        }
    }
}

impl Read for BitPlaneReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let groups_to_take = (buf.len() * 8) / self.bits_per_channel as usize;
        let mut bits = BitWriter::endian(&mut buf[..], BigEndian);

        let mut bits_read = 0usize;
        for _ in 0..groups_to_take {
            match self.channels.next() {
                Some(channel) => {
                    bits.write(self.bits_per_channel, channel & self.mask)?;
                    bits_read += self.bits_per_channel as usize;
                }
                None => break,
            }
        }

        if !bits.byte_aligned() {
            bits.byte_align()?;
        }

        Ok(bits_read / 8)
    }
}
