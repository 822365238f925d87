//! Row-major channel iterators over an `RgbaImage`.
//!
//! The traversal visits pixels top row first, left to right, yielding the
//! red, green and blue subpixels of each pixel in that order. The alpha
//! channel never participates in the stream.

use image::buffer::{Pixels, PixelsMut};
use image::{Pixel, Rgba, RgbaImage};
use std::iter::Take;
use std::slice::{Iter, IterMut};

const CARRIER_CHANNELS: usize = 3;

/// Read-only access to the carrier channels.
pub(crate) struct ChannelIter<'a> {
    pixels: Pixels<'a, Rgba<u8>>,
    colors: Take<Iter<'a, u8>>,
}

impl<'a> ChannelIter<'a> {
    pub fn new(image: &'a RgbaImage) -> Self {
        Self {
            pixels: image.pixels(),
            colors: Iter::default().take(CARRIER_CHANNELS),
        }
    }
}

impl<'a> Iterator for ChannelIter<'a> {
    type Item = &'a u8;

    fn next(&mut self) -> Option<Self::Item> {
        self.colors.next().or_else(|| {
            if let Some(pixel) = self.pixels.next() {
                self.colors = pixel.channels().iter().take(CARRIER_CHANNELS);
            }
            self.colors.next()
        })
    }
}

/// Mutable access to the carrier channels, same traversal as
/// [`ChannelIter`].
pub(crate) struct ChannelIterMut<'a> {
    pixels: PixelsMut<'a, Rgba<u8>>,
    colors: Take<IterMut<'a, u8>>,
}

impl<'a> ChannelIterMut<'a> {
    pub fn new(image: &'a mut RgbaImage) -> Self {
        Self {
            pixels: image.pixels_mut(),
            colors: IterMut::default().take(CARRIER_CHANNELS),
        }
    }
}

impl<'a> Iterator for ChannelIterMut<'a> {
    type Item = &'a mut u8;

    fn next(&mut self) -> Option<Self::Item> {
        self.colors.next().or_else(|| {
            if let Some(pixel) = self.pixels.next() {
                self.colors = pixel.channels_mut().iter_mut().take(CARRIER_CHANNELS);
            }
            self.colors.next()
        })
    }
}
