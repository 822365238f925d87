//! # MEOW Core
//!
//! MEOW hides machine-readable AI metadata (detected-object annotations,
//! feature summaries, generation provenance) invisibly inside the pixel
//! data of an ordinary raster image. Any standard viewer still displays
//! the file; MEOW-aware tools recover the hidden structured payload, even
//! when storage or transmission flips a small fraction of the carrier
//! bits.
//!
//! The codec is three layers deep, each pure and stateless per call:
//!
//! - a payload codec giving every [`MetadataPayload`] a canonical byte
//!   encoding
//! - a Reed-Solomon layer adding configurable redundancy
//!   ([`Redundancy`])
//! - a bit-plane mapper spreading the protected stream over the low bits
//!   of the red, green and blue channels
//!
//! # Usage Examples
//!
//! ## Hide metadata inside an image
//!
//! ```rust
//! use meow_core::{embed, extract, EmbedConfig, MetadataPayload, PayloadOutcome};
//!
//! let carrier = image::RgbaImage::from_fn(128, 128, |x, y| {
//!     image::Rgba([(x * 2) as u8, (y * 2) as u8, (x + y) as u8, 255])
//! });
//!
//! let mut payload = MetadataPayload::new("2026-08-06T12:00:00Z");
//! payload.ai_annotations.object_classes.push("cat".to_string());
//!
//! let stego = embed(&carrier, &payload, &EmbedConfig::default())
//!     .expect("carrier is large enough");
//!
//! assert_eq!(extract(&stego), PayloadOutcome::Recovered(payload));
//! ```
//!
//! ## Open a file that may or may not be a MEOW image
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! let (image, outcome) = meow_core::load_with_payload(Path::new("photo.meow"))
//!     .expect("file is a readable image");
//! // `image` is always displayable; `outcome` may be Missing, which is
//! // a normal result and not an error
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
pub mod carrier;
pub mod commands;
pub mod ecc;
pub mod error;
pub mod payload;
pub mod result;

mod embedder;
mod extractor;
mod frame;
mod loader;

pub use crate::carrier::capacity_bits;
pub use crate::ecc::Redundancy;
pub use crate::embedder::{embed, EmbedConfig};
pub use crate::error::MeowError;
pub use crate::extractor::{
    extract, extract_with_config, ExtractConfig, MissingReason, PayloadOutcome,
};
pub use crate::loader::{load, load_with_payload, load_with_payload_using, save_png_atomic};
pub use crate::payload::{
    AiAnnotations, BoundingBox, ExtensionValue, FeatureValue, GenerationRecord, MetadataPayload,
    PAYLOAD_VERSION,
};
pub use crate::result::Result;
