use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeowError {
    /// Represents an invalid carrier image. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a carrier that cannot host the encoded stream
    #[error(
"Capacity error: the {width}x{height} carrier holds {capacity} bits but the encoded stream needs {required} bits"
    )]
    CapacityError {
        width: u32,
        height: u32,
        capacity: u64,
        required: u64,
    },

    /// Represents a bit depth outside the supported LSB group sizes
    #[error("Unsupported bits per channel: {0} (expected 1, 2 or 4)")]
    UnsupportedBitDepth(u8),

    /// Represents payload bytes that do not match the metadata schema
    #[error("Payload bytes do not match the metadata schema")]
    PayloadFormat(#[source] serde_json::Error),

    /// Represents a failure turning a payload into its canonical byte form
    #[error("Payload serialization failed")]
    PayloadSerialization(#[source] serde_json::Error),

    /// Represents a payload version this build does not understand
    #[error("Unsupported payload version: {0}")]
    UnsupportedPayloadVersion(u32),

    /// Represents a confidence value outside the valid range
    #[error("Confidence value {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f64),

    /// Represents corruption beyond what the Reed-Solomon code can repair
    #[error("Corruption exceeds the correction capacity of the error correcting code")]
    EccFailure,

    /// Represents a failure when encoding the output image file
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents a failure to read from input
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write the target file
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier image set")]
    CarrierNotSet,

    #[error("No output file set")]
    TargetNotSet,

    #[error("No payload set")]
    MissingPayload,
}
