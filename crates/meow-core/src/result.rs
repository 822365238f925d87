use crate::error::MeowError;

pub type Result<T> = std::result::Result<T, MeowError>;
