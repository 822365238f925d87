pub mod codec;
pub mod schema;

pub use codec::{deserialize, serialize};
pub use schema::*;
