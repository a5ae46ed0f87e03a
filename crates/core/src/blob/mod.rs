mod error;
mod traits;

pub use error::{BlobError, Result};
pub use traits::BlobStore;
