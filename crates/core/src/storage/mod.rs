mod error;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use traits::{ImageIndexRepository, UserRepository};
pub use types::{ImagePage, ImageQuery};
