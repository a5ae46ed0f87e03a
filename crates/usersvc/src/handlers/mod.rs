pub mod error;
pub mod extract;
pub mod guard;
pub mod health;
pub mod images;
pub mod users;

pub use error::ApiError;
