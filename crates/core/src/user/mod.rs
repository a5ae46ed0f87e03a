mod error;
mod operations;
mod requests;
mod types;

pub use error::UserError;
pub use operations::{is_valid_email, parse_user_id, validate_new_user, validate_profile};
pub use requests::UserRequest;
pub use types::{NewUser, User};
