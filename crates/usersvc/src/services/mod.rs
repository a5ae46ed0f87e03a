//! Services orchestrating the stores.

mod images;
mod parallel;
mod users;

pub use images::ImageService;
pub use users::UserService;
