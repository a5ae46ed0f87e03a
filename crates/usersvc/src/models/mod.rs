mod image;

use serde::{Deserialize, Serialize};

pub use image::ListImagesQuery;

/// Success envelope: every JSON response body is `{"data": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
