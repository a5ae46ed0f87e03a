//! Decoding of `multipart/form-data` image uploads.

use axum::extract::Multipart;

use usersvc_core::image::{BlobLayout, ImageMetadata, ImageUpload};
use usersvc_core::service::{Result, ServiceError};

const IMAGE_PART: &str = "image";
const METADATA_PART: &str = "metadata";

/// Turns an upload body into an [`ImageUpload`].
///
/// Expects an `image` file part and a `metadata` JSON part. Any other part is
/// ignored.
#[derive(Debug, Clone)]
pub struct UploadParser {
    layout: BlobLayout,
    max_bytes: usize,
}

fn bad_request(message: impl std::fmt::Display) -> ServiceError {
    ServiceError::BadRequest(message.to_string())
}

impl UploadParser {
    pub fn new(layout: BlobLayout, max_bytes: usize) -> Self {
        Self { layout, max_bytes }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub async fn parse(&self, mut multipart: Multipart) -> Result<ImageUpload> {
        let mut image: Option<(String, Vec<u8>)> = None;
        let mut metadata: Option<ImageMetadata> = None;

        while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                IMAGE_PART => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let extension = self.layout.checked_extension(&file_name)?;
                    let bytes = field.bytes().await.map_err(bad_request)?;
                    if bytes.len() > self.max_bytes {
                        return Err(bad_request(format!(
                            "Image exceeds {} bytes",
                            self.max_bytes
                        )));
                    }
                    image = Some((extension, bytes.to_vec()));
                }
                METADATA_PART => {
                    let raw = field.bytes().await.map_err(bad_request)?;
                    let parsed = serde_json::from_slice(&raw)
                        .map_err(|err| bad_request(format!("Invalid metadata: {err}")))?;
                    metadata = Some(parsed);
                }
                other => tracing::trace!(part = other, "ignoring multipart part"),
            }
        }

        let (extension, bytes) = image.ok_or_else(|| bad_request("Missing image part"))?;
        if bytes.is_empty() {
            return Err(bad_request("Image part is empty"));
        }
        let metadata = metadata.ok_or_else(|| bad_request("Missing metadata part"))?;

        Ok(ImageUpload {
            bytes,
            extension,
            metadata,
        })
    }
}
