use uuid::Uuid;

use super::ImageError;

/// Where image blobs live and which file extensions are accepted.
///
/// Built once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobLayout {
    directory: String,
    allowed_extensions: Vec<String>,
}

impl BlobLayout {
    /// Creates a layout. Extensions are normalized to lower case with a
    /// leading dot; blank entries are dropped.
    pub fn new<I, S>(directory: impl Into<String>, allowed_extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let directory = directory.into().trim_end_matches('/').to_string();
        let allowed_extensions = allowed_extensions
            .into_iter()
            .filter_map(|ext| {
                let ext = ext.as_ref().trim().trim_start_matches('.').to_lowercase();
                (!ext.is_empty()).then(|| format!(".{ext}"))
            })
            .collect();
        Self {
            directory,
            allowed_extensions,
        }
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// `{directory}/{user_id}/{image_id}{extension}`
    pub fn image_path(&self, user_id: i64, image_id: Uuid, extension: &str) -> String {
        format!("{}{image_id}{extension}", self.user_prefix(user_id))
    }

    /// `{directory}/{user_id}/`, the prefix shared by all of a user's blobs.
    pub fn user_prefix(&self, user_id: i64) -> String {
        format!("{}/{user_id}/", self.directory)
    }

    /// Every path the image could have been stored under.
    pub fn candidate_paths(&self, user_id: i64, image_id: Uuid) -> Vec<String> {
        self.allowed_extensions
            .iter()
            .map(|ext| self.image_path(user_id, image_id, ext))
            .collect()
    }

    pub fn allows(&self, extension: &str) -> bool {
        self.allowed_extensions.iter().any(|ext| ext == extension)
    }

    /// Extracts and checks the extension of an uploaded file name.
    pub fn checked_extension(&self, file_name: &str) -> Result<String, ImageError> {
        let extension = extension_of(file_name)
            .ok_or_else(|| ImageError::MissingExtension(file_name.to_string()))?;
        if !self.allows(&extension) {
            return Err(ImageError::ExtensionNotAllowed(extension));
        }
        Ok(extension)
    }
}

/// Returns the lower-cased trailing `.ext` of a file name when it consists of
/// ASCII letters and digits only.
pub fn extension_of(file_name: &str) -> Option<String> {
    let lowered = file_name.to_lowercase();
    let (_, ext) = lowered.rsplit_once('.')?;
    let valid = !ext.is_empty()
        && ext
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase());
    valid.then(|| format!(".{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> BlobLayout {
        BlobLayout::new("images/", [".jpg", "PNG", " "])
    }

    #[test]
    fn test_new_normalizes() {
        let layout = layout();
        assert_eq!(layout.directory(), "images");
        assert_eq!(layout.allowed_extensions(), [".jpg", ".png"]);
    }

    #[test]
    fn test_paths() {
        let id = Uuid::nil();
        let layout = layout();
        assert_eq!(layout.user_prefix(12), "images/12/");
        assert_eq!(
            layout.image_path(12, id, ".jpg"),
            "images/12/00000000-0000-0000-0000-000000000000.jpg"
        );
        assert_eq!(
            layout.candidate_paths(12, id),
            vec![
                "images/12/00000000-0000-0000-0000-000000000000.jpg",
                "images/12/00000000-0000-0000-0000-000000000000.png",
            ]
        );
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("cat.jpg").as_deref(), Some(".jpg"));
        assert_eq!(extension_of("Cat.JPG").as_deref(), Some(".jpg"));
        assert_eq!(extension_of("archive.tar.gz").as_deref(), Some(".gz"));
        assert_eq!(extension_of("noext"), None);
        assert_eq!(extension_of("trailing."), None);
        assert_eq!(extension_of("odd.jp-g"), None);
    }

    #[test]
    fn test_checked_extension() {
        let layout = BlobLayout::new("images", [".jpg"]);
        assert_eq!(layout.checked_extension("me.JPG"), Ok(".jpg".to_string()));
        assert_eq!(
            layout.checked_extension("me.png"),
            Err(ImageError::ExtensionNotAllowed(".png".to_string()))
        );
        assert_eq!(
            layout.checked_extension("me"),
            Err(ImageError::MissingExtension("me".to_string()))
        );
    }
}
