/// An image received in a request, already checked against the upload rules.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Lower-case extension the stored file will carry (`png`, `svg`, ...).
    pub extension: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    #[must_use]
    pub fn new(extension: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            extension: extension.into(),
            bytes,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
