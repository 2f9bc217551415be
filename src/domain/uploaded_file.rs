use super::file_kind::FileKind;

/// A single uploaded document, owned by the extraction call for its duration.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
    /// Advisory only, e.g. the multipart content type.
    pub declared_media_type: Option<String>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, declared_media_type: Option<String>) -> Self {
        Self {
            name: name.into(),
            bytes,
            declared_media_type: declared_media_type.filter(|m| !m.trim().is_empty()),
        }
    }

    pub fn kind(&self) -> Option<FileKind> {
        FileKind::from_file_name(&self.name)
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Declared media type if present, otherwise a guess from the file name.
    pub fn media_type(&self) -> Option<String> {
        self.declared_media_type.clone().or_else(|| {
            mime_guess::from_path(&self.name)
                .first()
                .map(|m| m.essence_str().to_string())
        })
    }
}
