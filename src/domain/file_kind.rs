use std::fmt;

/// The finite set of file types the extraction chain knows how to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Pdf,
    Docx,
    Text,
    Xlsx,
    Csv,
    Image,
}

const EXTENSIONS: &[(&str, FileKind)] = &[
    (".pdf", FileKind::Pdf),
    (".docx", FileKind::Docx),
    (".txt", FileKind::Text),
    (".xlsx", FileKind::Xlsx),
    (".csv", FileKind::Csv),
    (".png", FileKind::Image),
    (".jpg", FileKind::Image),
    (".jpeg", FileKind::Image),
];

impl FileKind {
    /// Case-insensitive suffix match on the file name; first match wins.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        EXTENSIONS
            .iter()
            .find(|(ext, _)| lower.ends_with(ext))
            .map(|(_, kind)| *kind)
    }

    pub fn supported_extensions() -> Vec<&'static str> {
        EXTENSIONS.iter().map(|(ext, _)| *ext).collect()
    }

    /// Images have no native text layer and go straight to the fallback.
    pub fn has_primary_method(&self) -> bool {
        !matches!(self, Self::Image)
    }

    /// Plain text is decoded or nothing; every other kind may fall back.
    pub fn allows_fallback(&self) -> bool {
        !matches!(self, Self::Text)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Text => "text",
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
