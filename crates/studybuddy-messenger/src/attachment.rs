//! File attachments and their previews.

use std::path::Path;

use base64::Engine as _;
use studybuddy_common::StudyBuddyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Pdf,
    /// Accepted but shown without a preview.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub mime: String,
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        let name = name.into();
        let mime = mime_for(&name).to_string();
        Self { name, mime, data }
    }

    pub fn from_path(path: &Path) -> Result<Self, StudyBuddyError> {
        let data = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                StudyBuddyError::Messenger(format!("not a file: {}", path.display()))
            })?;
        Ok(Self::from_bytes(name, data))
    }

    pub fn kind(&self) -> AttachmentKind {
        if self.mime.starts_with("image/") {
            AttachmentKind::Image
        } else if self.mime == "application/pdf" {
            AttachmentKind::Pdf
        } else {
            AttachmentKind::Other
        }
    }

    /// Inline `data:` URL for image previews.
    pub fn preview_data_url(&self) -> Option<String> {
        (self.kind() == AttachmentKind::Image).then(|| {
            format!(
                "data:{};base64,{}",
                self.mime,
                base64::engine::general_purpose::STANDARD.encode(&self.data)
            )
        })
    }

    /// One-line description used in the message log.
    pub fn label(&self) -> String {
        match self.kind() {
            AttachmentKind::Image => format!("[image: {}]", self.name),
            AttachmentKind::Pdf => format!("[pdf: {}]", self.name),
            AttachmentKind::Other => format!("[file: {}]", self.name),
        }
    }
}

fn mime_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_extension() {
        assert_eq!(Attachment::from_bytes("cat.PNG", vec![]).kind(), AttachmentKind::Image);
        assert_eq!(Attachment::from_bytes("notes.pdf", vec![]).kind(), AttachmentKind::Pdf);
        assert_eq!(Attachment::from_bytes("data.csv", vec![]).kind(), AttachmentKind::Other);
        assert_eq!(Attachment::from_bytes("README", vec![]).kind(), AttachmentKind::Other);
    }

    #[test]
    fn image_preview_is_data_url() {
        let att = Attachment::from_bytes("dot.gif", b"GIF".to_vec());
        assert_eq!(
            att.preview_data_url().as_deref(),
            Some("data:image/gif;base64,R0lG")
        );
    }

    #[test]
    fn pdf_has_no_image_preview() {
        let att = Attachment::from_bytes("syllabus.pdf", vec![1, 2, 3]);
        assert!(att.preview_data_url().is_none());
        assert_eq!(att.label(), "[pdf: syllabus.pdf]");
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        std::fs::write(&path, [0xff, 0xd8]).unwrap();

        let att = Attachment::from_path(&path).unwrap();
        assert_eq!(att.name, "photo.jpg");
        assert_eq!(att.mime, "image/jpeg");
        assert_eq!(att.data, vec![0xff, 0xd8]);
    }

    #[test]
    fn from_missing_path_is_io_error() {
        let err = Attachment::from_path(Path::new("/nonexistent/studybuddy.png")).unwrap_err();
        assert!(matches!(err, StudyBuddyError::Io(_)));
    }
}
