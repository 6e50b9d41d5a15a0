// Dispatch from a file name to the matching text extractor.

use crate::rollcall::*;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum DocumentKind {
    Word,
    Excel,
}

impl DocumentKind {
    /// Only the extension counts (case-insensitive), never the content.
    pub fn from_path(path: &str) -> Option<DocumentKind> {
        let ext = path.rsplit('.').next()?.to_lowercase();
        match ext.as_str() {
            "docx" => Some(DocumentKind::Word),
            "xlsx" => Some(DocumentKind::Excel),
            _ => None,
        }
    }
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Reads the whole text of a Word or Excel document.
///
/// Other extensions are refused before the file is even opened.
pub fn read_document(path: &str) -> RollcallResult<String> {
    let kind = DocumentKind::from_path(path).context(UnsupportedFileTypeSnafu { path })?;
    let bytes = fs::read(path).context(ReadingInputSnafu { path })?;
    debug!(
        "read_document: {} ({:?}, {} bytes)",
        simplify_file_name(path),
        kind,
        bytes.len()
    );
    match kind {
        DocumentKind::Word => io_docx::read_docx_text(path, &bytes),
        DocumentKind::Excel => io_xlsx::read_xlsx_text(path, bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(DocumentKind::from_path("a/名單.docx"), Some(DocumentKind::Word));
        assert_eq!(DocumentKind::from_path("NAMES.XLSX"), Some(DocumentKind::Excel));
        assert_eq!(DocumentKind::from_path("names.xls"), None);
        assert_eq!(DocumentKind::from_path("names.docx.txt"), None);
        assert_eq!(DocumentKind::from_path("docx"), Some(DocumentKind::Word));
        assert_eq!(DocumentKind::from_path(""), None);
    }

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("/tmp/class/名單.docx"), "名單.docx");
        assert_eq!(simplify_file_name("名單.xlsx"), "名單.xlsx");
    }

    #[test]
    fn unsupported_before_reading() {
        // The file does not exist, the extension is checked first.
        let err = read_document("/nonexistent/names.csv").unwrap_err();
        assert!(matches!(err, RollcallError::UnsupportedFileType { .. }));
        let err = read_document("/nonexistent/names.docx").unwrap_err();
        assert!(matches!(err, RollcallError::ReadingInput { .. }));
    }
}
