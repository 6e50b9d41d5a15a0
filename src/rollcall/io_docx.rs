// Plain text of a Word (.docx) document.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::reader::Reader as XmlReader;

use crate::rollcall::*;

// The part of the package holding the document body.
const DOCUMENT_PART: &str = "word/document.xml";

pub fn read_docx_text(path: &str, bytes: &[u8]) -> RollcallResult<String> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).context(ParsingWordArchiveSnafu { path })?;
    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .context(ParsingWordArchiveSnafu { path })?
        .read_to_string(&mut xml)
        .context(ReadingWordPartSnafu { path })?;
    debug!("read_docx_text: {} bytes of XML", xml.len());
    document_text(&xml).context(ParsingWordXmlSnafu { path })
}

/// Extracts the text runs of a WordprocessingML body. Every paragraph ends
/// with a line break, tabs and explicit breaks are kept.
pub fn document_text(xml: &str) -> Result<String, quick_xml::Error> {
    let mut reader = XmlReader::from_str(xml);
    let mut res = String::new();
    let mut in_text = false;
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => res.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => res.push('\t'),
                b"w:br" | b"w:cr" | b"w:p" => res.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => res.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(res)
}
