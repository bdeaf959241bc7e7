// line_store.rs — Lossless line-oriented text file storage
//
// Loads a configuration file into an ordered sequence of raw lines and writes
// it back.  Line content is never trimmed or normalized; the sequence also
// remembers the file's line terminator, trailing newline, and byte-order mark
// so an unchanged sequence saves to the same bytes it was loaded from.

use std::fs;
use std::io::Write;
use std::path::Path;

use encoding_rs::{Encoding, GBK, UTF_8, UTF_16BE, UTF_16LE};

use crate::ehm::AppError;





/// Legacy codepage used for files that carry no byte-order mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding(&'static Encoding);





////////////////////////////////////////////////////////////////////////////////
//
//  impl TextEncoding
//
//  Codepage selection by WHATWG label.
//
////////////////////////////////////////////////////////////////////////////////

impl TextEncoding {
    /// Simplified Chinese double-byte codepage (CP936).
    pub const GBK: TextEncoding = TextEncoding(GBK);

    ////////////////////////////////////////////////////////////////////////////
    //
    //  from_label
    //
    //  Looks up an encoding by label ("gbk", "windows-1252", "utf-8", ...).
    //  UTF-16 labels are rejected: encoding_rs cannot encode them without a
    //  byte-order mark.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn from_label(label: &str) -> Option<TextEncoding> {
        let encoding = Encoding::for_label(label.trim().as_bytes())?;

        if encoding == UTF_16LE || encoding == UTF_16BE {
            return None;
        }

        Some(TextEncoding(encoding))
    }





    pub fn name(&self) -> &'static str {
        self.0.name()
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl Default for TextEncoding
//
//  GBK, the codepage desktop.ini files are read and written with.
//
////////////////////////////////////////////////////////////////////////////////

impl Default for TextEncoding {
    fn default() -> Self {
        TextEncoding::GBK
    }
}





#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    CrLf,
    Lf,
}





impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::CrLf => "\r\n",
            LineEnding::Lf   => "\n",
        }
    }
}





/// Ordered, verbatim lines of a text file.
///
/// Structural edits consume the sequence and return a new one, so any
/// `SectionRange` computed against the old sequence can't be reused by
/// accident once the borrow ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSequence {
    lines:            Vec<String>,
    line_ending:      LineEnding,
    trailing_newline: bool,
    bom:              Option<&'static Encoding>,
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl Default for LineSequence
//
//  An empty file: CRLF terminators, trailing newline, no BOM.
//
////////////////////////////////////////////////////////////////////////////////

impl Default for LineSequence {
    fn default() -> Self {
        LineSequence {
            lines:            Vec::new(),
            line_ending:      LineEnding::CrLf,
            trailing_newline: true,
            bom:              None,
        }
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl LineSequence
//
//  Parsing, inspection, and copy-on-edit mutation.
//
////////////////////////////////////////////////////////////////////////////////

impl LineSequence {

    ////////////////////////////////////////////////////////////////////////////
    //
    //  from_text
    //
    //  Splits text on "\r\n", "\n", or "\r".  A terminator at the very end
    //  does not produce an extra empty line.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn from_text(text: &str) -> Self {
        let line_ending = if text.contains("\r\n") || !text.contains('\n') {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        };

        let mut lines = Vec::new();
        let mut rest  = text;

        while let Some(pos) = rest.find(['\r', '\n']) {
            lines.push(rest[..pos].to_string());

            let terminator_len = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
            rest = &rest[pos + terminator_len..];
        }

        let trailing_newline = text.is_empty() || rest.is_empty();
        if !rest.is_empty() {
            lines.push(rest.to_string());
        }

        LineSequence {
            lines,
            line_ending,
            trailing_newline,
            bom: None,
        }
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  to_text
    //
    //  Joins the lines with the remembered terminator.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn to_text(&self) -> String {
        let terminator = self.line_ending.as_str();
        let mut text   = self.lines.join(terminator);

        if self.trailing_newline && !self.lines.is_empty() {
            text.push_str(terminator);
        }

        text
    }





    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  with_replaced
    //
    //  Returns the sequence with the line at `index` replaced.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn with_replaced(mut self, index: usize, line: impl Into<String>) -> Self {
        self.lines[index] = line.into();
        self
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  with_inserted
    //
    //  Returns the sequence with `line` inserted before `index`.
    //  `index == len()` appends.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn with_inserted(mut self, index: usize, line: impl Into<String>) -> Self {
        self.lines.insert(index, line.into());
        self
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  with_appended
    //
    //  Returns the sequence with `lines` added at the end.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn with_appended<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  load
//
//  Reads and decodes `path`.  A UTF-8 or UTF-16 byte-order mark overrides
//  `encoding` and is remembered for save().  Malformed byte sequences decode
//  to U+FFFD with a warning.
//
////////////////////////////////////////////////////////////////////////////////

pub fn load(path: &Path, encoding: TextEncoding) -> Result<LineSequence, AppError> {
    let bytes = fs::read(path)?;

    let (text, bom, had_errors) = match Encoding::for_bom(&bytes) {
        Some((bom_encoding, bom_len)) => {
            let (text, had_errors) = bom_encoding.decode_without_bom_handling(&bytes[bom_len..]);
            (text, Some(bom_encoding), had_errors)
        }
        None => {
            let (text, had_errors) = encoding.0.decode_without_bom_handling(&bytes);
            (text, None, had_errors)
        }
    };

    if had_errors {
        tracing::warn!(
            path = %path.display(),
            encoding = bom.unwrap_or(encoding.0).name(),
            "file contains byte sequences that do not decode; replaced with U+FFFD"
        );
    }

    let mut lines = LineSequence::from_text(&text);
    lines.bom = bom;

    tracing::debug!(path = %path.display(), lines = lines.len(), "loaded");
    Ok(lines)
}





////////////////////////////////////////////////////////////////////////////////
//
//  encode
//
//  Encodes the sequence with its byte-order mark encoding if it has one,
//  otherwise with `encoding`.  Fails if the legacy codepage can't represent
//  every character.
//
////////////////////////////////////////////////////////////////////////////////

pub fn encode(lines: &LineSequence, encoding: TextEncoding, path: &Path) -> Result<Vec<u8>, AppError> {
    let text = lines.to_text();

    let bytes = match lines.bom {
        Some(bom) if bom == UTF_16LE => {
            let mut bytes = vec![0xFF, 0xFE];
            bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
            bytes
        }
        Some(bom) if bom == UTF_16BE => {
            let mut bytes = vec![0xFE, 0xFF];
            bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
            bytes
        }
        Some(_) => {
            let mut bytes = vec![0xEF, 0xBB, 0xBF];
            bytes.extend_from_slice(text.as_bytes());
            bytes
        }
        None if encoding.0 == UTF_8 => text.into_bytes(),
        None => {
            let (encoded, _, had_unmappable) = encoding.0.encode(&text);
            if had_unmappable {
                return Err(AppError::UnmappableText {
                    encoding: encoding.name(),
                    path:     path.to_path_buf(),
                });
            }
            encoded.into_owned()
        }
    };

    Ok(bytes)
}





////////////////////////////////////////////////////////////////////////////////
//
//  save
//
//  Encodes the sequence and replaces `path` atomically: the bytes go to a
//  temporary file in the same directory, which is then renamed over the
//  target.  The target's attributes are not carried over.
//
////////////////////////////////////////////////////////////////////////////////

pub fn save(path: &Path, lines: &LineSequence, encoding: TextEncoding) -> Result<(), AppError> {
    let bytes = encode(lines, encoding, path)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(&bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| AppError::Io(e.error))?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved");
    Ok(())
}





#[cfg(test)]
mod tests {
    use super::*;

    ////////////////////////////////////////////////////////////////////////////
    //
    //  split_preserves_whitespace
    //
    //  Verifies lines are stored verbatim, untrimmed.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn split_preserves_whitespace() {
        let seq = LineSequence::from_text("  [.ShellClassInfo]  \r\n\tIconFile = a.ico \r\n");
        assert_eq!(seq.lines(), &["  [.ShellClassInfo]  ", "\tIconFile = a.ico "]);
        assert_eq!(seq.line_ending(), LineEnding::CrLf);
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  round_trip_is_byte_identical
    //
    //  Verifies from_text/to_text reproduce the input for each terminator
    //  style, with and without a trailing newline.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn round_trip_is_byte_identical() {
        for text in [
            "",
            "a",
            "a\r\nb\r\n",
            "a\r\nb",
            "a\nb\n",
            "a\n\nb",
            "[x]\r\n\r\nk=v\r\n\r\n",
        ] {
            assert_eq!(LineSequence::from_text(text).to_text(), text, "input {text:?}");
        }
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  lone_cr_is_a_terminator
    //
    //  Verifies old-style "\r" terminators split lines.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn lone_cr_is_a_terminator() {
        let seq = LineSequence::from_text("a\rb");
        assert_eq!(seq.lines(), &["a", "b"]);
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  edits_return_new_sequence
    //
    //  Verifies replace, insert, and append touch only the named positions.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn edits_return_new_sequence() {
        let seq = LineSequence::from_text("a\nb\nc\n")
            .with_replaced(1, "B")
            .with_inserted(3, "d")
            .with_inserted(0, "z")
            .with_appended(["e"]);

        assert_eq!(seq.to_text(), "z\na\nB\nc\nd\ne\n");
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  empty_sequence_defaults_to_crlf
    //
    //  Verifies a fresh sequence writes CRLF with a trailing newline.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn empty_sequence_defaults_to_crlf() {
        let seq = LineSequence::default().with_appended(["[s]", "k=v"]);
        assert_eq!(seq.to_text(), "[s]\r\nk=v\r\n");
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  gbk_load_and_save
    //
    //  Verifies GBK bytes decode to Chinese text and encode back unchanged.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn gbk_load_and_save() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("desktop.ini");

        // "项目" in GBK
        let original: Vec<u8> = b"[.ShellClassInfo]\r\nLocalizedResourceName=\xCF\xEE\xC4\xBF\r\n".to_vec();
        fs::write(&path, &original).unwrap();

        let seq = load(&path, TextEncoding::GBK).unwrap();
        assert_eq!(seq.lines()[1], "LocalizedResourceName=项目");

        save(&path, &seq, TextEncoding::GBK).unwrap();
        assert_eq!(fs::read(&path).unwrap(), original);
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  utf16_bom_is_preserved
    //
    //  Verifies a UTF-16LE file with BOM loads and saves as UTF-16LE.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn utf16_bom_is_preserved() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("desktop.ini");

        let mut original = vec![0xFF, 0xFE];
        original.extend("[.ShellClassInfo]\r\nIconResource=a.dll,0\r\n".encode_utf16().flat_map(u16::to_le_bytes));
        fs::write(&path, &original).unwrap();

        let seq = load(&path, TextEncoding::GBK).unwrap();
        assert_eq!(seq.lines()[0], "[.ShellClassInfo]");

        save(&path, &seq, TextEncoding::GBK).unwrap();
        assert_eq!(fs::read(&path).unwrap(), original);
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  unmappable_text_is_rejected
    //
    //  Verifies text outside the codepage fails to encode.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn unmappable_text_is_rejected() {
        let latin1 = TextEncoding::from_label("windows-1252").unwrap();
        let seq    = LineSequence::default().with_appended(["LocalizedResourceName=项目"]);
        let result = encode(&seq, latin1, Path::new("desktop.ini"));
        assert!(matches!(result, Err(AppError::UnmappableText { .. })));
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  load_missing_file_is_io_error
    //
    //  Verifies a missing file surfaces as AppError::Io.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn load_missing_file_is_io_error() {
        let dir    = tempfile::tempdir().unwrap();
        let result = load(&dir.path().join("missing.ini"), TextEncoding::GBK);
        assert!(matches!(result, Err(AppError::Io(_))));
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  from_label_rejects_utf16
    //
    //  Verifies UTF-16 can't be chosen as the legacy codepage.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn from_label_rejects_utf16() {
        assert!(TextEncoding::from_label("utf-16le").is_none());
        assert!(TextEncoding::from_label("no-such-codepage").is_none());
        assert_eq!(TextEncoding::from_label("GBK").map(|e| e.name()), Some("GBK"));
    }
}
