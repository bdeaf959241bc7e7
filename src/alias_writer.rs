// alias_writer.rs — LocalizedResourceName upsert
//
// Sets the alias in desktop.ini, touching as little of the file as possible:
//   1. key present in [.ShellClassInfo]   → replace that one line
//   2. section present, key absent        → insert the key at the section's end
//   3. section absent                     → append a new section to the file
// Unrelated lines are never reordered, rewritten, or removed.

use std::io::ErrorKind;
use std::path::Path;

use crate::alias_reader::{DESKTOP_INI_FILE_NAME, LOCALIZED_RESOURCE_NAME_KEY, SHELL_CLASS_INFO_SECTION};
use crate::ehm::AppError;
use crate::line_store::{self, LineSequence, TextEncoding};
use crate::section_locator::{find_key, find_section};





/// Which structural case a write applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Replaced,
    Inserted,
    SectionAppended,
}





pub struct AliasWriter {
    encoding: TextEncoding,
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl AliasWriter
//
//  Load, upsert, save.
//
////////////////////////////////////////////////////////////////////////////////

impl AliasWriter {
    pub fn new(encoding: TextEncoding) -> Self {
        AliasWriter { encoding }
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  write_alias
    //
    //  Sets the alias of `folder`.  The value is written as given; callers
    //  reject blank aliases before getting here.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn write_alias(&self, folder: &Path, new_alias: &str) -> Result<WriteOutcome, AppError> {
        self.write_alias_file(&folder.join(DESKTOP_INI_FILE_NAME), new_alias)
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  write_alias_file
    //
    //  Same as write_alias, given the desktop.ini path directly.  A missing
    //  file is created.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn write_alias_file(&self, ini_path: &Path, new_alias: &str) -> Result<WriteOutcome, AppError> {
        let lines = match line_store::load(ini_path, self.encoding) {
            Ok(lines) => lines,
            Err(AppError::Io(e)) if e.kind() == ErrorKind::NotFound => LineSequence::default(),
            Err(e) => return Err(e),
        };

        let (updated, outcome) = upsert_alias(lines, new_alias);
        line_store::save(ini_path, &updated, self.encoding)?;

        tracing::debug!(path = %ini_path.display(), ?outcome, "alias written");
        Ok(outcome)
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  upsert_alias
//
//  Returns `lines` with the alias set, and which case applied.
//
////////////////////////////////////////////////////////////////////////////////

pub fn upsert_alias(lines: LineSequence, new_alias: &str) -> (LineSequence, WriteOutcome) {
    let key_line = format!("{LOCALIZED_RESOURCE_NAME_KEY}={new_alias}");

    let Some(section) = find_section(&lines, SHELL_CLASS_INFO_SECTION) else {
        let needs_separator = lines.lines().last().is_some_and(|line| !line.trim().is_empty());

        let mut block = Vec::with_capacity(3);
        if needs_separator {
            block.push(String::new());
        }
        block.push(format!("[{SHELL_CLASS_INFO_SECTION}]"));
        block.push(key_line);

        return (lines.with_appended(block), WriteOutcome::SectionAppended);
    };

    let key_index = find_key(&lines, &section, LOCALIZED_RESOURCE_NAME_KEY).map(|key| key.line_index);

    match key_index {
        Some(index) => (lines.with_replaced(index, key_line), WriteOutcome::Replaced),
        None        => (lines.with_inserted(section.end_line, key_line), WriteOutcome::Inserted),
    }
}
