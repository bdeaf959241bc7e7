// section_locator.rs — [Section] range and key lookup
//
// Finds the line range belonging to a named section and the first line in
// that range assigning a given key.  All matching is case-insensitive and
// applied to trimmed copies of the lines; the sequence is never modified.

use crate::line_store::LineSequence;





/// Line-index range of a section's body: the lines after its header, up to
/// (not including) the next header or the end of the sequence.
///
/// A SectionRange is only valid for the sequence it was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRange {
    pub name:        String,
    pub header_line: usize,
    pub start_line:  usize,
    pub end_line:    usize,
}





/// A `key=value` line found within a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLine<'a> {
    pub line_index: usize,
    pub value:      &'a str,
}





////////////////////////////////////////////////////////////////////////////////
//
//  header_name
//
//  Returns the trimmed name between the brackets if `line` is a section
//  header, otherwise None.
//
////////////////////////////////////////////////////////////////////////////////

pub fn header_name(line: &str) -> Option<&str> {
    let trimmed = line.trim();

    trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map(str::trim)
}





////////////////////////////////////////////////////////////////////////////////
//
//  find_section
//
//  Locates the first header matching `section_name` (case-insensitive).
//  Later sections with the same name are ignored.
//
////////////////////////////////////////////////////////////////////////////////

pub fn find_section(lines: &LineSequence, section_name: &str) -> Option<SectionRange> {
    let all = lines.lines();

    let header_line = all.iter().position(|line| {
        header_name(line).is_some_and(|name| name.eq_ignore_ascii_case(section_name))
    })?;

    let start_line = header_line + 1;
    let end_line   = all[start_line..]
        .iter()
        .position(|line| header_name(line).is_some())
        .map_or(all.len(), |offset| start_line + offset);

    Some(SectionRange {
        name: section_name.to_string(),
        header_line,
        start_line,
        end_line,
    })
}





////////////////////////////////////////////////////////////////////////////////
//
//  find_key
//
//  Returns the first line in `range` whose trimmed text starts with
//  "<key>=" (case-insensitive), along with the text after the '='.
//
////////////////////////////////////////////////////////////////////////////////

pub fn find_key<'a>(lines: &'a LineSequence, range: &SectionRange, key: &str) -> Option<KeyLine<'a>> {
    let all = lines.lines();

    (range.start_line..range.end_line.min(all.len())).find_map(|line_index| {
        let trimmed = all[line_index].trim();
        let (name, value) = trimmed.split_once('=')?;

        (name.eq_ignore_ascii_case(key)).then_some(KeyLine { line_index, value })
    })
}





#[cfg(test)]
mod tests {
    use super::*;

    fn seq(text: &str) -> LineSequence {
        LineSequence::from_text(text)
    }

    #[test]
    fn header_name_trims_brackets_and_whitespace() {
        assert_eq!(header_name("  [ .ShellClassInfo ]  "), Some(".ShellClassInfo"));
        assert_eq!(header_name("[]"), Some(""));
        assert_eq!(header_name("key=[value]"), None);
        assert_eq!(header_name("[unterminated"), None);
    }

    #[test]
    fn find_section_in_middle() {
        let lines = seq("[a]\nx=1\n[.ShellClassInfo]\ny=2\n\n[b]\nz=3\n");
        let range = find_section(&lines, ".ShellClassInfo").unwrap();
        assert_eq!((range.header_line, range.start_line, range.end_line), (2, 3, 5));
    }

    #[test]
    fn find_section_last_runs_to_end() {
        let lines = seq("[a]\nx=1\n[.ShellClassInfo]\ny=2\n");
        let range = find_section(&lines, ".ShellClassInfo").unwrap();
        assert_eq!((range.start_line, range.end_line), (3, 4));
    }

    #[test]
    fn find_section_is_case_insensitive() {
        let lines = seq("[.shellclassinfo]\n");
        assert!(find_section(&lines, ".ShellClassInfo").is_some());
    }

    #[test]
    fn find_section_uses_first_duplicate() {
        let lines = seq("[s]\na=1\n[s]\nb=2\n");
        let range = find_section(&lines, "s").unwrap();
        assert_eq!((range.start_line, range.end_line), (1, 2));
    }

    #[test]
    fn find_section_missing() {
        let lines = seq("[a]\nx=1\n");
        assert!(find_section(&lines, ".ShellClassInfo").is_none());
        assert!(find_section(&LineSequence::default(), "a").is_none());
    }

    #[test]
    fn find_key_first_occurrence_wins() {
        let lines = seq("[s]\n  localizedresourcename=One\nLocalizedResourceName=Two\n");
        let range = find_section(&lines, "s").unwrap();
        let key   = find_key(&lines, &range, "LocalizedResourceName").unwrap();
        assert_eq!((key.line_index, key.value), (1, "One"));
    }

    #[test]
    fn find_key_stays_inside_section() {
        let lines = seq("[s]\nIconFile=a.ico\n[t]\nLocalizedResourceName=Other\n");
        let range = find_section(&lines, "s").unwrap();
        assert!(find_key(&lines, &range, "LocalizedResourceName").is_none());
    }

    #[test]
    fn find_key_requires_exact_key_name() {
        let lines = seq("[s]\nLocalizedResourceNameX=1\nLocalizedResourceName =2\n");
        let range = find_section(&lines, "s").unwrap();
        assert!(find_key(&lines, &range, "LocalizedResourceName").is_none());
    }
}
