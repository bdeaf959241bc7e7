// alias_reader.rs — Effective folder alias lookup
//
// Reads desktop.ini, finds the first LocalizedResourceName key in the
// [.ShellClassInfo] section, and turns its value into display text.
// Every failure along the way (missing file, unreadable file, missing
// section or key) means "no alias" and yields None.

use std::path::Path;

use crate::alias_value::{parse_alias_value, reference_fallback_text, AliasValue};
use crate::environment_provider::EnvironmentProvider;
use crate::line_store::{self, LineSequence, TextEncoding};
use crate::resource_resolver::ResourceStringResolver;
use crate::section_locator::{find_key, find_section};





pub const DESKTOP_INI_FILE_NAME:       &str = "desktop.ini";
pub const SHELL_CLASS_INFO_SECTION:    &str = ".ShellClassInfo";
pub const LOCALIZED_RESOURCE_NAME_KEY: &str = "LocalizedResourceName";





pub struct AliasReader<'a> {
    encoding:    TextEncoding,
    resolver:    &'a dyn ResourceStringResolver,
    environment: &'a dyn EnvironmentProvider,
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl AliasReader
//
//  Composes the line store, section locator, value parser, and resolver.
//
////////////////////////////////////////////////////////////////////////////////

impl<'a> AliasReader<'a> {
    pub fn new(
        encoding:    TextEncoding,
        resolver:    &'a dyn ResourceStringResolver,
        environment: &'a dyn EnvironmentProvider,
    ) -> Self {
        AliasReader { encoding, resolver, environment }
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  read_alias
    //
    //  Returns the alias of `folder`, or None if it has none.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn read_alias(&self, folder: &Path) -> Option<String> {
        self.read_alias_file(&folder.join(DESKTOP_INI_FILE_NAME))
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  read_alias_file
    //
    //  Same as read_alias, given the desktop.ini path directly.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn read_alias_file(&self, ini_path: &Path) -> Option<String> {
        if !ini_path.is_file() {
            tracing::debug!(path = %ini_path.display(), "no configuration file");
            return None;
        }

        let lines = match line_store::load(ini_path, self.encoding) {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!(path = %ini_path.display(), error = %e, "cannot read configuration file");
                return None;
            }
        };

        self.alias_from_lines(&lines)
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  alias_from_lines
    //
    //  Resolves the alias from an already-loaded sequence.  An unresolvable
    //  resource reference yields its own text minus the leading '@'.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn alias_from_lines(&self, lines: &LineSequence) -> Option<String> {
        let section = find_section(lines, SHELL_CLASS_INFO_SECTION)?;
        let key     = find_key(lines, &section, LOCALIZED_RESOURCE_NAME_KEY)?;

        match parse_alias_value(key.value, self.environment) {
            AliasValue::Literal(text) => Some(text),

            AliasValue::ResourceReference { module_path, resource_id } => {
                let resolved = self.resolver
                    .resolve(&module_path, resource_id)
                    .filter(|text| !text.is_empty());

                match resolved {
                    Some(text) => {
                        tracing::debug!(module_path = %module_path, resource_id, "resolved resource reference");
                        Some(text)
                    }
                    None => Some(reference_fallback_text(key.value)),
                }
            }
        }
    }
}
