// alias_value.rs — LocalizedResourceName value classification
//
// A value is either literal display text or a resource reference of the form
// `@<module path>,<string id>`, e.g. `@%SystemRoot%\system32\shell32.dll,-21770`.
// Malformed references are never an error; they degrade to literal text.

use crate::environment_provider::{expand_environment_strings, EnvironmentProvider};





/// Prefix marking a value as a resource reference.
pub const RESOURCE_REFERENCE_MARKER: char = '@';





#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasValue {
    /// Display text stored directly in the file.
    Literal(String),

    /// String-table entry `resource_id` in the module at `module_path`.
    /// The path has had its %NAME% placeholders expanded.
    ResourceReference {
        module_path: String,
        resource_id: i32,
    },
}





////////////////////////////////////////////////////////////////////////////////
//
//  parse_alias_value
//
//  Classifies the right-hand side of a LocalizedResourceName line.
//
//  The module path and id are split at the LAST comma, so module paths
//  containing commas still parse as long as the id follows the final one.
//  A reference with no usable comma, an empty module path, an id that isn't
//  a signed 32-bit integer, or a path that fails to expand becomes a
//  Literal of the text after the '@'.
//
////////////////////////////////////////////////////////////////////////////////

pub fn parse_alias_value(raw: &str, environment: &dyn EnvironmentProvider) -> AliasValue {
    let trimmed = raw.trim();

    match trimmed.strip_prefix(RESOURCE_REFERENCE_MARKER) {
        Some(reference) => parse_resource_reference(reference, environment)
            .unwrap_or_else(|| AliasValue::Literal(reference.to_string())),
        None => AliasValue::Literal(unquote(trimmed).to_string()),
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  reference_fallback_text
//
//  Text shown for a reference that can't be resolved: the trimmed raw value
//  without its leading '@'.
//
////////////////////////////////////////////////////////////////////////////////

pub fn reference_fallback_text(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix(RESOURCE_REFERENCE_MARKER)
        .unwrap_or(trimmed)
        .to_string()
}





fn parse_resource_reference(reference: &str, environment: &dyn EnvironmentProvider) -> Option<AliasValue> {
    let (module, id_text) = reference.rsplit_once(',')?;
    let module  = module.trim();
    let id_text = id_text.trim();

    if module.is_empty() {
        return None;
    }

    let resource_id = id_text.parse::<i32>().ok()?;
    let module_path = expand_environment_strings(module, environment)?;

    Some(AliasValue::ResourceReference { module_path, resource_id })
}





// Strips one pair of surrounding double quotes.
fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(text)
}
