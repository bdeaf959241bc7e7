// environment_provider.rs — Environment variable abstraction
//
// Provides a trait for env var access so Config and the %NAME% expansion of
// resource-reference module paths can be tested with mock values.

/// Maximum length, in UTF-16 units, of an expanded environment string.
pub const MAX_EXPANDED_LENGTH: usize = 32_767;





/// Trait for environment variable access.
/// Enables unit testing without depending on actual env vars.
pub trait EnvironmentProvider {

    ////////////////////////////////////////////////////////////////////////////
    //
    //  get_env_var
    //
    //  Returns the value of the named environment variable, if set.
    //
    ////////////////////////////////////////////////////////////////////////////

    fn get_env_var(&self, name: &str) -> Option<String>;
}





/// Default implementation that reads from the actual process environment.
pub struct DefaultEnvironmentProvider;





////////////////////////////////////////////////////////////////////////////////
//
//  impl EnvironmentProvider for DefaultEnvironmentProvider
//
//  Reads the named environment variable from the process environment.
//
////////////////////////////////////////////////////////////////////////////////

impl EnvironmentProvider for DefaultEnvironmentProvider {
    fn get_env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  expand_environment_strings
//
//  Replaces each %NAME% placeholder with the value of NAME.  Undefined
//  names and an unpaired '%' are left verbatim, as the shell does.
//  Returns None when the result exceeds MAX_EXPANDED_LENGTH.
//
////////////////////////////////////////////////////////////////////////////////

pub fn expand_environment_strings(source: &str, provider: &dyn EnvironmentProvider) -> Option<String> {
    let mut expanded = String::with_capacity(source.len());
    let mut rest     = source;

    while let Some(open) = rest.find('%') {
        expanded.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let Some(close) = after_open.find('%') else {
            expanded.push_str(&rest[open..]);
            rest = "";
            break;
        };

        let name = &after_open[..close];

        match provider.get_env_var(name) {
            Some(value) if !name.is_empty() => {
                expanded.push_str(&value);
                rest = &after_open[close + 1..];
            }
            _ => {
                // Keep "%NAME" and rescan from the closing '%', which may
                // open the next placeholder.
                expanded.push('%');
                expanded.push_str(name);
                rest = &after_open[close..];
            }
        }
    }

    expanded.push_str(rest);

    if expanded.encode_utf16().count() > MAX_EXPANDED_LENGTH {
        return None;
    }

    Some(expanded)
}





/// Mock implementation for unit tests.
/// Stores preset key-value pairs.
#[cfg(test)]
pub struct MockEnvironmentProvider {
    vars: std::collections::HashMap<String, String>,
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl Default for MockEnvironmentProvider
//
//  Returns a new empty MockEnvironmentProvider.
//
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
impl Default for MockEnvironmentProvider {
    fn default() -> Self {
        Self::new()
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl MockEnvironmentProvider
//
//  Mock environment setup for unit tests.
//
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
impl MockEnvironmentProvider {

    ////////////////////////////////////////////////////////////////////////////
    //
    //  new
    //
    //  Creates a new empty MockEnvironmentProvider.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn new() -> Self {
        MockEnvironmentProvider {
            vars: std::collections::HashMap::new(),
        }
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  set
    //
    //  Sets a key-value pair in the mock environment.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn set(&mut self, name: &str, value: &str) {
        self.vars.insert(name.into(), value.into());
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl EnvironmentProvider for MockEnvironmentProvider
//
//  Returns the mock value for the named variable, if set.
//
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
impl EnvironmentProvider for MockEnvironmentProvider {
    fn get_env_var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}





#[cfg(test)]
mod tests {
    use super::*;

    ////////////////////////////////////////////////////////////////////////////
    //
    //  default_provider_reads_path
    //
    //  Verifies DefaultEnvironmentProvider reads the PATH variable.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn default_provider_reads_path() {
        let provider = DefaultEnvironmentProvider;
        assert!(provider.get_env_var("PATH").is_some());
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  default_provider_returns_none_for_missing
    //
    //  Verifies DefaultEnvironmentProvider returns None for missing vars.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn default_provider_returns_none_for_missing() {
        let provider = DefaultEnvironmentProvider;
        assert!(provider.get_env_var("FOLDERALIAS_NONEXISTENT_VAR_12345").is_none());
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  mock_provider_returns_set_values
    //
    //  Verifies MockEnvironmentProvider returns preset values.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn mock_provider_returns_set_values() {
        let mut mock = MockEnvironmentProvider::new();
        mock.set("FOLDERALIAS", "H-;Debug");
        assert_eq!(mock.get_env_var("FOLDERALIAS"), Some("H-;Debug".into()));
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  mock_provider_returns_none_for_unset
    //
    //  Verifies MockEnvironmentProvider returns None for unset vars.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn mock_provider_returns_none_for_unset() {
        let mock = MockEnvironmentProvider::new();
        assert!(mock.get_env_var("FOLDERALIAS").is_none());
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  expand_replaces_defined_variable
    //
    //  Verifies a defined %NAME% is replaced by its value.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn expand_replaces_defined_variable() {
        let mut mock = MockEnvironmentProvider::new();
        mock.set("SystemRoot", r"C:\Windows");
        let expanded = expand_environment_strings(r"%SystemRoot%\system32\shell32.dll", &mock);
        assert_eq!(expanded.as_deref(), Some(r"C:\Windows\system32\shell32.dll"));
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  expand_leaves_undefined_variable
    //
    //  Verifies an undefined %NAME% is left verbatim.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn expand_leaves_undefined_variable() {
        let mock = MockEnvironmentProvider::new();
        let expanded = expand_environment_strings(r"%NoSuchVar%\a.dll", &mock);
        assert_eq!(expanded.as_deref(), Some(r"%NoSuchVar%\a.dll"));
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  expand_rescans_after_undefined_variable
    //
    //  Verifies the closing '%' of an undefined name can open the next one.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn expand_rescans_after_undefined_variable() {
        let mut mock = MockEnvironmentProvider::new();
        mock.set("B", "x");
        let expanded = expand_environment_strings("%A%B%", &mock);
        assert_eq!(expanded.as_deref(), Some("%Ax"));
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  expand_keeps_unpaired_percent
    //
    //  Verifies a trailing unpaired '%' and an empty "%%" are kept.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn expand_keeps_unpaired_percent() {
        let mock = MockEnvironmentProvider::new();
        assert_eq!(expand_environment_strings("100%", &mock).as_deref(), Some("100%"));
        assert_eq!(expand_environment_strings("a%%b", &mock).as_deref(), Some("a%%b"));
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  expand_rejects_overlong_result
    //
    //  Verifies expansion fails past the host length limit.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn expand_rejects_overlong_result() {
        let mut mock = MockEnvironmentProvider::new();
        mock.set("BIG", &"x".repeat(MAX_EXPANDED_LENGTH));
        assert!(expand_environment_strings("%BIG%", &mock).is_some());
        assert!(expand_environment_strings("%BIG%y", &mock).is_none());
    }
}
