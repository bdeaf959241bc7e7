// config/mod.rs — FOLDERALIAS env var defaults
//
// Switch defaults and the legacy codepage, read from the FOLDERALIAS
// environment variable.  Command-line switches override these.

mod env_overrides;

use crate::environment_provider::{DefaultEnvironmentProvider, EnvironmentProvider};
use crate::line_store::TextEncoding;





/// Environment variable name
pub const FOLDERALIAS_ENV_VAR_NAME: &str = "FOLDERALIAS";





////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub message:              String,
    pub entry:                String,
    pub invalid_text:         String,
    pub invalid_text_offset:  usize,
}





#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ErrorInfo>,
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl ValidationResult
//
//  Returns true if there are any validation errors.
//
////////////////////////////////////////////////////////////////////////////////

impl ValidationResult {
    pub fn has_issues(&self) -> bool {
        !self.errors.is_empty()
    }
}





////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default)]
pub struct Config {
    // Switch defaults; None = not mentioned in the env var
    pub hide_file:    Option<bool>,
    pub refresh_icon: Option<bool>,
    pub debug:        Option<bool>,

    /// Codepage for files without a byte-order mark
    pub encoding:     Option<TextEncoding>,

    pub last_parse_result: ValidationResult,
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl Config
//
//  Construction from the process environment or an injected provider.
//
////////////////////////////////////////////////////////////////////////////////

impl Config {

    ////////////////////////////////////////////////////////////////////////////
    //
    //  new
    //
    //  Create an empty Config.  Call initialize() to parse the env var.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn new() -> Self {
        Config::default()
    }





    pub fn initialize(&mut self) {
        self.initialize_with_provider(&DefaultEnvironmentProvider);
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  initialize_with_provider
    //
    //  Initialize with a specific environment provider (for testing).
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn initialize_with_provider(&mut self, provider: &dyn EnvironmentProvider) {
        *self = Config::default();
        self.apply_env_overrides(provider);
    }





    /// Codepage to use: the configured one, else GBK.
    pub fn text_encoding(&self) -> TextEncoding {
        self.encoding.unwrap_or_default()
    }





    pub fn validate_environment_variable(&self) -> &ValidationResult {
        &self.last_parse_result
    }
}





#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment_provider::MockEnvironmentProvider;

    fn config_from(value: Option<&str>) -> Config {
        let mut mock = MockEnvironmentProvider::new();
        if let Some(v) = value {
            mock.set(FOLDERALIAS_ENV_VAR_NAME, v);
        }

        let mut config = Config::new();
        config.initialize_with_provider(&mock);
        config
    }

    ////////////////////////////////////////////////////////////////////////////
    //
    //  unset_env_var_leaves_defaults
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn unset_env_var_leaves_defaults() {
        let config = config_from(None);
        assert_eq!(config.hide_file, None);
        assert_eq!(config.refresh_icon, None);
        assert_eq!(config.debug, None);
        assert_eq!(config.text_encoding(), TextEncoding::GBK);
        assert!(!config.validate_environment_variable().has_issues());
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  switches_and_encoding
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn switches_and_encoding() {
        let config = config_from(Some(" h- ; R ;debug; Encoding = windows-1252 "));
        assert_eq!(config.hide_file, Some(false));
        assert_eq!(config.refresh_icon, Some(true));
        assert_eq!(config.debug, Some(true));
        assert_eq!(config.text_encoding().name(), "windows-1252");
        assert!(!config.last_parse_result.has_issues());
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  reinitialize_resets_previous_values
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn reinitialize_resets_previous_values() {
        let mut config = config_from(Some("H-;Bogus"));
        config.initialize_with_provider(&MockEnvironmentProvider::new());
        assert_eq!(config.hide_file, None);
        assert!(!config.last_parse_result.has_issues());
    }
}
