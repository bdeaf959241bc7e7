// env_overrides.rs — FOLDERALIAS environment variable parsing
//
// Extends impl Config with the methods that parse the FOLDERALIAS
// environment variable: `;`-separated switch names (H, H-, R, R-, Debug)
// and `Encoding=<label>`.

use crate::environment_provider::EnvironmentProvider;
use crate::line_store::TextEncoding;

use super::{Config, ErrorInfo, FOLDERALIAS_ENV_VAR_NAME};





////////////////////////////////////////////////////////////////////////////////
//
//  impl Config: env var parsing methods
//
////////////////////////////////////////////////////////////////////////////////

impl Config {

    ////////////////////////////////////////////////////////////////////////////
    //
    //  apply_env_overrides
    //
    //  Parse the FOLDERALIAS environment variable.  Bad entries are
    //  recorded in last_parse_result and otherwise skipped.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub(super) fn apply_env_overrides(&mut self, provider: &dyn EnvironmentProvider) {
        self.last_parse_result.errors.clear();

        let env_value = match provider.get_env_var (FOLDERALIAS_ENV_VAR_NAME) {
            Some (v) => v,
            None => return,
        };

        for entry_raw in env_value.split (';') {
            let entry = entry_raw.trim();
            if entry.is_empty() {
                continue;
            }
            self.process_override_entry (entry);
        }
    }





    fn process_override_entry(&mut self, entry: &str) {
        // Check for switch prefixes (/, -, --) are not allowed in env var
        if entry.starts_with('/') || entry.starts_with('-') {
            let prefix_len = if entry.starts_with("--") { 2 } else { 1 };
            self.last_parse_result.errors.push (ErrorInfo {
                message:             "Switch prefixes (/, -, --) are not allowed in env var".into(),
                entry:               entry.into(),
                invalid_text:        entry[..prefix_len].into(),
                invalid_text_offset: 0,
            });
            return;
        }

        if is_switch_name (entry) {
            self.process_switch_override (entry);
            return;
        }

        let (key, value) = match parse_key_and_value (entry) {
            Some (kv) => kv,
            None => {
                self.last_parse_result.errors.push (ErrorInfo {
                    message:             "Invalid entry (expected H, R, Debug, or Encoding = label)".into(),
                    entry:               entry.into(),
                    invalid_text:        entry.into(),
                    invalid_text_offset: 0,
                });
                return;
            }
        };

        if !key.eq_ignore_ascii_case ("encoding") {
            self.last_parse_result.errors.push (ErrorInfo {
                message:             "Unknown key (expected Encoding)".into(),
                entry:               entry.into(),
                invalid_text:        key.into(),
                invalid_text_offset: entry.find (key).unwrap_or (0),
            });
            return;
        }

        self.process_encoding_override (entry, value);
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  process_switch_override
    //
    //  Look up entry in the SWITCH_MAPPINGS table (case-insensitive).
    //  On match, set the corresponding Option<bool> field.
    //
    ////////////////////////////////////////////////////////////////////////////

    fn process_switch_override(&mut self, entry: &str) {
        for &(name, value, accessor) in SWITCH_MAPPINGS {
            if entry.eq_ignore_ascii_case (name) {
                *accessor (self) = Some (value);
                return;
            }
        }
    }





    fn process_encoding_override(&mut self, entry: &str, label: &str) {
        match TextEncoding::from_label (label) {
            Some (encoding) => self.encoding = Some (encoding),
            None => self.last_parse_result.errors.push (ErrorInfo {
                message:             "Unknown or unsupported encoding label".into(),
                entry:               entry.into(),
                invalid_text:        label.into(),
                invalid_text_offset: entry.rfind (label).unwrap_or (0),
            }),
        }
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  SWITCH_MAPPINGS
//
//  Table-driven switch dispatch.  Each entry maps a name
//  (case-insensitive) to a boolean value and a field accessor.
//
////////////////////////////////////////////////////////////////////////////////

type SwitchAccessor = fn(&mut Config) -> &mut Option<bool>;

const SWITCH_MAPPINGS: &[(&str, bool, SwitchAccessor)] = &[
    ("h",       true,  |c| &mut c.hide_file),
    ("h-",      false, |c| &mut c.hide_file),
    ("r",       true,  |c| &mut c.refresh_icon),
    ("r-",      false, |c| &mut c.refresh_icon),
    ("debug",   true,  |c| &mut c.debug),
];





fn is_switch_name(entry: &str) -> bool {
    SWITCH_MAPPINGS.iter().any (|&(name, _, _)| entry.eq_ignore_ascii_case (name))
}





////////////////////////////////////////////////////////////////////////////////
//
//  parse_key_and_value
//
//  Split an entry on '=' into key and value, trimming whitespace.
//
////////////////////////////////////////////////////////////////////////////////

fn parse_key_and_value(entry: &str) -> Option<(&str, &str)> {
    let eq_pos = entry.find('=')?;
    let key = entry[..eq_pos].trim();
    let value = entry[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}





#[cfg(test)]
mod tests {
    use crate::config::{Config, FOLDERALIAS_ENV_VAR_NAME};
    use crate::environment_provider::MockEnvironmentProvider;

    fn errors_for(value: &str) -> Vec<String> {
        let mut mock = MockEnvironmentProvider::new();
        mock.set(FOLDERALIAS_ENV_VAR_NAME, value);

        let mut config = Config::new();
        config.initialize_with_provider(&mock);
        config.last_parse_result.errors.iter().map(|e| e.invalid_text.clone()).collect()
    }

    #[test]
    fn switch_prefix_rejected() {
        assert_eq!(errors_for("/H;--debug"), vec!["/", "--"]);
    }

    #[test]
    fn unknown_switch_rejected() {
        assert_eq!(errors_for("W"), vec!["W"]);
    }

    #[test]
    fn unknown_key_rejected() {
        assert_eq!(errors_for("Color=Red"), vec!["Color"]);
    }

    #[test]
    fn bad_encoding_rejected() {
        assert_eq!(errors_for("Encoding=klingon;Encoding=utf-16le"), vec!["klingon", "utf-16le"]);
    }

    #[test]
    fn empty_value_rejected() {
        assert_eq!(errors_for("Encoding="), vec!["Encoding="]);
    }

    #[test]
    fn last_entry_wins() {
        let mut mock = MockEnvironmentProvider::new();
        mock.set(FOLDERALIAS_ENV_VAR_NAME, "R-;R");

        let mut config = Config::new();
        config.initialize_with_provider(&mock);
        assert_eq!(config.refresh_icon, Some(true));
    }
}
