// usage.rs — Help screen, env-var help, env-var issue display

use std::io::{self, Write};

use crate::config::{Config, FOLDERALIAS_ENV_VAR_NAME};
use crate::environment_provider::EnvironmentProvider;





////////////////////////////////////////////////////////////////////////////////

pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

pub const OVERLINE: char = '\u{203E}';  // ‾





////////////////////////////////////////////////////////////////////////////////
//
//  architecture
//
//  Returns the current CPU architecture as a display string.
//
////////////////////////////////////////////////////////////////////////////////

fn architecture() -> &'static str {
    if cfg!(target_arch = "x86_64") {
        "x64"
    } else if cfg!(target_arch = "aarch64") {
        "ARM64"
    } else if cfg!(target_arch = "x86") {
        "x86"
    } else {
        "unknown"
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  display_usage
//
//  Display the main usage/help screen.
//
////////////////////////////////////////////////////////////////////////////////

pub fn display_usage(out: &mut dyn Write, prefix: char) -> io::Result<()> {
    let short = if prefix == '-' { "-" } else { "/" };
    let long  = if prefix == '-' { "--" } else { "/" };
    let lpad  = if prefix == '-' { "" } else { " " };

    // Source indentation is output indentation.
    write!(out, "\
FolderAlias version {ver} {arch}
Copyright 2026 by Robert Elmer

Displays or changes the name Explorer shows for a folder.

FOLDERALIAS [{short}H[-]] [{short}R[-]] [{long}Env] [{long}Debug] folder [alias]

  folder       The folder whose display name is shown or changed.
  alias        The new display name.  Omit to print the current one.
               A blank alias leaves the folder unchanged.

  {short}H          Hides desktop.ini after changing it (default).  {short}H- to disable.
  {short}R          Asks Explorer to refresh the folder (default).  {short}R- to disable.
  {long}Env       {lpad}Displays {FOLDERALIAS_ENV_VAR_NAME} help, syntax, and current value.
  {long}Debug     {lpad}Logs each step to stderr.
  {short}?          Displays this help.
",
        ver  = VERSION_STRING,
        arch = architecture(),
    )
}





////////////////////////////////////////////////////////////////////////////////
//
//  display_env_var_help
//
//  Display FOLDERALIAS environment variable help with syntax, an example,
//  and the current value.
//
////////////////////////////////////////////////////////////////////////////////

pub fn display_env_var_help(
    out:      &mut dyn Write,
    provider: &dyn EnvironmentProvider,
    config:   &Config,
    prefix:   char,
) -> io::Result<()> {
    let is_powershell = provider.get_env_var("PSModulePath").is_some();

    let (syntax_cmd, syntax_suffix, example_cmd) = if is_powershell {
        (
            format!("  $env:{FOLDERALIAS_ENV_VAR_NAME} = \""),
            "\"",
            format!("  Example: $env:{FOLDERALIAS_ENV_VAR_NAME} = \"H-;Encoding=Big5\""),
        )
    } else {
        (
            format!("  set {FOLDERALIAS_ENV_VAR_NAME} ="),
            "",
            format!("  Example: set {FOLDERALIAS_ENV_VAR_NAME} = H-;Encoding=Big5"),
        )
    };

    write!(out, "
Set the {FOLDERALIAS_ENV_VAR_NAME} environment variable to change the default switches and
the codepage used for desktop.ini files that have no byte-order mark:
{syntax_cmd}<Switch> | Encoding = <label>[;...]{syntax_suffix}

  <Switch>    A command-line switch:
                  H-       Do not hide desktop.ini after changing it
                  R-       Do not ask Explorer to refresh the folder
                  Debug    Log each step to stderr

  <label>     A codepage name such as GBK (default), Big5, Shift_JIS,
              windows-1252, or UTF-8.

{example_cmd}

")?;

    match provider.get_env_var(FOLDERALIAS_ENV_VAR_NAME) {
        Some(value) => {
            let shown = if value.is_empty() { "<empty>".to_string() } else { format!("\"{value}\"") };
            writeln!(out, "Your settings:\n\n  {FOLDERALIAS_ENV_VAR_NAME} = {shown}")?;
            display_env_var_issues(out, config, prefix, false)
        }
        None => writeln!(out, "  {FOLDERALIAS_ENV_VAR_NAME} environment variable is not set."),
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  display_env_var_issues
//
//  Display validation errors from the FOLDERALIAS env var, underlining the
//  offending text.
//
////////////////////////////////////////////////////////////////////////////////

pub fn display_env_var_issues(
    out:       &mut dyn Write,
    config:    &Config,
    prefix:    char,
    show_hint: bool,
) -> io::Result<()> {
    let result = config.validate_environment_variable();

    if !result.has_issues() {
        return Ok(());
    }

    let long = if prefix == '-' { "--" } else { "/" };
    let hint = if show_hint {
        format!(" (see {long}env for help)")
    } else {
        String::new()
    };

    writeln!(out, "\nThere are some problems with your {FOLDERALIAS_ENV_VAR_NAME} environment variable{hint}:")?;

    for error in &result.errors {
        // Column where the entry text starts: 2 spaces, message, ` in "`
        let prefix_len = 2 + error.message.chars().count() + 5 + error.invalid_text_offset;
        let underline: String = std::iter::repeat_n(OVERLINE, error.invalid_text.chars().count()).collect();

        writeln!(out, "  {} in \"{}\"", error.message, error.entry)?;
        writeln!(out, "{:>width$}{}\n", "", underline, width = prefix_len)?;
    }

    Ok(())
}
