// command_line.rs — CLI argument parsing (custom, no clap)
//
// Windows-style /switch and -switch prefixes, long switches (--env, /debug),
// trailing - disable (/h-).  Positional arguments are the folder and,
// optionally, the new alias.  A bare "--" ends switch parsing so an alias
// may start with '-'.

use std::path::PathBuf;

use crate::config::Config;
use crate::ehm::AppError;

// ── CommandLine struct ────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct CommandLine {
    pub folder:         Option<PathBuf>,
    pub alias:          Option<String>,
    pub hide_file:      bool,
    pub refresh_icon:   bool,
    pub show_env_help:  bool,
    pub show_help:      bool,
    pub switch_prefix:  char,
    pub debug:          bool,
}

impl Default for CommandLine {
    fn default() -> Self {
        CommandLine {
            folder:         None,
            alias:          None,
            hide_file:      true,
            refresh_icon:   true,
            show_env_help:  false,
            show_help:      false,
            switch_prefix:  '-',
            debug:          false,
        }
    }
}

/// '/' starts a switch only where it can't start a path.
fn is_switch_prefix(ch: char) -> bool {
    ch == '-' || (cfg!(windows) && ch == '/')
}

impl CommandLine {
    /// Parse command-line arguments into a CommandLine struct.
    /// Args should NOT include argv[0] (program name).
    pub fn parse_from<I, S>(args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::parse_with_config(&Config::default(), args)
    }



    /// Same as parse_from, starting from the FOLDERALIAS defaults in `config`.
    pub fn parse_with_config<I, S>(config: &Config, args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cmd = CommandLine::default();
        cmd.apply_config_defaults(config);

        let mut positionals    = Vec::new();
        let mut switches_ended = false;

        for arg_ref in args {
            let arg = arg_ref.as_ref();
            if arg.is_empty() {
                continue;
            }

            let Some(first_char) = arg.chars().next() else {
                continue;
            };

            if switches_ended || !is_switch_prefix(first_char) {
                positionals.push(arg.to_string());
                continue;
            }

            if arg == "--" {
                switches_ended = true;
                continue;
            }

            cmd.switch_prefix = first_char;

            let switch_arg;
            let mut is_double_dash = false;

            // Check for '--' prefix
            if first_char == '-' && arg.starts_with("--") {
                switch_arg = &arg[2..];
                is_double_dash = true;
            } else {
                switch_arg = &arg[1..];
            }

            // Detect long switch: 3+ chars without '-' at position 1
            let looks_like_long = switch_arg.len() >= 3
                && switch_arg.as_bytes().get(1) != Some(&b'-');

            // Reject single-dash long switches (e.g., -env → error)
            if looks_like_long && !is_double_dash && first_char == '-' {
                return Err(AppError::InvalidArg(format!("Unknown switch: {arg}")));
            }

            cmd.handle_switch(switch_arg, arg)?;
        }

        let mut positionals = positionals.into_iter();
        cmd.folder = positionals.next().map(PathBuf::from);
        cmd.alias  = positionals.next();

        if let Some(extra) = positionals.next() {
            return Err(AppError::InvalidArg(format!(
                "Unexpected argument: {extra} (quote an alias that contains spaces)"
            )));
        }

        Ok(cmd)
    }

    /// Apply switch defaults from Config (parsed from FOLDERALIAS environment variable).
    /// Env defaults are applied BEFORE command-line parsing overrides them.
    pub fn apply_config_defaults(&mut self, config: &Config) {
        if let Some(v) = config.hide_file    { self.hide_file    = v; }
        if let Some(v) = config.refresh_icon { self.refresh_icon = v; }
        if let Some(v) = config.debug        { self.debug        = v; }
    }

    /// Route a switch argument to the appropriate handler.
    fn handle_switch(&mut self, switch_arg: &str, arg: &str) -> Result<(), AppError> {
        if switch_arg.len() >= 3 && switch_arg.as_bytes().get(1) != Some(&b'-') {
            return self.handle_long_switch(switch_arg, arg);
        }

        // Single-character switch, optionally followed by '-' to disable
        let mut chars = switch_arg.chars();
        let ch        = chars.next().ok_or_else(|| AppError::InvalidArg(format!("Unknown switch: {arg}")))?;
        let disable   = match chars.as_str() {
            ""  => false,
            "-" => true,
            _   => return Err(AppError::InvalidArg(format!("Unknown switch: {arg}"))),
        };

        match ch.to_ascii_lowercase() {
            'h' => { self.hide_file    = !disable; Ok(()) }
            'r' => { self.refresh_icon = !disable; Ok(()) }
            '?' => { self.show_help    = true;     Ok(()) }
            _   => Err(AppError::InvalidArg(format!("Unknown switch: {arg}"))),
        }
    }

    /// Handle long switches: env, debug, help
    fn handle_long_switch(&mut self, switch_arg: &str, arg: &str) -> Result<(), AppError> {
        if switch_arg.eq_ignore_ascii_case("env") {
            self.show_env_help = true;
            Ok(())
        } else if switch_arg.eq_ignore_ascii_case("debug") {
            self.debug = true;
            Ok(())
        } else if switch_arg.eq_ignore_ascii_case("help") {
            self.show_help = true;
            Ok(())
        } else {
            Err(AppError::InvalidArg(format!("Unknown switch: {arg}")))
        }
    }
}
