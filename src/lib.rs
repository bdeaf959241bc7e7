// FolderAlias - Folder display-name editor
// Reads and writes the LocalizedResourceName entry of a folder's desktop.ini

pub mod ehm;
pub mod environment_provider;
pub mod line_store;
pub mod section_locator;
pub mod alias_value;
pub mod resource_resolver;
pub mod alias_reader;
pub mod alias_writer;
pub mod shell;
pub mod folder;
pub mod command_line;
pub mod config;
pub mod usage;

use std::io::{self, Write};

use tracing_subscriber::fmt::SubscriberBuilder;

use alias_reader::AliasReader;
use alias_writer::AliasWriter;
use command_line::CommandLine;
use config::Config;
use ehm::AppError;
use environment_provider::DefaultEnvironmentProvider;
use folder::{Folder, SetAliasOutcome};
use resource_resolver::HostResourceResolver;
use shell::{HostShellNotifier, SelectiveShellNotifier};





////////////////////////////////////////////////////////////////////////////////
//
//  init_logging
//
//  Diagnostics go to stderr so stdout carries only the alias.
//
////////////////////////////////////////////////////////////////////////////////

fn init_logging(debug: bool) {
    let level = if debug { tracing::Level::DEBUG } else { tracing::Level::WARN };

    let _ = SubscriberBuilder::default()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}





////////////////////////////////////////////////////////////////////////////////
//
//  run
//
//  Main entry point for the library.  Called by main.rs; returns Result
//  for clean error handling.
//
////////////////////////////////////////////////////////////////////////////////

pub fn run() -> Result<(), AppError> {
    let environment = DefaultEnvironmentProvider;

    let mut config = Config::new();
    config.initialize_with_provider(&environment);

    let args = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned());

    let cmd = CommandLine::parse_with_config(&config, args)?;

    init_logging(cmd.debug);

    let mut stdout = io::stdout().lock();

    if cmd.show_help {
        usage::display_usage(&mut stdout, cmd.switch_prefix)?;
        return Ok(());
    }

    if cmd.show_env_help {
        usage::display_env_var_help(&mut stdout, &environment, &config, cmd.switch_prefix)?;
        return Ok(());
    }

    usage::display_env_var_issues(&mut io::stderr().lock(), &config, cmd.switch_prefix, true)?;

    let Some(path) = cmd.folder.as_deref() else {
        let help = if cmd.switch_prefix == '/' { "/?" } else { "-?" };
        return Err(AppError::InvalidArg(format!("No folder specified (see {help} for help)")));
    };

    let folder   = Folder::new(path)?;
    let encoding = config.text_encoding();

    tracing::debug!(folder = %folder.path().display(), encoding = encoding.name(), "starting");

    match cmd.alias.as_deref() {
        None => {
            let resolver = HostResourceResolver;
            let reader   = AliasReader::new(encoding, &resolver, &environment);

            if let Some(alias) = folder.alias(&reader) {
                writeln!(stdout, "{alias}")?;
            }
        }

        Some(new_alias) => {
            let writer = AliasWriter::new(encoding);
            let host   = HostShellNotifier;
            let shell  = SelectiveShellNotifier::new(&host, cmd.hide_file, cmd.refresh_icon);

            if folder.set_alias(new_alias, &writer, &shell)? == SetAliasOutcome::Skipped {
                writeln!(stdout, "Alias is blank; {} left unchanged.", folder.name())?;
            }
        }
    }

    Ok(())
}
