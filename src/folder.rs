// folder.rs — A folder whose display name is being edited
//
// The caller-side boundary of the alias subsystem: blank aliases are ignored
// here, and a successful write is followed by hiding desktop.ini and asking
// the shell to refresh the folder.

use std::path::{Path, PathBuf};

use crate::alias_reader::{AliasReader, DESKTOP_INI_FILE_NAME};
use crate::alias_writer::{AliasWriter, WriteOutcome};
use crate::ehm::AppError;
use crate::shell::ShellNotifier;





/// Result of Folder::set_alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetAliasOutcome {
    /// The alias was empty or whitespace; nothing was written.
    Skipped,

    /// desktop.ini was written using the given structural case.
    Written(WriteOutcome),
}





#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    path: PathBuf,
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl Folder
//
//  Path accessors plus alias get/set.
//
////////////////////////////////////////////////////////////////////////////////

impl Folder {

    ////////////////////////////////////////////////////////////////////////////
    //
    //  new
    //
    //  Fails with PathNotFound unless `path` is an existing directory.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn new(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();

        if !path.is_dir() {
            return Err(AppError::PathNotFound(path));
        }

        Ok(Folder { path })
    }



    pub fn path(&self) -> &Path {
        &self.path
    }



    /// The folder's own name (last path component), or the whole path for
    /// roots such as `C:\`.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |name| name.to_string_lossy().into_owned())
    }



    pub fn desktop_ini_path(&self) -> PathBuf {
        self.path.join(DESKTOP_INI_FILE_NAME)
    }



    pub fn alias(&self, reader: &AliasReader<'_>) -> Option<String> {
        reader.read_alias(&self.path)
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  set_alias
    //
    //  Writes `new_alias` unless it is blank.  Hide and refresh failures
    //  after a successful write are logged; the write still counts.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn set_alias(
        &self,
        new_alias: &str,
        writer:    &AliasWriter,
        shell:     &dyn ShellNotifier,
    ) -> Result<SetAliasOutcome, AppError> {
        if new_alias.trim().is_empty() {
            tracing::debug!(folder = %self.path.display(), "blank alias ignored");
            return Ok(SetAliasOutcome::Skipped);
        }

        let outcome = writer.write_alias(&self.path, new_alias)?;
        let ini     = self.desktop_ini_path();

        if let Err(e) = shell.hide_file(&ini) {
            tracing::warn!(path = %ini.display(), error = %e, "cannot hide configuration file");
        }

        if let Err(e) = shell.refresh_folder_icon(&self.path) {
            tracing::warn!(folder = %self.path.display(), error = %e, "cannot refresh folder icon");
        }

        Ok(SetAliasOutcome::Written(outcome))
    }
}
