// shell.rs — Post-write shell integration
//
// After desktop.ini changes, the file is marked hidden and the shell is asked
// to redraw the folder so Explorer picks up the new display name.  Both steps
// sit behind the ShellNotifier trait so the alias logic can be tested without
// touching the desktop.

use std::path::Path;

use crate::ehm::AppError;





/// Trait for the shell-side effects of an alias change.
pub trait ShellNotifier {

    ////////////////////////////////////////////////////////////////////////////
    //
    //  hide_file
    //
    //  Adds the hidden attribute to `path`, keeping its other attributes.
    //
    ////////////////////////////////////////////////////////////////////////////

    fn hide_file(&self, path: &Path) -> Result<(), AppError>;



    ////////////////////////////////////////////////////////////////////////////
    //
    //  refresh_folder_icon
    //
    //  Asks the shell to re-read `folder`'s display information.
    //
    ////////////////////////////////////////////////////////////////////////////

    fn refresh_folder_icon(&self, folder: &Path) -> Result<(), AppError>;
}





/// Notifier backed by the host shell.
/// On hosts without a Windows shell both operations succeed without effect.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostShellNotifier;





////////////////////////////////////////////////////////////////////////////////
//
//  impl ShellNotifier for HostShellNotifier
//
//  SetFileAttributesW and SHChangeNotify(SHCNE_UPDATEITEM | SHCNE_ASSOCCHANGED).
//
////////////////////////////////////////////////////////////////////////////////

#[cfg(windows)]
impl ShellNotifier for HostShellNotifier {
    fn hide_file(&self, path: &Path) -> Result<(), AppError> {
        use std::os::windows::fs::MetadataExt;

        use windows::Win32::Storage::FileSystem::{
            SetFileAttributesW, FILE_ATTRIBUTE_HIDDEN, FILE_FLAGS_AND_ATTRIBUTES,
        };

        let attributes = std::fs::metadata(path)?.file_attributes();
        if attributes & FILE_ATTRIBUTE_HIDDEN.0 != 0 {
            return Ok(());
        }

        let wide = to_wide(path)?;
        unsafe {
            SetFileAttributesW(
                windows::core::PCWSTR(wide.as_ptr()),
                FILE_FLAGS_AND_ATTRIBUTES(attributes | FILE_ATTRIBUTE_HIDDEN.0),
            )?;
        }

        Ok(())
    }



    fn refresh_folder_icon(&self, folder: &Path) -> Result<(), AppError> {
        use windows::Win32::UI::Shell::{
            SHChangeNotify, SHCNE_ASSOCCHANGED, SHCNE_ID, SHCNE_UPDATEITEM,
            SHCNF_FLAGS, SHCNF_FLUSH, SHCNF_PATHW,
        };

        if !folder.is_dir() {
            return Err(AppError::PathNotFound(folder.to_path_buf()));
        }

        let wide = to_wide(folder)?;
        unsafe {
            SHChangeNotify(
                SHCNE_ID(SHCNE_UPDATEITEM.0 | SHCNE_ASSOCCHANGED.0),
                SHCNF_FLAGS(SHCNF_PATHW.0 | SHCNF_FLUSH.0),
                Some(wide.as_ptr() as *const std::ffi::c_void),
                None,
            );
        }

        tracing::debug!(folder = %folder.display(), "refresh notification sent");
        Ok(())
    }
}





#[cfg(windows)]
fn to_wide(path: &Path) -> Result<widestring::U16CString, AppError> {
    widestring::U16CString::from_os_str(path.as_os_str())
        .map_err(|_| AppError::InvalidArg(format!("path contains NUL: {}", path.display())))
}





#[cfg(not(windows))]
impl ShellNotifier for HostShellNotifier {
    fn hide_file(&self, path: &Path) -> Result<(), AppError> {
        tracing::debug!(path = %path.display(), "hidden attribute not supported on this host");
        Ok(())
    }

    fn refresh_folder_icon(&self, folder: &Path) -> Result<(), AppError> {
        if !folder.is_dir() {
            return Err(AppError::PathNotFound(folder.to_path_buf()));
        }

        tracing::debug!(folder = %folder.display(), "no shell to notify on this host");
        Ok(())
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  SelectiveShellNotifier
//
//  Forwards to `inner` only the steps the user left enabled (/H-, /R-).
//
////////////////////////////////////////////////////////////////////////////////

pub struct SelectiveShellNotifier<'a> {
    inner:        &'a dyn ShellNotifier,
    hide_file:    bool,
    refresh_icon: bool,
}

impl<'a> SelectiveShellNotifier<'a> {
    pub fn new(inner: &'a dyn ShellNotifier, hide_file: bool, refresh_icon: bool) -> Self {
        SelectiveShellNotifier { inner, hide_file, refresh_icon }
    }
}

impl ShellNotifier for SelectiveShellNotifier<'_> {
    fn hide_file(&self, path: &Path) -> Result<(), AppError> {
        if !self.hide_file {
            tracing::debug!(path = %path.display(), "hiding disabled");
            return Ok(());
        }
        self.inner.hide_file(path)
    }

    fn refresh_folder_icon(&self, folder: &Path) -> Result<(), AppError> {
        if !self.refresh_icon {
            tracing::debug!(folder = %folder.display(), "refresh disabled");
            return Ok(());
        }
        self.inner.refresh_folder_icon(folder)
    }
}





/// Mock implementation for unit tests.
/// Records each call; optionally fails them.
#[cfg(test)]
#[derive(Default)]
pub struct MockShellNotifier {
    pub fail:      bool,
    pub hidden:    std::cell::RefCell<Vec<std::path::PathBuf>>,
    pub refreshed: std::cell::RefCell<Vec<std::path::PathBuf>>,
}





#[cfg(test)]
impl ShellNotifier for MockShellNotifier {
    fn hide_file(&self, path: &Path) -> Result<(), AppError> {
        self.hidden.borrow_mut().push(path.to_path_buf());
        if self.fail {
            return Err(AppError::PathNotFound(path.to_path_buf()));
        }
        Ok(())
    }

    fn refresh_folder_icon(&self, folder: &Path) -> Result<(), AppError> {
        self.refreshed.borrow_mut().push(folder.to_path_buf());
        if self.fail {
            return Err(AppError::PathNotFound(folder.to_path_buf()));
        }
        Ok(())
    }
}
