// resource_resolver.rs — Indirect string lookup for resource references
//
// Resolves `@module,id` references to the string-table entry they name.
// The alias reader depends only on the ResourceStringResolver trait; the host
// binding loads the module as a resource-only image, reads the string, and
// frees the module before returning.

/// Capacity of the LoadStringW buffer, in UTF-16 units.
pub const MAX_LOAD_STRING: usize = 512;





/// Trait for module string-table access.
/// Enables unit testing the alias reader without loading real modules.
pub trait ResourceStringResolver {

    ////////////////////////////////////////////////////////////////////////////
    //
    //  resolve
    //
    //  Returns string `resource_id` from the module at `module_path`, or
    //  None if the module can't be opened or has no such string.
    //
    ////////////////////////////////////////////////////////////////////////////

    fn resolve(&self, module_path: &str, resource_id: i32) -> Option<String>;
}





/// Resolver backed by the host's module loader.
/// Always returns None on hosts without string-table resources.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostResourceResolver;





////////////////////////////////////////////////////////////////////////////////
//
//  impl ResourceStringResolver for HostResourceResolver
//
//  Shell references write string ids as negative numbers; the id passed to
//  LoadStringW is the absolute value.
//
////////////////////////////////////////////////////////////////////////////////

#[cfg(windows)]
impl ResourceStringResolver for HostResourceResolver {
    fn resolve(&self, module_path: &str, resource_id: i32) -> Option<String> {
        let module = match host::LoadedModule::open(module_path) {
            Ok(module) => module,
            Err(e) => {
                tracing::warn!(module_path, error = %e, "cannot load module");
                return None;
            }
        };

        let resolved = module.load_string(resource_id.unsigned_abs());
        if resolved.is_none() {
            tracing::warn!(module_path, resource_id, "module has no such string");
        }

        resolved
    }
}





#[cfg(not(windows))]
impl ResourceStringResolver for HostResourceResolver {
    fn resolve(&self, module_path: &str, resource_id: i32) -> Option<String> {
        tracing::debug!(module_path, resource_id, "string-table resources are not available on this host");
        None
    }
}





#[cfg(windows)]
mod host {
    use widestring::U16CString;
    use windows::Win32::Foundation::{FreeLibrary, HINSTANCE, HMODULE};
    use windows::Win32::System::LibraryLoader::{
        LoadLibraryExW, LOAD_LIBRARY_AS_DATAFILE, LOAD_LIBRARY_AS_IMAGE_RESOURCE,
        LOAD_LIBRARY_FLAGS,
    };
    use windows::Win32::UI::WindowsAndMessaging::LoadStringW;
    use windows::core::{PCWSTR, PWSTR};

    use super::MAX_LOAD_STRING;
    use crate::ehm::AppError;

    /// A module mapped for resource access.  Freed on drop.
    pub(super) struct LoadedModule(HMODULE);

    impl LoadedModule {

        ////////////////////////////////////////////////////////////////////////
        //
        //  open
        //
        //  Maps the module as a data file; no code from it is run.
        //
        ////////////////////////////////////////////////////////////////////////

        pub(super) fn open(module_path: &str) -> Result<Self, AppError> {
            let wide = U16CString::from_str(module_path)
                .map_err(|_| AppError::InvalidArg(format!("module path contains NUL: {module_path}")))?;

            let flags = LOAD_LIBRARY_FLAGS(LOAD_LIBRARY_AS_DATAFILE.0 | LOAD_LIBRARY_AS_IMAGE_RESOURCE.0);
            let handle = unsafe { LoadLibraryExW(PCWSTR(wide.as_ptr()), None, flags)? };

            Ok(LoadedModule(handle))
        }



        pub(super) fn load_string(&self, string_id: u32) -> Option<String> {
            let mut buffer = [0u16; MAX_LOAD_STRING];

            let len = unsafe {
                LoadStringW(
                    Some(HINSTANCE(self.0.0)),
                    string_id,
                    PWSTR(buffer.as_mut_ptr()),
                    buffer.len() as i32,
                )
            };

            if len <= 0 {
                return None;
            }

            Some(String::from_utf16_lossy(&buffer[..len as usize]))
        }
    }

    impl Drop for LoadedModule {
        fn drop(&mut self) {
            let _ = unsafe { FreeLibrary(self.0) };
        }
    }
}





/// Mock implementation for unit tests.
/// Stores preset strings and records every lookup.
#[cfg(test)]
#[derive(Default)]
pub struct MockResourceResolver {
    strings: std::collections::HashMap<(String, i32), String>,
    calls:   std::cell::RefCell<Vec<(String, i32)>>,
}





#[cfg(test)]
impl MockResourceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, module_path: &str, resource_id: i32, value: &str) {
        self.strings.insert((module_path.into(), resource_id), value.into());
    }

    pub fn calls(&self) -> Vec<(String, i32)> {
        self.calls.borrow().clone()
    }
}





#[cfg(test)]
impl ResourceStringResolver for MockResourceResolver {
    fn resolve(&self, module_path: &str, resource_id: i32) -> Option<String> {
        self.calls.borrow_mut().push((module_path.into(), resource_id));
        self.strings.get(&(module_path.to_string(), resource_id)).cloned()
    }
}
