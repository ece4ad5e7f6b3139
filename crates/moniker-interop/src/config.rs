//! Centralized configuration for the interop layer.
//!
//! Constants for platform detection, locator conventions and template
//! expansion.

/// Loader and platform-detection configuration.
pub struct LoaderConfig;

impl LoaderConfig {
    /// `uname` sysname reported by macOS kernels.
    pub const DARWIN_SYSNAME: &'static str = "Darwin";
    /// Flags passed to `dlopen`; symbols are bound lazily on first call.
    #[cfg(unix)]
    pub const UNIX_OPEN_FLAGS: std::ffi::c_int = libloading::os::unix::RTLD_LAZY;
    /// Placeholder substituted by [`crate::MappingTemplate::expand`].
    pub const VERSION_PLACEHOLDER: &'static str = "{version}";
}

/// Conventional shared-library file naming.
pub struct LocatorConfig;

impl LocatorConfig {
    pub const WINDOWS_EXTENSION: &'static str = "dll";
    pub const UNIX_EXTENSION: &'static str = "so";
    pub const MAC_EXTENSION: &'static str = "dylib";
    pub const X86_SUFFIX: &'static str = "x86";
    pub const X64_SUFFIX: &'static str = "x64";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_brace_delimited() {
        assert!(LoaderConfig::VERSION_PLACEHOLDER.starts_with('{'));
        assert!(LoaderConfig::VERSION_PLACEHOLDER.ends_with('}'));
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_open_flags_are_lazy() {
        assert_eq!(
            LoaderConfig::UNIX_OPEN_FLAGS,
            libloading::os::unix::RTLD_LAZY
        );
        assert_eq!(
            LoaderConfig::UNIX_OPEN_FLAGS & libloading::os::unix::RTLD_NOW,
            0
        );
    }
}
