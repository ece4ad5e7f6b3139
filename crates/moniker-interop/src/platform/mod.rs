//! Platform abstraction layer.
//!
//! This module centralizes all platform-specific code. All `#[cfg]` blocks for
//! OS-specific behavior live here rather than in the resolver or loader.
//!
//! # Architecture
//!
//! - `mod.rs` - Platform/architecture identity and the [`Environment`] context
//! - `native` - Shared-library open and lookup over `libloading`
//!
//! # Supported Platforms
//!
//! - **Linux** and other Unix-likes: `dlopen` family
//! - **macOS**: `dlopen` family, detected through `uname`
//! - **Windows**: `LoadLibraryW` family

pub(crate) mod native;

use crate::config::LocatorConfig;
use crate::error::{InteropError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::debug;

/// Operating-system family a library mapping targets.
///
/// Deserialization accepts the same case-insensitive names as [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Platform {
    Windows,
    Unix,
    Mac,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Windows, Platform::Unix, Platform::Mac];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::Unix => "Unix",
            Platform::Mac => "Mac",
        }
    }

    /// File extension used for shared libraries on this platform.
    pub fn library_extension(&self) -> &'static str {
        match self {
            Platform::Windows => LocatorConfig::WINDOWS_EXTENSION,
            Platform::Unix => LocatorConfig::UNIX_EXTENSION,
            Platform::Mac => LocatorConfig::MAC_EXTENSION,
        }
    }

    /// Conventional file name for `stem` built for this platform, e.g.
    /// `Cool_x64.dll`.
    pub fn library_file_name(&self, stem: &str, architecture: Architecture) -> String {
        format!("{}_{}.{}", stem, architecture, self.library_extension())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = InteropError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "windows" => Ok(Platform::Windows),
            "unix" | "linux" => Ok(Platform::Unix),
            "mac" | "macos" | "darwin" => Ok(Platform::Mac),
            _ => Err(InteropError::invalid_argument("platform")),
        }
    }
}

impl TryFrom<String> for Platform {
    type Error = InteropError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Processor word size of the running process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Architecture {
    X86,
    X64,
}

impl Architecture {
    pub const ALL: [Architecture; 2] = [Architecture::X86, Architecture::X64];

    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::X86 => LocatorConfig::X86_SUFFIX,
            Architecture::X64 => LocatorConfig::X64_SUFFIX,
        }
    }

    pub fn is_64_bit(&self) -> bool {
        matches!(self, Architecture::X64)
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = InteropError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "x86" | "i686" | "32" => Ok(Architecture::X86),
            "x64" | "x86_64" | "amd64" | "64" => Ok(Architecture::X64),
            _ => Err(InteropError::invalid_argument("architecture")),
        }
    }
}

impl TryFrom<String> for Architecture {
    type Error = InteropError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// The (platform, architecture) pair resolution runs against.
///
/// Production code obtains it once through [`Environment::current`]; tests
/// construct fixed values with [`Environment::new`] and pass them to the
/// resolver or loader, so nothing process-wide is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Environment {
    pub platform: Platform,
    pub architecture: Architecture,
}

impl Environment {
    pub const fn new(platform: Platform, architecture: Architecture) -> Self {
        Self {
            platform,
            architecture,
        }
    }

    /// The environment of the running process.
    ///
    /// Detected on first use and cached for the process lifetime.
    ///
    /// # Errors
    /// Returns [`InteropError::PlatformNotSupported`] when the OS family is
    /// neither Windows nor Unix-like.
    pub fn current() -> Result<Self> {
        static CURRENT: OnceLock<Option<Environment>> = OnceLock::new();

        let detected = *CURRENT.get_or_init(|| {
            let environment = detect_platform().map(|platform| Environment {
                platform,
                architecture: current_architecture(),
            });
            debug!("Detected process environment: {:?}", environment);
            environment
        });
        detected.ok_or(InteropError::PlatformNotSupported)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.platform, self.architecture)
    }
}

/// Returns the OS family of the running process.
pub fn current_platform() -> Result<Platform> {
    Environment::current().map(|environment| environment.platform)
}

/// Returns the word size of the running process.
pub fn current_architecture() -> Architecture {
    if cfg!(target_pointer_width = "64") {
        Architecture::X64
    } else {
        Architecture::X86
    }
}

fn detect_platform() -> Option<Platform> {
    #[cfg(windows)]
    {
        Some(Platform::Windows)
    }
    #[cfg(unix)]
    {
        Some(unix_variant())
    }
    #[cfg(not(any(unix, windows)))]
    {
        None
    }
}

/// Distinguish macOS from other Unix-likes by the kernel's sysname.
#[cfg(unix)]
fn unix_variant() -> Platform {
    match nix::sys::utsname::uname() {
        Ok(info) if info.sysname() == crate::config::LoaderConfig::DARWIN_SYSNAME => {
            Platform::Mac
        }
        Ok(_) => Platform::Unix,
        Err(e) => {
            tracing::warn!("uname failed, assuming generic Unix: {}", e);
            Platform::Unix
        }
    }
}
