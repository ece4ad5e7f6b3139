//! Shared scaffolding for integration tests.
//!
//! Builds throwaway native libraries with the system C compiler so the loader
//! can be exercised against real exports. Tests skip when no compiler exists.

#![allow(dead_code)]

use moniker_interop::{current_architecture, ModuleMapping, Platform};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Exports `Method1(int, bool*, char*)` reporting the caller's word size and
/// the platform it was built for.
pub const METHOD1_SOURCE: &str = r#"
#include <stdio.h>
#include <stdbool.h>

static bool IsX64Architecture(void)
{
    return sizeof(void*) == 8;
}

void Method1(int value, bool* isX64, char* message)
{
    isX64[0] = IsX64Architecture();

#if defined(__APPLE__)
    sprintf(message, "Calling from Mac! [%d]\n", value);
#else
    sprintf(message, "Calling from Unix! [%d]\n", value);
#endif
}
"#;

/// Install a test subscriber honoring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Launches the host C compiler to produce shared libraries.
pub struct NativeCompiler {
    program: &'static str,
    platform: Platform,
}

impl NativeCompiler {
    /// Find a usable compiler, or `None` on hosts without one.
    pub fn detect() -> Option<Self> {
        let platform = moniker_interop::current_platform().ok()?;
        if platform == Platform::Windows {
            return None;
        }

        let available = Command::new("cc")
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false);

        available.then_some(Self {
            program: "cc",
            platform,
        })
    }

    /// Compile `source` into `{stem}_{arch}.{ext}` inside `dir`.
    pub fn compile(&self, source: &str, dir: &Path, stem: &str) -> Option<PathBuf> {
        let source_path = dir.join(format!("{}.c", stem));
        std::fs::write(&source_path, source).ok()?;

        let output_path = dir.join(
            self.platform
                .library_file_name(stem, current_architecture()),
        );

        let mut command = Command::new(self.program);
        match self.platform {
            Platform::Mac => command.arg("-dynamiclib"),
            _ => command.args(["-shared", "-fPIC"]),
        };
        let status = command
            .arg("-o")
            .arg(&output_path)
            .arg(&source_path)
            .status()
            .ok()?;

        std::fs::remove_file(&source_path).ok();
        status.success().then_some(output_path)
    }
}

/// A compiled fixture library and the mappings that locate it.
pub struct Fixture {
    pub dir: TempDir,
    pub stem: String,
    pub path: PathBuf,
}

impl Fixture {
    pub fn mappings(&self) -> Vec<ModuleMapping> {
        ModuleMapping::conventional(&self.stem, Some(self.dir.path()))
    }
}

/// Compile `source` as a fixture, or `None` when no compiler is available.
pub fn build_fixture(source: &str, stem: &str) -> Option<Fixture> {
    let compiler = NativeCompiler::detect()?;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = compiler.compile(source, dir.path(), stem)?;

    Some(Fixture {
        dir,
        stem: stem.to_string(),
        path,
    })
}
