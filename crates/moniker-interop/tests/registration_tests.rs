//! Integration tests for the process-wide registration and resolve API.
//!
//! Every test uses its own moniker because the global registry is shared
//! by all tests in this binary.

use moniker_interop::{
    Architecture, Environment, InteropError, MappingTemplate, ModuleMapping, ModuleRegistry,
    ModuleResolver, Platform,
};

#[test]
fn test_resolve_unregistered_moniker() {
    let err = moniker_interop::resolve("Something 8...").unwrap_err();
    assert_eq!(err, InteropError::invalid_moniker("Something 8..."));
    assert_eq!(
        err.to_string(),
        "The specified moniker 'Something 8...' is not valid."
    );
}

#[test]
fn test_resolve_null_moniker() {
    assert_eq!(
        moniker_interop::resolve(None).unwrap_err(),
        InteropError::NullMoniker
    );
}

#[test]
fn test_register_then_resolve_current_environment() {
    let environment = Environment::current().unwrap();
    moniker_interop::register(
        "global-current",
        vec![
            ModuleMapping::new(environment.platform, environment.architecture, "first"),
            ModuleMapping::new(environment.platform, environment.architecture, "second"),
        ],
    )
    .unwrap();
    moniker_interop::register(
        "global-current",
        vec![ModuleMapping::new(
            environment.platform,
            environment.architecture,
            "third",
        )],
    )
    .unwrap();

    assert_eq!(moniker_interop::resolve("global-current").unwrap(), "first");
    assert_eq!(ModuleRegistry::global().mappings("global-current").len(), 3);
}

#[test]
fn test_register_empty_mappings_is_not_an_error() {
    moniker_interop::register("global-empty", Vec::new()).unwrap();
    assert_eq!(
        moniker_interop::resolve("global-empty").unwrap_err(),
        InteropError::invalid_moniker("global-empty")
    );
}

#[test]
fn test_versioned_templates_resolve_placeholder_free() {
    let registry = ModuleRegistry::new();
    registry
        .register_versioned(
            "cudnn",
            &[
                MappingTemplate::new(
                    Platform::Windows,
                    Architecture::X64,
                    r"C:\Program Files\NVIDIA\CUDA\v{version}\bin\cudnn64_8.dll",
                ),
                MappingTemplate::new(Platform::Unix, Architecture::X64, "libcudnn.so.8"),
            ],
            "11.8",
        )
        .unwrap();

    let resolver = ModuleResolver::new(
        &registry,
        Environment::new(Platform::Windows, Architecture::X64),
    );
    assert_eq!(
        resolver.resolve("cudnn").unwrap(),
        r"C:\Program Files\NVIDIA\CUDA\v11.8\bin\cudnn64_8.dll"
    );
}

#[test]
fn test_json_registration_matches_programmatic() {
    let from_json = ModuleRegistry::new();
    from_json
        .register_json(
            r#"{"Cool": [
                {"platform": "Windows", "architecture": "x86", "locator": "Cool_x86.dll"},
                {"platform": "Windows", "architecture": "x64", "locator": "Cool_x64.dll"},
                {"platform": "Unix", "architecture": "x86", "locator": "Cool_x86.so"},
                {"platform": "Unix", "architecture": "x64", "locator": "Cool_x64.so"},
                {"platform": "Mac", "architecture": "x86", "locator": "Cool_x86.dylib"},
                {"platform": "Mac", "architecture": "x64", "locator": "Cool_x64.dylib"}
            ]}"#,
        )
        .unwrap();

    let programmatic = ModuleRegistry::new();
    programmatic
        .register("Cool", ModuleMapping::conventional("Cool", None))
        .unwrap();

    for platform in Platform::ALL {
        for architecture in Architecture::ALL {
            let environment = Environment::new(platform, architecture);
            assert_eq!(
                ModuleResolver::new(&from_json, environment).resolve("Cool"),
                ModuleResolver::new(&programmatic, environment).resolve("Cool"),
            );
        }
    }
}
