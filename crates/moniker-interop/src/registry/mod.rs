//! In-memory moniker registry.
//!
//! This module provides an append-only multimap that stores:
//! - **Mappings**: (platform, architecture, locator) entries per moniker
//! - **Templates**: versioned locators expanded before registration
//!
//! Registration order is significant. The first entry registered for a given
//! (platform, architecture) pair wins on resolution; later duplicates are kept
//! but never selected.

pub mod mapping;
pub mod module_registry;
pub mod template;

pub use mapping::ModuleMapping;
pub use module_registry::ModuleRegistry;
pub use template::MappingTemplate;
