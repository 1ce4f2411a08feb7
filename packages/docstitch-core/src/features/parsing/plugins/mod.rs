//! Language plugins
//!
//! Each language has its own plugin implementing the LanguagePlugin trait.
//!
//! - Python: full fidelity (primary language)
//! - JavaScript, TypeScript: full fidelity
//! - Java, C/C++: signature-only

pub mod cpp;
pub mod java;
pub mod python;
pub mod typescript;

pub use cpp::CppPlugin;
pub use java::JavaPlugin;
pub use python::PythonPlugin;
pub use typescript::TypeScriptPlugin;

use crate::features::parsing::ports::{LanguageId, LanguagePlugin, LanguageRegistry};

fn plugin_for(lang: LanguageId) -> Box<dyn LanguagePlugin> {
    match lang {
        LanguageId::Python => Box::new(PythonPlugin::new()),
        LanguageId::JavaScript => Box::new(TypeScriptPlugin::javascript()),
        LanguageId::TypeScript => Box::new(TypeScriptPlugin::new()),
        LanguageId::Java => Box::new(JavaPlugin::new()),
        LanguageId::Cpp => Box::new(CppPlugin::new()),
    }
}

/// Create a registry with all language plugins registered
pub fn create_full_registry() -> LanguageRegistry {
    create_registry(&LanguageId::ALL)
}

/// Create a registry with only specific languages
pub fn create_registry(languages: &[LanguageId]) -> LanguageRegistry {
    let mut registry = LanguageRegistry::new();
    for lang in languages {
        registry.register(plugin_for(*lang));
    }
    registry
}
