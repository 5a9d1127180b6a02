//! Compilation handle consumed by the policy resolver.

use awaitguard_core::config::AwaitGuardConfig;
use awaitguard_core::types::{CompilationId, SmallVec4};

/// What the rule needs to know about a compilation: a stable identity and the
/// configuration it declares.
pub trait Compilation {
    /// Identity used as the policy cache key.
    fn id(&self) -> CompilationId;

    /// Assembly-level attributes declared by the compilation.
    fn assembly_attributes(&self) -> &[DeclaredAttribute];

    /// Settings file associated with the compilation, if any.
    fn settings(&self) -> Option<&AwaitGuardConfig> {
        None
    }
}

/// An assembly-level attribute as the host saw it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclaredAttribute {
    /// Fully qualified attribute type name, `None` if the type did not bind.
    pub type_name: Option<String>,
}

impl DeclaredAttribute {
    pub fn bound(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
        }
    }

    pub fn unbound() -> Self {
        Self { type_name: None }
    }

    /// Type name without its namespace.
    pub fn simple_name(&self) -> Option<&str> {
        let name = self.type_name.as_deref()?;
        name.rsplit('.').next().filter(|s| !s.is_empty())
    }
}

/// Owned [`Compilation`] for hosts that do not have their own handle type.
///
/// The id is derived from the name and the declared configuration and is
/// recomputed by every builder method.
#[derive(Debug, Clone)]
pub struct CompilationInfo {
    id: CompilationId,
    name: String,
    attributes: SmallVec4<DeclaredAttribute>,
    settings: Option<AwaitGuardConfig>,
}

impl CompilationInfo {
    pub fn new(name: impl Into<String>) -> Self {
        let mut info = Self {
            id: CompilationId::new(0),
            name: name.into(),
            attributes: SmallVec4::new(),
            settings: None,
        };
        info.refresh_id();
        info
    }

    pub fn with_attribute(mut self, type_name: impl Into<String>) -> Self {
        self.attributes.push(DeclaredAttribute::bound(type_name));
        self.refresh_id();
        self
    }

    pub fn with_unbound_attribute(mut self) -> Self {
        self.attributes.push(DeclaredAttribute::unbound());
        self.refresh_id();
        self
    }

    pub fn with_settings(mut self, settings: AwaitGuardConfig) -> Self {
        self.settings = Some(settings);
        self.refresh_id();
        self
    }

    fn refresh_id(&mut self) {
        let attribute_parts = self
            .attributes
            .iter()
            .map(|a| a.type_name.clone().unwrap_or_else(|| "<unbound>".to_string()));
        let settings_part = self
            .settings
            .as_ref()
            .map(|s| format!("settings:{}", s.policy.configure_await.as_deref().unwrap_or("")));
        self.id = CompilationId::derive(&self.name, attribute_parts.chain(settings_part));
    }
}

impl Compilation for CompilationInfo {
    fn id(&self) -> CompilationId {
        self.id
    }

    fn assembly_attributes(&self) -> &[DeclaredAttribute] {
        &self.attributes
    }

    fn settings(&self) -> Option<&AwaitGuardConfig> {
        self.settings.as_ref()
    }
}
