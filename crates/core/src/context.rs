//! Registration of installers and mod types with the host.
//!
//! [`ExtensionContext`] collects the hooks an extension contributes, keyed
//! by id, and hands them back to the host in priority order.

use std::collections::HashMap;
use std::sync::Arc;

use crate::installer::{Installer, UmmInstaller};
use crate::modtype::{ModType, UmmModType};
use crate::store::ConfigStore;

/// Installers and mod types registered by extensions.
#[derive(Default)]
pub struct ExtensionContext {
    installers: HashMap<&'static str, Arc<dyn Installer>>,
    mod_types: HashMap<&'static str, Arc<dyn ModType>>,
}

impl ExtensionContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an installer.
    ///
    /// If an installer with the same id already exists, it will be replaced.
    pub fn register_installer<I: Installer + 'static>(&mut self, installer: I) {
        let id = installer.id();
        self.installers.insert(id, Arc::new(installer));
    }

    /// Register a mod type.
    ///
    /// If a mod type with the same id already exists, it will be replaced.
    pub fn register_mod_type<M: ModType + 'static>(&mut self, mod_type: M) {
        let id = mod_type.id();
        self.mod_types.insert(id, Arc::new(mod_type));
    }

    /// Get an installer by id.
    #[must_use]
    pub fn installer(&self, id: &str) -> Option<&Arc<dyn Installer>> {
        self.installers.get(id)
    }

    /// Get a mod type by id.
    #[must_use]
    pub fn mod_type(&self, id: &str) -> Option<&Arc<dyn ModType>> {
        self.mod_types.get(id)
    }

    /// Installers ordered by ascending priority, then id.
    #[must_use]
    pub fn installers(&self) -> Vec<&Arc<dyn Installer>> {
        let mut installers: Vec<_> = self.installers.values().collect();
        installers.sort_by_key(|i| (i.priority(), i.id()));
        installers
    }

    /// Mod types ordered by ascending priority, then id.
    #[must_use]
    pub fn mod_types(&self) -> Vec<&Arc<dyn ModType>> {
        let mut mod_types: Vec<_> = self.mod_types.values().collect();
        mod_types.sort_by_key(|m| (m.priority(), m.id()));
        mod_types
    }

    /// Mod types that apply to `target_id`, in priority order.
    #[must_use]
    pub fn mod_types_for(&self, target_id: &str) -> Vec<&Arc<dyn ModType>> {
        self.mod_types()
            .into_iter()
            .filter(|m| m.matches(target_id))
            .collect()
    }
}

impl std::fmt::Debug for ExtensionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut installers: Vec<_> = self.installers.keys().collect();
        installers.sort();
        let mut mod_types: Vec<_> = self.mod_types.keys().collect();
        mod_types.sort();
        f.debug_struct("ExtensionContext")
            .field("installers", &installers)
            .field("mod_types", &mod_types)
            .finish()
    }
}

/// Register the Unity Mod Manager installer and mod type.
pub fn register_umm(context: &mut ExtensionContext, store: Arc<dyn ConfigStore>) {
    context.register_installer(UmmInstaller::new(store));
    context.register_mod_type(UmmModType);
}
