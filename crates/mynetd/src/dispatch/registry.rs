//! Two-key capability table shared by every connection worker.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use thiserror::Error;
use tracing::info;

use super::DISPATCH_TARGET;
use super::module::ModuleFactory;
use super::names::is_clean_name;

/// Errors raised while changing registry bindings.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A group or command name contains characters outside `[0-9a-z_]`.
    #[error("'{name}' is not a valid {kind} name")]
    InvalidName { kind: &'static str, name: String },
    /// `reload` was asked to replace a binding that does not exist.
    #[error("no module bound for '{command}' in group '{group}'")]
    NotBound { group: String, command: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CapabilityKey {
    group: String,
    command: String,
}

impl CapabilityKey {
    fn new(group: &str, command: &str) -> Result<Self, RegistryError> {
        for (kind, name) in [("group", group), ("command", command)] {
            if !is_clean_name(name) {
                return Err(RegistryError::InvalidName {
                    kind,
                    name: name.to_owned(),
                });
            }
        }
        Ok(Self {
            group: group.to_owned(),
            command: command.to_owned(),
        })
    }
}

/// Maps `(group, command)` to the factory that builds its module.
///
/// Lookups never reload anything. Bindings change only through [`bind`],
/// [`unbind`] and [`reload`], each of which swaps the entry under the write
/// lock and advances [`generation`].
///
/// [`bind`]: ModuleRegistry::bind
/// [`unbind`]: ModuleRegistry::unbind
/// [`reload`]: ModuleRegistry::reload
/// [`generation`]: ModuleRegistry::generation
#[derive(Default)]
pub struct ModuleRegistry {
    bindings: RwLock<HashMap<CapabilityKey, ModuleFactory>>,
    generation: AtomicU64,
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("bindings", &self.len())
            .field("generation", &self.generation())
            .finish()
    }
}

impl ModuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in visitor and basic modules.
    ///
    /// # Errors
    ///
    /// Propagates [`RegistryError`] from binding; the built-in names are
    /// all clean, so this only fails if they are edited incorrectly.
    pub fn with_builtins() -> Result<Self, RegistryError> {
        let registry = Self::new();
        crate::modules::install_builtins(&registry)?;
        Ok(registry)
    }

    /// Binds `factory` to `(group, command)`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidName`] when either name is not in
    /// sanitised form.
    pub fn bind(
        &self,
        group: &str,
        command: &str,
        factory: ModuleFactory,
    ) -> Result<(), RegistryError> {
        let key = CapabilityKey::new(group, command)?;
        self.write().insert(key, factory);
        self.bump("bind", group, command);
        Ok(())
    }

    /// Removes a binding. Returns whether one existed.
    pub fn unbind(&self, group: &str, command: &str) -> bool {
        let Ok(key) = CapabilityKey::new(group, command) else {
            return false;
        };
        let removed = self.write().remove(&key).is_some();
        if removed {
            self.bump("unbind", group, command);
        }
        removed
    }

    /// Replaces an existing binding and returns the previous factory.
    ///
    /// Sessions that already resolved the old factory finish with it; the
    /// next resolution sees the new one.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotBound`] when nothing is bound yet, or
    /// [`RegistryError::InvalidName`] for unclean names.
    pub fn reload(
        &self,
        group: &str,
        command: &str,
        factory: ModuleFactory,
    ) -> Result<ModuleFactory, RegistryError> {
        let key = CapabilityKey::new(group, command)?;
        let previous = {
            let mut bindings = self.write();
            match bindings.get_mut(&key) {
                Some(slot) => std::mem::replace(slot, factory),
                None => {
                    return Err(RegistryError::NotBound {
                        group: group.to_owned(),
                        command: command.to_owned(),
                    });
                }
            }
        };
        self.bump("reload", group, command);
        Ok(previous)
    }

    /// Looks up the factory for `(group, command)`.
    #[must_use]
    pub fn resolve(&self, group: &str, command: &str) -> Option<ModuleFactory> {
        let key = CapabilityKey {
            group: group.to_owned(),
            command: command.to_owned(),
        };
        self.read().get(&key).cloned()
    }

    /// Sorted command names bound for `group`.
    #[must_use]
    pub fn commands_for(&self, group: &str) -> Vec<String> {
        let mut commands: Vec<String> = self
            .read()
            .keys()
            .filter(|key| key.group == group)
            .map(|key| key.command.clone())
            .collect();
        commands.sort_unstable();
        commands
    }

    /// Number of bindings across all groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// True when nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counter advanced by every binding change.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    fn bump(&self, action: &'static str, group: &str, command: &str) {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        info!(
            target: DISPATCH_TARGET,
            action,
            group,
            command,
            generation,
            "module registry updated"
        );
    }

    // Entries are replaced whole, so a poisoned lock still guards a
    // consistent map.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<CapabilityKey, ModuleFactory>> {
        self.bindings.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<CapabilityKey, ModuleFactory>> {
        self.bindings.write().unwrap_or_else(PoisonError::into_inner)
    }
}
