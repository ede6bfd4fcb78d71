//! The path registry service.
//!
//! [`PathRegistry`] owns the path entries, the [`DependencyIndex`] over
//! their relative-to targets, and the [`CallbackRegistry`]. All
//! cross-structure updates go through its methods.
//!
//! # Change protocol
//!
//! Updates and removals run in two phases:
//!
//! 1. **Pre-commit.** Callbacks registered for the event on the changed
//!    name (and, for updates, on every transitive dependent) see a
//!    [`ChangeContext`]. The first one to require a reload or restart stops
//!    the sweep, and the registry is left untouched.
//! 2. **Commit.** The entry and dependency edges are updated, cached
//!    resolutions are invalidated, and post-commit callbacks registered on
//!    the changed name are notified.
//!
//! Additions have no pre-commit phase.
//!
//! # Locking
//!
//! Entries and dependency edges sit behind one reader-writer lock;
//! callback bookkeeping sits behind another. No callback is ever invoked
//! while either lock is held.
//!
//! # Examples
//!
//! ```
//! use pathreg::registry::{OperationContext, PathRegistry};
//! use pathreg::PathDefinition;
//!
//! let registry = PathRegistry::new();
//! registry.add(PathDefinition::absolute("data", "/srv/app")).unwrap();
//! registry.add(PathDefinition::relative("logs", "log", "data")).unwrap();
//! # #[cfg(unix)]
//! # {
//! assert_eq!(registry.resolve("logs").unwrap(), "/srv/app/log");
//! # }
//!
//! let mut context = OperationContext::new();
//! let outcome = registry.change_path("data", "/srv/app2", &mut context).unwrap();
//! assert!(outcome.is_applied());
//! # #[cfg(unix)]
//! # {
//! assert_eq!(registry.resolve("logs").unwrap(), "/srv/app2/log");
//! # }
//! ```

pub mod callbacks;
pub mod context;
pub mod dependencies;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::config::Config;
use crate::entry::{PathDefinition, PathEntry};
use crate::error::{Error, Result};
use crate::path::resolver::{resolve_absolute, resolve_relative};
use crate::path::{syntax, Resolution};
use crate::system;

pub use callbacks::{CallbackHandle, CallbackRegistry, PathCallback, PathEvent};
pub use context::{ChangeContext, ChangeOutcome, OperationContext, Requirement, TransactionContext};
pub use dependencies::DependencyIndex;

/// Tunables for a [`PathRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Cache resolved values per entry until the next commit affecting them.
    pub cache_resolved: bool,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            cache_resolved: true,
        }
    }
}

enum Change {
    Path(String),
    RelativeTo(Option<String>),
}

#[derive(Debug, Default)]
struct RegistryState {
    entries: HashMap<String, PathEntry>,
    dependencies: DependencyIndex,
    resolved: Mutex<HashMap<String, String>>,
}

impl RegistryState {
    fn entry(&self, name: &str) -> Result<&PathEntry> {
        self.entries.get(name).ok_or_else(|| Error::not_found(name))
    }

    /// Resolve `name` by walking its relative-to chain up to an absolute
    /// entry or a cached ancestor, then folding fragments back down.
    fn resolve(&self, name: &str, use_cache: bool) -> Result<String> {
        let mut chain: Vec<&PathEntry> = Vec::new();
        let mut current = name;

        let mut value = loop {
            if use_cache {
                if let Some(cached) = self.resolved.lock().get(current) {
                    break cached.clone();
                }
            }

            let entry = self.entry(current)?;
            if let Some(start) = chain.iter().position(|seen| seen.name() == current) {
                let mut cycle: Vec<String> =
                    chain[start..].iter().map(|e| e.name().to_string()).collect();
                cycle.push(current.to_string());
                return Err(Error::CircularDependency {
                    name: name.to_string(),
                    chain: cycle,
                });
            }

            match entry.resolution() {
                Resolution::Absolute => {
                    let resolved = resolve_absolute(entry.path())?;
                    self.remember(use_cache, entry.name(), &resolved);
                    break resolved;
                }
                Resolution::RelativeTo(target) => {
                    chain.push(entry);
                    current = target;
                }
            }
        };

        for entry in chain.into_iter().rev() {
            value = resolve_relative(&value, entry.path())?;
            self.remember(use_cache, entry.name(), &value);
        }

        Ok(value)
    }

    fn remember(&self, use_cache: bool, name: &str, value: &str) {
        if use_cache {
            self.resolved
                .lock()
                .insert(name.to_string(), value.to_string());
        }
    }

    /// Drop cached values for `name` and everything resolved through it.
    fn invalidate(&mut self, name: &str) {
        let stale = self.dependencies.transitive_dependents(name);
        let cache = self.resolved.get_mut();
        cache.remove(name);
        for dependent in &stale {
            cache.remove(dependent);
        }
    }

    /// The cycle that making `name` relative to `target` would close.
    fn cycle_through(&self, name: &str, target: &str) -> Option<Vec<String>> {
        let mut chain = vec![name.to_string()];
        let mut current = Some(target);
        while let Some(step) = current {
            chain.push(step.to_string());
            if step == name {
                return Some(chain);
            }
            if chain[..chain.len() - 1].iter().any(|seen| seen == step) {
                // An older cycle not involving `name`; resolution reports it.
                return None;
            }
            current = self.entries.get(step).and_then(PathEntry::relative_to);
        }
        None
    }

    fn check_change(&self, name: &str, change: &Change) -> Result<()> {
        let entry = self.entry(name)?;
        if entry.is_read_only() {
            return Err(Error::ReadOnly {
                name: name.to_string(),
            });
        }

        match change {
            Change::Path(path) => entry.resolution().check_syntax(path),
            Change::RelativeTo(target) => {
                if let Some(target) = target {
                    syntax::validate_name(target)?;
                    if let Some(chain) = self.cycle_through(name, target) {
                        return Err(Error::CircularDependency {
                            name: name.to_string(),
                            chain,
                        });
                    }
                }
                Resolution::for_relative_to(target.as_deref()).check_syntax(entry.path())
            }
        }
    }

    fn check_remove(&self, name: &str, check_dependents: bool) -> Result<()> {
        let entry = self.entry(name)?;
        if entry.is_read_only() {
            return Err(Error::ReadOnly {
                name: name.to_string(),
            });
        }
        if check_dependents && self.dependencies.has_dependents(name) {
            return Err(Error::HasDependents {
                name: name.to_string(),
                dependents: self.dependencies.dependents(name),
            });
        }
        Ok(())
    }

    fn apply(&mut self, name: &str, change: Change) -> Result<PathEntry> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| Error::not_found(name))?;

        match change {
            Change::Path(path) => entry.set_path(path),
            Change::RelativeTo(target) => {
                let previous = entry.relative_to().map(str::to_string);
                if previous != target {
                    if let Some(previous) = &previous {
                        self.dependencies.remove(previous, name);
                    }
                    if let Some(target) = &target {
                        self.dependencies.add(target, name);
                    }
                    entry.set_relative_to(target.as_deref());
                }
            }
        }

        Ok(entry.clone())
    }
}

/// Registry of named logical paths.
///
/// Cheap to share behind an [`Arc`]; every method takes `&self`.
#[derive(Debug, Default)]
pub struct PathRegistry {
    state: RwLock<RegistryState>,
    callbacks: CallbackRegistry,
    options: RegistryOptions,
}

impl PathRegistry {
    /// Create an empty registry with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given options.
    #[must_use]
    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Create a registry pre-populated with the read-only system paths.
    ///
    /// # Errors
    ///
    /// Returns an error if a system path cannot be added.
    pub fn with_system_paths() -> Result<Self> {
        let registry = Self::new();
        registry.add_system_paths()?;
        Ok(registry)
    }

    /// Build a registry from a loaded configuration.
    ///
    /// System paths are added first when enabled, then every configured
    /// definition in order.
    ///
    /// # Errors
    ///
    /// Returns the first error from adding a definition.
    pub fn from_config(config: &Config) -> Result<Self> {
        let registry = Self::with_options(RegistryOptions {
            cache_resolved: config.cache_resolved.unwrap_or(true),
        });
        if config.system_paths.unwrap_or(false) {
            registry.add_system_paths()?;
        }
        for definition in config.paths.iter().flatten() {
            registry.add(definition.clone())?;
        }
        Ok(registry)
    }

    /// Add the system paths that are not registered yet.
    ///
    /// # Errors
    ///
    /// Returns an error if a system path cannot be added.
    pub fn add_system_paths(&self) -> Result<()> {
        for definition in system::definitions() {
            if !self.contains(&definition.name) {
                self.add(definition)?;
            }
        }
        Ok(())
    }

    /// The options this registry was built with.
    #[must_use]
    pub fn options(&self) -> RegistryOptions {
        self.options
    }

    /// Register a new path entry.
    ///
    /// The relative-to target does not have to exist yet; the entry fails
    /// to resolve until it does. Callbacks registered for
    /// [`PathEvent::Added`] on the name are notified after insertion.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] or [`Error::InvalidPathSyntax`] for a
    ///   malformed definition
    /// - [`Error::AlreadyExists`] if the name is taken
    /// - [`Error::CircularDependency`] if the relative-to chain would loop
    pub fn add(&self, definition: PathDefinition) -> Result<PathEntry> {
        definition.validate()?;

        let entry = {
            let mut state = self.state.write();
            if state.entries.contains_key(&definition.name) {
                return Err(Error::AlreadyExists {
                    name: definition.name,
                });
            }
            if let Some(target) = &definition.relative_to {
                if let Some(chain) = state.cycle_through(&definition.name, target) {
                    return Err(Error::CircularDependency {
                        name: definition.name,
                        chain,
                    });
                }
            }

            let entry = PathEntry::from(definition);
            if let Some(target) = entry.relative_to() {
                state.dependencies.add(target, entry.name());
            }
            state.invalidate(entry.name());
            state
                .entries
                .insert(entry.name().to_string(), entry.clone());
            entry
        };

        log::debug!("added path '{}' ({})", entry.name(), describe(&entry));
        self.notify(PathEvent::Added, &entry);
        Ok(entry)
    }

    /// Change the stored path of an entry.
    ///
    /// Pre-commit callbacks on the entry and all of its transitive
    /// dependents may defer the change.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the entry does not exist
    /// - [`Error::ReadOnly`] if the entry is read-only
    /// - [`Error::InvalidPathSyntax`] if the new path is malformed
    pub fn change_path(
        &self,
        name: &str,
        path: impl Into<String>,
        transaction: &mut dyn TransactionContext,
    ) -> Result<ChangeOutcome> {
        self.change(name, Change::Path(path.into()), transaction)
    }

    /// Change (or clear) the relative-to target of an entry.
    ///
    /// Clearing the target makes the entry absolute.
    ///
    /// # Errors
    ///
    /// As [`change_path`](Self::change_path), plus
    /// [`Error::CircularDependency`] if the new target leads back to the
    /// entry.
    pub fn change_relative_to(
        &self,
        name: &str,
        relative_to: Option<&str>,
        transaction: &mut dyn TransactionContext,
    ) -> Result<ChangeOutcome> {
        self.change(
            name,
            Change::RelativeTo(relative_to.map(str::to_string)),
            transaction,
        )
    }

    fn change(
        &self,
        name: &str,
        change: Change,
        transaction: &mut dyn TransactionContext,
    ) -> Result<ChangeOutcome> {
        let affected = {
            let state = self.state.read();
            state.check_change(name, &change)?;
            let mut affected = vec![name.to_string()];
            affected.extend(state.dependencies.transitive_dependents(name));
            affected
        };

        if let Some(requirement) = self.pre_commit(name, &affected, PathEvent::Updated, transaction)
        {
            return Ok(ChangeOutcome::Deferred(requirement));
        }

        let entry = {
            let mut state = self.state.write();
            state.check_change(name, &change)?;
            let entry = state.apply(name, change)?;
            state.invalidate(name);
            entry
        };

        log::debug!("updated path '{name}' ({})", describe(&entry));
        self.notify(PathEvent::Updated, &entry);
        Ok(ChangeOutcome::Applied)
    }

    /// Remove an entry.
    ///
    /// With `check_dependents` set, removal is refused while other entries
    /// are relative to this one. Without it, those dependents are left in
    /// place and fail to resolve until their target is re-added or they are
    /// changed.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the entry does not exist
    /// - [`Error::ReadOnly`] if the entry is read-only
    /// - [`Error::HasDependents`] if dependents exist and checking is on
    pub fn remove(
        &self,
        name: &str,
        check_dependents: bool,
        transaction: &mut dyn TransactionContext,
    ) -> Result<ChangeOutcome> {
        self.state.read().check_remove(name, check_dependents)?;

        let affected = [name.to_string()];
        if let Some(requirement) = self.pre_commit(name, &affected, PathEvent::Removed, transaction)
        {
            return Ok(ChangeOutcome::Deferred(requirement));
        }

        let (entry, orphans) = {
            let mut state = self.state.write();
            state.check_remove(name, check_dependents)?;
            state.invalidate(name);
            let entry = state
                .entries
                .remove(name)
                .ok_or_else(|| Error::not_found(name))?;
            if let Some(target) = entry.relative_to() {
                state.dependencies.remove(target, name);
            }
            (entry, state.dependencies.dependents(name))
        };

        if orphans.is_empty() {
            log::debug!("removed path '{name}'");
        } else {
            log::warn!(
                "removed path '{name}' leaving unresolvable dependents: {}",
                orphans.join(", ")
            );
        }
        self.notify(PathEvent::Removed, &entry);
        Ok(ChangeOutcome::Applied)
    }

    /// Resolve a registered entry to a concrete path.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] naming the entry, or the first missing target
    ///   along its relative-to chain
    /// - [`Error::CircularDependency`] if the chain loops
    /// - [`Error::InvalidPathSyntax`] if a stored path cannot be normalized
    pub fn resolve(&self, name: &str) -> Result<String> {
        self.state.read().resolve(name, self.options.cache_resolved)
    }

    /// Resolve an ad hoc path without registering it.
    ///
    /// With `relative_to` unset `path` is resolved as an absolute entry;
    /// otherwise it is a fragment appended to the named entry.
    ///
    /// # Errors
    ///
    /// As [`resolve`](Self::resolve), for the relative-to target.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathreg::{PathDefinition, PathRegistry};
    ///
    /// let registry = PathRegistry::new();
    /// registry.add(PathDefinition::absolute("data", "/srv/app")).unwrap();
    /// # #[cfg(unix)]
    /// # {
    /// assert_eq!(
    ///     registry.resolve_path("cache", Some("data")).unwrap(),
    ///     "/srv/app/cache"
    /// );
    /// # }
    /// assert!(registry.resolve_path("cache", Some("missing")).is_err());
    /// ```
    pub fn resolve_path(&self, path: &str, relative_to: Option<&str>) -> Result<String> {
        match relative_to {
            None => resolve_absolute(path),
            Some(target) => {
                let base = self.resolve(target)?;
                resolve_relative(&base, path)
            }
        }
    }

    /// A snapshot of the named entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the entry does not exist.
    pub fn get_entry(&self, name: &str) -> Result<PathEntry> {
        self.state.read().entry(name).cloned()
    }

    /// Whether an entry with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.state.read().entries.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state.read().entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// Snapshots of every entry, sorted by name.
    #[must_use]
    pub fn entries(&self) -> Vec<PathEntry> {
        let mut entries: Vec<PathEntry> = self.state.read().entries.values().cloned().collect();
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        entries
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Whether no entries are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    /// Entries directly relative to `name`, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `name` is not registered.
    pub fn dependents(&self, name: &str) -> Result<Vec<String>> {
        let state = self.state.read();
        state.entry(name)?;
        Ok(state.dependencies.dependents(name))
    }

    /// Every entry whose resolution passes through `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `name` is not registered.
    pub fn transitive_dependents(&self, name: &str) -> Result<Vec<String>> {
        let state = self.state.read();
        state.entry(name)?;
        Ok(state.dependencies.transitive_dependents(name))
    }

    /// Register a callback for `events` on the path `name`.
    ///
    /// An empty `events` slice registers for every event kind.
    pub fn register_callback(
        &self,
        name: &str,
        callback: Arc<dyn PathCallback>,
        events: &[PathEvent],
    ) -> CallbackHandle {
        let handle = self.callbacks.register(name, callback, events);
        log::debug!("registered callback on '{name}' for {:?}", handle.events());
        handle
    }

    /// Unregister a callback. Idempotent.
    pub fn unregister_callback(&self, handle: &CallbackHandle) -> bool {
        self.callbacks.unregister(handle)
    }

    /// The callback bookkeeping, for inspection.
    #[must_use]
    pub fn callbacks(&self) -> &CallbackRegistry {
        &self.callbacks
    }

    /// Run the pre-commit sweep; returns the requirement that stopped it.
    fn pre_commit(
        &self,
        name: &str,
        affected: &[String],
        event: PathEvent,
        transaction: &mut dyn TransactionContext,
    ) -> Option<Requirement> {
        let deliveries = self.callbacks.snapshot(affected, event);
        let mut context = ChangeContext::new(event, transaction);
        for delivery in &deliveries {
            delivery.pre_commit(&mut context);
            if let Some(requirement) = context.requirement() {
                log::info!(
                    "{event} of path '{name}' deferred: callback on '{}' requires {requirement}",
                    delivery.name()
                );
                return Some(requirement);
            }
        }
        None
    }

    fn notify(&self, event: PathEvent, entry: &PathEntry) {
        for delivery in self.callbacks.snapshot(&[entry.name()][..], event) {
            delivery.post_commit(event, entry);
        }
    }
}

fn describe(entry: &PathEntry) -> String {
    match entry.relative_to() {
        Some(target) => format!("'{}' relative to '{target}'", entry.path()),
        None => format!("'{}'", entry.path()),
    }
}
