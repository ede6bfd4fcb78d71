//! Callback bookkeeping and delivery.
//!
//! Callbacks are registered per path name and per [`PathEvent`]. Delivery
//! always works from a snapshot copied under the bookkeeping lock and is
//! performed with no lock held, so callbacks may register, unregister, or
//! query the registry freely.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::entry::PathEntry;
use crate::registry::context::ChangeContext;

/// Lifecycle events of a path entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathEvent {
    /// The entry was added.
    Added,
    /// The entry was removed.
    Removed,
    /// The entry's path or relative-to target changed.
    Updated,
}

impl PathEvent {
    /// Every event kind.
    pub const ALL: [PathEvent; 3] = [Self::Added, Self::Removed, Self::Updated];
}

impl fmt::Display for PathEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "added"),
            Self::Removed => write!(f, "removed"),
            Self::Updated => write!(f, "updated"),
        }
    }
}

/// A party interested in changes to a path.
///
/// Both hooks default to doing nothing, so implementors override only the
/// phase they care about.
///
/// # Examples
///
/// ```
/// use pathreg::registry::{ChangeContext, PathCallback};
///
/// /// Consumers of this path cannot switch directories while running.
/// struct RequiresRestart;
///
/// impl PathCallback for RequiresRestart {
///     fn pre_commit(&self, context: &mut ChangeContext<'_>, _name: &str) {
///         if !context.is_booting() {
///             context.require_restart();
///         }
///     }
/// }
/// ```
pub trait PathCallback: Send + Sync {
    /// Called before a change touching `name` is applied.
    ///
    /// `name` is the changed entry itself or, for updates, one of its
    /// transitive dependents.
    fn pre_commit(&self, context: &mut ChangeContext<'_>, name: &str) {
        let _ = (context, name);
    }

    /// Called after the change has been applied to the registry.
    fn post_commit(&self, event: PathEvent, entry: &PathEntry) {
        let _ = (event, entry);
    }
}

/// Opaque token returned by registration, used to unregister.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallbackHandle {
    id: u64,
    name: String,
    events: Vec<PathEvent>,
}

impl CallbackHandle {
    /// The path name the callback was registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The event kinds the callback was registered for.
    #[must_use]
    pub fn events(&self) -> &[PathEvent] {
        &self.events
    }
}

#[derive(Clone)]
struct Registration {
    callback: Arc<dyn PathCallback>,
    active: Arc<AtomicBool>,
}

/// One pending invocation taken from a snapshot.
pub(crate) struct Delivery {
    name: String,
    registration: Registration,
}

impl Delivery {
    /// The path name this delivery is for.
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the pre-commit hook unless the callback was unregistered
    /// after the snapshot was taken.
    pub(crate) fn pre_commit(&self, context: &mut ChangeContext<'_>) {
        if self.registration.active.load(Ordering::Acquire) {
            self.registration.callback.pre_commit(context, &self.name);
        }
    }

    /// Invoke the post-commit hook under the same liveness rule.
    pub(crate) fn post_commit(&self, event: PathEvent, entry: &PathEntry) {
        if self.registration.active.load(Ordering::Acquire) {
            self.registration.callback.post_commit(event, entry);
        }
    }
}

type Buckets = HashMap<PathEvent, BTreeMap<u64, Registration>>;

/// Registry of callbacks keyed by path name and event kind.
#[derive(Default)]
pub struct CallbackRegistry {
    by_name: Mutex<HashMap<String, Buckets>>,
    next_id: AtomicU64,
}

impl CallbackRegistry {
    /// Create an empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `events` on the path `name`.
    ///
    /// An empty `events` slice registers for every event kind. The name
    /// does not have to be registered as a path yet.
    pub fn register(
        &self,
        name: &str,
        callback: Arc<dyn PathCallback>,
        events: &[PathEvent],
    ) -> CallbackHandle {
        let mut events = if events.is_empty() {
            PathEvent::ALL.to_vec()
        } else {
            events.to_vec()
        };
        events.sort_unstable();
        events.dedup();

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let registration = Registration {
            callback,
            active: Arc::new(AtomicBool::new(true)),
        };

        let mut by_name = self.by_name.lock();
        let buckets = by_name.entry(name.to_string()).or_default();
        for event in &events {
            buckets
                .entry(*event)
                .or_default()
                .insert(id, registration.clone());
        }

        CallbackHandle {
            id,
            name: name.to_string(),
            events,
        }
    }

    /// Remove a registration from every bucket it was added to.
    ///
    /// Idempotent. Returns whether anything was removed. Once this returns,
    /// the callback is not invoked again, including from snapshots taken
    /// earlier.
    pub fn unregister(&self, handle: &CallbackHandle) -> bool {
        let mut by_name = self.by_name.lock();
        let Some(buckets) = by_name.get_mut(&handle.name) else {
            return false;
        };

        let mut removed = false;
        for event in &handle.events {
            if let Some(bucket) = buckets.get_mut(event) {
                if let Some(registration) = bucket.remove(&handle.id) {
                    registration.active.store(false, Ordering::Release);
                    removed = true;
                }
                if bucket.is_empty() {
                    buckets.remove(event);
                }
            }
        }
        if buckets.is_empty() {
            by_name.remove(&handle.name);
        }

        removed
    }

    /// Copy the registrations for `event` on each of `names`, in order.
    pub(crate) fn snapshot<S: AsRef<str>>(&self, names: &[S], event: PathEvent) -> Vec<Delivery> {
        let by_name = self.by_name.lock();
        let mut deliveries = Vec::new();
        for name in names {
            let name = name.as_ref();
            let Some(bucket) = by_name.get(name).and_then(|buckets| buckets.get(&event)) else {
                continue;
            };
            deliveries.extend(bucket.values().map(|registration| Delivery {
                name: name.to_string(),
                registration: registration.clone(),
            }));
        }
        deliveries
    }

    /// Number of live registrations for `event` on `name`.
    #[must_use]
    pub fn count(&self, name: &str, event: PathEvent) -> usize {
        self.by_name
            .lock()
            .get(name)
            .and_then(|buckets| buckets.get(&event))
            .map_or(0, BTreeMap::len)
    }

    /// Whether no callbacks are registered at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.lock().is_empty()
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.by_name.lock().keys().cloned().collect();
        f.debug_struct("CallbackRegistry")
            .field("names", &names)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::PathDefinition;
    use crate::registry::context::OperationContext;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct Counter {
        pre: AtomicUsize,
        post: AtomicUsize,
    }

    impl PathCallback for Counter {
        fn pre_commit(&self, _context: &mut ChangeContext<'_>, _name: &str) {
            self.pre.fetch_add(1, Ordering::SeqCst);
        }

        fn post_commit(&self, _event: PathEvent, _entry: &PathEntry) {
            self.post.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn entry() -> PathEntry {
        PathEntry::from(PathDefinition::absolute("data", "/srv"))
    }

    #[test]
    fn test_register_defaults_to_all_events() {
        let registry = CallbackRegistry::new();
        let handle = registry.register("data", Arc::new(Counter::default()), &[]);
        assert_eq!(handle.events(), &PathEvent::ALL);
        for event in PathEvent::ALL {
            assert_eq!(registry.count("data", event), 1);
        }
    }

    #[test]
    fn test_register_dedups_events() {
        let registry = CallbackRegistry::new();
        let handle = registry.register(
            "data",
            Arc::new(Counter::default()),
            &[PathEvent::Updated, PathEvent::Updated],
        );
        assert_eq!(handle.events(), &[PathEvent::Updated]);
    }

    #[test]
    fn test_unregister_prunes_and_is_idempotent() {
        let registry = CallbackRegistry::new();
        let handle = registry.register(
            "data",
            Arc::new(Counter::default()),
            &[PathEvent::Updated, PathEvent::Removed],
        );
        assert!(!registry.is_empty());

        assert!(registry.unregister(&handle));
        assert!(registry.is_empty());
        assert!(!registry.unregister(&handle));
    }

    #[test]
    fn test_unregister_keeps_other_registrations() {
        let registry = CallbackRegistry::new();
        let first = registry.register("data", Arc::new(Counter::default()), &[]);
        let _second = registry.register("data", Arc::new(Counter::default()), &[]);

        registry.unregister(&first);
        assert_eq!(registry.count("data", PathEvent::Updated), 1);
    }

    #[test]
    fn test_snapshot_orders_by_name_then_registration() {
        let registry = CallbackRegistry::new();
        registry.register("b", Arc::new(Counter::default()), &[PathEvent::Updated]);
        registry.register("a", Arc::new(Counter::default()), &[PathEvent::Updated]);
        registry.register("b", Arc::new(Counter::default()), &[PathEvent::Updated]);
        registry.register("a", Arc::new(Counter::default()), &[PathEvent::Added]);

        let names: Vec<String> = registry
            .snapshot(&["b", "a"][..], PathEvent::Updated)
            .iter()
            .map(|d| d.name().to_string())
            .collect();
        assert_eq!(names, vec!["b", "b", "a"]);
    }

    #[test]
    fn test_unregister_after_snapshot_suppresses_delivery() {
        let registry = CallbackRegistry::new();
        let counter = Arc::new(Counter::default());
        let handle = registry.register("data", counter.clone(), &[]);

        let post = registry.snapshot(&["data"][..], PathEvent::Updated);
        let pre = registry.snapshot(&["data"][..], PathEvent::Updated);
        registry.unregister(&handle);

        for delivery in &post {
            delivery.post_commit(PathEvent::Updated, &entry());
        }
        let mut transaction = OperationContext::new();
        let mut context = ChangeContext::new(PathEvent::Updated, &mut transaction);
        for delivery in &pre {
            delivery.pre_commit(&mut context);
        }

        assert_eq!(counter.post.load(Ordering::SeqCst), 0);
        assert_eq!(counter.pre.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_snapshot_is_unaffected_by_later_registration() {
        let registry = CallbackRegistry::new();
        registry.register("data", Arc::new(Counter::default()), &[]);
        let snapshot = registry.snapshot(&["data"][..], PathEvent::Added);

        let late = Arc::new(Counter::default());
        registry.register("data", late.clone(), &[]);
        for delivery in &snapshot {
            delivery.post_commit(PathEvent::Added, &entry());
        }

        assert_eq!(snapshot.len(), 1);
        assert_eq!(late.post.load(Ordering::SeqCst), 0);
    }
}
