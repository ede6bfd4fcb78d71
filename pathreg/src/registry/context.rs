//! Transaction and change contexts for the two-phase change protocol.
//!
//! Before an update or removal is applied, every interested pre-commit
//! callback sees a [`ChangeContext`]. A callback that cannot absorb the
//! change at runtime asks for a reload or restart; the registry then leaves
//! its state untouched and reports [`ChangeOutcome::Deferred`].

use std::fmt;

use crate::registry::PathEvent;

/// What a deferred change needs before it can take effect.
///
/// Ordered by severity: a restart subsumes a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Requirement {
    /// The owning system must reload to pick up the change.
    Reload,
    /// The owning process must restart to pick up the change.
    Restart,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reload => write!(f, "reload"),
            Self::Restart => write!(f, "restart"),
        }
    }
}

/// The caller-supplied context of one management operation.
///
/// The registry treats it as authoritative for whether a change proceeds to
/// commit. Callers with their own transaction machinery implement this;
/// everyone else can use [`OperationContext`].
pub trait TransactionContext {
    /// Record that the operation needs a reload to take effect.
    fn require_reload(&mut self);

    /// Record that the operation needs a restart to take effect.
    fn require_restart(&mut self);

    /// Whether the owning system is still booting.
    fn is_booting(&self) -> bool;

    /// The strongest requirement recorded so far, if any.
    fn requirement(&self) -> Option<Requirement>;
}

/// A standalone [`TransactionContext`].
///
/// # Examples
///
/// ```
/// use pathreg::registry::{OperationContext, Requirement, TransactionContext};
///
/// let mut context = OperationContext::new();
/// assert_eq!(context.requirement(), None);
///
/// context.require_reload();
/// context.require_restart();
/// context.require_reload();
/// assert_eq!(context.requirement(), Some(Requirement::Restart));
/// ```
#[derive(Debug, Default, Clone)]
pub struct OperationContext {
    booting: bool,
    requirement: Option<Requirement>,
}

impl OperationContext {
    /// A context for a running (not booting) system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A context for a system that is still booting.
    #[must_use]
    pub fn booting() -> Self {
        Self {
            booting: true,
            requirement: None,
        }
    }

    fn raise(&mut self, requirement: Requirement) {
        self.requirement = self.requirement.max(Some(requirement));
    }
}

impl TransactionContext for OperationContext {
    fn require_reload(&mut self) {
        self.raise(Requirement::Reload);
    }

    fn require_restart(&mut self) {
        self.raise(Requirement::Restart);
    }

    fn is_booting(&self) -> bool {
        self.booting
    }

    fn requirement(&self) -> Option<Requirement> {
        self.requirement
    }
}

/// The view of one change operation handed to pre-commit callbacks.
///
/// Requests are forwarded to the underlying [`TransactionContext`] and also
/// tracked locally, so a requirement left on a shared transaction by an
/// earlier step does not block this change.
pub struct ChangeContext<'a> {
    event: PathEvent,
    transaction: &'a mut dyn TransactionContext,
    requested: Option<Requirement>,
}

impl<'a> ChangeContext<'a> {
    pub(crate) fn new(event: PathEvent, transaction: &'a mut dyn TransactionContext) -> Self {
        Self {
            event,
            transaction,
            requested: None,
        }
    }

    /// The kind of change being considered.
    #[must_use]
    pub fn event(&self) -> PathEvent {
        self.event
    }

    /// Ask for a reload instead of applying the change now.
    pub fn require_reload(&mut self) {
        self.transaction.require_reload();
        self.requested = self.requested.max(Some(Requirement::Reload));
    }

    /// Ask for a restart instead of applying the change now.
    pub fn require_restart(&mut self) {
        self.transaction.require_restart();
        self.requested = Some(Requirement::Restart);
    }

    /// Whether the owning system is still booting.
    #[must_use]
    pub fn is_booting(&self) -> bool {
        self.transaction.is_booting()
    }

    /// The requirement raised during this change, if any.
    #[must_use]
    pub fn requirement(&self) -> Option<Requirement> {
        self.requested
    }

    /// Whether the registry should apply the change.
    #[must_use]
    pub fn should_install(&self) -> bool {
        self.requested.is_none()
    }
}

impl fmt::Debug for ChangeContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeContext")
            .field("event", &self.event)
            .field("requested", &self.requested)
            .finish_non_exhaustive()
    }
}

/// Result of a change or removal that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// The registry was mutated and post-commit callbacks fired.
    Applied,
    /// A pre-commit callback deferred the change; the registry is unchanged.
    Deferred(Requirement),
}

impl ChangeOutcome {
    /// Whether the change took effect immediately.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// Whether the change awaits a reload or restart.
    #[must_use]
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirement_ordering() {
        assert!(Requirement::Reload < Requirement::Restart);
        assert_eq!(Requirement::Reload.to_string(), "reload");
        assert_eq!(Requirement::Restart.to_string(), "restart");
    }

    #[test]
    fn test_operation_context_booting() {
        assert!(OperationContext::booting().is_booting());
        assert!(!OperationContext::new().is_booting());
    }

    #[test]
    fn test_change_context_forwards_requests() {
        let mut transaction = OperationContext::new();
        {
            let mut context = ChangeContext::new(PathEvent::Updated, &mut transaction);
            assert!(context.should_install());
            context.require_reload();
            assert!(!context.should_install());
            assert_eq!(context.requirement(), Some(Requirement::Reload));
            assert_eq!(context.event(), PathEvent::Updated);
        }
        assert_eq!(transaction.requirement(), Some(Requirement::Reload));
    }

    #[test]
    fn test_change_context_ignores_earlier_requirement() {
        let mut transaction = OperationContext::new();
        transaction.require_restart();

        let context = ChangeContext::new(PathEvent::Removed, &mut transaction);
        assert!(context.should_install());
        assert_eq!(context.requirement(), None);
    }

    #[test]
    fn test_restart_outranks_reload() {
        let mut transaction = OperationContext::new();
        let mut context = ChangeContext::new(PathEvent::Updated, &mut transaction);
        context.require_restart();
        context.require_reload();
        assert_eq!(context.requirement(), Some(Requirement::Restart));
    }

    #[test]
    fn test_change_outcome_predicates() {
        assert!(ChangeOutcome::Applied.is_applied());
        assert!(!ChangeOutcome::Applied.is_deferred());
        assert!(ChangeOutcome::Deferred(Requirement::Reload).is_deferred());
    }
}
