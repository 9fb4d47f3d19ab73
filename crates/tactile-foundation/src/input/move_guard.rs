//! Per-target arming of move prevention.
//!
//! A guard ties a target to the recognizers that may want its touch moves
//! prevented (to stop the page scrolling under a horizontal drag). Guards live
//! as long as their [`MoveGuardRegistration`].

use super::types::TargetId;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub type GuardId = u64;

pub(crate) type ArmedRecognizers = SmallVec<[usize; 4]>;

#[derive(Debug)]
struct MoveGuard {
    target: TargetId,
    recognizers: ArmedRecognizers,
}

#[derive(Debug, Default)]
pub(crate) struct MoveGuardTable {
    next_id: GuardId,
    guards: IndexMap<GuardId, MoveGuard, FxBuildHasher>,
}

impl MoveGuardTable {
    fn insert(&mut self, target: TargetId, recognizers: ArmedRecognizers) -> GuardId {
        self.next_id += 1;
        let id = self.next_id;
        self.guards.insert(
            id,
            MoveGuard {
                target,
                recognizers,
            },
        );
        id
    }

    fn remove(&mut self, id: GuardId) -> bool {
        self.guards.shift_remove(&id).is_some()
    }

    /// Armed recognizer indices of every guard on `target`, in registration order.
    pub(crate) fn for_target(
        &self,
        target: TargetId,
    ) -> impl Iterator<Item = &ArmedRecognizers> + '_ {
        self.guards
            .values()
            .filter(move |guard| guard.target == target)
            .map(|guard| &guard.recognizers)
    }

    pub(crate) fn len(&self) -> usize {
        self.guards.len()
    }
}

/// Shared handle to the engine's guard table.
#[derive(Clone, Debug, Default)]
pub(crate) struct MoveGuards {
    table: Rc<RefCell<MoveGuardTable>>,
}

impl MoveGuards {
    pub(crate) fn arm(
        &self,
        target: TargetId,
        recognizers: ArmedRecognizers,
    ) -> MoveGuardRegistration {
        let id = self.table.borrow_mut().insert(target, recognizers);
        MoveGuardRegistration {
            table: Rc::downgrade(&self.table),
            id: Some(id),
        }
    }

    pub(crate) fn table(&self) -> std::cell::Ref<'_, MoveGuardTable> {
        self.table.borrow()
    }

    pub(crate) fn len(&self) -> usize {
        self.table.borrow().len()
    }
}

/// Keeps a move guard armed. Dropping it (or calling
/// [`deregister`](Self::deregister)) disarms the guard.
#[derive(Debug)]
pub struct MoveGuardRegistration {
    table: Weak<RefCell<MoveGuardTable>>,
    id: Option<GuardId>,
}

impl MoveGuardRegistration {
    /// A handle that guards nothing, returned when no requested gesture reacts to moves.
    pub(crate) fn inactive() -> Self {
        Self {
            table: Weak::new(),
            id: None,
        }
    }

    pub fn id(&self) -> Option<GuardId> {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some() && self.table.strong_count() > 0
    }

    pub fn deregister(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(table) = self.table.upgrade() {
                table.borrow_mut().remove(id);
            }
        }
    }
}

impl Drop for MoveGuardRegistration {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn guards_are_listed_per_target_until_dropped() {
        let guards = MoveGuards::default();
        let first = guards.arm(1, smallvec![2]);
        let _other = guards.arm(5, smallvec![0]);
        let second = guards.arm(1, smallvec![2, 3]);

        let armed: Vec<Vec<usize>> = guards
            .table()
            .for_target(1)
            .map(|indices| indices.to_vec())
            .collect();
        assert_eq!(armed, vec![vec![2], vec![2, 3]]);

        drop(first);
        assert_eq!(guards.len(), 2);

        second.deregister();
        assert_eq!(guards.table().for_target(1).count(), 0);
        assert_eq!(guards.len(), 1);
    }

    #[test]
    fn inactive_registration_is_harmless() {
        let registration = MoveGuardRegistration::inactive();
        assert!(!registration.is_active());
        registration.deregister();
    }
}
