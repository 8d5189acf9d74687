//! Invariant checks shared by the state and machine builders.
//!
//! Each check returns `Ok` or the specific [`MachineError`] for the violated
//! invariant, so builders fail fast with a precise error kind.

use std::collections::HashMap;

use crate::error::{MachineError, Result};
use crate::{State, StateId};

pub(crate) fn has_state_id(id: Option<StateId>) -> Result<StateId> {
    id.ok_or(MachineError::MissingId)
}

pub(crate) fn has_transition<B>(id: &StateId, behavior: Option<B>) -> Result<B> {
    behavior.ok_or_else(|| MachineError::MissingTransition(id.clone()))
}

pub(crate) fn transition_not_set<B>(behavior: &Option<B>) -> Result<()> {
    if behavior.is_some() {
        return Err(MachineError::TransitionAlreadySet);
    }
    Ok(())
}

pub(crate) fn duplicate_state_id(known: &HashMap<StateId, usize>, id: &StateId) -> Result<()> {
    if known.contains_key(id) {
        return Err(MachineError::DuplicateStateId(id.clone()));
    }
    Ok(())
}

pub(crate) fn single_initial_state(
    existing: Option<&StateId>,
    candidate: &StateId,
    initial: bool,
) -> Result<()> {
    match existing {
        Some(existing) if initial => Err(MachineError::MultipleInitialStates {
            existing: existing.clone(),
            rejected: candidate.clone(),
        }),
        _ => Ok(()),
    }
}

pub(crate) fn has_initial_state(initial: Option<usize>) -> Result<usize> {
    initial.ok_or(MachineError::MissingInitialState)
}

pub(crate) fn no_illegal_transitions<T>(
    states: &[State<T>],
    known: &HashMap<StateId, usize>,
) -> Result<()> {
    for state in states {
        if let Some(to) = state
            .transitions_to()
            .iter()
            .find(|to| !known.contains_key(*to))
        {
            return Err(MachineError::IllegalTransition {
                from: state.id().clone(),
                to: to.clone(),
            });
        }
    }
    Ok(())
}
