//! Machines and the builder that validates them.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace};

use crate::checks;
use crate::error::{MachineError, Result};
use crate::{State, StateId};

/// An immutable, validated set of states with one entry point.
///
/// Construction through [`MachineBuilder`] guarantees that exactly one state
/// is initial, ids are unique, and every declared transition targets a state
/// of this machine.
///
/// # Examples
///
/// ```
/// use sch_fsm::{Machine, State, StateIdRegistry};
///
/// let count = State::<u32>::builder()
///     .id("count")
///     .initial()
///     .transition(|ids| {
///         let count = ids.get("count");
///         let done = ids.get("done");
///         move |n: &mut u32| {
///             *n += 1;
///             if *n < 3 { count.clone() } else { done.clone() }
///         }
///     })?
///     .build()?;
/// let done = State::<u32>::builder().id("done").terminal()?.build()?;
///
/// let machine = Machine::builder().state(count)?.state(done)?.build()?;
///
/// let mut n = 0;
/// let last = machine.run(&mut n)?;
/// assert_eq!(last.name(), "done");
/// assert_eq!(n, 3);
/// # Ok::<(), sch_fsm::MachineError>(())
/// ```
pub struct Machine<T> {
    states: Vec<State<T>>,
    index: HashMap<StateId, usize>,
    initial: usize,
}

impl<T> Machine<T> {
    /// Starts a new [`MachineBuilder`].
    pub fn builder() -> MachineBuilder<T> {
        MachineBuilder::new()
    }

    /// The entry state.
    pub fn initial_state(&self) -> &State<T> {
        &self.states[self.initial]
    }

    /// All states in insertion order.
    pub fn states(&self) -> &[State<T>] {
        &self.states
    }

    /// Looks up a state by id.
    pub fn state(&self, id: &StateId) -> Option<&State<T>> {
        self.index.get(id).map(|&idx| &self.states[idx])
    }

    /// Runs the machine from its initial state until a terminal state is
    /// reached, returning that state's id.
    ///
    /// # Errors
    ///
    /// Returns [`UndeclaredTransition`](MachineError::UndeclaredTransition) if
    /// a transition function hands back an id outside its `transitions_to`.
    pub fn run(&self, context: &mut T) -> Result<StateId> {
        let mut current = self.initial_state();
        trace!(state = %current.id(), "entering initial state");

        loop {
            let Some(next) = current.step(context) else {
                debug!(state = %current.id(), "reached terminal state");
                return Ok(current.id().clone());
            };

            let target = current
                .transitions_to()
                .contains(&next)
                .then(|| self.state(&next))
                .flatten()
                .ok_or_else(|| MachineError::UndeclaredTransition {
                    from: current.id().clone(),
                    to: next.clone(),
                })?;

            debug!(from = %current.id(), to = %target.id(), "transition");
            current = target;
        }
    }
}

impl<T> fmt::Debug for Machine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("initial", self.initial_state().id())
            .field("states", &self.states)
            .finish()
    }
}

/// Builder for [`Machine`].
///
/// [`state`](MachineBuilder::state) rejects duplicate ids and a second
/// initial state immediately; [`build`](MachineBuilder::build) checks for a
/// missing initial state and dangling transitions.
pub struct MachineBuilder<T> {
    states: Vec<State<T>>,
    index: HashMap<StateId, usize>,
    initial: Option<usize>,
}

impl<T> Default for MachineBuilder<T> {
    fn default() -> Self {
        Self {
            states: Vec::new(),
            index: HashMap::new(),
            initial: None,
        }
    }
}

impl<T> MachineBuilder<T> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a state.
    ///
    /// # Errors
    ///
    /// [`DuplicateStateId`](MachineError::DuplicateStateId) if the id is
    /// taken, [`MultipleInitialStates`](MachineError::MultipleInitialStates)
    /// if the state is initial and another initial state was already added.
    pub fn state(mut self, state: State<T>) -> Result<Self> {
        checks::duplicate_state_id(&self.index, state.id())?;
        let existing = self.initial.map(|idx| self.states[idx].id());
        checks::single_initial_state(existing, state.id(), state.initial())?;

        let idx = self.states.len();
        if state.initial() {
            self.initial = Some(idx);
        }
        self.index.insert(state.id().clone(), idx);
        self.states.push(state);
        Ok(self)
    }

    /// Validates and finishes the machine.
    ///
    /// # Errors
    ///
    /// [`MissingInitialState`](MachineError::MissingInitialState) if no state
    /// is initial, [`IllegalTransition`](MachineError::IllegalTransition) if a
    /// state declares a transition to an unknown id.
    pub fn build(self) -> Result<Machine<T>> {
        let initial = checks::has_initial_state(self.initial)?;
        checks::no_illegal_transitions(&self.states, &self.index)?;

        debug!(
            states = self.states.len(),
            initial = %self.states[initial].id(),
            "built machine"
        );

        Ok(Machine {
            states: self.states,
            index: self.index,
            initial,
        })
    }
}
