//! States and the builder that assembles them.

use std::fmt;

use crate::checks;
use crate::error::Result;
use crate::{ReferenceTrackingStateIdRegistry, StateId};

/// Function run when a machine is in a state; returns the next state's id.
pub type Transition<T> = Box<dyn Fn(&mut T) -> StateId>;

enum Behavior<T> {
    Transition(Transition<T>),
    Terminal,
}

/// An immutable machine state.
///
/// `transitions_to` lists exactly the ids the transition factory requested
/// from its registry when the state was built.
pub struct State<T> {
    id: StateId,
    initial: bool,
    behavior: Behavior<T>,
    transitions_to: Vec<StateId>,
}

impl<T> State<T> {
    /// Starts a new [`StateBuilder`].
    pub fn builder() -> StateBuilder<T> {
        StateBuilder::new()
    }

    /// The state's id.
    pub fn id(&self) -> &StateId {
        &self.id
    }

    /// Whether this is the machine's entry state.
    pub fn initial(&self) -> bool {
        self.initial
    }

    /// Whether reaching this state ends a run.
    pub fn is_terminal(&self) -> bool {
        matches!(self.behavior, Behavior::Terminal)
    }

    /// Ids this state may transition to.
    pub fn transitions_to(&self) -> &[StateId] {
        &self.transitions_to
    }

    /// Runs the transition, or returns `None` for a terminal state.
    pub(crate) fn step(&self, context: &mut T) -> Option<StateId> {
        match &self.behavior {
            Behavior::Transition(transition) => Some(transition(context)),
            Behavior::Terminal => None,
        }
    }
}

impl<T> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("id", &self.id)
            .field("initial", &self.initial)
            .field("terminal", &self.is_terminal())
            .field("transitions_to", &self.transitions_to)
            .finish()
    }
}

/// Builder for [`State`].
///
/// # Examples
///
/// ```
/// use sch_fsm::{State, StateIdRegistry};
///
/// let state = State::<u32>::builder()
///     .id("count")
///     .initial()
///     .transition(|ids| {
///         let done = ids.get("done");
///         move |n: &mut u32| {
///             *n += 1;
///             done.clone()
///         }
///     })?
///     .build()?;
///
/// assert_eq!(state.id().name(), "count");
/// assert_eq!(state.transitions_to().len(), 1);
/// assert_eq!(state.transitions_to()[0].name(), "done");
/// # Ok::<(), sch_fsm::MachineError>(())
/// ```
pub struct StateBuilder<T> {
    id: Option<StateId>,
    initial: bool,
    behavior: Option<Behavior<T>>,
    transitions_to: Vec<StateId>,
}

impl<T> Default for StateBuilder<T> {
    fn default() -> Self {
        Self {
            id: None,
            initial: false,
            behavior: None,
            transitions_to: Vec::new(),
        }
    }
}

impl<T> StateBuilder<T> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the state's id.
    pub fn id(mut self, id: impl Into<StateId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Marks the state as the machine's entry point.
    pub fn initial(mut self) -> Self {
        self.initial = true;
        self
    }

    /// Sets the transition through a factory.
    ///
    /// The factory receives a fresh [`ReferenceTrackingStateIdRegistry`];
    /// every id it requests becomes part of the state's `transitions_to`.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionAlreadySet`](crate::MachineError::TransitionAlreadySet)
    /// if a transition or terminal marker was already set.
    pub fn transition<F, G>(mut self, factory: F) -> Result<Self>
    where
        F: FnOnce(&mut ReferenceTrackingStateIdRegistry) -> G,
        G: Fn(&mut T) -> StateId + 'static,
    {
        checks::transition_not_set(&self.behavior)?;

        let mut references = ReferenceTrackingStateIdRegistry::new();
        let transition = factory(&mut references);

        self.behavior = Some(Behavior::Transition(Box::new(transition)));
        self.transitions_to = references.into_references();
        Ok(self)
    }

    /// Marks the state as terminal: entering it ends the run.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionAlreadySet`](crate::MachineError::TransitionAlreadySet)
    /// if a transition or terminal marker was already set.
    pub fn terminal(mut self) -> Result<Self> {
        checks::transition_not_set(&self.behavior)?;
        self.behavior = Some(Behavior::Terminal);
        self.transitions_to.clear();
        Ok(self)
    }

    /// Finishes the state.
    ///
    /// # Errors
    ///
    /// [`MissingId`](crate::MachineError::MissingId) without an id,
    /// [`MissingTransition`](crate::MachineError::MissingTransition) without
    /// a transition or terminal marker.
    pub fn build(self) -> Result<State<T>> {
        let id = checks::has_state_id(self.id)?;
        let behavior = checks::has_transition(&id, self.behavior)?;

        Ok(State {
            id,
            initial: self.initial,
            behavior,
            transitions_to: self.transitions_to,
        })
    }
}
