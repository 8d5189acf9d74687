//! Error types for machine construction and execution.

use thiserror::Error;

use crate::StateId;

/// Errors raised while assembling or running a machine.
///
/// Every variant except [`UndeclaredTransition`](MachineError::UndeclaredTransition)
/// is a construction error: it means the states were wired together
/// incorrectly and the machine was never built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// A state builder was finished without an id.
    #[error("missing required state id")]
    MissingId,

    /// A state builder was finished without a transition or terminal marker.
    #[error("state {0} is missing a transition")]
    MissingTransition(StateId),

    /// A transition (or terminal marker) was set twice on one builder.
    #[error("state builder transition is already set")]
    TransitionAlreadySet,

    /// Two states share an id.
    #[error("there is already a state with id: {0}")]
    DuplicateStateId(StateId),

    /// A second state declared itself initial.
    #[error("there is already an initial state with id: {existing} (rejected: {rejected})")]
    MultipleInitialStates {
        /// The initial state accepted earlier.
        existing: StateId,
        /// The state that was refused.
        rejected: StateId,
    },

    /// No state was marked initial.
    #[error("missing initial state")]
    MissingInitialState,

    /// A state declares a transition to an id that is not part of the machine.
    #[error("state {from} transitions to {to}, but no state with that id has been defined")]
    IllegalTransition {
        /// Source state.
        from: StateId,
        /// Dangling target id.
        to: StateId,
    },

    /// At run time a transition function returned an id it never declared.
    #[error("state {from} returned {to}, which is not one of its declared transitions")]
    UndeclaredTransition {
        /// Source state.
        from: StateId,
        /// Returned id.
        to: StateId,
    },
}

/// Convenience alias for results with [`MachineError`].
pub type Result<T> = std::result::Result<T, MachineError>;
