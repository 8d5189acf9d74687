//! Finite-state machines validated when they are built, not when they run.
//!
//! - [`StateId`]: interned state name handed out by a [`StateIdRegistry`].
//! - [`State`] / [`StateBuilder`]: a state and its transition function. The
//!   builder passes a [`ReferenceTrackingStateIdRegistry`] to the caller's
//!   transition factory and records every id it touches as the state's
//!   [`transitions_to`](State::transitions_to).
//! - [`Machine`] / [`MachineBuilder`]: a set of states with exactly one
//!   initial state, unique ids, and no transition to an undefined state.
//!
//! A machine that violates one of these invariants is never constructed: the
//! builders return the matching [`MachineError`] instead.
//!
//! # Example
//!
//! ```
//! use sch_fsm::{Machine, State, StateIdRegistry};
//!
//! let ping = State::<Vec<String>>::builder()
//!     .id("ping")
//!     .initial()
//!     .transition(|ids| {
//!         let pong = ids.get("pong");
//!         move |log: &mut Vec<String>| {
//!             log.push("ping".to_string());
//!             pong.clone()
//!         }
//!     })?
//!     .build()?;
//! let pong = State::builder().id("pong").terminal()?.build()?;
//!
//! let machine = Machine::builder().state(ping)?.state(pong)?.build()?;
//!
//! let mut log = Vec::new();
//! machine.run(&mut log)?;
//! assert_eq!(log, vec!["ping"]);
//! # Ok::<(), sch_fsm::MachineError>(())
//! ```

mod checks;
mod error;
mod id;
mod machine;
mod state;

pub use error::{MachineError, Result};
pub use id::{InterningStateIdRegistry, ReferenceTrackingStateIdRegistry, StateId, StateIdRegistry};
pub use machine::{Machine, MachineBuilder};
pub use state::{State, StateBuilder, Transition};
