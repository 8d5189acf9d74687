//! States of the parser machine.
//!
//! Tokens are consumed left to right. The name states walk the group tree
//! until a command is reached; the flag and argument states then alternate
//! until the input runs out. Each error state records its error and moves
//! to `done`, so a run always ends in the terminal state.

use std::sync::Arc;

use sch_fsm::{Machine, MachineError, State, StateIdRegistry};
use tracing::trace;

use crate::value::{Primitive, PrimitiveKind};

use super::context::ParseContext;
use super::result::ParserErrorKind;

pub(crate) const INITIAL: &str = "initial";
pub(crate) const PARSE_COMMAND_OR_GROUP_NAME: &str = "parse-command-or-group-name";
pub(crate) const PARSE_GROUP_NAME: &str = "parse-group-name";
pub(crate) const PARSE_COMMAND_NAME: &str = "parse-command-name";
pub(crate) const PARSE_FLAG_OR_ARG: &str = "parse-flag-or-arg";
pub(crate) const PARSE_FLAG: &str = "parse-flag";
pub(crate) const PARSE_ARG: &str = "parse-arg";
pub(crate) const INVALID_ARG: &str = "invalid-arg";
pub(crate) const INVALID_FLAG: &str = "invalid-flag";
pub(crate) const INVALID_FLAG_VALUE: &str = "invalid-flag-value";
pub(crate) const INVALID_NAME: &str = "invalid-name";
pub(crate) const MULTIPLE_VALUES_NOT_ALLOWED: &str = "multiple-values-not-allowed";
pub(crate) const NO_VALUE_FOUND_FOR_FLAG: &str = "no-value-found-for-flag";
pub(crate) const DONE: &str = "done";

type ParseState = sch_fsm::Result<State<ParseContext>>;

/// Assembles the parser machine. The set of states is fixed, so a failure
/// here means the states above disagree with each other.
pub(crate) fn machine() -> Result<Machine<ParseContext>, MachineError> {
    Machine::builder()
        .state(initial()?)?
        .state(parse_command_or_group_name()?)?
        .state(parse_group_name()?)?
        .state(parse_command_name()?)?
        .state(parse_flag_or_arg()?)?
        .state(parse_flag()?)?
        .state(parse_arg()?)?
        .state(error_state(INVALID_ARG, ParserErrorKind::InvalidArg)?)?
        .state(error_state(INVALID_FLAG, ParserErrorKind::InvalidFlag)?)?
        .state(error_state(INVALID_FLAG_VALUE, ParserErrorKind::InvalidFlagValue)?)?
        .state(error_state(INVALID_NAME, ParserErrorKind::InvalidName)?)?
        .state(error_state(
            MULTIPLE_VALUES_NOT_ALLOWED,
            ParserErrorKind::MultipleValuesNotAllowed,
        )?)?
        .state(error_state(NO_VALUE_FOUND_FOR_FLAG, ParserErrorKind::NoValueFoundForFlag)?)?
        .state(State::builder().id(DONE).terminal()?.build()?)?
        .build()
}

fn initial() -> ParseState {
    State::builder()
        .id(INITIAL)
        .initial()
        .transition(|ids| {
            let next = ids.get(PARSE_COMMAND_OR_GROUP_NAME);
            let done = ids.get(DONE);
            move |ctx: &mut ParseContext| {
                if ctx.at_end() {
                    done.clone()
                } else {
                    next.clone()
                }
            }
        })?
        .build()
}

fn parse_command_or_group_name() -> ParseState {
    State::builder()
        .id(PARSE_COMMAND_OR_GROUP_NAME)
        .transition(|ids| {
            let command = ids.get(PARSE_COMMAND_NAME);
            let group = ids.get(PARSE_GROUP_NAME);
            let invalid = ids.get(INVALID_NAME);
            let done = ids.get(DONE);
            move |ctx: &mut ParseContext| {
                let Some(token) = ctx.token() else {
                    return done.clone();
                };
                let program = Arc::clone(&ctx.program);
                let current = program.find_group_spec(ctx.result.names());

                match current {
                    Some(g) if g.command(&token).is_some() => command.clone(),
                    Some(g) if g.group(&token).is_some() => group.clone(),
                    _ => {
                        ctx.explain(format!("unknown command or group '{token}'"));
                        invalid.clone()
                    }
                }
            }
        })?
        .build()
}

fn parse_group_name() -> ParseState {
    State::builder()
        .id(PARSE_GROUP_NAME)
        .transition(|ids| {
            let next = ids.get(PARSE_COMMAND_OR_GROUP_NAME);
            let done = ids.get(DONE);
            move |ctx: &mut ParseContext| {
                if let Some(token) = ctx.token() {
                    trace!(group = %token, "entered group");
                    ctx.result.push_name(&token);
                    ctx.advance(1);
                }
                if ctx.at_end() { done.clone() } else { next.clone() }
            }
        })?
        .build()
}

fn parse_command_name() -> ParseState {
    State::builder()
        .id(PARSE_COMMAND_NAME)
        .transition(|ids| {
            let next = ids.get(PARSE_FLAG_OR_ARG);
            let done = ids.get(DONE);
            move |ctx: &mut ParseContext| {
                if let Some(token) = ctx.token() {
                    trace!(command = %token, "resolved command");
                    ctx.result.push_name(&token);
                    ctx.advance(1);
                }
                if ctx.at_end() { done.clone() } else { next.clone() }
            }
        })?
        .build()
}

fn parse_flag_or_arg() -> ParseState {
    State::builder()
        .id(PARSE_FLAG_OR_ARG)
        .transition(|ids| {
            let flag = ids.get(PARSE_FLAG);
            let arg = ids.get(PARSE_ARG);
            let done = ids.get(DONE);
            move |ctx: &mut ParseContext| match ctx.peek(0) {
                Some(token) if token.starts_with('-') => flag.clone(),
                Some(_) => arg.clone(),
                None => done.clone(),
            }
        })?
        .build()
}

fn parse_flag() -> ParseState {
    State::builder()
        .id(PARSE_FLAG)
        .transition(|ids| {
            let next = ids.get(PARSE_FLAG_OR_ARG);
            let invalid_flag = ids.get(INVALID_FLAG);
            let invalid_value = ids.get(INVALID_FLAG_VALUE);
            let repeated = ids.get(MULTIPLE_VALUES_NOT_ALLOWED);
            let no_value = ids.get(NO_VALUE_FOUND_FOR_FLAG);
            let done = ids.get(DONE);
            move |ctx: &mut ParseContext| {
                let Some(token) = ctx.token() else {
                    return done.clone();
                };
                let program = Arc::clone(&ctx.program);
                let Some(spec) = program
                    .find_command_spec(ctx.result.names())
                    .and_then(|command| command.find_flag(&token))
                else {
                    ctx.explain(format!("unknown flag '{token}'"));
                    return invalid_flag.clone();
                };

                if !spec.multiple() && ctx.result.has_flag(spec.name()) {
                    ctx.explain(format!("flag '{}' may only be given once", spec.name()));
                    return repeated.clone();
                }

                let raw = ctx.peek(1).filter(|raw| !raw.starts_with('-')).map(str::to_owned);
                let (value, consumed) = match raw {
                    Some(raw) => match spec.kind().refine(&raw) {
                        Ok(value) => (value, 2),
                        Err(err) => {
                            ctx.explain(format!("flag '{}': {err}", spec.name()));
                            return invalid_value.clone();
                        }
                    },
                    None if spec.kind() == PrimitiveKind::Boolean => (Primitive::Boolean(true), 1),
                    None => {
                        ctx.explain(format!("flag '{}' expects a {} value", spec.name(), spec.kind()));
                        return no_value.clone();
                    }
                };

                trace!(flag = spec.name(), value = %value, "recorded flag");
                ctx.result.record_flag(spec.name(), value, spec.multiple());
                ctx.advance(consumed);
                if ctx.at_end() { done.clone() } else { next.clone() }
            }
        })?
        .build()
}

fn parse_arg() -> ParseState {
    State::builder()
        .id(PARSE_ARG)
        .transition(|ids| {
            let next = ids.get(PARSE_FLAG_OR_ARG);
            let invalid = ids.get(INVALID_ARG);
            let done = ids.get(DONE);
            move |ctx: &mut ParseContext| {
                let Some(token) = ctx.token() else {
                    return done.clone();
                };
                let program = Arc::clone(&ctx.program);
                let cursor = ctx.arg_cursor;
                let Some(spec) = program
                    .find_command_spec(ctx.result.names())
                    .and_then(|command| command.args().get(cursor))
                else {
                    ctx.explain(format!("unexpected argument '{token}'"));
                    return invalid.clone();
                };

                let value = match spec.kind().refine(&token) {
                    Ok(value) => value,
                    Err(err) => {
                        ctx.explain(format!("argument '{}': {err}", spec.name()));
                        return invalid.clone();
                    }
                };

                trace!(arg = spec.name(), value = %value, "recorded argument");
                ctx.result.record_arg(spec.name(), value, spec.multiple());
                if !spec.multiple() {
                    ctx.arg_cursor += 1;
                }
                ctx.advance(1);
                if ctx.at_end() { done.clone() } else { next.clone() }
            }
        })?
        .build()
}

fn error_state(id: &'static str, kind: ParserErrorKind) -> ParseState {
    State::builder()
        .id(id)
        .transition(|ids| {
            let done = ids.get(DONE);
            move |ctx: &mut ParseContext| {
                ctx.fail(kind);
                done.clone()
            }
        })?
        .build()
}
