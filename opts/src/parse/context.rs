use std::sync::Arc;

use crate::spec::ProgramSpec;

use super::result::{ParserError, ParserErrorKind, ParserResultBuilder};

/// Mutable state threaded through one run of the parser machine.
#[derive(Debug)]
pub(crate) struct ParseContext {
    pub(crate) program: Arc<ProgramSpec>,
    tokens: Vec<String>,
    index: usize,
    /// Next positional argument to fill.
    pub(crate) arg_cursor: usize,
    /// Explanation for the error state about to be entered.
    detail: Option<String>,
    pub(crate) result: ParserResultBuilder,
}

impl ParseContext {
    pub(crate) fn new(program: Arc<ProgramSpec>, tokens: Vec<String>) -> Self {
        Self {
            program,
            tokens,
            index: 0,
            arg_cursor: 0,
            detail: None,
            result: ParserResultBuilder::default(),
        }
    }

    pub(crate) fn at_end(&self) -> bool {
        self.index >= self.tokens.len()
    }

    /// Current token, owned so the caller may mutate the context while
    /// holding it.
    pub(crate) fn token(&self) -> Option<String> {
        self.tokens.get(self.index).cloned()
    }

    /// Token `offset` positions after the current one.
    pub(crate) fn peek(&self, offset: usize) -> Option<&str> {
        self.tokens.get(self.index + offset).map(String::as_str)
    }

    pub(crate) fn advance(&mut self, count: usize) {
        self.index += count;
    }

    /// Stashes a detail for the error state that records it.
    pub(crate) fn explain(&mut self, detail: impl Into<String>) {
        self.detail = Some(detail.into());
    }

    /// Records `kind` with the stashed detail.
    pub(crate) fn fail(&mut self, kind: ParserErrorKind) {
        let error = match self.detail.take() {
            Some(detail) => ParserError::with_detail(kind, detail),
            None => ParserError::new(kind),
        };
        self.result.fail(error);
    }

    pub(crate) fn into_parts(self) -> (Arc<ProgramSpec>, ParserResultBuilder) {
        (self.program, self.result)
    }
}
