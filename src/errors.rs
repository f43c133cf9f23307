//! Library-level errors
//!
//! Dangling child indices encountered during rendering are treated as absent,
//! not as errors; everything that is a genuine contract violation ends up here.

use generational_arena::Index;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("node not found in arena: {0:?}")]
    NodeNotFound(Index),

    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    CycleDetected { parent: Index, child: Index },

    #[error("cursor position {position:?} is outside the collection (length {length})")]
    CursorOutOfBounds {
        position: Option<usize>,
        length: usize,
    },

    #[error("unknown visitor tag: '{0}' (expected 'x' or 'y')")]
    UnknownVisitor(String),
}

pub type PatternResult<T> = Result<T, PatternError>;
