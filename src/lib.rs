//! Traversal-family design pattern demos, rebuilt on explicit ownership.
//!
//! Three cooperating components:
//!
//! - [`arena`]: a composite tree held in a generational arena. Parent and
//!   child links are plain indices, the arena alone owns node storage, and a
//!   freed slot resolves to nothing instead of dangling.
//! - [`cursor`]: forward/backward cursors over an append-only aggregate, plus
//!   pull-style `Iterator` adapters.
//! - [`visitor`]: double dispatch with a closed element enum and an open
//!   visitor trait.
//!
//! [`demos`] wires fixed scenarios together; the binary prints their output.

pub mod arena;
pub mod cli;
pub mod cursor;
pub mod demos;
pub mod errors;
pub mod util;
pub mod visitor;

pub use arena::{NodeKind, TreeArena, TreeNode};
pub use cursor::{Aggregate, Cursor, Direction};
pub use errors::{PatternError, PatternResult};
pub use visitor::{Element, Visitor};
