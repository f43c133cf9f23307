//! Directional cursors over an append-only aggregate.
//!
//! Two traversal surfaces are offered: the explicit `reset`/`has_next`/`current`
//! cursor protocol, and pull-style `iter()`/`iter_rev()` adapters that build a
//! fresh cursor per call, giving a lazy, finite, restartable sequence.

use tracing::instrument;

use crate::errors::{PatternError, PatternResult};

/// Ordered, append-only sequence with positional access.
#[derive(Debug, Default)]
pub struct Aggregate<T> {
    items: Vec<T>,
}

impl<T> Aggregate<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn add(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn cursor(&self, direction: Direction) -> Cursor<'_, T> {
        Cursor::new(&self.items, direction)
    }

    pub fn cursor_forward(&self) -> Cursor<'_, T> {
        self.cursor(Direction::Forward)
    }

    pub fn cursor_backward(&self) -> Cursor<'_, T> {
        self.cursor(Direction::Backward)
    }

    /// Front-to-back traversal with a fresh cursor each call.
    pub fn iter(&self) -> CursorIter<'_, T> {
        CursorIter {
            cursor: self.cursor_forward(),
        }
    }

    /// Back-to-front traversal with a fresh cursor each call.
    pub fn iter_rev(&self) -> CursorIter<'_, T> {
        CursorIter {
            cursor: self.cursor_backward(),
        }
    }
}

impl<T> FromIterator<T> for Aggregate<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Direction-tagged position marker over an aggregate.
///
/// The cursor starts one-before-first (forward) or one-past-last (backward).
/// `has_next` advances one step and reports whether a valid element is now
/// available; once exhausted it keeps returning `false`. `current` is only
/// valid after a `has_next` that returned `true` and fails with a bounds error
/// otherwise. Independent cursors over the same aggregate never interfere.
#[derive(Debug)]
pub struct Cursor<'a, T> {
    items: &'a [T],
    direction: Direction,
    pos: Option<usize>,
    exhausted: bool,
}

impl<'a, T> Cursor<'a, T> {
    fn new(items: &'a [T], direction: Direction) -> Self {
        Self {
            items,
            direction,
            pos: None,
            exhausted: false,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the cursor to its initial out-of-bounds position.
    pub fn reset(&mut self) {
        self.pos = None;
        self.exhausted = false;
    }

    /// Advances one step in the cursor's direction; true when a valid element
    /// is now available.
    #[instrument(level = "trace", skip(self))]
    pub fn has_next(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        let next = match self.direction {
            Direction::Forward => match self.pos {
                None => Some(0).filter(|_| !self.items.is_empty()),
                Some(p) => p.checked_add(1).filter(|&n| n < self.items.len()),
            },
            Direction::Backward => match self.pos {
                None => self.items.len().checked_sub(1),
                Some(p) => p.checked_sub(1),
            },
        };
        match next {
            Some(p) => {
                self.pos = Some(p);
                true
            }
            None => {
                self.exhausted = true;
                false
            }
        }
    }

    /// The element under the cursor.
    pub fn current(&self) -> PatternResult<&'a T> {
        if self.exhausted {
            return Err(self.out_of_bounds());
        }
        self.pos
            .and_then(|p| self.items.get(p))
            .ok_or_else(|| self.out_of_bounds())
    }

    fn out_of_bounds(&self) -> PatternError {
        PatternError::CursorOutOfBounds {
            position: self.pos,
            length: self.items.len(),
        }
    }
}

/// Pull-style adapter wrapping a cursor into `std::iter::Iterator`.
pub struct CursorIter<'a, T> {
    cursor: Cursor<'a, T>,
}

impl<'a, T> Iterator for CursorIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.has_next() {
            self.cursor.current().ok()
        } else {
            None
        }
    }
}
