//! Double dispatch over a closed element set.
//!
//! The element kinds form a closed set modeled as an enum, so `accept` is an
//! exhaustive match and the compiler forces every visitor to be updated when a
//! kind is added. Visitors are the open side: a new operation is just a new
//! `Visitor` impl and touches no element code.

use std::fmt;

use tracing::instrument;

use crate::errors::{PatternError, PatternResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementA;

impl ElementA {
    pub fn exclusive_method(&self) -> &'static str {
        "A"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementB;

impl ElementB {
    pub fn special_method(&self) -> &'static str {
        "B"
    }
}

/// The closed set of element kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    A(ElementA),
    B(ElementB),
}

impl Element {
    /// Dispatches to the visitor overload matching this element's kind.
    #[instrument(level = "trace", skip(visitor))]
    pub fn accept(&self, visitor: &dyn Visitor) -> String {
        match self {
            Element::A(element) => visitor.visit_a(element),
            Element::B(element) => visitor.visit_b(element),
        }
    }
}

/// One operation per concrete element kind.
///
/// Debug is a supertrait so boxed visitors stay printable and usable in
/// `Result` combinators.
pub trait Visitor: fmt::Debug {
    fn visit_a(&self, element: &ElementA) -> String;
    fn visit_b(&self, element: &ElementB) -> String;
}

#[derive(Debug, Default)]
pub struct VisitorX;

impl Visitor for VisitorX {
    fn visit_a(&self, element: &ElementA) -> String {
        format!("{} + VisitorX", element.exclusive_method())
    }

    fn visit_b(&self, element: &ElementB) -> String {
        format!("{} + VisitorX", element.special_method())
    }
}

#[derive(Debug, Default)]
pub struct VisitorY;

impl Visitor for VisitorY {
    fn visit_a(&self, element: &ElementA) -> String {
        format!("{} + VisitorY", element.exclusive_method())
    }

    fn visit_b(&self, element: &ElementB) -> String {
        format!("{} + VisitorY", element.special_method())
    }
}

/// Looks a visitor up by tag.
///
/// An unknown tag is a descriptive, non-fatal error for the caller to report.
#[instrument(level = "debug")]
pub fn visitor_for(tag: &str) -> PatternResult<Box<dyn Visitor>> {
    match tag.to_ascii_lowercase().as_str() {
        "x" => Ok(Box::new(VisitorX)),
        "y" => Ok(Box::new(VisitorY)),
        other => Err(PatternError::UnknownVisitor(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visitor_lookup_rejects_unknown_tag() {
        let err = visitor_for("z").unwrap_err();
        assert!(matches!(err, PatternError::UnknownVisitor(_)));
        assert!(err.to_string().contains('z'));
    }

    #[test]
    fn test_visitor_lookup_is_case_insensitive() {
        assert!(visitor_for("X").is_ok());
        assert!(visitor_for("y").is_ok());
    }

    #[test]
    fn test_boxed_visitors_are_debug_printable() {
        let visitor = visitor_for("x").unwrap();
        assert!(!format!("{:?}", visitor).is_empty());
    }
}
