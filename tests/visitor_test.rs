//! Tests for element/visitor double dispatch

use std::cell::RefCell;

use rspatterns::errors::PatternError;
use rspatterns::visitor::{
    visitor_for, Element, ElementA, ElementB, Visitor, VisitorX, VisitorY,
};

// ============================================================
// Dispatch-By-Construction Tests
// ============================================================

/// Records which overload each accept call actually hit.
#[derive(Debug, Default)]
struct RecordingVisitor {
    calls: RefCell<Vec<&'static str>>,
}

impl Visitor for RecordingVisitor {
    fn visit_a(&self, _element: &ElementA) -> String {
        self.calls.borrow_mut().push("visit_a");
        String::new()
    }

    fn visit_b(&self, _element: &ElementB) -> String {
        self.calls.borrow_mut().push("visit_b");
        String::new()
    }
}

#[test]
fn given_element_sequence_when_accepting_then_each_kind_hits_its_overload() {
    let elements = [Element::A(ElementA), Element::B(ElementB)];
    let recorder = RecordingVisitor::default();

    for element in &elements {
        element.accept(&recorder);
    }

    assert_eq!(*recorder.calls.borrow(), vec!["visit_a", "visit_b"]);
}

// New visitor operation: no element code was touched to define
// RecordingVisitor above, which is the open half of the trade-off.

// ============================================================
// Output Format Tests
// ============================================================

#[test]
fn given_visitor_x_when_accepting_both_elements_then_lines_match() {
    assert_eq!(Element::A(ElementA).accept(&VisitorX), "A + VisitorX");
    assert_eq!(Element::B(ElementB).accept(&VisitorX), "B + VisitorX");
}

#[test]
fn given_visitor_y_when_accepting_both_elements_then_lines_match() {
    assert_eq!(Element::A(ElementA).accept(&VisitorY), "A + VisitorY");
    assert_eq!(Element::B(ElementB).accept(&VisitorY), "B + VisitorY");
}

// ============================================================
// Factory Lookup Tests
// ============================================================

#[rstest::rstest]
#[case("x", "A + VisitorX")]
#[case("X", "A + VisitorX")]
#[case("y", "A + VisitorY")]
fn given_valid_tag_when_looking_up_then_dispatch_works(
    #[case] tag: &str,
    #[case] expected: &str,
) {
    let visitor = visitor_for(tag).unwrap();
    assert_eq!(Element::A(ElementA).accept(visitor.as_ref()), expected);
}

#[test]
fn given_unknown_tag_when_looking_up_then_descriptive_error() {
    let err = visitor_for("bogus").unwrap_err();

    assert!(matches!(err, PatternError::UnknownVisitor(_)));
    assert!(err.to_string().contains("bogus"));
}
