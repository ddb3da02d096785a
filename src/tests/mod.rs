// qtxref test infrastructure
//
// Integration-style tests that exercise the resolver end to end over
// in-memory semantic models. Unit tests for the individual stages live next
// to their modules; everything here goes through the public surface.

pub mod helpers; // Shared fixture: a small Qt-ish class graph

pub mod dispatch_tests; // Call-shape dispatch through visit_call/visit_construct
