// qtxref - Qt Signal/Slot Cross-Reference Resolution Library
//!
//! qtxref resolves stringified signal/slot signatures (`"1clicked(int)"`) and
//! bare method names back to the member-function declarations they name,
//! against a read-only semantic model of a compiled program, and reports each
//! resolved use to a cross-reference sink.

pub mod indexer;
pub mod model;
pub mod paths;
pub mod resolver;

#[cfg(test)]
pub mod tests;

// Re-export common types
pub use indexer::{RecordingSink, ResolvedUse, UseFlavor, UseKind, UseSink};
pub use model::{
    ClassId, ContextId, ExprId, FileId, LiteralId, MemoryModel, MethodId, RenderPolicy,
    SemanticModel, SourceLocation, SourceRange, TypeId,
};
pub use resolver::QtResolver;
