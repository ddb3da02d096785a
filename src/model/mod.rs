// Semantic model abstraction
//
// The resolver never owns declarations. It reads an externally-built graph of
// classes, member functions, types, expressions, and string literals through
// the `SemanticModel` trait and forwards opaque handles to the cross-reference
// sink. Everything here is read-only for the duration of a pass.

use serde::{Deserialize, Serialize};

pub mod memory;

pub use memory::MemoryModel;

/// Handle to a class declaration in the semantic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassId(pub u32);

/// Handle to a member-function declaration in the semantic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodId(pub u32);

/// Handle to a type in the semantic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeId(pub u32);

/// Handle to an expression node in the program being indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExprId(pub u32);

/// Handle to a string-literal expression, possibly assembled from several
/// concatenated source tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiteralId(pub u32);

/// Handle to a source file known to the source-location database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileId(pub u32);

/// Handle to the declaration that encloses the call site currently being
/// visited. Owned by the outer tree walk; the resolver only forwards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextId(pub u32);

/// A position inside a source file, as a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: FileId,
    pub offset: u32,
}

impl SourceLocation {
    pub fn new(file: FileId, offset: u32) -> Self {
        Self { file, offset }
    }

    /// The location `delta` characters away, in either direction.
    pub fn with_offset(self, delta: i32) -> Self {
        Self {
            file: self.file,
            offset: self.offset.wrapping_add_signed(delta),
        }
    }
}

/// A half-open-ish source span; `end` addresses the last position covered,
/// mirroring how the source-location database hands ranges out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRange {
    pub begin: SourceLocation,
    pub end: SourceLocation,
}

impl SourceRange {
    pub fn new(begin: SourceLocation, end: SourceLocation) -> Self {
        Self { begin, end }
    }

    /// Range within a single file, from `begin` to `end` offsets.
    pub fn in_file(file: FileId, begin: u32, end: u32) -> Self {
        Self {
            begin: SourceLocation::new(file, begin),
            end: SourceLocation::new(file, end),
        }
    }
}

/// Controls how the model renders a type to text for comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderPolicy {
    /// Render `Foo` instead of `ns::Foo`. Signature strings never carry
    /// scope qualifiers, so the resolver always compares with this set.
    pub suppress_scope: bool,
}

impl RenderPolicy {
    /// The policy the resolver matches signature tokens under.
    pub fn unqualified() -> Self {
        Self {
            suppress_scope: true,
        }
    }
}

/// The pieces of a call or construct expression the dispatcher looks at.
#[derive(Debug, Clone)]
pub struct CallParts {
    /// Resolved callee declaration, when the callee is a member function
    /// (or the constructor, for construct expressions).
    pub callee: Option<MethodId>,
    /// Name of the callee, including free functions that have no
    /// member-function handle (the flag-location wrapper is one).
    pub callee_name: Option<String>,
    /// Implicit object argument of a member call, when there is one.
    pub receiver: Option<ExprId>,
    /// Explicit arguments in source order.
    pub args: Vec<ExprId>,
}

/// Read-only view of the semantic model and source-location database.
///
/// The resolver assumes nothing about how the declaration graph is stored;
/// it only asks for members of a class, the first base of a class, and type
/// rendering, plus the expression/literal/source-map queries below. Any
/// indexer front end that can answer these can host the resolver.
pub trait SemanticModel {
    // --- expressions ---

    /// Peel implicit conversions off an expression, returning the bare node.
    fn peel_implicit_casts(&self, expr: ExprId) -> ExprId;

    /// Declared type of an expression, when it has one.
    fn expr_type(&self, expr: ExprId) -> Option<TypeId>;

    /// The literal behind a string-literal expression.
    fn expr_string_literal(&self, expr: ExprId) -> Option<LiteralId>;

    /// Callee and arguments of a call expression.
    fn expr_call(&self, expr: ExprId) -> Option<CallParts>;

    /// Constructor and arguments of a construct expression.
    fn expr_construct(&self, expr: ExprId) -> Option<CallParts>;

    // --- types ---

    /// Class a pointer type points at, through const qualification.
    fn pointee_class(&self, ty: TypeId) -> Option<ClassId>;

    /// Class behind a non-pointer class type.
    fn underlying_class(&self, ty: TypeId) -> Option<ClassId>;

    /// Referee of a reference type.
    fn as_reference(&self, ty: TypeId) -> Option<TypeId>;

    /// Inner type of a const-qualified type.
    fn peel_const(&self, ty: TypeId) -> Option<TypeId>;

    /// Canonical text spelling of a type under the given policy.
    fn render_type(&self, ty: TypeId, policy: RenderPolicy) -> String;

    // --- classes ---

    /// Identifier name of a class; `None` when the declaration is unnamed.
    fn class_name(&self, class: ClassId) -> Option<&str>;

    /// Whether the class has a definition (forward declarations do not).
    fn has_definition(&self, class: ClassId) -> bool;

    /// Member functions declared directly on the class, in declaration order.
    fn methods(&self, class: ClassId) -> &[MethodId];

    /// The first declared base class, if any.
    fn first_base(&self, class: ClassId) -> Option<ClassId>;

    // --- member functions ---

    /// Identifier name of a member; `None` for constructors, operators, and
    /// other unnamed declarations.
    fn method_name(&self, method: MethodId) -> Option<&str>;

    /// Class the member is declared on.
    fn method_owner(&self, method: MethodId) -> Option<ClassId>;

    fn method_is_static(&self, method: MethodId) -> bool;

    /// Number of declared parameters.
    fn param_count(&self, method: MethodId) -> usize;

    /// Number of arguments a call must supply (parameters without defaults).
    fn min_required_args(&self, method: MethodId) -> usize;

    fn param_type(&self, method: MethodId, index: usize) -> Option<TypeId>;

    fn return_type(&self, method: MethodId) -> Option<TypeId>;

    // --- string literals ---

    /// Decoded bytes of the literal, excluding any terminator.
    fn literal_bytes(&self, literal: LiteralId) -> &[u8];

    /// Width of one character of the literal in bytes (1 for narrow strings).
    fn literal_char_width(&self, literal: LiteralId) -> u32;

    /// Number of source tokens concatenated into this literal.
    fn literal_concat_count(&self, literal: LiteralId) -> usize;

    /// Location of the `index`-th concatenated token.
    fn literal_token_location(&self, literal: LiteralId, index: usize) -> Option<SourceLocation>;

    /// Source range of the whole literal expression.
    fn literal_range(&self, literal: LiteralId) -> SourceRange;

    // --- source map ---

    /// One macro-expansion level up from `loc`; identity for locations that
    /// are not inside a macro expansion.
    fn immediate_expansion_range(&self, loc: SourceLocation) -> SourceRange;

    /// Length of the lexed token starting at `loc`.
    fn token_length_at(&self, loc: SourceLocation) -> u32;
}
