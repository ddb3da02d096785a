// In-memory semantic model
//
// Arena-backed implementation of `SemanticModel`. Front ends that materialize
// their own declaration graph populate one of these with the builder methods;
// the test fixtures are built the same way. Ids index straight into the
// arenas, so handles stay valid for the life of the model.

use std::collections::HashMap;

use crate::model::{
    CallParts, ClassId, ExprId, FileId, LiteralId, MethodId, RenderPolicy, SemanticModel,
    SourceLocation, SourceRange, TypeId,
};

#[derive(Debug)]
struct ClassData {
    name: String,
    defined: bool,
    first_base: Option<ClassId>,
    methods: Vec<MethodId>,
}

#[derive(Debug)]
struct MethodData {
    name: Option<String>,
    owner: ClassId,
    params: Vec<TypeId>,
    min_required_args: usize,
    is_static: bool,
    return_type: Option<TypeId>,
}

#[derive(Debug)]
enum TypeData {
    /// A named (possibly class) type, e.g. `int` or `QString`.
    Named {
        name: String,
        class: Option<ClassId>,
    },
    Pointer(TypeId),
    Reference(TypeId),
    Const(TypeId),
}

#[derive(Debug)]
enum ExprData {
    /// Any expression the resolver only needs the type of.
    Typed { ty: TypeId },
    Literal { literal: LiteralId },
    Call {
        callee: Option<MethodId>,
        callee_name: Option<String>,
        receiver: Option<ExprId>,
        args: Vec<ExprId>,
    },
    Construct {
        ctor: MethodId,
        args: Vec<ExprId>,
    },
    ImplicitCast { inner: ExprId },
}

#[derive(Debug)]
struct LiteralData {
    bytes: Vec<u8>,
    char_width: u32,
    token_locations: Vec<SourceLocation>,
    range: SourceRange,
}

/// Options for declaring a member function.
#[derive(Debug, Clone, Default)]
pub struct MethodOptions {
    /// Defaults to the full parameter count (no defaulted parameters).
    pub min_required_args: Option<usize>,
    pub is_static: bool,
    pub return_type: Option<TypeId>,
}

/// Concrete, mutable-while-building semantic model.
///
/// Once handed to a resolver pass it is only read through the
/// [`SemanticModel`] trait.
#[derive(Debug, Default)]
pub struct MemoryModel {
    files: Vec<String>,
    classes: Vec<ClassData>,
    methods: Vec<MethodData>,
    types: Vec<TypeData>,
    exprs: Vec<ExprData>,
    literals: Vec<LiteralData>,
    expansions: HashMap<SourceLocation, SourceRange>,
    token_lengths: HashMap<SourceLocation, u32>,
}

impl MemoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    // --- builder: files and classes ---

    pub fn add_file(&mut self, name: &str) -> FileId {
        self.files.push(name.to_string());
        FileId(self.files.len() as u32 - 1)
    }

    /// Declare a class with a definition.
    pub fn add_class(&mut self, name: &str) -> ClassId {
        self.push_class(name, true)
    }

    /// Declare a class without a definition (forward declaration).
    pub fn add_forward_class(&mut self, name: &str) -> ClassId {
        self.push_class(name, false)
    }

    fn push_class(&mut self, name: &str, defined: bool) -> ClassId {
        self.classes.push(ClassData {
            name: name.to_string(),
            defined,
            first_base: None,
            methods: Vec::new(),
        });
        ClassId(self.classes.len() as u32 - 1)
    }

    pub fn set_first_base(&mut self, class: ClassId, base: ClassId) {
        self.classes[class.0 as usize].first_base = Some(base);
    }

    // --- builder: members ---

    pub fn add_method(
        &mut self,
        class: ClassId,
        name: &str,
        params: &[TypeId],
        options: MethodOptions,
    ) -> MethodId {
        self.push_method(class, Some(name.to_string()), params, options)
    }

    /// Declare an unnamed member (constructor, operator, conversion).
    pub fn add_constructor(&mut self, class: ClassId, params: &[TypeId]) -> MethodId {
        self.push_method(class, None, params, MethodOptions::default())
    }

    fn push_method(
        &mut self,
        class: ClassId,
        name: Option<String>,
        params: &[TypeId],
        options: MethodOptions,
    ) -> MethodId {
        let id = MethodId(self.methods.len() as u32);
        self.methods.push(MethodData {
            name,
            owner: class,
            params: params.to_vec(),
            min_required_args: options.min_required_args.unwrap_or(params.len()),
            is_static: options.is_static,
            return_type: options.return_type,
        });
        self.classes[class.0 as usize].methods.push(id);
        id
    }

    // --- builder: types ---

    /// A plain named type with no class behind it (`int`, `QString`, ...).
    pub fn named_type(&mut self, name: &str) -> TypeId {
        self.push_type(TypeData::Named {
            name: name.to_string(),
            class: None,
        })
    }

    /// The type of a class declared in this model; renders as the class name.
    pub fn class_type(&mut self, class: ClassId) -> TypeId {
        let name = self.classes[class.0 as usize].name.clone();
        self.push_type(TypeData::Named {
            name,
            class: Some(class),
        })
    }

    pub fn pointer_to(&mut self, ty: TypeId) -> TypeId {
        self.push_type(TypeData::Pointer(ty))
    }

    pub fn reference_to(&mut self, ty: TypeId) -> TypeId {
        self.push_type(TypeData::Reference(ty))
    }

    pub fn const_of(&mut self, ty: TypeId) -> TypeId {
        self.push_type(TypeData::Const(ty))
    }

    fn push_type(&mut self, data: TypeData) -> TypeId {
        self.types.push(data);
        TypeId(self.types.len() as u32 - 1)
    }

    // --- builder: expressions and literals ---

    /// An expression of the given type; the resolver looks no deeper.
    pub fn object_expr(&mut self, ty: TypeId) -> ExprId {
        self.push_expr(ExprData::Typed { ty })
    }

    /// A narrow string literal made of a single source token.
    pub fn add_literal(&mut self, text: &str, range: SourceRange) -> LiteralId {
        self.push_literal(text.as_bytes().to_vec(), 1, vec![range.begin], range)
    }

    /// A narrow literal concatenated from several source tokens.
    pub fn add_concatenated_literal(
        &mut self,
        text: &str,
        token_locations: Vec<SourceLocation>,
        range: SourceRange,
    ) -> LiteralId {
        self.push_literal(text.as_bytes().to_vec(), 1, token_locations, range)
    }

    /// A literal with an explicit character width (wide/UTF-16/UTF-32).
    pub fn add_wide_literal(&mut self, bytes: Vec<u8>, char_width: u32, range: SourceRange) -> LiteralId {
        self.push_literal(bytes, char_width, vec![range.begin], range)
    }

    fn push_literal(
        &mut self,
        bytes: Vec<u8>,
        char_width: u32,
        token_locations: Vec<SourceLocation>,
        range: SourceRange,
    ) -> LiteralId {
        self.literals.push(LiteralData {
            bytes,
            char_width,
            token_locations,
            range,
        });
        LiteralId(self.literals.len() as u32 - 1)
    }

    pub fn literal_expr(&mut self, literal: LiteralId) -> ExprId {
        self.push_expr(ExprData::Literal { literal })
    }

    /// Convenience: a single-token narrow string literal expression.
    pub fn string_expr(&mut self, text: &str, range: SourceRange) -> ExprId {
        let literal = self.add_literal(text, range);
        self.literal_expr(literal)
    }

    /// A call whose callee resolved to a member function.
    pub fn call_expr(&mut self, callee: MethodId, args: Vec<ExprId>) -> ExprId {
        let callee_name = self.methods[callee.0 as usize].name.clone();
        self.push_expr(ExprData::Call {
            callee: Some(callee),
            callee_name,
            receiver: None,
            args,
        })
    }

    /// A member call through an object expression.
    pub fn member_call_expr(
        &mut self,
        callee: MethodId,
        receiver: ExprId,
        args: Vec<ExprId>,
    ) -> ExprId {
        let callee_name = self.methods[callee.0 as usize].name.clone();
        self.push_expr(ExprData::Call {
            callee: Some(callee),
            callee_name,
            receiver: Some(receiver),
            args,
        })
    }

    /// A call to a free function known only by name.
    pub fn free_call_expr(&mut self, callee_name: &str, args: Vec<ExprId>) -> ExprId {
        self.push_expr(ExprData::Call {
            callee: None,
            callee_name: Some(callee_name.to_string()),
            receiver: None,
            args,
        })
    }

    pub fn construct_expr(&mut self, ctor: MethodId, args: Vec<ExprId>) -> ExprId {
        self.push_expr(ExprData::Construct { ctor, args })
    }

    pub fn implicit_cast(&mut self, inner: ExprId) -> ExprId {
        self.push_expr(ExprData::ImplicitCast { inner })
    }

    fn push_expr(&mut self, data: ExprData) -> ExprId {
        self.exprs.push(data);
        ExprId(self.exprs.len() as u32 - 1)
    }

    // --- builder: source map ---

    /// Record that `loc` expands (one macro level up) to `range`.
    pub fn record_expansion(&mut self, loc: SourceLocation, range: SourceRange) {
        self.expansions.insert(loc, range);
    }

    /// Record the length of the lexed token starting at `loc`.
    pub fn record_token_length(&mut self, loc: SourceLocation, length: u32) {
        self.token_lengths.insert(loc, length);
    }

    pub fn file_name(&self, file: FileId) -> &str {
        &self.files[file.0 as usize]
    }

    fn render(&self, ty: TypeId, policy: RenderPolicy) -> String {
        match &self.types[ty.0 as usize] {
            TypeData::Named { name, .. } => {
                if policy.suppress_scope {
                    unqualified(name).to_string()
                } else {
                    name.clone()
                }
            }
            TypeData::Pointer(inner) => format!("{} *", self.render(*inner, policy)),
            TypeData::Reference(inner) => format!("{} &", self.render(*inner, policy)),
            TypeData::Const(inner) => format!("const {}", self.render(*inner, policy)),
        }
    }
}

/// Strip leading scope qualifiers from a type name, leaving template
/// arguments alone (`ns::Foo` becomes `Foo`, `QMap<a::B,int>` is untouched
/// beyond its own prefix).
fn unqualified(name: &str) -> &str {
    match name.find('<') {
        Some(angle) => match name[..angle].rfind("::") {
            Some(sep) => &name[sep + 2..],
            None => name,
        },
        None => match name.rfind("::") {
            Some(sep) => &name[sep + 2..],
            None => name,
        },
    }
}

impl SemanticModel for MemoryModel {
    fn peel_implicit_casts(&self, expr: ExprId) -> ExprId {
        let mut current = expr;
        while let ExprData::ImplicitCast { inner } = &self.exprs[current.0 as usize] {
            current = *inner;
        }
        current
    }

    fn expr_type(&self, expr: ExprId) -> Option<TypeId> {
        match &self.exprs[expr.0 as usize] {
            ExprData::Typed { ty } => Some(*ty),
            _ => None,
        }
    }

    fn expr_string_literal(&self, expr: ExprId) -> Option<LiteralId> {
        match &self.exprs[expr.0 as usize] {
            ExprData::Literal { literal } => Some(*literal),
            _ => None,
        }
    }

    fn expr_call(&self, expr: ExprId) -> Option<CallParts> {
        match &self.exprs[expr.0 as usize] {
            ExprData::Call {
                callee,
                callee_name,
                receiver,
                args,
            } => Some(CallParts {
                callee: *callee,
                callee_name: callee_name.clone(),
                receiver: *receiver,
                args: args.clone(),
            }),
            _ => None,
        }
    }

    fn expr_construct(&self, expr: ExprId) -> Option<CallParts> {
        match &self.exprs[expr.0 as usize] {
            ExprData::Construct { ctor, args } => Some(CallParts {
                callee: Some(*ctor),
                callee_name: None,
                receiver: None,
                args: args.clone(),
            }),
            _ => None,
        }
    }

    fn pointee_class(&self, ty: TypeId) -> Option<ClassId> {
        match &self.types[ty.0 as usize] {
            TypeData::Pointer(inner) => {
                let mut pointee = *inner;
                while let TypeData::Const(inner) = &self.types[pointee.0 as usize] {
                    pointee = *inner;
                }
                match &self.types[pointee.0 as usize] {
                    TypeData::Named { class, .. } => *class,
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn underlying_class(&self, ty: TypeId) -> Option<ClassId> {
        let mut current = ty;
        while let TypeData::Const(inner) = &self.types[current.0 as usize] {
            current = *inner;
        }
        match &self.types[current.0 as usize] {
            TypeData::Named { class, .. } => *class,
            _ => None,
        }
    }

    fn as_reference(&self, ty: TypeId) -> Option<TypeId> {
        match &self.types[ty.0 as usize] {
            TypeData::Reference(inner) => Some(*inner),
            _ => None,
        }
    }

    fn peel_const(&self, ty: TypeId) -> Option<TypeId> {
        match &self.types[ty.0 as usize] {
            TypeData::Const(inner) => Some(*inner),
            _ => None,
        }
    }

    fn render_type(&self, ty: TypeId, policy: RenderPolicy) -> String {
        self.render(ty, policy)
    }

    fn class_name(&self, class: ClassId) -> Option<&str> {
        Some(&self.classes[class.0 as usize].name)
    }

    fn has_definition(&self, class: ClassId) -> bool {
        self.classes[class.0 as usize].defined
    }

    fn methods(&self, class: ClassId) -> &[MethodId] {
        &self.classes[class.0 as usize].methods
    }

    fn first_base(&self, class: ClassId) -> Option<ClassId> {
        self.classes[class.0 as usize].first_base
    }

    fn method_name(&self, method: MethodId) -> Option<&str> {
        self.methods[method.0 as usize].name.as_deref()
    }

    fn method_owner(&self, method: MethodId) -> Option<ClassId> {
        Some(self.methods[method.0 as usize].owner)
    }

    fn method_is_static(&self, method: MethodId) -> bool {
        self.methods[method.0 as usize].is_static
    }

    fn param_count(&self, method: MethodId) -> usize {
        self.methods[method.0 as usize].params.len()
    }

    fn min_required_args(&self, method: MethodId) -> usize {
        self.methods[method.0 as usize].min_required_args
    }

    fn param_type(&self, method: MethodId, index: usize) -> Option<TypeId> {
        self.methods[method.0 as usize].params.get(index).copied()
    }

    fn return_type(&self, method: MethodId) -> Option<TypeId> {
        self.methods[method.0 as usize].return_type
    }

    fn literal_bytes(&self, literal: LiteralId) -> &[u8] {
        &self.literals[literal.0 as usize].bytes
    }

    fn literal_char_width(&self, literal: LiteralId) -> u32 {
        self.literals[literal.0 as usize].char_width
    }

    fn literal_concat_count(&self, literal: LiteralId) -> usize {
        self.literals[literal.0 as usize].token_locations.len()
    }

    fn literal_token_location(&self, literal: LiteralId, index: usize) -> Option<SourceLocation> {
        self.literals[literal.0 as usize]
            .token_locations
            .get(index)
            .copied()
    }

    fn literal_range(&self, literal: LiteralId) -> SourceRange {
        self.literals[literal.0 as usize].range
    }

    fn immediate_expansion_range(&self, loc: SourceLocation) -> SourceRange {
        self.expansions
            .get(&loc)
            .copied()
            .unwrap_or(SourceRange::new(loc, loc))
    }

    fn token_length_at(&self, loc: SourceLocation) -> u32 {
        self.token_lengths.get(&loc).copied().unwrap_or(0)
    }
}
