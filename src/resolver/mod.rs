// Signal/slot string reference resolution
//
// Connects the string idiom back to declarations: a call like
// `connect(button, SIGNAL(clicked(int)), this, SLOT(update(int)))` names two
// member functions by stringified signature, and this module finds the
// declarations those strings mean, against the semantic model the outer tree
// walk is traversing. Every failure along the way is a silent no-op; most
// call sites in a translation unit are not framework calls, and skipping
// them is the common case, not an error.

use tracing::{debug, trace};

use crate::indexer::{UseFlavor, UseKind, UseSink};
use crate::model::{ClassId, ContextId, ExprId, LiteralId, RenderPolicy, SemanticModel};

pub mod lookup;
pub mod matcher;
pub mod shapes;
pub mod signature;

mod range;

pub use lookup::{Candidates, lookup_candidates};
pub use shapes::{CALL_SHAPES, CONSTRUCT_SHAPES, CallShape, ConstructShape};
pub use signature::{Signature, SignatureError};

use matcher::prune_candidates;
use range::attribution_range;
use shapes::{ObjectSource, ResolutionMode, TYPE_PREFIX};

/// Resolves signal/slot and method-name string references encountered during
/// one pass over a program, reporting each resolved use to the sink.
///
/// The resolver holds no per-call state between visits; `visit_call` and
/// `visit_construct` are handed every call/construct expression the outer
/// walk sees, and ignore everything that is not a recognized framework
/// shape.
pub struct QtResolver<'a, M, S> {
    model: &'a M,
    sink: &'a mut S,
    current_context: Option<ContextId>,
}

impl<'a, M: SemanticModel, S: UseSink> QtResolver<'a, M, S> {
    pub fn new(model: &'a M, sink: &'a mut S) -> Self {
        Self {
            model,
            sink,
            current_context: None,
        }
    }

    /// Declaration enclosing the expressions visited next; forwarded on
    /// every registered use.
    pub fn set_context(&mut self, context: Option<ContextId>) {
        self.current_context = context;
    }

    /// Dispatch a call expression against the call-shape catalog.
    pub fn visit_call(&mut self, expr: ExprId) {
        let Some(call) = self.model.expr_call(expr) else {
            return;
        };
        let Some(callee) = call.callee else {
            return;
        };
        let Some(owner) = self.model.method_owner(callee) else {
            return;
        };
        let Some(owner_name) = self.model.class_name(owner) else {
            return;
        };
        if !owner_name.starts_with(TYPE_PREFIX) {
            return;
        }
        let Some(member_name) = self.model.method_name(callee) else {
            return;
        };

        let Some(shape) = shapes::match_call_shape(
            owner_name,
            member_name,
            self.model.method_is_static(callee),
            call.args.len(),
            self.model.param_count(callee),
            call.receiver.is_some(),
        ) else {
            return;
        };
        trace!(
            "call shape {}::{} matched with {} args",
            shape.owner,
            shape.member,
            call.args.len()
        );

        for pair in shape.pairs {
            let object = match pair.object {
                ObjectSource::Arg(index) => call.args.get(index).copied(),
                ObjectSource::Receiver => call.receiver,
            };
            let string = call.args.get(pair.string).copied();
            match shape.mode {
                ResolutionMode::SignalSlot => self.handle_signal_or_slot(object, string),
                ResolutionMode::MethodName => self.handle_invoke_method(object, string),
            }
        }
    }

    /// Dispatch a construct expression against the constructor catalog.
    pub fn visit_construct(&mut self, expr: ExprId) {
        let Some(construct) = self.model.expr_construct(expr) else {
            return;
        };
        let Some(ctor) = construct.callee else {
            return;
        };
        let Some(owner) = self.model.method_owner(ctor) else {
            return;
        };
        let Some(owner_name) = self.model.class_name(owner) else {
            return;
        };
        if !owner_name.starts_with(TYPE_PREFIX) {
            return;
        }

        let Some(shape) = shapes::match_construct_shape(owner_name, construct.args.len()) else {
            return;
        };

        for pair in shape.pairs {
            let object = match pair.object {
                ObjectSource::Arg(index) => construct.args.get(index).copied(),
                ObjectSource::Receiver => None,
            };
            let string = construct.args.get(pair.string).copied();
            self.handle_signal_or_slot(object, string);
        }
    }

    /// Resolve one (object, signature-string) operand pair and register the
    /// use on success.
    ///
    /// `object` is the sender or receiver expression; `method` is the
    /// signature operand, either a direct string literal or the
    /// flag-location wrapper the debug-mode macros emit around one.
    pub fn handle_signal_or_slot(&mut self, object: Option<ExprId>, method: Option<ExprId>) {
        let (Some(object), Some(method)) = (object, method) else {
            return;
        };
        let object = self.model.peel_implicit_casts(object);
        let method = self.model.peel_implicit_casts(method);

        let Some(object_class) = self.object_class(object) else {
            return;
        };
        let Some(literal) = self.string_operand(method) else {
            return;
        };
        if self.model.literal_char_width(literal) != 1 {
            return;
        }
        let Ok(text) = std::str::from_utf8(self.model.literal_bytes(literal)) else {
            return;
        };

        let signature = match Signature::parse(text) {
            Ok(signature) => signature,
            Err(error) => {
                trace!("ignoring malformed signature {:?}: {}", text, error);
                return;
            }
        };

        let mut candidates = lookup_candidates(self.model, object_class, signature.method_name());

        let policy = RenderPolicy::unqualified();
        let mut scanner = signature.arguments();
        let mut observed = 0usize;

        while scanner.has_more_input() && !candidates.is_empty() {
            let token = match scanner.next_argument() {
                Ok(Some(token)) => token,
                Ok(None) => break,
                Err(error) => {
                    trace!("abandoning signature {:?}: {}", text, error);
                    return;
                }
            };

            if token.text.is_empty() && token.at_close && observed == 0 {
                break; // no arguments
            }

            prune_candidates(self.model, &mut candidates, observed, token.text, policy);
            observed += 1;

            if token.at_close {
                break;
            }
        }

        // Anything left after the closing parenthesis makes the whole
        // signature suspect; so does running out of candidates mid-list.
        if !scanner.fully_consumed() {
            return;
        }

        self.disambiguate(&mut candidates, observed, policy);
        let Some(&used) = candidates.first() else {
            debug!(
                "no declaration of {}::{} survived for {:?}",
                self.model.class_name(object_class).unwrap_or("?"),
                signature.method_name(),
                text
            );
            return;
        };

        let range = attribution_range(self.model, literal);
        self.sink.register_use(
            used,
            range,
            self.current_context,
            UseKind::Call,
            UseFlavor::Address,
        );
    }

    /// Resolve a bare method-name operand pair (the invoke-by-name API).
    ///
    /// The string holds just a method name, so only a unique name can
    /// resolve; overloaded names are skipped.
    // TODO: disambiguate overloads from the typed-argument wrappers at the
    // call site.
    pub fn handle_invoke_method(&mut self, object: Option<ExprId>, method: Option<ExprId>) {
        let (Some(object), Some(method)) = (object, method) else {
            return;
        };
        let object = self.model.peel_implicit_casts(object);
        let method = self.model.peel_implicit_casts(method);

        let Some(object_type) = self.model.expr_type(object) else {
            return;
        };
        let Some(object_class) = self.model.pointee_class(object_type) else {
            return;
        };

        let Some(literal) = self.model.expr_string_literal(method) else {
            return;
        };
        if self.model.literal_char_width(literal) != 1 {
            return;
        }
        let Ok(name) = std::str::from_utf8(self.model.literal_bytes(literal)) else {
            return;
        };
        if name.is_empty() {
            return;
        }

        let candidates = lookup_candidates(self.model, object_class, name);
        if candidates.len() != 1 {
            return;
        }

        let range = self.model.literal_range(literal);
        self.sink.register_use(
            candidates[0],
            range,
            self.current_context,
            UseKind::Call,
            UseFlavor::Address,
        );
    }

    /// Class behind the object expression: through one pointer level, or the
    /// expression's own class for value calls (`foo.connect(...)`).
    fn object_class(&self, object: ExprId) -> Option<ClassId> {
        let object_type = self.model.expr_type(object)?;
        self.model
            .pointee_class(object_type)
            .or_else(|| self.model.underlying_class(object_type))
    }

    /// A direct string literal, or one wrapped in the single-argument
    /// flag-location call the debug-mode macros produce.
    fn string_operand(&self, method: ExprId) -> Option<LiteralId> {
        if let Some(literal) = self.model.expr_string_literal(method) {
            return Some(literal);
        }

        let call = self.model.expr_call(method)?;
        if call.args.len() != 1 || call.callee_name.as_deref() != Some("qFlagLocation") {
            return None;
        }
        let inner = self.model.peel_implicit_casts(call.args[0]);
        self.model.expr_string_literal(inner)
    }

    /// Drop candidates that still need more arguments than the signature
    /// supplied, unless the single extra parameter is the private-signal
    /// sentinel the framework appends to signal emissions.
    fn disambiguate(&self, candidates: &mut Candidates, observed: usize, policy: RenderPolicy) {
        candidates.retain(|&mut candidate| {
            if self.model.min_required_args(candidate) <= observed {
                return true;
            }
            self.model.param_count(candidate) == observed + 1
                && self
                    .model
                    .param_type(candidate, observed)
                    .map(|ty| self.model.render_type(ty, policy) == shapes::PRIVATE_SIGNAL_SENTINEL)
                    .unwrap_or(false)
        });
    }
}
