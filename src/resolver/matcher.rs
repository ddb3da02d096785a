// Argument matching and candidate pruning
//
// Signature tokens are plain text; parameter types live in the semantic
// model. A candidate survives an argument position when its parameter type,
// stripped of one const-reference layer and rendered without scope
// qualifiers, spells the same as the token modulo whitespace and an elided
// `unsigned`. This is intentionally not type compatibility: the consumer
// needs a plausible best match for cross-referencing, not compiler-grade
// overload resolution.

use crate::model::{RenderPolicy, SemanticModel, TypeId};
use crate::resolver::lookup::Candidates;

/// Reference-to-const becomes the referenced type, then any remaining
/// top-level const is dropped. A plain (mutable) reference is left alone.
pub(crate) fn strip_const_reference<M: SemanticModel>(model: &M, ty: TypeId) -> TypeId {
    let mut current = ty;
    if let Some(referee) = model.as_reference(current) {
        if model.peel_const(referee).is_some() {
            current = referee;
        }
    }
    if let Some(inner) = model.peel_const(current) {
        current = inner;
    }
    current
}

/// Drop every candidate that cannot accept the token at `arg_index`: too few
/// parameters, or a parameter spelling the token does not match.
pub(crate) fn prune_candidates<M: SemanticModel>(
    model: &M,
    candidates: &mut Candidates,
    arg_index: usize,
    token: &str,
    policy: RenderPolicy,
) {
    candidates.retain(|&mut candidate| {
        if model.param_count(candidate) < arg_index + 1 {
            return false;
        }
        let Some(param) = model.param_type(candidate, arg_index) else {
            return false;
        };
        let stripped = strip_const_reference(model, param);
        let rendered = model.render_type(stripped, policy);
        loose_type_eq(token, rendered.trim())
    });
}

/// Compare two type spellings, tolerating extra spaces on either side and an
/// `unsigned` present on only one side. The skip fires both at a word
/// boundary (`unsigned int` against `int`) and after a shared leading `u`
/// (`uint` against `unsigned int`). Anything else is a mismatch, including
/// either side ending early.
pub(crate) fn loose_type_eq(token: &str, rendered: &str) -> bool {
    let a = token.as_bytes();
    let b = rendered.as_bytes();
    let mut i = 0;
    let mut j = 0;

    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            i += 1;
            j += 1;
        } else if a[i] == b' ' {
            i += 1;
        } else if b[j] == b' ' {
            j += 1;
        } else if let Some(skip) = elided_unsigned(&a[i..]) {
            i += skip;
        } else if let Some(skip) = elided_unsigned(&b[j..]) {
            j += skip;
        } else {
            return false;
        }
    }

    i == a.len() && j == b.len()
}

fn elided_unsigned(rest: &[u8]) -> Option<usize> {
    if rest.starts_with(b"unsigned ") {
        Some(9)
    } else if rest.starts_with(b"nsigned ") {
        Some(8)
    } else {
        None
    }
}
