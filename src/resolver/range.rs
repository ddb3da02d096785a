// Attribution-range computation
//
// A signal/slot literal usually comes out of the wrapping macro, so the
// literal's own range points into the invisible expansion. For concatenated
// literals the range is rebuilt from the second token: one expansion level up
// peels the stringification, one more peels the macro call, and trimming the
// macro name, its `(`, and the trailing `)` leaves exactly the signature text
// the user wrote.

use crate::model::{LiteralId, SemanticModel, SourceRange};

/// Range a resolved use of `literal` should be attributed to.
pub(crate) fn attribution_range<M: SemanticModel>(model: &M, literal: LiteralId) -> SourceRange {
    let range = model.literal_range(literal);
    if model.literal_concat_count(literal) < 2 {
        return range;
    }

    let Some(second_token) = model.literal_token_location(literal, 1) else {
        return range;
    };

    // First level: the # stringification. Second level: the macro call.
    let once = model.immediate_expansion_range(second_token);
    let begin = model.immediate_expansion_range(once.begin).begin;
    let end = model.immediate_expansion_range(once.end).end;

    // Skip the macro name token and its opening parenthesis, and drop the
    // closing one.
    let name_length = model.token_length_at(begin);
    SourceRange {
        begin: begin.with_offset(name_length as i32 + 1),
        end: end.with_offset(-1),
    }
}
