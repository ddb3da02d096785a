// Candidate lookup
//
// Collects every member function with a given name that is visible from a
// class: the class itself, its single-inheritance base chain, and (when the
// chain yields nothing) the private-implementation class reached through the
// `d_func()` accessor. Discovery order is the tie-break later stages rely on.

use smallvec::SmallVec;

use crate::model::{ClassId, MethodId, SemanticModel};

/// Candidate buffer; resolutions rarely see more than a handful of overloads.
pub type Candidates = SmallVec<[MethodId; 10]>;

/// Walk `class` and its first-base chain collecting members named
/// `method_name`.
///
/// The framework convention puts the object base class first in the base
/// list, so only the first base is followed. While scanning, the first
/// member named `d_func` with a return type is remembered; if
/// the chain runs out with no candidate found, the walk restarts at the
/// class its return type points to. The accessor is cleared at that point,
/// so the private class's own `d_func` is never chased in turn. A class
/// without a definition ends the walk.
pub fn lookup_candidates<M: SemanticModel>(
    model: &M,
    class: ClassId,
    method_name: &str,
) -> Candidates {
    let mut candidates = Candidates::new();
    let mut d_func: Option<MethodId> = None;
    let mut cursor = Some(class);

    while let Some(current) = cursor {
        if !model.has_definition(current) {
            break;
        }

        for &member in model.methods(current) {
            let Some(name) = model.method_name(member) else {
                continue;
            };
            if name == method_name {
                candidates.push(member);
            }
            if d_func.is_none() && name == "d_func" && model.return_type(member).is_some() {
                d_func = Some(member);
            }
        }

        cursor = model.first_base(current);

        if cursor.is_none() && candidates.is_empty() {
            if let Some(accessor) = d_func.take() {
                cursor = model
                    .return_type(accessor)
                    .and_then(|ty| model.pointee_class(ty));
            }
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MemoryModel;
    use crate::model::memory::MethodOptions;

    #[test]
    fn collects_overloads_in_declaration_order() {
        let mut model = MemoryModel::new();
        let class = model.add_class("Widget");
        let int_ty = model.named_type("int");
        let str_ty = model.named_type("QString");
        let by_int = model.add_method(class, "update", &[int_ty], MethodOptions::default());
        let by_str = model.add_method(class, "update", &[str_ty], MethodOptions::default());
        model.add_method(class, "other", &[], MethodOptions::default());

        let found = lookup_candidates(&model, class, "update");
        assert_eq!(found.as_slice(), &[by_int, by_str]);
    }

    #[test]
    fn walks_the_first_base_chain_only() {
        let mut model = MemoryModel::new();
        let root = model.add_class("QObject");
        let mid = model.add_class("QWidget");
        let leaf = model.add_class("MyButton");
        let side = model.add_class("Mixin");
        model.set_first_base(leaf, mid);
        model.set_first_base(mid, root);

        let wanted = model.add_method(root, "deleteLater", &[], MethodOptions::default());
        // A member on a class outside the first-base chain must stay invisible.
        model.add_method(side, "deleteLater", &[], MethodOptions::default());

        let found = lookup_candidates(&model, leaf, "deleteLater");
        assert_eq!(found.as_slice(), &[wanted]);
    }

    #[test]
    fn undefined_base_terminates_the_walk() {
        let mut model = MemoryModel::new();
        let base = model.add_forward_class("Opaque");
        let leaf = model.add_class("Concrete");
        model.set_first_base(leaf, base);

        assert!(lookup_candidates(&model, leaf, "anything").is_empty());
    }

    #[test]
    fn follows_d_func_once_when_the_chain_is_dry() {
        let mut model = MemoryModel::new();
        let class = model.add_class("Service");
        let private = model.add_class("ServicePrivate");
        let inner_private = model.add_class("ServicePrivatePrivate");

        let private_ty = model.class_type(private);
        let private_ptr = model.pointer_to(private_ty);
        model.add_method(
            class,
            "d_func",
            &[],
            MethodOptions {
                return_type: Some(private_ptr),
                ..Default::default()
            },
        );

        // The private class has its own d_func; it must not be chased.
        let inner_ty = model.class_type(inner_private);
        let inner_ptr = model.pointer_to(inner_ty);
        model.add_method(
            private,
            "d_func",
            &[],
            MethodOptions {
                return_type: Some(inner_ptr),
                ..Default::default()
            },
        );
        let hidden = model.add_method(private, "emitChanged", &[], MethodOptions::default());
        model.add_method(inner_private, "emitChanged", &[], MethodOptions::default());

        let found = lookup_candidates(&model, class, "emitChanged");
        assert_eq!(found.as_slice(), &[hidden]);
    }

    #[test]
    fn d_func_is_not_taken_when_a_candidate_already_matched() {
        let mut model = MemoryModel::new();
        let class = model.add_class("Service");
        let private = model.add_class("ServicePrivate");

        let private_ty = model.class_type(private);
        let private_ptr = model.pointer_to(private_ty);
        model.add_method(
            class,
            "d_func",
            &[],
            MethodOptions {
                return_type: Some(private_ptr),
                ..Default::default()
            },
        );
        let public_member = model.add_method(class, "refresh", &[], MethodOptions::default());
        model.add_method(private, "refresh", &[], MethodOptions::default());

        let found = lookup_candidates(&model, class, "refresh");
        assert_eq!(found.as_slice(), &[public_member]);
    }
}
