// Dispatcher tests
//
// Feed whole call/construct expressions through visit_call/visit_construct
// and check which uses come out the other end. The class graph comes from
// the shared fixture; each test adds the framework entry points it needs.

#[cfg(test)]
mod call_dispatch {
    use crate::indexer::RecordingSink;
    use crate::model::memory::MethodOptions;
    use crate::model::{ContextId, ExprId};
    use crate::resolver::QtResolver;
    use crate::tests::helpers::Fixture;

    fn run_call(fx: &Fixture, call: ExprId, context: Option<ContextId>) -> RecordingSink {
        let mut sink = RecordingSink::new();
        let mut resolver = QtResolver::new(&fx.model, &mut sink);
        resolver.set_context(context);
        resolver.visit_call(call);
        sink
    }

    #[test]
    fn static_connect_resolves_both_operand_pairs() {
        let mut fx = Fixture::new();
        let button = fx.object(fx.button);
        let window = fx.object(fx.window);
        let signal = fx.sig("1clicked(int)");
        let slot = fx.sig("1update(int)");
        let call = fx
            .model
            .call_expr(fx.connect_static, vec![button, signal, window, slot]);

        let sink = run_call(&fx, call, Some(ContextId(7)));
        let uses = sink.uses();
        assert_eq!(uses.len(), 2);
        assert_eq!(uses[0].method, fx.clicked_int);
        assert_eq!(uses[1].method, fx.update_int);
        assert!(uses.iter().all(|u| u.context == Some(ContextId(7))));
    }

    #[test]
    fn member_connect_takes_the_receiver_as_second_object() {
        let mut fx = Fixture::new();
        let button = fx.object(fx.button);
        let window = fx.object(fx.window);
        let signal = fx.sig("1clicked(QString)");
        let slot = fx.sig("1update(int)");
        let opts = fx.object(fx.qobject); // trailing connection-type argument
        let call = fx.model.member_call_expr(
            fx.connect_member,
            window,
            vec![button, signal, slot, opts],
        );

        let sink = run_call(&fx, call, None);
        let uses = sink.uses();
        assert_eq!(uses.len(), 2);
        assert_eq!(uses[0].method, fx.clicked_str);
        assert_eq!(uses[1].method, fx.update_int);
    }

    #[test]
    fn member_connect_without_a_receiver_is_quiet() {
        let mut fx = Fixture::new();
        let button = fx.object(fx.button);
        let signal = fx.sig("1clicked(int)");
        let slot = fx.sig("1update(int)");
        let call = fx
            .model
            .call_expr(fx.connect_member, vec![button, signal, slot]);

        assert!(run_call(&fx, call, None).uses().is_empty());
    }

    #[test]
    fn owners_outside_the_framework_prefix_are_ignored() {
        let mut fx = Fixture::new();
        let bus = fx.model.add_class("MessageBus");
        let char_ty = fx.model.named_type("char");
        let char_ptr = fx.model.pointer_to(char_ty);
        let connect = fx.model.add_method(
            bus,
            "connect",
            &[char_ptr, char_ptr, char_ptr, char_ptr],
            MethodOptions {
                is_static: true,
                ..Default::default()
            },
        );

        let button = fx.object(fx.button);
        let window = fx.object(fx.window);
        let signal = fx.sig("1clicked(int)");
        let slot = fx.sig("1update(int)");
        let call = fx.model.call_expr(connect, vec![button, signal, window, slot]);

        assert!(run_call(&fx, call, None).uses().is_empty());
    }

    #[test]
    fn timer_single_shot_resolves_the_receiver_slot_pair() {
        let mut fx = Fixture::new();
        let timer = fx.model.add_class("QTimer");
        let char_ty = fx.model.named_type("char");
        let char_ptr = fx.model.pointer_to(char_ty);
        let qobject_ty = fx.model.class_type(fx.qobject);
        let qobject_ptr = fx.model.pointer_to(qobject_ty);
        let single_shot = fx.model.add_method(
            timer,
            "singleShot",
            &[fx.int_ty, qobject_ptr, char_ptr],
            MethodOptions {
                is_static: true,
                ..Default::default()
            },
        );

        let interval = {
            let ty = fx.int_ty;
            fx.model.object_expr(ty)
        };
        let window = fx.object(fx.window);
        let slot = fx.sig("1update(int)");
        let call = fx
            .model
            .call_expr(single_shot, vec![interval, window, slot]);

        let sink = run_call(&fx, call, None);
        assert_eq!(sink.uses().len(), 1);
        assert_eq!(sink.uses()[0].method, fx.update_int);
    }

    #[test]
    fn menu_add_action_overloads_shift_the_operand_positions() {
        let mut fx = Fixture::new();
        let menu = fx.model.add_class("QMenu");
        let char_ty = fx.model.named_type("char");
        let char_ptr = fx.model.pointer_to(char_ty);
        let qstring = fx.qstring_ty;
        let qobject_ty = fx.model.class_type(fx.qobject);
        let qobject_ptr = fx.model.pointer_to(qobject_ty);
        let icon_ty = fx.model.named_type("QIcon");
        let key_ty = fx.model.named_type("QKeySequence");

        // addAction(text, receiver, member, shortcut)
        let four_params = fx.model.add_method(
            menu,
            "addAction",
            &[qstring, qobject_ptr, char_ptr, key_ty],
            MethodOptions {
                min_required_args: Some(3),
                ..Default::default()
            },
        );
        // addAction(icon, text, receiver, member, shortcut)
        let five_params = fx.model.add_method(
            menu,
            "addAction",
            &[icon_ty, qstring, qobject_ptr, char_ptr, key_ty],
            MethodOptions {
                min_required_args: Some(4),
                ..Default::default()
            },
        );

        let text = {
            let ty = fx.qstring_ty;
            fx.model.object_expr(ty)
        };
        let window = fx.object(fx.window);
        let slot = fx.sig("1update(int)");
        let call = fx.model.call_expr(four_params, vec![text, window, slot]);
        let sink = run_call(&fx, call, None);
        assert_eq!(sink.uses().len(), 1);
        assert_eq!(sink.uses()[0].method, fx.update_int);

        let icon = fx.model.object_expr(icon_ty);
        let text = {
            let ty = fx.qstring_ty;
            fx.model.object_expr(ty)
        };
        let window = fx.object(fx.window);
        let slot = fx.sig("1update(int)");
        let call = fx
            .model
            .call_expr(five_params, vec![icon, text, window, slot]);
        let sink = run_call(&fx, call, None);
        assert_eq!(sink.uses().len(), 1);
        assert_eq!(sink.uses()[0].method, fx.update_int);
    }

    #[test]
    fn invoke_method_goes_through_the_name_only_pipeline() {
        let mut fx = Fixture::new();
        let meta = fx.model.add_class("QMetaObject");
        let char_ty = fx.model.named_type("char");
        let char_ptr = fx.model.pointer_to(char_ty);
        let qobject_ty = fx.model.class_type(fx.qobject);
        let qobject_ptr = fx.model.pointer_to(qobject_ty);
        let invoke = fx.model.add_method(
            meta,
            "invokeMethod",
            &[qobject_ptr, char_ptr],
            MethodOptions {
                is_static: true,
                ..Default::default()
            },
        );
        let refresh = fx
            .model
            .add_method(fx.window, "refresh", &[], MethodOptions::default());

        let window = fx.object(fx.window);
        let name = fx.sig("refresh");
        let call = fx.model.call_expr(invoke, vec![window, name]);

        let sink = run_call(&fx, call, None);
        assert_eq!(sink.uses().len(), 1);
        assert_eq!(sink.uses()[0].method, refresh);

        // A full signature string is not a method name; the name-only
        // pipeline must stay quiet on it.
        let window = fx.object(fx.window);
        let signature = fx.sig("1refresh()");
        let call = fx.model.call_expr(invoke, vec![window, signature]);
        assert!(run_call(&fx, call, None).uses().is_empty());
    }

    #[test]
    fn dialog_open_resolves_its_single_pair() {
        let mut fx = Fixture::new();
        let dialog = fx.model.add_class("QFileDialog");
        let char_ty = fx.model.named_type("char");
        let char_ptr = fx.model.pointer_to(char_ty);
        let qobject_ty = fx.model.class_type(fx.qobject);
        let qobject_ptr = fx.model.pointer_to(qobject_ty);
        let open = fx.model.add_method(
            dialog,
            "open",
            &[qobject_ptr, char_ptr],
            MethodOptions::default(),
        );

        let window = fx.object(fx.window);
        let slot = fx.sig("1update(int)");
        let call = fx.model.call_expr(open, vec![window, slot]);

        let sink = run_call(&fx, call, None);
        assert_eq!(sink.uses().len(), 1);
        assert_eq!(sink.uses()[0].method, fx.update_int);
    }
}

#[cfg(test)]
mod construct_dispatch {
    use crate::indexer::RecordingSink;
    use crate::model::ExprId;
    use crate::model::memory::MethodOptions;
    use crate::resolver::QtResolver;
    use crate::tests::helpers::Fixture;

    fn run_construct(fx: &Fixture, construct: ExprId) -> RecordingSink {
        let mut sink = RecordingSink::new();
        let mut resolver = QtResolver::new(&fx.model, &mut sink);
        resolver.visit_construct(construct);
        sink
    }

    #[test]
    fn shortcut_constructor_resolves_member_and_ambiguous_member() {
        let mut fx = Fixture::new();
        let shortcut = fx.model.add_class("QShortcut");
        let key_ty = fx.model.named_type("QKeySequence");
        let refresh = fx
            .model
            .add_method(fx.window, "refresh", &[], MethodOptions::default());
        let ctor = fx.model.add_constructor(shortcut, &[key_ty]);

        let key = fx.model.object_expr(key_ty);
        let window = fx.object(fx.window);
        let member = fx.sig("1update(int)");
        let ambiguous_member = fx.sig("1refresh()");
        let construct = fx
            .model
            .construct_expr(ctor, vec![key, window, member, ambiguous_member]);

        let sink = run_construct(&fx, construct);
        let uses = sink.uses();
        assert_eq!(uses.len(), 2);
        assert_eq!(uses[0].method, fx.update_int);
        assert_eq!(uses[1].method, refresh);
    }

    #[test]
    fn three_argument_shortcut_resolves_only_the_member() {
        let mut fx = Fixture::new();
        let shortcut = fx.model.add_class("QShortcut");
        let key_ty = fx.model.named_type("QKeySequence");
        let ctor = fx.model.add_constructor(shortcut, &[key_ty]);

        let key = fx.model.object_expr(key_ty);
        let window = fx.object(fx.window);
        let member = fx.sig("1update(int)");
        let construct = fx.model.construct_expr(ctor, vec![key, window, member]);

        let sink = run_construct(&fx, construct);
        assert_eq!(sink.uses().len(), 1);
        assert_eq!(sink.uses()[0].method, fx.update_int);
    }

    #[test]
    fn signal_spy_constructor_resolves_the_watched_signal() {
        let mut fx = Fixture::new();
        let spy = fx.model.add_class("QSignalSpy");
        let ctor = fx.model.add_constructor(spy, &[]);

        let button = fx.object(fx.button);
        let signal = fx.sig("1clicked(int)");
        let construct = fx.model.construct_expr(ctor, vec![button, signal]);

        let sink = run_construct(&fx, construct);
        assert_eq!(sink.uses().len(), 1);
        assert_eq!(sink.uses()[0].method, fx.clicked_int);
    }

    #[test]
    fn constructors_outside_the_framework_prefix_are_ignored() {
        let mut fx = Fixture::new();
        let local = fx.model.add_class("ShortcutLike");
        let ctor = fx.model.add_constructor(local, &[]);

        let button = fx.object(fx.button);
        let signal = fx.sig("1clicked(int)");
        let construct = fx.model.construct_expr(ctor, vec![button, signal]);

        assert!(run_construct(&fx, construct).uses().is_empty());
    }
}
