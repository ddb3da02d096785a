// Shared test fixture
//
// A small Qt-ish declaration graph: QObject with its connect overloads, a
// button class with overloaded clicked signals, and a window class with the
// matching slots. Tests extend the model through the public builder methods
// where they need more.

use crate::model::memory::MethodOptions;
use crate::model::{
    ClassId, ExprId, FileId, MemoryModel, MethodId, SourceRange, TypeId,
};

pub struct Fixture {
    pub model: MemoryModel,
    pub file: FileId,

    pub qobject: ClassId,
    pub connect_static: MethodId,
    pub connect_member: MethodId,

    pub button: ClassId,
    pub clicked_int: MethodId,
    pub clicked_str: MethodId,

    pub window: ClassId,
    pub update_int: MethodId,

    pub int_ty: TypeId,
    pub qstring_ty: TypeId,

    next_offset: u32,
}

impl Fixture {
    pub fn new() -> Self {
        let mut model = MemoryModel::new();
        let file = model.add_file("mainwindow.cpp");

        let int_ty = model.named_type("int");
        let qstring_ty = model.named_type("QString");
        let char_ty = model.named_type("char");
        let const_char = model.const_of(char_ty);
        let const_char_ptr = model.pointer_to(const_char);

        let qobject = model.add_class("QObject");
        let qobject_ty = model.class_type(qobject);
        let const_qobject = model.const_of(qobject_ty);
        let qobject_ptr = model.pointer_to(const_qobject);

        // static connect(sender, signal, receiver, member, type = ...)
        let connect_static = model.add_method(
            qobject,
            "connect",
            &[
                qobject_ptr,
                const_char_ptr,
                qobject_ptr,
                const_char_ptr,
                int_ty,
            ],
            MethodOptions {
                min_required_args: Some(4),
                is_static: true,
                ..Default::default()
            },
        );
        // member connect(sender, signal, member, type = ...)
        let connect_member = model.add_method(
            qobject,
            "connect",
            &[qobject_ptr, const_char_ptr, const_char_ptr, int_ty],
            MethodOptions {
                min_required_args: Some(3),
                ..Default::default()
            },
        );

        let button = model.add_class("QPushButton");
        model.set_first_base(button, qobject);
        let clicked_int = model.add_method(button, "clicked", &[int_ty], MethodOptions::default());
        let clicked_str =
            model.add_method(button, "clicked", &[qstring_ty], MethodOptions::default());

        let window = model.add_class("MainWindow");
        model.set_first_base(window, qobject);
        let update_int = model.add_method(window, "update", &[int_ty], MethodOptions::default());

        Self {
            model,
            file,
            qobject,
            connect_static,
            connect_member,
            button,
            clicked_int,
            clicked_str,
            window,
            update_int,
            int_ty,
            qstring_ty,
            next_offset: 1000,
        }
    }

    /// A fresh `Class *` expression.
    pub fn object(&mut self, class: ClassId) -> ExprId {
        let class_ty = self.model.class_type(class);
        let ptr = self.model.pointer_to(class_ty);
        self.model.object_expr(ptr)
    }

    /// A fresh by-value `Class` expression.
    pub fn value_object(&mut self, class: ClassId) -> ExprId {
        let class_ty = self.model.class_type(class);
        self.model.object_expr(class_ty)
    }

    /// A single-token string literal expression at a fresh range.
    pub fn sig(&mut self, text: &str) -> ExprId {
        self.sig_with_range(text).0
    }

    /// Same as [`sig`](Self::sig), also returning the literal's range.
    pub fn sig_with_range(&mut self, text: &str) -> (ExprId, SourceRange) {
        let range = self.fresh_range(text.len() as u32);
        (self.model.string_expr(text, range), range)
    }

    fn fresh_range(&mut self, len: u32) -> SourceRange {
        let begin = self.next_offset;
        self.next_offset += len.max(1) + 10;
        SourceRange::in_file(self.file, begin, begin + len)
    }
}
