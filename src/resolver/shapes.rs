// Call-shape catalog
//
// The dispatcher recognizes string-carrying framework calls from a closed
// table of shapes rather than a cascade of conditionals: each row names the
// owning class, the member, how many arguments the call must show, and which
// argument positions hold the (object, string) operand pairs. Matching is
// first-row-wins; extending the catalog means adding rows, nothing else.

/// Prefix every recognized owning class carries.
pub(crate) const TYPE_PREFIX: &str = "Q";

/// Rendered spelling of the trailing sentinel parameter that marks a signal
/// emittable only by its own class; it never counts against arity.
pub(crate) const PRIVATE_SIGNAL_SENTINEL: &str = "QPrivateSignal";

/// Where the object operand of a pair comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectSource {
    /// An explicit argument, by index.
    Arg(usize),
    /// The implicit object argument of a member call.
    Receiver,
}

/// One (object, string) operand pair carried by a recognized call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandPair {
    pub object: ObjectSource,
    /// Argument index of the string operand.
    pub string: usize,
}

const fn pair(object: ObjectSource, string: usize) -> OperandPair {
    OperandPair { object, string }
}

/// Which resolution pipeline the string operand feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
    /// Full `"1name(types)"` signature with argument matching.
    SignalSlot,
    /// Bare method name; unique-name resolution only.
    MethodName,
}

/// Constraint on the observed argument count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    AtLeast(usize),
    Exactly(usize),
}

impl Arity {
    pub fn accepts(self, observed: usize) -> bool {
        match self {
            Arity::AtLeast(n) => observed >= n,
            Arity::Exactly(n) => observed == n,
        }
    }
}

/// Constraint on how the callee is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staticness {
    Static,
    Member,
    Any,
}

/// One recognized call pattern.
#[derive(Debug, Clone, Copy)]
pub struct CallShape {
    pub owner: &'static str,
    pub member: &'static str,
    pub staticness: Staticness,
    pub args: Arity,
    /// Declared parameter count of the callee, for member names whose
    /// overloads shift the operand positions.
    pub callee_params: Option<usize>,
    /// The row only applies to calls with an implicit object argument.
    pub requires_receiver: bool,
    pub pairs: &'static [OperandPair],
    pub mode: ResolutionMode,
}

/// One recognized constructor pattern.
#[derive(Debug, Clone, Copy)]
pub struct ConstructShape {
    pub owner: &'static str,
    pub args: Arity,
    pub pairs: &'static [OperandPair],
}

use Arity::{AtLeast, Exactly};
use ObjectSource::{Arg, Receiver};

const fn call_shape(
    owner: &'static str,
    member: &'static str,
    args: Arity,
    pairs: &'static [OperandPair],
) -> CallShape {
    CallShape {
        owner,
        member,
        staticness: Staticness::Any,
        args,
        callee_params: None,
        requires_receiver: false,
        pairs,
        mode: ResolutionMode::SignalSlot,
    }
}

const fn dialog_open(owner: &'static str) -> CallShape {
    const PAIRS: &[OperandPair] = &[pair(Arg(0), 1)];
    call_shape(owner, "open", Exactly(2), PAIRS)
}

/// The call catalog. Order matters only between rows for the same owner and
/// member, where the most demanding arity must come first.
pub static CALL_SHAPES: &[CallShape] = &[
    // Connection establishment: the static overloads carry two full
    // sender/receiver pairs, the member overloads use the call receiver as
    // the second object.
    CallShape {
        staticness: Staticness::Static,
        ..call_shape(
            "QObject",
            "connect",
            AtLeast(4),
            &[pair(Arg(0), 1), pair(Arg(2), 3)],
        )
    },
    CallShape {
        staticness: Staticness::Static,
        ..call_shape(
            "QObject",
            "disconnect",
            AtLeast(4),
            &[pair(Arg(0), 1), pair(Arg(2), 3)],
        )
    },
    CallShape {
        staticness: Staticness::Member,
        requires_receiver: true,
        ..call_shape(
            "QObject",
            "connect",
            AtLeast(3),
            &[pair(Arg(0), 1), pair(Receiver, 2)],
        )
    },
    CallShape {
        staticness: Staticness::Member,
        requires_receiver: true,
        ..call_shape(
            "QObject",
            "disconnect",
            AtLeast(3),
            &[pair(Arg(0), 1), pair(Receiver, 2)],
        )
    },
    // Timer / lookup / cache calls taking a receiver+slot pair.
    call_shape("QTimer", "singleShot", AtLeast(3), &[pair(Arg(1), 2)]),
    call_shape("QHostInfo", "lookupHost", AtLeast(3), &[pair(Arg(1), 2)]),
    call_shape(
        "QNetworkAccessCache",
        "requestEntry",
        AtLeast(3),
        &[pair(Arg(1), 2)],
    ),
    // Asynchronous D-Bus calls; the five-argument overload adds an error slot.
    call_shape(
        "QDBusAbstractInterface",
        "callWithCallback",
        Exactly(5),
        &[pair(Arg(2), 3), pair(Arg(2), 4)],
    ),
    call_shape(
        "QDBusAbstractInterface",
        "callWithCallback",
        Exactly(4),
        &[pair(Arg(2), 3)],
    ),
    // Dialog open(receiver, member) overloads.
    dialog_open("QFileDialog"),
    dialog_open("QColorDialog"),
    dialog_open("QFontDialog"),
    dialog_open("QMessageBox"),
    dialog_open("QInputDialog"),
    dialog_open("QPrintDialog"),
    dialog_open("QPageSetupDialog"),
    dialog_open("QPrintPreviewDialog"),
    dialog_open("QProgressDialog"),
    // Menu/toolbar action adding; the menu overloads are distinguished by
    // the callee's declared parameter count (shortcut-taking vs. not), the
    // toolbar ones by the observed argument count.
    CallShape {
        callee_params: Some(4),
        ..call_shape("QMenu", "addAction", AtLeast(3), &[pair(Arg(1), 2)])
    },
    CallShape {
        callee_params: Some(5),
        ..call_shape("QMenu", "addAction", AtLeast(4), &[pair(Arg(2), 3)])
    },
    call_shape("QToolbar", "addAction", Exactly(3), &[pair(Arg(1), 2)]),
    call_shape("QToolbar", "addAction", Exactly(4), &[pair(Arg(2), 3)]),
    // State machine transitions.
    call_shape("QState", "addTransition", AtLeast(2), &[pair(Arg(0), 1)]),
    // Invocation by bare method name.
    CallShape {
        mode: ResolutionMode::MethodName,
        ..call_shape("QMetaObject", "invokeMethod", AtLeast(2), &[pair(Arg(0), 1)])
    },
];

/// The constructor catalog.
pub static CONSTRUCT_SHAPES: &[ConstructShape] = &[
    ConstructShape {
        owner: "QShortcut",
        args: AtLeast(4),
        pairs: &[pair(Arg(1), 2), pair(Arg(1), 3)],
    },
    ConstructShape {
        owner: "QShortcut",
        args: AtLeast(3),
        pairs: &[pair(Arg(1), 2)],
    },
    ConstructShape {
        owner: "QSignalSpy",
        args: AtLeast(2),
        pairs: &[pair(Arg(0), 1)],
    },
    ConstructShape {
        owner: "QSignalTransition",
        args: AtLeast(2),
        pairs: &[pair(Arg(0), 1)],
    },
];

/// First row matching the observed call, if any.
pub(crate) fn match_call_shape(
    owner: &str,
    member: &str,
    is_static: bool,
    observed_args: usize,
    callee_params: usize,
    has_receiver: bool,
) -> Option<&'static CallShape> {
    CALL_SHAPES.iter().find(|shape| {
        shape.owner == owner
            && shape.member == member
            && match shape.staticness {
                Staticness::Static => is_static,
                Staticness::Member => !is_static,
                Staticness::Any => true,
            }
            && shape.args.accepts(observed_args)
            && shape.callee_params.is_none_or(|n| n == callee_params)
            && (!shape.requires_receiver || has_receiver)
    })
}

/// First constructor row matching the observed construct expression, if any.
pub(crate) fn match_construct_shape(
    owner: &str,
    observed_args: usize,
) -> Option<&'static ConstructShape> {
    CONSTRUCT_SHAPES
        .iter()
        .find(|shape| shape.owner == owner && shape.args.accepts(observed_args))
}
