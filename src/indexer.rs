// Cross-reference sink
//
// The resolver reports each successful resolution as a use record; storing
// and presenting those records is the consumer's business. `RecordingSink`
// is the in-memory implementation used by tests and by embedders that
// post-process the stream before persisting it.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::model::{ContextId, MethodId, SourceRange};

/// How a use site relates to the declaration it references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UseKind {
    /// Call-like use: the site designates the member for invocation.
    Call,
    /// Plain mention without call semantics.
    Reference,
}

/// Qualifier refining a use record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UseFlavor {
    Default,
    /// The declaration is named, not invoked; the site stores a member
    /// pointer or name and the framework performs the call later.
    Address,
}

/// One resolved cross-reference, as handed to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedUse {
    pub method: MethodId,
    pub range: SourceRange,
    pub context: Option<ContextId>,
    pub kind: UseKind,
    pub flavor: UseFlavor,
}

/// Receiver for resolved uses. Implemented by whatever indexer hosts the
/// resolver; called at most once per recognized string operand.
pub trait UseSink {
    fn register_use(
        &mut self,
        method: MethodId,
        range: SourceRange,
        context: Option<ContextId>,
        kind: UseKind,
        flavor: UseFlavor,
    );
}

/// Sink that collects use records in memory, in registration order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    uses: Vec<ResolvedUse>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uses(&self) -> &[ResolvedUse] {
        &self.uses
    }

    pub fn into_uses(self) -> Vec<ResolvedUse> {
        self.uses
    }

    /// Serialize the collected records for downstream tooling.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.uses)?)
    }
}

impl UseSink for RecordingSink {
    fn register_use(
        &mut self,
        method: MethodId,
        range: SourceRange,
        context: Option<ContextId>,
        kind: UseKind,
        flavor: UseFlavor,
    ) {
        self.uses.push(ResolvedUse {
            method,
            range,
            context,
            kind,
            flavor,
        });
    }
}
