//! Name requests and the decisions recorded for them

use crate::scope::RenameScope;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tb_ids::StableId;

/// Which configured style a request is subject to
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NameKind {
    /// Type or alias name
    Type,
    /// Member name
    Member,
}

/// Where a final name came from
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionSource {
    /// Derived from the requested name
    Automatic,
    /// Taken from a configured override
    Override,
    /// Used exactly as requested, bypassing style and sanitization
    Verbatim,
}

/// How a collision was resolved
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictStrategy {
    /// No collision
    None,
    /// Qualified with the explicitly implemented interface's short name
    InterfaceQualified,
    /// Numeric suffix appended
    #[display("NumericSuffix({_0})")]
    NumericSuffix(u32),
    /// Shared with other members of the same overload group
    OverloadShared,
}

/// A request for a final name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRequest {
    /// Symbol being named
    pub id: StableId,
    /// Requested base name
    pub base: String,
    /// Scope to reserve in
    pub scope: RenameScope,
    /// Why the symbol is being named
    pub reason: String,
    /// Static member
    pub is_static: bool,
    /// Style the request is subject to
    pub kind: NameKind,
    /// Interface short name to try before numeric suffixes
    pub interface_short_name: Option<String>,
    /// Overload group whose members share one name in the scope
    pub overload_group: Option<String>,
    /// Skip style transforms and reserved-word sanitization
    pub verbatim: bool,
}

impl NameRequest {
    /// Request `base` for `id` in `scope`
    ///
    /// The kind follows the identity: types get the type style, members the member
    /// style.
    pub fn new(id: impl Into<StableId>, base: impl Into<String>, scope: RenameScope) -> Self {
        let id = id.into();
        let kind = match id {
            StableId::Type(_) => NameKind::Type,
            StableId::Member(_) => NameKind::Member,
        };
        Self {
            id,
            base: base.into(),
            is_static: scope.is_static(),
            scope,
            reason: String::new(),
            kind,
            interface_short_name: None,
            overload_group: None,
            verbatim: false,
        }
    }

    /// Record why the symbol is being named
    #[must_use]
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Override the static flag
    #[must_use]
    pub fn is_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Override the style kind
    #[must_use]
    pub fn kind(mut self, kind: NameKind) -> Self {
        self.kind = kind;
        self
    }

    /// Try `<name>_<short>` before numeric suffixes
    #[must_use]
    pub fn qualified_by(mut self, short_name: impl Into<String>) -> Self {
        self.interface_short_name = Some(short_name.into());
        self
    }

    /// Share the final name with every member of `group` in the scope
    #[must_use]
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.overload_group = Some(group.into());
        self
    }

    /// Use the requested name exactly
    #[must_use]
    pub fn verbatim(mut self) -> Self {
        self.verbatim = true;
        self
    }
}

/// The committed outcome of one reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameDecision {
    /// Symbol named
    pub id: StableId,
    /// Name asked for
    pub requested: String,
    /// Final identifier
    pub final_name: String,
    /// Source name of the symbol
    pub original: String,
    /// Why the symbol was named
    pub reason: String,
    /// Where the final name came from
    pub source: DecisionSource,
    /// How a collision was resolved
    pub strategy: ConflictStrategy,
    /// A reserved word was sanitized on the way
    pub sanitized: bool,
    /// Canonical key of the scope
    pub scope: String,
    /// Static member
    pub is_static: bool,
    /// Overload group sharing the final name
    pub overload_group: Option<String>,
}

/// Source name carried by an identity
#[must_use]
pub fn original_name(id: &StableId) -> String {
    match id {
        StableId::Type(ty) => ty.simple_name().to_string(),
        StableId::Member(member) => member.member_name.clone(),
    }
}
