//! Stable identities
//!
//! Every type and member gets exactly one stable identity when the symbol graph is
//! built. Identities never change afterwards, no matter how the symbol is renamed, and
//! they are the only keys later passes use to refer to symbols.
//!
//! This is a separate crate so the type reference model and the symbol graph can both
//! name symbols without depending on each other.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Identity of a type: the module it was loaded from plus its fully-qualified source name
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[display("{module}:{full_name}")]
pub struct TypeStableId {
    /// Origin module (assembly) name
    pub module: String,
    /// Fully-qualified source name, e.g. ``System.Collections.Generic.List`1``
    pub full_name: String,
}

impl TypeStableId {
    /// Create a type identity
    pub fn new(module: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            full_name: full_name.into(),
        }
    }

    /// Namespace part of the full name (everything before the last `.`)
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.outer_name()
            .rsplit_once('.')
            .map_or("", |(namespace, _)| namespace)
    }

    /// Simple name without namespace; nested types keep their `Outer+Inner` chain
    #[must_use]
    pub fn simple_name(&self) -> &str {
        let namespace = self.namespace();
        if namespace.is_empty() {
            &self.full_name
        } else {
            &self.full_name[namespace.len() + 1..]
        }
    }

    /// Full name of the outermost declaring type (nested types use `+`)
    fn outer_name(&self) -> &str {
        self.full_name
            .split_once('+')
            .map_or(self.full_name.as_str(), |(outer, _)| outer)
    }
}

/// Identity of a member
///
/// The metadata token is carried for diagnostics only. Two reflections of the same
/// logical member across runs may carry different tokens, so equality, hashing and
/// ordering all ignore it.
#[derive(Debug, Display, Clone, Serialize, Deserialize)]
#[display("{module}:{declaring_type}::{member_name}{signature}")]
pub struct MemberStableId {
    /// Origin module (assembly) name
    pub module: String,
    /// Fully-qualified source name of the declaring type
    pub declaring_type: String,
    /// Source name of the member
    pub member_name: String,
    /// Canonical signature string that disambiguates overloads
    pub signature: String,
    /// Metadata token, diagnostics only
    #[serde(default)]
    pub token: Option<u32>,
}

impl MemberStableId {
    /// Create a member identity without a metadata token
    pub fn new(
        module: impl Into<String>,
        declaring_type: impl Into<String>,
        member_name: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            declaring_type: declaring_type.into(),
            member_name: member_name.into(),
            signature: signature.into(),
            token: None,
        }
    }

    /// Attach a metadata token
    #[must_use]
    pub fn with_token(mut self, token: u32) -> Self {
        self.token = Some(token);
        self
    }

    /// Identity of the declaring type
    #[must_use]
    pub fn declaring_type_id(&self) -> TypeStableId {
        TypeStableId::new(self.module.clone(), self.declaring_type.clone())
    }

    /// Same member re-homed onto another declaring type
    #[must_use]
    pub fn rebased(&self, declaring_type: &TypeStableId) -> Self {
        Self {
            module: declaring_type.module.clone(),
            declaring_type: declaring_type.full_name.clone(),
            member_name: self.member_name.clone(),
            signature: self.signature.clone(),
            token: None,
        }
    }

    fn key(&self) -> (&str, &str, &str, &str) {
        (
            &self.module,
            &self.declaring_type,
            &self.member_name,
            &self.signature,
        )
    }
}

impl PartialEq for MemberStableId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for MemberStableId {}

impl Hash for MemberStableId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for MemberStableId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MemberStableId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Identity of any symbol the renaming engine can name
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StableId {
    /// A type
    #[display("{_0}")]
    Type(TypeStableId),
    /// A member of a type
    #[display("{_0}")]
    Member(MemberStableId),
}

impl StableId {
    /// The type identity, if this is a type
    #[must_use]
    pub fn as_type(&self) -> Option<&TypeStableId> {
        match self {
            Self::Type(id) => Some(id),
            Self::Member(_) => None,
        }
    }

    /// The member identity, if this is a member
    #[must_use]
    pub fn as_member(&self) -> Option<&MemberStableId> {
        match self {
            Self::Member(id) => Some(id),
            Self::Type(_) => None,
        }
    }
}

impl From<TypeStableId> for StableId {
    fn from(id: TypeStableId) -> Self {
        Self::Type(id)
    }
}

impl From<MemberStableId> for StableId {
    fn from(id: MemberStableId) -> Self {
        Self::Member(id)
    }
}
