//! Central renaming engine
//!
//! Every final identifier in the output is decided here. Callers reserve names into
//! scopes; the engine resolves collisions deterministically and keeps one
//! [`RenameDecision`] per symbol and scope as an audit trail.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tb_rename::{NameRequest, RenameConfig, RenameEngine, RenameScope};
//!
//! let mut engine = RenameEngine::new(RenameConfig::default());
//! let scope = RenameScope::type_surface(&type_id, false);
//! let name = engine.reserve(NameRequest::new(member_id, "Value", scope))?;
//! ```

pub mod config;
pub mod decision;
pub mod engine;
pub mod error;
pub mod reserved;
pub mod scope;
pub mod style;

pub use config::{DEFAULT_MAX_SUFFIX_ATTEMPTS, RenameConfig};
pub use decision::{ConflictStrategy, DecisionSource, NameKind, NameRequest, RenameDecision, original_name};
pub use engine::RenameEngine;
pub use error::RenameError;
pub use reserved::{ReservedWords, TARGET_RESERVED_WORDS};
pub use scope::{RenameScope, Surface};
pub use style::NameStyle;
