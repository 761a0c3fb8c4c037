//! Error types for the renaming engine
//!
//! Every variant is a violation of the engine's contract by its caller, or the suffix
//! search running out; none of them is recoverable inside a run.

/// Errors raised by the renaming engine and final-name lookups
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenameError {
    /// A final name was requested for a symbol never reserved in that scope
    #[error("no name decision for {id} in {scope}; decisions exist in [{}]", available.join(", "))]
    NoDecision {
        /// Symbol looked up
        id: String,
        /// Scope looked in
        scope: String,
        /// Scopes the symbol does hold decisions in
        available: Vec<String>,
    },

    /// A symbol was looked up on a surface it is not emitted on
    #[error("{id} is not named in {requested}; it lives in {actual}")]
    ScopeMismatch {
        /// Symbol looked up
        id: String,
        /// Scope asked for
        requested: String,
        /// Scope the symbol is named in
        actual: String,
    },

    /// A symbol was re-reserved in one scope under a different requested name
    #[error("{id} already reserved in {scope} as `{existing}`, cannot re-reserve as `{requested}`")]
    ConflictingReservation {
        /// Symbol reserved twice
        id: String,
        /// Scope of both reservations
        scope: String,
        /// First requested name
        existing: String,
        /// Second requested name
        requested: String,
    },

    /// No free numeric suffix was found within the safety limit
    #[error("no free name for `{base}` in {scope} after {attempts} attempts")]
    SuffixExhausted {
        /// Scope searched
        scope: String,
        /// Name being suffixed
        base: String,
        /// Attempts made
        attempts: u32,
        /// `name -> holder` lines of the scope at the time of failure
        dump: Vec<String>,
    },
}
