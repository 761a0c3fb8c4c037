//! The renaming engine

use crate::config::RenameConfig;
use crate::decision::{ConflictStrategy, DecisionSource, NameKind, NameRequest, RenameDecision, original_name};
use crate::error::RenameError;
use crate::reserved::ReservedWords;
use crate::scope::RenameScope;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::fmt;
use tb_ids::StableId;
use tb_intern::{Interner, Symbol};
use tracing::trace;

/// Who holds a name in a scope
#[derive(Debug, Clone, PartialEq, Eq)]
enum Holder {
    /// A single symbol
    Symbol(StableId),
    /// Every member of an overload group
    Group(String),
}

impl fmt::Display for Holder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol(id) => write!(f, "{id}"),
            Self::Group(group) => write!(f, "group {group}"),
        }
    }
}

/// Name table of one scope
#[derive(Debug, Default)]
struct ScopeTable {
    holders: FxHashMap<Symbol, Holder>,
    decisions: IndexMap<StableId, RenameDecision>,
    groups: FxHashMap<String, Symbol>,
    next_suffix: FxHashMap<Symbol, u32>,
}

/// A computed but uncommitted name
#[derive(Debug)]
struct Resolved {
    final_name: String,
    source: DecisionSource,
    strategy: ConflictStrategy,
    sanitized: bool,
    next_suffix: Option<(String, u32)>,
}

/// Sole authority for final identifiers
///
/// Holds one independent name table per scope. A reservation resolves the requested
/// name in a fixed order: configured override, style transform, reserved-word
/// sanitization, the name itself, `<name>_<Interface>` for explicit implementations,
/// then numeric suffixes starting at 2. Suffixes only ever grow per base name and
/// scope, so a suffix is never handed out twice.
#[derive(Debug)]
pub struct RenameEngine {
    config: RenameConfig,
    reserved: ReservedWords,
    interner: Interner,
    tables: FxHashMap<RenameScope, ScopeTable>,
    scopes_of: FxHashMap<StableId, Vec<RenameScope>>,
}

impl RenameEngine {
    /// Engine with empty tables
    #[must_use]
    pub fn new(config: RenameConfig) -> Self {
        let reserved = ReservedWords::with_extra(config.extra_reserved_words.iter().cloned());
        Self {
            config,
            reserved,
            interner: Interner::new(),
            tables: FxHashMap::default(),
            scopes_of: FxHashMap::default(),
        }
    }

    /// Configuration in effect
    #[must_use]
    pub fn config(&self) -> &RenameConfig {
        &self.config
    }

    /// Reserved words in effect
    #[must_use]
    pub fn reserved_words(&self) -> &ReservedWords {
        &self.reserved
    }

    /// Reserve a final name
    ///
    /// Reserving the same symbol again in the same scope with the same requested name
    /// returns the committed name unchanged.
    ///
    /// # Errors
    ///
    /// - [`RenameError::ConflictingReservation`] when the symbol already holds a
    ///   decision in the scope for a different requested name
    /// - [`RenameError::SuffixExhausted`] when no free suffix is found within the
    ///   configured limit
    pub fn reserve(&mut self, request: NameRequest) -> Result<String, RenameError> {
        if let Some(existing) = self.decision(&request.id, &request.scope) {
            if existing.requested == request.base {
                return Ok(existing.final_name.clone());
            }
            return Err(RenameError::ConflictingReservation {
                id: request.id.to_string(),
                scope: request.scope.key(),
                existing: existing.requested.clone(),
                requested: request.base,
            });
        }

        let resolved = self.resolve(&request)?;
        let name = self.interner.intern(&resolved.final_name);
        let suffix_state = resolved
            .next_suffix
            .as_ref()
            .map(|(base, next)| (self.interner.intern(base), *next));

        let NameRequest {
            id,
            base,
            scope,
            reason,
            is_static,
            overload_group,
            ..
        } = request;

        let decision = RenameDecision {
            original: original_name(&id),
            id: id.clone(),
            requested: base,
            final_name: resolved.final_name,
            reason,
            source: resolved.source,
            strategy: resolved.strategy,
            sanitized: resolved.sanitized,
            scope: scope.key(),
            is_static,
            overload_group: overload_group.clone(),
        };
        trace!(scope = %decision.scope, id = %decision.id, name = %decision.final_name, strategy = %decision.strategy, "reserved");

        let table = self.tables.entry(scope.clone()).or_default();
        let holder = overload_group
            .clone()
            .map_or_else(|| Holder::Symbol(id.clone()), Holder::Group);
        table.holders.entry(name).or_insert(holder);
        if let Some(group) = overload_group {
            table.groups.entry(group).or_insert(name);
        }
        if let Some((base, next)) = suffix_state {
            table.next_suffix.insert(base, next);
        }
        let final_name = decision.final_name.clone();
        table.decisions.insert(id.clone(), decision);
        self.scopes_of.entry(id).or_default().push(scope);

        Ok(final_name)
    }

    /// Compute the name a request would get, without committing it
    ///
    /// # Errors
    ///
    /// Returns [`RenameError::SuffixExhausted`] under the same conditions as
    /// [`RenameEngine::reserve`].
    pub fn peek(&self, request: &NameRequest) -> Result<String, RenameError> {
        if let Some(existing) = self.decision(&request.id, &request.scope) {
            return Ok(existing.final_name.clone());
        }
        self.resolve(request).map(|resolved| resolved.final_name)
    }

    /// Whether `name` is held by anything in `scope`
    #[must_use]
    pub fn is_taken(&self, scope: &RenameScope, name: &str) -> bool {
        !self.is_free(self.tables.get(scope), name, None)
    }

    /// Final name of `id` in `scope`
    ///
    /// # Errors
    ///
    /// Returns [`RenameError::NoDecision`], listing the scopes `id` does hold
    /// decisions in, when it was never reserved in `scope`.
    pub fn get_final(&self, id: &StableId, scope: &RenameScope) -> Result<&str, RenameError> {
        self.decision(id, scope)
            .map(|decision| decision.final_name.as_str())
            .ok_or_else(|| RenameError::NoDecision {
                id: id.to_string(),
                scope: scope.key(),
                available: self.scopes_of(id).iter().map(RenameScope::key).collect(),
            })
    }

    /// Decision for `id` in `scope`, if any
    #[must_use]
    pub fn decision(&self, id: &StableId, scope: &RenameScope) -> Option<&RenameDecision> {
        self.tables.get(scope).and_then(|table| table.decisions.get(id))
    }

    /// Scopes `id` holds decisions in, in reservation order
    #[must_use]
    pub fn scopes_of(&self, id: &StableId) -> &[RenameScope] {
        self.scopes_of.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every decision, sorted by scope key, then final name, then identity
    #[must_use]
    pub fn decisions(&self) -> Vec<&RenameDecision> {
        let mut all: Vec<&RenameDecision> = self
            .tables
            .values()
            .flat_map(|table| table.decisions.values())
            .collect();
        all.sort_by(|left, right| {
            (&left.scope, &left.final_name, &left.id).cmp(&(&right.scope, &right.final_name, &right.id))
        });
        all
    }

    /// Decisions committed in `scope`, in reservation order
    pub fn decisions_in(&self, scope: &RenameScope) -> impl Iterator<Item = &RenameDecision> {
        self.tables
            .get(scope)
            .into_iter()
            .flat_map(|table| table.decisions.values())
    }

    /// All scopes with at least one decision
    pub fn scopes(&self) -> impl Iterator<Item = &RenameScope> {
        self.tables.keys()
    }

    /// `name -> holder` lines for `scope`, sorted by name
    #[must_use]
    pub fn scope_dump(&self, scope: &RenameScope) -> Vec<String> {
        let Some(table) = self.tables.get(scope) else {
            return Vec::new();
        };
        let mut lines: Vec<String> = table
            .holders
            .iter()
            .map(|(name, holder)| format!("{} -> {holder}", self.interner.resolve(name)))
            .collect();
        lines.sort();
        lines
    }

    fn resolve(&self, request: &NameRequest) -> Result<Resolved, RenameError> {
        let table = self.tables.get(&request.scope);
        let group = request.overload_group.as_deref();

        if let (Some(group), Some(table)) = (group, table) {
            if let Some(name) = table.groups.get(group) {
                return Ok(Resolved {
                    final_name: self.interner.resolve(name).to_string(),
                    source: DecisionSource::Automatic,
                    strategy: ConflictStrategy::OverloadShared,
                    sanitized: false,
                    next_suffix: None,
                });
            }
        }

        if !request.verbatim {
            if let Some(name) = self.config.overrides.get(&request.id.to_string()) {
                if self.is_free(table, name, group) {
                    return Ok(Resolved {
                        final_name: name.clone(),
                        source: DecisionSource::Override,
                        strategy: ConflictStrategy::None,
                        sanitized: false,
                        next_suffix: None,
                    });
                }
            }
        }

        let (candidate, source, sanitized) = if request.verbatim {
            (request.base.clone(), DecisionSource::Verbatim, false)
        } else {
            let (styled, sanitized) = self.styled(&request.base, request.kind);
            (styled, DecisionSource::Automatic, sanitized)
        };
        let committed = |final_name: String, strategy: ConflictStrategy, next_suffix: Option<(String, u32)>| Resolved {
            final_name,
            source,
            strategy,
            sanitized,
            next_suffix,
        };

        if self.is_free(table, &candidate, group) {
            return Ok(committed(candidate, ConflictStrategy::None, None));
        }

        if let Some(short_name) = &request.interface_short_name {
            let qualified = format!("{candidate}_{short_name}");
            if self.is_free(table, &qualified, group) {
                return Ok(committed(qualified, ConflictStrategy::InterfaceQualified, None));
            }
        }

        let start = self
            .interner
            .get(&candidate)
            .and_then(|base| table.and_then(|table| table.next_suffix.get(&base)))
            .copied()
            .unwrap_or(2);
        for attempt in 0..self.config.max_suffix_attempts {
            let suffix = start.saturating_add(attempt);
            let suffixed = format!("{candidate}{suffix}");
            if self.is_free(table, &suffixed, group) {
                let next = Some((candidate, suffix.saturating_add(1)));
                return Ok(committed(suffixed, ConflictStrategy::NumericSuffix(suffix), next));
            }
        }

        Err(RenameError::SuffixExhausted {
            scope: request.scope.key(),
            base: candidate,
            attempts: self.config.max_suffix_attempts,
            dump: self.scope_dump(&request.scope),
        })
    }

    /// Name `base` gets when nothing collides: styled, then sanitized
    #[must_use]
    pub fn natural_name(&self, base: &str, kind: NameKind) -> String {
        self.styled(base, kind).0
    }

    fn styled(&self, base: &str, kind: NameKind) -> (String, bool) {
        let style = match kind {
            NameKind::Type => self.config.type_style,
            NameKind::Member => self.config.member_style,
        };
        let styled = style.apply(base);
        match self.reserved.sanitize(&styled) {
            Some(sanitized) => (sanitized, true),
            None => (styled, false),
        }
    }

    fn is_free(&self, table: Option<&ScopeTable>, name: &str, group: Option<&str>) -> bool {
        let Some(table) = table else {
            return true;
        };
        let Some(symbol) = self.interner.get(name) else {
            return true;
        };
        match table.holders.get(&symbol) {
            None => true,
            Some(Holder::Group(holder)) => Some(holder.as_str()) == group,
            Some(Holder::Symbol(_)) => false,
        }
    }
}
