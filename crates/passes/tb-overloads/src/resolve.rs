//! Per-bucket conflict resolution

use crate::bucket::{Candidate, ErasureKey};
use indexmap::IndexMap;
use tb_ids::MemberStableId;
use tb_symbols::EmitScope;

/// How a bucket conflict was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// Members differing only by return type; losers moved to their views
    ReturnType,
    /// Members differing only by parameter modifiers; losers dropped
    ModifierOnly,
}

/// Outcome of one conflict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Bucket the conflict was found in
    pub key: ErasureKey,
    /// Kind of conflict
    pub kind: ConflictKind,
    /// Member kept on the primary surface
    pub kept: MemberStableId,
    /// Members moved off the primary surface
    pub demoted: Vec<MemberStableId>,
}

impl Resolution {
    /// Scope the demoted members move to
    #[must_use]
    pub fn demoted_scope(&self) -> EmitScope {
        match self.kind {
            ConflictKind::ReturnType => EmitScope::ViewOnly,
            ConflictKind::ModifierOnly => EmitScope::Omitted,
        }
    }
}

/// Resolve every conflict in one bucket
///
/// Differing return types leave exactly one member on the primary surface: a member
/// that is not an explicit implementation if there is one, then the earliest declared,
/// then the smallest identity. Otherwise members whose parameter types match after
/// erasing by-ref keep the widest one: fewest by-ref parameters, then fewest
/// constraints, then declaration order and identity.
#[must_use]
pub fn resolve_bucket(key: &ErasureKey, candidates: &[Candidate]) -> Vec<Resolution> {
    if candidates.len() < 2 {
        return Vec::new();
    }

    let has_return_conflict = candidates
        .iter()
        .any(|candidate| candidate.return_type != candidates[0].return_type);
    if has_return_conflict {
        return pick(key, ConflictKind::ReturnType, candidates.iter(), |candidate| {
            (
                candidate.is_explicit,
                0,
                0,
                candidate.declaration_order,
                candidate.id.clone(),
            )
        })
        .into_iter()
        .collect();
    }

    let mut by_parameters: IndexMap<&[String], Vec<&Candidate>> = IndexMap::new();
    for candidate in candidates {
        by_parameters
            .entry(candidate.erased_parameters.as_slice())
            .or_default()
            .push(candidate);
    }
    by_parameters
        .into_values()
        .filter(|group| group.len() > 1)
        .filter_map(|group| {
            pick(key, ConflictKind::ModifierOnly, group.into_iter(), |candidate| {
                (
                    false,
                    candidate.by_ref_count,
                    candidate.constraint_count,
                    candidate.declaration_order,
                    candidate.id.clone(),
                )
            })
        })
        .collect()
}

type Rank = (bool, usize, usize, u32, MemberStableId);

fn pick<'candidate>(
    key: &ErasureKey,
    kind: ConflictKind,
    group: impl Iterator<Item = &'candidate Candidate>,
    rank: impl Fn(&Candidate) -> Rank,
) -> Option<Resolution> {
    let mut ranked: Vec<(Rank, &Candidate)> = group.map(|candidate| (rank(candidate), candidate)).collect();
    ranked.sort_by(|(left, _), (right, _)| left.cmp(right));
    let mut ranked = ranked.into_iter().map(|(_, candidate)| candidate.id.clone());
    let kept = ranked.next()?;
    let demoted: Vec<_> = ranked.collect();
    if demoted.is_empty() {
        return None;
    }
    Some(Resolution {
        key: key.clone(),
        kind,
        kept,
        demoted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tb_symbols::MemberKind;

    fn key() -> ErasureKey {
        ErasureKey {
            kind: MemberKind::Method,
            name: "Value".to_string(),
            generic_arity: 0,
            param_count: 0,
            is_static: false,
        }
    }

    fn candidate(signature: &str, return_type: &str, order: u32) -> Candidate {
        Candidate {
            id: MemberStableId::new("app", "App.Box", "Value", signature),
            return_type: return_type.to_string(),
            erased_parameters: Vec::new(),
            by_ref_count: 0,
            constraint_count: 0,
            is_explicit: false,
            declaration_order: order,
        }
    }

    #[test]
    fn test_single_member_has_no_conflict() {
        assert!(resolve_bucket(&key(), &[candidate("()", "System.Int32", 0)]).is_empty());
    }

    #[test]
    fn test_return_conflict_prefers_non_explicit() {
        let mut explicit = candidate("():System.Object", "System.Object", 0);
        explicit.is_explicit = true;
        let plain = candidate("():System.Int32", "System.Int32", 1);

        let resolutions = resolve_bucket(&key(), &[explicit.clone(), plain.clone()]);
        assert_eq!(resolutions.len(), 1);
        assert_eq!(resolutions[0].kind, ConflictKind::ReturnType);
        assert_eq!(resolutions[0].kept, plain.id);
        assert_eq!(resolutions[0].demoted, vec![explicit.id]);
        assert_eq!(resolutions[0].demoted_scope(), EmitScope::ViewOnly);
    }

    #[test]
    fn test_return_conflict_falls_back_to_declaration_order() {
        let first = candidate("():System.Int32", "System.Int32", 3);
        let second = candidate("():System.Int64", "System.Int64", 1);
        let resolutions = resolve_bucket(&key(), &[first, second.clone()]);
        assert_eq!(resolutions[0].kept, second.id);
    }

    #[test]
    fn test_modifier_only_keeps_widest() {
        let mut by_ref = candidate("(System.Int32&)", "System.Void", 0);
        by_ref.erased_parameters = vec!["System.Int32".to_string()];
        by_ref.by_ref_count = 1;
        let mut by_value = candidate("(System.Int32)", "System.Void", 1);
        by_value.erased_parameters = vec!["System.Int32".to_string()];
        let mut other = candidate("(System.String)", "System.Void", 2);
        other.erased_parameters = vec!["System.String".to_string()];

        let resolutions = resolve_bucket(&key(), &[by_ref.clone(), by_value.clone(), other]);
        assert_eq!(resolutions.len(), 1);
        assert_eq!(resolutions[0].kind, ConflictKind::ModifierOnly);
        assert_eq!(resolutions[0].kept, by_value.id);
        assert_eq!(resolutions[0].demoted, vec![by_ref.id]);
        assert_eq!(resolutions[0].demoted_scope(), EmitScope::Omitted);
    }
}
