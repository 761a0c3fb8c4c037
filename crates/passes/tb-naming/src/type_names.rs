//! Requested names derived from source names

use tb_symbols::{MemberInfo, TypeSymbol};

/// Marker appended to view members whose natural name is taken on the class surface
pub const VIEW_MARKER: &str = "$view";

/// Requested base name of a type
///
/// The arity marker becomes `_N` and nested types are qualified by their declaring
/// chain, so ``List`1`` requests `List_1` and `Outer+Inner` requests `Outer_Inner`.
#[must_use]
pub fn type_base_name(ty: &TypeSymbol) -> String {
    identifier(ty.stable_id.simple_name())
}

/// Requested base name of a member
///
/// Explicit implementations carry their interface-qualified metadata name
/// (`System.IDisposable.Dispose`); only the last segment is requested.
#[must_use]
pub fn member_base_name(info: &MemberInfo) -> String {
    let name = if info.is_explicit_implementation() {
        info.name.rsplit('.').next().unwrap_or(&info.name)
    } else {
        &info.name
    };
    identifier(name)
}

/// Replace every character that cannot appear in an identifier with `_`
fn identifier(name: &str) -> String {
    let mut sanitized: String = name
        .chars()
        .map(|ch| if ch.is_alphanumeric() || ch == '_' || ch == '$' { ch } else { '_' })
        .collect();
    if sanitized.is_empty() || sanitized.starts_with(|ch: char| ch.is_ascii_digit()) {
        sanitized.insert(0, '_');
    }
    sanitized
}
