//! Reserved words of the target language

use rustc_hash::FxHashSet;

/// Keywords, strict-mode reserved words and contextual keywords that cannot be used
/// as declaration names
pub const TARGET_RESERVED_WORDS: &[&str] = &[
    "abstract", "any", "arguments", "as", "async", "await", "bigint", "boolean", "break",
    "case", "catch", "class", "const", "constructor", "continue", "debugger", "declare",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false",
    "finally", "for", "from", "function", "get", "if", "implements", "import", "in",
    "infer", "instanceof", "interface", "is", "keyof", "let", "module", "namespace",
    "never", "new", "null", "number", "object", "of", "package", "private", "protected",
    "public", "readonly", "require", "return", "set", "static", "string", "super",
    "switch", "symbol", "this", "throw", "true", "try", "type", "typeof", "undefined",
    "unique", "unknown", "var", "void", "while", "with", "yield",
];

/// Set of words a final name may never equal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedWords {
    words: FxHashSet<String>,
}

impl ReservedWords {
    /// The target language's reserved words plus `extra`
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words: FxHashSet<String> = TARGET_RESERVED_WORDS.iter().map(|word| (*word).to_string()).collect();
        words.extend(extra.into_iter().map(Into::into));
        Self { words }
    }

    /// Whether `name` is reserved; the comparison is case-sensitive
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.words.contains(name)
    }

    /// `name` with `_` appended while it is reserved
    #[must_use]
    pub fn sanitize(&self, name: &str) -> Option<String> {
        if !self.contains(name) {
            return None;
        }
        let mut sanitized = format!("{name}_");
        while self.contains(&sanitized) {
            sanitized.push('_');
        }
        Some(sanitized)
    }
}

impl Default for ReservedWords {
    fn default() -> Self {
        Self::with_extra(Vec::<String>::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_appends_underscore() {
        let reserved = ReservedWords::default();
        assert_eq!(reserved.sanitize("delete"), Some("delete_".to_string()));
        assert_eq!(reserved.sanitize("Delete"), None);
    }

    #[test]
    fn test_extra_words() {
        let reserved = ReservedWords::with_extra(["Object", "Object_"]);
        assert!(reserved.contains("Object"));
        assert_eq!(reserved.sanitize("Object"), Some("Object__".to_string()));
    }
}
