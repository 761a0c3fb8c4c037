//! Identifier style transforms

use serde::{Deserialize, Serialize};

/// Case style applied to requested names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameStyle {
    /// Keep the source spelling
    #[default]
    Preserve,
    /// `camelCase`
    CamelCase,
    /// `PascalCase`
    PascalCase,
}

impl NameStyle {
    /// Apply the style to `name`
    #[must_use]
    pub fn apply(self, name: &str) -> String {
        match self {
            Self::Preserve => name.to_string(),
            Self::CamelCase => camel_case(name),
            Self::PascalCase => pascal_case(name),
        }
    }
}

/// Lower-case the leading capital run; for acronyms the last capital starts the next word
fn camel_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let upper_run = chars.iter().take_while(|ch| ch.is_uppercase()).count();
    let lowered = match upper_run {
        0 => return name.to_string(),
        run if run == chars.len() => run,
        1 => 1,
        run if chars[run].is_lowercase() => run - 1,
        run => run,
    };
    let mut styled = String::with_capacity(name.len());
    for (idx, ch) in chars.iter().enumerate() {
        if idx < lowered {
            styled.extend(ch.to_lowercase());
        } else {
            styled.push(*ch);
        }
    }
    styled
}

fn pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(NameStyle::CamelCase.apply("Value"), "value");
        assert_eq!(NameStyle::CamelCase.apply("IOStream"), "ioStream");
        assert_eq!(NameStyle::CamelCase.apply("URL"), "url");
        assert_eq!(NameStyle::CamelCase.apply("getValue"), "getValue");
        assert_eq!(NameStyle::CamelCase.apply("X2Y"), "x2Y");
        assert_eq!(NameStyle::CamelCase.apply(""), "");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(NameStyle::PascalCase.apply("value"), "Value");
        assert_eq!(NameStyle::PascalCase.apply(""), "");
    }

    #[test]
    fn test_preserve() {
        assert_eq!(NameStyle::Preserve.apply("get_Item"), "get_Item");
    }
}
