//! Escaper: deep-copies a value tree, prefixing every escape-set character in
//! every string leaf with a backslash.
//!
//! Escaping is NOT idempotent: running it twice doubles the markers. Callers
//! escape exactly once, which `EscapedResume` enforces at the type level.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

/// The characters LaTeX treats specially in running text.
pub const LATEX_SPECIAL_CHARS: &[char] = &['&', '%', '$', '#', '_', '{', '}', '~', '^', '\\'];

const ESCAPE_PREFIX: char = '\\';

/// A set of characters that must be escaped before they can appear literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeSet {
    chars: BTreeSet<char>,
}

impl EscapeSet {
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        Self {
            chars: chars.into_iter().collect(),
        }
    }

    /// The full LaTeX special-character set.
    pub fn latex() -> Self {
        Self::new(LATEX_SPECIAL_CHARS.iter().copied())
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// Escapes a single string, character by character.
    pub fn escape_str(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        for c in value.chars() {
            if self.contains(c) {
                out.push(ESCAPE_PREFIX);
            }
            out.push(c);
        }
        out
    }
}

impl Default for EscapeSet {
    fn default() -> Self {
        Self::latex()
    }
}

/// Structural clone-and-escape. Implemented for string leaves, containers,
/// arbitrary JSON trees, and the typed resume model.
pub trait Escape: Sized {
    fn escaped(&self, set: &EscapeSet) -> Self;
}

/// Returns an escaped deep copy of `tree`. Never mutates the input.
pub fn escape<T: Escape>(tree: &T, set: &EscapeSet) -> T {
    tree.escaped(set)
}

impl Escape for String {
    fn escaped(&self, set: &EscapeSet) -> Self {
        set.escape_str(self)
    }
}

impl<T: Escape> Escape for Option<T> {
    fn escaped(&self, set: &EscapeSet) -> Self {
        self.as_ref().map(|v| v.escaped(set))
    }
}

impl<T: Escape> Escape for Vec<T> {
    fn escaped(&self, set: &EscapeSet) -> Self {
        self.iter().map(|v| v.escaped(set)).collect()
    }
}

impl Escape for Value {
    fn escaped(&self, set: &EscapeSet) -> Self {
        match self {
            Value::String(s) => Value::String(set.escape_str(s)),
            Value::Array(items) => Value::Array(items.escaped(set)),
            Value::Object(map) => Value::Object(map.escaped(set)),
            Value::Null | Value::Bool(_) | Value::Number(_) => self.clone(),
        }
    }
}

impl Escape for Map<String, Value> {
    // Keys are kept verbatim; only values are walked.
    fn escaped(&self, set: &EscapeSet) -> Self {
        self.iter()
            .map(|(k, v)| (k.clone(), v.escaped(set)))
            .collect()
    }
}

/// Implements `Escape` for a plain struct by escaping every listed field.
/// The struct literal is exhaustive, so a new field fails to compile until listed.
macro_rules! impl_escape {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl $crate::render::escape::Escape for $ty {
            fn escaped(&self, set: &$crate::render::escape::EscapeSet) -> Self {
                Self {
                    $($field: self.$field.escaped(set),)*
                }
            }
        }
    };
}

pub(crate) use impl_escape;
