//! Human-readable labels derived from field names.

/// Turns a plural field name into the noun used for one of its items.
pub trait Inflector: Send + Sync {
    fn singular(&self, word: &str) -> String;
}

/// Minimal English singularization: `entries` -> `entry`, `options` ->
/// `option`. Words ending in `ss` are left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishInflector;

impl Inflector for EnglishInflector {
    fn singular(&self, word: &str) -> String {
        if let Some(stem) = word.strip_suffix("ies").filter(|stem| !stem.is_empty()) {
            return format!("{stem}y");
        }
        if word.ends_with("ss") {
            return word.to_owned();
        }
        match word.strip_suffix('s') {
            Some(stem) if !stem.is_empty() => stem.to_owned(),
            _ => word.to_owned(),
        }
    }
}

/// `someTitle` -> `Some title`.
///
/// The first character is uppercased; every later uppercase character is
/// lowercased and preceded by a space.
pub fn decamelize_and_capitalize(word: &str) -> String {
    let mut out = String::with_capacity(word.len() + 4);
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
    }
    for ch in chars {
        if ch.is_uppercase() {
            out.push(' ');
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Label of the `index`-th item (zero-based) of the array stored under
/// `field`: `("options", 0)` -> `Option 1`.
pub(crate) fn item_label(inflector: &dyn Inflector, field: &str, index: usize) -> String {
    decamelize_and_capitalize(&format!("{} {}", inflector.singular(field), index + 1))
}
