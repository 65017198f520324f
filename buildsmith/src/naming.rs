//! Name templates, identifier validity and generated-name assembly.
//!
//! Option values may carry placeholder tokens that expand against the
//! concrete target type once it is known. Expansion happens after
//! option precedence is resolved and is idempotent on values without
//! placeholders.

use serde::Serialize;

use crate::types::QualifiedName;

/// Placeholder expanding to the target type's full simple name
/// (nested simple names joined with `_`, outermost first).
pub const TARGET_TYPE_NAME: &str = "{TargetTypeName}";

/// Placeholder expanding to the target type's full simple name with
/// its first character lower-cased.
pub const LOWER_CASE_TARGET_TYPE_NAME: &str = "{lowerCaseTargetTypeName}";

/// Reserved words of the generated language; never valid as names.
const RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while", "true", "false", "null",
];

/// Returns `string` with its first character upper-cased.
#[must_use]
pub fn capitalize(string: &str) -> String {
    let mut chars = string.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Returns `string` with its first character lower-cased.
#[must_use]
pub fn decapitalize(string: &str) -> String {
    let mut chars = string.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Expands both placeholder tokens in `template` against `target`.
#[must_use]
pub fn interpolate(template: &str, target: &QualifiedName) -> String {
    let full_simple = target.full_simple();
    template
        .replace(TARGET_TYPE_NAME, &full_simple)
        .replace(LOWER_CASE_TARGET_TYPE_NAME, &decapitalize(&full_simple))
}

/// A stand-in target used to probe template validity before the real
/// target type is known.
pub(crate) fn interpolation_probe() -> QualifiedName {
    QualifiedName::top_level("", "Target")
}

fn is_identifier(string: &str) -> bool {
    let mut chars = string.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let starts = unicode_ident::is_xid_start(first) || first == '_' || first == '$';
    starts && chars.all(|c| unicode_ident::is_xid_continue(c) || c == '$')
}

/// Whether `value` is usable as a declared name: identifier characters
/// and not a reserved word.
#[must_use]
pub fn is_valid_name(value: &str) -> bool {
    is_identifier(value) && !RESERVED.contains(&value)
}

/// Whether `value` is usable as a method-name prefix. The empty prefix
/// is allowed; reserved words are too, since a prefix never stands
/// alone.
#[must_use]
pub fn is_valid_name_prefix(value: &str) -> bool {
    value.is_empty() || is_identifier(value)
}

/// Composes a setter name: prefix + capitalized property name, or the
/// bare property name when the prefix is empty.
#[must_use]
pub fn compose_setter_name(prefix: &str, property: &str) -> String {
    if prefix.is_empty() {
        property.to_owned()
    } else {
        format!("{prefix}{}", capitalize(property))
    }
}

/// The generated builder's own name: the enclosing package plus the
/// resolved simple name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratedName {
    package: String,
    simple_name: String,
}

impl GeneratedName {
    pub(crate) fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            simple_name: simple_name.into(),
        }
    }

    /// The package the builder is generated into.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The builder's simple name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// The builder's fully-qualified dotted name.
    #[must_use]
    pub fn qualified(&self) -> String {
        if self.package.is_empty() {
            self.simple_name.clone()
        } else {
            format!("{}.{}", self.package, self.simple_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("point", "Point")]
    #[case("Point", "Point")]
    #[case("", "")]
    #[case("x", "X")]
    fn capitalizes_first_character(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(capitalize(input), expected);
    }

    #[test]
    fn decapitalizes_single_letter_name() {
        assert_eq!(decapitalize("A"), "a");
    }

    #[test]
    fn interpolation_expands_both_tokens() {
        let target = QualifiedName::top_level("com.acme", "Outer").member("Inner");
        assert_eq!(
            interpolate("{TargetTypeName}Builder", &target),
            "Outer_InnerBuilder"
        );
        assert_eq!(
            interpolate("{lowerCaseTargetTypeName}Of", &target),
            "outer_InnerOf"
        );
    }

    #[test]
    fn interpolation_is_idempotent_without_tokens() {
        let target = QualifiedName::top_level("com.acme", "Point");
        assert_eq!(interpolate("PointBuilder", &target), "PointBuilder");
        assert_eq!(
            interpolate(&interpolate("{TargetTypeName}", &target), &target),
            "Point"
        );
    }

    #[rstest]
    #[case("build", true)]
    #[case("_hidden", true)]
    #[case("$synthetic", true)]
    #[case("class", false)]
    #[case("null", false)]
    #[case("", false)]
    #[case("1st", false)]
    #[case("with-dash", false)]
    fn name_validity(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_name(value), expected);
    }

    #[rstest]
    #[case("", true)]
    #[case("set", true)]
    #[case("with", true)]
    #[case("7x", false)]
    fn prefix_validity(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_name_prefix(value), expected);
    }

    #[rstest]
    #[case("", "x", "x")]
    #[case("set", "x", "setX")]
    #[case("with", "firstName", "withFirstName")]
    fn setter_names(#[case] prefix: &str, #[case] property: &str, #[case] expected: &str) {
        assert_eq!(compose_setter_name(prefix, property), expected);
    }
}
