//! The six-knob option surface and its precedence chain.
//!
//! Every option resolves independently through three tiers, highest
//! first: the value on the declaration's annotation, the tool-wide
//! argument, the built-in default. A resolved set of options therefore
//! never has gaps.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::declaration::Declaration;
use crate::naming::{self, GeneratedName};
use crate::types::QualifiedName;

/// Copy-factory generation mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum CopyFactoryMode {
    /// No copy factory is generated.
    Disabled,
    /// A copy factory is generated; a missing accessor is an error.
    #[default]
    EnabledStrict,
    /// A copy factory is generated only when every property has an
    /// accessor; missing accessors are tolerated.
    EnabledLenient,
}

impl CopyFactoryMode {
    /// Parses a tool-argument spelling. Case and `-`/`_` separators
    /// are ignored, so `enabled-strict`, `ENABLED_STRICT` and
    /// `enabledStrict` all parse.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized: String = value
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "disabled" => Some(Self::Disabled),
            "enabledstrict" => Some(Self::EnabledStrict),
            "enabledlenient" => Some(Self::EnabledLenient),
            _ => None,
        }
    }

    /// The canonical tool-argument spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::EnabledStrict => "enabled-strict",
            Self::EnabledLenient => "enabled-lenient",
        }
    }
}

impl fmt::Display for CopyFactoryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed set of configurable knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuilderOption {
    /// Name of the generated builder class (template form allowed).
    ClassName,
    /// Prefix composed into setter names; may be empty.
    SetterPrefix,
    /// Name of the method that produces the target instance.
    BuildMethodName,
    /// Name of the static method returning a fresh builder.
    FactoryMethodName,
    /// Copy-factory generation mode.
    CopyFactory,
    /// Name of the copy-factory method.
    CopyFactoryMethodName,
}

impl BuilderOption {
    /// Every option, in its documented order.
    pub const ALL: [Self; 6] = [
        Self::ClassName,
        Self::SetterPrefix,
        Self::BuildMethodName,
        Self::FactoryMethodName,
        Self::CopyFactory,
        Self::CopyFactoryMethodName,
    ];

    /// The tool-argument key for this option.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ClassName => "builder.className",
            Self::SetterPrefix => "builder.setterPrefix",
            Self::BuildMethodName => "builder.buildMethodName",
            Self::FactoryMethodName => "builder.factoryMethodName",
            Self::CopyFactory => "builder.copyFactoryMethod",
            Self::CopyFactoryMethodName => "builder.copyFactoryMethodName",
        }
    }

    /// The annotation attribute name for this option.
    #[must_use]
    pub const fn attribute(self) -> &'static str {
        match self {
            Self::ClassName => "className",
            Self::SetterPrefix => "setterPrefix",
            Self::BuildMethodName => "buildMethodName",
            Self::FactoryMethodName => "factoryMethodName",
            Self::CopyFactory => "copyFactoryMethod",
            Self::CopyFactoryMethodName => "copyFactoryMethodName",
        }
    }

    /// The built-in default, in tool-argument spelling.
    #[must_use]
    pub const fn default_value(self) -> &'static str {
        match self {
            Self::ClassName => "{TargetTypeName}Builder",
            Self::SetterPrefix => "",
            Self::BuildMethodName => "build",
            Self::FactoryMethodName => "create",
            Self::CopyFactory => "enabled-strict",
            Self::CopyFactoryMethodName => "from",
        }
    }

    /// Whether the value is a method-name prefix rather than a full
    /// name.
    #[must_use]
    pub const fn is_prefix(self) -> bool {
        matches!(self, Self::SetterPrefix)
    }

    /// Looks an option up by its tool-argument key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.key() == key)
    }
}

/// Which tier supplied an option value.
#[derive(Clone, Copy, Debug)]
enum Provenance {
    Annotation,
    ToolArgument,
    Default,
}

/// Tool-wide option values, keyed by [`BuilderOption::key`] strings.
///
/// Unknown keys are carried but never read; validation ignores them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolArguments(BTreeMap<String, String>);

impl ToolArguments {
    /// An empty argument set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Sets a raw key/value pair, builder-style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// The raw value for `option`, if one was supplied.
    #[must_use]
    pub fn value_of(&self, option: BuilderOption) -> Option<&str> {
        self.0.get(option.key()).map(String::as_str)
    }

    /// Iterates over every supplied key/value pair.
    #[must_use = "iterators should be consumed to inspect arguments"]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ToolArguments {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// The six option values after precedence resolution, before
/// placeholder interpolation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RawOptions {
    /// Generated-class name (template form allowed).
    pub class_name: String,
    /// Setter-name prefix; empty means bare setters.
    pub setter_prefix: String,
    /// Build-method name.
    pub build_method_name: String,
    /// Factory-method name.
    pub factory_method_name: String,
    /// Copy-factory generation mode.
    pub copy_factory: CopyFactoryMode,
    /// Copy-factory method name.
    pub copy_factory_method_name: String,
}

impl RawOptions {
    /// Expands placeholders against the concrete target type.
    #[must_use]
    pub fn interpolated(self, target: &QualifiedName) -> ResolvedOptions {
        ResolvedOptions {
            class_name: naming::interpolate(&self.class_name, target),
            setter_prefix: naming::interpolate(&self.setter_prefix, target),
            build_method_name: naming::interpolate(&self.build_method_name, target),
            factory_method_name: naming::interpolate(&self.factory_method_name, target),
            copy_factory: self.copy_factory,
            copy_factory_method_name: naming::interpolate(&self.copy_factory_method_name, target),
            raw: self,
        }
    }
}

/// The final option values, with placeholders expanded against the
/// target type. Wraps the originating [`RawOptions`] for traceability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedOptions {
    /// Generated-class simple name.
    pub class_name: String,
    /// Setter-name prefix; empty means bare setters.
    pub setter_prefix: String,
    /// Build-method name.
    pub build_method_name: String,
    /// Factory-method name.
    pub factory_method_name: String,
    /// Copy-factory generation mode.
    pub copy_factory: CopyFactoryMode,
    /// Copy-factory method name.
    pub copy_factory_method_name: String,
    /// The pre-interpolation values these were derived from.
    pub raw: RawOptions,
}

impl ResolvedOptions {
    /// The generated builder's name, placed in `package` (the
    /// annotated declaration's package).
    #[must_use]
    pub fn generated_name_in(&self, package: &str) -> GeneratedName {
        GeneratedName::new(package, self.class_name.clone())
    }
}

fn pick(
    option: BuilderOption,
    annotation: Option<&str>,
    tool: &ToolArguments,
) -> (String, Provenance) {
    annotation.map_or_else(
        || {
            tool.value_of(option).map_or_else(
                || (option.default_value().to_owned(), Provenance::Default),
                |value| (value.to_owned(), Provenance::ToolArgument),
            )
        },
        |value| (value.to_owned(), Provenance::Annotation),
    )
}

fn pick_mode(annotation: Option<CopyFactoryMode>, tool: &ToolArguments) -> (CopyFactoryMode, Provenance) {
    if let Some(mode) = annotation {
        return (mode, Provenance::Annotation);
    }
    if let Some(mode) = tool
        .value_of(BuilderOption::CopyFactory)
        .and_then(CopyFactoryMode::parse)
    {
        return (mode, Provenance::ToolArgument);
    }
    (CopyFactoryMode::default(), Provenance::Default)
}

/// Resolves the raw option values for one declaration.
#[must_use]
pub fn resolve_raw(declaration: &Declaration, tool: &ToolArguments) -> RawOptions {
    let spec = &declaration.spec;
    let resolved_from = |option: BuilderOption, annotation: Option<&str>| {
        let (value, provenance) = pick(option, annotation, tool);
        debug!(
            option = option.key(),
            value = %value,
            provenance = ?provenance,
            "resolved builder option"
        );
        value
    };

    let class_name = resolved_from(BuilderOption::ClassName, spec.class_name.as_deref());
    let setter_prefix = resolved_from(BuilderOption::SetterPrefix, spec.setter_prefix.as_deref());
    let build_method_name = resolved_from(
        BuilderOption::BuildMethodName,
        spec.build_method_name.as_deref(),
    );
    let factory_method_name = resolved_from(
        BuilderOption::FactoryMethodName,
        spec.factory_method_name.as_deref(),
    );
    let copy_factory_method_name = resolved_from(
        BuilderOption::CopyFactoryMethodName,
        spec.copy_factory_method_name.as_deref(),
    );
    let (copy_factory, provenance) = pick_mode(spec.copy_factory, tool);
    debug!(
        option = BuilderOption::CopyFactory.key(),
        value = %copy_factory,
        provenance = ?provenance,
        "resolved builder option"
    );

    RawOptions {
        class_name,
        setter_prefix,
        build_method_name,
        factory_method_name,
        copy_factory,
        copy_factory_method_name,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::declaration::{BuilderSpec, Declaration};
    use crate::types::QualifiedName;

    fn point() -> Declaration {
        Declaration::annotated_class(QualifiedName::top_level("com.acme", "Point"))
    }

    #[test]
    fn defaults_fill_every_gap() {
        let raw = resolve_raw(&point(), &ToolArguments::new());

        assert_eq!(raw.class_name, "{TargetTypeName}Builder");
        assert_eq!(raw.setter_prefix, "");
        assert_eq!(raw.build_method_name, "build");
        assert_eq!(raw.factory_method_name, "create");
        assert_eq!(raw.copy_factory, CopyFactoryMode::EnabledStrict);
        assert_eq!(raw.copy_factory_method_name, "from");
    }

    #[test]
    fn tool_argument_overrides_default() {
        let tool = ToolArguments::new().with("builder.buildMethodName", "assemble");
        let raw = resolve_raw(&point(), &tool);
        assert_eq!(raw.build_method_name, "assemble");
    }

    #[test]
    fn annotation_overrides_tool_argument() {
        let tool = ToolArguments::new().with("builder.buildMethodName", "assemble");
        let decl = point().with_spec(BuilderSpec {
            build_method_name: Some("construct".to_owned()),
            ..BuilderSpec::default()
        });

        let raw = resolve_raw(&decl, &tool);
        assert_eq!(raw.build_method_name, "construct");
    }

    #[test]
    fn mode_precedence_matches_string_options() {
        let tool = ToolArguments::new().with("builder.copyFactoryMethod", "disabled");
        assert_eq!(
            resolve_raw(&point(), &tool).copy_factory,
            CopyFactoryMode::Disabled
        );

        let decl = point().with_spec(BuilderSpec {
            copy_factory: Some(CopyFactoryMode::EnabledLenient),
            ..BuilderSpec::default()
        });
        assert_eq!(
            resolve_raw(&decl, &tool).copy_factory,
            CopyFactoryMode::EnabledLenient
        );
    }

    #[rstest]
    #[case("disabled", Some(CopyFactoryMode::Disabled))]
    #[case("ENABLED_STRICT", Some(CopyFactoryMode::EnabledStrict))]
    #[case("enabledLenient", Some(CopyFactoryMode::EnabledLenient))]
    #[case("sometimes", None)]
    fn mode_spellings(#[case] value: &str, #[case] expected: Option<CopyFactoryMode>) {
        assert_eq!(CopyFactoryMode::parse(value), expected);
    }

    #[test]
    fn interpolation_wraps_raw_values() {
        let target = QualifiedName::top_level("com.acme", "Point");
        let raw = resolve_raw(&point(), &ToolArguments::new());
        let resolved = raw.clone().interpolated(&target);

        assert_eq!(resolved.class_name, "PointBuilder");
        assert_eq!(resolved.raw, raw);
        assert_eq!(
            resolved.generated_name_in("com.acme").qualified(),
            "com.acme.PointBuilder"
        );
    }
}
