//! The validation-rule chain run before any resolution starts.
//!
//! Rules form a closed set matched exhaustively; every rule that
//! supports the declaration runs, and all their findings are reported
//! together. Tool-wide arguments are validated once per batch by
//! [`validate_tool_arguments`].

use crate::declaration::{Declaration, DeclarationKind};
use crate::error::Diagnostic;
use crate::naming::{self, interpolation_probe, is_valid_name, is_valid_name_prefix};
use crate::options::{BuilderOption, CopyFactoryMode, ToolArguments};
use crate::types::{Primitive, QualifiedName, TypeOracle, TypeRef};

#[derive(Clone, Copy, Debug)]
enum Rule {
    Options,
    SamePackageAccess,
    ClassShape,
    ConstructorShape,
    Kind,
    MethodShape,
}

const RULES: [Rule; 6] = [
    Rule::Options,
    Rule::SamePackageAccess,
    Rule::ClassShape,
    Rule::ConstructorShape,
    Rule::Kind,
    Rule::MethodShape,
];

impl Rule {
    fn supports(self, declaration: &Declaration) -> bool {
        match self {
            Self::Options | Self::SamePackageAccess | Self::Kind => true,
            Self::ClassShape => declaration.kind == DeclarationKind::Class,
            Self::ConstructorShape => declaration.kind == DeclarationKind::Constructor,
            Self::MethodShape => declaration.kind == DeclarationKind::Method,
        }
    }

    fn check(self, declaration: &Declaration, oracle: &dyn TypeOracle) -> Vec<Diagnostic> {
        match self {
            Self::Options => options_rule(declaration),
            Self::SamePackageAccess => same_package_access_rule(declaration, oracle),
            Self::ClassShape => class_shape_rule(declaration),
            Self::ConstructorShape => constructor_shape_rule(declaration, oracle),
            Self::Kind => kind_rule(declaration),
            Self::MethodShape => method_shape_rule(declaration),
        }
    }
}

/// Runs every supporting rule against `declaration` and concatenates
/// the findings. An empty result means the declaration is valid.
#[must_use]
pub fn validate(declaration: &Declaration, oracle: &dyn TypeOracle) -> Vec<Diagnostic> {
    RULES
        .into_iter()
        .filter(|rule| rule.supports(declaration))
        .flat_map(|rule| rule.check(declaration, oracle))
        .collect()
}

fn invalid_option_value(
    declaration: &Declaration,
    option: BuilderOption,
    value: &str,
) -> Diagnostic {
    let noun = if option.is_prefix() {
        "identifier prefix"
    } else {
        "identifier"
    };
    Diagnostic::attached(
        declaration,
        format!(
            "value \"{value}\" of attribute {} is not a permitted {noun}",
            option.attribute()
        ),
    )
}

/// Checks every option value set on the annotation. Templates are
/// probed with a stand-in target name, so template-form values are
/// judged by what they expand to.
fn options_rule(declaration: &Declaration) -> Vec<Diagnostic> {
    let probe = interpolation_probe();
    let spec = &declaration.spec;
    let mut errors = Vec::new();

    let mut check = |option: BuilderOption, value: Option<&str>, valid: fn(&str) -> bool| {
        if let Some(raw) = value
            && !valid(&naming::interpolate(raw, &probe))
        {
            errors.push(invalid_option_value(declaration, option, raw));
        }
    };

    check(
        BuilderOption::ClassName,
        spec.class_name.as_deref(),
        |expanded| expanded.is_empty() || is_valid_name(expanded),
    );
    check(
        BuilderOption::SetterPrefix,
        spec.setter_prefix.as_deref(),
        is_valid_name_prefix,
    );
    check(
        BuilderOption::BuildMethodName,
        spec.build_method_name.as_deref(),
        is_valid_name,
    );
    check(
        BuilderOption::FactoryMethodName,
        spec.factory_method_name.as_deref(),
        is_valid_name,
    );
    check(
        BuilderOption::CopyFactoryMethodName,
        spec.copy_factory_method_name.as_deref(),
        is_valid_name,
    );
    // The copy-factory mode is an enum; any value is acceptable.

    errors
}

fn enclosing_chain_start(declaration: &Declaration) -> Option<QualifiedName> {
    match declaration.kind {
        DeclarationKind::Constructor | DeclarationKind::Method => Some(declaration.owner.clone()),
        _ => declaration.owner.enclosing(),
    }
}

/// The declaration must be usable from anywhere in its own package:
/// not private itself, and not buried inside a private type.
fn same_package_access_rule(
    declaration: &Declaration,
    oracle: &dyn TypeOracle,
) -> Vec<Diagnostic> {
    let mut errors = Vec::new();

    if declaration.visibility.is_private() {
        errors.push(Diagnostic::attached(
            declaration,
            "annotated element must not be private",
        ));
    }

    let mut current = enclosing_chain_start(declaration);
    while let Some(name) = current {
        if oracle
            .definition(&name)
            .is_some_and(|def| def.visibility.is_private())
        {
            errors.push(Diagnostic::attached(
                declaration,
                "annotated element must not be enclosed in a private type",
            ));
            break;
        }
        current = name.enclosing();
    }

    errors
}

fn class_shape_rule(declaration: &Declaration) -> Vec<Diagnostic> {
    if declaration.owner.is_nested() && !declaration.is_static {
        return vec![Diagnostic::attached(
            declaration,
            "annotated class must be static",
        )];
    }
    Vec::new()
}

fn constructor_shape_rule(declaration: &Declaration, oracle: &dyn TypeOracle) -> Vec<Diagnostic> {
    let mut errors = Vec::new();

    if oracle
        .definition(&declaration.owner)
        .is_some_and(|def| def.is_abstract)
    {
        errors.push(Diagnostic::attached(
            declaration,
            "class of annotated constructor must not be abstract",
        ));
    }
    if declaration.parameters.is_empty() {
        errors.push(Diagnostic::attached(
            declaration,
            "annotated constructor must have at least one argument",
        ));
    }

    errors
}

fn kind_rule(declaration: &Declaration) -> Vec<Diagnostic> {
    match declaration.kind {
        DeclarationKind::Class
        | DeclarationKind::Record
        | DeclarationKind::Constructor
        | DeclarationKind::Method => Vec::new(),
        other => vec![Diagnostic::attached(
            declaration,
            format!("unsupported annotated declaration kind: {other}"),
        )],
    }
}

fn returns_void(declaration: &Declaration) -> bool {
    match &declaration.return_type {
        None | Some(TypeRef::Primitive(Primitive::Void)) => true,
        Some(TypeRef::Named { name, .. }) => name.qualified() == "java.lang.Void",
        Some(_) => false,
    }
}

fn method_shape_rule(declaration: &Declaration) -> Vec<Diagnostic> {
    let mut errors = Vec::new();

    if !declaration.is_static {
        errors.push(Diagnostic::attached(
            declaration,
            "annotated method must be static",
        ));
    }
    if declaration.parameters.is_empty() {
        errors.push(Diagnostic::attached(
            declaration,
            "annotated method must have at least one argument",
        ));
    }
    if returns_void(declaration) {
        errors.push(Diagnostic::attached(
            declaration,
            "annotated method must not return void",
        ));
    }

    errors
}

/// Validates the tool-wide argument map once per batch.
///
/// Unknown keys are ignored; recognized keys must carry a permitted
/// identifier (or identifier prefix, or copy-factory mode spelling).
/// The resulting diagnostics carry no declaration.
#[must_use]
pub fn validate_tool_arguments(arguments: &ToolArguments) -> Vec<Diagnostic> {
    let probe = interpolation_probe();
    let mut errors = Vec::new();

    for (key, value) in arguments.iter() {
        let Some(option) = BuilderOption::from_key(key) else {
            continue;
        };

        let expanded = naming::interpolate(value, &probe);
        let problem = match option {
            BuilderOption::CopyFactory => CopyFactoryMode::parse(value)
                .is_none()
                .then_some("is not a recognized copy-factory mode"),
            BuilderOption::SetterPrefix => (!is_valid_name_prefix(&expanded))
                .then_some("is not a permitted identifier prefix"),
            _ => (!is_valid_name(&expanded)).then_some("is not a permitted identifier"),
        };

        if let Some(problem) = problem {
            errors.push(Diagnostic::detached(format!(
                "value \"{value}\" of tool argument {key} {problem}"
            )));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::BuilderSpec;
    use crate::types::{Constructor, Parameter, TypeDef, TypeUniverse, Visibility};

    fn point() -> QualifiedName {
        QualifiedName::top_level("com.acme", "Point")
    }

    fn int() -> TypeRef {
        TypeRef::Primitive(Primitive::Int)
    }

    #[test]
    fn valid_class_declaration_passes() {
        let universe = TypeUniverse::new().with_type(TypeDef::class(point()));
        let decl = Declaration::annotated_class(point());
        assert!(validate(&decl, &universe).is_empty());
    }

    #[test]
    fn bad_option_values_are_all_reported() {
        let decl = Declaration::annotated_class(point()).with_spec(BuilderSpec {
            class_name: Some("1Bad".to_owned()),
            setter_prefix: Some("bad prefix".to_owned()),
            build_method_name: Some("class".to_owned()),
            ..BuilderSpec::default()
        });

        let errors = validate(&decl, &TypeUniverse::new());
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|e| e.declaration().is_some()));
    }

    #[test]
    fn templated_class_name_validates_through_the_probe() {
        let decl = Declaration::annotated_class(point()).with_spec(BuilderSpec {
            class_name: Some("{TargetTypeName}Builder".to_owned()),
            ..BuilderSpec::default()
        });
        assert!(validate(&decl, &TypeUniverse::new()).is_empty());
    }

    #[test]
    fn private_declarations_are_rejected() {
        let mut decl = Declaration::annotated_class(point());
        decl.visibility = Visibility::Private;

        let errors = validate(&decl, &TypeUniverse::new());
        assert_eq!(errors.len(), 1);
        assert!(errors.iter().any(|e| e.message().contains("must not be private")));
    }

    #[test]
    fn private_enclosing_types_are_detected_transitively() {
        let outer = point();
        let mid = outer.member("Mid");
        let inner = mid.member("Inner");
        let universe = TypeUniverse::new()
            .with_type(TypeDef::class(outer).with_visibility(Visibility::Private))
            .with_type(TypeDef::class(mid.clone()))
            .with_type(TypeDef::class(inner.clone()));

        let mut decl = Declaration::annotated_class(inner);
        decl.is_static = true;
        let errors = validate(&decl, &universe);
        assert!(
            errors
                .iter()
                .any(|e| e.message().contains("enclosed in a private type"))
        );
    }

    #[test]
    fn non_static_nested_class_is_rejected() {
        let inner = point().member("Inner");
        let decl = Declaration::annotated_class(inner);

        let errors = validate(&decl, &TypeUniverse::new());
        assert!(errors.iter().any(|e| e.message() == "annotated class must be static"));
    }

    #[test]
    fn constructor_in_abstract_class_collects_both_findings() {
        let universe =
            TypeUniverse::new().with_type(TypeDef::class(point()).with_abstract(true));
        let decl = Declaration::annotated_constructor(point(), vec![]);

        let messages: Vec<_> = validate(&decl, &universe)
            .into_iter()
            .map(|e| e.message().to_owned())
            .collect();
        assert_eq!(
            messages,
            vec![
                "class of annotated constructor must not be abstract".to_owned(),
                "annotated constructor must have at least one argument".to_owned(),
            ]
        );
    }

    #[test]
    fn unsupported_kinds_are_rejected() {
        let mut decl = Declaration::annotated_class(point());
        decl.kind = DeclarationKind::Interface;

        let errors = validate(&decl, &TypeUniverse::new());
        assert!(
            errors
                .iter()
                .any(|e| e.message() == "unsupported annotated declaration kind: interface")
        );
    }

    #[test]
    fn instance_or_void_factory_methods_are_rejected() {
        let mut decl = Declaration::annotated_factory(
            QualifiedName::top_level("com.acme", "Points"),
            "of",
            vec![Parameter::new("x", int())],
            TypeRef::Primitive(Primitive::Void),
        );
        decl.is_static = false;

        let messages: Vec<_> = validate(&decl, &TypeUniverse::new())
            .into_iter()
            .map(|e| e.message().to_owned())
            .collect();
        assert_eq!(
            messages,
            vec![
                "annotated method must be static".to_owned(),
                "annotated method must not return void".to_owned(),
            ]
        );
    }

    #[test]
    fn tool_arguments_validate_per_option_shape() {
        let arguments = ToolArguments::new()
            .with("builder.buildMethodName", "7bad")
            .with("builder.setterPrefix", "")
            .with("builder.copyFactoryMethod", "sometimes")
            .with("unrelated.key", "!!");

        let errors = validate_tool_arguments(&arguments);
        let messages: Vec<_> = errors.iter().map(Diagnostic::message).collect();
        assert_eq!(
            messages,
            vec![
                "value \"7bad\" of tool argument builder.buildMethodName is not a permitted identifier",
                "value \"sometimes\" of tool argument builder.copyFactoryMethod is not a recognized copy-factory mode",
            ]
        );
        assert!(errors.iter().all(|e| e.declaration().is_none()));
    }

    #[test]
    fn records_validate_like_classes() {
        let universe = TypeUniverse::new().with_type(TypeDef::record(
            point(),
            vec![Parameter::new("x", int())],
        ));
        let decl = Declaration::annotated_record(point());
        assert!(validate(&decl, &universe).is_empty());
    }

    #[test]
    fn constructor_declaration_with_params_passes() {
        let universe = TypeUniverse::new().with_type(
            TypeDef::class(point())
                .with_constructor(Constructor::new(vec![Parameter::new("x", int())])),
        );
        let decl =
            Declaration::annotated_constructor(point(), vec![Parameter::new("x", int())]);
        assert!(validate(&decl, &universe).is_empty());
    }
}
