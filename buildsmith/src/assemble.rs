//! Model assembly: the orchestrator that turns one valid declaration
//! into an immutable generation model.
//!
//! One invocation runs validate → creator resolution → option
//! resolution → per-parameter member assembly → type registration, in
//! that order, and either returns the model or every diagnostic the
//! failing stage produced. Each invocation owns a fresh
//! [`TypeNameRegistry`], so ambiguity is scoped to one generated file.

use serde::Serialize;
use tracing::{debug, warn};

use crate::accessor::{self, Accessor};
use crate::creator::{self, CreatorMethod};
use crate::declaration::Declaration;
use crate::error::{Diagnostic, Diagnostics};
use crate::naming::{GeneratedName, compose_setter_name};
use crate::options::{self, BuilderOption, CopyFactoryMode, RawOptions, ToolArguments};
use crate::registry::TypeNameRegistry;
use crate::types::{QualifiedName, TypeOracle, TypeRef};
use crate::validate;

/// One constructor parameter turned into a generation-ready record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Member {
    /// The property type, in usage form for this file.
    pub type_name: String,
    /// The property name.
    pub name: String,
    /// The builder setter's name.
    pub setter_name: String,
    /// The expression reading the property off an existing instance,
    /// absent when no accessor was found and the mode tolerates that.
    pub getter: Option<String>,
}

/// One raw option value, embedded in the generated builder's marker
/// annotation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MetadataValue {
    /// The annotation attribute name.
    pub name: String,
    /// The raw (pre-interpolation) value.
    pub value: String,
}

impl MetadataValue {
    fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_owned(),
            value: value.into(),
        }
    }
}

/// Everything the external renderer needs to emit one builder file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenerationModel {
    /// The generated builder's own name.
    pub builder_name: GeneratedName,
    /// The fully resolved options.
    pub options: options::ResolvedOptions,
    /// The creator the builder invokes.
    pub creator: CreatorMethod,
    /// Usage form of the target type's name.
    pub target_usage_name: String,
    /// Usage form of the creator's declaring type.
    pub creator_owner_usage_name: String,
    /// Generation-ready members, one per creator parameter, in order.
    pub members: Vec<Member>,
    /// Whether the copy-factory method is emitted.
    pub copy_factory_enabled: bool,
    /// Raw option values for the marker annotation.
    pub metadata: Vec<MetadataValue>,
    /// Qualified names importable without qualification.
    pub imports: Vec<String>,
}

/// The outcome of assembling a whole batch of declarations.
///
/// Failures are isolated per declaration: every succeeding declaration
/// contributes a model, every failing one contributes its diagnostics.
#[derive(Clone, Debug, Default)]
pub struct BatchOutcome {
    /// Models for the declarations that assembled cleanly.
    pub models: Vec<GenerationModel>,
    /// Diagnostics for the declarations (or tool arguments) that did
    /// not.
    pub diagnostics: Diagnostics,
}

fn generated_marker() -> QualifiedName {
    QualifiedName::top_level("io.buildsmith.annotation", "GeneratedBuilder")
}

fn copy_factory_mode_type() -> QualifiedName {
    QualifiedName::top_level("io.buildsmith.annotation", "CopyFactoryMode")
}

fn generated_annotation() -> QualifiedName {
    QualifiedName::top_level("javax.annotation.processing", "Generated")
}

fn metadata_values(raw: &RawOptions) -> Vec<MetadataValue> {
    vec![
        MetadataValue::new(BuilderOption::ClassName.attribute(), raw.class_name.clone()),
        MetadataValue::new(
            BuilderOption::SetterPrefix.attribute(),
            raw.setter_prefix.clone(),
        ),
        MetadataValue::new(
            BuilderOption::BuildMethodName.attribute(),
            raw.build_method_name.clone(),
        ),
        MetadataValue::new(
            BuilderOption::FactoryMethodName.attribute(),
            raw.factory_method_name.clone(),
        ),
        MetadataValue::new(
            BuilderOption::CopyFactory.attribute(),
            raw.copy_factory.as_str(),
        ),
        MetadataValue::new(
            BuilderOption::CopyFactoryMethodName.attribute(),
            raw.copy_factory_method_name.clone(),
        ),
    ]
}

fn missing_accessor(declaration: &Declaration, parameter_name: &str) -> Diagnostic {
    Diagnostic::attached(
        declaration,
        format!(
            "could not find any accessor (getter or field) for parameter {parameter_name}. \
             Add one or disable copy-factory generation with {}={}",
            BuilderOption::CopyFactory.attribute(),
            CopyFactoryMode::Disabled,
        ),
    )
}

/// Assembles the generation model for one declaration.
///
/// # Errors
///
/// Returns the collected [`Diagnostics`] of the first failing stage:
/// validation findings (all of them), a creator-resolution error, or
/// the missing accessors of a strict copy-factory run.
pub fn assemble(
    declaration: &Declaration,
    oracle: &dyn TypeOracle,
    tool: &ToolArguments,
) -> Result<GenerationModel, Diagnostics> {
    let findings = validate::validate(declaration, oracle);
    if !findings.is_empty() {
        return Err(Diagnostics::from(findings));
    }

    let creator = creator::resolve(declaration, oracle).map_err(|error| {
        Diagnostics::from(Diagnostic::attached(declaration, error.to_string()))
    })?;

    let TypeRef::Named { name: target, .. } = &creator.produces else {
        return Err(Diagnostics::from(Diagnostic::attached(
            declaration,
            "creator method must produce a declared type",
        )));
    };
    let target = target.clone();

    let resolved = options::resolve_raw(declaration, tool).interpolated(&target);

    let mut registry = TypeNameRegistry::new();
    let target_usage_name = registry.usage_name_of(&target);
    let creator_owner_usage_name = registry.usage_name_of(&creator.declaring_type);

    let mut members = Vec::with_capacity(creator.parameters.len());
    let mut missing = Vec::new();
    for parameter in &creator.parameters {
        let type_name = registry.usage_name(&parameter.ty);
        let setter_name = compose_setter_name(&resolved.setter_prefix, &parameter.name);

        let getter = if resolved.copy_factory == CopyFactoryMode::Disabled {
            None
        } else {
            match accessor::resolve(parameter, &target, &declaration.package, oracle) {
                found @ Accessor::Found { .. } => found.getter_expression(),
                Accessor::NotFound => {
                    if resolved.copy_factory == CopyFactoryMode::EnabledStrict {
                        missing.push(missing_accessor(declaration, &parameter.name));
                    } else {
                        warn!(
                            parameter = %parameter.name,
                            target_type = %target,
                            "no accessor found; copy factory will be omitted"
                        );
                    }
                    None
                }
            }
        };

        members.push(Member {
            type_name,
            name: parameter.name.clone(),
            setter_name,
            getter,
        });
    }
    if !missing.is_empty() {
        return Err(Diagnostics::from(missing));
    }

    let copy_factory_enabled = match resolved.copy_factory {
        CopyFactoryMode::Disabled => false,
        CopyFactoryMode::EnabledStrict => true,
        CopyFactoryMode::EnabledLenient => members.iter().all(|member| member.getter.is_some()),
    };

    let metadata = metadata_values(&resolved.raw);

    registry.register(&TypeRef::named(generated_marker()));
    registry.register(&TypeRef::named(copy_factory_mode_type()));
    registry.register(&TypeRef::named(generated_annotation()));

    let model = GenerationModel {
        builder_name: resolved.generated_name_in(&declaration.package),
        options: resolved,
        creator,
        target_usage_name,
        creator_owner_usage_name,
        members,
        copy_factory_enabled,
        metadata,
        imports: registry.safe_imports(),
    };
    debug!(
        builder = %model.builder_name.qualified(),
        members = model.members.len(),
        copy_factory = model.copy_factory_enabled,
        "assembled generation model"
    );
    Ok(model)
}

/// Assembles a whole batch, isolating each declaration's failures.
///
/// Tool arguments are validated once up front; when they are invalid
/// no models are assembled at all and only the tool-argument
/// diagnostics are reported.
#[must_use]
pub fn assemble_all(
    declarations: &[Declaration],
    oracle: &dyn TypeOracle,
    tool: &ToolArguments,
) -> BatchOutcome {
    let tool_findings = validate::validate_tool_arguments(tool);
    if !tool_findings.is_empty() {
        return BatchOutcome {
            models: Vec::new(),
            diagnostics: Diagnostics::from(tool_findings),
        };
    }

    let mut outcome = BatchOutcome::default();
    for declaration in declarations {
        match assemble(declaration, oracle, tool) {
            Ok(model) => outcome.models.push(model),
            Err(diagnostics) => outcome.diagnostics.extend(diagnostics),
        }
    }
    outcome
}
