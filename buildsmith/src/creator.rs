//! Creator-method resolution: which constructor or factory the
//! generated builder will invoke.
//!
//! A closed list of strategies is tried in a fixed order; the first
//! strategy that applies to the declaration's kind decides the
//! outcome, errors included. Errors are terminal for the declaration,
//! never retried.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::declaration::{Declaration, DeclarationKind};
use crate::types::{Parameter, QualifiedName, TypeOracle, TypeRef};

/// The resolved constructor or static factory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreatorMethod {
    /// The type declaring the creator.
    pub declaring_type: QualifiedName,
    /// The creator's ordered parameters.
    pub parameters: Vec<Parameter>,
    /// The factory method's name, when the creator is a static
    /// factory rather than a constructor.
    pub factory_name: Option<String>,
    /// The type the creator produces.
    pub produces: TypeRef,
}

impl CreatorMethod {
    /// Whether the creator is a static factory method.
    #[must_use]
    pub const fn is_factory(&self) -> bool {
        self.factory_name.is_some()
    }
}

/// Failure to settle on a unique creator method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CreatorError {
    /// No usable constructor exists on the annotated type.
    #[error(
        "no valid constructor found. A non-private constructor with at least one argument must be present"
    )]
    NotFound,
    /// More than one constructor qualifies.
    #[error(
        "found multiple non-private constructors with at least one argument. Annotate the constructor the builder should use instead"
    )]
    TooManyFound,
}

#[derive(Clone, Copy, Debug)]
enum Strategy {
    ClassConstructors,
    RecordCanonical,
    DirectExecutable,
}

const STRATEGIES: [Strategy; 3] = [
    Strategy::ClassConstructors,
    Strategy::RecordCanonical,
    Strategy::DirectExecutable,
];

enum Outcome {
    NotApplicable,
    Found(CreatorMethod),
    Failed(CreatorError),
}

impl Strategy {
    fn find(self, declaration: &Declaration, oracle: &dyn TypeOracle) -> Outcome {
        match self {
            Self::ClassConstructors => class_constructors(declaration, oracle),
            Self::RecordCanonical => record_canonical(declaration, oracle),
            Self::DirectExecutable => direct_executable(declaration),
        }
    }
}

/// Scans a class's directly declared constructors for the single
/// non-private one with at least one parameter.
fn class_constructors(declaration: &Declaration, oracle: &dyn TypeOracle) -> Outcome {
    if declaration.kind != DeclarationKind::Class {
        return Outcome::NotApplicable;
    }
    let Some(def) = oracle.definition(&declaration.owner) else {
        return Outcome::Failed(CreatorError::NotFound);
    };

    let mut candidates = def
        .constructors
        .iter()
        .filter(|ctor| !ctor.visibility.is_private() && !ctor.parameters.is_empty());

    match (candidates.next(), candidates.next()) {
        (None, _) => Outcome::Failed(CreatorError::NotFound),
        (Some(ctor), None) => Outcome::Found(CreatorMethod {
            declaring_type: declaration.owner.clone(),
            parameters: ctor.parameters.clone(),
            factory_name: None,
            produces: TypeRef::named(declaration.owner.clone()),
        }),
        (Some(_), Some(_)) => Outcome::Failed(CreatorError::TooManyFound),
    }
}

/// Picks a record's canonical constructor: the one whose parameter
/// type sequence matches the component type sequence in order.
fn record_canonical(declaration: &Declaration, oracle: &dyn TypeOracle) -> Outcome {
    if declaration.kind != DeclarationKind::Record {
        return Outcome::NotApplicable;
    }
    let Some(def) = oracle.definition(&declaration.owner) else {
        return Outcome::Failed(CreatorError::NotFound);
    };
    if def.components.is_empty() {
        return Outcome::Failed(CreatorError::NotFound);
    }

    def.constructors
        .iter()
        .find(|ctor| {
            ctor.parameters
                .iter()
                .map(|p| &p.ty)
                .eq(def.components.iter().map(|c| &c.ty))
        })
        .map_or(Outcome::Failed(CreatorError::NotFound), |ctor| {
            Outcome::Found(CreatorMethod {
                declaring_type: declaration.owner.clone(),
                parameters: ctor.parameters.clone(),
                factory_name: None,
                produces: TypeRef::named(declaration.owner.clone()),
            })
        })
}

/// Uses a directly annotated constructor or factory method as-is.
fn direct_executable(declaration: &Declaration) -> Outcome {
    match declaration.kind {
        DeclarationKind::Constructor => Outcome::Found(CreatorMethod {
            declaring_type: declaration.owner.clone(),
            parameters: declaration.parameters.clone(),
            factory_name: None,
            produces: TypeRef::named(declaration.owner.clone()),
        }),
        DeclarationKind::Method => match &declaration.return_type {
            Some(produces) => Outcome::Found(CreatorMethod {
                declaring_type: declaration.owner.clone(),
                parameters: declaration.parameters.clone(),
                factory_name: Some(declaration.name.clone()),
                produces: produces.clone(),
            }),
            None => Outcome::Failed(CreatorError::NotFound),
        },
        _ => Outcome::NotApplicable,
    }
}

/// Resolves the unique creator method for `declaration`.
///
/// # Errors
///
/// Returns [`CreatorError::NotFound`] when no strategy yields a
/// creator, and [`CreatorError::TooManyFound`] when the class scan is
/// ambiguous.
pub fn resolve(
    declaration: &Declaration,
    oracle: &dyn TypeOracle,
) -> Result<CreatorMethod, CreatorError> {
    for strategy in STRATEGIES {
        match strategy.find(declaration, oracle) {
            Outcome::NotApplicable => (),
            Outcome::Found(creator) => {
                debug!(
                    strategy = ?strategy,
                    declaring_type = %creator.declaring_type,
                    factory = creator.factory_name.as_deref().unwrap_or(""),
                    "resolved creator method"
                );
                return Ok(creator);
            }
            Outcome::Failed(error) => return Err(error),
        }
    }

    debug!(declaration = %declaration.describe(), "no creator strategy applied");
    Err(CreatorError::NotFound)
}
