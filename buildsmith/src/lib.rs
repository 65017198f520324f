//! Deterministic model assembly for generated builder companions.
//!
//! Given a declaration carrying a builder annotation, this crate
//! computes every piece of data a renderer needs to emit the companion
//! builder type: the creator method the builder invokes, a
//! generation-ready member per creator parameter, the fully resolved
//! options, and the usage names and imports that keep the generated
//! file free of identifier collisions. It performs no text emission
//! and no I/O; type information arrives through the read-only
//! [`types::TypeOracle`] and the finished [`GenerationModel`] leaves
//! through the return value.
//!
//! Failures are values: validation and resolution produce
//! [`Diagnostics`], never panics, and one declaration's failure never
//! disturbs the rest of a batch.
//!
//! ```
//! use buildsmith::types::{
//!     Constructor, Field, Parameter, Primitive, QualifiedName, TypeDef, TypeRef, TypeUniverse,
//! };
//! use buildsmith::{Declaration, ToolArguments};
//!
//! let point = QualifiedName::top_level("com.acme", "Point");
//! let int = TypeRef::Primitive(Primitive::Int);
//! let universe = TypeUniverse::new().with_type(
//!     TypeDef::class(point.clone())
//!         .with_constructor(Constructor::new(vec![
//!             Parameter::new("x", int.clone()),
//!             Parameter::new("y", int.clone()),
//!         ]))
//!         .with_field(Field::new("x", int.clone()))
//!         .with_field(Field::new("y", int)),
//! );
//!
//! let model = buildsmith::assemble(
//!     &Declaration::annotated_class(point),
//!     &universe,
//!     &ToolArguments::new(),
//! )?;
//!
//! assert_eq!(model.builder_name.qualified(), "com.acme.PointBuilder");
//! assert_eq!(model.options.build_method_name, "build");
//! assert!(model.copy_factory_enabled);
//! # Ok::<_, buildsmith::Diagnostics>(())
//! ```

pub mod accessor;
pub mod assemble;
pub mod creator;
pub mod declaration;
pub mod error;
pub mod naming;
pub mod options;
pub mod registry;
pub mod types;
pub mod validate;

pub use accessor::Accessor;
pub use assemble::{BatchOutcome, GenerationModel, Member, MetadataValue, assemble, assemble_all};
pub use creator::{CreatorError, CreatorMethod};
pub use declaration::{BuilderSpec, Declaration, DeclarationKind};
pub use error::{Diagnostic, Diagnostics};
pub use naming::GeneratedName;
pub use options::{BuilderOption, CopyFactoryMode, RawOptions, ResolvedOptions, ToolArguments};
pub use registry::TypeNameRegistry;
