//! Artifact emitters for schemashift.
//!
//! Every emitter reads an immutable [`Schema`](schemashift_core::Schema) and
//! returns in-memory text: a PostgreSQL script, C# entity classes, Entity
//! Framework 6 mapping classes and one aggregate `DbContext`. Persisting the
//! text is left to the caller.

pub mod context;
pub mod ddl;
pub mod engine;
pub mod entity;
pub mod mapping;
pub mod model;
pub mod naming;
mod writer;

pub use context::ContextAggregator;
pub use ddl::DdlEmitter;
pub use engine::{collect_type_report, emit_all};
pub use entity::EntityEmitter;
pub use mapping::MappingEmitter;
pub use model::{EmitOptions, EmitOutput, TypeReport, TypeTarget, UnmappedType};
pub use naming::{MemberNames, plural_type_name, title_case};
