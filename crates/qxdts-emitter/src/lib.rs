//! TypeScript declaration emitter for qooxdoo class metadata.
//!
//! This crate turns a meta-database into a single ambient `.d.ts` file:
//! - Legacy type-name translation (`TypeMapper`)
//! - Class, interface and mixin emission with override suppression
//!   (`DeclarationWriter`)
//! - Emitter configuration: type vocabulary, ignore list, preamble
//!   (`WriterConfig`)

pub mod config;
pub use config::WriterConfig;

pub mod declaration_emitter;
pub use declaration_emitter::{DeclarationWriter, EmitStats, emit_declarations};

pub mod error;
pub use error::EmitError;

pub mod jsdoc;
pub mod limits;

pub mod type_mapper;
pub use type_mapper::{TypeMapper, UNKNOWN_TYPE};
