//! hx IR - the program model consumed by the Haxe backend
//!
//! This crate holds the immutable input of code generation:
//! - Names for interned identifiers
//! - Types, method signatures and descriptors
//! - Classes, fields, methods and annotations
//! - Flat statement/expression arenas for method bodies
//! - The `Program` with its cross-class lookups
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: class, member and literal strings are `Name(u32)`
//! - **Flatten Everything**: body nodes live in arenas, referenced by `ExprId`/`StmtId`
//! - **Read-only after construction**: generation only ever takes `&Program`
//!
//! Types that contain floats store them as bits for Hash compatibility.

mod annotation;
pub mod body;
mod class;
mod interner;
mod modifiers;
mod name;
mod program;
mod types;

pub use annotation::{find_annotation, find_annotations, Annotation, AnnotationValue};
pub use body::{
    BinaryOp, Body, BodyBuilder, CallKind, Expr, ExprId, ExprKind, ExprRange, LabelId, Literal,
    Local, LocalId, Stmt, StmtId, StmtKind, StmtRange, UnaryOp,
};
pub use class::{
    ClassId, ClassKind, ClassModel, Field, FieldRef, Method, MethodId, MethodRef, Param,
    CONSTRUCTOR_NAME, STATIC_INIT_NAME,
};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use modifiers::{ClassMarkers, Modifiers};
pub use name::Name;
pub use program::{FieldEntry, MethodEntry, Program, OBJECT_CLASS, STRING_CLASS};
pub use types::{MethodType, PrimKind, Type};
