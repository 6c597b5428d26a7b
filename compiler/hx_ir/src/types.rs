//! Source-language types.
//!
//! Every expression, field and method signature carries exactly one [`Type`].
//! Arrays keep their element type even when the target erases it.

use std::fmt::Write;

use crate::{Name, StringInterner};

/// Primitive kinds of the stack-machine source language.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PrimKind {
    Bool,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimKind {
    /// Single-character descriptor code.
    pub const fn descriptor_char(self) -> char {
        match self {
            PrimKind::Bool => 'Z',
            PrimKind::Byte => 'B',
            PrimKind::Short => 'S',
            PrimKind::Char => 'C',
            PrimKind::Int => 'I',
            PrimKind::Long => 'J',
            PrimKind::Float => 'F',
            PrimKind::Double => 'D',
        }
    }

    /// Lower-case source name (`int`, `boolean`, ...).
    pub const fn source_name(self) -> &'static str {
        match self {
            PrimKind::Bool => "boolean",
            PrimKind::Byte => "byte",
            PrimKind::Short => "short",
            PrimKind::Char => "char",
            PrimKind::Int => "int",
            PrimKind::Long => "long",
            PrimKind::Float => "float",
            PrimKind::Double => "double",
        }
    }

    /// Kinds that are computed in 32-bit integer registers.
    pub const fn is_int_like(self) -> bool {
        matches!(
            self,
            PrimKind::Byte | PrimKind::Short | PrimKind::Char | PrimKind::Int
        )
    }

    pub const fn is_floating(self) -> bool {
        matches!(self, PrimKind::Float | PrimKind::Double)
    }

    pub fn from_descriptor_char(c: char) -> Option<Self> {
        Some(match c {
            'Z' => PrimKind::Bool,
            'B' => PrimKind::Byte,
            'S' => PrimKind::Short,
            'C' => PrimKind::Char,
            'I' => PrimKind::Int,
            'J' => PrimKind::Long,
            'F' => PrimKind::Float,
            'D' => PrimKind::Double,
            _ => return None,
        })
    }
}

/// A source-language type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Type {
    /// Return type of methods that produce no value.
    Void,
    Primitive(PrimKind),
    /// A class or interface, by fully-qualified dotted name.
    Reference(Name),
    /// `dims`-dimensional array of a non-array `element`.
    Array { element: Box<Type>, dims: u32 },
}

impl Type {
    pub const BOOL: Type = Type::Primitive(PrimKind::Bool);
    pub const BYTE: Type = Type::Primitive(PrimKind::Byte);
    pub const SHORT: Type = Type::Primitive(PrimKind::Short);
    pub const CHAR: Type = Type::Primitive(PrimKind::Char);
    pub const INT: Type = Type::Primitive(PrimKind::Int);
    pub const LONG: Type = Type::Primitive(PrimKind::Long);
    pub const FLOAT: Type = Type::Primitive(PrimKind::Float);
    pub const DOUBLE: Type = Type::Primitive(PrimKind::Double);

    /// Build an array type, flattening nested arrays into one dimension count.
    pub fn array(element: Type, dims: u32) -> Type {
        match element {
            Type::Array {
                element: inner,
                dims: inner_dims,
            } => Type::Array {
                element: inner,
                dims: inner_dims + dims,
            },
            other => Type::Array {
                element: Box::new(other),
                dims,
            },
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array { .. })
    }

    pub fn prim(&self) -> Option<PrimKind> {
        match self {
            Type::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn class_name(&self) -> Option<Name> {
        match self {
            Type::Reference(name) => Some(*name),
            _ => None,
        }
    }

    /// Type of one element of this array (one dimension removed).
    ///
    /// Non-array types are returned unchanged.
    pub fn component(&self) -> Type {
        match self {
            Type::Array { element, dims } if *dims > 1 => Type::Array {
                element: element.clone(),
                dims: dims - 1,
            },
            Type::Array { element, .. } => (**element).clone(),
            other => other.clone(),
        }
    }

    /// Class names mentioned by this type (the element class of arrays).
    pub fn referenced_class(&self) -> Option<Name> {
        match self {
            Type::Reference(name) => Some(*name),
            Type::Array { element, .. } => element.referenced_class(),
            _ => None,
        }
    }

    /// Descriptor text: `I`, `Ljava/lang/String;`, `[[J`, `V`.
    pub fn descriptor(&self, interner: &StringInterner) -> String {
        let mut out = String::new();
        self.write_descriptor(&mut out, interner);
        out
    }

    fn write_descriptor(&self, out: &mut String, interner: &StringInterner) {
        match self {
            Type::Void => out.push('V'),
            Type::Primitive(kind) => out.push(kind.descriptor_char()),
            Type::Reference(name) => {
                let _ = write!(out, "L{};", interner.lookup(*name).replace('.', "/"));
            }
            Type::Array { element, dims } => {
                for _ in 0..*dims {
                    out.push('[');
                }
                element.write_descriptor(out, interner);
            }
        }
    }

    /// Human-readable source spelling (`int[][]`, `java.lang.String`).
    pub fn display(&self, interner: &StringInterner) -> String {
        match self {
            Type::Void => "void".to_string(),
            Type::Primitive(kind) => kind.source_name().to_string(),
            Type::Reference(name) => interner.lookup(*name).to_string(),
            Type::Array { element, dims } => {
                let mut s = element.display(interner);
                for _ in 0..*dims {
                    s.push_str("[]");
                }
                s
            }
        }
    }
}

/// A method signature: ordered argument types and a return type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MethodType {
    pub args: Vec<Type>,
    pub ret: Type,
}

impl MethodType {
    pub fn new(args: Vec<Type>, ret: Type) -> Self {
        MethodType { args, ret }
    }

    /// Descriptor text: `(ILjava/lang/String;)V`.
    pub fn descriptor(&self, interner: &StringInterner) -> String {
        let mut out = String::from("(");
        for arg in &self.args {
            arg.write_descriptor(&mut out, interner);
        }
        out.push(')');
        self.ret.write_descriptor(&mut out, interner);
        out
    }

    pub fn returns_void(&self) -> bool {
        self.ret.is_void()
    }
}
