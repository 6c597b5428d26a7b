//! Classes and their members.
//!
//! All of these are created once by the front end and are read-only to the
//! code generator.

use std::fmt;

use crate::body::{Body, Literal};
use crate::{Annotation, AnnotationValue, ClassMarkers, MethodType, Modifiers, Name, Type};

/// Name of instance constructors.
pub const CONSTRUCTOR_NAME: &str = "<init>";
/// Name of the static-initializer method.
pub const STATIC_INIT_NAME: &str = "<clinit>";

/// Index of a class in its [`Program`](crate::Program).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct ClassId(u32);

impl ClassId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ClassId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

/// Stable numeric method identity, used for reflective dispatch.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct MethodId(pub u32);

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ClassKind {
    Class,
    Interface,
    Abstract,
}

/// A field declaration.
///
/// Identity is `(owning class, name, type)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: Name,
    pub ty: Type,
    pub modifiers: Modifiers,
    /// Compile-time constant value (static finals only).
    pub constant: Option<Literal>,
    pub annotations: Vec<Annotation>,
}

impl Field {
    pub fn new(name: Name, ty: Type, modifiers: Modifiers) -> Self {
        Field {
            name,
            ty,
            modifiers,
            constant: None,
            annotations: Vec::new(),
        }
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }
}

/// A named, typed method parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Param {
    pub name: Name,
    pub ty: Type,
}

/// A method declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct Method {
    pub id: MethodId,
    pub name: Name,
    pub params: Vec<Param>,
    pub ret: Type,
    pub modifiers: Modifiers,
    /// `None` for abstract and native methods.
    pub body: Option<Body>,
    pub annotations: Vec<Annotation>,
    /// One list per parameter.
    pub param_annotations: Vec<Vec<Annotation>>,
    /// Default element value when this method belongs to an annotation type.
    pub default_value: Option<AnnotationValue>,
}

impl Method {
    pub fn new(id: MethodId, name: Name, params: Vec<Param>, ret: Type) -> Self {
        Method {
            id,
            name,
            params,
            ret,
            modifiers: Modifiers::PUBLIC,
            body: None,
            annotations: Vec::new(),
            param_annotations: Vec::new(),
            default_value: None,
        }
    }

    pub fn ty(&self) -> MethodType {
        MethodType::new(self.params.iter().map(|p| p.ty.clone()).collect(), self.ret.clone())
    }

    /// Same name and same argument/return types.
    pub fn matches(&self, name: Name, ty: &MethodType) -> bool {
        self.name == name
            && self.ret == ty.ret
            && self.params.len() == ty.args.len()
            && self.params.iter().zip(&ty.args).all(|(p, t)| p.ty == *t)
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

/// Reference to a field as it appears at a use site.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldRef {
    pub class: Name,
    pub name: Name,
    pub ty: Type,
}

/// Reference to a method as it appears at a call site.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodRef {
    pub class: Name,
    pub name: Name,
    pub ty: MethodType,
}

impl MethodRef {
    pub fn new(class: Name, name: Name, ty: MethodType) -> Self {
        MethodRef { class, name, ty }
    }
}

/// A class, interface or abstract class.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassModel {
    /// Fully-qualified dotted name.
    pub name: Name,
    pub superclass: Option<Name>,
    pub interfaces: Vec<Name>,
    pub kind: ClassKind,
    pub modifiers: Modifiers,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    pub annotations: Vec<Annotation>,
    pub markers: ClassMarkers,
    /// Set when the class maps onto an existing target type and is not emitted.
    pub native_name: Option<Name>,
    /// Originating source file, for source maps.
    pub source_file: Option<Name>,
}

impl ClassModel {
    pub fn new(name: Name, kind: ClassKind) -> Self {
        let modifiers = match kind {
            ClassKind::Class => Modifiers::PUBLIC,
            ClassKind::Interface => Modifiers::PUBLIC | Modifiers::INTERFACE | Modifiers::ABSTRACT,
            ClassKind::Abstract => Modifiers::PUBLIC | Modifiers::ABSTRACT,
        };
        ClassModel {
            name,
            superclass: None,
            interfaces: Vec::new(),
            kind,
            modifiers,
            fields: Vec::new(),
            methods: Vec::new(),
            annotations: Vec::new(),
            markers: ClassMarkers::empty(),
            native_name: None,
            source_file: None,
        }
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    pub fn is_annotation_type(&self) -> bool {
        self.markers.contains(ClassMarkers::ANNOTATION_TYPE)
    }

    pub fn is_native_bound(&self) -> bool {
        self.markers.contains(ClassMarkers::NATIVE_BOUND)
    }

    pub fn find_method(&self, name: Name, ty: &MethodType) -> Option<&Method> {
        self.methods.iter().find(|m| m.matches(name, ty))
    }

    pub fn find_field(&self, name: Name, ty: &Type) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name && f.ty == *ty)
    }

    pub fn has_static_members(&self) -> bool {
        self.fields.iter().any(Field::is_static) || self.methods.iter().any(Method::is_static)
    }
}
