//! Annotations attached to classes, fields, methods and parameters.

use crate::{Name, StringInterner, Type};

/// A constant annotation element value.
///
/// Floats are stored as bits so the model stays `Eq + Hash`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum AnnotationValue {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Char(u16),
    Int(i32),
    Long(i64),
    Float(u32),
    Double(u64),
    String(Name),
    /// An enum constant: a static field of `class`.
    Enum { class: Name, field: Name },
    Class(Type),
    Annotation(Box<Annotation>),
    Array(Vec<AnnotationValue>),
}

impl AnnotationValue {
    pub fn as_string(&self) -> Option<Name> {
        match self {
            AnnotationValue::String(name) => Some(*name),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[AnnotationValue]> {
        match self {
            AnnotationValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_annotation(&self) -> Option<&Annotation> {
        match self {
            AnnotationValue::Annotation(a) => Some(a),
            _ => None,
        }
    }
}

/// One annotation instance.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Annotation {
    /// The annotation type (an annotation-type interface).
    pub ty: Name,
    /// Explicitly given elements; omitted elements take the declared default.
    pub elements: Vec<(Name, AnnotationValue)>,
    /// Retained for runtime reflection.
    pub runtime_visible: bool,
}

impl Annotation {
    pub fn new(ty: Name) -> Self {
        Annotation {
            ty,
            elements: Vec::new(),
            runtime_visible: true,
        }
    }

    #[must_use]
    pub fn with(mut self, key: Name, value: AnnotationValue) -> Self {
        self.elements.push((key, value));
        self
    }

    pub fn get(&self, key: Name) -> Option<&AnnotationValue> {
        self.elements
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Look up an element by its string key.
    pub fn get_str(&self, interner: &StringInterner, key: &str) -> Option<&AnnotationValue> {
        interner.get(key).and_then(|k| self.get(k))
    }
}

/// Find the first annotation of the given type name in a list.
pub fn find_annotation<'a>(
    annotations: &'a [Annotation],
    interner: &StringInterner,
    type_name: &str,
) -> Option<&'a Annotation> {
    let ty = interner.get(type_name)?;
    annotations.iter().find(|a| a.ty == ty)
}

/// All annotations of the given type name, in declaration order.
pub fn find_annotations<'a>(
    annotations: &'a [Annotation],
    interner: &StringInterner,
    type_name: &str,
) -> Vec<&'a Annotation> {
    match interner.get(type_name) {
        Some(ty) => annotations.iter().filter(|a| a.ty == ty).collect(),
        None => Vec::new(),
    }
}
