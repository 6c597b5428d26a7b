//! Program-model fixtures shared by the unit tests.

use hx_ir::{
    ClassId, ClassKind, ClassModel, FieldRef, Method, MethodId, MethodRef, MethodType, Name,
    Param, Program, SharedInterner, Type,
};

pub(crate) struct Fixture {
    pub i: SharedInterner,
    pub program: Program,
}

impl Fixture {
    pub fn new() -> Self {
        let i = SharedInterner::new();
        Fixture {
            program: Program::new(i.clone()),
            i,
        }
    }

    pub fn n(&self, s: &str) -> Name {
        self.i.intern(s)
    }

    pub fn class(&self, name: &str, kind: ClassKind) -> ClassModel {
        ClassModel::new(self.n(name), kind)
    }

    pub fn add(&mut self, class: ClassModel) -> ClassId {
        self.program.add_class(class)
    }

    pub fn method(&self, id: u32, name: &str, params: &[(&str, Type)], ret: Type) -> Method {
        let params = params
            .iter()
            .map(|(p, ty)| Param {
                name: self.n(p),
                ty: ty.clone(),
            })
            .collect();
        Method::new(MethodId(id), self.n(name), params, ret)
    }

    pub fn mref(&self, class: &str, name: &str, args: Vec<Type>, ret: Type) -> MethodRef {
        MethodRef::new(self.n(class), self.n(name), MethodType::new(args, ret))
    }

    pub fn fref(&self, class: &str, name: &str, ty: Type) -> FieldRef {
        FieldRef {
            class: self.n(class),
            name: self.n(name),
            ty,
        }
    }

    pub fn reference(&self, class: &str) -> Type {
        Type::Reference(self.n(class))
    }

    /// `java.lang.Object` and `java.lang.String`.
    pub fn with_core(mut self) -> Self {
        let object = self.class("java.lang.Object", ClassKind::Class);
        self.add(object);
        let mut string = self.class("java.lang.String", ClassKind::Class);
        string.superclass = Some(self.n("java.lang.Object"));
        self.add(string);
        self
    }
}
