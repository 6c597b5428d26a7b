//! Program-model builders and the generate-then-emit driver.

use hx_codegen::{generate_program, GenOptions, MemoryVfs, ProgramOutput, UnitEmitter};
use hx_ir::{
    ClassId, ClassKind, ClassModel, FieldRef, Method, MethodId, MethodRef, MethodType, Name, Param,
    Program, SharedInterner, Type,
};

pub struct Model {
    pub i: SharedInterner,
    pub program: Program,
}

impl Model {
    /// A program holding `java.lang.Object` and `java.lang.String`.
    pub fn new() -> Self {
        let i = SharedInterner::new();
        let mut model = Model {
            program: Program::new(i.clone()),
            i,
        };
        let object = model.class("java.lang.Object", ClassKind::Class);
        model.add(object);
        let mut string = model.class("java.lang.String", ClassKind::Class);
        string.superclass = Some(model.n("java.lang.Object"));
        model.add(string);
        model
    }

    pub fn n(&self, s: &str) -> Name {
        self.i.intern(s)
    }

    /// A class extending `java.lang.Object` (interfaces extend nothing).
    pub fn class(&self, name: &str, kind: ClassKind) -> ClassModel {
        let mut class = ClassModel::new(self.n(name), kind);
        if kind == ClassKind::Class && name != "java.lang.Object" {
            class.superclass = Some(self.n("java.lang.Object"));
        }
        class
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

    pub fn string(&self) -> Type {
        self.program.string_type()
    }
}

/// Options without reflection info, which the interpreter cannot run.
pub fn plain() -> GenOptions {
    GenOptions {
        emit_reflection_info: false,
        ..GenOptions::default()
    }
}

/// Generate `program` and write its units to memory.
pub fn emit(program: &Program, options: &GenOptions) -> (ProgramOutput, MemoryVfs) {
    let output = generate_program(program, options);
    let mut vfs = MemoryVfs::new();
    UnitEmitter::new(options)
        .write(&output, &mut vfs)
        .unwrap_or_else(|e| panic!("emit failed: {e}"));
    (output, vfs)
}

/// Text of the unit at `path`.
pub fn unit<'v>(vfs: &'v MemoryVfs, path: &str) -> &'v str {
    vfs.get(path)
        .unwrap_or_else(|| panic!("no unit {path}; have {:?}", vfs.paths().collect::<Vec<_>>()))
}
