//! The whole program model and its cross-class lookups.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    ClassId, ClassModel, Field, Method, MethodRef, MethodType, Name, SharedInterner,
    StringInterner, Type, CONSTRUCTOR_NAME,
};

/// Root of the class hierarchy.
pub const OBJECT_CLASS: &str = "java.lang.Object";
/// The class string literals are instances of.
pub const STRING_CLASS: &str = "java.lang.String";

/// A method together with the class that declares it.
#[derive(Copy, Clone, Debug)]
pub struct MethodEntry<'a> {
    pub owner: ClassId,
    pub method: &'a Method,
}

/// A field together with the class that declares it.
#[derive(Copy, Clone, Debug)]
pub struct FieldEntry<'a> {
    pub owner: ClassId,
    pub field: &'a Field,
}

/// Immutable set of classes handed to the code generator.
///
/// Classes are appended with [`Program::add_class`] while the front end
/// builds the model; afterwards every lookup takes `&self`.
#[derive(Debug)]
pub struct Program {
    interner: SharedInterner,
    classes: Vec<ClassModel>,
    by_name: FxHashMap<Name, ClassId>,
}

impl Program {
    pub fn new(interner: SharedInterner) -> Self {
        Program {
            interner,
            classes: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn shared_interner(&self) -> SharedInterner {
        self.interner.clone()
    }

    /// Add a class. A class with the same name replaces the earlier one and
    /// keeps its id.
    pub fn add_class(&mut self, class: ClassModel) -> ClassId {
        if let Some(&id) = self.by_name.get(&class.name) {
            self.classes[id.index()] = class;
            return id;
        }
        let id = ClassId::new(u32::try_from(self.classes.len()).unwrap_or(u32::MAX));
        self.by_name.insert(class.name, id);
        self.classes.push(class);
        id
    }

    pub fn get(&self, name: Name) -> Option<ClassId> {
        self.by_name.get(&name).copied()
    }

    pub fn class(&self, id: ClassId) -> &ClassModel {
        &self.classes[id.index()]
    }

    pub fn class_by_name(&self, name: Name) -> Option<&ClassModel> {
        self.get(name).map(|id| self.class(id))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassId, &ClassModel)> {
        self.classes.iter().enumerate().map(|(i, c)| {
            (ClassId::new(u32::try_from(i).unwrap_or(u32::MAX)), c)
        })
    }

    pub fn string_type(&self) -> Type {
        Type::Reference(self.interner.intern(STRING_CLASS))
    }

    pub fn object_type(&self) -> Type {
        Type::Reference(self.interner.intern(OBJECT_CLASS))
    }

    /// The class followed by its superclass chain, then every interface
    /// reachable from any of them, breadth-first and without duplicates.
    ///
    /// Names not present in the program are skipped.
    pub fn ancestors(&self, name: Name) -> Vec<ClassId> {
        let mut out = Vec::new();
        let mut seen = FxHashSet::default();

        let mut current = self.get(name);
        while let Some(id) = current {
            if !seen.insert(id) {
                break;
            }
            out.push(id);
            current = self.class(id).superclass.and_then(|s| self.get(s));
        }

        let mut cursor = 0;
        while cursor < out.len() {
            let id = out[cursor];
            cursor += 1;
            for iface in &self.class(id).interfaces {
                if let Some(iid) = self.get(*iface) {
                    if seen.insert(iid) {
                        out.push(iid);
                    }
                }
            }
        }
        out
    }

    /// Virtual lookup: the first declaration of `name` with type `ty` in
    /// [`ancestors`](Self::ancestors) order.
    pub fn get_method(&self, class: Name, name: Name, ty: &MethodType) -> Option<MethodEntry<'_>> {
        self.ancestors(class).into_iter().find_map(|owner| {
            self.class(owner)
                .find_method(name, ty)
                .map(|method| MethodEntry { owner, method })
        })
    }

    pub fn get_method_ref(&self, r: &MethodRef) -> Option<MethodEntry<'_>> {
        self.get_method(r.class, r.name, &r.ty)
    }

    pub fn get_field(&self, class: Name, name: Name, ty: &Type) -> Option<FieldEntry<'_>> {
        self.ancestors(class).into_iter().find_map(|owner| {
            self.class(owner)
                .find_field(name, ty)
                .map(|field| FieldEntry { owner, field })
        })
    }

    /// Non-virtual resolution for calls the front end marked as special.
    ///
    /// Constructors and private methods bind to the referenced class only.
    /// Anything else binds to the nearest superclass declaration that has a
    /// body, then to the nearest declaration of any kind.
    pub fn resolve_special(&self, r: &MethodRef) -> Option<MethodEntry<'_>> {
        let owner = self.get(r.class)?;
        let declared = self.class(owner).find_method(r.name, &r.ty);

        let is_ctor = &*self.interner.lookup(r.name) == CONSTRUCTOR_NAME;
        if is_ctor || declared.is_some_and(|m| m.modifiers.is_private()) {
            return declared.map(|method| MethodEntry { owner, method });
        }

        let mut current = Some(owner);
        while let Some(id) = current {
            let class = self.class(id);
            if let Some(method) = class.find_method(r.name, &r.ty) {
                if method.has_body() {
                    return Some(MethodEntry { owner: id, method });
                }
            }
            current = class.superclass.and_then(|s| self.get(s));
        }
        self.get_method_ref(r)
    }

    /// Instance methods an implementation of `class` must provide: every
    /// non-static method declared by it or any ancestor interface, once per
    /// `(name, type)`, most specific declaration first.
    pub fn methods_to_implement(&self, class: Name) -> Vec<MethodEntry<'_>> {
        let mut seen: FxHashSet<(Name, MethodType)> = FxHashSet::default();
        let mut out = Vec::new();
        for owner in self.ancestors(class) {
            let model = self.class(owner);
            if !model.is_interface() {
                continue;
            }
            for method in &model.methods {
                if method.is_static() || self.is_special_name(method.name) {
                    continue;
                }
                if seen.insert((method.name, method.ty())) {
                    out.push(MethodEntry { owner, method });
                }
            }
        }
        out
    }

    /// The abstract subset of [`methods_to_implement`](Self::methods_to_implement).
    pub fn abstract_methods(&self, class: Name) -> Vec<MethodEntry<'_>> {
        let mut out = self.methods_to_implement(class);
        out.retain(|e| !e.method.has_body());
        out
    }

    /// Whether a strict superclass already declares an overridable method
    /// with this name and type.
    pub fn is_overriding(&self, class: Name, name: Name, ty: &MethodType) -> bool {
        if self.is_special_name(name) {
            return false;
        }
        let mut current = self
            .class_by_name(class)
            .and_then(|c| c.superclass)
            .and_then(|s| self.get(s));
        let mut steps = 0;
        while let Some(id) = current {
            let model = self.class(id);
            if let Some(m) = model.find_method(name, ty) {
                if !m.is_static() && !m.modifiers.is_private() {
                    return true;
                }
            }
            steps += 1;
            if steps > self.classes.len() {
                break;
            }
            current = model.superclass.and_then(|s| self.get(s));
        }
        false
    }

    /// `<init>` and `<clinit>`.
    pub fn is_special_name(&self, name: Name) -> bool {
        let text = self.interner.lookup(name);
        text.starts_with('<')
    }

    /// Whether `sub` is `sup` or inherits from it.
    pub fn is_subclass_of(&self, sub: Name, sup: Name) -> bool {
        self.get(sup)
            .is_some_and(|target| self.ancestors(sub).contains(&target))
    }
}
