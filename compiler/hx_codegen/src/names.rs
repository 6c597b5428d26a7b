//! Target identifiers for classes, members, locals and types.
//!
//! Built once from the whole program before any class is generated and only
//! read afterwards, so per-class generation can share it across threads.
//!
//! # Rules
//!
//! Every class, method and field name is an injective encoding of its
//! source name, so distinct source members never share a target name.
//!
//! - Packages: each segment escaped; a segment not starting with a
//!   lower-case letter gets a `p_l` prefix, and segments that collide with
//!   Haxe keywords or standard top-level packages get a `_` suffix
//!   (`java.lang` becomes `java_.lang`).
//! - Classes: escaped; a name not starting with an upper-case letter gets a
//!   `C_l` prefix, and names that collide with Haxe standard types or the
//!   support library get a `_` suffix.
//! - Methods: name plus mangled descriptor (`run(I)I` becomes `run_I_I`),
//!   so overloads never collide and overriding methods share a name.
//!   Constructors and private instance methods also carry their owner
//!   after the descriptor, so they never accidentally override.
//! - Fields: the escaped name; a field shadowing one of a superclass gets
//!   `_o` and its owner appended.
//! - Locals and parameters: sanitized only, then deduplicated per body.

use std::fmt::Write as _;

use rustc_hash::FxHashMap;

use hx_ir::{
    ClassModel, Method, MethodType, Name, PrimKind, Program, SharedInterner, Type,
    CONSTRUCTOR_NAME,
};

use crate::runtime_api;

const HAXE_KEYWORDS: &[&str] = &[
    "abstract", "break", "case", "cast", "catch", "class", "continue", "default", "do", "dynamic",
    "else", "enum", "extends", "extern", "false", "final", "for", "function", "if", "implements",
    "import", "in", "inline", "interface", "macro", "new", "null", "operator", "overload",
    "override", "package", "private", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typedef", "untyped", "using", "var", "while",
];

const HAXE_STD_PACKAGES: &[&str] = &[
    "haxe", "sys", "js", "cpp", "java", "cs", "neko", "php", "python", "lua", "flash", "hl",
    "eval", "jvm",
];

const HAXE_STD_TYPES: &[&str] = &[
    "Any", "Array", "Bool", "Class", "Date", "Dynamic", "EReg", "Enum", "EnumValue", "Float",
    "Int", "IntIterator", "Iterable", "Iterator", "Lambda", "List", "Map", "Math", "Null",
    "Reflect", "Std", "String", "StringBuf", "StringTools", "Sys", "Type", "UInt", "Void", "Xml",
];

/// Members every generated class may declare itself.
const RESERVED_MEMBERS: &[&str] = &[
    runtime_api::SI_FLAG,
    runtime_api::SI_ROUTINE,
    runtime_api::CLASS_INFO,
    runtime_api::CAUGHT_SLOT,
    runtime_api::CATCH_BINDING,
    "__func",
    "__data",
    "__handler",
    "__clazz",
    "__invoke",
];

/// Identifiers of the per-class string literal pool.
const RESERVED_PREFIX: &str = runtime_api::STRING_POOL_PREFIX;

/// Synthesized classes emitted next to a source class.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Companion {
    /// Holder of an interface's static fields and methods.
    StaticHolder,
    /// Reflective invocation proxy.
    Proxy,
    /// Single-method functional adapter.
    Lambda,
    /// Annotation value proxy.
    AnnotationImpl,
    /// Native library binding.
    Ffi,
}

impl Companion {
    pub const fn suffix(self) -> &'static str {
        match self {
            Companion::StaticHolder => "_IFields_",
            Companion::Proxy => "_Proxy",
            Companion::Lambda => "_Lambda",
            Companion::AnnotationImpl => "_Impl",
            Companion::Ffi => "_FFI",
        }
    }
}

#[derive(Clone, Debug)]
struct ClassNames {
    package: String,
    simple: String,
    /// Existing target type this class maps onto.
    native: Option<String>,
    is_interface: bool,
}

impl ClassNames {
    fn fq(&self) -> String {
        if let Some(native) = &self.native {
            return native.clone();
        }
        qualify(&self.package, &self.simple)
    }
}

fn qualify(package: &str, simple: &str) -> String {
    if package.is_empty() {
        simple.to_string()
    } else {
        format!("{package}.{simple}")
    }
}

/// Global, read-only naming table.
pub struct Names {
    interner: SharedInterner,
    classes: FxHashMap<Name, ClassNames>,
    fields: FxHashMap<(Name, Name), String>,
}

impl Names {
    /// Compute every class and field name of the program.
    pub fn build(program: &Program) -> Names {
        let interner = program.shared_interner();
        let mut classes = FxHashMap::default();
        for (_, class) in program.iter() {
            classes.insert(class.name, class_names(&interner, class));
        }

        let mut fields = FxHashMap::default();
        for (_, class) in program.iter() {
            for field in &class.fields {
                let base = encode_member(&interner.lookup(field.name));
                let shadows = superclasses(program, class)
                    .any(|sup| sup.fields.iter().any(|f| f.name == field.name));
                let name = if shadows {
                    format!("{base}_o{}", mangle_path(&interner.lookup(class.name)))
                } else {
                    base
                };
                fields.insert((class.name, field.name), name);
            }
        }

        tracing::debug!(classes = classes.len(), fields = fields.len(), "built naming table");
        Names {
            interner,
            classes,
            fields,
        }
    }

    fn lookup_class(&self, name: Name) -> ClassNames {
        self.classes.get(&name).cloned().unwrap_or_else(|| ClassNames {
            package: package_of(&self.interner.lookup(name)),
            simple: simple_of(&self.interner.lookup(name)),
            native: None,
            is_interface: false,
        })
    }

    /// Fully-qualified target name of a class (the native name for
    /// native-mapped classes).
    pub fn class_fq(&self, name: Name) -> String {
        self.lookup_class(name).fq()
    }

    /// Target name of a class given by source name, whether or not the
    /// program contains it.
    pub fn class_fq_by_str(&self, source: &str) -> String {
        match self.interner.get(source) {
            Some(name) => self.class_fq(name),
            None => qualify(&package_of(source), &simple_of(source)),
        }
    }

    /// Whether `name` maps onto an existing target type.
    pub fn is_native(&self, name: Name) -> bool {
        self.classes.get(&name).is_some_and(|c| c.native.is_some())
    }

    pub fn class_simple(&self, name: Name) -> String {
        self.lookup_class(name).simple
    }

    pub fn package(&self, name: Name) -> String {
        self.lookup_class(name).package
    }

    /// Relative path of the unit holding `name`.
    pub fn file_path(&self, name: Name) -> String {
        let names = self.lookup_class(name);
        if names.package.is_empty() {
            format!("{}.hx", names.simple)
        } else {
            format!("{}/{}.hx", names.package.replace('.', "/"), names.simple)
        }
    }

    pub fn companion_simple(&self, name: Name, companion: Companion) -> String {
        format!("{}{}", self.lookup_class(name).simple, companion.suffix())
    }

    /// Companions live in their source class's module, so they are
    /// addressed through it (`pkg.Foo.Foo_Proxy`).
    pub fn companion(&self, name: Name, companion: Companion) -> String {
        let names = self.lookup_class(name);
        format!(
            "{}.{}{}",
            qualify(&names.package, &names.simple),
            names.simple,
            companion.suffix()
        )
    }

    /// The class that owns the static-init guard and statics of `name`.
    pub fn static_holder(&self, name: Name) -> String {
        let names = self.lookup_class(name);
        if names.is_interface {
            self.companion(name, Companion::StaticHolder)
        } else {
            names.fq()
        }
    }

    /// Name of a declared method.
    pub fn method(&self, owner: Name, method: &Method) -> String {
        let text = self.interner.lookup(method.name);
        let descriptor = mangle_descriptor(&method.ty().descriptor(&self.interner));
        if &*text == CONSTRUCTOR_NAME {
            return format!(
                "_init{descriptor}_{}",
                mangle_path(&self.interner.lookup(owner))
            );
        }
        if method.modifiers.is_private() && !method.is_static() {
            return format!(
                "{}{descriptor}_{}",
                encode_ident(&text),
                mangle_path(&self.interner.lookup(owner))
            );
        }
        format!("{}{descriptor}", encode_ident(&text))
    }

    /// Name of an overridable method, independent of its declaring class.
    pub fn virtual_method(&self, name: &str, ty: &MethodType) -> String {
        format!(
            "{}{}",
            encode_ident(name),
            mangle_descriptor(&ty.descriptor(&self.interner))
        )
    }

    pub fn field(&self, owner: Name, field: Name) -> String {
        self.fields
            .get(&(owner, field))
            .cloned()
            .unwrap_or_else(|| encode_member(&self.interner.lookup(field)))
    }

    /// Type annotation text.
    pub fn type_tag(&self, ty: &Type) -> String {
        match ty {
            Type::Void => "Void".to_string(),
            Type::Primitive(kind) => prim_tag(*kind).to_string(),
            Type::Reference(name) => self.class_fq(*name),
            Type::Array { .. } => array_class(ty).to_string(),
        }
    }

    /// Haxe function type of a method signature (`Int->Int->Bool`).
    pub fn functional_type(&self, ty: &MethodType) -> String {
        let mut parts: Vec<String> = ty.args.iter().map(|a| self.type_tag(a)).collect();
        if parts.is_empty() {
            parts.push("Void".to_string());
        }
        parts.push(self.type_tag(&ty.ret));
        parts.join("->")
    }
}

/// Strict superclasses of `class`, nearest first.
fn superclasses<'a>(
    program: &'a Program,
    class: &'a ClassModel,
) -> impl Iterator<Item = &'a ClassModel> {
    let mut current = class.superclass.and_then(|s| program.class_by_name(s));
    let mut steps = 0;
    std::iter::from_fn(move || {
        let model = current?;
        steps += 1;
        if steps > program.len() {
            return None;
        }
        current = model.superclass.and_then(|s| program.class_by_name(s));
        Some(model)
    })
}

fn class_names(interner: &SharedInterner, class: &ClassModel) -> ClassNames {
    let source = interner.lookup(class.name);
    ClassNames {
        package: package_of(&source),
        simple: simple_of(&source),
        native: class.native_name.map(|n| interner.lookup(n).to_string()),
        is_interface: class.is_interface(),
    }
}

fn package_of(source: &str) -> String {
    match source.rsplit_once('.') {
        Some((package, _)) => package
            .split('.')
            .map(package_segment)
            .collect::<Vec<_>>()
            .join("."),
        None => String::new(),
    }
}

fn simple_of(source: &str) -> String {
    let simple = source.rsplit_once('.').map_or(source, |(_, s)| s);
    let mut out = encode_ident(simple);
    if !out.starts_with(|c: char| c.is_ascii_uppercase()) {
        out.insert_str(0, "C_l");
    }
    if HAXE_STD_TYPES.contains(&out.as_str()) || is_runtime_type(&out) {
        out.push('_');
    }
    out
}

fn is_runtime_type(simple: &str) -> bool {
    [
        runtime_api::NUM,
        runtime_api::NATIVES,
        runtime_api::REFLECT,
        runtime_api::ARRAY_BASE,
        runtime_api::OBJECT_ARRAY,
        runtime_api::ANNOTATION_BASE,
        runtime_api::FFI_LIBRARY,
        runtime_api::DYNAMIC_LOAD,
    ]
    .contains(&simple)
        || TYPED_ARRAYS.contains(&simple)
}

fn package_segment(segment: &str) -> String {
    let mut out = encode_ident(segment);
    if !out.starts_with(|c: char| c.is_ascii_lowercase()) {
        out.insert_str(0, "p_l");
    }
    if HAXE_KEYWORDS.contains(&out.as_str()) || HAXE_STD_PACKAGES.contains(&out.as_str()) {
        out.push('_');
    }
    out
}

/// Replace every character that cannot appear in a Haxe identifier.
///
/// Lossy; only for names that are disambiguated afterwards (locals,
/// parameters) or that must match an existing target name.
fn sanitize(text: &str) -> String {
    let mut out: String = text
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// A local, parameter or native member name that is a valid,
/// non-reserved identifier.
pub fn escape_member(text: &str) -> String {
    let mut out = sanitize(text);
    if is_reserved(&out) {
        out.push('_');
    }
    out
}

fn is_reserved(ident: &str) -> bool {
    HAXE_KEYWORDS.contains(&ident)
        || RESERVED_MEMBERS.contains(&ident)
        || ident.starts_with(RESERVED_PREFIX)
}

// -- Injective encodings --
//
// Identifiers keep ASCII letters and digits. An escape is `_` followed by
// a lower-case letter: `_u` for `_`, `_d` for `$`, `_n` before a leading
// digit, `_x` plus six hex digits for anything else. Descriptors open with
// `_` followed by an upper-case type letter or the `_` that closes the
// argument list, so the first such pair marks where a method name ends.
// Inside descriptors and owner paths, class paths use upper-case escapes:
// `__` for `_`, `_S` for `/` and `.`, `_D` for `$`, `_E` for the
// terminating `;`.

fn hex_escape(out: &mut String, c: char, tag: char) {
    let _ = write!(out, "_{tag}{:06x}", u32::from(c));
}

/// Escape a source identifier. Distinct inputs give distinct outputs.
fn encode_ident(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    if text.is_empty() || text.starts_with(|c: char| c.is_ascii_digit()) {
        out.push_str("_n");
    }
    for c in text.chars() {
        match c {
            c if c.is_ascii_alphanumeric() => out.push(c),
            '_' => out.push_str("_u"),
            '$' => out.push_str("_d"),
            c => hex_escape(&mut out, c, 'x'),
        }
    }
    out
}

/// A class or field name: [`encode_ident`] plus a `_` suffix when the
/// result is reserved. The bare trailing `_` is never an escape.
fn encode_member(text: &str) -> String {
    let mut out = encode_ident(text);
    if is_reserved(&out) {
        out.push('_');
    }
    out
}

/// Encode a class path given in source (`app.Outer$Inner`) or internal
/// (`app/Outer$Inner`) form.
fn encode_path(out: &mut String, path: &str) {
    for c in path.chars() {
        match c {
            c if c.is_ascii_alphanumeric() => out.push(c),
            '_' => out.push_str("__"),
            '/' | '.' => out.push_str("_S"),
            '$' => out.push_str("_D"),
            c => hex_escape(out, c, 'X'),
        }
    }
}

/// `app.Counter` becomes `app_SCounter`.
fn mangle_path(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + 4);
    encode_path(&mut out, source);
    out
}

/// `(I[Ljava/lang/String;)V` becomes `_IALjava_Slang_SString_E_V`.
fn mangle_descriptor(descriptor: &str) -> String {
    let mut out = String::with_capacity(descriptor.len() + 8);
    let mut rest = descriptor;
    while let Some(c) = rest.chars().next() {
        rest = &rest[c.len_utf8()..];
        match c {
            '(' | ')' => out.push('_'),
            '[' => out.push('A'),
            'L' => {
                let (path, tail) = rest.split_once(';').unwrap_or((rest, ""));
                out.push('L');
                encode_path(&mut out, path);
                out.push_str("_E");
                rest = tail;
            }
            c if c.is_ascii_alphanumeric() => out.push(c),
            c => hex_escape(&mut out, c, 'X'),
        }
    }
    out
}

fn prim_tag(kind: PrimKind) -> &'static str {
    match kind {
        PrimKind::Bool => "Bool",
        PrimKind::Byte | PrimKind::Short | PrimKind::Char | PrimKind::Int => "Int",
        PrimKind::Long => "haxe.Int64",
        PrimKind::Float | PrimKind::Double => "Float",
    }
}

/// Support-library class backing arrays of `ty`.
///
/// One-dimensional primitive arrays are typed; everything else is an
/// [`OBJECT_ARRAY`](runtime_api::OBJECT_ARRAY).
pub fn array_class(ty: &Type) -> &'static str {
    match ty {
        Type::Array { element, dims: 1 } => match element.prim() {
            Some(kind) => typed_array(kind),
            None => runtime_api::OBJECT_ARRAY,
        },
        _ => runtime_api::OBJECT_ARRAY,
    }
}

const TYPED_ARRAYS: &[&str] = &[
    "BoolArray",
    "ByteArray",
    "ShortArray",
    "CharArray",
    "IntArray",
    "LongArray",
    "FloatArray",
    "DoubleArray",
];

fn typed_array(kind: PrimKind) -> &'static str {
    match kind {
        PrimKind::Bool => "BoolArray",
        PrimKind::Byte => "ByteArray",
        PrimKind::Short => "ShortArray",
        PrimKind::Char => "CharArray",
        PrimKind::Int => "IntArray",
        PrimKind::Long => "LongArray",
        PrimKind::Float => "FloatArray",
        PrimKind::Double => "DoubleArray",
    }
}

/// Zero value of a type, as target text.
pub fn default_value(ty: &Type) -> &'static str {
    match ty.prim() {
        Some(PrimKind::Bool) => "false",
        Some(PrimKind::Long) => "N.lnew(0, 0)",
        Some(PrimKind::Float | PrimKind::Double) => "0.0",
        Some(_) => "0",
        None => "null",
    }
}
