//! One generation unit per class.
//!
//! A class unit holds the class itself. An interface unit holds the
//! interface declaration, its statics holder (`I_IFields_`), its dispatch
//! companion and, where the markers ask for them, the annotation value
//! proxy and the native binding.
//!
//! Method bodies are generated before the surrounding declarations are
//! written, because the literal table they fill is declared ahead of them.

use hx_diagnostic::{Diagnostic, Location};
use hx_ir::{
    find_annotation, Annotation, AnnotationValue, ClassId, ClassModel, Field, Literal, Method,
    MethodType, Name, Program, STATIC_INIT_NAME, STRING_CLASS,
};

use crate::body::{float_literal, int_literal, long_literal, LiteralAccess};
use crate::context::{CodeWriter, GenEnv, LineMapping, UnitState};
use crate::error::{CodegenError, CodegenResult};
use crate::ffi::emit_ffi_binding;
use crate::method::{emit_method, ignored_annotation, param_names, MethodSite};
use crate::names::{default_value, Companion};
use crate::reflection::emit_class_info;
use crate::runtime_api::{
    num, quote, ANN_ADD_MEMBERS, ANN_AVAILABLE_ON_TARGETS, ANN_IMPORTS, ANN_KEEP, ANN_META,
    ANN_REMOVE_FIELD, SI_ROUTINE,
};
use crate::source_map::SourceMap;
use crate::static_init::emit_routine;
use crate::synth::{emit_annotation_proxy, emit_functional_adapter, emit_proxy, select_dispatch, Dispatch};
use crate::{GenOptions, Names};

/// Everything generated for one class.
#[derive(Debug)]
pub struct ClassOutput {
    pub class: ClassId,
    /// Dotted source name.
    pub class_name: String,
    /// `None` for native-mapped classes and for classes whose generation
    /// failed fatally.
    pub unit: Option<Unit>,
    /// Source names of the classes the unit refers to, first use first.
    pub dependencies: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ClassOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// A generated source file.
#[derive(Debug)]
pub struct Unit {
    /// Path relative to the output root (`app/Point.hx`).
    pub path: String,
    pub text: String,
    pub source_map: Option<SourceMap>,
}

/// Generate the unit of one class.
///
/// A fatal error drops the unit and is reported as an error diagnostic;
/// other classes are unaffected.
pub fn generate_class(
    program: &Program,
    names: &Names,
    options: &GenOptions,
    id: ClassId,
) -> ClassOutput {
    let class = program.class(id);
    let class_name = program.interner().lookup(class.name).to_string();
    let _span = tracing::debug_span!("class", name = %class_name).entered();

    let mut output = ClassOutput {
        class: id,
        class_name,
        unit: None,
        dependencies: Vec::new(),
        diagnostics: Vec::new(),
    };
    if class.native_name.is_some() {
        tracing::debug!("native-mapped, not emitted");
        return output;
    }

    let env = GenEnv::new(program, names, options);
    let mut unit = UnitState::default();
    let generated = if class.is_interface() {
        interface_unit(env, &mut unit, class)
    } else {
        class_unit(env, &mut unit, class)
    };

    match generated {
        Ok(w) => {
            let path = names.file_path(class.name);
            let (text, mappings) = w.finish();
            let source_map = options
                .emit_source_maps
                .then(|| source_map(env, class, &path, &mappings))
                .flatten();
            tracing::debug!(lines = text.lines().count(), literals = unit.literals.len(), "unit generated");
            output.unit = Some(Unit {
                path,
                text,
                source_map,
            });
        }
        Err(err) => {
            tracing::debug!(error = %err, "unit dropped");
            let location = Location::class(output.class_name.clone());
            unit.diagnostics.push(err.to_diagnostic(location));
        }
    }

    output.dependencies = unit
        .refs
        .into_vec()
        .into_iter()
        .filter(|&name| name != class.name)
        .map(|name| env.text(name).to_string())
        .collect();
    output.diagnostics = unit.diagnostics;
    output
}

fn source_map(
    env: GenEnv<'_>,
    class: &ClassModel,
    path: &str,
    mappings: &[LineMapping],
) -> Option<SourceMap> {
    let source = class.source_file?;
    let file = path.rsplit('/').next().unwrap_or(path);
    let mut map = SourceMap::new(file, vec![env.text(source).to_string()]);
    for m in mappings {
        map.record(m.generated, 0, m.source);
    }
    Some(map)
}

// ── Class units ─────────────────────────────────────────────────────

fn class_unit(
    env: GenEnv<'_>,
    unit: &mut UnitState,
    class: &ClassModel,
) -> CodegenResult<CodeWriter> {
    let names = env.names;
    let program = env.program;
    let location = Location::class(env.text(class.name).to_string());

    let mut extends = String::new();
    if let Some(sup) = class.superclass {
        require_class(env, sup)?;
        unit.refs.add(sup);
        extends = format!(" extends {}", names.class_fq(sup));
    }
    for iface in &class.interfaces {
        require_class(env, *iface)?;
        unit.refs.add(*iface);
        extends.push_str(&format!(" implements {}", names.class_fq(*iface)));
    }

    let mut methods = CodeWriter::new();
    for method in &class.methods {
        let site = MethodSite {
            owner: class,
            own: Some(class.name),
            literals: LiteralAccess::Local,
            is_override: program.is_overriding(class.name, method.name, &method.ty()),
        };
        emit_method(env, unit, &mut methods, method, site)?;
    }
    for (owner, method) in inherited_defaults(program, class) {
        tracing::trace!(method = %env.text(method.name), "default method copied");
        let site = MethodSite {
            owner,
            own: Some(class.name),
            literals: LiteralAccess::Local,
            is_override: false,
        };
        emit_method(env, unit, &mut methods, method, site)?;
    }
    let info = class_info(env, unit, class);

    let mut w = CodeWriter::new();
    let close_targets = write_header(env, unit, &mut w, class, &location);
    w.open(&format!("class {}{extends}", names.class_simple(class.name)));
    for line in annotation_strings(env, unit, &class.annotations, ANN_ADD_MEMBERS, &location) {
        w.line(&line);
    }
    let fields: Vec<&Field> = visible_fields(env, class).collect();
    for field in &fields {
        write_field(env, &mut w, class, field);
    }
    write_statics(env, unit, &mut w, class, &fields);
    w.open("public function new()");
    if class.superclass.is_some() {
        w.line("super();");
    }
    w.line(&format!("{SI_ROUTINE}();"));
    w.close();
    w.append(methods);
    if let Some(info) = info {
        w.append(info);
    }
    w.close();
    if close_targets {
        w.line("#end");
    }
    Ok(w)
}

/// Default methods a concrete class must carry itself: bodies inherited
/// from interfaces that neither the class nor a superclass provides.
fn inherited_defaults<'p>(
    program: &'p Program,
    class: &'p ClassModel,
) -> Vec<(&'p ClassModel, &'p Method)> {
    if class.is_interface() {
        return Vec::new();
    }
    let from_super: Vec<(Name, MethodType)> = class
        .superclass
        .map(|sup| {
            program
                .methods_to_implement(sup)
                .into_iter()
                .map(|e| (e.method.name, e.method.ty()))
                .collect()
        })
        .unwrap_or_default();

    program
        .methods_to_implement(class.name)
        .into_iter()
        .filter(|e| e.method.has_body())
        .filter(|e| {
            let ty = e.method.ty();
            class.find_method(e.method.name, &ty).is_none()
                && !program.is_overriding(class.name, e.method.name, &ty)
                && !from_super.contains(&(e.method.name, ty))
        })
        .map(|e| (program.class(e.owner), e.method))
        .collect()
}

// ── Interface units ─────────────────────────────────────────────────

fn interface_unit(
    env: GenEnv<'_>,
    unit: &mut UnitState,
    iface: &ClassModel,
) -> CodegenResult<CodeWriter> {
    let names = env.names;
    let program = env.program;
    let location = Location::class(env.text(iface.name).to_string());

    let mut extends = String::new();
    for sup in &iface.interfaces {
        require_class(env, *sup)?;
        unit.refs.add(*sup);
        extends.push_str(&format!(" extends {}", names.class_fq(*sup)));
    }

    let mut statics = CodeWriter::new();
    for method in iface.methods.iter().filter(|m| m.is_static()) {
        let site = MethodSite {
            owner: iface,
            own: Some(iface.name),
            literals: LiteralAccess::Local,
            is_override: false,
        };
        emit_method(env, unit, &mut statics, method, site)?;
    }

    let mut companions = CodeWriter::new();
    match select_dispatch(program, iface) {
        Dispatch::FunctionalAdapter => {
            emit_functional_adapter(env, unit, &mut companions, iface)?;
        }
        Dispatch::ReflectiveProxy => emit_proxy(env, &mut companions, iface),
    }
    if iface.is_annotation_type() {
        companions.blank();
        emit_annotation_proxy(env, &mut companions, iface);
    }
    if iface.is_native_bound() {
        companions.blank();
        emit_ffi_binding(env, &mut companions, iface);
    }
    let info = class_info(env, unit, iface);

    let mut w = CodeWriter::new();
    let close_targets = write_header(env, unit, &mut w, iface, &location);
    w.open(&format!("interface {}{extends}", names.class_simple(iface.name)));
    for method in iface
        .methods
        .iter()
        .filter(|m| !m.is_static() && !program.is_special_name(m.name))
    {
        let params = param_names(env, method)
            .into_iter()
            .map(|(name, ty)| format!("{name}:{}", names.type_tag(&ty)))
            .collect::<Vec<_>>()
            .join(", ");
        w.line(&format!(
            "function {}({params}):{};",
            names.method(iface.name, method),
            names.type_tag(&method.ret)
        ));
    }
    w.close();
    w.blank();

    w.open(&format!(
        "class {}",
        names.companion_simple(iface.name, Companion::StaticHolder)
    ));
    let fields: Vec<&Field> = visible_fields(env, iface).collect();
    for field in &fields {
        write_field(env, &mut w, iface, field);
    }
    write_statics(env, unit, &mut w, iface, &fields);
    w.append(statics);
    if let Some(info) = info {
        w.append(info);
    }
    w.close();
    w.blank();
    w.append(companions);
    if close_targets {
        w.line("#end");
    }
    Ok(w)
}

// ── Shared pieces ───────────────────────────────────────────────────

fn require_class(env: GenEnv<'_>, name: Name) -> CodegenResult<()> {
    if env.program.get(name).is_some() {
        Ok(())
    } else {
        Err(CodegenError::UnresolvedClass {
            class: env.text(name).to_string(),
        })
    }
}

fn class_info(env: GenEnv<'_>, unit: &mut UnitState, class: &ClassModel) -> Option<CodeWriter> {
    if !env.options.emit_reflection_info {
        return None;
    }
    let mut w = CodeWriter::new();
    emit_class_info(env, unit, &mut w, class);
    Some(w)
}

/// `package`, imports, the target guard and metadata lines. Returns whether
/// a `#if` was opened that the caller must close.
fn write_header(
    env: GenEnv<'_>,
    unit: &mut UnitState,
    w: &mut CodeWriter,
    class: &ClassModel,
    location: &Location,
) -> bool {
    let package = env.names.package(class.name);
    if package.is_empty() {
        w.line("package;");
    } else {
        w.line(&format!("package {package};"));
    }
    w.blank();

    let imports = annotation_strings(env, unit, &class.annotations, ANN_IMPORTS, location);
    for line in &imports {
        w.line(line);
    }
    if !imports.is_empty() {
        w.blank();
    }

    let targets = annotation_strings(env, unit, &class.annotations, ANN_AVAILABLE_ON_TARGETS, location);
    if !targets.is_empty() {
        w.line(&format!("#if ({})", targets.join(" || ")));
    }
    for line in annotation_strings(env, unit, &class.annotations, ANN_META, location) {
        w.line(&line);
    }
    !targets.is_empty()
}

/// The `value` element of a generator annotation as text lines: a single
/// string or an array of strings.
fn annotation_strings(
    env: GenEnv<'_>,
    unit: &mut UnitState,
    annotations: &[Annotation],
    ty: &str,
    location: &Location,
) -> Vec<String> {
    let interner = env.program.interner();
    let Some(annotation) = find_annotation(annotations, interner, ty) else {
        return Vec::new();
    };
    let text = |v: &AnnotationValue| v.as_string().map(|s| env.text(s).to_string());
    let lines = match annotation.get_str(interner, "value") {
        Some(AnnotationValue::Array(items)) => items.iter().map(text).collect::<Option<Vec<_>>>(),
        Some(value) => text(value).map(|s| vec![s]),
        None => None,
    };
    lines.unwrap_or_else(|| {
        unit.diagnostics.push(ignored_annotation(location, ty));
        Vec::new()
    })
}

fn visible_fields<'a>(
    env: GenEnv<'a>,
    class: &'a ClassModel,
) -> impl Iterator<Item = &'a Field> + 'a {
    let interner = env.program.interner();
    class
        .fields
        .iter()
        .filter(move |f| find_annotation(&f.annotations, interner, ANN_REMOVE_FIELD).is_none())
}

/// Declaration with the zero value, or the constant for non-string
/// constants. String constants are assigned by the init routine.
fn write_field(env: GenEnv<'_>, w: &mut CodeWriter, class: &ClassModel, field: &Field) {
    let names = env.names;
    let mut decl = String::new();
    if find_annotation(&field.annotations, env.program.interner(), ANN_KEEP).is_some() {
        decl.push_str("@:keep ");
    }
    decl.push_str(if field.is_static() { "static public var " } else { "public var " });
    let value = match &field.constant {
        Some(constant) if field.is_static() => constant_text(constant)
            .unwrap_or_else(|| default_value(&field.ty).to_string()),
        _ => default_value(&field.ty).to_string(),
    };
    decl.push_str(&format!(
        "{}:{} = {value};",
        names.field(class.name, field.name),
        names.type_tag(&field.ty)
    ));
    w.line(&decl);
}

/// Target text of a constant usable in a declaration; strings (and class
/// literals) are not.
fn constant_text(constant: &Literal) -> Option<String> {
    Some(match constant {
        Literal::Null => "null".to_string(),
        Literal::Bool(b) => b.to_string(),
        Literal::Int(v) => int_literal(*v),
        Literal::Long(v) => long_literal(*v),
        Literal::Float(bits) => {
            let v = f32::from_bits(*bits);
            float_literal(f64::from(v), || format!("{v:?}"))
        }
        Literal::Double(bits) => {
            let v = f64::from_bits(*bits);
            float_literal(v, || format!("{v:?}"))
        }
        Literal::String(_) | Literal::Class(_) => return None,
    })
}

/// Literal fields and the init routine: literals first, then string
/// constants, then the static-initializer method.
fn write_statics(
    env: GenEnv<'_>,
    unit: &mut UnitState,
    w: &mut CodeWriter,
    class: &ClassModel,
    fields: &[&Field],
) {
    let names = env.names;
    let string_tag = names.class_fq_by_str(STRING_CLASS);

    let string_constants: Vec<(String, Name)> = fields
        .iter()
        .filter(|f| f.is_static())
        .filter_map(|f| match f.constant {
            Some(Literal::String(text)) => Some((names.field(class.name, f.name), text)),
            _ => None,
        })
        .collect();
    let constant_idents: Vec<(String, String)> = string_constants
        .into_iter()
        .map(|(field, text)| (field, unit.literals.ident(text)))
        .collect();

    for (_, ident, _) in unit.literals.entries() {
        w.line(&format!("static public var {ident}:{string_tag};"));
    }
    let clinit = class
        .methods
        .iter()
        .find(|m| &*env.text(m.name) == STATIC_INIT_NAME);
    let literals: Vec<String> = unit
        .literals
        .entries()
        .map(|(_, ident, text)| format!("{ident} = {};", num("str", &[&quote(&env.text(text))])))
        .collect();
    emit_routine(w, |w| {
        for line in &literals {
            w.line(line);
        }
        for (field, ident) in &constant_idents {
            w.line(&format!("{field} = {ident};"));
        }
        if let Some(clinit) = clinit {
            w.line(&format!("{}();", names.method(class.name, clinit)));
        }
    });
}
