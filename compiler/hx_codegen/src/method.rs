//! Method declarations: signature, body and error recovery.
//!
//! A body is produced in one of four ways, in order of preference:
//! target-specific text from `MethodBody` annotations, the translated
//! statement tree, a missing-method fault for bodiless methods, or an
//! errored-method stub when translation failed with a recoverable error.

use hx_diagnostic::{errored_method, Diagnostic, ErrorCode, Location};
use hx_ir::{
    find_annotation, find_annotations, Annotation, AnnotationValue, Body, ClassModel, Method,
    Name, StmtKind, Type, CONSTRUCTOR_NAME,
};

use crate::body::{BodyGen, BodySpec, LiteralAccess};
use crate::context::{CodeWriter, GenEnv, UnitState};
use crate::error::CodegenResult;
use crate::names::escape_member;
use crate::runtime_api::{
    quote, ANN_METHOD_BODY, ANN_METHOD_BODY_LIST, ANN_METHOD_BODY_POST, ANN_METHOD_BODY_PRE,
    REFLECT,
};

/// Where a method is emitted and how its body sees the rest of the unit.
#[derive(Copy, Clone)]
pub(crate) struct MethodSite<'a> {
    /// The class that declares the method.
    pub owner: &'a ClassModel,
    /// Class whose statics are already initialized inside the body.
    pub own: Option<Name>,
    pub literals: LiteralAccess,
    pub is_override: bool,
}

/// Emit `method` as a complete function declaration.
///
/// Fatal errors propagate; anything else replaces the body with an
/// errored-method stub and records a warning.
pub(crate) fn emit_method(
    env: GenEnv<'_>,
    unit: &mut UnitState,
    w: &mut CodeWriter,
    method: &Method,
    site: MethodSite<'_>,
) -> CodegenResult<()> {
    let names = env.names;
    let owner = site.owner;
    let is_ctor = &*env.text(method.name) == CONSTRUCTOR_NAME;
    let params = param_names(env, method);

    let ret = if is_ctor {
        names.class_fq(owner.name)
    } else {
        names.type_tag(&method.ret)
    };
    let decl = params
        .iter()
        .map(|(name, ty)| format!("{name}:{}", names.type_tag(ty)))
        .collect::<Vec<_>>()
        .join(", ");
    let mut header = String::new();
    if site.is_override && !is_ctor && !method.is_static() {
        header.push_str("override ");
    }
    header.push_str("public ");
    if method.is_static() {
        header.push_str("static ");
    }
    header.push_str(&format!(
        "function {}({decl}):{ret}",
        names.method(owner.name, method)
    ));

    let location = Location::member(
        env.text(owner.name).to_string(),
        format!(
            "{}{}",
            env.text(method.name),
            method.ty().descriptor(env.program.interner())
        ),
    );

    w.open(&header);
    if let Some(native) = native_body(env, unit, method, &location) {
        w.line(&native);
    } else if let Some(body) = &method.body {
        let spec = BodySpec {
            body,
            params: &params,
            is_ctor,
            own: site.own,
            literals: site.literals,
        };
        match BodyGen::new(env, unit, &spec).run() {
            Ok(out) => {
                w.append(out);
                if is_ctor && !ends_in_exit(body) {
                    w.line("return this;");
                }
            }
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                let cause = err.to_string();
                tracing::warn!(method = %location, error = %cause, "replacing method body with errored stub");
                unit.diagnostics.push(errored_method(location.clone(), &cause));
                w.line(&errored_stub(&location, &cause));
            }
        }
    } else {
        w.line(&missing_stub(env, owner, method));
    }
    w.close();
    Ok(())
}

/// Parameter names as the body sees them, unique within the method.
pub(crate) fn param_names(env: GenEnv<'_>, method: &Method) -> Vec<(String, Type)> {
    let mut out: Vec<(String, Type)> = Vec::with_capacity(method.params.len());
    for (i, param) in method.params.iter().enumerate() {
        let mut name = escape_member(&env.text(param.name));
        if out.iter().any(|(n, _)| *n == name) {
            name = format!("{name}_{i}");
        }
        out.push((name, param.ty.clone()));
    }
    out
}

/// Whether control never falls off the end of `body`.
fn ends_in_exit(body: &Body) -> bool {
    body.root()
        .last()
        .and_then(|&id| body.stmt(id))
        .is_some_and(|s| matches!(s.kind, StmtKind::Return(_) | StmtKind::Throw(_)))
}

/// `throw R.n("cls", id);`: the method has no body to run.
pub(crate) fn missing_stub(env: GenEnv<'_>, owner: &ClassModel, method: &Method) -> String {
    format!(
        "throw {REFLECT}.n({}, {});",
        quote(&env.text(owner.name)),
        method.id.0
    )
}

fn errored_stub(location: &Location, cause: &str) -> String {
    let member = location.member.as_deref().unwrap_or_default();
    format!(
        "throw {REFLECT}.erroredMethod({});",
        quote(&format!(
            "Errored method: {}.{member} :: {cause}",
            location.class
        ))
    )
}

// ── Target-specific bodies ──────────────────────────────────────────

/// One `MethodBody` entry: an empty target is the default body.
struct TargetBody {
    target: String,
    text: String,
}

/// Body text given by `MethodBody` annotations, wrapped in its pre/post
/// text, or `None` when the method has none.
fn native_body(
    env: GenEnv<'_>,
    unit: &mut UnitState,
    method: &Method,
    location: &Location,
) -> Option<String> {
    let interner = env.program.interner();
    let mut entries: Vec<&Annotation> = find_annotations(&method.annotations, interner, ANN_METHOD_BODY);
    if let Some(list) = find_annotation(&method.annotations, interner, ANN_METHOD_BODY_LIST) {
        match list.get_str(interner, "value").and_then(AnnotationValue::as_array) {
            Some(items) => entries.extend(items.iter().filter_map(AnnotationValue::as_annotation)),
            None => unit.diagnostics.push(ignored_annotation(location, ANN_METHOD_BODY_LIST)),
        }
    }
    if entries.is_empty() {
        return None;
    }

    let mut bodies = Vec::with_capacity(entries.len());
    for entry in entries {
        let text = entry
            .get_str(interner, "value")
            .and_then(AnnotationValue::as_string);
        let Some(text) = text else {
            unit.diagnostics.push(ignored_annotation(location, ANN_METHOD_BODY));
            continue;
        };
        let target = entry
            .get_str(interner, "target")
            .and_then(AnnotationValue::as_string)
            .map(|t| env.text(t).to_string())
            .unwrap_or_default();
        bodies.push(TargetBody {
            target,
            text: env.text(text).to_string(),
        });
    }
    if bodies.is_empty() {
        return None;
    }

    let mut out = Vec::new();
    if let Some(pre) = annotation_text(env, method, ANN_METHOD_BODY_PRE) {
        out.push(pre);
    }
    out.push(select_by_target(&bodies));
    if let Some(post) = annotation_text(env, method, ANN_METHOD_BODY_POST) {
        out.push(post);
    }
    Some(out.join("\n"))
}

fn annotation_text(env: GenEnv<'_>, method: &Method, ty: &str) -> Option<String> {
    let interner = env.program.interner();
    find_annotation(&method.annotations, interner, ty)?
        .get_str(interner, "value")?
        .as_string()
        .map(|t| env.text(t).to_string())
}

/// `#if (a) .. #elseif (b) .. #else .. #end`, or the default alone.
fn select_by_target(bodies: &[TargetBody]) -> String {
    let default = bodies.iter().find(|b| b.target.is_empty());
    let targeted: Vec<&TargetBody> = bodies.iter().filter(|b| !b.target.is_empty()).collect();
    if targeted.is_empty() {
        return default.map(|b| b.text.clone()).unwrap_or_default();
    }
    let mut out = Vec::new();
    for (i, body) in targeted.iter().enumerate() {
        let keyword = if i == 0 { "#if" } else { "#elseif" };
        out.push(format!("{keyword} ({})", body.target));
        out.push(body.text.clone());
    }
    if let Some(default) = default {
        out.push("#else".to_string());
        out.push(default.text.clone());
    }
    out.push("#end".to_string());
    out.join("\n")
}

pub(crate) fn ignored_annotation(location: &Location, annotation: &str) -> Diagnostic {
    Diagnostic::warning(ErrorCode::W1002)
        .with_message(format!("ignoring malformed `{annotation}` annotation"))
        .with_location(location.clone())
}
