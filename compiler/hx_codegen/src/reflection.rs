//! Reflection registration (`__classInfo__`) and annotation literals.
//!
//! The routine registers the class with the support library, then every
//! field, constructor and method with its modifiers, descriptor and
//! runtime-visible annotations:
//!
//! ```text
//! var c = R.i(Cls, proxy, adapter, ffi, "super", ["ifaces"], mods, [annots]);
//! R.f(c, "hx", slot, "name", "desc", mods, [annots]);
//! R.c(c, "hx", slot, mods, "desc", [annots], [[param annots]]);
//! R.m(c, id, "hx", slot, "name", mods, "desc", [annots], [[param annots]]);
//! ```
//!
//! Annotation values become instances of the annotation type's value
//! proxy, one slot per element in declaration order.

use hx_diagnostic::{Diagnostic, ErrorCode, Location};
use hx_ir::{find_annotation, Annotation, AnnotationValue, ClassModel, Method, CONSTRUCTOR_NAME};

use crate::body::{class_literal, float_literal, int_literal, long_literal};
use crate::context::{CodeWriter, GenEnv, UnitState};
use crate::names::Companion;
use crate::runtime_api::{
    num, quote, ANN_REMOVE_FIELD, CLASS_INFO, GENERATOR_ANNOTATION_PREFIX, REFLECT,
};
use crate::static_init::StaticInit;
use crate::synth::{select_dispatch, Dispatch};

/// Emit the `__classInfo__` routine for `class`.
pub(crate) fn emit_class_info(
    env: GenEnv<'_>,
    unit: &mut UnitState,
    w: &mut CodeWriter,
    class: &ClassModel,
) {
    let names = env.names;
    let mut lit = AnnotationLiterals {
        env,
        unit,
        si: StaticInit::new(None),
        location: Location::class(env.text(class.name).to_string()),
    };
    let mut lines = Vec::new();

    let companion = |kind: Companion, wanted: bool| {
        if wanted {
            names.companion(class.name, kind)
        } else {
            "null".to_string()
        }
    };
    let (proxy, adapter, ffi) = if class.is_interface() {
        let dispatch = select_dispatch(env.program, class);
        (
            companion(Companion::Proxy, dispatch == Dispatch::ReflectiveProxy),
            companion(Companion::Lambda, dispatch == Dispatch::FunctionalAdapter),
            companion(Companion::Ffi, class.is_native_bound()),
        )
    } else {
        ("null".to_string(), "null".to_string(), "null".to_string())
    };
    let superclass = class
        .superclass
        .map_or_else(|| "null".to_string(), |s| quote(&env.text(s)));
    let interfaces = class
        .interfaces
        .iter()
        .map(|i| quote(&env.text(*i)))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(format!(
        "var c = {REFLECT}.i({}, {proxy}, {adapter}, {ffi}, {superclass}, [{interfaces}], {}, {});",
        names.class_fq(class.name),
        class.modifiers.bits(),
        lit.list(&class.annotations)
    ));

    let interner = env.program.interner();
    let fields = class
        .fields
        .iter()
        .filter(|f| find_annotation(&f.annotations, interner, ANN_REMOVE_FIELD).is_none());
    for (slot, field) in fields.enumerate() {
        lines.push(format!(
            "{REFLECT}.f(c, {}, {slot}, {}, {}, {}, {});",
            quote(&names.field(class.name, field.name)),
            quote(&env.text(field.name)),
            quote(&field.ty.descriptor(interner)),
            field.modifiers.bits(),
            lit.list(&field.annotations)
        ));
    }

    let mut ctor_slot = 0;
    let mut method_slot = 0;
    for method in &class.methods {
        let text = env.text(method.name);
        let descriptor = quote(&method.ty().descriptor(interner));
        let annotations = lit.list(&method.annotations);
        let params = lit.param_lists(method);
        let hx_name = quote(&names.method(class.name, method));
        if &*text == CONSTRUCTOR_NAME {
            lines.push(format!(
                "{REFLECT}.c(c, {hx_name}, {ctor_slot}, {}, {descriptor}, {annotations}, {params});",
                method.modifiers.bits()
            ));
            ctor_slot += 1;
        } else if !env.program.is_special_name(method.name) {
            lines.push(format!(
                "{REFLECT}.m(c, {}, {hx_name}, {method_slot}, {}, {}, {descriptor}, {annotations}, {params});",
                method.id.0,
                quote(&text),
                method.modifiers.bits()
            ));
            method_slot += 1;
        }
    }

    w.open(&format!("static public function {CLASS_INFO}():Void"));
    lit.si.flush(w, names);
    for line in lines {
        w.line(&line);
    }
    w.close();
}

/// Builds annotation literal text, recording the static-init touches and
/// class references it needs.
pub(crate) struct AnnotationLiterals<'a, 'u> {
    pub env: GenEnv<'a>,
    pub unit: &'u mut UnitState,
    pub si: StaticInit,
    pub location: Location,
}

impl AnnotationLiterals<'_, '_> {
    /// `[a, b]` of the runtime-visible annotations in `annotations`.
    pub fn list(&mut self, annotations: &[Annotation]) -> String {
        let env = self.env;
        let items: Vec<String> = annotations
            .iter()
            .filter(|a| {
                a.runtime_visible && !env.text(a.ty).starts_with(GENERATOR_ANNOTATION_PREFIX)
            })
            .filter_map(|a| self.annotation(a))
            .collect();
        format!("[{}]", items.join(", "))
    }

    /// `[[..], [..]]`, one list per parameter.
    fn param_lists(&mut self, method: &Method) -> String {
        let lists: Vec<String> = (0..method.params.len())
            .map(|i| match method.param_annotations.get(i) {
                Some(annotations) => self.list(annotations),
                None => "[]".to_string(),
            })
            .collect();
        format!("[{}]", lists.join(", "))
    }

    /// `new pkg.T.T_Impl([..])`, or `None` (with a warning) when the
    /// annotation type is not part of the program.
    pub fn annotation(&mut self, annotation: &Annotation) -> Option<String> {
        let env = self.env;
        let Some(ty) = env.program.class_by_name(annotation.ty) else {
            self.unit.diagnostics.push(
                Diagnostic::warning(ErrorCode::W1002)
                    .with_message(format!(
                        "annotation type `{}` is not in the program; annotation dropped",
                        env.text(annotation.ty)
                    ))
                    .with_location(self.location.clone()),
            );
            return None;
        };
        self.unit.refs.add(ty.name);
        let values: Vec<String> = crate::synth::annotation_accessors(env, ty)
            .map(|m| {
                match annotation.get(m.name).or(m.default_value.as_ref()) {
                    Some(value) => self.value(value),
                    None => "null".to_string(),
                }
            })
            .collect();
        Some(format!(
            "new {}([{}])",
            env.names.companion(ty.name, Companion::AnnotationImpl),
            values.join(", ")
        ))
    }

    fn value(&mut self, value: &AnnotationValue) -> String {
        let env = self.env;
        match value {
            AnnotationValue::Bool(b) => b.to_string(),
            AnnotationValue::Byte(v) => int_literal(i32::from(*v)),
            AnnotationValue::Short(v) => int_literal(i32::from(*v)),
            AnnotationValue::Char(v) => int_literal(i32::from(*v)),
            AnnotationValue::Int(v) => int_literal(*v),
            AnnotationValue::Long(v) => long_literal(*v),
            AnnotationValue::Float(bits) => {
                let v = f32::from_bits(*bits);
                float_literal(f64::from(v), || format!("{v:?}"))
            }
            AnnotationValue::Double(bits) => {
                let v = f64::from_bits(*bits);
                float_literal(v, || format!("{v:?}"))
            }
            AnnotationValue::String(s) => num("str", &[&quote(&env.text(*s))]),
            AnnotationValue::Enum { class, field } => {
                self.si.touch(*class);
                self.unit.refs.add(*class);
                format!(
                    "{}.{}",
                    env.names.static_holder(*class),
                    env.names.field(*class, *field)
                )
            }
            AnnotationValue::Class(ty) => {
                self.unit.refs.add_type(ty);
                class_literal(env, ty)
            }
            AnnotationValue::Annotation(nested) => self
                .annotation(nested)
                .unwrap_or_else(|| "null".to_string()),
            AnnotationValue::Array(items) => {
                let items: Vec<String> = items.iter().map(|v| self.value(v)).collect();
                format!("[{}]", items.join(", "))
            }
        }
    }
}
