//! Annotation value proxy (`I_Impl`).

use hx_ir::{ClassModel, MethodType, Type};

use crate::context::{CodeWriter, GenEnv};
use crate::names::Companion;
use crate::runtime_api::{natives, quote, ANNOTATION_BASE, CLASS_CLASS};

/// Emit `I_Impl`: accessor `k` (in declaration order) returns slot `k` of
/// the array passed to the constructor.
pub fn emit_annotation_proxy(env: GenEnv<'_>, w: &mut CodeWriter, iface: &ClassModel) {
    let names = env.names;
    let interner = env.program.interner();

    w.open(&format!(
        "class {} extends {ANNOTATION_BASE} implements {}",
        names.companion_simple(iface.name, Companion::AnnotationImpl),
        names.class_fq(iface.name)
    ));
    w.line("private var __data:Array<Dynamic>;");
    w.open("public function new(data:Array<Dynamic> = null)");
    w.line("super();");
    w.line("this.__data = data;");
    w.close();

    let class_ty = MethodType::new(vec![], Type::Reference(interner.intern(CLASS_CLASS)));
    w.open(&format!(
        "public function {}():{}",
        names.virtual_method("annotationType", &class_ty),
        names.class_fq_by_str(CLASS_CLASS)
    ));
    w.line(&format!(
        "return {};",
        natives("resolveClass", &[&quote(&env.text(iface.name))])
    ));
    w.close();

    for (slot, method) in accessors(env, iface).enumerate() {
        w.open(&format!(
            "public function {}():{}",
            names.method(iface.name, method),
            names.type_tag(&method.ret)
        ));
        w.line(&format!("return this.__data[{slot}];"));
        w.close();
    }
    w.close();
}

/// Element accessors of an annotation type, in declaration order.
pub(crate) fn accessors<'a>(
    env: GenEnv<'a>,
    iface: &'a ClassModel,
) -> impl Iterator<Item = &'a hx_ir::Method> + 'a {
    iface
        .methods
        .iter()
        .filter(move |m| !m.is_static() && !env.program.is_special_name(m.name))
}
