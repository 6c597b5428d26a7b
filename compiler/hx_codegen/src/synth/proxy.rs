//! Reflective invocation proxy (`I_Proxy`).

use hx_ir::{ClassModel, MethodType, Type};

use super::{object_declares, object_fq, return_dynamic};
use crate::body::box_kind;
use crate::context::{CodeWriter, GenEnv};
use crate::names::Companion;
use crate::runtime_api::{
    natives, quote, CLASS_CLASS, INVOCATION_HANDLER_CLASS, METHOD_CLASS, OBJECT_ARRAY,
};

/// Emit `I_Proxy`, implementing every method of `iface` (inherited ones
/// included, each once) by forwarding to the handler with the method's
/// numeric id and its boxed arguments.
pub fn emit_proxy(env: GenEnv<'_>, w: &mut CodeWriter, iface: &ClassModel) {
    let names = env.names;
    let program = env.program;
    let interner = program.interner();
    let class_tag = names.class_fq_by_str(CLASS_CLASS);
    let handler_tag = names.class_fq_by_str(INVOCATION_HANDLER_CLASS);

    let object = Type::Reference(interner.intern(hx_ir::OBJECT_CLASS));
    let invoke = names.virtual_method(
        "invoke",
        &MethodType::new(
            vec![
                object.clone(),
                Type::Reference(interner.intern(METHOD_CLASS)),
                Type::array(object.clone(), 1),
            ],
            object,
        ),
    );

    w.open(&format!(
        "class {} extends {} implements {}",
        names.companion_simple(iface.name, Companion::Proxy),
        object_fq(env),
        names.class_fq(iface.name)
    ));
    w.line(&format!("private var __clazz:{class_tag};"));
    w.line(&format!("private var __handler:{handler_tag};"));

    w.open(&format!("public function new(handler:{handler_tag})"));
    w.line("super();");
    w.line(&format!(
        "this.__clazz = {};",
        natives("resolveClass", &[&quote(&env.text(iface.name))])
    ));
    w.line("this.__handler = handler;");
    w.close();

    w.open("private function __invoke(methodId:Int, args:Array<Dynamic>):Dynamic");
    w.line("var method = this.__clazz.locateMethodById(methodId);");
    w.line(&format!(
        "return this.__handler.{invoke}(this, method, {OBJECT_ARRAY}.fromArray(args, {}));",
        quote("[Ljava.lang.Object;")
    ));
    w.close();

    for entry in program.methods_to_implement(iface.name) {
        let method = entry.method;
        let owner = program.class(entry.owner).name;
        let params: Vec<String> = (0..method.params.len()).map(|i| format!("p{i}")).collect();
        let decl = params
            .iter()
            .zip(&method.params)
            .map(|(p, param)| format!("{p}:{}", names.type_tag(&param.ty)))
            .collect::<Vec<_>>()
            .join(", ");
        let boxed = params
            .iter()
            .zip(&method.params)
            .map(|(p, param)| match param.ty.prim() {
                Some(kind) => natives(&format!("box{}", box_kind(kind)), &[p]),
                None => p.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ");

        let prefix = if object_declares(program, method) {
            "override "
        } else {
            ""
        };
        w.open(&format!(
            "{prefix}public function {}({decl}):{}",
            names.method(owner, method),
            names.type_tag(&method.ret)
        ));
        let call = format!("this.__invoke({}, [{boxed}])", method.id.0);
        w.line(&return_dynamic(env, method, &call));
        w.close();
    }
    w.close();
}
