//! Single-method functional adapter (`I_Lambda`).

use hx_ir::ClassModel;

use super::{object_declares, object_fq};
use crate::body::LiteralAccess;
use crate::context::{CodeWriter, GenEnv, UnitState};
use crate::error::CodegenResult;
use crate::method::{emit_method, MethodSite};
use crate::names::Companion;

/// Emit `I_Lambda`: the abstract method forwards its arguments to a Haxe
/// function value; default methods are copied through.
///
/// Copied bodies are emitted outside the interface's statics holder, so
/// their literals and static guard are reached through it.
pub fn emit_functional_adapter(
    env: GenEnv<'_>,
    unit: &mut UnitState,
    w: &mut CodeWriter,
    iface: &ClassModel,
) -> CodegenResult<()> {
    let names = env.names;
    let program = env.program;
    let methods = program.methods_to_implement(iface.name);

    w.open(&format!(
        "class {} extends {} implements {}",
        names.companion_simple(iface.name, Companion::Lambda),
        object_fq(env),
        names.class_fq(iface.name)
    ));

    let Some(target) = methods.iter().find(|e| !e.method.has_body()) else {
        w.close();
        return Ok(());
    };
    let fn_type = names.functional_type(&target.method.ty());
    w.line(&format!("private var __func:{fn_type};"));
    w.open(&format!("public function new(func:{fn_type})"));
    w.line("super();");
    w.line("this.__func = func;");
    w.close();

    for entry in &methods {
        let method = entry.method;
        let owner = program.class(entry.owner);
        let is_override = object_declares(program, method);
        if method.has_body() {
            let site = MethodSite {
                owner,
                own: None,
                literals: LiteralAccess::Qualified(iface.name),
                is_override,
            };
            emit_method(env, unit, w, method, site)?;
            continue;
        }

        let params: Vec<String> = (0..method.params.len()).map(|i| format!("p{i}")).collect();
        let decl = params
            .iter()
            .zip(&method.params)
            .map(|(p, param)| format!("{p}:{}", names.type_tag(&param.ty)))
            .collect::<Vec<_>>()
            .join(", ");
        let prefix = if is_override { "override " } else { "" };
        w.open(&format!(
            "{prefix}public function {}({decl}):{}",
            names.method(owner.name, method),
            names.type_tag(&method.ret)
        ));
        let call = format!("__func({})", params.join(", "));
        if method.ret.is_void() {
            w.line(&format!("{call};"));
        } else {
            w.line(&format!("return {call};"));
        }
        w.close();
    }
    w.close();
    Ok(())
}
