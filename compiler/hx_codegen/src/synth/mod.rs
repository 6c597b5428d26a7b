//! Companion classes synthesized next to an interface.
//!
//! Every interface gets exactly one dispatch companion, chosen by
//! [`select_dispatch`]:
//!
//! - [`Dispatch::FunctionalAdapter`]: the interface has one abstract method
//!   and extends nothing; `I_Lambda` wraps a Haxe function value.
//! - [`Dispatch::ReflectiveProxy`]: everything else; `I_Proxy` boxes the
//!   arguments and forwards every call to an invocation handler.
//!
//! Annotation types additionally get an `I_Impl` value proxy backed by a
//! positional array.

mod annotation;
mod functional;
mod proxy;

pub use annotation::emit_annotation_proxy;
pub use functional::emit_functional_adapter;
pub use proxy::emit_proxy;

pub(crate) use annotation::accessors as annotation_accessors;

use hx_ir::{ClassModel, Method, Program, OBJECT_CLASS};

use crate::context::GenEnv;
use crate::runtime_api::natives;

/// Which dispatch companion an interface gets.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Dispatch {
    ReflectiveProxy,
    FunctionalAdapter,
}

/// The functional adapter needs a single abstract method and no
/// super-interfaces; anything else falls back to the reflective proxy.
pub fn select_dispatch(program: &Program, iface: &ClassModel) -> Dispatch {
    if iface.interfaces.is_empty() && program.abstract_methods(iface.name).len() == 1 {
        Dispatch::FunctionalAdapter
    } else {
        Dispatch::ReflectiveProxy
    }
}

/// Whether `java.lang.Object` declares an overridable `method`, so an
/// implementation extending it must say `override`.
pub(crate) fn object_declares(program: &Program, method: &Method) -> bool {
    program
        .interner()
        .get(OBJECT_CLASS)
        .and_then(|object| program.class_by_name(object))
        .and_then(|object| object.find_method(method.name, &method.ty()))
        .is_some_and(|m| !m.is_static() && !m.modifiers.is_private())
}

/// Target name of the root class companions extend.
pub(crate) fn object_fq(env: GenEnv<'_>) -> String {
    env.names.class_fq_by_str(OBJECT_CLASS)
}

/// `return <unbox>(call);`, `return cast(call, T);` or `call;`.
pub(crate) fn return_dynamic(env: GenEnv<'_>, method: &Method, call: &str) -> String {
    let ret = &method.ret;
    if ret.is_void() {
        return format!("{call};");
    }
    match ret.prim() {
        Some(kind) => format!(
            "return {};",
            natives(&format!("unbox{}", crate::body::box_kind(kind)), &[call])
        ),
        None => format!("return cast({call}, {});", env.names.type_tag(ret)),
    }
}
