//! Native library bindings (`I_FFI`).
//!
//! A native-bound interface is implemented by a class that loads a dynamic
//! library, resolves one symbol per method and calls it through a cast
//! function pointer. Everything native sits behind `#if cpp`; on other
//! subtargets the methods return their zero value.
//!
//! A library that fails to open or a missing symbol is reported by the load
//! routine at run time; generation never fails because of one.

use hx_ir::{find_annotation, ClassModel, Method, Name, PrimKind, Type, STRING_CLASS};

use crate::context::{CodeWriter, GenEnv};
use crate::names::{default_value, Companion};
use crate::runtime_api::{natives, num, quote, ANN_STD_CALL, DYNAMIC_LOAD, FFI_LIBRARY};
use crate::synth::object_fq;

/// Emit `I_FFI` for a native-bound interface.
pub fn emit_ffi_binding(env: GenEnv<'_>, w: &mut CodeWriter, iface: &ClassModel) {
    let names = env.names;
    let methods: Vec<(Name, &Method)> = env
        .program
        .methods_to_implement(iface.name)
        .into_iter()
        .map(|entry| (env.program.class(entry.owner).name, entry.method))
        .collect();
    let slot = |owner: Name, m: &Method| format!("__ffi_{}", names.method(owner, m));

    w.open(&format!(
        "class {} extends {} implements {} implements {FFI_LIBRARY}",
        names.companion_simple(iface.name, Companion::Ffi),
        object_fq(env),
        names.class_fq(iface.name)
    ));
    w.line("private var __ffi_lib:haxe.Int64 = 0;");
    for &(owner, m) in &methods {
        w.line(&format!("private var {}:haxe.Int64 = 0;", slot(owner, m)));
    }
    w.open("public function new()");
    w.line("super();");
    w.close();

    w.open("@:noStack public function _ffi__load(library:String):Void");
    w.line("#if cpp");
    w.line(&format!("__ffi_lib = {DYNAMIC_LOAD}.dlopen(library);"));
    w.line(&format!(
        "if (__ffi_lib == 0) trace({} + library);",
        quote("Cannot open library ")
    ));
    for &(owner, m) in &methods {
        let symbol = env.text(m.name);
        w.line(&format!(
            "{} = {DYNAMIC_LOAD}.dlsym(__ffi_lib, {});",
            slot(owner, m),
            quote(&symbol)
        ));
        w.line(&format!(
            "if ({} == 0) trace({});",
            slot(owner, m),
            quote(&format!("Can't find symbol {symbol}"))
        ));
    }
    w.line("#end");
    w.close();

    w.open("@:noStack public function _ffi__close():Void");
    w.line("#if cpp");
    w.line(&format!("{DYNAMIC_LOAD}.dlclose(__ffi_lib);"));
    w.line("#end");
    w.line("__ffi_lib = 0;");
    w.close();

    for (owner, m) in methods {
        let params: Vec<String> = (0..m.params.len()).map(|i| format!("p{i}")).collect();
        let decl = params
            .iter()
            .zip(&m.params)
            .map(|(p, param)| format!("{p}:{}", names.type_tag(&param.ty)))
            .collect::<Vec<_>>()
            .join(", ");
        w.open(&format!(
            "@:noStack public function {}({decl}):{}",
            names.method(owner, m),
            names.type_tag(&m.ret)
        ));
        w.line("#if cpp");
        let std_call =
            find_annotation(&m.annotations, env.program.interner(), ANN_STD_CALL).is_some();
        let args: Vec<String> = params
            .iter()
            .zip(&m.params)
            .map(|(p, param)| marshal_arg(env, &param.ty, p))
            .collect();
        w.line(&native_call(env, m, std_call, &slot(owner, m), &args));
        w.line("#end");
        if !m.ret.is_void() {
            w.line(&format!("return {};", default_value(&m.ret)));
        }
        w.close();
    }
    w.close();
}

/// `untyped __cpp__('return (R)(((R (CC *)(A..))(void *)(size_t){0})((A){1}, ..));', ptr, args..);`
fn native_call(env: GenEnv<'_>, m: &Method, std_call: bool, ptr: &str, args: &[String]) -> String {
    let ret = native_type(env, &m.ret);
    let arg_types: Vec<&str> = m.params.iter().map(|p| native_type(env, &p.ty)).collect();
    let convention = if std_call { "(__stdcall *)" } else { "(*)" };
    let casted = arg_types
        .iter()
        .enumerate()
        .map(|(i, ty)| format!("({ty}){{{}}}", i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    let call = format!(
        "(({ret} {convention}({}))(void *)(size_t){{0}})({casted})",
        arg_types.join(", ")
    );
    let cpp = |code: String| {
        let mut parts = vec![format!("'{code}'"), ptr.to_string()];
        parts.extend(args.iter().cloned());
        format!("untyped __cpp__({})", parts.join(", "))
    };
    if m.ret.is_void() {
        format!("{};", cpp(format!("{call};")))
    } else if is_string(env, &m.ret) {
        // The native result is an hxcpp string; box it like a literal.
        let native = cpp(format!("::String((const char *)({call}))"));
        format!("return {};", num("str", &[&native]))
    } else {
        format!("{};", cpp(format!("return ({ret})({call});")))
    }
}

/// Strings cross as raw character pointers; everything else as is.
fn marshal_arg(env: GenEnv<'_>, ty: &Type, text: &str) -> String {
    if is_string(env, ty) {
        format!(
            "cpp.NativeString.c_str({})",
            natives("toNativeString", &[text])
        )
    } else {
        text.to_string()
    }
}

fn is_string(env: GenEnv<'_>, ty: &Type) -> bool {
    ty.class_name()
        .is_some_and(|name| &*env.text(name) == STRING_CLASS)
}

/// C type a value of `ty` is passed as.
fn native_type(env: GenEnv<'_>, ty: &Type) -> &'static str {
    match ty {
        Type::Void => "void",
        Type::Primitive(PrimKind::Bool) => "bool",
        Type::Primitive(PrimKind::Byte | PrimKind::Short | PrimKind::Char | PrimKind::Int) => "int",
        Type::Primitive(PrimKind::Long) => "int64_t",
        Type::Primitive(PrimKind::Float) => "float",
        Type::Primitive(PrimKind::Double) => "double",
        _ if is_string(env, ty) => "char*",
        _ => "void*",
    }
}
