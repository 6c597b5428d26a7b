//! Names of the support-library classes and members generated code calls.

/// Numeric helpers: wrapping arithmetic, shifts, comparisons, conversions.
pub const NUM: &str = "N";
/// Boxing, class lookup and native string conversion.
pub const NATIVES: &str = "HxNatives";
/// Reflection registration (`R.i`, `R.f`, `R.c`, `R.m`) and missing-method faults.
pub const REFLECT: &str = "R";
/// Base of every generated array class.
pub const ARRAY_BASE: &str = "ArrayBase";
/// Array of references (and of arrays).
pub const OBJECT_ARRAY: &str = "ObjectArray";
/// Base class of generated annotation value proxies.
pub const ANNOTATION_BASE: &str = "AnnotationBase";
/// Marker interface of generated FFI bindings.
pub const FFI_LIBRARY: &str = "HxFfiLibrary";
/// `dlopen`/`dlsym`/`dlclose` wrapper on C++ subtargets.
pub const DYNAMIC_LOAD: &str = "HxDynamicLoad";

/// Per-class static-init flag.
pub const SI_FLAG: &str = "SII";
/// Per-class static-init routine.
pub const SI_ROUTINE: &str = "SI";
/// Per-class reflection registration routine.
pub const CLASS_INFO: &str = "__classInfo__";
/// Method-scoped "last caught value" slot.
pub const CAUGHT_SLOT: &str = "__exc";
/// Catch-clause binding that is copied into [`CAUGHT_SLOT`].
pub const CATCH_BINDING: &str = "__e";
/// Prefix of string literal pool identifiers (`__str0`, `__str1`, ...).
pub const STRING_POOL_PREFIX: &str = "__str";

// Classes the generated code refers to by source name.
pub const CLASS_CLASS: &str = "java.lang.Class";
pub const INVOCATION_HANDLER_CLASS: &str = "java.lang.reflect.InvocationHandler";
pub const METHOD_CLASS: &str = "java.lang.reflect.Method";
pub const ANNOTATION_CLASS: &str = "java.lang.annotation.Annotation";

// Generator annotations recognized on classes, fields and methods. They
// steer generation and are never registered for reflection.
pub const GENERATOR_ANNOTATION_PREFIX: &str = "hx.annotation.";
pub const ANN_METHOD_BODY: &str = "hx.annotation.MethodBody";
pub const ANN_METHOD_BODY_LIST: &str = "hx.annotation.MethodBodyList";
pub const ANN_METHOD_BODY_PRE: &str = "hx.annotation.MethodBodyPre";
pub const ANN_METHOD_BODY_POST: &str = "hx.annotation.MethodBodyPost";
pub const ANN_META: &str = "hx.annotation.Meta";
pub const ANN_ADD_MEMBERS: &str = "hx.annotation.AddMembers";
pub const ANN_KEEP: &str = "hx.annotation.Keep";
pub const ANN_REMOVE_FIELD: &str = "hx.annotation.RemoveField";
pub const ANN_AVAILABLE_ON_TARGETS: &str = "hx.annotation.AvailableOnTargets";
pub const ANN_IMPORTS: &str = "hx.annotation.Imports";
pub const ANN_NATIVE_CONVERSION: &str = "hx.annotation.NativeConversion";
pub const ANN_STD_CALL: &str = "hx.annotation.StdCall";

/// `N.<name>(<args>)`.
pub fn num(name: &str, args: &[&str]) -> String {
    format!("{NUM}.{name}({})", args.join(", "))
}

/// `HxNatives.<name>(<args>)`.
pub fn natives(name: &str, args: &[&str]) -> String {
    format!("{NATIVES}.{name}({})", args.join(", "))
}

/// Quote text as a Haxe double-quoted string literal.
///
/// `$` needs no escaping in double-quoted strings; only single-quoted
/// strings interpolate.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => {
                out.push_str(&format!("\\x{:02X}", u32::from(c)));
            }
            c if !c.is_ascii() => {
                out.push_str(&format!("\\u{{{:X}}}", u32::from(c)));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
