//! Expression translation.
//!
//! Integer results never rely on the target's native arithmetic: anything
//! that can overflow or widen goes through a `N.*` helper or is re-truncated
//! with a narrowing wrapper chosen by the *result* type.

use hx_ir::{
    find_annotation, BinaryOp, CallKind, ExprId, ExprKind, ExprRange, FieldRef, Literal, Method,
    MethodEntry, MethodRef, Name, PrimKind, Type, UnaryOp,
};

use super::{BodyGen, LiteralAccess};
use crate::context::GenEnv;
use crate::error::{CodegenError, CodegenResult};
use crate::names::{array_class, default_value, escape_member, Companion};
use crate::runtime_api::{
    natives, num, quote, ANN_NATIVE_CONVERSION, ARRAY_BASE, CAUGHT_SLOT, OBJECT_ARRAY,
};
use crate::static_init::guard_call;
use crate::synth::{select_dispatch, Dispatch};
use crate::Names;

impl<'a> BodyGen<'a, '_> {
    pub(super) fn expr(&mut self, id: ExprId) -> CodegenResult<String> {
        let node = self.expr_node(id)?;
        match &node.kind {
            ExprKind::Literal(lit) => Ok(self.literal(lit)),
            ExprKind::Local(local) => self.local_name(*local),
            ExprKind::This => Ok("this".to_string()),
            ExprKind::CaughtException => Ok(CAUGHT_SLOT.to_string()),
            ExprKind::Binary { op, left, right } => {
                let l = self.expr(*left)?;
                let r = self.expr(*right)?;
                Ok(binary_text(*op, &l, &r, &node.ty))
            }
            ExprKind::Unary { op, operand } => {
                let x = self.expr(*operand)?;
                Ok(unary_text(*op, &x, &node.ty))
            }
            ExprKind::Call {
                kind,
                method,
                args,
                is_special,
            } => self.call(*kind, method, *args, *is_special),
            ExprKind::FieldInstance { obj, field } => {
                let obj = self.expr(*obj)?;
                let (_, name) = self.resolve_field(field)?;
                Ok(format!("{obj}.{name}"))
            }
            ExprKind::FieldStatic { field } => self.static_field(field),
            ExprKind::ArrayAccess { array, index } => {
                let base = self.array_operand(*array)?;
                let index = self.expr(*index)?;
                let getter = if node.ty == Type::BOOL { "getBool" } else { "get" };
                Ok(format!("{base}.{getter}({index})"))
            }
            ExprKind::ArrayLength { array } => {
                let base = self.array_operand(*array)?;
                Ok(format!("{base}.length"))
            }
            ExprKind::New { class } => self.new_object(*class),
            ExprKind::NewArray { counts } => self.new_array(*counts, &node.ty),
            ExprKind::InstanceOf { expr, check } => {
                let text = self.expr(*expr)?;
                self.unit.refs.add_type(check);
                Ok(format!(
                    "Std.isOfType({text}, {})",
                    self.env.names.type_tag(check)
                ))
            }
            ExprKind::Cast { expr } => {
                let from = &self.expr_node(*expr)?.ty;
                let text = self.expr(*expr)?;
                self.unit.refs.add_type(&node.ty);
                Ok(convert(self.env.names, from, &node.ty, &text))
            }
            ExprKind::MethodClass {
                interface_method,
                target,
            } => self.method_class(interface_method, target),
        }
    }

    // ── Literals ────────────────────────────────────────────────────

    fn literal(&mut self, lit: &Literal) -> String {
        match lit {
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
            Literal::String(text) => {
                let ident = self.unit.literals.ident(*text);
                match self.literals {
                    LiteralAccess::Local => ident,
                    LiteralAccess::Qualified(holder) => {
                        self.touch(holder);
                        format!("{}.{ident}", self.env.names.static_holder(holder))
                    }
                }
            }
            Literal::Class(ty) => {
                self.unit.refs.add_type(ty);
                class_literal(self.env, ty)
            }
        }
    }

    // ── Calls ───────────────────────────────────────────────────────

    fn call(
        &mut self,
        kind: CallKind,
        method: &MethodRef,
        args: ExprRange,
        is_special: bool,
    ) -> CodegenResult<String> {
        let special = is_special && matches!(kind, CallKind::Instance { .. });
        let entry = self.resolve_method(method, special)?;
        let owner = self.env.program.class(entry.owner).name;
        let native = self.env.names.is_native(owner);

        let base = match kind {
            CallKind::Static => {
                self.touch(owner);
                self.env.names.static_holder(owner)
            }
            CallKind::Instance { obj } => self.expr(obj)?,
            CallKind::Super { .. } => "super".to_string(),
        };

        let mut texts = self.call_args(args, entry.method)?;
        if native {
            for (text, param) in texts.iter_mut().zip(&entry.method.params) {
                *text = self.to_native(&param.ty, text);
            }
        }

        let call = format!(
            "{base}.{}({})",
            self.method_name(owner, entry.method),
            texts.join(", ")
        );
        Ok(if native {
            self.from_native(&entry.method.ret, &call)
        } else {
            call
        })
    }

    /// Argument texts, checked against the callee's arity.
    pub(super) fn call_args(
        &mut self,
        args: ExprRange,
        callee: &Method,
    ) -> CodegenResult<Vec<String>> {
        let body = self.body;
        let ids = body.expr_list(args);
        if ids.len() != callee.params.len() {
            return Err(CodegenError::MalformedBody(format!(
                "call to `{}` passes {} argument(s), expected {}",
                self.source(callee.name),
                ids.len(),
                callee.params.len()
            )));
        }
        ids.iter().map(|&id| self.expr(id)).collect()
    }

    pub(super) fn resolve_method(
        &self,
        r: &MethodRef,
        special: bool,
    ) -> CodegenResult<MethodEntry<'a>> {
        let program = self.env.program;
        let found = if special {
            program.resolve_special(r)
        } else {
            program.get_method_ref(r)
        };
        found.ok_or_else(|| CodegenError::UnresolvedMethod {
            class: self.source(r.class),
            method: self.source(r.name),
            descriptor: r.ty.descriptor(program.interner()),
        })
    }

    /// Native-mapped classes keep their own member names.
    pub(super) fn method_name(&self, owner: Name, method: &Method) -> String {
        if self.env.names.is_native(owner) {
            escape_member(&self.env.text(method.name))
        } else {
            self.env.names.method(owner, method)
        }
    }

    pub(super) fn to_native(&self, ty: &Type, text: &str) -> String {
        if ty.is_array() {
            return natives("unbox", &[text]);
        }
        match self.conversion_template(ty, "toNative") {
            Some(template) => template.replace("@self", text),
            None => text.to_string(),
        }
    }

    fn from_native(&self, ty: &Type, text: &str) -> String {
        if ty.is_array() {
            return format!(
                "cast({}, {})",
                natives("box", &[text]),
                self.env.names.type_tag(ty)
            );
        }
        match self.conversion_template(ty, "fromNative") {
            Some(template) => template.replace("@self", text),
            None => text.to_string(),
        }
    }

    fn conversion_template(&self, ty: &Type, element: &str) -> Option<String> {
        let interner = self.env.program.interner();
        let class = self.env.program.class_by_name(ty.class_name()?)?;
        let annotation = find_annotation(&class.annotations, interner, ANN_NATIVE_CONVERSION)?;
        let template = annotation.get_str(interner, element)?.as_string()?;
        Some(self.env.text(template).to_string())
    }

    // ── Fields ──────────────────────────────────────────────────────

    /// Declaring class and target name of a field.
    pub(super) fn resolve_field(&self, field: &FieldRef) -> CodegenResult<(Name, String)> {
        let program = self.env.program;
        let entry = program
            .get_field(field.class, field.name, &field.ty)
            .ok_or_else(|| CodegenError::UnresolvedField {
                class: self.source(field.class),
                field: self.source(field.name),
            })?;
        let owner = program.class(entry.owner).name;
        let name = if self.env.names.is_native(owner) {
            escape_member(&self.env.text(field.name))
        } else {
            self.env.names.field(owner, field.name)
        };
        Ok((owner, name))
    }

    pub(super) fn static_field(&mut self, field: &FieldRef) -> CodegenResult<String> {
        let (owner, name) = self.resolve_field(field)?;
        self.touch(owner);
        Ok(format!("{}.{name}", self.env.names.static_holder(owner)))
    }

    /// Record a use of `class`'s statics (and the class reference itself).
    pub(super) fn touch(&mut self, class: Name) {
        if !self.env.names.is_native(class) {
            self.si.touch(class);
        }
        self.unit.refs.add(class);
    }

    // ── Arrays and allocation ───────────────────────────────────────

    /// An operand typed as an array is used as is; anything else is first
    /// cast to the common array base.
    pub(super) fn array_operand(&mut self, id: ExprId) -> CodegenResult<String> {
        let is_array = self.expr_node(id)?.ty.is_array();
        let text = self.expr(id)?;
        Ok(if is_array {
            text
        } else {
            format!("cast({text}, {ARRAY_BASE})")
        })
    }

    fn new_object(&mut self, class: Name) -> CodegenResult<String> {
        if self.env.program.get(class).is_none() {
            return Err(CodegenError::UnresolvedClass {
                class: self.source(class),
            });
        }
        self.touch(class);
        Ok(format!("new {}()", self.env.names.class_fq(class)))
    }

    fn new_array(&mut self, counts: ExprRange, ty: &Type) -> CodegenResult<String> {
        let body = self.body;
        let mut texts = Vec::with_capacity(counts.len());
        for &id in body.expr_list(counts) {
            texts.push(self.expr(id)?);
        }
        self.unit.refs.add_type(ty);
        let descriptor = quote(&ty.descriptor(self.env.program.interner()));
        match texts.as_slice() {
            [] => Err(CodegenError::MalformedBody(
                "array allocation without a count".to_string(),
            )),
            [count] => {
                let class = array_class(ty);
                Ok(if class == OBJECT_ARRAY {
                    format!("new {OBJECT_ARRAY}({count}, {descriptor})")
                } else {
                    format!("new {class}({count})")
                })
            }
            _ => Ok(format!(
                "{OBJECT_ARRAY}.createMultiSure([{}], {descriptor})",
                texts.join(", ")
            )),
        }
    }

    // ── Method references ───────────────────────────────────────────

    /// An inline functional adapter forwarding the interface's single
    /// abstract method to `target`.
    ///
    /// For an instance target the first interface argument is the receiver.
    fn method_class(&mut self, iface_method: &MethodRef, target: &MethodRef) -> CodegenResult<String> {
        let env = self.env;
        let names = env.names;
        let iface = env
            .program
            .class_by_name(iface_method.class)
            .ok_or_else(|| CodegenError::UnresolvedClass {
                class: self.source(iface_method.class),
            })?;
        if select_dispatch(env.program, iface) != Dispatch::FunctionalAdapter {
            return Err(CodegenError::NoFunctionalAdapter {
                interface: self.source(iface.name),
            });
        }
        let entry = self.resolve_method(target, false)?;
        let owner = env.program.class(entry.owner).name;
        self.unit.refs.add(iface.name);
        self.unit.refs.add(owner);

        let sig = &iface_method.ty;
        let params: Vec<(String, &Type)> = sig
            .args
            .iter()
            .enumerate()
            .map(|(i, ty)| (format!("p{i}"), ty))
            .collect();
        let decl = params
            .iter()
            .map(|(p, ty)| format!("{p}:{}", names.type_tag(ty)))
            .collect::<Vec<_>>()
            .join(", ");

        let mut supplied = params.iter();
        let mut prefix = String::new();
        let base = if entry.method.is_static() {
            if !names.is_native(owner) && !self.si.owns(owner) {
                prefix = format!("{} ", guard_call(names, owner));
            }
            names.static_holder(owner)
        } else {
            let (receiver, ty) = supplied.next().ok_or_else(|| {
                CodegenError::MalformedBody(format!(
                    "reference to instance method `{}` has no receiver argument",
                    self.source(target.name)
                ))
            })?;
            convert(names, ty, &Type::Reference(owner), receiver)
        };

        let rest: Vec<_> = supplied.collect();
        if rest.len() != entry.method.params.len() {
            return Err(CodegenError::MalformedBody(format!(
                "`{}` cannot take the {} argument(s) of `{}`",
                self.source(target.name),
                rest.len(),
                self.source(iface_method.name)
            )));
        }
        let args = rest
            .iter()
            .zip(&entry.method.params)
            .map(|((p, ty), param)| convert(names, ty, &param.ty, p))
            .collect::<Vec<_>>()
            .join(", ");

        let call = format!("{base}.{}({args})", self.method_name(owner, entry.method));
        let body = match (sig.ret.is_void(), entry.method.ret.is_void()) {
            (true, _) => format!("{call};"),
            (false, true) => format!("{call}; return {};", default_value(&sig.ret)),
            (false, false) => format!(
                "return {};",
                convert(names, &entry.method.ret, &sig.ret, &call)
            ),
        };
        Ok(format!(
            "new {}(function({decl}):{} {{ {prefix}{body} }})",
            names.companion(iface.name, Companion::Lambda),
            names.type_tag(&sig.ret)
        ))
    }
}

// ── Operators ───────────────────────────────────────────────────────

/// Text of a binary operation whose result has type `ty`.
pub(crate) fn binary_text(op: BinaryOp, l: &str, r: &str, ty: &Type) -> String {
    let kind = ty.prim();
    let int_like = kind.is_some_and(PrimKind::is_int_like);

    let (raw, is_helper) = if op.is_comparison_helper() {
        (num(op.helper_suffix(), &[l, r]), true)
    } else if kind == Some(PrimKind::Long) {
        (num(&format!("l{}", op.helper_suffix()), &[l, r]), true)
    } else if int_like
        && (op.is_shift() || matches!(op, BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem))
    {
        (num(&format!("i{}", op.helper_suffix()), &[l, r]), true)
    } else if kind == Some(PrimKind::Bool) {
        // Both operands are always evaluated.
        match op {
            BinaryOp::And => (num("zand", &[l, r]), true),
            BinaryOp::Or => (num("zor", &[l, r]), true),
            BinaryOp::Xor => (format!("({l} != {r})"), false),
            other => (format!("({l} {} {r})", other.symbol()), false),
        }
    } else {
        (format!("({l} {} {r})", op.symbol()), false)
    };
    narrow(kind, raw, is_helper)
}

pub(crate) fn unary_text(op: UnaryOp, x: &str, ty: &Type) -> String {
    let kind = ty.prim();
    match op {
        UnaryOp::Neg => match kind {
            Some(PrimKind::Long) => num("lneg", &[x]),
            Some(k) if k.is_floating() => format!("-({x})"),
            _ => narrow(kind, format!("-({x})"), false),
        },
        UnaryOp::Not => format!("!({x})"),
        UnaryOp::Inv => match kind {
            Some(PrimKind::Long) => num("lxor", &[x, &long_literal(-1)]),
            _ => narrow(kind, format!("~({x})"), false),
        },
    }
}

/// Re-truncate a raw 32-bit result to its declared width.
///
/// Helper results are already exact 32-bit ints.
fn narrow(kind: Option<PrimKind>, raw: String, is_helper: bool) -> String {
    match kind {
        Some(PrimKind::Int) if is_helper => raw,
        Some(PrimKind::Int) => num("i", &[&raw]),
        Some(PrimKind::Char) => num("i2c", &[&raw]),
        Some(PrimKind::Short) => num("i2s", &[&raw]),
        Some(PrimKind::Byte) => num("i2b", &[&raw]),
        _ => raw,
    }
}

// ── Conversions ─────────────────────────────────────────────────────

/// Convert a value of type `from` to type `to`: primitive widening and
/// narrowing, boxing, unboxing or a checked reference cast.
pub(crate) fn convert(names: &Names, from: &Type, to: &Type, text: &str) -> String {
    if from == to {
        return text.to_string();
    }
    match (from.prim(), to.prim()) {
        (Some(f), Some(t)) => prim_conversion(f, t, text),
        (None, Some(t)) => natives(&format!("unbox{}", box_kind(t)), &[text]),
        (Some(f), None) => natives(&format!("box{}", box_kind(f)), &[text]),
        (None, None) => format!("cast({text}, {})", names.type_tag(to)),
    }
}

fn prim_conversion(from: PrimKind, to: PrimKind, x: &str) -> String {
    use PrimKind::{Bool, Byte, Char, Double, Float, Int, Long, Short};

    match (from, to) {
        _ if from == to => x.to_string(),
        (Bool, Long) => num("i2j", &[&num("z2i", &[x])]),
        (Bool, _) => num("z2i", &[x]),
        (_, Bool) if from.is_int_like() => num("i2z", &[x]),
        (_, Bool) => num("i2z", &[&prim_conversion(from, Int, x)]),
        (Long, Float) => num("j2f", &[x]),
        (Long, Double) => num("j2d", &[x]),
        (Long, _) => narrow_to(to, num("l2i", &[x])),
        (Float, Double) => x.to_string(),
        (Double, Float) => num("d2f", &[x]),
        (Float, Long) => num("f2j", &[x]),
        (Double, Long) => num("d2j", &[x]),
        (Float, _) => narrow_to(to, num("f2i", &[x])),
        (Double, _) => narrow_to(to, num("d2i", &[x])),
        (_, Long) => num("i2j", &[x]),
        (_, Float) => num("d2f", &[x]),
        (_, Double) => x.to_string(),
        (_, Byte) => num("i2b", &[x]),
        (Byte, Short) => x.to_string(),
        (_, Short) => num("i2s", &[x]),
        (_, Char) => num("i2c", &[x]),
        (_, Int) => x.to_string(),
    }
}

/// `x` is an exact int; truncate it to an int-like `to`.
fn narrow_to(to: PrimKind, x: String) -> String {
    match to {
        PrimKind::Byte => num("i2b", &[&x]),
        PrimKind::Short => num("i2s", &[&x]),
        PrimKind::Char => num("i2c", &[&x]),
        _ => x,
    }
}

/// Suffix of the `HxNatives.box*`/`unbox*` helpers.
pub(crate) fn box_kind(kind: PrimKind) -> &'static str {
    match kind {
        PrimKind::Bool => "Bool",
        PrimKind::Byte => "Byte",
        PrimKind::Short => "Short",
        PrimKind::Char => "Char",
        PrimKind::Int => "Int",
        PrimKind::Long => "Long",
        PrimKind::Float => "Float",
        PrimKind::Double => "Double",
    }
}

// ── Constant text ───────────────────────────────────────────────────

/// `i32::MIN` has no positive counterpart, so it cannot be written as a
/// negated literal.
pub(crate) fn int_literal(v: i32) -> String {
    if v == i32::MIN {
        "(-2147483647 - 1)".to_string()
    } else {
        v.to_string()
    }
}

/// 64-bit constants are built from their two 32-bit halves.
pub(crate) fn long_literal(v: i64) -> String {
    let [h0, h1, h2, h3, l0, l1, l2, l3] = v.to_be_bytes();
    let high = i32::from_be_bytes([h0, h1, h2, h3]);
    let low = i32::from_be_bytes([l0, l1, l2, l3]);
    num("lnew", &[&int_literal(high), &int_literal(low)])
}

pub(crate) fn float_literal(v: f64, finite: impl FnOnce() -> String) -> String {
    if v.is_nan() {
        "Math.NaN".to_string()
    } else if v.is_infinite() {
        if v.is_sign_positive() {
            "Math.POSITIVE_INFINITY"
        } else {
            "Math.NEGATIVE_INFINITY"
        }
        .to_string()
    } else {
        finite()
    }
}

/// `HxNatives.resolveClass("...")`: dotted name for classes, descriptor for
/// arrays and primitives.
pub(crate) fn class_literal(env: GenEnv<'_>, ty: &Type) -> String {
    let key = match ty {
        Type::Reference(name) => env.text(*name).to_string(),
        other => other.descriptor(env.program.interner()),
    };
    natives("resolveClass", &[&quote(&key)])
}
