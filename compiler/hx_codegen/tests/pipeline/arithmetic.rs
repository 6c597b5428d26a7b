//! 32/64-bit integer semantics on a target whose `Int` does not wrap.

use std::sync::OnceLock;

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use hx_codegen::MemoryVfs;
use hx_ir::{BinaryOp, BodyBuilder, ClassKind, ExprKind, Method, Modifiers, StmtKind, Type, UnaryOp};

use crate::common::{emit, plain, unit, Hx, Machine, Model};

/// `static R name(A a, B b) { return a <op> b; }`
fn binary(m: &Model, id: u32, name: &str, op: BinaryOp, ty: &Type) -> Method {
    let mut b = BodyBuilder::new();
    let a = b.local(m.n("a"), ty.clone());
    let c = b.local(m.n("b"), ty.clone());
    let left = b.read_local(a);
    let right = b.read_local(c);
    let result = b.expr(ExprKind::Binary { op, left, right }, ty.clone());
    let ret = b.stmt(StmtKind::Return(Some(result)));
    let mut method = m.method(id, name, &[("a", ty.clone()), ("b", ty.clone())], ty.clone());
    method.modifiers |= Modifiers::STATIC;
    method.body = Some(b.finish([ret]));
    method
}

/// `app.Ops`: `add`, `mul`, `shr`, `ushr` on ints, `lmul` on longs,
/// `neg(int)` and `toByte(int)`.
fn ops() -> Model {
    let mut m = Model::new();
    let mut class = m.class("app.Ops", ClassKind::Class);
    class.methods.push(binary(&m, 1, "add", BinaryOp::Add, &Type::INT));
    class.methods.push(binary(&m, 2, "mul", BinaryOp::Mul, &Type::INT));
    class.methods.push(binary(&m, 3, "shr", BinaryOp::Shr, &Type::INT));
    class.methods.push(binary(&m, 4, "ushr", BinaryOp::Ushr, &Type::INT));
    class.methods.push(binary(&m, 5, "lmul", BinaryOp::Mul, &Type::LONG));

    let mut b = BodyBuilder::new();
    let a = b.local(m.n("a"), Type::INT);
    let operand = b.read_local(a);
    let negated = b.expr(
        ExprKind::Unary {
            op: UnaryOp::Neg,
            operand,
        },
        Type::INT,
    );
    let ret = b.stmt(StmtKind::Return(Some(negated)));
    let mut neg = m.method(6, "neg", &[("a", Type::INT)], Type::INT);
    neg.modifiers |= Modifiers::STATIC;
    neg.body = Some(b.finish([ret]));
    class.methods.push(neg);

    let mut b = BodyBuilder::new();
    let a = b.local(m.n("a"), Type::INT);
    let read = b.read_local(a);
    let narrowed = b.expr(ExprKind::Cast { expr: read }, Type::BYTE);
    let ret = b.stmt(StmtKind::Return(Some(narrowed)));
    let mut to_byte = m.method(7, "toByte", &[("a", Type::INT)], Type::BYTE);
    to_byte.modifiers |= Modifiers::STATIC;
    to_byte.body = Some(b.finish([ret]));
    class.methods.push(to_byte);

    m.add(class);
    m
}

fn units() -> &'static MemoryVfs {
    static UNITS: OnceLock<MemoryVfs> = OnceLock::new();
    UNITS.get_or_init(|| emit(&ops().program, &plain()).1)
}

fn int(v: i32) -> Hx {
    Hx::Int(i64::from(v))
}

fn run(name: &str, args: Vec<Hx>) -> Hx {
    Machine::load(units())
        .call("app.Ops", name, args)
        .unwrap_or_else(|e| panic!("{name} threw {e:?}"))
}

#[test]
fn int_results_are_narrowed() {
    let text = unit(units(), "app/Ops.hx");
    assert!(text.contains("\t\treturn N.i((a + b));\n"));
    assert!(text.contains("\t\treturn N.imul(a, b);\n"));
    assert!(text.contains("\t\treturn N.lmul(a, b);\n"));

    assert_eq!(run("add_II_I", vec![int(i32::MAX), int(1)]), int(i32::MIN));
    assert_eq!(run("neg_I_I", vec![int(i32::MIN)]), int(i32::MIN));
    assert_eq!(run("toByte_I_B", vec![int(200)]), int(-56));
}

#[test]
fn shifts_follow_32_bit_rules() {
    assert_eq!(run("ushr_II_I", vec![int(-1), int(1)]), int(i32::MAX));
    assert_eq!(run("shr_II_I", vec![int(-1), int(1)]), int(-1));
    assert_eq!(run("shr_II_I", vec![int(8), int(33)]), int(4));
}

#[test]
fn long_multiplication_wraps_at_64_bits() {
    assert_eq!(
        run("lmul_JJ_J", vec![Hx::Long(i64::MAX), Hx::Long(2)]),
        Hx::Long(-2)
    );
}

proptest! {
    #[test]
    fn add_matches_wrapping_add(a: i32, b: i32) {
        prop_assert_eq!(run("add_II_I", vec![int(a), int(b)]), int(a.wrapping_add(b)));
    }

    #[test]
    fn mul_matches_wrapping_mul(a: i32, b: i32) {
        prop_assert_eq!(run("mul_II_I", vec![int(a), int(b)]), int(a.wrapping_mul(b)));
    }

    #[test]
    fn ushr_matches_logical_shift(a: i32, b in 0i32..64) {
        let expected = ((a as u32) >> (b & 31)) as i32;
        prop_assert_eq!(run("ushr_II_I", vec![int(a), int(b)]), int(expected));
    }
}
