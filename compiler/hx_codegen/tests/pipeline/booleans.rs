//! Boolean `&`, `|` and `^` evaluate both operands.

use pretty_assertions::assert_eq;

use hx_ir::{
    BinaryOp, BodyBuilder, CallKind, ClassKind, ExprKind, Field, Method, Modifiers, StmtKind, Type,
};

use crate::common::{emit, plain, unit, Hx, Machine, Model};

/// `app.Tally { static int hits; static boolean hit() { hits = hits + 1; return true; } }`
fn tally(m: &mut Model) {
    let mut class = m.class("app.Tally", ClassKind::Class);
    class.fields.push(Field::new(
        m.n("hits"),
        Type::INT,
        Modifiers::PUBLIC | Modifiers::STATIC,
    ));

    let hits = m.fref("app.Tally", "hits", Type::INT);
    let mut b = BodyBuilder::new();
    let read = b.expr(ExprKind::FieldStatic { field: hits.clone() }, Type::INT);
    let one = b.int(1);
    let sum = b.expr(
        ExprKind::Binary {
            op: BinaryOp::Add,
            left: read,
            right: one,
        },
        Type::INT,
    );
    let set = b.stmt(StmtKind::SetStaticField {
        field: hits,
        expr: sum,
    });
    let yes = b.bool(true);
    let ret = b.stmt(StmtKind::Return(Some(yes)));
    let mut hit = m.method(1, "hit", &[], Type::BOOL);
    hit.modifiers |= Modifiers::STATIC;
    hit.body = Some(b.finish([set, ret]));
    class.methods.push(hit);
    m.add(class);
}

/// `static boolean <name>(boolean a) { return a <op> Tally.hit(); }`
fn combine(m: &Model, id: u32, name: &str, op: BinaryOp) -> Method {
    let mut b = BodyBuilder::new();
    let a = b.local(m.n("a"), Type::BOOL);
    let left = b.read_local(a);
    let args = b.expr_list(std::iter::empty());
    let right = b.expr(
        ExprKind::Call {
            kind: CallKind::Static,
            method: m.mref("app.Tally", "hit", vec![], Type::BOOL),
            args,
            is_special: false,
        },
        Type::BOOL,
    );
    let result = b.expr(ExprKind::Binary { op, left, right }, Type::BOOL);
    let ret = b.stmt(StmtKind::Return(Some(result)));
    let mut method = m.method(id, name, &[("a", Type::BOOL)], Type::BOOL);
    method.modifiers |= Modifiers::STATIC;
    method.body = Some(b.finish([ret]));
    method
}

fn flags() -> Model {
    let mut m = Model::new();
    tally(&mut m);
    let mut class = m.class("app.Flags", ClassKind::Class);
    class.methods.push(combine(&m, 1, "both", BinaryOp::And));
    class.methods.push(combine(&m, 2, "either", BinaryOp::Or));
    class.methods.push(combine(&m, 3, "differ", BinaryOp::Xor));
    m.add(class);
    m
}

fn hits(machine: &Machine) -> Option<&Hx> {
    machine.static_value("app.Tally", "hits")
}

#[test]
fn and_or_never_short_circuit() {
    let m = flags();
    let (output, vfs) = emit(&m.program, &plain());
    assert!(output.result().is_ok());
    let text = unit(&vfs, "app/Flags.hx");
    assert!(text.contains("return N.zand(a, app.Tally.hit__Z());"), "{text}");
    assert!(text.contains("return N.zor(a, app.Tally.hit__Z());"), "{text}");

    let mut machine = Machine::load(&vfs);
    assert_eq!(
        machine.call("app.Flags", "both_Z_Z", vec![Hx::Bool(false)]),
        Ok(Hx::Bool(false))
    );
    assert_eq!(hits(&machine), Some(&Hx::Int(1)));

    assert_eq!(
        machine.call("app.Flags", "either_Z_Z", vec![Hx::Bool(true)]),
        Ok(Hx::Bool(true))
    );
    assert_eq!(hits(&machine), Some(&Hx::Int(2)));

    assert_eq!(
        machine.call("app.Flags", "differ_Z_Z", vec![Hx::Bool(true)]),
        Ok(Hx::Bool(false))
    );
    assert_eq!(hits(&machine), Some(&Hx::Int(3)));
}
