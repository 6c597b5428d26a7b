//! Static initialization: touches, guard, constant fields.

use pretty_assertions::assert_eq;

use hx_ir::{
    BinaryOp, BodyBuilder, CallKind, ClassKind, ExprKind, Field, Literal, Modifiers, StmtKind, Type,
};

use crate::common::{emit, plain, unit, Hx, Machine, Model};

/// `app.Counter { static int value; static final String NAME = "counter";
/// static void increment() { value = value + 1; } }` and
/// `app.Main { static int run() { Counter.increment(); Counter.increment();
/// return Counter.value; } }`.
fn counter_program() -> Model {
    let mut m = Model::new();
    let string = m.string();

    let mut counter = m.class("app.Counter", ClassKind::Class);
    counter.fields.push(Field::new(
        m.n("value"),
        Type::INT,
        Modifiers::PUBLIC | Modifiers::STATIC,
    ));
    let mut name = Field::new(
        m.n("NAME"),
        string,
        Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL,
    );
    name.constant = Some(Literal::String(m.n("counter")));
    counter.fields.push(name);

    let value = m.fref("app.Counter", "value", Type::INT);
    let mut b = BodyBuilder::new();
    let read = b.expr(ExprKind::FieldStatic { field: value.clone() }, Type::INT);
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
        field: value.clone(),
        expr: sum,
    });
    let mut increment = m.method(1, "increment", &[], Type::Void);
    increment.modifiers |= Modifiers::STATIC;
    increment.body = Some(b.finish([set]));
    counter.methods.push(increment);
    m.add(counter);

    let mut main = m.class("app.Main", ClassKind::Class);
    let mut b = BodyBuilder::new();
    let mut calls = Vec::new();
    for _ in 0..2 {
        let args = b.expr_list(std::iter::empty());
        let call = b.expr(
            ExprKind::Call {
                kind: CallKind::Static,
                method: m.mref("app.Counter", "increment", vec![], Type::Void),
                args,
                is_special: false,
            },
            Type::Void,
        );
        calls.push(b.stmt(StmtKind::Expr(call)));
    }
    let read = b.expr(ExprKind::FieldStatic { field: value }, Type::INT);
    calls.push(b.stmt(StmtKind::Return(Some(read))));
    let mut run = m.method(2, "run", &[], Type::INT);
    run.modifiers |= Modifiers::STATIC;
    run.body = Some(b.finish(calls));
    main.methods.push(run);
    m.add(main);
    m
}

#[test]
fn every_statement_touching_another_class_initializes_it_first() {
    let m = counter_program();
    let (output, vfs) = emit(&m.program, &plain());
    assert!(output.result().is_ok());

    let main = unit(&vfs, "app/Main.hx");
    assert_eq!(main.matches("app.Counter.SI();").count(), 3);
    assert!(!unit(&vfs, "app/Counter.hx").contains("app.Counter.SI();"));
}

#[test]
fn initializer_runs_once_and_state_is_shared() {
    let m = counter_program();
    let (_, vfs) = emit(&m.program, &plain());
    let mut machine = Machine::load(&vfs);

    assert_eq!(machine.call("app.Main", "run__I", vec![]), Ok(Hx::Int(2)));
    assert_eq!(machine.init_count("app.Counter"), 1);
    assert_eq!(machine.init_count("app.Main"), 0);
    assert_eq!(
        machine.static_value("app.Counter", "NAME"),
        Some(&Hx::str("counter"))
    );

    assert_eq!(machine.call("app.Main", "run__I", vec![]), Ok(Hx::Int(4)));
    assert_eq!(machine.init_count("app.Counter"), 1);
}

#[test]
fn constants_are_unset_before_initialization() {
    let m = counter_program();
    let (_, vfs) = emit(&m.program, &plain());
    let mut machine = Machine::load(&vfs);

    assert_eq!(machine.static_value("app.Counter", "NAME"), Some(&Hx::Null));
    assert_eq!(machine.call("app.Counter", "SI", vec![]), Ok(Hx::Null));
    assert_eq!(
        machine.static_value("app.Counter", "NAME"),
        Some(&Hx::str("counter"))
    );
    assert_eq!(machine.call("app.Counter", "SI", vec![]), Ok(Hx::Null));
    assert_eq!(machine.init_count("app.Counter"), 1);
}
