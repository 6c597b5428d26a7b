//! Throw, catch and rethrow.

use pretty_assertions::assert_eq;

use hx_ir::{
    BinaryOp, BodyBuilder, CallKind, ClassKind, ExprKind, Modifiers, StmtKind, Type,
};

use crate::common::{emit, plain, Hx, Machine, Model};

/// `app.Thrower` with:
/// - `fail()`: `throw "boom"`
/// - `rethrow()`: `try { fail(); } catch (e) { throw e; }`
/// - `recover()`: `try { fail(); } catch (e) { return 7; } return 0;`
/// - `div(a, b)`: `return a / b;`
fn thrower() -> Model {
    let mut m = Model::new();
    let string = m.string();
    let mut class = m.class("app.Thrower", ClassKind::Class);

    let mut b = BodyBuilder::new();
    let boom = b.string(m.n("boom"), string);
    let throw = b.stmt(StmtKind::Throw(boom));
    let mut fail = m.method(1, "fail", &[], Type::Void);
    fail.modifiers |= Modifiers::STATIC;
    fail.body = Some(b.finish([throw]));
    class.methods.push(fail);

    let call_fail = |m: &Model, b: &mut BodyBuilder| {
        let args = b.expr_list(std::iter::empty());
        let call = b.expr(
            ExprKind::Call {
                kind: CallKind::Static,
                method: m.mref("app.Thrower", "fail", vec![], Type::Void),
                args,
                is_special: false,
            },
            Type::Void,
        );
        let stmt = b.stmt(StmtKind::Expr(call));
        b.block([stmt])
    };

    let mut b = BodyBuilder::new();
    let body = call_fail(&m, &mut b);
    let rethrow = b.stmt(StmtKind::Rethrow);
    let catch = b.block([rethrow]);
    let trap = b.stmt(StmtKind::TryCatch { body, catch });
    let mut method = m.method(2, "rethrow", &[], Type::Void);
    method.modifiers |= Modifiers::STATIC;
    method.body = Some(b.finish([trap]));
    class.methods.push(method);

    let mut b = BodyBuilder::new();
    let body = call_fail(&m, &mut b);
    let seven = b.int(7);
    let ret = b.stmt(StmtKind::Return(Some(seven)));
    let catch = b.block([ret]);
    let trap = b.stmt(StmtKind::TryCatch { body, catch });
    let zero = b.int(0);
    let fallthrough = b.stmt(StmtKind::Return(Some(zero)));
    let mut method = m.method(3, "recover", &[], Type::INT);
    method.modifiers |= Modifiers::STATIC;
    method.body = Some(b.finish([trap, fallthrough]));
    class.methods.push(method);

    let mut b = BodyBuilder::new();
    let a = b.local(m.n("a"), Type::INT);
    let d = b.local(m.n("b"), Type::INT);
    let left = b.read_local(a);
    let right = b.read_local(d);
    let quotient = b.expr(
        ExprKind::Binary {
            op: BinaryOp::Div,
            left,
            right,
        },
        Type::INT,
    );
    let ret = b.stmt(StmtKind::Return(Some(quotient)));
    let mut div = m.method(4, "div", &[("a", Type::INT), ("b", Type::INT)], Type::INT);
    div.modifiers |= Modifiers::STATIC;
    div.body = Some(b.finish([ret]));
    class.methods.push(div);

    m.add(class);
    m
}

fn machine() -> Machine {
    let m = thrower();
    let (output, vfs) = emit(&m.program, &plain());
    assert_eq!(output.error_count(), 0);
    let mut machine = Machine::load(&vfs);
    assert_eq!(machine.call("app.Thrower", "SI", vec![]), Ok(Hx::Null));
    machine
}

#[test]
fn rethrow_propagates_the_caught_value() {
    let mut machine = machine();
    assert_eq!(
        machine.call("app.Thrower", "rethrow__V", vec![]),
        Err(Hx::str("boom"))
    );
}

#[test]
fn catch_handlers_can_return() {
    let mut machine = machine();
    assert_eq!(
        machine.call("app.Thrower", "recover__I", vec![]),
        Ok(Hx::Int(7))
    );
}

#[test]
fn integer_division_by_zero_throws() {
    let mut machine = machine();
    assert_eq!(
        machine.call("app.Thrower", "div_II_I", vec![Hx::Int(7), Hx::Int(2)]),
        Ok(Hx::Int(3))
    );
    assert_eq!(
        machine.call("app.Thrower", "div_II_I", vec![Hx::Int(7), Hx::Int(0)]),
        Err(Hx::str("java.lang.ArithmeticException: / by zero"))
    );
    assert_eq!(
        machine.call(
            "app.Thrower",
            "div_II_I",
            vec![Hx::Int(i64::from(i32::MIN)), Hx::Int(-1)]
        ),
        Ok(Hx::Int(i64::from(i32::MIN)))
    );
}
