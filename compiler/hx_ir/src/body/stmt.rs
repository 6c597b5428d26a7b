//! Statement nodes.
//!
//! A method body is a flat sequence of these. Label/goto forms encode control
//! flow the front end could not re-structure; the structured forms (`If`,
//! `While`, `Switch`, `Block`) appear when it could.

use super::{ExprId, ExprRange, LabelId, LocalId, StmtId, StmtRange};
use crate::{FieldRef, MethodRef, Name};

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    Nop,
    /// Maps the next generated line to an original source line.
    Line {
        line: u32,
    },
    Label(LabelId),
    Goto(LabelId),
    IfGoto {
        cond: ExprId,
        label: LabelId,
    },
    /// Jump table: each case jumps to a label; `default` is mandatory.
    SwitchGoto {
        subject: ExprId,
        cases: Vec<(i32, LabelId)>,
        default: LabelId,
    },
    SetLocal {
        local: LocalId,
        expr: ExprId,
    },
    SetField {
        obj: ExprId,
        field: FieldRef,
        expr: ExprId,
    },
    SetStaticField {
        field: FieldRef,
        expr: ExprId,
    },
    SetArray {
        array: ExprId,
        index: ExprId,
        expr: ExprId,
    },
    /// Two-step construction: allocate into `local`, then run `constructor`.
    SetNewWithConstructor {
        local: LocalId,
        class: Name,
        constructor: MethodRef,
        args: ExprRange,
    },
    Expr(ExprId),
    Return(Option<ExprId>),
    Throw(ExprId),
    TryCatch {
        body: StmtId,
        catch: StmtId,
    },
    /// Re-throw the method's last caught value.
    Rethrow,
    Block(StmtRange),
    If {
        cond: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    },
    While {
        cond: ExprId,
        body: StmtId,
    },
    /// Structured switch: each case group runs its body.
    Switch {
        subject: ExprId,
        cases: Vec<(Vec<i32>, StmtId)>,
        default: StmtId,
    },
    Break,
    Continue,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
}
