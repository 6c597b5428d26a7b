//! Expression nodes.

use super::{ExprId, ExprRange, LocalId};
use crate::{FieldRef, MethodRef, Name, Type};

/// A literal constant.
///
/// Floats are stored as bits so the model stays `Eq + Hash`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Literal {
    Null,
    Bool(bool),
    /// Any int-like value (byte, short, char and int literals); the
    /// expression's type says which.
    Int(i32),
    Long(i64),
    Float(u32),
    Double(u64),
    String(Name),
    /// A class literal (`Foo.class`).
    Class(Type),
}

impl Literal {
    pub fn float(v: f32) -> Self {
        Literal::Float(v.to_bits())
    }

    pub fn double(v: f64) -> Self {
        Literal::Double(v.to_bits())
    }
}

/// Binary operators of the stack machine.
///
/// The comparison family (`Lcmp`, `Cmp`, `Cmpl`, `Cmpg`) produces a tri-state
/// `-1 / 0 / 1` int; `Cmpl`/`Cmpg` differ only in how NaN orders.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Ushr,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Lcmp,
    Cmp,
    Cmpl,
    Cmpg,
}

impl BinaryOp {
    /// Operator spelling in infix form.
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Ushr => ">>>",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Lcmp => "lcmp",
            BinaryOp::Cmp => "cmp",
            BinaryOp::Cmpl => "cmpl",
            BinaryOp::Cmpg => "cmpg",
        }
    }

    /// Operator name used to build helper-function names.
    pub const fn helper_suffix(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
            BinaryOp::Rem => "rem",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Xor => "xor",
            BinaryOp::Shl => "shl",
            BinaryOp::Shr => "shr",
            BinaryOp::Ushr => "ushr",
            BinaryOp::Eq => "eq",
            BinaryOp::Ne => "ne",
            BinaryOp::Lt => "lt",
            BinaryOp::Le => "le",
            BinaryOp::Gt => "gt",
            BinaryOp::Ge => "ge",
            BinaryOp::Lcmp => "lcmp",
            BinaryOp::Cmp => "cmp",
            BinaryOp::Cmpl => "cmpl",
            BinaryOp::Cmpg => "cmpg",
        }
    }

    pub const fn is_shift(self) -> bool {
        matches!(self, BinaryOp::Shl | BinaryOp::Shr | BinaryOp::Ushr)
    }

    /// Tri-state comparisons and identity/equality.
    pub const fn is_comparison_helper(self) -> bool {
        matches!(
            self,
            BinaryOp::Lcmp
                | BinaryOp::Cmp
                | BinaryOp::Cmpl
                | BinaryOp::Cmpg
                | BinaryOp::Eq
                | BinaryOp::Ne
        )
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// Arithmetic negation.
    Neg,
    /// Boolean not.
    Not,
    /// Bitwise complement.
    Inv,
}

/// How a call is dispatched.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CallKind {
    Static,
    Instance { obj: ExprId },
    /// Explicit superclass dispatch (`super.m()`).
    Super { obj: ExprId },
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    Literal(Literal),
    Local(LocalId),
    This,
    /// The value caught by the innermost enclosing catch clause.
    CaughtException,
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Call {
        kind: CallKind,
        method: MethodRef,
        args: ExprRange,
        /// The front end resolved this to a concrete (non-virtual) target.
        is_special: bool,
    },
    FieldInstance {
        obj: ExprId,
        field: FieldRef,
    },
    FieldStatic {
        field: FieldRef,
    },
    ArrayAccess {
        array: ExprId,
        index: ExprId,
    },
    ArrayLength {
        array: ExprId,
    },
    /// Plain allocation; the expression type is the class.
    New {
        class: Name,
    },
    /// Array allocation; the expression type is the array type and there is
    /// one count per allocated dimension.
    NewArray {
        counts: ExprRange,
    },
    InstanceOf {
        expr: ExprId,
        check: Type,
    },
    /// Conversion to the expression type.
    Cast {
        expr: ExprId,
    },
    /// Method reference / lambda capture: an instance of `interface_method`'s
    /// interface whose single abstract method forwards to `target`.
    MethodClass {
        interface_method: MethodRef,
        target: MethodRef,
    },
}

/// An expression with its statically known result type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: Type,
}
