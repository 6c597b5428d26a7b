//! Method bodies as flat arenas.
//!
//! Expressions and statements are stored in `Vec`s and referenced by index.
//! Child lists (call arguments, block statements) are flattened into shared
//! id vectors and referenced by [`IdRange`]. Lookups return `Option` so the
//! code generator can report dangling ids as a malformed body instead of
//! panicking.

mod builder;
mod expr;
mod ids;
mod stmt;

pub use builder::BodyBuilder;
pub use expr::{BinaryOp, CallKind, Expr, ExprKind, Literal, UnaryOp};
pub use ids::{ExprId, ExprRange, IdRange, LabelId, LocalId, StmtId, StmtRange};
pub use stmt::{Stmt, StmtKind};

use crate::{Name, Type};

/// A method-local variable.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Local {
    pub name: Name,
    pub ty: Type,
}

/// The statement tree of one method.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Body {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    expr_lists: Vec<ExprId>,
    stmt_lists: Vec<StmtId>,
    locals: Vec<Local>,
    label_count: u32,
    root: StmtRange,
}

impl Body {
    #[inline]
    pub fn expr(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.index())
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> Option<&Stmt> {
        self.stmts.get(id.index())
    }

    #[inline]
    pub fn local(&self, id: LocalId) -> Option<&Local> {
        self.locals.get(id.index())
    }

    pub fn locals(&self) -> &[Local] {
        &self.locals
    }

    /// Ids of the expressions in `range`; empty if the range is out of bounds.
    pub fn expr_list(&self, range: ExprRange) -> &[ExprId] {
        self.expr_lists
            .get(range.as_usize_range())
            .unwrap_or_default()
    }

    /// Ids of the statements in `range`; empty if the range is out of bounds.
    pub fn stmt_list(&self, range: StmtRange) -> &[StmtId] {
        self.stmt_lists
            .get(range.as_usize_range())
            .unwrap_or_default()
    }

    /// Top-level statement sequence, in execution order.
    pub fn root(&self) -> &[StmtId] {
        self.stmt_list(self.root)
    }

    pub fn label_count(&self) -> u32 {
        self.label_count
    }

    pub fn is_label_valid(&self, label: LabelId) -> bool {
        label.raw() < self.label_count
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    /// Any label/goto form anywhere in the body.
    pub fn has_jumps(&self) -> bool {
        self.stmts.iter().any(|s| {
            matches!(
                s.kind,
                StmtKind::Label(_)
                    | StmtKind::Goto(_)
                    | StmtKind::IfGoto { .. }
                    | StmtKind::SwitchGoto { .. }
            )
        })
    }

    /// Any try/catch or use of the caught-exception slot.
    pub fn has_traps(&self) -> bool {
        self.stmts
            .iter()
            .any(|s| matches!(s.kind, StmtKind::TryCatch { .. } | StmtKind::Rethrow))
    }
}
