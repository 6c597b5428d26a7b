//! Incremental construction of a [`Body`].

use super::{
    Body, Expr, ExprId, ExprKind, ExprRange, IdRange, LabelId, Literal, Local, LocalId, Stmt,
    StmtId, StmtKind, StmtRange,
};
use crate::{Name, Type};

fn next_index(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Allocates expressions, statements, locals and labels into a fresh body.
#[derive(Default)]
pub struct BodyBuilder {
    body: Body,
}

impl BodyBuilder {
    pub fn new() -> Self {
        BodyBuilder::default()
    }

    pub fn local(&mut self, name: Name, ty: Type) -> LocalId {
        let id = LocalId::new(next_index(self.body.locals.len()));
        self.body.locals.push(Local { name, ty });
        id
    }

    pub fn label(&mut self) -> LabelId {
        let id = LabelId::new(self.body.label_count);
        self.body.label_count += 1;
        id
    }

    pub fn expr(&mut self, kind: ExprKind, ty: Type) -> ExprId {
        let id = ExprId::new(next_index(self.body.exprs.len()));
        self.body.exprs.push(Expr { kind, ty });
        id
    }

    pub fn stmt(&mut self, kind: StmtKind) -> StmtId {
        let id = StmtId::new(next_index(self.body.stmts.len()));
        self.body.stmts.push(Stmt { kind });
        id
    }

    pub fn expr_list(&mut self, ids: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = next_index(self.body.expr_lists.len());
        self.body.expr_lists.extend(ids);
        let end = next_index(self.body.expr_lists.len());
        IdRange::new(start, end - start)
    }

    pub fn stmt_list(&mut self, ids: impl IntoIterator<Item = StmtId>) -> StmtRange {
        let start = next_index(self.body.stmt_lists.len());
        self.body.stmt_lists.extend(ids);
        let end = next_index(self.body.stmt_lists.len());
        IdRange::new(start, end - start)
    }

    pub fn block(&mut self, ids: impl IntoIterator<Item = StmtId>) -> StmtId {
        let range = self.stmt_list(ids);
        self.stmt(StmtKind::Block(range))
    }

    // Shorthands for the common leaves.

    pub fn int(&mut self, value: i32) -> ExprId {
        self.expr(ExprKind::Literal(Literal::Int(value)), Type::INT)
    }

    pub fn long(&mut self, value: i64) -> ExprId {
        self.expr(ExprKind::Literal(Literal::Long(value)), Type::LONG)
    }

    pub fn bool(&mut self, value: bool) -> ExprId {
        self.expr(ExprKind::Literal(Literal::Bool(value)), Type::BOOL)
    }

    pub fn null(&mut self, ty: Type) -> ExprId {
        self.expr(ExprKind::Literal(Literal::Null), ty)
    }

    /// A string literal; `string_ty` is the program's string class.
    pub fn string(&mut self, value: Name, string_ty: Type) -> ExprId {
        self.expr(ExprKind::Literal(Literal::String(value)), string_ty)
    }

    pub fn read_local(&mut self, local: LocalId) -> ExprId {
        let ty = self
            .body
            .local(local)
            .map_or(Type::Void, |l| l.ty.clone());
        self.expr(ExprKind::Local(local), ty)
    }

    /// Finish the body with `root` as its top-level statement sequence.
    pub fn finish(mut self, root: impl IntoIterator<Item = StmtId>) -> Body {
        self.body.root = self.stmt_list(root);
        self.body
    }
}
