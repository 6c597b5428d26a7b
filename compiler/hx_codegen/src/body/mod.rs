//! Method body translation.
//!
//! A [`BodyGen`] walks one method body's statement list in order, turning
//! each statement and its expressions into target text. Expressions return
//! their text; statements write lines. Static-init touches recorded while an
//! expression is translated are flushed as guard calls right before the
//! statement that needs them.
//!
//! # Architecture
//!
//! ```text
//! Body (flat arenas)
//!        ↓
//!   prologue    (locals, caught-value slot)
//!        ↓
//!   stmt / expr (recursive, per node kind)
//!        ↓
//!   CodeWriter  (text + source-line mappings)
//! ```

mod expr;
mod stmt;

pub(crate) use expr::{box_kind, class_literal, float_literal, int_literal, long_literal};

use rustc_hash::FxHashMap;

use hx_ir::{Body, Expr, ExprId, LocalId, Name, Stmt, StmtId, Type};

use crate::context::{CodeWriter, GenEnv, UnitState};
use crate::error::{CodegenError, CodegenResult};
use crate::names::{default_value, escape_member};
use crate::runtime_api::CAUGHT_SLOT;
use crate::static_init::StaticInit;

/// How string literals are reached from the body being translated.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LiteralAccess {
    /// The literal fields are members of the class the body is emitted into.
    Local,
    /// The literal fields live in another class's static holder (a body
    /// copied into a companion); references are qualified and touch it.
    Qualified(Name),
}

/// What to translate and where it ends up.
pub(crate) struct BodySpec<'a> {
    pub body: &'a Body,
    /// Target parameter names and types, in order.
    pub params: &'a [(String, Type)],
    pub is_ctor: bool,
    /// Class whose statics need no guard inside this body.
    pub own: Option<Name>,
    pub literals: LiteralAccess,
}

pub(crate) struct BodyGen<'a, 'u> {
    env: GenEnv<'a>,
    unit: &'u mut UnitState,
    body: &'a Body,
    params: &'a [(String, Type)],
    is_ctor: bool,
    literals: LiteralAccess,
    si: StaticInit,
    /// Target name of every local, by `LocalId`.
    locals: Vec<String>,
    w: CodeWriter,
}

impl<'a, 'u> BodyGen<'a, 'u> {
    pub(crate) fn new(env: GenEnv<'a>, unit: &'u mut UnitState, spec: &BodySpec<'a>) -> Self {
        BodyGen {
            env,
            unit,
            body: spec.body,
            params: spec.params,
            is_ctor: spec.is_ctor,
            literals: spec.literals,
            si: StaticInit::new(spec.own),
            locals: Vec::new(),
            w: CodeWriter::new(),
        }
    }

    /// Translate the whole body: local declarations, then the root
    /// statements.
    pub(crate) fn run(mut self) -> CodegenResult<CodeWriter> {
        self.declare_locals();
        if self.body.has_traps() {
            self.w.line(&format!("var {CAUGHT_SLOT}:Dynamic = null;"));
        }
        let body = self.body;
        for &id in body.root() {
            self.stmt(id)?;
        }
        Ok(self.w)
    }

    /// Every non-parameter local is declared up front with its zero value,
    /// so jumps never skip a declaration.
    ///
    /// A local named like a parameter of the same type is that parameter.
    /// Locals sharing a name but not a type get a numeric suffix.
    fn declare_locals(&mut self) {
        let mut declared: FxHashMap<String, Type> = self
            .params
            .iter()
            .map(|(name, ty)| (name.clone(), ty.clone()))
            .collect();

        for local in self.body.locals() {
            let base = escape_member(&self.env.text(local.name));
            let mut name = base.clone();
            let mut n = 0;
            loop {
                match declared.get(&name) {
                    Some(ty) if *ty == local.ty => break,
                    Some(_) => {
                        n += 1;
                        name = format!("{base}_{n}");
                    }
                    None => {
                        self.w.line(&format!(
                            "var {name}:{} = {};",
                            self.env.names.type_tag(&local.ty),
                            default_value(&local.ty)
                        ));
                        declared.insert(name.clone(), local.ty.clone());
                        break;
                    }
                }
            }
            self.locals.push(name);
        }
    }

    // ── Node lookup ─────────────────────────────────────────────────

    fn expr_node(&self, id: ExprId) -> CodegenResult<&'a Expr> {
        self.body
            .expr(id)
            .ok_or_else(|| CodegenError::MalformedBody(format!("expression {} does not exist", id.raw())))
    }

    fn stmt_node(&self, id: StmtId) -> CodegenResult<&'a Stmt> {
        self.body
            .stmt(id)
            .ok_or_else(|| CodegenError::MalformedBody(format!("statement {} does not exist", id.raw())))
    }

    fn local_name(&self, id: LocalId) -> CodegenResult<String> {
        self.locals
            .get(id.index())
            .cloned()
            .ok_or_else(|| CodegenError::MalformedBody(format!("local {} does not exist", id.raw())))
    }

    /// Source spelling of a name, for diagnostics.
    fn source(&self, name: Name) -> String {
        self.env.text(name).to_string()
    }
}
