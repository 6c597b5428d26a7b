//! Statement translation and control-flow emission.
//!
//! Structured forms map onto Haxe's own `if`/`while`/`switch`. Label and
//! goto forms are emitted verbatim through `untyped __cpp__` and are only
//! allowed where the options say the subtarget can express them.

use hx_ir::{ExprRange, LabelId, LocalId, MethodRef, Name, StmtId, StmtKind, Type};

use super::expr::int_literal;
use super::BodyGen;
use crate::error::{CodegenError, CodegenResult};
use crate::runtime_api::{CATCH_BINDING, CAUGHT_SLOT};

impl BodyGen<'_, '_> {
    pub(super) fn stmt(&mut self, id: StmtId) -> CodegenResult<()> {
        let stmt = self.stmt_node(id)?;
        match &stmt.kind {
            StmtKind::Nop => {}
            StmtKind::Line { line } => self.w.mark_source_line(*line),

            StmtKind::Label(label) => {
                self.jump_target("label", *label)?;
                self.w.line(&cpp(&format!("L{}:;", label.raw())));
            }
            StmtKind::Goto(label) => {
                self.jump_target("goto", *label)?;
                self.w.line(&goto(*label));
            }
            StmtKind::IfGoto { cond, label } => {
                self.jump_target("conditional goto", *label)?;
                let cond = self.expr(*cond)?;
                self.flush();
                self.w.line(&format!("if ({cond}) {{ {} }}", goto(*label)));
            }
            StmtKind::SwitchGoto {
                subject,
                cases,
                default,
            } => {
                for (_, label) in cases {
                    self.jump_target("switch-goto", *label)?;
                }
                self.jump_target("switch-goto", *default)?;
                let subject = self.expr(*subject)?;
                self.flush();
                self.w.open(&format!("switch ({subject})"));
                for (value, label) in cases {
                    self.w
                        .line(&format!("case {}: {}", int_literal(*value), goto(*label)));
                }
                self.w.line(&format!("default: {}", goto(*default)));
                self.w.close();
            }

            StmtKind::SetLocal { local, expr } => {
                let left = self.local_name(*local)?;
                let right = self.expr(*expr)?;
                self.assign(&left, &right);
            }
            StmtKind::SetField { obj, field, expr } => {
                let obj = self.expr(*obj)?;
                let (_, name) = self.resolve_field(field)?;
                let right = self.expr(*expr)?;
                self.assign(&format!("{obj}.{name}"), &right);
            }
            StmtKind::SetStaticField { field, expr } => {
                let left = self.static_field(field)?;
                let right = self.expr(*expr)?;
                self.assign(&left, &right);
            }
            StmtKind::SetArray { array, index, expr } => {
                let array_ty = &self.expr_node(*array)?.ty;
                let element = if array_ty.is_array() {
                    array_ty.component()
                } else {
                    self.expr_node(*expr)?.ty.clone()
                };
                let base = self.array_operand(*array)?;
                let index = self.expr(*index)?;
                let value = self.expr(*expr)?;
                let setter = if element == Type::BOOL { "setBool" } else { "set" };
                self.flush();
                self.w.line(&format!("{base}.{setter}({index}, {value});"));
            }
            StmtKind::SetNewWithConstructor {
                local,
                class,
                constructor,
                args,
            } => self.construct(*local, *class, constructor, *args)?,

            StmtKind::Expr(expr) => {
                let text = self.expr(*expr)?;
                self.flush();
                self.w.line(&format!("{text};"));
            }
            StmtKind::Return(None) => {
                self.flush();
                self.w
                    .line(if self.is_ctor { "return this;" } else { "return;" });
            }
            StmtKind::Return(Some(expr)) => {
                let text = self.expr(*expr)?;
                self.flush();
                self.w.line(&format!("return {text};"));
            }
            StmtKind::Throw(expr) => {
                let text = self.expr(*expr)?;
                self.flush();
                self.w.line(&format!("throw {text};"));
            }
            StmtKind::TryCatch { body, catch } => {
                self.flush();
                self.w.open("try");
                self.stmt(*body)?;
                self.w.reopen(&format!("catch ({CATCH_BINDING}:Dynamic)"));
                self.w.line(&format!("{CAUGHT_SLOT} = {CATCH_BINDING};"));
                self.stmt(*catch)?;
                self.w.close();
            }
            StmtKind::Rethrow => {
                self.flush();
                self.w.line(&format!("throw {CAUGHT_SLOT};"));
            }

            StmtKind::Block(range) => {
                let body = self.body;
                for &child in body.stmt_list(*range) {
                    self.stmt(child)?;
                }
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond = self.expr(*cond)?;
                self.flush();
                self.w.open(&format!("if ({cond})"));
                self.stmt(*then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.w.reopen("else");
                    self.stmt(*else_branch)?;
                }
                self.w.close();
            }
            StmtKind::While { cond, body } => {
                let cond = self.expr(*cond)?;
                self.flush();
                self.w.open(&format!("while ({cond})"));
                self.stmt(*body)?;
                self.w.close();
            }
            StmtKind::Switch {
                subject,
                cases,
                default,
            } => {
                let subject = self.expr(*subject)?;
                self.flush();
                self.w.open(&format!("switch ({subject})"));
                for (values, body) in cases {
                    if values.is_empty() {
                        return Err(CodegenError::MalformedBody(
                            "switch case without values".to_string(),
                        ));
                    }
                    let values: Vec<String> = values.iter().map(|v| int_literal(*v)).collect();
                    self.w.line(&format!("case {}:", values.join(", ")));
                    self.w.indent();
                    self.stmt(*body)?;
                    self.w.dedent();
                }
                self.w.line("default:");
                self.w.indent();
                self.stmt(*default)?;
                self.w.dedent();
                self.w.close();
            }
            StmtKind::Break => {
                self.flush();
                self.w.line("break;");
            }
            StmtKind::Continue => {
                self.flush();
                self.w.line("continue;");
            }
        }
        Ok(())
    }

    /// Allocate, then run the constructor as an ordinary instance call.
    ///
    /// Native-mapped classes have no separate constructor method; their
    /// arguments go straight to `new`.
    fn construct(
        &mut self,
        local: LocalId,
        class: Name,
        constructor: &MethodRef,
        args: ExprRange,
    ) -> CodegenResult<()> {
        let target = self.local_name(local)?;
        if self.env.program.get(class).is_none() {
            return Err(CodegenError::UnresolvedClass {
                class: self.source(class),
            });
        }
        let entry = self.resolve_method(constructor, true)?;
        let fq = self.env.names.class_fq(class);
        let mut texts = self.call_args(args, entry.method)?;

        if self.env.names.is_native(class) {
            for (text, param) in texts.iter_mut().zip(&entry.method.params) {
                *text = self.to_native(&param.ty, text);
            }
            self.unit.refs.add(class);
            self.flush();
            self.w
                .line(&format!("{target} = new {fq}({});", texts.join(", ")));
            return Ok(());
        }

        self.touch(class);
        self.flush();
        let owner = self.env.program.class(entry.owner).name;
        self.w.line(&format!("{target} = new {fq}();"));
        self.w.line(&format!(
            "{target}.{}({});",
            self.method_name(owner, entry.method),
            texts.join(", ")
        ));
        Ok(())
    }

    /// Self-assignments are dropped.
    fn assign(&mut self, left: &str, right: &str) {
        self.flush();
        if left != right {
            self.w.line(&format!("{left} = {right};"));
        }
    }

    fn flush(&mut self) {
        self.si.flush(&mut self.w, self.env.names);
    }

    /// Labels and jumps need native goto and a label the body declares.
    fn jump_target(&self, form: &'static str, label: LabelId) -> CodegenResult<()> {
        if !self.env.options.supports_goto() {
            return Err(CodegenError::UnsupportedControlFlow {
                form,
                subtarget: self.env.options.subtarget,
            });
        }
        if !self.body.is_label_valid(label) {
            return Err(CodegenError::MalformedBody(format!(
                "jump to undeclared label L{}",
                label.raw()
            )));
        }
        Ok(())
    }
}

fn cpp(code: &str) -> String {
    format!("untyped __cpp__('{code}');")
}

fn goto(label: LabelId) -> String {
    cpp(&format!("goto L{};", label.raw()))
}
