//! Program-model input.
//!
//! The upstream front end hands over the whole program as one JSON document.
//! Types are written as descriptors (`I`, `Ljava/lang/String;`, `[[D`),
//! method signatures as method descriptors (`(IJ)V`). A method body is the
//! flat arena itself: expressions and statements refer to each other by
//! their index in `exprs` / `stmts`.
//!
//! ```json
//! { "classes": [ {
//!     "name": "app.Main", "kind": "class", "superclass": "java.lang.Object",
//!     "methods": [ { "id": 1, "name": "run", "ret": "I", "modifiers": 9,
//!       "body": {
//!         "exprs": [ { "kind": "literal", "type": "I", "value": { "int": 2 } } ],
//!         "stmts": [ { "kind": "return", "expr": 0 } ],
//!         "root": [0] } } ] } ] }
//! ```

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use serde::Deserialize;

use hx_diagnostic::{Diagnostic, ErrorCode};
use hx_ir::{
    Annotation, AnnotationValue, BinaryOp, Body, BodyBuilder, CallKind, ClassKind, ClassMarkers,
    ClassModel, ExprId, ExprKind, Field, FieldRef, LabelId, Literal, LocalId, Method, MethodId,
    MethodRef, MethodType, Modifiers, Name, Param, PrimKind, Program, SharedInterner, StmtId,
    StmtKind, Type, UnaryOp,
};

/// Why a program model could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("cannot read `{path}`: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("malformed program model: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bad type descriptor `{0}`")]
    Descriptor(String),

    #[error("class `{0}` is declared twice")]
    DuplicateClass(String),
}

impl InputError {
    pub fn code(&self) -> ErrorCode {
        match self {
            InputError::Read { .. } => ErrorCode::E3002,
            InputError::Json(_) | InputError::Descriptor(_) | InputError::DuplicateClass(_) => {
                ErrorCode::E1004
            }
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code()).with_message(self.to_string())
    }
}

/// Read and convert the program model at `path`.
pub fn load_program(path: &Path) -> Result<Program, InputError> {
    let text = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_program(&text)
}

/// Convert a program model given as JSON text.
pub fn parse_program(text: &str) -> Result<Program, InputError> {
    let dto: ProgramDto = serde_json::from_str(text)?;
    let interner = SharedInterner::new();
    let mut program = Program::new(interner.clone());
    let cx = Converter { i: &interner };
    for class in dto.classes {
        let model = cx.class(class)?;
        if program.get(model.name).is_some() {
            return Err(InputError::DuplicateClass(
                interner.lookup(model.name).to_string(),
            ));
        }
        program.add_class(model);
    }
    tracing::debug!(classes = program.len(), "program model loaded");
    Ok(program)
}

// ── Wire format ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ProgramDto {
    classes: Vec<ClassDto>,
}

#[derive(Deserialize, Default, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum KindDto {
    #[default]
    Class,
    Interface,
    Abstract,
}

#[derive(Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum MarkerDto {
    NativeBound,
    HasStaticInit,
    FunctionalInterface,
    AnnotationType,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ClassDto {
    name: String,
    #[serde(default)]
    kind: KindDto,
    #[serde(default)]
    superclass: Option<String>,
    #[serde(default)]
    interfaces: Vec<String>,
    /// Defaults to what the kind implies.
    #[serde(default)]
    modifiers: Option<u32>,
    #[serde(default)]
    markers: Vec<MarkerDto>,
    #[serde(default)]
    native_name: Option<String>,
    #[serde(default)]
    source_file: Option<String>,
    #[serde(default)]
    annotations: Vec<AnnotationDto>,
    #[serde(default)]
    fields: Vec<FieldDto>,
    #[serde(default)]
    methods: Vec<MethodDto>,
}

fn public() -> u32 {
    Modifiers::PUBLIC.bits()
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldDto {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default = "public")]
    modifiers: u32,
    #[serde(default)]
    constant: Option<LiteralDto>,
    #[serde(default)]
    annotations: Vec<AnnotationDto>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ParamDto {
    name: String,
    #[serde(rename = "type")]
    ty: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MethodDto {
    id: u32,
    name: String,
    #[serde(default)]
    params: Vec<ParamDto>,
    ret: String,
    #[serde(default = "public")]
    modifiers: u32,
    #[serde(default)]
    annotations: Vec<AnnotationDto>,
    #[serde(default)]
    param_annotations: Vec<Vec<AnnotationDto>>,
    #[serde(default)]
    default_value: Option<ValueDto>,
    #[serde(default)]
    body: Option<BodyDto>,
}

fn visible() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AnnotationDto {
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    elements: BTreeMap<String, ValueDto>,
    #[serde(default = "visible")]
    runtime_visible: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum ValueDto {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Char(u16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Enum { class: String, field: String },
    Class(String),
    Annotation(Box<AnnotationDto>),
    Array(Vec<ValueDto>),
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
enum LiteralDto {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Class(String),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LocalDto {
    name: String,
    #[serde(rename = "type")]
    ty: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BodyDto {
    #[serde(default)]
    locals: Vec<LocalDto>,
    #[serde(default)]
    labels: u32,
    #[serde(default)]
    exprs: Vec<ExprDto>,
    #[serde(default)]
    stmts: Vec<StmtDto>,
    root: Vec<u32>,
}

#[derive(Deserialize)]
struct MethodRefDto {
    class: String,
    name: String,
    descriptor: String,
}

#[derive(Deserialize)]
struct FieldRefDto {
    class: String,
    name: String,
    #[serde(rename = "type")]
    ty: String,
}

#[derive(Deserialize)]
struct ExprDto {
    #[serde(rename = "type")]
    ty: String,
    #[serde(flatten)]
    kind: ExprKindDto,
}

#[derive(Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum CallKindDto {
    Static,
    Instance,
    Super,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ExprKindDto {
    Literal {
        value: LiteralDto,
    },
    Local {
        local: u32,
    },
    This,
    CaughtException,
    Binary {
        op: String,
        left: u32,
        right: u32,
    },
    Unary {
        op: String,
        operand: u32,
    },
    Call {
        call: CallKindDto,
        #[serde(default)]
        obj: Option<u32>,
        method: MethodRefDto,
        #[serde(default)]
        args: Vec<u32>,
        #[serde(default)]
        special: bool,
    },
    FieldInstance {
        obj: u32,
        field: FieldRefDto,
    },
    FieldStatic {
        field: FieldRefDto,
    },
    ArrayAccess {
        array: u32,
        index: u32,
    },
    ArrayLength {
        array: u32,
    },
    New {
        class: String,
    },
    NewArray {
        counts: Vec<u32>,
    },
    InstanceOf {
        expr: u32,
        check: String,
    },
    Cast {
        expr: u32,
    },
    MethodClass {
        interface_method: MethodRefDto,
        target: MethodRefDto,
    },
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum StmtDto {
    Nop,
    Line {
        line: u32,
    },
    Label {
        label: u32,
    },
    Goto {
        label: u32,
    },
    IfGoto {
        cond: u32,
        label: u32,
    },
    SwitchGoto {
        subject: u32,
        cases: Vec<(i32, u32)>,
        default: u32,
    },
    SetLocal {
        local: u32,
        expr: u32,
    },
    SetField {
        obj: u32,
        field: FieldRefDto,
        expr: u32,
    },
    SetStaticField {
        field: FieldRefDto,
        expr: u32,
    },
    SetArray {
        array: u32,
        index: u32,
        expr: u32,
    },
    SetNewWithConstructor {
        local: u32,
        class: String,
        constructor: MethodRefDto,
        #[serde(default)]
        args: Vec<u32>,
    },
    Expr {
        expr: u32,
    },
    Return {
        #[serde(default)]
        expr: Option<u32>,
    },
    Throw {
        expr: u32,
    },
    TryCatch {
        body: u32,
        catch: u32,
    },
    Rethrow,
    Block {
        stmts: Vec<u32>,
    },
    If {
        cond: u32,
        then: u32,
        #[serde(default, rename = "else")]
        otherwise: Option<u32>,
    },
    While {
        cond: u32,
        body: u32,
    },
    Switch {
        subject: u32,
        cases: Vec<(Vec<i32>, u32)>,
        default: u32,
    },
    Break,
    Continue,
}

// ── Conversion ──────────────────────────────────────────────────────────

struct Converter<'a> {
    i: &'a SharedInterner,
}

impl Converter<'_> {
    fn n(&self, s: &str) -> Name {
        self.i.intern(s)
    }

    fn class(&self, dto: ClassDto) -> Result<ClassModel, InputError> {
        let kind = match dto.kind {
            KindDto::Class => ClassKind::Class,
            KindDto::Interface => ClassKind::Interface,
            KindDto::Abstract => ClassKind::Abstract,
        };
        let mut class = ClassModel::new(self.n(&dto.name), kind);
        if let Some(bits) = dto.modifiers {
            class.modifiers = Modifiers::from_bits_truncate(bits);
        }
        class.superclass = dto.superclass.as_deref().map(|s| self.n(s));
        class.interfaces = dto.interfaces.iter().map(|s| self.n(s)).collect();
        for marker in dto.markers {
            class.markers |= match marker {
                MarkerDto::NativeBound => ClassMarkers::NATIVE_BOUND,
                MarkerDto::HasStaticInit => ClassMarkers::HAS_STATIC_INIT,
                MarkerDto::FunctionalInterface => ClassMarkers::FUNCTIONAL_INTERFACE,
                MarkerDto::AnnotationType => ClassMarkers::ANNOTATION_TYPE,
            };
        }
        class.native_name = dto.native_name.as_deref().map(|s| self.n(s));
        class.source_file = dto.source_file.as_deref().map(|s| self.n(s));
        class.annotations = self.annotations(dto.annotations)?;
        for field in dto.fields {
            class.fields.push(self.field(field)?);
        }
        for method in dto.methods {
            class.methods.push(self.method(method)?);
        }
        Ok(class)
    }

    fn field(&self, dto: FieldDto) -> Result<Field, InputError> {
        let mut field = Field::new(
            self.n(&dto.name),
            self.ty(&dto.ty)?,
            Modifiers::from_bits_truncate(dto.modifiers),
        );
        field.constant = dto.constant.map(|c| self.literal(c)).transpose()?;
        field.annotations = self.annotations(dto.annotations)?;
        Ok(field)
    }

    fn method(&self, dto: MethodDto) -> Result<Method, InputError> {
        let params = dto
            .params
            .iter()
            .map(|p| {
                Ok(Param {
                    name: self.n(&p.name),
                    ty: self.ty(&p.ty)?,
                })
            })
            .collect::<Result<Vec<_>, InputError>>()?;
        let mut method = Method::new(MethodId(dto.id), self.n(&dto.name), params, self.ty(&dto.ret)?);
        method.modifiers = Modifiers::from_bits_truncate(dto.modifiers);
        method.annotations = self.annotations(dto.annotations)?;
        method.param_annotations = dto
            .param_annotations
            .into_iter()
            .map(|list| self.annotations(list))
            .collect::<Result<_, _>>()?;
        method.default_value = dto.default_value.map(|v| self.value(v)).transpose()?;
        method.body = dto.body.map(|b| self.body(b)).transpose()?;
        Ok(method)
    }

    fn annotations(&self, list: Vec<AnnotationDto>) -> Result<Vec<Annotation>, InputError> {
        list.into_iter().map(|a| self.annotation(a)).collect()
    }

    fn annotation(&self, dto: AnnotationDto) -> Result<Annotation, InputError> {
        let mut annotation = Annotation::new(self.n(&dto.ty));
        annotation.runtime_visible = dto.runtime_visible;
        for (key, value) in dto.elements {
            annotation = annotation.with(self.n(&key), self.value(value)?);
        }
        Ok(annotation)
    }

    fn value(&self, dto: ValueDto) -> Result<AnnotationValue, InputError> {
        Ok(match dto {
            ValueDto::Bool(v) => AnnotationValue::Bool(v),
            ValueDto::Byte(v) => AnnotationValue::Byte(v),
            ValueDto::Short(v) => AnnotationValue::Short(v),
            ValueDto::Char(v) => AnnotationValue::Char(v),
            ValueDto::Int(v) => AnnotationValue::Int(v),
            ValueDto::Long(v) => AnnotationValue::Long(v),
            ValueDto::Float(v) => AnnotationValue::Float(v.to_bits()),
            ValueDto::Double(v) => AnnotationValue::Double(v.to_bits()),
            ValueDto::String(s) => AnnotationValue::String(self.n(&s)),
            ValueDto::Enum { class, field } => AnnotationValue::Enum {
                class: self.n(&class),
                field: self.n(&field),
            },
            ValueDto::Class(ty) => AnnotationValue::Class(self.ty(&ty)?),
            ValueDto::Annotation(a) => AnnotationValue::Annotation(Box::new(self.annotation(*a)?)),
            ValueDto::Array(items) => AnnotationValue::Array(
                items
                    .into_iter()
                    .map(|v| self.value(v))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }

    fn literal(&self, dto: LiteralDto) -> Result<Literal, InputError> {
        Ok(match dto {
            LiteralDto::Null => Literal::Null,
            LiteralDto::Bool(v) => Literal::Bool(v),
            LiteralDto::Int(v) => Literal::Int(v),
            LiteralDto::Long(v) => Literal::Long(v),
            LiteralDto::Float(v) => Literal::float(v),
            LiteralDto::Double(v) => Literal::double(v),
            LiteralDto::String(s) => Literal::String(self.n(&s)),
            LiteralDto::Class(ty) => Literal::Class(self.ty(&ty)?),
        })
    }

    fn mref(&self, dto: &MethodRefDto) -> Result<MethodRef, InputError> {
        Ok(MethodRef::new(
            self.n(&dto.class),
            self.n(&dto.name),
            self.method_type(&dto.descriptor)?,
        ))
    }

    fn fref(&self, dto: &FieldRefDto) -> Result<FieldRef, InputError> {
        Ok(FieldRef {
            class: self.n(&dto.class),
            name: self.n(&dto.name),
            ty: self.ty(&dto.ty)?,
        })
    }

    /// Locals, labels, expressions and statements are allocated in input
    /// order, so each input index is also the builder's id.
    fn body(&self, dto: BodyDto) -> Result<Body, InputError> {
        let mut b = BodyBuilder::new();
        for local in &dto.locals {
            b.local(self.n(&local.name), self.ty(&local.ty)?);
        }
        for _ in 0..dto.labels {
            b.label();
        }
        for expr in &dto.exprs {
            let kind = self.expr_kind(&mut b, &expr.kind)?;
            b.expr(kind, self.ty(&expr.ty)?);
        }
        for stmt in &dto.stmts {
            let kind = self.stmt_kind(&mut b, stmt)?;
            b.stmt(kind);
        }
        Ok(b.finish(dto.root.iter().map(|&id| StmtId::new(id))))
    }

    fn expr_kind(&self, b: &mut BodyBuilder, dto: &ExprKindDto) -> Result<ExprKind, InputError> {
        let e = ExprId::new;
        Ok(match dto {
            ExprKindDto::Literal { value } => ExprKind::Literal(self.literal(value.clone())?),
            ExprKindDto::Local { local } => ExprKind::Local(LocalId::new(*local)),
            ExprKindDto::This => ExprKind::This,
            ExprKindDto::CaughtException => ExprKind::CaughtException,
            ExprKindDto::Binary { op, left, right } => ExprKind::Binary {
                op: binary_op(op)?,
                left: e(*left),
                right: e(*right),
            },
            ExprKindDto::Unary { op, operand } => ExprKind::Unary {
                op: unary_op(op)?,
                operand: e(*operand),
            },
            ExprKindDto::Call {
                call,
                obj,
                method,
                args,
                special,
            } => {
                let receiver = || {
                    obj.map(e)
                        .ok_or_else(|| InputError::Descriptor(format!("{} needs `obj`", method.name)))
                };
                let kind = match call {
                    CallKindDto::Static => CallKind::Static,
                    CallKindDto::Instance => CallKind::Instance { obj: receiver()? },
                    CallKindDto::Super => CallKind::Super { obj: receiver()? },
                };
                ExprKind::Call {
                    kind,
                    method: self.mref(method)?,
                    args: b.expr_list(args.iter().map(|&a| e(a))),
                    is_special: *special,
                }
            }
            ExprKindDto::FieldInstance { obj, field } => ExprKind::FieldInstance {
                obj: e(*obj),
                field: self.fref(field)?,
            },
            ExprKindDto::FieldStatic { field } => ExprKind::FieldStatic {
                field: self.fref(field)?,
            },
            ExprKindDto::ArrayAccess { array, index } => ExprKind::ArrayAccess {
                array: e(*array),
                index: e(*index),
            },
            ExprKindDto::ArrayLength { array } => ExprKind::ArrayLength { array: e(*array) },
            ExprKindDto::New { class } => ExprKind::New {
                class: self.n(class),
            },
            ExprKindDto::NewArray { counts } => ExprKind::NewArray {
                counts: b.expr_list(counts.iter().map(|&c| e(c))),
            },
            ExprKindDto::InstanceOf { expr, check } => ExprKind::InstanceOf {
                expr: e(*expr),
                check: self.ty(check)?,
            },
            ExprKindDto::Cast { expr } => ExprKind::Cast { expr: e(*expr) },
            ExprKindDto::MethodClass {
                interface_method,
                target,
            } => ExprKind::MethodClass {
                interface_method: self.mref(interface_method)?,
                target: self.mref(target)?,
            },
        })
    }

    fn stmt_kind(&self, b: &mut BodyBuilder, dto: &StmtDto) -> Result<StmtKind, InputError> {
        let e = ExprId::new;
        let s = StmtId::new;
        let l = LabelId::new;
        Ok(match dto {
            StmtDto::Nop => StmtKind::Nop,
            StmtDto::Line { line } => StmtKind::Line { line: *line },
            StmtDto::Label { label } => StmtKind::Label(l(*label)),
            StmtDto::Goto { label } => StmtKind::Goto(l(*label)),
            StmtDto::IfGoto { cond, label } => StmtKind::IfGoto {
                cond: e(*cond),
                label: l(*label),
            },
            StmtDto::SwitchGoto {
                subject,
                cases,
                default,
            } => StmtKind::SwitchGoto {
                subject: e(*subject),
                cases: cases.iter().map(|&(v, t)| (v, l(t))).collect(),
                default: l(*default),
            },
            StmtDto::SetLocal { local, expr } => StmtKind::SetLocal {
                local: LocalId::new(*local),
                expr: e(*expr),
            },
            StmtDto::SetField { obj, field, expr } => StmtKind::SetField {
                obj: e(*obj),
                field: self.fref(field)?,
                expr: e(*expr),
            },
            StmtDto::SetStaticField { field, expr } => StmtKind::SetStaticField {
                field: self.fref(field)?,
                expr: e(*expr),
            },
            StmtDto::SetArray { array, index, expr } => StmtKind::SetArray {
                array: e(*array),
                index: e(*index),
                expr: e(*expr),
            },
            StmtDto::SetNewWithConstructor {
                local,
                class,
                constructor,
                args,
            } => StmtKind::SetNewWithConstructor {
                local: LocalId::new(*local),
                class: self.n(class),
                constructor: self.mref(constructor)?,
                args: b.expr_list(args.iter().map(|&a| e(a))),
            },
            StmtDto::Expr { expr } => StmtKind::Expr(e(*expr)),
            StmtDto::Return { expr } => StmtKind::Return(expr.map(e)),
            StmtDto::Throw { expr } => StmtKind::Throw(e(*expr)),
            StmtDto::TryCatch { body, catch } => StmtKind::TryCatch {
                body: s(*body),
                catch: s(*catch),
            },
            StmtDto::Rethrow => StmtKind::Rethrow,
            StmtDto::Block { stmts } => StmtKind::Block(b.stmt_list(stmts.iter().map(|&x| s(x)))),
            StmtDto::If {
                cond,
                then,
                otherwise,
            } => StmtKind::If {
                cond: e(*cond),
                then_branch: s(*then),
                else_branch: otherwise.map(s),
            },
            StmtDto::While { cond, body } => StmtKind::While {
                cond: e(*cond),
                body: s(*body),
            },
            StmtDto::Switch {
                subject,
                cases,
                default,
            } => StmtKind::Switch {
                subject: e(*subject),
                cases: cases
                    .iter()
                    .map(|(values, body)| (values.clone(), s(*body)))
                    .collect(),
                default: s(*default),
            },
            StmtDto::Break => StmtKind::Break,
            StmtDto::Continue => StmtKind::Continue,
        })
    }

    fn ty(&self, descriptor: &str) -> Result<Type, InputError> {
        let mut rest = descriptor;
        let ty = self.next_type(&mut rest, descriptor)?;
        if rest.is_empty() {
            Ok(ty)
        } else {
            Err(InputError::Descriptor(descriptor.to_string()))
        }
    }

    fn method_type(&self, descriptor: &str) -> Result<MethodType, InputError> {
        let bad = || InputError::Descriptor(descriptor.to_string());
        let mut rest = descriptor.strip_prefix('(').ok_or_else(bad)?;
        let mut args = Vec::new();
        while !rest.starts_with(')') {
            if rest.is_empty() {
                return Err(bad());
            }
            let arg = self.next_type(&mut rest, descriptor)?;
            if arg.is_void() {
                return Err(bad());
            }
            args.push(arg);
        }
        let ret = self.ty(&rest[1..])?;
        Ok(MethodType::new(args, ret))
    }

    /// Consume one type from the front of `rest`.
    fn next_type(&self, rest: &mut &str, whole: &str) -> Result<Type, InputError> {
        let bad = || InputError::Descriptor(whole.to_string());
        let dims = rest.chars().take_while(|&c| c == '[').count();
        *rest = &rest[dims..];
        let element = match rest.chars().next().ok_or_else(bad)? {
            'V' if dims == 0 => {
                *rest = &rest[1..];
                Type::Void
            }
            'L' => {
                let end = rest.find(';').ok_or_else(bad)?;
                let name = rest[1..end].replace('/', ".");
                *rest = &rest[end + 1..];
                Type::Reference(self.n(&name))
            }
            c => {
                let kind = PrimKind::from_descriptor_char(c).ok_or_else(bad)?;
                *rest = &rest[1..];
                Type::Primitive(kind)
            }
        };
        Ok(if dims == 0 {
            element
        } else {
            Type::array(element, u32::try_from(dims).map_err(|_| bad())?)
        })
    }
}

fn binary_op(op: &str) -> Result<BinaryOp, InputError> {
    Ok(match op {
        "add" => BinaryOp::Add,
        "sub" => BinaryOp::Sub,
        "mul" => BinaryOp::Mul,
        "div" => BinaryOp::Div,
        "rem" => BinaryOp::Rem,
        "and" => BinaryOp::And,
        "or" => BinaryOp::Or,
        "xor" => BinaryOp::Xor,
        "shl" => BinaryOp::Shl,
        "shr" => BinaryOp::Shr,
        "ushr" => BinaryOp::Ushr,
        "eq" => BinaryOp::Eq,
        "ne" => BinaryOp::Ne,
        "lt" => BinaryOp::Lt,
        "le" => BinaryOp::Le,
        "gt" => BinaryOp::Gt,
        "ge" => BinaryOp::Ge,
        "lcmp" => BinaryOp::Lcmp,
        "cmp" => BinaryOp::Cmp,
        "cmpl" => BinaryOp::Cmpl,
        "cmpg" => BinaryOp::Cmpg,
        other => return Err(InputError::Descriptor(format!("binary operator `{other}`"))),
    })
}

fn unary_op(op: &str) -> Result<UnaryOp, InputError> {
    Ok(match op {
        "neg" => UnaryOp::Neg,
        "not" => UnaryOp::Not,
        "inv" => UnaryOp::Inv,
        other => return Err(InputError::Descriptor(format!("unary operator `{other}`"))),
    })
}
