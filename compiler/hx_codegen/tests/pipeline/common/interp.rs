//! A small interpreter for the statement and expression forms the generator
//! writes, used to check the runtime behavior of generated units.
//!
//! Target `Int` values are held unbounded (as `i64`) between operations, so
//! a missing `N.i(..)` narrowing shows up as a wrong result instead of being
//! hidden by host wrapping.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use hx_codegen::MemoryVfs;
use hx_rt::annotation::AnnotationProxy;
use hx_rt::{num, RtError, Value};

/// A runtime value.
#[derive(Clone, Debug, PartialEq)]
pub enum Hx {
    Null,
    Bool(bool),
    Int(i64),
    Long(i64),
    Float(f64),
    Str(Arc<str>),
    Boxed(Value),
    Array(Vec<Hx>),
    Annotation(Arc<AnnotationProxy>),
}

impl Hx {
    pub fn str(s: &str) -> Hx {
        Hx::Str(Arc::from(s))
    }

    pub fn int(&self) -> i32 {
        match self {
            Hx::Int(v) => num::i(*v),
            Hx::Boxed(v) => v.unbox_int().unwrap_or_else(|e| panic!("{e}")),
            other => panic!("expected Int, found {other:?}"),
        }
    }

    fn long(&self) -> i64 {
        match self {
            Hx::Long(v) => *v,
            Hx::Boxed(v) => v.unbox_long().unwrap_or_else(|e| panic!("{e}")),
            other => panic!("expected Long, found {other:?}"),
        }
    }

    fn bool(&self) -> bool {
        match self {
            Hx::Bool(b) => *b,
            Hx::Boxed(v) => v.unbox_bool().unwrap_or_else(|e| panic!("{e}")),
            other => panic!("expected Bool, found {other:?}"),
        }
    }

    /// Boxed form handed to runtime helpers.
    pub fn to_value(&self) -> Value {
        match self {
            Hx::Null => Value::Null,
            Hx::Bool(b) => Value::Bool(*b),
            Hx::Int(v) => Value::Int(num::i(*v)),
            Hx::Long(v) => Value::Long(*v),
            Hx::Float(v) => Value::Double(*v),
            Hx::Str(s) => Value::Str(s.clone()),
            Hx::Boxed(v) => v.clone(),
            other => panic!("{other:?} has no runtime value"),
        }
    }

    pub fn from_value(value: &Value) -> Hx {
        match value {
            Value::Null => Hx::Null,
            Value::Bool(b) => Hx::Bool(*b),
            Value::Str(s) => Hx::Str(s.clone()),
            Value::Int(v) => Hx::Int(i64::from(*v)),
            Value::Long(v) => Hx::Long(*v),
            Value::Double(v) => Hx::Float(*v),
            other => Hx::Boxed(other.clone()),
        }
    }
}

fn thrown(e: &RtError) -> Hx {
    Hx::str(&e.to_string())
}

// ── Loading ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct Line {
    indent: usize,
    text: String,
}

#[derive(Clone, Debug)]
struct Function {
    params: Vec<String>,
    body: Vec<Line>,
}

#[derive(Default, Debug)]
struct Class {
    statics: HashMap<String, Hx>,
    functions: HashMap<String, Arc<Function>>,
}

/// A function implemented by the test instead of by a generated body.
pub type Host = Rc<dyn Fn(&[Hx]) -> Result<Hx, Hx>>;

/// Loaded units plus the state of their statics.
#[derive(Default)]
pub struct Machine {
    classes: HashMap<String, Class>,
    hosts: HashMap<(String, String), Host>,
    /// Canonical class name for each alias (`app.X.X_Impl` -> `app.X_Impl`).
    aliases: HashMap<String, String>,
    inits: HashMap<String, usize>,
}

impl Machine {
    /// Load every `.hx` file of `vfs`.
    pub fn load(vfs: &MemoryVfs) -> Machine {
        let mut machine = Machine::default();
        for path in vfs.paths().filter(|p| p.ends_with(".hx")) {
            let text = vfs.get(path).unwrap_or_default();
            let module = path
                .rsplit('/')
                .next()
                .and_then(|f| f.strip_suffix(".hx"))
                .unwrap_or_default();
            machine.load_unit(module, text);
        }
        machine
    }

    fn load_unit(&mut self, module: &str, text: &str) {
        let lines: Vec<Line> = text
            .lines()
            .map(|l| {
                let indent = l.chars().take_while(|c| *c == '\t').count();
                Line {
                    indent,
                    text: l.trim().to_string(),
                }
            })
            .collect();

        let mut package = String::new();
        let mut current: Option<String> = None;
        let mut i = 0;
        while i < lines.len() {
            let line = &lines[i];
            if line.indent == 0 {
                if let Some(p) = line.text.strip_prefix("package ") {
                    package = p.trim_end_matches(';').to_string();
                } else if let Some(simple) = class_header(&line.text) {
                    let fq = format!("{package}.{simple}");
                    if simple != module {
                        self.aliases.insert(format!("{package}.{module}.{simple}"), fq.clone());
                    }
                    self.classes.entry(fq.clone()).or_default();
                    current = Some(fq);
                }
                i += 1;
                continue;
            }
            let Some(class) = current.clone() else {
                i += 1;
                continue;
            };
            if line.indent != 1 {
                i += 1;
                continue;
            }
            let text = line.text.trim_start_matches("@:keep ").to_string();
            if let Some(decl) = text.strip_prefix("static public var ") {
                let (name, init) = var_decl(decl);
                let value = match init {
                    Some(expr) => self
                        .eval_in(&class, &expr)
                        .unwrap_or_else(|e| panic!("initializer of {name} threw {e:?}")),
                    None => Hx::Null,
                };
                self.class_mut(&class).statics.insert(name, value);
            } else if text.contains("function ") && text.ends_with('{') {
                let (name, params) = function_header(&text);
                let start = i + 1;
                let mut end = start;
                while end < lines.len() && !(lines[end].indent == 1 && lines[end].text == "}") {
                    end += 1;
                }
                let body = lines[start..end]
                    .iter()
                    .map(|l| Line {
                        indent: l.indent - 2,
                        text: l.text.clone(),
                    })
                    .collect();
                self.class_mut(&class)
                    .functions
                    .insert(name, Arc::new(Function { params, body }));
                i = end;
            }
            i += 1;
        }
    }

    fn canonical<'s>(&'s self, class: &'s str) -> &'s str {
        self.aliases.get(class).map_or(class, String::as_str)
    }

    fn class_mut(&mut self, class: &str) -> &mut Class {
        let class = self.canonical(class).to_string();
        self.classes.entry(class).or_default()
    }

    fn is_class(&self, name: &str) -> bool {
        self.classes.contains_key(self.canonical(name))
    }

    /// Replace `class.name` with `host`.
    pub fn bind_host(&mut self, class: &str, name: &str, host: Host) {
        let class = self.canonical(class).to_string();
        self.hosts.insert((class, name.to_string()), host);
    }

    /// How many times `class`'s static initializer ran past its guard.
    pub fn init_count(&self, class: &str) -> usize {
        self.inits.get(class).copied().unwrap_or(0)
    }

    pub fn static_value(&self, class: &str, field: &str) -> Option<&Hx> {
        self.classes.get(self.canonical(class))?.statics.get(field)
    }

    pub fn has_function(&self, class: &str, name: &str) -> bool {
        self.classes
            .get(self.canonical(class))
            .is_some_and(|c| c.functions.contains_key(name))
    }

    // ── Running ─────────────────────────────────────────────────────────

    /// Call a static function. `Err` carries an uncaught thrown value.
    pub fn call(&mut self, class: &str, name: &str, args: Vec<Hx>) -> Result<Hx, Hx> {
        self.invoke(class, name, None, args)
    }

    /// Call an instance function with `this` bound to `this`.
    pub fn call_on(&mut self, this: Hx, class: &str, name: &str, args: Vec<Hx>) -> Result<Hx, Hx> {
        self.invoke(class, name, Some(this), args)
    }

    /// Evaluate one expression in the scope of `class`, with `locals` bound.
    pub fn eval_with(&mut self, class: &str, locals: &[(&str, Hx)], expr: &str) -> Result<Hx, Hx> {
        let mut frame = Frame::new(class, None);
        for (name, value) in locals {
            frame.locals.insert((*name).to_string(), value.clone());
        }
        self.eval(&mut frame, expr)
    }

    fn eval_in(&mut self, class: &str, expr: &str) -> Result<Hx, Hx> {
        self.eval_with(class, &[], expr)
    }

    fn invoke(&mut self, class: &str, name: &str, this: Option<Hx>, args: Vec<Hx>) -> Result<Hx, Hx> {
        let class = self.canonical(class).to_string();
        if let Some(host) = self.hosts.get(&(class.clone(), name.to_string())).cloned() {
            return host(&args);
        }
        let function = self
            .classes
            .get(&class)
            .and_then(|c| c.functions.get(name))
            .cloned()
            .unwrap_or_else(|| panic!("no function {class}.{name}"));
        assert_eq!(
            function.params.len(),
            args.len(),
            "arity of {class}.{name}"
        );
        let mut frame = Frame::new(&class, this);
        for (param, arg) in function.params.iter().zip(args) {
            frame.locals.insert(param.clone(), arg);
        }
        match self.block(&mut frame, &function.body)? {
            Flow::Return(value) => Ok(value),
            _ => Ok(Hx::Null),
        }
    }

    fn block(&mut self, frame: &mut Frame, lines: &[Line]) -> Result<Flow, Hx> {
        let mut i = 0;
        while i < lines.len() {
            let line = &lines[i];
            if let Some(header) = line.text.strip_suffix(" {") {
                let (segments, next) = segments(lines, i, header);
                let flow = self.compound(frame, &segments)?;
                if !matches!(flow, Flow::Normal) {
                    return Ok(flow);
                }
                i = next;
                continue;
            }
            let flow = self.simple(frame, &line.text)?;
            if !matches!(flow, Flow::Normal) {
                return Ok(flow);
            }
            i += 1;
        }
        Ok(Flow::Normal)
    }

    fn compound(&mut self, frame: &mut Frame, segments: &[(String, Vec<Line>)]) -> Result<Flow, Hx> {
        let (header, body) = &segments[0];
        if header == "try" {
            return match self.block(frame, body) {
                Ok(flow) => Ok(flow),
                Err(value) => {
                    let (catch, handler) = &segments[1];
                    let binding = catch
                        .trim_start_matches("catch (")
                        .split(':')
                        .next()
                        .unwrap_or_default()
                        .to_string();
                    frame.locals.insert(binding, value);
                    self.block(frame, handler)
                }
            };
        }
        if let Some(cond) = header.strip_prefix("if ") {
            if self.eval(frame, cond)?.bool() {
                return self.block(frame, body);
            }
            return match segments.get(1) {
                Some((_, otherwise)) => self.block(frame, otherwise),
                None => Ok(Flow::Normal),
            };
        }
        if let Some(cond) = header.strip_prefix("while ") {
            while self.eval(frame, cond)?.bool() {
                match self.block(frame, body)? {
                    Flow::Break => break,
                    Flow::Return(v) => return Ok(Flow::Return(v)),
                    Flow::Normal | Flow::Continue => {}
                }
            }
            return Ok(Flow::Normal);
        }
        panic!("unsupported block `{header}`")
    }

    fn simple(&mut self, frame: &mut Frame, text: &str) -> Result<Flow, Hx> {
        if let Some(rest) = text.strip_prefix("if (") {
            let close = matching_paren(rest);
            if self.eval(frame, &rest[..close])?.bool() {
                return self.simple(frame, rest[close + 1..].trim());
            }
            return Ok(Flow::Normal);
        }
        if text == "return;" || text == "return this;" {
            return Ok(Flow::Return(Hx::Null));
        }
        if text == "break;" {
            return Ok(Flow::Break);
        }
        if text == "continue;" {
            return Ok(Flow::Continue);
        }
        let stmt = text.strip_suffix(';').unwrap_or(text);
        if let Some(expr) = stmt.strip_prefix("return ") {
            return Ok(Flow::Return(self.eval(frame, expr)?));
        }
        if let Some(expr) = stmt.strip_prefix("throw ") {
            return Err(self.eval(frame, expr)?);
        }
        if let Some(decl) = stmt.strip_prefix("var ") {
            let (name, init) = var_decl(decl);
            let value = match init {
                Some(expr) => self.eval(frame, &expr)?,
                None => Hx::Null,
            };
            frame.locals.insert(name, value);
            return Ok(Flow::Normal);
        }
        if let Some(at) = find_assign(stmt) {
            let value = self.eval(frame, &stmt[at + 3..])?;
            self.assign(frame, stmt[..at].trim(), value);
            return Ok(Flow::Normal);
        }
        self.eval(frame, stmt)?;
        Ok(Flow::Normal)
    }

    fn assign(&mut self, frame: &mut Frame, target: &str, value: Hx) {
        if frame.locals.contains_key(target) {
            frame.locals.insert(target.to_string(), value);
            return;
        }
        let (class, field) = match target.rsplit_once('.') {
            Some((class, field)) if self.is_class(class) => {
                (self.canonical(class).to_string(), field.to_string())
            }
            Some(_) => panic!("unsupported assignment target `{target}`"),
            None => (frame.class.clone(), target.to_string()),
        };
        if field == "SII" && value == Hx::Bool(true) {
            *self.inits.entry(class.clone()).or_default() += 1;
        }
        self.class_mut(&class).statics.insert(field, value);
    }

    // ── Expressions ─────────────────────────────────────────────────────

    fn eval(&mut self, frame: &mut Frame, src: &str) -> Result<Hx, Hx> {
        let tokens = lex(src);
        let mut p = Cursor { tokens, pos: 0 };
        let value = self.expr(frame, &mut p)?;
        assert!(p.done(), "trailing tokens in `{src}`");
        Ok(value)
    }

    fn expr(&mut self, frame: &mut Frame, p: &mut Cursor) -> Result<Hx, Hx> {
        let mut left = self.unary(frame, p)?;
        while let Some(op) = p.binary_op() {
            let right = self.unary(frame, p)?;
            left = binary(op, &left, &right);
        }
        Ok(left)
    }

    fn unary(&mut self, frame: &mut Frame, p: &mut Cursor) -> Result<Hx, Hx> {
        if p.eat("-") {
            return Ok(match self.unary(frame, p)? {
                Hx::Int(v) => Hx::Int(-v),
                Hx::Long(v) => Hx::Long(v.wrapping_neg()),
                Hx::Float(v) => Hx::Float(-v),
                other => panic!("cannot negate {other:?}"),
            });
        }
        if p.eat("!") {
            return Ok(Hx::Bool(!self.unary(frame, p)?.bool()));
        }
        if p.eat("~") {
            return Ok(Hx::Int(!i64::from(self.unary(frame, p)?.int())));
        }
        let mut value = self.primary(frame, p)?;
        while p.eat("[") {
            let index = self.expr(frame, p)?.int();
            p.expect("]");
            value = match value {
                Hx::Array(items) => usize::try_from(index)
                    .ok()
                    .and_then(|k| items.get(k).cloned())
                    .unwrap_or_else(|| panic!("index {index} out of bounds")),
                other => panic!("cannot index {other:?}"),
            };
        }
        Ok(value)
    }

    fn primary(&mut self, frame: &mut Frame, p: &mut Cursor) -> Result<Hx, Hx> {
        match p.next() {
            Tok::Int(v) => Ok(Hx::Int(v)),
            Tok::Float(v) => Ok(Hx::Float(v)),
            Tok::Str(s) => Ok(Hx::str(&s)),
            Tok::Sym("(") => {
                let value = self.expr(frame, p)?;
                p.expect(")");
                Ok(value)
            }
            Tok::Sym("[") => Ok(Hx::Array(self.args(frame, p, "]")?)),
            Tok::Ident(word) => match word.as_str() {
                "true" => Ok(Hx::Bool(true)),
                "false" => Ok(Hx::Bool(false)),
                "null" => Ok(Hx::Null),
                "cast" => {
                    p.expect("(");
                    let value = self.expr(frame, p)?;
                    p.expect(",");
                    p.skip_type();
                    Ok(value)
                }
                "new" => {
                    let path = p.path(String::new());
                    p.expect("(");
                    let args = self.args(frame, p, ")")?;
                    Ok(self.construct(&path, args))
                }
                _ => {
                    let path = p.path(word);
                    if p.eat("(") {
                        let args = self.args(frame, p, ")")?;
                        self.call_path(frame, &path, args)
                    } else {
                        Ok(self.load_path(frame, &path))
                    }
                }
            },
            other => panic!("unexpected token {other:?}"),
        }
    }

    fn args(&mut self, frame: &mut Frame, p: &mut Cursor, close: &'static str) -> Result<Vec<Hx>, Hx> {
        let mut args = Vec::new();
        if p.eat(close) {
            return Ok(args);
        }
        loop {
            args.push(self.expr(frame, p)?);
            if p.eat(close) {
                return Ok(args);
            }
            p.expect(",");
        }
    }

    fn construct(&mut self, path: &str, args: Vec<Hx>) -> Hx {
        let class = self.canonical(path).to_string();
        let Some(annotation) = class.strip_suffix("_Impl") else {
            panic!("cannot construct {path}");
        };
        let data = match args.into_iter().next() {
            Some(Hx::Array(items)) => items.iter().map(Hx::to_value).collect(),
            _ => Vec::new(),
        };
        Hx::Annotation(Arc::new(AnnotationProxy::new(annotation, data)))
    }

    fn load_path(&self, frame: &Frame, path: &str) -> Hx {
        if let Some(value) = frame.locals.get(path) {
            return value.clone();
        }
        if path == "this.__data" {
            return match &frame.this {
                Some(Hx::Annotation(proxy)) => Hx::Array(
                    (0..)
                        .map_while(|k| proxy.get(k).ok())
                        .map(Hx::from_value)
                        .collect(),
                ),
                other => panic!("`this.__data` on {other:?}"),
            };
        }
        let (class, field) = match path.rsplit_once('.') {
            Some((class, field)) => (class, field),
            None => (frame.class.as_str(), path),
        };
        self.static_value(class, field)
            .cloned()
            .unwrap_or_else(|| panic!("unbound `{path}`"))
    }

    fn call_path(&mut self, frame: &mut Frame, path: &str, args: Vec<Hx>) -> Result<Hx, Hx> {
        if let Some(name) = path.strip_prefix("N.") {
            return num_helper(name, &args);
        }
        if let Some(name) = path.strip_prefix("HxNatives.") {
            return Ok(natives_helper(name, &args));
        }
        if path == "super" {
            return Ok(Hx::Null);
        }
        if let Some(name) = path.strip_prefix("this.") {
            let this = frame.this.clone();
            let class = frame.class.clone();
            return self.invoke(&class, name, this, args);
        }
        match path.rsplit_once('.') {
            Some((class, name)) if self.is_class(class) => self.invoke(class, name, None, args),
            Some(_) => panic!("unknown call target `{path}`"),
            None => {
                let class = frame.class.clone();
                self.invoke(&class, path, None, args)
            }
        }
    }
}

#[derive(Debug)]
struct Frame {
    class: String,
    this: Option<Hx>,
    locals: HashMap<String, Hx>,
}

impl Frame {
    fn new(class: &str, this: Option<Hx>) -> Self {
        Frame {
            class: class.to_string(),
            this,
            locals: HashMap::new(),
        }
    }
}

enum Flow {
    Normal,
    Return(Hx),
    Break,
    Continue,
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn num_helper(name: &str, a: &[Hx]) -> Result<Hx, Hx> {
    let int = |k: usize| a[k].int();
    let long = |k: usize| a[k].long();
    let i = |v: i32| Hx::Int(i64::from(v));
    Ok(match name {
        "i" => match &a[0] {
            Hx::Int(v) => i(num::i(*v)),
            other => panic!("N.i({other:?})"),
        },
        "i2b" => i(num::i2b(i64::from(int(0)))),
        "i2s" => i(num::i2s(i64::from(int(0)))),
        "i2c" => i(num::i2c(i64::from(int(0)))),
        "imul" => i(num::imul(int(0), int(1))),
        "idiv" => i(num::idiv(int(0), int(1)).map_err(|e| thrown(&e))?),
        "irem" => i(num::irem(int(0), int(1)).map_err(|e| thrown(&e))?),
        "ishl" => i(num::ishl(int(0), int(1))),
        "ishr" => i(num::ishr(int(0), int(1))),
        "iushr" => i(num::iushr(int(0), int(1))),
        "lnew" => Hx::Long(num::lnew(int(0), int(1))),
        "ladd" => Hx::Long(num::ladd(long(0), long(1))),
        "lsub" => Hx::Long(num::lsub(long(0), long(1))),
        "lmul" => Hx::Long(num::lmul(long(0), long(1))),
        "ldiv" => Hx::Long(num::ldiv(long(0), long(1)).map_err(|e| thrown(&e))?),
        "lrem" => Hx::Long(num::lrem(long(0), long(1)).map_err(|e| thrown(&e))?),
        "lneg" => Hx::Long(num::lneg(long(0))),
        "lshl" => Hx::Long(num::lshl(long(0), int(1))),
        "lshr" => Hx::Long(num::lshr(long(0), int(1))),
        "lushr" => Hx::Long(num::lushr(long(0), int(1))),
        "lcmp" => i(num::lcmp(long(0), long(1))),
        "cmp" => i(num::cmp(i64::from(int(0)), i64::from(int(1)))),
        "l2i" => i(num::l2i(long(0))),
        "i2j" => Hx::Long(num::i2j(int(0))),
        "z2i" => i(num::z2i(a[0].bool())),
        "i2z" => Hx::Bool(num::i2z(int(0))),
        "zand" => Hx::Bool(num::zand(a[0].bool(), a[1].bool())),
        "zor" => Hx::Bool(num::zor(a[0].bool(), a[1].bool())),
        "eq" => Hx::Bool(hx_rt::value::eq(&a[0].to_value(), &a[1].to_value())),
        "ne" => Hx::Bool(hx_rt::value::ne(&a[0].to_value(), &a[1].to_value())),
        "str" => match &a[0] {
            Hx::Str(s) => Hx::Str(s.clone()),
            other => panic!("N.str({other:?})"),
        },
        other => panic!("no helper N.{other}"),
    })
}

fn natives_helper(name: &str, a: &[Hx]) -> Hx {
    if name.starts_with("box") {
        return Hx::Boxed(a[0].to_value());
    }
    match name {
        "unboxInt" | "unboxByte" | "unboxShort" | "unboxChar" => Hx::Int(i64::from(a[0].int())),
        "unboxLong" => Hx::Long(a[0].long()),
        "unboxBool" => Hx::Bool(a[0].bool()),
        "unboxDouble" | "unboxFloat" => match a[0].to_value().unbox_double() {
            Ok(v) => Hx::Float(v),
            Err(e) => panic!("{e}"),
        },
        other => panic!("no helper HxNatives.{other}"),
    }
}

fn binary(op: &str, l: &Hx, r: &Hx) -> Hx {
    match (l, r) {
        (Hx::Int(a), Hx::Int(b)) => match op {
            "+" => Hx::Int(a + b),
            "-" => Hx::Int(a - b),
            "&" => Hx::Int(a & b),
            "|" => Hx::Int(a | b),
            "^" => Hx::Int(a ^ b),
            "==" => Hx::Bool(a == b),
            "!=" => Hx::Bool(a != b),
            "<" => Hx::Bool(a < b),
            "<=" => Hx::Bool(a <= b),
            ">" => Hx::Bool(a > b),
            ">=" => Hx::Bool(a >= b),
            other => panic!("unsupported Int operator `{other}`"),
        },
        (Hx::Float(a), Hx::Float(b)) => match op {
            "+" => Hx::Float(a + b),
            "-" => Hx::Float(a - b),
            "*" => Hx::Float(a * b),
            "/" => Hx::Float(a / b),
            "<" => Hx::Bool(a < b),
            ">" => Hx::Bool(a > b),
            other => panic!("unsupported Float operator `{other}`"),
        },
        (Hx::Bool(a), Hx::Bool(b)) => match op {
            "&&" => Hx::Bool(*a && *b),
            "||" => Hx::Bool(*a || *b),
            "==" => Hx::Bool(a == b),
            "!=" => Hx::Bool(a != b),
            other => panic!("unsupported Bool operator `{other}`"),
        },
        _ => match op {
            "==" => Hx::Bool(l == r),
            "!=" => Hx::Bool(l != r),
            other => panic!("`{other}` on {l:?} and {r:?}"),
        },
    }
}

/// `class Name ...` / `interface Name ...` at top level.
fn class_header(text: &str) -> Option<&str> {
    let rest = text
        .strip_prefix("class ")
        .or_else(|| text.strip_prefix("interface "))?;
    rest.split([' ', '{']).next()
}

/// `name:Type = init` or `name:Type`.
fn var_decl(decl: &str) -> (String, Option<String>) {
    let decl = decl.trim_end_matches(';');
    let name = decl.split(':').next().unwrap_or_default().trim().to_string();
    let init = decl.split_once(" = ").map(|(_, e)| e.to_string());
    (name, init)
}

/// Name and parameter names of `... function name(a:T, b:U):R {`.
fn function_header(text: &str) -> (String, Vec<String>) {
    let after = text.split_once("function ").map_or("", |(_, r)| r);
    let open = after.find('(').unwrap_or(after.len());
    let name = after[..open].to_string();
    let rest = &after[open + 1..];
    let params = &rest[..matching_paren(rest)];
    let params = if params.trim().is_empty() {
        Vec::new()
    } else {
        params
            .split(", ")
            .map(|p| p.split(':').next().unwrap_or_default().trim().to_string())
            .collect()
    };
    (name, params)
}

/// Offset of the `)` closing an already opened `(`.
fn matching_paren(s: &str) -> usize {
    let mut depth = 0usize;
    let mut in_str = false;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if in_str {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_str = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_str = true,
            '(' => depth += 1,
            ')' if depth == 0 => return i,
            ')' => depth -= 1,
            _ => {}
        }
    }
    panic!("unbalanced parentheses in `{s}`")
}

/// Offset of a top-level ` = ` outside string literals.
fn find_assign(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut in_str = false;
    let mut depth = 0i32;
    for i in 0..bytes.len() {
        match bytes[i] {
            b'"' if i == 0 || bytes[i - 1] != b'\\' => in_str = !in_str,
            b'(' | b'[' if !in_str => depth += 1,
            b')' | b']' if !in_str => depth -= 1,
            b' ' if !in_str && depth == 0 && s[i..].starts_with(" = ") => return Some(i),
            _ => {}
        }
    }
    None
}

/// Split a block starting at `lines[start]` into its `header { body }`
/// segments (`} else {`, `} catch (..) {` open new ones). Returns the
/// segments and the index after the closing `}`.
fn segments(lines: &[Line], start: usize, header: &str) -> (Vec<(String, Vec<Line>)>, usize) {
    let indent = lines[start].indent;
    let mut out = vec![(header.to_string(), Vec::new())];
    let mut i = start + 1;
    while i < lines.len() {
        let line = &lines[i];
        if line.indent == indent {
            if line.text == "}" {
                return (out, i + 1);
            }
            let next = line
                .text
                .strip_prefix("} ")
                .and_then(|h| h.strip_suffix(" {"))
                .unwrap_or_else(|| panic!("unexpected `{}` closing a block", line.text));
            out.push((next.to_string(), Vec::new()));
        } else if let Some((_, body)) = out.last_mut() {
            body.push(line.clone());
        }
        i += 1;
    }
    panic!("unterminated block `{header}`")
}

// ── Tokens ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
enum Tok {
    Int(i64),
    Float(f64),
    Str(String),
    Ident(String),
    Sym(&'static str),
    End,
}

const SYMBOLS: &[&str] = &[
    ">>>", "==", "!=", "<=", ">=", "<<", ">>", "&&", "||", "(", ")", "[", "]", ",", ".", "+",
    "-", "*", "/", "%", "&", "|", "^", "<", ">", "!", "~", ":",
];

const BINARY: &[&str] = &[
    ">>>", "==", "!=", "<=", ">=", "<<", ">>", "&&", "||", "+", "-", "*", "/", "%", "&", "|",
    "^", "<", ">",
];

fn lex(src: &str) -> Vec<Tok> {
    let chars: Vec<char> = src.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i + 1 < chars.len() && chars[i] == '.' && chars[i + 1].is_ascii_digit() {
                i += 1;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == 'e') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                out.push(Tok::Float(text.parse().unwrap_or_else(|_| panic!("float {text}"))));
            } else {
                let text: String = chars[start..i].iter().collect();
                out.push(Tok::Int(text.parse().unwrap_or_else(|_| panic!("int {text}"))));
            }
        } else if c == '"' {
            let mut s = String::new();
            i += 1;
            while chars[i] != '"' {
                if chars[i] == '\\' {
                    i += 1;
                    s.push(match chars[i] {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        other => other,
                    });
                } else {
                    s.push(chars[i]);
                }
                i += 1;
            }
            i += 1;
            out.push(Tok::Str(s));
        } else if c.is_alphanumeric() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.push(Tok::Ident(chars[start..i].iter().collect()));
        } else {
            let rest: String = chars[i..].iter().take(3).collect();
            let sym = SYMBOLS
                .iter()
                .find(|s| rest.starts_with(**s))
                .unwrap_or_else(|| panic!("unexpected `{c}` in `{src}`"));
            out.push(Tok::Sym(sym));
            i += sym.len();
        }
    }
    out
}

struct Cursor {
    tokens: Vec<Tok>,
    pos: usize,
}

impl Cursor {
    fn peek(&self) -> &Tok {
        self.tokens.get(self.pos).unwrap_or(&Tok::End)
    }

    fn next(&mut self) -> Tok {
        let tok = self.peek().clone();
        self.pos += 1;
        tok
    }

    fn done(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn eat(&mut self, sym: &str) -> bool {
        if matches!(self.peek(), Tok::Sym(s) if *s == sym) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, sym: &str) {
        assert!(self.eat(sym), "expected `{sym}`, found {:?}", self.peek());
    }

    fn binary_op(&mut self) -> Option<&'static str> {
        match self.peek() {
            Tok::Sym(s) if BINARY.contains(s) => {
                let s = *s;
                self.pos += 1;
                Some(s)
            }
            _ => None,
        }
    }

    /// A dotted path continuing from `first` (or starting fresh when empty).
    fn path(&mut self, first: String) -> String {
        let mut path = first;
        if path.is_empty() {
            match self.next() {
                Tok::Ident(word) => path = word,
                other => panic!("expected a name, found {other:?}"),
            }
        }
        while matches!(self.peek(), Tok::Sym(".")) {
            self.pos += 1;
            match self.next() {
                Tok::Ident(word) => {
                    path.push('.');
                    path.push_str(&word);
                }
                other => panic!("expected a name, found {other:?}"),
            }
        }
        path
    }

    /// Skip a type up to the `)` closing `cast(`.
    fn skip_type(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.next() {
                Tok::Sym("(") => depth += 1,
                Tok::Sym(")") if depth == 0 => return,
                Tok::Sym(")") => depth -= 1,
                Tok::End => panic!("unterminated cast"),
                _ => {}
            }
        }
    }
}
