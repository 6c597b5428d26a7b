//! Generation context: the read-only environment shared by every class,
//! the mutable state owned by one unit, and indented text output with
//! source-line tracking.

use std::sync::Arc;

use hx_diagnostic::Diagnostic;
use hx_ir::{Name, Program};

use crate::literals::LiteralTable;
use crate::static_init::ReferenceTable;
use crate::{GenOptions, Names};

/// Read-only inputs of a generation run, shared across classes (and threads).
#[derive(Copy, Clone)]
pub struct GenEnv<'a> {
    pub program: &'a Program,
    pub names: &'a Names,
    pub options: &'a GenOptions,
}

impl<'a> GenEnv<'a> {
    pub fn new(program: &'a Program, names: &'a Names, options: &'a GenOptions) -> Self {
        GenEnv {
            program,
            names,
            options,
        }
    }

    /// Source text of an interned name.
    pub fn text(&self, name: Name) -> Arc<str> {
        self.program.interner().lookup(name)
    }
}

/// State owned by one generation unit and discarded with it.
#[derive(Default, Debug)]
pub struct UnitState {
    pub literals: LiteralTable,
    pub refs: ReferenceTable,
    pub diagnostics: Vec<Diagnostic>,
}

/// One generated line attributed to an original source line.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct LineMapping {
    /// 0-based line in the generated unit.
    pub generated: u32,
    /// 1-based line in the original source file.
    pub source: u32,
}

/// Output buffer for one unit or one method body.
///
/// A line marker recorded with [`mark_source_line`](Self::mark_source_line)
/// attaches to the next line written.
#[derive(Default, Debug)]
pub struct CodeWriter {
    output: String,
    indent: usize,
    line: u32,
    pending_source: Option<u32>,
    mappings: Vec<LineMapping>,
}

impl CodeWriter {
    pub fn new() -> Self {
        CodeWriter {
            output: String::with_capacity(4096),
            ..CodeWriter::default()
        }
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    /// Write one line; embedded newlines become separate, equally indented
    /// lines. Empty text writes nothing.
    pub fn line(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        for part in text.lines() {
            self.raw_line(part);
        }
    }

    fn raw_line(&mut self, text: &str) {
        if let Some(source) = self.pending_source.take() {
            self.mappings.push(LineMapping {
                generated: self.line,
                source,
            });
        }
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.output.push('\t');
            }
            self.output.push_str(text);
        }
        self.output.push('\n');
        self.line += 1;
    }

    /// `header {` and indent.
    pub fn open(&mut self, header: &str) {
        self.raw_line(&format!("{header} {{"));
        self.indent();
    }

    /// Dedent and `}`.
    pub fn close(&mut self) {
        self.dedent();
        self.raw_line("}");
    }

    /// Close the current block and open the next on the same line
    /// (`} else {`, `} catch (e:Dynamic) {`).
    pub fn reopen(&mut self, header: &str) {
        self.dedent();
        self.raw_line(&format!("}} {header} {{"));
        self.indent();
    }

    /// Write an empty line.
    pub fn blank(&mut self) {
        self.output.push('\n');
        self.line += 1;
    }

    pub fn mark_source_line(&mut self, source: u32) {
        self.pending_source = Some(source);
    }

    /// Append another writer's output at the current indentation.
    pub fn append(&mut self, other: CodeWriter) {
        let base = self.line;
        for part in other.output.lines() {
            if part.is_empty() {
                self.blank();
            } else {
                self.raw_line(part);
            }
        }
        self.mappings
            .extend(other.mappings.into_iter().map(|m| LineMapping {
                generated: m.generated + base,
                source: m.source,
            }));
    }

    pub fn line_count(&self) -> u32 {
        self.line
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    pub fn finish(self) -> (String, Vec<LineMapping>) {
        (self.output, self.mappings)
    }
}
