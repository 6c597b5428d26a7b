//! Whole-program generation and unit output.

use rayon::prelude::*;

use hx_diagnostic::{Diagnostic, ErrorGuaranteed};
use hx_ir::{ClassId, Program};

use crate::class_gen::{generate_class, ClassOutput, Unit};
use crate::error::CodegenError;
use crate::vfs::Vfs;
use crate::{GenOptions, Names};

/// Output of every class in the program, in program order.
#[derive(Debug)]
pub struct ProgramOutput {
    pub classes: Vec<ClassOutput>,
}

impl ProgramOutput {
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.classes.iter().filter_map(|c| c.unit.as_ref())
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.classes.iter().flat_map(|c| &c.diagnostics)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics().filter(|d| d.is_warning()).count()
    }

    /// `Err` iff some class failed fatally. Recovered method failures are
    /// warnings and do not fail the run.
    pub fn result(&self) -> Result<(), ErrorGuaranteed> {
        match ErrorGuaranteed::from_error_count(self.error_count()) {
            Some(guar) => Err(guar),
            None => Ok(()),
        }
    }
}

/// Generate every class of `program`.
///
/// The naming table is built once up front and only read afterwards, so
/// classes can be generated on the rayon pool; the output order does not
/// depend on it.
pub fn generate_program(program: &Program, options: &GenOptions) -> ProgramOutput {
    let names = Names::build(program);
    let ids: Vec<ClassId> = program.iter().map(|(id, _)| id).collect();
    tracing::debug!(classes = ids.len(), parallel = options.parallel, "generating program");

    let classes: Vec<ClassOutput> = if options.parallel {
        ids.par_iter()
            .map(|&id| generate_class(program, &names, options, id))
            .collect()
    } else {
        ids.iter()
            .map(|&id| generate_class(program, &names, options, id))
            .collect()
    };

    let output = ProgramOutput { classes };
    tracing::debug!(
        units = output.units().count(),
        errors = output.error_count(),
        warnings = output.warning_count(),
        "program generated"
    );
    output
}

/// Writes generated units (and their source maps) through a [`Vfs`].
#[derive(Clone, Debug)]
pub struct UnitEmitter {
    prefix: String,
}

impl UnitEmitter {
    pub fn new(options: &GenOptions) -> Self {
        UnitEmitter {
            prefix: options.out_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Write every unit, then its `.map` next to it. Returns the number of
    /// files written; stops at the first failed write.
    pub fn write(&self, output: &ProgramOutput, vfs: &mut dyn Vfs) -> Result<usize, CodegenError> {
        let mut written = 0;
        for unit in output.units() {
            let path = self.path(&unit.path);
            self.put(vfs, &path, &unit.text)?;
            written += 1;

            let Some(map) = unit.source_map.as_ref().filter(|m| !m.is_empty()) else {
                continue;
            };
            let map_path = format!("{path}.map");
            let json = map.to_json().map_err(|e| CodegenError::Vfs {
                path: map_path.clone(),
                message: e.to_string(),
            })?;
            self.put(vfs, &map_path, &json)?;
            written += 1;
        }
        tracing::debug!(files = written, "units written");
        Ok(written)
    }

    fn path(&self, relative: &str) -> String {
        if self.prefix.is_empty() {
            relative.to_string()
        } else {
            format!("{}/{relative}", self.prefix)
        }
    }

    fn put(&self, vfs: &mut dyn Vfs, path: &str, text: &str) -> Result<(), CodegenError> {
        tracing::trace!(path, bytes = text.len(), "write");
        vfs.write(path, text).map_err(|e| CodegenError::Vfs {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}
