//! The `gen` command: program model in, Haxe units out.

use std::path::{Path, PathBuf};

use hx_codegen::{generate_program, CodegenError, GenOptions, UnitEmitter};
use hx_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use hx_diagnostic::{Diagnostic, Location};

use crate::input::{load_program, InputError};
use crate::vfs::LocalVfs;

/// Arguments of `hxc gen`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenArgs {
    /// Output directory (`--out=<dir>`, default `out`).
    pub out_dir: PathBuf,
    pub options: GenOptions,
}

impl Default for GenArgs {
    fn default() -> Self {
        GenArgs {
            out_dir: PathBuf::from("out"),
            options: GenOptions::default(),
        }
    }
}

/// Parse the flags following `hxc gen <program.json>`.
pub fn parse_gen_options(args: &[String]) -> Result<GenArgs, String> {
    let mut parsed = GenArgs::default();
    for arg in args {
        if let Some(dir) = arg.strip_prefix("--out=") {
            parsed.out_dir = PathBuf::from(dir);
        } else if let Some(name) = arg.strip_prefix("--subtarget=") {
            parsed.options.subtarget = name.parse().map_err(|e| format!("{e}"))?;
        } else {
            match arg.as_str() {
                "--no-parallel" => parsed.options.parallel = false,
                "--no-source-maps" => parsed.options.emit_source_maps = false,
                "--no-reflection" => parsed.options.emit_reflection_info = false,
                "--goto" => parsed.options.native_goto = true,
                other => return Err(format!("unknown option `{other}`")),
            }
        }
    }
    Ok(parsed)
}

/// What a successful run produced.
#[derive(Debug)]
pub struct GenReport {
    pub files_written: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub errors: usize,
    pub warnings: usize,
}

/// Why a run produced nothing usable.
#[derive(Debug, thiserror::Error)]
pub enum GenFailure {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Write(#[from] CodegenError),
}

impl GenFailure {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            GenFailure::Input(e) => e.to_diagnostic(),
            GenFailure::Write(e) => e.to_diagnostic(Location::class("<output>")),
        }
    }
}

/// Generate every class of the model at `input` and write the units under
/// `args.out_dir`. Units with fatal errors are skipped; the rest are written.
pub fn generate_to_dir(input: &Path, args: &GenArgs) -> Result<GenReport, GenFailure> {
    let program = load_program(input)?;
    let output = generate_program(&program, &args.options);
    let mut vfs = LocalVfs::new(&args.out_dir);
    let files_written = UnitEmitter::new(&args.options).write(&output, &mut vfs)?;
    tracing::info!(
        files = files_written,
        out = %args.out_dir.display(),
        "generation finished"
    );
    Ok(GenReport {
        files_written,
        diagnostics: output.diagnostics().cloned().collect(),
        errors: output.error_count(),
        warnings: output.warning_count(),
    })
}

/// `hxc gen`: run [`generate_to_dir`], report diagnostics on stderr and
/// exit with status 1 if any error was reported.
pub fn gen_file(input: &str, args: &GenArgs) {
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    let mut emitter = TerminalEmitter::stderr(ColorMode::Auto, is_tty);

    match generate_to_dir(Path::new(input), args) {
        Ok(report) => {
            emitter.emit_all(&report.diagnostics);
            if report.errors > 0 || report.warnings > 0 {
                emitter.emit_summary(report.errors, report.warnings);
            }
            emitter.flush();
            if report.errors > 0 {
                std::process::exit(1);
            }
            println!(
                "wrote {} file(s) to {}",
                report.files_written,
                args.out_dir.display()
            );
        }
        Err(failure) => {
            emitter.emit(&failure.to_diagnostic());
            emitter.emit_summary(1, 0);
            emitter.flush();
            std::process::exit(1);
        }
    }
}
