//! Output layout and failure reporting.

use std::io;

use pretty_assertions::assert_eq;

use hx_codegen::{generate_program, CodegenError, GenOptions, UnitEmitter, Vfs};
use hx_diagnostic::ErrorCode;
use hx_ir::{BodyBuilder, ClassKind, Modifiers, StmtKind, Type};

use crate::common::{emit, plain, Model};

/// `app.Point` (with a source file and one line marker) and a class whose
/// superclass is missing.
fn program() -> Model {
    let mut m = Model::new();
    let mut point = m.class("app.Point", ClassKind::Class);
    point.source_file = Some(m.n("app/Point.java"));
    let mut b = BodyBuilder::new();
    let line = b.stmt(StmtKind::Line { line: 3 });
    let ret = b.stmt(StmtKind::Return(None));
    let mut run = m.method(1, "run", &[], Type::Void);
    run.modifiers |= Modifiers::STATIC;
    run.body = Some(b.finish([line, ret]));
    point.methods.push(run);
    m.add(point);
    m
}

#[test]
fn units_and_maps_land_under_the_prefix() {
    let m = program();
    let options = GenOptions {
        out_prefix: "gen/".to_string(),
        ..plain()
    };
    let (output, vfs) = emit(&m.program, &options);
    assert!(output.result().is_ok());

    let paths: Vec<&str> = vfs.paths().collect();
    assert_eq!(
        paths,
        vec![
            "gen/app/Point.hx",
            "gen/app/Point.hx.map",
            "gen/java_/lang/Object.hx",
            "gen/java_/lang/String_.hx",
        ]
    );
    let map = vfs.get("gen/app/Point.hx.map").unwrap();
    assert!(map.starts_with(r#"{"version":3,"file":"Point.hx","sources":["app/Point.java"]"#));
}

#[test]
fn source_maps_can_be_disabled() {
    let m = program();
    let options = GenOptions {
        emit_source_maps: false,
        ..plain()
    };
    let (_, vfs) = emit(&m.program, &options);
    assert!(vfs.get("app/Point.hx").is_some());
    assert!(vfs.paths().all(|p| !p.ends_with(".map")));
}

#[test]
fn fatal_class_errors_fail_the_run_but_not_other_units() {
    let mut m = program();
    let mut broken = m.class("app.Broken", ClassKind::Class);
    broken.superclass = Some(m.n("app.Missing"));
    m.add(broken);

    let (output, vfs) = emit(&m.program, &plain());
    assert!(output.result().is_err());
    assert_eq!(output.error_count(), 1);
    let diagnostic = output.diagnostics().next().unwrap();
    assert_eq!(diagnostic.code, ErrorCode::E1001);
    assert!(vfs.get("app/Broken.hx").is_none());
    assert!(vfs.get("app/Point.hx").is_some());
}

#[test]
fn parallel_and_sequential_generation_agree() {
    let m = program();
    let sequential = GenOptions {
        parallel: false,
        ..GenOptions::default()
    };
    let a = generate_program(&m.program, &GenOptions::default());
    let b = generate_program(&m.program, &sequential);
    let texts = |o: &hx_codegen::ProgramOutput| {
        o.units()
            .map(|u| (u.path.clone(), u.text.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(texts(&a), texts(&b));
}

/// Accepts `limit` writes, then fails.
struct FullDisk {
    limit: usize,
    written: usize,
}

impl Vfs for FullDisk {
    fn write(&mut self, _path: &str, _text: &str) -> io::Result<()> {
        if self.written == self.limit {
            return Err(io::Error::other("disk full"));
        }
        self.written += 1;
        Ok(())
    }
}

#[test]
fn emitting_stops_at_the_first_failed_write() {
    let m = program();
    let output = generate_program(&m.program, &plain());
    // Object, String and Point units go through; Point's map does not.
    let mut disk = FullDisk {
        limit: 3,
        written: 0,
    };
    let err = UnitEmitter::new(&plain())
        .write(&output, &mut disk)
        .unwrap_err();
    assert!(matches!(err, CodegenError::Vfs { ref path, .. } if path == "app/Point.hx.map"));
    assert_eq!(disk.written, 3);
}
