//! Annotation literals and reflective proxy dispatch, checked against the
//! runtime support crate.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use hx_codegen::GenOptions;
use hx_ir::{Annotation, AnnotationValue, ClassKind, ClassMarkers, Type};
use hx_rt::proxy::{ClassDescriptor, MethodInfo, ReflectiveProxy};
use hx_rt::{RtError, Value};

use crate::common::{emit, unit, Hx, Machine, Model};

/// `@interface Marker { String name(); int priority(); }` and
/// `@Marker(name = "x", priority = 5) class Tagged {}`.
fn tagged() -> Model {
    let mut m = Model::new();
    let mut marker = m.class("app.Marker", ClassKind::Interface);
    marker.markers |= ClassMarkers::ANNOTATION_TYPE;
    marker.methods.push(m.method(1, "name", &[], m.string()));
    marker.methods.push(m.method(2, "priority", &[], Type::INT));
    m.add(marker);

    let mut class = m.class("app.Tagged", ClassKind::Class);
    class.annotations.push(
        Annotation::new(m.n("app.Marker"))
            .with(m.n("priority"), AnnotationValue::Int(5))
            .with(m.n("name"), AnnotationValue::String(m.n("x"))),
    );
    m.add(class);
    m
}

/// The `new ...(...)` expression starting at `prefix` in `text`.
fn constructor_call<'t>(text: &'t str, prefix: &str) -> &'t str {
    let start = text
        .find(prefix)
        .unwrap_or_else(|| panic!("no `{prefix}` in:\n{text}"));
    let mut depth = 0usize;
    for (i, c) in text[start..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 1 => return &text[start..=start + i],
            ')' => depth -= 1,
            _ => {}
        }
    }
    panic!("unterminated `{prefix}`")
}

#[test]
fn annotation_literals_read_back_in_declaration_order() {
    let m = tagged();
    let (output, vfs) = emit(&m.program, &GenOptions::default());
    assert_eq!(output.error_count(), 0);

    let literal = constructor_call(unit(&vfs, "app/Tagged.hx"), "new app.Marker.Marker_Impl(");
    assert_eq!(literal, "new app.Marker.Marker_Impl([N.str(\"x\"), 5])");

    let mut machine = Machine::load(&vfs);
    let instance = machine.eval_with("app.Tagged", &[], literal).unwrap();
    let Hx::Annotation(proxy) = &instance else {
        panic!("not an annotation: {instance:?}");
    };
    assert_eq!(proxy.annotation_type(), "app.Marker");

    assert_eq!(
        machine.call_on(
            instance.clone(),
            "app.Marker.Marker_Impl",
            "name__Ljava_Slang_SString_E",
            vec![]
        ),
        Ok(Hx::str("x"))
    );
    assert_eq!(
        machine.call_on(instance, "app.Marker.Marker_Impl", "priority__I", vec![]),
        Ok(Hx::Int(5))
    );
}

/// `interface Shape { int area(int scale); String label(); }`
fn shape() -> Model {
    let mut m = Model::new();
    let mut shape = m.class("app.Shape", ClassKind::Interface);
    shape
        .methods
        .push(m.method(11, "area", &[("scale", Type::INT)], Type::INT));
    shape.methods.push(m.method(12, "label", &[], m.string()));
    m.add(shape);
    m
}

/// `(id, name, descriptor)` of every `R.m(...)` registration in `text`.
fn registered_methods(text: &str) -> Vec<(i32, String, String)> {
    text.lines()
        .filter_map(|l| l.trim().strip_prefix("R.m(c, "))
        .map(|args| {
            let parts: Vec<&str> = args.split(", ").collect();
            (
                parts[0].parse().unwrap(),
                parts[3].trim_matches('"').to_string(),
                parts[5].trim_matches('"').to_string(),
            )
        })
        .collect()
}

#[test]
fn proxy_calls_reach_the_handler_with_registered_ids() {
    let m = shape();
    let (_, vfs) = emit(&m.program, &GenOptions::default());
    let text = unit(&vfs, "app/Shape.hx");

    let registered = registered_methods(text);
    assert_eq!(
        registered,
        vec![
            (11, "area".to_string(), "(I)I".to_string()),
            (12, "label".to_string(), "()Ljava/lang/String;".to_string()),
        ]
    );

    let mut descriptor = ClassDescriptor::new("app.Shape");
    for (id, name, desc) in &registered {
        descriptor.register_method(*id, name, desc);
    }
    let calls: Rc<RefCell<Vec<(String, Vec<Value>)>>> = Rc::default();
    let log = Rc::clone(&calls);
    let handler = move |method: &MethodInfo, args: &[Value]| -> Result<Value, RtError> {
        log.borrow_mut().push((method.name.clone(), args.to_vec()));
        Ok(match method.name.as_str() {
            "area" => Value::Int(42),
            _ => Value::str("square"),
        })
    };
    let proxy = Rc::new(ReflectiveProxy::new(descriptor, handler));

    let mut machine = Machine::load(&vfs);
    machine.bind_host(
        "app.Shape.Shape_Proxy",
        "__invoke",
        Rc::new(move |args: &[Hx]| {
            let values = match &args[1] {
                Hx::Array(items) => items.iter().map(Hx::to_value).collect(),
                other => panic!("arguments are not an array: {other:?}"),
            };
            proxy
                .invoke(args[0].int(), values)
                .map(|v| Hx::from_value(&v))
                .map_err(|e| Hx::str(&e.to_string()))
        }),
    );

    assert_eq!(
        machine.call_on(Hx::Null, "app.Shape.Shape_Proxy", "area_I_I", vec![Hx::Int(7)]),
        Ok(Hx::Int(42))
    );
    assert_eq!(
        machine.call_on(
            Hx::Null,
            "app.Shape.Shape_Proxy",
            "label__Ljava_Slang_SString_E",
            vec![]
        ),
        Ok(Hx::str("square"))
    );
    assert_eq!(
        *calls.borrow(),
        vec![
            ("area".to_string(), vec![Value::Int(7)]),
            ("label".to_string(), vec![]),
        ]
    );
}
