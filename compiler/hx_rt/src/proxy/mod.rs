//! Reflective invocation proxies.
//!
//! A generated `<Iface>_Proxy` class implements every method of the interface
//! as:
//!
//! ```text
//! public function run_I_I(p0:Int):Int {
//!     return HxNatives.unboxInt(this.__invoke(17, [HxNatives.boxInt(p0)]));
//! }
//! ```
//!
//! `__invoke` looks the numeric method id up in the class descriptor and
//! forwards to the handler's single entry point.

use crate::{RtError, Value};

/// Reflective view of one method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodInfo {
    pub id: i32,
    pub name: String,
    pub descriptor: String,
}

/// Reflective view of a class: its name and methods, keyed by stable id.
#[derive(Clone, Debug, Default)]
pub struct ClassDescriptor {
    pub name: String,
    methods: Vec<MethodInfo>,
}

impl ClassDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        ClassDescriptor {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    /// `R.m(...)` registration from the generated `__classInfo__`.
    pub fn register_method(&mut self, id: i32, name: &str, descriptor: &str) {
        self.methods.push(MethodInfo {
            id,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
        });
    }

    pub fn locate_method_by_id(&self, id: i32) -> Result<&MethodInfo, RtError> {
        self.methods
            .iter()
            .find(|m| m.id == id)
            .ok_or(RtError::NoSuchMethod(id))
    }

    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }
}

/// The handler side of a reflective proxy.
pub trait InvocationHandler {
    fn invoke(&self, method: &MethodInfo, args: &[Value]) -> Result<Value, RtError>;
}

impl<F> InvocationHandler for F
where
    F: Fn(&MethodInfo, &[Value]) -> Result<Value, RtError>,
{
    fn invoke(&self, method: &MethodInfo, args: &[Value]) -> Result<Value, RtError> {
        self(method, args)
    }
}

/// Runtime counterpart of a generated `_Proxy` class.
pub struct ReflectiveProxy<H> {
    descriptor: ClassDescriptor,
    handler: H,
}

impl<H: InvocationHandler> ReflectiveProxy<H> {
    pub fn new(descriptor: ClassDescriptor, handler: H) -> Self {
        ReflectiveProxy {
            descriptor,
            handler,
        }
    }

    /// The shared body of every proxied method.
    pub fn invoke(&self, method_id: i32, args: Vec<Value>) -> Result<Value, RtError> {
        let method = self.descriptor.locate_method_by_id(method_id)?;
        self.handler.invoke(method, &args)
    }

    pub fn descriptor(&self) -> &ClassDescriptor {
        &self.descriptor
    }
}
