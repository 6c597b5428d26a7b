//! Lazy static initialization.
//!
//! Every class owns a `SII` flag and an `SI()` routine. The flag is set
//! before the initializers run, so a re-entrant `SI()` (direct or through a
//! circular dependency) returns at once. Such a cycle terminates, but a
//! class reached through it may be observed before its initializers finish.
//!
//! While a statement is translated, each static field access, static call
//! and plain construction records a touch of the class involved. Before the
//! statement is written, one `Cls.SI();` line is emitted per touched class.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use hx_ir::{Name, Type};

use crate::context::CodeWriter;
use crate::runtime_api::{SI_FLAG, SI_ROUTINE};
use crate::Names;

/// Per-statement touch recorder.
#[derive(Debug)]
pub struct StaticInit {
    /// The class whose own statics need no guard (its `SI()` already ran).
    own: Option<Name>,
    pending: SmallVec<[Name; 4]>,
}

impl StaticInit {
    pub fn new(own: Option<Name>) -> Self {
        StaticInit {
            own,
            pending: SmallVec::new(),
        }
    }

    /// Record that the current statement touches `class`'s statics.
    pub fn touch(&mut self, class: Name) {
        if Some(class) == self.own || self.pending.contains(&class) {
            return;
        }
        self.pending.push(class);
    }

    /// Whether `class` is the class whose statics need no guard.
    pub fn owns(&self, class: Name) -> bool {
        self.own == Some(class)
    }

    /// Take the touches recorded since the last flush, in first-touch order.
    pub fn take(&mut self) -> SmallVec<[Name; 4]> {
        std::mem::take(&mut self.pending)
    }

    /// Emit one guard call per pending touch.
    pub fn flush(&mut self, w: &mut CodeWriter, names: &Names) {
        for class in self.take() {
            w.line(&guard_call(names, class));
        }
    }
}

/// `pkg.Cls.SI();`
pub fn guard_call(names: &Names, class: Name) -> String {
    format!("{}.{SI_ROUTINE}();", names.static_holder(class))
}

/// Emit the flag and the flag-first init routine.
///
/// `body` writes the initializers: literal assignments, constant fields and
/// the call to the static-initializer method.
pub fn emit_routine(w: &mut CodeWriter, body: impl FnOnce(&mut CodeWriter)) {
    w.line(&format!("static public var {SI_FLAG}:Bool = false;"));
    w.open(&format!("static public function {SI_ROUTINE}():Void"));
    w.line(&format!("if ({SI_FLAG}) return;"));
    w.line(&format!("{SI_FLAG} = true;"));
    body(w);
    w.close();
}

/// Classes referenced by one unit, in first-reference order.
///
/// Built while the unit is translated and handed to the link-order
/// collaborator with the unit.
#[derive(Default, Debug)]
pub struct ReferenceTable {
    seen: FxHashSet<Name>,
    order: Vec<Name>,
}

impl ReferenceTable {
    pub fn add(&mut self, class: Name) {
        if self.seen.insert(class) {
            self.order.push(class);
        }
    }

    pub fn add_type(&mut self, ty: &Type) {
        if let Some(class) = ty.referenced_class() {
            self.add(class);
        }
    }

    pub fn contains(&self, class: Name) -> bool {
        self.seen.contains(&class)
    }

    pub fn into_vec(self) -> Vec<Name> {
        self.order
    }
}
