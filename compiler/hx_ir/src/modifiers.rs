//! Access modifiers and class markers.

use bitflags::bitflags;

bitflags! {
    /// Access and property flags, bit-compatible with the class-file format
    /// so they can be registered with the runtime reflection tables verbatim.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Modifiers: u32 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SYNCHRONIZED = 0x0020;
        const VOLATILE = 0x0040;
        const TRANSIENT = 0x0080;
        const NATIVE = 0x0100;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM = 0x4000;
    }
}

impl Modifiers {
    pub fn is_static(self) -> bool {
        self.contains(Modifiers::STATIC)
    }

    pub fn is_private(self) -> bool {
        self.contains(Modifiers::PRIVATE)
    }

    pub fn is_abstract(self) -> bool {
        self.contains(Modifiers::ABSTRACT)
    }

    pub fn is_native(self) -> bool {
        self.contains(Modifiers::NATIVE)
    }
}

bitflags! {
    /// Per-class markers set by the front end that select synthesis recipes.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ClassMarkers: u8 {
        /// Members are bound to a dynamic native library (FFI binding).
        const NATIVE_BOUND = 1 << 0;
        /// The class has a static-initializer method body.
        const HAS_STATIC_INIT = 1 << 1;
        /// Interface the front end considers a functional interface.
        const FUNCTIONAL_INTERFACE = 1 << 2;
        /// Interface declared as an annotation type.
        const ANNOTATION_TYPE = 1 << 3;
    }
}
