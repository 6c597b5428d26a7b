//! Index types into a method [`Body`](super::Body).

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

define_id!(
    /// Index into a body's expression arena.
    ExprId
);
define_id!(
    /// Index into a body's statement arena.
    StmtId
);
define_id!(
    /// Index into a body's local-variable table.
    LocalId
);
define_id!(
    /// A jump target, scoped to one method body.
    LabelId
);

/// Contiguous run of ids in one of the body's flattened lists.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct IdRange {
    pub start: u32,
    pub len: u32,
}

impl IdRange {
    pub const EMPTY: IdRange = IdRange { start: 0, len: 0 };

    #[inline]
    pub const fn new(start: u32, len: u32) -> Self {
        IdRange { start, len }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    pub(crate) fn as_usize_range(self) -> std::ops::Range<usize> {
        let start = self.start as usize;
        start..start + self.len as usize
    }
}

impl fmt::Debug for IdRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdRange({}..{})", self.start, self.start + self.len)
    }
}

/// Range into the flattened expression list (call arguments, array counts).
pub type ExprRange = IdRange;
/// Range into the flattened statement list (blocks, method roots).
pub type StmtRange = IdRange;
