//! Per-unit string literal table.
//!
//! String literals are never inlined. The first occurrence of a literal gets
//! the next index and the identifier `__str<index>`; later occurrences reuse
//! it. The static-init routine assigns every entry once, in index order.

use rustc_hash::FxHashMap;

use hx_ir::Name;

use crate::runtime_api::STRING_POOL_PREFIX;

#[derive(Default, Debug)]
pub struct LiteralTable {
    index: FxHashMap<Name, u32>,
    entries: Vec<Name>,
}

impl LiteralTable {
    pub fn new() -> Self {
        LiteralTable::default()
    }

    /// Index of `literal`, assigning the next one on first occurrence.
    ///
    /// Interned names are equal iff their strings are, so this deduplicates
    /// by string content.
    pub fn intern(&mut self, literal: Name) -> u32 {
        if let Some(&idx) = self.index.get(&literal) {
            return idx;
        }
        let idx = u32::try_from(self.entries.len()).unwrap_or(u32::MAX);
        self.index.insert(literal, idx);
        self.entries.push(literal);
        idx
    }

    /// Identifier of `literal`, interning it if needed.
    pub fn ident(&mut self, literal: Name) -> String {
        ident_for(self.intern(literal))
    }

    /// `(index, identifier, literal)` in index order.
    pub fn entries(&self) -> impl Iterator<Item = (u32, String, Name)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, &name)| {
                let idx = u32::try_from(i).unwrap_or(u32::MAX);
                (idx, ident_for(idx), name)
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn ident_for(index: u32) -> String {
    format!("{STRING_POOL_PREFIX}{index}")
}
