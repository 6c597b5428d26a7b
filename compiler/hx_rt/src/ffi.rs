//! Native library binding.
//!
//! A generated `_FFI` load routine opens the library and resolves each bound
//! method's symbol. A missing symbol is reported and leaves that function
//! pointer unset; it never aborts the load.

use std::collections::HashMap;
use std::fmt;

/// Source of symbols, standing in for `dlsym` on an opened library.
pub trait SymbolSource {
    fn resolve(&self, symbol: &str) -> Option<usize>;
}

impl SymbolSource for HashMap<String, usize> {
    fn resolve(&self, symbol: &str) -> Option<usize> {
        self.get(symbol).copied()
    }
}

/// Outcome of a load routine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// One entry per requested symbol, in request order.
    pub addresses: Vec<Option<usize>>,
    pub missing: Vec<String>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.missing {
            writeln!(f, "Can't find symbol {symbol}")?;
        }
        Ok(())
    }
}

/// Resolve every symbol, recording the ones that are missing.
pub fn load_symbols<'a>(
    lib: &impl SymbolSource,
    symbols: impl IntoIterator<Item = &'a str>,
) -> LoadReport {
    let mut report = LoadReport::default();
    for symbol in symbols {
        let address = lib.resolve(symbol);
        if address.is_none() {
            report.missing.push(symbol.to_string());
        }
        report.addresses.push(address);
    }
    report
}
