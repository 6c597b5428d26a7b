//! Source Map v3 output.
//!
//! Each generated line is mapped, at column 0, to at most one original
//! `(source file, line)`. Segments use the standard four fields (generated
//! column, source index, source line, source column), each base64 VLQ
//! encoded relative to the previous segment.

use serde::Serialize;

/// Line mappings of one generated unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceMap {
    file: String,
    sources: Vec<String>,
    entries: Vec<Entry>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Entry {
    /// 0-based.
    generated: u32,
    source: u32,
    /// 1-based.
    line: u32,
}

#[derive(Serialize)]
struct Json<'a> {
    version: u8,
    file: &'a str,
    sources: &'a [String],
    names: &'a [String],
    mappings: String,
}

impl SourceMap {
    pub fn new(file: &str, sources: Vec<String>) -> Self {
        SourceMap {
            file: file.to_string(),
            sources,
            entries: Vec::new(),
        }
    }

    /// Map generated line `generated` (0-based) to line `line` (1-based) of
    /// `sources[source]`. Later records for an already mapped line are
    /// ignored.
    pub fn record(&mut self, generated: u32, source: u32, line: u32) {
        if self.entries.iter().any(|e| e.generated == generated) {
            return;
        }
        self.entries.push(Entry {
            generated,
            source,
            line,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `mappings` string.
    pub fn mappings(&self) -> String {
        let mut entries = self.entries.clone();
        entries.sort_by_key(|e| e.generated);

        let mut out = String::new();
        let mut prev_source = 0i64;
        let mut prev_line = 0i64;
        let mut current = 0u32;
        for e in entries {
            while current < e.generated {
                out.push(';');
                current += 1;
            }
            let source = i64::from(e.source);
            let line = i64::from(e.line.saturating_sub(1));
            encode_vlq(&mut out, 0);
            encode_vlq(&mut out, source - prev_source);
            encode_vlq(&mut out, line - prev_line);
            encode_vlq(&mut out, 0);
            prev_source = source;
            prev_line = line;
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&Json {
            version: 3,
            file: &self.file,
            sources: &self.sources,
            names: &[],
            mappings: self.mappings(),
        })
    }
}

const BASE64: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Sign in the low bit, then 5-bit groups, least significant first, with
/// bit 5 marking continuation.
fn encode_vlq(out: &mut String, value: i64) {
    let mut v = if value < 0 {
        ((-value) << 1) | 1
    } else {
        value << 1
    };
    loop {
        let mut digit = v & 0x1f;
        v >>= 5;
        if v > 0 {
            digit |= 0x20;
        }
        out.push(char::from(BASE64[usize::try_from(digit).unwrap_or(0)]));
        if v == 0 {
            break;
        }
    }
}
