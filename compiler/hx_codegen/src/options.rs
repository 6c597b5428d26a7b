//! Generation options.

use std::fmt;
use std::str::FromStr;

/// The Haxe compilation target the generated units are built for.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Subtarget {
    #[default]
    Cpp,
    Windows,
    Linux,
    Mac,
    Android,
    Js,
    Neko,
    Php,
    Python,
    Cs,
    Java,
    Hl,
    Lua,
}

impl Subtarget {
    pub const ALL: &'static [Subtarget] = &[
        Subtarget::Cpp,
        Subtarget::Windows,
        Subtarget::Linux,
        Subtarget::Mac,
        Subtarget::Android,
        Subtarget::Js,
        Subtarget::Neko,
        Subtarget::Php,
        Subtarget::Python,
        Subtarget::Cs,
        Subtarget::Java,
        Subtarget::Hl,
        Subtarget::Lua,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Subtarget::Cpp => "cpp",
            Subtarget::Windows => "windows",
            Subtarget::Linux => "linux",
            Subtarget::Mac => "mac",
            Subtarget::Android => "android",
            Subtarget::Js => "js",
            Subtarget::Neko => "neko",
            Subtarget::Php => "php",
            Subtarget::Python => "python",
            Subtarget::Cs => "cs",
            Subtarget::Java => "java",
            Subtarget::Hl => "hl",
            Subtarget::Lua => "lua",
        }
    }

    /// Subtargets compiled through hxcpp, where `untyped __cpp__` can emit
    /// labels and `goto`.
    pub const fn is_cpp_family(self) -> bool {
        matches!(
            self,
            Subtarget::Cpp
                | Subtarget::Windows
                | Subtarget::Linux
                | Subtarget::Mac
                | Subtarget::Android
        )
    }
}

impl fmt::Display for Subtarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownSubtarget(pub String);

impl fmt::Display for UnknownSubtarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown subtarget `{}`", self.0)
    }
}

impl std::error::Error for UnknownSubtarget {}

impl FromStr for Subtarget {
    type Err = UnknownSubtarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Subtarget::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| UnknownSubtarget(s.to_string()))
    }
}

/// Options for one generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenOptions {
    pub subtarget: Subtarget,
    /// Allow label/goto bodies on subtargets that can express them.
    pub native_goto: bool,
    /// Generate classes on the rayon pool.
    pub parallel: bool,
    pub emit_source_maps: bool,
    /// Emit the `__classInfo__` reflection registration routine.
    pub emit_reflection_info: bool,
    /// Directory prefix for every written unit, without trailing slash.
    pub out_prefix: String,
}

impl GenOptions {
    /// Whether label/goto forms may be emitted verbatim.
    pub fn supports_goto(&self) -> bool {
        self.native_goto && self.subtarget.is_cpp_family()
    }
}

impl Default for GenOptions {
    fn default() -> Self {
        GenOptions {
            subtarget: Subtarget::default(),
            native_goto: false,
            parallel: true,
            emit_source_maps: true,
            emit_reflection_info: true,
            out_prefix: String::new(),
        }
    }
}
