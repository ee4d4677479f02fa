/// Input records produced by the binary analyzer.
///
/// These mirror the analyzer's JSON output field-for-field and are never
/// mutated by the tree builder. Name-keyed package collections are stored in
/// `BTreeMap`s so iteration is lexicographic by key and tree output is
/// reproducible across runs.
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A contiguous region of the binary's layout (e.g. `.text`, `.rodata`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: CompactString,
    /// Size the section occupies in the file.
    pub file_size: u64,
    /// Bytes of this section already attributed to some package or symbol.
    pub known_size: u64,
    /// File offset range.
    pub offset: u64,
    pub end: u64,
    /// Virtual address range.
    pub addr: u64,
    pub addr_end: u64,
    /// `true` for sections that exist only at runtime (e.g. `.bss`).
    pub only_in_memory: bool,
    pub debug: bool,
}

/// A source file that contributed code or data to a package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub file_path: CompactString,
    pub size: u64,
    /// Bytes of the pc-line table attributed to this file.
    #[serde(default)]
    pub pcln_size: u64,
}

/// A named, sized unit of code or data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: CompactString,
    pub size: u64,
    pub addr: u64,
    #[serde(rename = "type")]
    pub kind: CompactString,
}

/// A unit of compiled code: files, nested packages and loose symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Fully-qualified package name (e.g. `golang.org/x/net/http2`).
    pub name: CompactString,
    /// Classification such as `std`, `main`, `vendor`, `generated`.
    #[serde(rename = "type")]
    pub kind: CompactString,
    pub size: u64,
    #[serde(default)]
    pub files: Vec<File>,
    #[serde(default, rename = "subPackages")]
    pub sub_packages: BTreeMap<CompactString, Package>,
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

/// The root record: the whole analysed binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub name: CompactString,
    pub size: u64,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub packages: BTreeMap<CompactString, Package>,
}
