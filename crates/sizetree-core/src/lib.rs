/// sizetree core: size-accounting tree for analysed binaries.
///
/// This crate contains all tree logic with zero CLI dependencies.
/// It is designed to be reusable across different frontends (CLI, TUI, web).
///
/// # Modules
///
/// - [`model`]: Input records, node variants, ids and formatting helpers.
/// - [`tree`]: Tree construction, size reconciliation and input validation.
/// - [`load`]: Decoding analyzer JSON from files or readers.
/// - [`analysis`]: Post-build queries (largest nodes, per-kind totals).
/// - [`export`]: JSON and CSV output for renderers.
pub mod analysis;
pub mod export;
pub mod load;
pub mod model;
pub mod tree;

pub use model::{AnalysisResult, NodeId, NodeIdAllocator, NodeKind, NodeRef, ResultNode};
pub use tree::{build_tree, BuildOptions, BuiltTree, TreeBuilder};
