/// Data model for the size-accounting tree.
///
/// Re-exports the input records, node variants, and supporting types.
pub mod node_id;
pub mod nodes;
pub mod records;
pub mod size;
pub mod summary;

pub use node_id::{NodeId, NodeIdAllocator};
pub use nodes::{
    ContainerChild, ContainerNode, DisasmNode, FileNode, NodeKind, NodeRef, PackageChild,
    PackageNode, ResultChild, ResultNode, SectionNode, SymbolNode, UnknownNode, Visit, Walk,
};
pub use records::AnalysisResult;
