/// Tree construction from analyzer records.
pub mod builder;
pub mod validate;

pub use builder::{build_tree, BuildOptions, BuiltTree, Overshoot, TreeBuilder};
pub use validate::{validate, ValidationIssue};
