/// Analysis modules: post-build queries over a finished tree.

pub mod breakdown;
pub mod largest;

pub use breakdown::{kind_breakdown, KindStats};
pub use largest::{find_node, largest_nodes, LargestNode};
