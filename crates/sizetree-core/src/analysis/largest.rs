/// Top-N largest nodes of a built tree.
///
/// Used for "what is eating my binary" listings: typically restricted to
/// leaf kinds so a package and its own files are not both reported.
use crate::model::{NodeId, NodeKind, NodeRef};

/// A single entry in the "largest nodes" results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LargestNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: String,
    /// Names from the root down to and including this node, joined by `/`.
    pub path: String,
    pub size: u64,
}

/// The `n` largest nodes under `root` (inclusive) whose kind is in `kinds`,
/// sorted by size descending. An empty `kinds` slice accepts every kind.
///
/// Ties keep traversal order, so results are deterministic.
pub fn largest_nodes(root: NodeRef<'_>, n: usize, kinds: &[NodeKind]) -> Vec<LargestNode> {
    if n == 0 {
        return Vec::new();
    }

    // Names of the ancestors of the node currently being visited.
    let mut trail: Vec<&str> = Vec::new();
    let mut found: Vec<(usize, LargestNode)> = Vec::new();

    for (order, visit) in root.walk().enumerate() {
        trail.truncate(visit.depth);
        trail.push(visit.node.name());

        if kinds.is_empty() || kinds.contains(&visit.node.kind()) {
            found.push((
                order,
                LargestNode {
                    id: visit.node.id(),
                    kind: visit.node.kind(),
                    name: visit.node.name().to_string(),
                    path: trail.join("/"),
                    size: visit.node.size(),
                },
            ));
        }
    }

    let by_size_then_order =
        |a: &(usize, LargestNode), b: &(usize, LargestNode)| b.1.size.cmp(&a.1.size).then(a.0.cmp(&b.0));

    // Partial selection: O(n) average to bring the top-n to the front.
    if found.len() > n {
        found.select_nth_unstable_by(n - 1, by_size_then_order);
        found.truncate(n);
    }
    found.sort_unstable_by(by_size_then_order);
    found.into_iter().map(|(_, node)| node).collect()
}

/// Locate a node by id anywhere under `root`.
pub fn find_node(root: NodeRef<'_>, id: NodeId) -> Option<NodeRef<'_>> {
    root.walk().map(|visit| visit.node).find(|node| node.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::records::{AnalysisResult, File, Package};
    use crate::tree::build_tree;

    fn sample() -> AnalysisResult {
        let mut pkg = Package {
            name: "app".into(),
            kind: "main".into(),
            size: 600,
            ..Package::default()
        };
        for (path, size) in [("/app/a.go", 100), ("/app/b.go", 300), ("/app/c.go", 150)] {
            pkg.files.push(File {
                file_path: path.into(),
                size,
                pcln_size: 0,
            });
        }
        let mut result = AnalysisResult {
            name: "bin".into(),
            size: 600,
            ..AnalysisResult::default()
        };
        result.packages.insert("app".into(), pkg);
        result
    }

    #[test]
    fn top_files_sorted_descending() {
        let root = build_tree(&sample());
        let top = largest_nodes(root.as_node(), 2, &[NodeKind::File]);
        let names: Vec<&str> = top.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["b.go", "c.go"]);
        assert_eq!(top[0].path, "bin/Main Packages Size/app/b.go");
    }

    #[test]
    fn empty_kind_filter_includes_everything() {
        let root = build_tree(&sample());
        let all = largest_nodes(root.as_node(), usize::MAX, &[]);
        assert_eq!(all.len(), root.as_node().walk().count());
        assert_eq!(all[0].kind, NodeKind::Result);
    }

    #[test]
    fn zero_results_requested() {
        let root = build_tree(&sample());
        assert!(largest_nodes(root.as_node(), 0, &[]).is_empty());
    }

    #[test]
    fn find_node_by_id() {
        let root = build_tree(&sample());
        let disasm = largest_nodes(root.as_node(), 1, &[NodeKind::Disasm]);
        assert_eq!(disasm[0].size, 50);

        let found = find_node(root.as_node(), disasm[0].id).expect("node exists");
        assert_eq!(found.name(), "app Disasm");
        assert!(find_node(root.as_node(), NodeId(u64::MAX)).is_none());
    }
}
