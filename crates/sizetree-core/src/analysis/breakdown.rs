/// Size totals per node kind.
///
/// Only leaf nodes are counted: composites repeat the bytes of their
/// descendants, so summing them would double count.
use crate::model::{NodeKind, NodeRef};
use std::collections::HashMap;

/// Size and count totals for a single node kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindStats {
    pub kind: NodeKind,
    pub total_size: u64,
    pub node_count: u64,
}

/// Per-kind leaf totals under `root`, sorted by size descending (then by
/// kind so equal sizes come out in a fixed order).
pub fn kind_breakdown(root: NodeRef<'_>) -> Vec<KindStats> {
    let mut map: HashMap<NodeKind, KindStats> = HashMap::with_capacity(NodeKind::ALL.len());

    for visit in root.walk() {
        let node = visit.node;
        if !node.kind().is_leaf() {
            continue;
        }
        let entry = map.entry(node.kind()).or_insert_with(|| KindStats {
            kind: node.kind(),
            total_size: 0,
            node_count: 0,
        });
        entry.total_size = entry.total_size.saturating_add(node.size());
        entry.node_count += 1;
    }

    let mut results: Vec<KindStats> = map.into_values().collect();
    results.sort_by(|a, b| b.total_size.cmp(&a.total_size).then(a.kind.cmp(&b.kind)));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::records::{AnalysisResult, File, Package, Section, Symbol};
    use crate::tree::build_tree;

    #[test]
    fn leaf_totals_cover_the_whole_binary_when_balanced() {
        let mut pkg = Package {
            name: "p".into(),
            kind: "main".into(),
            size: 200,
            ..Package::default()
        };
        pkg.files.push(File {
            file_path: "/p/a.go".into(),
            size: 120,
            pcln_size: 0,
        });
        pkg.symbols.push(Symbol {
            name: "p.v".into(),
            size: 30,
            addr: 0x10,
            kind: "data".into(),
        });
        let mut result = AnalysisResult {
            name: "bin".into(),
            size: 1000,
            sections: vec![Section {
                name: ".text".into(),
                file_size: 100,
                known_size: 60,
                ..Section::default()
            }],
            ..AnalysisResult::default()
        };
        result.packages.insert("p".into(), pkg);

        let root = build_tree(&result);
        let stats = kind_breakdown(root.as_node());

        let kinds: Vec<NodeKind> = stats.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            [
                NodeKind::Unknown,
                NodeKind::File,
                NodeKind::Disasm,
                NodeKind::Section,
                NodeKind::Symbol
            ]
        );
        let total: u64 = stats.iter().map(|s| s.total_size).sum();
        assert_eq!(total, 1000);
    }

    #[test]
    fn same_kind_leaves_share_one_entry() {
        let section = |name: &str| Section {
            name: name.into(),
            file_size: 10,
            known_size: 0,
            ..Section::default()
        };
        let result = AnalysisResult {
            name: "bin".into(),
            size: 20,
            sections: vec![section(".text"), section(".data")],
            ..AnalysisResult::default()
        };

        let root = build_tree(&result);
        assert_eq!(
            kind_breakdown(root.as_node()),
            [KindStats {
                kind: NodeKind::Section,
                total_size: 20,
                node_count: 2,
            }]
        );
    }

    #[test]
    fn composites_are_not_counted() {
        let root = build_tree(&AnalysisResult::default());
        assert!(kind_breakdown(root.as_node()).is_empty());
    }
}
