/// Tree construction and size reconciliation.
///
/// The builder walks the input records depth-first, once. Every composite
/// (package or result) compares its declared size with the sum of the
/// children it derived:
///
/// - a positive gap becomes one synthetic child appended last
///   (`Disasm` for packages, `Unknown` for the result);
/// - a zero gap adds nothing;
/// - a negative gap (children exceed the declared size) adds nothing and is
///   reported as an [`Overshoot`].
use crate::model::records::{AnalysisResult, Package};
use crate::model::size::{title_case, trim_parent_prefix};
use crate::model::{
    ContainerChild, ContainerNode, DisasmNode, FileNode, NodeId, NodeIdAllocator, NodeKind,
    PackageChild, PackageNode, ResultChild, ResultNode, SectionNode, SymbolNode, UnknownNode,
};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Name of the container holding all section remainders.
pub const SECTIONS_CONTAINER_NAME: &str = "Unknown Sections Size";

/// Tunables for a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Log every overshoot at `warn` level. Overshoots are recorded in
    /// [`BuiltTree::overshoots`] either way.
    pub warn_on_overshoot: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            warn_on_overshoot: true,
        }
    }
}

impl BuildOptions {
    pub fn warn_on_overshoot(mut self, enabled: bool) -> Self {
        self.warn_on_overshoot = enabled;
        self
    }
}

/// A composite whose children add up to more than its declared size.
///
/// The tree still shows the declared size on the parent; this record makes
/// the discrepancy visible to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overshoot {
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: CompactString,
    pub declared: u64,
    pub accounted: u64,
}

impl Overshoot {
    /// Bytes by which the children exceed the declared size.
    pub fn excess(&self) -> u64 {
        self.accounted.saturating_sub(self.declared)
    }
}

/// Output of [`TreeBuilder::build`].
#[derive(Debug, Clone)]
pub struct BuiltTree {
    pub root: ResultNode,
    pub overshoots: Vec<Overshoot>,
}

/// Builds a [`ResultNode`] tree, drawing node ids from an injected allocator.
pub struct TreeBuilder<'a> {
    ids: &'a NodeIdAllocator,
    options: BuildOptions,
    overshoots: Vec<Overshoot>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(ids: &'a NodeIdAllocator) -> Self {
        Self {
            ids,
            options: BuildOptions::default(),
            overshoots: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the whole tree for `result`.
    pub fn build(mut self, result: &AnalysisResult) -> BuiltTree {
        let root = self.build_result(result);
        debug!(
            binary = %root.name(),
            size = root.size(),
            overshoots = self.overshoots.len(),
            "size tree built"
        );
        BuiltTree {
            root,
            overshoots: self.overshoots,
        }
    }

    fn build_result(&mut self, data: &AnalysisResult) -> ResultNode {
        let id = self.ids.next_id();
        let mut children: Vec<ResultChild> = Vec::new();

        // 1. Section remainders, grouped under one container.
        let sections: Vec<ContainerChild> = data
            .sections
            .iter()
            .map(|s| ContainerChild::Section(SectionNode::new(self.ids, s.clone())))
            .collect();
        let sections_size = sum_sizes(sections.iter().map(|c| c.as_node().size()));
        children.push(ResultChild::Container(ContainerNode::new(
            self.ids,
            SECTIONS_CONTAINER_NAME,
            sections_size,
            sections,
            "The unknown size of the sections in the binary.",
        )));

        // 2. One container per package type, in first-seen type order.
        for (kind, packages) in group_by_type(data.packages.values()) {
            let nodes: Vec<ContainerChild> = packages
                .into_iter()
                .map(|pkg| ContainerChild::Package(self.build_package(pkg, None)))
                .collect();
            let size = sum_sizes(nodes.iter().map(|c| c.as_node().size()));
            debug!(package_type = %kind, packages = nodes.len(), size, "package group built");
            children.push(ResultChild::Container(ContainerNode::new(
                self.ids,
                format!("{} Packages Size", title_case(kind)),
                size,
                nodes,
                format!("The size of the {kind} packages in the binary."),
            )));
        }

        // 3. Whatever the binary holds beyond sections and packages.
        let accounted = sum_sizes(children.iter().map(|c| c.as_node().size()));
        match data.size.checked_sub(accounted) {
            Some(0) => {}
            Some(leftover) => {
                children.push(ResultChild::Unknown(UnknownNode::new(self.ids, leftover)));
            }
            None => self.record_overshoot(id, NodeKind::Result, &data.name, data.size, accounted),
        }

        ResultNode {
            id,
            name: data.name.clone(),
            size: data.size,
            children,
        }
    }

    fn build_package(&mut self, data: &Package, parent: Option<&str>) -> PackageNode {
        let id = self.ids.next_id();
        let mut children: Vec<PackageChild> = Vec::with_capacity(
            data.files.len() + data.sub_packages.len() + data.symbols.len() + 1,
        );

        for file in &data.files {
            children.push(PackageChild::File(FileNode::new(self.ids, file.clone())));
        }
        for sub in data.sub_packages.values() {
            let node = self.build_package(sub, Some(data.name.as_str()));
            children.push(PackageChild::Package(node));
        }
        for symbol in &data.symbols {
            children.push(PackageChild::Symbol(SymbolNode::new(self.ids, symbol.clone())));
        }

        let accounted = sum_sizes(children.iter().map(|c| c.as_node().size()));
        match data.size.checked_sub(accounted) {
            Some(0) => {}
            Some(leftover) => {
                let name = format!("{} Disasm", data.name);
                children.push(PackageChild::Disasm(DisasmNode::new(self.ids, name, leftover)));
            }
            None => self.record_overshoot(id, NodeKind::Package, &data.name, data.size, accounted),
        }

        let display_name = match parent {
            Some(parent) => CompactString::from(trim_parent_prefix(&data.name, parent)),
            None => data.name.clone(),
        };

        PackageNode {
            id,
            full_name: data.name.clone(),
            display_name,
            kind: data.kind.clone(),
            size: data.size,
            children,
        }
    }

    fn record_overshoot(
        &mut self,
        id: NodeId,
        kind: NodeKind,
        name: &str,
        declared: u64,
        accounted: u64,
    ) {
        if self.options.warn_on_overshoot {
            warn!(
                %kind,
                node = name,
                declared,
                accounted,
                "children exceed declared size; no leftover node added"
            );
        }
        self.overshoots.push(Overshoot {
            id,
            kind,
            name: name.into(),
            declared,
            accounted,
        });
    }
}

/// Build a tree with a fresh allocator and default options.
pub fn build_tree(result: &AnalysisResult) -> ResultNode {
    let ids = NodeIdAllocator::new();
    TreeBuilder::new(&ids).build(result).root
}

fn sum_sizes(sizes: impl Iterator<Item = u64>) -> u64 {
    sizes.fold(0u64, u64::saturating_add)
}

/// Partition packages by type, keeping the order in which each type is
/// first seen and the input order within a type.
fn group_by_type<'p>(
    packages: impl Iterator<Item = &'p Package>,
) -> Vec<(&'p str, Vec<&'p Package>)> {
    let mut groups: Vec<(&'p str, Vec<&'p Package>)> = Vec::new();
    for pkg in packages {
        match groups.iter_mut().find(|(kind, _)| *kind == pkg.kind.as_str()) {
            Some((_, members)) => members.push(pkg),
            None => groups.push((pkg.kind.as_str(), vec![pkg])),
        }
    }
    groups
}
