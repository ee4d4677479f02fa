/// Node variants of the size-accounting tree.
///
/// Each variant is its own struct. Composite variants hold a closed child
/// enum (`PackageChild`, `ContainerChild`, `ResultChild`) so the set of
/// variants a parent may contain is fixed by the type system rather than
/// checked at runtime. [`NodeRef`] is a borrowed, uniform view over any
/// variant for renderers that walk the tree without caring about types.
///
/// Nodes are immutable once built; every node owns its children outright.
use super::node_id::{NodeId, NodeIdAllocator};
use super::records::{File, Section, Symbol};
use super::size::{base_name, format_addr, format_range, format_size};
use super::summary::Aligner;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag of a node. The lowercase strings are consumed by renderers and
/// must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Section,
    File,
    Package,
    Result,
    Symbol,
    Disasm,
    Unknown,
    Container,
}

impl NodeKind {
    pub const ALL: [NodeKind; 8] = [
        Self::Section,
        Self::File,
        Self::Package,
        Self::Result,
        Self::Symbol,
        Self::Disasm,
        Self::Unknown,
        Self::Container,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Section => "section",
            Self::File => "file",
            Self::Package => "package",
            Self::Result => "result",
            Self::Symbol => "symbol",
            Self::Disasm => "disasm",
            Self::Unknown => "unknown",
            Self::Container => "container",
        }
    }

    /// `true` for variants that can never have children.
    pub fn is_leaf(self) -> bool {
        !matches!(self, Self::Package | Self::Result | Self::Container)
    }

    /// Synthetic variants that exist only to plug a size gap.
    pub fn is_leftover(self) -> bool {
        matches!(self, Self::Disasm | Self::Unknown)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Leaf variants ────────────────────────────────────────────────────────────

/// The unattributed remainder of one binary section.
#[derive(Debug, Clone)]
pub struct SectionNode {
    id: NodeId,
    data: Section,
}

impl SectionNode {
    pub fn new(ids: &NodeIdAllocator, data: Section) -> Self {
        Self {
            id: ids.next_id(),
            data,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// `file_size - known_size`. Saturates at zero if the analyzer reports
    /// more known bytes than the section holds.
    pub fn size(&self) -> u64 {
        self.data.file_size.saturating_sub(self.data.known_size)
    }

    pub fn record(&self) -> &Section {
        &self.data
    }

    pub fn summary(&self) -> String {
        let d = &self.data;
        let mut align = Aligner::new();
        align
            .add("Section:", d.name.as_str())
            .add("Size:", format_size(self.size()))
            .add("File Size:", format_size(d.file_size))
            .add("Known size:", format_size(d.known_size))
            .add("Unknown size:", format_size(self.size()))
            .add("Offset:", format_range(d.offset, d.end))
            .add("Address:", format_range(d.addr, d.addr_end))
            .add("Memory:", d.only_in_memory.to_string())
            .add("Debug:", d.debug.to_string());
        align.to_string()
    }
}

/// A source file of a package.
#[derive(Debug, Clone)]
pub struct FileNode {
    id: NodeId,
    data: File,
}

impl FileNode {
    pub fn new(ids: &NodeIdAllocator, data: File) -> Self {
        Self {
            id: ids.next_id(),
            data,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// File name only; the full path is in [`record`](Self::record).
    pub fn name(&self) -> &str {
        base_name(&self.data.file_path)
    }

    pub fn size(&self) -> u64 {
        self.data.size
    }

    pub fn record(&self) -> &File {
        &self.data
    }

    pub fn summary(&self) -> String {
        let mut align = Aligner::new();
        align
            .add("File:", self.data.file_path.as_str())
            .add("Path:", self.data.file_path.as_str())
            .add("Size:", format_size(self.data.size));
        if self.data.pcln_size > 0 {
            align.add("Pcln Size:", format_size(self.data.pcln_size));
        }
        align.to_string()
    }
}

/// A symbol attributed directly to a package.
#[derive(Debug, Clone)]
pub struct SymbolNode {
    id: NodeId,
    data: Symbol,
}

impl SymbolNode {
    pub fn new(ids: &NodeIdAllocator, data: Symbol) -> Self {
        Self {
            id: ids.next_id(),
            data,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn size(&self) -> u64 {
        self.data.size
    }

    pub fn record(&self) -> &Symbol {
        &self.data
    }

    pub fn summary(&self) -> String {
        let mut align = Aligner::new();
        align
            .add("Symbol:", self.data.name.as_str())
            .add("Size:", format_size(self.data.size))
            .add("Address:", format_addr(self.data.addr))
            .add("Type:", self.data.kind.as_str());
        align.to_string()
    }
}

/// Package bytes that no file or symbol accounts for.
///
/// The size is a structural lower bound, not the result of disassembly.
#[derive(Debug, Clone)]
pub struct DisasmNode {
    id: NodeId,
    name: CompactString,
    size: u64,
}

impl DisasmNode {
    pub fn new(ids: &NodeIdAllocator, name: impl Into<CompactString>, size: u64) -> Self {
        Self {
            id: ids.next_id(),
            name: name.into(),
            size,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn summary(&self) -> String {
        let mut align = Aligner::new();
        align
            .add("Disasm:", self.name.as_str())
            .add("Size:", format_size(self.size));
        format!(
            "{align}\n\n\
             This size was not accurate. \
             The real size determined by disassembling can be larger."
        )
    }
}

/// Bytes of the binary that belong to no section remainder or package.
#[derive(Debug, Clone)]
pub struct UnknownNode {
    id: NodeId,
    size: u64,
}

impl UnknownNode {
    pub const NAME: &'static str = "Unknown";

    pub fn new(ids: &NodeIdAllocator, size: u64) -> Self {
        Self {
            id: ids.next_id(),
            size,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        Self::NAME
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn summary(&self) -> String {
        let mut align = Aligner::new();
        align.add("Size:", format_size(self.size));
        format!(
            "{align}\n\n\
             The unknown part in the binary.\n\
             Can be ELF Header, Program Header, align offset...\n\
             We just don't know."
        )
    }
}

// ── Composite variants ───────────────────────────────────────────────────────

/// Children a [`ContainerNode`] may hold.
#[derive(Debug, Clone)]
pub enum ContainerChild {
    Package(PackageNode),
    Disasm(DisasmNode),
    Section(SectionNode),
}

/// Children a [`PackageNode`] may hold.
#[derive(Debug, Clone)]
pub enum PackageChild {
    File(FileNode),
    Package(PackageNode),
    Symbol(SymbolNode),
    Disasm(DisasmNode),
}

/// Children a [`ResultNode`] may hold.
#[derive(Debug, Clone)]
pub enum ResultChild {
    Section(SectionNode),
    Container(ContainerNode),
    Unknown(UnknownNode),
}

/// A labelled bucket grouping sibling sections or packages.
///
/// Its size is whatever the caller passes in; it is never summed here.
#[derive(Debug, Clone)]
pub struct ContainerNode {
    id: NodeId,
    name: CompactString,
    size: u64,
    children: Vec<ContainerChild>,
    explain: String,
}

impl ContainerNode {
    pub fn new(
        ids: &NodeIdAllocator,
        name: impl Into<CompactString>,
        size: u64,
        children: Vec<ContainerChild>,
        explain: impl Into<String>,
    ) -> Self {
        Self {
            id: ids.next_id(),
            name: name.into(),
            size,
            children,
            explain: explain.into(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn children(&self) -> &[ContainerChild] {
        &self.children
    }

    pub fn explain(&self) -> &str {
        &self.explain
    }

    pub fn summary(&self) -> String {
        let mut align = Aligner::new();
        align.add("Size:", format_size(self.size));
        format!("{}\n\n{align}", self.explain)
    }
}

/// A compiled package with its files, sub-packages, symbols and any
/// unattributed remainder.
#[derive(Debug, Clone)]
pub struct PackageNode {
    pub(crate) id: NodeId,
    pub(crate) full_name: CompactString,
    pub(crate) display_name: CompactString,
    pub(crate) kind: CompactString,
    pub(crate) size: u64,
    pub(crate) children: Vec<PackageChild>,
}

impl PackageNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Name relative to the parent package (full name at the root level).
    pub fn name(&self) -> &str {
        &self.display_name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Package classification, e.g. `std` or `main`.
    pub fn package_type(&self) -> &str {
        &self.kind
    }

    /// Declared size from the record, not the sum of the children.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn children(&self) -> &[PackageChild] {
        &self.children
    }

    pub fn summary(&self) -> String {
        let mut align = Aligner::new();
        align
            .add("Package:", self.full_name.as_str())
            .add("Type:", self.kind.as_str())
            .add("Size:", format_size(self.size));
        align.to_string()
    }
}

/// Root of the tree: the analysed binary as a whole.
#[derive(Debug, Clone)]
pub struct ResultNode {
    pub(crate) id: NodeId,
    pub(crate) name: CompactString,
    pub(crate) size: u64,
    pub(crate) children: Vec<ResultChild>,
}

impl ResultNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn children(&self) -> &[ResultChild] {
        &self.children
    }

    pub fn summary(&self) -> String {
        let mut align = Aligner::new();
        align
            .add("Result:", self.name.as_str())
            .add("Size:", format_size(self.size));
        align.to_string()
    }

    /// Uniform view of the root for generic traversal.
    pub fn as_node(&self) -> NodeRef<'_> {
        NodeRef::Result(self)
    }
}

impl ContainerChild {
    pub fn as_node(&self) -> NodeRef<'_> {
        match self {
            Self::Package(n) => NodeRef::Package(n),
            Self::Disasm(n) => NodeRef::Disasm(n),
            Self::Section(n) => NodeRef::Section(n),
        }
    }
}

impl PackageChild {
    pub fn as_node(&self) -> NodeRef<'_> {
        match self {
            Self::File(n) => NodeRef::File(n),
            Self::Package(n) => NodeRef::Package(n),
            Self::Symbol(n) => NodeRef::Symbol(n),
            Self::Disasm(n) => NodeRef::Disasm(n),
        }
    }
}

impl ResultChild {
    pub fn as_node(&self) -> NodeRef<'_> {
        match self {
            Self::Section(n) => NodeRef::Section(n),
            Self::Container(n) => NodeRef::Container(n),
            Self::Unknown(n) => NodeRef::Unknown(n),
        }
    }
}

// ── Uniform view ─────────────────────────────────────────────────────────────

/// Borrowed view over any node variant.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Section(&'a SectionNode),
    File(&'a FileNode),
    Package(&'a PackageNode),
    Result(&'a ResultNode),
    Symbol(&'a SymbolNode),
    Disasm(&'a DisasmNode),
    Unknown(&'a UnknownNode),
    Container(&'a ContainerNode),
}

impl<'a> NodeRef<'a> {
    pub fn id(self) -> NodeId {
        match self {
            Self::Section(n) => n.id(),
            Self::File(n) => n.id(),
            Self::Package(n) => n.id(),
            Self::Result(n) => n.id(),
            Self::Symbol(n) => n.id(),
            Self::Disasm(n) => n.id(),
            Self::Unknown(n) => n.id(),
            Self::Container(n) => n.id(),
        }
    }

    pub fn name(self) -> &'a str {
        match self {
            Self::Section(n) => n.name(),
            Self::File(n) => n.name(),
            Self::Package(n) => n.name(),
            Self::Result(n) => n.name(),
            Self::Symbol(n) => n.name(),
            Self::Disasm(n) => n.name(),
            Self::Unknown(n) => n.name(),
            Self::Container(n) => n.name(),
        }
    }

    pub fn size(self) -> u64 {
        match self {
            Self::Section(n) => n.size(),
            Self::File(n) => n.size(),
            Self::Package(n) => n.size(),
            Self::Result(n) => n.size(),
            Self::Symbol(n) => n.size(),
            Self::Disasm(n) => n.size(),
            Self::Unknown(n) => n.size(),
            Self::Container(n) => n.size(),
        }
    }

    pub fn kind(self) -> NodeKind {
        match self {
            Self::Section(_) => NodeKind::Section,
            Self::File(_) => NodeKind::File,
            Self::Package(_) => NodeKind::Package,
            Self::Result(_) => NodeKind::Result,
            Self::Symbol(_) => NodeKind::Symbol,
            Self::Disasm(_) => NodeKind::Disasm,
            Self::Unknown(_) => NodeKind::Unknown,
            Self::Container(_) => NodeKind::Container,
        }
    }

    /// Multi-line, aligned key/value description for a details pane.
    pub fn summary(self) -> String {
        match self {
            Self::Section(n) => n.summary(),
            Self::File(n) => n.summary(),
            Self::Package(n) => n.summary(),
            Self::Result(n) => n.summary(),
            Self::Symbol(n) => n.summary(),
            Self::Disasm(n) => n.summary(),
            Self::Unknown(n) => n.summary(),
            Self::Container(n) => n.summary(),
        }
    }

    /// Direct children in build order.
    pub fn children(self) -> Vec<NodeRef<'a>> {
        match self {
            Self::Package(n) => n.children.iter().map(PackageChild::as_node).collect(),
            Self::Result(n) => n.children.iter().map(ResultChild::as_node).collect(),
            Self::Container(n) => n.children.iter().map(ContainerChild::as_node).collect(),
            _ => Vec::new(),
        }
    }

    /// Sum of the direct children's sizes (saturating).
    pub fn children_size(self) -> u64 {
        self.children()
            .iter()
            .fold(0u64, |acc, c| acc.saturating_add(c.size()))
    }

    /// Every node below `self` in pre-order, excluding `self`.
    pub fn descendants(self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.walk().skip(1).map(|v| v.node)
    }

    /// Pre-order, left-to-right traversal starting at (and including) `self`.
    pub fn walk(self) -> Walk<'a> {
        Walk {
            stack: vec![Visit {
                node: self,
                depth: 0,
                parent: None,
            }],
        }
    }
}

/// One step of a [`Walk`].
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub node: NodeRef<'a>,
    /// Distance from the walk's starting node (0 for the start itself).
    pub depth: usize,
    pub parent: Option<NodeId>,
}

/// Iterative pre-order traversal; no recursion, so arbitrarily deep
/// package nesting cannot overflow the stack.
pub struct Walk<'a> {
    stack: Vec<Visit<'a>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let visit = self.stack.pop()?;
        let parent = Some(visit.node.id());
        // Reverse push so the first child is popped first.
        for child in visit.node.children().into_iter().rev() {
            self.stack.push(Visit {
                node: child,
                depth: visit.depth + 1,
                parent,
            });
        }
        Some(visit)
    }
}
