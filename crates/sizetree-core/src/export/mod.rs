/// Export of a built tree for external renderers.
///
/// - [`ExportedNode`]: owned, serde-serializable snapshot with the exact
///   type tags renderers key icons off.
/// - [`write_csv`]: one flat row per node, parent linked by id.
use crate::model::{NodeId, NodeKind, NodeRef};
use serde::Serialize;
use std::io::Write;

/// Owned snapshot of one node and its subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedNode {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: String,
    pub size: u64,
    pub summary: String,
    pub children: Vec<ExportedNode>,
}

impl ExportedNode {
    pub fn from_node(node: NodeRef<'_>) -> Self {
        Self {
            id: node.id(),
            kind: node.kind(),
            name: node.name().to_string(),
            size: node.size(),
            summary: node.summary(),
            children: node.children().into_iter().map(Self::from_node).collect(),
        }
    }
}

/// Serialize the subtree rooted at `node` as JSON.
pub fn to_json(node: NodeRef<'_>, pretty: bool) -> serde_json::Result<String> {
    let exported = ExportedNode::from_node(node);
    if pretty {
        serde_json::to_string_pretty(&exported)
    } else {
        serde_json::to_string(&exported)
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    id: NodeId,
    parent: Option<NodeId>,
    depth: usize,
    #[serde(rename = "type")]
    kind: NodeKind,
    name: &'a str,
    size: u64,
}

/// Write every node under `root` (inclusive) as a CSV row in pre-order.
pub fn write_csv<W: Write>(root: NodeRef<'_>, writer: W) -> csv::Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    for visit in root.walk() {
        out.serialize(CsvRow {
            id: visit.node.id(),
            parent: visit.parent,
            depth: visit.depth,
            kind: visit.node.kind(),
            name: visit.node.name(),
            size: visit.node.size(),
        })?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::records::{AnalysisResult, Section};
    use crate::tree::build_tree;

    fn sample() -> AnalysisResult {
        AnalysisResult {
            name: "bin".into(),
            size: 100,
            sections: vec![Section {
                name: ".text".into(),
                file_size: 30,
                known_size: 10,
                ..Section::default()
            }],
            ..AnalysisResult::default()
        }
    }

    #[test]
    fn json_uses_type_tags() {
        let root = build_tree(&sample());
        let json = to_json(root.as_node(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["type"], "result");
        assert_eq!(value["size"], 100);
        assert_eq!(value["children"][0]["type"], "container");
        assert_eq!(value["children"][0]["children"][0]["type"], "section");
        assert_eq!(value["children"][1]["type"], "unknown");
        assert_eq!(value["children"][1]["size"], 80);
    }

    #[test]
    fn csv_has_one_row_per_node() {
        let root = build_tree(&sample());
        let mut buf = Vec::new();
        write_csv(root.as_node(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "id,parent,depth,type,name,size");
        assert_eq!(lines.len(), 1 + 4);
        assert_eq!(lines[1], "1,,0,result,bin,100");
        assert_eq!(lines[2], "3,1,1,container,Unknown Sections Size,20");
        assert_eq!(lines[3], "2,3,2,section,.text,20");
    }
}
