//! Component tree traversal.
//!
//! The construct tree is owned by the caller. This module only needs two
//! things from it: a node's declared type name and its direct children.

use serde::{Deserialize, Serialize};

/// A node of the component tree.
pub trait Component {
    /// Declared type name, used as the identity registry key.
    fn declared_type(&self) -> &str;

    /// Direct children, in declaration order.
    fn children(&self) -> Vec<&dyn Component>;
}

/// Every node under `root`, `root` included, in pre-order.
///
/// The tree is acyclic by construction, so each node is yielded once.
pub fn find_all(root: &dyn Component) -> Vec<&dyn Component> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        out.push(node);
        let children = node.children();
        // reversed so the first child is visited first
        stack.extend(children.into_iter().rev());
    }
    out
}

/// Plain in-memory construct node, used by manifests and tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructNode {
    pub id: String,
    #[serde(rename = "type")]
    pub declared_type: String,
    #[serde(default)]
    pub children: Vec<ConstructNode>,
}

impl ConstructNode {
    pub fn new(id: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            declared_type: declared_type.into(),
            children: Vec::new(),
        }
    }

    /// Add a child (builder pattern).
    pub fn with_child(mut self, child: ConstructNode) -> Self {
        self.children.push(child);
        self
    }
}

impl Component for ConstructNode {
    fn declared_type(&self) -> &str {
        &self.declared_type
    }

    fn children(&self) -> Vec<&dyn Component> {
        self.children.iter().map(|c| c as &dyn Component).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_all_visits_every_node_once_in_preorder() {
        let tree = ConstructNode::new("Stack", "Stack")
            .with_child(
                ConstructNode::new("Bucket", "Bucket")
                    .with_child(ConstructNode::new("Resource", "CfnBucket")),
            )
            .with_child(ConstructNode::new("Queue", "Queue"));

        let types: Vec<&str> = find_all(&tree).iter().map(|n| n.declared_type()).collect();
        assert_eq!(types, vec!["Stack", "Bucket", "CfnBucket", "Queue"]);
    }

    #[test]
    fn test_find_all_single_node() {
        let leaf = ConstructNode::new("Leaf", "Leaf");
        assert_eq!(find_all(&leaf).len(), 1);
    }

    #[test]
    fn test_construct_node_deserializes_without_children() {
        let node: ConstructNode = serde_json::from_value(serde_json::json!({
            "id": "Stack",
            "type": "Stack"
        }))
        .expect("deserialize");
        assert!(node.children.is_empty());
    }
}
