use crate::ui::primitives::border::TreeConnector;

/// Labelled node of a rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Render the node and its descendants, one line per node.
    pub fn render(&self, supports_unicode: bool) -> String {
        let mut out = String::new();
        out.push_str(&self.label);
        out.push('\n');
        let mut prefix = String::new();
        render_children(&self.children, &mut prefix, supports_unicode, &mut out);
        out
    }
}

fn render_children(
    children: &[TreeNode],
    prefix: &mut String,
    supports_unicode: bool,
    out: &mut String,
) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();
        out.push_str(prefix);
        out.push_str(TreeConnector::for_node(is_last).render(supports_unicode));
        out.push_str(&child.label);
        out.push('\n');

        let len = prefix.len();
        prefix.push_str(TreeConnector::for_ancestor(is_last).render(supports_unicode));
        render_children(&child.children, prefix, supports_unicode, out);
        prefix.truncate(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeNode {
        TreeNode::new("root")
            .with_child(
                TreeNode::new("a")
                    .with_child(TreeNode::new("a1"))
                    .with_child(TreeNode::new("a2")),
            )
            .with_child(TreeNode::new("b").with_child(TreeNode::new("b1")))
    }

    #[test]
    fn renders_ascii_connectors() {
        let expected = "\
root
|-- a
|   |-- a1
|   `-- a2
`-- b
    `-- b1
";
        assert_eq!(sample().render(false), expected);
    }

    #[test]
    fn renders_unicode_connectors() {
        use crate::ui::theme::tree;

        let rendered = sample().render(true);
        assert!(rendered.contains(&format!("{}a\n", tree::BRANCH)));
        assert!(rendered.contains(&format!("{}{}a2\n", tree::PIPE, tree::LAST)));
        assert!(rendered.contains(&format!("{}{}b1\n", tree::SPACE, tree::LAST)));
    }

    #[test]
    fn single_node_has_no_connectors() {
        assert_eq!(TreeNode::new("root").render(true), "root\n");
    }
}
