//! Prefix grouping tree over dotted type names.
//!
//! Built fresh for each version bucket and dropped after rendering.
//!
//! Rendering rules for a child labelled `s`:
//! - terminal, no children: `s`
//! - one descendant entry: `s.<entry>`
//! - several descendant entries: `s.{<e1>,<e2>,...}`
//! - terminal with children: two sibling entries, `s` and the form above
//!
//! Concatenating a leaf's ancestor labels with `.` gives back exactly one of
//! the inserted names.

#[derive(Debug, Default)]
pub(crate) struct GroupingTree<'a> {
    terminal: bool,
    children: Vec<(&'a str, GroupingTree<'a>)>,
}

impl<'a> GroupingTree<'a> {
    /// Tree over `names`; siblings keep the order they were first seen in.
    pub(crate) fn build<I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut root = GroupingTree::default();
        for name in names {
            root.insert(name);
        }
        root
    }

    fn insert(&mut self, name: &'a str) {
        let mut node = self;
        for segment in name.split('.') {
            let idx = match node.children.iter().position(|(s, _)| *s == segment) {
                Some(idx) => idx,
                None => {
                    node.children.push((segment, GroupingTree::default()));
                    node.children.len() - 1
                }
            };
            node = &mut node.children[idx].1;
        }
        node.terminal = true;
    }

    /// Render the whole tree; several top-level entries are wrapped in braces.
    pub(crate) fn render(&self) -> String {
        let entries = self.entries();
        match entries.as_slice() {
            [single] => single.clone(),
            _ => format!("{{{}}}", entries.join(",")),
        }
    }

    fn entries(&self) -> Vec<String> {
        let mut out = Vec::new();
        for (segment, child) in &self.children {
            if child.terminal {
                out.push((*segment).to_string());
            }
            if child.children.is_empty() {
                continue;
            }
            let inner = child.entries();
            match inner.as_slice() {
                [single] => out.push(format!("{segment}.{single}")),
                _ => out.push(format!("{segment}.{{{}}}", inner.join(","))),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(names: &[&str]) -> String {
        GroupingTree::build(names.iter().copied()).render()
    }

    #[test]
    fn test_single_name_is_bare() {
        assert_eq!(render(&["aws-cdk-lib.Construct"]), "aws-cdk-lib.Construct");
    }

    #[test]
    fn test_shared_prefix_is_grouped() {
        assert_eq!(
            render(&["aws-cdk-lib.CfnResource", "aws-cdk-lib.Construct"]),
            "aws-cdk-lib.{CfnResource,Construct}"
        );
    }

    #[test]
    fn test_nested_groups() {
        assert_eq!(render(&["a.b.C", "a.b.D", "a.e.F"]), "a.{b.{C,D},e.F}");
    }

    #[test]
    fn test_no_shared_root_wraps_in_braces() {
        assert_eq!(
            render(&["@amzn/core.Thing", "aws-cdk-lib.Stack"]),
            "{@amzn/core.Thing,aws-cdk-lib.Stack}"
        );
    }

    #[test]
    fn test_name_that_prefixes_another_stays_distinct() {
        assert_eq!(render(&["a.b", "a.b.C"]), "a.{b,b.C}");
        assert_eq!(render(&["a.b", "a.b.C", "a.b.D"]), "a.{b,b.{C,D}}");
    }

    #[test]
    fn test_siblings_keep_first_seen_order() {
        assert_eq!(render(&["p.Z", "p.A", "p.M"]), "p.{Z,A,M}");
    }
}
