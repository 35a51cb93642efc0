//! Directory tree of the included files.

use std::collections::BTreeMap;

use crate::domain::FileRecord;

#[derive(Default)]
struct Node {
    children: BTreeMap<String, Node>,
    is_file: bool,
}

/// Render the records' paths as a tree headed by `root_name/`.
///
/// Directories sort before files, each group by name.
pub fn generate_tree(root_name: &str, records: &[FileRecord]) -> String {
    let mut root = Node::default();
    for record in records {
        let mut node = &mut root;
        for segment in record.relative_path.split('/').filter(|s| !s.is_empty()) {
            node = node.children.entry(segment.to_string()).or_default();
        }
        node.is_file = true;
    }

    let mut lines = vec![format!("{}/", root_name)];
    walk_tree(&root, "", &mut lines);
    lines.join("\n")
}

fn walk_tree(node: &Node, prefix: &str, lines: &mut Vec<String>) {
    let mut entries: Vec<(&String, &Node)> = node.children.iter().collect();
    entries.sort_by(|a, b| {
        let a_dir = !a.1.children.is_empty();
        let b_dir = !b.1.children.is_empty();
        b_dir.cmp(&a_dir).then_with(|| a.0.cmp(b.0))
    });

    let total_entries = entries.len();
    for (idx, (name, child)) in entries.into_iter().enumerate() {
        let is_last = idx == total_entries - 1;
        let connector = if is_last { "└── " } else { "├── " };

        if child.children.is_empty() {
            lines.push(format!("{}{}{}", prefix, connector, name));
        } else {
            lines.push(format!("{}{}{}/", prefix, connector, name));
            let extension = if is_last { "    " } else { "│   " };
            walk_tree(child, &format!("{}{}", prefix, extension), lines);
        }
    }
}
