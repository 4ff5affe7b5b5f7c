use serde::Serialize;

use crate::bookmarks::bookmark_key;
use crate::model::{DEFAULT_WEIGHT, Feature, Mode};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MenuNode {
    pub key: String,
    pub text: String,
    pub weight: i32,
    pub group: bool,
    /// False for intermediate nodes no feature was registered for.
    pub registered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    fn implicit(key: String, text: &str) -> Self {
        Self {
            key,
            text: text.to_string(),
            weight: DEFAULT_WEIGHT,
            group: true,
            registered: false,
            icon_name: None,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        !self.group
    }

    /// Depth-first walk, parents before children.
    pub fn walk<'a>(&'a self, out: &mut Vec<(usize, &'a MenuNode)>, depth: usize) {
        out.push((depth, self));
        for c in &self.children {
            c.walk(out, depth + 1);
        }
    }
}

/// Flattens a menu tree into `(depth, node)` pairs in display order.
pub fn flatten_menu(nodes: &[MenuNode]) -> Vec<(usize, &MenuNode)> {
    let mut out = Vec::new();
    for n in nodes {
        n.walk(&mut out, 0);
    }
    out
}

pub(super) fn build<'a>(mode: Mode, features: impl Iterator<Item = &'a Feature>) -> Vec<MenuNode> {
    let mut roots: Vec<MenuNode> = Vec::new();

    for feature in features {
        let mut segments: Vec<&str> = feature
            .path
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        let mut prefix = Vec::new();
        if segments
            .first()
            .is_some_and(|s| bookmark_key(s) == mode.as_str())
        {
            prefix.push(mode.as_str().to_string());
            segments.remove(0);
        }
        if segments.is_empty() {
            continue;
        }

        let mut level = &mut roots;
        let last = segments.len() - 1;
        for (i, seg) in segments.iter().enumerate() {
            prefix.push(bookmark_key(seg));
            let key = prefix.join("/");
            let pos = match level.iter().position(|n| n.key == key) {
                Some(pos) => pos,
                None => {
                    level.push(MenuNode::implicit(key, seg));
                    level.len() - 1
                }
            };
            if i == last {
                let node = &mut level[pos];
                node.text = feature.text.clone();
                node.weight = feature.weight;
                node.group = feature.group;
                node.registered = true;
                node.icon_name = feature.icon_name.clone();
            }
            level = &mut level[pos].children;
        }
    }

    prune_and_sort(&mut roots);
    roots
}

fn prune_and_sort(nodes: &mut Vec<MenuNode>) {
    for n in nodes.iter_mut() {
        prune_and_sort(&mut n.children);
    }
    nodes.retain(|n| !n.group || !n.children.is_empty());
    nodes.sort_by(|a, b| a.weight.cmp(&b.weight).then_with(|| a.text.cmp(&b.text)));
}
