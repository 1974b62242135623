//! Binary search tree used by the path visualizer. The tree is rebuilt from
//! the insertion sequence on every frame.

#[derive(Debug, Clone)]
struct Node {
    value: i64,
    x: f64,
    y: f64,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedNode {
    pub value: i64,
    pub x: f64,
    pub y: f64,
}

const ROOT_Y: f64 = 30.0;
const LEVEL_HEIGHT: f64 = 60.0;

#[derive(Debug, Clone, Default)]
pub struct Bst {
    root: Option<Box<Node>>,
}

impl Bst {
    pub fn build(values: &[i64]) -> Self {
        let mut tree = Self::default();
        for &v in values {
            tree.insert(v);
        }
        tree
    }

    /// Values equal to a node descend right.
    pub fn insert(&mut self, value: i64) {
        insert_at(&mut self.root, value);
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Root at `(width / 2, 30)` with spread `width / 4`; each level moves down
    /// 60 and halves the spread.
    pub fn layout(&mut self, width: f64) {
        place(self.root.as_deref_mut(), width / 2.0, ROOT_Y, width / 4.0);
    }

    /// Values visited from the root until the target or a leaf is reached.
    pub fn search_path(&self, target: i64) -> Vec<i64> {
        let mut path = Vec::new();
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            path.push(node.value);
            if node.value == target {
                break;
            }
            cur = if target < node.value {
                node.left.as_deref()
            } else {
                node.right.as_deref()
            };
        }
        path
    }

    /// Nodes in pre-order.
    pub fn nodes(&self) -> Vec<PlacedNode> {
        let mut out = Vec::new();
        collect_nodes(self.root.as_deref(), &mut out);
        out
    }

    /// Parent-to-child edges in pre-order.
    pub fn edges(&self) -> Vec<(PlacedNode, PlacedNode)> {
        let mut out = Vec::new();
        collect_edges(self.root.as_deref(), &mut out);
        out
    }
}

fn insert_at(slot: &mut Option<Box<Node>>, value: i64) {
    match slot {
        Some(node) => {
            if value < node.value {
                insert_at(&mut node.left, value)
            } else {
                insert_at(&mut node.right, value)
            }
        }
        None => {
            *slot = Some(Box::new(Node {
                value,
                x: 0.0,
                y: 0.0,
                left: None,
                right: None,
            }))
        }
    }
}

fn place(node: Option<&mut Node>, x: f64, y: f64, spread: f64) {
    let Some(node) = node else { return };
    node.x = x;
    node.y = y;
    place(node.left.as_deref_mut(), x - spread, y + LEVEL_HEIGHT, spread / 2.0);
    place(node.right.as_deref_mut(), x + spread, y + LEVEL_HEIGHT, spread / 2.0);
}

fn placed(node: &Node) -> PlacedNode {
    PlacedNode {
        value: node.value,
        x: node.x,
        y: node.y,
    }
}

fn collect_nodes(node: Option<&Node>, out: &mut Vec<PlacedNode>) {
    let Some(node) = node else { return };
    out.push(placed(node));
    collect_nodes(node.left.as_deref(), out);
    collect_nodes(node.right.as_deref(), out);
}

fn collect_edges(node: Option<&Node>, out: &mut Vec<(PlacedNode, PlacedNode)>) {
    let Some(node) = node else { return };
    for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
        out.push((placed(node), placed(child)));
        collect_edges(Some(child), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visualizer::DEFAULT_DATASET;

    #[test]
    fn test_default_path() {
        let tree = Bst::build(&DEFAULT_DATASET);
        assert_eq!(tree.search_path(29), vec![42, 17, 29]);
        assert_eq!(tree.search_path(34), vec![42, 17, 29, 34]);
        // missing value ends at a leaf
        assert_eq!(tree.search_path(60), vec![42, 63, 55]);
    }

    #[test]
    fn test_equal_values_descend_right() {
        let tree = Bst::build(&[10, 10, 10]);
        let nodes = tree.nodes();
        assert_eq!(nodes.len(), 3);
        assert_eq!(tree.search_path(10), vec![10]);

        let tree = Bst::build(&[10, 5, 10, 12]);
        // the duplicate sits right of the root and 12 right of the duplicate
        assert_eq!(tree.search_path(11), vec![10, 10, 12]);
    }

    #[test]
    fn test_paths_on_balanced_tree() {
        let tree = Bst::build(&[50, 30, 70, 20, 40, 60, 80, 35, 45, 65]);
        assert_eq!(tree.search_path(35), vec![50, 30, 40, 35]);
        assert_eq!(tree.search_path(65), vec![50, 70, 60, 65]);
        assert_eq!(tree.search_path(10), vec![50, 30, 20]);
        assert_eq!(tree.search_path(100), vec![50, 70, 80]);
        assert_eq!(tree.search_path(50), vec![50]);
    }

    /// Flat tree of `(value, left, right)` slots for cross-checking.
    fn arena_path(values: &[i64], target: i64) -> Vec<i64> {
        let mut arena: Vec<(i64, Option<usize>, Option<usize>)> = Vec::new();
        for &v in values {
            let idx = arena.len();
            arena.push((v, None, None));
            if idx == 0 {
                continue;
            }
            let mut cur = 0;
            loop {
                let slot = if v < arena[cur].0 {
                    &mut arena[cur].1
                } else {
                    &mut arena[cur].2
                };
                let child = *slot;
                match child {
                    Some(next) => cur = next,
                    None => {
                        *slot = Some(idx);
                        break;
                    }
                }
            }
        }

        let mut path = Vec::new();
        let mut cur = if arena.is_empty() { None } else { Some(0) };
        while let Some(i) = cur {
            let (value, left, right) = arena[i];
            path.push(value);
            if value == target {
                break;
            }
            cur = if target < value { left } else { right };
        }
        path
    }

    #[test]
    fn test_paths_match_flat_tree_on_generated_sequences() {
        let mut state: u64 = 0x2545_f491;
        for len in 0..40usize {
            let values: Vec<i64> = (0..len)
                .map(|_| {
                    state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                    ((state >> 33) % 30) as i64
                })
                .collect();

            let tree = Bst::build(&values);
            assert_eq!(tree.nodes().len(), values.len());
            for target in -1..=31 {
                assert_eq!(
                    tree.search_path(target),
                    arena_path(&values, target),
                    "values={:?} target={}",
                    values,
                    target
                );
            }
        }
    }

    #[test]
    fn test_layout() {
        let mut tree = Bst::build(&DEFAULT_DATASET);
        tree.layout(340.0);

        let nodes = tree.nodes();
        let at = |v: i64| nodes.iter().find(|n| n.value == v).copied().unwrap();

        assert_eq!((at(42).x, at(42).y), (170.0, 30.0));
        assert_eq!((at(17).x, at(17).y), (85.0, 90.0));
        assert_eq!((at(63).x, at(63).y), (255.0, 90.0));
        assert_eq!((at(29).x, at(29).y), (127.5, 150.0));
        assert_eq!((at(34).x, at(34).y), (148.75, 210.0));
        assert_eq!(tree.edges().len(), DEFAULT_DATASET.len() - 1);
    }

    #[test]
    fn test_empty_tree() {
        let tree = Bst::build(&[]);
        assert!(tree.is_empty());
        assert!(tree.search_path(1).is_empty());
        assert!(tree.nodes().is_empty());
    }
}
