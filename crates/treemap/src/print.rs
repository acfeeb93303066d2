//! Debug printer for the tree structure.

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::node::{Color, NodeArena};
use crate::TreeMap;

pub(crate) fn print_node<K, V>(arena: &NodeArena<K, V>, node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = arena.node(i);
            let color = match n.color {
                Color::Black => "black",
                Color::Red => "red",
            };
            let left = print_node(arena, n.l, &format!("{tab}  "));
            let right = print_node(arena, n.r, &format!("{tab}  "));
            format!(
                "Node[{i}] {color} {{ {:?} = {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.k, n.v
            )
        }
    }
}

impl<K, V, C> TreeMap<K, V, C>
where
    K: Debug,
    V: Debug,
    C: Fn(&K, &K) -> Ordering,
{
    /// Renders the tree with per-node index, color, and payload. Intended
    /// for test-failure triage.
    pub fn print(&self) -> String {
        print_node(self.arena(), self.root(), "")
    }
}
