// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Iterators over the children of an `Assembly`.

use petgraph::graph::DiGraph;

use super::{Assembly, Child};

/// An iterator over the children of an `Assembly`.
pub struct Children<'a> {
    pub(crate) iter: std::slice::Iter<'a, petgraph::graph::Node<Child>>,
}

impl<'a> Iterator for Children<'a> {
    type Item = &'a Child;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|n| &n.weight)
    }
}

/// An iterator over the data-dependency neighbors of a child in an
/// `Assembly`.
pub struct Neighbors<'a> {
    pub(crate) graph: &'a DiGraph<Child, ()>,
    pub(crate) iter: petgraph::graph::Neighbors<'a, ()>,
}

impl<'a> Iterator for Neighbors<'a> {
    type Item = &'a Child;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|i| &self.graph[i])
    }
}

/// An iterator over the children of an `Assembly` in workflow order.
pub struct Workflow<'a> {
    pub(crate) assembly: &'a Assembly,
    pub(crate) iter: std::slice::Iter<'a, String>,
}

impl<'a> Iterator for Workflow<'a> {
    type Item = &'a Child;

    fn next(&mut self) -> Option<Self::Item> {
        for name in self.iter.by_ref() {
            if let Some(index) = self.assembly.node_indices.get(name) {
                return Some(&self.assembly.graph[*index]);
            }
        }
        None
    }
}
