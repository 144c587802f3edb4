// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Assemblies of cost components, the connections between their ports, and
//! the order in which they are executed.

mod builder;
mod execution;
mod retrieval;
mod validation;

pub mod iterators;

#[cfg(test)]
pub(crate) mod test_utils;

pub use builder::AssemblyBuilder;
pub use execution::Step;

use std::collections::HashMap;
use std::fmt::Display;

use petgraph::graph::{DiGraph, NodeIndex};

use crate::{Component, Contract, PortPath};

/// Children stored in a `DiGraph` instance can be addressed with `NodeIndex`es.
///
/// `NodeIndexMap` stores the corresponding `NodeIndex` for any child name, so
/// that children in the `DiGraph` can be retrieved from their names.
pub(crate) type NodeIndexMap = HashMap<String, NodeIndex>;

/// A named component inside an assembly.
pub struct Child {
    name: String,
    component: Box<dyn Component>,
}

impl Child {
    /// Returns the name of the child within its assembly.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the component bound to the child's name.
    pub fn component(&self) -> &dyn Component {
        self.component.as_ref()
    }

    /// Returns the contract of the component bound to the child's name.
    pub fn contract(&self) -> &'static Contract {
        self.component.contract()
    }
}

/// A directed connection from an output port to an input port.
///
/// Sources are child outputs or boundary inputs of the assembly; destinations
/// are child inputs or boundary outputs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Connection {
    source: PortPath,
    destination: PortPath,
}

impl Connection {
    pub(crate) fn new(source: PortPath, destination: PortPath) -> Self {
        Self {
            source,
            destination,
        }
    }

    pub fn source(&self) -> &PortPath {
        &self.source
    }

    pub fn destination(&self) -> &PortPath {
        &self.destination
    }
}

impl Display for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}

/// A validated wiring plan: the children of a cost model, the connections
/// between their ports and the assembly boundary, and the workflow order in
/// which an external scheduler executes them.
///
/// Instances are created by [`AssemblyBuilder::build`] and can't be modified
/// afterwards.  An `Assembly` is itself a [`Component`], exposing its boundary
/// contract, so that it can be nested in a larger assembly.
pub struct Assembly {
    contract: &'static Contract,
    implements: Vec<&'static Contract>,
    graph: DiGraph<Child, ()>,
    node_indices: NodeIndexMap,
    connections: Vec<Connection>,
    workflow: Vec<String>,
}

impl Assembly {
    fn empty(contract: &'static Contract) -> Self {
        Self {
            contract,
            implements: Vec::new(),
            graph: DiGraph::new(),
            node_indices: NodeIndexMap::new(),
            connections: Vec::new(),
            workflow: Vec::new(),
        }
    }
}
