// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for retrieving children, ports and connections from an
//! [`Assembly`].

use petgraph::graph::NodeIndex;

use super::iterators::{Children, Neighbors, Workflow};
use super::{Assembly, Child, Connection};
use crate::{Contract, Error, Port, PortPath};

/// `Child` and `Connection` retrieval.
impl Assembly {
    /// Returns the boundary contract of the assembly.
    pub fn contract(&self) -> &'static Contract {
        self.contract
    }

    /// Returns the child with the given name, if it exists.
    pub fn child(&self, name: &str) -> Result<&Child, Error> {
        self.index(name).map(|i| &self.graph[i])
    }

    /// Returns an iterator over the children of the assembly, in the order
    /// they were added.
    pub fn children(&self) -> Children<'_> {
        Children {
            iter: self.graph.raw_nodes().iter(),
        }
    }

    /// Returns an iterator over the connections of the assembly.
    pub fn connections(&self) -> std::slice::Iter<'_, Connection> {
        self.connections.iter()
    }

    /// Returns an iterator over the children in the workflow, in execution
    /// order.
    pub fn workflow(&self) -> Workflow<'_> {
        Workflow {
            assembly: self,
            iter: self.workflow.iter(),
        }
    }

    /// Returns an iterator over the children whose outputs feed the inputs of
    /// the child with the given name.
    ///
    /// Returns an error if the given `name` does not exist.
    pub fn predecessors(&self, name: &str) -> Result<Neighbors<'_>, Error> {
        self.neighbors(name, petgraph::Direction::Incoming)
    }

    /// Returns an iterator over the children whose inputs are fed by the
    /// outputs of the child with the given name.
    ///
    /// Returns an error if the given `name` does not exist.
    pub fn successors(&self, name: &str) -> Result<Neighbors<'_>, Error> {
        self.neighbors(name, petgraph::Direction::Outgoing)
    }

    /// Returns the source connected to the given destination, if any.
    pub fn source_of(&self, destination: &PortPath) -> Option<&PortPath> {
        self.connections
            .iter()
            .find(|c| c.destination() == destination)
            .map(Connection::source)
    }

    /// Returns an iterator over the destinations connected to the given
    /// source.
    pub fn destinations_of<'a>(
        &'a self,
        source: &'a PortPath,
    ) -> impl Iterator<Item = &'a PortPath> + 'a {
        self.connections
            .iter()
            .filter(move |c| c.source() == source)
            .map(Connection::destination)
    }

    fn neighbors(
        &self,
        name: &str,
        direction: petgraph::Direction,
    ) -> Result<Neighbors<'_>, Error> {
        self.index(name).map(|index| Neighbors {
            graph: &self.graph,
            iter: self.graph.neighbors_directed(index, direction),
        })
    }

    pub(crate) fn index(&self, name: &str) -> Result<NodeIndex, Error> {
        self.node_indices.get(name).copied().ok_or_else(|| {
            Error::component_not_found(format!(
                "Component {} not found in {} assembly.",
                name, self.contract
            ))
        })
    }

    /// Returns the port addressed by the given path.
    pub(crate) fn resolve(&self, path: &PortPath) -> Result<&'static Port, Error> {
        let contract = match path.component() {
            Some(name) => self.child(name)?.contract(),
            None => self.contract,
        };
        contract.port(path.port()).ok_or_else(|| {
            Error::unknown_port(format!("Port {} not found on {}.", path, contract))
        })
    }
}
