// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for validating the acyclicity of the data dependencies and the
//! workflow order of an [`Assembly`].

use std::collections::{HashMap, HashSet};

use petgraph::graph::NodeIndex;

use crate::assembly::Connection;
use crate::Error;

use super::AssemblyValidator;

/// Checks that no connection between two members of `workflow` feeds a child
/// that is scheduled before the child producing the value.
pub(crate) fn ensure_producers_first(
    workflow: &[String],
    connections: &[Connection],
) -> Result<(), Error> {
    let positions = workflow
        .iter()
        .enumerate()
        .map(|(pos, name)| (name.as_str(), pos))
        .collect::<HashMap<_, _>>();

    for connection in connections {
        let (Some(producer), Some(consumer)) = (
            connection.source().component(),
            connection.destination().component(),
        ) else {
            continue;
        };
        let (Some(producer_pos), Some(consumer_pos)) =
            (positions.get(producer), positions.get(consumer))
        else {
            continue;
        };
        if producer_pos > consumer_pos {
            return Err(Error::order_violation(format!(
                "{} is scheduled before its producer {} ({}).",
                consumer, producer, connection
            )));
        }
    }

    Ok(())
}

impl AssemblyValidator<'_> {
    /// Validates that the children don't depend on each other in a cycle.
    ///
    /// If a cycle is detected, an error is returned, that lists the children
    /// in the cycle.
    pub(super) fn validate_acyclicity(&self) -> Result<(), Error> {
        let mut done = HashSet::new();
        for index in self.assembly.graph.node_indices() {
            self.visit(index, &mut vec![], &mut done)?;
        }
        Ok(())
    }

    fn visit(
        &self,
        index: NodeIndex,
        path: &mut Vec<NodeIndex>,
        done: &mut HashSet<NodeIndex>,
    ) -> Result<(), Error> {
        if done.contains(&index) {
            return Ok(());
        }
        path.push(index);
        for successor in self
            .assembly
            .graph
            .neighbors_directed(index, petgraph::Direction::Outgoing)
        {
            if let Some(first_occurance) = path.iter().position(|i| *i == successor) {
                return Err(Error::order_violation(format!(
                    "Cycle detected: {} -> {}",
                    path[first_occurance..]
                        .iter()
                        .map(|i| self.assembly.graph[*i].name())
                        .collect::<Vec<_>>()
                        .join(" -> "),
                    self.assembly.graph[successor].name()
                )));
            }
            self.visit(successor, path, done)?;
        }
        path.pop();
        done.insert(index);
        Ok(())
    }

    /// Validates the workflow order against all connections, and reports
    /// children that are not part of the workflow.
    pub(super) fn validate_workflow(&self) -> Result<(), Error> {
        ensure_producers_first(&self.assembly.workflow, &self.assembly.connections)?;

        let unscheduled = self
            .assembly
            .children()
            .map(|c| c.name())
            .filter(|name| !self.assembly.workflow.iter().any(|w| w.as_str() == *name))
            .collect::<Vec<_>>();

        if unscheduled.is_empty() {
            return Ok(());
        }
        if self.config.reject_unscheduled_children {
            return Err(Error::invalid_workflow(format!(
                "Components {:?} are not part of the workflow of {} assembly.",
                unscheduled, self.assembly.contract
            )));
        }
        tracing::warn!(
            "Components {:?} are not part of the workflow of {} assembly and won't be executed.",
            unscheduled,
            self.assembly.contract
        );

        Ok(())
    }
}
