// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The [`AssemblyBuilder`], for adding children to an assembly, connecting
//! their ports and fixing their execution order.

use crate::component::{self, Component};
use crate::{AssemblyConfig, Contract, Direction, Error, Port, PortPath};

use super::validation::{self, ensure_producers_first};
use super::{Assembly, Child, Connection};

/// Accumulates the children, connections and workflow of an assembly.
///
/// Every method either succeeds or leaves the builder unchanged.  Once the
/// assembly is configured, [`build`][AssemblyBuilder::build] validates it as a
/// whole and returns the immutable [`Assembly`].
pub struct AssemblyBuilder {
    assembly: Assembly,
    config: AssemblyConfig,
}

impl AssemblyBuilder {
    /// Creates a builder for an assembly exposing the given boundary contract.
    pub fn new(contract: &'static Contract, config: AssemblyConfig) -> Self {
        Self {
            assembly: Assembly::empty(contract),
            config,
        }
    }

    /// Returns the child with the given name.
    ///
    /// Returns an error if the child doesn't exist.
    pub fn child(&self, name: &str) -> Result<&Child, Error> {
        self.assembly.child(name)
    }

    /// Returns an iterator over the connections recorded so far.
    pub fn connections(&self) -> std::slice::Iter<'_, Connection> {
        self.assembly.connections()
    }

    /// Returns the names in the current workflow, in execution order.
    pub fn workflow(&self) -> &[String] {
        &self.assembly.workflow
    }

    /// Declares that the boundary contract of the assembly implements the
    /// given base contract.
    pub fn declare_implements(&mut self, base: &'static Contract) -> Result<(), Error> {
        self.assembly.contract.ensure_implements(base)?;
        self.assembly.implements.push(base);
        Ok(())
    }

    /// Adds a child with the given name to the assembly.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        component: impl Component + 'static,
    ) -> Result<(), Error> {
        let name = name.into();

        if name.is_empty() || name.contains('.') {
            return Err(Error::invalid_name(format!(
                "Invalid component name: {name:?}."
            )));
        }
        if self.assembly.node_indices.contains_key(&name) {
            return Err(Error::duplicate_name(format!(
                "Component {} already exists in {} assembly.",
                name, self.assembly.contract
            )));
        }
        component::ensure_valid(&component)?;

        tracing::debug!(
            "Adding {}:{} to {} assembly.",
            component.contract(),
            name,
            self.assembly.contract
        );
        let idx = self.assembly.graph.add_node(Child {
            name: name.clone(),
            component: Box::new(component),
        });
        self.assembly.node_indices.insert(name, idx);

        Ok(())
    }

    /// Replaces the component bound to `name` with the given component.
    ///
    /// All existing connections to and from `name` are kept, so the new
    /// component must expose a port with the same name, direction and type
    /// for each of them.
    pub fn replace(&mut self, name: &str, component: impl Component + 'static) -> Result<(), Error> {
        let idx = self.assembly.index(name)?;
        component::ensure_valid(&component)?;

        let contract = component.contract();
        for connection in &self.assembly.connections {
            for path in [connection.source(), connection.destination()] {
                if path.component() != Some(name) {
                    continue;
                }
                let required = self.assembly.resolve(path)?;
                if !contract
                    .port(path.port())
                    .is_some_and(|p| p.same_signature(required))
                {
                    return Err(Error::contract_violation(format!(
                        "Can't replace {} with {}: connection {} requires port {}.",
                        name, contract, connection, required
                    )));
                }
            }
        }

        tracing::debug!(
            "Replacing {}:{} with {} in {} assembly.",
            self.assembly.graph[idx].contract(),
            name,
            contract,
            self.assembly.contract
        );
        self.assembly.graph[idx] = Child {
            name: name.to_string(),
            component: Box::new(component),
        };

        Ok(())
    }

    /// Connects the `source` port to the `destination` port.
    ///
    /// Ports are addressed as `"child.port"`, or as `"port"` for ports on the
    /// boundary of the assembly.
    pub fn connect(&mut self, source: &str, destination: &str) -> Result<(), Error> {
        self.connect_all(source, [destination])
    }

    /// Connects the `source` port to every port in `destinations`, so that
    /// all of them receive the same value.
    ///
    /// If any of the connections is invalid, none of them are recorded.
    /// `destinations` must not be empty, and a boundary port can only be
    /// connected to a child port.
    pub fn connect_all<'a>(
        &mut self,
        source: &str,
        destinations: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), Error> {
        let source = PortPath::parse(source)?;
        let source_port = self.assembly.resolve(&source)?;
        ensure_direction(&source, source_port, Role::Source)?;

        let mut pending: Vec<Connection> = Vec::new();
        for destination in destinations {
            let destination = PortPath::parse(destination)?;
            let destination_port = self.assembly.resolve(&destination)?;
            ensure_direction(&destination, destination_port, Role::Destination)?;

            if source.component().is_some() && source.component() == destination.component() {
                return Err(Error::invalid_connection(format!(
                    "Connection:({}, {}) Can't connect a component to itself.",
                    source, destination
                )));
            }
            if source.is_boundary() && destination.is_boundary() {
                return Err(Error::invalid_connection(format!(
                    "Connection:({}, {}) Boundary ports must be connected to a child.",
                    source, destination
                )));
            }
            if source_port.port_type() != destination_port.port_type() {
                return Err(Error::connection_type_mismatch(format!(
                    "Can't connect {} ({}) to {} ({}).",
                    source,
                    source_port.port_type(),
                    destination,
                    destination_port.port_type()
                )));
            }
            if pending.iter().any(|c| c.destination() == &destination) {
                return Err(Error::duplicate_connection(format!(
                    "{} appears more than once in the destinations of {}.",
                    destination, source
                )));
            }
            if let Some(existing) = self.assembly.source_of(&destination) {
                if !self.config.allow_connection_overwrite {
                    return Err(Error::duplicate_connection(format!(
                        "{} is already connected to {}.",
                        destination, existing
                    )));
                }
            }
            pending.push(Connection::new(source.clone(), destination));
        }
        if pending.is_empty() {
            return Err(Error::invalid_connection(format!(
                "{} has no destinations.",
                source
            )));
        }

        ensure_producers_first(&self.assembly.workflow, &pending)?;

        for connection in pending {
            self.record(connection);
        }

        Ok(())
    }

    /// Sets the order in which the children of the assembly are executed.
    ///
    /// Every child that feeds another child in the workflow must come before
    /// it.
    pub fn set_workflow<I, S>(&mut self, names: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let workflow: Vec<String> = names.into_iter().map(Into::into).collect();

        for (pos, name) in workflow.iter().enumerate() {
            self.assembly.index(name)?;
            if workflow[..pos].contains(name) {
                return Err(Error::invalid_workflow(format!(
                    "Component {} appears more than once in the workflow.",
                    name
                )));
            }
        }
        ensure_producers_first(&workflow, &self.assembly.connections)?;

        tracing::debug!(
            "Setting workflow of {} assembly to [{}].",
            self.assembly.contract,
            workflow.join(", ")
        );
        self.assembly.workflow = workflow;

        Ok(())
    }

    /// Validates the assembly and returns it as an immutable wiring plan.
    ///
    /// Returns an error if a boundary port is left unconnected, if the
    /// children depend on each other in a cycle, or if the workflow is
    /// invalid.
    pub fn build(self) -> Result<Assembly, Error> {
        validation::validate(&self.assembly, &self.config)?;
        Ok(self.assembly)
    }

    fn record(&mut self, connection: Connection) {
        let replaced_pos = self
            .assembly
            .connections
            .iter()
            .position(|c| c.destination() == connection.destination());
        let replaced = replaced_pos.map(|pos| self.assembly.connections.remove(pos));

        if let (Some(source), Some(destination)) = (
            connection.source().component(),
            connection.destination().component(),
        ) {
            let source_idx = self.assembly.node_indices[source];
            let dest_idx = self.assembly.node_indices[destination];
            self.assembly.graph.update_edge(source_idx, dest_idx, ());
        }

        match &replaced {
            Some(old) => tracing::warn!(
                "Replacing connection {} with {} in {} assembly.",
                old,
                connection,
                self.assembly.contract
            ),
            None => tracing::debug!(
                "Connecting {} in {} assembly.",
                connection,
                self.assembly.contract
            ),
        }
        self.assembly.connections.push(connection);

        if let Some(old) = replaced {
            self.remove_unused_dependency(&old);
        }
    }

    /// Removes the dependency edge behind the given connection, unless
    /// another connection still links the same two children.
    fn remove_unused_dependency(&mut self, connection: &Connection) {
        let (Some(source), Some(destination)) = (
            connection.source().component(),
            connection.destination().component(),
        ) else {
            return;
        };
        let still_used = self.assembly.connections.iter().any(|c| {
            c.source().component() == Some(source)
                && c.destination().component() == Some(destination)
        });
        if still_used {
            return;
        }
        let source_idx = self.assembly.node_indices[source];
        let dest_idx = self.assembly.node_indices[destination];
        if let Some(edge) = self.assembly.graph.find_edge(source_idx, dest_idx) {
            self.assembly.graph.remove_edge(edge);
        }
    }
}

/// The end of a connection a port is used as.
#[derive(Clone, Copy)]
enum Role {
    Source,
    Destination,
}

/// Checks that the port at `path` can be used as the given end of a
/// connection.
///
/// Values flow out of child outputs and boundary inputs, and into child
/// inputs and boundary outputs.
fn ensure_direction(path: &PortPath, port: &Port, role: Role) -> Result<(), Error> {
    let expected = match (role, path.is_boundary()) {
        (Role::Source, false) | (Role::Destination, true) => Direction::Out,
        (Role::Source, true) | (Role::Destination, false) => Direction::In,
    };
    if port.direction() == expected {
        return Ok(());
    }
    let role = match role {
        Role::Source => "source",
        Role::Destination => "destination",
    };
    Err(Error::invalid_connection(format!(
        "{} is declared as {} and can't be a connection {}.",
        path,
        port.direction(),
        role
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::test_utils::{
        pipeline_builder, TestComponent, BROKEN_CONSUMER, CONSUMER, PARTIAL_CONSUMER, PIPELINE,
        PRODUCER, RICH_CONSUMER, RICH_PIPELINE,
    };
    use crate::{ErrorKind, Value};

    fn connections(builder: &AssemblyBuilder) -> Vec<String> {
        builder.connections().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_add() -> Result<(), Error> {
        let mut builder = AssemblyBuilder::new(&PIPELINE, AssemblyConfig::default());

        builder.add("producer", TestComponent::new(&PRODUCER))?;
        assert_eq!(builder.child("producer")?.contract(), &PRODUCER);

        assert!(builder
            .add("producer", TestComponent::new(&CONSUMER))
            .is_err_and(|e| e
                == Error::duplicate_name(
                    "Component producer already exists in BasePipeline assembly."
                )));
        assert_eq!(builder.child("producer")?.contract(), &PRODUCER);

        for bad in ["", "a.b"] {
            assert!(builder
                .add(bad, TestComponent::new(&CONSUMER))
                .is_err_and(|e| e.kind() == ErrorKind::InvalidName));
        }

        assert!(builder
            .add(
                "consumer",
                TestComponent::new(&BROKEN_CONSUMER).implementing(&CONSUMER)
            )
            .is_err_and(|e| e
                == Error::contract_violation(concat!(
                    "ExtendedConsumer does not implement BaseConsumer: ",
                    "found port value (Int, in), expected value (Float, in)."
                ))));
        assert!(builder.child("consumer").is_err());

        builder.add(
            "consumer",
            TestComponent::new(&RICH_CONSUMER).implementing(&CONSUMER),
        )?;

        Ok(())
    }

    #[test]
    fn test_declare_implements() -> Result<(), Error> {
        let mut builder = AssemblyBuilder::new(&RICH_PIPELINE, AssemblyConfig::default());
        builder.declare_implements(&PIPELINE)?;

        let mut builder = AssemblyBuilder::new(&PIPELINE, AssemblyConfig::default());
        assert!(builder.declare_implements(&RICH_PIPELINE).is_err_and(|e| e
            == Error::contract_violation(concat!(
                "BasePipeline does not implement ExtendedPipeline: ",
                "missing port detail (VarTree(BOSVarTree), out)."
            ))));

        Ok(())
    }

    #[test]
    fn test_connect() -> Result<(), Error> {
        let builder = pipeline_builder()?;
        assert_eq!(
            connections(&builder),
            vec![
                "producer.value -> consumer.value",
                "producer.value -> value",
                "seed -> consumer.count",
                "consumer.result -> result",
            ]
        );

        Ok(())
    }

    #[test]
    fn test_connect_validation() -> Result<(), Error> {
        let mut builder = AssemblyBuilder::new(&PIPELINE, AssemblyConfig::default());
        builder.add("producer", TestComponent::new(&PRODUCER))?;
        builder.add("consumer", TestComponent::new(&CONSUMER))?;

        assert!(builder
            .connect("producer.value", "missing.value")
            .is_err_and(|e| e
                == Error::component_not_found(
                    "Component missing not found in BasePipeline assembly."
                )));
        assert!(builder
            .connect("producer.missing", "consumer.value")
            .is_err_and(|e| e
                == Error::unknown_port("Port producer.missing not found on BaseProducer.")));
        assert!(builder
            .connect("producer.value", "consumer.value.x")
            .is_err_and(|e| e.kind() == ErrorKind::UnknownPort));

        assert!(builder
            .connect("consumer.value", "producer.value")
            .is_err_and(|e| e
                == Error::invalid_connection(
                    "consumer.value is declared as in and can't be a connection source."
                )));
        assert!(builder
            .connect("producer.value", "seed")
            .is_err_and(|e| e
                == Error::invalid_connection(
                    "seed is declared as in and can't be a connection destination."
                )));
        assert!(builder
            .connect("result", "consumer.ratio")
            .is_err_and(|e| e
                == Error::invalid_connection(
                    "result is declared as out and can't be a connection source."
                )));
        assert!(builder
            .connect("consumer.result", "consumer.ratio")
            .is_err_and(|e| e
                == Error::invalid_connection(
                    "Connection:(consumer.result, consumer.ratio) Can't connect a component to itself."
                )));

        assert!(connections(&builder).is_empty());

        Ok(())
    }

    #[test]
    fn test_connect_boundary_to_boundary() -> Result<(), Error> {
        let mut builder = AssemblyBuilder::new(&PIPELINE, AssemblyConfig::default());
        builder.add("producer", TestComponent::new(&PRODUCER))?;

        assert!(builder.connect("seed", "result").is_err_and(|e| e
            == Error::invalid_connection(
                "Connection:(seed, result) Boundary ports must be connected to a child."
            )));
        assert!(builder
            .connect_all("producer.value", ["value", "result"])
            .is_ok());
        assert!(connections(&builder).iter().all(|c| c.starts_with("producer.")));

        Ok(())
    }

    #[test]
    fn test_connect_without_destinations() -> Result<(), Error> {
        let mut builder = pipeline_builder()?;

        assert!(builder
            .connect_all("producer.count", std::iter::empty())
            .is_err_and(|e| e
                == Error::invalid_connection("producer.count has no destinations.")));
        assert!(builder
            .connect_all("seed", Vec::new())
            .is_err_and(|e| e == Error::invalid_connection("seed has no destinations.")));
        assert_eq!(connections(&builder).len(), 4);

        Ok(())
    }

    #[test]
    fn test_type_mismatch_leaves_connections_unchanged() -> Result<(), Error> {
        let mut builder = AssemblyBuilder::new(&PIPELINE, AssemblyConfig::default());
        builder.add("producer", TestComponent::new(&PRODUCER))?;
        builder.add("consumer", TestComponent::new(&CONSUMER))?;
        builder.connect("producer.value", "consumer.value")?;

        assert!(builder
            .connect("producer.count", "consumer.ratio")
            .is_err_and(|e| e
                == Error::connection_type_mismatch(
                    "Can't connect producer.count (Int) to consumer.ratio (Float)."
                )));
        assert_eq!(connections(&builder), vec!["producer.value -> consumer.value"]);

        // A broadcast with one bad destination records none of them.
        assert!(builder
            .connect_all("seed", ["consumer.count", "consumer.ratio"])
            .is_err_and(|e| e.kind() == ErrorKind::ConnectionTypeMismatch));
        assert_eq!(connections(&builder), vec!["producer.value -> consumer.value"]);

        Ok(())
    }

    #[test]
    fn test_duplicate_connection() -> Result<(), Error> {
        let mut builder = pipeline_builder()?;

        assert!(builder
            .connect("producer.count", "consumer.count")
            .is_err_and(|e| e
                == Error::duplicate_connection("consumer.count is already connected to seed.")));
        assert!(builder
            .connect_all("producer.value", ["consumer.ratio", "consumer.ratio"])
            .is_err_and(|e| e
                == Error::duplicate_connection(
                    "consumer.ratio appears more than once in the destinations of producer.value."
                )));
        assert_eq!(connections(&builder).len(), 4);

        Ok(())
    }

    #[test]
    fn test_connection_overwrite() -> Result<(), Error> {
        let config = AssemblyConfig {
            allow_connection_overwrite: true,
            ..Default::default()
        };
        let mut builder = AssemblyBuilder::new(&PIPELINE, config);
        builder.add("producer", TestComponent::new(&PRODUCER))?;
        builder.add("consumer", TestComponent::new(&CONSUMER))?;

        builder.connect("producer.count", "consumer.count")?;
        assert!(builder.assembly.predecessors("consumer")?.any(|c| c.name() == "producer"));

        builder.connect("seed", "consumer.count")?;
        assert_eq!(connections(&builder), vec!["seed -> consumer.count"]);
        assert!(builder.assembly.predecessors("consumer")?.next().is_none());

        Ok(())
    }

    #[test]
    fn test_connect_respects_workflow() -> Result<(), Error> {
        let mut builder = AssemblyBuilder::new(&PIPELINE, AssemblyConfig::default());
        builder.add("producer", TestComponent::new(&PRODUCER))?;
        builder.add("consumer", TestComponent::new(&CONSUMER))?;
        builder.set_workflow(["consumer", "producer"])?;

        assert!(builder
            .connect("producer.value", "consumer.value")
            .is_err_and(|e| e.kind() == ErrorKind::OrderViolation));
        assert!(connections(&builder).is_empty());

        Ok(())
    }

    #[test]
    fn test_replace() -> Result<(), Error> {
        let mut builder = pipeline_builder()?;
        let before = connections(&builder);

        builder.replace(
            "consumer",
            TestComponent::new(&RICH_CONSUMER).implementing(&CONSUMER),
        )?;
        assert_eq!(builder.child("consumer")?.contract(), &RICH_CONSUMER);
        assert_eq!(connections(&builder), before);
        assert!(builder.assembly.predecessors("consumer")?.any(|c| c.name() == "producer"));
        assert!(builder.workflow().iter().eq(["producer", "consumer"]));

        assert!(builder
            .child("consumer")?
            .contract()
            .port("detail")
            .is_some());

        Ok(())
    }

    #[test]
    fn test_replace_breaking_connections() -> Result<(), Error> {
        let mut builder = pipeline_builder()?;

        assert!(builder
            .replace("consumer", TestComponent::new(&PARTIAL_CONSUMER))
            .is_err_and(|e| e
                == Error::contract_violation(
                    "Can't replace consumer with FullConsumer: connection seed -> consumer.count requires port count (Int, in)."
                )));
        assert_eq!(builder.child("consumer")?.contract(), &CONSUMER);

        assert!(builder
            .replace("missing", TestComponent::new(&CONSUMER))
            .is_err_and(|e| e.kind() == ErrorKind::ComponentNotFound));

        // ports without connections may go away.
        let mut builder = AssemblyBuilder::new(&PIPELINE, AssemblyConfig::default());
        builder.add("consumer", TestComponent::new(&CONSUMER))?;
        builder.connect("consumer.result", "result")?;
        builder.replace("consumer", TestComponent::new(&PARTIAL_CONSUMER))?;

        Ok(())
    }

    #[test]
    fn test_set_workflow() -> Result<(), Error> {
        let mut builder = pipeline_builder()?;

        assert!(builder
            .set_workflow(["consumer", "producer"])
            .is_err_and(|e| e
                == Error::order_violation(
                    "consumer is scheduled before its producer producer (producer.value -> consumer.value)."
                )));
        assert!(builder
            .set_workflow(["producer", "missing"])
            .is_err_and(|e| e.kind() == ErrorKind::ComponentNotFound));
        assert!(builder
            .set_workflow(["producer", "consumer", "producer"])
            .is_err_and(|e| e
                == Error::invalid_workflow(
                    "Component producer appears more than once in the workflow."
                )));
        assert!(builder.workflow().iter().eq(["producer", "consumer"]));

        Ok(())
    }

    #[test]
    fn test_output_values() -> Result<(), Error> {
        let mut builder = AssemblyBuilder::new(&PIPELINE, AssemblyConfig::default());
        builder.add(
            "producer",
            TestComponent::new(&PRODUCER).with_output("value", Value::Float(2.5)),
        )?;
        assert_eq!(
            builder.child("producer")?.component().output("value"),
            Some(Value::Float(2.5))
        );
        assert_eq!(builder.child("producer")?.component().output("count"), None);

        Ok(())
    }
}
