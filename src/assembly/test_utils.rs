// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module is only compiled when running unit tests and contains features
//! that are shared by all tests of the crate.
//!
//! - the `TestComponent` type, which implements the `Component` trait for any
//!   contract, and the test contracts used with it.
//! - `pipeline_builder` and `pipeline`, which configure a small two-child
//!   assembly.
//! - `run`, a minimal sequential scheduler that follows the execution plan of
//!   an assembly and records what it delivers and executes.

use std::collections::HashMap;

use crate::var_tree::BOS_VAR_TREE;
use crate::{
    Assembly, AssemblyBuilder, AssemblyConfig, Component, Contract, Error, Port, PortPath,
    PortType, Tier, Value,
};

const VALUE_OUT: Port = Port::output("value", PortType::Float, "A value");
const COUNT_OUT: Port = Port::output("count", PortType::Int, "A count");
const VALUE_IN: Port = Port::input("value", PortType::Float, "A value");
const COUNT_IN: Port = Port::input("count", PortType::Int, "A count");
const RATIO_IN: Port = Port::input("ratio", PortType::Float, "A ratio");
const RESULT_OUT: Port = Port::output("result", PortType::Float, "The result");
const DETAIL_OUT: Port = Port::output("detail", PortType::Tree(&BOS_VAR_TREE), "Details");
const SEED_IN: Port = Port::input("seed", PortType::Int, "The seed");

const PRODUCER_PORTS: &[Port] = &[VALUE_OUT, COUNT_OUT];
pub(crate) static PRODUCER: Contract = Contract::new("Producer", Tier::Base, PRODUCER_PORTS);

const CONSUMER_PORTS: &[Port] = &[VALUE_IN, COUNT_IN, RATIO_IN, RESULT_OUT];
pub(crate) static CONSUMER: Contract = Contract::new("Consumer", Tier::Base, CONSUMER_PORTS);

const RICH_CONSUMER_PORTS: &[Port] = &[VALUE_IN, COUNT_IN, RATIO_IN, RESULT_OUT, DETAIL_OUT];
pub(crate) static RICH_CONSUMER: Contract =
    Contract::new("Consumer", Tier::Extended, RICH_CONSUMER_PORTS);

const BROKEN_CONSUMER_PORTS: &[Port] = &[
    Port::input("value", PortType::Int, "A value"),
    COUNT_IN,
    RATIO_IN,
    RESULT_OUT,
];
pub(crate) static BROKEN_CONSUMER: Contract =
    Contract::new("Consumer", Tier::Extended, BROKEN_CONSUMER_PORTS);

const PARTIAL_CONSUMER_PORTS: &[Port] = &[VALUE_IN, RESULT_OUT];
pub(crate) static PARTIAL_CONSUMER: Contract =
    Contract::new("Consumer", Tier::Full, PARTIAL_CONSUMER_PORTS);

const PIPELINE_PORTS: &[Port] = &[
    SEED_IN,
    RESULT_OUT,
    Port::output("value", PortType::Float, "The produced value"),
];
pub(crate) static PIPELINE: Contract = Contract::new("Pipeline", Tier::Base, PIPELINE_PORTS);

const RICH_PIPELINE_PORTS: &[Port] = &[
    SEED_IN,
    RESULT_OUT,
    Port::output("value", PortType::Float, "The produced value"),
    DETAIL_OUT,
];
pub(crate) static RICH_PIPELINE: Contract =
    Contract::new("Pipeline", Tier::Extended, RICH_PIPELINE_PORTS);

/// A component with any contract, holding fixed output values.
pub(crate) struct TestComponent {
    contract: &'static Contract,
    implements: Vec<&'static Contract>,
    outputs: Vec<(&'static str, Value)>,
}

impl TestComponent {
    pub(crate) fn new(contract: &'static Contract) -> Self {
        Self {
            contract,
            implements: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Claims that the component implements the given base contract.
    pub(crate) fn implementing(mut self, base: &'static Contract) -> Self {
        self.implements.push(base);
        self
    }

    /// Sets the value the component reports for the given output.
    pub(crate) fn with_output(mut self, port: &'static str, value: Value) -> Self {
        self.outputs.push((port, value));
        self
    }
}

impl Component for TestComponent {
    fn contract(&self) -> &'static Contract {
        self.contract
    }

    fn implements(&self) -> Vec<&'static Contract> {
        self.implements.clone()
    }

    fn output(&self, port: &str) -> Option<Value> {
        self.outputs
            .iter()
            .find(|(name, _)| *name == port)
            .map(|(_, value)| value.clone())
    }
}

/// Configures a `producer` feeding a `consumer`, with the producer's value
/// also broadcast to the `value` boundary output.
pub(crate) fn pipeline_builder() -> Result<AssemblyBuilder, Error> {
    let mut builder = AssemblyBuilder::new(&PIPELINE, AssemblyConfig::default());
    builder.add(
        "consumer",
        TestComponent::new(&CONSUMER).with_output("result", Value::Float(10.0)),
    )?;
    builder.add(
        "producer",
        TestComponent::new(&PRODUCER)
            .with_output("value", Value::Float(2.5))
            .with_output("count", Value::Int(3)),
    )?;
    builder.set_workflow(["producer", "consumer"])?;
    builder.connect_all("producer.value", ["consumer.value", "value"])?;
    builder.connect("seed", "consumer.count")?;
    builder.connect("consumer.result", "result")?;
    Ok(builder)
}

pub(crate) fn pipeline() -> Result<Assembly, Error> {
    pipeline_builder()?.build()
}

/// Something the test scheduler did.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Event {
    Deliver { destination: PortPath, value: Value },
    Execute(String),
}

/// Executes the plan of the given assembly in order, delivering the value of
/// each connection before its consumer executes, and the boundary outputs at
/// the end.
///
/// Values come from the given boundary inputs and from the outputs the
/// children report.  Connections without a value are skipped.
pub(crate) fn run(assembly: &Assembly, boundary_inputs: &[(&str, Value)]) -> Vec<Event> {
    let boundary_inputs = boundary_inputs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect::<HashMap<_, _>>();

    let value_of = |source: &PortPath| match source.component() {
        Some(name) => assembly
            .child(name)
            .ok()
            .and_then(|child| child.component().output(source.port())),
        None => boundary_inputs.get(source.port()).cloned(),
    };

    let mut events = Vec::new();
    for step in assembly.steps() {
        for connection in step.inputs() {
            if let Some(value) = value_of(connection.source()) {
                events.push(Event::Deliver {
                    destination: connection.destination().clone(),
                    value,
                });
            }
        }
        events.push(Event::Execute(step.child().name().to_string()));
    }
    for connection in assembly.boundary_outputs() {
        if let Some(value) = value_of(connection.source()) {
            events.push(Event::Deliver {
                destination: connection.destination().clone(),
                value,
            });
        }
    }
    events
}
