// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Capital expenditure aggregation, combining turbine and balance of station
//! costs into the overall plant CAPEX.

use super::bos::base_bos_cost_model;
use super::turbine::BaseTurbineCostModel;
use crate::{
    Assembly, AssemblyBuilder, AssemblyConfig, Component, Contract, Error, Port, PortType, Tier,
    Value,
};

const TURBINE_NUMBER: Port = Port::input(
    "turbine_number",
    PortType::Int,
    "Number of turbines at plant",
);
const CAPEX: Port = Port::output(
    "capex",
    PortType::Float,
    "Overall wind plant capital expenditures including turbine and balance of station costs",
);

const AGGREGATOR_PORTS: &[Port] = &[
    Port::input("turbine_cost", PortType::Float, "A wind turbine capital cost"),
    Port::input("bos_costs", PortType::Float, "A wind plant balance of station cost"),
    TURBINE_NUMBER,
    CAPEX,
];
const MODEL_PORTS: &[Port] = &[TURBINE_NUMBER, CAPEX];

/// Contract of an aggregator combining turbine and balance of station costs.
pub static BASE_CAPEX_AGGREGATOR: Contract =
    Contract::new("CAPEXAggregator", Tier::Base, AGGREGATOR_PORTS);

/// Boundary contract of a plant CAPEX model.
pub static BASE_CAPEX_MODEL: Contract = Contract::new("CAPEXModel", Tier::Base, MODEL_PORTS);

/// The default CAPEX aggregator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BaseCapexAggregator {
    pub capex: f64,
}

impl Component for BaseCapexAggregator {
    fn contract(&self) -> &'static Contract {
        &BASE_CAPEX_AGGREGATOR
    }

    fn output(&self, port: &str) -> Option<Value> {
        match port {
            "capex" => Some(Value::Float(self.capex)),
            _ => None,
        }
    }
}

/// Adds a turbine cost model `tcc`, a base balance of station cost model
/// `bos` and a CAPEX aggregator `cap_ex`, and wires them together.
///
/// The `turbine_number` boundary input is broadcast to both `bos` and
/// `cap_ex`.  The models are placeholders, to be replaced by actual models.
pub fn configure_capex(assembly: &mut AssemblyBuilder) -> Result<(), Error> {
    assembly.add("tcc", BaseTurbineCostModel::default())?;
    assembly.add("bos", base_bos_cost_model()?)?;
    assembly.add("cap_ex", BaseCapexAggregator::default())?;

    assembly.set_workflow(["tcc", "bos", "cap_ex"])?;

    assembly.connect_all("turbine_number", ["bos.turbine_number", "cap_ex.turbine_number"])?;
    assembly.connect("tcc.turbine_cost", "cap_ex.turbine_cost")?;
    assembly.connect("bos.bos_costs", "cap_ex.bos_costs")?;

    assembly.connect("cap_ex.capex", "capex")?;

    Ok(())
}

/// Builds a [`BASE_CAPEX_MODEL`] assembly.
pub fn capex_model() -> Result<Assembly, Error> {
    let mut assembly = AssemblyBuilder::new(&BASE_CAPEX_MODEL, AssemblyConfig::default());
    configure_capex(&mut assembly)?;
    assembly.build()
}
