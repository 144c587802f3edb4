// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The turbine capital cost model contract.

use crate::{Component, Contract, Port, PortType, Tier, Value};

const PORTS: &[Port] = &[Port::output(
    "turbine_cost",
    PortType::Float,
    "Overall wind turbine capital costs including transportation costs",
)];

/// Contract of a turbine capital cost model.
pub static BASE_TURBINE_COST_MODEL: Contract =
    Contract::new("TurbineCostModel", Tier::Base, PORTS);

/// A turbine capital cost model, holding the cost computed for it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BaseTurbineCostModel {
    pub turbine_cost: f64,
}

impl Component for BaseTurbineCostModel {
    fn contract(&self) -> &'static Contract {
        &BASE_TURBINE_COST_MODEL
    }

    fn output(&self, port: &str) -> Option<Value> {
        match port {
            "turbine_cost" => Some(Value::Float(self.turbine_cost)),
            _ => None,
        }
    }
}
