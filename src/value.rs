// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Values carried along connections between ports.

use crate::port::PortType;
use crate::var_tree::VarTree;

/// A value produced by an output port or delivered to an input port.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Float(f64),
    Int(i64),
    Tree(VarTree),
}

impl Value {
    /// Returns the type of port that can carry the value.
    pub fn port_type(&self) -> PortType {
        match self {
            Value::Float(_) => PortType::Float,
            Value::Int(_) => PortType::Int,
            Value::Tree(tree) => PortType::Tree(tree.schema()),
        }
    }
}
