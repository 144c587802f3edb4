// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines ports, the named and typed slots through which
//! components exchange values, and the paths used to address them inside an
//! assembly.

use std::fmt::Display;

use crate::var_tree::TreeSchema;
use crate::Error;

/// The direction of a port, seen from the component that declares it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    In,
    Out,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::In => write!(f, "in"),
            Direction::Out => write!(f, "out"),
        }
    }
}

/// The type of the values carried by a port.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PortType {
    Float,
    Int,
    /// A variable tree of the given schema.
    Tree(&'static TreeSchema),
}

impl Display for PortType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortType::Float => write!(f, "Float"),
            PortType::Int => write!(f, "Int"),
            PortType::Tree(schema) => write!(f, "VarTree({})", schema),
        }
    }
}

/// A named and typed input or output of a component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Port {
    name: &'static str,
    direction: Direction,
    port_type: PortType,
    desc: &'static str,
}

impl Port {
    /// Declares an input port.
    pub const fn input(name: &'static str, port_type: PortType, desc: &'static str) -> Self {
        Self {
            name,
            direction: Direction::In,
            port_type,
            desc,
        }
    }

    /// Declares an output port.
    pub const fn output(name: &'static str, port_type: PortType, desc: &'static str) -> Self {
        Self {
            name,
            direction: Direction::Out,
            port_type,
            desc,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn port_type(&self) -> PortType {
        self.port_type
    }

    pub fn desc(&self) -> &'static str {
        self.desc
    }

    /// Returns true if both ports have the same name, direction and type.
    ///
    /// Descriptions are not part of the signature.
    pub fn same_signature(&self, other: &Port) -> bool {
        self.name == other.name
            && self.direction == other.direction
            && self.port_type == other.port_type
    }
}

impl Display for Port {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.port_type, self.direction)
    }
}

/// The address of a port inside an assembly.
///
/// `"child.port"` addresses a port of the child named `child`, while a bare
/// `"port"` addresses a port on the boundary of the assembly itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortPath {
    component: Option<String>,
    port: String,
}

impl PortPath {
    /// Parses a port path.
    pub fn parse(path: &str) -> Result<Self, Error> {
        let invalid = || Error::unknown_port(format!("Invalid port path: {path:?}."));

        let (component, port) = match path.split_once('.') {
            Some((component, port)) => (Some(component), port),
            None => (None, path),
        };
        if port.is_empty() || port.contains('.') || component.is_some_and(str::is_empty) {
            return Err(invalid());
        }

        Ok(Self {
            component: component.map(str::to_string),
            port: port.to_string(),
        })
    }

    /// Creates a path to a port on the boundary of the assembly.
    pub fn boundary(port: impl Into<String>) -> Self {
        Self {
            component: None,
            port: port.into(),
        }
    }

    /// Creates a path to a port of the child with the given name.
    pub fn child(component: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            component: Some(component.into()),
            port: port.into(),
        }
    }

    /// Returns the name of the child, or `None` for a boundary port.
    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    /// Returns the name of the port.
    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn is_boundary(&self) -> bool {
        self.component.is_none()
    }
}

impl Display for PortPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.component {
            Some(component) => write!(f, "{}.{}", component, self.port),
            None => write!(f, "{}", self.port),
        }
    }
}
