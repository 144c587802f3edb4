// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the configuration options for the `AssemblyBuilder`.

/// Configuration options for the `AssemblyBuilder`.
#[derive(Clone, Default, Debug)]
pub struct AssemblyConfig {
    /// Whether a connection may replace the existing source of a destination
    /// port that is already connected.  When this is `false`, such
    /// connections are rejected with a `DuplicateConnection` error.
    pub allow_connection_overwrite: bool,

    /// Whether to reject children that are not part of the workflow of the
    /// assembly.  When this is `false`, the workflow may cover a subset of
    /// the children, and the others are never executed by a scheduler.
    pub reject_unscheduled_children: bool,
}
