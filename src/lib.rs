//! Force-directed graph layout driven by path relatedness.
//!
//! Nodes are pulled together or pushed apart depending on their degree,
//! how strongly they are related through undirected paths, and whether
//! they form parent/child pairs. The caller owns the tick loop: build a
//! [`ForceLayout`] from any [`GraphAdapter`], call
//! [`ForceLayout::iterate`] as often as it likes, and read positions back
//! after each tick.

pub mod error;
pub mod graph;
pub mod settings;

pub use error::{Error, Result};
pub use graph::{
    Damping, EdgePosition, Force, ForceLayout, GraphAdapter, IntGraph, NodePosition, Point,
    Relatedness, Strength, TickStats, UndirectedPath,
};
pub use settings::LayoutSettings;
