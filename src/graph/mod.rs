//! Graph adapters, relatedness analysis and the force layout engine.

pub mod adapter;
pub mod crossing;
pub mod fixtures;
pub mod force;
pub mod layout;
pub mod paths;
pub mod relatedness;
pub mod types;

pub use adapter::{GraphAdapter, IntGraph};
pub use force::{Damping, Force, Strength};
pub use layout::ForceLayout;
pub use paths::UndirectedPath;
pub use relatedness::Relatedness;
pub use types::{EdgePosition, NodePosition, Point, TickStats};
