//! Force-directed graph visualization component.
//!
//! Renders an interactive network diagram on an HTML canvas:
//! - Physics-based node positioning via a CPU force simulation
//! - Node dragging (position pinning), pan, and zoom
//! - Degree-driven label visibility, with hovered labels always shown
//! - Modularity-class coloring through an ordinal palette scale
//!
//! # Example
//!
//! ```ignore
//! use sociogram::{ForceGraphCanvas, GraphData};
//!
//! let data: GraphData = serde_json::from_str(json)?;
//! data.validate()?;
//!
//! view! { <ForceGraphCanvas data=data.into() /> }
//! ```

mod component;
mod render;
pub mod scale;
pub mod simulation;
mod state;
mod types;

pub use component::ForceGraphCanvas;
pub use state::{ForceGraphState, ViewConfig};
pub use types::{ClassLabel, GraphData, GraphError, GraphLink, GraphNode};
