//! sociogram: Interactive force-directed social network visualization.
//!
//! This crate provides a WASM-based network diagram component that lays out
//! nodes (people) and links (relationships) with a physics simulation,
//! supports node dragging, and sizes/colors nodes from precomputed network
//! metrics (degree, modularity class).

use leptos::either::Either;
use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, error, info};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::force_graph::{
	ForceGraphCanvas, GraphData, GraphError, GraphLink, GraphNode,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("sociogram: logging initialized");
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], links: [...] }
///
/// Parse failures and dangling link references are fatal; the caller shows
/// an error panel instead of the canvas.
fn load_graph_data() -> Result<GraphData, GraphError> {
	let json_text = web_sys::window()
		.and_then(|w: Window| w.document())
		.and_then(|d| d.get_element_by_id("graph-data"))
		.and_then(|e| e.dyn_into::<HtmlScriptElement>().ok())
		.and_then(|s| s.text().ok())
		.ok_or(GraphError::MissingDocument)?;

	let data: GraphData = serde_json::from_str(&json_text)?;
	data.validate()?;
	info!(
		"sociogram: loaded {} nodes, {} links",
		data.nodes.len(),
		data.links.len()
	);
	Ok(data)
}

/// Main application component.
/// Loads graph data from the DOM and renders the force-directed network,
/// or an error panel if the document is missing, malformed, or inconsistent.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let body = match load_graph_data() {
		Ok(data) => {
			let graph_signal = Signal::derive(move || data.clone());
			Either::Left(view! {
				<div class="fullscreen-graph">
					<ForceGraphCanvas data=graph_signal fullscreen=true />
					<div class="graph-overlay">
						<h1>"Network Explorer"</h1>
						<p class="subtitle">
							"Drag nodes to reposition. Scroll to zoom. Drag background to pan."
						</p>
					</div>
				</div>
			})
		}
		Err(e) => {
			error!("sociogram: {e}");
			let message = e.to_string();
			Either::Right(view! {
				<div class="graph-error">
					<h1>"Could not load the network"</h1>
					<p>{message}</p>
				</div>
			})
		}
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Network Explorer" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		{body}
	}
}
