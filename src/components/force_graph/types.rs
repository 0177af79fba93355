//! Graph data structures for input to the force graph component.

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading or wiring up graph data.
///
/// All variants are fatal to the current render attempt; the caller surfaces
/// them instead of drawing a partial graph.
#[derive(Debug, Error)]
pub enum GraphError {
	/// No `<script id="graph-data">` element in the host page.
	#[error("graph data document not found in host page")]
	MissingDocument,
	/// The document was found but is not valid graph JSON.
	#[error("failed to parse graph data: {0}")]
	Parse(#[from] serde_json::Error),
	/// A link references a node id that is not in the node set.
	#[error("link references unknown node id {id:?}")]
	UnknownNode {
		/// The offending id, as written in the link record.
		id: String,
	},
}

/// A categorical cluster label, precomputed by community detection upstream.
///
/// Appears in input documents either as a bare integer or as a string.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ClassLabel {
	/// Numeric class index (the common form in exported graph files).
	Index(i64),
	/// Named class.
	Name(String),
}

impl fmt::Display for ClassLabel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ClassLabel::Index(i) => write!(f, "{i}"),
			ClassLabel::Name(s) => f.write_str(s),
		}
	}
}

/// A node in the graph: one person plus their precomputed network metrics.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier, also used as the label text and in link endpoints.
	pub id: String,
	/// Precomputed degree. Drives circle radius and label visibility.
	#[serde(default)]
	pub degree: f64,
	/// Modularity class, accepted under either key used by exporters.
	#[serde(alias = "modularityClass")]
	pub modularity: ClassLabel,
}

fn default_link_value() -> f64 {
	1.0
}

/// A relationship between two nodes, endpoints given by node id.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Relationship weight. Stroke width is the square root of this.
	#[serde(default = "default_link_value")]
	pub value: f64,
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	#[allow(missing_docs)]
	pub nodes: Vec<GraphNode>,
	#[allow(missing_docs)]
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Check that every link endpoint names a known node.
	///
	/// Called before any rendering so a dangling reference aborts the whole
	/// attempt rather than silently dropping the link.
	pub fn validate(&self) -> Result<(), GraphError> {
		let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
		for link in &self.links {
			for endpoint in [&link.source, &link.target] {
				if !ids.contains(endpoint.as_str()) {
					return Err(GraphError::UnknownNode {
						id: endpoint.clone(),
					});
				}
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_minimal_document() {
		let json = r#"{
			"nodes": [
				{"id": "George Fox", "degree": 22, "modularity": 0},
				{"id": "Margaret Fell", "degree": 13, "modularity": 1}
			],
			"links": [
				{"source": "George Fox", "target": "Margaret Fell", "value": 4}
			]
		}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.links.len(), 1);
		assert_eq!(data.nodes[0].degree, 22.0);
		assert_eq!(data.nodes[0].modularity, ClassLabel::Index(0));
		assert_eq!(data.links[0].value, 4.0);
	}

	#[test]
	fn ignores_extra_node_attributes() {
		let json = r#"{
			"nodes": [
				{"id": "a", "degree": 1, "modularity": 0,
				 "gender": "male", "birth_year": 1624, "betweenness": 0.02}
			],
			"links": []
		}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();
		assert_eq!(data.nodes[0].id, "a");
	}

	#[test]
	fn accepts_modularity_class_key_and_string_labels() {
		let json = r#"{
			"nodes": [{"id": "a", "degree": 1, "modularityClass": "cluster-3"}],
			"links": []
		}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();
		assert_eq!(
			data.nodes[0].modularity,
			ClassLabel::Name("cluster-3".into())
		);
	}

	#[test]
	fn link_value_defaults_to_one() {
		let json = r#"{
			"nodes": [
				{"id": "a", "degree": 1, "modularity": 0},
				{"id": "b", "degree": 1, "modularity": 0}
			],
			"links": [{"source": "a", "target": "b"}]
		}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();
		assert_eq!(data.links[0].value, 1.0);
	}

	#[test]
	fn malformed_document_is_a_parse_error() {
		let err = serde_json::from_str::<GraphData>("{\"nodes\": [{]}").unwrap_err();
		let err = GraphError::from(err);
		assert!(matches!(err, GraphError::Parse(_)));
	}

	#[test]
	fn validate_rejects_unknown_link_endpoint() {
		let json = r#"{
			"nodes": [{"id": "a", "degree": 1, "modularity": 0}],
			"links": [{"source": "a", "target": "ghost", "value": 1}]
		}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();
		let err = data.validate().unwrap_err();
		assert!(matches!(err, GraphError::UnknownNode { id } if id == "ghost"));
	}

	#[test]
	fn validate_accepts_fully_resolved_links() {
		let json = r#"{
			"nodes": [
				{"id": "a", "degree": 1, "modularity": 0},
				{"id": "b", "degree": 1, "modularity": 1}
			],
			"links": [{"source": "a", "target": "b", "value": 2}]
		}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();
		assert!(data.validate().is_ok());
	}
}
