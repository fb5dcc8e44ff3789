//! Star-shaped domain graph: one centre word linked to every related word.

use std::ops::Range;

use rand::Rng;

use crate::relations::{RelationKind, Relations};

/// Reserved id of the centre node.
pub const CENTER_ID: &str = "center";
/// Fixed radius of the centre node.
pub const CENTER_RADIUS: f64 = 45.0;
/// Range leaf radii are drawn from.
pub const LEAF_RADIUS: Range<f64> = 30.0..40.0;

/// What a node stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
	/// The queried word.
	Center,
	/// A synonym leaf.
	Synonym,
	/// An antonym leaf.
	Antonym,
}

impl From<RelationKind> for Role {
	fn from(kind: RelationKind) -> Self {
		match kind {
			RelationKind::Synonym => Role::Synonym,
			RelationKind::Antonym => Role::Antonym,
		}
	}
}

/// A word bubble.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Unique within the graph.
	pub id: String,
	/// Word shown on the bubble.
	pub label: String,
	/// Centre or leaf kind.
	pub role: Role,
	/// Bubble radius.
	pub radius: f64,
}

/// Edge between the centre and one leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
	/// Always [`CENTER_ID`].
	pub source: String,
	/// Leaf id.
	pub target: String,
	/// Matches the leaf's role.
	pub kind: RelationKind,
}

/// Centre node first, then synonym leaves, then antonym leaves.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	/// Nodes, centre at index 0.
	pub nodes: Vec<Node>,
	/// One link per leaf.
	pub links: Vec<Link>,
}

impl Graph {
	/// Index of the node with `id`.
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.nodes.iter().position(|n| n.id == id)
	}

	/// The centre node.
	pub fn center(&self) -> Option<&Node> {
		self.nodes.iter().find(|n| n.role == Role::Center)
	}

	/// Every leaf node.
	pub fn leaves(&self) -> impl Iterator<Item = &Node> {
		self.nodes.iter().filter(|n| n.role != Role::Center)
	}
}

fn leaf_id(kind: RelationKind, index: usize) -> String {
	match kind {
		RelationKind::Synonym => format!("syn-{index}"),
		RelationKind::Antonym => format!("ant-{index}"),
	}
}

/// Builds the star graph for `center` and its related words.
///
/// Leaf radii are drawn from `rng` on every call.
pub fn build_graph<R: Rng>(center: &str, relations: &Relations, rng: &mut R) -> Graph {
	let mut graph = Graph {
		nodes: Vec::with_capacity(1 + relations.len()),
		links: Vec::with_capacity(relations.len()),
	};
	graph.nodes.push(Node {
		id: CENTER_ID.to_string(),
		label: center.to_string(),
		role: Role::Center,
		radius: CENTER_RADIUS,
	});

	for kind in [RelationKind::Synonym, RelationKind::Antonym] {
		for (i, word) in relations.words(kind).iter().enumerate() {
			let id = leaf_id(kind, i);
			graph.nodes.push(Node {
				id: id.clone(),
				label: word.clone(),
				role: kind.into(),
				radius: rng.gen_range(LEAF_RADIUS),
			});
			graph.links.push(Link {
				source: CENTER_ID.to_string(),
				target: id,
				kind,
			});
		}
	}
	graph
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn felice() -> Relations {
		Relations::new(
			vec!["contento".into(), "allegro".into()],
			vec!["triste".into()],
		)
	}

	#[test]
	fn felice_builds_four_nodes_three_links() {
		let mut rng = StdRng::seed_from_u64(7);
		let graph = build_graph("felice", &felice(), &mut rng);
		assert_eq!(graph.nodes.len(), 4);
		assert_eq!(graph.links.len(), 3);
		assert_eq!(graph.center().map(|n| n.label.as_str()), Some("felice"));

		let kinds: Vec<_> = graph.links.iter().map(|l| (l.target.as_str(), l.kind)).collect();
		assert_eq!(
			kinds,
			vec![
				("syn-0", RelationKind::Synonym),
				("syn-1", RelationKind::Synonym),
				("ant-0", RelationKind::Antonym),
			]
		);
	}

	#[test]
	fn every_link_is_center_to_existing_leaf() {
		let mut rng = StdRng::seed_from_u64(1);
		let rel = Relations::new(
			(0..20).map(|i| format!("s{i}")).collect(),
			(0..15).map(|i| format!("a{i}")).collect(),
		);
		let graph = build_graph("parola", &rel, &mut rng);
		assert_eq!(graph.nodes.len(), 1 + 20 + 15);
		assert_eq!(graph.links.len(), 20 + 15);
		for link in &graph.links {
			assert_eq!(link.source, CENTER_ID);
			let leaf = &graph.nodes[graph.index_of(&link.target).unwrap()];
			assert_eq!(leaf.role, Role::from(link.kind));
		}
		let leaf_ids: Vec<_> = graph.leaves().map(|n| n.id.as_str()).collect();
		assert!(!leaf_ids.contains(&CENTER_ID));
	}

	#[test]
	fn empty_relations_yield_center_only() {
		let mut rng = StdRng::seed_from_u64(3);
		let graph = build_graph("vuoto", &Relations::default(), &mut rng);
		assert_eq!(graph.nodes.len(), 1);
		assert!(graph.links.is_empty());
		assert_eq!(graph.nodes[0].radius, CENTER_RADIUS);
	}

	#[test]
	fn rebuild_keeps_structure_and_rerolls_radii() {
		let mut rng = StdRng::seed_from_u64(11);
		let a = build_graph("felice", &felice(), &mut rng);
		let b = build_graph("felice", &felice(), &mut rng);
		let shape = |g: &Graph| {
			g.nodes
				.iter()
				.map(|n| (n.id.clone(), n.role))
				.collect::<Vec<_>>()
		};
		assert_eq!(shape(&a), shape(&b));
		assert_eq!(a.links, b.links);
		assert_ne!(
			a.leaves().map(|n| n.radius).collect::<Vec<_>>(),
			b.leaves().map(|n| n.radius).collect::<Vec<_>>()
		);
	}

	#[test]
	fn same_seed_same_radii() {
		let a = build_graph("felice", &felice(), &mut StdRng::seed_from_u64(5));
		let b = build_graph("felice", &felice(), &mut StdRng::seed_from_u64(5));
		assert_eq!(a, b);
	}

	#[test]
	fn leaf_radii_in_range() {
		let mut rng = StdRng::seed_from_u64(9);
		let graph = build_graph("felice", &felice(), &mut rng);
		for leaf in graph.leaves() {
			assert!(LEAF_RADIUS.contains(&leaf.radius));
		}
	}
}
