use std::fmt;

use serde::{Deserialize, Serialize};

/// Which collection a node was drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
	/// A work.
	Work,
	/// A cast member.
	Actor,
	/// A director.
	Director,
	/// A casting director.
	CastingDirector,
}

impl Role {
	/// Tag used in node identifiers and on the wire.
	pub fn as_str(self) -> &'static str {
		match self {
			Role::Work => "work",
			Role::Actor => "actor",
			Role::Director => "director",
			Role::CastingDirector => "castingDirector",
		}
	}
}

/// Kind of credit a link records. Links always run work → person.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Relation {
	/// Person appears in the cast.
	Cast,
	/// Person directed the work.
	Director,
	/// Person cast the work.
	CastingDirector,
}

impl Relation {
	/// The role of the person on the target end.
	pub fn target_role(self) -> Role {
		match self {
			Relation::Cast => Role::Actor,
			Relation::Director => Role::Director,
			Relation::CastingDirector => Role::CastingDirector,
		}
	}
}

/// Graph-wide node identifier: `<role>:<source id>`.
///
/// Source ids are only unique within their role collection, so the role
/// prefix is what keeps an actor `"7"` and a director `"7"` apart.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
	/// Compose an identifier from a role and a source-collection id.
	pub fn new(role: Role, source_id: &str) -> Self {
		Self(format!("{}:{}", role.as_str(), source_id))
	}

	/// The composed identifier.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Role-specific payload of a node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "camelCase")]
pub enum NodeKind {
	/// A work with its release year and genre.
	Work {
		/// Release year.
		year: i32,
		/// Genre label.
		genre: String,
	},
	/// An actor.
	Actor,
	/// A director.
	Director,
	/// A casting director.
	CastingDirector,
}

impl NodeKind {
	/// The role tag, without payload.
	pub fn role(&self) -> Role {
		match self {
			NodeKind::Work { .. } => Role::Work,
			NodeKind::Actor => Role::Actor,
			NodeKind::Director => Role::Director,
			NodeKind::CastingDirector => Role::CastingDirector,
		}
	}
}

/// Whether the simulation may move a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Pin {
	/// Position is governed by the forces.
	#[default]
	Free,
	/// Position is held at `(x, y)`; forces still read it but never move it.
	Pinned {
		/// Held x.
		x: f64,
		/// Held y.
		y: f64,
	},
}

impl Pin {
	/// Is the node held in place?
	pub fn is_pinned(&self) -> bool {
		matches!(self, Pin::Pinned { .. })
	}
}

/// A vertex of the relationship graph plus its physical state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	/// Graph-wide identifier.
	pub id: NodeId,
	/// Display name (a work's title or a person's name).
	pub name: String,
	/// Role and role-specific payload.
	#[serde(flatten)]
	pub kind: NodeKind,
	/// Current position.
	pub x: f64,
	/// Current position.
	pub y: f64,
	/// Current velocity.
	#[serde(skip)]
	pub vx: f64,
	/// Current velocity.
	#[serde(skip)]
	pub vy: f64,
	/// Manual position override.
	#[serde(skip)]
	pub pin: Pin,
}

impl Node {
	/// A node at rest at the origin.
	pub fn new(id: NodeId, name: impl Into<String>, kind: NodeKind) -> Self {
		Self {
			id,
			name: name.into(),
			kind,
			x: 0.0,
			y: 0.0,
			vx: 0.0,
			vy: 0.0,
			pin: Pin::Free,
		}
	}

	/// The role tag.
	pub fn role(&self) -> Role {
		self.kind.role()
	}
}

/// A directed credit from a work node to a person node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
	/// Work node.
	pub source: NodeId,
	/// Person node.
	pub target: NodeId,
	/// Kind of credit.
	pub relation: Relation,
}

/// Output of one build: the whole node and link sets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
	/// Nodes in insertion order.
	pub nodes: Vec<Node>,
	/// Links in discovery order.
	pub links: Vec<Link>,
}

impl Graph {
	/// Look a node up by id.
	pub fn node(&self, id: &NodeId) -> Option<&Node> {
		self.nodes.iter().find(|node| &node.id == id)
	}
}
