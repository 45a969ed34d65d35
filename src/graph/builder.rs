use std::collections::HashMap;

use indexmap::IndexMap;
use indexmap::map::Entry;
use log::debug;

use super::types::{Graph, Link, Node, NodeId, NodeKind, Relation, Role};
use crate::dataset::{Dataset, Person, Work};

/// Counters describing one build, for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
	/// Works read from the dataset.
	pub works: usize,
	/// Person references that did not resolve and were dropped.
	pub dropped_refs: usize,
	/// Casting-director references skipped because the collection is absent.
	pub skipped_casting: usize,
}

/// Person lookup for one role collection. The first record with an id wins.
struct Roster<'a> {
	relation: Relation,
	by_id: HashMap<&'a str, &'a Person>,
}

impl<'a> Roster<'a> {
	fn new(relation: Relation, people: &'a [Person]) -> Self {
		let mut by_id = HashMap::with_capacity(people.len());
		for person in people {
			by_id.entry(person.id.as_str()).or_insert(person);
		}
		Self { relation, by_id }
	}

	fn kind(&self) -> NodeKind {
		match self.relation {
			Relation::Cast => NodeKind::Actor,
			Relation::Director => NodeKind::Director,
			Relation::CastingDirector => NodeKind::CastingDirector,
		}
	}
}

struct Builder<'a> {
	nodes: IndexMap<NodeId, Node>,
	links: Vec<Link>,
	stats: BuildStats,
	actors: Roster<'a>,
	directors: Roster<'a>,
	casting: Option<Roster<'a>>,
}

impl<'a> Builder<'a> {
	fn new(dataset: &'a Dataset) -> Self {
		Self {
			nodes: IndexMap::new(),
			links: Vec::new(),
			stats: BuildStats::default(),
			actors: Roster::new(Relation::Cast, &dataset.actors),
			directors: Roster::new(Relation::Director, &dataset.directors),
			casting: dataset
				.casting_directors
				.as_deref()
				.map(|people| Roster::new(Relation::CastingDirector, people)),
		}
	}

	fn add_work(&mut self, work: &Work) {
		self.stats.works += 1;
		let work_id = NodeId::new(Role::Work, &work.id);
		if let Entry::Vacant(slot) = self.nodes.entry(work_id.clone()) {
			slot.insert(Node::new(
				work_id.clone(),
				work.title.clone(),
				NodeKind::Work {
					year: work.year,
					genre: work.genre.clone(),
				},
			));
		}

		for actor in &work.cast {
			credit(
				&mut self.nodes,
				&mut self.links,
				&mut self.stats,
				&self.actors,
				&work_id,
				actor,
			);
		}
		if let Some(director) = &work.director {
			credit(
				&mut self.nodes,
				&mut self.links,
				&mut self.stats,
				&self.directors,
				&work_id,
				director,
			);
		}
		if let Some(casting_director) = &work.casting_director {
			match &self.casting {
				Some(roster) => credit(
					&mut self.nodes,
					&mut self.links,
					&mut self.stats,
					roster,
					&work_id,
					casting_director,
				),
				None => self.stats.skipped_casting += 1,
			}
		}
	}

	fn finish(self) -> (Graph, BuildStats) {
		let graph = Graph {
			nodes: self.nodes.into_values().collect(),
			links: self.links,
		};
		(graph, self.stats)
	}
}

/// Resolve one person reference: insert the node if new and record the link.
/// Unknown ids produce neither.
fn credit(
	nodes: &mut IndexMap<NodeId, Node>,
	links: &mut Vec<Link>,
	stats: &mut BuildStats,
	roster: &Roster<'_>,
	work_id: &NodeId,
	person_id: &str,
) {
	let Some(person) = roster.by_id.get(person_id) else {
		debug!(
			"{work_id}: no {} with id {person_id:?}, dropping",
			roster.relation.target_role().as_str()
		);
		stats.dropped_refs += 1;
		return;
	};
	let target = NodeId::new(roster.relation.target_role(), &person.id);
	nodes
		.entry(target.clone())
		.or_insert_with(|| Node::new(target.clone(), person.name.clone(), roster.kind()));
	links.push(Link {
		source: work_id.clone(),
		target,
		relation: roster.relation,
	});
}

/// Build the relationship graph for a dataset.
///
/// Every work becomes a node; every resolvable credit becomes a link from the
/// work to a person node, and each person gets exactly one node per role no
/// matter how many works credit them. Unresolvable credits are dropped.
/// Nodes come out in first-seen order, links in discovery order (work by
/// work: cast, then director, then casting director).
pub fn build(dataset: &Dataset) -> Graph {
	build_with_stats(dataset).0
}

/// [`build`], also returning counters about what was dropped.
pub fn build_with_stats(dataset: &Dataset) -> (Graph, BuildStats) {
	let mut builder = Builder::new(dataset);
	for work in &dataset.projects {
		builder.add_work(work);
	}
	let (graph, stats) = builder.finish();
	debug!(
		"built graph: {} works, {} nodes, {} links, {} dropped references, {} casting credits skipped",
		stats.works,
		graph.nodes.len(),
		graph.links.len(),
		stats.dropped_refs,
		stats.skipped_casting
	);
	(graph, stats)
}
