use std::collections::{BTreeSet, HashSet};

use credits_graph_canvas::dataset::{Dataset, Person, Work};
use credits_graph_canvas::graph::{Relation, Role, build, build_with_stats};
use proptest::prelude::*;

// linked for the library, unused here
use indexmap as _;
use log as _;
use rand as _;
use serde as _;
use serde_json as _;
use thiserror as _;

type Credits = (Vec<String>, Option<String>, Option<String>);

fn people(ids: BTreeSet<String>, label: &str) -> Vec<Person> {
	ids.into_iter()
		.map(|id| {
			let name = format!("{label} {id}");
			Person::new(id, name)
		})
		.collect()
}

/// Small id alphabets so references collide across works and some of them
/// miss their collection.
fn dataset() -> impl Strategy<Value = Dataset> {
	let credits = (
		prop::collection::vec("[a-f]", 0..5),
		prop::option::of("[a-c]"),
		prop::option::of("[a-c]"),
	);
	(
		prop::collection::vec(credits, 0..6),
		prop::collection::btree_set("[a-e]", 0..5),
		prop::collection::btree_set("[a-b]", 0..3),
		prop::option::of(prop::collection::btree_set("[a-c]", 0..3)),
	)
		.prop_map(|(works, actors, directors, casting)| Dataset {
			projects: works
				.into_iter()
				.enumerate()
				.map(|(i, (cast, director, casting_director)): (usize, Credits)| {
					let mut work =
						Work::new(format!("w{i}"), format!("Work {i}"), 2000 + i as i32, "Drama");
					work.cast = cast;
					work.director = director;
					work.casting_director = casting_director;
					work
				})
				.collect(),
			actors: people(actors, "Actor"),
			directors: people(directors, "Director"),
			casting_directors: casting.map(|ids| people(ids, "Casting")),
		})
}

fn ids(people: &[Person]) -> HashSet<&str> {
	people.iter().map(|p| p.id.as_str()).collect()
}

proptest! {
	#[test]
	fn node_ids_are_unique(dataset in dataset()) {
		let graph = build(&dataset);
		let unique: HashSet<_> = graph.nodes.iter().map(|n| &n.id).collect();
		prop_assert_eq!(unique.len(), graph.nodes.len());
	}

	#[test]
	fn every_link_joins_a_work_to_the_right_role(dataset in dataset()) {
		let graph = build(&dataset);
		for link in &graph.links {
			let source = graph.node(&link.source);
			let target = graph.node(&link.target);
			prop_assert!(source.is_some(), "dangling source {}", link.source);
			prop_assert!(target.is_some(), "dangling target {}", link.target);
			prop_assert_eq!(source.map(|n| n.role()), Some(Role::Work));
			prop_assert_eq!(target.map(|n| n.role()), Some(link.relation.target_role()));
		}
	}

	#[test]
	fn every_reference_is_linked_dropped_or_skipped(dataset in dataset()) {
		let (graph, stats) = build_with_stats(&dataset);
		let actors = ids(&dataset.actors);
		let directors = ids(&dataset.directors);
		let casting = dataset.casting_directors.as_deref().map(ids);

		let mut expected_links = 0;
		let mut total_refs = 0;
		for work in &dataset.projects {
			total_refs += work.cast.len();
			expected_links += work.cast.iter().filter(|id| actors.contains(id.as_str())).count();
			if let Some(director) = &work.director {
				total_refs += 1;
				expected_links += usize::from(directors.contains(director.as_str()));
			}
			if let Some(casting_director) = &work.casting_director {
				total_refs += 1;
				if let Some(casting) = &casting {
					expected_links += usize::from(casting.contains(casting_director.as_str()));
				}
			}
		}

		prop_assert_eq!(graph.links.len(), expected_links);
		prop_assert_eq!(stats.works, dataset.projects.len());
		prop_assert_eq!(graph.links.len() + stats.dropped_refs + stats.skipped_casting, total_refs);
		if dataset.casting_directors.is_none() {
			prop_assert!(graph.links.iter().all(|l| l.relation != Relation::CastingDirector));
		}
	}

	#[test]
	fn one_node_per_referenced_person(dataset in dataset()) {
		let graph = build(&dataset);
		let actors = ids(&dataset.actors);
		let referenced: HashSet<&str> = dataset
			.projects
			.iter()
			.flat_map(|w| w.cast.iter().map(String::as_str))
			.filter(|id| actors.contains(id))
			.collect();
		let actor_nodes = graph.nodes.iter().filter(|n| n.role() == Role::Actor).count();
		prop_assert_eq!(actor_nodes, referenced.len());

		let work_nodes = graph.nodes.iter().filter(|n| n.role() == Role::Work).count();
		prop_assert_eq!(work_nodes, dataset.projects.len());
	}

	#[test]
	fn rebuilding_gives_the_same_graph(dataset in dataset()) {
		prop_assert_eq!(build(&dataset), build(&dataset));
	}
}

#[test]
fn shared_ids_across_roles_stay_separate() {
	let mut work = Work::new("x", "Same Id", 2020, "Drama");
	work.cast = vec!["x".into()];
	work.director = Some("x".into());
	work.casting_director = Some("x".into());
	let dataset = Dataset {
		projects: vec![work],
		actors: vec![Person::new("x", "Actor X")],
		directors: vec![Person::new("x", "Director X")],
		casting_directors: Some(vec![Person::new("x", "Casting X")]),
	};

	let graph = build(&dataset);
	let roles: HashSet<Role> = graph.nodes.iter().map(|n| n.role()).collect();
	assert_eq!(graph.nodes.len(), 4);
	assert_eq!(roles.len(), 4);
	assert_eq!(graph.links.len(), 3);
}
