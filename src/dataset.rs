//! Input records: works and the people credited on them.

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// A creative work (film, show) and the ids of the people credited on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
	/// Identifier, unique among works.
	pub id: String,
	/// Display title.
	pub title: String,
	/// Release year.
	pub year: i32,
	/// Genre label.
	pub genre: String,
	/// Actor ids, in billing order.
	#[serde(default)]
	pub cast: Vec<String>,
	/// Director id, if credited.
	#[serde(default)]
	pub director: Option<String>,
	/// Casting director id, if credited.
	#[serde(default)]
	pub casting_director: Option<String>,
}

/// A person in one role collection. Ids are only unique within that collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
	/// Identifier within the role collection.
	pub id: String,
	/// Display name.
	pub name: String,
}

/// The whole document: works plus one person collection per role.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
	/// All works.
	pub projects: Vec<Work>,
	/// Actor collection.
	#[serde(default)]
	pub actors: Vec<Person>,
	/// Director collection.
	#[serde(default)]
	pub directors: Vec<Person>,
	/// Casting director collection. `None` means no casting relations exist at all.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub casting_directors: Option<Vec<Person>>,
}

impl Dataset {
	/// Parse a dataset document.
	pub fn from_json(text: &str) -> Result<Self, LoadError> {
		Ok(serde_json::from_str(text)?)
	}
}

impl Person {
	/// Convenience constructor.
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
		}
	}
}

impl Work {
	/// A work with no credits; fill in `cast`, `director` and
	/// `casting_director` as needed.
	pub fn new(
		id: impl Into<String>,
		title: impl Into<String>,
		year: i32,
		genre: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			title: title.into(),
			year,
			genre: genre.into(),
			cast: Vec::new(),
			director: None,
			casting_director: None,
		}
	}
}
