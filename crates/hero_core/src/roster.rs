//! The team roster: an ordered weight vector with unique names.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single team member and their current lottery weight.
///
/// The serialized field keeps the legacy name `count` so existing
/// `config.json` files keep working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    #[serde(rename = "count")]
    pub weight: f64,
}

impl Participant {
    pub fn new(name: &str, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            weight,
        }
    }
}

/// Ordered collection of participants.
///
/// Names are case-sensitive identity keys and must be unique; order is
/// preserved across serialization so the stored file stays stable.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Roster {
    members: Vec<Participant>,
}

impl Roster {
    /// Build a roster, rejecting duplicate names.
    pub fn new(members: Vec<Participant>) -> Result<Self> {
        for (i, member) in members.iter().enumerate() {
            if members[..i].iter().any(|m| m.name == member.name) {
                return Err(Error::DuplicateParticipant {
                    name: member.name.clone(),
                });
            }
        }
        Ok(Self { members })
    }

    /// Fresh roster with the same starting weight for everyone.
    pub fn uniform(names: &[String], weight: f64) -> Result<Self> {
        Self::new(
            names
                .iter()
                .map(|name| Participant::new(name, weight))
                .collect(),
        )
    }

    pub fn members(&self) -> &[Participant] {
        &self.members
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Participant> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Overwrite one participant's weight in place.
    pub fn set_weight(&mut self, name: &str, weight: f64) -> Result<()> {
        match self.members.iter_mut().find(|m| m.name == name) {
            Some(member) => {
                member.weight = weight;
                Ok(())
            }
            None => Err(Error::UnknownParticipant {
                name: name.to_string(),
            }),
        }
    }
}
