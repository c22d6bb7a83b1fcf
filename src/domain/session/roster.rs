//! Keyed, insertion-ordered attendee collection.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::attendee::Attendee;
use crate::domain::foundation::{AttendeeId, DomainError, ErrorCode};

/// Ordered set of attendees, unique by id.
///
/// Iteration follows insertion order; removal keeps the relative order of
/// the remaining attendees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Attendee>", into = "Vec<Attendee>")]
pub struct AttendeeList {
    entries: IndexMap<AttendeeId, Attendee>,
}

impl AttendeeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &AttendeeId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &AttendeeId) -> Option<&Attendee> {
        self.entries.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &AttendeeId) -> Option<&mut Attendee> {
        self.entries.get_mut(id)
    }

    /// Attendee at a position in insertion order.
    pub fn at(&self, index: usize) -> Option<&Attendee> {
        self.entries.get_index(index).map(|(_, attendee)| attendee)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attendee> {
        self.entries.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &AttendeeId> {
        self.entries.keys()
    }

    /// Appends an attendee at the end.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if an attendee with the same id is present
    pub(crate) fn push(&mut self, attendee: Attendee) -> Result<(), DomainError> {
        if self.entries.contains_key(attendee.id()) {
            return Err(DomainError::new(
                ErrorCode::AlreadyExists,
                format!("Attendee {} is already in this list", attendee.id()),
            ));
        }
        self.entries.insert(*attendee.id(), attendee);
        Ok(())
    }

    /// Removes an attendee, preserving the order of the rest.
    pub(crate) fn remove(&mut self, id: &AttendeeId) -> Option<Attendee> {
        self.entries.shift_remove(id)
    }

    /// Id of the attendee with the highest priority score.
    ///
    /// Ties go to whoever was inserted first.
    pub fn highest_priority(&self) -> Option<AttendeeId> {
        let mut best: Option<&Attendee> = None;
        for attendee in self.entries.values() {
            match best {
                Some(current) if attendee.priority_score() <= current.priority_score() => {}
                _ => best = Some(attendee),
            }
        }
        best.map(|attendee| *attendee.id())
    }
}

impl TryFrom<Vec<Attendee>> for AttendeeList {
    type Error = DomainError;

    fn try_from(attendees: Vec<Attendee>) -> Result<Self, Self::Error> {
        let mut list = Self {
            entries: IndexMap::with_capacity(attendees.len()),
        };
        for attendee in attendees {
            list.push(attendee)?;
        }
        Ok(list)
    }
}

impl From<AttendeeList> for Vec<Attendee> {
    fn from(list: AttendeeList) -> Self {
        list.entries.into_values().collect()
    }
}
