//! Clubs and events as read from chain.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{fields, object::ObjectData};

/// Move module holding the `Club` struct.
pub const CLUB_MODULE: &str = "club";
/// Move module holding the `Event` struct.
pub const EVENT_MODULE: &str = "event";

/// A campus club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    /// Club object id.
    pub id: String,
    /// Address of the admin wallet owning the club.
    pub owner: String,
    /// Display name.
    pub name: String,
    /// Free text description.
    pub description: String,
    /// Ids of the club's events.
    pub events: Vec<String>,
}

impl Club {
    /// Parse a club from its Move fields. Returns `None` when the fields carry no name,
    /// which means the value is not a club.
    ///
    /// `fallback_id` is used when the fields do not carry their own `id`.
    #[must_use]
    pub fn from_fields(fields: &Value, fallback_id: Option<&str>) -> Option<Self> {
        let name = fields::string(fields, "name")?;
        let id = fields::id(fields, "id").or_else(|| fallback_id.map(ToString::to_string))?;
        let mut events = fields::id_list(fields, "events");
        fields::dedup_ids(&mut events);

        Some(Self {
            id,
            owner: fields::string(fields, "owner")
                .or_else(|| fields::string(fields, "admin"))
                .unwrap_or_default(),
            name,
            description: fields::string(fields, "description").unwrap_or_default(),
            events,
        })
    }

    /// Parse a club object.
    #[must_use]
    pub fn from_object(object: &ObjectData) -> Option<Self> {
        let mut club = Self::from_fields(object.fields(), Some(&object.object_id))?;
        // Owned clubs carry no owner field, the object owner is authoritative then.
        if club.owner.is_empty() {
            if let Some(owner) = object.owner_address() {
                club.owner = owner.to_string();
            }
        }
        Some(club)
    }
}

/// A club event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event object id.
    pub id: String,
    /// Club the event belongs to.
    pub club_id: String,
    /// Address that created the event.
    pub created_by: String,
    /// Title.
    pub title: String,
    /// Free text description.
    pub description: String,
    /// Start time, unix milliseconds.
    pub date: u64,
    /// Addresses that joined.
    pub participants: Vec<String>,
}

impl Event {
    /// Parse an event from its Move fields. Returns `None` when the fields carry no
    /// title.
    #[must_use]
    pub fn from_fields(fields: &Value, fallback_id: Option<&str>) -> Option<Self> {
        let title = fields::string(fields, "title")?;
        let id = fields::id(fields, "id").or_else(|| fallback_id.map(ToString::to_string))?;
        let mut participants = fields::id_list(fields, "participants");
        fields::dedup_ids(&mut participants);

        Some(Self {
            id,
            club_id: fields::id(fields, "club_id").unwrap_or_default(),
            created_by: fields::string(fields, "created_by").unwrap_or_default(),
            title,
            description: fields::string(fields, "description").unwrap_or_default(),
            date: fields::u64_field(fields, "date").unwrap_or_default(),
            participants,
        })
    }

    /// Parse an event object.
    #[must_use]
    pub fn from_object(object: &ObjectData) -> Option<Self> {
        Self::from_fields(object.fields(), Some(&object.object_id))
    }

    /// Whether `address` joined the event.
    #[must_use]
    pub fn has_participant(&self, address: &str) -> bool {
        self.participants
            .iter()
            .any(|p| fields::same_address(p, address))
    }
}

/// `<package>::<module>::<name>` type string.
#[must_use]
pub fn struct_type(package_id: &str, module: &str, name: &str) -> String {
    format!("{package_id}::{module}::{name}")
}

/// Whether a Move type names `<module>::<name>`, ignoring the package and any type
/// parameters.
#[must_use]
pub fn is_struct(move_type: &str, module: &str, name: &str) -> bool {
    let base = move_type.split('<').next().unwrap_or(move_type);
    let mut parts = base.rsplit("::");
    parts.next() == Some(name) && parts.next() == Some(module)
}
