//! Capability and badge objects.
//!
//! Holding one of these in a wallet is the only authorization mechanism ClubChain has.

use serde::{Deserialize, Serialize};

use crate::{club::struct_type, fields, object::ObjectData};

/// Known badge and capability structs.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
)]
pub enum BadgeKind {
    /// Platform administrator. Never expires.
    SuperAdminCap,
    /// Owner of one club, with an expiry.
    ClubOwnerBadge,
    /// Delegated administrator of one club.
    ClubAdminCap,
    /// Registered member.
    MemberBadge,
    /// Proof of having joined an event.
    ParticipationBadge,
}

impl BadgeKind {
    /// Move struct name.
    #[must_use]
    pub fn struct_name(self) -> &'static str {
        self.into()
    }

    /// Move module declaring the struct.
    #[must_use]
    pub fn module(self) -> &'static str {
        match self {
            BadgeKind::SuperAdminCap | BadgeKind::ClubOwnerBadge | BadgeKind::ClubAdminCap => {
                "club"
            },
            BadgeKind::MemberBadge => "member",
            BadgeKind::ParticipationBadge => "event",
        }
    }

    /// Fully qualified struct type inside `package_id`.
    #[must_use]
    pub fn struct_type(self, package_id: &str) -> String {
        struct_type(package_id, self.module(), self.struct_name())
    }

    /// Whether the kind honours `expiration_ms`.
    #[must_use]
    pub fn expires(self) -> bool {
        self != BadgeKind::SuperAdminCap
    }

    /// Whether the kind is only valid with a readable `expiration_ms`. Owner badges are
    /// always minted with an expiry, so one without it is treated as expired.
    #[must_use]
    pub fn requires_expiry(self) -> bool {
        self == BadgeKind::ClubOwnerBadge
    }
}

/// A badge held by a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    /// Badge object id.
    pub object_id: String,
    /// What the badge grants.
    pub kind: BadgeKind,
    /// Club the badge is scoped to.
    pub club_id: Option<String>,
    /// Event the badge is scoped to, for participation badges.
    pub event_id: Option<String>,
    /// Expiry, unix milliseconds.
    pub expiration_ms: Option<u64>,
}

impl Badge {
    /// Read a badge of a known kind from an owned object.
    #[must_use]
    pub fn from_object(kind: BadgeKind, object: &ObjectData) -> Self {
        let fields = object.fields();
        Self {
            object_id: object.object_id.clone(),
            kind,
            club_id: fields::id(fields, "club_id"),
            event_id: fields::id(fields, "event_id"),
            expiration_ms: if kind.expires() {
                fields::u64_field(fields, "expiration_ms")
            } else {
                None
            },
        }
    }

    /// Whether the badge still grants its capability at `now_ms`.
    #[must_use]
    pub fn is_valid(&self, now_ms: u64) -> bool {
        badge_validity(Some(self), now_ms) == BadgeValidity::Valid
    }
}

/// Result of checking a badge.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadgeValidity {
    /// Present and not expired.
    Valid,
    /// Present but past its expiry.
    Expired,
    /// Not held at all.
    NotFound,
}

/// The single validity rule: a badge is valid while `expiration_ms > now_ms`. Super admin
/// caps never expire. Other kinds without an expiry never expire either, except owner
/// badges, which are expired without one.
#[must_use]
pub fn badge_validity(badge: Option<&Badge>, now_ms: u64) -> BadgeValidity {
    let Some(badge) = badge else {
        return BadgeValidity::NotFound;
    };
    if !badge.kind.expires() {
        return BadgeValidity::Valid;
    }
    match badge.expiration_ms {
        Some(expiry) if expiry > now_ms => BadgeValidity::Valid,
        Some(_) => BadgeValidity::Expired,
        None if badge.kind.requires_expiry() => BadgeValidity::Expired,
        None => BadgeValidity::Valid,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_case::test_case;

    use super::*;

    fn owner_badge(expiration_ms: Option<u64>) -> Badge {
        Badge {
            object_id: "0xb1".to_string(),
            kind: BadgeKind::ClubOwnerBadge,
            club_id: Some("0xc1".to_string()),
            event_id: None,
            expiration_ms,
        }
    }

    #[test_case(Some(1_001), BadgeValidity::Valid ; "expires after now")]
    #[test_case(Some(1_000), BadgeValidity::Expired ; "expires exactly now")]
    #[test_case(Some(999), BadgeValidity::Expired ; "expired before now")]
    #[test_case(None, BadgeValidity::Expired ; "owner badge without expiry")]
    fn expiry_is_strictly_greater_than_now(expiration_ms: Option<u64>, expected: BadgeValidity) {
        assert_eq!(
            badge_validity(Some(&owner_badge(expiration_ms)), 1_000),
            expected
        );
    }

    #[test_case(json!({ "club_id": "0xc1", "expiration_ms": "1001" }), true ; "string expiry")]
    #[test_case(json!({ "club_id": "0xc1", "expiration_ms": 1001 }), true ; "number expiry")]
    #[test_case(json!({ "club_id": "0xc1" }), false ; "missing expiry")]
    #[test_case(json!({ "club_id": "0xc1", "expiration_ms": null }), false ; "null expiry")]
    #[test_case(json!({ "club_id": "0xc1", "expiration_ms": "not-a-number" }), false ; "unparseable expiry")]
    fn owner_badge_needs_a_readable_expiry(fields: serde_json::Value, valid: bool) {
        let object: ObjectData = serde_json::from_value(json!({
            "objectId": "0xb1",
            "content": { "dataType": "moveObject", "fields": fields }
        }))
        .unwrap();

        let badge = Badge::from_object(BadgeKind::ClubOwnerBadge, &object);
        assert_eq!(badge.is_valid(1_000), valid);
    }

    #[test]
    fn other_kinds_without_expiry_stay_valid() {
        for kind in [
            BadgeKind::ClubAdminCap,
            BadgeKind::MemberBadge,
            BadgeKind::ParticipationBadge,
        ] {
            let badge = Badge {
                kind,
                ..owner_badge(None)
            };
            assert!(badge.is_valid(u64::MAX), "{kind}");
        }
    }

    #[test]
    fn missing_badge_is_not_found() {
        assert_eq!(badge_validity(None, 0), BadgeValidity::NotFound);
    }

    #[test]
    fn super_admin_cap_ignores_expiry() {
        let cap = Badge {
            kind: BadgeKind::SuperAdminCap,
            ..owner_badge(Some(1))
        };
        assert!(cap.is_valid(u64::MAX));
    }

    #[test]
    fn struct_types() {
        assert_eq!(
            BadgeKind::ClubOwnerBadge.struct_type("0xpkg"),
            "0xpkg::club::ClubOwnerBadge"
        );
        assert_eq!(
            BadgeKind::MemberBadge.struct_type("0xpkg"),
            "0xpkg::member::MemberBadge"
        );
        assert_eq!(
            BadgeKind::ParticipationBadge.struct_type("0xpkg"),
            "0xpkg::event::ParticipationBadge"
        );
    }

    #[test]
    fn reads_badge_fields() {
        let object: ObjectData = serde_json::from_value(json!({
            "objectId": "0xb2",
            "content": {
                "dataType": "moveObject",
                "type": "0xpkg::club::SuperAdminCap",
                "fields": { "id": { "id": "0xb2" }, "expiration_ms": "5" }
            }
        }))
        .unwrap();

        let cap = Badge::from_object(BadgeKind::SuperAdminCap, &object);
        assert_eq!(cap.expiration_ms, None);
        assert_eq!(cap.club_id, None);

        let badge = Badge::from_object(BadgeKind::ClubOwnerBadge, &object);
        assert_eq!(badge.expiration_ms, Some(5));
    }
}
