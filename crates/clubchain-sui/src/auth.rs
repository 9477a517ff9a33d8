//! Badge based authorization.
//!
//! The roles of a wallet are derived from the badges it owns at the time of the check.
//! Nothing is remembered between checks, and any failure to read a badge kind counts as
//! not holding it.

use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;
use strum::IntoEnumIterator;
use tracing::{debug, warn};

use crate::{
    badge::{Badge, BadgeKind},
    club::{is_struct, Club},
    config::ChainConfig,
    error::Result,
    fields::{dedup_ids, same_address},
    rpc::SuiRpc,
};

/// What a wallet may do, derived from its valid badges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    /// Wallet the check was made for.
    pub address: Option<String>,
    /// Holds a `SuperAdminCap`.
    pub is_super_admin: bool,
    /// Holds a valid `ClubOwnerBadge` or `ClubAdminCap`.
    pub is_club_owner: bool,
    /// Holds a valid `MemberBadge`.
    pub is_member: bool,
    /// Clubs named by valid `ClubOwnerBadge`s.
    pub owned_club_ids: Vec<String>,
    /// Clubs named by valid `ClubAdminCap`s.
    pub admin_club_ids: Vec<String>,
    /// Clubs named by valid `MemberBadge`s.
    pub member_club_ids: Vec<String>,
    /// Holds a `MemberBadge` not tied to any club.
    pub has_global_membership: bool,
    /// Events named by valid `ParticipationBadge`s.
    pub participation_event_ids: Vec<String>,
    /// Every valid badge found.
    pub badges: Vec<Badge>,
}

/// Role of a wallet towards one club.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ClubRole {
    /// Platform administrator.
    SuperAdmin,
    /// Owner field match, owner badge or admin cap for the club.
    Owner,
    /// Member of the club.
    Member,
    /// None of the above.
    Visitor,
}

impl Authorization {
    /// Reduce valid badges into roles.
    #[must_use]
    pub fn from_badges(address: Option<&str>, mut badges: Vec<Badge>) -> Self {
        let mut seen = std::collections::HashSet::new();
        badges.retain(|b| seen.insert(b.object_id.clone()));

        let mut auth = Self {
            address: address.map(ToString::to_string),
            ..Self::default()
        };
        for badge in &badges {
            match badge.kind {
                BadgeKind::SuperAdminCap => auth.is_super_admin = true,
                BadgeKind::ClubOwnerBadge => {
                    auth.is_club_owner = true;
                    auth.owned_club_ids.extend(badge.club_id.clone());
                },
                BadgeKind::ClubAdminCap => {
                    auth.is_club_owner = true;
                    auth.admin_club_ids.extend(badge.club_id.clone());
                },
                BadgeKind::MemberBadge => {
                    auth.is_member = true;
                    match &badge.club_id {
                        Some(club_id) => auth.member_club_ids.push(club_id.clone()),
                        None => auth.has_global_membership = true,
                    }
                },
                BadgeKind::ParticipationBadge => {
                    auth.participation_event_ids.extend(badge.event_id.clone());
                },
            }
        }
        dedup_ids(&mut auth.owned_club_ids);
        dedup_ids(&mut auth.admin_club_ids);
        dedup_ids(&mut auth.member_club_ids);
        dedup_ids(&mut auth.participation_event_ids);
        auth.badges = badges;
        auth
    }

    /// Clubs the wallet manages through a badge or cap.
    #[must_use]
    pub fn managed_club_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .owned_club_ids
            .iter()
            .chain(&self.admin_club_ids)
            .cloned()
            .collect();
        dedup_ids(&mut ids);
        ids
    }

    /// Owner field match, or a valid owner badge or admin cap for the club.
    #[must_use]
    pub fn owns_club(&self, club: &Club) -> bool {
        let owner_match = self
            .address
            .as_deref()
            .is_some_and(|a| !club.owner.is_empty() && same_address(a, &club.owner));
        owner_match
            || contains_id(&self.owned_club_ids, &club.id)
            || contains_id(&self.admin_club_ids, &club.id)
    }

    /// Super admins and owners may manage a club.
    #[must_use]
    pub fn can_manage_club(&self, club: &Club) -> bool {
        self.is_super_admin || self.owns_club(club)
    }

    /// A club scoped member badge applies to that club, a global one to every club.
    #[must_use]
    pub fn is_member_of(&self, club_id: &str) -> bool {
        self.has_global_membership || contains_id(&self.member_club_ids, club_id)
    }

    /// Whether a participation badge exists for the event.
    #[must_use]
    pub fn participated_in(&self, event_id: &str) -> bool {
        contains_id(&self.participation_event_ids, event_id)
    }

    /// Strongest role towards `club`.
    #[must_use]
    pub fn club_role(&self, club: &Club) -> ClubRole {
        if self.is_super_admin {
            ClubRole::SuperAdmin
        } else if self.owns_club(club) {
            ClubRole::Owner
        } else if self.is_member_of(&club.id) {
            ClubRole::Member
        } else {
            ClubRole::Visitor
        }
    }
}

/// Whether `ids` names `id`, in any address form.
fn contains_id(ids: &[String], id: &str) -> bool {
    ids.iter().any(|candidate| same_address(candidate, id))
}

/// Derive the authorization of `address` at `now_ms`.
///
/// Badge kinds are queried concurrently. A kind whose query fails is logged and treated
/// as not held, so errors only ever remove permissions. Without an address, or without
/// a package id, the result grants nothing.
pub async fn authorize(
    rpc: &dyn SuiRpc, config: &ChainConfig, address: Option<&str>, now_ms: u64,
) -> Authorization {
    let Some(address) = address.map(str::trim).filter(|a| !a.is_empty()) else {
        return Authorization::default();
    };
    let package_id = match config.package_id() {
        Ok(id) => id,
        Err(err) => {
            warn!(%err, "cannot check badges");
            return Authorization::from_badges(Some(address), Vec::new());
        },
    };

    let queries = BadgeKind::iter()
        .map(|kind| owned_badges(rpc, address, package_id, kind, config.max_pages));
    let results = join_all(queries).await;

    let mut valid = Vec::new();
    for (kind, result) in BadgeKind::iter().zip(results) {
        match result {
            Ok(badges) => valid.extend(badges.into_iter().filter(|b| b.is_valid(now_ms))),
            Err(err) => warn!(%err, %kind, address, "badge query failed, treating as not held"),
        }
    }

    let auth = Authorization::from_badges(Some(address), valid);
    debug!(
        address,
        super_admin = auth.is_super_admin,
        club_owner = auth.is_club_owner,
        member = auth.is_member,
        "authorization derived"
    );
    auth
}

/// All badges of one kind owned by `owner`, following pages up to `max_pages`.
async fn owned_badges(
    rpc: &dyn SuiRpc, owner: &str, package_id: &str, kind: BadgeKind, max_pages: usize,
) -> Result<Vec<Badge>> {
    let struct_type = kind.struct_type(package_id);
    let mut badges = Vec::new();
    let mut cursor: Option<Value> = None;

    for _ in 0..max_pages {
        let page = rpc.get_owned_objects(owner, &struct_type, cursor.take()).await?;
        badges.extend(
            page.data
                .into_iter()
                .filter_map(|r| r.into_data())
                .filter(|o| {
                    o.move_type()
                        .is_none_or(|t| is_struct(t, kind.module(), kind.struct_name()))
                })
                .map(|o| Badge::from_object(kind, &o)),
        );

        match page.next_cursor {
            Some(next) if page.has_next_page && !next.is_null() => cursor = Some(next),
            _ => break,
        }
    }
    Ok(badges)
}
