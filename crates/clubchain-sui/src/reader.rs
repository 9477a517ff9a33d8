//! Club and event aggregation from chain.
//!
//! Clubs are discovered through the club registry when one is configured, otherwise by
//! walking the `create_club` transaction history. Every read goes to the fullnode, nothing
//! is cached here.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    club::{is_struct, Club, Event, CLUB_MODULE, EVENT_MODULE},
    config::ChainConfig,
    error::{Error, Result},
    fields::dedup_ids,
    object::{ObjectChange, ObjectData, TransactionFilter},
    registry::{extract_clubs_from_registry, registry_club_refs},
    rpc::SuiRpc,
};

/// Move struct name of a club.
const CLUB_STRUCT: &str = "Club";
/// Move struct name of an event.
const EVENT_STRUCT: &str = "Event";

/// Reads clubs and events through a [`SuiRpc`].
#[derive(Clone)]
pub struct ClubReader {
    /// Fullnode access.
    rpc: Arc<dyn SuiRpc>,
    /// Deployment configuration.
    config: ChainConfig,
}

impl ClubReader {
    /// Reader over `rpc` for the deployment described by `config`.
    #[must_use]
    pub fn new(rpc: Arc<dyn SuiRpc>, config: ChainConfig) -> Self {
        Self { rpc, config }
    }

    /// Deployment configuration.
    #[must_use]
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Fullnode access.
    #[must_use]
    pub fn rpc(&self) -> &Arc<dyn SuiRpc> {
        &self.rpc
    }

    /// All clubs, de-duplicated by id.
    ///
    /// # Errors
    ///
    /// Missing package id, or the first RPC call of the discovery walk failing. With a
    /// registry, clubs it only references are dropped when they cannot be read.
    pub async fn clubs(&self) -> Result<Vec<Club>> {
        let package_id = self.config.package_id()?;

        let listing = self.registry_listing().await;
        let from_registry = listing.is_some();
        let (mut clubs, ids) = match listing {
            Some(listing) => listing,
            None => {
                let ids = self
                    .scan_created(package_id, CLUB_MODULE, "create_club", CLUB_STRUCT)
                    .await?;
                (Vec::new(), ids)
            },
        };

        let known: std::collections::HashSet<String> =
            clubs.iter().map(|c| c.id.clone()).collect();
        let missing: Vec<String> = ids.into_iter().filter(|id| !known.contains(id)).collect();
        if !missing.is_empty() {
            let objects = match self.rpc.multi_get_objects(&missing).await {
                Ok(objects) => objects,
                Err(err) if from_registry => {
                    warn!(
                        %err,
                        missing = missing.len(),
                        "referenced clubs unreadable, keeping registry entries"
                    );
                    Vec::new()
                },
                Err(err) => return Err(err),
            };
            clubs.extend(
                objects
                    .iter()
                    .filter(|o| has_type(o, CLUB_MODULE, CLUB_STRUCT))
                    .filter_map(Club::from_object),
            );
        }

        let mut seen = std::collections::HashSet::new();
        clubs.retain(|c| seen.insert(c.id.clone()));
        debug!(count = clubs.len(), "loaded clubs");
        Ok(clubs)
    }

    /// One club, `None` if no club object has this id.
    ///
    /// # Errors
    ///
    /// If the RPC call fails.
    pub async fn club(&self, club_id: &str) -> Result<Option<Club>> {
        let object = self.rpc.get_object(club_id).await?;
        Ok(object
            .filter(|o| has_type(o, CLUB_MODULE, CLUB_STRUCT))
            .and_then(|o| Club::from_object(&o)))
    }

    /// Events of a club, ordered by date.
    ///
    /// # Errors
    ///
    /// `ObjectNotFound` if the club does not exist, or an RPC failure.
    pub async fn events(&self, club_id: &str) -> Result<Vec<Event>> {
        let club = self
            .club(club_id)
            .await?
            .ok_or_else(|| Error::ObjectNotFound(club_id.to_string()))?;

        let (ids, filter_by_club) = if club.events.is_empty() {
            let package_id = self.config.package_id()?;
            let ids = self
                .scan_created(package_id, EVENT_MODULE, "create_event", EVENT_STRUCT)
                .await?;
            (ids, true)
        } else {
            (club.events.clone(), false)
        };

        let mut events: Vec<Event> = if ids.is_empty() {
            Vec::new()
        } else {
            self.rpc
                .multi_get_objects(&ids)
                .await?
                .iter()
                .filter(|o| has_type(o, EVENT_MODULE, EVENT_STRUCT))
                .filter_map(Event::from_object)
                .filter(|e| !filter_by_club || e.club_id == club.id)
                .collect()
        };
        events.sort_by_key(|e| e.date);
        Ok(events)
    }

    /// One event, `None` if no event object has this id.
    ///
    /// # Errors
    ///
    /// If the RPC call fails.
    pub async fn event(&self, event_id: &str) -> Result<Option<Event>> {
        let object = self.rpc.get_object(event_id).await?;
        Ok(object
            .filter(|o| has_type(o, EVENT_MODULE, EVENT_STRUCT))
            .and_then(|o| Event::from_object(&o)))
    }

    /// Inline clubs and referenced ids from the registry. `None` when no registry is
    /// configured or it cannot be read, in which case transactions are scanned instead.
    async fn registry_listing(&self) -> Option<(Vec<Club>, Vec<String>)> {
        let registry_id = self.config.club_registry_id()?;
        match self.rpc.get_object(registry_id).await {
            Ok(Some(registry)) => {
                let fields = registry.fields();
                Some((
                    extract_clubs_from_registry(Some(fields)),
                    registry_club_refs(Some(fields)),
                ))
            },
            Ok(None) => {
                warn!(registry_id, "club registry not found, scanning transactions");
                None
            },
            Err(err) => {
                warn!(registry_id, %err, "club registry unreadable, scanning transactions");
                None
            },
        }
    }

    /// Ids of `<module>::<name>` objects created by calls to `<module>::<function>`,
    /// newest first. Only the first page must succeed; a later failure keeps what was
    /// collected so far.
    async fn scan_created(
        &self, package_id: &str, module: &str, function: &str, name: &str,
    ) -> Result<Vec<String>> {
        let filter = TransactionFilter::MoveFunction {
            package: package_id.to_string(),
            module: module.to_string(),
            function: function.to_string(),
        };

        let mut ids = Vec::new();
        let mut cursor: Option<Value> = None;
        for page_no in 0..self.config.max_pages {
            let page = match self
                .rpc
                .query_transaction_blocks(&filter, cursor.take(), true)
                .await
            {
                Ok(page) => page,
                Err(err) if page_no > 0 => {
                    warn!(%err, page_no, function, "transaction scan stopped early");
                    break;
                },
                Err(err) => return Err(err),
            };

            for tx in page.data {
                for change in tx.object_changes {
                    if let ObjectChange::Created {
                        object_id,
                        object_type,
                        ..
                    } = change
                    {
                        if is_struct(&object_type, module, name) {
                            ids.push(object_id);
                        }
                    }
                }
            }

            match page.next_cursor {
                Some(next) if page.has_next_page && !next.is_null() => cursor = Some(next),
                _ => break,
            }
        }

        dedup_ids(&mut ids);
        Ok(ids)
    }
}

/// Objects whose type is unknown are given the benefit of the doubt, the parsers reject
/// anything without the expected fields.
fn has_type(object: &ObjectData, module: &str, name: &str) -> bool {
    object
        .move_type()
        .is_none_or(|t| is_struct(t, module, name))
}
