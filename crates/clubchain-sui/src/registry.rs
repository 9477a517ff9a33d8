//! Club registry extraction.
//!
//! The registry is a shared object holding `clubs: VecMap<_, _>`. Depending on the package
//! version the map values are either whole `Club` structs or the ids of shared `Club`
//! objects, so both are handled here.

use serde_json::Value;

use crate::{club::Club, fields};

/// Clubs stored inline in the registry. A missing registry, or any missing level of
/// `fields.clubs.fields.contents`, yields an empty list.
#[must_use]
pub fn extract_clubs_from_registry(registry: Option<&Value>) -> Vec<Club> {
    let Some(registry) = registry else {
        return Vec::new();
    };
    let Some(clubs) = fields::path(registry, &["clubs"]) else {
        return Vec::new();
    };

    let mut seen = std::collections::HashSet::new();
    fields::vec_map_entries(clubs)
        .into_iter()
        .filter_map(|(key, value)| {
            let key_id = fields::as_id(key);
            Club::from_fields(value, key_id.as_deref())
        })
        .filter(|club| seen.insert(club.id.clone()))
        .collect()
}

/// Ids of clubs the registry only references, to be fetched separately.
#[must_use]
pub fn registry_club_refs(registry: Option<&Value>) -> Vec<String> {
    let Some(clubs) = registry.and_then(|r| fields::path(r, &["clubs"])) else {
        return Vec::new();
    };

    let mut ids: Vec<String> = fields::vec_map_entries(clubs)
        .into_iter()
        .filter(|(_, value)| fields::string(value, "name").is_none())
        .filter_map(|(_, value)| fields::as_id(value))
        .collect();
    fields::dedup_ids(&mut ids);
    ids
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    /// Registry object content as returned by `sui_getObject` with `showContent`.
    fn registry_fixture() -> Value {
        json!({
            "dataType": "moveObject",
            "type": "0xpkg::club::ClubRegistry",
            "fields": {
                "id": { "id": "0xregistry" },
                "clubs": {
                    "type": "0x2::vec_map::VecMap<0x2::object::ID, 0xpkg::club::Club>",
                    "fields": {
                        "contents": [
                            {
                                "type": "0x2::vec_map::Entry",
                                "fields": {
                                    "key": "club-1",
                                    "value": {
                                        "type": "0xpkg::club::Club",
                                        "fields": {
                                            "id": { "id": "club-1" },
                                            "name": "Test Club",
                                            "description": "A club for tests",
                                            "owner": "0xowner",
                                            "events": []
                                        }
                                    }
                                }
                            }
                        ]
                    }
                }
            }
        })
    }

    #[test]
    fn null_registry_yields_no_clubs() {
        assert!(extract_clubs_from_registry(None).is_empty());
    }

    #[test]
    fn extracts_inline_club() {
        let registry = registry_fixture();
        let clubs = extract_clubs_from_registry(Some(&registry));

        assert_eq!(clubs.len(), 1);
        assert_eq!(clubs[0].id, "club-1");
        assert_eq!(clubs[0].name, "Test Club");
        assert!(registry_club_refs(Some(&registry)).is_empty());
    }

    #[test]
    fn missing_contents_degrades_to_empty() {
        let cases = [
            json!({}),
            json!({ "fields": {} }),
            json!({ "fields": { "clubs": {} } }),
            json!({ "fields": { "clubs": { "fields": {} } } }),
            json!({ "fields": { "clubs": { "fields": { "contents": "oops" } } } }),
        ];
        for registry in &cases {
            assert!(extract_clubs_from_registry(Some(registry)).is_empty());
            assert!(registry_club_refs(Some(registry)).is_empty());
        }
    }

    #[test]
    fn duplicate_clubs_are_dropped() {
        let entry = json!({
            "fields": {
                "key": "0xc1",
                "value": { "fields": { "id": { "id": "0xc1" }, "name": "Chess" } }
            }
        });
        let registry = json!({
            "fields": { "clubs": { "fields": { "contents": [entry.clone(), entry] } } }
        });

        assert_eq!(extract_clubs_from_registry(Some(&registry)).len(), 1);
    }

    #[test]
    fn referenced_clubs_are_listed_by_id() {
        let registry = json!({
            "fields": {
                "clubs": {
                    "fields": {
                        "contents": [
                            { "fields": { "key": "Chess", "value": "0xc1" } },
                            { "fields": { "key": "Go", "value": { "id": "0xc2" } } },
                            { "fields": { "key": "Chess again", "value": "0xc1" } }
                        ]
                    }
                }
            }
        });

        assert!(extract_clubs_from_registry(Some(&registry)).is_empty());
        assert_eq!(registry_club_refs(Some(&registry)), vec![
            "0xc1".to_string(),
            "0xc2".to_string()
        ]);
    }
}
