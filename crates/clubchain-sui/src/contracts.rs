//! Move call builders for the ClubChain package.
//!
//! Builders only validate and describe the call. Turning a [`MoveCall`] into transaction
//! bytes is done by [`crate::rpc::SuiRpc::move_call`], signing is left to the wallet.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    club::{CLUB_MODULE, EVENT_MODULE},
    config::{check_object_id, ChainConfig},
    error::{Error, Result},
};

/// Module holding member registration.
pub const MEMBER_MODULE: &str = "member";

/// Longest club name accepted.
const MAX_NAME_LEN: usize = 64;
/// Longest description accepted.
const MAX_DESCRIPTION_LEN: usize = 1024;

/// One argument of a Move call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CallArg {
    /// An object passed by id.
    Object(String),
    /// A pure value (string, number, address).
    Pure(Value),
}

impl CallArg {
    /// Form the fullnode expects inside `unsafe_moveCall` arguments.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            CallArg::Object(id) => Value::String(id.clone()),
            CallArg::Pure(value) => value.clone(),
        }
    }

    /// Pure string.
    fn string(value: &str) -> Self {
        CallArg::Pure(Value::String(value.to_string()))
    }

    /// Pure `u64`. Sent as a string, which the node accepts for every integer width.
    fn u64(value: u64) -> Self {
        CallArg::Pure(Value::String(value.to_string()))
    }
}

/// A Move entry function call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCall {
    /// Package id.
    pub package: String,
    /// Module name.
    pub module: String,
    /// Function name.
    pub function: String,
    /// Type arguments.
    pub type_arguments: Vec<String>,
    /// Call arguments, in order.
    pub arguments: Vec<CallArg>,
}

impl MoveCall {
    /// Call of `package::module::function` with no arguments yet.
    fn new(config: &ChainConfig, module: &str, function: &str) -> Result<Self> {
        Ok(Self {
            package: config.package_id()?.to_string(),
            module: module.to_string(),
            function: function.to_string(),
            type_arguments: Vec::new(),
            arguments: Vec::new(),
        })
    }

    /// Append an argument.
    fn arg(mut self, arg: CallArg) -> Self {
        self.arguments.push(arg);
        self
    }

    /// `package::module::function`.
    #[must_use]
    pub fn target(&self) -> String {
        format!("{}::{}::{}", self.package, self.module, self.function)
    }
}

/// `club::create_club(registry?, name, description, clock)`
///
/// # Errors
///
/// Missing package id, or an empty or oversized name or description.
pub fn create_club(config: &ChainConfig, name: &str, description: &str) -> Result<MoveCall> {
    let name = required_text("name", name, MAX_NAME_LEN)?;
    let description = bounded_text("description", description, MAX_DESCRIPTION_LEN)?;

    let mut call = MoveCall::new(config, CLUB_MODULE, "create_club")?;
    if let Some(registry) = config.club_registry_id() {
        call = call.arg(CallArg::Object(registry.to_string()));
    }
    Ok(call
        .arg(CallArg::string(name))
        .arg(CallArg::string(description))
        .arg(clock(config)))
}

/// `club::update_club(club, owner_badge, name, description)`
///
/// # Errors
///
/// Missing package id, malformed object ids, or invalid text.
pub fn update_club(
    config: &ChainConfig, club_id: &str, owner_badge_id: &str, name: &str, description: &str,
) -> Result<MoveCall> {
    let name = required_text("name", name, MAX_NAME_LEN)?;
    let description = bounded_text("description", description, MAX_DESCRIPTION_LEN)?;

    Ok(MoveCall::new(config, CLUB_MODULE, "update_club")?
        .arg(object("club_id", club_id)?)
        .arg(object("owner_badge_id", owner_badge_id)?)
        .arg(CallArg::string(name))
        .arg(CallArg::string(description)))
}

/// `club::delete_club(registry?, club, owner_badge)`
///
/// # Errors
///
/// Missing package id or malformed object ids.
pub fn delete_club(config: &ChainConfig, club_id: &str, owner_badge_id: &str) -> Result<MoveCall> {
    let mut call = MoveCall::new(config, CLUB_MODULE, "delete_club")?;
    if let Some(registry) = config.club_registry_id() {
        call = call.arg(CallArg::Object(registry.to_string()));
    }
    Ok(call
        .arg(object("club_id", club_id)?)
        .arg(object("owner_badge_id", owner_badge_id)?))
}

/// Input of [`create_event`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    /// Club hosting the event.
    pub club_id: String,
    /// Owner badge or admin cap of the club, proving the right to create events.
    pub owner_badge_id: String,
    /// Title.
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Start time, unix milliseconds.
    pub date: u64,
}

/// `event::create_event(club, owner_badge, title, description, date, clock)`
///
/// # Errors
///
/// Missing package id, malformed object ids, an empty title or a zero date.
pub fn create_event(config: &ChainConfig, event: &NewEvent) -> Result<MoveCall> {
    let title = required_text("title", &event.title, MAX_NAME_LEN)?;
    let description = bounded_text("description", &event.description, MAX_DESCRIPTION_LEN)?;
    if event.date == 0 {
        return Err(Error::invalid_argument("date", "must be set"));
    }

    Ok(MoveCall::new(config, EVENT_MODULE, "create_event")?
        .arg(object("club_id", &event.club_id)?)
        .arg(object("owner_badge_id", &event.owner_badge_id)?)
        .arg(CallArg::string(title))
        .arg(CallArg::string(description))
        .arg(CallArg::u64(event.date))
        .arg(clock(config)))
}

/// `event::join_event(event, clock)`
///
/// # Errors
///
/// Missing package id or a malformed event id.
pub fn join_event(config: &ChainConfig, event_id: &str) -> Result<MoveCall> {
    Ok(MoveCall::new(config, EVENT_MODULE, "join_event")?
        .arg(object("event_id", event_id)?)
        .arg(clock(config)))
}

/// `event::leave_event(event)`
///
/// # Errors
///
/// Missing package id or a malformed event id.
pub fn leave_event(config: &ChainConfig, event_id: &str) -> Result<MoveCall> {
    Ok(MoveCall::new(config, EVENT_MODULE, "leave_event")?.arg(object("event_id", event_id)?))
}

/// `member::register_member(member_registry, intra_login, clock)`
///
/// # Errors
///
/// Missing package or member registry id, or an empty login.
pub fn register_member(config: &ChainConfig, intra_login: &str) -> Result<MoveCall> {
    let login = required_text("intra_login", intra_login, MAX_NAME_LEN)?;
    let registry = config.member_registry_id()?.to_string();

    Ok(MoveCall::new(config, MEMBER_MODULE, "register_member")?
        .arg(CallArg::Object(registry))
        .arg(CallArg::string(login))
        .arg(clock(config)))
}

/// `club::donate(club, coin)`. The coin must already hold `amount_mist`, the wallet
/// splits it off its gas coin before calling.
///
/// # Errors
///
/// Missing package id, malformed object ids or a zero amount.
pub fn donate(
    config: &ChainConfig, club_id: &str, coin_id: &str, amount_mist: u64,
) -> Result<MoveCall> {
    if amount_mist == 0 {
        return Err(Error::invalid_argument("amount", "must be greater than zero"));
    }
    Ok(MoveCall::new(config, CLUB_MODULE, "donate")?
        .arg(object("club_id", club_id)?)
        .arg(object("coin_id", coin_id)?))
}

/// The shared clock argument.
fn clock(config: &ChainConfig) -> CallArg {
    CallArg::Object(config.clock_object_id.clone())
}

/// Object argument, checking the id format.
fn object(name: &'static str, id: &str) -> Result<CallArg> {
    let id = id.trim();
    check_object_id(name, id)
        .map_err(|_| Error::invalid_argument(name, format!("`{id}` is not an object id")))?;
    Ok(CallArg::Object(id.to_string()))
}

/// Non empty text up to `max` characters.
fn required_text<'a>(name: &'static str, value: &'a str, max: usize) -> Result<&'a str> {
    let value = bounded_text(name, value, max)?;
    if value.is_empty() {
        return Err(Error::invalid_argument(name, "must not be empty"));
    }
    Ok(value)
}

/// Text up to `max` characters, trimmed.
fn bounded_text<'a>(name: &'static str, value: &'a str, max: usize) -> Result<&'a str> {
    let value = value.trim();
    if value.chars().count() > max {
        return Err(Error::invalid_argument(
            name,
            format!("longer than {max} characters"),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::network::Network;

    fn config() -> ChainConfig {
        ChainConfig::new(Network::Testnet, "0xpkg1").with_member_registry("0x77")
    }

    #[test]
    fn create_club_without_registry() {
        let call = create_club(&config(), "  Chess  ", "Knights and bishops").unwrap();

        assert_eq!(call.target(), "0xpkg1::club::create_club");
        assert_eq!(call.arguments, vec![
            CallArg::Pure(json!("Chess")),
            CallArg::Pure(json!("Knights and bishops")),
            CallArg::Object("0x6".to_string()),
        ]);
    }

    #[test]
    fn create_club_passes_registry_first() {
        let call = create_club(&config().with_club_registry("0xaa"), "Chess", "").unwrap();
        assert_eq!(call.arguments.first(), Some(&CallArg::Object("0xaa".to_string())));
        assert_eq!(call.arguments.len(), 4);
    }

    #[test]
    fn create_club_rejects_blank_name() {
        assert!(matches!(
            create_club(&config(), "   ", "x"),
            Err(Error::InvalidArgument { name: "name", .. })
        ));
    }

    #[test]
    fn builders_need_package_id() {
        let cfg = ChainConfig::default();
        assert!(matches!(
            join_event(&cfg, "0xe1"),
            Err(Error::MissingConfig("PACKAGE_ID"))
        ));
    }

    #[test]
    fn create_event_arguments_in_order() {
        let call = create_event(&config(), &NewEvent {
            club_id: "0xc1".to_string(),
            owner_badge_id: "0xb1".to_string(),
            title: "Hackathon".to_string(),
            description: "48h of code".to_string(),
            date: 1_767_225_600_000,
        })
        .unwrap();

        let args: Vec<Value> = call.arguments.iter().map(CallArg::to_json).collect();
        assert_eq!(args, vec![
            json!("0xc1"),
            json!("0xb1"),
            json!("Hackathon"),
            json!("48h of code"),
            json!("1767225600000"),
            json!("0x6"),
        ]);
    }

    #[test]
    fn create_event_rejects_bad_club_id() {
        let event = NewEvent {
            club_id: "club".to_string(),
            owner_badge_id: "0xb1".to_string(),
            title: "Hackathon".to_string(),
            date: 1,
            ..NewEvent::default()
        };
        assert!(matches!(
            create_event(&config(), &event),
            Err(Error::InvalidArgument { name: "club_id", .. })
        ));
    }

    #[test]
    fn register_member_needs_member_registry() {
        let cfg = ChainConfig::new(Network::Testnet, "0xpkg1");
        assert!(matches!(
            register_member(&cfg, "jdoe"),
            Err(Error::MissingConfig("MEMBER_REGISTRY_ID"))
        ));

        let call = register_member(&config(), "jdoe").unwrap();
        assert_eq!(call.target(), "0xpkg1::member::register_member");
        assert_eq!(call.arguments.first(), Some(&CallArg::Object("0x77".to_string())));
    }

    #[test]
    fn donate_rejects_zero_amount() {
        assert!(donate(&config(), "0xc1", "0xcoin", 0).is_err());
        let call = donate(&config(), "0xc1", "0xc0", 1_000).unwrap();
        assert_eq!(call.target(), "0xpkg1::club::donate");
    }

    #[test]
    fn text_length_is_bounded() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(create_club(&config(), &long, "").is_err());
    }

    #[test]
    fn leave_and_delete_targets() {
        assert_eq!(
            leave_event(&config(), "0xe1").unwrap().target(),
            "0xpkg1::event::leave_event"
        );
        let delete = delete_club(&config(), "0xc1", "0xb1").unwrap();
        assert_eq!(delete.arguments.len(), 2);
        let update = update_club(&config(), "0xc1", "0xb1", "Chess", "New").unwrap();
        assert_eq!(update.function, "update_club");
    }
}
