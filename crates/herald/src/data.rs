//! Bot data files read before module discovery.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Catalog name of the identity file.
pub const INFO_FILE: &str = "info";

/// Catalog name of the free-form variables file.
pub const VARS_FILE: &str = "vars";

/// Catalog name of the presentation file.
pub const STYLE_FILE: &str = "style";

/// Identity of the bot account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotInfo {
    /// Application client identifier.
    pub client_id: String,
    /// Home guild for guild-scoped commands.
    #[serde(default)]
    pub guild_id: Option<String>,
    /// Users allowed to run owner-only commands.
    #[serde(default)]
    pub owner_ids: Vec<String>,
}

impl BotInfo {
    /// Whether `user_id` belongs to an owner.
    #[must_use]
    pub fn is_owner(&self, user_id: &str) -> bool {
        self.owner_ids.iter().any(|owner| owner == user_id)
    }
}

/// String-keyed values shared with every handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BotVars(Map<String, Value>);

impl BotVars {
    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the string stored under `key`.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no variable is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for BotVars {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

/// Presentation settings for replies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotStyle {
    /// Accent colour, e.g. `#5865f2`.
    #[serde(default)]
    pub primary_color: Option<String>,
    /// Footer text appended to embeds.
    #[serde(default)]
    pub footer: Option<String>,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[test]
    fn info_defaults_optional_fields() {
        let info: BotInfo = serde_json::from_value(json!({ "client_id": "42" })).expect("parse");
        assert_eq!(info.client_id, "42");
        assert!(info.guild_id.is_none());
        assert!(info.owner_ids.is_empty());
    }

    #[rstest]
    #[case::owner("7", true)]
    #[case::stranger("8", false)]
    fn owner_check(#[case] user: &str, #[case] expected: bool) {
        let info = BotInfo {
            owner_ids: vec![String::from("7")],
            ..BotInfo::default()
        };
        assert_eq!(info.is_owner(user), expected);
    }

    #[test]
    fn info_requires_client_id() {
        assert!(serde_json::from_value::<BotInfo>(json!({ "guild_id": "1" })).is_err());
    }

    #[test]
    fn vars_are_a_transparent_map() {
        let vars: BotVars =
            serde_json::from_value(json!({ "prefix": "!", "limit": 3 })).expect("parse");
        assert_eq!(vars.len(), 2);
        assert_eq!(vars.get_str("prefix"), Some("!"));
        assert_eq!(vars.get("limit"), Some(&json!(3)));
        assert_eq!(vars.get_str("limit"), None);
    }

    #[test]
    fn vars_reject_non_objects() {
        assert!(serde_json::from_value::<BotVars>(json!([1, 2])).is_err());
    }

    #[test]
    fn style_fields_are_optional() {
        let style: BotStyle = serde_json::from_value(json!({ "footer": "herald" })).expect("parse");
        assert_eq!(style.footer.as_deref(), Some("herald"));
        assert!(style.primary_color.is_none());
    }
}
