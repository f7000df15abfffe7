//! Channel identity, emote and badge value objects.
//!
//! Every value here is an immutable snapshot produced for a single request.
//! The serde representations are the public JSON wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The canonical profile record for a streaming account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelIdentity {
    pub id: String,
    /// Login name (lowercase).
    pub name: String,
    pub display_name: String,
    pub description: String,
    /// Account type: `""`, `"staff"`, `"admin"` or `"global_mod"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// `""`, `"affiliate"` or `"partner"`.
    pub broadcaster_type: String,
    pub profile_picture_url: String,
    pub offline_placeholder_url: String,
    #[serde(with = "iso_millis")]
    pub creation_date: DateTime<Utc>,
}

impl ChannelIdentity {
    /// The numeric channel id, if this identity carries a usable one.
    pub fn channel_id(&self) -> Option<ChannelId> {
        ChannelId::parse(&self.id)
    }
}

/// A strictly positive numeric channel id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(u64);

impl ChannelId {
    pub fn new(id: u64) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    /// Parse the decimal id string the platform returns.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<u64>().ok().and_then(Self::new)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One hit of a channel search, before its full identity is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelCandidate {
    pub id: String,
    pub login: String,
    pub display_name: String,
}

/// Which provider an emote came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmoteKind {
    #[serde(rename = "twitchemote")]
    Twitch,
    #[serde(rename = "bttvemote")]
    Bttv,
    #[serde(rename = "seventvemote")]
    SevenTv,
    #[serde(rename = "ffzemote")]
    Ffz,
}

impl EmoteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Twitch => "twitchemote",
            Self::Bttv => "bttvemote",
            Self::SevenTv => "seventvemote",
            Self::Ffz => "ffzemote",
        }
    }
}

impl std::fmt::Display for EmoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chat emote normalized from any provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emote {
    pub name: String,
    /// Absolute image URL.
    pub link: String,
    #[serde(rename = "type")]
    pub kind: EmoteKind,
}

impl Emote {
    /// Build an emote, rejecting entries without a name or an image.
    pub fn new(name: impl Into<String>, link: impl Into<String>, kind: EmoteKind) -> Option<Self> {
        let name = name.into();
        let link = link.into();
        if name.is_empty() || link.is_empty() {
            return None;
        }
        Some(Self { name, link, kind })
    }
}

/// A chat badge version, named `"<setId>/<versionId>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub name: String,
    /// Image URL; empty when the upstream omits one.
    pub link: String,
}

impl Badge {
    pub fn new(set_id: &str, version_id: &str, link: Option<String>) -> Self {
        Self {
            name: format!("{set_id}/{version_id}"),
            link: link.unwrap_or_default(),
        }
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix,
/// e.g. `2015-05-02T17:47:43.000Z`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn identity() -> ChannelIdentity {
        ChannelIdentity {
            id: "46390451".into(),
            name: "zoil".into(),
            display_name: "Zoil".into(),
            description: "variety streamer".into(),
            kind: String::new(),
            broadcaster_type: "partner".into(),
            profile_picture_url: "https://static-cdn.jtvnw.net/u/zoil.png".into(),
            offline_placeholder_url: String::new(),
            creation_date: Utc.with_ymd_and_hms(2013, 7, 14, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn identity_serializes_with_wire_field_names() {
        let json = serde_json::to_value(identity()).unwrap();
        assert_eq!(json["displayName"], "Zoil");
        assert_eq!(json["type"], "");
        assert_eq!(json["broadcasterType"], "partner");
        assert_eq!(json["profilePictureUrl"], "https://static-cdn.jtvnw.net/u/zoil.png");
        assert_eq!(json["offlinePlaceholderUrl"], "");
        assert_eq!(json["creationDate"], "2013-07-14T09:30:00.000Z");
        assert!(json.get("display_name").is_none());
    }

    #[test]
    fn identity_json_parses_back() {
        let json = serde_json::to_string(&identity()).unwrap();
        let parsed: ChannelIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, identity());
    }

    #[test]
    fn channel_id_requires_positive_integer() {
        assert_eq!(ChannelId::parse("46390451").map(ChannelId::get), Some(46390451));
        assert!(ChannelId::parse("0").is_none());
        assert!(ChannelId::parse("").is_none());
        assert!(ChannelId::parse("zoil").is_none());
        assert!(ChannelId::parse("-5").is_none());
        assert_eq!(identity().channel_id().unwrap().to_string(), "46390451");
    }

    #[test]
    fn emote_kind_wire_names() {
        let kinds = [EmoteKind::Twitch, EmoteKind::Bttv, EmoteKind::SevenTv, EmoteKind::Ffz];
        let names: Vec<String> = kinds
            .iter()
            .map(|k| serde_json::to_value(k).unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["twitchemote", "bttvemote", "seventvemote", "ffzemote"]);
        assert_eq!(EmoteKind::SevenTv.to_string(), "seventvemote");
    }

    #[test]
    fn emote_rejects_blank_name_or_link() {
        assert!(Emote::new("", "https://cdn/x", EmoteKind::Bttv).is_none());
        assert!(Emote::new("Kappa", "", EmoteKind::Twitch).is_none());

        let emote = Emote::new("Kappa", "https://cdn/kappa", EmoteKind::Twitch).unwrap();
        let json = serde_json::to_value(&emote).unwrap();
        assert_eq!(json, serde_json::json!({
            "name": "Kappa",
            "link": "https://cdn/kappa",
            "type": "twitchemote"
        }));
    }

    #[test]
    fn badge_name_joins_set_and_version() {
        let badge = Badge::new("subscriber", "12", None);
        assert_eq!(badge.name, "subscriber/12");
        let json = serde_json::to_value(&badge).unwrap();
        assert_eq!(json["link"], "");
    }
}
