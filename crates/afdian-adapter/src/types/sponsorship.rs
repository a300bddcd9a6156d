/*
[INPUT]:  Normalized aggregates and sponsor records
[OUTPUT]: Uniform sponsorship output model (camelCase serialization)
[POS]:    Data layer - provider output types
[UPDATE]: When the uniform sponsorship shape changes
*/

use rust_decimal::Decimal;
use serde::Serialize;

/// Provider tag carried on every output record.
pub const PROVIDER_TAG: &str = "afdian";

/// Fixed tier name: the platform itself, tiers are not modeled.
pub const TIER_NAME: &str = "Afdian";

/// The platform exposes no per-sponsor privacy setting.
pub const PRIVACY_PUBLIC: &str = "PUBLIC";

/// Sponsor identity as rendered in the uniform output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorProfile {
    #[serde(rename = "type")]
    pub sponsor_type: String,
    pub login: String,
    pub name: String,
    pub avatar_url: String,
    pub link_url: String,
}

impl SponsorProfile {
    pub fn user(user_id: &str, name: String, avatar: &str) -> Self {
        Self {
            sponsor_type: "User".to_string(),
            login: user_id.to_string(),
            name,
            avatar_url: avatar.to_string(),
            link_url: format!("https://afdian.com/u/{user_id}"),
        }
    }
}

/// One normalized sponsorship, uniform across both retrieval modes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sponsorship {
    pub sponsor: SponsorProfile,
    /// −1 means "no active paid plan".
    pub monthly_dollars: Decimal,
    pub privacy_level: String,
    pub tier_name: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_at: Option<String>,
    pub is_one_time: bool,
    pub provider: String,
    /// Underlying aggregate/record, kept for debugging.
    pub raw: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sponsor_profile_builds_platform_link() {
        let profile = SponsorProfile::user("abc123", "alice".to_string(), "a.png");

        assert_eq!(profile.sponsor_type, "User");
        assert_eq!(profile.login, "abc123");
        assert_eq!(profile.link_url, "https://afdian.com/u/abc123");
    }

    #[test]
    fn sponsorship_serializes_camel_case() {
        let sponsorship = Sponsorship {
            sponsor: SponsorProfile::user("u1", "alice".to_string(), ""),
            monthly_dollars: "5".parse().expect("amount"),
            privacy_level: PRIVACY_PUBLIC.to_string(),
            tier_name: TIER_NAME.to_string(),
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            expire_at: None,
            is_one_time: false,
            provider: PROVIDER_TAG.to_string(),
            raw: serde_json::Value::Null,
        };

        let value = serde_json::to_value(&sponsorship).expect("serialize");

        assert_eq!(value["monthlyDollars"], "5");
        assert_eq!(value["privacyLevel"], "PUBLIC");
        assert_eq!(value["sponsor"]["type"], "User");
        assert_eq!(value["sponsor"]["avatarUrl"], "");
        assert!(value.get("expireAt").is_none());
    }
}
