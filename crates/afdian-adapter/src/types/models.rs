/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs for raw Afdian payloads
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When the Afdian API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One purchase/subscription order from the sponsored-bill endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOrder {
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub total_amount: Decimal,
    #[serde(default)]
    pub month: u32,
    /// A present-but-empty plan list marks a one-time, non-recurring order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub begin_time: i64,
    #[serde(default)]
    pub end_time: i64,
}

impl RawOrder {
    pub fn is_one_time(&self) -> bool {
        self.plan.as_ref().is_some_and(|plans| plans.is_empty())
    }
}

/// Sponsor identity block inside a query-sponsor record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SponsorUser {
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: String,
}

/// Current plan of a sponsor from the open query-sponsor endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentPlan {
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub show_price: Decimal,
    /// 0 = subscription/donation, anything else is a commercial purchase.
    #[serde(default)]
    pub product_type: i32,
    #[serde(default)]
    pub update_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_time: Option<i64>,
    #[serde(default)]
    pub name: String,
}

/// One user's sponsorship snapshot from the open query-sponsor endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSponsorRecord {
    pub user: SponsorUser,
    #[serde(default)]
    pub first_pay_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_plan: Option<CurrentPlan>,
}

/// One plan interval contributed by a single order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRecord {
    pub is_one_time: bool,
    pub amount: Decimal,
    pub month_count: u32,
    pub monthly_amount: Decimal,
    pub begin_time: i64,
    pub end_time: i64,
}

impl PlanRecord {
    /// Derive a plan interval from one raw order.
    ///
    /// `month` is clamped to 1: the field is undefined for 0 upstream and
    /// the monthly division must not panic.
    pub fn from_order(order: &RawOrder) -> Self {
        let month_count = order.month.max(1);
        let monthly_amount = order.total_amount / Decimal::from(month_count);
        Self {
            is_one_time: order.is_one_time(),
            amount: order.total_amount,
            month_count,
            monthly_amount,
            begin_time: order.begin_time,
            end_time: order.end_time,
        }
    }

    /// Expiry is evaluated against the supplied "now", never stored.
    pub fn is_expired(&self, now: i64) -> bool {
        self.end_time < now
    }
}

/// All plans of one sponsoring user, keyed by user id during aggregation.
///
/// First-seen name/avatar win; later orders only contribute plans.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserAggregate {
    pub user_id: String,
    pub name: String,
    pub avatar: String,
    pub plans: Vec<PlanRecord>,
}

impl UserAggregate {
    pub fn from_order(order: &RawOrder) -> Self {
        Self {
            user_id: order.user_id.clone(),
            name: order.name.clone(),
            avatar: order.avatar.clone(),
            plans: vec![PlanRecord::from_order(order)],
        }
    }

    /// Append-only: identity fields are never overwritten.
    pub fn push_order(&mut self, order: &RawOrder) {
        self.plans.push(PlanRecord::from_order(order));
    }
}

mod serde_helpers {
    use super::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use std::str::FromStr;

    pub fn deserialize_decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(Decimal::ZERO);
        }

        if let Some(raw) = value.as_str() {
            if raw.trim().is_empty() {
                return Ok(Decimal::ZERO);
            }
            return Decimal::from_str(raw).map_err(serde::de::Error::custom);
        }

        if value.is_number() {
            return Decimal::from_str(&value.to_string()).map_err(serde::de::Error::custom);
        }

        Err(serde::de::Error::custom("invalid decimal value"))
    }

    pub fn serialize_decimal<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }
}
