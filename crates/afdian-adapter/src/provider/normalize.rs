/*
[INPUT]:  Raw orders / sponsor records, exchange rate, evaluation time
[OUTPUT]: Uniform Sponsorship records
[POS]:    Provider layer - aggregation and monetary/temporal normalization
[UPDATE]: When grouping rules, derived fields, or name fallbacks change
*/

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;

use crate::http::Result;
use crate::types::{
    PRIVACY_PUBLIC, PROVIDER_TAG, RawOrder, RawSponsorRecord, SponsorProfile, Sponsorship,
    TIER_NAME, UserAggregate,
};

/// Default display name prefix the platform assigns to anonymous users.
/// Exactly 6 characters; a numeric suffix follows.
pub const ANONYMOUS_NAME_PREFIX: &str = "爱发电用户_";

/// Group raw orders by user id, preserving first-seen order.
///
/// Grouping is total and non-duplicating: every order lands in exactly
/// one aggregate, one aggregate per distinct user id.
pub fn aggregate_orders(orders: &[RawOrder]) -> Vec<UserAggregate> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut aggregates: Vec<UserAggregate> = Vec::new();

    for order in orders {
        match index.get(order.user_id.as_str()) {
            Some(&slot) => aggregates[slot].push_order(order),
            None => {
                index.insert(order.user_id.as_str(), aggregates.len());
                aggregates.push(UserAggregate::from_order(order));
            }
        }
    }

    aggregates
}

/// Normalize one user aggregate (web-session mode).
pub fn sponsorship_from_aggregate(
    aggregate: &UserAggregate,
    exchange_rate: Decimal,
    now: i64,
) -> Result<Sponsorship> {
    let active: Vec<_> = aggregate
        .plans
        .iter()
        .filter(|plan| !plan.is_expired(now))
        .collect();

    let monthly_dollars = if active.is_empty() {
        Decimal::NEGATIVE_ONE
    } else {
        active
            .iter()
            .map(|plan| plan.monthly_amount / exchange_rate)
            .sum()
    };

    let created_at = aggregate.plans.iter().map(|p| p.begin_time).min();
    // The latest begin_time, not end_time: the bill payload carries no
    // reliable per-order end, so the newest interval start stands in.
    let expire_at = aggregate.plans.iter().map(|p| p.begin_time).max();
    let is_one_time = aggregate.plans.iter().all(|plan| plan.is_one_time);

    let name = if aggregate.name.starts_with(ANONYMOUS_NAME_PREFIX) {
        aggregate.name.chars().skip(6).collect()
    } else {
        aggregate.name.clone()
    };

    Ok(Sponsorship {
        sponsor: SponsorProfile::user(&aggregate.user_id, name, &aggregate.avatar),
        monthly_dollars,
        privacy_level: PRIVACY_PUBLIC.to_string(),
        tier_name: TIER_NAME.to_string(),
        created_at: iso_timestamp(created_at.unwrap_or_default()),
        expire_at: expire_at.map(iso_timestamp),
        is_one_time,
        provider: PROVIDER_TAG.to_string(),
        raw: serde_json::to_value(aggregate)?,
    })
}

/// Normalize one sponsor record (API-key mode); no grouping, 1:1.
pub fn sponsorship_from_record(
    record: &RawSponsorRecord,
    exchange_rate: Decimal,
    now: i64,
) -> Result<Sponsorship> {
    let plan = record.current_plan.as_ref();
    // No expiry (or no plan at all) counts as expired.
    let expired = plan
        .and_then(|p| p.expire_time)
        .is_none_or(|expire_time| expire_time < now);

    let monthly_dollars = match plan {
        Some(p) if !expired => p.show_price / exchange_rate,
        _ => Decimal::NEGATIVE_ONE,
    };

    let expire_at = plan.and_then(|p| p.expire_time).map(iso_timestamp);
    let is_one_time = plan.is_some_and(|p| !p.name.is_empty());

    // Anonymous fallback here surfaces the user id, unlike the
    // bill-aggregation path which strips the name prefix.
    let name = if record.user.name.starts_with(ANONYMOUS_NAME_PREFIX) {
        record.user.user_id.chars().take(5).collect()
    } else {
        record.user.name.clone()
    };

    Ok(Sponsorship {
        sponsor: SponsorProfile::user(&record.user.user_id, name, &record.user.avatar),
        monthly_dollars,
        privacy_level: PRIVACY_PUBLIC.to_string(),
        tier_name: TIER_NAME.to_string(),
        created_at: iso_timestamp(record.first_pay_time),
        expire_at,
        is_one_time,
        provider: PROVIDER_TAG.to_string(),
        raw: serde_json::to_value(record)?,
    })
}

/// Epoch seconds to ISO-8601 with milliseconds and a `Z` suffix.
fn iso_timestamp(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
