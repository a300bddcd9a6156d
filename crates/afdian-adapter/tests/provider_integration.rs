/*
[INPUT]:  End-to-end provider scenarios against a mock server
[OUTPUT]: Test results for both retrieval modes
[POS]:    Integration tests - provider pipeline
[UPDATE]: When the retrieval flow or output contract changes
*/

use afdian_adapter::{
    AfdianClient, AfdianConfig, AfdianProvider, ClientConfig, Truncation,
};
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FAR_FUTURE: i64 = 4_000_000_000;

async fn provider(server: &MockServer, config: AfdianConfig) -> AfdianProvider {
    let client = AfdianClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init");
    AfdianProvider::with_client(client, config).expect("provider init")
}

fn order(user_id: &str, name: &str, amount: &str, month: u32, begin: i64, end: i64) -> serde_json::Value {
    json!({
        "user_id": user_id,
        "name": name,
        "avatar": format!("https://pic.example/{user_id}.png"),
        "total_amount": amount,
        "month": month,
        "plan": [{}],
        "begin_time": begin,
        "end_time": end
    })
}

#[tokio::test]
async fn web_session_mode_aggregates_across_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/my/sponsored-bill-filter"))
        .and(query_param("page", "1"))
        .and(header("cookie", "auth_token=tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ec": 200,
            "em": "",
            "data": {
                "list": [
                    order("u1", "alice", "13", 1, 1_700_000_000, FAR_FUTURE),
                    order("u2", "bob", "65", 1, 1_690_000_000, 1_695_000_000),
                ],
                "has_more": 1
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/my/sponsored-bill-filter"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ec": 200,
            "em": "",
            "data": {
                "list": [order("u1", "ignored-rename", "26", 2, 1_710_000_000, FAR_FUTURE)],
                "has_more": 0
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = AfdianConfig {
        web_auth_token: Some("tok".to_string()),
        ..Default::default()
    };
    let provider = provider(&server, config).await;

    let report = provider.fetch_report().await.expect("fetch");

    assert!(report.is_complete());
    assert_eq!(report.records.len(), 2);

    // u1: two active plans, 13/1/6.5 + 26/2/6.5 = 2 + 2 = 4.
    let u1 = &report.records[0];
    assert_eq!(u1.sponsor.login, "u1");
    assert_eq!(u1.sponsor.name, "alice");
    assert_eq!(u1.monthly_dollars, Decimal::from(4));
    // Latest begin_time, not the far-future end_time.
    assert_eq!(u1.expire_at.as_deref(), Some("2024-03-09T16:00:00.000Z"));

    // u2: single expired plan.
    let u2 = &report.records[1];
    assert_eq!(u2.monthly_dollars, Decimal::NEGATIVE_ONE);
}

#[tokio::test]
async fn web_session_mode_keeps_partial_pages_on_remote_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/my/sponsored-bill-filter"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ec": 200,
            "em": "",
            "data": {
                "list": [order("u1", "alice", "13", 1, 1_700_000_000, FAR_FUTURE)],
                "has_more": 1
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/my/sponsored-bill-filter"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let config = AfdianConfig {
        web_auth_token: Some("tok".to_string()),
        ..Default::default()
    };
    let provider = provider(&server, config).await;

    let report = provider.fetch_report().await.expect("fetch");

    assert_eq!(report.records.len(), 1);
    assert_eq!(
        report.truncation,
        Some(Truncation::HttpStatus {
            page: 2,
            status: 500
        })
    );

    // The fail-soft surface still yields the partial list.
    let sponsorships = provider.fetch_sponsorships().await.expect("fetch");
    assert_eq!(sponsorships.len(), 1);
}

#[tokio::test]
async fn open_api_mode_filters_purchases_and_synthesizes_expiry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/open/query-sponsor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ec": 200,
            "em": "",
            "data": {
                "list": [
                    {
                        "user": {"user_id": "sub01", "name": "carol", "avatar": ""},
                        "first_pay_time": 1_600_000_000,
                        "current_plan": {
                            "show_price": "13",
                            "product_type": 0,
                            "update_time": 1_650_000_000,
                            "expire_time": FAR_FUTURE,
                            "name": "tier"
                        }
                    },
                    {
                        "user": {"user_id": "buy01", "name": "dave", "avatar": ""},
                        "first_pay_time": 1_600_000_000,
                        "current_plan": {
                            "show_price": "99",
                            "product_type": 1,
                            "update_time": FAR_FUTURE - 86_400,
                            "name": "badge"
                        }
                    }
                ],
                "total_page": 1
            }
        })))
        .expect(2)
        .mount(&server)
        .await;

    // With purchases kept, the purchase gains a synthetic expiry that is
    // still in the future, so it counts as active.
    let keeping = provider(
        &server,
        AfdianConfig {
            user_id: Some("creator".to_string()),
            token: Some("secret".to_string()),
            include_purchases: true,
            purchase_effectivity_days: 30,
            ..Default::default()
        },
    )
    .await;
    let kept = keeping.fetch_sponsorships().await.expect("fetch");
    assert_eq!(kept.len(), 2);
    let dave = kept
        .iter()
        .find(|s| s.sponsor.login == "buy01")
        .expect("purchase record");
    assert!(dave.expire_at.is_some());
    assert_ne!(dave.monthly_dollars, Decimal::NEGATIVE_ONE);

    // With purchases excluded, only the subscription survives.
    let filtering = provider(
        &server,
        AfdianConfig {
            user_id: Some("creator".to_string()),
            token: Some("secret".to_string()),
            include_purchases: false,
            ..Default::default()
        },
    )
    .await;
    let filtered = filtering.fetch_sponsorships().await.expect("fetch");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].sponsor.login, "sub01");
}
