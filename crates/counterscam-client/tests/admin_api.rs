mod common;

use common::{Canned, FakeService};
use counterscam_client::{ClientError, SessionEndReason, SessionEvent};
use counterscam_shared::{ScanKind, ValidationError, Verdict, VerdictBasis};
use serde_json::json;

#[tokio::test]
async fn test_login_stores_token_and_signals_start() {
    let service = FakeService::start().await;
    service.route(
        "/admin/login",
        Canned::json(200, json!({"access_token": "tok-1", "token_type": "bearer"})),
    );
    service.route(
        "/admin/stats",
        Canned::json(200, json!({"total_checks": 8, "phishing_detected": 2, "safe": 6})),
    );

    let client = service.client();
    let mut events = client.events.subscribe();

    client.api.login(" admin ", "hunter2").await.unwrap();
    assert_eq!(client.tokens.get().as_deref(), Some("tok-1"));
    assert_eq!(events.recv().await.unwrap(), SessionEvent::Started);

    let stats = client.api.stats().await.unwrap();
    assert_eq!(stats.total_checks, 8);
    assert_eq!(stats.detection_rate(), 25.0);

    let requests = service.requests();
    assert_eq!(
        requests[0].body,
        json!({"username": "admin", "password": "hunter2"})
    );
    assert_eq!(requests[1].authorization.as_deref(), Some("Bearer tok-1"));
}

#[tokio::test]
async fn test_rejected_login() {
    let service = FakeService::start().await;
    service.route(
        "/admin/login",
        Canned::json(401, json!({"detail": "Incorrect username or password"})),
    );

    let client = service.client();
    let err = client.api.login("admin", "wrong").await.unwrap_err();

    assert!(matches!(err, ClientError::InvalidCredentials));
    assert!(!client.api.is_authenticated());
}

#[tokio::test]
async fn test_logout_clears_token_and_signals_end() {
    let service = FakeService::start().await;
    let client = service.client();
    client.tokens.set("tok-1");
    let mut events = client.events.subscribe();

    client.api.logout();
    client.api.logout();

    assert_eq!(client.tokens.get(), None);
    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::Ended {
            reason: SessionEndReason::Logout
        }
    );
    assert_eq!(service.request_count(), 0);
}

#[tokio::test]
async fn test_recent_checks_wrapped_legacy_shape() {
    let service = FakeService::start().await;
    service.route(
        "/admin/recent-checks",
        Canned::json(
            200,
            json!({
                "recent_urls": [],
                "recent_messages": [],
                "recent_checks": [
                    {
                        "type": "message",
                        "content": "You won a gift card",
                        "flagged": "True",
                        "reason": "Prize scam wording",
                        "checked_at": "2024-05-01T10:00:00"
                    },
                    {
                        "type": "url",
                        "content": "https://example.com",
                        "flagged": "False",
                        "reason": "",
                        "checked_at": "2024-05-01T09:00:00"
                    }
                ]
            }),
        ),
    );

    let client = service.client();
    client.tokens.set("tok");
    let checks = client.api.recent_checks().await.unwrap();

    assert_eq!(checks.len(), 2);
    assert_eq!(checks[0].kind, ScanKind::Message);
    assert_eq!(checks[0].value, "You won a gift card");
    assert_eq!(checks[0].verdict, Verdict::Suspicious);
    assert_eq!(checks[0].basis, VerdictBasis::LegacyFlag);
    assert_eq!(checks[0].created_at.as_deref(), Some("2024-05-01T10:00:00"));
    assert_eq!(checks[1].verdict, Verdict::Safe);
}

#[tokio::test]
async fn test_recent_checks_bare_list() {
    let service = FakeService::start().await;
    service.route(
        "/admin/recent-checks",
        Canned::json(
            200,
            json!([
                {"id": 7, "type": "url", "value": "http://bad.test", "verdict": "phishing", "risk_score": 97, "created_at": "2024-05-02T08:00:00"}
            ]),
        ),
    );

    let client = service.client();
    let checks = client.api.recent_checks().await.unwrap();

    assert_eq!(checks.len(), 1);
    assert_eq!(checks[0].id.as_deref(), Some("7"));
    assert_eq!(checks[0].verdict, Verdict::Phishing);
    assert_eq!(checks[0].risk_score, Some(97.0));
}

#[tokio::test]
async fn test_analytics_accepts_older_trend_key() {
    let service = FakeService::start().await;
    service.route(
        "/admin/analytics",
        Canned::json(
            200,
            json!({
                "last_7_days_activity": [
                    {"date": "2024-05-01", "attacks": 3},
                    {"date": "2024-05-02", "count": 5}
                ],
                "top_domains": [{"domain": "paypa1.com", "count": 4}]
            }),
        ),
    );

    let client = service.client();
    let analytics = client.api.analytics().await.unwrap();

    assert_eq!(analytics.attack_trend.len(), 2);
    assert_eq!(analytics.attack_trend[0].count, 3);
    assert_eq!(analytics.attack_trend[1].count, 5);
    assert_eq!(analytics.top_domains[0].domain, "paypa1.com");
}

#[tokio::test]
async fn test_submit_report() {
    let service = FakeService::start().await;
    service.route("/report/", Canned::json(200, json!({"status": "received"})));

    let client = service.client();
    client
        .api
        .submit_report(ScanKind::Url, "  http://fake-bank.test ", " asked for my PIN ")
        .await
        .unwrap();

    assert_eq!(
        service.requests()[0].body,
        json!({"type": "url", "value": "http://fake-bank.test", "details": "asked for my PIN"})
    );
}

#[tokio::test]
async fn test_short_report_is_rejected_locally() {
    let service = FakeService::start().await;
    let client = service.client();

    let err = client
        .api
        .submit_report(ScanKind::Message, "hi", "")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::Validation(ValidationError::TooShort { min: 7, .. })
    ));
    assert_eq!(service.request_count(), 0);
}
