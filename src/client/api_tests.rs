//! Tests for `Client`.

use super::{Client, ClientOptions, Endpoint, Parameters, Redirect, RequestError};
use crate::retry::RetryPolicy;
use crate::time::InstantSleeper;
use crate::transport::{
    HttpError, HttpRequest, HttpResponse, ScriptedStep, ScriptedTransport, Transport,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn options() -> ClientOptions {
    ClientOptions::new(url::Url::parse("https://api.example.com/").unwrap())
        .with_user_agent("merchant-app/1.0 (test)")
}

fn params(value: serde_json::Value) -> Parameters {
    value.as_object().cloned().unwrap()
}

fn order_params() -> Parameters {
    params(json!({"order_id": "order-abc", "currency": "USD"}))
}

fn status(code: u16) -> ScriptedStep {
    ScriptedStep::status(http::StatusCode::from_u16(code).unwrap())
}

fn client(steps: Vec<ScriptedStep>) -> Client<ScriptedTransport, InstantSleeper> {
    Client::new(ScriptedTransport::new(steps), options()).with_sleeper(InstantSleeper)
}

mod request_shape {
    use super::*;

    #[test]
    fn post_with_user_agent_and_json_body() {
        let client = client(vec![]);
        let request = client
            .build_request(Endpoint::OrderActivity, Some(&order_params()))
            .unwrap();

        assert_eq!(request.method, http::Method::POST);
        assert_eq!(request.url.as_str(), "https://api.example.com/v1/activity/order");
        assert_eq!(request.header("user-agent"), Some("merchant-app/1.0 (test)"));
        assert_eq!(request.header("content-type"), Some("application/json"));

        let body: serde_json::Value = serde_json::from_slice(&request.body.unwrap()).unwrap();
        assert_eq!(body, json!({"order_id": "order-abc", "currency": "USD"}));
    }

    #[test]
    fn no_parameters_means_no_body_and_no_content_type() {
        let client = client(vec![]);
        let request = client.build_request(Endpoint::DeferredDeeplink, None).unwrap();

        assert!(request.body.is_none());
        assert_eq!(request.header("content-type"), None);
        assert!(request.header("user-agent").is_some());
    }

    #[test]
    fn invalid_user_agent_is_rejected() {
        let client = Client::new(
            ScriptedTransport::default(),
            options().with_user_agent("bad\nagent"),
        );
        let result = client.build_request(Endpoint::MobileOrder, None);

        assert!(matches!(
            result,
            Err(RequestError::InvalidHeader {
                name: "User-Agent",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn report_adds_basic_authorization_with_trailing_colon() {
        let client = client(vec![ScriptedStep::ok(Vec::new())]);

        client.report_order(&order_params(), "YXBwLWlk").await.unwrap();

        let sent = client.transport().requests();
        assert_eq!(sent[0].url.path(), "/v1/mobile-order");
        assert_eq!(sent[0].header("authorization"), Some("Basic YXBwLWlk:"));
    }

    #[tokio::test]
    async fn track_sends_no_authorization() {
        let client = client(vec![ScriptedStep::ok(Vec::new())]);

        client.track_order(&order_params()).await.unwrap();

        let sent = client.transport().requests();
        assert_eq!(sent[0].url.path(), "/v1/activity/order");
        assert_eq!(sent[0].header("authorization"), None);
    }
}

mod fetch_redirect {
    use super::*;

    #[tokio::test]
    async fn success_body_yields_destination_and_token() {
        let body = br#"{"object":{"action":"https://x.test","attribution":{"btn_ref":"abc"}}}"#;
        let client = client(vec![ScriptedStep::ok(body.to_vec())]);

        let redirect = client
            .fetch_redirect(&params(json!({"application_id": "app-1"})))
            .await;

        assert_eq!(
            redirect.destination.map(String::from),
            Some("https://x.test/".to_string())
        );
        assert_eq!(redirect.attribution_token.as_deref(), Some("abc"));
        assert_eq!(
            client.transport().requests()[0].url.path(),
            "/v1/web/deferred-deeplink"
        );
    }

    #[tokio::test]
    async fn malformed_body_yields_none() {
        let client = client(vec![ScriptedStep::ok(br#"{"object":{}}"#.to_vec())]);
        assert_eq!(client.fetch_redirect(&Parameters::new()).await, Redirect::none());
    }

    #[tokio::test]
    async fn failure_yields_none_without_retry() {
        let client = client(vec![status(503), ScriptedStep::ok(Vec::new())]);

        assert_eq!(client.fetch_redirect(&Parameters::new()).await, Redirect::none());
        assert_eq!(client.transport().calls(), 1);
    }

    #[tokio::test]
    async fn transport_error_yields_none() {
        let client = client(vec![ScriptedStep::connection_error("offline")]);
        assert_eq!(client.fetch_redirect(&Parameters::new()).await, Redirect::none());
    }

    #[tokio::test]
    async fn error_status_with_valid_body_yields_none() {
        let body = br#"{"object":{"action":"https://x.test","attribution":{"btn_ref":"abc"}}}"#;
        let client = client(vec![ScriptedStep::respond(
            http::StatusCode::NOT_FOUND,
            body.to_vec(),
        )]);

        assert_eq!(client.fetch_redirect(&Parameters::new()).await, Redirect::none());
    }
}

mod track_order {
    use super::*;

    #[tokio::test]
    async fn success_returns_ok() {
        let client = client(vec![ScriptedStep::ok(b"{}".to_vec())]);
        assert!(client.track_order(&order_params()).await.is_ok());
    }

    #[tokio::test]
    async fn server_error_is_not_retried() {
        let client = client(vec![status(500), ScriptedStep::ok(Vec::new())]);

        let err = client.track_order(&order_params()).await.unwrap_err();

        assert_eq!(err.status(), Some(http::StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(client.transport().calls(), 1);
    }

    #[tokio::test]
    async fn transport_error_is_surfaced() {
        let client = client(vec![ScriptedStep::timeout()]);
        let err = client.track_order(&order_params()).await.unwrap_err();

        assert!(matches!(err, RequestError::Transport(HttpError::Timeout)));
    }
}

mod report_order {
    use super::*;

    #[tokio::test]
    async fn persistent_server_error_uses_full_budget() {
        let client = client(vec![status(500)]);

        let err = client.report_order(&order_params(), "cred").await.unwrap_err();

        assert_eq!(client.transport().calls(), 4);
        assert_eq!(err.status(), Some(http::StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn client_error_fails_immediately() {
        let client = client(vec![ScriptedStep::respond(
            http::StatusCode::BAD_REQUEST,
            br#"{"error":"bad order"}"#.to_vec(),
        )]);

        let err = client.report_order(&order_params(), "cred").await.unwrap_err();

        assert_eq!(client.transport().calls(), 1);
        assert!(matches!(
            err,
            RequestError::Status { status, body: Some(ref body) }
                if status == http::StatusCode::BAD_REQUEST && body.contains("bad order")
        ));
    }

    #[tokio::test]
    async fn redirect_status_counts_as_reported() {
        let client = client(vec![status(304), status(500)]);

        assert!(client.report_order(&order_params(), "cred").await.is_ok());
        assert_eq!(client.transport().calls(), 1);
    }

    #[tokio::test]
    async fn recovers_after_transient_failures() {
        let client = client(vec![
            ScriptedStep::timeout(),
            status(429),
            ScriptedStep::ok(Vec::new()),
        ]);

        assert!(client.report_order(&order_params(), "cred").await.is_ok());
        assert_eq!(client.transport().calls(), 3);
    }

    #[tokio::test]
    async fn configured_policy_is_honored() {
        let options = options().with_retry_policy(RetryPolicy::new().with_max_retries(1));
        let client = Client::new(ScriptedTransport::always(status(502)), options)
            .with_sleeper(InstantSleeper);

        assert!(client.report_order(&order_params(), "cred").await.is_err());
        assert_eq!(client.transport().calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn default_backoff_spacing_with_real_timer() {
        let client = Client::new(ScriptedTransport::always(status(503)), options());

        let _ = client.report_order(&order_params(), "cred").await;

        let gaps = client.transport().gaps();
        let expected = [100, 200, 400].map(Duration::from_millis);
        for (gap, want) in gaps.iter().zip(expected) {
            assert!(*gap >= want && *gap < want + Duration::from_millis(5));
        }
    }
}

mod concurrency {
    use super::*;

    /// Fails the first two calls per order id with 503, then succeeds.
    #[derive(Debug, Default)]
    struct TwoFailuresPerOrder {
        attempts: Mutex<HashMap<String, u32>>,
    }

    impl TwoFailuresPerOrder {
        fn attempts(&self, order_id: &str) -> u32 {
            self.attempts.lock().unwrap().get(order_id).copied().unwrap_or(0)
        }
    }

    impl Transport for TwoFailuresPerOrder {
        async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
            let body: serde_json::Value =
                serde_json::from_slice(req.body.as_deref().unwrap_or_default()).unwrap();
            let order_id = body["order_id"].as_str().unwrap().to_string();
            let attempt = {
                let mut attempts = self.attempts.lock().unwrap();
                let count = attempts.entry(order_id).or_insert(0);
                *count += 1;
                *count
            };

            tokio::time::sleep(Duration::from_millis(5)).await;

            let status = if attempt <= 2 {
                http::StatusCode::SERVICE_UNAVAILABLE
            } else {
                http::StatusCode::OK
            };
            Ok(HttpResponse::with_status(status, Vec::new()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fifty_reports_complete_independently() {
        let client = Arc::new(Client::new(TwoFailuresPerOrder::default(), options()));
        let mut handles = Vec::new();

        for i in 0..50 {
            let client = Arc::clone(&client);
            handles.push(tokio::spawn(async move {
                let order = params(json!({"order_id": format!("order-{i}")}));
                client.report_order(&order, "cred").await
            }));
        }

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
        for i in 0..50 {
            assert_eq!(client.transport().attempts(&format!("order-{i}")), 3);
        }
    }
}
