//! End-to-end coordinator tests against local mock providers.
//!
//! Each mock provider is a LibreTranslate-compatible endpoint with a hit
//! counter, so the tests can assert exactly which providers were consulted
//! and how often.

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use coordinator::{Coordinator, CoordinatorConfig};
use provider::{Credentials, ProviderConfig, ProviderKind};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::net::TcpListener;
use translate::{Fragment, FragmentId, Lang, PageSnapshot};

#[derive(Clone, Default)]
struct Hits(Arc<AtomicUsize>);

impl Hits {
    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}/translate")
}

/// Endpoint that always replies with `reply`.
async fn canned(reply: &'static str, hits: Hits) -> String {
    serve(Router::new().route(
        "/translate",
        post(move |Json(_body): Json<Value>| {
            let hits = hits.clone();
            async move {
                hits.bump();
                Json(json!({ "translatedText": reply }))
            }
        }),
    ))
    .await
}

/// Endpoint that appends `-xl` to the incoming text.
async fn echoing(hits: Hits) -> String {
    serve(Router::new().route(
        "/translate",
        post(move |Json(body): Json<Value>| {
            let hits = hits.clone();
            async move {
                hits.bump();
                let q = body["q"].as_str().unwrap_or_default();
                Json(json!({ "translatedText": format!("{q}-xl") }))
            }
        }),
    ))
    .await
}

/// Endpoint that mirrors the input back unchanged (a no-op translation).
async fn parroting(hits: Hits) -> String {
    serve(Router::new().route(
        "/translate",
        post(move |Json(body): Json<Value>| {
            let hits = hits.clone();
            async move {
                hits.bump();
                let q = body["q"].as_str().unwrap_or_default().to_owned();
                Json(json!({ "translatedText": q }))
            }
        }),
    ))
    .await
}

/// Endpoint that always fails with the given status.
async fn failing(status: StatusCode, hits: Hits) -> String {
    serve(Router::new().route(
        "/translate",
        post(move || {
            let hits = hits.clone();
            async move {
                hits.bump();
                status
            }
        }),
    ))
    .await
}

fn libre(id: &str, endpoint: &str, priority: u8) -> ProviderConfig {
    ProviderConfig {
        id: id.into(),
        name: id.into(),
        kind: ProviderKind::LibreTranslate,
        endpoint: endpoint.to_owned(),
        enabled: true,
        priority,
        timeout_secs: Some(2),
        credentials: None,
    }
}

fn coordinator_with(
    providers: Vec<ProviderConfig>,
    max_failures: u32,
    failure_timeout_secs: u64,
) -> Coordinator {
    Coordinator::new(CoordinatorConfig {
        providers,
        max_failures,
        failure_timeout_secs,
        sweep_period_secs: 1,
        prefs_path: None,
    })
    .expect("coordinator")
}

#[tokio::test]
async fn source_language_bypasses_providers_and_cache() {
    let hits = Hits::default();
    let endpoint = canned("hola", hits.clone()).await;
    let coordinator = coordinator_with(vec![libre("a", &endpoint, 1)], 5, 10);

    assert_eq!(coordinator.translate("hello", Lang::En).await, "hello");
    assert_eq!(hits.count(), 0);
    assert!(coordinator.cached("hello", Lang::En).is_none());
}

#[tokio::test]
async fn failover_reaches_the_second_provider() {
    let hits_a = Hits::default();
    let hits_b = Hits::default();
    let a = failing(StatusCode::SERVICE_UNAVAILABLE, hits_a.clone()).await;
    let b = canned("hola", hits_b.clone()).await;
    let coordinator = coordinator_with(vec![libre("a", &a, 1), libre("b", &b, 2)], 5, 10);

    assert_eq!(coordinator.translate("hello", Lang::Es).await, "hola");
    assert_eq!(hits_a.count(), 1);
    assert_eq!(hits_b.count(), 1);
    assert_eq!(coordinator.health("a").unwrap().failures, 1);
    assert_eq!(coordinator.health("b").unwrap().failures, 0);
    assert_eq!(coordinator.cached("hello", Lang::Es).as_deref(), Some("hola"));
}

#[tokio::test]
async fn cache_hit_skips_the_network() {
    let hits = Hits::default();
    let endpoint = canned("hola", hits.clone()).await;
    let coordinator = coordinator_with(vec![libre("a", &endpoint, 1)], 5, 10);

    assert_eq!(coordinator.translate("hello", Lang::Es).await, "hola");
    assert_eq!(coordinator.translate("hello", Lang::Es).await, "hola");
    assert_eq!(hits.count(), 1);

    // A different language is a distinct pair.
    assert_eq!(coordinator.translate("hello", Lang::De).await, "hola");
    assert_eq!(hits.count(), 2);
}

#[tokio::test]
async fn attempts_follow_ascending_priority() {
    let hits_first = Hits::default();
    let hits_second = Hits::default();
    let first = canned("primero", hits_first.clone()).await;
    let second = canned("segundo", hits_second.clone()).await;
    // Declared out of order to prove sorting is by priority, not position.
    let coordinator = coordinator_with(
        vec![libre("zz_first", &first, 1), libre("aa_second", &second, 2)],
        5,
        10,
    );

    assert_eq!(coordinator.translate("hello", Lang::Es).await, "primero");
    assert_eq!(hits_first.count(), 1);
    assert_eq!(hits_second.count(), 0);
}

#[tokio::test]
async fn not_enabled_providers_are_never_invoked() {
    let hits_off = Hits::default();
    let hits_on = Hits::default();
    let off = canned("apagado", hits_off.clone()).await;
    let on = canned("hola", hits_on.clone()).await;
    let mut disabled = libre("off", &off, 1);
    disabled.enabled = false;
    let coordinator = coordinator_with(vec![disabled, libre("on", &on, 2)], 5, 10);

    assert_eq!(coordinator.translate("hello", Lang::Es).await, "hola");
    assert_eq!(hits_off.count(), 0);
    assert_eq!(hits_on.count(), 1);
}

#[tokio::test]
async fn provider_disables_after_max_failures() {
    let hits_a = Hits::default();
    let hits_b = Hits::default();
    let a = failing(StatusCode::INTERNAL_SERVER_ERROR, hits_a.clone()).await;
    let b = canned("hola", hits_b.clone()).await;
    let coordinator = coordinator_with(vec![libre("a", &a, 1), libre("b", &b, 2)], 2, 60);

    coordinator.translate("one", Lang::Es).await;
    coordinator.translate("two", Lang::Es).await;
    assert!(coordinator.health("a").unwrap().disabled);

    // The third call skips the disabled provider entirely.
    assert_eq!(coordinator.translate("three", Lang::Es).await, "hola");
    assert_eq!(hits_a.count(), 2);
    assert_eq!(hits_b.count(), 3);
}

#[tokio::test]
async fn total_failure_degrades_to_the_input() {
    let hits_a = Hits::default();
    let hits_b = Hits::default();
    let a = failing(StatusCode::NOT_FOUND, hits_a.clone()).await;
    let b = failing(StatusCode::INTERNAL_SERVER_ERROR, hits_b.clone()).await;
    let coordinator = coordinator_with(vec![libre("a", &a, 1), libre("b", &b, 2)], 5, 10);

    assert_eq!(coordinator.translate("hello", Lang::Es).await, "hello");
    assert_eq!(hits_a.count(), 1);
    assert_eq!(hits_b.count(), 1);
    // Degraded results are never cached.
    assert!(coordinator.cached("hello", Lang::Es).is_none());
}

#[tokio::test]
async fn timeouts_count_as_failures() {
    let hits_slow = Hits::default();
    let hits_fast = Hits::default();
    let slow = serve(Router::new().route(
        "/translate",
        post({
            let hits = hits_slow.clone();
            move || {
                let hits = hits.clone();
                async move {
                    hits.bump();
                    tokio::time::sleep(Duration::from_secs(10)).await;
                    Json(json!({ "translatedText": "late" }))
                }
            }
        }),
    ))
    .await;
    let fast = canned("hola", hits_fast.clone()).await;

    let mut slow_config = libre("slow", &slow, 1);
    slow_config.timeout_secs = Some(1);
    let coordinator = coordinator_with(vec![slow_config, libre("fast", &fast, 2)], 5, 10);

    assert_eq!(coordinator.translate("hello", Lang::Es).await, "hola");
    assert_eq!(coordinator.health("slow").unwrap().failures, 1);
    assert_eq!(coordinator.health("fast").unwrap().failures, 0);
}

#[tokio::test]
async fn noop_translation_falls_through_without_a_failure() {
    let hits_parrot = Hits::default();
    let hits_real = Hits::default();
    let parrot = parroting(hits_parrot.clone()).await;
    let real = canned("hola", hits_real.clone()).await;
    let coordinator = coordinator_with(vec![libre("parrot", &parrot, 1), libre("real", &real, 2)], 5, 10);

    assert_eq!(coordinator.translate("hello", Lang::Es).await, "hola");
    assert_eq!(hits_parrot.count(), 1);
    // The no-op provider is neither failed nor disabled.
    let health = coordinator.health("parrot").unwrap();
    assert_eq!(health.failures, 0);
    assert!(!health.disabled);
}

#[tokio::test]
async fn success_resets_an_accumulated_streak() {
    // Fails on the first hit, succeeds afterwards.
    let hits = Hits::default();
    let endpoint = serve(Router::new().route(
        "/translate",
        post({
            let hits = hits.clone();
            move || {
                let hits = hits.clone();
                async move {
                    hits.bump();
                    if hits.count() == 1 {
                        Err(StatusCode::BAD_GATEWAY)
                    } else {
                        Ok(Json(json!({ "translatedText": "hola" })))
                    }
                }
            }
        }),
    ))
    .await;
    let coordinator = coordinator_with(vec![libre("flaky", &endpoint, 1)], 5, 10);

    assert_eq!(coordinator.translate("one", Lang::Es).await, "one");
    assert_eq!(coordinator.health("flaky").unwrap().failures, 1);

    assert_eq!(coordinator.translate("two", Lang::Es).await, "hola");
    let health = coordinator.health("flaky").unwrap();
    assert_eq!(health.failures, 0);
    assert!(!health.disabled);
}

#[tokio::test]
async fn manual_sweep_reenables_an_expired_provider() {
    let hits = Hits::default();
    let endpoint = failing(StatusCode::SERVICE_UNAVAILABLE, hits.clone()).await;
    // failure_timeout of zero: eligible for retry as soon as it is disabled.
    let coordinator = coordinator_with(vec![libre("a", &endpoint, 1)], 1, 0);

    coordinator.translate("hello", Lang::Es).await;
    assert!(coordinator.health("a").unwrap().disabled);
    assert_eq!(coordinator.status()[0].state, "Disabled (0s until retry)");

    assert_eq!(coordinator.sweep(), 1);
    let health = coordinator.health("a").unwrap();
    assert!(!health.disabled);
    assert_eq!(health.failures, 0);

    // The provider is back in rotation.
    coordinator.translate("again", Lang::Es).await;
    assert_eq!(hits.count(), 2);
}

#[tokio::test]
async fn background_sweeper_recovers_a_disabled_provider() {
    let endpoint = failing(StatusCode::SERVICE_UNAVAILABLE, Hits::default()).await;
    let coordinator = coordinator_with(vec![libre("a", &endpoint, 1)], 1, 0);

    let (shutdown, _) = tokio::sync::broadcast::channel(1);
    let handle = coordinator.start_sweeper(shutdown.subscribe());

    coordinator.translate("hello", Lang::Es).await;
    assert!(coordinator.health("a").unwrap().disabled);

    // One sweep period (1s) plus slack.
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(!coordinator.health("a").unwrap().disabled);

    shutdown.send(()).expect("signal sweeper");
    handle.await.expect("sweeper exits cleanly");
}

#[tokio::test]
async fn translate_all_translates_every_fragment() {
    let hits = Hits::default();
    let endpoint = echoing(hits.clone()).await;
    let coordinator = coordinator_with(vec![libre("a", &endpoint, 1)], 5, 10);

    let page = PageSnapshot::capture(vec![
        Fragment::new(FragmentId(0), "One"),
        Fragment::new(FragmentId(1), "Two"),
        Fragment::new(FragmentId(2), "Three"),
    ]);

    let mut results = coordinator
        .translate_all(&page, Lang::Es)
        .await
        .expect("no pass in flight");
    results.sort_by_key(|(id, _)| *id);
    assert_eq!(
        results,
        vec![
            (FragmentId(0), "One-xl".to_owned()),
            (FragmentId(1), "Two-xl".to_owned()),
            (FragmentId(2), "Three-xl".to_owned()),
        ]
    );
    assert_eq!(hits.count(), 3);
}

#[tokio::test]
async fn concurrent_bulk_pass_is_a_noop() {
    let hits = Hits::default();
    let slow = serve(Router::new().route(
        "/translate",
        post({
            let hits = hits.clone();
            move |Json(body): Json<Value>| {
                let hits = hits.clone();
                async move {
                    hits.bump();
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    let q = body["q"].as_str().unwrap_or_default();
                    Json(json!({ "translatedText": format!("{q}-xl") }))
                }
            }
        }),
    ))
    .await;
    let coordinator = coordinator_with(vec![libre("a", &slow, 1)], 5, 10);

    let page = PageSnapshot::capture(vec![Fragment::new(FragmentId(0), "One")]);
    let (first, second) = tokio::join!(
        coordinator.translate_all(&page, Lang::Es),
        coordinator.translate_all(&page, Lang::Es),
    );
    assert!(first.is_some());
    assert!(second.is_none());

    // The guard clears once the pass settles.
    assert!(coordinator.translate_all(&page, Lang::Es).await.is_some());
}

#[tokio::test]
async fn restore_original_ignores_cache_state() {
    let hits = Hits::default();
    let endpoint = echoing(hits.clone()).await;
    let coordinator = coordinator_with(vec![libre("a", &endpoint, 1)], 5, 10);

    let page = PageSnapshot::capture(vec![
        Fragment::new(FragmentId(0), "Welcome"),
        Fragment::new(FragmentId(1), "Contact us"),
    ]);
    coordinator.translate_all(&page, Lang::Es).await;

    let restored = coordinator.restore_original(&page);
    assert_eq!(
        restored,
        vec![
            (FragmentId(0), "Welcome".to_owned()),
            (FragmentId(1), "Contact us".to_owned()),
        ]
    );
}

#[tokio::test]
async fn change_language_persists_the_preference() {
    let dir = tempfile::tempdir().expect("tempdir");
    let prefs_path = dir.path().join("prefs.toml");
    let endpoint = echoing(Hits::default()).await;

    let config = CoordinatorConfig {
        providers: vec![libre("a", &endpoint, 1)],
        prefs_path: Some(prefs_path.clone()),
        ..CoordinatorConfig::default()
    };
    let coordinator = Coordinator::new(config.clone()).expect("coordinator");
    assert_eq!(coordinator.language(), Lang::En);

    let page = PageSnapshot::capture(vec![Fragment::new(FragmentId(0), "Welcome")]);
    let results = coordinator
        .change_language(&page, Lang::Es)
        .await
        .expect("change language");
    assert_eq!(results, vec![(FragmentId(0), "Welcome-xl".to_owned())]);
    assert_eq!(coordinator.language(), Lang::Es);

    // A fresh coordinator restores the persisted choice.
    let revived = Coordinator::new(config).expect("coordinator");
    assert_eq!(revived.language(), Lang::Es);

    // Switching back to the source language restores originals.
    let results = revived
        .change_language(&page, Lang::En)
        .await
        .expect("change language");
    assert_eq!(results, vec![(FragmentId(0), "Welcome".to_owned())]);
}

#[tokio::test]
async fn configure_enables_a_key_gated_provider() {
    let router = Router::new().route(
        "/v2/translate",
        post(|| async { Json(json!({ "translations": [{ "text": "hallo" }] })) }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });

    let deepl = ProviderConfig {
        id: "deepl".into(),
        name: "DeepL".into(),
        kind: ProviderKind::DeepL,
        endpoint: format!("http://{addr}/v2/translate"),
        enabled: false,
        priority: 1,
        timeout_secs: None,
        credentials: None,
    };
    let coordinator = coordinator_with(vec![deepl], 5, 10);

    // Unconfigured and disabled: nothing to try, input comes back.
    assert_eq!(coordinator.translate("hello", Lang::De).await, "hello");

    coordinator
        .configure("deepl", Credentials::key("secret"))
        .expect("configure");
    assert!(coordinator.status()[0].enabled);
    assert!(coordinator.status()[0].configured);
    assert_eq!(coordinator.translate("hello", Lang::De).await, "hallo");
}

#[tokio::test]
async fn configure_unknown_provider_fails() {
    let endpoint = canned("hola", Hits::default()).await;
    let coordinator = coordinator_with(vec![libre("a", &endpoint, 1)], 5, 10);

    let err = coordinator
        .configure("nope", Credentials::key("k"))
        .unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[tokio::test]
async fn status_reports_in_priority_order() {
    let endpoint = canned("hola", Hits::default()).await;
    let coordinator = coordinator_with(
        vec![libre("last", &endpoint, 9), libre("first", &endpoint, 1)],
        5,
        10,
    );

    let status = coordinator.status();
    assert_eq!(status[0].id, "first");
    assert_eq!(status[1].id, "last");
    assert_eq!(status[0].state, "Healthy");
}

#[test]
fn empty_fleet_is_rejected() {
    let result = Coordinator::new(CoordinatorConfig {
        providers: Vec::new(),
        prefs_path: None,
        ..CoordinatorConfig::default()
    });
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("at least one provider")
    );
}
