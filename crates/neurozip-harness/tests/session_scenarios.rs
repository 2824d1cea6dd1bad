//! End-to-end sessions through the production runtime.
//!
//! Each test scripts a user at the keyboard with [`SimDriver`], answers from a
//! [`ScriptedTransport`] and runs [`Runtime`] on a paused tokio clock, with
//! the standard invariants checked on every render.

use std::time::Duration;

use neurozip_app::{KeyInput, Mode, Request, Runtime, ServiceStatus};
use neurozip_client::{Health, TransportError};
use neurozip_harness::{InvariantRegistry, ScriptedReply, ScriptedTransport, SimDriver};

const SERVER: &str = "http://localhost:5000";

fn driver() -> SimDriver {
    SimDriver::new().with_invariants(InvariantRegistry::standard())
}

fn runtime(driver: SimDriver, transport: ScriptedTransport) -> Runtime<SimDriver, ScriptedTransport> {
    Runtime::new(driver, transport, SERVER.into())
}

#[tokio::test(start_paused = true)]
async fn compress_hello_world() {
    let transport = ScriptedTransport::new()
        .reply(ScriptedReply::ok("aGVsbG8gd29ybGQ=").after(Duration::from_millis(30)));
    let driver = driver().type_text("hello world").key(KeyInput::F(5));

    let mut rt = runtime(driver, transport.clone());
    rt.run().await.unwrap();

    let app = rt.app();
    assert_eq!(app.output().text(), "aGVsbG8gd29ybGQ=");
    assert!(!app.is_busy());

    let stats = app.stats().copied().unwrap();
    assert_eq!(stats.input_size, 11);
    assert_eq!(stats.output_size, 16);
    assert_eq!(stats.ratio_text(), "1.45");
    assert_eq!(stats.time_ms_text(), "30.0");

    assert_eq!(transport.calls(), vec![Request::Compress { text: "hello world".into() }]);
    assert!(rt.driver().is_stopped());
}

#[tokio::test(start_paused = true)]
async fn decompress_reports_inverse_ratio() {
    let transport = ScriptedTransport::new().reply(ScriptedReply::ok("hello"));
    let driver = driver().key(KeyInput::F(3)).paste("aGVsbG8=\n").key(KeyInput::Ctrl('r'));

    let mut rt = runtime(driver, transport.clone());
    rt.run().await.unwrap();

    let app = rt.app();
    assert_eq!(app.mode(), Mode::Decompress);
    assert_eq!(app.output().text(), "hello");

    let stats = app.stats().copied().unwrap();
    assert_eq!(stats.input_size, 9);
    assert_eq!(stats.output_size, 5);
    assert_eq!(stats.ratio_text(), "1.80");

    assert_eq!(transport.calls(), vec![Request::Decompress { data: "aGVsbG8=\n".into() }]);
}

#[tokio::test(start_paused = true)]
async fn network_error_raises_alert() {
    let transport = ScriptedTransport::new().reply(
        ScriptedReply::err(TransportError::Connection("connection refused".into()))
            .after(Duration::from_millis(5)),
    );
    let driver = driver().type_text("abc").key(KeyInput::F(5));

    let mut rt = runtime(driver, transport);
    rt.run().await.unwrap();

    let app = rt.app();
    assert_eq!(app.alert(), Some("Error: connection failed: connection refused"));
    assert!(app.output().is_empty());
    assert!(app.stats().is_none());
    assert!(!app.is_busy());
}

#[tokio::test(start_paused = true)]
async fn failure_after_success_clears_previous_result() {
    let transport = ScriptedTransport::new()
        .reply(ScriptedReply::ok("YQ=="))
        .reply(ScriptedReply::err(TransportError::Status(500)));
    let driver = driver()
        .type_text("a")
        .key(KeyInput::F(5))
        .wait(Duration::from_millis(10))
        .key(KeyInput::F(5));

    let mut rt = runtime(driver, transport);
    rt.run().await.unwrap();

    let app = rt.app();
    assert_eq!(app.alert(), Some("Error: service returned HTTP 500"));
    assert!(app.output().is_empty());
    assert!(app.stats().is_none());
}

#[tokio::test(start_paused = true)]
async fn busy_spans_dispatch_to_completion() {
    let transport =
        ScriptedTransport::new().reply(ScriptedReply::ok("eHl6").after(Duration::from_millis(100)));
    let driver = driver()
        .type_text("xyz")
        .key(KeyInput::F(5))
        .wait(Duration::from_millis(20))
        .event(neurozip_app::AppEvent::Tick)
        .wait(Duration::from_millis(20))
        .event(neurozip_app::AppEvent::Tick);

    let mut rt = runtime(driver, transport);
    rt.run().await.unwrap();

    let snapshots = rt.driver().snapshots();
    let first_busy = snapshots.iter().position(|s| s.busy()).unwrap();
    let last_busy = snapshots.iter().rposition(|s| s.busy()).unwrap();

    // Run render plus two spinner renders, then the completion.
    assert!(last_busy >= first_busy + 2);
    assert!(snapshots[first_busy..=last_busy].iter().all(|s| s.busy() && !s.has_stats));

    let last = snapshots.last().unwrap();
    assert!(!last.busy());
    assert!(last.has_stats);
    assert!(rt.app().spinner() >= 2);
}

#[tokio::test(start_paused = true)]
async fn run_key_while_busy_sends_nothing() {
    let transport =
        ScriptedTransport::new().reply(ScriptedReply::ok("YWJj").after(Duration::from_millis(50)));
    let driver = driver()
        .type_text("abc")
        .key(KeyInput::F(5))
        .wait(Duration::from_millis(10))
        .key(KeyInput::F(5));

    let mut rt = runtime(driver, transport.clone());
    rt.run().await.unwrap();

    assert_eq!(transport.calls().len(), 1);
    assert_eq!(rt.app().output().text(), "YWJj");
}

#[tokio::test(start_paused = true)]
async fn late_response_uses_mode_at_dispatch() {
    let transport =
        ScriptedTransport::new().reply(ScriptedReply::ok("ab").after(Duration::from_millis(40)));
    let driver = driver()
        .type_text("abcd")
        .key(KeyInput::F(5))
        .wait(Duration::from_millis(10))
        .key(KeyInput::F(3));

    let mut rt = runtime(driver, transport);
    rt.run().await.unwrap();

    let app = rt.app();
    assert_eq!(app.mode(), Mode::Decompress);
    assert_eq!(app.output().text(), "ab");
    assert_eq!(app.stats().map(|s| s.ratio_text()).as_deref(), Some("0.50"));
}

#[tokio::test(start_paused = true)]
async fn mode_switch_keeps_session() {
    let transport = ScriptedTransport::new().reply(ScriptedReply::ok("aGk="));
    let driver = driver()
        .type_text("hi")
        .key(KeyInput::F(5))
        .wait(Duration::from_millis(1))
        .key(KeyInput::Ctrl('t'))
        .key(KeyInput::F(2))
        .key(KeyInput::F(3));

    let mut rt = runtime(driver, transport);
    rt.run().await.unwrap();

    let app = rt.app();
    assert_eq!(app.mode(), Mode::Decompress);
    assert_eq!(app.input().text(), "hi");
    assert_eq!(app.output().text(), "aGk=");
    assert_eq!(app.stats().map(|s| (s.input_size, s.output_size)), Some((2, 4)));
}

#[tokio::test(start_paused = true)]
async fn quit_stops_before_script_ends() {
    let driver = driver().type_text("ab").key(KeyInput::Esc).type_text("cd");

    let mut rt = runtime(driver, ScriptedTransport::new());
    rt.run().await.unwrap();

    assert_eq!(rt.app().input().text(), "ab");
    assert_eq!(rt.driver().remaining(), 2);
    assert!(rt.driver().is_stopped());
}

#[tokio::test(start_paused = true)]
async fn alert_must_be_dismissed_before_editing() {
    let transport = ScriptedTransport::new().reply(ScriptedReply::err(TransportError::Status(502)));
    let driver = driver()
        .type_text("a")
        .key(KeyInput::F(5))
        .wait(Duration::from_millis(1))
        .type_text("ignored")
        .key(KeyInput::Enter)
        .type_text("b");

    let mut rt = runtime(driver, transport);
    rt.run().await.unwrap();

    let app = rt.app();
    assert!(app.alert().is_none());
    assert_eq!(app.input().text(), "ab");
}

#[tokio::test(start_paused = true)]
async fn probe_marks_service_online() {
    let driver = driver().wait(Duration::from_millis(1));

    let mut rt = runtime(driver, ScriptedTransport::new());
    rt.run().await.unwrap();

    assert_eq!(rt.app().service(), &ServiceStatus::Online);
}

#[tokio::test(start_paused = true)]
async fn probe_reports_unreachable_service() {
    let transport = ScriptedTransport::new()
        .with_health(Err(TransportError::Connection("connection refused".into())));
    let driver = driver().wait(Duration::from_millis(1));

    let mut rt = runtime(driver, transport);
    rt.run().await.unwrap();

    assert_eq!(rt.app().service(), &ServiceStatus::Offline {
        reason: "connection failed: connection refused".into()
    });
}

#[tokio::test(start_paused = true)]
async fn probe_reports_unhealthy_service() {
    let transport = ScriptedTransport::new()
        .with_health(Ok(Health { status: "degraded".into(), message: Some("model not loaded".into()) }));
    let driver = driver().wait(Duration::from_millis(1));

    let mut rt = runtime(driver, transport);
    rt.run().await.unwrap();

    assert_eq!(rt.app().service(), &ServiceStatus::Offline { reason: "model not loaded".into() });
}
