/// Dispatcher integration tests against a mock notification endpoint
#[path = "common/mod.rs"]
mod common;

use common::{FALLBACK_DELAY, RecordingLauncher, dispatcher_for, valid_fields};
use contactflow_client::events::FormEvent;
use contactflow_client::view::Banner;
use contactflow_client::{ContactForm, FormView, HeadlessForm, SubmissionState, SubmitOutcome};
use contactflow_core::constants::{MSG_FIX_ERRORS, MSG_MAILTO_OPENED, MSG_SUBMISSION_ACCEPTED};
use contactflow_core::models::FormFields;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_endpoint(server: &MockServer, response: ResponseTemplate) -> String {
    Mock::given(method("POST"))
        .and(path("/v1/contact"))
        .respond_with(response)
        .mount(server)
        .await;
    format!("{}/v1/contact", server.uri())
}

#[tokio::test]
async fn success_resets_form_and_shows_message_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/contact"))
        .and(body_partial_json(json!({
            "name": "Jane Doe",
            "businessType": "restaurant",
            "services": ["website"],
            "source": "probuild-website"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "message": "Thanks"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let launcher = Arc::new(RecordingLauncher::default());
    let dispatcher = dispatcher_for(&format!("{}/v1/contact", server.uri()), launcher.clone());
    let form = HeadlessForm::with_values(valid_fields());

    let outcome = dispatcher.submit(form.values(), &form).await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Delivered);
    assert_eq!(
        form.banner_history(),
        vec![Banner::Success(MSG_SUBMISSION_ACCEPTED.to_string())]
    );
    assert_eq!(form.values(), FormFields::default());
    assert!(launcher.opened().is_empty());
    assert!(!form.is_loading());
    assert_eq!(dispatcher.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn network_error_opens_exactly_one_mailto() {
    // Port 1 refuses connections
    let endpoint = "http://127.0.0.1:1/v1/contact";

    let launcher = Arc::new(RecordingLauncher::default());
    let dispatcher = dispatcher_for(endpoint, launcher.clone());
    let form = HeadlessForm::with_values(valid_fields());

    let started = Instant::now();
    let outcome = dispatcher.submit(form.values(), &form).await.unwrap();

    let opened = launcher.opened();
    assert_eq!(opened.len(), 1);
    assert!(opened[0].starts_with("mailto:owner@example.com?subject="));
    assert!(opened[0].contains("We%20need%20online%20ordering%20for%20our%20diner."));
    assert_eq!(outcome, SubmitOutcome::FellBack { uri: opened[0].clone() });

    assert!(started.elapsed() >= FALLBACK_DELAY);
    assert_eq!(
        form.banner(),
        Some(Banner::Success(MSG_MAILTO_OPENED.to_string()))
    );
    assert_eq!(form.reset_count(), 1);
    assert!(!form.is_loading());
}

#[tokio::test]
async fn server_rejection_falls_back() {
    let server = MockServer::start().await;
    let endpoint = mount_endpoint(
        &server,
        ResponseTemplate::new(400)
            .set_body_json(json!({"success": false, "message": "Submission rejected"})),
    )
    .await;

    let launcher = Arc::new(RecordingLauncher::default());
    let dispatcher = dispatcher_for(&endpoint, launcher.clone());
    let form = HeadlessForm::with_values(valid_fields());

    let outcome = dispatcher.submit(form.values(), &form).await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::FellBack { .. }));
    assert_eq!(launcher.opened().len(), 1);
}

#[tokio::test]
async fn success_flag_false_falls_back() {
    let server = MockServer::start().await;
    let endpoint = mount_endpoint(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"success": false, "message": "nope"})),
    )
    .await;

    let launcher = Arc::new(RecordingLauncher::default());
    let dispatcher = dispatcher_for(&endpoint, launcher.clone());
    let form = HeadlessForm::with_values(valid_fields());

    let outcome = dispatcher.submit(form.values(), &form).await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::FellBack { .. }));
}

#[tokio::test]
async fn invalid_form_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let launcher = Arc::new(RecordingLauncher::default());
    let dispatcher = dispatcher_for(&format!("{}/v1/contact", server.uri()), launcher.clone());
    let mut fields = valid_fields();
    fields.message = "a".repeat(1001);
    let form = HeadlessForm::with_values(fields.clone());

    let outcome = dispatcher.submit(fields, &form).await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(form.banner(), Some(Banner::Error(MSG_FIX_ERRORS.to_string())));
    assert!(launcher.opened().is_empty());
}

#[tokio::test]
async fn double_submit_sends_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/contact"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "message": "ok"}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let launcher = Arc::new(RecordingLauncher::default());
    let dispatcher = Arc::new(dispatcher_for(
        &format!("{}/v1/contact", server.uri()),
        launcher,
    ));
    let view = Arc::new(HeadlessForm::with_values(valid_fields()));
    let form = ContactForm::attach(view.clone(), dispatcher.clone(), None).unwrap();

    form.emit(FormEvent::Submit);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(dispatcher.state(), SubmissionState::Submitting);
    assert!(view.is_loading());

    form.emit(FormEvent::Submit);
    form.settle().await;

    assert_eq!(
        view.banner_history(),
        vec![Banner::Success(MSG_SUBMISSION_ACCEPTED.to_string())]
    );
    assert_eq!(dispatcher.state(), SubmissionState::Idle);
}
