#![cfg(feature = "mock")]

use actix_web::{App, http::StatusCode, test, web};
use smart_fan::api::{Api, RESET_MESSAGE};
use smart_fan::services::tracking::ControllerReport;
use std::time::Duration;
use tokio::sync::mpsc;

#[mockall_double::double]
use smart_fan::controller_client::ControllerClient;

type TestApi = Api<ControllerClient>;

/// Mock controller that hands every forwarded report to the returned receiver
fn recording_controller() -> (ControllerClient, mpsc::UnboundedReceiver<ControllerReport>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut controller_mock = ControllerClient::default();
    controller_mock.expect_send_report().returning(move |report| {
        let _ = tx.send(report);
        Box::pin(async { Ok(()) })
    });
    (controller_mock, rx)
}

macro_rules! init_app {
    ($api:expr) => {
        test::init_service(
            App::new()
                .app_data($api)
                .route("/coordinates", web::get().to(TestApi::coordinates))
                .route("/reset", web::get().to(TestApi::reset))
                .route("/detections", web::post().to(TestApi::detections))
                .route("/version", web::get().to(TestApi::version)),
        )
        .await
    };
}

async fn next_report(rx: &mut mpsc::UnboundedReceiver<ControllerReport>) -> ControllerReport {
    tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("report was not forwarded in time")
        .expect("report channel closed")
}

fn frame(detections: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "frame_width": 640,
        "frame_height": 480,
        "detections": detections
    })
}

#[tokio::test]
async fn coordinates_start_empty() {
    let (controller, _rx) = recording_controller();
    let app = init_app!(web::Data::new(TestApi::new(controller)));

    let req = test::TestRequest::get().uri("/coordinates").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body,
        serde_json::json!({
            "person_detected": false,
            "group_mode_active": false,
            "coordinates": null
        })
    );
}

#[tokio::test]
async fn single_person_is_published_and_forwarded() {
    let (controller, mut rx) = recording_controller();
    let app = init_app!(web::Data::new(TestApi::new(controller)));

    let req = test::TestRequest::post()
        .uri("/detections")
        .set_json(frame(serde_json::json!([
            {"x1": 270, "y1": 140, "x2": 370, "y2": 340, "score": 0.8, "class_id": 1}
        ])))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/coordinates").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["person_detected"], true);
    assert_eq!(body["coordinates"]["center_x"], 320);
    assert_eq!(body["coordinates"]["center_y"], 240);

    let report = next_report(&mut rx).await;
    assert!(matches!(
        report,
        ControllerReport::SinglePerson { x: 320, y: 240, .. }
    ));
}

#[tokio::test]
async fn group_activates_swing_mode() {
    let (controller, mut rx) = recording_controller();
    let app = init_app!(web::Data::new(TestApi::new(controller)));

    let req = test::TestRequest::post()
        .uri("/detections")
        .set_json(frame(serde_json::json!([
            {"x1": 0, "y1": 0, "x2": 50, "y2": 100, "score": 0.9, "class_id": 1},
            {"x1": 400, "y1": 0, "x2": 450, "y2": 100, "score": 0.9, "class_id": 2}
        ])))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["group_mode_active"], true);
    assert_eq!(body["person_detected"], false);
    assert_eq!(
        next_report(&mut rx).await,
        ControllerReport::MultiplePeople {
            count: 2,
            x: 0,
            y: 0,
            swing_duration: 30
        }
    );
}

#[tokio::test]
async fn reset_clears_tracking_and_recenters_controller() {
    let (controller, mut rx) = recording_controller();
    let app = init_app!(web::Data::new(TestApi::new(controller)));

    let req = test::TestRequest::post()
        .uri("/detections")
        .set_json(frame(serde_json::json!([
            {"x1": 270, "y1": 140, "x2": 370, "y2": 340, "score": 0.8, "class_id": 3}
        ])))
        .to_request();
    test::call_service(&app, req).await;
    next_report(&mut rx).await;

    let req = test::TestRequest::get().uri("/reset").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, RESET_MESSAGE);

    assert_eq!(
        next_report(&mut rx).await,
        ControllerReport::Reset {
            return_center: true
        }
    );

    let req = test::TestRequest::get().uri("/coordinates").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["person_detected"], false);
    assert_eq!(body["coordinates"], serde_json::Value::Null);
}

#[tokio::test]
async fn controller_failure_does_not_fail_request() {
    let mut controller_mock = ControllerClient::default();
    controller_mock
        .expect_send_report()
        .returning(|_| Box::pin(async { Err(anyhow::anyhow!("controller unreachable")) }));
    let app = init_app!(web::Data::new(TestApi::new(controller_mock)));

    let req = test::TestRequest::get().uri("/reset").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn malformed_frame_is_rejected() {
    let mut controller_mock = ControllerClient::default();
    controller_mock.expect_send_report().never();
    let app = init_app!(web::Data::new(TestApi::new(controller_mock)));

    let req = test::TestRequest::post()
        .uri("/detections")
        .set_json(serde_json::json!({"detections": "none"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn version_is_crate_version() {
    let app = init_app!(web::Data::new(TestApi::new(ControllerClient::default())));

    let req = test::TestRequest::get().uri("/version").to_request();
    let body = test::call_and_read_body(&app, req).await;

    assert_eq!(body, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn poisoned_tracker_is_internal_server_error() {
    let mut controller_mock = ControllerClient::default();
    controller_mock.expect_send_report().never();
    let api = web::Data::new(TestApi::new(controller_mock));

    let holder = api.clone();
    let _ = std::thread::spawn(move || {
        let _guard = holder.tracker.lock();
        panic!("tracker lock holder panicked");
    })
    .join();
    assert!(api.tracker.is_poisoned());

    let app = init_app!(api);

    for req in [
        test::TestRequest::get().uri("/coordinates").to_request(),
        test::TestRequest::get().uri("/reset").to_request(),
    ] {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

#[tokio::test]
async fn extreme_box_is_tracked_without_overflow() {
    let (controller, mut rx) = recording_controller();
    let app = init_app!(web::Data::new(TestApi::new(controller)));

    let req = test::TestRequest::post()
        .uri("/detections")
        .set_json(frame(serde_json::json!([
            {"x1": i32::MAX - 1, "y1": 0, "x2": i32::MAX, "y2": 10, "score": 0.9, "class_id": 1}
        ])))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["person_detected"], true);
    assert_eq!(body["coordinates"]["center_x"], i32::MAX - 1);
    assert!(matches!(
        next_report(&mut rx).await,
        ControllerReport::SinglePerson { .. }
    ));
}
