mod common;

use actix_web::{http::header, test};
use serde_json::json;
use serial_test::serial;

use common::{admin_token, non_admin_token, TestApp, KNOWN_BOOKING_ID};

#[actix_rt::test]
#[serial]
async fn test_admin_bookings_without_auth() {
    let app = test::init_service(TestApp::create_app()).await;

    let req = test::TestRequest::get().uri("/api/admin/bookings").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn test_admin_bookings_with_garbage_token() {
    let app = test::init_service(TestApp::create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/bookings")
        .insert_header((header::AUTHORIZATION, "Bearer not_a_token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn test_admin_bookings_without_admin_role() {
    let app = test::init_service(TestApp::create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/bookings")
        .insert_header((header::AUTHORIZATION, non_admin_token()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
}

#[actix_rt::test]
#[serial]
async fn test_admin_bookings_with_admin_token() {
    let app = test::init_service(TestApp::create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/bookings")
        .insert_header((header::AUTHORIZATION, admin_token()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_rt::test]
#[serial]
async fn test_pending_booking_can_be_confirmed() {
    let app = test::init_service(TestApp::create_app()).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/bookings/{}/status", KNOWN_BOOKING_ID))
        .insert_header((header::AUTHORIZATION, admin_token()))
        .set_json(&json!({
            "status": "confirmed",
            "expected_status": "pending",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "confirmed");
}

#[actix_rt::test]
#[serial]
async fn test_pending_booking_cannot_skip_to_checked_in() {
    let app = test::init_service(TestApp::create_app()).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/bookings/{}/status", KNOWN_BOOKING_ID))
        .insert_header((header::AUTHORIZATION, admin_token()))
        .set_json(&json!({
            "status": "checked_in",
            "expected_status": "pending",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
}

#[actix_rt::test]
#[serial]
async fn test_terminal_statuses_reject_all_transitions() {
    let app = test::init_service(TestApp::create_app()).await;

    for from in ["cancelled", "checked_out"] {
        for target in ["pending", "confirmed", "checked_in", "checked_out", "cancelled"] {
            let req = test::TestRequest::put()
                .uri(&format!("/api/admin/bookings/{}/status", KNOWN_BOOKING_ID))
                .insert_header((header::AUTHORIZATION, admin_token()))
                .set_json(&json!({
                    "status": target,
                    "expected_status": from,
                }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(
                resp.status(),
                409,
                "{} -> {} should be rejected",
                from,
                target
            );
        }
    }
}

#[actix_rt::test]
#[serial]
async fn test_delete_booking() {
    let app = test::init_service(TestApp::create_app()).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/bookings/{}", KNOWN_BOOKING_ID))
        .insert_header((header::AUTHORIZATION, admin_token()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_rt::test]
#[serial]
async fn test_delete_missing_booking_returns_not_found() {
    let app = test::init_service(TestApp::create_app()).await;

    let req = test::TestRequest::delete()
        .uri("/api/admin/bookings/65a0000000000000000000ee")
        .insert_header((header::AUTHORIZATION, admin_token()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}
