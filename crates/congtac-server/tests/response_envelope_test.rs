// Integration tests for the response envelope over a real actix app

use actix_web::{App, HttpResponse, test, web};
use congtac_common::{Lang, MessageKey};
use congtac_server::model::ApiResponse;

async fn ok_handler() -> HttpResponse {
    ApiResponse::http_ok(
        serde_json::json!({ "project_id": 7 }),
        MessageKey::ProjectCreated,
        Lang::Vi,
    )
}

async fn fail_handler() -> HttpResponse {
    ApiResponse::http_fail(404, MessageKey::ProjectNotFound, Lang::En)
}

async fn message_handler() -> HttpResponse {
    ApiResponse::http_message(MessageKey::SignoutSuccess, Lang::Vi)
}

#[actix_web::test]
async fn test_success_envelope() {
    let app = test::init_service(App::new().route("/ok", web::get().to(ok_handler))).await;

    let req = test::TestRequest::get().uri("/ok").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Tạo dự án thành công");
    assert_eq!(body["data"]["project_id"], 7);
    assert!(body.get("error").is_none());
}

#[actix_web::test]
async fn test_failure_envelope_status_and_language() {
    let app = test::init_service(App::new().route("/fail", web::get().to(fail_handler))).await;

    let req = test::TestRequest::get().uri("/fail").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Project not found");
    assert!(body.get("data").is_none());
}

#[actix_web::test]
async fn test_message_only_envelope() {
    let app = test::init_service(App::new().route("/msg", web::get().to(message_handler))).await;

    let req = test::TestRequest::get().uri("/msg").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Đăng xuất thành công");
    assert!(body.get("data").is_none());
}
