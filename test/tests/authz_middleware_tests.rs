//! Middleware authorization tests.
//!
//! Role → URL pattern → HTTP verb checks applied to routed requests.


use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App, HttpResponse};

use actix_authz_core::http::authz::AuthzTransform;
use actix_authz_test::handlers;
use actix_authz_test::security::{self, BearerAuthenticator};

use common::{bearer, create_test_app, create_test_app_with_login};

// =============================================================================
// Granted Access Tests
// =============================================================================

#[actix_web::test]
async fn test_photos_list_with_guest() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/photos")
        .insert_header((header::AUTHORIZATION, bearer("guest")))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(String::from_utf8_lossy(&body), "Photos for guest");
}

#[actix_web::test]
async fn test_photo_show_with_user() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/photos/7")
        .insert_header((header::AUTHORIZATION, bearer("user")))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(String::from_utf8_lossy(&body), "Photo 7");
}

#[actix_web::test]
async fn test_upload_with_user() {
    let app = create_test_app().await;

    let req = test::TestRequest::post()
        .uri("/photos/upload")
        .insert_header((header::AUTHORIZATION, bearer("user")))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_admin_dashboard_with_admin() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/admin/dashboard")
        .insert_header((header::AUTHORIZATION, bearer("admin")))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("Admin dashboard for admin"));
}

#[actix_web::test]
async fn test_any_granting_role_is_enough() {
    let app = create_test_app().await;

    // admin holds [admin, user]; only admin is granted on the remove route.
    let req = test::TestRequest::delete()
        .uri("/photos/7/remove")
        .insert_header((header::AUTHORIZATION, bearer("admin")))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// =============================================================================
// Denied Access Tests
// =============================================================================

#[actix_web::test]
async fn test_photo_show_with_guest_forbidden() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/photos/7")
        .insert_header((header::AUTHORIZATION, bearer("guest")))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_remove_with_user_forbidden() {
    let app = create_test_app().await;

    let req = test::TestRequest::delete()
        .uri("/photos/7/remove")
        .insert_header((header::AUTHORIZATION, bearer("user")))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_admin_dashboard_with_user_forbidden() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/admin/dashboard")
        .insert_header((header::AUTHORIZATION, bearer("user")))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_actor_without_roles_forbidden() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/photos")
        .insert_header((header::AUTHORIZATION, bearer("nobody")))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_denied_request_never_reaches_handler() {
    let app = create_test_app().await;

    let req = test::TestRequest::post()
        .uri("/photos/upload")
        .insert_header((header::AUTHORIZATION, bearer("guest")))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body = test::read_body(resp).await;
    assert_eq!(String::from_utf8_lossy(&body), "forbidden");
}

// =============================================================================
// Anonymous Access Tests
// =============================================================================

#[actix_web::test]
async fn test_anonymous_unauthorized() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/photos").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_unknown_token_is_anonymous() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/profile")
        .insert_header((header::AUTHORIZATION, bearer("mallory")))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_anonymous_redirected_to_login() {
    let app = create_test_app_with_login().await;

    let req = test::TestRequest::get().uri("/profile").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
}

#[actix_web::test]
async fn test_authenticated_denial_not_redirected() {
    let app = create_test_app_with_login().await;

    let req = test::TestRequest::get()
        .uri("/admin/dashboard")
        .insert_header((header::AUTHORIZATION, bearer("guest")))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// =============================================================================
// Unmapped Request Tests
// =============================================================================

#[actix_web::test]
async fn test_unmapped_path_left_to_router() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/nowhere").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_unmapped_verb_on_routed_path_denied() {
    let app = create_test_app().await;

    // `/photos/{id}` is only mapped for GET.
    let req = test::TestRequest::delete()
        .uri("/photos/7")
        .insert_header((header::AUTHORIZATION, bearer("admin")))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_handler_missing_from_route_table_denied() {
    let authz = security::authz(None).unwrap();
    let app = test::init_service(
        App::new()
            .wrap(AuthzTransform::new(authz).config_authenticator(BearerAuthenticator::new))
            .service(handlers::admin::dashboard)
            .route(
                "/admin/stats",
                web::get().to(|| async { HttpResponse::Ok().body("stats") }),
            ),
    )
    .await;

    let req = test::TestRequest::get().uri("/admin/stats").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/admin/stats")
        .insert_header((header::AUTHORIZATION, bearer("admin")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// =============================================================================
// Encoded Path Tests
// =============================================================================

#[actix_web::test]
async fn test_encoded_path_anonymous_unauthorized() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/admin/dashboar%64")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_encoded_path_checked_like_plain_path() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/%61dmin/dashboard")
        .insert_header((header::AUTHORIZATION, bearer("user")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/%61dmin/dashboard")
        .insert_header((header::AUTHORIZATION, bearer("admin")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(String::from_utf8_lossy(&body), "Admin dashboard for admin");
}
