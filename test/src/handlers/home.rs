//! HomeResource: public pages (bypass-marked methods).

use actix_web::{get, HttpRequest, HttpResponse, Responder};

use super::username;

#[get("/")]
pub async fn index(req: HttpRequest) -> impl Responder {
    HttpResponse::Ok().body(format!("Welcome to the gallery, {}!", username(&req)))
}

#[get("/login")]
pub async fn login() -> impl Responder {
    HttpResponse::Ok().body("Send `Authorization: Bearer <username>` to log in")
}

/// Not bypass-marked: requires a role granted on `/profile`.
#[get("/profile")]
pub async fn profile(req: HttpRequest) -> impl Responder {
    HttpResponse::Ok().body(format!("Profile of {}", username(&req)))
}
