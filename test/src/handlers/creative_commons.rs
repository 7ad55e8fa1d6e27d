//! CreativeCommonsResource (bypass-marked type) and its subtype MyPhoto.
//!
//! Every method reachable through these types skips authorization.

use actix_web::{get, post, HttpRequest, HttpResponse, Responder};

use super::username;

/// CreativeCommonsResource::modifyMe
#[get("/cc/gallery")]
pub async fn modify_me() -> impl Responder {
    HttpResponse::Ok().body("Creative Commons gallery")
}

/// MyPhoto::newWork, inherits the bypass of CreativeCommonsResource.
#[post("/cc/new")]
pub async fn new_work(req: HttpRequest) -> impl Responder {
    HttpResponse::Created().body(format!("Derived work shared by {}", username(&req)))
}
