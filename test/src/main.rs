//! Photo gallery demo.
//!
//! Every request resolved to a resource method is checked by the
//! authorization middleware before reaching its handler.

use std::sync::Arc;

use actix_web::{App, HttpServer};

use actix_authz_core::http::authz::AuthzTransform;
use actix_authz_test::handlers;
use actix_authz_test::security::{self, BearerAuthenticator};

fn authenticator() -> BearerAuthenticator {
    BearerAuthenticator::new()
}

fn print_startup_info() {
    println!("=== Actix Authz Demo ===");
    println!();
    println!("Server: http://127.0.0.1:8080");
    println!();
    println!("Users (send `Authorization: Bearer <username>`):");
    println!("  admin  - Roles: [admin, user]");
    println!("  user   - Roles: [user]");
    println!("  guest  - Roles: [guest]");
    println!("  nobody - Roles: []");
    println!();
    println!("Routes:");
    println!("  GET    /                   - HomeResource::index (bypass)");
    println!("  GET    /login              - HomeResource::login (bypass)");
    println!("  GET    /profile            - HomeResource::profile");
    println!("  GET    /photos             - PhotoResource::list");
    println!("  GET    /photos/{{id}}        - PhotoResource::show");
    println!("  POST   /photos/upload      - PhotoResource::upload");
    println!("  DELETE /photos/{{id}}/remove - PhotoResource::remove");
    println!("  GET    /admin/dashboard    - AdminResource::dashboard");
    println!("  GET    /cc/gallery         - CreativeCommonsResource::modifyMe (type bypass)");
    println!("  POST   /cc/new             - MyPhoto::newWork (inherited bypass)");
    println!();
    println!("Examples:");
    println!("  curl -H 'Authorization: Bearer user' http://127.0.0.1:8080/photos");
    println!("  curl -H 'Authorization: Bearer guest' http://127.0.0.1:8080/photos/1   # 403");
    println!("  curl -i http://127.0.0.1:8080/photos                                  # 302 /login");
    println!("  curl -X POST http://127.0.0.1:8080/cc/new                              # bypass");
    println!();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let authz = security::authz(Some("/login"))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    print_startup_info();
    log::info!("authorization enabled, anonymous denials redirect to /login");

    HttpServer::new(move || {
        App::new()
            .wrap(AuthzTransform::new(Arc::clone(&authz)).config_authenticator(authenticator))
            // HomeResource
            .service(handlers::home::index)
            .service(handlers::home::login)
            .service(handlers::home::profile)
            // PhotoResource
            .service(handlers::photos::list)
            .service(handlers::photos::upload)
            .service(handlers::photos::remove)
            .service(handlers::photos::show)
            // AdminResource
            .service(handlers::admin::dashboard)
            // CreativeCommonsResource / MyPhoto
            .service(handlers::creative_commons::modify_me)
            .service(handlers::creative_commons::new_work)
    })
    .bind("127.0.0.1:8080")?
    .run()
    .await
}
