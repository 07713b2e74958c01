//! # Route Configuration
//!
//! 애플리케이션의 모든 라우트를 한 곳에서 등록합니다.
//!
//! ```text
//! /health                      GET
//! /api/v1/users                POST, GET
//! /api/v1/users/password       PUT
//! /api/v1/users/{user_id}      GET, PATCH, DELETE
//! ```
//!
//! JSON 본문이나 쿼리 문자열을 해석하지 못하면 `400 Validation error`로 응답합니다.

use actix_web::web;

use crate::core::errors::AppError;
use crate::handlers::{health, users};

/// 세션 타입 `S`에 맞춰 모든 라우트를 등록합니다.
///
/// ```rust,ignore
/// App::new()
///     .app_data(web::Data::new(user_service))
///     .configure(configure_all_routes::<ClientSession>)
/// ```
pub fn configure_all_routes<S: Send + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationFailed(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::ValidationFailed(err.to_string()).into()
    }));

    cfg.route("/health", web::get().to(health::health_check::<S>));

    configure_user_routes::<S>(cfg);
}

fn configure_user_routes<S: Send + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .route("", web::post().to(users::create_user::<S>))
            .route("", web::get().to(users::list_users::<S>))
            .route("/password", web::put().to(users::update_password::<S>))
            .route("/{user_id}", web::get().to(users::get_user::<S>))
            .route("/{user_id}", web::patch().to(users::update_user::<S>))
            .route("/{user_id}", web::delete().to(users::delete_user::<S>)),
    );
}
