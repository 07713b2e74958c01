//! 헬스 체크 핸들러
//!
//! 저장소 ping이 제한 시간 안에 성공하면 `200 {"status":"HEALTHY"}`,
//! 실패하거나 시간을 넘기면 `503 {"status":"NOT_HEALTHY"}`로 응답합니다.

use actix_web::{web, HttpResponse};

use crate::domain::dto::users::response::HealthResponse;
use crate::services::users::{HealthStatus, UserService};

pub async fn health_check<S: Send + 'static>(service: web::Data<UserService<S>>) -> HttpResponse {
    let status = service.health_check().await;
    let body = HealthResponse::new(status.as_str());

    match status {
        HealthStatus::Healthy => HttpResponse::Ok().json(body),
        HealthStatus::Unavailable => HttpResponse::ServiceUnavailable().json(body),
    }
}
