//! # User Management HTTP Handlers
//!
//! 사용자 계정 엔드포인트를 처리하는 핸들러 함수들입니다.
//! 요청 형태와 필드 내용을 검증한 뒤 [`UserService`]에 위임합니다.
//!
//! ## 엔드포인트
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/api/v1/users` | 계정 생성 | 201 Created |
//! | `GET` | `/api/v1/users` | 필터 + 페이지 목록 | 200 OK |
//! | `GET` | `/api/v1/users/{id}` | 계정 조회 | 200 OK |
//! | `PATCH` | `/api/v1/users/{id}` | 마스크 기반 부분 수정 | 200 OK |
//! | `PUT` | `/api/v1/users/password` | 비밀번호 변경 | 204 No Content |
//! | `DELETE` | `/api/v1/users/{id}` | 계정 삭제 | 204 No Content |
//!
//! ## 비밀번호 변경 응답
//!
//! 존재하지 않는 이메일, 형식이 잘못된 이메일, 틀린 기존 비밀번호는 모두 같은
//! `403 Invalid credentials`로 응답합니다. 응답만으로는 계정 존재 여부를 알 수 없습니다.
//!
//! 핸들러는 세션 타입 `S`에 대해 제네릭이므로 라우트 등록 시 `create_user::<S>`처럼
//! 구체 타입을 지정합니다.

use actix_web::{web, HttpResponse};
use log::warn;
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::users::request::{
    CreateUserRequest, ListUsersQuery, UpdatePasswordRequest, UpdateUserRequest,
};
use crate::domain::dto::users::response::{ListUsersResponse, UserResponse};
use crate::domain::entities::users::ProfileDraft;
use crate::domain::models::UpdateMask;
use crate::domain::validation::{validate_create, validate_update};
use crate::services::users::UserService;

pub async fn create_user<S: Send + 'static>(
    service: web::Data<UserService<S>>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let CreateUserRequest { user, password } = payload.into_inner();
    let draft = ProfileDraft::from(user);

    validate_create(&draft)?;
    if password.is_empty() {
        return Err(AppError::ValidationFailed("The field 'password' is required.".to_string()));
    }

    let profile = service.create_user(draft, password).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(profile)))
}

pub async fn get_user<S: Send + 'static>(
    service: web::Data<UserService<S>>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let profile = service.get_user(&user_id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(profile)))
}

pub async fn list_users<S: Send + 'static>(
    service: web::Data<UserService<S>>,
    query: web::Query<ListUsersQuery>,
) -> Result<HttpResponse, AppError> {
    let pagination = query.pagination();
    let (users, total) = service.list_users(&query.filter(), pagination).await?;

    Ok(HttpResponse::Ok().json(ListUsersResponse {
        users: users.into_iter().map(UserResponse::from).collect(),
        page: pagination.page(),
        size: pagination.page_size(),
        total,
    }))
}

pub async fn update_user<S: Send + 'static>(
    service: web::Data<UserService<S>>,
    user_id: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let UpdateUserRequest { user, update_mask } = payload.into_inner();
    let mask = UpdateMask::parse(update_mask.as_slice())?;
    let draft = ProfileDraft::from(user);

    validate_update(&draft, &mask)?;

    let profile = service.update_user(&user_id, draft, mask).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(profile)))
}

pub async fn update_password<S: Send + 'static>(
    service: web::Data<UserService<S>>,
    payload: web::Json<UpdatePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    let request = payload.into_inner();

    if request.validate().is_err() {
        warn!("🔒 비밀번호 변경 요청의 이메일 형식 오류");
        return Err(AppError::InvalidCredentials);
    }
    if request.new_password.is_empty() {
        return Err(AppError::ValidationFailed(
            "The field 'new_password' is required.".to_string(),
        ));
    }

    match service
        .update_password(&request.email, &request.old_password, &request.new_password)
        .await
    {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(AppError::NotFound(_)) | Err(AppError::InvalidCredentials) => {
            Err(AppError::InvalidCredentials)
        }
        Err(err) => Err(err),
    }
}

pub async fn delete_user<S: Send + 'static>(
    service: web::Data<UserService<S>>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete_user(&user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
