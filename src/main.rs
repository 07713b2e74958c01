use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use env_logger::Env;
use log::{error, info};
use mongodb::ClientSession;

use user_account_service::config::{AppConfig, ServerConfig};
use user_account_service::db::Database;
use user_account_service::events::LogEventNotifier;
use user_account_service::repositories::{MongoCredentialStore, MongoProfileStore};
use user_account_service::routes::configure_all_routes;
use user_account_service::services::password::PasswordHasher;
use user_account_service::services::users::UserService;

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 사용자 계정 서비스 시작중...");

    let config = AppConfig::from_env();
    info!("Environment: {:?}, bcrypt cost: {}", config.environment, config.password.bcrypt_cost);

    let user_service = web::Data::new(build_user_service(&config).await?);

    start_http_server(config, user_service).await
}

async fn build_user_service(config: &AppConfig) -> io::Result<UserService<ClientSession>> {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::connect(&config.database).await.map_err(|e| {
        error!("데이터베이스 연결 실패: {}", e);
        io::Error::other(e.to_string())
    })?;
    database.create_indexes().await.map_err(|e| {
        error!("인덱스 생성 실패: {}", e);
        io::Error::other(e.to_string())
    })?;

    let hasher = PasswordHasher::new(&config.password);

    Ok(UserService::new(
        Arc::new(database.clone()),
        Arc::new(MongoProfileStore::new(&database)),
        Arc::new(MongoCredentialStore::new(&database, hasher)),
        Arc::new(LogEventNotifier),
        config.transaction,
        config.service,
    ))
}

async fn start_http_server(
    config: AppConfig,
    user_service: web::Data<UserService<ClientSession>>,
) -> io::Result<()> {
    let bind_address = config.server.bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(config.rate_limit.per_second)
        .burst_size(config.rate_limit.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("invalid rate limit configuration"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        config.rate_limit.per_second, config.rate_limit.burst_size
    );

    let server_config = config.server.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(user_service.clone())
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&server_config))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes::<ClientSession>)
    })
    .bind(bind_address)?
    .run()
    .await
}

fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let file = match profile.as_str() {
        "prod" => Some(".env.prod"),
        "dev" => Some(".env.dev"),
        _ => None,
    };

    // 로거 초기화 전이므로 결과는 stderr로 남깁니다.
    match file {
        Some(file) => {
            if let Err(e) = dotenv::from_filename(file) {
                eprintln!("{} 파일 로드 실패: {}", file, e);
            }
        }
        None => {
            dotenv::dotenv().ok();
        }
    }
}

fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

fn configure_cors(server: &ServerConfig) -> Cors {
    let cors = server
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin));

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600)
}
