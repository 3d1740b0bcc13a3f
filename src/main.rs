use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use kurso_server::{
    app_state::AppState,
    auth::{AuthMiddleware, JwtService},
    config::Config,
    handlers,
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);
    let bind_addr = (config.web_server_host.clone(), config.web_server_port);
    let cors_origin = config.cors_allowed_origin.clone();

    let state = AppState::new(config)
        .await
        .expect("failed to initialize application state");

    log::info!("starting HTTP server on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(jwt_service.clone()))
            .wrap(Logger::default())
            .wrap(cors)
            .wrap(RequestIdMiddleware)
            .service(handlers::health_check)
            .service(handlers::health_check_live)
            .service(handlers::health_check_ready)
            .service(handlers::dev_token)
            .service(
                web::scope("")
                    .wrap(AuthMiddleware)
                    .service(handlers::create_user)
                    .service(handlers::get_user)
                    .service(handlers::get_all_users)
                    .service(handlers::update_user)
                    .service(handlers::delete_user)
                    .service(handlers::create_course)
                    .service(handlers::list_courses)
                    .service(handlers::get_course)
                    .service(handlers::delete_course)
                    .service(handlers::enroll)
                    .service(handlers::list_contents)
                    .service(handlers::create_content)
                    .service(handlers::update_content)
                    .service(handlers::delete_content)
                    .service(handlers::reorder_content)
                    .service(handlers::issue_certificate)
                    .service(handlers::list_certificates),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
