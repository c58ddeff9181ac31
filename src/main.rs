use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use impartease_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }
    let bind_addr = (config.web_server_host.clone(), config.web_server_port);
    let state = AppState::new(config);

    log::info!("starting HTTP server on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        // All origins, methods, and headers, with credentials. The origin
        // is mirrored rather than wildcarded so credentialed requests
        // stay valid.
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(cors)
            .service(handlers::generate_summary_pdf)
            .service(handlers::generate_summary_youtube)
            .service(handlers::generate_summary_youtube_by_query)
            .service(handlers::generate_quiz)
            .service(handlers::generate_quiz_by_query)
            .service(handlers::health_check)
    })
    .bind(bind_addr)?
    .run()
    .await
}
