use actix_cors::Cors;
use actix_web::{middleware, App, HttpServer};
use dotenv::dotenv;
use smartsplit::{api, config::Config};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {err}");
            return Err(std::io::Error::new(std::io::ErrorKind::Other, err.to_string()));
        }
    };
    init_tracing(&config);

    let server = config.server.clone();
    let cors = config.cors.clone();
    info!("Starting SmartSplit on {}:{}", server.host, server.port);

    HttpServer::new(move || {
        let mut policy = Cors::default()
            .allow_any_method()
            .allow_any_header()
            .max_age(cors.max_age);
        if cors.allow_any_origin {
            policy = policy.allow_any_origin();
        }

        App::new()
            .wrap(policy)
            .wrap(middleware::Logger::default())
            .configure(api::configure_routes)
    })
    .workers(server.workers)
    .bind((server.host.as_str(), server.port))
    .map_err(|err| {
        error!("Failed to bind {}:{}: {}", server.host, server.port, err);
        err
    })?
    .run()
    .await
}
