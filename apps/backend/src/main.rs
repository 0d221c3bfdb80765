use actix_web::{web, App, HttpServer};
use stakkit_backend::config::{AuthSettings, ServerSettings};
use stakkit_backend::infra::state::build_state;
use stakkit_backend::middleware::{
    cors_middleware, RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan,
};
use stakkit_backend::routes;
use tracing::info;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Settings come from the process environment only (docker env_file,
    // or `set -a; . ./.env; set +a` locally).
    let server = match ServerSettings::from_env() {
        Ok(server) => server,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let auth = match AuthSettings::from_env() {
        Ok(auth) => auth,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    info!(
        jwks_url = %auth.jwks.url,
        algorithm = ?auth.security.algorithm,
        audience_checked = auth.security.audience.is_some(),
        "Token verification configured"
    );

    let app_state = match build_state()
        .with_security(auth.security)
        .with_jwks(auth.jwks)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    let data = web::Data::new(app_state);

    info!(host = %server.host, port = server.port, "Starting Stakkit backend");

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(SecurityHeaders)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
