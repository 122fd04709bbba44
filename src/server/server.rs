//! HTTP server core implementation

use crate::config::{Config, ServerConfig};
use crate::core::job::JobDispatcher;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{
    middleware::{DefaultHeaders, Logger},
    web, App, HttpServer as ActixHttpServer,
};
use tracing::info;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let dispatcher = JobDispatcher::from_config(config);
        let state = AppState::new(config.clone(), dispatcher);

        Ok(Self {
            config: config.server.clone(),
            state,
        })
    }

    /// Create the Actix-web application
    fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("Server", "slashgen")))
            .configure(routes::health::configure_routes)
            .configure(routes::command::configure_routes)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = format!("{}:{}", self.config.host, self.config.port);

        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .bind(&bind_addr)
            .map_err(|e| GatewayError::server(format!("Failed to bind {}: {}", bind_addr, e)))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| GatewayError::server(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
