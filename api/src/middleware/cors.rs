//! CORS middleware configuration for cross-origin requests.
//!
//! Built from [`CorsConfig`]: a `*` entry in the origin list allows any
//! origin, otherwise only the listed origins are accepted.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use cf_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration.
pub fn create_cors(config: &CorsConfig) -> Cors {
    if !config.enabled {
        tracing::info!("CORS disabled, only same-origin requests are accepted");
        return Cors::default();
    }

    let mut cors = if config.allows_any_origin() {
        tracing::info!("Configuring CORS to allow any origin");
        Cors::default().allow_any_origin()
    } else {
        config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| {
                tracing::info!("Adding allowed origin: {}", origin);
                cors.allowed_origin(origin)
            })
    };

    cors = if config.allowed_methods.iter().any(|m| m == "*") {
        cors.allow_any_method()
    } else {
        let methods: Vec<Method> = config
            .allowed_methods
            .iter()
            .filter_map(|m| m.parse().ok())
            .collect();
        cors.allowed_methods(methods)
    };

    cors = if config.allowed_headers.iter().any(|h| h == "*") {
        cors.allow_any_header()
    } else {
        let mut headers: Vec<header::HeaderName> = config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        if !headers.contains(&header::AUTHORIZATION) {
            headers.push(header::AUTHORIZATION);
        }
        cors.allowed_headers(headers)
    };

    cors = cors.max_age(config.max_age);
    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    async fn preflight(config: CorsConfig, origin: &str) -> u16 {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&config))
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/ping")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .to_request();
        test::call_service(&app, req).await.status().as_u16()
    }

    #[actix_web::test]
    async fn test_development_cors_accepts_any_origin() {
        assert_eq!(preflight(CorsConfig::development(), "https://anywhere.example").await, 200);
    }

    #[actix_web::test]
    async fn test_listed_origin_accepted() {
        let config = CorsConfig {
            allowed_origins: vec!["https://app.cashflow.example".to_string()],
            ..CorsConfig::default()
        };
        assert_eq!(preflight(config, "https://app.cashflow.example").await, 200);
    }
}
