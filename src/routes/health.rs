use actix_web::{get, HttpResponse, Responder};
use serde_json::json;

/// Root endpoint
///
/// Names the service and its version.
#[get("/")]
pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "taskvault API",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Health check endpoint
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "taskvault"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[actix_web::test]
    async fn test_health_endpoint() {
        let app = test::init_service(actix_web::App::new().service(health)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());

        let body = test::read_body(resp).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["status"], "healthy");
    }

    #[actix_web::test]
    async fn test_root_endpoint() {
        let app = test::init_service(actix_web::App::new().service(root)).await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());

        let body = test::read_body(resp).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["message"], "taskvault API");
        assert!(json["version"].is_string());
    }
}
