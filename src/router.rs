use crate::auth::middleware::authenticate;
use crate::handlers::{
    applications::{
        delete_application, download_resume, list_applications, submit_application,
        update_application,
    },
    auth::{login, me},
    health::health_check,
    jobs::{create_job, delete_job, get_job, list_all_jobs, list_jobs, update_job},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Multipart submissions carry a resume of up to 5 MiB; leave headroom for
/// the other form fields and the multipart framing so the size check in the
/// intake handler is the one that rejects oversized resumes.
const UPLOAD_BODY_LIMIT: usize = 8 * 1024 * 1024;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Administrative routes require a verified token; the middleware
    // re-resolves the actor and injects it as a request extension.
    let admin = from_fn_with_state(state.clone(), authenticate);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Credential/token service
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/me", get(me).route_layer(admin.clone()))
        // Job catalog: public reads, authenticated writes
        .route(
            "/api/v1/jobs",
            get(list_jobs).merge(post(create_job).route_layer(admin.clone())),
        )
        .route(
            "/api/v1/jobs/:job_id",
            get(get_job)
                .merge(put(update_job).delete(delete_job).route_layer(admin.clone())),
        )
        .route("/api/v1/admin/jobs", get(list_all_jobs).route_layer(admin))
        // Application intake and review
        .route("/api/v1/applications/apply", post(submit_application))
        .route("/api/v1/applications", get(list_applications))
        .route(
            "/api/v1/applications/:tracking_id",
            put(update_application).delete(delete_application),
        )
        .route(
            "/api/v1/applications/:tracking_id/resume",
            get(download_resume),
        )
        // Stored resumes are also reachable as static files
        .nest_service("/uploads", ServeDir::new(state.storage.root()))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .with_state(state)
}
