//! Application assembly shared by the server binary and integration tests.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::doc::ApiDoc;
use crate::inbound::http::routing::{configure, unmatched_route};
use crate::inbound::http::state::HttpState;
use crate::middleware::{AllowedOrigins, OriginGuard, Trace};

/// Location of the generated OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Assemble the application: state, middleware, routes, and API docs.
///
/// `Trace` is registered last so it wraps the origin guard and every
/// failure is logged with a trace identifier in scope.
pub fn build_app(
    http_state: web::Data<HttpState>,
    allowed_origins: AllowedOrigins,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(http_state)
        .wrap(OriginGuard::new(allowed_origins))
        .wrap(Trace)
        .configure(configure)
        .service(SwaggerUi::new("/api-docs/{_:.*}").url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .default_service(web::to(unmatched_route))
}
