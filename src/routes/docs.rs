//! API documentation: the OpenAPI document and a Swagger UI page for it.

use std::sync::Arc;

use axum::{
    http::header,
    response::{Html, IntoResponse, Redirect},
    routing::get,
    Json, Router,
};
use utoipa::OpenApi;

use crate::pricing::PricingApi;
use crate::AppState;

pub const DOCS_PATH: &str = "/api-docs";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

const SWAGGER_UI_PAGE: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Delivery pricing API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/api-docs/openapi.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

/// Documentation routes, plus `/` redirecting to them
pub fn router() -> Router<AppState> {
    // Built once and served as static JSON
    let doc = Arc::new(PricingApi::openapi());
    tracing::debug!(paths = doc.paths.paths.len(), "Serving OpenAPI document");

    Router::new()
        .route("/", get(|| async { Redirect::to(DOCS_PATH) }))
        .route(DOCS_PATH, get(|| async { Html(SWAGGER_UI_PAGE) }))
        .route(
            OPENAPI_JSON_PATH,
            get(move || {
                let doc = Arc::clone(&doc);
                async move {
                    ([(header::CACHE_CONTROL, "no-store")], Json(doc.as_ref())).into_response()
                }
            }),
        )
}
