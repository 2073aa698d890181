//! HTTP request handlers for the Payslip Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_payroll;
use crate::export::{ExportOptions, spawn_export};
use crate::render::render_payslip;

use super::request::PayslipRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payslip/calculate", post(calculate_handler))
        .route("/payslip/export", post(export_handler))
        .with_state(state)
}

/// Handler for POST /payslip/calculate.
///
/// Returns the calculated figures and audit trace as JSON.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayslipRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let config = state.config();
    let input = request.into_input(config.structure.default_days_payable);

    let start_time = Instant::now();
    match calculate_payroll(&input, config) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                associate_id = %input.associate_id,
                net_salary = %result.payroll.net_salary,
                warnings = result.audit_trace.warnings.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /payslip/export.
///
/// Calculates, renders and exports the payslip, returning the document bytes
/// as an attachment.
async fn export_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayslipRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing export request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let config = state.config();
    let input = request.into_input(config.structure.default_days_payable);

    let result = match calculate_payroll(&input, config) {
        Ok(result) => result,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let document = render_payslip(&input, &result.payroll, config);
    let options = ExportOptions::from_config(&config.document);

    let start_time = Instant::now();
    match spawn_export(state.exporter(), document, options).await {
        Ok(exported) => {
            info!(
                correlation_id = %correlation_id,
                associate_id = %input.associate_id,
                file_name = %exported.file_name,
                bytes = exported.bytes.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Export completed successfully"
            );
            let disposition = format!("attachment; filename=\"{}\"", exported.file_name);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, exported.content_type),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                exported.bytes,
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Export failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Unwraps the JSON body or builds the 400 response for a bad one.
#[allow(clippy::result_large_err)]
fn parse_payload(
    payload: Result<Json<PayslipRequest>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<PayslipRequest, Response> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::malformed_json(body_text)
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    Err(ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    use crate::config::{ConfigLoader, PayrollConfig};
    use crate::error::{EngineError, EngineResult};
    use crate::export::{ExportedDocument, Exporter};
    use crate::models::CalculationResult;
    use crate::render::PayslipDocument;

    struct EchoExporter;

    impl Exporter for EchoExporter {
        fn export(
            &self,
            document: &PayslipDocument,
            options: &ExportOptions,
        ) -> EngineResult<ExportedDocument> {
            Ok(ExportedDocument {
                file_name: options.file_name.clone(),
                content_type: "text/plain".to_string(),
                bytes: document.net_pay.clone().into_bytes(),
            })
        }
    }

    struct FailingExporter;

    impl Exporter for FailingExporter {
        fn export(
            &self,
            _document: &PayslipDocument,
            _options: &ExportOptions,
        ) -> EngineResult<ExportedDocument> {
            Err(EngineError::export_failure("no fonts available"))
        }
    }

    fn create_test_state(exporter: Arc<dyn Exporter>) -> AppState {
        AppState::new(ConfigLoader::from_config(PayrollConfig::default()), exporter)
    }

    fn post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_calculate_returns_200() {
        let router = create_router(create_test_state(Arc::new(EchoExporter)));

        let response = router
            .oneshot(post("/payslip/calculate", r#"{"annual_ctc": 600000}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: CalculationResult = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.payroll.net_salary, Decimal::new(46200, 0));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state(Arc::new(EchoExporter)));

        let response = router
            .oneshot(post("/payslip/calculate", "{invalid json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_zero_days_payable_returns_invalid_input() {
        let router = create_router(create_test_state(Arc::new(EchoExporter)));

        let response = router
            .oneshot(post(
                "/payslip/calculate",
                r#"{"annual_ctc": 600000, "days_payable": 0}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_export_returns_attachment() {
        let router = create_router(create_test_state(Arc::new(EchoExporter)));

        let response = router
            .oneshot(post("/payslip/export", r#"{"annual_ctc": "600000"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("content-type").unwrap(), "text/plain");
        assert_eq!(
            response.headers().get("content-disposition").unwrap(),
            "attachment; filename=\"Payslip.pdf\""
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(
            String::from_utf8(body.to_vec()).unwrap(),
            "Net Salary / Month : ₹46,200.00"
        );
    }

    #[tokio::test]
    async fn test_export_failure_returns_500() {
        let router = create_router(create_test_state(Arc::new(FailingExporter)));

        let response = router
            .oneshot(post("/payslip/export", r#"{"annual_ctc": 600000}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "EXPORT_FAILURE");
    }
}
