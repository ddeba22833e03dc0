//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 1500,
        "error": "INTERNAL_ERROR",
        "message": "An internal server error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "VALIDATION_ERROR",
        "message": "Request validation failed",
        "details": {
            "feedback": [{
                "code": "length",
                "message": null,
                "params": {"max": 2048, "value": []}
            }]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unprocessable Entity - Body did not match the expected schema",
    content_type = "application/json",
    example = json!({
        "code": 1003,
        "error": "JSON_EXTRACTION",
        "message": "Failed to deserialize the JSON body into the target type: feedback[0].importance: unknown variant `Urgent`, expected one of `High`, `Medium`, `Low`"
    })
)]
pub struct UnprocessableEntityResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Service Unavailable - An upstream provider failed",
    content_type = "application/json",
    example = json!({
        "code": 1503,
        "error": "SERVICE_UNAVAILABLE",
        "message": "Naming provider error: timed out after 30s"
    })
)]
pub struct ServiceUnavailableResponse(pub ErrorResponse);
