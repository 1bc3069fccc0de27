use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::submit::submit_expense,
        crate::handlers::health::health,
    ),
    components(schemas(
        crate::services::submission::SubmissionResponse,
        crate::error::ErrorResponse,
        crate::handlers::health::HealthResponse,
    )),
    tags(
        (name = "submissions", description = "Expense reimbursement submissions"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;
