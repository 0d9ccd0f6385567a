//! REST API server for card type detection and checksum validation.
//!
//! # Usage
//!
//! ```bash
//! # Start server on 0.0.0.0:3000
//! cardcheck-server
//!
//! # Custom bind address, verbose logs
//! RUST_LOG=debug cardcheck-server --host 127.0.0.1 --port 8080
//! ```
//!
//! # Swagger UI
//!
//! Visit http://localhost:3000/swagger-ui/ for interactive API documentation.

use std::net::{IpAddr, SocketAddr};

use axum::{
    http::{header, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use cardcheck::{
    batch, format, generate, CardType, Classifier, IssuerScan, ValidatedCard, ValidationError,
};

// ============================================================================
// Configuration
// ============================================================================

#[derive(Parser)]
#[command(name = "cardcheck-server")]
#[command(author, version, about = "REST API for card type detection and checksum validation")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Upper bound on numbers per batch or generate request.
const MAX_BATCH: usize = 1000;
const MAX_GENERATE: usize = 100;

// ============================================================================
// OpenAPI Documentation
// ============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Card Check API",
        version = "0.1.0",
        description = "Card type detection and check digit validation. No auth or rate limiting.",
        license(name = "MIT")
    ),
    tags(
        (name = "Classification", description = "Card type detection"),
        (name = "Validation", description = "Check digit and combined validation"),
        (name = "Formatting", description = "Card number formatting"),
        (name = "Generation", description = "Test card number generation"),
        (name = "System", description = "Health and status endpoints")
    ),
    paths(
        classify_card,
        checksum_card,
        validate_card,
        validate_batch,
        format_card,
        generate_cards,
        health,
    ),
    components(schemas(
        ScanArg,
        ClassifyRequest,
        ClassifyResponse,
        ChecksumRequest,
        ChecksumResponse,
        ValidateRequest,
        ValidateResponse,
        BatchValidateRequest,
        BatchValidateResponse,
        BatchSummaryResponse,
        FormatRequest,
        FormatResponse,
        GenerateRequest,
        GenerateResponse,
        HealthResponse,
    ))
)]
struct ApiDoc;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Which card types to try.
#[derive(Deserialize, ToSchema, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
enum ScanArg {
    /// American Express through JCB
    #[default]
    Primary,
    /// All card types, including Maestro and RuPay
    Extended,
}

impl From<ScanArg> for IssuerScan {
    fn from(arg: ScanArg) -> Self {
        match arg {
            ScanArg::Primary => IssuerScan::Primary,
            ScanArg::Extended => IssuerScan::Extended,
        }
    }
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"card_number": "4111", "suggest": true}))]
struct ClassifyRequest {
    /// Card number or prefix. Formatting characters are ignored.
    card_number: String,
    /// Match issuer prefixes only, for partially typed numbers
    #[serde(default)]
    suggest: bool,
    /// Card types to try (default: primary)
    #[serde(default)]
    scan: ScanArg,
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({"card_type": "Visa"}))]
struct ClassifyResponse {
    /// Detected card type display name
    #[serde(skip_serializing_if = "Option::is_none")]
    card_type: Option<String>,
    /// Reason no type was detected
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"card_number": "4111 1111 1111 1111"}))]
struct ChecksumRequest {
    /// Card number. Formatting characters are ignored.
    card_number: String,
}

#[derive(Serialize, ToSchema)]
struct ChecksumResponse {
    /// Whether the check digit matched (at least 9 digits required)
    valid: bool,
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"card_number": "4111-1111-1111-1111"}))]
struct ValidateRequest {
    /// Card number. Formatting characters are ignored.
    card_number: String,
    /// Card types to try (default: primary)
    #[serde(default)]
    scan: ScanArg,
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "valid": true,
    "card_type": "Visa",
    "last_four": "1111",
    "masked": "****-****-****-1111"
}))]
struct ValidateResponse {
    /// Whether the number matched a card type and passed the checksum
    valid: bool,
    /// Detected card type display name
    #[serde(skip_serializing_if = "Option::is_none")]
    card_type: Option<String>,
    /// Last four digits (safe to display)
    #[serde(skip_serializing_if = "Option::is_none")]
    last_four: Option<String>,
    /// Masked card number (safe to log)
    #[serde(skip_serializing_if = "Option::is_none")]
    masked: Option<String>,
    /// Why validation failed
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<Result<ValidatedCard, ValidationError>> for ValidateResponse {
    fn from(result: Result<ValidatedCard, ValidationError>) -> Self {
        match result {
            Ok(card) => Self {
                valid: true,
                card_type: Some(card.card_type().name().to_string()),
                last_four: Some(card.last_four()),
                masked: Some(card.masked()),
                error: None,
            },
            Err(e) => Self {
                valid: false,
                card_type: None,
                last_four: None,
                masked: None,
                error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({
    "card_numbers": ["4111111111111111", "5500000000000004", "340000000000009"]
}))]
struct BatchValidateRequest {
    /// Card numbers to validate (at most 1000)
    card_numbers: Vec<String>,
    /// Card types to try (default: primary)
    #[serde(default)]
    scan: ScanArg,
}

#[derive(Serialize, ToSchema)]
struct BatchValidateResponse {
    /// Results in request order
    results: Vec<ValidateResponse>,
    /// Summary counts
    summary: BatchSummaryResponse,
}

#[derive(Serialize, ToSchema)]
struct BatchSummaryResponse {
    /// Numbers processed
    total: usize,
    /// Numbers that validated
    valid: usize,
    /// Numbers matching no card type
    unsupported: usize,
    /// Numbers failing the checksum
    invalid: usize,
}

impl From<batch::BatchSummary> for BatchSummaryResponse {
    fn from(summary: batch::BatchSummary) -> Self {
        Self {
            total: summary.total,
            valid: summary.valid,
            unsupported: summary.unsupported,
            invalid: summary.invalid,
        }
    }
}

#[derive(Deserialize, ToSchema)]
struct FormatRequest {
    /// Card number to format
    card_number: String,
    /// Separator between groups (default: space)
    #[serde(default = "default_separator")]
    separator: String,
}

fn default_separator() -> String {
    " ".to_string()
}

#[derive(Serialize, ToSchema)]
struct FormatResponse {
    /// Grouped card number
    formatted: String,
    /// Digits only
    stripped: String,
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"card_type": "visa", "count": 3, "formatted": true}))]
struct GenerateRequest {
    /// Card type name, e.g. visa, amex, mastercard, discover, diners, jcb, maestro, rupay
    card_type: String,
    /// Number of test cards to generate (at least 1, capped at 100, default: 1)
    #[serde(default = "default_count")]
    count: usize,
    /// Group digits with spaces
    #[serde(default)]
    formatted: bool,
}

fn default_count() -> usize {
    1
}

#[derive(Serialize, ToSchema)]
struct GenerateResponse {
    /// Generated card numbers
    cards: Vec<String>,
}

#[derive(Serialize, ToSchema)]
struct HealthResponse {
    /// Service status
    status: String,
    /// API version
    version: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Detect the card type of a number or prefix
#[utoipa::path(
    post,
    path = "/classify",
    request_body = ClassifyRequest,
    responses(
        (status = 200, description = "Classification result", body = ClassifyResponse)
    ),
    tag = "Classification"
)]
async fn classify_card(Json(req): Json<ClassifyRequest>) -> Json<ClassifyResponse> {
    let classifier = Classifier::new().suggest(req.suggest).scan(req.scan.into());
    match classifier.classify(&req.card_number) {
        Ok(card_type) => {
            tracing::debug!(%card_type, suggest = req.suggest, "classified card number");
            Json(ClassifyResponse {
                card_type: Some(card_type.name().to_string()),
                error: None,
            })
        }
        Err(e) => Json(ClassifyResponse {
            card_type: None,
            error: Some(e.to_string()),
        }),
    }
}

/// Verify the check digit of a number
#[utoipa::path(
    post,
    path = "/checksum",
    request_body = ChecksumRequest,
    responses(
        (status = 200, description = "Checksum result", body = ChecksumResponse)
    ),
    tag = "Validation"
)]
async fn checksum_card(Json(req): Json<ChecksumRequest>) -> Json<ChecksumResponse> {
    Json(ChecksumResponse {
        valid: cardcheck::passes_checksum(&req.card_number),
    })
}

/// Detect the card type and verify the check digit
#[utoipa::path(
    post,
    path = "/validate",
    request_body = ValidateRequest,
    responses(
        (status = 200, description = "Validation result", body = ValidateResponse)
    ),
    tag = "Validation"
)]
async fn validate_card(Json(req): Json<ValidateRequest>) -> Json<ValidateResponse> {
    let classifier = Classifier::new().scan(req.scan.into());
    let result = cardcheck::validate_with(&req.card_number, classifier);
    match &result {
        Ok(card) => tracing::debug!(card = %card, "validated card"),
        Err(e) => tracing::debug!(error = %e, "card rejected"),
    }
    Json(result.into())
}

/// Validate multiple card numbers
#[utoipa::path(
    post,
    path = "/validate/batch",
    request_body = BatchValidateRequest,
    responses(
        (status = 200, description = "Batch validation results", body = BatchValidateResponse),
        (status = 400, description = "Too many card numbers")
    ),
    tag = "Validation"
)]
async fn validate_batch(
    Json(req): Json<BatchValidateRequest>,
) -> Result<Json<BatchValidateResponse>, (StatusCode, String)> {
    if req.card_numbers.len() > MAX_BATCH {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("at most {} card numbers per request", MAX_BATCH),
        ));
    }

    let results =
        batch::validate_batch_with(&req.card_numbers, Classifier::new().scan(req.scan.into()));
    let summary = batch::BatchSummary::from_results(&results);
    tracing::debug!(
        total = summary.total,
        valid = summary.valid,
        "validated batch"
    );

    Ok(Json(BatchValidateResponse {
        results: results.into_iter().map(ValidateResponse::from).collect(),
        summary: summary.into(),
    }))
}

/// Format a card number
#[utoipa::path(
    post,
    path = "/format",
    request_body = FormatRequest,
    responses(
        (status = 200, description = "Formatted card", body = FormatResponse)
    ),
    tag = "Formatting"
)]
async fn format_card(Json(req): Json<FormatRequest>) -> Json<FormatResponse> {
    Json(FormatResponse {
        formatted: format::format_with_separator(&req.card_number, &req.separator),
        stripped: format::strip_formatting(&req.card_number),
    })
}

/// Generate test card numbers
#[utoipa::path(
    post,
    path = "/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generated cards", body = GenerateResponse),
        (status = 400, description = "Unknown card type or zero count")
    ),
    tag = "Generation"
)]
async fn generate_cards(
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, (StatusCode, String)> {
    let card_type: CardType = req
        .card_type
        .parse()
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("{}", e)))?;

    if req.count == 0 {
        return Err((StatusCode::BAD_REQUEST, "count must be at least 1".to_string()));
    }

    let cards = generate::generate_cards(card_type, req.count.min(MAX_GENERATE))
        .into_iter()
        .map(|number| {
            if req.formatted {
                format::format_card_number(&number)
            } else {
                number
            }
        })
        .collect();

    Ok(Json(GenerateResponse { cards }))
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "System"
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Main
// ============================================================================

fn app() -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/classify", post(classify_card))
        .route("/checksum", post(checksum_card))
        .route("/validate", post(validate_card))
        .route("/validate/batch", post(validate_batch))
        .route("/format", post(format_card))
        .route("/generate", post(generate_cards))
        .route("/health", get(health))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let addr = SocketAddr::new(args.host, args.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger-ui/", args.port);

    axum::serve(listener, app()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_classify_suggest() {
        let Json(resp) = classify_card(Json(ClassifyRequest {
            card_number: "37".to_string(),
            suggest: true,
            scan: ScanArg::Primary,
        }))
        .await;
        assert_eq!(resp.card_type.as_deref(), Some("American Express"));
        assert!(resp.error.is_none());
    }

    #[tokio::test]
    async fn test_validate_respects_scan() {
        let request = |scan| ValidateRequest {
            card_number: "6759 6498 2643 8453".to_string(),
            scan,
        };

        let Json(primary) = validate_card(Json(request(ScanArg::Primary))).await;
        assert!(!primary.valid);
        assert_eq!(
            primary.error.as_deref(),
            Some(ValidationError::Unsupported.to_string().as_str())
        );

        let Json(extended) = validate_card(Json(request(ScanArg::Extended))).await;
        assert!(extended.valid);
        assert_eq!(extended.card_type.as_deref(), Some("Maestro"));
        assert_eq!(extended.masked.as_deref(), Some("****-****-****-8453"));
    }

    #[tokio::test]
    async fn test_batch_limit() {
        let oversized = BatchValidateRequest {
            card_numbers: vec!["4111111111111111".to_string(); MAX_BATCH + 1],
            scan: ScanArg::Primary,
        };
        let (status, _) = validate_batch(Json(oversized)).await.err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let Json(resp) = validate_batch(Json(BatchValidateRequest {
            card_numbers: vec!["4111111111111111".to_string(), "4111111111111112".to_string()],
            scan: ScanArg::Primary,
        }))
        .await
        .unwrap();
        assert_eq!(resp.summary.valid, 1);
        assert_eq!(resp.summary.invalid, 1);
    }

    #[tokio::test]
    async fn test_generate_rejects_unknown_type() {
        let result = generate_cards(Json(GenerateRequest {
            card_type: "bankcard".to_string(),
            count: 1,
            formatted: false,
        }))
        .await;
        assert_eq!(result.err().map(|(status, _)| status), Some(StatusCode::BAD_REQUEST));

        let Json(resp) = generate_cards(Json(GenerateRequest {
            card_type: "amex".to_string(),
            count: 500,
            formatted: false,
        }))
        .await
        .unwrap();
        assert_eq!(resp.cards.len(), MAX_GENERATE);
        assert!(resp.cards.iter().all(|c| cardcheck::is_valid(c)));
    }

    #[tokio::test]
    async fn test_generate_rejects_zero_count() {
        let result = generate_cards(Json(GenerateRequest {
            card_type: "visa".to_string(),
            count: 0,
            formatted: false,
        }))
        .await;
        assert_eq!(result.err().map(|(status, _)| status), Some(StatusCode::BAD_REQUEST));

        let Json(resp) = generate_cards(Json(GenerateRequest {
            card_type: "visa".to_string(),
            count: 1,
            formatted: true,
        }))
        .await
        .unwrap();
        assert_eq!(resp.cards.len(), 1);
        assert_eq!(resp.cards[0].len(), 19);
    }
}
