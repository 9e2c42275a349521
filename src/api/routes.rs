//! API Routes
//!
//! HTTP endpoint definitions. Every category/transaction query and mutation
//! is filtered by the user id resolved from the bearer token, never by
//! client-supplied identity fields.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::token;
use crate::domain::{Category, EntryKind, Transaction};
use crate::error::AppError;
use crate::handlers::{LoginCommand, LoginHandler, RegisterCommand, RegisterHandler};

use super::middleware::{auth_middleware, logging_middleware, AuthenticatedUser};
use super::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public profile plus issued token, returned by register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub title: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub category_id: Uuid,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListQuery {
    #[serde(default)]
    pub category: Option<Uuid>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the application router
///
/// Register/login are public; everything else requires a bearer token.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/:id",
            put(update_category).delete(delete_category),
        )
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transactions/:id",
            put(update_transaction).delete(delete_transaction),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .merge(protected)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

// =========================================================================
// GET /health
// =========================================================================

/// Health check endpoint (no auth)
async fn health_check() -> &'static str {
    "OK"
}

// =========================================================================
// POST /users/register
// =========================================================================

/// Register a new user and seed their default categories
async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let handler = RegisterHandler::new(state.pool.clone());

    let command = RegisterCommand::new(request.name, request.email, request.password);
    let result = handler.execute(command).await?;

    let token = token::issue(
        result.user_id,
        &state.config.jwt_secret,
        state.config.token_ttl_hours,
    )?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            id: result.user_id,
            name: result.name,
            email: result.email,
            token,
        }),
    ))
}

// =========================================================================
// POST /users/login
// =========================================================================

/// Authenticate an existing user
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let handler = LoginHandler::new(state.pool.clone());

    let command = LoginCommand::new(request.email, request.password);
    let result = handler.execute(command).await?;

    let token = token::issue(
        result.user_id,
        &state.config.jwt_secret,
        state.config.token_ttl_hours,
    )?;

    Ok(Json(AuthResponse {
        id: result.user_id,
        name: result.name,
        email: result.email,
        token,
    }))
}

// =========================================================================
// POST /categories
// =========================================================================

/// Create a category owned by the caller
///
/// Duplicate (name, kind) pairs are permitted.
async fn create_category(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let category: Category = sqlx::query_as(
        r#"
        INSERT INTO categories (user_id, name, kind)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, name, kind, created_at
        "#,
    )
    .bind(user.user_id)
    .bind(&request.name)
    .bind(request.kind)
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

// =========================================================================
// GET /categories
// =========================================================================

/// List all categories owned by the caller
async fn list_categories(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories: Vec<Category> = sqlx::query_as(
        "SELECT id, user_id, name, kind, created_at FROM categories WHERE user_id = $1",
    )
    .bind(user.user_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(categories))
}

// =========================================================================
// PUT /categories/:id
// =========================================================================

/// Replace a category's fields
async fn update_category(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<CategoryRequest>,
) -> Result<Json<Category>, AppError> {
    let category: Option<Category> = sqlx::query_as(
        r#"
        UPDATE categories
        SET name = $1, kind = $2
        WHERE id = $3 AND user_id = $4
        RETURNING id, user_id, name, kind, created_at
        "#,
    )
    .bind(&request.name)
    .bind(request.kind)
    .bind(id)
    .bind(user.user_id)
    .fetch_optional(&state.pool)
    .await?;

    let category = category.ok_or(AppError::CategoryNotFound(id))?;

    Ok(Json(category))
}

// =========================================================================
// DELETE /categories/:id
// =========================================================================

/// Delete a category
///
/// Transactions referencing the category are left untouched; their
/// category reference dangles from this point on.
async fn delete_category(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted: Option<(Uuid,)> = sqlx::query_as(
        "DELETE FROM categories WHERE id = $1 AND user_id = $2 RETURNING id",
    )
    .bind(id)
    .bind(user.user_id)
    .fetch_optional(&state.pool)
    .await?;

    if deleted.is_none() {
        return Err(AppError::CategoryNotFound(id));
    }

    Ok(Json(MessageResponse {
        message: "Category deleted successfully".to_string(),
    }))
}

// =========================================================================
// POST /transactions
// =========================================================================

/// Create a transaction owned by the caller
///
/// The category reference is stored as given: existence and ownership of
/// the category are not verified, and the amount's sign is not validated
/// (both checks live in the original client, not the server).
async fn create_transaction(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<TransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let transaction: Transaction = sqlx::query_as(
        r#"
        INSERT INTO transactions (user_id, category_id, title, amount, kind, date, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, user_id, category_id, title, amount, kind, date, notes, created_at
        "#,
    )
    .bind(user.user_id)
    .bind(request.category_id)
    .bind(&request.title)
    .bind(request.amount)
    .bind(request.kind)
    .bind(request.date)
    .bind(&request.notes)
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

// =========================================================================
// GET /transactions
// =========================================================================

/// List the caller's transactions, newest first
///
/// Optional filters: category id and an inclusive [startDate, endDate]
/// range over the transaction date.
async fn list_transactions(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<TransactionListQuery>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let transactions: Vec<Transaction> = sqlx::query_as(
        r#"
        SELECT id, user_id, category_id, title, amount, kind, date, notes, created_at
        FROM transactions
        WHERE user_id = $1
          AND ($2::uuid IS NULL OR category_id = $2)
          AND ($3::timestamptz IS NULL OR date >= $3)
          AND ($4::timestamptz IS NULL OR date <= $4)
        ORDER BY date DESC
        "#,
    )
    .bind(user.user_id)
    .bind(query.category)
    .bind(query.start_date)
    .bind(query.end_date)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(transactions))
}

// =========================================================================
// PUT /transactions/:id
// =========================================================================

/// Replace a transaction's fields
async fn update_transaction(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransactionRequest>,
) -> Result<Json<Transaction>, AppError> {
    let transaction: Option<Transaction> = sqlx::query_as(
        r#"
        UPDATE transactions
        SET title = $1, amount = $2, kind = $3, category_id = $4, date = $5, notes = $6
        WHERE id = $7 AND user_id = $8
        RETURNING id, user_id, category_id, title, amount, kind, date, notes, created_at
        "#,
    )
    .bind(&request.title)
    .bind(request.amount)
    .bind(request.kind)
    .bind(request.category_id)
    .bind(request.date)
    .bind(&request.notes)
    .bind(id)
    .bind(user.user_id)
    .fetch_optional(&state.pool)
    .await?;

    let transaction = transaction.ok_or(AppError::TransactionNotFound(id))?;

    Ok(Json(transaction))
}

// =========================================================================
// DELETE /transactions/:id
// =========================================================================

/// Delete a transaction
async fn delete_transaction(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted: Option<(Uuid,)> = sqlx::query_as(
        "DELETE FROM transactions WHERE id = $1 AND user_id = $2 RETURNING id",
    )
    .bind(id)
    .bind(user.user_id)
    .fetch_optional(&state.pool)
    .await?;

    if deleted.is_none() {
        return Err(AppError::TransactionNotFound(id));
    }

    Ok(Json(MessageResponse {
        message: "Transaction deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_deserialize() {
        let json = r#"{
            "name": "Alice",
            "email": "alice@example.com",
            "password": "s3cret!"
        }"#;

        let request: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, "Alice");
        assert_eq!(request.email, "alice@example.com");
    }

    #[test]
    fn test_category_request_uses_type_field() {
        let json = r#"{"name": "Rent", "type": "expense"}"#;

        let request: CategoryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, "Rent");
        assert_eq!(request.kind, EntryKind::Expense);

        // "kind" is not a wire field
        assert!(serde_json::from_str::<CategoryRequest>(r#"{"name": "x", "kind": "expense"}"#).is_err());
    }

    #[test]
    fn test_transaction_request_deserialize() {
        let json = r#"{
            "title": "October salary",
            "amount": "2500.00",
            "type": "income",
            "categoryId": "550e8400-e29b-41d4-a716-446655440000",
            "date": "2026-10-01T00:00:00Z"
        }"#;

        let request: TransactionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.title, "October salary");
        assert_eq!(request.kind, EntryKind::Income);
        assert!(request.notes.is_none());
    }

    #[test]
    fn test_transaction_request_accepts_numeric_amount() {
        let json = r#"{
            "title": "Coffee",
            "amount": 4.5,
            "type": "expense",
            "categoryId": "550e8400-e29b-41d4-a716-446655440000",
            "date": "2026-10-01T08:30:00Z",
            "notes": "team standup"
        }"#;

        let request: TransactionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.amount.to_string(), "4.5");
        assert_eq!(request.notes, Some("team standup".to_string()));
    }

    #[test]
    fn test_transaction_list_query_defaults() {
        let query: TransactionListQuery = serde_json::from_str("{}").unwrap();
        assert!(query.category.is_none());
        assert!(query.start_date.is_none());
        assert!(query.end_date.is_none());
    }

    #[test]
    fn test_transaction_list_query_parses_bounds() {
        let json = r#"{
            "startDate": "2026-01-01T00:00:00Z",
            "endDate": "2026-01-31T23:59:59Z"
        }"#;

        let query: TransactionListQuery = serde_json::from_str(json).unwrap();
        assert!(query.start_date.unwrap() < query.end_date.unwrap());
    }
}
