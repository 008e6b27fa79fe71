use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::auth::{hash_password, TokenService};
use crate::database::models::{self, NewEmployee};
use crate::database::Gateway;
use crate::routes;
use crate::state::AppState;

pub mod memory;


pub use memory::MemoryGateway;

pub const TEST_SECRET: &str = "test-secret";

/// Router wired to an in-memory gateway, plus a token for an existing employee
pub struct TestContext {
    pub gateway: Arc<MemoryGateway>,
    pub tokens: Arc<TokenService>,
    pub app: Router,
    /// Employee seeded at construction time
    pub admin_id: String,
    pub token: String,
}

impl TestContext {
    pub async fn new() -> Self {
        let gateway = Arc::new(MemoryGateway::new());
        let state = AppState::new(gateway.clone(), TokenService::new(TEST_SECRET, 24).unwrap());
        let tokens = state.tokens.clone();
        let app = routes::app(state);

        let admin = NewEmployee {
            first_name: "Admin".into(),
            employee_email: "admin@example.com".into(),
            phone_number: "+15550000000".into(),
            ..Default::default()
        }
        .into_record(
            models::new_id(),
            Some(hash_password("admin-password").unwrap()),
            models::now(),
        );
        gateway.insert_employee(&admin).await.unwrap();
        let token = tokens.issue(&admin.emp_id).unwrap();

        Self {
            gateway,
            tokens,
            app,
            admin_id: admin.emp_id,
            token,
        }
    }

    /// Authenticated request with an optional JSON body
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let token = self.token.clone();
        self.send_with_token(method, uri, body, Some(&token)).await
    }

    pub async fn send_with_token(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.dispatch(request).await
    }

    /// Send a raw request and decode whatever JSON comes back (Null if none)
    pub async fn dispatch(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }
}
