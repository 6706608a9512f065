//! Common test utilities for integration tests.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot` against
//! in-memory stores, so no database is required.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response},
    Router,
};
use chrono::Utc;
use domain::models::{NewPageView, NewRegistrant, Registrant};
use domain::ports::{PageViewStore, RegistrantStore, SchemaProvisioner, StoreError};
use domain::services::MockNotifier;
use minca_intake_api::{
    app::{create_router, AppState},
    config::{
        CheckoutConfig, Config, DatabaseConfig, EmailConfig, LoggingConfig, SecurityConfig,
        ServerConfig,
    },
};
use tower::ServiceExt;

pub const STAFF_EMAIL: &str = "reservas@example.com";
pub const PAYMENT_URL: &str = "https://pay.example.com/minca";

/// Registrant store that keeps rows in memory and can be told to fail.
#[derive(Default)]
pub struct MemoryRegistrants {
    rows: Mutex<Vec<Registrant>>,
    fail: AtomicBool,
}

impl MemoryRegistrants {
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<Registrant> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl RegistrantStore for MemoryRegistrants {
    async fn insert_registrant(&self, new: &NewRegistrant) -> Result<Registrant, StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".into()));
        }
        let mut rows = self.rows.lock().unwrap();
        let registrant = Registrant {
            id: rows.len() as i32 + 1,
            name: new.name.clone(),
            last_name: new.last_name.clone(),
            phone: new.phone.clone(),
            email: new.email.clone(),
            consent: new.consent,
            travel_date: new.travel_date.clone(),
            created_at: Utc::now(),
        };
        rows.push(registrant.clone());
        Ok(registrant)
    }
}

/// Page view store in memory.
#[derive(Default)]
pub struct MemoryPageViews {
    rows: Mutex<Vec<NewPageView>>,
    fail: AtomicBool,
}

impl MemoryPageViews {
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<NewPageView> {
        self.rows.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(StoreError::Query("relation \"page_views\" does not exist".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PageViewStore for MemoryPageViews {
    async fn insert_view(&self, view: &NewPageView) -> Result<(), StoreError> {
        self.check()?;
        self.rows.lock().unwrap().push(view.clone());
        Ok(())
    }

    async fn count_views(&self) -> Result<i64, StoreError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    async fn count_distinct_visitors(&self) -> Result<i64, StoreError> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        let distinct: HashSet<&str> = rows.iter().map(|v| v.client_addr.as_str()).collect();
        Ok(distinct.len() as i64)
    }
}

/// Schema provisioner that counts calls.
#[derive(Default)]
pub struct MemorySchema {
    provisioned: AtomicUsize,
    down: AtomicBool,
}

impl MemorySchema {
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn provision_count(&self) -> usize {
        self.provisioned.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SchemaProvisioner for MemorySchema {
    async fn provision(&self) -> Result<(), StoreError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("pool timed out".into()));
        }
        self.provisioned.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.down.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("pool timed out".into()))
        } else {
            Ok(())
        }
    }
}

/// Test configuration: console email enabled with one staff recipient.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_secs: 30,
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_secs: 1,
            idle_timeout_secs: 60,
            provision_on_startup: false,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig::default(),
        email: EmailConfig {
            enabled: true,
            notification_recipients: vec![STAFF_EMAIL.to_string()],
            ..EmailConfig::default()
        },
        checkout: CheckoutConfig {
            payment_url: PAYMENT_URL.to_string(),
            contact_whatsapp: "3209344964".to_string(),
        },
    }
}

/// A wired router plus handles on its fakes.
pub struct TestApp {
    pub router: Router,
    pub registrants: Arc<MemoryRegistrants>,
    pub page_views: Arc<MemoryPageViews>,
    pub schema: Arc<MemorySchema>,
    pub notifier: MockNotifier,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_notifier(MockNotifier::new())
    }

    pub fn with_notifier(notifier: MockNotifier) -> Self {
        Self::build(test_config(), notifier)
    }

    pub fn build(config: Config, notifier: MockNotifier) -> Self {
        let registrants = Arc::new(MemoryRegistrants::default());
        let page_views = Arc::new(MemoryPageViews::default());
        let schema = Arc::new(MemorySchema::default());
        let state = AppState::new(
            config,
            registrants.clone(),
            page_views.clone(),
            schema.clone(),
            Arc::new(notifier.clone()),
        );
        Self {
            router: create_router(state),
            registrants,
            page_views,
            schema,
            notifier,
        }
    }

    pub async fn request(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.unwrap()
    }
}

/// URL-encoded body for `POST /api/registro`.
pub fn form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, shared::links::encode_uri_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Fields of a registration that passes every check.
pub fn valid_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("nombre", "Ana"),
        ("apellido", "Gómez"),
        ("whatsapp", "300 123 4567"),
        ("email", "ana@example.com"),
        ("fecha_viaje", "Sábado 14 de marzo"),
        ("tratamiento_datos", "on"),
    ]
}

pub fn registration_request(fields: &[(&str, &str)], client_ip: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/registro")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(ip) = client_ip {
        builder = builder.header("x-forwarded-for", ip);
    }
    builder.body(Body::from(form_body(fields))).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
