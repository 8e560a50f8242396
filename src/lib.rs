//! Catalog API: user and product CRUD over PostgreSQL, with a login stub.

pub mod codec;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod repository;
pub mod response;
pub mod routes;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;

pub use error::{AppError, ConfigError, StoreError};
pub use model::{EntityMap, FieldKind, FieldMap, Record, ENTITIES, PRODUCT, USER};
pub use repository::Repository;
pub use routes::{app, auth_routes, common_routes, docs_routes, product_routes, user_routes};
pub use settings::Settings;
pub use state::AppState;
pub use store::{ensure_database_exists, PgStore, RecordStore};
