//! Resource routes. Collection paths answer with and without the trailing slash.

use crate::handlers::auth::login;
use crate::handlers::products::{create_product, delete_product, get_product, list_products, update_product};
use crate::handlers::users::{create_user, delete_user, get_user, list_users, update_user};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn user_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/", get(list_users).post(create_user))
        .route("/api/users/:id", get(get_user).put(update_user).delete(delete_user))
        .with_state(state)
}

pub fn product_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/", get(list_products).post(create_product))
        .route(
            "/api/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(state)
}

pub fn auth_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/login", post(login))
        .with_state(state)
}
