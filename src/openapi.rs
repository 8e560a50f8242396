//! OpenAPI document. The schema types below only describe the wire format;
//! requests and responses are encoded through the entity mappings in `model`.

use crate::handlers::auth::LoginRequest;
use crate::response::{ErrorBody, MessageBody};
use utoipa::{OpenApi, ToSchema};

/// User as returned by the API. The password is never included.
#[derive(ToSchema)]
pub struct UserView {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "a@x.com")]
    pub email: String,
}

/// User payload for create and update. Omitted fields are empty on create and unchanged on update.
#[derive(ToSchema)]
pub struct UserInput {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(ToSchema)]
pub struct ProductView {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Desk")]
    pub name: String,
    #[schema(example = 129.5)]
    pub price: f64,
}

/// Product payload for create and update. Omitted fields are zero on create and unchanged on update.
#[derive(ToSchema)]
pub struct ProductInput {
    pub name: Option<String>,
    pub price: Option<f64>,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        description = "CRUD for users and products, with a login stub that does not verify passwords."
    ),
    paths(
        crate::handlers::users::create_user,
        crate::handlers::users::list_users,
        crate::handlers::users::get_user,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,
        crate::handlers::products::create_product,
        crate::handlers::products::list_products,
        crate::handlers::products::get_product,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,
        crate::handlers::auth::login,
    ),
    components(schemas(UserView, UserInput, ProductView, ProductInput, LoginRequest, MessageBody, ErrorBody)),
    tags(
        (name = "users", description = "User CRUD"),
        (name = "products", description = "Product CRUD"),
        (name = "auth", description = "Login stub")
    )
)]
pub struct ApiDoc;
