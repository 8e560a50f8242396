//! Shared application state for all routes. Built once at startup from an injected record store.

use crate::model::{PRODUCT, USER};
use crate::repository::Repository;
use crate::store::RecordStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub users: Repository,
    pub products: Repository,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        AppState {
            users: Repository::new(store.clone(), &USER),
            products: Repository::new(store.clone(), &PRODUCT),
            store,
        }
    }
}
