//! 产品业务服务

use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use super::model::{is_truthy, seed_products, Product};
use crate::core::error::CoreError;
use crate::infrastructure::memory_store::MemoryStore;

pub const NOT_FOUND_MESSAGE: &str = "Product not found";
pub const REQUIRED_FIELDS_MESSAGE: &str = "Name and price are required";

pub type ProductStore = MemoryStore<Product>;

#[derive(Clone)]
pub struct ProductService {
    store: ProductStore,
}

impl ProductService {
    pub fn new(store: ProductStore) -> Self {
        Self { store }
    }

    /// 以三条示例产品初始化
    pub fn with_seed_data() -> Self {
        Self::new(MemoryStore::with_records(seed_products()))
    }

    pub fn count(&self) -> Result<usize, CoreError> {
        self.store.count()
    }

    pub fn list_products(&self) -> Result<Vec<Product>, CoreError> {
        self.store.list()
    }

    pub fn get_product(&self, id: &str) -> Result<Product, CoreError> {
        self.store
            .get(id)?
            .ok_or_else(|| CoreError::NotFound(NOT_FOUND_MESSAGE.to_string()))
    }

    /// `name` 与 `price` 都必须为真值
    pub fn create_product(&self, body: &Map<String, Value>) -> Result<Product, CoreError> {
        if !is_truthy(body.get("name")) || !is_truthy(body.get("price")) {
            return Err(CoreError::BadRequest(REQUIRED_FIELDS_MESSAGE.to_string()));
        }

        let product = Product::from_body(Uuid::new_v4().to_string(), body);
        self.store.insert(product.clone())?;
        info!("已创建产品 {}，当前共 {} 个", product.id, self.store.count()?);
        Ok(product)
    }

    pub fn update_product(
        &self,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<Product, CoreError> {
        self.store
            .update(id, |current| Ok(current.merged(patch)))?
            .ok_or_else(|| CoreError::NotFound(NOT_FOUND_MESSAGE.to_string()))
    }

    pub fn delete_product(&self, id: &str) -> Result<Product, CoreError> {
        let removed = self
            .store
            .remove(id)?
            .ok_or_else(|| CoreError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;
        info!("已删除产品 {}", removed.id);
        Ok(removed)
    }
}
