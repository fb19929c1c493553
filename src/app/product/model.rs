//! 产品数据模型
//!
//! 除 `id` 外的字段不做类型约束，按客户端提交的 JSON 原样保存。

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::infrastructure::memory_store::Record;

/// 创建时从请求体中保留的字段
pub const PRODUCT_FIELDS: [&str; 5] = ["name", "description", "price", "category", "inStock"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record for Product {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Product {
    /// 从请求体挑出已知字段构造产品，未提交的字段不出现
    pub fn from_body(id: String, body: &Map<String, Value>) -> Product {
        let fields = PRODUCT_FIELDS
            .iter()
            .filter_map(|key| body.get(*key).map(|v| (key.to_string(), v.clone())))
            .collect();
        Product { id, fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    /// 浅合并: 请求体中出现的字段（包括 `null` 与未知字段）一律覆盖，`id` 不变
    pub fn merged(&self, patch: Map<String, Value>) -> Product {
        let mut fields = self.fields.clone();
        fields.extend(patch.into_iter().filter(|(key, _)| key != "id"));
        Product {
            id: self.id.clone(),
            fields,
        }
    }
}

/// JavaScript 语义下的真值判断: 缺失、null、false、0、空串为假
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn seed(
    id: &str,
    name: &str,
    description: &str,
    price: u64,
    category: &str,
    in_stock: bool,
) -> Product {
    let mut fields = Map::new();
    fields.insert("name".to_string(), json!(name));
    fields.insert("description".to_string(), json!(description));
    fields.insert("price".to_string(), json!(price));
    fields.insert("category".to_string(), json!(category));
    fields.insert("inStock".to_string(), json!(in_stock));
    Product {
        id: id.to_string(),
        fields,
    }
}

/// 启动时载入的示例数据
pub fn seed_products() -> Vec<Product> {
    vec![
        seed(
            "1",
            "Laptop",
            "High-performance laptop with 16GB RAM",
            1200,
            "electronics",
            true,
        ),
        seed(
            "2",
            "Smartphone",
            "Latest model with 128GB storage",
            800,
            "electronics",
            true,
        ),
        seed(
            "3",
            "Coffee Maker",
            "Programmable coffee maker with timer",
            50,
            "kitchen",
            false,
        ),
    ]
}
