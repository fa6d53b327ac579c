// ==========================================
// 餐厅库存智能分析 - 到货食材名称映射
// ==========================================
// 职责: 到货表食材名 → 用量表列名 的固定翻译表
// 说明: "Peas + Carrot" 在到货表中合并,在用量表中只对应 peas_g
// ==========================================

use crate::domain::sales::ShipmentProfile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 默认映射 (到货表名称, 用量表列名)
pub const DEFAULT_SHIPMENT_NAME_MAPPING: [(&str, &str); 14] = [
    ("Beef", "braised_beef_g"),
    ("Chicken", "braised_chicken_g"),
    ("Ramen", "ramen_count"),
    ("Rice Noodles", "rice_noodles_g"),
    ("Flour", "flour_g"),
    ("Tapioca Starch", "tapioca_starch"),
    ("Rice", "rice_g"),
    ("Green Onion", "green_onion"),
    ("White Onion", "white_onion"),
    ("Cilantro", "cilantro"),
    ("Egg", "egg_count"),
    ("Peas + Carrot", "peas_g"),
    ("Bokchoy", "bokchoy_g"),
    ("Chicken Wings", "chicken_wings_pcs"),
];

/// 到货名称映射表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipmentNameMapping {
    shipment_to_usage: BTreeMap<String, String>,
}

impl Default for ShipmentNameMapping {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_SHIPMENT_NAME_MAPPING)
    }
}

impl ShipmentNameMapping {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            shipment_to_usage: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// 到货表名称对应的用量表列名 (精确匹配)
    pub fn usage_column_for(&self, shipment_name: &str) -> Option<&str> {
        self.shipment_to_usage.get(shipment_name).map(String::as_str)
    }

    /// 查找某个用量表食材对应的到货档案
    ///
    /// 多条到货记录映射到同一列时取第一条
    pub fn find_shipment<'a>(
        &self,
        ingredient_name: &str,
        shipments: &'a [ShipmentProfile],
    ) -> Option<&'a ShipmentProfile> {
        shipments
            .iter()
            .find(|s| self.usage_column_for(&s.ingredient_name) == Some(ingredient_name))
    }

    pub fn len(&self) -> usize {
        self.shipment_to_usage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shipment_to_usage.is_empty()
    }
}
