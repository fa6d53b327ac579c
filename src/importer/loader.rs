// ==========================================
// 餐厅库存智能分析 - 输入数据加载器
// ==========================================
// 流程: 文件解析 → 字段映射/清洗 → 领域结构
// 规则:
// - 销售 / 配方文件必需,任一行非法即整体失败
// - 到货文件可选: 未配置或文件不存在时告警并按无到货数据继续
// ==========================================

use crate::config::config_manager::PipelinePaths;
use crate::domain::sales::{RecipeVector, SalesRecord, ShipmentProfile};
use crate::engine::orchestrator::PipelineInputs;
use crate::engine::recipe_matcher::RecipeBook;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use std::path::Path;
use tracing::{info, warn};

pub struct InventoryDataLoader {
    parser: UniversalFileParser,
    mapper: FieldMapper,
}

impl InventoryDataLoader {
    pub fn new() -> Self {
        Self {
            parser: UniversalFileParser,
            mapper: FieldMapper::new(),
        }
    }

    /// 加载菜品级月度销售
    pub fn load_sales<P: AsRef<Path>>(&self, path: P) -> ImportResult<Vec<SalesRecord>> {
        let path = path.as_ref();
        let rows = self.parser.parse(path)?;

        let mut records = Vec::with_capacity(rows.len());
        let mut skipped = 0usize;
        for (idx, row) in rows.iter().enumerate() {
            match self.mapper.map_sales_row(row, idx + 1)? {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }

        info!(
            path = %path.display(),
            rows = rows.len(),
            records = records.len(),
            skipped_non_item = skipped,
            "销售数据加载完成"
        );
        Ok(records)
    }

    /// 加载配方用量
    pub fn load_recipes<P: AsRef<Path>>(&self, path: P) -> ImportResult<Vec<RecipeVector>> {
        let path = path.as_ref();
        let rows = self.parser.parse(path)?;

        let recipes = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.mapper.map_recipe_row(row, idx + 1))
            .collect::<ImportResult<Vec<_>>>()?;

        info!(path = %path.display(), recipes = recipes.len(), "配方数据加载完成");
        Ok(recipes)
    }

    /// 加载到货档案
    pub fn load_shipments<P: AsRef<Path>>(&self, path: P) -> ImportResult<Vec<ShipmentProfile>> {
        let path = path.as_ref();
        let rows = self.parser.parse(path)?;

        let shipments = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.mapper.map_shipment_row(row, idx + 1))
            .collect::<ImportResult<Vec<_>>>()?;

        info!(path = %path.display(), shipments = shipments.len(), "到货数据加载完成");
        Ok(shipments)
    }

    /// 按配置路径加载全部输入,组装成不可变快照
    pub fn load_inputs(&self, paths: &PipelinePaths) -> ImportResult<PipelineInputs> {
        let sales = self.load_sales(&paths.sales_path)?;
        let recipes = RecipeBook::from_vectors(self.load_recipes(&paths.recipes_path)?);

        let shipments = match &paths.shipments_path {
            Some(path) if path.exists() => self.load_shipments(path)?,
            Some(path) => {
                warn!(path = %path.display(), "到货文件不存在,按无到货数据继续");
                Vec::new()
            }
            None => {
                info!("未配置到货文件,跳过");
                Vec::new()
            }
        };

        Ok(PipelineInputs {
            sales,
            recipes,
            shipments,
        })
    }
}

impl Default for InventoryDataLoader {
    fn default() -> Self {
        Self::new()
    }
}
