use log::{debug, info};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::errors::{FundError, Result};
use crate::models::{FundBasic, FundType, RiskLevel};

/// 内置基金目录，编译期嵌入
const BUNDLED_CATALOG: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/funds.json"));

/// 目录文件中的一条记录
#[derive(Debug, Clone, Deserialize)]
struct CatalogEntry {
    code: String,
    name: String,
    fund_type: FundType,
    risk_level: RiskLevel,
    #[serde(default)]
    hot: bool,
}

/// 基金目录，用于列表、热门、搜索和分类筛选
///
/// 只读，加载一次后不再修改。
pub struct FundCatalog {
    funds: Vec<FundBasic>,
    hot: Vec<bool>,
    // 索引用于快速查找
    code_index: HashMap<String, usize>,
    category_index: HashMap<FundType, Vec<usize>>,
}

impl FundCatalog {
    /// 使用内置目录
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// 从文件加载目录
    pub fn load_from_file(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Err(FundError::DataError(format!("Catalog file not found: {}", path)));
        }
        info!("Loading fund catalog from {}", path);
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// 解析 `{ "<分类>": [ {code, name, fund_type, risk_level, hot}, ... ] }`
    ///
    /// 分类按 stock、hybrid、bond、index、money、qdii 的顺序排列，
    /// 同一分类内保持文件中的顺序。
    pub fn from_json(text: &str) -> Result<Self> {
        let mut categories: HashMap<String, Vec<CatalogEntry>> = serde_json::from_str(text)?;

        let mut catalog = Self {
            funds: Vec::new(),
            hot: Vec::new(),
            code_index: HashMap::new(),
            category_index: HashMap::new(),
        };

        for fund_type in FundType::ALL {
            let Some(entries) = categories.remove(fund_type.as_str()) else {
                continue;
            };
            for entry in entries {
                let index = catalog.funds.len();
                catalog.category_index.entry(fund_type).or_insert_with(Vec::new).push(index);
                catalog.hot.push(entry.hot);
                catalog.funds.push(FundBasic {
                    code: entry.code,
                    name: entry.name,
                    fund_type: entry.fund_type,
                    risk_level: entry.risk_level,
                });
            }
        }

        if let Some(unknown) = categories.keys().next() {
            return Err(FundError::DataError(format!("Unknown catalog category: {}", unknown)));
        }

        catalog.rebuild_code_index();
        debug!("Fund catalog holds {} funds", catalog.funds.len());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.funds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funds.is_empty()
    }

    /// 全部基金，或某一分类的基金
    pub fn list(&self, category: Option<FundType>) -> Vec<&FundBasic> {
        self.indices(category).into_iter().map(|i| &self.funds[i]).collect()
    }

    /// 热门基金
    pub fn hot(&self, category: Option<FundType>) -> Vec<&FundBasic> {
        self.indices(category)
            .into_iter()
            .filter(|&i| self.hot[i])
            .map(|i| &self.funds[i])
            .collect()
    }

    /// 按代码或名称搜索，忽略大小写的子串匹配
    pub fn search(&self, keyword: &str) -> Vec<&FundBasic> {
        let keyword = keyword.to_lowercase();
        self.funds
            .iter()
            .filter(|f| f.code.to_lowercase().contains(&keyword) || f.name.to_lowercase().contains(&keyword))
            .collect()
    }

    /// 按代码精确查找
    pub fn get(&self, code: &str) -> Option<&FundBasic> {
        self.code_index.get(code).map(|&idx| &self.funds[idx])
    }

    fn indices(&self, category: Option<FundType>) -> Vec<usize> {
        match category {
            Some(fund_type) => self.category_index.get(&fund_type).cloned().unwrap_or_default(),
            None => (0..self.funds.len()).collect(),
        }
    }

    /// 重建代码索引，同一代码出现多次时以第一次为准
    fn rebuild_code_index(&mut self) {
        self.code_index.clear();
        for (i, fund) in self.funds.iter().enumerate() {
            self.code_index.entry(fund.code.clone()).or_insert(i);
        }
    }
}
