// ==========================================
// 冰球选秀池阵容决策系统 - 运行配置
// ==========================================
// 职责: 工资帽、交易额度、阵容形状、搜索上限与评分策略
// 来源: 默认值 → JSON 配置文件 → 环境变量覆写
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::season::{Season, DEFAULT_LOOK_BACK_DAYS};
use crate::domain::types::RosterShape;
use crate::engine::picker::RosterPicker;
use crate::engine::simulator::{PeriodSimulator, DEFAULT_TRADE_BUDGET};
use crate::engine::solver::SearchLimits;
use crate::engine::strategy::ValueStrategy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

// ==========================================
// PickerConfig - 运行配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// 工资帽;未配置时按模拟赛季查表
    pub salary_cap: Option<u64>,
    /// 每次重选最多更换的人数
    pub trade_budget: usize,
    pub roster: RosterShape,
    /// 回看窗口天数
    pub look_back_days: i64,
    /// 分支定界节点上限
    pub max_nodes: u64,
    /// 单次求解时间上限（毫秒）
    pub time_limit_ms: u64,
    pub picking_strategy: ValueStrategy,
    pub evaluation_strategy: ValueStrategy,
    /// 被模拟赛季的起始年份（挑选使用上一赛季数据）
    pub season: i32,
}

impl Default for PickerConfig {
    fn default() -> Self {
        let limits = SearchLimits::default();
        Self {
            salary_cap: None,
            trade_budget: DEFAULT_TRADE_BUDGET,
            roster: RosterShape::default(),
            look_back_days: DEFAULT_LOOK_BACK_DAYS,
            max_nodes: limits.max_nodes,
            time_limit_ms: limits
                .time_limit
                .map(|d| d.as_millis() as u64)
                .unwrap_or(120_000),
            picking_strategy: ValueStrategy::default(),
            evaluation_strategy: ValueStrategy::default(),
            season: 2022,
        }
    }
}

impl PickerConfig {
    /// 从 JSON 文件加载（缺省字段取默认值）
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        let text = std::fs::read_to_string(path)?;
        let config: PickerConfig = serde_json::from_str(&text)?;
        info!(path = %path.display(), "配置文件加载完成");
        Ok(config)
    }

    /// 用进程环境变量覆写
    pub fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// 用任意键值来源覆写（键名见 `env_keys`）
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(env_keys::SALARY_CAP) {
            self.salary_cap = Some(parse_value(env_keys::SALARY_CAP, &v)?);
        }
        if let Some(v) = lookup(env_keys::TRADE_BUDGET) {
            self.trade_budget = parse_value(env_keys::TRADE_BUDGET, &v)?;
        }
        if let Some(v) = lookup(env_keys::TIME_LIMIT_MS) {
            self.time_limit_ms = parse_value(env_keys::TIME_LIMIT_MS, &v)?;
        }
        if let Some(v) = lookup(env_keys::PICKING_STRATEGY) {
            self.picking_strategy = parse_value(env_keys::PICKING_STRATEGY, &v)?;
        }
        if let Some(v) = lookup(env_keys::EVALUATION_STRATEGY) {
            self.evaluation_strategy = parse_value(env_keys::EVALUATION_STRATEGY, &v)?;
        }
        debug!(config = ?self, "环境变量覆写完成");
        Ok(())
    }

    /// 校验配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.roster.total() == 0 {
            return Err(ConfigError::Invalid("阵容总人数必须大于 0".to_string()));
        }
        if self.look_back_days < 1 {
            return Err(ConfigError::Invalid(format!(
                "look_back_days 必须 >= 1,实际 {}",
                self.look_back_days
            )));
        }
        if self.time_limit_ms == 0 {
            return Err(ConfigError::Invalid("time_limit_ms 必须大于 0".to_string()));
        }
        if self.max_nodes == 0 {
            return Err(ConfigError::Invalid("max_nodes 必须大于 0".to_string()));
        }
        self.resolved_salary_cap()?;
        Ok(())
    }

    /// 被模拟的赛季
    pub fn simulated_season(&self) -> Season {
        Season::new(self.season)
    }

    /// 挑选所用的上一赛季
    pub fn picking_season(&self) -> Season {
        Season::new(self.season - 1)
    }

    /// 实际使用的工资帽: 显式配置优先,否则查模拟赛季的工资帽表
    ///
    /// 初选用的是上一赛季的统计,但工资帽取被模拟赛季（`season`）的数值,
    /// 不取挑选赛季（`season - 1`）的数值: 阵容要在被模拟赛季的工资帽下持有整季
    pub fn resolved_salary_cap(&self) -> ConfigResult<u64> {
        match self.salary_cap {
            Some(cap) => Ok(cap),
            None => self
                .simulated_season()
                .salary_cap()
                .ok_or(ConfigError::MissingSalaryCap { season: self.season }),
        }
    }

    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            max_nodes: self.max_nodes,
            time_limit: Some(Duration::from_millis(self.time_limit_ms)),
        }
    }

    pub fn picker(&self) -> RosterPicker {
        RosterPicker::new(self.roster, self.search_limits())
    }

    /// 按配置组装赛段模拟器
    pub fn simulator(&self) -> ConfigResult<PeriodSimulator> {
        Ok(PeriodSimulator::new(self.picker(), self.resolved_salary_cap()?)
            .with_trade_budget(self.trade_budget)
            .with_look_back_days(self.look_back_days)
            .with_strategies(self.picking_strategy, self.evaluation_strategy))
    }
}

fn parse_value<T>(key: &str, value: &str) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::ConfigValueError {
            key: key.to_string(),
            value: value.to_string(),
            message: e.to_string(),
        })
}

// ==========================================
// 环境变量键名
// ==========================================
pub mod env_keys {
    pub const SALARY_CAP: &str = "POOL_SALARY_CAP";
    pub const TRADE_BUDGET: &str = "POOL_TRADE_BUDGET";
    pub const TIME_LIMIT_MS: &str = "POOL_TIME_LIMIT_MS";
    pub const PICKING_STRATEGY: &str = "POOL_PICKING_STRATEGY";
    pub const EVALUATION_STRATEGY: &str = "POOL_EVALUATION_STRATEGY";
    /// 日志格式: `json` 为每行一个 JSON 对象,其他值为可读格式
    pub const LOG_FORMAT: &str = "POOL_LOG_FORMAT";
}
