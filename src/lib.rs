// ==========================================
// 冰球选秀池阵容决策系统 - 核心库
// ==========================================
// 职责: 工资帽约束下的阵容选择,以及按月赛段的带交易额度重选与回测
// 系统定位: 每次运行都是输入的纯函数,不持久化任何状态
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 建模、求解、评分、模拟
pub mod engine;

// 导入层 - 球员表与比赛记录
pub mod importer;

// 配置层 - 运行参数
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    DateWindow, GameRecord, GoalieDecision, Period, Player, PlayerId, PlayerStats, PlayerType,
    Pool, RosterShape, Season, Solution, SolutionDiff,
};

// 引擎
pub use engine::{
    build_backtest_pools, EngineError, PeriodSimulator, RosterPicker, SearchLimits,
    SimulationOutcome, SolveStatus, ValueStrategy,
};

// 配置
pub use config::{ConfigError, PickerConfig};

// 导入
pub use importer::ImportError;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "冰球选秀池阵容决策系统";
