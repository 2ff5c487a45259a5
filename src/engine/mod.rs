// ==========================================
// 冰球选秀池阵容决策系统 - 引擎层
// ==========================================
// 职责: 阵容建模、求解、评分、赛段统计与赛季模拟
// 红线: 引擎不读文件,输入一律为内存中的选秀池与比赛记录
// 红线: 求解结果必须带求解状态,不得以“尽力而为”代替最优
// ==========================================

pub mod backtest;
pub mod error;
pub mod period_stats;
pub mod picker;
pub mod roster_model;
pub mod simulator;
pub mod solver;
pub mod strategy;

// 重导出核心引擎
pub use backtest::{build_backtest_pools, BacktestPools};
pub use error::{EngineError, EngineResult};
pub use period_stats::{aggregate, filter_games, restat_pool, PeriodTally};
pub use picker::{Projection, RosterPicker};
pub use roster_model::{Assignment, RetentionConstraint, RosterModel, Variable};
pub use simulator::{
    realized_value, PeriodReport, PeriodSimulator, SimulationOutcome, DEFAULT_TRADE_BUDGET,
};
pub use solver::{BranchAndBound, SearchLimits, SolveOutcome, SolveStatus};
pub use strategy::{ValueStrategy, DEFAULT_MINIMUM_GAMES};
