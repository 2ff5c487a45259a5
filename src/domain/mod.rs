// ==========================================
// 冰球选秀池阵容决策系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含求解逻辑,不含文件读取
// ==========================================

pub mod game;
pub mod player;
pub mod pool;
pub mod season;
pub mod solution;
pub mod types;

// 重导出核心类型
pub use game::{GameRecord, GoalieAppearance, ScoringEvent};
pub use player::{Player, PlayerId, PlayerStats};
pub use pool::{Pool, PoolBuilder};
pub use season::{DateWindow, Period, Season, DEFAULT_LOOK_BACK_DAYS, SEASONS_CAP_HIT};
pub use solution::{render_summary, CategoryDiff, Solution, SolutionDiff, SolutionGroup, SummaryRow};
pub use types::{GoalieDecision, PlayerType, RosterShape};
