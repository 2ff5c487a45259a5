// ==========================================
// 冰球选秀池阵容决策系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 求解状态必须随错误带出,不得以字符串代替
// ==========================================

use crate::domain::types::PlayerType;
use crate::engine::solver::SolveStatus;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    // ===== 输入形状错误 =====
    /// 某类别候选人数少于必选人数,等式约束结构上无法满足
    #[error("选秀池无效: type={player_type}, available={available}, required={required}")]
    InvalidPool {
        player_type: PlayerType,
        available: usize,
        required: usize,
    },

    /// 评分不是有限数值,目标函数无法比较
    #[error("球员评分无效: type={player_type}, name={name}, score={score}")]
    InvalidScore {
        player_type: PlayerType,
        name: String,
        score: f64,
    },

    /// 保留约束引用的下标超出新选秀池范围
    #[error("保留约束下标越界: type={player_type}, index={index}, len={len}")]
    RetentionIndexOutOfRange {
        player_type: PlayerType,
        index: usize,
        len: usize,
    },

    // ===== 求解错误 =====
    /// 后端未能证明最优（不可行 / 搜索上限）
    #[error("无最优解: status={status}")]
    NoOptimalSolution { status: SolveStatus },

    // ===== 投影错误 =====
    #[error("投影未匹配球员: {names:?}")]
    UnmatchedProjection { names: Vec<String> },

    // ===== 配置错误 =====
    #[error("引擎配置无效: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// 是否为搜索上限导致（可调大上限后重试）
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EngineError::NoOptimalSolution {
                status: SolveStatus::NodeLimit | SolveStatus::TimeLimit
            }
        )
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
