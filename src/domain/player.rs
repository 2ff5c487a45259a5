// ==========================================
// 冰球选秀池阵容决策系统 - 球员实体
// ==========================================
// 职责: 球员主数据 (身份 + 工资帽占用 + 评分 + 统计)
// 红线: PlayerId 在选秀池构建时分配,跨赛段保持不变
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// PlayerId - 球员代理键
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

// ==========================================
// PlayerStats - 球员统计
// ==========================================
// 守门员专属字段对其他类别恒为 0
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    pub goals: u32,
    pub assists: u32,
    pub games_played: u32,
    pub wins: u32,
    pub shutouts: u32,
    pub saves: u32,
    /// 扑救率均值 (0.0 ~ 1.0),无记录时为 0
    pub saves_percent: f64,
}

// ==========================================
// Player - 球员
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// 工资帽占用 (cap hit)
    pub cost: u64,
    /// 当前上下文下的目标函数权重
    pub score: f64,
    pub stats: PlayerStats,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, cost: u64, score: f64) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            score,
            stats: PlayerStats::default(),
        }
    }

    pub fn with_stats(mut self, stats: PlayerStats) -> Self {
        self.stats = stats;
        self
    }
}
