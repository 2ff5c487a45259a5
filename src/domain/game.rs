// ==========================================
// 冰球选秀池阵容决策系统 - 比赛记录
// ==========================================
// 职责: 单场比赛的进球事件与守门员出场记录
// 红线: 只读输入,统计聚合过程中不得修改
// ==========================================

use crate::domain::types::GoalieDecision;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 进球事件: 进球者 + 助攻者列表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringEvent {
    pub scorer: String,
    #[serde(default)]
    pub assists: Vec<String>,
}

/// 守门员出场记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalieAppearance {
    pub name: String,
    #[serde(default)]
    pub decision: Option<GoalieDecision>,
    #[serde(default)]
    pub saves: u32,
    #[serde(default)]
    pub saves_percent: Option<f64>,
    #[serde(default)]
    pub shutout: bool,
}

/// 单场比赛记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub scores: Vec<ScoringEvent>,
    #[serde(default)]
    pub goalies: Vec<GoalieAppearance>,
}

impl GameRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            scores: Vec::new(),
            goalies: Vec::new(),
        }
    }

    /// 追加一个进球事件
    pub fn goal(mut self, scorer: &str, assists: &[&str]) -> Self {
        self.scores.push(ScoringEvent {
            scorer: scorer.to_string(),
            assists: assists.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    /// 追加一条守门员出场记录
    pub fn goalie(mut self, appearance: GoalieAppearance) -> Self {
        self.goalies.push(appearance);
        self
    }
}
