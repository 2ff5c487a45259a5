// ==========================================
// 冰球选秀池阵容决策系统 - 领域类型定义
// ==========================================
// 职责: 球员类别、阵容形状、守门员比赛结果
// 红线: 三个类别互不相交,每类阵容人数固定
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 球员类别 (Player Type)
// ==========================================
// 顺序即求解模型中的类别下标: 前锋=0, 后卫=1, 守门员=2
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerType {
    Forward,  // 前锋
    Defender, // 后卫
    Goalie,   // 守门员
}

impl PlayerType {
    /// 全部类别（固定顺序）
    pub const ALL: [PlayerType; 3] = [PlayerType::Forward, PlayerType::Defender, PlayerType::Goalie];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerType::Forward => "forward",
            PlayerType::Defender => "defender",
            PlayerType::Goalie => "goalie",
        }
    }

    /// 分组名称（用于汇总表）
    pub fn group_name(&self) -> &'static str {
        match self {
            PlayerType::Forward => "forwards",
            PlayerType::Defender => "defenders",
            PlayerType::Goalie => "goalies",
        }
    }

    /// 类别下标
    pub fn index(&self) -> usize {
        match self {
            PlayerType::Forward => 0,
            PlayerType::Defender => 1,
            PlayerType::Goalie => 2,
        }
    }
}

impl fmt::Display for PlayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlayerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "forward" | "forwards" | "f" => Ok(PlayerType::Forward),
            "defender" | "defenders" | "d" => Ok(PlayerType::Defender),
            "goalie" | "goalies" | "g" => Ok(PlayerType::Goalie),
            other => Err(format!("未知球员类别: {}", other)),
        }
    }
}

// ==========================================
// 阵容形状 (Roster Shape)
// ==========================================
// 每个类别必须恰好选满的人数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterShape {
    pub forwards: usize,
    pub defenders: usize,
    pub goalies: usize,
}

impl RosterShape {
    pub const fn new(forwards: usize, defenders: usize, goalies: usize) -> Self {
        Self {
            forwards,
            defenders,
            goalies,
        }
    }

    /// 指定类别的必选人数
    pub fn count(&self, player_type: PlayerType) -> usize {
        match player_type {
            PlayerType::Forward => self.forwards,
            PlayerType::Defender => self.defenders,
            PlayerType::Goalie => self.goalies,
        }
    }

    /// 阵容总人数
    pub fn total(&self) -> usize {
        self.forwards + self.defenders + self.goalies
    }
}

impl Default for RosterShape {
    /// 12 前锋 + 6 后卫 + 2 守门员
    fn default() -> Self {
        Self::new(12, 6, 2)
    }
}

// ==========================================
// 守门员比赛结果 (Goalie Decision)
// ==========================================
// 序列化格式与比赛记录一致: W / L / O
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalieDecision {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "O")]
    OvertimeLoss,
}

impl fmt::Display for GoalieDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalieDecision::Win => write!(f, "W"),
            GoalieDecision::Loss => write!(f, "L"),
            GoalieDecision::OvertimeLoss => write!(f, "O"),
        }
    }
}
