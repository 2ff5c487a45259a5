// ==========================================
// 冰球选秀池阵容决策系统 - 评分策略
// ==========================================
// 用途:
// - 初选使用“挑选策略”为历史赛季数据打分;
// - 赛段回测使用“评估策略”计算持有阵容的实得分。
// 按球员类别分派,封闭集合,不做继承。
// ==========================================

use crate::domain::player::PlayerStats;
use crate::domain::pool::Pool;
use crate::domain::types::PlayerType;
use serde::{Deserialize, Serialize};

/// 扑救率策略的默认最少出场数
pub const DEFAULT_MINIMUM_GAMES: u32 = 52;

/// 评分策略
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueStrategy {
    /// 标准计分: 前锋 进球×2+助攻, 后卫 进球×3+助攻×2,
    /// 守门员 胜×3+完封×5+进球×5+助攻×2
    Marqueur,
    /// 标准计分,后卫得分翻倍
    MarqueurDoubledDefenders,
    /// 标准计分,守门员只计 胜×2+完封×3
    MarqueurMinusGambling,
    /// 前锋/后卫按 250 分归一化到千分制,守门员按扑救率（出场不足记 0）
    MarqueurWithPercentage { minimum_games: u32 },
    /// 前锋/后卫只计助攻,守门员按扑救率千分制
    Moneyball,
}

impl Default for ValueStrategy {
    fn default() -> Self {
        ValueStrategy::Marqueur
    }
}

impl ValueStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueStrategy::Marqueur => "marqueur",
            ValueStrategy::MarqueurDoubledDefenders => "marqueur_doubled_defenders",
            ValueStrategy::MarqueurMinusGambling => "marqueur_minus_gambling",
            ValueStrategy::MarqueurWithPercentage { .. } => "marqueur_with_percentage",
            ValueStrategy::Moneyball => "moneyball",
        }
    }

    /// 按类别计算单名球员评分
    pub fn score(&self, player_type: PlayerType, stats: &PlayerStats) -> f64 {
        match player_type {
            PlayerType::Forward => self.forward(stats),
            PlayerType::Defender => self.defender(stats),
            PlayerType::Goalie => self.goalie(stats),
        }
    }

    /// 为整个选秀池重新打分（顺序与 PlayerId 不变）
    pub fn rescore(&self, pool: &Pool) -> Pool {
        pool.with_scores(|t, p| self.score(t, &p.stats))
    }

    fn forward(&self, s: &PlayerStats) -> f64 {
        let points = f64::from(s.goals) * 2.0 + f64::from(s.assists);
        match self {
            ValueStrategy::Moneyball => f64::from(s.assists),
            ValueStrategy::MarqueurWithPercentage { .. } => points / 250.0 * 1000.0,
            _ => points,
        }
    }

    fn defender(&self, s: &PlayerStats) -> f64 {
        let points = f64::from(s.goals) * 3.0 + f64::from(s.assists) * 2.0;
        match self {
            ValueStrategy::Moneyball => f64::from(s.assists),
            ValueStrategy::MarqueurWithPercentage { .. } => points / 250.0 * 1000.0,
            ValueStrategy::MarqueurDoubledDefenders => points * 2.0,
            _ => points,
        }
    }

    fn goalie(&self, s: &PlayerStats) -> f64 {
        match self {
            ValueStrategy::MarqueurMinusGambling => {
                f64::from(s.wins) * 2.0 + f64::from(s.shutouts) * 3.0
            }
            ValueStrategy::Moneyball => saves_permille(s),
            ValueStrategy::MarqueurWithPercentage { minimum_games } => {
                if s.games_played < *minimum_games {
                    0.0
                } else {
                    saves_permille(s)
                }
            }
            _ => {
                f64::from(s.wins) * 3.0
                    + f64::from(s.shutouts) * 5.0
                    + f64::from(s.goals) * 5.0
                    + f64::from(s.assists) * 2.0
            }
        }
    }
}

/// 扑救率千分制（截断取整）
fn saves_permille(s: &PlayerStats) -> f64 {
    (s.saves_percent * 1000.0).trunc()
}

impl std::str::FromStr for ValueStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "marqueur" => Ok(ValueStrategy::Marqueur),
            "marqueur_doubled_defenders" => Ok(ValueStrategy::MarqueurDoubledDefenders),
            "marqueur_minus_gambling" => Ok(ValueStrategy::MarqueurMinusGambling),
            "marqueur_with_percentage" => Ok(ValueStrategy::MarqueurWithPercentage {
                minimum_games: DEFAULT_MINIMUM_GAMES,
            }),
            "moneyball" => Ok(ValueStrategy::Moneyball),
            other => Err(format!("未知评分策略: {}", other)),
        }
    }
}
