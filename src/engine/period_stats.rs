// ==========================================
// 冰球选秀池阵容决策系统 - 赛段统计聚合
// ==========================================
// 职责: 将比赛记录按时间窗口过滤,按球员姓名聚合为赛段统计
// 红线: 比赛记录只读;选秀池中找不到记录的球员统计为零,不报错
// 口径: 守门员胜场只在 decision = W 时计入;完封只在胜场且 shutout 时计入
//       （完封胜同时计入胜场与完封,属于有意的重复计分）
// ==========================================

use crate::domain::game::GameRecord;
use crate::domain::player::{Player, PlayerStats};
use crate::domain::pool::Pool;
use crate::domain::season::DateWindow;
use crate::domain::types::{GoalieDecision, PlayerType};
use std::collections::HashMap;
use tracing::debug;

/// 过滤出日期落在窗口内（闭区间）的比赛
pub fn filter_games<'a>(games: &'a [GameRecord], window: DateWindow) -> Vec<&'a GameRecord> {
    games.iter().filter(|g| window.contains(g.date)).collect()
}

// ==========================================
// GoalieTally - 守门员累计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
struct GoalieTally {
    games_played: u32,
    saves: u32,
    wins: u32,
    shutouts: u32,
    saves_percent: Vec<f64>,
}

// ==========================================
// PeriodTally - 赛段累计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodTally {
    goals: HashMap<String, u32>,
    assists: HashMap<String, u32>,
    goalies: HashMap<String, GoalieTally>,
    games: usize,
}

impl PeriodTally {
    /// 参与聚合的比赛场数
    pub fn games(&self) -> usize {
        self.games
    }

    /// 按姓名取赛段统计
    ///
    /// 前锋/后卫只有进球与助攻;守门员另计出场、扑救、胜场、完封与扑救率均值
    pub fn stats_for(&self, name: &str, player_type: PlayerType) -> PlayerStats {
        let mut stats = PlayerStats {
            goals: self.goals.get(name).copied().unwrap_or(0),
            assists: self.assists.get(name).copied().unwrap_or(0),
            ..Default::default()
        };

        if player_type == PlayerType::Goalie {
            if let Some(g) = self.goalies.get(name) {
                stats.games_played = g.games_played;
                stats.saves = g.saves;
                stats.wins = g.wins;
                stats.shutouts = g.shutouts;
                stats.saves_percent = mean(&g.saves_percent);
            }
        }
        stats
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// 聚合一组比赛记录
pub fn aggregate<'a, I>(games: I) -> PeriodTally
where
    I: IntoIterator<Item = &'a GameRecord>,
{
    let mut tally = PeriodTally::default();

    for game in games {
        tally.games += 1;

        for event in &game.scores {
            *tally.goals.entry(event.scorer.clone()).or_insert(0) += 1;
            for assist in &event.assists {
                *tally.assists.entry(assist.clone()).or_insert(0) += 1;
            }
        }

        for appearance in &game.goalies {
            let g = tally.goalies.entry(appearance.name.clone()).or_default();
            g.games_played += 1;
            g.saves = g.saves.saturating_add(appearance.saves);
            if let Some(pct) = appearance.saves_percent {
                g.saves_percent.push(pct);
            }
            if appearance.decision == Some(GoalieDecision::Win) {
                g.wins += 1;
                if appearance.shutout {
                    g.shutouts += 1;
                }
            }
        }
    }

    tally
}

/// 用窗口内比赛重算整个选秀池的统计（顺序、PlayerId、工资帽占用不变）
pub fn restat_pool(pool: &Pool, games: &[GameRecord], window: DateWindow) -> Pool {
    let in_window = filter_games(games, window);
    let tally = aggregate(in_window.iter().copied());
    debug!(window = %window, games = tally.games(), "赛段统计聚合完成");
    pool.with_stats(|t, p: &Player| tally.stats_for(&p.name, t))
}
