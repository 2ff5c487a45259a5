// ==========================================
// 冰球选秀池阵容决策系统 - 回测选秀池构建
// ==========================================
// 职责: 用上一赛季统计挑选、用本赛季统计评估
// 规则:
// 1) 每个类别只保留两个赛季都存在的球员（按姓名交集,按姓名排序）
// 2) 历史池用挑选策略打分,但工资帽占用取本赛季数值（保证阵容对本赛季合法）
// 3) 本赛季池用评估策略打分
// 4) 两个池按相同顺序构建,下标与 PlayerId 一一对应
// ==========================================

use crate::domain::player::Player;
use crate::domain::pool::{Pool, PoolBuilder};
use crate::domain::types::PlayerType;
use crate::engine::strategy::ValueStrategy;
use std::collections::BTreeMap;
use tracing::{info, warn};

// ==========================================
// BacktestPools - 回测选秀池
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestPools {
    /// 上一赛季（挑选用）
    pub past: Pool,
    /// 本赛季（评估与赛段模拟用）
    pub present: Pool,
    /// 只在其中一个赛季出现而被剔除的球员
    pub dropped: Vec<(PlayerType, String)>,
}

/// 同名球员只保留第一条
fn by_name(group: &[Player]) -> BTreeMap<&str, &Player> {
    let mut map = BTreeMap::new();
    for p in group {
        map.entry(p.name.as_str()).or_insert(p);
    }
    map
}

pub fn build_backtest_pools(
    past: &Pool,
    present: &Pool,
    picking: ValueStrategy,
    evaluation: ValueStrategy,
) -> BacktestPools {
    let mut past_builder = PoolBuilder::default();
    let mut present_builder = PoolBuilder::default();
    let mut dropped = Vec::new();

    for t in PlayerType::ALL {
        let before = by_name(past.group(t));
        let after = by_name(present.group(t));

        for (name, then) in &before {
            let Some(now) = after.get(name) else {
                dropped.push((t, name.to_string()));
                continue;
            };
            past_builder.push(t, *name, now.cost, picking.score(t, &then.stats), then.stats);
            present_builder.push(t, *name, now.cost, evaluation.score(t, &now.stats), now.stats);
        }
        for name in after.keys().filter(|n| !before.contains_key(*n)) {
            dropped.push((t, name.to_string()));
        }
    }

    if !dropped.is_empty() {
        warn!(count = dropped.len(), "两个赛季球员名单不一致,已剔除");
    }

    let pools = BacktestPools {
        past: past_builder.build(),
        present: present_builder.build(),
        dropped,
    };
    info!(
        forwards = pools.present.len(PlayerType::Forward),
        defenders = pools.present.len(PlayerType::Defender),
        goalies = pools.present.len(PlayerType::Goalie),
        picking = picking.as_str(),
        evaluation = evaluation.as_str(),
        "回测选秀池构建完成"
    );
    pools
}
