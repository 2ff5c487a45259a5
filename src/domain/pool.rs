// ==========================================
// 冰球选秀池阵容决策系统 - 选秀池
// ==========================================
// 职责: 单一时间上下文下三个类别的候选球员有序列表
// 红线: 球员在列表中的位置即决策变量下标,构建后不可变
// ==========================================

use crate::domain::player::{Player, PlayerId, PlayerStats};
use crate::domain::types::PlayerType;
use serde::{Deserialize, Serialize};

// ==========================================
// Pool - 选秀池
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pool {
    groups: [Vec<Player>; 3],
}

impl Pool {
    /// 创建构建器（按插入顺序分配 PlayerId）
    pub fn builder() -> PoolBuilder {
        PoolBuilder::default()
    }

    pub fn group(&self, player_type: PlayerType) -> &[Player] {
        &self.groups[player_type.index()]
    }

    pub fn len(&self, player_type: PlayerType) -> usize {
        self.groups[player_type.index()].len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.is_empty())
    }

    /// 按类别顺序遍历 (类别, 下标, 球员)
    pub fn iter(&self) -> impl Iterator<Item = (PlayerType, usize, &Player)> {
        PlayerType::ALL.into_iter().flat_map(move |t| {
            self.groups[t.index()]
                .iter()
                .enumerate()
                .map(move |(i, p)| (t, i, p))
        })
    }

    /// 同类别中第一个同名球员
    pub fn find_by_name(&self, player_type: PlayerType, name: &str) -> Option<(usize, &Player)> {
        self.group(player_type)
            .iter()
            .enumerate()
            .find(|(_, p)| p.name == name)
    }

    pub fn find_by_id(&self, player_type: PlayerType, id: PlayerId) -> Option<(usize, &Player)> {
        self.group(player_type)
            .iter()
            .enumerate()
            .find(|(_, p)| p.id == id)
    }

    /// 生成一份新选秀池: 顺序与 PlayerId 不变,统计按函数重算
    pub fn with_stats<F>(&self, mut stats_for: F) -> Pool
    where
        F: FnMut(PlayerType, &Player) -> PlayerStats,
    {
        let mut groups: [Vec<Player>; 3] = Default::default();
        for t in PlayerType::ALL {
            groups[t.index()] = self
                .group(t)
                .iter()
                .map(|p| Player {
                    stats: stats_for(t, p),
                    ..p.clone()
                })
                .collect();
        }
        Pool { groups }
    }

    /// 生成一份新选秀池: 评分按函数重算
    pub fn with_scores<F>(&self, mut score_for: F) -> Pool
    where
        F: FnMut(PlayerType, &Player) -> f64,
    {
        let mut groups: [Vec<Player>; 3] = Default::default();
        for t in PlayerType::ALL {
            groups[t.index()] = self
                .group(t)
                .iter()
                .map(|p| Player {
                    score: score_for(t, p),
                    ..p.clone()
                })
                .collect();
        }
        Pool { groups }
    }
}

// ==========================================
// PoolBuilder - 选秀池构建器
// ==========================================
#[derive(Debug, Default)]
pub struct PoolBuilder {
    groups: [Vec<Player>; 3],
    next_id: u32,
}

impl PoolBuilder {
    /// 追加一名球员,返回分配的 PlayerId
    pub fn push(
        &mut self,
        player_type: PlayerType,
        name: impl Into<String>,
        cost: u64,
        score: f64,
        stats: PlayerStats,
    ) -> PlayerId {
        let id = PlayerId(self.next_id);
        self.next_id += 1;
        self.groups[player_type.index()].push(Player::new(id, name, cost, score).with_stats(stats));
        id
    }

    /// 链式追加（统计为零）
    pub fn player(mut self, player_type: PlayerType, name: &str, cost: u64, score: f64) -> Self {
        self.push(player_type, name, cost, score, PlayerStats::default());
        self
    }

    pub fn build(self) -> Pool {
        Pool {
            groups: self.groups,
        }
    }
}
