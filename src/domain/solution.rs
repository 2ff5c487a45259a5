// ==========================================
// 冰球选秀池阵容决策系统 - 阵容方案
// ==========================================
// 职责: 一次成功求解的不可变结果
// 输出: 每类入选球员 + 工资帽占用合计 + 评分合计 + 入选下标
// 红线: 构建后不可变;入选下标用于下一次求解的保留约束
// ==========================================

use crate::domain::player::Player;
use crate::domain::types::PlayerType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

// ==========================================
// SolutionGroup - 单类别入选结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionGroup {
    pub player_type: PlayerType,
    pub players: Vec<Player>,
    /// 工资帽占用合计
    pub weight: u64,
    /// 评分合计
    pub value: f64,
}

impl SolutionGroup {
    fn build(player_type: PlayerType, players: Vec<Player>) -> Self {
        let weight = players.iter().map(|p| p.cost).sum();
        let value = players.iter().map(|p| p.score).sum();
        Self {
            player_type,
            players,
            weight,
            value,
        }
    }
}

// ==========================================
// Solution - 阵容方案
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    groups: [SolutionGroup; 3],
    pick_indices: [Vec<usize>; 3],
}

impl Solution {
    /// 由每类入选球员及其在选秀池中的下标构建方案
    ///
    /// `picks` 与 `pick_indices` 均按 PlayerType::ALL 顺序排列
    pub fn new(picks: [Vec<Player>; 3], pick_indices: [Vec<usize>; 3]) -> Self {
        let [forwards, defenders, goalies] = picks;
        Self {
            groups: [
                SolutionGroup::build(PlayerType::Forward, forwards),
                SolutionGroup::build(PlayerType::Defender, defenders),
                SolutionGroup::build(PlayerType::Goalie, goalies),
            ],
            pick_indices,
        }
    }

    pub fn group(&self, player_type: PlayerType) -> &SolutionGroup {
        &self.groups[player_type.index()]
    }

    pub fn groups(&self) -> &[SolutionGroup; 3] {
        &self.groups
    }

    /// 指定类别的入选球员
    pub fn selected(&self, player_type: PlayerType) -> &[Player] {
        &self.groups[player_type.index()].players
    }

    /// 三个类别的入选球员
    pub fn selected_entities(&self) -> [&[Player]; 3] {
        [
            self.selected(PlayerType::Forward),
            self.selected(PlayerType::Defender),
            self.selected(PlayerType::Goalie),
        ]
    }

    /// 指定类别的入选下标（相对于产生该方案的选秀池）
    pub fn pick_indices(&self, player_type: PlayerType) -> &[usize] {
        &self.pick_indices[player_type.index()]
    }

    pub fn selected_names(&self, player_type: PlayerType) -> Vec<&str> {
        self.selected(player_type)
            .iter()
            .map(|p| p.name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.players.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total_weight(&self) -> u64 {
        self.groups.iter().map(|g| g.weight).sum()
    }

    pub fn total_value(&self) -> f64 {
        self.groups.iter().map(|g| g.value).sum()
    }

    /// 与另一方案逐类别比较（按姓名）
    ///
    /// - removed: 在 self 中但不在 other 中
    /// - added: 在 other 中但不在 self 中
    pub fn diff(&self, other: &Solution) -> SolutionDiff {
        let categories = PlayerType::ALL.map(|t| {
            let before = self.selected(t);
            let after = other.selected(t);
            let before_names: HashSet<&str> = before.iter().map(|p| p.name.as_str()).collect();
            let after_names: HashSet<&str> = after.iter().map(|p| p.name.as_str()).collect();

            CategoryDiff {
                player_type: t,
                removed: before
                    .iter()
                    .filter(|p| !after_names.contains(p.name.as_str()))
                    .cloned()
                    .collect(),
                added: after
                    .iter()
                    .filter(|p| !before_names.contains(p.name.as_str()))
                    .cloned()
                    .collect(),
            }
        });
        SolutionDiff { categories }
    }

    /// 汇总表: 每类一行 + total 行
    pub fn summary_table(&self) -> Vec<SummaryRow> {
        let mut rows: Vec<SummaryRow> = self
            .groups
            .iter()
            .map(|g| SummaryRow {
                name: g.player_type.group_name().to_string(),
                weight: g.weight,
                value: g.value,
            })
            .collect();
        rows.push(SummaryRow {
            name: "total".to_string(),
            weight: self.total_weight(),
            value: self.total_value(),
        });
        rows
    }
}

// ==========================================
// SummaryRow - 汇总表行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub name: String,
    pub weight: u64,
    pub value: f64,
}

/// 渲染汇总表（纯文本）
pub fn render_summary(rows: &[SummaryRow]) -> String {
    let mut out = format!("{:<10} {:>12} {:>10}\n", "name", "weight", "value");
    for row in rows {
        out.push_str(&format!(
            "{:<10} {:>12} {:>10.2}\n",
            row.name, row.weight, row.value
        ));
    }
    out
}

// ==========================================
// SolutionDiff - 方案差异
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDiff {
    pub player_type: PlayerType,
    pub removed: Vec<Player>,
    pub added: Vec<Player>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionDiff {
    categories: [CategoryDiff; 3],
}

impl SolutionDiff {
    pub fn category(&self, player_type: PlayerType) -> &CategoryDiff {
        &self.categories[player_type.index()]
    }

    pub fn categories(&self) -> &[CategoryDiff; 3] {
        &self.categories
    }

    /// 变动人数（移出人数,与移入人数在阵容满员时相等）
    pub fn changes(&self) -> usize {
        self.categories.iter().map(|c| c.removed.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories
            .iter()
            .all(|c| c.removed.is_empty() && c.added.is_empty())
    }
}

impl fmt::Display for SolutionDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for player in self.categories.iter().flat_map(|c| c.removed.iter()) {
            writeln!(f, "- {} {} {}", player.name, player.cost, player.score)?;
        }
        for player in self.categories.iter().flat_map(|c| c.added.iter()) {
            writeln!(f, "+ {} {} {}", player.name, player.cost, player.score)?;
        }
        Ok(())
    }
}
