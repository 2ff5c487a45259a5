// ==========================================
// 冰球选秀池阵容决策系统 - 阵容模型
// ==========================================
// 职责: 为给定选秀池构建决策变量与约束（只建模,不求解）
// 输入: 选秀池 + 阵容形状 + 工资帽 (+ 上一方案与交易额度)
// 输出: RosterModel（每次求解独立构建,用后即弃）
// ==========================================
// 约束:
// 1) 每个 (类别, 下标) 一个 0/1 变量
// 2) 每个类别: 入选人数 == 必选人数（不是 <=）
// 3) 全局: 入选球员工资帽占用合计 <= 工资帽
// 4) 可选保留约束: 上一方案入选位置中至少保留 (阵容总人数 - 交易额度) 个
// ==========================================

use crate::domain::pool::Pool;
use crate::domain::solution::Solution;
use crate::domain::types::{PlayerType, RosterShape};
use crate::engine::error::{EngineError, EngineResult};
use tracing::debug;

// ==========================================
// Variable - 决策变量
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub player_type: PlayerType,
    pub index: usize,
    /// 预算约束系数
    pub cost: u64,
    /// 目标函数系数
    pub score: f64,
}

// ==========================================
// RetentionConstraint - 保留约束
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RetentionConstraint {
    /// 上一方案入选位置（按类别）
    kept: [Vec<bool>; 3],
    /// 至少保留的人数
    pub minimum: usize,
}

impl RetentionConstraint {
    pub fn is_kept(&self, player_type: PlayerType, index: usize) -> bool {
        self.kept[player_type.index()]
            .get(index)
            .copied()
            .unwrap_or(false)
    }

    /// 可被保留的位置总数
    pub fn kept_count(&self) -> usize {
        self.kept
            .iter()
            .map(|k| k.iter().filter(|b| **b).count())
            .sum()
    }
}

// ==========================================
// Assignment - 0/1 赋值
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    selected: [Vec<bool>; 3],
}

impl Assignment {
    /// 由每类入选下标构建赋值
    pub fn from_indices(model: &RosterModel, indices: [Vec<usize>; 3]) -> Self {
        let mut selected: [Vec<bool>; 3] = Default::default();
        for t in PlayerType::ALL {
            let mut flags = vec![false; model.category(t).len()];
            for &i in &indices[t.index()] {
                if let Some(flag) = flags.get_mut(i) {
                    *flag = true;
                }
            }
            selected[t.index()] = flags;
        }
        Self { selected }
    }

    pub fn is_selected(&self, player_type: PlayerType, index: usize) -> bool {
        self.selected[player_type.index()]
            .get(index)
            .copied()
            .unwrap_or(false)
    }

    /// 指定类别的入选下标（升序,即选秀池原始顺序）
    pub fn selected_indices(&self, player_type: PlayerType) -> Vec<usize> {
        self.selected[player_type.index()]
            .iter()
            .enumerate()
            .filter(|(_, s)| **s)
            .map(|(i, _)| i)
            .collect()
    }
}

// ==========================================
// RosterModel - 阵容模型
// ==========================================
#[derive(Debug, Clone)]
pub struct RosterModel {
    shape: RosterShape,
    budget: u64,
    variables: [Vec<Variable>; 3],
    retention: Option<RetentionConstraint>,
}

impl RosterModel {
    /// 构建基础模型（人数等式 + 工资帽不等式）
    ///
    /// # 错误
    /// - `InvalidPool`: 某类别候选人数少于必选人数
    /// - `InvalidScore`: 评分为 NaN / 无穷
    pub fn build(pool: &Pool, shape: RosterShape, budget: u64) -> EngineResult<Self> {
        let mut variables: [Vec<Variable>; 3] = Default::default();

        for t in PlayerType::ALL {
            let group = pool.group(t);
            let required = shape.count(t);
            if group.len() < required {
                return Err(EngineError::InvalidPool {
                    player_type: t,
                    available: group.len(),
                    required,
                });
            }

            let mut vars = Vec::with_capacity(group.len());
            for (index, player) in group.iter().enumerate() {
                if !player.score.is_finite() {
                    return Err(EngineError::InvalidScore {
                        player_type: t,
                        name: player.name.clone(),
                        score: player.score,
                    });
                }
                vars.push(Variable {
                    player_type: t,
                    index,
                    cost: player.cost,
                    score: player.score,
                });
            }
            variables[t.index()] = vars;
        }

        debug!(
            forwards = variables[0].len(),
            defenders = variables[1].len(),
            goalies = variables[2].len(),
            budget = budget,
            "阵容模型构建完成"
        );

        Ok(Self {
            shape,
            budget,
            variables,
            retention: None,
        })
    }

    /// 追加保留约束: 上一方案入选下标中至少保留 (总人数 - trade_budget) 个
    ///
    /// 下标按本模型的选秀池解释,调用方需保证新旧选秀池下标对应
    pub fn with_retention(mut self, prior: &Solution, trade_budget: usize) -> EngineResult<Self> {
        let mut kept: [Vec<bool>; 3] = Default::default();
        for t in PlayerType::ALL {
            let len = self.variables[t.index()].len();
            let mut flags = vec![false; len];
            for &index in prior.pick_indices(t) {
                match flags.get_mut(index) {
                    Some(flag) => *flag = true,
                    None => {
                        return Err(EngineError::RetentionIndexOutOfRange {
                            player_type: t,
                            index,
                            len,
                        })
                    }
                }
            }
            kept[t.index()] = flags;
        }

        let minimum = self.shape.total().saturating_sub(trade_budget);
        debug!(minimum = minimum, trade_budget = trade_budget, "追加保留约束");

        self.retention = Some(RetentionConstraint { kept, minimum });
        Ok(self)
    }

    pub fn shape(&self) -> RosterShape {
        self.shape
    }

    pub fn budget(&self) -> u64 {
        self.budget
    }

    pub fn category(&self, player_type: PlayerType) -> &[Variable] {
        &self.variables[player_type.index()]
    }

    pub fn retention(&self) -> Option<&RetentionConstraint> {
        self.retention.as_ref()
    }

    pub fn variable_count(&self) -> usize {
        self.variables.iter().map(|v| v.len()).sum()
    }

    /// 目标函数值: 入选球员评分合计
    pub fn objective(&self, assignment: &Assignment) -> f64 {
        PlayerType::ALL
            .iter()
            .flat_map(|&t| {
                self.category(t)
                    .iter()
                    .filter(move |v| assignment.is_selected(t, v.index))
            })
            .map(|v| v.score)
            .sum()
    }

    /// 检查赋值是否满足全部约束
    pub fn is_feasible(&self, assignment: &Assignment) -> bool {
        let mut cost: u64 = 0;
        let mut retained = 0usize;

        for t in PlayerType::ALL {
            let picked = assignment.selected_indices(t);
            if picked.len() != self.shape.count(t) {
                return false;
            }
            for i in picked {
                let Some(var) = self.category(t).get(i) else {
                    return false;
                };
                cost = cost.saturating_add(var.cost);
                if self.retention.as_ref().is_some_and(|r| r.is_kept(t, i)) {
                    retained += 1;
                }
            }
        }

        let retention_ok = self
            .retention
            .as_ref()
            .map_or(true, |r| retained >= r.minimum);
        cost <= self.budget && retention_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::player::Player;

    fn small_pool() -> Pool {
        Pool::builder()
            .player(PlayerType::Forward, "f1", 10, 5.0)
            .player(PlayerType::Forward, "f2", 20, 6.0)
            .player(PlayerType::Defender, "d1", 10, 1.0)
            .player(PlayerType::Goalie, "g1", 10, 2.0)
            .build()
    }

    #[test]
    fn test_build_rejects_short_category() {
        let err = RosterModel::build(&small_pool(), RosterShape::new(1, 2, 1), 100).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidPool {
                player_type: PlayerType::Defender,
                available: 1,
                required: 2
            }
        );
    }

    #[test]
    fn test_build_rejects_nan_score() {
        let pool = Pool::builder()
            .player(PlayerType::Forward, "f1", 10, f64::NAN)
            .build();
        let err = RosterModel::build(&pool, RosterShape::new(1, 0, 0), 100).unwrap_err();
        assert!(matches!(err, EngineError::InvalidScore { .. }));
    }

    #[test]
    fn test_feasibility_checks_counts_and_budget() {
        let model = RosterModel::build(&small_pool(), RosterShape::new(1, 1, 1), 40).unwrap();
        assert_eq!(model.variable_count(), 4);

        let ok = Assignment::from_indices(&model, [vec![1], vec![0], vec![0]]);
        assert!(model.is_feasible(&ok));
        assert_eq!(model.objective(&ok), 9.0);

        let too_many = Assignment::from_indices(&model, [vec![0, 1], vec![0], vec![0]]);
        assert!(!model.is_feasible(&too_many));

        let tight = RosterModel::build(&small_pool(), RosterShape::new(1, 1, 1), 39).unwrap();
        assert!(!tight.is_feasible(&ok));
    }

    #[test]
    fn test_retention_minimum_and_index_check() {
        let prior = Solution::new(
            [
                vec![Player::new(crate::domain::PlayerId(0), "f1", 10, 5.0)],
                Vec::new(),
                Vec::new(),
            ],
            [vec![0], Vec::new(), Vec::new()],
        );
        let model = RosterModel::build(&small_pool(), RosterShape::new(1, 1, 1), 100)
            .unwrap()
            .with_retention(&prior, 1)
            .unwrap();
        let retention = model.retention().unwrap();
        assert_eq!(retention.minimum, 2);
        assert!(retention.is_kept(PlayerType::Forward, 0));
        assert_eq!(retention.kept_count(), 1);

        let far = Solution::new(
            [Vec::new(), Vec::new(), Vec::new()],
            [vec![7], Vec::new(), Vec::new()],
        );
        let err = RosterModel::build(&small_pool(), RosterShape::new(1, 1, 1), 100)
            .unwrap()
            .with_retention(&far, 0)
            .unwrap_err();
        assert!(matches!(err, EngineError::RetentionIndexOutOfRange { index: 7, .. }));
    }
}
