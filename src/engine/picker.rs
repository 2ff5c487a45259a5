// ==========================================
// 冰球选秀池阵容决策系统 - 阵容挑选器
// ==========================================
// 职责: 初选、带交易额度的重选、方案到新选秀池的投影
// 红线: 每次调用独立构建模型,调用之间不共享任何可变状态
// 红线: 只有求解后端证明最优时才返回方案
// ==========================================

use crate::domain::player::Player;
use crate::domain::pool::Pool;
use crate::domain::solution::Solution;
use crate::domain::types::{PlayerType, RosterShape};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::roster_model::RosterModel;
use crate::engine::solver::{BranchAndBound, SearchLimits, SolveStatus};
use tracing::{info, instrument, warn};

// ==========================================
// Projection - 投影结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub solution: Solution,
    /// 目标选秀池中找不到同名球员的 (类别, 姓名)
    pub unmatched: Vec<(PlayerType, String)>,
}

impl Projection {
    pub fn is_complete(&self) -> bool {
        self.unmatched.is_empty()
    }
}

// ==========================================
// RosterPicker - 阵容挑选器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct RosterPicker {
    shape: RosterShape,
    solver: BranchAndBound,
}

impl RosterPicker {
    pub fn new(shape: RosterShape, limits: SearchLimits) -> Self {
        Self {
            shape,
            solver: BranchAndBound::new(limits),
        }
    }

    pub fn shape(&self) -> RosterShape {
        self.shape
    }

    /// 初选: 无保留约束,最大化评分合计
    #[instrument(skip(self, pool))]
    pub fn pick_initial(&self, pool: &Pool, budget: u64) -> EngineResult<Solution> {
        let model = RosterModel::build(pool, self.shape, budget)?;
        self.solve(pool, &model)
    }

    /// 重选: 在新选秀池上求解,上一方案入选下标中至多更换 trade_budget 个
    #[instrument(skip(self, prior, pool))]
    pub fn pick_with_retention(
        &self,
        prior: &Solution,
        pool: &Pool,
        budget: u64,
        trade_budget: usize,
    ) -> EngineResult<Solution> {
        let model = RosterModel::build(pool, self.shape, budget)?.with_retention(prior, trade_budget)?;
        self.solve(pool, &model)
    }

    fn solve(&self, pool: &Pool, model: &RosterModel) -> EngineResult<Solution> {
        let outcome = self.solver.solve(model);
        if outcome.status != SolveStatus::Optimal {
            warn!(status = %outcome.status, nodes = outcome.nodes, "未求得最优阵容");
            return Err(EngineError::NoOptimalSolution {
                status: outcome.status,
            });
        }
        let Some(assignment) = outcome.assignment else {
            return Err(EngineError::NoOptimalSolution {
                status: outcome.status,
            });
        };

        let mut picks: [Vec<Player>; 3] = Default::default();
        let mut indices: [Vec<usize>; 3] = Default::default();
        for t in PlayerType::ALL {
            let group = pool.group(t);
            for i in assignment.selected_indices(t) {
                picks[t.index()].push(group[i].clone());
                indices[t.index()].push(i);
            }
        }

        let solution = Solution::new(picks, indices);
        info!(
            weight = solution.total_weight(),
            value = solution.total_value(),
            nodes = outcome.nodes,
            "阵容求解完成"
        );
        Ok(solution)
    }

    /// 将方案投影到另一个选秀池（不求解）
    ///
    /// 每名入选球员映射到目标选秀池同类别中第一个同名球员;
    /// 找不到的球员不进入结果,而是列在 `unmatched` 中由调用方决定如何处理
    pub fn project_onto_pool(&self, solution: &Solution, target: &Pool) -> Projection {
        let mut picks: [Vec<Player>; 3] = Default::default();
        let mut indices: [Vec<usize>; 3] = Default::default();
        let mut unmatched = Vec::new();

        for t in PlayerType::ALL {
            for picked in solution.selected(t) {
                match target.find_by_name(t, &picked.name) {
                    Some((i, player)) => {
                        picks[t.index()].push(player.clone());
                        indices[t.index()].push(i);
                    }
                    None => unmatched.push((t, picked.name.clone())),
                }
            }
        }

        if !unmatched.is_empty() {
            warn!(count = unmatched.len(), "投影时部分球员在目标选秀池中不存在");
        }

        Projection {
            solution: Solution::new(picks, indices),
            unmatched,
        }
    }

    /// 严格投影: 任一球员未匹配即失败
    pub fn project_onto_pool_strict(&self, solution: &Solution, target: &Pool) -> EngineResult<Solution> {
        let projection = self.project_onto_pool(solution, target);
        if projection.is_complete() {
            Ok(projection.solution)
        } else {
            Err(EngineError::UnmatchedProjection {
                names: projection.unmatched.into_iter().map(|(_, name)| name).collect(),
            })
        }
    }
}
