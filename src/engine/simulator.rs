// ==========================================
// 冰球选秀池阵容决策系统 - 赛段模拟器
// ==========================================
// 职责: 按月推进赛季,逐赛段评估持有阵容并在交易额度内重选
// 流程（每个赛段）:
// 1) 比赛记录分别按回看窗口、计分窗口过滤并聚合为赛段统计
// 2) 回看池用挑选策略打分,计分池用评估策略打分
// 3) 按 PlayerId 在计分池中取出当前阵容球员,累计实得分
// 4) 最后一个赛段: 停止,不再重选
// 5) 其他赛段: 在回看池上带保留约束重选,记录阵容变化
// 红线: 赛段严格顺序执行,每次重选依赖上一赛段的阵容
// ==========================================

use crate::domain::game::GameRecord;
use crate::domain::pool::Pool;
use crate::domain::season::{DateWindow, Period, Season, DEFAULT_LOOK_BACK_DAYS};
use crate::domain::solution::{Solution, SolutionDiff};
use crate::domain::types::PlayerType;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::period_stats::restat_pool;
use crate::engine::picker::RosterPicker;
use crate::engine::strategy::ValueStrategy;
use tracing::{debug, info};

/// 默认交易额度（每次重选最多更换的人数）
pub const DEFAULT_TRADE_BUDGET: usize = 5;

// ==========================================
// PeriodReport - 单赛段报告
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodReport {
    pub period: Period,
    pub look_back: DateWindow,
    pub scoring: DateWindow,
    /// 持有阵容在计分窗口内的实得分
    pub value: f64,
    /// 本赛段结束时的阵容变化（最后一个赛段为 None）
    pub diff: Option<SolutionDiff>,
}

// ==========================================
// SimulationOutcome - 模拟结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub solution: Solution,
    pub total_value: f64,
    pub periods: Vec<PeriodReport>,
}

// ==========================================
// PeriodSimulator - 赛段模拟器
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct PeriodSimulator {
    picker: RosterPicker,
    budget: u64,
    trade_budget: usize,
    look_back_days: i64,
    picking: ValueStrategy,
    evaluation: ValueStrategy,
}

impl PeriodSimulator {
    pub fn new(picker: RosterPicker, budget: u64) -> Self {
        Self {
            picker,
            budget,
            trade_budget: DEFAULT_TRADE_BUDGET,
            look_back_days: DEFAULT_LOOK_BACK_DAYS,
            picking: ValueStrategy::default(),
            evaluation: ValueStrategy::default(),
        }
    }

    pub fn with_trade_budget(mut self, trade_budget: usize) -> Self {
        self.trade_budget = trade_budget;
        self
    }

    pub fn with_look_back_days(mut self, days: i64) -> Self {
        self.look_back_days = days;
        self
    }

    pub fn with_strategies(mut self, picking: ValueStrategy, evaluation: ValueStrategy) -> Self {
        self.picking = picking;
        self.evaluation = evaluation;
        self
    }

    pub fn trade_budget(&self) -> usize {
        self.trade_budget
    }

    /// 按赛季常规赛月份运行
    pub fn run_season(
        &self,
        initial: &Solution,
        pool: &Pool,
        games: &[GameRecord],
        season: Season,
    ) -> EngineResult<SimulationOutcome> {
        self.run(initial, pool, games, &season.regular_season_periods())
    }

    /// 依次模拟给定赛段
    ///
    /// `initial` 先按姓名严格投影到 `pool`,之后各赛段的下标与 PlayerId 都以 `pool` 为准
    pub fn run(
        &self,
        initial: &Solution,
        pool: &Pool,
        games: &[GameRecord],
        periods: &[Period],
    ) -> EngineResult<SimulationOutcome> {
        if self.look_back_days < 1 {
            return Err(EngineError::InvalidConfig(format!(
                "回看天数必须 >= 1,实际 {}",
                self.look_back_days
            )));
        }
        let mut current = self.picker.project_onto_pool_strict(initial, pool)?;
        let mut total_value = 0.0;
        let mut reports = Vec::with_capacity(periods.len());

        for (i, period) in periods.iter().enumerate() {
            let look_back = period.look_back_window(self.look_back_days);
            let scoring = period.scoring_window();

            let look_pool = self.picking.rescore(&restat_pool(pool, games, look_back));
            let scoring_pool = self.evaluation.rescore(&restat_pool(pool, games, scoring));

            let value = realized_value(&current, &scoring_pool);
            total_value += value;
            info!(
                period = %period,
                look_back = %look_back,
                value = value,
                total_value = total_value,
                "赛段评估完成"
            );

            if i + 1 == periods.len() {
                reports.push(PeriodReport {
                    period: *period,
                    look_back,
                    scoring,
                    value,
                    diff: None,
                });
                break;
            }

            let next = self
                .picker
                .pick_with_retention(&current, &look_pool, self.budget, self.trade_budget)?;
            let diff = current.diff(&next);
            debug!(period = %period, changes = diff.changes(), "赛段重选完成");

            reports.push(PeriodReport {
                period: *period,
                look_back,
                scoring,
                value,
                diff: Some(diff),
            });
            current = next;
        }

        Ok(SimulationOutcome {
            solution: current,
            total_value,
            periods: reports,
        })
    }
}

/// 持有阵容在计分池中的评分合计（按 PlayerId 匹配）
pub fn realized_value(solution: &Solution, scoring_pool: &Pool) -> f64 {
    PlayerType::ALL
        .iter()
        .flat_map(|&t| {
            solution
                .selected(t)
                .iter()
                .filter_map(move |p| scoring_pool.find_by_id(t, p.id))
        })
        .map(|(_, p)| p.score)
        .sum()
}
