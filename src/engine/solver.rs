// ==========================================
// 冰球选秀池阵容决策系统 - 求解后端
// ==========================================
// 职责: 对 RosterModel 做精确分支定界,最大化入选评分合计
// 输入: RosterModel + 搜索上限
// 输出: SolveOutcome（仅 Optimal 状态携带赋值）
// ==========================================
// 定界: 对工资帽约束做拉格朗日松弛,
//       人数等式 + 保留约束在每个节点上精确求解（按类别取前 k + 小型 DP）
//       乘子由两条对偶切线的交点迭代得到,子节点从父节点乘子出发
// 剪枝: 评分全为整数时,界不足 当前最优 + 1 即剪枝
// 固定: 根节点按对偶界把翻转后无法更优的变量固定
// 改进: 新的当前最优经单人交换局部改进后再入库
// 分支: 取工资帽超限一侧与可行一侧松弛解的差集中的第一个变量
// 平局: 候选按 (评分降序, 工资升序, 下标升序) 排列,
//       先到达的方案保留,之后的方案须严格更优（超出容差）才替换
// ==========================================

use crate::domain::types::PlayerType;
use crate::engine::roster_model::{Assignment, RosterModel};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// 最优性相对容差
pub const OPTIMALITY_TOLERANCE: f64 = 1e-7;

/// 每个节点上切线交点迭代次数上限
const MULTIPLIER_STEPS: usize = 64;

/// 乘子倍增次数上限
const MAX_DOUBLINGS: usize = 200;

/// 局部交换改进轮数上限
const MAX_POLISH_ROUNDS: usize = 256;

/// 整数评分剪枝的浮点余量
const INTEGRAL_SLACK: f64 = 1e-6;

/// 评分绝对值合计在此之下才按整数评分剪枝
const INTEGRAL_MAGNITUDE: f64 = 1e9;

/// 每隔多少个节点检查一次时间上限
const TIME_CHECK_INTERVAL: u64 = 64;

// ==========================================
// SolveStatus - 求解状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    Optimal,    // 已证明最优
    Infeasible, // 无可行阵容
    NodeLimit,  // 节点数达到上限
    TimeLimit,  // 搜索超时
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "OPTIMAL"),
            SolveStatus::Infeasible => write!(f, "INFEASIBLE"),
            SolveStatus::NodeLimit => write!(f, "NODE_LIMIT"),
            SolveStatus::TimeLimit => write!(f, "TIME_LIMIT"),
        }
    }
}

// ==========================================
// SearchLimits - 搜索上限
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_nodes: u64,
    pub time_limit: Option<Duration>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_nodes: 5_000_000,
            time_limit: Some(Duration::from_secs(120)),
        }
    }
}

// ==========================================
// SolveOutcome - 求解输出
// ==========================================
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    /// 仅 status == Optimal 时为 Some
    pub assignment: Option<Assignment>,
    pub objective: f64,
    pub nodes: u64,
    pub elapsed: Duration,
}

// ==========================================
// BranchAndBound - 分支定界后端
// ==========================================
// 无状态: 每次 solve 在内部新建搜索状态
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchAndBound {
    limits: SearchLimits,
}

impl BranchAndBound {
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// 求解模型
    pub fn solve(&self, model: &RosterModel) -> SolveOutcome {
        let started = Instant::now();
        let mut search = Search::new(model);
        let mut stack = vec![Node {
            fixes: vec![Fix::Free; search.items.len()],
            multiplier: 0.0,
        }];
        let mut nodes: u64 = 0;
        let mut root_reduced = false;

        while let Some(node) = stack.pop() {
            if nodes >= self.limits.max_nodes {
                warn!(nodes = nodes, "分支定界节点数达到上限");
                return search.unfinished(SolveStatus::NodeLimit, nodes, started.elapsed());
            }
            if nodes % TIME_CHECK_INTERVAL == 0 {
                if let Some(limit) = self.limits.time_limit {
                    if started.elapsed() >= limit {
                        warn!(nodes = nodes, limit_ms = limit.as_millis() as u64, "分支定界超时");
                        return search.unfinished(SolveStatus::TimeLimit, nodes, started.elapsed());
                    }
                }
            }
            nodes += 1;

            let Some(branch) = search.process(&node) else {
                continue;
            };
            let mut fixes = node.fixes;

            if !root_reduced {
                root_reduced = true;
                let fixed = search.fix_by_bound(&mut fixes, branch.multiplier);
                debug!(
                    fixed = fixed,
                    free = fixes.iter().filter(|f| **f == Fix::Free).count(),
                    "根节点按对偶界固定变量"
                );
                if fixed > 0 {
                    stack.push(Node {
                        fixes,
                        multiplier: branch.multiplier,
                    });
                    continue;
                }
            }

            // 后压入的先弹出: 先探索“选入”分支
            let mut exclude = fixes.clone();
            exclude[branch.item] = Fix::Out;
            fixes[branch.item] = Fix::In;
            stack.push(Node {
                fixes: exclude,
                multiplier: branch.multiplier,
            });
            stack.push(Node {
                fixes,
                multiplier: branch.multiplier,
            });
        }

        let elapsed = started.elapsed();
        match search.incumbent.take() {
            Some(best) => {
                let assignment = search.to_assignment(model, &best);
                info!(
                    nodes = nodes,
                    objective = best.score,
                    weight = best.cost,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "分支定界求得最优阵容"
                );
                SolveOutcome {
                    status: SolveStatus::Optimal,
                    assignment: Some(assignment),
                    objective: best.score,
                    nodes,
                    elapsed,
                }
            }
            None => {
                info!(nodes = nodes, "模型不可行");
                SolveOutcome {
                    status: SolveStatus::Infeasible,
                    assignment: None,
                    objective: 0.0,
                    nodes,
                    elapsed,
                }
            }
        }
    }
}

// ==========================================
// 搜索内部结构
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fix {
    Free,
    In,
    Out,
}

/// 待处理节点: 变量固定 + 父节点给出的乘子起点
struct Node {
    fixes: Vec<Fix>,
    multiplier: f64,
}

/// 节点处理结果: 分支变量 + 对偶界最好的乘子
struct Branch {
    item: usize,
    multiplier: f64,
}

#[derive(Debug, Clone)]
struct Item {
    category: usize,
    index: usize,
    cost: u64,
    score: f64,
    kept: bool,
}

/// 一次松弛的最优选择
#[derive(Debug, Clone)]
struct Selection {
    items: Vec<usize>,
    key_total: f64,
    cost: u64,
    score: f64,
}

/// 单类别在某个节点上的候选划分
struct CategoryPlan {
    forced: Vec<usize>,
    kept_free: Vec<usize>,
    other_free: Vec<usize>,
    need: usize,
}

struct Search {
    items: Vec<Item>,
    /// 每类候选按 (评分降序, 工资升序, 下标升序) 排列的 item 编号
    ranked: [Vec<usize>; 3],
    required: [usize; 3],
    minimum_kept: usize,
    budget: u64,
    initial_multiplier: f64,
    /// 全部评分为整数
    integral: bool,
    incumbent: Option<Selection>,
}

impl Search {
    fn new(model: &RosterModel) -> Self {
        let mut items = Vec::with_capacity(model.variable_count());
        let mut ranked: [Vec<usize>; 3] = Default::default();
        let mut required = [0usize; 3];

        for t in PlayerType::ALL {
            let c = t.index();
            required[c] = model.shape().count(t);
            for var in model.category(t) {
                ranked[c].push(items.len());
                items.push(Item {
                    category: c,
                    index: var.index,
                    cost: var.cost,
                    score: var.score,
                    kept: model.retention().is_some_and(|r| r.is_kept(t, var.index)),
                });
            }
            ranked[c].sort_by(|&a, &b| {
                let (x, y) = (&items[a], &items[b]);
                y.score
                    .partial_cmp(&x.score)
                    .unwrap_or(Ordering::Equal)
                    .then(x.cost.cmp(&y.cost))
                    .then(x.index.cmp(&y.index))
            });
        }

        let max_score = items.iter().map(|i| i.score.abs()).fold(0.0, f64::max);
        let max_cost = items.iter().map(|i| i.cost).max().unwrap_or(0);
        let initial_multiplier = (max_score + 1.0) / (max_cost as f64 + 1.0);
        let integral = items.iter().all(|i| i.score.fract() == 0.0)
            && items.iter().map(|i| i.score.abs()).sum::<f64>() < INTEGRAL_MAGNITUDE;

        Self {
            items,
            ranked,
            required,
            minimum_kept: model.retention().map_or(0, |r| r.minimum),
            budget: model.budget(),
            initial_multiplier,
            integral,
            incumbent: None,
        }
    }

    /// 处理一个节点,返回分支信息（None 表示节点已关闭）
    fn process(&mut self, node: &Node) -> Option<Branch> {
        let fixes = node.fixes.as_slice();
        let budget = self.budget as f64;

        // 1) 精确可行性: 最小工资帽占用的选择
        let cheapest = self.relax(fixes, |it| -(it.cost as f64))?;
        if cheapest.cost > self.budget {
            return None;
        }
        self.offer(&cheapest);

        // 2) 乘子为 0: 若松弛解满足工资帽,即为该节点最优
        let unconstrained = self.relax(fixes, |it| it.score)?;
        if unconstrained.cost <= self.budget {
            self.offer(&unconstrained);
            return None;
        }
        let mut bound = unconstrained.key_total;
        if self.prunable(bound) {
            return None;
        }

        // 3) 从父节点乘子出发倍增,直到松弛解满足工资帽
        let mut lo = 0.0_f64;
        let mut lo_sel = unconstrained;
        let mut feasible_side: Option<(f64, Selection)> = None;
        let mut candidate = if node.multiplier > 0.0 {
            node.multiplier
        } else {
            self.initial_multiplier
        };
        for _ in 0..MAX_DOUBLINGS {
            let sel = self.relax(fixes, |it| it.score - candidate * it.cost as f64)?;
            bound = bound.min(sel.key_total + candidate * budget);
            if sel.cost <= self.budget {
                self.offer(&sel);
                feasible_side = Some((candidate, sel));
                break;
            }
            if self.prunable(bound) {
                return None;
            }
            lo = candidate;
            lo_sel = sel;
            candidate *= 2.0;
        }
        if self.prunable(bound) {
            return None;
        }
        let Some((mut hi, mut hi_sel)) = feasible_side else {
            // 回退: 超限一侧中第一个未固定的变量
            return lo_sel
                .items
                .iter()
                .copied()
                .find(|&id| fixes[id] == Fix::Free)
                .map(|item| Branch {
                    item,
                    multiplier: lo,
                });
        };

        // 4) 两侧选择各对应对偶函数的一条切线,在交点处重新松弛
        //    交点处的松弛值等于切线值时,对偶界已取到最小
        let mut multiplier = hi;
        for _ in 0..MULTIPLIER_STEPS {
            let mid = (lo_sel.score - hi_sel.score) / (lo_sel.cost - hi_sel.cost) as f64;
            if !(mid > lo && mid < hi) {
                break;
            }
            let sel = self.relax(fixes, |it| it.score - mid * it.cost as f64)?;
            let value = sel.key_total + mid * budget;
            let crossing = lo_sel.score - mid * lo_sel.cost as f64 + mid * budget;
            if value < bound {
                bound = value;
                multiplier = mid;
            }
            let feasible = sel.cost <= self.budget;
            if feasible {
                self.offer(&sel);
            }
            if self.prunable(bound) {
                return None;
            }
            if value <= crossing + tolerance(crossing) {
                break;
            }
            if feasible {
                hi = mid;
                hi_sel = sel;
            } else {
                lo = mid;
                lo_sel = sel;
            }
        }

        // 差集非空: 超限一侧与可行一侧的选择不可能相同,且固定变量同时出现或同时缺席
        let item = lo_sel
            .items
            .iter()
            .copied()
            .find(|id| !hi_sel.items.contains(id))
            .or_else(|| lo_sel.items.iter().copied().find(|&id| fixes[id] == Fix::Free))?;
        Some(Branch { item, multiplier })
    }

    /// 根节点变量固定: 翻转后对偶界已无法严格优于当前最优的变量,固定在松弛解一侧
    ///
    /// 返回新固定的变量个数
    fn fix_by_bound(&self, fixes: &mut [Fix], multiplier: f64) -> usize {
        if self.incumbent.is_none() {
            return 0;
        }
        let key = |it: &Item| it.score - multiplier * it.cost as f64;
        let shift = multiplier * self.budget as f64;
        let Some(sel) = self.relax(fixes, key) else {
            return 0;
        };
        let mut chosen = vec![false; self.items.len()];
        for &id in &sel.items {
            chosen[id] = true;
        }

        let mut fixed = 0;
        for id in 0..self.items.len() {
            if fixes[id] != Fix::Free {
                continue;
            }
            let (trial, keep) = if chosen[id] {
                (Fix::Out, Fix::In)
            } else {
                (Fix::In, Fix::Out)
            };
            fixes[id] = trial;
            let closed = self
                .relax(fixes, key)
                .map_or(true, |s| self.prunable(s.key_total + shift));
            fixes[id] = if closed {
                fixed += 1;
                keep
            } else {
                Fix::Free
            };
        }
        fixed
    }

    /// 在当前固定下,按 key 最大化选择（人数等式 + 保留约束精确满足）
    fn relax<K>(&self, fixes: &[Fix], key: K) -> Option<Selection>
    where
        K: Fn(&Item) -> f64,
    {
        let cap = self.minimum_kept;
        let mut dp: Vec<Option<f64>> = vec![None; cap + 1];
        dp[0] = Some(0.0);
        let mut plans: Vec<CategoryPlan> = Vec::with_capacity(3);
        let mut parents: Vec<Vec<Option<(usize, usize)>>> = Vec::with_capacity(3);

        for c in 0..3 {
            let mut forced = Vec::new();
            let mut kept_free: Vec<(usize, f64)> = Vec::new();
            let mut other_free: Vec<(usize, f64)> = Vec::new();
            for &id in &self.ranked[c] {
                let item = &self.items[id];
                match fixes[id] {
                    Fix::In => forced.push(id),
                    Fix::Out => {}
                    Fix::Free if item.kept => kept_free.push((id, key(item))),
                    Fix::Free => other_free.push((id, key(item))),
                }
            }

            let required = self.required[c];
            if forced.len() > required {
                return None;
            }
            let need = required - forced.len();

            // 稳定排序: 同 key 时保持候选排名顺序
            let by_key_desc = |a: &(usize, f64), b: &(usize, f64)| {
                b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal)
            };
            kept_free.sort_by(by_key_desc);
            other_free.sort_by(by_key_desc);

            let forced_kept = forced.iter().filter(|&&id| self.items[id].kept).count();
            let forced_key: f64 = forced.iter().map(|&id| key(&self.items[id])).sum();
            let kept_prefix = prefix_sums(&kept_free);
            let other_prefix = prefix_sums(&other_free);

            let r_max = need.min(kept_free.len());
            let r_min = need.saturating_sub(other_free.len());
            if r_min > r_max {
                return None;
            }

            let mut next: Vec<Option<f64>> = vec![None; cap + 1];
            let mut parent: Vec<Option<(usize, usize)>> = vec![None; cap + 1];
            for (t, base) in dp.iter().enumerate() {
                let Some(base) = *base else { continue };
                for r in r_min..=r_max {
                    let value = base + forced_key + kept_prefix[r] + other_prefix[need - r];
                    let slot = (t + forced_kept + r).min(cap);
                    if next[slot].map_or(true, |v| value > v) {
                        next[slot] = Some(value);
                        parent[slot] = Some((t, r));
                    }
                }
            }
            dp = next;
            parents.push(parent);
            plans.push(CategoryPlan {
                forced,
                kept_free: kept_free.into_iter().map(|(id, _)| id).collect(),
                other_free: other_free.into_iter().map(|(id, _)| id).collect(),
                need,
            });
        }

        let key_total = dp[cap]?;

        let mut items = Vec::new();
        let mut slot = cap;
        for c in (0..3).rev() {
            let (prev, r) = parents[c][slot]?;
            let plan = &plans[c];
            items.extend_from_slice(&plan.forced);
            items.extend_from_slice(&plan.kept_free[..r]);
            items.extend_from_slice(&plan.other_free[..plan.need - r]);
            slot = prev;
        }

        let cost = items.iter().map(|&id| self.items[id].cost).sum();
        let score = items.iter().map(|&id| self.items[id].score).sum();
        Some(Selection {
            items,
            key_total,
            cost,
            score,
        })
    }

    /// 提交一个可行选择,严格更优时经局部改进后替换当前最优
    fn offer(&mut self, sel: &Selection) {
        if sel.cost > self.budget {
            return;
        }
        let better = match &self.incumbent {
            None => true,
            Some(best) => sel.score > best.score + tolerance(best.score),
        };
        if better {
            let polished = self.polish(sel);
            debug!(score = polished.score, weight = polished.cost, "更新当前最优阵容");
            self.incumbent = Some(polished);
        }
    }

    /// 同类别单人交换爬山: 每轮取评分增量最大且满足工资帽、保留下限的交换
    fn polish(&self, start: &Selection) -> Selection {
        let mut chosen = vec![false; self.items.len()];
        for &id in &start.items {
            chosen[id] = true;
        }
        let mut cost = start.cost;
        let mut score = start.score;
        let mut kept = start.items.iter().filter(|&&id| self.items[id].kept).count();

        for _ in 0..MAX_POLISH_ROUNDS {
            let mut best_swap: Option<(usize, usize, f64)> = None;
            for ranked in &self.ranked {
                for &out in ranked.iter().filter(|&&id| chosen[id]) {
                    let leaving = &self.items[out];
                    // ranked 按评分降序,增量不再超过门槛即可停止
                    for &inn in ranked.iter().filter(|&&id| !chosen[id]) {
                        let entering = &self.items[inn];
                        let gain = entering.score - leaving.score;
                        let threshold = best_swap.map_or(tolerance(score), |(_, _, g)| g);
                        if gain <= threshold {
                            break;
                        }
                        if cost - leaving.cost + entering.cost > self.budget {
                            continue;
                        }
                        if kept + usize::from(entering.kept) < self.minimum_kept + usize::from(leaving.kept) {
                            continue;
                        }
                        best_swap = Some((out, inn, gain));
                    }
                }
            }
            let Some((out, inn, gain)) = best_swap else {
                break;
            };
            chosen[out] = false;
            chosen[inn] = true;
            cost = cost - self.items[out].cost + self.items[inn].cost;
            kept = kept + usize::from(self.items[inn].kept) - usize::from(self.items[out].kept);
            score += gain;
        }

        let items: Vec<usize> = (0..self.items.len()).filter(|&id| chosen[id]).collect();
        let score = items.iter().map(|&id| self.items[id].score).sum();
        Selection {
            items,
            key_total: score,
            cost,
            score,
        }
    }

    /// 对偶界已无法严格优于当前最优
    fn prunable(&self, bound: f64) -> bool {
        let Some(best) = &self.incumbent else {
            return false;
        };
        if self.integral {
            // 子树内可行阵容评分为整数,不超过 floor(bound)
            bound < best.score + 1.0 - INTEGRAL_SLACK
        } else {
            bound <= best.score + tolerance(best.score)
        }
    }

    fn unfinished(&self, status: SolveStatus, nodes: u64, elapsed: Duration) -> SolveOutcome {
        SolveOutcome {
            status,
            assignment: None,
            objective: self.incumbent.as_ref().map_or(0.0, |b| b.score),
            nodes,
            elapsed,
        }
    }

    fn to_assignment(&self, model: &RosterModel, sel: &Selection) -> Assignment {
        let mut indices: [Vec<usize>; 3] = Default::default();
        for &id in &sel.items {
            let item = &self.items[id];
            indices[item.category].push(item.index);
        }
        for list in indices.iter_mut() {
            list.sort_unstable();
        }
        Assignment::from_indices(model, indices)
    }
}

fn prefix_sums(values: &[(usize, f64)]) -> Vec<f64> {
    let mut sums = Vec::with_capacity(values.len() + 1);
    let mut acc = 0.0;
    sums.push(acc);
    for (_, v) in values {
        acc += v;
        sums.push(acc);
    }
    sums
}

fn tolerance(reference: f64) -> f64 {
    OPTIMALITY_TOLERANCE * reference.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pool::Pool;
    use crate::domain::solution::Solution;
    use crate::domain::types::RosterShape;

    /// 穷举所有满足约束的组合,返回最优目标值
    fn brute_force(model: &RosterModel) -> Option<f64> {
        fn combos(n: usize, k: usize) -> Vec<Vec<usize>> {
            if k == 0 {
                return vec![Vec::new()];
            }
            if n < k {
                return Vec::new();
            }
            let mut out = combos(n - 1, k);
            for mut c in combos(n - 1, k - 1) {
                c.push(n - 1);
                out.push(c);
            }
            out
        }

        let shape = model.shape();
        let mut best: Option<f64> = None;
        for f in combos(model.category(PlayerType::Forward).len(), shape.forwards) {
            for d in combos(model.category(PlayerType::Defender).len(), shape.defenders) {
                for g in combos(model.category(PlayerType::Goalie).len(), shape.goalies) {
                    let a = Assignment::from_indices(model, [f.clone(), d.clone(), g.clone()]);
                    if model.is_feasible(&a) {
                        let v = model.objective(&a);
                        if best.map_or(true, |b| v > b) {
                            best = Some(v);
                        }
                    }
                }
            }
        }
        best
    }

    /// 确定性伪随机选秀池
    fn generated_pool(seed: u64, forwards: usize, defenders: usize, goalies: usize) -> Pool {
        let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let mut next = move || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            state >> 33
        };
        let mut builder = Pool::builder();
        for (t, n) in [
            (PlayerType::Forward, forwards),
            (PlayerType::Defender, defenders),
            (PlayerType::Goalie, goalies),
        ] {
            for i in 0..n {
                let cost = 1 + next() % 50;
                let score = (next() % 40) as f64;
                builder = builder.player(t, &format!("{}{}", t.as_str(), i), cost, score);
            }
        }
        builder.build()
    }

    #[test]
    fn test_matches_brute_force_on_generated_pools() {
        let shape = RosterShape::new(3, 2, 1);
        for seed in 0..12u64 {
            let pool = generated_pool(seed, 7, 5, 3);
            for budget in [40u64, 70, 110, 400] {
                let model = RosterModel::build(&pool, shape, budget).unwrap();
                let outcome = BranchAndBound::default().solve(&model);
                match brute_force(&model) {
                    Some(expected) => {
                        assert_eq!(outcome.status, SolveStatus::Optimal, "seed={seed} budget={budget}");
                        let assignment = outcome.assignment.unwrap();
                        assert!(model.is_feasible(&assignment));
                        assert!(
                            (model.objective(&assignment) - expected).abs() < 1e-6,
                            "seed={seed} budget={budget}"
                        );
                    }
                    None => assert_eq!(outcome.status, SolveStatus::Infeasible),
                }
            }
        }
    }

    #[test]
    fn test_matches_brute_force_with_retention() {
        let shape = RosterShape::new(3, 2, 1);
        for seed in 0..8u64 {
            let pool = generated_pool(seed + 100, 7, 5, 3);
            let base = RosterModel::build(&pool, shape, 90).unwrap();
            let first = BranchAndBound::default().solve(&base);
            let Some(first_assignment) = first.assignment else {
                continue;
            };
            let prior = Solution::new(
                [Vec::new(), Vec::new(), Vec::new()],
                PlayerType::ALL.map(|t| first_assignment.selected_indices(t)),
            );

            let rescored = pool.with_scores(|_, p| ((p.cost * 7 + p.id.0 as u64 * 13) % 37) as f64);
            for trades in 0..=3usize {
                let model = RosterModel::build(&rescored, shape, 90)
                    .unwrap()
                    .with_retention(&prior, trades)
                    .unwrap();
                let outcome = BranchAndBound::default().solve(&model);
                let expected = brute_force(&model);
                assert_eq!(outcome.status == SolveStatus::Optimal, expected.is_some());
                if let (Some(assignment), Some(expected)) = (outcome.assignment, expected) {
                    assert!(model.is_feasible(&assignment));
                    assert!((model.objective(&assignment) - expected).abs() < 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_node_limit_reported_separately() {
        let pool = generated_pool(7, 7, 5, 3);
        let model = RosterModel::build(&pool, RosterShape::new(3, 2, 1), 70).unwrap();
        let solver = BranchAndBound::new(SearchLimits {
            max_nodes: 0,
            time_limit: None,
        });
        let outcome = solver.solve(&model);
        assert_eq!(outcome.status, SolveStatus::NodeLimit);
        assert!(outcome.assignment.is_none());
    }

    #[test]
    fn test_time_limit_reported_separately() {
        let pool = generated_pool(7, 7, 5, 3);
        let model = RosterModel::build(&pool, RosterShape::new(3, 2, 1), 70).unwrap();
        let solver = BranchAndBound::new(SearchLimits {
            max_nodes: u64::MAX,
            time_limit: Some(Duration::ZERO),
        });
        let outcome = solver.solve(&model);
        assert_eq!(outcome.status, SolveStatus::TimeLimit);
        assert!(outcome.assignment.is_none());
    }

    #[test]
    fn test_integral_scores_prune_to_same_optimum() {
        // 同一组球员: 整数评分与加 0.25 的评分最优阵容一致
        let shape = RosterShape::new(3, 2, 1);
        for seed in 20..26u64 {
            let pool = generated_pool(seed, 9, 6, 3);
            let shifted = pool.with_scores(|_, p| p.score + 0.25);
            for budget in [60u64, 90, 130] {
                let integral = BranchAndBound::default()
                    .solve(&RosterModel::build(&pool, shape, budget).unwrap());
                let fractional = BranchAndBound::default()
                    .solve(&RosterModel::build(&shifted, shape, budget).unwrap());
                assert_eq!(integral.status, fractional.status);
                if integral.status == SolveStatus::Optimal {
                    let expected = fractional.objective - 0.25 * shape.total() as f64;
                    assert!((integral.objective - expected).abs() < 1e-6, "seed={seed} budget={budget}");
                }
            }
        }
    }

    #[test]
    fn test_infeasible_when_budget_too_small() {
        let pool = Pool::builder()
            .player(PlayerType::Forward, "a", 10, 1.0)
            .player(PlayerType::Forward, "b", 12, 1.0)
            .build();
        let model = RosterModel::build(&pool, RosterShape::new(2, 0, 0), 21).unwrap();
        let outcome = BranchAndBound::default().solve(&model);
        assert_eq!(outcome.status, SolveStatus::Infeasible);
    }
}
