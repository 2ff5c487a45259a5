// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use hockey_pool_picker::domain::{GameRecord, GoalieAppearance, GoalieDecision, Pool, PoolBuilder};
use hockey_pool_picker::domain::{PlayerStats, PlayerType, RosterShape};

// ==========================================
// 选秀池构建器
// ==========================================

/// 按类别批量追加球员,工资与评分由闭包给出
pub struct PoolFixture {
    builder: PoolBuilder,
}

impl PoolFixture {
    pub fn new() -> Self {
        Self {
            builder: PoolBuilder::default(),
        }
    }

    pub fn players<F>(mut self, player_type: PlayerType, count: usize, mut cost_score: F) -> Self
    where
        F: FnMut(usize) -> (u64, f64),
    {
        for i in 0..count {
            let (cost, score) = cost_score(i);
            self.builder.push(
                player_type,
                format!("{}-{:02}", player_type.as_str(), i),
                cost,
                score,
                PlayerStats::default(),
            );
        }
        self
    }

    pub fn build(self) -> Pool {
        self.builder.build()
    }
}

/// 恰好满足 12/6/2 的最小选秀池
pub fn exact_minimum_pool() -> Pool {
    let shape = RosterShape::default();
    PoolFixture::new()
        .players(PlayerType::Forward, shape.forwards, |i| (1_000_000 + i as u64 * 100_000, 10.0 + i as f64))
        .players(PlayerType::Defender, shape.defenders, |i| (2_000_000 + i as u64 * 50_000, 5.0 + i as f64))
        .players(PlayerType::Goalie, shape.goalies, |i| (3_000_000, 20.0 - i as f64))
        .build()
}

/// 确定性伪随机选秀池（线性同余）
pub fn generated_pool(seed: u64, forwards: usize, defenders: usize, goalies: usize) -> Pool {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        state >> 33
    };
    let mut fixture = PoolFixture::new();
    for (t, n) in [
        (PlayerType::Forward, forwards),
        (PlayerType::Defender, defenders),
        (PlayerType::Goalie, goalies),
    ] {
        fixture = fixture.players(t, n, |_| {
            let cost = 500_000 + (next() % 40) * 250_000;
            let score = (next() % 120) as f64;
            (cost, score)
        });
    }
    fixture.build()
}

/// 联盟规模的选秀池: 420 前锋、260 后卫、90 守门员
///
/// 工资帽占用 775k 至 12.5M,评分为整数且随工资上升
pub fn league_sized_pool(seed: u64) -> Pool {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        state >> 33
    };
    let mut fixture = PoolFixture::new();
    for (t, n) in [
        (PlayerType::Forward, 420),
        (PlayerType::Defender, 260),
        (PlayerType::Goalie, 90),
    ] {
        fixture = fixture.players(t, n, |_| {
            let cost = 775_000 + (next() % 470) * 25_000;
            let score = (cost / 150_000 + next() % 45) as f64;
            (cost, score)
        });
    }
    fixture.build()
}

/// 同一批球员换一套评分（顺序与 PlayerId 不变）
pub fn rescored(pool: &Pool, seed: u64) -> Pool {
    let mut state = seed;
    pool.with_scores(|_, _| {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((state >> 33) % 120) as f64
    })
}

/// 最便宜阵容的工资合计
pub fn minimum_roster_cost(pool: &Pool, shape: RosterShape) -> u64 {
    PlayerType::ALL
        .iter()
        .map(|&t| {
            let mut costs: Vec<u64> = pool.group(t).iter().map(|p| p.cost).collect();
            costs.sort_unstable();
            costs.iter().take(shape.count(t)).sum::<u64>()
        })
        .sum()
}

// ==========================================
// 比赛记录构建器
// ==========================================

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn game(year: i32, month: u32, day: u32) -> GameRecord {
    GameRecord::new(date(year, month, day))
}

pub fn goalie(name: &str, decision: Option<GoalieDecision>, saves_percent: Option<f64>, shutout: bool) -> GoalieAppearance {
    GoalieAppearance {
        name: name.to_string(),
        decision,
        saves: 25,
        saves_percent,
        shutout,
    }
}
