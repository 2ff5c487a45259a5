// ==========================================
// 导入层与配置层集成测试
// ==========================================
// 职责: 验证 CSV/NDJSON 文件 → 选秀池/比赛记录 → 求解 的数据流转
// ==========================================

mod helpers;

use helpers::test_data_builder::*;
use hockey_pool_picker::config::{ConfigError, PickerConfig};
use hockey_pool_picker::domain::{GoalieDecision, PlayerType, RosterShape};
use hockey_pool_picker::engine::{build_backtest_pools, ValueStrategy};
use hockey_pool_picker::importer::{
    build_pool, read_games_ndjson, read_players_csv, write_games_ndjson, ImportError,
};
use hockey_pool_picker::logging;
use std::fs;
use tempfile::TempDir;

const HEADER: &str = "type,name,cost,goals,assists,games_played,wins,shutouts,saves,saves_percent\n";

fn players_csv(dir: &TempDir, file: &str, goal_bonus: u32) -> std::path::PathBuf {
    let mut text = String::from(HEADER);
    for i in 0..14 {
        text.push_str(&format!("F,forward-{i:02},{},{},{},82,,,,\n", 900_000 + i * 10_000, i + goal_bonus, i));
    }
    for i in 0..7 {
        text.push_str(&format!("defenders,defender-{i:02},{},{},{},80,,,,\n", 1_000_000, i, 2 * i));
    }
    for i in 0..3 {
        text.push_str(&format!("goalie,goalie-{i:02},2000000,0,0,50,{},{},1200,0.91{i}\n", 20 + i, i));
    }
    let path = dir.path().join(file);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_csv_files_to_initial_pick() {
    logging::init_test();
    let dir = TempDir::new().unwrap();
    let past = read_players_csv(players_csv(&dir, "2021.csv", 0)).unwrap();
    let present = read_players_csv(players_csv(&dir, "2022.csv", 5)).unwrap();
    assert_eq!(past.len(), 24);
    assert_eq!(past[14].player_type, PlayerType::Defender);
    assert_eq!(past[23].stats.saves_percent, 0.912);

    let pools = build_backtest_pools(
        &build_pool(&past, ValueStrategy::Marqueur),
        &build_pool(&present, ValueStrategy::Marqueur),
        ValueStrategy::Marqueur,
        ValueStrategy::Marqueur,
    );
    assert!(pools.dropped.is_empty());
    assert_eq!(pools.present.len(PlayerType::Forward), 14);

    let config = PickerConfig {
        salary_cap: Some(30_000_000),
        ..Default::default()
    };
    let solution = config
        .picker()
        .pick_initial(&pools.past, config.resolved_salary_cap().unwrap())
        .unwrap();
    assert_eq!(solution.len(), RosterShape::default().total());
    assert!(solution.total_weight() <= 30_000_000);
}

#[test]
fn test_missing_players_file() {
    let dir = TempDir::new().unwrap();
    let err = read_players_csv(dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
}

#[test]
fn test_games_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("games.ndjson");
    let games = vec![
        game(2022, 11, 3).goal("forward-01", &["forward-02", "defender-00"]),
        game(2022, 10, 30).goalie(goalie("goalie-00", Some(GoalieDecision::OvertimeLoss), None, false)),
    ];
    write_games_ndjson(&path, &games).unwrap();

    let loaded = read_games_ndjson(&path).unwrap();
    assert_eq!(loaded.len(), 2);
    // 读取后按日期排序
    assert_eq!(loaded[0], games[1]);
    assert_eq!(loaded[1], games[0]);
}

#[test]
fn test_config_file_and_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("picker.json");
    fs::write(
        &path,
        r#"{
            "season": 2023,
            "trade_budget": 4,
            "roster": {"forwards": 9, "defenders": 4, "goalies": 1},
            "evaluation_strategy": {"marqueur_with_percentage": {"minimum_games": 30}}
        }"#,
    )
    .unwrap();

    let config = PickerConfig::from_json_file(&path).unwrap();
    config.validate().unwrap();
    assert_eq!(config.resolved_salary_cap().unwrap(), 83_500_000);
    assert_eq!(config.roster.total(), 14);
    assert_eq!(
        config.evaluation_strategy,
        ValueStrategy::MarqueurWithPercentage { minimum_games: 30 }
    );
    assert_eq!(config.simulator().unwrap().trade_budget(), 4);

    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        PickerConfig::from_json_file(&path).unwrap_err(),
        ConfigError::ParseError(_)
    ));
}
