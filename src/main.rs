// ==========================================
// 冰球选秀池阵容决策系统 - 回测入口
// ==========================================
// 用法:
//   hockey-pool-picker <上赛季球员.csv> <本赛季球员.csv> <比赛记录.ndjson> [配置.json]
//
// 流程: 上赛季数据初选 → 投影到本赛季 → 按月赛段模拟交易 → 输出结果
// 只做参数与输出的拼接,所有决策由库完成
// ==========================================

use anyhow::{bail, Context, Result};
use hockey_pool_picker::domain::render_summary;
use hockey_pool_picker::engine::build_backtest_pools;
use hockey_pool_picker::importer::{build_pool, read_games_ndjson, read_players_csv};
use hockey_pool_picker::config::env_keys;
use hockey_pool_picker::{logging, PickerConfig, APP_NAME, VERSION};
use std::path::PathBuf;

fn main() -> Result<()> {
    match std::env::var(env_keys::LOG_FORMAT).as_deref() {
        Ok("json") => logging::init_json(),
        _ => logging::init(),
    }

    let mut args = std::env::args().skip(1);
    let (Some(past_path), Some(present_path), Some(games_path)) =
        (args.next(), args.next(), args.next())
    else {
        bail!("用法: hockey-pool-picker <past.csv> <present.csv> <games.ndjson> [config.json]");
    };
    let config_path = args.next().map(PathBuf::from);

    tracing::info!("{} v{}", APP_NAME, VERSION);

    let mut config = match &config_path {
        Some(path) => PickerConfig::from_json_file(path)
            .with_context(|| format!("无法加载配置: {}", path.display()))?,
        None => PickerConfig::default(),
    };
    config.apply_env_overrides()?;
    config.validate()?;
    let salary_cap = config.resolved_salary_cap()?;

    let past_records = read_players_csv(&past_path).with_context(|| format!("读取 {}", past_path))?;
    let present_records =
        read_players_csv(&present_path).with_context(|| format!("读取 {}", present_path))?;
    let games = read_games_ndjson(&games_path).with_context(|| format!("读取 {}", games_path))?;

    let pools = build_backtest_pools(
        &build_pool(&past_records, config.picking_strategy),
        &build_pool(&present_records, config.evaluation_strategy),
        config.picking_strategy,
        config.evaluation_strategy,
    );
    for (player_type, name) in &pools.dropped {
        tracing::debug!(%player_type, name = %name, "剔除");
    }

    let picker = config.picker();
    let initial = picker
        .pick_initial(&pools.past, salary_cap)
        .context("初选失败")?;
    println!("{} pick:", config.picking_season());
    print!("{}", render_summary(&initial.summary_table()));

    let projection = picker.project_onto_pool(&initial, &pools.present);
    println!("\nTranslated to {}", config.simulated_season());
    print!("{}", render_summary(&projection.solution.summary_table()));
    for (player_type, name) in &projection.unmatched {
        println!("! unmatched {} {}", player_type, name);
    }

    println!("\nTrading...");
    let outcome = config
        .simulator()?
        .run_season(&initial, &pools.present, &games, config.simulated_season())
        .context("赛段模拟失败")?;
    for report in &outcome.periods {
        println!("Looking from {}", report.look_back);
        println!("{}: {}", report.period, report.value);
        if let Some(diff) = &report.diff {
            print!("{}", diff);
        }
        println!();
    }
    println!("Total value: {}", outcome.total_value);
    print!("{}", render_summary(&outcome.solution.summary_table()));

    Ok(())
}
