// ==========================================
// 冰球选秀池阵容决策系统 - 球员表导入
// ==========================================
// 格式: CSV,表头
//   type,name,cost,goals,assists,games_played,wins,shutouts,saves,saves_percent
// 规则: type/name/cost 必填;统计列缺失或为空时按 0 处理;完全空白的行跳过
// ==========================================

use crate::domain::player::PlayerStats;
use crate::domain::pool::{Pool, PoolBuilder};
use crate::domain::types::PlayerType;
use crate::engine::strategy::ValueStrategy;
use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

// ==========================================
// PlayerRecord - 球员表行
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub player_type: PlayerType,
    pub name: String,
    pub cost: u64,
    pub stats: PlayerStats,
}

/// 读取球员 CSV 文件
pub fn read_players_csv<P: AsRef<Path>>(path: P) -> ImportResult<Vec<PlayerRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    let file = File::open(path)?;
    let records = parse_players(file)?;
    info!(path = %path.display(), count = records.len(), "球员表导入完成");
    Ok(records)
}

/// 从任意输入解析球员表
pub fn parse_players<R: Read>(input: R) -> ImportResult<Vec<PlayerRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // 允许省略末尾统计列
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let row = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);

        let mut row_map: HashMap<&str, &str> = HashMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                row_map.insert(header.as_str(), value.trim());
            }
        }

        // 跳过完全空白的行
        if row_map.values().all(|v| v.is_empty()) {
            continue;
        }

        records.push(map_row(row, &row_map)?);
    }

    debug!(count = records.len(), "球员表解析完成");
    Ok(records)
}

fn map_row(row: usize, fields: &HashMap<&str, &str>) -> ImportResult<PlayerRecord> {
    let type_str = required(row, fields, "type")?;
    let player_type = type_str
        .parse::<PlayerType>()
        .map_err(|_| ImportError::UnknownPlayerType {
            row,
            value: type_str.to_string(),
        })?;
    let name = required(row, fields, "name")?.to_string();
    let cost = parse_number::<u64>(row, "cost", required(row, fields, "cost")?)?;

    let stats = PlayerStats {
        goals: optional(row, fields, "goals")?,
        assists: optional(row, fields, "assists")?,
        games_played: optional(row, fields, "games_played")?,
        wins: optional(row, fields, "wins")?,
        shutouts: optional(row, fields, "shutouts")?,
        saves: optional(row, fields, "saves")?,
        saves_percent: optional(row, fields, "saves_percent")?,
    };

    Ok(PlayerRecord {
        player_type,
        name,
        cost,
        stats,
    })
}

fn required<'a>(row: usize, fields: &HashMap<&str, &'a str>, field: &str) -> ImportResult<&'a str> {
    match fields.get(field) {
        Some(v) if !v.is_empty() => Ok(*v),
        _ => Err(ImportError::MissingField {
            row,
            field: field.to_string(),
        }),
    }
}

fn optional<T>(row: usize, fields: &HashMap<&str, &str>, field: &str) -> ImportResult<T>
where
    T: std::str::FromStr + Default,
    T::Err: std::fmt::Display,
{
    match fields.get(field) {
        Some(v) if !v.is_empty() => parse_number(row, field, v),
        _ => Ok(T::default()),
    }
}

fn parse_number<T>(row: usize, field: &str, value: &str) -> ImportResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| ImportError::TypeConversionError {
        row,
        field: field.to_string(),
        message: format!("{} ({})", e, value),
    })
}

/// 按文件顺序构建选秀池,并用给定策略打分
pub fn build_pool(records: &[PlayerRecord], strategy: ValueStrategy) -> Pool {
    let mut builder = PoolBuilder::default();
    for r in records {
        builder.push(
            r.player_type,
            r.name.clone(),
            r.cost,
            strategy.score(r.player_type, &r.stats),
            r.stats,
        );
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
type,name,cost,goals,assists,games_played,wins,shutouts,saves,saves_percent
forward, Connor McDavid ,12500000,64,89,82,,,,
defender,Cale Makar,9000000,17,49,60,,,,

goalie,Linus Ullmark,5000000,0,1,49,40,2,1267,0.938
";

    #[test]
    fn test_parse_players_fills_missing_stats() {
        let records = parse_players(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "Connor McDavid");
        assert_eq!(records[0].stats.goals, 64);
        assert_eq!(records[0].stats.wins, 0);
        assert_eq!(records[2].player_type, PlayerType::Goalie);
        assert_eq!(records[2].stats.saves_percent, 0.938);
    }

    #[test]
    fn test_parse_players_reports_row() {
        let bad = "type,name,cost\nforward,a,10\nwinger,b,10\n";
        match parse_players(bad.as_bytes()).unwrap_err() {
            ImportError::UnknownPlayerType { row, value } => {
                assert_eq!(row, 3);
                assert_eq!(value, "winger");
            }
            other => panic!("unexpected error: {other}"),
        }

        let bad_cost = "type,name,cost\nforward,a,lots\n";
        assert!(matches!(
            parse_players(bad_cost.as_bytes()).unwrap_err(),
            ImportError::TypeConversionError { row: 2, .. }
        ));

        let no_name = "type,name,cost\nforward,,10\n";
        assert!(matches!(
            parse_players(no_name.as_bytes()).unwrap_err(),
            ImportError::MissingField { row: 2, .. }
        ));
    }

    #[test]
    fn test_build_pool_scores_with_strategy() {
        let records = parse_players(SAMPLE.as_bytes()).unwrap();
        let pool = build_pool(&records, ValueStrategy::Marqueur);
        assert_eq!(pool.len(PlayerType::Forward), 1);
        assert_eq!(pool.group(PlayerType::Forward)[0].score, 217.0);
        assert_eq!(pool.group(PlayerType::Goalie)[0].score, 132.0);
    }
}
