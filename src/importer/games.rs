// ==========================================
// 冰球选秀池阵容决策系统 - 比赛记录导入
// ==========================================
// 格式: NDJSON,每行一个 GameRecord JSON 对象,空行跳过
// 输出: 按日期升序（同日保持文件顺序）
// ==========================================

use crate::domain::game::GameRecord;
use crate::importer::error::{ImportError, ImportResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// 读取比赛记录 NDJSON 文件
pub fn read_games_ndjson<P: AsRef<Path>>(path: P) -> ImportResult<Vec<GameRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    let games = parse_games(BufReader::new(File::open(path)?))?;
    info!(path = %path.display(), count = games.len(), "比赛记录导入完成");
    Ok(games)
}

/// 从任意输入解析比赛记录
pub fn parse_games<R: BufRead>(input: R) -> ImportResult<Vec<GameRecord>> {
    let mut games = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let game: GameRecord =
            serde_json::from_str(&line).map_err(|e| ImportError::JsonParseError {
                line: idx + 1,
                message: e.to_string(),
            })?;
        games.push(game);
    }
    games.sort_by_key(|g| g.date);
    Ok(games)
}

/// 将比赛记录写成 NDJSON
pub fn write_games_ndjson<P: AsRef<Path>>(path: P, games: &[GameRecord]) -> ImportResult<()> {
    let mut out = String::new();
    for game in games {
        out.push_str(&serde_json::to_string(game)?);
        out.push('\n');
    }
    std::fs::write(path, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::GoalieDecision;

    #[test]
    fn test_parse_games_sorts_and_skips_blank_lines() {
        let input = r#"{"date":"2022-11-02","scores":[{"scorer":"a","assists":["b"]}]}

{"date":"2022-11-01","goalies":[{"name":"g","decision":"W","saves":30,"saves_percent":1.0,"shutout":true}]}
"#;
        let games = parse_games(input.as_bytes()).unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].date.to_string(), "2022-11-01");
        assert_eq!(games[0].goalies[0].decision, Some(GoalieDecision::Win));
        assert!(games[0].scores.is_empty());
        assert_eq!(games[1].scores[0].assists, vec!["b".to_string()]);
    }

    #[test]
    fn test_parse_games_reports_line() {
        let input = "{\"date\":\"2022-11-02\"}\n\n{not json}\n";
        match parse_games(input.as_bytes()).unwrap_err() {
            ImportError::JsonParseError { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }
}
