// ==========================================
// 冰球选秀池阵容决策系统 - 导入层
// ==========================================
// 职责: 读取已对齐的球员表（CSV）与比赛记录（NDJSON）
// 红线: 只解析本地文件,不访问网络,不做跨数据源的姓名归一
// ==========================================

pub mod error;
pub mod games;
pub mod players;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use games::{parse_games, read_games_ndjson, write_games_ndjson};
pub use players::{build_pool, parse_players, read_players_csv, PlayerRecord};
