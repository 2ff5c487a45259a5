// ==========================================
// 冰球选秀池阵容决策系统 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {0}")]
    FileNotFound(String),

    #[error("配置文件读取失败: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("配置文件解析失败: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },

    #[error("赛季 {season} 没有工资帽数据,请显式配置 salary_cap")]
    MissingSalaryCap { season: i32 },

    #[error("配置无效: {0}")]
    Invalid(String),
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
