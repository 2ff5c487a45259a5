// ==========================================
// 冰球选秀池阵容决策系统 - 配置层
// ==========================================
// 职责: 运行参数加载与校验
// 覆写顺序: 默认值 < JSON 配置文件 < 环境变量
// ==========================================

pub mod error;
pub mod picker_config;

// 重导出核心配置
pub use error::{ConfigError, ConfigResult};
pub use picker_config::{env_keys, PickerConfig};
