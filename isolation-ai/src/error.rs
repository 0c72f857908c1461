//! 错误类型定义

use thiserror::Error;

/// 配置错误
///
/// 在任何搜索开始之前返回，不会静默回退到默认值
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 搜索深度必须为正
    #[error("Search depth must be positive")]
    NonPositiveDepth,

    /// 超时阈值必须为正
    #[error("Timer threshold must be a positive number of milliseconds, got {0}")]
    InvalidThreshold(f64),

    /// 权重必须是有限值
    #[error("Pressure weight must be finite, got {0}")]
    InvalidWeight(f64),

    /// 未知的评估函数
    #[error("Unknown heuristic: {0}")]
    UnknownHeuristic(String),

    /// 未知的搜索方法
    #[error("Unknown search method: {0}")]
    UnknownMethod(String),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 解析错误
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
