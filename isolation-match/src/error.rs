//! 错误类型定义

use isolation::BoardError;
use isolation_ai::ConfigError;
use thiserror::Error;

/// 对局驱动错误
#[derive(Error, Debug)]
pub enum MatchError {
    /// 棋盘错误
    #[error("Board error: {0}")]
    Board(#[from] BoardError),

    /// AI 配置错误
    #[error("Agent config error: {0}")]
    Config(#[from] ConfigError),

    /// 无效的参赛者描述
    #[error("Invalid contestant spec: {0}")]
    InvalidSpec(String),

    /// 对手列表为空
    #[error("Tournament needs at least one opponent")]
    NoOpponents,

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化错误
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 对局驱动结果类型
pub type Result<T> = std::result::Result<T, MatchError>;
