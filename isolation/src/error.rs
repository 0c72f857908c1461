//! 错误类型定义

use thiserror::Error;

use crate::player::Move;

/// 棋盘规则错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoardError {
    /// 无效的棋盘尺寸
    #[error("Invalid board dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// 坐标超出棋盘
    #[error("Position out of bounds: {0}")]
    OutOfBounds(Move),

    /// 格子已被占用
    #[error("Cell is not blank: {0}")]
    CellBlocked(Move),

    /// 非法走法
    #[error("Illegal move: {0}")]
    IllegalMove(Move),

    /// 游戏已结束
    #[error("Game is already over")]
    GameOver,

    /// 无效的布局字符串
    #[error("Invalid layout string: {reason}")]
    InvalidLayout { reason: String },
}

/// 棋盘操作结果类型
pub type Result<T> = std::result::Result<T, BoardError>;
