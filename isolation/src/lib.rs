//! Isolation 棋盘模型
//!
//! 包含:
//! - 玩家、走法等核心数据结构
//! - 皇后式走法生成
//! - 搜索引擎依赖的 `GameState` 抽象
//! - 棋盘布局的文本格式（Layout）

mod board;
mod constants;
mod error;
mod layout;
mod moves;
mod player;
mod state;

pub use board::Board;
pub use constants::*;
pub use error::{BoardError, Result};
pub use layout::Layout;
pub use moves::{MoveGenerator, DIRECTIONS};
pub use player::{Move, Player};
pub use state::GameState;
