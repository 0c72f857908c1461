//! 棋盘常量定义

/// 默认棋盘宽度（列数）
pub const DEFAULT_BOARD_WIDTH: usize = 7;

/// 默认棋盘高度（行数）
pub const DEFAULT_BOARD_HEIGHT: usize = 7;

/// 棋盘最大边长
///
/// 坐标以 `i32` 存储，该上限只是防止误配置生成巨大的棋盘
pub const MAX_BOARD_SIDE: usize = 64;

/// 比赛默认每步思考时间（毫秒）
pub const DEFAULT_TURN_TIME_MS: u64 = 150;
