//! 玩家与走法定义

use serde::{Deserialize, Serialize};

/// 玩家
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// 先手
    First,
    /// 后手
    Second,
}

impl Player {
    /// 获取对手
    pub fn opponent(&self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// 数组索引（0=先手, 1=后手）
    pub fn index(&self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }

    /// 布局字符
    pub fn to_layout_char(&self) -> char {
        match self {
            Player::First => '1',
            Player::Second => '2',
        }
    }

    /// 从布局字符解析
    pub fn from_layout_char(c: char) -> Option<Player> {
        match c {
            '1' => Some(Player::First),
            '2' => Some(Player::Second),
            _ => None,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::First => write!(f, "player 1"),
            Player::Second => write!(f, "player 2"),
        }
    }
}

/// 走法：玩家移动到的目标格子
///
/// `Move::NONE` 即 (-1, -1)，表示没有可走的棋
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 列
    pub x: i32,
    /// 行
    pub y: i32,
}

impl Move {
    /// 无走法哨兵
    pub const NONE: Move = Move { x: -1, y: -1 };

    /// 创建新走法
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// 是否为哨兵
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// 转换为 Option，哨兵映射为 None
    pub fn to_option(self) -> Option<Move> {
        if self.is_none() {
            None
        } else {
            Some(self)
        }
    }

    /// 偏移后的格子（不检查边界）
    pub fn offset(&self, dx: i32, dy: i32) -> Move {
        Move::new(self.x + dx, self.y + dy)
    }

    /// 曼哈顿距离
    pub fn manhattan(&self, other: Move) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl From<(i32, i32)> for Move {
    fn from((x, y): (i32, i32)) -> Self {
        Move::new(x, y)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
