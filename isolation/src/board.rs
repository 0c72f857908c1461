//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, MAX_BOARD_SIDE};
use crate::error::{BoardError, Result};
use crate::moves::MoveGenerator;
use crate::player::{Move, Player};
use crate::state::GameState;

/// Isolation 棋盘
///
/// 每个格子要么空白，要么已被访问过（包括双方当前所在格）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: usize,
    height: usize,
    /// 索引为 y * width + x，true 表示空白
    blank: Vec<bool>,
    /// 双方位置 [先手, 后手]
    locations: [Option<Move>; 2],
    /// 当前走子方
    active: Player,
    /// 已走步数
    move_count: u32,
}

impl Board {
    /// 创建空棋盘
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 || width > MAX_BOARD_SIDE || height > MAX_BOARD_SIDE {
            return Err(BoardError::InvalidDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            blank: vec![true; width * height],
            locations: [None, None],
            active: Player::First,
            move_count: 0,
        })
    }

    /// 棋盘宽度
    pub fn width(&self) -> usize {
        self.width
    }

    /// 棋盘高度
    pub fn height(&self) -> usize {
        self.height
    }

    /// 检查坐标是否在棋盘内
    pub fn in_bounds(&self, pos: Move) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    fn index(&self, pos: Move) -> usize {
        pos.y as usize * self.width + pos.x as usize
    }

    /// 检查格子是否空白（越界视为非空白）
    pub fn is_blank(&self, pos: Move) -> bool {
        self.in_bounds(pos) && self.blank[self.index(pos)]
    }

    /// 所有空白格，按行优先顺序
    pub fn blank_cells(&self) -> Vec<Move> {
        let mut cells = Vec::with_capacity(self.blank_count());
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Move::new(x as i32, y as i32);
                if self.blank[self.index(pos)] {
                    cells.push(pos);
                }
            }
        }
        cells
    }

    /// 空白格数量
    pub fn blank_count(&self) -> usize {
        self.blank.iter().filter(|b| **b).count()
    }

    /// 玩家位置
    pub fn location(&self, player: Player) -> Option<Move> {
        self.locations[player.index()]
    }

    /// 当前走子方
    pub fn active(&self) -> Player {
        self.active
    }

    /// 设置走子方（用于摆局面）
    pub fn set_active(&mut self, player: Player) {
        self.active = player;
    }

    /// 已走步数
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// 标记一个格子为已访问（用于摆局面）
    pub fn block(&mut self, pos: Move) -> Result<()> {
        self.check_blank(pos)?;
        let index = self.index(pos);
        self.blank[index] = false;
        Ok(())
    }

    /// 把玩家放到指定格子（用于摆局面，不切换走子方）
    pub fn place(&mut self, player: Player, pos: Move) -> Result<()> {
        self.check_blank(pos)?;
        let index = self.index(pos);
        self.blank[index] = false;
        self.locations[player.index()] = Some(pos);
        Ok(())
    }

    fn check_blank(&self, pos: Move) -> Result<()> {
        if !self.in_bounds(pos) {
            return Err(BoardError::OutOfBounds(pos));
        }
        if !self.is_blank(pos) {
            return Err(BoardError::CellBlocked(pos));
        }
        Ok(())
    }

    /// 走一步棋（检查规则），返回新的棋盘
    pub fn play(&self, mv: Move) -> Result<Board> {
        if MoveGenerator::generate(self, self.active).is_empty() {
            return Err(BoardError::GameOver);
        }
        if !MoveGenerator::is_legal(self, self.active, mv) {
            return Err(BoardError::IllegalMove(mv));
        }

        let mut next = self.clone();
        next.apply_unchecked(mv);
        Ok(next)
    }

    /// 走一步棋（不检查规则）
    fn apply_unchecked(&mut self, mv: Move) {
        let index = self.index(mv);
        self.blank[index] = false;
        self.locations[self.active.index()] = Some(mv);
        self.active = self.active.opponent();
        self.move_count += 1;
    }

    /// 胜者（游戏未结束时为 None）
    pub fn winner(&self) -> Option<Player> {
        if MoveGenerator::generate(self, self.active).is_empty() {
            Some(self.active.opponent())
        } else {
            None
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            blank: vec![true; DEFAULT_BOARD_WIDTH * DEFAULT_BOARD_HEIGHT],
            locations: [None, None],
            active: Player::First,
            move_count: 0,
        }
    }
}

impl GameState for Board {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn blank_spaces(&self) -> Vec<Move> {
        self.blank_cells()
    }

    fn player_location(&self, player: Player) -> Option<Move> {
        self.location(player)
    }

    fn active_player(&self) -> Player {
        self.active
    }

    fn legal_moves_for(&self, player: Player) -> Vec<Move> {
        MoveGenerator::generate(self, player)
    }

    fn forecast_move(&self, mv: Move) -> Self {
        let mut next = self.clone();
        next.apply_unchecked(mv);
        next
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "   ")?;
        for x in 0..self.width {
            write!(f, " {:>2} ", x)?;
        }
        writeln!(f)?;

        for y in 0..self.height {
            write!(f, "{:>2} |", y)?;
            for x in 0..self.width {
                let pos = Move::new(x as i32, y as i32);
                let symbol = if self.location(Player::First) == Some(pos) {
                    '1'
                } else if self.location(Player::Second) == Some(pos) {
                    '2'
                } else if self.is_blank(pos) {
                    ' '
                } else {
                    '-'
                };
                write!(f, " {} |", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
