//! 走法生成

use crate::board::Board;
use crate::player::{Move, Player};

/// 皇后的八个方向，按 N, NE, E, SE, S, SW, W, NW 顺序（N 为 y-1）
pub const DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成指定玩家的所有合法走法
    ///
    /// 尚未落子的玩家可以走到任意空白格；否则沿八个方向直线前进，
    /// 遇到棋盘边界或非空白格即停止。
    pub fn generate(board: &Board, player: Player) -> Vec<Move> {
        match board.location(player) {
            None => board.blank_cells(),
            Some(from) => {
                let mut moves = Vec::with_capacity(4 * (board.width() + board.height()));
                for (dx, dy) in DIRECTIONS {
                    Self::generate_ray(board, from, dx, dy, &mut moves);
                }
                moves
            }
        }
    }

    /// 生成单个方向上的走法，由近及远
    fn generate_ray(board: &Board, from: Move, dx: i32, dy: i32, moves: &mut Vec<Move>) {
        let mut to = from.offset(dx, dy);
        while board.is_blank(to) {
            moves.push(to);
            to = to.offset(dx, dy);
        }
    }

    /// 检查走法对指定玩家是否合法
    pub fn is_legal(board: &Board, player: Player, mv: Move) -> bool {
        if !board.is_blank(mv) {
            return false;
        }

        let Some(from) = board.location(player) else {
            return true;
        };

        let (dx, dy) = (mv.x - from.x, mv.y - from.y);
        if (dx == 0 && dy == 0) || (dx != 0 && dy != 0 && dx.abs() != dy.abs()) {
            return false;
        }

        // 路径上（不含终点）必须全部为空白
        let (step_x, step_y) = (dx.signum(), dy.signum());
        let mut pos = from.offset(step_x, step_y);
        while pos != mv {
            if !board.is_blank(pos) {
                return false;
            }
            pos = pos.offset(step_x, step_y);
        }
        true
    }
}
