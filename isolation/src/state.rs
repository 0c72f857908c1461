//! 搜索引擎所依赖的局面抽象

use crate::player::{Move, Player};

/// 不可变的局面快照
///
/// 搜索只通过这个 trait 访问局面：生成走法、推演走法得到新局面、
/// 判断终局。推演永远产生一个新值，原局面不会被修改。
pub trait GameState: Sized {
    /// 棋盘宽度
    fn width(&self) -> usize;

    /// 棋盘高度
    fn height(&self) -> usize;

    /// 所有空白格
    fn blank_spaces(&self) -> Vec<Move>;

    /// 玩家当前所在格（第一步之前为 None）
    fn player_location(&self, player: Player) -> Option<Move>;

    /// 当前走子方
    fn active_player(&self) -> Player;

    /// 对手
    fn opponent(&self, player: Player) -> Player {
        player.opponent()
    }

    /// 指定玩家的合法走法
    fn legal_moves_for(&self, player: Player) -> Vec<Move>;

    /// 当前走子方的合法走法
    fn legal_moves(&self) -> Vec<Move> {
        self.legal_moves_for(self.active_player())
    }

    /// 推演走法，返回新的局面
    ///
    /// `mv` 必须来自 [`GameState::legal_moves`]，不再重复校验
    fn forecast_move(&self, mv: Move) -> Self;

    /// `player` 是否已经获胜
    fn is_winner(&self, player: Player) -> bool {
        player != self.active_player() && self.legal_moves().is_empty()
    }

    /// `player` 是否已经落败
    fn is_loser(&self, player: Player) -> bool {
        player == self.active_player() && self.legal_moves().is_empty()
    }

    /// 终局效用：胜 `+inf`，负 `-inf`，未分胜负为 0
    fn utility(&self, player: Player) -> f64 {
        if self.is_winner(player) {
            f64::INFINITY
        } else if self.is_loser(player) {
            f64::NEG_INFINITY
        } else {
            0.0
        }
    }
}
