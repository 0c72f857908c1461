//! 局面评估函数
//!
//! 所有评估函数都满足同一个约定：`player` 已输返回负无穷，已赢返回正无穷，
//! 否则返回有限值，越大对 `player` 越有利。评估不依赖于轮到谁走。

use std::str::FromStr;

use isolation::{GameState, Move, Player};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 评估器
pub trait Evaluator<S: GameState> {
    /// 以 `player` 的视角评估局面
    fn score(&self, state: &S, player: Player) -> f64;
}

/// 终局判定，未分胜负时返回 None
fn terminal_score<S: GameState>(state: &S, player: Player) -> Option<f64> {
    if state.is_loser(player) {
        Some(f64::NEG_INFINITY)
    } else if state.is_winner(player) {
        Some(f64::INFINITY)
    } else {
        None
    }
}

/// 是否位于棋盘最外圈
fn on_outer_ring(mv: Move, width: usize, height: usize) -> bool {
    mv.x == 0 || mv.y == 0 || mv.x == width as i32 - 1 || mv.y == height as i32 - 1
}

/// 去掉落在最外圈的走法
fn inner_moves<S: GameState>(state: &S, player: Player) -> Vec<Move> {
    let (width, height) = (state.width(), state.height());
    state
        .legal_moves_for(player)
        .into_iter()
        .filter(|mv| !on_outer_ring(*mv, width, height))
        .collect()
}

/// 行动力差 × 已占格数
///
/// `(我方走法数 - weight × 对方走法数) × 已占格数`。
/// 棋盘越满，行动力差距的权重越大。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MobilityPressure {
    weight: f64,
}

impl MobilityPressure {
    /// 默认压制系数
    pub const DEFAULT_WEIGHT: f64 = 3.0;

    pub fn new(weight: f64) -> Self {
        Self { weight }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl Default for MobilityPressure {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WEIGHT)
    }
}

impl<S: GameState> Evaluator<S> for MobilityPressure {
    fn score(&self, state: &S, player: Player) -> f64 {
        if let Some(score) = terminal_score(state, player) {
            return score;
        }

        let my_moves = state.legal_moves_for(player).len() as f64;
        let opponent_moves = state.legal_moves_for(state.opponent(player)).len() as f64;
        let filled = (state.width() * state.height() - state.blank_spaces().len()) as f64;

        (my_moves - self.weight * opponent_moves) * filled
    }
}

/// 到中心的曼哈顿距离
///
/// 只统计不在最外圈的走法，`我方距离和 - 2 × 对方距离和`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CentralDistance;

impl CentralDistance {
    fn distance_sum(moves: &[Move], center: Move) -> i32 {
        moves.iter().map(|mv| mv.manhattan(center)).sum()
    }
}

impl<S: GameState> Evaluator<S> for CentralDistance {
    fn score(&self, state: &S, player: Player) -> f64 {
        if let Some(score) = terminal_score(state, player) {
            return score;
        }

        let center = Move::new(state.width() as i32 / 2, state.height() as i32 / 2);
        let my_sum = Self::distance_sum(&inner_moves(state, player), center);
        let opponent_sum = Self::distance_sum(&inner_moves(state, state.opponent(player)), center);

        f64::from(my_sum - 2 * opponent_sum)
    }
}

/// 对局阶段（按空白格比例划分）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// 空白格 > 70%
    Opening,
    /// 50% < 空白格 <= 70%
    Midgame,
    /// 空白格 <= 50%
    Endgame,
}

impl GamePhase {
    /// 判断局面所处阶段
    pub fn of<S: GameState>(state: &S) -> GamePhase {
        let cells = state.width() * state.height();
        let blank_pct = state.blank_spaces().len() * 100 / cells;

        if blank_pct > 70 {
            GamePhase::Opening
        } else if blank_pct > 50 {
            GamePhase::Midgame
        } else {
            GamePhase::Endgame
        }
    }
}

/// 分阶段评估
///
/// - 开局：`我方走法数 - 2 × 对方走法数`
/// - 中局：去掉最外圈的走法后比较数量
/// - 残局：按双方连线的中点把棋盘一分为二，只统计各自半区内的走法，返回两者之和
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseAdaptive;

impl PhaseAdaptive {
    fn opening<S: GameState>(state: &S, player: Player) -> f64 {
        let my_moves = state.legal_moves_for(player).len() as f64;
        let opponent_moves = state.legal_moves_for(state.opponent(player)).len() as f64;
        my_moves - 2.0 * opponent_moves
    }

    fn midgame<S: GameState>(state: &S, player: Player) -> f64 {
        let my_moves = inner_moves(state, player).len() as f64;
        let opponent_moves = inner_moves(state, state.opponent(player)).len() as f64;
        my_moves - opponent_moves
    }

    fn endgame<S: GameState>(state: &S, player: Player) -> f64 {
        let opponent = state.opponent(player);
        let locations = (state.player_location(player), state.player_location(opponent));
        let (Some(me), Some(them)) = locations else {
            return Self::opening(state, player);
        };

        // 沿双方坐标不同的那条轴切分
        let axis = |mv: &Move| if me.x != them.x { mv.x } else { mv.y };
        let mine = axis(&me);
        let midpoint = (mine + axis(&them)) / 2;

        let my_moves = state.legal_moves_for(player);
        let opponent_moves = state.legal_moves_for(opponent);

        let (my_count, opponent_count) = if midpoint < mine {
            (
                my_moves.iter().filter(|mv| axis(mv) > midpoint).count(),
                opponent_moves.iter().filter(|mv| axis(mv) < midpoint).count(),
            )
        } else {
            (
                my_moves.iter().filter(|mv| axis(mv) < midpoint).count(),
                opponent_moves.iter().filter(|mv| axis(mv) > midpoint).count(),
            )
        };

        (my_count + opponent_count) as f64
    }
}

impl<S: GameState> Evaluator<S> for PhaseAdaptive {
    fn score(&self, state: &S, player: Player) -> f64 {
        if let Some(score) = terminal_score(state, player) {
            return score;
        }

        match GamePhase::of(state) {
            GamePhase::Opening => Self::opening(state, player),
            GamePhase::Midgame => Self::midgame(state, player),
            GamePhase::Endgame => Self::endgame(state, player),
        }
    }
}

/// 我方走法数（基准评估）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenMove;

impl<S: GameState> Evaluator<S> for OpenMove {
    fn score(&self, state: &S, player: Player) -> f64 {
        if let Some(score) = terminal_score(state, player) {
            return score;
        }
        state.legal_moves_for(player).len() as f64
    }
}

/// 我方走法数 - 对方走法数（基准评估）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Improved;

impl<S: GameState> Evaluator<S> for Improved {
    fn score(&self, state: &S, player: Player) -> f64 {
        if let Some(score) = terminal_score(state, player) {
            return score;
        }
        let my_moves = state.legal_moves_for(player).len() as f64;
        let opponent_moves = state.legal_moves_for(state.opponent(player)).len() as f64;
        my_moves - opponent_moves
    }
}

/// 评估函数选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Heuristic {
    /// [`MobilityPressure`]
    MobilityPressure,
    /// [`CentralDistance`]
    CentralDistance,
    /// [`PhaseAdaptive`]
    #[default]
    PhaseAdaptive,
    /// [`OpenMove`]
    OpenMove,
    /// [`Improved`]
    Improved,
}

impl Heuristic {
    /// 配置名称
    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::MobilityPressure => "mobility-pressure",
            Heuristic::CentralDistance => "central-distance",
            Heuristic::PhaseAdaptive => "phase-adaptive",
            Heuristic::OpenMove => "open-move",
            Heuristic::Improved => "improved",
        }
    }

    /// 所有选项
    pub fn all() -> &'static [Heuristic] {
        &[
            Heuristic::MobilityPressure,
            Heuristic::CentralDistance,
            Heuristic::PhaseAdaptive,
            Heuristic::OpenMove,
            Heuristic::Improved,
        ]
    }
}

impl FromStr for Heuristic {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heuristic::all()
            .iter()
            .copied()
            .find(|h| h.name() == s)
            .ok_or_else(|| ConfigError::UnknownHeuristic(s.to_string()))
    }
}

impl std::fmt::Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isolation::{Board, Layout};

    fn all_scores(board: &Board, player: Player) -> Vec<f64> {
        vec![
            MobilityPressure::default().score(board, player),
            CentralDistance.score(board, player),
            PhaseAdaptive.score(board, player),
            OpenMove.score(board, player),
            Improved.score(board, player),
        ]
    }

    #[test]
    fn test_terminal_scores() {
        // 先手被困，轮到先手
        let board = Layout::parse("1#/#2 1").unwrap();

        for score in all_scores(&board, Player::First) {
            assert_eq!(score, f64::NEG_INFINITY);
        }
        for score in all_scores(&board, Player::Second) {
            assert_eq!(score, f64::INFINITY);
        }
    }

    #[test]
    fn test_mobility_pressure() {
        // 双方各 4 步，已占 3 格：(4 - 3×4) × 3
        let board = Layout::parse("1../.#./..2 1").unwrap();
        assert_eq!(MobilityPressure::default().score(&board, Player::First), -24.0);
        assert_eq!(MobilityPressure::default().score(&board, Player::Second), -24.0);
        assert_eq!(MobilityPressure::new(1.0).score(&board, Player::First), 0.0);
    }

    #[test]
    fn test_central_distance() {
        // 先手在中心，内圈走法距离和为 12；后手唯一的内圈走法 (1,3) 距离为 2
        let board = Layout::parse("...../...../..1../...../2.... 1").unwrap();
        assert_eq!(CentralDistance.score(&board, Player::First), 8.0);
    }

    #[test]
    fn test_game_phase() {
        let empty = Board::new(7, 7).unwrap();
        assert_eq!(GamePhase::of(&empty), GamePhase::Opening);

        let midgame = Layout::parse("1..#/..#./..#./...2").unwrap();
        assert_eq!(GamePhase::of(&midgame), GamePhase::Midgame);

        // 10 格中 7 格空白，恰好 70% 不算开局
        let boundary = Layout::parse("1.#../....2").unwrap();
        assert_eq!(boundary.blank_count(), 7);
        assert_eq!(GamePhase::of(&boundary), GamePhase::Midgame);

        let opening = Layout::parse("1..../....2").unwrap();
        assert_eq!(GamePhase::of(&opening), GamePhase::Opening);

        let endgame = Layout::parse("#1....2#").unwrap();
        assert_eq!(GamePhase::of(&endgame), GamePhase::Endgame);
    }

    #[test]
    fn test_phase_adaptive_opening() {
        // 先手 23 步，后手 14 步
        let board = Layout::parse(
            "2....../......./......./...1.../......./......./....... 1",
        )
        .unwrap();
        assert_eq!(GamePhase::of(&board), GamePhase::Opening);
        assert_eq!(PhaseAdaptive.score(&board, Player::First), -5.0);
    }

    #[test]
    fn test_phase_adaptive_midgame() {
        // 内圈走法：先手 (1,1)，后手没有
        let board = Layout::parse("1..#/..#./..#./...2").unwrap();
        assert_eq!(PhaseAdaptive.score(&board, Player::First), 1.0);
        assert_eq!(PhaseAdaptive.score(&board, Player::Second), -1.0);
    }

    #[test]
    fn test_phase_adaptive_endgame_partition() {
        // 横向切分：中点 x=3
        let board = Layout::parse("#1....2#").unwrap();
        assert_eq!(PhaseAdaptive.score(&board, Player::First), 3.0);
        assert_eq!(PhaseAdaptive.score(&board, Player::Second), 3.0);

        // 同列时纵向切分
        let board = Layout::parse("#/1/././././2/#").unwrap();
        assert_eq!(PhaseAdaptive.score(&board, Player::First), 3.0);
    }

    #[test]
    fn test_baselines() {
        let board = Layout::parse("1../.#./..2 1").unwrap();
        assert_eq!(OpenMove.score(&board, Player::First), 4.0);
        assert_eq!(Improved.score(&board, Player::First), 0.0);
    }

    #[test]
    fn test_heuristic_names() {
        for heuristic in Heuristic::all() {
            assert_eq!(heuristic.name().parse::<Heuristic>().unwrap(), *heuristic);
        }
        assert!(matches!(
            "aggressive".parse::<Heuristic>(),
            Err(ConfigError::UnknownHeuristic(_))
        ));
        assert_eq!(Heuristic::default(), Heuristic::PhaseAdaptive);
    }
}
