//! 单局对弈
//!
//! 每一步都在阻塞线程池中计算，超过每步时限即判负

use std::time::{Duration, Instant};

use isolation::{Board, GameState, Move, Player};
use isolation_ai::Deadline;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::contestant::Contestant;

/// 超出时限后额外等待计算线程返回的时间
const HARD_TIMEOUT_GRACE: Duration = Duration::from_millis(500);

/// 终局原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// 负方无棋可走
    NoLegalMoves,
    /// 负方超时
    Timeout,
    /// 负方走了非法的棋（包括有棋可走时返回 `Move::NONE`）
    IllegalMove,
    /// 负方计算线程异常退出
    Forfeit,
}

/// 对局结果
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// 胜者
    pub winner: Player,
    /// 终局原因
    pub termination: Termination,
    /// 每一步的走法
    pub moves: Vec<Move>,
    /// 终局棋盘
    pub final_board: Board,
}

impl MatchOutcome {
    pub fn loser(&self) -> Player {
        self.winner.opponent()
    }
}

/// 下一局：先手 `contestants[0]`，后手 `contestants[1]`
///
/// 棋盘上的走子方决定谁先走。
pub async fn play_match(
    board: Board,
    contestants: [Contestant; 2],
    turn_time: Duration,
) -> MatchOutcome {
    let [first, second] = contestants;
    let mut seats = [Some(first), Some(second)];
    let mut board = board;
    let mut moves = Vec::new();

    loop {
        let active = board.active_player();
        if board.legal_moves().is_empty() {
            info!(winner = %active.opponent(), moves = moves.len(), "no legal moves left");
            return finish(active.opponent(), Termination::NoLegalMoves, moves, board);
        }

        let seat = active.index();
        let Some(mut contestant) = seats[seat].take() else {
            return finish(active.opponent(), Termination::Forfeit, moves, board);
        };

        // 硬超时后计算线程不会被中止，只是不再等待它
        let snapshot = board.clone();
        let task = tokio::task::spawn_blocking(move || {
            let started = Instant::now();
            let deadline = Deadline::at(started + turn_time);
            let mv = contestant.choose(&snapshot, &deadline);
            (contestant, mv, started.elapsed())
        });

        let (contestant, mv, elapsed) =
            match tokio::time::timeout(turn_time + HARD_TIMEOUT_GRACE, task).await {
                Ok(Ok(result)) => result,
                Ok(Err(e)) => {
                    warn!(%active, error = %e, "contestant worker failed");
                    return finish(active.opponent(), Termination::Forfeit, moves, board);
                }
                Err(_) => {
                    warn!(%active, "contestant did not return");
                    return finish(active.opponent(), Termination::Timeout, moves, board);
                }
            };

        if elapsed > turn_time {
            warn!(
                %active,
                label = contestant.label(),
                elapsed_ms = elapsed.as_millis() as u64,
                "turn time exceeded"
            );
            return finish(active.opponent(), Termination::Timeout, moves, board);
        }

        match board.play(mv) {
            Ok(next) => {
                debug!(%active, %mv, elapsed_ms = elapsed.as_millis() as u64, "move played");
                moves.push(mv);
                board = next;
                seats[seat] = Some(contestant);
            }
            Err(e) => {
                warn!(%active, %mv, error = %e, "illegal move");
                return finish(active.opponent(), Termination::IllegalMove, moves, board);
            }
        }
    }
}

fn finish(
    winner: Player,
    termination: Termination,
    moves: Vec<Move>,
    final_board: Board,
) -> MatchOutcome {
    MatchOutcome {
        winner,
        termination,
        moves,
        final_board,
    }
}
