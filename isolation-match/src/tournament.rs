//! 循环赛
//!
//! 每一轮先随机放置双方，然后在同一开局上交换先后手各下一局。

use std::fmt;
use std::time::Duration;

use isolation::{
    Board, GameState, Player, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_TURN_TIME_MS,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::contestant::ContestantSpec;
use crate::error::{MatchError, Result};
use crate::game::play_match;

/// 对某个对手的战绩
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpponentResult {
    pub opponent: String,
    pub wins: u32,
    pub losses: u32,
}

impl OpponentResult {
    pub fn games(&self) -> u32 {
        self.wins + self.losses
    }

    /// 胜率百分比
    pub fn win_rate(&self) -> f64 {
        if self.games() == 0 {
            0.0
        } else {
            self.wins as f64 * 100.0 / self.games() as f64
        }
    }
}

/// 循环赛结果
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentReport {
    pub agent: String,
    pub results: Vec<OpponentResult>,
}

impl TournamentReport {
    /// 总胜率百分比
    pub fn win_rate(&self) -> f64 {
        let wins: u32 = self.results.iter().map(|r| r.wins).sum();
        let games: u32 = self.results.iter().map(|r| r.games()).sum();
        if games == 0 {
            0.0
        } else {
            wins as f64 * 100.0 / games as f64
        }
    }
}

impl fmt::Display for TournamentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.agent)?;
        for result in &self.results {
            writeln!(
                f,
                "  vs {:<32} {:>3} - {:<3} ({:.1}%)",
                result.opponent,
                result.wins,
                result.losses,
                result.win_rate()
            )?;
        }
        write!(f, "  win rate: {:.1}%", self.win_rate())
    }
}

/// 循环赛设置
#[derive(Debug, Clone)]
pub struct Tournament {
    /// 每个对手的轮数（每轮两局）
    pub rounds: u32,
    /// 每步时限
    pub turn_time: Duration,
    pub width: usize,
    pub height: usize,
    /// 随机开局与随机走子的种子
    pub seed: u64,
}

impl Default for Tournament {
    fn default() -> Self {
        Self {
            rounds: 5,
            turn_time: Duration::from_millis(DEFAULT_TURN_TIME_MS),
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            seed: 0,
        }
    }
}

impl Tournament {
    /// `agent` 依次与每个对手比赛
    pub async fn run(
        &self,
        agent: &ContestantSpec,
        opponents: &[ContestantSpec],
    ) -> Result<TournamentReport> {
        if opponents.is_empty() {
            return Err(MatchError::NoOpponents);
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut results = Vec::with_capacity(opponents.len());

        for opponent in opponents {
            let mut result = OpponentResult {
                opponent: opponent.label().to_string(),
                wins: 0,
                losses: 0,
            };

            for round in 0..self.rounds {
                let opening = self.random_opening(&mut rng)?;

                for agent_seat in [Player::First, Player::Second] {
                    let me = agent.build(rng.gen())?;
                    let them = opponent.build(rng.gen())?;
                    let contestants = match agent_seat {
                        Player::First => [me, them],
                        Player::Second => [them, me],
                    };

                    let outcome = play_match(opening.clone(), contestants, self.turn_time).await;
                    if outcome.winner == agent_seat {
                        result.wins += 1;
                    } else {
                        result.losses += 1;
                    }
                    info!(
                        round,
                        opponent = opponent.label(),
                        seat = %agent_seat,
                        won = outcome.winner == agent_seat,
                        termination = ?outcome.termination,
                        "game finished"
                    );
                }
            }

            results.push(result);
        }

        Ok(TournamentReport {
            agent: agent.label().to_string(),
            results,
        })
    }

    /// 空棋盘上随机放置双方
    fn random_opening(&self, rng: &mut ChaCha8Rng) -> Result<Board> {
        let mut board = Board::new(self.width, self.height)?;
        for _ in 0..2 {
            let Some(mv) = board.legal_moves().choose(rng).copied() else {
                break;
            };
            board = board.play(mv)?;
        }
        Ok(board)
    }
}
