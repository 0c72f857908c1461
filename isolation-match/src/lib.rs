//! Isolation 对局驱动
//!
//! 包含:
//! - 参赛者（AI / 随机）
//! - 单局对弈与计时判负
//! - 对局记录（JSON）
//! - 循环赛

mod contestant;
mod error;
mod game;
mod record;
mod tournament;

pub use contestant::{Contestant, ContestantSpec};
pub use error::{MatchError, Result};
pub use game::{play_match, MatchOutcome, Termination};
pub use record::MatchRecord;
pub use tournament::{OpponentResult, Tournament, TournamentReport};
