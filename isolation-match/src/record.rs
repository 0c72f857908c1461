//! 对局记录
//!
//! JSON 格式，便于回放与统计

use std::path::Path;

use chrono::{DateTime, Utc};
use isolation::{Board, Layout, Move, Player};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::game::{MatchOutcome, Termination};

/// 记录格式版本
pub const RECORD_VERSION: &str = "1.0";

/// 一局的完整记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub version: String,
    /// 开局时间
    pub started_at: DateTime<Utc>,
    /// 先手、后手的显示名称
    pub players: [String; 2],
    /// 开局局面（布局字符串）
    pub start_layout: String,
    pub moves: Vec<Move>,
    pub winner: Player,
    pub termination: Termination,
    /// 对局用时（毫秒）
    pub duration_ms: u64,
}

impl MatchRecord {
    pub fn new(
        started_at: DateTime<Utc>,
        players: [String; 2],
        start: &Board,
        outcome: &MatchOutcome,
    ) -> Self {
        let duration_ms = (Utc::now() - started_at).num_milliseconds().max(0) as u64;
        Self {
            version: RECORD_VERSION.to_string(),
            started_at,
            players,
            start_layout: Layout::to_string(start),
            moves: outcome.moves.clone(),
            winner: outcome.winner,
            termination: outcome.termination,
            duration_ms,
        }
    }

    /// 按记录重放，得到终局棋盘
    pub fn replay(&self) -> Result<Board> {
        let mut board = Layout::parse(&self.start_layout)?;
        for mv in &self.moves {
            board = board.play(*mv)?;
        }
        Ok(board)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 写入文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
