//! 参赛者

use std::path::Path;
use std::str::FromStr;

use isolation::{Board, GameState, Move};
use isolation_ai::{Agent, AgentConfig, Heuristic, SearchMethod, TimeBudget};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::{MatchError, Result};

/// 参赛者描述
///
/// 支持三种写法：
/// - `random`：随机走子
/// - `方法:评估函数[:深度]`，如 `alphabeta:phase-adaptive`，给出深度时为固定深度搜索
/// - AI 配置 JSON 文件路径
#[derive(Debug, Clone, PartialEq)]
pub enum ContestantSpec {
    Random,
    Agent { label: String, config: AgentConfig },
}

impl ContestantSpec {
    /// 显示名称
    pub fn label(&self) -> &str {
        match self {
            ContestantSpec::Random => "random",
            ContestantSpec::Agent { label, .. } => label,
        }
    }

    /// 创建参赛者，`seed` 只用于随机走子
    pub fn build(&self, seed: u64) -> Result<Contestant> {
        match self {
            ContestantSpec::Random => Ok(Contestant::Random {
                rng: ChaCha8Rng::seed_from_u64(seed),
            }),
            ContestantSpec::Agent { label, config } => Ok(Contestant::Agent {
                label: label.clone(),
                agent: Agent::new(config.clone())?,
            }),
        }
    }

    fn parse_inline(spec: &str) -> Result<AgentConfig> {
        let parts: Vec<&str> = spec.split(':').collect();
        if parts.len() > 3 {
            return Err(MatchError::InvalidSpec(spec.to_string()));
        }

        let method: SearchMethod = parts[0].parse()?;
        let heuristic: Heuristic = parts[1].parse()?;
        let mut config = AgentConfig::new(method, heuristic);

        if let Some(depth) = parts.get(2) {
            let depth: u32 = depth
                .parse()
                .map_err(|_| MatchError::InvalidSpec(format!("bad depth in {}", spec)))?;
            config = config.fixed_depth(depth);
        }

        config.validate()?;
        Ok(config)
    }
}

impl FromStr for ContestantSpec {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "random" {
            return Ok(ContestantSpec::Random);
        }

        let config = if s.contains(':') {
            Self::parse_inline(s)?
        } else if Path::new(s).is_file() {
            AgentConfig::load(s)?
        } else {
            return Err(MatchError::InvalidSpec(s.to_string()));
        };

        Ok(ContestantSpec::Agent {
            label: s.to_string(),
            config,
        })
    }
}

/// 参赛者
pub enum Contestant {
    /// 搜索 AI
    Agent { label: String, agent: Agent },
    /// 随机走子
    Random { rng: ChaCha8Rng },
}

impl Contestant {
    /// 显示名称
    pub fn label(&self) -> &str {
        match self {
            Contestant::Agent { label, .. } => label,
            Contestant::Random { .. } => "random",
        }
    }

    /// 选择走法，没有合法走法时返回 `Move::NONE`
    pub fn choose<T>(&mut self, board: &Board, time_left: &T) -> Move
    where
        T: TimeBudget + ?Sized,
    {
        match self {
            Contestant::Agent { agent, .. } => agent.get_move(board, time_left),
            Contestant::Random { rng } => board
                .legal_moves()
                .choose(rng)
                .copied()
                .unwrap_or(Move::NONE),
        }
    }
}
