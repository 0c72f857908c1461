//! Isolation AI 引擎
//!
//! 包含:
//! - 局面评估函数（可替换的启发式策略）
//! - Minimax / Alpha-Beta 搜索
//! - 迭代加深
//! - 超时取消协议

mod agent;
mod config;
mod error;
mod evaluate;
mod search;
mod timer;

pub use agent::{Agent, SearchReport};
pub use config::{AgentConfig, SearchMethod};
pub use error::ConfigError;
pub use evaluate::{
    CentralDistance, Evaluator, GamePhase, Heuristic, Improved, MobilityPressure, OpenMove,
    PhaseAdaptive,
};
pub use search::{Layer, SearchResult, SearchStats, SearchWindow, Searcher};
pub use timer::{Cancelled, Deadline, TimeBudget, TimeGuard, Unlimited};
