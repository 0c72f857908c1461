//! AI 玩家
//!
//! 迭代加深驱动：从深度 1 开始逐层加深，直到时间耗尽，
//! 或者某一层没有碰到深度限制（整棵树已经搜完）。
//! 只有完整跑完的深度才会更新候选走法。

use isolation::{GameState, Move};
use tracing::{debug, trace};

use crate::config::{AgentConfig, SearchMethod};
use crate::error::ConfigError;
use crate::evaluate::{
    CentralDistance, Evaluator, Heuristic, Improved, MobilityPressure, OpenMove, PhaseAdaptive,
};
use crate::search::{Layer, SearchResult, SearchStats, SearchWindow, Searcher};
use crate::timer::{Cancelled, TimeBudget, TimeGuard};

/// 最近一次走棋的搜索报告
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchReport {
    /// 返回的走法
    pub mv: Move,
    /// 该走法对应的分数（没有完成任何深度时为 None）
    pub score: Option<f64>,
    /// 最深的完整搜索深度
    pub depth_reached: u32,
    /// 是否因超时中止
    pub cancelled: bool,
    /// 搜索统计
    pub stats: SearchStats,
}

/// AI 玩家
pub struct Agent {
    config: AgentConfig,
    last_report: Option<SearchReport>,
}

impl Agent {
    /// 创建 AI 玩家，配置错误时直接拒绝
    pub fn new(config: AgentConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            last_report: None,
        })
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// 最近一次 [`Agent::get_move`] 的搜索报告
    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }

    /// 选择走法
    ///
    /// 返回合法走法之一；没有合法走法，或固定深度搜索被超时打断时返回 `Move::NONE`。
    pub fn get_move<S, T>(&mut self, state: &S, time_left: &T) -> Move
    where
        S: GameState,
        T: TimeBudget + ?Sized,
    {
        // 评估函数在这里选定一次，之后的递归都是静态分发
        match self.config.heuristic {
            Heuristic::MobilityPressure => {
                let evaluator = MobilityPressure::new(self.config.pressure_weight);
                self.search_with(state, &evaluator, time_left)
            }
            Heuristic::CentralDistance => self.search_with(state, &CentralDistance, time_left),
            Heuristic::PhaseAdaptive => self.search_with(state, &PhaseAdaptive, time_left),
            Heuristic::OpenMove => self.search_with(state, &OpenMove, time_left),
            Heuristic::Improved => self.search_with(state, &Improved, time_left),
        }
    }

    /// 使用指定的评估函数选择走法
    pub fn search_with<S, E, T>(&mut self, state: &S, evaluator: &E, time_left: &T) -> Move
    where
        S: GameState,
        E: Evaluator<S>,
        T: TimeBudget + ?Sized,
    {
        let mut report = SearchReport {
            mv: Move::NONE,
            score: None,
            depth_reached: 0,
            cancelled: false,
            stats: SearchStats::default(),
        };

        if state.legal_moves().is_empty() {
            debug!("no legal moves");
            self.last_report = Some(report);
            return Move::NONE;
        }

        let guard = TimeGuard::new(time_left, self.config.timer_threshold_ms);
        let mut searcher = Searcher::new(evaluator, guard, state.active_player());

        if self.config.iterative {
            for depth in 1.. {
                let horizon = searcher.stats().horizon_leaves;
                match self.search_depth(&mut searcher, state, depth) {
                    Ok(result) => {
                        report.mv = result.mv;
                        report.score = Some(result.score);
                        report.depth_reached = depth;
                        debug!(
                            depth,
                            score = result.score,
                            mv = %result.mv,
                            nodes = searcher.stats().nodes,
                            "depth completed"
                        );
                        // 每条分支都在深度限制之前终局，再加深结果不变
                        if searcher.stats().horizon_leaves == horizon {
                            debug!(depth, "game tree exhausted");
                            break;
                        }
                    }
                    Err(Cancelled) => {
                        trace!(depth, "search cancelled");
                        report.cancelled = true;
                        break;
                    }
                }
            }
        } else {
            let depth = self.config.search_depth;
            match self.search_depth(&mut searcher, state, depth) {
                Ok(result) => {
                    report.mv = result.mv;
                    report.score = Some(result.score);
                    report.depth_reached = depth;
                }
                Err(Cancelled) => {
                    debug!(depth, "fixed-depth search cancelled, no move available");
                    report.cancelled = true;
                }
            }
        }

        report.stats = searcher.stats();
        self.last_report = Some(report);
        report.mv
    }

    /// 以配置的方法搜索一个深度
    fn search_depth<S, E, T>(
        &self,
        searcher: &mut Searcher<'_, E, T>,
        state: &S,
        depth: u32,
    ) -> Result<SearchResult, Cancelled>
    where
        S: GameState,
        E: Evaluator<S>,
        T: TimeBudget + ?Sized,
    {
        match self.config.method {
            SearchMethod::Minimax => searcher.minimax(state, depth, Layer::Max),
            SearchMethod::AlphaBeta => {
                searcher.alphabeta(state, depth, SearchWindow::full(), Layer::Max)
            }
        }
    }
}
