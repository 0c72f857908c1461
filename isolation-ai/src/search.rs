//! 搜索引擎
//!
//! 实现 Minimax 与 Alpha-Beta 剪枝。每层递归都返回
//! `Result<SearchResult, Cancelled>`，超时通过 `?` 逐层向上传递。

use isolation::{GameState, Move, Player};

use crate::evaluate::Evaluator;
use crate::timer::{Cancelled, TimeBudget, TimeGuard};

/// 单次搜索结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// 分数（以根节点玩家视角）
    pub score: f64,
    /// 该层选择的走法，叶子节点为 `Move::NONE`
    pub mv: Move,
}

impl SearchResult {
    pub fn new(score: f64, mv: Move) -> Self {
        Self { score, mv }
    }
}

/// 极大层 / 极小层
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Max,
    Min,
}

impl Layer {
    /// 下一层
    pub fn flip(self) -> Layer {
        match self {
            Layer::Max => Layer::Min,
            Layer::Min => Layer::Max,
        }
    }

    /// 本层的初始最差分数
    fn worst(self) -> f64 {
        match self {
            Layer::Max => f64::NEG_INFINITY,
            Layer::Min => f64::INFINITY,
        }
    }

    /// `score` 是否严格优于 `current`
    fn prefers(self, score: f64, current: f64) -> bool {
        match self {
            Layer::Max => score > current,
            Layer::Min => score < current,
        }
    }
}

/// Alpha-Beta 窗口
///
/// 按值向下传递，只会收窄不会放宽
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchWindow {
    pub alpha: f64,
    pub beta: f64,
}

impl SearchWindow {
    /// 完整窗口 (-inf, +inf)
    pub fn full() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// 用本层目前的最优值收窄窗口
    fn narrow(&mut self, layer: Layer, best: f64) {
        match layer {
            Layer::Max => self.alpha = self.alpha.max(best),
            Layer::Min => self.beta = self.beta.min(best),
        }
    }

    /// 窗口已闭合，剩余走法可以剪掉
    fn is_closed(&self) -> bool {
        self.beta <= self.alpha
    }

    /// 本层一侧的边界值
    fn bound(&self, layer: Layer) -> f64 {
        match layer {
            Layer::Max => self.alpha,
            Layer::Min => self.beta,
        }
    }
}

impl Default for SearchWindow {
    fn default() -> Self {
        Self::full()
    }
}

/// 搜索统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// 进入的节点数
    pub nodes: u64,
    /// 评估函数调用次数
    pub evaluations: u64,
    /// 剪枝次数
    pub cutoffs: u64,
    /// 在深度限制处截断的未终局叶子数
    pub horizon_leaves: u64,
}

/// 对走法序列折叠时的累积值
///
/// 初始走法取序列中的第一个，保证只要存在合法走法，返回的走法就一定合法
#[derive(Debug, Clone, Copy)]
struct Best {
    score: f64,
    mv: Move,
}

impl Best {
    fn start(layer: Layer, first: Move) -> Self {
        Self {
            score: layer.worst(),
            mv: first,
        }
    }

    /// 严格更优才替换，分数相同时保留先出现的走法
    fn offer(&mut self, layer: Layer, score: f64, mv: Move) {
        if layer.prefers(score, self.score) {
            self.score = score;
            self.mv = mv;
        }
    }

    fn into_result(self) -> SearchResult {
        SearchResult::new(self.score, self.mv)
    }
}

/// 深度受限搜索器
///
/// 评估始终以 `root` 的视角进行，不随层数翻转
pub struct Searcher<'a, E, T: ?Sized> {
    evaluator: &'a E,
    guard: TimeGuard<'a, T>,
    root: Player,
    stats: SearchStats,
}

impl<'a, E, T: TimeBudget + ?Sized> Searcher<'a, E, T> {
    pub fn new(evaluator: &'a E, guard: TimeGuard<'a, T>, root: Player) -> Self {
        Self {
            evaluator,
            guard,
            root,
            stats: SearchStats::default(),
        }
    }

    /// 根节点玩家
    pub fn root(&self) -> Player {
        self.root
    }

    /// 累计统计
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// 进入节点：检查超时，判断是否为叶子
    ///
    /// 返回 `Ok(Some(_))` 表示叶子节点的评估结果，`Ok(None)` 表示需要继续展开
    fn enter<S>(&mut self, state: &S, depth: u32) -> Result<Option<SearchResult>, Cancelled>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.guard.check()?;
        self.stats.nodes += 1;

        let decided = state.utility(self.root).is_infinite();
        if depth == 0 || decided {
            if !decided {
                self.stats.horizon_leaves += 1;
            }
            self.stats.evaluations += 1;
            let score = self.evaluator.score(state, self.root);
            return Ok(Some(SearchResult::new(score, Move::NONE)));
        }
        Ok(None)
    }

    /// Minimax 搜索
    pub fn minimax<S>(
        &mut self,
        state: &S,
        depth: u32,
        layer: Layer,
    ) -> Result<SearchResult, Cancelled>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        if let Some(leaf) = self.enter(state, depth)? {
            return Ok(leaf);
        }

        let moves = state.legal_moves();
        let Some(&first) = moves.first() else {
            return Ok(SearchResult::new(layer.worst(), Move::NONE));
        };

        let mut best = Best::start(layer, first);
        for mv in moves {
            let child = state.forecast_move(mv);
            let result = self.minimax(&child, depth - 1, layer.flip())?;
            best.offer(layer, result.score, mv);
        }

        Ok(best.into_result())
    }

    /// Alpha-Beta 搜索
    ///
    /// 剪枝时本层返回的是窗口边界（极大层为 alpha，极小层为 beta）以及触发剪枝的走法，
    /// 而不是被剪分支的真实分数。剪枝路径上的分数只是一个界，不是精确的 minimax 值。
    pub fn alphabeta<S>(
        &mut self,
        state: &S,
        depth: u32,
        mut window: SearchWindow,
        layer: Layer,
    ) -> Result<SearchResult, Cancelled>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        if let Some(leaf) = self.enter(state, depth)? {
            return Ok(leaf);
        }

        let moves = state.legal_moves();
        let Some(&first) = moves.first() else {
            return Ok(SearchResult::new(layer.worst(), Move::NONE));
        };

        let mut best = Best::start(layer, first);
        for mv in moves {
            let child = state.forecast_move(mv);
            let result = self.alphabeta(&child, depth - 1, window, layer.flip())?;
            best.offer(layer, result.score, mv);

            window.narrow(layer, best.score);
            if window.is_closed() {
                self.stats.cutoffs += 1;
                best = Best {
                    score: window.bound(layer),
                    mv,
                };
                break;
            }
        }

        Ok(best.into_result())
    }
}
