//! 搜索引擎集成测试

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use isolation::{Board, GameState, Layout, Move, Player};
use isolation_ai::{
    Agent, AgentConfig, Evaluator, Heuristic, Improved, Layer, MobilityPressure, SearchMethod,
    SearchWindow, Searcher, TimeGuard, Unlimited,
};

/// 统计调用次数的评估器
struct Counting<E> {
    inner: E,
    calls: Cell<u64>,
}

impl<E> Counting<E> {
    fn new(inner: E) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }
}

impl<S: GameState, E: Evaluator<S>> Evaluator<S> for Counting<E> {
    fn score(&self, state: &S, player: Player) -> f64 {
        self.calls.set(self.calls.get() + 1);
        self.inner.score(state, player)
    }
}

/// 手工构造的博弈树，叶子上直接标注分数
enum Tree {
    Leaf(f64),
    Branch(Vec<Tree>),
    /// 带有静态评估值的内部节点
    Valued(f64, Vec<Tree>),
}

struct Node {
    value: f64,
    children: Vec<usize>,
}

#[derive(Clone)]
struct TreeGame {
    nodes: Rc<Vec<Node>>,
    at: usize,
    ply: u32,
}

impl TreeGame {
    fn new(tree: &Tree) -> Self {
        fn build(tree: &Tree, nodes: &mut Vec<Node>) -> usize {
            let id = nodes.len();
            nodes.push(Node {
                value: 0.0,
                children: Vec::new(),
            });
            match tree {
                Tree::Leaf(value) => nodes[id].value = *value,
                Tree::Branch(children) => {
                    let ids = children.iter().map(|child| build(child, nodes)).collect();
                    nodes[id].children = ids;
                }
                Tree::Valued(value, children) => {
                    let ids = children.iter().map(|child| build(child, nodes)).collect();
                    nodes[id].value = *value;
                    nodes[id].children = ids;
                }
            }
            id
        }

        let mut nodes = Vec::new();
        build(tree, &mut nodes);
        Self {
            nodes: Rc::new(nodes),
            at: 0,
            ply: 0,
        }
    }

    fn node(&self) -> &Node {
        &self.nodes[self.at]
    }
}

impl GameState for TreeGame {
    fn width(&self) -> usize {
        1
    }

    fn height(&self) -> usize {
        1
    }

    fn blank_spaces(&self) -> Vec<Move> {
        Vec::new()
    }

    fn player_location(&self, _player: Player) -> Option<Move> {
        None
    }

    fn active_player(&self) -> Player {
        if self.ply % 2 == 0 {
            Player::First
        } else {
            Player::Second
        }
    }

    fn legal_moves_for(&self, player: Player) -> Vec<Move> {
        if player != self.active_player() {
            return Vec::new();
        }
        (0..self.node().children.len())
            .map(|i| Move::new(i as i32, self.ply as i32))
            .collect()
    }

    fn forecast_move(&self, mv: Move) -> Self {
        Self {
            nodes: Rc::clone(&self.nodes),
            at: self.node().children[mv.x as usize],
            ply: self.ply + 1,
        }
    }
}

/// 返回叶子分数并记录访问顺序
#[derive(Default)]
struct LeafValue {
    seen: RefCell<Vec<f64>>,
}

impl Evaluator<TreeGame> for LeafValue {
    fn score(&self, state: &TreeGame, _player: Player) -> f64 {
        let value = state.node().value;
        self.seen.borrow_mut().push(value);
        value
    }
}

fn leaves(values: &[f64]) -> Tree {
    Tree::Branch(values.iter().map(|v| Tree::Leaf(*v)).collect())
}

/// 根(Max) -> X, Y (Min) -> 各自的 Max 子节点 -> 叶子
fn pruning_tree() -> Tree {
    Tree::Branch(vec![
        Tree::Branch(vec![leaves(&[5.0, 6.0]), leaves(&[7.0, 1.0, 9.0])]),
        Tree::Branch(vec![leaves(&[2.0, 3.0]), leaves(&[10.0, 11.0])]),
    ])
}

#[test]
fn alphabeta_skips_siblings_after_cutoff() {
    let game = TreeGame::new(&pruning_tree());
    let evaluator = LeafValue::default();
    let mut searcher = Searcher::new(&evaluator, TimeGuard::new(&Unlimited, 1.0), Player::First);

    let result = searcher
        .alphabeta(&game, 3, SearchWindow::full(), Layer::Max)
        .unwrap();

    assert_eq!(result.score, 6.0);
    assert_eq!(result.mv, Move::new(0, 0));
    // X 的第二个子节点第一步就得到 7 >= beta(6)，剩下的 1、9 不再评估；Y 在 3 之后被剪掉
    assert_eq!(*evaluator.seen.borrow(), vec![5.0, 6.0, 7.0, 2.0, 3.0]);
    assert_eq!(searcher.stats().cutoffs, 2);
}

#[test]
fn minimax_visits_every_leaf() {
    let game = TreeGame::new(&pruning_tree());
    let evaluator = LeafValue::default();
    let mut searcher = Searcher::new(&evaluator, TimeGuard::new(&Unlimited, 1.0), Player::First);

    let result = searcher.minimax(&game, 3, Layer::Max).unwrap();

    assert_eq!(result.score, 6.0);
    assert_eq!(result.mv, Move::new(0, 0));
    assert_eq!(evaluator.seen.borrow().len(), 9);
}

#[test]
fn pruned_branch_reports_boundary_value() {
    // 该节点的真实值是 0，剪枝时返回的是 beta 边界 1
    let tree = Tree::Branch(vec![leaves(&[4.0]), leaves(&[1.0, 0.0])]);
    let game = TreeGame::new(&tree);
    let evaluator = LeafValue::default();
    let mut searcher = Searcher::new(&evaluator, TimeGuard::new(&Unlimited, 1.0), Player::First);

    let child = game.forecast_move(Move::new(1, 0));
    let result = searcher
        .alphabeta(&child, 1, SearchWindow::new(4.0, f64::INFINITY), Layer::Min)
        .unwrap();

    assert_eq!(result.score, 1.0);
    assert_eq!(result.mv, Move::new(0, 1));
    assert_eq!(*evaluator.seen.borrow(), vec![1.0]);
}

#[test]
fn first_move_wins_ties() {
    let tree = leaves(&[2.0, 2.0, 1.0]);
    let game = TreeGame::new(&tree);
    let evaluator = LeafValue::default();
    let mut searcher = Searcher::new(&evaluator, TimeGuard::new(&Unlimited, 1.0), Player::First);

    let result = searcher.minimax(&game, 1, Layer::Max).unwrap();
    assert_eq!(result.mv, Move::new(0, 0));

    let result = searcher.minimax(&game, 1, Layer::Min).unwrap();
    assert_eq!(result.mv, Move::new(2, 0));
}

#[test]
fn three_by_three_scenario() {
    let board = Layout::parse("1../.#./..2 1").unwrap();

    // 皇后走法：(1,1) 被挡住，越界的格子不算
    assert_eq!(
        board.legal_moves(),
        vec![Move::new(1, 0), Move::new(2, 0), Move::new(0, 1), Move::new(0, 2)]
    );

    // 直接展开两层求期望值
    let evaluator = MobilityPressure::default();
    let mut expected = (f64::NEG_INFINITY, board.legal_moves()[0]);
    for mv in board.legal_moves() {
        let child = board.forecast_move(mv);
        let replies = child.legal_moves();
        let value = if replies.is_empty() {
            evaluator.score(&child, Player::First)
        } else {
            replies
                .iter()
                .map(|reply| evaluator.score(&child.forecast_move(*reply), Player::First))
                .fold(f64::INFINITY, f64::min)
        };
        if value > expected.0 {
            expected = (value, mv);
        }
    }

    let config =
        AgentConfig::new(SearchMethod::Minimax, Heuristic::MobilityPressure).fixed_depth(2);
    let mut agent = Agent::new(config).unwrap();
    let mv = agent.get_move(&board, &Unlimited);
    assert_eq!(mv, expected.1);
    assert_eq!(agent.last_report().unwrap().score, Some(expected.0));

    let config =
        AgentConfig::new(SearchMethod::AlphaBeta, Heuristic::MobilityPressure).fixed_depth(2);
    let mut agent = Agent::new(config).unwrap();
    assert_eq!(agent.get_move(&board, &Unlimited), expected.1);
}

#[test]
fn minimax_and_alphabeta_agree_on_small_boards() {
    let layouts = [
        "1../.#./..2 1",
        "1.../.#../...2 1",
        "..../.1#./.2../.... 2",
        "1.#../...../..#../...2. 1",
    ];

    for layout in layouts {
        let board = Layout::parse(layout).unwrap();
        for depth in 1..=2 {
            let minimax_eval = Counting::new(Improved);
            let mut minimax = Searcher::new(
                &minimax_eval,
                TimeGuard::new(&Unlimited, 1.0),
                board.active_player(),
            );
            let expected = minimax.minimax(&board, depth, Layer::Max).unwrap();

            let alphabeta_eval = Counting::new(Improved);
            let mut alphabeta = Searcher::new(
                &alphabeta_eval,
                TimeGuard::new(&Unlimited, 1.0),
                board.active_player(),
            );
            let result = alphabeta
                .alphabeta(&board, depth, SearchWindow::full(), Layer::Max)
                .unwrap();

            assert_eq!(result.mv, expected.mv, "layout {} depth {}", layout, depth);
            assert_eq!(result.score, expected.score, "layout {} depth {}", layout, depth);
            if alphabeta.stats().cutoffs == 0 {
                assert_eq!(alphabeta_eval.calls.get(), minimax_eval.calls.get());
            } else {
                assert!(alphabeta_eval.calls.get() <= minimax_eval.calls.get());
            }
        }
    }
}

#[test]
fn iterative_deepening_converges_to_exhaustive_search() {
    let board = Layout::parse("1.#./.#../...2 1").unwrap();
    let exhaustive = board.blank_count() as u32;

    let config = AgentConfig::new(SearchMethod::Minimax, Heuristic::Improved);
    let mut iterative = Agent::new(config).unwrap();
    let mv = iterative.get_move(&board, &Unlimited);
    let depth_reached = iterative.last_report().unwrap().depth_reached;
    assert!(depth_reached >= 1 && depth_reached <= exhaustive);

    for method in [SearchMethod::Minimax, SearchMethod::AlphaBeta] {
        let config = AgentConfig::new(method, Heuristic::Improved).fixed_depth(exhaustive);
        let mut agent = Agent::new(config).unwrap();
        assert_eq!(agent.get_move(&board, &Unlimited), mv, "{}", method);
    }
}

#[test]
fn iterative_deepening_stops_when_tree_is_exhausted() {
    // blank_spaces() 恒为空，加深多少层只由博弈树本身决定。
    // 深度 1 时 X(10) 看起来更好，深度 2 才看到 X 之后只剩 0 分
    let tree = Tree::Valued(
        0.0,
        vec![
            Tree::Valued(10.0, vec![Tree::Leaf(0.0)]),
            Tree::Valued(1.0, vec![Tree::Leaf(5.0)]),
        ],
    );
    let game = TreeGame::new(&tree);
    assert!(game.blank_spaces().is_empty());

    for method in [SearchMethod::Minimax, SearchMethod::AlphaBeta] {
        let evaluator = LeafValue::default();
        let mut agent = Agent::new(AgentConfig::new(method, Heuristic::Improved)).unwrap();

        let mv = agent.search_with(&game, &evaluator, &Unlimited);
        assert_eq!(mv, Move::new(1, 0), "{}", method);

        let report = agent.last_report().unwrap();
        assert!(!report.cancelled);
        assert_eq!(report.depth_reached, 2, "{}", method);
        assert_eq!(report.score, Some(5.0), "{}", method);
    }
}

#[test]
fn zero_legal_moves_skips_search() {
    let board = Layout::parse("#1#/###/.2. 1").unwrap();
    assert!(board.legal_moves().is_empty());

    let evaluator = Counting::new(Improved);
    let mut agent = Agent::new(AgentConfig::default()).unwrap();

    assert_eq!(agent.search_with(&board, &evaluator, &Unlimited), Move::NONE);
    assert_eq!(evaluator.calls.get(), 0);
    assert_eq!(agent.last_report().unwrap().stats.nodes, 0);
}

#[test]
fn cancellation_on_first_frame_yields_no_move() {
    let board = Board::new(4, 4).unwrap();
    let evaluator = Counting::new(Improved);

    for method in [SearchMethod::Minimax, SearchMethod::AlphaBeta] {
        let mut agent = Agent::new(AgentConfig::new(method, Heuristic::Improved)).unwrap();
        let mv = agent.search_with(&board, &evaluator, &|| 3.0);

        assert_eq!(mv, Move::NONE);
        let report = agent.last_report().unwrap();
        assert!(report.cancelled);
        assert_eq!(report.stats.nodes, 0);
    }
    assert_eq!(evaluator.calls.get(), 0);
}

#[test]
fn cancellation_mid_search_keeps_previous_depth() {
    let board = Layout::parse("1.../..../..#./...2 1").unwrap();
    let nodes = Cell::new(0u32);
    let budget = || {
        nodes.set(nodes.get() + 1);
        if nodes.get() > 500 {
            -1.0
        } else {
            50.0
        }
    };

    let config = AgentConfig::new(SearchMethod::Minimax, Heuristic::PhaseAdaptive);
    let mut agent = Agent::new(config).unwrap();
    let mv = agent.get_move(&board, &budget);
    let report = *agent.last_report().unwrap();

    assert!(report.cancelled);
    assert!(report.depth_reached >= 1);
    assert!(board.legal_moves().contains(&mv));
}
