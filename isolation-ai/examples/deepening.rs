//! 迭代加深过程演示
//!
//! 运行方式:
//! ```bash
//! cargo run -p isolation-ai --example deepening -- "1..../...../..#../...../....2 1" 200
//! ```

use isolation::{Board, Layout};
use isolation_ai::{Agent, AgentConfig, Deadline, Heuristic, SearchMethod};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 每完成一层都会输出 debug 日志
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut args = std::env::args().skip(1);
    let board = match args.next() {
        Some(layout) => Layout::parse(&layout)?,
        None => Board::default(),
    };
    let limit_ms: u64 = match args.next() {
        Some(ms) => ms.parse()?,
        None => 150,
    };

    println!("{}", board);

    for method in [SearchMethod::Minimax, SearchMethod::AlphaBeta] {
        let mut agent = Agent::new(AgentConfig::new(method, Heuristic::PhaseAdaptive))?;
        let mv = agent.get_move(&board, &Deadline::after_ms(limit_ms));

        if let Some(report) = agent.last_report() {
            println!(
                "{:<10} move {} score {:?} depth {} nodes {} cutoffs {}",
                method.name(),
                mv,
                report.score,
                report.depth_reached,
                report.stats.nodes,
                report.stats.cutoffs
            );
        }
    }

    Ok(())
}
