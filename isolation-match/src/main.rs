use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use isolation::{Board, Layout, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_TURN_TIME_MS};
use isolation_match::{play_match, ContestantSpec, MatchRecord, Tournament};
use tokio::runtime::Runtime;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "isolation-match", about = "Isolation 对局与循环赛")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 下一局
    Play(PlayArgs),
    /// 循环赛
    Tournament(TournamentArgs),
}

#[derive(Args)]
struct PlayArgs {
    /// 先手：`random`、`方法:评估函数[:深度]` 或配置文件路径
    #[arg(long, default_value = "minimax:phase-adaptive")]
    p1: ContestantSpec,

    /// 后手
    #[arg(long, default_value = "random")]
    p2: ContestantSpec,

    #[arg(long, default_value_t = DEFAULT_BOARD_WIDTH)]
    width: usize,

    #[arg(long, default_value_t = DEFAULT_BOARD_HEIGHT)]
    height: usize,

    /// 开局布局，给出时忽略宽高
    #[arg(long)]
    layout: Option<String>,

    /// 每步时限（毫秒）
    #[arg(long, default_value_t = DEFAULT_TURN_TIME_MS)]
    time_limit: u64,

    /// 对局记录输出路径
    #[arg(long)]
    record: Option<PathBuf>,

    /// 随机走子的种子
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Args)]
struct TournamentArgs {
    /// 参赛 AI
    agent: ContestantSpec,

    /// 对手列表
    #[arg(long = "opponent", short = 'o', required = true)]
    opponents: Vec<ContestantSpec>,

    /// 每个对手的轮数（每轮交换先后手各一局）
    #[arg(long, short = 'r', default_value_t = 5)]
    rounds: u32,

    #[arg(long, default_value_t = DEFAULT_BOARD_WIDTH)]
    width: usize,

    #[arg(long, default_value_t = DEFAULT_BOARD_HEIGHT)]
    height: usize,

    #[arg(long, default_value_t = DEFAULT_TURN_TIME_MS)]
    time_limit: u64,

    #[arg(long, default_value_t = 0)]
    seed: u64,
}

/// 退出时等待计算线程的时间
///
/// 超出硬超时的计算线程仍在阻塞线程池里运行，退出时不能无限等待
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("isolation_match=info".parse()?))
        .init();

    let cli = Cli::parse();
    let runtime = Runtime::new()?;
    let result = runtime.block_on(async move {
        match cli.command {
            Command::Play(args) => play(args).await,
            Command::Tournament(args) => tournament(args).await,
        }
    });
    shutdown(runtime);
    result
}

fn shutdown(runtime: Runtime) {
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
}

async fn play(args: PlayArgs) -> Result<()> {
    let board = match &args.layout {
        Some(layout) => Layout::parse(layout)?,
        None => Board::new(args.width, args.height)?,
    };
    let players = [args.p1.label().to_string(), args.p2.label().to_string()];
    let contestants = [args.p1.build(args.seed)?, args.p2.build(args.seed.wrapping_add(1))?];

    info!(p1 = %players[0], p2 = %players[1], "match starting");
    let started_at = Utc::now();
    let turn_time = Duration::from_millis(args.time_limit);
    let outcome = play_match(board.clone(), contestants, turn_time).await;

    println!("{}", outcome.final_board);
    println!(
        "{} ({}) wins: {:?} after {} moves",
        outcome.winner,
        players[outcome.winner.index()],
        outcome.termination,
        outcome.moves.len()
    );

    if let Some(path) = &args.record {
        MatchRecord::new(started_at, players, &board, &outcome).save(path)?;
        info!(path = %path.display(), "record saved");
    }
    Ok(())
}

async fn tournament(args: TournamentArgs) -> Result<()> {
    let tournament = Tournament {
        rounds: args.rounds,
        turn_time: Duration::from_millis(args.time_limit),
        width: args.width,
        height: args.height,
        seed: args.seed,
    };

    let report = tournament.run(&args.agent, &args.opponents).await?;
    println!("{}", report);
    Ok(())
}
