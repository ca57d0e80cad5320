use anyhow::Context;
use botpulse_charts::{CanvasSurface, ChartStyle, TerminalSurface};
use botpulse_redis::MetricsStore;
use botpulse_shared_models::{InteractionType, ResponseType};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dashboard::{Dashboard, DashboardConfig, DashboardError};
use dotenv::dotenv;
use server::ServerState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
mod dashboard;
mod server;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    render: RenderArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the current stats and draw the dashboard charts (default)
    Render(RenderArgs),
    /// Count one handled interaction in the metrics store
    Record {
        #[arg(long, value_enum)]
        interaction: InteractionArg,

        #[arg(long, value_enum)]
        response: ResponseArg,

        #[command(flatten)]
        store: StoreArgs,
    },
    /// Print the stored metrics snapshot as JSON
    Show(StoreArgs),
    /// Serve the stored metrics on /api/stats and the dashboard page on /
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
struct StoreArgs {
    #[arg(long, env = "REDIS_URL", default_value = botpulse_redis::DEFAULT_REDIS_URL)]
    redis_url: String,
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1:5000")]
    bind: SocketAddr,

    #[command(flatten)]
    store: StoreArgs,

    #[arg(long, default_value = dashboard::ACTIVITY_SURFACE)]
    activity_id: String,

    #[arg(long, default_value = dashboard::RESPONSE_SURFACE)]
    response_id: String,

    #[arg(long, default_value = "Bot Dashboard")]
    title: String,

    /// Let the activity chart's y axis start at the smallest value
    #[arg(long)]
    no_begin_at_zero: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Base URL of the service exposing /api/stats
    #[arg(long, env = "STATS_ENDPOINT", default_value = dashboard::DEFAULT_ENDPOINT)]
    endpoint: String,

    #[arg(long, value_enum, default_value_t = Output::Html)]
    output: Output,

    /// Where the HTML page is written
    #[arg(long, default_value = "dashboard.html")]
    out: PathBuf,

    #[arg(long, default_value = dashboard::ACTIVITY_SURFACE)]
    activity_id: String,

    #[arg(long, default_value = dashboard::RESPONSE_SURFACE)]
    response_id: String,

    #[arg(long, default_value = "Bot Dashboard")]
    title: String,

    /// Let the activity chart's y axis start at the smallest value
    #[arg(long)]
    no_begin_at_zero: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Output {
    Html,
    Terminal,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum InteractionArg {
    Post,
    Reply,
    Mention,
}

impl From<InteractionArg> for InteractionType {
    fn from(arg: InteractionArg) -> Self {
        match arg {
            InteractionArg::Post => InteractionType::Post,
            InteractionArg::Reply => InteractionType::Reply,
            InteractionArg::Mention => InteractionType::Mention,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ResponseArg {
    Text,
    Image,
}

impl From<ResponseArg> for ResponseType {
    fn from(arg: ResponseArg) -> Self {
        match arg {
            ResponseArg::Text => ResponseType::Text,
            ResponseArg::Image => ResponseType::Image,
        }
    }
}

async fn render(args: RenderArgs) -> anyhow::Result<()> {
    let config = DashboardConfig {
        endpoint: args.endpoint,
        activity_surface: args.activity_id,
        response_surface: args.response_id,
        style: ChartStyle::builder()
            .begin_at_zero(!args.no_begin_at_zero)
            .build(),
    };

    let dashboard = Dashboard::init(config).context("Failed to initialize dashboard")?;
    let config = dashboard.config();

    match args.output {
        Output::Html => {
            let mut activity = CanvasSurface::new(config.activity_surface.as_str());
            let mut response = CanvasSurface::new(config.response_surface.as_str());

            dashboard.run(&mut activity, &mut response).await?;

            let page = dashboard::html_page(&args.title, &activity, &response)?;
            page.write_to(&args.out)
                .with_context(|| format!("Failed to write {}", args.out.display()))?;

            println!("Dashboard written to {}", args.out.display());
        }
        Output::Terminal => {
            let mut activity = TerminalSurface::stdout(config.activity_surface.as_str());
            let mut response = TerminalSurface::stdout(config.response_surface.as_str());

            dashboard.run(&mut activity, &mut response).await?;
        }
    }

    Ok(())
}

fn open_store(args: &StoreArgs) -> anyhow::Result<MetricsStore> {
    MetricsStore::open(&args.redis_url)
        .with_context(|| format!("Invalid Redis URL {}", args.redis_url))
}

async fn record(
    store: StoreArgs,
    interaction: InteractionType,
    response: ResponseType,
) -> anyhow::Result<()> {
    let snapshot = open_store(&store)?
        .record_interaction(interaction, response)
        .await
        .context("Failed to record interaction")?;

    info!(
        posts = snapshot.post_count,
        replies = snapshot.reply_count,
        mentions = snapshot.mention_count,
        "metrics updated"
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}

async fn show(store: StoreArgs) -> anyhow::Result<()> {
    let snapshot = open_store(&store)?
        .get_snapshot()
        .await
        .context("Failed to read metrics from Redis")?;

    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    if args.activity_id == args.response_id {
        return Err(DashboardError::DuplicateSurface(args.activity_id).into());
    }

    let store = open_store(&args.store)?;
    let state = ServerState {
        source: Arc::new(store),
        config: DashboardConfig {
            activity_surface: args.activity_id,
            response_surface: args.response_id,
            style: ChartStyle::builder()
                .begin_at_zero(!args.no_begin_at_zero)
                .build(),
            ..DashboardConfig::default()
        },
        title: args.title,
    };

    server::serve(args.bind, state).await
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let rt = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;

    match cli.command {
        Some(Command::Render(args)) => rt.block_on(render(args)),
        Some(Command::Record {
            interaction,
            response,
            store,
        }) => rt.block_on(record(store, interaction.into(), response.into())),
        Some(Command::Show(store)) => rt.block_on(show(store)),
        Some(Command::Serve(args)) => rt.block_on(serve(args)),
        None => rt.block_on(render(cli.render)),
    }
}
