use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    fs::{self, OpenOptions},
    io,
    path::PathBuf,
    time::{Duration, Instant},
};

use emicalc::{
    app::App,
    config::Config,
    output::{write_schedule, write_summary, OutputFormat},
    schedule::DEFAULT_PAGE_SIZE,
    ui::ui,
    LoanParameters, Schedule,
};

/// Redraw interval while a counter is animating.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Loan EMI calculator
#[derive(Parser)]
#[command(name = "emicalc", version, about = "Loan EMI calculator with amortization schedule")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive calculator (default)
    Tui,
    /// Print the monthly installment and totals
    Summary(LoanArgs),
    /// Print the amortization schedule
    Schedule(ScheduleArgs),
}

#[derive(Args)]
struct LoanArgs {
    /// Loan amount
    #[arg(long)]
    principal: f64,
    /// Annual interest rate in percent, e.g. 8.5
    #[arg(long)]
    rate: f64,
    /// Tenure in years
    #[arg(long)]
    tenure: f64,
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    output: OutputFormat,
}

#[derive(Args)]
struct ScheduleArgs {
    #[command(flatten)]
    loan: LoanArgs,
    /// Print only this 1-based page
    #[arg(long)]
    page: Option<usize>,
    /// Rows per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::Tui) => {
            let config = Config::load(cli.config.as_deref())?;
            init_file_logging(&config)?;
            run_tui(&config)
        }
        Some(Commands::Summary(args)) => {
            env_logger::init();
            let params = LoanParameters::new(args.principal, args.rate, args.tenure)?;
            let summary = emicalc::compute_summary(&params)?;
            write_summary(&mut io::stdout().lock(), args.output, &params, &summary)
        }
        Some(Commands::Schedule(args)) => {
            env_logger::init();
            let loan = &args.loan;
            let params = LoanParameters::new(loan.principal, loan.rate, loan.tenure)?;
            let schedule = Schedule::build(&params)?;
            let rows = match args.page {
                Some(page) => schedule.page(page, args.page_size),
                None => schedule.rows(),
            };
            if rows.is_empty() {
                log::warn!(
                    "page {:?} is outside 1..={}",
                    args.page,
                    schedule.page_count(args.page_size)
                );
            }
            write_schedule(&mut io::stdout().lock(), loan.output, rows)
        }
    }
}

/// Sends log output to a file so it does not draw over the alternate screen.
fn init_file_logging(config: &Config) -> Result<()> {
    let path = config.log_file_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .context(format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .context(format!("Failed to open log file: {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run_tui(config: &Config) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(config, Instant::now());
    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        log::error!("calculator exited with error: {err:?}");
    }
    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        let now = Instant::now();
        terminal.draw(|f| ui(f, &mut app, now))?;

        // keep redrawing while counters move, otherwise block on input
        if app.is_animating(now) && !event::poll(FRAME_INTERVAL)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key, Instant::now()) {
                return Ok(());
            }
        }
    }
}
