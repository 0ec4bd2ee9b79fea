//! sortvis - Terminal User Interface
//!
//! Interactive bar-chart view of the sorting steppers using ratatui.
//! Key mapping and drawing live in `sortvis::tui`.

#![forbid(unsafe_code)]

#[cfg(feature = "tui")]
fn main() -> std::process::ExitCode {
    use clap::Parser;

    let args = tui::TuiArgs::parse();
    match tui::start(&args) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::ExitCode::from(1)
        }
    }
}

#[cfg(not(feature = "tui"))]
fn main() {
    eprintln!("TUI feature not enabled. Run with: cargo run --bin sort-tui --features tui");
    std::process::exit(1);
}

#[cfg(feature = "tui")]
mod tui {
    use std::io::{self, Write};
    use std::path::PathBuf;

    use clap::{ArgAction, Parser};
    use crossterm::{
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{
        backend::{Backend, CrosstermBackend},
        Terminal,
    };
    use sortvis::config::{LayoutConfig, Palette, VisConfig};
    use sortvis::driver::{self, Driver, FrameRequest, Pacing, Renderer};
    use sortvis::logging;
    use sortvis::tui::keys::KeyboardInput;
    use sortvis::tui::view::ui;
    use sortvis::SortResult;
    use tracing::info;

    /// Interactive sorting visualizer.
    #[derive(Debug, Parser)]
    #[command(name = "sort-tui", version, about, long_about = None)]
    pub struct TuiArgs {
        /// YAML configuration file.
        #[arg(short, long)]
        pub config: Option<PathBuf>,

        /// Seed for generated sequences.
        #[arg(short, long)]
        pub seed: Option<u64>,

        /// Write logs to this file.
        #[arg(long)]
        pub log_file: Option<PathBuf>,

        /// Increase log verbosity.
        #[arg(short, long, action = ArgAction::Count)]
        pub verbose: u8,
    }

    pub fn load_config(args: &TuiArgs) -> SortResult<VisConfig> {
        let mut config = match &args.config {
            Some(path) => VisConfig::load(path)?,
            None => VisConfig::default(),
        };
        if args.seed.is_some() {
            config.seed = args.seed;
        }
        config.check()?;
        Ok(config)
    }

    /// Draws frames on a ratatui terminal.
    pub struct TerminalRenderer<B: Backend> {
        terminal: Terminal<B>,
        palette: Palette,
        layout: LayoutConfig,
    }

    impl<B: Backend> TerminalRenderer<B> {
        pub fn new(terminal: Terminal<B>, palette: Palette, layout: LayoutConfig) -> Self {
            Self {
                terminal,
                palette,
                layout,
            }
        }

        pub fn into_terminal(self) -> Terminal<B> {
            self.terminal
        }
    }

    impl<B: Backend> Renderer for TerminalRenderer<B> {
        fn render(&mut self, frame: &FrameRequest<'_>) -> SortResult<()> {
            self.terminal
                .draw(|f| ui(f, frame, &self.palette, self.layout))?;
            Ok(())
        }
    }

    /// Leaves raw mode and the alternate screen, on drop if not before.
    pub struct TerminalGuard<W: Write> {
        out: W,
        active: bool,
    }

    impl<W: Write> TerminalGuard<W> {
        pub fn new(out: W) -> Self {
            Self { out, active: true }
        }

        pub fn restore(&mut self) -> io::Result<()> {
            if !self.active {
                return Ok(());
            }
            self.active = false;
            let raw = disable_raw_mode();
            let screen = execute!(self.out, LeaveAlternateScreen, crossterm::cursor::Show);
            raw.and(screen)
        }
    }

    impl<W: Write> Drop for TerminalGuard<W> {
        fn drop(&mut self) {
            let _ = self.restore();
        }
    }

    pub fn start(args: &TuiArgs) -> SortResult<()> {
        if let Some(path) = &args.log_file {
            logging::init_file(path, args.verbose)?;
        }

        let config = load_config(args)?;
        let mut driver = Driver::new(&config)?;
        let mut clock = config.clock()?;
        info!(
            seed = driver.seed(),
            rate_hz = clock.rate_hz(),
            "sort-tui started"
        );

        enable_raw_mode()?;
        let mut guard = TerminalGuard::new(io::stdout());
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, crossterm::cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let mut renderer =
            TerminalRenderer::new(terminal, config.palette.clone(), config.layout);
        let result = driver::run(
            &mut driver,
            &mut renderer,
            &mut KeyboardInput,
            &mut clock,
            Pacing::RealTime,
            None,
        );

        guard.restore()?;
        let summary = result?;
        info!(
            ticks = summary.ticks,
            completed = summary.completed,
            "sort-tui finished"
        );
        Ok(())
    }

}
