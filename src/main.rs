//! Monoray demo runner (default binary).
//!
//! Plays the demo level on a simulated 128x64 panel drawn with half-block
//! characters. Logging goes to the file named by `MONORAY_LOG` (filtered by
//! `RUST_LOG`) so it never corrupts the screen.

use std::fs::File;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use monoray::config::{parse_args, DemoConfig, ENV_LOG, USAGE};
use monoray::core::{FrameClock, Renderer, SystemClock};
use monoray::engine::{draw_intro, Scene};
use monoray::input::{should_quit, ButtonLatch};
use monoray::term::{CellBuffer, PanelView, Rgb, TerminalRenderer};
use monoray::types::GRADIENT_WHITE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Title card; `fade` counts down to fully visible.
    Intro { fade: u8 },
    Play,
}

fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os(ENV_LOG) else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("create log file {}", path.to_string_lossy()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;
    if cli.help {
        println!("{USAGE}");
        return Ok(());
    }
    let config = DemoConfig::load(&cli, |name| std::env::var(name).ok())?;
    init_logging()?;
    info!(?config, "starting");

    let mut term = TerminalRenderer::new();
    if let Err(e) = term.enter() {
        // No display, nothing to fall back to.
        error!(error = %format!("{e:#}"), "display init failed");
        let _ = term.exit();
        return Err(e.context("display init failed"));
    }

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        error!(error = %format!("{e:#}"), "demo aborted");
    }
    result
}

fn run(term: &mut TerminalRenderer, config: &DemoConfig) -> Result<()> {
    let mut renderer = Renderer::new();
    let mut scene = Scene::demo().context("load demo level")?;

    let [r, g, b] = config.lit_color;
    let lit = Rgb::new(r, g, b);
    let [r, g, b] = config.unlit_color;
    let view = PanelView::new(lit, Rgb::new(r, g, b));

    let (mut width, mut height) = crossterm::terminal::size().unwrap_or((128, 32));
    let mut cells = CellBuffer::new(width, height);
    let mut latch = ButtonLatch::new().with_release_timeout_ms(config.key_release_timeout_ms);
    let mut clock = FrameClock::new(SystemClock::new(), config.frame_ms);
    let mut phase = if config.intro {
        Phase::Intro {
            fade: GRADIENT_WHITE,
        }
    } else {
        Phase::Play
    };

    loop {
        let delta = clock.tick();
        let now = clock.last_tick_ms();

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Release && should_quit(key) {
                        info!("quit requested");
                        return Ok(());
                    }
                    latch.handle_key_event(key, now);
                }
                Event::Resize(w, h) => {
                    width = w;
                    height = h;
                    term.invalidate();
                }
                _ => {}
            }
        }
        let buttons = latch.held(now);

        match phase {
            Phase::Intro { fade } => {
                draw_intro(&mut renderer, fade);
                if buttons.start() || buttons.fire() {
                    debug!("intro skipped");
                    latch.clear();
                    phase = Phase::Play;
                } else {
                    phase = Phase::Intro {
                        fade: fade.saturating_sub(1),
                    };
                }
            }
            Phase::Play => {
                scene.update(buttons, delta);
                let fps = config.show_fps.then(|| clock.actual_fps());
                scene.render(&mut renderer, fps);
            }
        }

        cells.resize(width, height);
        view.render_into(renderer.framebuffer(), &mut cells);
        term.draw_swap(&mut cells)?;
    }
}
