//! Terminal runner for the arcade widgets (default binary).
//!
//! `canvas-arcade [tetris|life|bounce]` renders one widget through the layer
//! compositor into a pixel buffer, then to the terminal with half-block
//! glyphs. `--events` streams every widget event as a JSON line on stderr
//! (redirect it, e.g. `2>events.jsonl`).

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use serde::Serialize;

use canvas_arcade::automaton::{LifeGrid, RuleSet};
use canvas_arcade::board::{BoardLayers, GridSpec, PixelBuffer};
use canvas_arcade::cli::{parse_args, AppConfig, Mode, USAGE};
use canvas_arcade::input::{
    handle_bounce_key, handle_key_event, handle_life_key, is_press, should_quit, DemoCommand,
};
use canvas_arcade::scenes::BounceScene;
use canvas_arcade::term::{
    render_bodies, render_life, render_next_piece, render_tetris, CellStyle, FrameBuffer,
    TerminalRenderer,
};
use canvas_arcade::tetris::GameState;
use canvas_arcade::types::Rgba;

/// Top-left terminal cell of the play field.
const ORIGIN: (u16, u16) = (1, 1);

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;
    if cli.help {
        println!("{}", USAGE);
        return Ok(());
    }
    let config = cli.resolve()?;
    log::info!("starting {} mode", cli.mode.as_str());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let mut host = Host {
        term: &mut term,
        fb: FrameBuffer::new(0, 0),
        events: cli.events,
    };
    let result = match cli.mode {
        Mode::Tetris => run_tetris(&mut host, &config),
        Mode::Life => run_life(&mut host, &config),
        Mode::Bounce => run_bounce(&mut host, &config),
    };

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Shared terminal plumbing for the three run loops.
struct Host<'a> {
    term: &'a mut TerminalRenderer,
    fb: FrameBuffer,
    events: bool,
}

enum Input {
    Key(KeyEvent),
    Click { x: i32, y: i32 },
    Resize,
    Quit,
}

impl Host<'_> {
    /// Wait up to `timeout` for one input event.
    fn poll(&mut self, timeout: Duration) -> Result<Option<Input>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let input = match event::read()? {
            Event::Key(key) if is_press(key) => {
                if should_quit(key) {
                    Input::Quit
                } else {
                    Input::Key(key)
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                // One terminal row holds two pixel rows; use the upper one.
                let x = column as i32 - ORIGIN.0 as i32;
                let y = (row as i32 - ORIGIN.1 as i32) * 2;
                Input::Click { x, y }
            }
            Event::Resize(..) => {
                self.term.invalidate();
                Input::Resize
            }
            _ => return Ok(None),
        };
        Ok(Some(input))
    }

    fn emit<T: Serialize>(&self, events: &[T]) -> Result<()> {
        if !self.events || events.is_empty() {
            return Ok(());
        }
        let mut err = io::stderr().lock();
        for ev in events {
            serde_json::to_writer(&mut err, ev)?;
            err.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Clear the frame to the current terminal size and blit the play field.
    fn begin_frame(&mut self, field: &PixelBuffer) -> Result<()> {
        let (w, h) = crossterm::terminal::size()?;
        self.fb.resize(w, h);
        self.fb.blit_pixels(field, ORIGIN.0, ORIGIN.1, Rgba::BLACK);
        Ok(())
    }

    /// Text panel to the right of a field `field_w` pixels wide.
    fn panel(&mut self, field_w: u32, lines: &[String]) {
        let x = ORIGIN.0.saturating_add(u16::try_from(field_w).unwrap_or(u16::MAX)).saturating_add(2);
        let title = CellStyle::default().bold();
        for (i, line) in lines.iter().enumerate() {
            let style = if i == 0 { title } else { CellStyle::default() };
            self.fb.put_str(x, ORIGIN.1 + i as u16, line, style);
        }
    }

    fn present(&mut self) -> Result<()> {
        self.term.draw_swap(&mut self.fb)
    }
}

/// Milliseconds since `last`, advancing `last` by exactly that much.
fn take_elapsed_ms(last: &mut Instant) -> u32 {
    let ms = last.elapsed().as_millis().min(u32::MAX as u128) as u32;
    *last += Duration::from_millis(ms as u64);
    ms
}

fn run_tetris(host: &mut Host, config: &AppConfig) -> Result<()> {
    let cs = config.host.cell_size;
    let mut game = GameState::new(config.tetris);
    game.start();

    let (pw, ph) = (config.tetris.width as u32 * cs, config.tetris.height as u32 * cs);
    let mut layers = BoardLayers::new(pw, ph, cs);
    layers.add_layer("board", 0);
    layers.add_layer("grid", 1);
    layers.draw_grid("grid", Rgba::WHITE);
    layers.set_opacity("grid", 0.08);
    layers.set_visible("grid", cs >= 4);
    host.emit(&layers.drain_events())?;

    let mut field = PixelBuffer::new(pw, ph);
    let mut preview = PixelBuffer::new(4 * cs, 4 * cs);
    let frame_time = Duration::from_millis(config.host.frame_ms);
    let mut last = Instant::now();
    let mut dirty = true;

    loop {
        match host.poll(frame_time)? {
            Some(Input::Quit) => return Ok(()),
            Some(Input::Key(key)) => {
                if let Some(action) = handle_key_event(key) {
                    game.apply_action(action);
                }
            }
            Some(Input::Resize) => dirty = true,
            Some(Input::Click { .. }) | None => {}
        }

        game.update(take_elapsed_ms(&mut last));
        host.emit(&game.drain_events())?;

        if !(game.take_redraw() || dirty) {
            continue;
        }
        dirty = false;

        if let Some(surface) = layers.surface_mut("board") {
            render_tetris(&game, surface, cs);
        }
        layers.render(&mut field);
        host.emit(&layers.drain_events())?;
        render_next_piece(&game, &mut preview, cs);

        host.begin_frame(&field)?;
        host.panel(
            pw,
            &[
                "NEXT".to_string(),
                String::new(),
                String::new(),
                String::new(),
                format!("Score  {}", game.score()),
                format!("Level  {}", game.level()),
                format!("Lines  {}", game.lines()),
                String::new(),
                game.status().as_str().to_string(),
                String::new(),
                "arrows/hjkl move".to_string(),
                "space drop  p pause".to_string(),
                "r restart   q quit".to_string(),
            ],
        );
        let px = ORIGIN.0.saturating_add(u16::try_from(pw).unwrap_or(u16::MAX)).saturating_add(2);
        host.fb.blit_pixels(&preview, px, ORIGIN.1 + 1, Rgba::BLACK);
        host.present()?;
    }
}

fn run_life(host: &mut Host, config: &AppConfig) -> Result<()> {
    let cs = config.host.cell_size;
    let mut grid = LifeGrid::from_config(&config.life);
    let mut seed = config.life.seed;
    grid.randomize(config.life.density, seed);
    grid.drain_events();

    let grid_spec = GridSpec::new(cs);
    let (pw, ph) = (grid.width() as u32 * cs, grid.height() as u32 * cs);
    let mut field = PixelBuffer::new(pw, ph);
    let step_every = config.host.life_step_ms.max(1);
    let frame_time = Duration::from_millis(config.host.frame_ms);
    let mut last = Instant::now();
    let mut acc_ms: u64 = 0;
    let mut running = true;
    let mut rules_idx = RuleSet::PRESETS
        .iter()
        .position(|(_, r)| *r == config.life.rules);
    let mut rules = config.life.rules;
    let mut dirty = true;

    loop {
        match host.poll(frame_time)? {
            Some(Input::Quit) => return Ok(()),
            Some(Input::Key(key)) => {
                dirty = true;
                match handle_life_key(key) {
                    Some(DemoCommand::TogglePause) => running = !running,
                    Some(DemoCommand::Step) => grid.step(),
                    Some(DemoCommand::Randomize) => {
                        seed = seed.wrapping_add(1);
                        grid.randomize(config.life.density, seed);
                    }
                    Some(DemoCommand::Clear) => grid.clear(),
                    Some(DemoCommand::CycleRules) => {
                        let next = rules_idx.map_or(0, |i| (i + 1) % RuleSet::PRESETS.len());
                        rules_idx = Some(next);
                        rules = RuleSet::PRESETS[next].1;
                        grid.set_rules(rules);
                    }
                    Some(DemoCommand::ToggleWrap) => grid.set_wrap(!grid.wrap()),
                    _ => dirty = false,
                }
            }
            Some(Input::Click { x, y }) => {
                if let Some((col, row)) = grid_spec.pixel_to_grid(x, y) {
                    dirty |= grid.click(col, row);
                }
            }
            Some(Input::Resize) => dirty = true,
            None => {}
        }

        let elapsed = take_elapsed_ms(&mut last) as u64;
        if running {
            acc_ms += elapsed;
            if acc_ms >= step_every {
                acc_ms %= step_every;
                grid.step();
                dirty = true;
            }
        }
        host.emit(&grid.drain_events())?;

        if !dirty {
            continue;
        }
        dirty = false;

        render_life(&grid, &mut field, cs);
        host.begin_frame(&field)?;
        host.panel(
            pw,
            &[
                "LIFE".to_string(),
                format!("Rules  {}", rules),
                format!("Gen    {}", grid.generation()),
                format!("Alive  {}", grid.population()),
                format!("Wrap   {}", if grid.wrap() { "on" } else { "off" }),
                if running { "running" } else { "paused" }.to_string(),
                String::new(),
                "space pause  n step".to_string(),
                "r random  c clear".to_string(),
                "tab rules  t wrap".to_string(),
                "click toggles  q quit".to_string(),
            ],
        );
        host.present()?;
    }
}

fn run_bounce(host: &mut Host, config: &AppConfig) -> Result<()> {
    let mut scene = BounceScene::new(config.bounce);
    let (pw, ph) = (
        config.bounce.width.ceil() as u32,
        config.bounce.height.ceil() as u32,
    );
    let mut field = PixelBuffer::new(pw, ph);
    let frame_time = Duration::from_millis(config.host.frame_ms);
    let mut running = true;
    let mut collisions = 0usize;

    loop {
        let mut step_once = false;
        match host.poll(frame_time)? {
            Some(Input::Quit) => return Ok(()),
            Some(Input::Key(key)) => match handle_bounce_key(key) {
                Some(DemoCommand::Push { dx, dy }) => scene.push(dx, dy),
                Some(DemoCommand::TogglePause) => running = !running,
                Some(DemoCommand::Step) => step_once = true,
                Some(DemoCommand::Reset) => scene.reset(),
                _ => {}
            },
            Some(Input::Click { .. }) | Some(Input::Resize) | None => {}
        }

        if running || step_once {
            collisions += scene.step();
        }
        host.emit(&scene.drain_events())?;

        render_bodies(scene.bodies(), &mut field);
        host.begin_frame(&field)?;
        host.panel(
            pw,
            &[
                "BOUNCE".to_string(),
                format!("Frame  {}", scene.frame()),
                format!("Hits   {}", collisions),
                if running { "running" } else { "paused" }.to_string(),
                String::new(),
                "arrows push".to_string(),
                "space pause  n step".to_string(),
                "r reset  q quit".to_string(),
            ],
        );
        host.present()?;
    }
}
