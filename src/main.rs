use arboard::Clipboard;
use macroquad::prelude::*;
use ::rand::rngs::StdRng;
use tracing::{error, info, warn};
use zombie_pursuit::action_log::{Action, ActionLog};
use zombie_pursuit::config::{Config, Overlay};
use zombie_pursuit::layout::{parse_layout, render_layout};
use zombie_pursuit::simulation::seeded_rng;
use zombie_pursuit::{Cell, CellGrid, MoveOrder, PursuitGrid, Scenario};

const PANEL_HEIGHT: f32 = 110.0;

/// Window size that fits the grid plus the info panel
fn window_size(rows: usize, cols: usize, cell_size: f32) -> (f32, f32) {
    (cols as f32 * cell_size, rows as f32 * cell_size + PANEL_HEIGHT)
}

/// What a left click places
#[derive(Clone, Copy, Debug, PartialEq)]
enum PaintMode {
    Obstacle,
    Zombie,
    Human,
}

impl PaintMode {
    fn label(self) -> &'static str {
        match self {
            PaintMode::Obstacle => "obstacle",
            PaintMode::Zombie => "zombie",
            PaintMode::Human => "human",
        }
    }
}

/// Viewer state
struct ViewerState {
    sim: PursuitGrid<StdRng>,
    seed: Option<u64>,
    mode: PaintMode,
    overlay: Overlay,
    move_order: MoveOrder,
    running: bool,
    tick_interval: f32,
    since_tick: f32,
    ticks: u64,
    cell_size: f32,
    background: Color,
    save_path: String,
    action_log: Option<ActionLog>,
    action_log_path: String,
}

impl ViewerState {
    fn new(config: &Config) -> Self {
        let seed = config.simulation.seed;
        let sim = match &config.scenario.path {
            Some(path) => match Scenario::load_from_file(path).and_then(|s| s.to_simulation(seeded_rng(seed))) {
                Ok(sim) => sim,
                Err(e) => {
                    warn!(path = %path, error = %e, "failed to load scenario, starting empty");
                    PursuitGrid::with_rng(config.grid.rows, config.grid.cols, seeded_rng(seed))
                }
            },
            None => PursuitGrid::with_rng(config.grid.rows, config.grid.cols, seeded_rng(seed)),
        };

        ViewerState {
            sim,
            seed,
            mode: PaintMode::Obstacle,
            overlay: config.visual.overlay,
            move_order: config.simulation.move_order,
            running: false,
            tick_interval: 1.0 / config.simulation.ticks_per_second.max(0.1),
            since_tick: 0.0,
            ticks: 0,
            cell_size: config.grid.cell_size,
            background: Color::from_rgba(
                config.visual.background_r,
                config.visual.background_g,
                config.visual.background_b,
                255,
            ),
            save_path: config.scenario.save_path.clone(),
            action_log: config.logging.enable_action_log.then(ActionLog::new),
            action_log_path: config.logging.action_log_path.clone(),
        }
    }

    fn log(&mut self, action: Action) {
        if let Some(log) = self.action_log.as_mut() {
            log.log(action);
        }
    }

    fn cell_at(&self, mouse_x: f32, mouse_y: f32) -> Option<Cell> {
        if mouse_x < 0.0 || mouse_y < 0.0 {
            return None;
        }
        let cell = Cell::new((mouse_y / self.cell_size) as usize, (mouse_x / self.cell_size) as usize);
        self.sim.grid().contains(cell).then_some(cell)
    }

    fn handle_mouse(&mut self) {
        let (mouse_x, mouse_y) = mouse_position();
        let Some(cell) = self.cell_at(mouse_x, mouse_y) else {
            return;
        };
        let (row, col) = (cell.row, cell.col);

        // Obstacles paint while dragging, entities once per click
        if self.mode == PaintMode::Obstacle && is_mouse_button_down(MouseButton::Left) {
            if self.sim.grid().is_empty(cell) && self.sim.set_obstacle(row, col).is_ok() {
                self.log(Action::SetObstacle { row, col });
            }
        } else if is_mouse_button_pressed(MouseButton::Left) {
            let added = match self.mode {
                PaintMode::Zombie => self.sim.add_zombie(row, col).map(|_| Action::AddZombie { row, col }),
                PaintMode::Human => self.sim.add_human(row, col).map(|_| Action::AddHuman { row, col }),
                PaintMode::Obstacle => return,
            };
            match added {
                Ok(action) => self.log(action),
                Err(e) => warn!(error = %e, "could not place entity"),
            }
        } else if is_mouse_button_pressed(MouseButton::Right) {
            if self.sim.grid().is_full(cell) {
                if self.sim.remove_obstacle(row, col).is_ok() {
                    self.log(Action::RemoveObstacle { row, col });
                }
            } else {
                self.sim.remove_entities_at(cell);
                self.log(Action::EraseEntities { row, col });
            }
        }
    }

    fn step(&mut self) {
        match self.sim.tick(self.move_order) {
            Ok(()) => {
                self.ticks += 1;
                let (zombies, humans) = (self.sim.num_zombies(), self.sim.num_humans());
                self.log(Action::Tick { zombies, humans });
            }
            Err(e) => {
                error!(error = %e, "tick failed, pausing");
                self.running = false;
            }
        }
    }

    fn update(&mut self, frame_time: f32) {
        if !self.running {
            self.since_tick = 0.0;
            return;
        }
        self.since_tick += frame_time;
        while self.since_tick >= self.tick_interval {
            self.since_tick -= self.tick_interval;
            self.step();
        }
    }

    fn clear(&mut self) {
        self.sim.clear();
        self.ticks = 0;
        self.running = false;
        self.log(Action::Clear);
        info!("cleared grid");
    }

    fn fit_window(&self) {
        let (width, height) = window_size(self.sim.rows(), self.sim.cols(), self.cell_size);
        request_new_screen_size(width, height);
    }

    fn replace_scenario(&mut self, scenario: &Scenario) -> zombie_pursuit::Result<()> {
        self.sim = scenario.to_simulation(seeded_rng(self.seed))?;
        self.ticks = 0;
        self.running = false;
        self.fit_window();
        Ok(())
    }

    fn save_scenario(&self) {
        if let Err(e) = Scenario::from_simulation(&self.sim).save_to_file(&self.save_path) {
            error!(path = %self.save_path, error = %e, "failed to save scenario");
        }
    }

    fn load_scenario(&mut self) {
        let path = self.save_path.clone();
        match Scenario::load_from_file(&path).and_then(|s| {
            self.replace_scenario(&s)?;
            Ok(s)
        }) {
            Ok(s) => self.log(Action::LoadScenario { rows: s.rows, cols: s.cols }),
            Err(e) => error!(path = %path, error = %e, "failed to load scenario"),
        }
    }

    fn copy_to_clipboard(&self) {
        let layout = render_layout(&self.sim);
        // Stacked entities share one symbol, so the copy can hold fewer
        if let Ok(copied) = parse_layout(&layout) {
            if copied.zombies.len() != self.sim.num_zombies() || copied.humans.len() != self.sim.num_humans() {
                warn!(
                    zombies = self.sim.num_zombies(),
                    humans = self.sim.num_humans(),
                    copied_zombies = copied.zombies.len(),
                    copied_humans = copied.humans.len(),
                    "layout copy merges entities sharing a cell"
                );
            }
        }
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(layout) {
                    warn!(error = %e, "failed to copy to clipboard");
                } else {
                    info!("layout copied to clipboard");
                    // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => warn!(error = %e, "failed to access clipboard"),
        }
    }

    fn paste_from_clipboard(&mut self) {
        let text = match Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "failed to read clipboard");
                return;
            }
        };
        match parse_layout(&text).and_then(|s| {
            self.replace_scenario(&s)?;
            Ok(s)
        }) {
            Ok(s) => {
                info!(rows = s.rows, cols = s.cols, "pasted layout");
                self.log(Action::PasteLayout { rows: s.rows, cols: s.cols });
            }
            Err(e) => warn!(error = %e, "clipboard does not hold a valid layout"),
        }
    }

    fn handle_keys(&mut self) {
        let ctrl = is_key_down(KeyCode::LeftControl) || is_key_down(KeyCode::RightControl);

        if is_key_pressed(KeyCode::Key1) {
            self.mode = PaintMode::Obstacle;
        }
        if is_key_pressed(KeyCode::Key2) {
            self.mode = PaintMode::Zombie;
        }
        if is_key_pressed(KeyCode::Key3) {
            self.mode = PaintMode::Human;
        }
        if is_key_pressed(KeyCode::Space) {
            self.running = false;
            self.step();
        }
        if is_key_pressed(KeyCode::R) {
            self.running = !self.running;
        }
        if is_key_pressed(KeyCode::O) {
            self.overlay = self.overlay.next();
        }
        if is_key_pressed(KeyCode::C) {
            if ctrl {
                self.copy_to_clipboard();
            } else {
                self.clear();
            }
        }
        if ctrl && is_key_pressed(KeyCode::V) {
            self.paste_from_clipboard();
        }
        if is_key_pressed(KeyCode::F5) {
            self.save_scenario();
        }
        if is_key_pressed(KeyCode::F9) {
            self.load_scenario();
        }
    }

    fn draw(&self) {
        clear_background(self.background);

        let field = self.overlay.entity().map(|kind| self.sim.compute_distance_field(kind));
        let max_reached = field.as_ref().and_then(|f| f.max_reached()).unwrap_or(0).max(1) as f32;
        let grid = self.sim.grid();

        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let cell = Cell::new(row, col);
                let px = col as f32 * self.cell_size;
                let py = row as f32 * self.cell_size;

                let color = if grid.is_full(cell) {
                    Color::from_rgba(120, 120, 120, 255)
                } else if let Some(field) = field.as_ref().filter(|f| f.is_reachable(cell)) {
                    let t = field.get(cell) as f32 / max_reached;
                    Color::new(0.15 + 0.6 * (1.0 - t), 0.15, 0.15 + 0.6 * t, 1.0)
                } else {
                    Color::from_rgba(60, 60, 60, 255)
                };

                draw_rectangle(px, py, self.cell_size - 1.0, self.cell_size - 1.0, color);
            }
        }

        let radius = self.cell_size * 0.35;
        let half = self.cell_size / 2.0;
        for cell in self.sim.zombies() {
            draw_circle(cell.col as f32 * self.cell_size + half, cell.row as f32 * self.cell_size + half, radius, RED);
        }
        for cell in self.sim.humans() {
            draw_circle(cell.col as f32 * self.cell_size + half, cell.row as f32 * self.cell_size + half, radius * 0.7, GREEN);
        }

        let panel_y = grid.rows as f32 * self.cell_size + 20.0;
        let info = [
            format!(
                "Tick {} | {} zombies, {} humans | mode: {} | overlay: {:?} | {}",
                self.ticks,
                self.sim.num_zombies(),
                self.sim.num_humans(),
                self.mode.label(),
                self.overlay,
                if self.running { "running" } else { "paused" }
            ),
            "1/2/3: obstacle/zombie/human  Left: place  Right: erase".to_string(),
            "Space: step  R: run/pause  O: overlay  C: clear".to_string(),
            "Ctrl+C/Ctrl+V: copy/paste layout  F5/F9: save/load  Esc: quit".to_string(),
        ];
        for (i, line) in info.iter().enumerate() {
            draw_text(line, 10.0, panel_y + i as f32 * 22.0, 20.0, WHITE);
        }
    }

    fn shutdown(&self) {
        if let Some(log) = &self.action_log {
            info!("{}", log.summary());
            if let Err(e) = log.save_to_file(&self.action_log_path) {
                error!(path = %self.action_log_path, error = %e, "failed to save action log");
            }
        }
    }
}

async fn run(config: Config) {
    let mut state = ViewerState::new(&config);
    state.fit_window();

    loop {
        state.handle_mouse();
        state.handle_keys();

        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.update(get_frame_time());
        state.draw();

        next_frame().await
    }

    state.shutdown();
}

fn main() {
    zombie_pursuit::logging::init();
    let config = Config::load();

    let (width, height) = window_size(config.grid.rows, config.grid.cols, config.grid.cell_size);
    let conf = Conf {
        window_title: config.visual.window_title.clone(),
        window_width: width as i32,
        window_height: height as i32,
        ..Default::default()
    };

    macroquad::Window::from_config(conf, run(config));
}
