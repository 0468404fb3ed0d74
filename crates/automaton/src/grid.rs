//! Grid owner that advances a field of cells one generation at a time.

use serde::{Deserialize, Serialize};

use arcade_types::SimpleRng;

use crate::cell::{AutomatonEvent, Cell};
use crate::rules::RuleSet;

/// Grid construction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    pub width: usize,
    pub height: usize,
    /// Toroidal edges.
    pub wrap: bool,
    pub rules: RuleSet,
    /// Fraction of cells alive after `randomize`.
    pub density: f32,
    pub seed: u32,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 30,
            wrap: true,
            rules: RuleSet::CONWAY,
            density: 0.3,
            seed: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LifeGrid {
    width: usize,
    height: usize,
    wrap: bool,
    cells: Vec<Cell>,
    generation: u32,
    events: Vec<AutomatonEvent>,
}

impl LifeGrid {
    pub fn new(width: usize, height: usize, rules: RuleSet) -> Self {
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Cell::with_rules(x as i32, y as i32, rules)))
            .collect();
        Self {
            width,
            height,
            wrap: false,
            cells,
            generation: 0,
            events: Vec::new(),
        }
    }

    pub fn from_config(config: &LifeConfig) -> Self {
        let mut grid = Self::new(config.width, config.height, config.rules);
        grid.wrap = config.wrap;
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn wrap(&self) -> bool {
        self.wrap
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn is_alive(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_some_and(Cell::alive)
    }

    /// Returns false when out of bounds.
    pub fn set_alive(&mut self, x: i32, y: i32, alive: bool) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i].set_alive(alive);
                true
            }
            None => false,
        }
    }

    pub fn toggle(&mut self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i].toggle();
                true
            }
            None => false,
        }
    }

    /// Pointer click on a cell (toggle + `cell-click`).
    pub fn click(&mut self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i].click();
                true
            }
            None => false,
        }
    }

    pub fn set_rules(&mut self, rules: RuleSet) {
        for cell in &mut self.cells {
            cell.set_rules(rules);
        }
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.alive()).count()
    }

    /// Live Moore neighbors of `(x, y)`.
    pub fn live_neighbors(&self, x: i32, y: i32) -> u8 {
        if self.cells.is_empty() {
            return 0;
        }
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (mut nx, mut ny) = (x + dx, y + dy);
                if self.wrap {
                    nx = nx.rem_euclid(self.width as i32);
                    ny = ny.rem_euclid(self.height as i32);
                }
                if self.is_alive(nx, ny) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Advance one generation: stage every cell, then commit every cell.
    pub fn step(&mut self) {
        for i in 0..self.cells.len() {
            let (x, y) = ((i % self.width) as i32, (i / self.width) as i32);
            let n = self.live_neighbors(x, y);
            self.cells[i].calculate_next_state(n);
        }
        for cell in &mut self.cells {
            cell.apply_next_state();
        }
        self.generation = self.generation.wrapping_add(1);
        let population = self.population();
        self.events.push(AutomatonEvent::GenerationUpdate {
            generation: self.generation,
            population,
        });
    }

    /// Kill every cell and reset all counters. No events.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
            cell.drain_events();
        }
        self.generation = 0;
        self.events.clear();
    }

    /// Clear, then seed each cell alive with probability `density`.
    pub fn randomize(&mut self, density: f32, seed: u32) {
        self.clear();
        let mut rng = SimpleRng::new(seed);
        let density = density.clamp(0.0, 1.0);
        for cell in &mut self.cells {
            if rng.next_f32() < density {
                cell.set_alive(true);
            }
        }
        log::debug!(
            "life grid seeded: {} of {} cells alive",
            self.population(),
            self.cells.len()
        );
    }

    /// Take all pending events: cell events in row-major order, then grid events.
    pub fn drain_events(&mut self) -> Vec<AutomatonEvent> {
        let mut out = Vec::new();
        for cell in &mut self.cells {
            cell.drain_events_into(&mut out);
        }
        out.append(&mut self.events);
        out
    }
}
