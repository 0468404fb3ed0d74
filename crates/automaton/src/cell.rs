//! A single cellular-automaton cell with a two-phase update.
//!
//! `calculate_next_state` only records what the cell *will* be; nothing is
//! visible until `apply_next_state`. A grid owner advances one generation by
//! calling calculate on every cell first and apply on every cell second, so no
//! cell ever observes a neighbor's next-generation state mid-scan.

use serde::Serialize;

use crate::rules::RuleSet;

/// Automaton notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum AutomatonEvent {
    StateChange {
        old_alive: bool,
        new_alive: bool,
        x: i32,
        y: i32,
        age: u32,
        generation: u32,
    },
    CellClick {
        x: i32,
        y: i32,
        alive: bool,
    },
    GenerationUpdate {
        generation: u32,
        population: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    alive: bool,
    x: i32,
    y: i32,
    /// Consecutive generations alive; always 0 while dead.
    age: u32,
    generation: u32,
    neighbor_count: u8,
    rules: RuleSet,
    /// Set between calculate and apply only.
    pending: Option<bool>,
    events: Vec<AutomatonEvent>,
}

impl Cell {
    /// New dead cell at `(x, y)` using Conway's rules.
    pub fn new(x: i32, y: i32) -> Self {
        Self::with_rules(x, y, RuleSet::CONWAY)
    }

    pub fn with_rules(x: i32, y: i32, rules: RuleSet) -> Self {
        Self {
            alive: false,
            x,
            y,
            age: 0,
            generation: 0,
            neighbor_count: 0,
            rules,
            pending: None,
            events: Vec::new(),
        }
    }

    pub fn alive(&self) -> bool {
        self.alive
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn neighbor_count(&self) -> u8 {
        self.neighbor_count
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    pub fn pending(&self) -> Option<bool> {
        self.pending
    }

    /// Replace the rule set. Takes effect on the next calculate; a state
    /// already pending is kept.
    pub fn set_rules(&mut self, rules: RuleSet) {
        self.rules = rules;
    }

    /// Phase one: record the neighbor count and stage the next state.
    pub fn calculate_next_state(&mut self, alive_neighbors: u8) -> bool {
        self.neighbor_count = alive_neighbors;
        let next = self.rules.next_state(self.alive, alive_neighbors);
        self.pending = Some(next);
        next
    }

    /// Phase two: commit the staged state. No-op when nothing is staged.
    pub fn apply_next_state(&mut self) {
        let Some(next) = self.pending.take() else {
            return;
        };
        let old = self.alive;
        self.alive = next;
        self.age = match (old, next) {
            (_, false) => 0,
            (false, true) => 1,
            (true, true) => self.age.saturating_add(1),
        };
        self.generation = self.generation.wrapping_add(1);
        if old != next {
            self.emit_state_change(old);
        }
    }

    /// Set the state immediately, bypassing the rules.
    pub fn set_alive(&mut self, alive: bool) {
        if self.alive == alive {
            return;
        }
        let old = self.alive;
        self.alive = alive;
        self.age = if alive { 1 } else { 0 };
        self.emit_state_change(old);
    }

    pub fn toggle(&mut self) {
        self.set_alive(!self.alive);
    }

    /// Pointer interaction: toggle, then report the click.
    pub fn click(&mut self) {
        self.toggle();
        self.events.push(AutomatonEvent::CellClick {
            x: self.x,
            y: self.y,
            alive: self.alive,
        });
    }

    /// Back to a fresh dead cell. Rules and position are kept; no event.
    pub fn reset(&mut self) {
        self.alive = false;
        self.age = 0;
        self.generation = 0;
        self.neighbor_count = 0;
        self.pending = None;
    }

    /// Take all pending events.
    pub fn drain_events(&mut self) -> Vec<AutomatonEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn drain_events_into(&mut self, out: &mut Vec<AutomatonEvent>) {
        out.append(&mut self.events);
    }

    fn emit_state_change(&mut self, old_alive: bool) {
        self.events.push(AutomatonEvent::StateChange {
            old_alive,
            new_alive: self.alive,
            x: self.x,
            y: self.y,
            age: self.age,
            generation: self.generation,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_dead() {
        let cell = Cell::new(2, 3);
        assert!(!cell.alive());
        assert_eq!((cell.x(), cell.y()), (2, 3));
        assert_eq!(cell.age(), 0);
        assert_eq!(cell.pending(), None);
    }

    #[test]
    fn test_calculate_does_not_change_state() {
        let mut cell = Cell::new(0, 0);
        assert!(cell.calculate_next_state(3));
        assert!(!cell.alive());
        assert_eq!(cell.pending(), Some(true));
        assert_eq!(cell.neighbor_count(), 3);
        assert!(cell.drain_events().is_empty());
    }

    #[test]
    fn test_apply_without_calculate_is_noop() {
        let mut cell = Cell::new(0, 0);
        cell.apply_next_state();
        assert!(!cell.alive());
        assert_eq!(cell.generation(), 0);
        assert!(cell.drain_events().is_empty());
    }

    #[test]
    fn test_apply_birth_and_aging() {
        let mut cell = Cell::new(1, 1);
        cell.calculate_next_state(3);
        cell.apply_next_state();
        assert!(cell.alive());
        assert_eq!(cell.age(), 1);
        assert_eq!(cell.pending(), None);

        let events = cell.drain_events();
        assert_eq!(
            events,
            vec![AutomatonEvent::StateChange {
                old_alive: false,
                new_alive: true,
                x: 1,
                y: 1,
                age: 1,
                generation: 1,
            }]
        );

        cell.calculate_next_state(2);
        cell.apply_next_state();
        assert_eq!(cell.age(), 2);
        // Survival is not a state change.
        assert!(cell.drain_events().is_empty());

        cell.calculate_next_state(5);
        cell.apply_next_state();
        assert!(!cell.alive());
        assert_eq!(cell.age(), 0);
        assert_eq!(cell.drain_events().len(), 1);
    }

    #[test]
    fn test_set_alive_only_notifies_on_change() {
        let mut cell = Cell::new(0, 0);
        cell.set_alive(false);
        assert!(cell.drain_events().is_empty());

        cell.set_alive(true);
        assert_eq!(cell.age(), 1);
        assert_eq!(cell.drain_events().len(), 1);

        cell.set_alive(true);
        assert!(cell.drain_events().is_empty());

        cell.toggle();
        assert!(!cell.alive());
        assert_eq!(cell.age(), 0);
    }

    #[test]
    fn test_click_reports_new_state() {
        let mut cell = Cell::new(4, 5);
        cell.click();
        let events = cell.drain_events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            AutomatonEvent::CellClick {
                x: 4,
                y: 5,
                alive: true
            }
        );
    }

    #[test]
    fn test_reset() {
        let mut cell = Cell::new(0, 0);
        cell.set_alive(true);
        cell.calculate_next_state(2);
        cell.apply_next_state();
        cell.calculate_next_state(3);
        cell.drain_events();

        cell.reset();
        assert!(!cell.alive());
        assert_eq!(cell.age(), 0);
        assert_eq!(cell.generation(), 0);
        assert_eq!(cell.neighbor_count(), 0);
        assert_eq!(cell.pending(), None);
        assert!(cell.drain_events().is_empty());
    }

    #[test]
    fn test_set_rules_applies_to_next_calculation() {
        let mut cell = Cell::new(0, 0);
        cell.set_rules(RuleSet::SEEDS);
        assert!(cell.calculate_next_state(2));
        assert!(!Cell::new(0, 0).calculate_next_state(2));
    }

    #[test]
    fn test_event_json_shape() {
        let ev = AutomatonEvent::GenerationUpdate {
            generation: 4,
            population: 12,
        };
        let json = serde_json::to_value(ev).unwrap();
        assert_eq!(json["type"], "generation-update");
        assert_eq!(json["population"], 12);
    }
}
