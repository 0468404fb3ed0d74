//! Birth/survival rule sets in B/S notation.
//!
//! A rule set is two sets of neighbor counts (0-8). A dead cell is born when
//! its live-neighbor count is in `birth`; a live cell survives when its count
//! is in `survival`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Set of neighbor counts 0..=8, stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NeighborSet(u16);

const fn mask(counts: &[u8]) -> u16 {
    let mut bits = 0u16;
    let mut i = 0;
    while i < counts.len() {
        if counts[i] <= 8 {
            bits |= 1 << counts[i];
        }
        i += 1;
    }
    bits
}

impl NeighborSet {
    pub const EMPTY: NeighborSet = NeighborSet(0);

    /// Build from counts; values above 8 are ignored.
    pub const fn from_counts(counts: &[u8]) -> Self {
        Self(mask(counts))
    }

    pub fn contains(&self, count: u8) -> bool {
        count <= 8 && self.0 & (1 << count) != 0
    }

    pub fn insert(&mut self, count: u8) {
        if count <= 8 {
            self.0 |= 1 << count;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Counts in ascending order.
    pub fn counts(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=8u8).filter(move |&n| self.contains(n))
    }
}

/// Birth and survival neighbor counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RuleSet {
    pub birth: NeighborSet,
    pub survival: NeighborSet,
}

impl RuleSet {
    pub const CONWAY: RuleSet = RuleSet::from_counts(&[3], &[2, 3]);
    pub const HIGH_LIFE: RuleSet = RuleSet::from_counts(&[3, 6], &[2, 3]);
    pub const DAY_AND_NIGHT: RuleSet = RuleSet::from_counts(&[3, 6, 7, 8], &[3, 4, 6, 7, 8]);
    pub const SEEDS: RuleSet = RuleSet::from_counts(&[2], &[]);
    pub const LIFE_WITHOUT_DEATH: RuleSet =
        RuleSet::from_counts(&[3], &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
    pub const MAZE: RuleSet = RuleSet::from_counts(&[3], &[1, 2, 3, 4, 5]);
    pub const REPLICATOR: RuleSet = RuleSet::from_counts(&[1, 3, 5, 7], &[1, 3, 5, 7]);
    pub const TWO_BY_TWO: RuleSet = RuleSet::from_counts(&[3, 6], &[1, 2, 5]);

    /// Named presets, in catalog order.
    pub const PRESETS: [(&'static str, RuleSet); 8] = [
        ("conway", RuleSet::CONWAY),
        ("highlife", RuleSet::HIGH_LIFE),
        ("daynight", RuleSet::DAY_AND_NIGHT),
        ("seeds", RuleSet::SEEDS),
        ("lifewithoutdeath", RuleSet::LIFE_WITHOUT_DEATH),
        ("maze", RuleSet::MAZE),
        ("replicator", RuleSet::REPLICATOR),
        ("2x2", RuleSet::TWO_BY_TWO),
    ];

    pub const fn from_counts(birth: &[u8], survival: &[u8]) -> Self {
        Self {
            birth: NeighborSet::from_counts(birth),
            survival: NeighborSet::from_counts(survival),
        }
    }

    /// State after one generation for a cell with `alive_neighbors`.
    pub fn next_state(&self, alive: bool, alive_neighbors: u8) -> bool {
        if alive {
            self.survival.contains(alive_neighbors)
        } else {
            self.birth.contains(alive_neighbors)
        }
    }

    /// Look up a preset by name (case-insensitive; `-`, `_`, `&` and spaces ignored).
    pub fn preset(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' ' | '&'))
            .flat_map(char::to_lowercase)
            .collect();
        Self::PRESETS
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, rules)| *rules)
    }

    /// Parse B/S notation such as `B3/S23`, `b36/s23` or `S23/B3`.
    ///
    /// An empty side (`B2/S`) is an empty set.
    pub fn parse(s: &str) -> Option<Self> {
        let mut birth = None;
        let mut survival = None;
        for part in s.trim().split('/') {
            let mut chars = part.trim().chars();
            let target = match chars.next()?.to_ascii_uppercase() {
                'B' => &mut birth,
                'S' => &mut survival,
                _ => return None,
            };
            if target.is_some() {
                return None;
            }
            let mut set = NeighborSet::EMPTY;
            for ch in chars {
                let n = ch.to_digit(10)?;
                if n > 8 {
                    return None;
                }
                set.insert(n as u8);
            }
            *target = Some(set);
        }
        Some(Self {
            birth: birth?,
            survival: survival?,
        })
    }

    /// Canonical `B…/S…` notation.
    pub fn notation(&self) -> String {
        self.to_string()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::CONWAY
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for n in self.birth.counts() {
            write!(f, "{}", n)?;
        }
        write!(f, "/S")?;
        for n in self.survival.counts() {
            write!(f, "{}", n)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for RuleSet {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::preset(&value)
            .or_else(|| Self::parse(&value))
            .ok_or_else(|| format!("invalid rule set: {}", value))
    }
}

impl From<RuleSet> for String {
    fn from(value: RuleSet) -> Self {
        value.notation()
    }
}
