//! Dice rolling seam
//!
//! Resolution never touches a global RNG. Any `rand` generator can roll
//! dice; tests and replays use [`FixedRolls`].

use rand::{Rng, RngCore};

pub trait DiceRoller {
    /// Roll one die, returning a value in `1..=sides`
    fn roll(&mut self, sides: u32) -> u32;

    fn d20(&mut self) -> u32 {
        self.roll(20)
    }
}

impl<R: RngCore> DiceRoller for R {
    fn roll(&mut self, sides: u32) -> u32 {
        self.gen_range(1..=sides.max(1))
    }
}

/// Replays a fixed sequence of rolls, cycling when exhausted
///
/// Values are clamped into the die's range.
#[derive(Debug, Clone)]
pub struct FixedRolls {
    rolls: Vec<u32>,
    next: usize,
}

impl FixedRolls {
    pub fn new(rolls: impl Into<Vec<u32>>) -> Self {
        Self {
            rolls: rolls.into(),
            next: 0,
        }
    }

    /// Attacker roll followed by defender roll
    pub fn pair(attacker: u32, defender: u32) -> Self {
        Self::new(vec![attacker, defender])
    }
}

impl DiceRoller for FixedRolls {
    fn roll(&mut self, sides: u32) -> u32 {
        let sides = sides.max(1);
        if self.rolls.is_empty() {
            return 1;
        }
        let value = self.rolls[self.next % self.rolls.len()];
        self.next += 1;
        value.clamp(1, sides)
    }
}
