//! Level themes and the shuffled level deck
//!
//! A theme is a named, fixed list of mechanics. Level 1 is always the
//! Tutorial; every later level draws the next theme from the deck.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

use super::mechanics::{Mechanic, MechanicKind};
use crate::error::EngineError;

/// A level's mechanics plus the caption shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTheme {
    pub name: &'static str,
    pub summary: &'static str,
    pub mechanics: &'static [Mechanic],
}

impl LevelTheme {
    pub const fn new(
        name: &'static str,
        summary: &'static str,
        mechanics: &'static [Mechanic],
    ) -> Self {
        Self {
            name,
            summary,
            mechanics,
        }
    }

    pub fn is_tutorial(&self) -> bool {
        *self == TUTORIAL
    }
}

impl Default for LevelTheme {
    fn default() -> Self {
        TUTORIAL
    }
}

pub const TUTORIAL: LevelTheme = LevelTheme::new(
    "Tutorial",
    "Clear the swarm. Arrows move, Space fires, F toggles fast fire, N drops a nuke.",
    &[],
);

const fn m(kind: MechanicKind, chance: u32) -> Mechanic {
    Mechanic::new(kind, chance)
}

/// The standard catalog: one theme per base mechanic plus the composites
pub const THEMES: &[LevelTheme] = &[
    LevelTheme::new(
        "Power Surge",
        "Green crates fall from above. Catch one to unlock fast fire.",
        &[m(MechanicKind::PowerUp, 4)],
    ),
    LevelTheme::new(
        "Gold Rush",
        "Gold coins rain down. Each one you catch is worth 50 points.",
        &[m(MechanicKind::ScorePickup, 8)],
    ),
    LevelTheme::new(
        "Meteor Shower",
        "Meteors streak across the sky. A hit costs 50 points and knocks you back to center.",
        &[m(MechanicKind::MeteorShower, 15)],
    ),
    LevelTheme::new(
        "Acid Rain",
        "Corrosive drops fall fast. Each one that lands on you costs 20 points.",
        &[m(MechanicKind::AcidRain, 40)],
    ),
    LevelTheme::new(
        "Minefield",
        "Mines drift down slowly. Shoot them before they reach you or lose 40 points.",
        &[m(MechanicKind::Minefield, 8)],
    ),
    LevelTheme::new(
        "Air Raid",
        "Bombers cross the sky and drop bombs. A bomb hit costs 30 points.",
        &[m(MechanicKind::EnemyBomber, 4)],
    ),
    LevelTheme::new(
        "Laser Grid",
        "Laser beams sweep the field, burning your shots. Touching one costs 35 points.",
        &[m(MechanicKind::LaserSweep, 3)],
    ),
    LevelTheme::new(
        "Thunderstorm",
        "Lightning strikes where the sky glows. Move out of the column or lose 25 points.",
        &[m(MechanicKind::LightningStrike, 6)],
    ),
    LevelTheme::new(
        "Gravity Well",
        "Purple wells bend your bullets toward their core.",
        &[m(MechanicKind::GravityWell, 3)],
    ),
    LevelTheme::new(
        "Event Horizon",
        "Black holes swallow bullets and tug at your ship.",
        &[m(MechanicKind::BlackHole, 2)],
    ),
    LevelTheme::new(
        "Magnetic Storm",
        "Magnetic fields push the swarm and your shots sideways.",
        &[m(MechanicKind::MagneticField, 3)],
    ),
    LevelTheme::new(
        "Wormholes",
        "Shots that enter a portal come out somewhere else.",
        &[m(MechanicKind::WarpPortal, 3)],
    ),
    LevelTheme::new(
        "Fog of War",
        "Dense fog hides everything beyond your immediate surroundings.",
        &[m(MechanicKind::FogOfWar, 2)],
    ),
    LevelTheme::new(
        "Time Warp",
        "Time bubbles slow the swarm to a crawl.",
        &[m(MechanicKind::TimeWarp, 3)],
    ),
    LevelTheme::new(
        "Fire Support",
        "Allied turrets deploy near the ground and fire on the swarm.",
        &[m(MechanicKind::TurretAlly, 3)],
    ),
    LevelTheme::new(
        "Smart Munitions",
        "Homing missiles launch from your ship. Each kill is worth 20 points.",
        &[m(MechanicKind::HomingMissile, 5)],
    ),
    LevelTheme::new(
        "Reinforcements",
        "Drop pods bring fresh enemies to the swarm. Finish it fast.",
        &[m(MechanicKind::Reinforcements, 4)],
    ),
    LevelTheme::new(
        "Barricades",
        "Patrolling barriers block your shots.",
        &[m(MechanicKind::MovingObstacle, 3)],
    ),
    LevelTheme::new(
        "Solar Flare",
        "The sun flares without warning and washes out the screen.",
        &[m(MechanicKind::SolarFlare, 2)],
    ),
    LevelTheme::new(
        "Danger Zone",
        "Meteors and bombers at once. Keep moving.",
        &[
            m(MechanicKind::MeteorShower, 10),
            m(MechanicKind::EnemyBomber, 3),
        ],
    ),
    LevelTheme::new(
        "Armory",
        "Power-ups and allied turrets. Make the most of the firepower.",
        &[m(MechanicKind::PowerUp, 4), m(MechanicKind::TurretAlly, 3)],
    ),
    LevelTheme::new(
        "Chaos Theory",
        "Gravity, magnetism, and acid all at once.",
        &[
            m(MechanicKind::GravityWell, 2),
            m(MechanicKind::MagneticField, 2),
            m(MechanicKind::AcidRain, 25),
        ],
    ),
];

/// Shuffled, self-refilling sequence of themes
#[derive(Debug, Clone)]
pub struct LevelDeck {
    catalog: Vec<LevelTheme>,
    order: Vec<LevelTheme>,
    cursor: usize,
    rng: Pcg32,
}

impl LevelDeck {
    /// Deck over the standard catalog
    pub fn standard(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let catalog = THEMES.to_vec();
        let mut order = catalog.clone();
        order.shuffle(&mut rng);
        Self {
            catalog,
            order,
            cursor: 0,
            rng,
        }
    }

    /// Deck over a custom catalog
    pub fn with_themes(themes: Vec<LevelTheme>, seed: u64) -> Result<Self, EngineError> {
        if themes.is_empty() {
            return Err(EngineError::EmptyDeck);
        }
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut order = themes.clone();
        order.shuffle(&mut rng);
        Ok(Self {
            catalog: themes,
            order,
            cursor: 0,
            rng,
        })
    }

    /// Draw the next theme, reshuffling once a full pass is used up
    pub fn next(&mut self) -> LevelTheme {
        if self.cursor >= self.order.len() {
            self.reshuffle();
        }
        let theme = self.order[self.cursor];
        self.cursor += 1;
        theme
    }

    /// Start a fresh pass (new game or restart)
    pub fn reset(&mut self) {
        self.reshuffle();
    }

    fn reshuffle(&mut self) {
        self.order.clone_from(&self.catalog);
        self.order.shuffle(&mut self.rng);
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Themes left before the next reshuffle
    pub fn remaining(&self) -> usize {
        self.order.len() - self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::mechanics::CHANCE_DENOMINATOR;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_shape() {
        assert_eq!(THEMES.len(), 22);
        let names: HashSet<_> = THEMES.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), THEMES.len());
        assert!(!names.contains(TUTORIAL.name));
        assert!(TUTORIAL.mechanics.is_empty());
        assert!(TUTORIAL.is_tutorial());
    }

    #[test]
    fn test_every_base_mechanic_has_a_theme() {
        for kind in MechanicKind::ALL {
            assert!(
                THEMES
                    .iter()
                    .any(|t| t.mechanics.len() == 1 && t.mechanics[0].kind == kind),
                "{kind:?}"
            );
        }
    }

    #[test]
    fn test_chances_are_valid() {
        for theme in THEMES {
            assert!(!theme.mechanics.is_empty(), "{}", theme.name);
            for mechanic in theme.mechanics {
                assert!(mechanic.chance <= CHANCE_DENOMINATOR);
            }
        }
    }

    #[test]
    fn test_full_pass_draws_each_theme_once() {
        let mut deck = LevelDeck::standard(42);
        let drawn: HashSet<_> = (0..deck.len()).map(|_| deck.next().name).collect();
        assert_eq!(drawn.len(), THEMES.len());
        assert_eq!(deck.remaining(), 0);
        // Never runs dry
        let _ = deck.next();
        assert_eq!(deck.remaining(), THEMES.len() - 1);
    }

    #[test]
    fn test_same_seed_same_order() {
        let mut a = LevelDeck::standard(7);
        let mut b = LevelDeck::standard(7);
        for _ in 0..50 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn test_reset_rewinds() {
        let mut deck = LevelDeck::standard(9);
        deck.next();
        deck.next();
        deck.reset();
        assert_eq!(deck.remaining(), THEMES.len());
    }

    #[test]
    fn test_empty_deck_rejected() {
        assert!(matches!(
            LevelDeck::with_themes(Vec::new(), 1),
            Err(EngineError::EmptyDeck)
        ));
        let mut single = LevelDeck::with_themes(vec![THEMES[0]], 1).unwrap();
        for _ in 0..3 {
            assert_eq!(single.next(), THEMES[0]);
        }
    }
}
