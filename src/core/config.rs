//! Runtime configuration. The level layout itself is hard-coded in
//! [`crate::scroll::layout`]; only presentation and randomness are tunable.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Which of the two scene presentations to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneVariant {
    /// Dimmed field with a start prompt while the run has not started.
    #[default]
    Prompted,
    /// No overlay; the field is drawn as-is until the first press.
    Plain,
}

impl SceneVariant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Prompted => "Prompted",
            Self::Plain => "Plain",
        }
    }

    pub fn shows_start_overlay(&self) -> bool {
        matches!(self, Self::Prompted)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GameConfig {
    /// Seed for cloud placement and cluster respawns. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub variant: SceneVariant,
}

impl GameConfig {
    /// Build the random generator the scene owns for its lifetime.
    pub fn make_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
