//! Search configuration parameters.

/// How rewards are applied while walking from the evaluated node back to
/// the root.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum BackpropMode {
    /// Add the identical reward at every node on the path. The reward is
    /// computed relative to the evaluated node's side to move and never
    /// reinterpreted for the ancestors.
    #[default]
    SameSign,

    /// Textbook two-player convention: the evaluated node receives the
    /// negated reward (scoring it for the side whose move created it) and
    /// the sign alternates once per edge on the way up.
    AlternateSign,
}

/// Search configuration parameters.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Number of simulations per `select_move` call. This is the only
    /// budget control; there are no timeouts.
    pub iterations: usize,

    /// UCT exploration constant used while descending the tree. Final move
    /// extraction always uses 0 (pure exploitation) regardless of this
    /// value.
    pub exploration: f32,

    /// Reward propagation convention.
    pub backprop: BackpropMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: 50,
            exploration: std::f32::consts::SQRT_2,
            backprop: BackpropMode::SameSign,
        }
    }
}

impl SearchConfig {
    /// Create a config with the specified iteration budget.
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    /// Switch the reward propagation convention.
    pub fn with_backprop(mut self, backprop: BackpropMode) -> Self {
        self.backprop = backprop;
        self
    }
}
