//! Random sources for the engine
//!
//! The engine only needs two kinds of draws: a uniform index into the symbol
//! alphabet and a uniform float in `[0, 1)`. Any [`rand::Rng`] provides both;
//! [`ScriptedRng`] replays fixed draws so outcomes can be pinned in tests.

use rand::Rng;

/// Uniform random draws consumed by the spin engine
pub trait SpinRng {
    /// Uniform index in `0..n`
    fn symbol_index(&mut self, n: usize) -> usize;

    /// Uniform float in `[0, 1)`
    fn unit(&mut self) -> f64;
}

impl<R: Rng + ?Sized> SpinRng for R {
    fn symbol_index(&mut self, n: usize) -> usize {
        self.random_range(0..n)
    }

    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Replays scripted draws in a loop.
///
/// Symbol indices and unit draws are kept in separate scripts, each cycling
/// independently. An empty unit script yields `0.0`.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    symbols: Vec<usize>,
    units: Vec<f64>,
    symbol_pos: usize,
    unit_pos: usize,
}

impl ScriptedRng {
    /// Cycle through `symbols` for every symbol draw
    pub fn new(symbols: impl Into<Vec<usize>>) -> Self {
        Self {
            symbols: symbols.into(),
            units: Vec::new(),
            symbol_pos: 0,
            unit_pos: 0,
        }
    }

    /// Builder: cycle through `units` for every unit draw
    pub fn with_units(mut self, units: impl Into<Vec<f64>>) -> Self {
        self.units = units.into();
        self
    }
}

impl SpinRng for ScriptedRng {
    fn symbol_index(&mut self, n: usize) -> usize {
        if self.symbols.is_empty() || n == 0 {
            return 0;
        }
        let value = self.symbols[self.symbol_pos % self.symbols.len()];
        self.symbol_pos += 1;
        value % n
    }

    fn unit(&mut self) -> f64 {
        if self.units.is_empty() {
            return 0.0;
        }
        let value = self.units[self.unit_pos % self.units.len()];
        self.unit_pos += 1;
        value
    }
}
