//! A tiling session: one base shape and every generation grown from it so far.

use tracing::debug;

use crate::bake::{BakedInstance, bake};
use crate::error::{Result, TilingError};
use crate::hidden::HiddenSet;
use crate::shapes::BaseShape;
use crate::substitution::substitute;
use crate::tile::{Node, Role, TileSystem};

/// Default cap on grown generations; leaf counts grow roughly eightfold per step.
pub const DEFAULT_MAX_GENERATIONS: usize = 6;

pub struct Tiling {
    shape: BaseShape,
    generations: Vec<TileSystem>,
    max_generations: usize,
}

impl Tiling {
    /// Builds generation 0 for `shape`.
    pub fn new(shape: BaseShape) -> Result<Self> {
        Ok(Self {
            shape,
            generations: vec![shape.build()?],
            max_generations: DEFAULT_MAX_GENERATIONS,
        })
    }

    pub fn with_max_generations(mut self, max: usize) -> Self {
        self.max_generations = max;
        self
    }

    pub fn shape(&self) -> BaseShape {
        self.shape
    }

    pub fn max_generations(&self) -> usize {
        self.max_generations
    }

    /// Index of the newest generation (0 right after construction).
    pub fn generation(&self) -> usize {
        self.generations.len() - 1
    }

    pub fn system(&self, generation: usize) -> Result<&TileSystem> {
        self.generations.get(generation).ok_or(TilingError::GenerationOutOfRange {
            requested: generation,
            available: self.generations.len(),
        })
    }

    pub fn current(&self) -> &TileSystem {
        // never empty: generation 0 is built in `new`
        &self.generations[self.generations.len() - 1]
    }

    /// Grows one generation and returns its index.
    pub fn substitute(&mut self) -> Result<usize> {
        if self.generation() >= self.max_generations {
            return Err(TilingError::GenerationLimit { limit: self.max_generations });
        }
        let next = substitute(self.current())?;
        self.generations.push(next);
        debug!(shape = %self.shape, generation = self.generation(), "substituted");
        Ok(self.generation())
    }

    /// Grows until `generation` exists.
    pub fn grow_to(&mut self, generation: usize) -> Result<()> {
        while self.generation() < generation {
            self.substitute()?;
        }
        Ok(())
    }

    /// Drops every generation after 0.
    pub fn reset(&mut self) {
        self.generations.truncate(1);
    }

    pub fn root(&self, generation: usize, role: Role) -> Result<&Node> {
        self.system(generation)?
            .get(role)
            .ok_or(TilingError::MissingRole(role.as_str()))
    }

    /// Flattens `role` of `generation` under the given hidden set.
    pub fn bake(
        &self,
        generation: usize,
        role: Role,
        hidden: &HiddenSet,
        prune_hidden: bool,
    ) -> Result<Vec<BakedInstance>> {
        Ok(bake(self.root(generation, role)?, hidden, prune_hidden))
    }
}
