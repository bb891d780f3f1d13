/*
 * Simulation Module
 *
 * The Simulation owns every bird, the food pool and the random source. A
 * driver calls `step` once per logical tick and reads state between calls;
 * nothing else mutates birds or food.
 *
 * A tick processes birds in index order. For each bird:
 * 1. Jitter heading, maybe accelerate, move and wrap
 * 2. Eat any food inside the body radius (eaten food respawns at once)
 *
 * Because birds are handled one at a time, the first bird to reach a contested
 * item eats it and the next bird only sees its replacement.
 */

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info, trace, warn};

use crate::bird::Bird;
use crate::error::{ConfigError, InvariantViolation};
use crate::food::{Food, FoodPool};
use crate::params::SimulationParams;
use crate::perception::VisibleFood;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub ticks: u64,
    pub food_eaten: u64,
    pub eaten_last_tick: u64,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    params: SimulationParams,
    birds: Vec<Bird>,
    food: FoodPool,
    rng: SmallRng,
    state: SimState,
    stats: SimulationStats,
}

impl Simulation {
    pub fn new(
        width: f32,
        height: f32,
        num_birds: usize,
        num_food: usize,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::from_params(SimulationParams::with_arena(width, height, num_birds, num_food, seed))
    }

    pub fn from_params(params: SimulationParams) -> Result<Self, ConfigError> {
        params.validate()?;

        let mut rng = SmallRng::seed_from_u64(params.seed);

        let birds: Vec<Bird> = (0..params.num_birds)
            .map(|_| Bird::random(&mut rng, params.width, params.height, &params.bird))
            .collect();
        let food = FoodPool::new(params.num_food, params.width, params.height, &mut rng);

        info!(
            width = params.width,
            height = params.height,
            birds = birds.len(),
            food = food.len(),
            seed = params.seed,
            "simulation created"
        );

        Ok(Self {
            params,
            birds,
            food,
            rng,
            state: SimState::Running,
            stats: SimulationStats::default(),
        })
    }

    /// Builds a simulation from explicit placements.
    ///
    /// The bird and food counts in `params` are replaced by the lengths of the
    /// given collections. Every placement must lie inside the arena and every
    /// bird must carry usable tuning, so the result satisfies
    /// [`Simulation::check_invariants`] before its first tick.
    pub fn from_state(
        mut params: SimulationParams,
        birds: Vec<Bird>,
        food: Vec<Food>,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        params.num_birds = birds.len();
        params.num_food = food.len();
        params.seed = seed;
        params.validate()?;

        for (index, bird) in birds.iter().enumerate() {
            if let Some((field, value)) = bird.invalid_field() {
                return Err(ConfigError::InvalidBird { index, field, value });
            }
            let p = bird.position();
            if !params.contains(p.x, p.y) {
                return Err(outside(&params, "bird", p.x, p.y));
            }
        }
        for item in &food {
            let p = item.position;
            if !params.contains(p.x, p.y) {
                return Err(outside(&params, "food", p.x, p.y));
            }
        }

        info!(birds = birds.len(), food = food.len(), seed, "simulation created from state");

        let pool = FoodPool::from_items(food, params.width, params.height);
        Ok(Self {
            params,
            birds,
            food: pool,
            rng: SmallRng::seed_from_u64(seed),
            state: SimState::Running,
            stats: SimulationStats::default(),
        })
    }

    // Advance one tick
    pub fn step(&mut self) {
        if self.state == SimState::Stopped {
            warn!(tick = self.stats.ticks, "step called on a stopped simulation");
            return;
        }

        let width = self.params.width;
        let height = self.params.height;
        let mut eaten_this_tick = 0;

        for (index, bird) in self.birds.iter_mut().enumerate() {
            bird.update(&self.params.bird, width, height, &mut self.rng);

            let before = self.food.consumed();
            if self.food.try_consume(bird, &mut self.rng) {
                let eaten = self.food.consumed() - before;
                bird.record_meals(eaten);
                eaten_this_tick += eaten;
                debug!(
                    tick = self.stats.ticks,
                    bird = index,
                    x = bird.position().x,
                    y = bird.position().y,
                    eaten,
                    "bird ate"
                );
            }
        }

        self.stats.ticks += 1;
        self.stats.food_eaten += eaten_this_tick;
        self.stats.eaten_last_tick = eaten_this_tick;
        trace!(tick = self.stats.ticks, eaten = eaten_this_tick, "tick complete");

        debug_assert!(
            self.check_invariants().is_ok(),
            "invariant violated after tick {}: {:?}",
            self.stats.ticks,
            self.check_invariants()
        );
    }

    // Terminal: later calls to `step` do nothing
    pub fn stop(&mut self) {
        if self.state == SimState::Running {
            info!(tick = self.stats.ticks, food_eaten = self.stats.food_eaten, "simulation stopped");
        }
        self.state = SimState::Stopped;
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SimState::Running
    }

    pub fn tick(&self) -> u64 {
        self.stats.ticks
    }

    pub fn stats(&self) -> SimulationStats {
        self.stats
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn birds(&self) -> &[Bird] {
        &self.birds
    }

    pub fn food(&self) -> &[Food] {
        self.food.as_slice()
    }

    pub fn visible_food<'a>(&'a self, bird: &Bird) -> VisibleFood<'a> {
        VisibleFood::new(bird, &self.food)
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.food.len() != self.params.num_food {
            return Err(InvariantViolation::PoolSize {
                expected: self.params.num_food,
                actual: self.food.len(),
            });
        }

        for (index, bird) in self.birds.iter().enumerate() {
            let speed = bird.speed();
            if !(bird.min_speed()..=bird.max_speed()).contains(&speed) {
                return Err(InvariantViolation::Speed {
                    index,
                    speed,
                    min: bird.min_speed(),
                    max: bird.max_speed(),
                });
            }

            let p = bird.position();
            if !self.params.contains(p.x, p.y) {
                return Err(InvariantViolation::Position { index, x: p.x, y: p.y });
            }
        }

        Ok(())
    }
}

fn outside(params: &SimulationParams, what: &'static str, x: f32, y: f32) -> ConfigError {
    ConfigError::OutsideArena {
        what,
        x,
        y,
        width: params.width,
        height: params.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::BirdParams;

    fn still_params() -> SimulationParams {
        SimulationParams {
            bird: BirdParams {
                steer_jitter: 0.0,
                acceleration_chance: 0.0,
                ..BirdParams::default()
            },
            ..SimulationParams::default()
        }
    }

    #[test]
    fn new_populates_arena() {
        let sim = Simulation::new(800.0, 600.0, 10, 20, 42).unwrap();
        assert_eq!(sim.birds().len(), 10);
        assert_eq!(sim.food().len(), 20);
        assert_eq!(sim.state(), SimState::Running);
        assert_eq!(sim.tick(), 0);
        assert!(sim.check_invariants().is_ok());
    }

    #[test]
    fn construction_rejects_bad_arguments() {
        assert!(matches!(
            Simulation::new(-1.0, 600.0, 1, 1, 0),
            Err(ConfigError::InvalidDimension { .. })
        ));
        assert!(matches!(
            Simulation::new(800.0, 600.0, 0, 1, 0),
            Err(ConfigError::NoBirds)
        ));
        assert!(matches!(
            Simulation::new(800.0, 600.0, 1, 0, 0),
            Err(ConfigError::NoFood)
        ));
    }

    #[test]
    fn from_state_rejects_out_of_arena_placements() {
        let params = still_params();
        let bird = Bird::new(800.0, 10.0, 0.0, &params.bird);
        let result = Simulation::from_state(params.clone(), vec![bird], vec![Food::new(1.0, 1.0)], 0);
        assert!(matches!(result, Err(ConfigError::OutsideArena { what: "bird", .. })));

        let bird = Bird::new(10.0, 10.0, 0.0, &params.bird);
        let result = Simulation::from_state(params, vec![bird], vec![Food::new(1.0, -1.0)], 0);
        assert!(matches!(result, Err(ConfigError::OutsideArena { what: "food", .. })));
    }

    #[test]
    fn from_state_rejects_birds_with_unusable_tuning() {
        let params = still_params();
        let fast_start = BirdParams {
            initial_speed: 6.0,
            ..BirdParams::default()
        };
        let bird = Bird::new(100.0, 100.0, 0.0, &fast_start);
        let result = Simulation::from_state(params.clone(), vec![bird], vec![Food::new(1.0, 1.0)], 1);
        assert!(matches!(result, Err(ConfigError::InvalidBird { index: 0, .. })));

        let good = Bird::new(100.0, 100.0, 0.0, &params.bird);
        let tiny = BirdParams {
            size: -3.0,
            ..BirdParams::default()
        };
        let bad = Bird::new(200.0, 100.0, 0.0, &tiny);
        let result = Simulation::from_state(params.clone(), vec![good, bad], vec![Food::new(1.0, 1.0)], 1);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidBird { index: 1, field: "size", .. })
        ));

        let lost = Bird::new(100.0, 100.0, f32::INFINITY, &params.bird);
        let result = Simulation::from_state(params, vec![lost], vec![Food::new(1.0, 1.0)], 1);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidBird { field: "heading", .. })
        ));
    }

    #[test]
    fn accepted_state_satisfies_invariants_and_steps() {
        let params = still_params();
        let bird = Bird::new(100.0, 100.0, 0.0, &params.bird).with_speed(4.0).unwrap();
        let mut sim = Simulation::from_state(params, vec![bird], vec![Food::new(500.0, 500.0)], 1).unwrap();

        assert!(sim.check_invariants().is_ok());
        sim.step();
        assert!(sim.check_invariants().is_ok());
        assert!((sim.birds()[0].position().x - 104.0).abs() < 1e-3);
    }

    #[test]
    fn step_counts_ticks_and_meals() {
        let params = still_params();
        let bird = Bird::new(100.0, 100.0, 0.0, &params.bird);
        let food = vec![Food::new(110.0, 100.0), Food::new(700.0, 500.0)];
        let mut sim = Simulation::from_state(params, vec![bird], food, 9).unwrap();

        sim.step();

        assert_eq!(sim.tick(), 1);
        assert_eq!(sim.stats().food_eaten, 1);
        assert_eq!(sim.stats().eaten_last_tick, 1);
        assert_eq!(sim.birds()[0].meals(), 1);
        assert_eq!(sim.food().len(), 2);
        assert_eq!(sim.food()[0], Food::new(700.0, 500.0));
    }

    #[test]
    fn first_bird_wins_a_contested_item() {
        let params = still_params();
        let first = Bird::new(100.0, 100.0, 0.0, &params.bird);
        let second = Bird::new(106.0, 100.0, std::f32::consts::PI, &params.bird);
        let food = vec![Food::new(104.0, 100.0)];
        let mut sim = Simulation::from_state(params, vec![first, second], food, 1).unwrap();

        sim.step();

        // The replacement lands somewhere random; only the first bird ate the original
        assert_eq!(sim.birds()[0].meals(), 1);
        assert_eq!(sim.food().len(), 1);
        assert_ne!(sim.food()[0], Food::new(104.0, 100.0));
    }

    #[test]
    fn two_birds_eat_different_items_in_one_tick() {
        let params = still_params();
        let left = Bird::new(100.0, 100.0, 0.0, &params.bird);
        let right = Bird::new(500.0, 400.0, 0.0, &params.bird);
        // Each bird ends the tick 8 away from its own item and far from the other
        let food = vec![Food::new(110.0, 100.0), Food::new(510.0, 400.0), Food::new(300.0, 50.0)];
        let mut sim = Simulation::from_state(params, vec![left, right], food, 4).unwrap();

        sim.step();

        assert_eq!(sim.birds()[0].meals(), 1);
        assert_eq!(sim.birds()[1].meals(), 1);
        assert_eq!(sim.stats().eaten_last_tick, 2);
        assert_eq!(sim.stats().food_eaten, 2);
        assert_eq!(sim.food().len(), 3);
        assert_eq!(sim.food()[0], Food::new(300.0, 50.0));
    }

    #[test]
    fn stopped_simulation_does_not_advance() {
        let mut sim = Simulation::new(800.0, 600.0, 3, 3, 5).unwrap();
        sim.step();
        sim.stop();
        let birds = sim.birds().to_vec();

        sim.step();
        sim.step();

        assert_eq!(sim.state(), SimState::Stopped);
        assert!(!sim.is_running());
        assert_eq!(sim.tick(), 1);
        assert_eq!(sim.birds(), birds.as_slice());
    }

    #[test]
    fn visible_food_reflects_the_current_pool() {
        let params = still_params();
        let bird = Bird::new(400.0, 300.0, 0.0, &params.bird);
        let food = vec![Food::new(430.0, 300.0), Food::new(100.0, 100.0)];
        let sim = Simulation::from_state(params, vec![bird], food, 2).unwrap();

        let bird = &sim.birds()[0];
        let seen: Vec<&Food> = sim.visible_food(bird).collect();
        assert_eq!(seen, vec![&Food::new(430.0, 300.0)]);
    }
}
