/*
 * Food Module
 *
 * Stationary food items and the pool that owns them. The pool keeps a fixed
 * number of items for its whole life: whenever something is eaten, a new item
 * appears at a random spot in the same operation.
 */

use rand::Rng;
use tracing::debug;

use crate::bird::Bird;
use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Food {
    pub position: Point,
}

impl Food {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Point::new(x, y),
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Self {
        let x = rng.gen_range(0.0..width);
        let y = rng.gen_range(0.0..height);
        Self::new(x, y)
    }
}

#[derive(Debug, Clone)]
pub struct FoodPool {
    items: Vec<Food>,
    width: f32,
    height: f32,
    consumed: u64,
}

impl FoodPool {
    pub fn new<R: Rng + ?Sized>(count: usize, width: f32, height: f32, rng: &mut R) -> Self {
        let items = (0..count).map(|_| Food::random(rng, width, height)).collect();
        Self::from_items(items, width, height)
    }

    // Pool with explicit item positions, used for scripted scenarios
    pub fn from_items(items: Vec<Food>, width: f32, height: f32) -> Self {
        Self {
            items,
            width,
            height,
            consumed: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Food> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Food] {
        &self.items
    }

    // Items eaten over the pool's lifetime
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Eats every item strictly closer than `radius` to `position` and returns
    /// how many were eaten.
    ///
    /// The decision is made over the pool as it was on entry. Eaten items are
    /// then removed, keeping the order of the survivors, and one replacement per
    /// eaten item is appended in the order the eaten items were found. Each
    /// replacement draws x then y from `rng`.
    pub fn consume_near<R: Rng + ?Sized>(&mut self, position: Point, radius: f32, rng: &mut R) -> usize {
        let eaten: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, food)| position.distance(food.position) < radius)
            .map(|(index, _)| index)
            .collect();

        if eaten.is_empty() {
            return 0;
        }

        for &index in eaten.iter().rev() {
            self.items.remove(index);
        }

        for _ in &eaten {
            let replacement = Food::random(rng, self.width, self.height);
            debug!(
                x = replacement.position.x,
                y = replacement.position.y,
                "food respawned"
            );
            self.items.push(replacement);
        }

        self.consumed += eaten.len() as u64;
        eaten.len()
    }

    // Let `bird` eat whatever is inside its body radius
    pub fn try_consume<R: Rng + ?Sized>(&mut self, bird: &Bird, rng: &mut R) -> bool {
        self.consume_near(bird.position(), bird.size(), rng) > 0
    }
}
