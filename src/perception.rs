/*
 * Perception Module
 *
 * Which food a bird can see. A query is a lazy iterator built fresh from the
 * current pool each time it is asked for, so nothing is cached between ticks.
 *
 * Visibility is decided by distance alone. The view cone is only drawn by the
 * presentation layer; callers that want food in front of the bird narrow the
 * query with `within_cone`.
 */

use crate::bird::Bird;
use crate::food::{Food, FoodPool};
use crate::geometry::{angle_in_cone, Point};

// Food strictly closer to the bird than its view distance
#[derive(Debug, Clone)]
pub struct VisibleFood<'a> {
    items: std::slice::Iter<'a, Food>,
    origin: Point,
    range: f32,
}

impl<'a> VisibleFood<'a> {
    pub fn new(bird: &Bird, pool: &'a FoodPool) -> Self {
        Self {
            items: pool.iter(),
            origin: bird.position(),
            range: bird.view_distance(),
        }
    }

    /// Narrows the query to food inside the bird's view cone.
    pub fn within_cone(self, bird: &Bird) -> impl Iterator<Item = &'a Food> + Clone + 'a {
        let origin = self.origin;
        let heading = bird.heading();
        let half_angle = bird.view_angle() / 2.0;
        self.filter(move |food| angle_in_cone(heading, half_angle, origin.angle_to(food.position)))
    }
}

impl<'a> Iterator for VisibleFood<'a> {
    type Item = &'a Food;

    fn next(&mut self) -> Option<Self::Item> {
        let origin = self.origin;
        let range = self.range;
        self.items
            .by_ref()
            .find(|food| origin.distance(food.position) < range)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.items.size_hint().1)
    }
}

pub fn visible_food<'a>(bird: &Bird, pool: &'a FoodPool) -> VisibleFood<'a> {
    VisibleFood::new(bird, pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::BirdParams;

    fn pool(points: &[(f32, f32)]) -> FoodPool {
        let items = points.iter().map(|&(x, y)| Food::new(x, y)).collect();
        FoodPool::from_items(items, 800.0, 600.0)
    }

    #[test]
    fn distance_alone_decides_visibility() {
        // View distance is 40; heading points right
        let bird = Bird::new(400.0, 300.0, 0.0, &BirdParams::default());
        let food = pool(&[
            (430.0, 300.0), // ahead
            (370.0, 300.0), // behind
            (400.0, 339.0), // to the side
            (440.0, 300.0), // exactly at the view distance
            (500.0, 300.0), // too far
        ]);

        let seen: Vec<Point> = visible_food(&bird, &food).map(|f| f.position).collect();
        assert_eq!(
            seen,
            vec![
                Point::new(430.0, 300.0),
                Point::new(370.0, 300.0),
                Point::new(400.0, 339.0),
            ]
        );
    }

    #[test]
    fn query_is_restartable() {
        let bird = Bird::new(400.0, 300.0, 0.0, &BirdParams::default());
        let food = pool(&[(410.0, 300.0), (420.0, 300.0)]);

        let query = visible_food(&bird, &food);
        assert_eq!(query.clone().count(), 2);
        assert_eq!(query.count(), 2);
    }

    #[test]
    fn cone_narrows_the_query() {
        let bird = Bird::new(400.0, 300.0, 0.0, &BirdParams::default());
        let food = pool(&[(430.0, 300.0), (370.0, 300.0), (420.0, 315.0), (400.0, 330.0)]);

        let ahead: Vec<Point> = visible_food(&bird, &food)
            .within_cone(&bird)
            .map(|f| f.position)
            .collect();
        assert_eq!(ahead, vec![Point::new(430.0, 300.0), Point::new(420.0, 315.0)]);
    }

    #[test]
    fn no_sight_across_the_edge() {
        let bird = Bird::new(795.0, 300.0, 0.0, &BirdParams::default());
        let food = pool(&[(5.0, 300.0)]);
        assert_eq!(visible_food(&bird, &food).count(), 0);
    }
}
