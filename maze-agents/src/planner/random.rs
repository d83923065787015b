use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use types::{GridCoord, Move, WalkabilityMatrix};

use super::{Planner, PlannerView};
use crate::search::SearchOutcome;

/// How far a random stroll goes before the walker decides again
const MAX_STROLL: usize = 3;

#[derive(Debug, Clone)]
/// Wanders around without looking at the goals
///
/// Standing on a ladder that goes further up, it climbs to the top half of the time and hops off
/// to a random side there. Otherwise it strolls a few cells left or right, turning around when a
/// wall is in the way.
pub struct RandomWalker {
    rng: StdRng,
}

impl RandomWalker {
    /// A walker whose choices are the same for the same seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn climb(&mut self, w: &WalkabilityMatrix, position: GridCoord) -> Option<Vec<GridCoord>> {
        let mut path = vec![position];
        let mut top = position;
        while w.is_ladder(top.step(Move::Up)) {
            top = top.step(Move::Up);
            path.push(top);
        }

        let exits: Vec<_> = [Move::Left, Move::Right]
            .into_iter()
            .map(|m| top.step(m))
            .filter(|c| w.is_walkable(*c))
            .collect();
        path.push(*exits.choose(&mut self.rng)?);

        Some(path)
    }

    fn stroll(&mut self, w: &WalkabilityMatrix, position: GridCoord) -> Option<Vec<GridCoord>> {
        let left_open = w.is_walkable(position.step(Move::Left));
        let right_open = w.is_walkable(position.step(Move::Right));

        let direction = match (left_open, right_open) {
            (false, false) => return None,
            (false, true) => Move::Right,
            (true, false) => Move::Left,
            (true, true) => *[Move::Left, Move::Right].choose(&mut self.rng)?,
        };

        let length = self.rng.gen_range(1..=MAX_STROLL);
        let mut path = vec![position];
        let mut at = position;
        for _ in 0..length {
            let next = at.step(direction);
            if !w.is_walkable(next) {
                break;
            }
            path.push(next);
            at = next;
        }

        Some(path)
    }
}

impl Default for RandomWalker {
    fn default() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Planner for RandomWalker {
    fn name(&self) -> &'static str {
        "random"
    }

    fn plan(&mut self, position: GridCoord, view: &PlannerView) -> Option<SearchOutcome> {
        let w = view.walkability;

        let path = if w.is_ladder(position.step(Move::Up)) && self.rng.gen_bool(0.5) {
            self.climb(w, position)
                .or_else(|| self.stroll(w, position))?
        } else {
            self.stroll(w, position)?
        };

        Some(SearchOutcome {
            visited: vec![],
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::test_view::*;

    fn assert_connected(path: &[GridCoord]) {
        for (a, b) in path.iter().zip(path.iter().skip(1)) {
            assert_eq!(a.manhattan(b), 1, "{} -> {} is not a single step", a, b);
        }
    }

    #[test]
    fn test_random_paths_are_walkable_and_connected() {
        let loaded = arena();
        let view = PlannerView {
            walkability: &loaded.walkability,
            goals: &loaded.goals,
            state: None,
        };
        let mut walker = RandomWalker::seeded(7);
        let mut position = loaded.start;

        for _ in 0..50 {
            let outcome = walker.plan(position, &view).unwrap();

            assert_eq!(outcome.path[0], position);
            assert!(outcome.path.len() >= 2);
            assert!(outcome
                .path
                .iter()
                .all(|c| loaded.walkability.is_walkable(*c)));
            assert_connected(&outcome.path);

            position = outcome.target().unwrap();
        }
    }

    #[test]
    fn test_same_seed_same_walk() {
        let loaded = arena();
        let view = PlannerView {
            walkability: &loaded.walkability,
            goals: &loaded.goals,
            state: None,
        };
        let mut a = RandomWalker::seeded(42);
        let mut b = RandomWalker::seeded(42);

        for _ in 0..10 {
            assert_eq!(
                a.plan(loaded.start, &view),
                b.plan(loaded.start, &view)
            );
        }
    }

    #[test]
    fn test_climbs_to_the_top_before_hopping_off() {
        let loaded = small();
        let view = PlannerView {
            walkability: &loaded.walkability,
            goals: &loaded.goals,
            state: None,
        };
        let mut walker = RandomWalker::seeded(1);

        let climbs: Vec<_> = (0..20)
            .filter_map(|_| walker.plan(GridCoord::new(3, 3), &view))
            .filter(|o| o.path.contains(&GridCoord::new(2, 3)))
            .collect();

        assert!(!climbs.is_empty());
        for climb in climbs {
            assert_eq!(
                &climb.path[..3],
                &[GridCoord::new(3, 3), GridCoord::new(2, 3), GridCoord::new(1, 3)]
            );
            assert_eq!(climb.target().unwrap().row, 1);
        }
    }

    #[test]
    fn test_boxed_in_walker_stays_put() {
        let loaded = small();
        let view = PlannerView {
            walkability: &loaded.walkability,
            goals: &loaded.goals,
            state: None,
        };

        // Off the map there are no neighbours at all
        assert!(RandomWalker::seeded(3)
            .plan(GridCoord::new(-5, -5), &view)
            .is_none());
    }
}
