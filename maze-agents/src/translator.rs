//! Turning a planned path into one movement command per tick
//!
//! The character we drive only understands held-down directions. [MovementTranslator] looks at
//! where the character is now and where the path goes next and says which direction to hold. It
//! is a plain state machine with no clock of its own: the worker calls
//! [MovementTranslator::step] once per poll and publishes whatever comes out.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use types::{GridCoord, WalkabilityMatrix};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// The direction the character should hold this tick
pub enum MovementCommand {
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Down,
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Right,
    /// Hop off the top of a ladder to the left
    UpLeft,
    /// Hop off the top of a ladder to the right
    UpRight,
    /// Stand still
    None,
}

impl Default for MovementCommand {
    fn default() -> Self {
        MovementCommand::None
    }
}

impl Display for MovementCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MovementCommand::Up => "UP",
            MovementCommand::Down => "DOWN",
            MovementCommand::Left => "LEFT",
            MovementCommand::Right => "RIGHT",
            MovementCommand::UpLeft => "UP LEFT",
            MovementCommand::UpRight => "UP RIGHT",
            MovementCommand::None => "NONE",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What the worker should do after a call to [MovementTranslator::step]
pub enum TranslatorStep {
    /// Hold this direction
    Command(MovementCommand),
    /// The character stands on the last cell of the path
    Arrived,
    /// The path can't be followed any more, plan a new one
    Replan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Tuning for the translator, measured in calls to [MovementTranslator::step]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use maze_agents::TranslatorOptions;
///
/// let defaults = TranslatorOptions::default();
///
/// assert_eq!(defaults.ladder_exit_steps, 3);
/// assert_eq!(defaults.stall_limit, 250);
/// ```
pub struct TranslatorOptions {
    /// How many extra steps a diagonal ladder exit is held for while the character is still on
    /// the ladder, giving the hop animation time to play out
    pub ladder_exit_steps: usize,
    /// Replan after this many steps in a row without the character changing cell
    pub stall_limit: usize,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            ladder_exit_steps: 3,
            stall_limit: 250,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Climb {
    Not,
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy)]
struct Hold {
    command: MovementCommand,
    from: GridCoord,
    remaining: usize,
}

#[derive(Debug, Clone)]
/// Follows one path, see the [module docs](self)
pub struct MovementTranslator {
    path: Vec<GridCoord>,
    next: usize,
    climb: Climb,
    hold: Option<Hold>,
    last_position: Option<GridCoord>,
    stalled: usize,
    options: TranslatorOptions,
}

impl MovementTranslator {
    #[allow(missing_docs)]
    pub fn new(path: Vec<GridCoord>, options: TranslatorOptions) -> Self {
        Self {
            path,
            next: 0,
            climb: Climb::Not,
            hold: None,
            last_position: None,
            stalled: 0,
            options,
        }
    }

    /// The cell the character is currently heading for
    pub fn current_target(&self) -> Option<GridCoord> {
        self.path.get(self.next).copied()
    }

    /// Whether the character is latched onto a ladder
    pub fn is_climbing(&self) -> bool {
        self.climb != Climb::Not
    }

    /// Decide what to do with the character at `position`
    ///
    /// - Horizontal offsets give `Left` and `Right`, vertical ones `Up` and `Down`. Going up or
    ///   down latches the translator into climbing until the character stands on a cell that is
    ///   not a ladder.
    /// - Leaving the top of a ladder sideways while climbing up gives `UpLeft`/`UpRight`, held for
    ///   up to [TranslatorOptions::ladder_exit_steps] more steps or until the character moves.
    /// - A next cell that stopped being walkable, or a character that hasn't moved for
    ///   [TranslatorOptions::stall_limit] steps, asks for a new plan.
    /// - Standing on the last cell of the path (or having no path) is arrival.
    pub fn step(&mut self, position: GridCoord, walkability: &WalkabilityMatrix) -> TranslatorStep {
        if let Some(hold) = self.hold.as_mut() {
            if hold.from == position && hold.remaining > 0 {
                hold.remaining -= 1;
                return TranslatorStep::Command(hold.command);
            }
            self.hold = None;
            self.last_position = Some(position);
            self.stalled = 0;
        }

        if let Some(i) = self.path[self.next.min(self.path.len())..]
            .iter()
            .position(|c| *c == position)
        {
            self.next += i + 1;
        }
        let target = match self.path.get(self.next) {
            Some(t) => *t,
            None => return TranslatorStep::Arrived,
        };

        if !walkability.is_walkable(target) {
            tracing::debug!(%target, "next cell of the path is no longer walkable");
            return TranslatorStep::Replan;
        }

        if self.last_position == Some(position) {
            self.stalled += 1;
            if self.stalled >= self.options.stall_limit {
                tracing::debug!(%position, stalled = self.stalled, "no progress along the path");
                return TranslatorStep::Replan;
            }
        } else {
            self.last_position = Some(position);
            self.stalled = 0;
        }

        if !walkability.is_ladder(position) {
            self.climb = Climb::Not;
        }

        let d_row = target.row - position.row;
        let d_col = target.col - position.col;

        let command = if self.climb == Climb::Ascending && d_col != 0 {
            let command = if d_col < 0 {
                MovementCommand::UpLeft
            } else {
                MovementCommand::UpRight
            };
            self.climb = Climb::Not;
            self.hold = Some(Hold {
                command,
                from: position,
                remaining: self.options.ladder_exit_steps,
            });
            command
        } else if d_row < 0 {
            self.climb = Climb::Ascending;
            MovementCommand::Up
        } else if d_row > 0 {
            self.climb = Climb::Descending;
            MovementCommand::Down
        } else if d_col < 0 {
            MovementCommand::Left
        } else {
            MovementCommand::Right
        };

        TranslatorStep::Command(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::MazeFixture;

    fn small() -> WalkabilityMatrix {
        let fixture =
            MazeFixture::from_json(include_str!("../../types/fixtures/small.json")).unwrap();
        WalkabilityMatrix::compute(&fixture.maze)
    }

    fn path(cells: &[(i32, i32)]) -> Vec<GridCoord> {
        cells.iter().copied().map(GridCoord::from).collect()
    }

    fn command(step: TranslatorStep) -> MovementCommand {
        match step {
            TranslatorStep::Command(c) => c,
            other => panic!("expected a command, got {:?}", other),
        }
    }

    #[test]
    fn test_walks_and_climbs_the_small_maze() {
        let w = small();
        let mut t = MovementTranslator::new(
            path(&[(3, 1), (3, 2), (3, 3), (2, 3), (1, 3), (1, 4)]),
            TranslatorOptions {
                ladder_exit_steps: 0,
                ..Default::default()
            },
        );

        assert_eq!(command(t.step(GridCoord::new(3, 1), &w)), MovementCommand::Right);
        assert_eq!(command(t.step(GridCoord::new(3, 2), &w)), MovementCommand::Right);
        assert_eq!(command(t.step(GridCoord::new(3, 3), &w)), MovementCommand::Up);
        assert!(t.is_climbing());
        assert_eq!(command(t.step(GridCoord::new(2, 3), &w)), MovementCommand::Up);
        assert_eq!(command(t.step(GridCoord::new(1, 3), &w)), MovementCommand::UpRight);
        assert!(!t.is_climbing());
        assert_eq!(t.step(GridCoord::new(1, 4), &w), TranslatorStep::Arrived);
    }

    #[test]
    fn test_ladder_exit_is_held() {
        let w = small();
        let mut t = MovementTranslator::new(
            path(&[(2, 3), (1, 3), (1, 2)]),
            TranslatorOptions {
                ladder_exit_steps: 2,
                ..Default::default()
            },
        );

        assert_eq!(command(t.step(GridCoord::new(2, 3), &w)), MovementCommand::Up);
        for _ in 0..3 {
            assert_eq!(command(t.step(GridCoord::new(1, 3), &w)), MovementCommand::UpLeft);
        }
        // Hold used up and still on the ladder, so it's a plain step now
        assert_eq!(command(t.step(GridCoord::new(1, 3), &w)), MovementCommand::Left);
        assert_eq!(t.step(GridCoord::new(1, 2), &w), TranslatorStep::Arrived);
    }

    #[test]
    fn test_hold_ends_once_the_character_moves() {
        let w = small();
        let mut t = MovementTranslator::new(
            path(&[(2, 3), (1, 3), (1, 2), (1, 1)]),
            TranslatorOptions::default(),
        );

        t.step(GridCoord::new(2, 3), &w);
        assert_eq!(command(t.step(GridCoord::new(1, 3), &w)), MovementCommand::UpLeft);
        assert_eq!(command(t.step(GridCoord::new(1, 2), &w)), MovementCommand::Left);
    }

    #[test]
    fn test_going_down_does_not_hop() {
        let w = small();
        let mut t = MovementTranslator::new(
            path(&[(1, 3), (2, 3), (3, 3), (3, 4)]),
            TranslatorOptions::default(),
        );

        assert_eq!(command(t.step(GridCoord::new(1, 3), &w)), MovementCommand::Down);
        assert_eq!(command(t.step(GridCoord::new(2, 3), &w)), MovementCommand::Down);
        assert_eq!(command(t.step(GridCoord::new(3, 3), &w)), MovementCommand::Right);
    }

    #[test]
    fn test_arrival_and_empty_paths() {
        let w = small();

        let mut empty = MovementTranslator::new(vec![], TranslatorOptions::default());
        assert_eq!(empty.step(GridCoord::new(3, 1), &w), TranslatorStep::Arrived);

        let mut here = MovementTranslator::new(path(&[(3, 1)]), TranslatorOptions::default());
        assert_eq!(here.step(GridCoord::new(3, 1), &w), TranslatorStep::Arrived);
    }

    #[test]
    fn test_replans_when_the_next_cell_is_blocked() {
        let w = small();
        let mut t = MovementTranslator::new(
            path(&[(3, 1), (2, 1), (1, 1)]),
            TranslatorOptions::default(),
        );

        assert_eq!(t.step(GridCoord::new(3, 1), &w), TranslatorStep::Replan);
    }

    #[test]
    fn test_replans_when_stuck() {
        let w = small();
        let mut t = MovementTranslator::new(
            path(&[(3, 1), (3, 2)]),
            TranslatorOptions {
                stall_limit: 3,
                ..Default::default()
            },
        );

        for _ in 0..3 {
            assert_eq!(command(t.step(GridCoord::new(3, 1), &w)), MovementCommand::Right);
        }
        assert_eq!(t.step(GridCoord::new(3, 1), &w), TranslatorStep::Replan);
    }

    #[test]
    fn test_skips_ahead_when_the_character_overshoots() {
        let w = small();
        let mut t = MovementTranslator::new(
            path(&[(3, 1), (3, 2), (3, 3), (3, 4), (3, 5)]),
            TranslatorOptions::default(),
        );

        assert_eq!(command(t.step(GridCoord::new(3, 1), &w)), MovementCommand::Right);
        assert_eq!(command(t.step(GridCoord::new(3, 3), &w)), MovementCommand::Right);
        assert_eq!(t.current_target(), Some(GridCoord::new(3, 4)));
    }

    #[test]
    fn test_off_path_characters_head_back() {
        let w = small();
        let mut t = MovementTranslator::new(
            path(&[(3, 1), (3, 2), (3, 3)]),
            TranslatorOptions::default(),
        );

        // Overshot past the end of a horizontal run
        assert_eq!(command(t.step(GridCoord::new(3, 5), &w)), MovementCommand::Left);
    }
}
