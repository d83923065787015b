//! One background thread per agent
//!
//! [AgentWorker::spawn] moves a [Planner] onto its own thread and hands back an [AgentHandle].
//! The thread loops until it is stopped: read the character's position, plan if there is no
//! path to follow, step the [MovementTranslator] and publish the resulting command. Everything
//! the outside world wants to tell the worker (new goals, a new match state, a new walkability
//! matrix) travels over a channel as owned values, so the worker never shares mutable game state
//! with anyone.
//!
//! A planning call is never interrupted. Stopping a worker that is deep in a search takes effect
//! once that search returns.

use std::{
    fmt::Debug,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, Sender, TryRecvError},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use anyhow::{anyhow, Context, Result};
use derivative::Derivative;
use maze_minimax::GameState;
use parking_lot::RwLock;
use tracing::info_span;
use types::{GridCoord, WalkabilityMatrix};

use crate::{
    planner::{Planner, PlannerView},
    signal::{PathData, PathDataSignal},
    translator::{MovementCommand, MovementTranslator, TranslatorOptions, TranslatorStep},
};

/// The thing on screen a worker is steering
pub trait Character: Debug + Send + Sync {
    /// The cell the character currently occupies
    fn grid_position(&self) -> GridCoord;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Tuning for a worker thread
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use std::time::Duration;
/// use maze_agents::worker::WorkerOptions;
///
/// let defaults = WorkerOptions::default();
///
/// assert_eq!(defaults.poll_interval, Duration::from_millis(2));
/// assert_eq!(defaults.enemy_lookout, None);
/// ```
pub struct WorkerOptions {
    /// How long the worker sleeps between steps
    pub poll_interval: Duration,
    #[allow(missing_docs)]
    pub translator: TranslatorOptions,
    /// Step away from any enemy on the same row at most this many cells away, overriding the
    /// planned command
    pub enemy_lookout: Option<usize>,
}

impl Default for WorkerOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(2),
            translator: TranslatorOptions::default(),
            enemy_lookout: None,
        }
    }
}

#[derive(Debug, Clone)]
/// Updates sent from the outside to a running worker
pub enum WorkerMessage {
    /// The latest match state
    State(GameState),
    /// The goals that are left
    Goals(Vec<GridCoord>),
    /// The maze changed shape, this forces a new plan
    Walkability(Arc<WalkabilityMatrix>),
}

/// Which way to dodge an enemy on the same row, if one is within `lookout` cells
///
/// Enemies to the left (or on the same cell) send the agent right, enemies to the right send it
/// left.
///
/// ```
/// use maze_agents::{translator::MovementCommand, worker::avoid_enemies};
/// use types::GridCoord;
///
/// let me = GridCoord::new(3, 5);
///
/// assert_eq!(avoid_enemies(me, &[GridCoord::new(3, 3)], 3), Some(MovementCommand::Right));
/// assert_eq!(avoid_enemies(me, &[GridCoord::new(3, 7)], 3), Some(MovementCommand::Left));
/// assert_eq!(avoid_enemies(me, &[GridCoord::new(3, 8)], 3), None);
/// assert_eq!(avoid_enemies(me, &[GridCoord::new(1, 5)], 3), None);
/// ```
pub fn avoid_enemies(
    position: GridCoord,
    enemies: &[GridCoord],
    lookout: usize,
) -> Option<MovementCommand> {
    let lookout = lookout as i32;
    let same_row = enemies.iter().filter(|e| e.row == position.row);

    let mut right = false;
    for enemy in same_row {
        let offset = enemy.col - position.col;
        if offset <= 0 && -offset < lookout {
            return Some(MovementCommand::Right);
        }
        if offset > 0 && offset < lookout {
            right = true;
        }
    }

    right.then_some(MovementCommand::Left)
}

#[derive(Derivative)]
#[derivative(Debug)]
/// The state owned by a worker thread
pub struct AgentWorker<P> {
    planner: P,
    character: Arc<dyn Character>,
    #[derivative(Debug = "ignore")]
    walkability: Arc<WalkabilityMatrix>,
    goals: Vec<GridCoord>,
    state: Option<GameState>,
    translator: Option<MovementTranslator>,
    options: WorkerOptions,
    command: Arc<RwLock<MovementCommand>>,
    stop: Arc<AtomicBool>,
    path_data: Arc<PathDataSignal>,
    messages: Receiver<WorkerMessage>,
}

impl<P: Planner + Send + 'static> AgentWorker<P> {
    /// Start a worker thread for `planner` steering `character`
    pub fn spawn(
        planner: P,
        character: Arc<dyn Character>,
        walkability: Arc<WalkabilityMatrix>,
        goals: Vec<GridCoord>,
        options: WorkerOptions,
    ) -> Result<AgentHandle> {
        let name = planner.name();
        let (sender, messages) = mpsc::channel();
        let command = Arc::new(RwLock::new(MovementCommand::None));
        let stop = Arc::new(AtomicBool::new(false));
        let path_data = Arc::new(PathDataSignal::new());

        let worker = AgentWorker {
            planner,
            character,
            walkability,
            goals,
            state: None,
            translator: None,
            options,
            command: Arc::clone(&command),
            stop: Arc::clone(&stop),
            path_data: Arc::clone(&path_data),
            messages,
        };

        let thread = thread::Builder::new()
            .name(format!("agent-{}", name))
            .spawn(move || worker.run())
            .with_context(|| format!("Couldn't start the {} worker thread", name))?;

        Ok(AgentHandle {
            name,
            command,
            messages: sender,
            stop,
            path_data,
            thread: Some(thread),
        })
    }

    fn run(mut self) {
        tracing::info!(agent = self.planner.name(), "worker started");

        while !self.stop.load(Ordering::Acquire) {
            if !self.drain_messages() {
                tracing::debug!(agent = self.planner.name(), "handle went away");
                break;
            }

            self.step();
            thread::sleep(self.options.poll_interval);
        }

        *self.command.write() = MovementCommand::None;
        tracing::info!(agent = self.planner.name(), "worker stopped");
    }

    /// Apply every waiting update, returns false once the handle is gone
    fn drain_messages(&mut self) -> bool {
        loop {
            match self.messages.try_recv() {
                Ok(WorkerMessage::State(state)) => self.state = Some(state),
                Ok(WorkerMessage::Goals(goals)) => {
                    self.goals = goals;
                    self.translator = None;
                }
                Ok(WorkerMessage::Walkability(walkability)) => {
                    self.walkability = walkability;
                    self.translator = None;
                }
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => return false,
            }
        }
    }

    fn step(&mut self) {
        let position = self.character.grid_position();

        if self.translator.is_none() {
            self.translator = self.plan(position);
        }

        let step = match self.translator.as_mut() {
            Some(translator) => translator.step(position, &self.walkability),
            None => {
                *self.command.write() = MovementCommand::None;
                return;
            }
        };

        let command = match step {
            TranslatorStep::Command(command) => command,
            TranslatorStep::Arrived => {
                self.translator = None;
                MovementCommand::None
            }
            TranslatorStep::Replan => {
                tracing::debug!(agent = self.planner.name(), %position, "replanning");
                self.translator = None;
                MovementCommand::None
            }
        };

        let dodge = self
            .options
            .enemy_lookout
            .zip(self.state.as_ref())
            .and_then(|(lookout, state)| avoid_enemies(position, &state.enemies, lookout));

        *self.command.write() = dodge.unwrap_or(command);
    }

    fn plan(&mut self, position: GridCoord) -> Option<MovementTranslator> {
        info_span!(
            "plan",
            agent = self.planner.name(),
            position = %position,
            path_len = tracing::field::Empty,
            visited = tracing::field::Empty,
        )
        .in_scope(|| {
            let view = PlannerView {
                walkability: &self.walkability,
                goals: &self.goals,
                state: self.state.as_ref(),
            };

            let outcome = match self.planner.plan(position, &view) {
                Some(outcome) => outcome,
                None => {
                    tracing::debug!("no path, holding position");
                    return None;
                }
            };

            let current_span = tracing::Span::current();
            current_span.record("path_len", outcome.path.len());
            current_span.record("visited", outcome.visited.len());

            let path = outcome.path.clone();
            self.path_data.publish(PathData::from(outcome));

            Some(MovementTranslator::new(path, self.options.translator))
        })
    }
}

#[derive(Debug)]
/// The outside end of a running worker
///
/// Dropping the handle stops the worker and waits for its thread.
pub struct AgentHandle {
    name: &'static str,
    command: Arc<RwLock<MovementCommand>>,
    messages: Sender<WorkerMessage>,
    stop: Arc<AtomicBool>,
    path_data: Arc<PathDataSignal>,
    thread: Option<JoinHandle<()>>,
}

impl AgentHandle {
    /// Name of the planner driving this worker
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The latest command, without consuming it
    pub fn move_command(&self) -> MovementCommand {
        *self.command.read()
    }

    /// The latest command, leaving [MovementCommand::None] behind so that one command is only
    /// acted on once
    pub fn take_command(&self) -> MovementCommand {
        std::mem::take(&mut *self.command.write())
    }

    /// Tell the worker which goals are left
    pub fn update_goals(&self, goals: Vec<GridCoord>) -> Result<()> {
        self.send(WorkerMessage::Goals(goals))
    }

    /// Hand the worker the latest match state
    pub fn update_state(&self, state: GameState) -> Result<()> {
        self.send(WorkerMessage::State(state))
    }

    /// Replace the walkability the worker plans on
    pub fn update_walkability(&self, walkability: Arc<WalkabilityMatrix>) -> Result<()> {
        self.send(WorkerMessage::Walkability(walkability))
    }

    fn send(&self, message: WorkerMessage) -> Result<()> {
        self.messages
            .send(message)
            .map_err(|_| anyhow!("The {} worker is no longer running", self.name))
    }

    /// The visited cells and path of the latest plan, if one was made since the last call
    pub fn visited_grids_and_path(&self) -> Option<PathData> {
        self.path_data.take()
    }

    /// The signal the worker publishes its plans on
    pub fn path_signal(&self) -> Arc<PathDataSignal> {
        Arc::clone(&self.path_data)
    }

    /// Ask the worker to stop after its current step
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// Whether the worker thread has exited
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, |t| t.is_finished())
    }

    /// Stop the worker and wait for its thread to exit
    pub fn join(mut self) -> Result<()> {
        self.stop();
        self.join_thread()
    }

    fn join_thread(&mut self) -> Result<()> {
        match self.thread.take() {
            Some(thread) => thread
                .join()
                .map_err(|_| anyhow!("The {} worker panicked", self.name)),
            None => Ok(()),
        }
    }
}

impl Drop for AgentHandle {
    fn drop(&mut self) {
        self.stop();
        if let Err(e) = self.join_thread() {
            tracing::warn!(error = %e, "worker did not shut down cleanly");
        }
    }
}
