//! Game session: the authoritative state of one run and the tick logic
//! that advances it.
//!
//! The session is a pure state machine. Time enters only through
//! [`GameSession::tick`] (a millisecond delta), randomness only through
//! the caller's [`Rng`], and persistence only through the injected
//! [`ScoreLedger`]. One-shot outcomes of a tick are reported in
//! [`TickSignals`] so the presentation layer can react without the core
//! owning any timing or animation.

use super::combo::ComboState;
use super::difficulty::DifficultyTable;
use super::geometry;
use super::power_up::PowerUpState;
use super::types::{Coordinate, Direction, FoodType, GameBounds, PowerUpKind};
use crate::constants::{
    FOOD_INITIAL_POSITION, FOOD_PADDING, FOOD_TOLERANCE, MAX_TICK_DT_MS, POISON_EFFECT_MS,
    POISON_SCORE_PENALTY, POISON_SHRINK_SEGMENTS, POWER_UP_CHANCE, SNAKE_INITIAL_POSITION,
    SPECIAL_FOOD_CHANCE, VIBRATE_FOOD_MS, VIBRATE_GAME_OVER_MS, VIBRATE_POISON_MS,
};
use crate::input::classify_gesture;
use rand::Rng;
use std::collections::VecDeque;

/// Where scores of finished runs go. Implementations must swallow their
/// own failures; the session never blocks on (or reacts to) persistence.
pub trait ScoreLedger {
    /// Best score seen so far.
    fn high_score(&self) -> u32;
    /// Record a finished run's score. Fire-and-forget.
    fn commit_score(&mut self, score: u32);
}

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    Paused,
    GameOver,
}

/// Tunables injected at session creation. No globals are consulted after
/// construction.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub difficulty: DifficultyTable,
    /// Head-to-food pickup distance (Euclidean grid units).
    pub food_tolerance: f64,
    /// Edge padding for food placement.
    pub food_padding: i32,
    /// Gates the vibrate decisions in [`TickSignals`].
    pub vibration_enabled: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            difficulty: DifficultyTable::default(),
            food_tolerance: FOOD_TOLERANCE,
            food_padding: FOOD_PADDING,
            vibration_enabled: true,
        }
    }
}

/// One-shot outcomes of a single [`GameSession::tick`] call.
///
/// The shell maps these to screen effects; none of them persist inside
/// the core beyond the tick that produced them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickSignals {
    /// At least one movement step ran.
    pub stepped: bool,
    /// Vibration decision (strongest pattern wins within a tick), already
    /// gated by the vibration setting.
    pub vibrate_ms: Option<u32>,
    /// The session transitioned to game over this tick.
    pub game_over: bool,
    /// Final score beat the stored high score and was committed.
    pub new_high_score: Option<u32>,
    /// Food eaten this tick (the type that was consumed).
    pub ate: Option<FoodType>,
    /// Poison was consumed; the tint window just opened.
    pub poison_flash: bool,
    /// A pickup landed at or above the combo threshold.
    pub combo_flash: bool,
    /// A power-up was activated by the post-pickup roll.
    pub power_up_activated: Option<PowerUpKind>,
}

impl TickSignals {
    fn vibrate(&mut self, enabled: bool, pattern_ms: u32) {
        if enabled {
            self.vibrate_ms = Some(self.vibrate_ms.map_or(pattern_ms, |v| v.max(pattern_ms)));
        }
    }
}

/// Authoritative snapshot of one game run.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: SessionConfig,
    pub bounds: GameBounds,
    pub phase: GamePhase,

    /// Body segments, head at the front. Never empty.
    pub snake: VecDeque<Coordinate>,
    /// Direction the last step actually moved in.
    pub direction: Direction,
    /// Direction requested by input, latched at the start of each step.
    pub next_direction: Direction,

    pub food: Coordinate,
    pub food_type: FoodType,

    pub score: u32,
    pub combo: ComboState,
    pub power_up: PowerUpState,

    /// Best score at session start, updated if this run beats it.
    pub high_score: u32,

    /// Monotonic session clock (ms). Advances only while running.
    pub clock_ms: u64,
    /// Time banked toward the next movement step (ms).
    pub accumulator_ms: u64,
    /// Session-clock instant until which the poison tint stays visible.
    pub poison_effect_until_ms: u64,
}

impl GameSession {
    /// Create a fresh session: single-segment snake, initial food, moving
    /// right. `ledger` supplies the high score to beat.
    pub fn new(bounds: GameBounds, config: SessionConfig, ledger: &dyn ScoreLedger) -> Self {
        let mut snake = VecDeque::new();
        snake.push_back(SNAKE_INITIAL_POSITION);

        Self {
            config,
            bounds,
            phase: GamePhase::Running,
            snake,
            direction: Direction::Right,
            next_direction: Direction::Right,
            // The fixed spawn point may fall outside a small viewport
            food: bounds.clamp(FOOD_INITIAL_POSITION),
            food_type: FoodType::Normal,
            score: 0,
            combo: ComboState::default(),
            power_up: PowerUpState::default(),
            high_score: ledger.high_score(),
            clock_ms: 0,
            accumulator_ms: 0,
            poison_effect_until_ms: 0,
        }
    }

    // ── Input ───────────────────────────────────────────────────

    /// Classify a swipe by its larger-magnitude axis and request the
    /// matching direction. Reversals are rejected, not queued.
    pub fn on_gesture(&mut self, dx: f64, dy: f64) {
        if let Some(dir) = classify_gesture(dx, dy) {
            self.request_direction(dir);
        }
    }

    /// Request a direction change for the next step. Ignored once the
    /// game is over, and ignored when it would reverse the current
    /// heading. Only the pending field is touched; a step reads it once.
    pub fn request_direction(&mut self, dir: Direction) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        if dir != self.direction.opposite() {
            self.next_direction = dir;
        }
    }

    // ── Lifecycle ───────────────────────────────────────────────

    /// Toggle between Running and Paused. No-op once the game is over.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            GamePhase::GameOver => GamePhase::GameOver,
        };
        if self.phase == GamePhase::Running {
            // No stale partial interval carries across a pause
            self.accumulator_ms = 0;
        }
    }

    /// Leave the paused state with a clean accumulator.
    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
            self.accumulator_ms = 0;
        }
    }

    /// Viewport changed; movement and placement use the new rectangle
    /// from the next step on. A shrink must not strand the food outside
    /// the playable area, so it is pulled inside.
    pub fn set_bounds(&mut self, bounds: GameBounds) {
        self.bounds = bounds;
        self.food = bounds.clamp(self.food);
    }

    // ── Tick ────────────────────────────────────────────────────

    /// Advance the simulation by `dt_ms` of real time.
    ///
    /// Movement steps fire whenever the banked time covers the *current*
    /// effective interval; the interval is recomputed after every step so
    /// score and power-up changes reschedule the next step immediately.
    /// While paused or over, ticks are no-ops.
    pub fn tick<R: Rng, L: ScoreLedger>(
        &mut self,
        dt_ms: u64,
        rng: &mut R,
        ledger: &mut L,
    ) -> TickSignals {
        let mut signals = TickSignals::default();
        if self.phase != GamePhase::Running {
            return signals;
        }

        let dt_ms = dt_ms.min(MAX_TICK_DT_MS);
        self.clock_ms += dt_ms;
        self.accumulator_ms += dt_ms;

        loop {
            // Passive power-up expiry, at least once per step
            self.power_up.expire_if_due(self.clock_ms);

            let interval = self
                .config
                .difficulty
                .effective_interval_ms(self.score, self.power_up.speed_multiplier());
            if self.accumulator_ms < interval {
                break;
            }
            self.accumulator_ms -= interval;

            self.step(rng, ledger, &mut signals);
            signals.stepped = true;

            if self.phase != GamePhase::Running {
                break;
            }
        }

        signals
    }

    /// One movement step. See DESIGN.md for the pre-move terminal check
    /// and the poison shrink rule.
    fn step<R: Rng, L: ScoreLedger>(
        &mut self,
        rng: &mut R,
        ledger: &mut L,
        signals: &mut TickSignals,
    ) {
        self.direction = self.next_direction;

        let head = self.snake[0];

        // Terminal check runs against the head before the move, with the
        // pre-move body: a fatal move is observed on the following step.
        if geometry::is_game_over(head, self.bounds, &self.snake) {
            if self.score > self.high_score {
                self.high_score = self.score;
                ledger.commit_score(self.score);
                signals.new_high_score = Some(self.score);
            }
            self.phase = GamePhase::GameOver;
            signals.game_over = true;
            signals.vibrate(self.config.vibration_enabled, VIBRATE_GAME_OVER_MS);
            return;
        }

        let (dx, dy) = self.direction.delta();
        let new_head = Coordinate::new(head.x + dx, head.y + dy);

        if geometry::is_food_reached(new_head, self.food, self.config.food_tolerance) {
            signals.ate = Some(self.food_type);

            if self.food_type == FoodType::Poison {
                self.eat_poison(new_head, signals);
            } else {
                self.eat_food(new_head, signals);
            }

            self.roll_next_food(rng, signals);
            self.food = geometry::random_food_position(
                rng,
                self.bounds.x_max,
                self.bounds.y_max,
                self.config.food_padding,
            );
        } else {
            self.snake.push_front(new_head);
            self.snake.pop_back();
        }
    }

    /// Non-poison pickup: grow, score through the combo and double-points
    /// multipliers, light vibration.
    fn eat_food(&mut self, new_head: Coordinate, signals: &mut TickSignals) {
        self.snake.push_front(new_head);
        signals.vibrate(self.config.vibration_enabled, VIBRATE_FOOD_MS);

        signals.combo_flash = self.combo.register_pickup(self.clock_ms);

        let mut delta = self.food_type.base_score() * self.combo.multiplier();
        if self.power_up.double_points() {
            delta *= 2;
        }
        self.score += delta;
    }

    /// Poison pickup: score penalty (floor 0), body shrinks two segments
    /// net of the move (floor length 1), combo dies, tint window opens.
    fn eat_poison(&mut self, new_head: Coordinate, signals: &mut TickSignals) {
        signals.vibrate(self.config.vibration_enabled, VIBRATE_POISON_MS);

        self.score = self.score.saturating_sub(POISON_SCORE_PENALTY);

        self.snake.push_front(new_head);
        for _ in 0..POISON_SHRINK_SEGMENTS + 1 {
            if self.snake.len() > 1 {
                self.snake.pop_back();
            }
        }

        self.combo.reset();

        self.poison_effect_until_ms = self.clock_ms + POISON_EFFECT_MS;
        signals.poison_flash = true;
    }

    /// Post-pickup roll: 10% power-up (food type untouched), next 20%
    /// random food type, otherwise back to normal.
    fn roll_next_food<R: Rng>(&mut self, rng: &mut R, signals: &mut TickSignals) {
        let r: f64 = rng.gen();
        if r < POWER_UP_CHANCE {
            let kind = self.power_up.activate_random(rng, self.clock_ms);
            signals.power_up_activated = Some(kind);
        } else if r < SPECIAL_FOOD_CHANCE {
            self.food_type = FoodType::ALL[rng.gen_range(0..FoodType::ALL.len())];
        } else {
            self.food_type = FoodType::Normal;
        }
    }

    // ── Read accessors ──────────────────────────────────────────

    pub fn head(&self) -> Coordinate {
        self.snake[0]
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// True while the combo is big enough for the multiplier/indicator.
    pub fn combo_hot(&self) -> bool {
        self.combo.is_hot()
    }

    /// 1-based difficulty level for display.
    pub fn difficulty_level(&self) -> usize {
        self.config.difficulty.current_level(self.score)
    }

    /// Current tick-interval divisor from the active power-up.
    pub fn speed_multiplier(&self) -> f64 {
        self.power_up.speed_multiplier()
    }

    /// Power-up-adjusted movement interval for the current score.
    pub fn effective_interval_ms(&self) -> u64 {
        self.config
            .difficulty
            .effective_interval_ms(self.score, self.power_up.speed_multiplier())
    }

    /// Milliseconds before the active power-up expires (0 when none).
    pub fn power_up_remaining_ms(&self) -> u64 {
        self.power_up.remaining_ms(self.clock_ms)
    }

    /// True while the poison tint window is open.
    pub fn poison_effect_active(&self) -> bool {
        self.clock_ms < self.poison_effect_until_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// In-memory ledger recording commits.
    #[derive(Default)]
    struct TestLedger {
        high: u32,
        commits: Vec<u32>,
    }

    impl ScoreLedger for TestLedger {
        fn high_score(&self) -> u32 {
            self.high
        }
        fn commit_score(&mut self, score: u32) {
            self.commits.push(score);
            self.high = self.high.max(score);
        }
    }

    fn bounds() -> GameBounds {
        GameBounds::new(0, 30, 0, 50)
    }

    fn session() -> (GameSession, TestLedger, ChaCha8Rng) {
        let ledger = TestLedger::default();
        let session = GameSession::new(bounds(), SessionConfig::default(), &ledger);
        (session, ledger, ChaCha8Rng::seed_from_u64(1))
    }

    /// Park the food where a rightward snake will not reach it.
    fn park_food(session: &mut GameSession) {
        session.food = Coordinate::new(30, 50);
    }

    fn body(segs: &[(i32, i32)]) -> VecDeque<Coordinate> {
        segs.iter().map(|&(x, y)| Coordinate::new(x, y)).collect()
    }

    #[test]
    fn test_new_session_defaults() {
        let (session, _, _) = session();
        assert_eq!(session.phase, GamePhase::Running);
        assert_eq!(session.snake.len(), 1);
        assert_eq!(session.head(), Coordinate::new(5, 5));
        assert_eq!(session.food, Coordinate::new(5, 20));
        assert_eq!(session.food_type, FoodType::Normal);
        assert_eq!(session.direction, Direction::Right);
        assert_eq!(session.score, 0);
        assert_eq!(session.combo.count, 0);
        assert_eq!(session.difficulty_level(), 1);
        assert_eq!(session.effective_interval_ms(), 55);
    }

    #[test]
    fn test_single_step_moves_right() {
        let (mut session, mut ledger, mut rng) = session();
        park_food(&mut session);

        let signals = session.tick(55, &mut rng, &mut ledger);

        assert!(signals.stepped);
        assert_eq!(session.head(), Coordinate::new(6, 5));
        assert_eq!(session.snake.len(), 1);
    }

    #[test]
    fn test_length_constant_without_food() {
        let (mut session, mut ledger, mut rng) = session();
        park_food(&mut session);
        session.snake = body(&[(5, 5), (4, 5), (3, 5)]);

        for _ in 0..5 {
            session.tick(55, &mut rng, &mut ledger);
            assert_eq!(session.snake.len(), 3);
        }
    }

    #[test]
    fn test_food_consumption_scenario() {
        // Head (5,5) heading right, food (7,5), tolerance 2: the next
        // head (6,5) is within tolerance, so the food is eaten and the
        // snake becomes [(6,5),(5,5)].
        let (mut session, mut ledger, mut rng) = session();
        session.food = Coordinate::new(7, 5);

        let signals = session.tick(55, &mut rng, &mut ledger);

        assert_eq!(signals.ate, Some(FoodType::Normal));
        assert_eq!(session.snake.len(), 2);
        assert_eq!(session.head(), Coordinate::new(6, 5));
        assert_eq!(session.snake[1], Coordinate::new(5, 5));
        assert_eq!(session.score, 1);

        // Food relocated into the padded rectangle
        assert!(session.food.x >= 2 && session.food.x <= 28);
        assert!(session.food.y >= 2 && session.food.y <= 48);
    }

    #[test]
    fn test_poison_shrinks_and_zeroes_combo() {
        let (mut session, mut ledger, mut rng) = session();
        session.snake = body(&[(5, 5), (4, 5), (3, 5)]);
        session.food = Coordinate::new(6, 5);
        session.food_type = FoodType::Poison;
        session.score = 3;
        session.combo.count = 4;

        let signals = session.tick(55, &mut rng, &mut ledger);

        assert_eq!(signals.ate, Some(FoodType::Poison));
        assert!(signals.poison_flash);
        assert_eq!(session.snake.len(), 1, "length 3 shrinks to 1");
        assert_eq!(session.head(), Coordinate::new(6, 5));
        assert_eq!(session.combo.count, 0);
        // Penalty of 5 clamped at zero
        assert_eq!(session.score, 0);
        assert!(session.poison_effect_active());
    }

    #[test]
    fn test_poison_on_single_segment_keeps_length_one() {
        let (mut session, mut ledger, mut rng) = session();
        session.food = Coordinate::new(6, 5);
        session.food_type = FoodType::Poison;

        session.tick(55, &mut rng, &mut ledger);

        assert_eq!(session.snake.len(), 1);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_poison_effect_expires_after_window() {
        let (mut session, mut ledger, mut rng) = session();
        session.food = Coordinate::new(6, 5);
        session.food_type = FoodType::Poison;

        session.tick(55, &mut rng, &mut ledger);
        assert!(session.poison_effect_active());

        // Head straight down the long axis while the window runs out
        park_food(&mut session);
        session.request_direction(Direction::Down);
        for _ in 0..3 {
            session.tick(500, &mut rng, &mut ledger);
        }
        assert!(!session.poison_effect_active());
        assert!(!session.is_game_over());
    }

    #[test]
    fn test_golden_and_rainbow_scores() {
        for (food_type, expected) in [(FoodType::Golden, 3), (FoodType::Rainbow, 5)] {
            let (mut session, mut ledger, mut rng) = session();
            session.food = Coordinate::new(6, 5);
            session.food_type = food_type;

            session.tick(55, &mut rng, &mut ledger);
            assert_eq!(session.score, expected);
        }
    }

    #[test]
    fn test_reversal_rejected() {
        let (mut session, _, _) = session();
        assert_eq!(session.direction, Direction::Right);

        session.request_direction(Direction::Left);
        assert_eq!(session.next_direction, Direction::Right);

        session.request_direction(Direction::Up);
        assert_eq!(session.next_direction, Direction::Up);
    }

    #[test]
    fn test_gesture_classification_feeds_direction() {
        let (mut session, _, _) = session();

        // Leftward swipe while heading right: rejected
        session.on_gesture(-12.0, 3.0);
        assert_eq!(session.next_direction, Direction::Right);

        // Downward swipe accepted
        session.on_gesture(2.0, 9.0);
        assert_eq!(session.next_direction, Direction::Down);
    }

    #[test]
    fn test_direction_request_ignored_after_game_over() {
        let (mut session, _, _) = session();
        session.phase = GamePhase::GameOver;
        session.request_direction(Direction::Up);
        assert_eq!(session.next_direction, Direction::Right);
    }

    #[test]
    fn test_wall_death_is_one_step_late() {
        let (mut session, mut ledger, mut rng) = session();
        park_food(&mut session);
        session.snake[0] = Coordinate::new(30, 5);

        // Step onto (31,5): out of bounds, but not checked until the next step
        let signals = session.tick(55, &mut rng, &mut ledger);
        assert!(!signals.game_over);
        assert_eq!(session.head(), Coordinate::new(31, 5));

        let signals = session.tick(55, &mut rng, &mut ledger);
        assert!(signals.game_over);
        assert!(session.is_game_over());
    }

    #[test]
    fn test_game_over_commits_new_high_score() {
        let (mut session, mut ledger, mut rng) = session();
        park_food(&mut session);
        session.score = 12;
        session.snake[0] = Coordinate::new(31, 5);

        let signals = session.tick(55, &mut rng, &mut ledger);

        assert!(signals.game_over);
        assert_eq!(signals.new_high_score, Some(12));
        assert_eq!(ledger.commits, vec![12]);
        assert_eq!(session.high_score, 12);
    }

    #[test]
    fn test_game_over_skips_commit_when_not_a_record() {
        let mut ledger = TestLedger {
            high: 50,
            commits: Vec::new(),
        };
        let mut session = GameSession::new(bounds(), SessionConfig::default(), &ledger);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        park_food(&mut session);
        session.score = 12;
        session.snake[0] = Coordinate::new(31, 5);

        let signals = session.tick(55, &mut rng, &mut ledger);

        assert!(signals.game_over);
        assert_eq!(signals.new_high_score, None);
        assert!(ledger.commits.is_empty());
    }

    #[test]
    fn test_ticks_are_noops_after_game_over() {
        let (mut session, mut ledger, mut rng) = session();
        park_food(&mut session);
        session.snake[0] = Coordinate::new(31, 5);
        session.tick(55, &mut rng, &mut ledger);
        assert!(session.is_game_over());

        let head = session.head();
        let signals = session.tick(500, &mut rng, &mut ledger);
        assert!(!signals.stepped);
        assert_eq!(session.head(), head);
    }

    #[test]
    fn test_pause_blocks_ticks_and_resume_continues() {
        let (mut session, mut ledger, mut rng) = session();
        park_food(&mut session);

        session.tick(55, &mut rng, &mut ledger);
        let head = session.head();
        let clock = session.clock_ms;

        session.toggle_pause();
        assert!(session.is_paused());

        let signals = session.tick(500, &mut rng, &mut ledger);
        assert!(!signals.stepped);
        assert_eq!(session.head(), head);
        assert_eq!(session.clock_ms, clock, "clock frozen while paused");

        session.resume();
        assert_eq!(session.phase, GamePhase::Running);
        session.tick(55, &mut rng, &mut ledger);
        assert_eq!(session.head(), Coordinate::new(head.x + 1, head.y));
    }

    #[test]
    fn test_direction_request_accepted_while_paused() {
        let (mut session, _, _) = session();
        session.toggle_pause();
        session.request_direction(Direction::Up);
        assert_eq!(session.next_direction, Direction::Up);
    }

    #[test]
    fn test_dt_clamp_limits_steps() {
        let (mut session, mut ledger, mut rng) = session();
        park_food(&mut session);
        let start = session.head().x;

        session.tick(60_000, &mut rng, &mut ledger);

        // 500ms clamped at 55ms per step: at most 9 steps
        assert!(session.head().x - start <= 9);
    }

    #[test]
    fn test_double_points_composes_with_combo() {
        let (mut session, mut ledger, mut rng) = session();
        session.power_up.activate(PowerUpKind::DoublePoints, 0);
        session.combo.count = 3;
        session.combo.last_pickup_ms = 0;
        session.food = Coordinate::new(6, 5);
        session.food_type = FoodType::Golden;

        session.tick(55, &mut rng, &mut ledger);

        // Combo extends to 4 within its window: 3 base x4 combo x2 points
        assert_eq!(session.score, 24);
    }

    #[test]
    fn test_speed_power_up_changes_interval_and_expires() {
        let ledger = TestLedger::default();
        // Wide bounds so the snake outruns nothing while the clock runs
        let mut session = GameSession::new(
            GameBounds::new(0, 10_000, 0, 50),
            SessionConfig::default(),
            &ledger,
        );
        let mut ledger = ledger;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        session.food = Coordinate::new(10_000, 50);

        session.power_up.activate(PowerUpKind::Speed, 0);
        assert_eq!(session.effective_interval_ms(), 36);
        assert_eq!(session.power_up_remaining_ms(), 5000);

        // Push the clock past expiry; the multiplier returns to 1 exactly
        // once now > expiry is observed
        for _ in 0..11 {
            session.tick(500, &mut rng, &mut ledger);
        }
        assert!(!session.is_game_over());
        assert_eq!(session.speed_multiplier(), 1.0);
        assert_eq!(session.effective_interval_ms(), 55);
        assert_eq!(session.power_up_remaining_ms(), 0);
    }

    #[test]
    fn test_score_never_negative() {
        let (mut session, mut ledger, mut rng) = session();
        for _ in 0..4 {
            let head = session.head();
            session.food = Coordinate::new(head.x + 1, head.y);
            session.food_type = FoodType::Poison;
            // Exactly one step per tick
            session.accumulator_ms = 0;
            let dt = session.effective_interval_ms();
            session.tick(dt, &mut rng, &mut ledger);
            assert_eq!(session.score, 0);
        }
    }

    #[test]
    fn test_set_bounds_applies_to_next_step() {
        let (mut session, mut ledger, mut rng) = session();
        park_food(&mut session);
        session.set_bounds(GameBounds::new(0, 6, 0, 50));

        // (5,5) -> (6,5) -> (7,5) leaves the new bounds -> dead next step
        session.tick(55, &mut rng, &mut ledger);
        session.tick(55, &mut rng, &mut ledger);
        let signals = session.tick(55, &mut rng, &mut ledger);
        assert!(signals.game_over);
    }

    #[test]
    fn test_small_viewport_clamps_initial_food() {
        let ledger = TestLedger::default();
        let session = GameSession::new(
            GameBounds::new(0, 10, 0, 10),
            SessionConfig::default(),
            &ledger,
        );
        assert_eq!(session.food, Coordinate::new(5, 10));
    }

    #[test]
    fn test_shrinking_bounds_pulls_food_inside() {
        let (mut session, _, _) = session();
        session.food = Coordinate::new(28, 45);

        session.set_bounds(GameBounds::new(0, 10, 0, 10));
        assert_eq!(session.food, Coordinate::new(10, 10));
    }

    // ── Post-pickup roll branches ───────────────────────────────
    //
    // Standard f64 samples take the high 53 bits of the next u64, so a
    // StepRng initial value pins the branch roll exactly.
    const ROLL_POWER_UP: u64 = 0; // r = 0.0
    const ROLL_SPECIAL: u64 = 0x2000_0000_0000_0000; // r = 0.125
    const ROLL_PLAIN: u64 = 0x8000_0000_0000_0000; // r = 0.5

    /// Power-of-two placement spans keep the StepRng draws rejection-free.
    fn roll_session(ledger: &TestLedger) -> GameSession {
        GameSession::new(
            GameBounds::new(0, 20, 0, 20),
            SessionConfig::default(),
            ledger,
        )
    }

    #[test]
    fn test_power_up_roll_leaves_food_type_unchanged() {
        let mut ledger = TestLedger::default();
        let mut session = roll_session(&ledger);
        let mut rng = StepRng::new(ROLL_POWER_UP, 0);
        session.food = Coordinate::new(6, 5);
        session.food_type = FoodType::Golden;

        let signals = session.tick(55, &mut rng, &mut ledger);

        assert_eq!(signals.ate, Some(FoodType::Golden));
        assert!(signals.power_up_activated.is_some());
        assert!(session.power_up.active().is_some());
        assert_eq!(session.food_type, FoodType::Golden);
    }

    #[test]
    fn test_plain_roll_reverts_food_to_normal() {
        let mut ledger = TestLedger::default();
        let mut session = roll_session(&ledger);
        let mut rng = StepRng::new(ROLL_PLAIN, 0);
        session.food = Coordinate::new(6, 5);
        session.food_type = FoodType::Rainbow;

        let signals = session.tick(55, &mut rng, &mut ledger);

        assert_eq!(session.food_type, FoodType::Normal);
        assert_eq!(signals.power_up_activated, None);
        assert!(session.power_up.active().is_none());
    }

    #[test]
    fn test_special_roll_can_draw_each_food_type() {
        for (idx, expected) in FoodType::ALL.iter().enumerate() {
            let mut ledger = TestLedger::default();
            let mut session = roll_session(&ledger);
            // The second draw picks index `idx` of the uniform type roll:
            // gen_range(0..4) keeps the top two bits of the next u64
            let second = (idx as u64) << 62;
            let mut rng = StepRng::new(ROLL_SPECIAL, second.wrapping_sub(ROLL_SPECIAL));
            session.food = Coordinate::new(6, 5);

            let signals = session.tick(55, &mut rng, &mut ledger);

            assert_eq!(session.food_type, *expected);
            assert_eq!(signals.power_up_activated, None);
        }
    }
}
