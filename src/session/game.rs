//! Game session: owns the table and processes intents one at a time.

use tracing::{debug, error, info, instrument};

use crate::cards::{shuffled_deck, Card, CardId, CardRun};
use crate::core::{DealRng, DrawOption, GameClock, MoveRejection, ScoringOption, SessionConfig};
use crate::piles::{Pile, PileId, PileKind, Table, TABLEAU_COUNT};
use crate::rules;
use crate::scoring::{ScoreEvent, Scoreboard};
use crate::talon::{CycleState, DrawOutcome, ExposedRun, TalonState};
use crate::undo::{MovementRecorder, UndoCheckpoint};

use super::{GameEvent, MoveOutcome};

/// One game of Klondike and everything needed to play it.
///
/// ## Usage
///
/// ```
/// use klondike_core::{GameSession, SessionConfig, DrawOutcome};
///
/// let mut session = GameSession::new(SessionConfig::default());
/// session.deal_new_game(7);
///
/// assert!(matches!(session.draw_next(), DrawOutcome::Revealed { .. }));
/// assert!(session.undo());
/// assert!(!session.undo());
/// ```
#[derive(Clone, Debug)]
pub struct GameSession {
    /// Options of the game in progress.
    config: SessionConfig,
    /// Options for the next deal.
    pending: SessionConfig,
    seed: Option<u64>,
    rng: DealRng,
    table: Table,
    recorder: MovementRecorder,
    scoreboard: Scoreboard,
    clock: GameClock,
    events: Vec<GameEvent>,
    dealt: bool,
    /// The table started from a full deck, so the 52-card check applies.
    full_deck: bool,
    won: bool,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl GameSession {
    /// A session with no game dealt yet.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            pending: config,
            seed: None,
            rng: DealRng::new(0),
            table: Table::new(config.draw, config.scoring.into()),
            recorder: MovementRecorder::new(),
            scoreboard: Scoreboard::new(config.scoring, config.draw),
            clock: GameClock::new(),
            events: Vec::new(),
            dealt: false,
            full_deck: false,
            won: false,
        }
    }

    /// A session playing an already laid-out table.
    ///
    /// The table's talon keeps whatever draw and scoring modes it was built
    /// with.
    #[must_use]
    pub fn from_table(config: SessionConfig, table: Table) -> Self {
        let mut session = Self::new(config);
        session.full_deck = table.verify_full_deck().is_ok();
        session.won = table.is_win();
        session.table = table;
        session.dealt = true;
        session
    }

    // === Intents ===

    /// Shuffle a fresh deck with `seed` and deal it.
    ///
    /// Tableau columns get 1 through 7 cards with only the top card face-up;
    /// the remaining 24 cards form the stock. Pending option changes take
    /// effect here.
    #[instrument(level = "debug", skip(self))]
    pub fn deal_new_game(&mut self, seed: u64) {
        self.config = self.pending;
        self.seed = Some(seed);
        self.rng = DealRng::new(seed);

        let mut cards = shuffled_deck(&mut self.rng).into_iter();
        let mut columns: [Vec<Card>; TABLEAU_COUNT] = Default::default();
        for row in 0..TABLEAU_COUNT {
            for (col, column) in columns.iter_mut().enumerate().skip(row) {
                if let Some(mut card) = cards.next() {
                    card.set_face_up(col == row);
                    column.push(card);
                }
            }
        }

        let mut table = Table::new(self.config.draw, self.config.scoring.into());
        for (i, column) in columns.into_iter().enumerate() {
            table.place(PileId::Tableau(i as u8), column);
        }
        table.talon_mut().load(cards);

        self.table = table;
        self.recorder.clear();
        self.scoreboard = Scoreboard::new(self.config.scoring, self.config.draw);
        self.clock = GameClock::new();
        self.events.clear();
        self.dealt = true;
        self.full_deck = true;
        self.won = false;

        info!(seed, draw = ?self.config.draw, scoring = ?self.config.scoring, "new deal");
        self.events.push(GameEvent::GameDealt { seed });
        if self.scoreboard.score() != 0 {
            self.events.push(GameEvent::ScoreChanged(self.scoreboard.score()));
        }
        self.check_invariants();
    }

    /// Deal again with a seed derived from the current deal.
    ///
    /// Returns the seed used.
    pub fn deal_next_game(&mut self) -> u64 {
        let seed = self.rng.next_seed();
        self.deal_new_game(seed);
        seed
    }

    /// Move `card`, and every card above it, onto `dest`.
    ///
    /// On success the source pile's new top card is turned face-up if it was
    /// face-down, the move becomes the undo checkpoint, and the win condition
    /// is checked.
    #[instrument(level = "debug", skip(self), fields(seed = ?self.seed))]
    pub fn attempt_move(&mut self, card: CardId, dest: PileId) -> MoveOutcome {
        match self.plan_move(card, dest) {
            Ok((from, index)) => self.commit_move(from, index, dest, true),
            Err(reason) => {
                debug!(%reason, "move rejected");
                self.events.push(GameEvent::MoveRejected(reason));
                MoveOutcome::Rejected(reason)
            }
        }
    }

    /// Send `card` to whichever foundation accepts it.
    pub fn auto_move_to_foundation(&mut self, card: CardId) -> MoveOutcome {
        let target = self.preferred_foundation(card);
        self.attempt_move(card, target)
    }

    /// Move every card that fits onto the foundations until none fits.
    ///
    /// Returns the number of cards moved. The sweep cannot be undone.
    #[instrument(level = "debug", skip(self), fields(seed = ?self.seed))]
    pub fn autocomplete(&mut self) -> usize {
        let mut moved = 0;
        while let Some((from, index, dest)) = self.autocomplete_candidate() {
            self.commit_move(from, index, dest, false);
            moved += 1;
        }
        if moved > 0 {
            self.recorder.clear();
            debug!(moved, "autocomplete finished");
        }
        moved
    }

    /// Turn the next batch of stock cards onto the waste, recycling first
    /// if the stock is empty.
    #[instrument(level = "debug", skip(self), fields(seed = ?self.seed))]
    pub fn draw_next(&mut self) -> DrawOutcome {
        if !self.dealt {
            self.events.push(GameEvent::TalonEmpty);
            return DrawOutcome::Empty;
        }

        let score_before = self.scoreboard.score();
        let snapshot = self.table.talon().snapshot();
        let outcome = self.table.talon_mut().draw_next();

        match &outcome {
            DrawOutcome::Revealed { cards, recycled } => {
                self.recorder.record_move(UndoCheckpoint::draw(
                    snapshot,
                    cards.iter().copied().collect(),
                    score_before,
                ));
                if let Some(pass_count) = *recycled {
                    self.events.push(GameEvent::TalonRecycled(pass_count));
                    self.scoreboard.apply(ScoreEvent::Recycle { pass_count });
                }
                self.events
                    .extend(cards.iter().copied().map(GameEvent::CardRevealed));
                self.clock.start();
            }
            DrawOutcome::Exhausted => {
                // Older checkpoints may hold a talon from before the limit.
                if snapshot.cycle_state() != CycleState::Exhausted {
                    self.recorder.clear();
                }
                self.events.push(GameEvent::TalonExhausted);
            }
            DrawOutcome::Empty => self.events.push(GameEvent::TalonEmpty),
        }

        self.push_score_change(score_before);
        self.check_invariants();
        outcome
    }

    /// Reverse the last recorded action.
    ///
    /// Returns false if there is nothing to undo.
    #[instrument(level = "debug", skip(self), fields(seed = ?self.seed))]
    pub fn undo(&mut self) -> bool {
        let Some(restored_score) = self.recorder.checkpoint().map(|cp| cp.score_before) else {
            debug!("nothing to undo");
            return false;
        };

        let score_before = self.scoreboard.score();
        if !self.recorder.undo(&mut self.table) {
            return false;
        }
        self.scoreboard.set_score(restored_score);
        self.won = self.table.is_win();

        self.events.push(GameEvent::Undone);
        self.push_score_change(score_before);
        self.check_invariants();
        true
    }

    /// Choose the draw option for the next deal.
    pub fn set_draw_mode(&mut self, draw: DrawOption) {
        self.pending.draw = draw;
    }

    /// Choose the scoring option for the next deal.
    pub fn set_scoring_mode(&mut self, scoring: ScoringOption) {
        self.pending.scoring = scoring;
    }

    /// Advance the game clock by one second.
    ///
    /// Applies the time penalty on each scoring interval. Returns the
    /// elapsed seconds.
    pub fn tick_clock(&mut self) -> u64 {
        if self.clock.tick() {
            let score_before = self.scoreboard.score();
            self.scoreboard.apply(ScoreEvent::TimeTick);
            self.push_score_change(score_before);
        }
        self.clock.elapsed_secs()
    }

    /// Cancel the game clock. Safe to call at any time.
    pub fn stop_clock(&mut self) {
        self.clock.stop();
    }

    // === Queries ===

    /// Options of the game in progress.
    #[must_use]
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Options that the next deal will use.
    #[must_use]
    pub fn pending_config(&self) -> SessionConfig {
        self.pending
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[must_use]
    pub fn has_game(&self) -> bool {
        self.dealt
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn pile(&self, id: PileId) -> Option<&Pile> {
        self.table.pile(id)
    }

    #[must_use]
    pub fn locate(&self, card: CardId) -> Option<(PileId, usize)> {
        self.table.locate(card)
    }

    #[must_use]
    pub fn talon_state(&self) -> TalonState {
        self.table.talon().state()
    }

    #[must_use]
    pub fn exposed_run(&self) -> ExposedRun {
        self.table.talon().exposed_run()
    }

    /// Whether `card` can currently be picked up.
    #[must_use]
    pub fn is_pickable(&self, card: CardId) -> bool {
        let Some((from, index)) = self.table.locate(card) else {
            return false;
        };
        let Some(pile) = self.table.pile(from) else {
            return false;
        };
        match from.kind() {
            PileKind::Stock => false,
            PileKind::Waste => self.table.talon().is_pickable(card),
            PileKind::Foundation => pile.can_detach_run(index),
            PileKind::Tableau => {
                let run: CardRun = pile.run_from(index).iter().copied().collect();
                pile.can_detach_run(index) && rules::can_move_run(&run)
            }
        }
    }

    #[must_use]
    pub fn score(&self) -> i32 {
        self.scoreboard.score()
    }

    #[must_use]
    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.clock.elapsed_secs()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.recorder.has_checkpoint()
    }

    #[must_use]
    pub fn undo_checkpoint(&self) -> Option<&UndoCheckpoint> {
        self.recorder.checkpoint()
    }

    /// All four foundations hold 13 cards.
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.table.is_win()
    }

    /// Drain queued notifications, oldest first.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Internals ===

    /// Validate a move without changing anything.
    ///
    /// Returns the source pile and the index of `card` within it.
    fn plan_move(&self, card: CardId, dest: PileId) -> Result<(PileId, usize), MoveRejection> {
        if !self.dealt {
            return Err(MoveRejection::NoGameInProgress);
        }
        let (from, index) = self.table.locate(card).ok_or(MoveRejection::CardNotFound)?;
        if from == dest {
            return Err(MoveRejection::SamePile);
        }
        let dest_pile = self.table.pile(dest).ok_or(MoveRejection::PileLocked)?;
        let source = self.table.pile(from).ok_or(MoveRejection::CardNotFound)?;

        let detachable = match from.kind() {
            PileKind::Stock => false,
            PileKind::Waste => self.table.talon().is_pickable(card),
            PileKind::Foundation | PileKind::Tableau => source.can_detach_run(index),
        };
        if !detachable {
            return Err(MoveRejection::PileLocked);
        }

        let run: CardRun = source.run_from(index).iter().copied().collect();
        rules::check_move(&run, dest_pile)?;
        Ok((from, index))
    }

    /// Carry out a validated move.
    fn commit_move(&mut self, from: PileId, index: usize, dest: PileId, record: bool) -> MoveOutcome {
        let score_before = self.scoreboard.score();
        let talon_before = (from == PileId::Waste).then(|| self.table.talon().snapshot());

        let cards: CardRun = match from {
            PileId::Waste => self.table.talon_mut().take_top().into_iter().collect(),
            _ => match self.table.pile_mut(from) {
                Some(pile) => pile.pop(pile.count() - index).iter().copied().collect(),
                None => CardRun::new(),
            },
        };
        if let Some(pile) = self.table.pile_mut(dest) {
            pile.push(cards.iter().copied());
        }

        let revealed = match from.kind() {
            PileKind::Tableau => self.table.pile_mut(from).and_then(Pile::reveal_top),
            _ => None,
        };

        if record {
            let mut checkpoint = UndoCheckpoint::transfer(from, dest, cards.clone(), score_before)
                .with_reveal(revealed.is_some());
            if let Some(talon) = talon_before {
                checkpoint = checkpoint.with_talon(talon);
            }
            self.recorder.record_move(checkpoint);
        }

        self.scoreboard.apply(ScoreEvent::Transfer {
            from: from.kind(),
            to: dest.kind(),
        });
        if revealed.is_some() {
            self.scoreboard.apply(ScoreEvent::Reveal);
        }

        debug!(%from, to = %dest, cards = cards.len(), "move accepted");
        self.events.push(GameEvent::MoveAccepted {
            cards: cards.clone(),
            from,
            to: dest,
        });
        if let Some(card) = revealed {
            self.events.push(GameEvent::CardRevealed(card));
        }
        self.push_score_change(score_before);
        self.clock.start();

        if !self.won && self.table.is_win() {
            self.won = true;
            self.clock.stop();
            info!(seed = ?self.seed, score = self.scoreboard.score(), "game won");
            self.events.push(GameEvent::GameWon);
        }

        self.check_invariants();
        MoveOutcome::Accepted {
            cards,
            from,
            to: dest,
            revealed,
        }
    }

    /// The foundation a card would naturally go to: the one already
    /// building its suit, else the first empty one.
    fn preferred_foundation(&self, card: CardId) -> PileId {
        let suit = self
            .table
            .locate(card)
            .and_then(|(pile, index)| self.table.pile(pile)?.get(index).map(Card::suit));

        let building = PileId::foundations().find(|&f| {
            self.table
                .pile(f)
                .and_then(Pile::top_card)
                .is_some_and(|top| Some(top.suit()) == suit)
        });
        let empty = PileId::foundations().find(|&f| self.table.pile(f).is_some_and(Pile::is_empty));

        building.or(empty).unwrap_or(PileId::Foundation(0))
    }

    fn autocomplete_candidate(&self) -> Option<(PileId, usize, PileId)> {
        std::iter::once(PileId::Waste)
            .chain(PileId::tableaus())
            .filter_map(|source| self.table.pile(source)?.top_card().map(Card::id))
            .find_map(|card| {
                let dest = self.preferred_foundation(card);
                let (from, index) = self.plan_move(card, dest).ok()?;
                Some((from, index, dest))
            })
    }

    fn push_score_change(&mut self, score_before: i32) {
        let score = self.scoreboard.score();
        if score != score_before {
            self.events.push(GameEvent::ScoreChanged(score));
        }
    }

    /// Table invariants must hold after every intent; a failure is a bug.
    fn check_invariants(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        let verdict = if self.full_deck {
            self.table.verify_full_deck()
        } else {
            self.table.verify()
        };
        if let Err(violation) = &verdict {
            error!(%violation, "table invariant broken");
        }
        debug_assert!(verdict.is_ok(), "table invariant broken: {:?}", verdict);
    }
}
