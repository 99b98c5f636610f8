//! The Chkobba state machine.
//!
//! `Chkobba` owns the `GameState` and is its only mutator. Phases move
//! `Dealing -> Playing -> RoundEnd -> Playing | GameEnd`:
//!
//! - Dealing builds and shuffles a fresh deck, lays out the table (redealing
//!   while one card could clear it) and deals a hand to each seat.
//! - Playing alternates seats. A card that can capture must capture; one
//!   that cannot is dropped. When both hands run out a new hand is dealt
//!   from the deck, and when the deck is also empty the round ends.
//! - RoundEnd sweeps the leftover table to the last capturer, scores the
//!   round and folds it into the running totals.
//! - GameEnd is terminal, reached once a total meets the target score.
//!
//! Every public operation either applies completely or returns an
//! `EngineError` with the state untouched.

use std::ops::RangeInclusive;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::capture::{find_valid_captures, has_capture, table_value};
use super::scoring::{score_round, RoundScore};
use crate::cards::{Card, CardId, CardPrimitives, ClearContext, StandardCards};
use crate::core::{
    EngineError, GameConfig, GameRng, GameState, Move, MoveRecord, Phase, Seat, SeatMap,
};
use crate::opponent::Opponent;

/// Initial table totals a single card could capture outright.
pub const CLEARABLE_BY_ONE: RangeInclusive<u32> = 2..=10;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Winner(Seat),
    Draw,
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, seat: Seat) -> bool {
        matches!(self, GameResult::Winner(s) if *s == seat)
    }
}

/// Leftover table cards taken by the last capturer at round end.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sweep {
    pub seat: Seat,
    pub cards: Vec<Card>,
}

/// Settlement of a finished round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u32,
    pub scores: SeatMap<RoundScore>,
    pub sweep: Option<Sweep>,
    /// Cumulative totals after this round.
    pub totals: SeatMap<u32>,
}

/// What a successful move did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub seat: Seat,
    pub played: Card,
    /// Table cards taken. Empty for a drop.
    pub captured: Vec<Card>,
    pub chkobba: bool,
    /// Both hands ran out and a fresh hand was dealt.
    pub new_hand_dealt: bool,
    /// Present when this move ended the round.
    pub round_summary: Option<RoundSummary>,
}

impl MoveOutcome {
    #[must_use]
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

/// Chkobba rules engine and game state.
///
/// ## Example
///
/// ```
/// use chkobba_engine::core::{GameConfig, GameRng, Phase, Seat};
/// use chkobba_engine::opponent::{Difficulty, Opponent};
/// use chkobba_engine::rules::Chkobba;
///
/// let mut rng = GameRng::new(42);
/// let mut game = Chkobba::standard(GameConfig::default()).unwrap();
/// game.start_new_game(&mut rng).unwrap();
/// assert_eq!(game.state().phase, Phase::Playing);
///
/// // The human leads; any legal move will do here.
/// let mv = game.legal_moves(Seat::Human).remove(0);
/// game.play(Seat::Human, &mv).unwrap();
///
/// let npc = Opponent::new(Difficulty::Hard);
/// game.execute_npc_turn(&npc, &mut rng).unwrap();
/// assert_eq!(game.state().current_player, Seat::Human);
/// ```
#[derive(Clone, Debug)]
pub struct Chkobba<P: CardPrimitives = StandardCards> {
    config: GameConfig,
    cards: P,
    state: GameState,
}

impl Chkobba<StandardCards> {
    /// Engine with the standard deck and the configured chkobba rule.
    pub fn standard(config: GameConfig) -> Result<Self, EngineError> {
        let cards = StandardCards::new(config.chkobba_rule);
        Self::new(config, cards)
    }
}

impl<P: CardPrimitives> Chkobba<P> {
    /// Create an engine with custom card primitives. No cards are dealt
    /// until [`Chkobba::start_new_game`].
    ///
    /// Chkobba eligibility is decided by `cards` alone;
    /// `config.chkobba_rule` is only read by [`Chkobba::standard`].
    pub fn new(config: GameConfig, cards: P) -> Result<Self, EngineError> {
        config.validate()?;
        let state = GameState::new(&config);
        Ok(Self {
            config,
            cards,
            state,
        })
    }

    /// Resume from an existing state.
    ///
    /// The state is taken as-is; the caller is responsible for its zone
    /// invariants.
    pub fn with_state(config: GameConfig, cards: P, state: GameState) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            cards,
            state,
        })
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn primitives(&self) -> &P {
        &self.cards
    }

    // =========================================================================
    // Game and round lifecycle
    // =========================================================================

    /// Reset everything and deal the first round.
    #[instrument(skip_all)]
    pub fn start_new_game(&mut self, rng: &mut GameRng) -> Result<(), EngineError> {
        self.state = GameState::new(&self.config);
        info!(
            target_score = self.config.target_score,
            dealer = %self.state.dealer,
            "starting new game"
        );
        self.deal_initial_cards(rng)
    }

    /// Leave `RoundEnd`: either finish the game or deal the next round with
    /// the dealer role passed across. Returns the resulting phase.
    #[instrument(skip_all, fields(round = self.state.round))]
    pub fn start_new_round(&mut self, rng: &mut GameRng) -> Result<Phase, EngineError> {
        self.expect_phase(Phase::RoundEnd)?;

        if self.target_reached() {
            self.state.phase = Phase::GameEnd;
            info!(
                human = self.state.totals[Seat::Human],
                npc = self.state.totals[Seat::Npc],
                "game over"
            );
            return Ok(Phase::GameEnd);
        }

        self.state.dealer = self.state.dealer.other();
        self.state.round += 1;
        self.state.phase = Phase::Dealing;
        self.deal_initial_cards(rng)?;
        Ok(self.state.phase)
    }

    /// Shuffle a fresh deck, lay out the table and deal both hands.
    ///
    /// Only valid in `Dealing`; [`Chkobba::start_new_game`] and
    /// [`Chkobba::start_new_round`] enter that phase before calling this.
    ///
    /// While the table total is in [`CLEARABLE_BY_ONE`] the deck is rebuilt
    /// and reshuffled, up to `max_deal_attempts` times.
    #[instrument(skip_all, fields(round = self.state.round))]
    pub fn deal_initial_cards(&mut self, rng: &mut GameRng) -> Result<(), EngineError> {
        self.expect_phase(Phase::Dealing)?;

        let max_attempts = self.config.max_deal_attempts;
        let mut attempt = 1;
        let (deck, table) = loop {
            let mut deck = self.cards.build_deck();
            self.cards.shuffle(&mut deck, rng);
            let table = draw(&mut deck, self.config.initial_table_size);
            let value = table_value(&table);

            if !CLEARABLE_BY_ONE.contains(&value) {
                break (deck, table);
            }
            if attempt >= max_attempts {
                warn!(attempt, value, "redeal limit reached, keeping clearable table");
                break (deck, table);
            }
            debug!(attempt, value, "initial table clearable by one card, reshuffling");
            attempt += 1;
        };

        let state = &mut self.state;
        state.deck = deck;
        state.table = table;
        state.players = SeatMap::default();
        state.last_capture = None;
        state.current_player = state.dealer.other();
        state.clear_selection();
        self.deal_hands();
        self.state.phase = Phase::Playing;

        debug!(
            leader = %self.state.current_player,
            table = %format_cards(&self.cards, &self.state.table),
            "round dealt"
        );
        Ok(())
    }

    /// Winner once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        if self.state.phase != Phase::GameEnd {
            return None;
        }
        let (human, npc) = (self.state.totals[Seat::Human], self.state.totals[Seat::Npc]);
        Some(match human.cmp(&npc) {
            std::cmp::Ordering::Greater => GameResult::Winner(Seat::Human),
            std::cmp::Ordering::Less => GameResult::Winner(Seat::Npc),
            std::cmp::Ordering::Equal => GameResult::Draw,
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Captures available to `card` against the current table.
    #[must_use]
    pub fn valid_captures(&self, card: &Card) -> Vec<Vec<Card>> {
        find_valid_captures(card, &self.state.table)
    }

    /// Every legal move for `seat`. Empty when it is not that seat's turn.
    #[must_use]
    pub fn legal_moves(&self, seat: Seat) -> Vec<Move> {
        if self.state.phase != Phase::Playing || self.state.current_player != seat {
            return Vec::new();
        }

        let mut moves = Vec::new();
        for card in &self.state.players[seat].hand {
            let captures = self.valid_captures(card);
            if captures.is_empty() {
                moves.push(Move::drop(card.id));
            } else {
                moves.extend(captures.iter().map(|combo| {
                    let ids: Vec<CardId> = combo.iter().map(|c| c.id).collect();
                    Move::capture(card.id, &ids)
                }));
            }
        }
        moves
    }

    // =========================================================================
    // Human selection
    // =========================================================================

    /// Mark a hand card as selected and stash its capture options.
    pub fn select_card(&mut self, card: CardId) -> Result<&[Vec<Card>], EngineError> {
        self.expect_turn(Seat::Human)?;
        let card = self.state.players[Seat::Human]
            .hand_card(card)
            .ok_or(EngineError::CardNotInHand { card })?;

        self.state.pending_captures = self.valid_captures(&card);
        self.state.selected_card = Some(card.id);
        Ok(&self.state.pending_captures)
    }

    /// Forget the current selection.
    pub fn clear_selection(&mut self) {
        self.state.clear_selection();
    }

    // =========================================================================
    // Moves
    // =========================================================================

    /// Play `card` for the human, capturing `capture` if given.
    ///
    /// When the card can capture, `capture` must name exactly one of its
    /// valid combinations; a `None` selection is then rejected.
    pub fn execute_human_move(
        &mut self,
        card: CardId,
        capture: Option<&[CardId]>,
    ) -> Result<MoveOutcome, EngineError> {
        let mv = match capture {
            Some(ids) => Move::capture(card, ids),
            None => Move::drop(card),
        };
        self.play(Seat::Human, &mv)
    }

    /// Let `opponent` choose and play the npc's move.
    ///
    /// The opponent draws from a fork of `rng`, so the caller's stream (and
    /// every later shuffle) is the same whatever the opponent decides.
    pub fn execute_npc_turn(
        &mut self,
        opponent: &Opponent,
        rng: &mut GameRng,
    ) -> Result<MoveOutcome, EngineError> {
        self.expect_turn(Seat::Npc)?;

        let mut npc_rng = rng.fork();
        let choice = opponent
            .choose_move(&self.state, Seat::Npc, &self.cards, &mut npc_rng)
            .ok_or(EngineError::NoMovesAvailable { seat: Seat::Npc })?;
        self.play(Seat::Npc, &choice.to_move())
    }

    /// Validate and apply a move for `seat`.
    #[instrument(skip_all, fields(round = self.state.round, seat = %seat))]
    pub fn play(&mut self, seat: Seat, mv: &Move) -> Result<MoveOutcome, EngineError> {
        self.expect_turn(seat)?;

        let card = self.state.players[seat]
            .hand_card(mv.card)
            .ok_or(EngineError::CardNotInHand { card: mv.card })?;
        let taken = self.validate_capture(&card, mv)?;

        // Validated: apply.
        let state = &mut self.state;
        state.clear_selection();
        state.players[seat].hand.retain(|c| c.id != card.id);

        let mut chkobba = false;
        if taken.is_empty() {
            state.table.push(card);
        } else {
            state.table.retain(|c| !taken.iter().any(|t| t.id == c.id));
            let player = &mut state.players[seat];
            player.captured.push(card);
            player.captured.extend(taken.iter().copied());
            state.last_capture = Some(seat);

            if state.table.is_empty() {
                let ctx = ClearContext {
                    final_play: state.cards_in_play() == 0,
                };
                if self.cards.can_complete_chkobba(&card, ctx) {
                    state.players[seat].chkobbas += 1;
                    chkobba = true;
                }
            }
        }

        let sequence = state.round_history().count() as u32 + 1;
        state.history.push_back(MoveRecord {
            seat,
            mv: Move::capture(card.id, &taken.iter().map(|c| c.id).collect::<Vec<_>>()),
            round: state.round,
            sequence,
            chkobba,
        });

        debug!(
            card = %self.cards.display_name(&card),
            captured = taken.len(),
            chkobba,
            "move played"
        );

        let (new_hand_dealt, round_summary) = self.advance_turn();
        Ok(MoveOutcome {
            seat,
            played: card,
            captured: taken,
            chkobba,
            new_hand_dealt,
            round_summary,
        })
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// The table cards `mv` takes, after checking it against the resolver.
    fn validate_capture(&self, card: &Card, mv: &Move) -> Result<Vec<Card>, EngineError> {
        if mv.is_drop() {
            return if has_capture(card, &self.state.table) {
                Err(EngineError::CaptureRequired { card: card.id })
            } else {
                Ok(Vec::new())
            };
        }

        let combos = self.valid_captures(card);
        if combos.is_empty() {
            return Err(EngineError::InvalidCaptureSelection { card: card.id });
        }

        let chosen: FxHashSet<CardId> = mv.captured.iter().copied().collect();
        if chosen.len() != mv.captured.len() {
            return Err(EngineError::InvalidCaptureSelection { card: card.id });
        }
        combos
            .into_iter()
            .find(|combo| {
                combo.len() == chosen.len() && combo.iter().all(|c| chosen.contains(&c.id))
            })
            .ok_or(EngineError::InvalidCaptureSelection { card: card.id })
    }

    /// Pass the turn; deal or settle when both hands are empty.
    fn advance_turn(&mut self) -> (bool, Option<RoundSummary>) {
        self.state.current_player = self.state.current_player.other();

        if !self.state.hands_empty() {
            return (false, None);
        }
        if self.state.deck.is_empty() {
            return (false, Some(self.end_round()));
        }

        self.deal_hands();
        debug!(remaining = self.state.deck.len(), "new hand dealt");
        (true, None)
    }

    /// Hand out `hand_size` cards to each seat from the top of the deck,
    /// non-dealer first.
    fn deal_hands(&mut self) {
        let first = self.state.dealer.other();
        for seat in [first, first.other()] {
            let cards = draw(&mut self.state.deck, self.config.hand_size);
            self.state.players[seat].hand.extend(cards);
        }
    }

    /// Sweep the table, score the round and fold it into the totals.
    fn end_round(&mut self) -> RoundSummary {
        let state = &mut self.state;

        let sweep = match state.last_capture {
            Some(seat) if !state.table.is_empty() => {
                let cards = std::mem::take(&mut state.table);
                state.players[seat].captured.extend(cards.iter().copied());
                Some(Sweep { seat, cards })
            }
            _ => None,
        };

        let scores = score_round(&state.players);
        for seat in Seat::ALL {
            state.totals[seat] += scores[seat].total;
        }
        state.phase = Phase::RoundEnd;

        info!(
            round = state.round,
            human_round = scores[Seat::Human].total,
            npc_round = scores[Seat::Npc].total,
            human_total = state.totals[Seat::Human],
            npc_total = state.totals[Seat::Npc],
            "round finished"
        );

        RoundSummary {
            round: state.round,
            scores,
            sweep,
            totals: state.totals.clone(),
        }
    }

    fn target_reached(&self) -> bool {
        self.state
            .totals
            .iter()
            .any(|(_, &total)| total >= self.state.target_score)
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), EngineError> {
        if self.state.phase == expected {
            Ok(())
        } else {
            Err(EngineError::PhaseMismatch {
                expected,
                actual: self.state.phase,
            })
        }
    }

    fn expect_turn(&self, seat: Seat) -> Result<(), EngineError> {
        self.expect_phase(Phase::Playing)?;
        if self.state.current_player != seat {
            return Err(EngineError::InvalidTurn {
                expected: self.state.current_player,
                actual: seat,
            });
        }
        if self.state.players[seat].hand.is_empty() {
            warn!(%seat, "move requested with an empty hand");
            return Err(EngineError::NoMovesAvailable { seat });
        }
        Ok(())
    }
}

/// Take up to `n` cards off the top of the deck.
fn draw(deck: &mut Vec<Card>, n: usize) -> Vec<Card> {
    let split = deck.len().saturating_sub(n);
    let mut drawn = deck.split_off(split);
    drawn.reverse();
    drawn
}

fn format_cards<P: CardPrimitives>(cards: &P, pile: &[Card]) -> String {
    pile.iter()
        .map(|c| cards.display_name(c))
        .collect::<Vec<_>>()
        .join(", ")
}
