use crate::board::CommunityCards;
use crate::errors::AdvisorError;
use crate::player::Player;
use crate::prompt::{PromptPhase, SceneBuilder};
use crate::stage::Stage;
use crate::validation::{summarize, TableSummary};
use serde::Serialize;

/// Snapshot of the hand currently being advised.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameSession {
    players: Vec<Player>,
    pot: u64,
    stage: Stage,
    phase: PromptPhase,
}

impl GameSession {
    fn new(players: Vec<Player>) -> Self {
        let pot = total_pot(&players);
        Self {
            players,
            pot,
            stage: Stage::Preflop,
            phase: PromptPhase::AwaitingFirstPrompt,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn pot(&self) -> u64 {
        self.pot
    }
    pub fn stage(&self) -> Stage {
        self.stage
    }
    pub fn phase(&self) -> PromptPhase {
        self.phase
    }
}

/// Lifecycle of one table's hand.
///
/// `Empty` until setup succeeds, then `Active` until reset.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub enum SessionState {
    #[default]
    Empty,
    Active(GameSession),
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active(_))
    }

    pub fn session(&self) -> Option<&GameSession> {
        match self {
            SessionState::Active(session) => Some(session),
            SessionState::Empty => None,
        }
    }

    pub fn phase(&self) -> Option<PromptPhase> {
        self.session().map(GameSession::phase)
    }
}

/// Result of one advice request.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Advice {
    pub prompt: String,
    pub stage: Stage,
    /// The prompt carried the header and strategy request
    pub first_prompt: bool,
}

/// Owns one table's session and renders scene descriptions against it.
///
/// Not synchronized; share it behind a lock when more than one caller can
/// reach the same table.
///
/// # Examples
///
/// ```
/// use seatread_engine::board::CommunityCards;
/// use seatread_engine::player::Player;
/// use seatread_engine::session::HandAdvisor;
///
/// let players = vec![
///     Player::new("Ann", 200, 1).with_hole_cards("SA", "HK"),
///     Player::new("Ben", 200, 2).dealer(),
/// ];
/// let mut advisor = HandAdvisor::new();
/// advisor.setup(players.clone()).unwrap();
///
/// let first = advisor.advise(players.clone(), &CommunityCards::preflop()).unwrap();
/// let second = advisor.advise(players, &CommunityCards::preflop()).unwrap();
/// assert!(first.first_prompt);
/// assert!(!second.first_prompt);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HandAdvisor {
    builder: SceneBuilder,
    state: SessionState,
}

impl HandAdvisor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: SceneBuilder) -> Self {
        Self {
            builder,
            state: SessionState::Empty,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn phase(&self) -> Option<PromptPhase> {
        self.state.phase()
    }

    /// Starts a new hand, replacing any hand in progress.
    ///
    /// On failure the current state is left untouched.
    pub fn setup(&mut self, players: Vec<Player>) -> Result<TableSummary, AdvisorError> {
        let summary = summarize(&players)?;
        self.state = SessionState::Active(GameSession::new(players));
        Ok(summary)
    }

    /// Renders the scene description for the latest table data.
    ///
    /// With an active hand the snapshot is refreshed and the hand moves to
    /// [`PromptPhase::PromptsIssued`]. Without one the description is rendered
    /// as a first prompt and no session is created.
    pub fn advise(
        &mut self,
        players: Vec<Player>,
        cards: &CommunityCards,
    ) -> Result<Advice, AdvisorError> {
        let phase = self.state.phase().unwrap_or_default();
        let scene = self.builder.render(&players, cards, phase)?;

        if let SessionState::Active(session) = &mut self.state {
            session.pot = total_pot(&players);
            session.players = players;
            session.stage = scene.stage;
            session.phase = scene.phase;
        }

        Ok(Advice {
            prompt: scene.text,
            stage: scene.stage,
            first_prompt: phase.is_first(),
        })
    }

    /// Discards the hand. Always succeeds.
    pub fn reset(&mut self) {
        self.state = SessionState::Empty;
    }
}

/// Sum of every bet stored for the table.
pub fn total_pot(players: &[Player]) -> u64 {
    players.iter().map(Player::total_bet).sum()
}
