//! Column Match library - orchestration of column-drop board games
//!
//! Runs a match of a four-in-row game or a dual-letter word game between a
//! human and a second human or an automated opponent.
//!
//! # Architecture
//!
//! - **Engine**: contract of the external board engine (legality, win lines, move search)
//! - **Controller**: the turn state machine owning the [`Match`]
//! - **Classifier**: engine win signals to [`Outcome`]s
//! - **Dispatcher**: bot turns routed to the engine's search entry points
//! - **Reporter**: exactly-once score reporting to the remote service
//! - **Session**: cached sign-in and its verification
//! - **View**: text projection of match events
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use column_match::{BotTier, Engine, GameKind, HttpRemote, MatchController, MoverKind};
//!
//! # fn example(engine: Box<dyn Engine>) -> Result<(), column_match::MatchError> {
//! let (events, _view_rx) = tokio::sync::mpsc::unbounded_channel();
//! let remote = Arc::new(HttpRemote::new("http://127.0.0.1:8080"));
//! let mut controller = MatchController::new(
//!     GameKind::FourInRow,
//!     engine,
//!     remote,
//!     Some("alice".to_string()),
//!     events,
//! );
//! controller.select_opponent(MoverKind::Bot(BotTier::Hard))?;
//! controller.apply_move(4, None)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod classifier;
mod controller;
mod dispatcher;
mod engine;
mod leaderboard;
mod remote;
mod reporter;
mod session;
mod types;
mod view;

// Crate-level exports - Domain types
pub use types::{
    BotTier, GameKind, Letter, MoverKind, Outcome, Phase, PhraseAssignment, PlayerId, Word,
};

// Crate-level exports - Engine contract
pub use engine::{Engine, LetterPlacement, LineSignal, PiecePlacement};

// Crate-level exports - Match orchestration
pub use classifier::{WinSignal, classify};
pub use controller::{Match, MatchController, MatchError, MatchEvent, MoveOutcome};
pub use dispatcher::{BotDispatcher, BotError, BotMove};
pub use reporter::{ScoreReporter, score_event};

// Crate-level exports - Remote service
pub use leaderboard::fetch_leaderboard;
pub use remote::{Credentials, HttpRemote, RemoteError, RemoteService, ScoreEvent, routes};

// Crate-level exports - Session management
pub use session::{
    AccountCreation, CredentialStore, FileCredentialStore, MemoryCredentialStore, Session,
    SessionManager, StoreError,
};

// Crate-level exports - Board view
pub use view::{BoardView, Piece};
