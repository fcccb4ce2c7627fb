mod board;
pub mod domain;
pub mod scorer;

pub use board::{MatchBoard, MatchError};
pub use domain::{Match, MatchId, MatchStatus, Message, MessageKind};
pub use scorer::{compatibility_score, CompatibilityScore, MatchFactor, ScoreComponent};
