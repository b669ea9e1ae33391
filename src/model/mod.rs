mod board;
pub(crate) mod de;
mod error;
mod issue;
mod sprint;
mod team;

pub use board::Board;
pub use error::{Error, Result};
pub use issue::{Assignee, Component, Epic, Issue, IssueFields, SprintRef, Status, StatusCategory};
pub use sprint::{Sprint, SprintState};
pub use team::Team;
