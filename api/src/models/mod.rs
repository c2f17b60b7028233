mod challenge;
mod hype;
mod submission;
mod user;

pub use challenge::{Challenge, NewChallenge};
pub use hype::{Hype, NewHype};
pub use submission::{MediaType, NewSubmission, Submission, SubmissionDraft};
pub use user::{NewUser, User};
