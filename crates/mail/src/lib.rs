//! Mail domain module: growth-policy mail sequences and their advancement.
//!
//! - [`MailSequenceEngine`] generates, stores and reads a company's sequence
//!   and sends the "pending suggestions" mail.
//! - [`Sequencer`] decides which mail (if any) to arm next, given only the
//!   sequence and the last mail type sent. It keeps no state between calls.

pub mod engine;
pub mod model;
pub mod ports;
pub mod sequencer;

pub use engine::MailSequenceEngine;
pub use model::{ArmedMail, GroupMailItem, MailSequence, ScheduledMailDetails};
pub use ports::{MailPolicySource, MailSequenceStore, Mailer, TimerSink};
pub use sequencer::{Advancement, Sequencer, next_step};
