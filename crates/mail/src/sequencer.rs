//! Mail-sequence advancement.
//!
//! Positions are addressed by mail type rather than by index: callers only
//! say which mail was sent last. Nothing is remembered between calls, so the
//! same inputs always lead to the same decision.

use std::sync::Arc;

use tracing::{debug, info};

use partnerlink_core::{CompanyId, DomainError, DomainResult, MailTypeId};

use crate::model::{MailSequence, ScheduledMailDetails};
use crate::ports::TimerSink;

/// Next step of `sequence` after `last_mail_type_id`.
///
/// - empty sequence: `MailSequenceUnavailable`, whatever `last_mail_type_id` is
/// - no mail sent yet: the first step
/// - `last_mail_type_id` not in the sequence: `UnknownMailType`
/// - last step already sent: `Ok(None)`, the sequence is exhausted
pub fn next_step(
    company_id: CompanyId,
    sequence: &MailSequence,
    last_mail_type_id: Option<MailTypeId>,
) -> DomainResult<Option<&ScheduledMailDetails>> {
    if sequence.is_empty() {
        return Err(DomainError::MailSequenceUnavailable(company_id));
    }

    let Some(last) = last_mail_type_id else {
        return Ok(sequence.first());
    };

    let index = sequence
        .position_of(last)
        .ok_or_else(|| DomainError::unknown_mail_type(company_id, last))?;

    Ok(sequence.get(index + 1))
}

/// Result of [`Sequencer::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advancement {
    /// A timer was armed for this step.
    Armed(ScheduledMailDetails),
    /// Every step has been sent; nothing was armed.
    Exhausted,
}

pub struct Sequencer {
    timer: Arc<dyn TimerSink>,
}

impl Sequencer {
    pub fn new(timer: Arc<dyn TimerSink>) -> Self {
        Self { timer }
    }

    /// Arm the step following `last_mail_type_id` (or the first step).
    pub async fn advance(
        &self,
        company_id: CompanyId,
        sequence: &MailSequence,
        last_mail_type_id: Option<MailTypeId>,
    ) -> DomainResult<Advancement> {
        let Some(target) = next_step(company_id, sequence, last_mail_type_id)?.copied() else {
            info!(
                company_id = %company_id,
                last_mail_type_id = ?last_mail_type_id,
                "mail sequence exhausted"
            );
            return Ok(Advancement::Exhausted);
        };

        self.timer
            .arm(company_id, target.mail_type_id, target.delay)
            .await?;

        debug!(
            company_id = %company_id,
            mail_type_id = %target.mail_type_id,
            delay_secs = target.delay.as_secs(),
            "armed next mail"
        );
        Ok(Advancement::Armed(target))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use partnerlink_core::CollaboratorError;

    use super::*;
    use crate::model::ArmedMail;

    #[derive(Default)]
    struct RecordingTimer {
        armed: Mutex<Vec<ArmedMail>>,
    }

    #[async_trait]
    impl TimerSink for RecordingTimer {
        async fn arm(
            &self,
            company_id: CompanyId,
            mail_type_id: MailTypeId,
            delay: Duration,
        ) -> Result<(), CollaboratorError> {
            self.armed.lock().unwrap().push(ArmedMail {
                company_id,
                mail_type_id,
                delay,
            });
            Ok(())
        }
    }

    const COMPANY: CompanyId = CompanyId::new(545);

    fn step(mail_type: i64, minutes: u64) -> ScheduledMailDetails {
        ScheduledMailDetails::new(MailTypeId::new(mail_type), Duration::from_secs(minutes * 60))
    }

    fn onboarding_sequence() -> MailSequence {
        MailSequence::new(vec![step(31, 0), step(41, 15), step(51, 50), step(71, 2300)])
    }

    fn setup() -> (Sequencer, Arc<RecordingTimer>) {
        let timer = Arc::new(RecordingTimer::default());
        (Sequencer::new(timer.clone()), timer)
    }

    #[tokio::test]
    async fn arms_the_step_after_the_last_sent_mail() {
        let (sequencer, timer) = setup();

        let advancement = sequencer
            .advance(COMPANY, &onboarding_sequence(), Some(MailTypeId::new(31)))
            .await
            .unwrap();

        assert_eq!(advancement, Advancement::Armed(step(41, 15)));
        assert_eq!(
            *timer.armed.lock().unwrap(),
            vec![ArmedMail {
                company_id: COMPANY,
                mail_type_id: MailTypeId::new(41),
                delay: Duration::from_secs(15 * 60),
            }]
        );
    }

    #[tokio::test]
    async fn arms_nothing_after_the_final_step() {
        let (sequencer, timer) = setup();

        let advancement = sequencer
            .advance(COMPANY, &onboarding_sequence(), Some(MailTypeId::new(71)))
            .await
            .unwrap();

        assert_eq!(advancement, Advancement::Exhausted);
        assert!(timer.armed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn final_step_is_terminal_wherever_the_type_sorts() {
        let (sequencer, timer) = setup();
        let sequence = MailSequence::new(vec![step(51, 50), step(71, 150), step(31, 2300)]);

        let advancement = sequencer
            .advance(COMPANY, &sequence, Some(MailTypeId::new(31)))
            .await
            .unwrap();

        assert_eq!(advancement, Advancement::Exhausted);
        assert!(timer.armed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_last_mail_type_fails_without_arming() {
        let (sequencer, timer) = setup();
        let sequence = MailSequence::new(vec![step(52, 50), step(72, 150), step(82, 2300)]);

        let err = sequencer
            .advance(COMPANY, &sequence, Some(MailTypeId::new(31)))
            .await
            .unwrap_err();

        match err {
            DomainError::UnknownMailType {
                company_id,
                mail_type_id,
            } => {
                assert_eq!(company_id, COMPANY);
                assert_eq!(mail_type_id, MailTypeId::new(31));
            }
            other => panic!("Expected UnknownMailType, got {other:?}"),
        }
        assert!(timer.armed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_sequence_is_unavailable() {
        let (sequencer, timer) = setup();

        for last in [None, Some(MailTypeId::new(31))] {
            let err = sequencer
                .advance(COMPANY, &MailSequence::default(), last)
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::MailSequenceUnavailable(id) if id == COMPANY));
        }
        assert!(timer.armed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn first_mail_is_armed_when_nothing_was_sent() {
        let (sequencer, timer) = setup();
        let sequence = MailSequence::new(vec![step(41, 15), step(51, 50), step(71, 2300)]);

        sequencer.advance(COMPANY, &sequence, None).await.unwrap();

        let armed = timer.armed.lock().unwrap();
        assert_eq!(armed.len(), 1);
        assert_eq!(armed[0].mail_type_id, MailTypeId::new(41));
        assert_eq!(armed[0].delay, Duration::from_secs(15 * 60));
    }

    #[test]
    fn next_step_is_deterministic() {
        let sequence = onboarding_sequence();
        let last = Some(MailTypeId::new(51));

        let a = next_step(COMPANY, &sequence, last).unwrap().copied();
        let b = next_step(COMPANY, &sequence, last).unwrap().copied();

        assert_eq!(a, b);
        assert_eq!(a, Some(step(71, 2300)));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn unique_sequence() -> impl Strategy<Value = MailSequence> {
            proptest::collection::btree_set(0i64..500, 1..12).prop_flat_map(|types| {
                let types: Vec<i64> = types.into_iter().collect();
                let len = types.len();
                (Just(types), proptest::collection::vec(0u64..5000, len))
            })
            .prop_map(|(types, minutes)| {
                types
                    .into_iter()
                    .zip(minutes)
                    .map(|(t, m)| step(t, m))
                    .collect()
            })
        }

        proptest! {
            /// Property: with nothing sent yet, the first step is always next.
            #[test]
            fn nothing_sent_means_first_step(sequence in unique_sequence()) {
                let next = next_step(COMPANY, &sequence, None).unwrap();
                prop_assert_eq!(next, sequence.first());
            }

            /// Property: every step but the last is followed by its successor,
            /// and the last one is terminal.
            #[test]
            fn steps_advance_one_at_a_time(sequence in unique_sequence()) {
                for (index, sent) in sequence.iter().enumerate() {
                    let next = next_step(COMPANY, &sequence, Some(sent.mail_type_id)).unwrap();
                    prop_assert_eq!(next, sequence.get(index + 1));
                }
            }

            /// Property: an empty sequence never advances.
            #[test]
            fn empty_sequence_never_advances(last in proptest::option::of(0i64..500)) {
                let empty = MailSequence::default();
                let result = next_step(COMPANY, &empty, last.map(MailTypeId::new));
                prop_assert!(matches!(result, Err(DomainError::MailSequenceUnavailable(_))));
            }
        }
    }
}
