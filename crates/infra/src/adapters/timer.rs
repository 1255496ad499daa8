use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use partnerlink_core::{CollaboratorError, CompanyId, MailTypeId};
use partnerlink_events::{EventBus, Trigger};
use partnerlink_mail::TimerSink;

/// Timer backed by tokio tasks.
///
/// Each arm sleeps for its delay on the current runtime, then publishes a
/// `ScheduledMailDue` trigger on the bus. Arming the same key twice yields two
/// triggers. Pending timers do not survive a restart, and nothing is kept
/// once a timer has fired.
pub struct InProcessTimer<B> {
    bus: Arc<B>,
    pending: Arc<AtomicUsize>,
}

impl<B> InProcessTimer<B>
where
    B: EventBus<Trigger> + 'static,
{
    pub fn new(bus: Arc<B>) -> Self {
        Self {
            bus,
            pending: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Timers armed but not fired yet.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<B> TimerSink for InProcessTimer<B>
where
    B: EventBus<Trigger> + 'static,
{
    async fn arm(
        &self,
        company_id: CompanyId,
        mail_type_id: MailTypeId,
        delay: Duration,
    ) -> Result<(), CollaboratorError> {
        self.pending.fetch_add(1, Ordering::SeqCst);

        let bus = self.bus.clone();
        let pending = self.pending.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            pending.fetch_sub(1, Ordering::SeqCst);
            debug!(company_id = %company_id, mail_type_id = %mail_type_id, "timer fired");
            if let Err(err) = bus.publish(Trigger::scheduled_mail_due(company_id, mail_type_id)) {
                warn!(
                    company_id = %company_id,
                    mail_type_id = %mail_type_id,
                    error = %err,
                    "failed to publish fired timer"
                );
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use partnerlink_events::InMemoryEventBus;

    use super::*;

    #[tokio::test]
    async fn fired_timer_publishes_scheduled_mail_due() {
        let bus = Arc::new(InMemoryEventBus::<Trigger>::new());
        let subscription = bus.subscribe();
        let timer = InProcessTimer::new(bus.clone());

        timer
            .arm(CompanyId::new(545), MailTypeId::new(31), Duration::from_millis(10))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        match subscription.try_recv().unwrap() {
            Trigger::ScheduledMailDue(e) => {
                assert_eq!(e.company_id, CompanyId::new(545));
                assert_eq!(e.mail_type_id, MailTypeId::new(31));
            }
            other => panic!("Expected ScheduledMailDue, got {other:?}"),
        }
        assert_eq!(timer.pending(), 0);
    }

    #[tokio::test]
    async fn timer_does_not_fire_before_its_delay() {
        let bus = Arc::new(InMemoryEventBus::<Trigger>::new());
        let subscription = bus.subscribe();
        let timer = InProcessTimer::new(bus.clone());

        timer
            .arm(CompanyId::new(1), MailTypeId::new(41), Duration::from_secs(15 * 60))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(subscription.try_recv().is_err());
        assert_eq!(timer.pending(), 1);
    }

    #[tokio::test]
    async fn fired_timers_leave_nothing_behind() {
        let bus = Arc::new(InMemoryEventBus::<Trigger>::new());
        let subscription = bus.subscribe();
        let timer = InProcessTimer::new(bus.clone());

        for mail_type in 0..500 {
            timer
                .arm(CompanyId::new(7), MailTypeId::new(mail_type), Duration::from_millis(1))
                .await
                .unwrap();
        }
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(timer.pending(), 0);
        let fired = std::iter::from_fn(|| subscription.try_recv().ok()).count();
        assert_eq!(fired, 500);
    }
}
