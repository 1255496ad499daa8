use std::time::Duration;

use partnerlink_core::{CompanyId, MailTypeId, ValueObject};

/// One step of a growth-policy mail sequence.
///
/// `delay` is measured from the previously sent mail of the same sequence;
/// the first entry's delay is measured from suggestion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduledMailDetails {
    pub mail_type_id: MailTypeId,
    pub delay: Duration,
}

impl ScheduledMailDetails {
    pub fn new(mail_type_id: MailTypeId, delay: Duration) -> Self {
        Self { mail_type_id, delay }
    }
}

impl ValueObject for ScheduledMailDetails {}

/// Ordered mail sequence of a company.
///
/// Order defines the total mail-sending order. Mail type ids are expected to
/// be unique; lookups by type use the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailSequence(Vec<ScheduledMailDetails>);

impl MailSequence {
    pub fn new(steps: Vec<ScheduledMailDetails>) -> Self {
        Self(steps)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> Option<&ScheduledMailDetails> {
        self.0.first()
    }

    pub fn get(&self, index: usize) -> Option<&ScheduledMailDetails> {
        self.0.get(index)
    }

    /// Index of the first step with `mail_type_id`.
    pub fn position_of(&self, mail_type_id: MailTypeId) -> Option<usize> {
        self.0.iter().position(|step| step.mail_type_id == mail_type_id)
    }

    pub fn contains(&self, mail_type_id: MailTypeId) -> bool {
        self.position_of(mail_type_id).is_some()
    }

    /// Mail type ids that occur more than once, in order of first repeat.
    pub fn duplicate_mail_types(&self) -> Vec<MailTypeId> {
        let mut seen = Vec::with_capacity(self.0.len());
        let mut duplicates = Vec::new();
        for step in &self.0 {
            if seen.contains(&step.mail_type_id) {
                if !duplicates.contains(&step.mail_type_id) {
                    duplicates.push(step.mail_type_id);
                }
            } else {
                seen.push(step.mail_type_id);
            }
        }
        duplicates
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduledMailDetails> {
        self.0.iter()
    }
}

impl From<Vec<ScheduledMailDetails>> for MailSequence {
    fn from(value: Vec<ScheduledMailDetails>) -> Self {
        Self(value)
    }
}

impl FromIterator<ScheduledMailDetails> for MailSequence {
    fn from_iter<I: IntoIterator<Item = ScheduledMailDetails>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a MailSequence {
    type Item = &'a ScheduledMailDetails;
    type IntoIter = std::slice::Iter<'a, ScheduledMailDetails>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A fully resolved mail ready for transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMailItem {
    pub title: String,
    pub content: String,
    pub recipients: Vec<String>,
}

impl ValueObject for GroupMailItem {}

/// Key of an armed timer: which mail to send to which company, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArmedMail {
    pub company_id: CompanyId,
    pub mail_type_id: MailTypeId,
    pub delay: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(mail_type: i64, minutes: u64) -> ScheduledMailDetails {
        ScheduledMailDetails::new(MailTypeId::new(mail_type), Duration::from_secs(minutes * 60))
    }

    #[test]
    fn position_of_uses_first_match() {
        let sequence = MailSequence::new(vec![step(31, 0), step(41, 15), step(31, 50)]);

        assert_eq!(sequence.position_of(MailTypeId::new(31)), Some(0));
        assert_eq!(sequence.position_of(MailTypeId::new(41)), Some(1));
        assert_eq!(sequence.position_of(MailTypeId::new(99)), None);
    }

    #[test]
    fn reports_duplicate_mail_types_once() {
        let sequence = MailSequence::new(vec![
            step(31, 0),
            step(41, 15),
            step(31, 50),
            step(31, 60),
            step(41, 70),
        ]);

        assert_eq!(
            sequence.duplicate_mail_types(),
            vec![MailTypeId::new(31), MailTypeId::new(41)]
        );
        assert!(MailSequence::new(vec![step(1, 0), step(2, 0)]).duplicate_mail_types().is_empty());
    }
}
