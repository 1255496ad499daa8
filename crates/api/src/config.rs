//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::time::Duration;

use partnerlink_core::MailTypeId;
use partnerlink_mail::{MailSequence, ScheduledMailDetails};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAIL_SEQUENCE: &str = "31:0,41:15,51:50,71:2300";
pub const DEFAULT_RECIPIENT_DOMAIN: &str = "example.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PARTNERLINK_BIND_ADDR '{value}' is not a socket address: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("mail sequence entry '{0}' must look like <mail_type>:<minutes>")]
    MailSequenceEntry(String),
    #[error("mail sequence must contain at least one entry")]
    EmptyMailSequence,
    #[error("PARTNERLINK_RECIPIENT_DOMAIN must not be empty")]
    EmptyRecipientDomain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Sequence the static growth policy hands to every company.
    pub mail_sequence: MailSequence,
    pub recipient_domain: String,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind = lookup("PARTNERLINK_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind
            .parse()
            .map_err(|source| ConfigError::BindAddr {
                value: bind.clone(),
                source,
            })?;

        let sequence =
            lookup("PARTNERLINK_MAIL_SEQUENCE").unwrap_or_else(|| DEFAULT_MAIL_SEQUENCE.to_string());
        let mail_sequence = parse_mail_sequence(&sequence)?;

        let recipient_domain = lookup("PARTNERLINK_RECIPIENT_DOMAIN")
            .unwrap_or_else(|| DEFAULT_RECIPIENT_DOMAIN.to_string())
            .trim()
            .to_string();
        if recipient_domain.is_empty() {
            return Err(ConfigError::EmptyRecipientDomain);
        }

        Ok(Self {
            bind_addr,
            mail_sequence,
            recipient_domain,
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            mail_sequence: default_mail_sequence(),
            recipient_domain: DEFAULT_RECIPIENT_DOMAIN.to_string(),
        }
    }
}

fn default_mail_sequence() -> MailSequence {
    [(31, 0), (41, 15), (51, 50), (71, 2300)]
        .into_iter()
        .map(|(mail_type, minutes)| {
            ScheduledMailDetails::new(MailTypeId::new(mail_type), Duration::from_secs(minutes * 60))
        })
        .collect()
}

/// Parse `31:0,41:15,...` (mail type id, delay in minutes) keeping the order.
pub fn parse_mail_sequence(raw: &str) -> Result<MailSequence, ConfigError> {
    let sequence = raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (mail_type, minutes) = entry
                .split_once(':')
                .ok_or_else(|| ConfigError::MailSequenceEntry(entry.to_string()))?;
            let mail_type: MailTypeId = mail_type
                .trim()
                .parse()
                .map_err(|_| ConfigError::MailSequenceEntry(entry.to_string()))?;
            let secs = minutes
                .trim()
                .parse::<u64>()
                .ok()
                .and_then(|minutes| minutes.checked_mul(60))
                .ok_or_else(|| ConfigError::MailSequenceEntry(entry.to_string()))?;
            Ok::<_, ConfigError>(ScheduledMailDetails::new(mail_type, Duration::from_secs(secs)))
        })
        .collect::<Result<MailSequence, ConfigError>>()?;

    if sequence.is_empty() {
        return Err(ConfigError::EmptyMailSequence);
    }
    Ok(sequence)
}
