//! Seed data loaded on boot.
//!
//! Five inbox messages, four sent messages, and the vendor and template
//! directory used by the compose form.

use chrono::{DateTime, Utc};

use crate::Result;
use crate::directory::{Directory, MessageTemplate, Vendor};
use crate::message::{
    Message, MessageId, MessageRepository, MessageType, Priority, make_preview,
};

struct Seed {
    sender: &'static str,
    recipient: Option<(&'static str, &'static str)>,
    subject: &'static str,
    content: &'static str,
    priority: Priority,
    timestamp: &'static str,
    is_read: bool,
    has_attachment: bool,
    is_acknowledged: Option<bool>,
    kind: MessageType,
}

const SEEDS: &[Seed] = &[
    Seed {
        sender: "Impact Team",
        recipient: None,
        subject: "Weekly Sales Report Required",
        content: "Dear Team,\n\nPlease submit your weekly sales report by EOD Friday. Include inventory levels and any issues encountered during the week. This report is crucial for our monthly review meeting.\n\nBest regards,\nImpact Team",
        priority: Priority::High,
        timestamp: "2025-01-22T10:30:00Z",
        is_read: false,
        has_attachment: false,
        is_acknowledged: None,
        kind: MessageType::Inbox,
    },
    Seed {
        sender: "Impact Team",
        recipient: None,
        subject: "New Product Launch Guidelines",
        content: "Team,\n\nWe have a new product launch scheduled for next week. Please review the attached guidelines carefully and confirm receipt by replying to this message.\n\nThe launch timeline is tight, so immediate attention is required.\n\nThanks,\nImpact Team",
        priority: Priority::Medium,
        timestamp: "2025-01-22T09:15:00Z",
        is_read: false,
        has_attachment: true,
        is_acknowledged: None,
        kind: MessageType::Inbox,
    },
    Seed {
        sender: "Impact Team",
        recipient: None,
        subject: "Store Compliance Audit",
        content: "All Store Managers,\n\nA compliance audit has been scheduled for January 25th. Please ensure all documentation is ready for review, including:\n\n- Safety protocols\n- Employee training records\n- Inventory management logs\n- Customer service policies\n\nFailure to have documentation ready may result in compliance violations.\n\nRegards,\nCompliance Team",
        priority: Priority::High,
        timestamp: "2025-01-21T14:45:00Z",
        is_read: true,
        has_attachment: false,
        is_acknowledged: None,
        kind: MessageType::Inbox,
    },
    Seed {
        sender: "HR Department",
        recipient: None,
        subject: "Team Building Event",
        content: "Dear All,\n\nWe are excited to announce our quarterly team building event scheduled for next Friday at the community center.\n\nActivities include:\n- Team challenges\n- Lunch provided\n- Awards ceremony\n\nPlease RSVP by Wednesday so we can arrange catering accordingly.\n\nLooking forward to seeing everyone there!\n\nHR Team",
        priority: Priority::Low,
        timestamp: "2025-01-20T16:20:00Z",
        is_read: true,
        has_attachment: false,
        is_acknowledged: None,
        kind: MessageType::Inbox,
    },
    Seed {
        sender: "IT Support",
        recipient: None,
        subject: "System Maintenance Window",
        content: "Dear Users,\n\nWe have scheduled system maintenance for this weekend from 2 AM to 6 AM on Saturday.\n\nDuring this time, you may experience:\n- Brief service interruptions\n- Slower response times\n- Temporary unavailability of some features\n\nWe apologize for any inconvenience and appreciate your patience.\n\nIT Support Team",
        priority: Priority::Medium,
        timestamp: "2025-01-19T11:30:00Z",
        is_read: false,
        has_attachment: false,
        is_acknowledged: None,
        kind: MessageType::Inbox,
    },
    Seed {
        sender: "You",
        recipient: Some(("Impact Team", "impact@company.example")),
        subject: "Weekly Sales Report - January Week 3",
        content: "Dear Impact Team,\n\nPlease find attached the comprehensive weekly sales report for January week 3.\n\nKey Highlights:\n- Total Sales: $52,400 (15% above target)\n- New Customers: 28\n- Customer Retention: 94%\n- Top Performing Products: Electronics, Home Goods\n- Regional Performance: All regions showing positive growth\n\nPlease let me know if you need any additional details or clarification.\n\nBest regards,\n[Your Name]",
        priority: Priority::High,
        timestamp: "2025-01-21T17:30:00Z",
        is_read: true,
        has_attachment: true,
        is_acknowledged: Some(false),
        kind: MessageType::Sent,
    },
    Seed {
        sender: "You",
        recipient: Some(("HR Department", "hr@company.example")),
        subject: "Team Building Event - RSVP Confirmation",
        content: "Hi HR Team,\n\nI wanted to confirm my attendance for the upcoming quarterly team building event scheduled for next Friday.\n\nPlease let me know if there is anything specific I should bring or prepare for the event.\n\nThank you for organizing this!\n\nBest regards,\n[Your Name]",
        priority: Priority::Low,
        timestamp: "2025-01-20T15:45:00Z",
        is_read: true,
        has_attachment: false,
        is_acknowledged: Some(true),
        kind: MessageType::Sent,
    },
    Seed {
        sender: "You",
        recipient: Some(("IT Support", "support@company.example")),
        subject: "System Access Request",
        content: "Dear IT Support,\n\nI am writing to request access to the new inventory management system for myself and my team members. We will need the following access levels:\n\n- Read/Write access to inventory data\n- Report generation capabilities\n- User management for my team (5 members)\n\nThank you for your assistance.\n\nBest regards,\n[Your Name]",
        priority: Priority::Medium,
        timestamp: "2025-01-19T09:20:00Z",
        is_read: true,
        has_attachment: false,
        is_acknowledged: Some(false),
        kind: MessageType::Sent,
    },
    Seed {
        sender: "You",
        recipient: Some(("Finance Department", "finance@company.example")),
        subject: "Budget Approval Request - Q1 Marketing",
        content: "Dear Finance Team,\n\nI am submitting a budget approval request for our Q1 marketing initiatives.\n\nRequested Budget Breakdown:\n- Digital Marketing Campaigns: $8,000\n- Print Advertising: $3,000\n- Event Sponsorships: $2,500\n- Marketing Materials: $1,500\n\nTotal Requested: $15,000\n\nThank you,\n[Your Name]",
        priority: Priority::High,
        timestamp: "2025-01-18T14:15:00Z",
        is_read: true,
        has_attachment: true,
        is_acknowledged: Some(false),
        kind: MessageType::Sent,
    },
];

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map_or(DateTime::<Utc>::UNIX_EPOCH, |dt| dt.with_timezone(&Utc))
}

/// Fixture messages in collection order, each with a fresh id.
#[must_use]
pub fn messages() -> Vec<Message> {
    SEEDS
        .iter()
        .map(|seed| Message {
            id: MessageId::generate(),
            sender: seed.sender.to_string(),
            recipient: seed.recipient.map(|(name, _)| name.to_string()),
            recipient_email: seed.recipient.map(|(_, email)| email.to_string()),
            subject: seed.subject.to_string(),
            preview: make_preview(seed.content),
            content: seed.content.to_string(),
            priority: seed.priority,
            timestamp: parse_timestamp(seed.timestamp),
            is_read: seed.is_read,
            has_attachment: seed.has_attachment,
            is_acknowledged: seed.is_acknowledged,
            kind: seed.kind,
        })
        .collect()
}

/// Fixture vendors and templates.
#[must_use]
pub fn directory() -> Directory {
    let vendors = vec![
        Vendor::new("vendor1", "Acme Supplies", "orders@acmesupplies.example", "Supplies"),
        Vendor::new("vendor2", "Swift Logistics", "dispatch@swiftlogistics.example", "Logistics"),
        Vendor::new("vendor3", "Bright Facilities", "service@brightfacilities.example", "Maintenance"),
        Vendor::new("vendor4", "Peak Marketing", "hello@peakmarketing.example", "Marketing"),
    ];

    let templates = vec![
        MessageTemplate {
            id: "template1".into(),
            name: "Order Request".into(),
            subject: "Order Request".into(),
            content: "Hello,\n\nWe would like to place an order for the following items:\n\n- \n\nPlease confirm availability and expected delivery date.\n\nThank you.".into(),
        },
        MessageTemplate {
            id: "template2".into(),
            name: "Delivery Inquiry".into(),
            subject: "Delivery Status Inquiry".into(),
            content: "Hello,\n\nCould you please provide an update on the delivery status of our recent order?\n\nThank you.".into(),
        },
        MessageTemplate {
            id: "template3".into(),
            name: "Invoice Question".into(),
            subject: "Question About Invoice".into(),
            content: "Hello,\n\nWe have a question regarding a recent invoice. Could you please send a detailed breakdown?\n\nThank you.".into(),
        },
        MessageTemplate {
            id: "template4".into(),
            name: "Service Request".into(),
            subject: "Service Request".into(),
            content: "Hello,\n\nWe would like to schedule a service visit. Please let us know your earliest availability.\n\nThank you.".into(),
        },
    ];

    Directory::new(vendors, templates)
}

/// Insert the fixture messages so that collection order equals fixture order.
///
/// # Errors
///
/// Returns an error if the repository rejects an insert.
pub async fn seed<R: MessageRepository>(repo: &R) -> Result<usize> {
    let messages = messages();
    let count = messages.len();
    for message in messages.into_iter().rev() {
        repo.insert(message).await?;
    }
    tracing::debug!(count, "Seeded fixture messages");
    Ok(count)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::message::{InMemoryMessageRepository, PREVIEW_LENGTH};

    #[test]
    fn test_fixture_counts() {
        let messages = messages();
        assert_eq!(messages.iter().filter(|m| m.kind == MessageType::Inbox).count(), 5);
        assert_eq!(messages.iter().filter(|m| m.kind == MessageType::Sent).count(), 4);
        assert_eq!(messages.iter().filter(|m| m.is_unread_inbox()).count(), 3);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = messages().into_iter().map(|m| m.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), SEEDS.len());
    }

    #[test]
    fn test_acknowledged_only_on_sent() {
        for message in messages() {
            assert_eq!(
                message.is_acknowledged.is_some(),
                message.kind == MessageType::Sent,
                "{}",
                message.subject
            );
        }
    }

    #[test]
    fn test_timestamps_parse() {
        assert!(messages().iter().all(|m| m.timestamp != DateTime::<Utc>::UNIX_EPOCH));
    }

    #[test]
    fn test_previews_are_prefixes() {
        for message in messages() {
            let prefix = message.preview.strip_suffix("...").unwrap_or(&message.preview);
            assert!(message.content.starts_with(prefix));
            assert!(prefix.chars().count() <= PREVIEW_LENGTH);
        }
    }

    #[test]
    fn test_directory_has_vendor1() {
        let dir = directory();
        assert!(dir.vendor("vendor1").is_some());
        assert_eq!(dir.templates().len(), 4);
    }

    #[tokio::test]
    async fn test_seed_preserves_order() {
        let repo = InMemoryMessageRepository::new();
        let count = seed(&repo).await.unwrap();
        let stored = repo.list().await.unwrap();
        assert_eq!(stored.len(), count);
        let subjects: Vec<_> = stored.iter().map(|m| m.subject.as_str()).collect();
        let expected: Vec<_> = SEEDS.iter().map(|s| s.subject).collect();
        assert_eq!(subjects, expected);
    }
}
