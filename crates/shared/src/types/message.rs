//! Fully composed statement email, ready for transport.

/// A composed rent statement email.
///
/// Header order is fixed: From, To, Cc (only when present), Subject.
/// Envelope recipients follow the same order with the bcc address appended;
/// duplicates are preserved, never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    /// Sender address.
    pub from: String,
    /// Primary recipient address.
    pub to: String,
    /// Optional carbon-copy address.
    pub cc: Option<String>,
    /// Blind-copy address.
    pub bcc: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

impl MailMessage {
    /// Envelope recipients in delivery order: to, cc when present, then bcc.
    #[must_use]
    pub fn recipients(&self) -> Vec<&str> {
        let mut recipients = vec![self.to.as_str()];
        if let Some(cc) = &self.cc {
            recipients.push(cc.as_str());
        }
        recipients.push(self.bcc.as_str());
        recipients
    }

    /// Renders the raw message text: header block, blank line, body, and a
    /// trailing newline.
    #[must_use]
    pub fn render(&self) -> String {
        let mut text = format!("From: {}\nTo: {}\n", self.from, self.to);
        if let Some(cc) = &self.cc {
            text.push_str(&format!("Cc: {cc}\n"));
        }
        text.push_str(&format!("Subject: {}\n\n{}\n", self.subject, self.body));
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(cc: Option<&str>) -> MailMessage {
        MailMessage {
            from: "house@example.com".to_string(),
            to: "alice@example.com".to_string(),
            cc: cc.map(ToString::to_string),
            bcc: "archive@example.com".to_string(),
            subject: "August rent is $1040.00".to_string(),
            body: "Rent: 1000.00\nTotal: 1040.00".to_string(),
        }
    }

    #[test]
    fn test_recipients_order_with_cc() {
        let msg = message(Some("partner@example.com"));
        assert_eq!(
            msg.recipients(),
            vec![
                "alice@example.com",
                "partner@example.com",
                "archive@example.com"
            ]
        );
    }

    #[test]
    fn test_recipients_order_without_cc() {
        let msg = message(None);
        assert_eq!(msg.recipients(), vec!["alice@example.com", "archive@example.com"]);
    }

    #[test]
    fn test_recipients_keep_duplicates() {
        let mut msg = message(Some("alice@example.com"));
        msg.bcc = "alice@example.com".to_string();
        assert_eq!(
            msg.recipients(),
            vec!["alice@example.com", "alice@example.com", "alice@example.com"]
        );
    }

    #[test]
    fn test_render_header_order() {
        let text = message(Some("partner@example.com")).render();
        assert_eq!(
            text,
            "From: house@example.com\n\
             To: alice@example.com\n\
             Cc: partner@example.com\n\
             Subject: August rent is $1040.00\n\
             \n\
             Rent: 1000.00\nTotal: 1040.00\n"
        );
    }

    #[test]
    fn test_render_omits_cc_when_absent() {
        let text = message(None).render();
        assert!(!text.contains("Cc:"));
        assert!(text.starts_with("From: house@example.com\nTo: alice@example.com\nSubject:"));
    }
}
