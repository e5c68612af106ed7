//! Statement-to-email composition.
//!
//! Turns a [`BillingStatement`] into a [`MailMessage`] for one person:
//! subject, itemized body with separator and total line, optional payment
//! links, and the fixed-order recipient set.

pub mod links;

pub use links::PaymentProvider;

use rentsplit_shared::config::{PaymentLinks, Person, SenderSettings};
use rentsplit_shared::MailMessage;

use crate::billing::BillingStatement;

/// Width of the separator line between components and the total.
const SEPARATOR_WIDTH: usize = 14;

/// Composes the statement email for one person.
///
/// The caller supplies the person's own settings; payment links are included
/// only for providers the person opted into (the config loader guarantees an
/// opted-in provider has a handle).
#[must_use]
pub fn compose(
    statement: &BillingStatement,
    person: &Person,
    sender: &SenderSettings,
    links: &PaymentLinks,
) -> MailMessage {
    let subject = format!(
        "{} rent is ${:.2}",
        statement.due_month_name(),
        statement.total
    );

    let mut body = String::new();
    for component in &statement.components {
        body.push_str(&component.to_string());
        body.push('\n');
    }
    body.push_str(&"=".repeat(SEPARATOR_WIDTH));
    body.push_str(&format!("\nTotal: {:.2}", statement.total));

    let pay_lines = payment_lines(statement, person, links);
    if !pay_lines.is_empty() {
        body.push_str("\n\n");
        body.push_str(&pay_lines.join("\n"));
    }

    MailMessage {
        from: sender.from.clone(),
        to: person.email.clone(),
        cc: person.cc.clone(),
        bcc: sender.bcc.clone(),
        subject,
        body,
    }
}

/// One payment URL per provider the person opted into.
fn payment_lines(
    statement: &BillingStatement,
    person: &Person,
    links: &PaymentLinks,
) -> Vec<String> {
    let mut lines = Vec::new();
    if person.paypal {
        if let Some(handle) = links.paypal.as_deref() {
            lines.push(PaymentProvider::Paypal.link(handle, statement.total));
        }
    }
    if person.square {
        if let Some(handle) = links.square.as_deref() {
            lines.push(PaymentProvider::Square.link(handle, statement.total));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::billing::RentComponent;

    fn statement() -> BillingStatement {
        BillingStatement {
            person: "Alice".to_string(),
            due_date: NaiveDate::from_ymd_opt(2023, 8, 1).unwrap(),
            components: vec![
                RentComponent::new("Rent", dec!(1000), 1).unwrap(),
                RentComponent::new("Electric", dec!(90), 3).unwrap(),
                RentComponent::new("Water", dec!(30), 3).unwrap(),
            ],
            total: dec!(1040.00),
        }
    }

    fn alice(paypal: bool) -> Person {
        Person {
            email: "alice@example.com".to_string(),
            cc: Some("partner@example.com".to_string()),
            paypal,
            square: false,
        }
    }

    fn sender() -> SenderSettings {
        SenderSettings {
            from: "house@example.com".to_string(),
            bcc: "archive@example.com".to_string(),
        }
    }

    #[test]
    fn test_composed_message_renders_in_full() {
        let message = compose(&statement(), &alice(false), &sender(), &PaymentLinks::default());
        assert_eq!(
            message.render(),
            "From: house@example.com\n\
             To: alice@example.com\n\
             Cc: partner@example.com\n\
             Subject: August rent is $1040.00\n\
             \n\
             Rent: 1000.00\n\
             Electric: 30.00 = 90.00 / 3\n\
             Water: 10.00 = 30.00 / 3\n\
             ==============\n\
             Total: 1040.00\n"
        );
    }

    #[test]
    fn test_recipients_include_cc_and_bcc_in_order() {
        let message = compose(&statement(), &alice(false), &sender(), &PaymentLinks::default());
        assert_eq!(
            message.recipients(),
            vec![
                "alice@example.com",
                "partner@example.com",
                "archive@example.com"
            ]
        );
    }

    #[test]
    fn test_payment_links_appended_when_opted_in() {
        let links = PaymentLinks {
            paypal: Some("alice-house".to_string()),
            square: None,
        };
        let message = compose(&statement(), &alice(true), &sender(), &links);
        assert!(message.body.ends_with(
            "Total: 1040.00\n\nhttps://www.paypal.me/alice-house/1040.00"
        ));
    }

    #[test]
    fn test_no_payment_links_without_opt_in() {
        let links = PaymentLinks {
            paypal: Some("alice-house".to_string()),
            square: Some("alicehouse".to_string()),
        };
        let message = compose(&statement(), &alice(false), &sender(), &links);
        assert!(message.body.ends_with("Total: 1040.00"));
    }

    #[test]
    fn test_subject_uses_due_month_name() {
        let message = compose(&statement(), &alice(false), &sender(), &PaymentLinks::default());
        assert_eq!(message.subject, "August rent is $1040.00");
    }
}
