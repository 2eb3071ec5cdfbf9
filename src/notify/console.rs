use super::{Message, Notifier};
use crate::cli::ui;
use anyhow::Result;
use async_trait::async_trait;

/// Prints the summary instead of mailing it.
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn send(&self, message: &Message) -> Result<()> {
        println!(
            "\n{}\n\n{}",
            ui::style_text(&message.subject, ui::StyleType::Title),
            message.body
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
