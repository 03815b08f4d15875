pub mod trello;

use async_trait::async_trait;

use crate::error::TrelloError;
use crate::model::attachment::Attachment;
use crate::model::card_ref::CardRef;

/// The three board operations the linker needs. Every call reports failure
/// through the same error type; the linker decides which failures are fatal.
#[async_trait]
pub trait Board: Send + Sync {
    /// Card id of the card with short reference `card_ref` on `board_id`.
    async fn get_card_on_board(
        &self,
        board_id: &str,
        card_ref: &CardRef,
    ) -> Result<String, TrelloError>;
    async fn list_attachments(&self, card_id: &str) -> Result<Vec<Attachment>, TrelloError>;
    /// Returns whether the service answered with exactly 200 OK.
    async fn create_attachment(
        &self,
        card_id: &str,
        url: &str,
        name: &str,
    ) -> Result<bool, TrelloError>;
}
