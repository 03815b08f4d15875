use anyhow::{Context, Result};
use std::fmt;
use tracing::{info, warn};

use crate::error::TrelloError;
use crate::model::attachment::{has_matching_attachment, Attachment};
use crate::model::card_ref::{extract_card_reference, CardRef};
use crate::model::trigger::TriggerContext;
use crate::providers::Board;

/// How a run ended. Every variant is a successful exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    NoCardReference,
    CardNotFound,
    AlreadyAttached { card_id: String },
    Attached { card_id: String, created: bool },
    AttachFailed { card_id: String },
}

impl fmt::Display for LinkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCardReference => write!(f, "no card reference in ref"),
            Self::CardNotFound => write!(f, "card not found on board"),
            Self::AlreadyAttached { card_id } => {
                write!(f, "card {card_id} already links this branch")
            }
            Self::Attached {
                card_id,
                created: true,
            } => write!(f, "linked branch to card {card_id}"),
            Self::Attached {
                card_id,
                created: false,
            } => {
                write!(f, "attachment request for card {card_id} accepted without 200 OK")
            }
            Self::AttachFailed { card_id } => {
                write!(f, "could not attach branch to card {card_id}")
            }
        }
    }
}

pub struct Linker<'a> {
    board: &'a dyn Board,
    board_id: &'a str,
}

fn log_failure(err: &TrelloError) {
    warn!(
        url = err.url(),
        status = err.status().map(|s| s.as_u16()),
        error = %err,
        "Trello request failed"
    );
}

impl<'a> Linker<'a> {
    pub fn new(board: &'a dyn Board, board_id: &'a str) -> Self {
        Self { board, board_id }
    }

    /// Card id for `card_ref`, or `None` when the lookup fails for any reason.
    pub async fn resolve_card(&self, card_ref: &CardRef) -> Option<String> {
        match self.board.get_card_on_board(self.board_id, card_ref).await {
            Ok(id) => Some(id),
            Err(err) => {
                log_failure(&err);
                None
            }
        }
    }

    /// Unlike the other two calls, a failure here is returned to the caller.
    pub async fn list_attachments(&self, card_id: &str) -> Result<Vec<Attachment>> {
        self.board
            .list_attachments(card_id)
            .await
            .with_context(|| format!("Failed to list attachments of card {card_id}"))
    }

    pub async fn create_attachment(&self, card_id: &str, url: &str, name: &str) -> Option<bool> {
        match self.board.create_attachment(card_id, url, name).await {
            Ok(created) => Some(created),
            Err(err) => {
                log_failure(&err);
                None
            }
        }
    }

    pub async fn run(&self, ctx: &TriggerContext) -> Result<LinkOutcome> {
        let Some(card_ref) = extract_card_reference(ctx.git_ref.as_deref()) else {
            info!(git_ref = ?ctx.git_ref, "No card reference in ref, nothing to do");
            return Ok(LinkOutcome::NoCardReference);
        };

        let Some(card_id) = self.resolve_card(&card_ref).await else {
            info!(card_ref = %card_ref, board_id = self.board_id, "Card not found on board");
            return Ok(LinkOutcome::CardNotFound);
        };

        info!(
            context = %serde_json::to_string(ctx).unwrap_or_default(),
            "Trigger context"
        );

        let branch_name = ctx.branch_name();
        let branch_url = ctx.branch_url(&branch_name);

        let attachments = self.list_attachments(&card_id).await?;
        info!(
            attachments = %serde_json::to_string(&attachments).unwrap_or_default(),
            "Existing attachments"
        );

        if has_matching_attachment(&attachments, &branch_name, &branch_url) {
            info!(%card_id, %branch_url, "Branch already attached");
            return Ok(LinkOutcome::AlreadyAttached { card_id });
        }

        let outcome = match self.create_attachment(&card_id, &branch_url, &branch_name).await {
            Some(created) => {
                info!(%card_id, %branch_url, created, "Attachment request sent");
                LinkOutcome::Attached { card_id, created }
            }
            None => LinkOutcome::AttachFailed { card_id },
        };
        Ok(outcome)
    }
}
