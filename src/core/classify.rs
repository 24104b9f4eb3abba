//! HS-code classification: collaborator contract and the staged-confirmation
//! workflow that turns a classification result into a catalog entry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::catalog::Catalog;
use crate::core::error::{CoreError, CoreResult};
use crate::core::id::{MessageId, ProductId};
use crate::core::product::{DutyRate, Product, ProductDraft};

/// One conversational turn. Session-scoped only; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatMessage {
    fn now(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A well-formed classification result from the external collaborator.
///
/// Construction validates the contract: `product_name`, `hs_code` and
/// `destination_country` are required, the HS code must be 6-8 digits and
/// the duty rate must parse as a percentage. Anything less is a failure,
/// not a partial success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub product_name: String,
    pub hs_code: String,
    pub duty_rate: DutyRate,
    pub base_price: f64,
    pub destination_country: String,
    pub incentive_info: String,
}

impl Classification {
    pub fn new(
        product_name: String,
        hs_code: String,
        duty_rate_text: &str,
        base_price: f64,
        destination_country: String,
        incentive_info: String,
    ) -> CoreResult<Self> {
        if product_name.trim().is_empty() {
            return Err(CoreError::validation(
                "classification is missing product_name",
            ));
        }
        if destination_country.trim().is_empty() {
            return Err(CoreError::validation(
                "classification is missing destination_country",
            ));
        }
        if !(6..=8).contains(&hs_code.len()) || !hs_code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::validation(format!(
                "classification has malformed hs_code: {hs_code:?}"
            )));
        }
        if base_price < 0.0 || !base_price.is_finite() {
            return Err(CoreError::validation(format!(
                "classification has invalid base_price: {base_price}"
            )));
        }
        let duty_rate: DutyRate = duty_rate_text.parse()?;

        Ok(Self {
            product_name,
            hs_code,
            duty_rate,
            base_price,
            destination_country,
            incentive_info,
        })
    }
}

impl From<Classification> for ProductDraft {
    fn from(c: Classification) -> Self {
        ProductDraft {
            name: c.product_name,
            hs_code: c.hs_code,
            duty_rate: c.duty_rate,
            base_price: c.base_price,
            destination_country: c.destination_country,
            incentive_info: c.incentive_info,
        }
    }
}

/// External classification collaborator: free-text query in, structured
/// result or failure out.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, query: &str) -> CoreResult<Classification>;
}

/// Ticket for one issued query. A response is applied only if its ticket
/// matches the latest issued one (last-response-wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTicket(u64);

/// Workflow state: either nothing staged, or exactly one candidate waiting
/// for confirmation. The tagged union makes a second simultaneous candidate
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StagingState {
    #[default]
    Idle,
    PendingConfirmation(Classification),
}

/// The staged-confirmation workflow around the classification collaborator.
///
/// Holds the conversation log and at most one pending candidate. A new query
/// supersedes any unconfirmed candidate; a response for anything but the
/// newest query is dropped.
#[derive(Debug, Default)]
pub struct ClassificationSession {
    state: StagingState,
    messages: Vec<ChatMessage>,
    generation: u64,
}

impl ClassificationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &StagingState {
        &self.state
    }

    pub fn pending(&self) -> Option<&Classification> {
        match &self.state {
            StagingState::PendingConfirmation(c) => Some(c),
            StagingState::Idle => None,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    /// Record a new user query. Any unconfirmed candidate is discarded
    /// (last-candidate-wins) and interest in earlier in-flight responses is
    /// cancelled by bumping the generation.
    pub fn begin_query(&mut self, query: &str) -> CoreResult<QueryTicket> {
        if query.trim().is_empty() {
            return Err(CoreError::validation("query must not be empty"));
        }
        if matches!(self.state, StagingState::PendingConfirmation(_)) {
            debug!("New query supersedes unconfirmed candidate");
        }
        self.state = StagingState::Idle;
        self.generation += 1;
        self.messages
            .push(ChatMessage::now(ChatRole::User, query.trim()));
        Ok(QueryTicket(self.generation))
    }

    /// Stage a successful classification. Returns false (and changes
    /// nothing) if a newer query has been issued since `ticket`.
    pub fn apply_success(&mut self, ticket: QueryTicket, result: Classification) -> bool {
        if ticket.0 != self.generation {
            debug!(
                ticket = ticket.0,
                current = self.generation,
                "Dropping stale classification response"
            );
            return false;
        }
        self.messages
            .push(ChatMessage::now(ChatRole::Assistant, summarize(&result)));
        self.state = StagingState::PendingConfirmation(result);
        true
    }

    /// Record a failed classification call. The workflow stays (or returns
    /// to) Idle; stale failures are dropped like stale successes.
    pub fn apply_failure(&mut self, ticket: QueryTicket) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.state = StagingState::Idle;
        self.messages.push(ChatMessage::now(
            ChatRole::Assistant,
            "I ran into an error processing that request. Please try again with \
             more specific product and destination country details.",
        ));
        true
    }

    /// Run one query end to end against a classifier: record it, await the
    /// result, and stage it. Collaborator and validation failures are logged
    /// into the conversation and surfaced to the caller. On success the
    /// staged candidate is available through [`ClassificationSession::pending`].
    pub async fn submit(&mut self, classifier: &dyn Classifier, query: &str) -> CoreResult<()> {
        let ticket = self.begin_query(query)?;
        match classifier.classify(query).await {
            Ok(result) => {
                self.apply_success(ticket, result);
                Ok(())
            }
            Err(e) => {
                self.apply_failure(ticket);
                Err(e)
            }
        }
    }

    /// Convert the pending candidate into a product and commit it to the
    /// catalog. The candidate goes through the same constructor and
    /// invariants as direct entry.
    pub fn confirm(&mut self, catalog: &mut Catalog) -> CoreResult<ProductId> {
        let candidate = match std::mem::take(&mut self.state) {
            StagingState::PendingConfirmation(c) => c,
            StagingState::Idle => {
                return Err(CoreError::precondition(
                    "no pending classification to confirm",
                ));
            }
        };

        let name = candidate.product_name.clone();
        let id = ProductId::new();
        let product = Product::new(id, candidate.into(), Utc::now())?;
        catalog.add_product(product);
        self.messages.push(ChatMessage::now(
            ChatRole::Assistant,
            format!("Added \"{name}\" to your product catalog."),
        ));
        Ok(id)
    }

    /// Drop the pending candidate without committing it.
    pub fn discard(&mut self) -> bool {
        match self.state {
            StagingState::PendingConfirmation(_) => {
                self.state = StagingState::Idle;
                true
            }
            StagingState::Idle => false,
        }
    }
}

fn summarize(c: &Classification) -> String {
    format!(
        "I found the following information for your product:\n\n\
         Product: {}\nHS Code: {}\nDestination: {}\nDuty Rate: {}\n\
         Estimated Price: ${}\nExport Incentives: {}\n\n\
         Would you like me to add this product to your catalog?",
        c.product_name,
        c.hs_code,
        c.destination_country,
        c.duty_rate,
        c.base_price,
        c.incentive_info
    )
}
