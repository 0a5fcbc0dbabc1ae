use crate::models::{ChatMessage, ChatRequest, Model};

pub const CONSTRAINT_ACK: &str = "Okay!";

/// What a client does with a finished exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryMode {
    /// Every call sees only the constraints plus its own user turn.
    #[default]
    Reset,
    /// Successful exchanges are appended and sent with later calls.
    Retain,
}

/// Model plus the ordered turns sent with every request.
///
/// Constraint pairs always sit at the front of `messages`; `seeded` counts
/// how many messages belong to them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversation {
    model: Model,
    messages: Vec<ChatMessage>,
    seeded: usize,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Switches the model. An empty name leaves the current one in place.
    pub fn set_model(&mut self, model: impl Into<Model>) {
        let model = model.into();
        if model.is_empty() {
            return;
        }
        self.model = model;
    }

    /// Seeds one (user, "Okay!") pair per constraint, in order.
    ///
    /// Constraints go after any earlier constraints but before every real
    /// exchange.
    pub fn add_constraints<I, S>(&mut self, constraints: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut pairs = Vec::new();
        for constraint in constraints {
            pairs.push(ChatMessage::user(constraint));
            pairs.push(ChatMessage::assistant(CONSTRAINT_ACK));
        }
        let at = self.seeded;
        self.seeded += pairs.len();
        self.messages.splice(at..at, pairs);
    }

    /// Builds the request body for one more user turn without touching `self`.
    pub fn request_with(&self, message: impl Into<String>) -> ChatRequest {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        messages.extend_from_slice(&self.messages);
        messages.push(ChatMessage::user(message));
        ChatRequest {
            model: self.model.clone(),
            messages,
        }
    }

    pub fn record_exchange(&mut self, message: impl Into<String>, reply: impl Into<String>) {
        self.messages.push(ChatMessage::user(message));
        self.messages.push(ChatMessage::assistant(reply));
    }

    /// Drops every turn except the constraint pairs.
    pub fn reset(&mut self) {
        self.messages.truncate(self.seeded);
    }

    pub fn constraint_count(&self) -> usize {
        self.seeded / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, GPT35_TURBO, GPT35_TURBO_0301};

    #[test]
    fn empty_model_keeps_default() {
        let mut conversation = Conversation::new();
        conversation.set_model("");
        assert_eq!(conversation.model().as_str(), GPT35_TURBO);

        conversation.set_model(GPT35_TURBO_0301);
        assert_eq!(conversation.model().as_str(), GPT35_TURBO_0301);
    }

    #[test]
    fn constraints_seed_acknowledged_pairs_in_order() {
        let mut conversation = Conversation::new();
        conversation.add_constraints(["only travel", "answer briefly"]);

        let messages = conversation.messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(conversation.constraint_count(), 2);
        assert_eq!(messages[0], ChatMessage::user("only travel"));
        assert_eq!(messages[1], ChatMessage::assistant(CONSTRAINT_ACK));
        assert_eq!(messages[2], ChatMessage::user("answer briefly"));
        assert_eq!(messages[3].role, Role::Assistant);
    }

    #[test]
    fn request_appends_user_turn_without_mutating() {
        let mut conversation = Conversation::new();
        conversation.add_constraints(["only travel"]);

        let request = conversation.request_with("Where to in Turkey?");
        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[2], ChatMessage::user("Where to in Turkey?"));
        assert_eq!(conversation.messages().len(), 2);
    }

    #[test]
    fn late_constraints_stay_ahead_of_exchanges() {
        let mut conversation = Conversation::new();
        conversation.add_constraints(["first"]);
        conversation.record_exchange("hi", "hello");
        conversation.add_constraints(["second"]);

        let contents: Vec<_> = conversation
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, ["first", "Okay!", "second", "Okay!", "hi", "hello"]);
    }

    #[test]
    fn reset_keeps_only_constraints() {
        let mut conversation = Conversation::new();
        conversation.add_constraints(["only travel"]);
        conversation.record_exchange("hi", "hello");
        assert_eq!(conversation.messages().len(), 4);

        conversation.reset();
        assert_eq!(conversation.messages().len(), 2);
        assert_eq!(conversation.constraint_count(), 1);
    }
}
