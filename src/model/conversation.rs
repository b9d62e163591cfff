use crate::model::message::{Message, Role};

/// Append-only history of a single refinement session.
/// Seeded with the initial prompt, so it is never empty.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(initial_prompt: String) -> Self {
        Self {
            messages: vec![Message::user(initial_prompt)],
        }
    }

    pub fn append_assistant(&mut self, content: String) {
        self.messages.push(Message::assistant(content));
    }

    pub fn append_user(&mut self, content: String) {
        self.messages.push(Message::user(content));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> &Message {
        // non-empty since construction
        &self.messages[self.messages.len() - 1]
    }

    /// The pending assistant reply, if the model has the last word.
    pub fn pending_reply(&self) -> Option<&str> {
        let last = self.last();
        (last.role == Role::Assistant).then_some(last.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_keep_turn_order() {
        let mut conversation = Conversation::new("prompt".into());
        conversation.append_assistant("first".into());
        conversation.append_user("again".into());

        let roles: Vec<Role> = conversation.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(conversation.messages()[0].content, "prompt");
        assert_eq!(conversation.messages().len(), 3);
    }

    #[test]
    fn pending_reply_only_when_assistant_spoke_last() {
        let mut conversation = Conversation::new("prompt".into());
        assert_eq!(conversation.pending_reply(), None);

        conversation.append_assistant("answer".into());
        assert_eq!(conversation.pending_reply(), Some("answer"));

        conversation.append_user("followup".into());
        assert_eq!(conversation.pending_reply(), None);
    }
}
