//! Contact form state machine
//!
//! Editing → (validate) → Submitting → Submitted(success | failure).
//! A blank message never leaves the form; everything else is handed to the
//! driver as an [`Effect::Submit`] and comes back as a result event.

use crate::api::ContactRequest;
use crate::constants::{contact as limits, messages};
use crate::types::{Effect, Key, SubmitOutcome};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Field {
    Message,
    Name,
    Email,
    Discord,
    Phone,
}

impl Field {
    pub const ALL: [Field; 5] = [Field::Message, Field::Name, Field::Email, Field::Discord, Field::Phone];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Message => "Message *",
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Discord => "Discord",
            Field::Phone => "Phone",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Field::Message => "Enter your message here...",
            Field::Name => "Your name (optional)",
            Field::Email => "your.email@example.com (optional)",
            Field::Discord => "@yourusername (optional)",
            Field::Phone => "+1234567890 (optional)",
        }
    }

    pub fn limit(&self) -> usize {
        match self {
            Field::Message => limits::MESSAGE_LIMIT,
            Field::Name => limits::NAME_LIMIT,
            Field::Email => limits::EMAIL_LIMIT,
            Field::Discord => limits::DISCORD_LIMIT,
            Field::Phone => limits::PHONE_LIMIT,
        }
    }
}

/// Focus ring: the five fields followed by the two buttons.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Focus {
    Field(Field),
    Submit,
    Back,
}

impl Focus {
    const RING: [Focus; 7] = [
        Focus::Field(Field::Message),
        Focus::Field(Field::Name),
        Focus::Field(Field::Email),
        Focus::Field(Field::Discord),
        Focus::Field(Field::Phone),
        Focus::Submit,
        Focus::Back,
    ];

    fn index(self) -> usize {
        Self::RING.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::RING[(self.index() + 1) % Self::RING.len()]
    }

    fn prev(self) -> Self {
        let n = Self::RING.len();
        Self::RING[(self.index() + n - 1) % n]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormStatus {
    Editing,
    Submitting { id: u64 },
    Submitted(SubmitOutcome),
}

/// What the router should do after the form handled a key.
#[derive(Clone, Debug, PartialEq)]
pub enum FormAction {
    None,
    Back,
    Effect(Effect),
}

#[derive(Clone, Debug)]
pub struct ContactForm {
    values: [String; 5],
    focus: Focus,
    status: FormStatus,
    next_id: u64,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            values: Default::default(),
            focus: Focus::Field(Field::Message),
            status: FormStatus::Editing,
            next_id: 1,
        }
    }

    /// Fresh form that keeps issuing increasing submission ids, so a result
    /// for an older form can never match the new one.
    pub fn reset(&mut self) {
        let next_id = self.next_id;
        *self = Self::new();
        self.next_id = next_id;
    }

    // ----- getters -----
    pub fn value(&self, field: Field) -> &str {
        &self.values[field as usize]
    }
    pub fn focus(&self) -> Focus {
        self.focus
    }
    pub fn status(&self) -> &FormStatus {
        &self.status
    }
    pub fn is_submitting(&self) -> bool {
        matches!(self.status, FormStatus::Submitting { .. })
    }

    pub fn handle_key(&mut self, key: Key) -> FormAction {
        if self.is_submitting() {
            return FormAction::None;
        }

        match key {
            Key::Esc | Key::Interrupt => FormAction::Back,
            Key::Tab | Key::Down => {
                self.focus = self.focus.next();
                FormAction::None
            }
            Key::BackTab | Key::Up => {
                self.focus = self.focus.prev();
                FormAction::None
            }
            Key::Enter => match self.focus {
                Focus::Submit => self.submit(),
                Focus::Back => FormAction::Back,
                Focus::Field(_) => {
                    self.focus = self.focus.next();
                    FormAction::None
                }
            },
            Key::Backspace => {
                if let Focus::Field(f) = self.focus {
                    self.values[f as usize].pop();
                }
                FormAction::None
            }
            Key::Char(c) => {
                if let Focus::Field(f) = self.focus {
                    let value = &mut self.values[f as usize];
                    if value.chars().count() < f.limit() && !c.is_control() {
                        value.push(c);
                    }
                }
                FormAction::None
            }
            Key::Left | Key::Right => FormAction::None,
        }
    }

    fn submit(&mut self) -> FormAction {
        if self.value(Field::Message).trim().is_empty() {
            self.status = FormStatus::Submitted(SubmitOutcome::failed(messages::MESSAGE_REQUIRED));
            return FormAction::None;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.status = FormStatus::Submitting { id };
        log::debug!("contact form submitting (id={id})");
        FormAction::Effect(Effect::Submit { id, request: self.request() })
    }

    /// Request built from the trimmed field values.
    pub fn request(&self) -> ContactRequest {
        let get = |f: Field| self.value(f).trim().to_string();
        ContactRequest::new(get(Field::Message))
            .name(get(Field::Name))
            .email(get(Field::Email))
            .discord(get(Field::Discord))
            .phone(get(Field::Phone))
    }

    /// Apply a submission result. Returns false for a result that does not
    /// belong to the submission in flight.
    pub fn complete(&mut self, id: u64, outcome: SubmitOutcome) -> bool {
        match self.status {
            FormStatus::Submitting { id: current } if current == id => {
                self.status = FormStatus::Submitted(outcome);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: &mut ContactForm, s: &str) {
        for c in s.chars() {
            form.handle_key(Key::Char(c));
        }
    }

    fn focus_submit(form: &mut ContactForm) {
        for _ in 0..5 {
            form.handle_key(Key::Tab);
        }
        assert_eq!(form.focus(), Focus::Submit);
    }

    #[test]
    fn test_blank_message_is_rejected_locally() {
        let mut form = ContactForm::new();
        type_str(&mut form, "   ");
        focus_submit(&mut form);
        assert_eq!(form.handle_key(Key::Enter), FormAction::None);
        assert_eq!(
            form.status(),
            &FormStatus::Submitted(SubmitOutcome::failed(messages::MESSAGE_REQUIRED))
        );
    }

    #[test]
    fn test_submit_emits_trimmed_request() {
        let mut form = ContactForm::new();
        type_str(&mut form, "  hi there ");
        form.handle_key(Key::Tab);
        type_str(&mut form, "Ada");
        while form.focus() != Focus::Submit {
            form.handle_key(Key::Tab);
        }

        let action = form.handle_key(Key::Enter);
        let FormAction::Effect(Effect::Submit { id, request }) = action else {
            panic!("expected submit effect, got {action:?}");
        };
        assert_eq!(id, 1);
        assert_eq!(request.message, "hi there");
        assert_eq!(request.name.as_deref(), Some("Ada"));
        assert_eq!(request.email, None);
        assert!(form.is_submitting());
    }

    #[test]
    fn test_submitting_ignores_edits_and_escape() {
        let mut form = ContactForm::new();
        type_str(&mut form, "hi");
        focus_submit(&mut form);
        form.handle_key(Key::Enter);
        assert!(form.is_submitting());

        assert_eq!(form.handle_key(Key::Esc), FormAction::None);
        assert_eq!(form.handle_key(Key::Tab), FormAction::None);
        assert_eq!(form.focus(), Focus::Submit);
        assert_eq!(form.value(Field::Message), "hi");
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let mut form = ContactForm::new();
        type_str(&mut form, "hi");
        focus_submit(&mut form);
        form.handle_key(Key::Enter);

        assert!(!form.complete(99, SubmitOutcome::ok("nope")));
        assert!(form.is_submitting());
        assert!(form.complete(1, SubmitOutcome::ok("thanks")));
        assert_eq!(form.status(), &FormStatus::Submitted(SubmitOutcome::ok("thanks")));
    }

    #[test]
    fn test_reset_keeps_ids_increasing() {
        let mut form = ContactForm::new();
        type_str(&mut form, "one");
        focus_submit(&mut form);
        form.handle_key(Key::Enter);
        form.reset();
        assert_eq!(form.status(), &FormStatus::Editing);
        assert!(!form.complete(1, SubmitOutcome::ok("late")));

        type_str(&mut form, "two");
        focus_submit(&mut form);
        match form.handle_key(Key::Enter) {
            FormAction::Effect(Effect::Submit { id, .. }) => assert_eq!(id, 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_focus_ring_wraps() {
        let mut form = ContactForm::new();
        form.handle_key(Key::Up);
        assert_eq!(form.focus(), Focus::Back);
        form.handle_key(Key::Down);
        assert_eq!(form.focus(), Focus::Field(Field::Message));
        form.handle_key(Key::Enter);
        assert_eq!(form.focus(), Focus::Field(Field::Name));
    }

    #[test]
    fn test_field_limits_and_backspace() {
        let mut form = ContactForm::new();
        for _ in 0..4 {
            form.handle_key(Key::Tab);
        }
        assert_eq!(form.focus(), Focus::Field(Field::Phone));
        type_str(&mut form, &"1".repeat(80));
        assert_eq!(form.value(Field::Phone).len(), limits::PHONE_LIMIT);
        form.handle_key(Key::Backspace);
        assert_eq!(form.value(Field::Phone).len(), limits::PHONE_LIMIT - 1);
    }

    #[test]
    fn test_back_button() {
        let mut form = ContactForm::new();
        form.handle_key(Key::BackTab);
        assert_eq!(form.handle_key(Key::Enter), FormAction::Back);
    }
}
