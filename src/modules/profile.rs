//! User page - controlled profile form
//!
//! Every change goes through [`ProfileForm::apply`]; the page never mutates
//! field values directly. Values live in memory only.

use crossterm::event::{KeyCode, KeyEvent};
use thiserror::Error;

use crate::config::ProfileConfig;
use crate::core::{Action, Context, Module, NotifyLevel, PromptKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Email,
    Phone,
    Age,
    Occupation,
}

impl ProfileField {
    pub const ALL: [ProfileField; 5] = [
        ProfileField::Name,
        ProfileField::Email,
        ProfileField::Phone,
        ProfileField::Age,
        ProfileField::Occupation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::Name => "Name",
            ProfileField::Email => "Email",
            ProfileField::Phone => "Phone",
            ProfileField::Age => "Age",
            ProfileField::Occupation => "Occupation",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEdit {
    Set(ProfileField, String),
    Clear(ProfileField),
    Reset,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("email must contain '@'")]
    InvalidEmail,
    #[error("age must be a whole number, got '{0}'")]
    InvalidAge(String),
    #[error("phone may only contain digits, '+', '-' and spaces")]
    InvalidPhone,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: String,
    pub occupation: String,
}

impl ProfileForm {
    pub fn from_config(config: &ProfileConfig) -> Self {
        Self {
            name: config.name.clone().unwrap_or_default(),
            email: config.email.clone().unwrap_or_default(),
            phone: config.phone.clone().unwrap_or_default(),
            age: config.age.map(|age| age.to_string()).unwrap_or_default(),
            occupation: config.occupation.clone().unwrap_or_default(),
        }
    }

    pub fn value(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Email => &self.email,
            ProfileField::Phone => &self.phone,
            ProfileField::Age => &self.age,
            ProfileField::Occupation => &self.occupation,
        }
    }

    fn slot(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::Name => &mut self.name,
            ProfileField::Email => &mut self.email,
            ProfileField::Phone => &mut self.phone,
            ProfileField::Age => &mut self.age,
            ProfileField::Occupation => &mut self.occupation,
        }
    }

    pub fn apply(&mut self, edit: ProfileEdit) {
        match edit {
            ProfileEdit::Set(field, value) => *self.slot(field) = value.trim().to_string(),
            ProfileEdit::Clear(field) => self.slot(field).clear(),
            ProfileEdit::Reset => *self = Self::default(),
        }
    }

    /// Empty fields are always valid.
    pub fn field_error(&self, field: ProfileField) -> Option<ProfileError> {
        let value = self.value(field);
        if value.is_empty() {
            return None;
        }
        match field {
            ProfileField::Email if !value.contains('@') => Some(ProfileError::InvalidEmail),
            ProfileField::Age if value.parse::<u32>().is_err() => {
                Some(ProfileError::InvalidAge(value.to_string()))
            }
            ProfileField::Phone
                if !value
                    .chars()
                    .all(|ch| ch.is_ascii_digit() || matches!(ch, '+' | '-' | ' ')) =>
            {
                Some(ProfileError::InvalidPhone)
            }
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        match ProfileField::ALL.iter().find_map(|f| self.field_error(*f)) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn age(&self) -> Option<u32> {
        self.age.parse().ok()
    }
}

pub struct ProfilePage {
    form: ProfileForm,
    selected: usize,
    submitted: bool,
}

impl ProfilePage {
    pub fn new(form: ProfileForm) -> Self {
        Self {
            form,
            selected: 0,
            submitted: false,
        }
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn selected_field(&self) -> ProfileField {
        ProfileField::from_index(self.selected).unwrap_or(ProfileField::Name)
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn apply(&mut self, edit: ProfileEdit) {
        self.form.apply(edit);
        self.submitted = false;
    }

    /// Validate and publish the age to the rest of the app.
    pub fn submit(&mut self, ctx: &mut Context) -> Action {
        match self.form.validate() {
            Ok(()) => {
                self.submitted = true;
                ctx.age = self.form.age();
                tracing::info!(age = ?ctx.age, "profile submitted");
                Action::Notify("Profile saved".to_string(), NotifyLevel::Info)
            }
            Err(err) => Action::Notify(format!("Profile not saved: {err}"), NotifyLevel::Error),
        }
    }
}

impl Default for ProfilePage {
    fn default() -> Self {
        Self::new(ProfileForm::default())
    }
}

impl Module for ProfilePage {
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context) -> Action {
        let last = ProfileField::ALL.len() - 1;
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.selected = (self.selected + 1).min(last),
            KeyCode::Char('k') | KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Enter | KeyCode::Char('i') => {
                let field = self.selected_field();
                return Action::OpenPrompt(
                    PromptKind::ProfileField(field.index()),
                    self.form.value(field).to_string(),
                );
            }
            KeyCode::Char('d') => self.apply(ProfileEdit::Clear(self.selected_field())),
            KeyCode::Char('R') => {
                self.apply(ProfileEdit::Reset);
                return Action::Notify("Profile cleared".to_string(), NotifyLevel::Info);
            }
            KeyCode::Char('s') => return self.submit(ctx),
            _ => {}
        }
        Action::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(page: &mut ProfilePage, ctx: &mut Context, code: KeyCode) -> Action {
        page.handle_key(KeyEvent::new(code, KeyModifiers::NONE), ctx)
    }

    #[test]
    fn apply_sets_and_clears_fields() {
        let mut form = ProfileForm::default();
        form.apply(ProfileEdit::Set(ProfileField::Name, "  Asha Rao ".to_string()));
        assert_eq!(form.name, "Asha Rao");
        form.apply(ProfileEdit::Clear(ProfileField::Name));
        assert!(form.name.is_empty());
    }

    #[test]
    fn validation_rules() {
        let mut form = ProfileForm::default();
        assert_eq!(form.validate(), Ok(()));

        form.apply(ProfileEdit::Set(ProfileField::Email, "asha.example.com".to_string()));
        assert_eq!(form.validate(), Err(ProfileError::InvalidEmail));
        form.apply(ProfileEdit::Set(ProfileField::Email, "asha@example.com".to_string()));

        form.apply(ProfileEdit::Set(ProfileField::Phone, "+91 98-7654".to_string()));
        assert_eq!(form.field_error(ProfileField::Phone), None);
        form.apply(ProfileEdit::Set(ProfileField::Phone, "98x".to_string()));
        assert_eq!(form.field_error(ProfileField::Phone), Some(ProfileError::InvalidPhone));
        form.apply(ProfileEdit::Clear(ProfileField::Phone));

        form.apply(ProfileEdit::Set(ProfileField::Age, "-4".to_string()));
        assert_eq!(form.validate(), Err(ProfileError::InvalidAge("-4".to_string())));
        form.apply(ProfileEdit::Set(ProfileField::Age, "42".to_string()));
        assert_eq!(form.validate(), Ok(()));
        assert_eq!(form.age(), Some(42));
    }

    #[test]
    fn submit_publishes_age() {
        let mut page = ProfilePage::default();
        let mut ctx = Context::new();
        page.apply(ProfileEdit::Set(ProfileField::Age, "45".to_string()));
        let action = press(&mut page, &mut ctx, KeyCode::Char('s'));
        assert_eq!(action, Action::Notify("Profile saved".to_string(), NotifyLevel::Info));
        assert!(page.is_submitted());
        assert_eq!(ctx.age, Some(45));
    }

    #[test]
    fn invalid_submit_keeps_context() {
        let mut page = ProfilePage::default();
        let mut ctx = Context::new();
        page.apply(ProfileEdit::Set(ProfileField::Age, "old".to_string()));
        let action = press(&mut page, &mut ctx, KeyCode::Char('s'));
        assert!(matches!(action, Action::Notify(_, NotifyLevel::Error)));
        assert_eq!(ctx.age, None);
        assert!(!page.is_submitted());
    }

    #[test]
    fn enter_opens_prompt_for_selected_field() {
        let mut page = ProfilePage::new(ProfileForm {
            email: "asha@example.com".to_string(),
            ..ProfileForm::default()
        });
        let mut ctx = Context::new();
        press(&mut page, &mut ctx, KeyCode::Down);
        assert_eq!(
            press(&mut page, &mut ctx, KeyCode::Enter),
            Action::OpenPrompt(PromptKind::ProfileField(1), "asha@example.com".to_string())
        );
    }
}
