// src/domain/form.rs
use std::fmt;

use crate::domain::NoteFields;

/// The editable fields of a note form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FullName,
    Email,
    PhoneNumber,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::FullName, Field::Email, Field::PhoneNumber];

    pub fn label(self) -> &'static str {
        match self {
            Field::FullName => "Full Name",
            Field::Email => "Email",
            Field::PhoneNumber => "Phone Number",
        }
    }

    pub fn required_message(self) -> &'static str {
        match self {
            Field::FullName => "Full Name is required",
            Field::Email => "Email is required",
            Field::PhoneNumber => "Phone Number is required",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-field error messages; an empty string means the field is fine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
}

impl FormErrors {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::PhoneNumber => &self.phone_number,
        }
    }

    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        let slot = match field {
            Field::FullName => &mut self.full_name,
            Field::Email => &mut self.email,
            Field::PhoneNumber => &mut self.phone_number,
        };
        *slot = message.into();
    }

    pub fn clear(&mut self, field: Field) {
        self.set(field, String::new());
    }

    pub fn is_valid(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_empty())
    }

    /// Fields carrying a message, in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
            .filter(|(_, message)| !message.is_empty())
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.iter().map(|(_, message)| message).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Checks every field independently; a field fails when its trimmed value is empty.
pub fn validate(fields: &NoteFields) -> FormErrors {
    let mut errors = FormErrors::default();
    for field in Field::ALL {
        if fields.get(field).trim().is_empty() {
            errors.set(field, field.required_message());
        }
    }
    errors
}
