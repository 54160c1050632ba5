//! Login page

use std::collections::BTreeMap;

use super::PageError;
use crate::models::{LoginCredentials, User};
use crate::session::AuthContext;
use crate::shell::render::{FieldKind, FieldView, FormView};

pub const REQUIRED_FIELD: &str = "This field is required";
pub const LOGIN_SUCCESS: &str = "Inicio de sesión exitoso";
pub const LOGIN_FAILED: &str = "Error al iniciar sesión";

pub struct LoginPage {
    auth: AuthContext,
    form: LoginCredentials,
    errors: BTreeMap<&'static str, &'static str>,
    submitting: bool,
}

impl LoginPage {
    pub fn new(auth: AuthContext) -> Self {
        Self {
            auth,
            form: LoginCredentials::default(),
            errors: BTreeMap::new(),
            submitting: false,
        }
    }

    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), PageError> {
        match name {
            "email" => {
                self.form.email = value.to_string();
                self.errors.remove("email");
            }
            "password" => {
                self.form.password = value.to_string();
                self.errors.remove("password");
            }
            other => return Err(PageError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    /// Per-field validation messages
    pub fn errors(&self) -> &BTreeMap<&'static str, &'static str> {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    fn validate(&mut self) -> bool {
        self.errors.clear();
        if self.form.email.trim().is_empty() {
            self.errors.insert("email", REQUIRED_FIELD);
        }
        if self.form.password.is_empty() {
            self.errors.insert("password", REQUIRED_FIELD);
        }
        self.errors.is_empty()
    }

    /// Validate locally, then log in
    ///
    /// On failure the message is the backend detail or [`LOGIN_FAILED`].
    pub async fn submit(&mut self) -> Result<User, PageError> {
        if !self.validate() {
            return Err(PageError::Validation(REQUIRED_FIELD.to_string()));
        }

        self.submitting = true;
        let result = self.auth.login(&self.form).await;
        self.submitting = false;

        match result {
            Ok(user) => {
                self.form = LoginCredentials::default();
                Ok(user)
            }
            Err(e) => Err(PageError::Validation(e.user_message(LOGIN_FAILED))),
        }
    }

    pub fn form(&self) -> FormView {
        let mut email = FieldView::text("email", "Email", &self.form.email);
        let mut password = FieldView::text("password", "Password", &self.form.password)
            .with_kind(FieldKind::Password);
        if self.submitting {
            email = email.disabled();
            password = password.disabled();
        }

        let error = if self.errors.is_empty() {
            None
        } else {
            let fields: Vec<&str> = self.errors.keys().copied().collect();
            Some(format!("{}: {}", fields.join(", "), REQUIRED_FIELD))
        };

        FormView {
            title: "Iniciar sesión".to_string(),
            fields: vec![email, password],
            error,
        }
    }
}
