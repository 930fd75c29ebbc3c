use quiz_core::model::{LoginRequest, RegisterRequest};

use crate::routes::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormError {
    UsernameRequired,
    PasswordRequired,
    EmailInvalid,
    PasswordMismatch,
}

impl FormError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::UsernameRequired => "Username is required.",
            Self::PasswordRequired => "Password is required.",
            Self::EmailInvalid => "Enter a valid email address.",
            Self::PasswordMismatch => "Passwords do not match.",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns the first missing field.
    pub fn validate(&self) -> Result<LoginRequest, FormError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(FormError::UsernameRequired);
        }
        if self.password.is_empty() {
            return Err(FormError::PasswordRequired);
        }
        Ok(LoginRequest {
            username: username.to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub as_admin: bool,
}

impl RegisterForm {
    /// # Errors
    ///
    /// Returns the first invalid field, in form order.
    pub fn validate(&self) -> Result<RegisterRequest, FormError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(FormError::UsernameRequired);
        }
        let email = self.email.trim();
        let valid_email = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !valid_email {
            return Err(FormError::EmailInvalid);
        }
        if self.password.is_empty() {
            return Err(FormError::PasswordRequired);
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        Ok(RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

/// Where to go after signing in. Unknown targets and the login page itself fall
/// back to the catalog.
#[must_use]
pub fn login_destination(return_to: &str) -> Route {
    match return_to.parse::<Route>() {
        Ok(Route::Login { .. } | Route::NotFound { .. }) | Err(_) => Route::QuizList {},
        Ok(route) => route,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_both_fields() {
        let mut form = LoginForm::default();
        assert_eq!(form.validate(), Err(FormError::UsernameRequired));
        form.username = "  ana ".into();
        assert_eq!(form.validate(), Err(FormError::PasswordRequired));
        form.password = "pw".into();
        assert_eq!(form.validate().unwrap().username, "ana");
    }

    #[test]
    fn register_checks_email_and_confirmation() {
        let mut form = RegisterForm {
            username: "ana".into(),
            email: "ana".into(),
            password: "pw".into(),
            confirm_password: "other".into(),
            as_admin: false,
        };
        assert_eq!(form.validate(), Err(FormError::EmailInvalid));
        form.email = "ana@example.com".into();
        assert_eq!(form.validate(), Err(FormError::PasswordMismatch));
        form.confirm_password = "pw".into();
        assert_eq!(form.validate().unwrap().email, "ana@example.com");
    }

    #[test]
    fn destination_falls_back_to_catalog() {
        assert_eq!(login_destination(""), Route::QuizList {});
        assert_eq!(login_destination("/nowhere/at/all"), Route::QuizList {});
        assert_eq!(
            login_destination("/auth/login?return_to="),
            Route::QuizList {}
        );
        assert_eq!(
            login_destination("/quizzes/3/take"),
            Route::TakeQuiz { id: 3 }
        );
    }
}
