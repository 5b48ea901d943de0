//! Login and registration forms.

use auth::RegisterData;
use entities::{ServiceCategory, UserType};

use super::form::{FormError, FormResult, required};

/// Login form buffer.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Returns the trimmed email and the password.
    pub fn validate(&self) -> FormResult<(String, String)> {
        let email = required("email", &self.email)?;
        if self.password.is_empty() {
            return Err(FormError::Required("mot de passe"));
        }
        Ok((email, self.password.clone()))
    }
}

/// Registration form buffer.
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub user_type: UserType,
    pub ridet_number: String,
    pub rc_number: String,
    pub specialties: Vec<ServiceCategory>,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            phone: String::new(),
            user_type: UserType::Particulier,
            ridet_number: String::new(),
            rc_number: String::new(),
            specialties: Vec::new(),
        }
    }
}

impl RegisterForm {
    /// Adds `category` to the specialties, or removes it if already present.
    pub fn toggle_specialty(&mut self, category: ServiceCategory) {
        if let Some(pos) = self.specialties.iter().position(|c| *c == category) {
            self.specialties.remove(pos);
        } else {
            self.specialties.push(category);
        }
    }

    /// Checks the buffer and builds the registration payload.
    ///
    /// Artisan-only fields are dropped for particuliers.
    pub fn validate(&self) -> FormResult<RegisterData> {
        let first_name = required("prénom", &self.first_name)?;
        let last_name = required("nom", &self.last_name)?;
        let email = required("email", &self.email)?;
        let phone = required("téléphone", &self.phone)?;
        if self.password.is_empty() {
            return Err(FormError::Required("mot de passe"));
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }

        let (ridet_number, rc_number, specialties) = match self.user_type {
            UserType::Artisan => (
                Some(required("numéro RIDET", &self.ridet_number)?),
                Some(required("numéro RC", &self.rc_number)?),
                self.specialties.clone(),
            ),
            UserType::Particulier => (None, None, Vec::new()),
        };

        Ok(RegisterData {
            email,
            password: self.password.clone(),
            first_name,
            last_name,
            phone,
            user_type: self.user_type,
            ridet_number,
            rc_number,
            specialties,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RegisterForm {
        RegisterForm {
            email: "lea@example.nc".to_string(),
            password: "secret".to_string(),
            confirm_password: "secret".to_string(),
            first_name: "Léa".to_string(),
            last_name: "Wamytan".to_string(),
            phone: "+687 778899".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_login_requires_both_fields() {
        let form = LoginForm {
            email: "  ".to_string(),
            password: "x".to_string(),
        };
        assert_eq!(form.validate(), Err(FormError::Required("email")));

        let form = LoginForm {
            email: "a@b.nc".to_string(),
            password: String::new(),
        };
        assert_eq!(form.validate(), Err(FormError::Required("mot de passe")));

        let form = LoginForm {
            email: " a@b.nc ".to_string(),
            password: "pw".to_string(),
        };
        assert_eq!(
            form.validate().unwrap(),
            ("a@b.nc".to_string(), "pw".to_string())
        );
    }

    #[test]
    fn test_register_rejects_mismatched_passwords() {
        let mut form = filled();
        form.confirm_password = "other".to_string();
        assert_eq!(form.validate().unwrap_err(), FormError::PasswordMismatch);
    }

    #[test]
    fn test_particulier_drops_artisan_fields() {
        let mut form = filled();
        form.ridet_number = "123".to_string();
        form.toggle_specialty(ServiceCategory::Peinture);

        let data = form.validate().unwrap();
        assert_eq!(data.user_type, UserType::Particulier);
        assert!(data.ridet_number.is_none());
        assert!(data.specialties.is_empty());
    }

    #[test]
    fn test_artisan_requires_registration_numbers() {
        let mut form = filled();
        form.user_type = UserType::Artisan;
        assert_eq!(
            form.validate().unwrap_err(),
            FormError::Required("numéro RIDET")
        );

        form.ridet_number = "0123456.001".to_string();
        assert_eq!(form.validate().unwrap_err(), FormError::Required("numéro RC"));

        form.rc_number = "RC 2024 B 1".to_string();
        form.toggle_specialty(ServiceCategory::Menuiserie);
        let data = form.validate().unwrap();
        assert_eq!(data.ridet_number.as_deref(), Some("0123456.001"));
        assert_eq!(data.specialties, vec![ServiceCategory::Menuiserie]);
    }

    #[test]
    fn test_toggle_specialty() {
        let mut form = RegisterForm::default();
        form.toggle_specialty(ServiceCategory::Jardinage);
        form.toggle_specialty(ServiceCategory::Plomberie);
        form.toggle_specialty(ServiceCategory::Jardinage);
        assert_eq!(form.specialties, vec![ServiceCategory::Plomberie]);
    }
}
