//! Field validation shared by the forms.

use thiserror::Error;

/// Validation failures reported back to the user. They never reach a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Le champ « {0} » est obligatoire")]
    Required(&'static str),

    #[error("Les mots de passe ne correspondent pas")]
    PasswordMismatch,

    #[error("« {0} » doit être un nombre entier positif")]
    InvalidAmount(&'static str),

    #[error("Valeur inconnue pour « {field} » : {value}")]
    UnknownChoice { field: &'static str, value: String },

    #[error("Seuls les artisans peuvent répondre à une demande")]
    ArtisanOnly,

    #[error("Aucun destinataire pour cette conversation")]
    NoRecipient,

    #[error("Aucune demande n°{0} dans la liste")]
    NotListed(usize),

    #[error("Aucune réponse n°{0} pour cette demande")]
    NoSuchResponse(usize),
}

pub type FormResult<T> = Result<T, FormError>;

pub(crate) fn required(field: &'static str, value: &str) -> FormResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::Required(field));
    }
    Ok(value.to_string())
}

pub(crate) fn positive_amount(field: &'static str, value: &str) -> FormResult<i64> {
    let value = required(field, value)?;
    match value.parse::<i64>() {
        Ok(amount) if amount > 0 => Ok(amount),
        _ => Err(FormError::InvalidAmount(field)),
    }
}
