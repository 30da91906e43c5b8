//! JSON extractor that runs `validator` rules after deserialization.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// Request body extractor for the CRUD handlers.
///
/// Deserializes the JSON body and applies the payload's `#[validate]`
/// attributes; malformed JSON and rule violations both surface as a 400
/// with the offending messages, so handlers only ever see valid input.
///
/// ```rust,ignore
/// async fn create_weapon(
///     State(state): State<AppState>,
///     ValidatedJson(payload): ValidatedJson<CreateWeaponRequest>,
/// ) -> AppResult<Created<WeaponResponse>> {
///     // holder and serial_number are known to be non-empty here
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        payload
            .validate()
            .map_err(|errors| AppError::validation(collect_messages(&errors)))?;

        Ok(ValidatedJson(payload))
    }
}

/// Flatten field errors into one comma-separated message.
fn collect_messages(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}
