use axum::{
    Json, async_trait,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use tavola_core::validate::Validate;

use crate::error::AppError;

/// JSON body extractor that runs [`Validate`] on the decoded input.
///
/// Handlers receive the validated value; malformed JSON and violated constraints are
/// rejected with `422 Unprocessable Entity` before the handler runs.
///
/// ```ignore
/// async fn create(ValidatedJson(reservation): ValidatedJson<ReservationIn>) { ... }
/// ```
pub struct ValidatedJson<T: Validate>(pub T::Valid);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: Validate + DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(input) = Json::<T>::from_request(req, state).await?;

        Ok(ValidatedJson(input.validate()?))
    }
}
