use crate::domain::requests::collect_validation_errors;
use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use shared::errors::{ErrorKind, ErrorResponse};
use validator::{Validate, ValidationErrors};

/// JSON body that is deserialized and validated before the handler runs.
/// Both failures answer 422 with the standard error envelope.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ErrorResponse::new(
                        ErrorKind::Validation,
                        format!("Invalid JSON: {}", rejection.body_text()),
                    )),
                )
            })?;

        value.validate().map_err(|errors| {
            let body = ErrorResponse::new(
                ErrorKind::Validation,
                collect_validation_errors(&errors).join("; "),
            )
            .with_errors(field_errors(&errors));
            (StatusCode::UNPROCESSABLE_ENTITY, Json(body))
        })?;

        Ok(Self(value))
    }
}

fn field_errors(errors: &ValidationErrors) -> Value {
    let mut map = Map::new();

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| match e.code.as_ref() {
                        "length" => "Invalid length".to_string(),
                        "range" => "Value out of range".to_string(),
                        _ => format!("Invalid {field}"),
                    })
            })
            .collect();
        map.insert(field.to_string(), json!(messages));
    }

    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::cart::AddCartItemRequest;

    #[test]
    fn field_errors_are_grouped_by_field() {
        let req = AddCartItemRequest {
            product_id: 1,
            quantity: 0,
        };
        let errors = req.validate().unwrap_err();

        let value = field_errors(&errors);
        assert_eq!(value["quantity"][0], "Quantity must be at least 1");
    }
}
