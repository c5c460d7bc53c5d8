use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use validator::{Validate, ValidationErrors};

pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                // malformed or mistyped bodies are client errors like any other
                let status = match rejection.status() {
                    StatusCode::UNPROCESSABLE_ENTITY => StatusCode::BAD_REQUEST,
                    other => other,
                };
                let payload = json!({
                    "status": "error",
                    "message": format!("Invalid JSON: {}", rejection.body_text()),
                });
                (status, Json(payload))
            })?;

        value.validate().map_err(|validation_errors| {
            let payload = json!({
                "status": "error",
                "message": format_validation_errors(&validation_errors),
                "details": format_validation_errors_detailed(&validation_errors),
            });
            (StatusCode::BAD_REQUEST, Json(payload))
        })?;

        Ok(Self(value))
    }
}

fn default_message(code: &str, field: &str) -> String {
    match code {
        "email" => "Invalid email format".to_string(),
        "length" => "Invalid length".to_string(),
        "range" => "Value out of range".to_string(),
        _ => format!("Invalid {field}"),
    }
}

fn format_validation_errors(errors: &ValidationErrors) -> String {
    let messages = flatten(errors, "")
        .into_iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>();

    if messages.is_empty() {
        "Validation failed".to_string()
    } else {
        messages.join("; ")
    }
}

fn format_validation_errors_detailed(errors: &ValidationErrors) -> Value {
    let mut error_map = serde_json::Map::new();

    for (field, message) in flatten(errors, "") {
        let entry = error_map
            .entry(field)
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(messages) = entry {
            messages.push(Value::String(message));
        }
    }

    Value::Object(error_map)
}

/// Walks nested struct and list errors so `items[1].quantity` is reported
/// with its full path.
fn flatten(errors: &ValidationErrors, prefix: &str) -> Vec<(String, String)> {
    use validator::ValidationErrorsKind;

    let mut out = Vec::new();

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| default_message(error.code.as_ref(), field));
                    out.push((path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(inner) => {
                out.extend(flatten(inner, &path));
            }
            ValidationErrorsKind::List(list) => {
                for (index, inner) in list {
                    out.extend(flatten(inner, &format!("{path}[{index}]")));
                }
            }
        }
    }

    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::{pricing::CartItemRequest, rental::CreateRentalRequest};

    #[test]
    fn nested_item_errors_carry_their_index() {
        let req = CreateRentalRequest {
            customer_name: "Ada".into(),
            customer_email: "ada@example.com".into(),
            phone_number: None,
            items: vec![
                CartItemRequest {
                    product_id: 1,
                    quantity: 2,
                },
                CartItemRequest {
                    product_id: 2,
                    quantity: 0,
                },
            ],
            start_date: "2025-06-01".into(),
            end_date: "2025-06-02".into(),
        };

        let errors = req.validate().unwrap_err();
        let message = format_validation_errors(&errors);
        assert!(message.contains("items[1].quantity"), "{message}");
    }

    #[test]
    fn bad_email_is_reported() {
        let req = CreateRentalRequest {
            customer_name: "Ada".into(),
            customer_email: "not-an-email".into(),
            phone_number: None,
            items: vec![CartItemRequest {
                product_id: 1,
                quantity: 1,
            }],
            start_date: "2025-06-01".into(),
            end_date: "2025-06-02".into(),
        };

        let errors = req.validate().unwrap_err();
        let details = format_validation_errors_detailed(&errors);
        assert!(details.get("customer_email").is_some());
    }
}
