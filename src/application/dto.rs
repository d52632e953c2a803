use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplierRequest {
    #[validate(length(min = 1, max = 255), custom(function = "plain_name"))]
    pub name: String,
    /// Free-form contact details (email, phone, ...). Defaults to empty.
    #[serde(default)]
    #[validate(length(max = 255), custom(function = "no_control_chars"))]
    pub contact: String,
    /// Rating on a 0 to 5 scale.
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: f64,
    /// Lead time in days.
    #[validate(range(min = 0))]
    pub lead_time: i32,
}

/// Full replacement of a supplier's mutable fields.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSupplierRequest {
    #[validate(length(min = 1, max = 255), custom(function = "plain_name"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 255), custom(function = "no_control_chars"))]
    pub contact: String,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: f64,
    #[validate(range(min = 0))]
    pub lead_time: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierResponse {
    pub id: i64,
    pub name: String,
    pub contact: String,
    pub rating: f64,
    pub lead_time: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchSuppliersParams {
    /// Case-insensitive name fragment. An empty value matches every supplier.
    pub name: String,
}

fn plain_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    no_control_chars(value)
}

/// Postgres text cannot hold NUL, and no other control character belongs in a
/// name or contact line either.
fn no_control_chars(value: &str) -> Result<(), ValidationError> {
    if value.chars().any(char::is_control) {
        return Err(ValidationError::new("control_character"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn create(body: serde_json::Value) -> CreateSupplierRequest {
        serde_json::from_value(body).expect("valid JSON shape")
    }

    #[test]
    fn accepts_a_well_formed_request() {
        let request = create(json!({
            "name": "ACME", "contact": "a@x.com", "rating": 4, "leadTime": 7
        }));
        assert!(request.validate().is_ok());
        assert_eq!(request.lead_time, 7);
    }

    #[test]
    fn contact_defaults_to_empty() {
        let request = create(json!({ "name": "ACME", "rating": 4, "leadTime": 7 }));
        assert_eq!(request.contact, "");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn rejects_blank_name() {
        let request = create(json!({ "name": "   ", "rating": 4, "leadTime": 7 }));
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn rejects_control_characters_in_text_fields() {
        let request = create(json!({ "name": "A\u{0}B", "rating": 4, "leadTime": 7 }));
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));

        let request: UpdateSupplierRequest = serde_json::from_value(json!({
            "name": "ACME", "contact": "a@x.com\u{7}", "rating": 4, "leadTime": 7
        }))
        .unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("contact"));
        assert!(!errors.field_errors().contains_key("name"));
    }

    #[test]
    fn rejects_out_of_range_rating() {
        let request = create(json!({ "name": "ACME", "rating": 5.5, "leadTime": 7 }));
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("rating"));
    }

    #[test]
    fn rejects_negative_lead_time() {
        let request: UpdateSupplierRequest =
            serde_json::from_value(json!({ "name": "ACME", "rating": 1, "leadTime": -1 }))
                .unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("lead_time"));
    }

    #[test]
    fn missing_rating_fails_to_deserialize() {
        let result: Result<CreateSupplierRequest, _> =
            serde_json::from_value(json!({ "name": "ACME", "leadTime": 7 }));
        assert!(result.is_err());
    }

    #[test]
    fn response_uses_camel_case() {
        let response = SupplierResponse {
            id: 1,
            name: "ACME".to_string(),
            contact: "a@x.com".to_string(),
            rating: 4.0,
            lead_time: 7,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["leadTime"], 7);
        assert_eq!(value["id"], 1);
    }
}
