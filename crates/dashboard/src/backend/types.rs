//! Wire types for the Tillpoint REST API.

use serde::{Deserialize, Serialize};

use tillpoint_core::{CategoryId, CompanyId, CustomerId, OutletId, Phone, SupplierId};

use crate::backend::BackendError;

// ─────────────────────────────────────────────────────────────────────────────
// Auth Types
// ─────────────────────────────────────────────────────────────────────────────

/// Login request body.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Raw login response envelope.
///
/// Every field is optional on purpose: the payload shape is validated
/// explicitly in [`LoginResponse::into_login`] so a missing nested field
/// becomes a typed [`BackendError::MalformedResponse`] instead of a
/// deserialization failure with no context.
#[derive(Debug, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub data: Option<LoginPayload>,
}

/// The `data` object of a login response.
#[derive(Debug, Default, Deserialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub outlets: Vec<OutletRef>,
    #[serde(default)]
    pub company: Option<CompanyRef>,
}

/// An outlet reference inside the login payload.
#[derive(Debug, Deserialize)]
pub struct OutletRef {
    #[serde(default)]
    pub id: Option<OutletId>,
}

/// A company reference inside the login payload.
#[derive(Debug, Deserialize)]
pub struct CompanyRef {
    #[serde(default)]
    pub id: Option<CompanyId>,
}

/// A validated, fully-extracted login result.
#[derive(Debug, Clone)]
pub struct Login {
    /// Bearer token for subsequent API calls.
    pub token: String,
    /// The first outlet the account is scoped to.
    pub outlet_id: OutletId,
    /// The company the account belongs to.
    pub company_id: CompanyId,
}

impl LoginResponse {
    /// Validate the payload shape and extract the session fields.
    ///
    /// The contract requires `data.token`, `data.outlets[0].id`, and
    /// `data.company.id`. An account with no outlets is rejected here
    /// until the API contract says otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::MalformedResponse`] naming the first field
    /// that is missing or empty.
    pub fn into_login(self) -> Result<Login, BackendError> {
        let payload = self
            .data
            .ok_or(BackendError::MalformedResponse("login response has no data object"))?;

        let token = payload
            .token
            .filter(|t| !t.is_empty())
            .ok_or(BackendError::MalformedResponse("login response has no token"))?;

        let outlet_id = payload
            .outlets
            .into_iter()
            .next()
            .and_then(|outlet| outlet.id)
            .filter(|id| !id.is_empty())
            .ok_or(BackendError::MalformedResponse("login response has no outlets"))?;

        let company_id = payload
            .company
            .and_then(|company| company.id)
            .filter(|id| !id.is_empty())
            .ok_or(BackendError::MalformedResponse("login response has no company id"))?;

        Ok(Login {
            token,
            outlet_id,
            company_id,
        })
    }
}

/// Registration request body.
///
/// The API takes the referral code under the (historically misspelled)
/// `refferal` key and the phone as a JSON number; both are part of the wire
/// contract and must not be "fixed" here.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub business_name: String,
    pub business_address: String,
    #[serde(rename = "refferal")]
    pub referral_code: String,
    pub name: String,
    pub email: String,
    pub phone: Phone,
    pub password: String,
}

/// Forgot-password request body.
#[derive(Debug, Serialize)]
pub struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}

// ─────────────────────────────────────────────────────────────────────────────
// Master Data Types
// ─────────────────────────────────────────────────────────────────────────────

/// Generic `{ "data": ... }` envelope for detail reads.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// A product category.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A customer record.
#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// A supplier record.
#[derive(Debug, Clone, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(json: &str) -> LoginResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_login_response_extracts_all_fields() {
        let response = parse(
            r#"{"data":{"token":"T1","outlets":[{"id":"O1"}],"company":{"id":"C1"}}}"#,
        );
        let login = response.into_login().unwrap();
        assert_eq!(login.token, "T1");
        assert_eq!(login.outlet_id.as_str(), "O1");
        assert_eq!(login.company_id.as_str(), "C1");
    }

    #[test]
    fn test_login_response_first_outlet_wins() {
        let response = parse(
            r#"{"data":{"token":"T1","outlets":[{"id":"O1"},{"id":"O2"}],"company":{"id":"C1"}}}"#,
        );
        let login = response.into_login().unwrap();
        assert_eq!(login.outlet_id.as_str(), "O1");
    }

    #[test]
    fn test_login_response_missing_data() {
        let err = parse("{}").into_login().unwrap_err();
        assert!(matches!(err, BackendError::MalformedResponse(_)));
    }

    #[test]
    fn test_login_response_missing_token() {
        let response = parse(r#"{"data":{"outlets":[{"id":"O1"}],"company":{"id":"C1"}}}"#);
        let err = response.into_login().unwrap_err();
        assert!(matches!(err, BackendError::MalformedResponse(msg) if msg.contains("token")));
    }

    #[test]
    fn test_login_response_empty_token() {
        let response =
            parse(r#"{"data":{"token":"","outlets":[{"id":"O1"}],"company":{"id":"C1"}}}"#);
        assert!(response.into_login().is_err());
    }

    #[test]
    fn test_login_response_no_outlets() {
        let response = parse(r#"{"data":{"token":"T1","outlets":[],"company":{"id":"C1"}}}"#);
        let err = response.into_login().unwrap_err();
        assert!(matches!(err, BackendError::MalformedResponse(msg) if msg.contains("outlets")));
    }

    #[test]
    fn test_login_response_outlet_without_id() {
        let response = parse(r#"{"data":{"token":"T1","outlets":[{}],"company":{"id":"C1"}}}"#);
        assert!(response.into_login().is_err());
    }

    #[test]
    fn test_login_response_missing_company() {
        let response = parse(r#"{"data":{"token":"T1","outlets":[{"id":"O1"}]}}"#);
        let err = response.into_login().unwrap_err();
        assert!(matches!(err, BackendError::MalformedResponse(msg) if msg.contains("company")));
    }

    #[test]
    fn test_register_request_wire_format() {
        let request = RegisterRequest {
            business_name: "Corner Store".to_string(),
            business_address: "12 Main St".to_string(),
            referral_code: "FRIEND".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: Phone::parse("081234567890").unwrap(),
            password: "hunter2hunter2".to_string(),
        };

        let json: serde_json::Value = serde_json::to_value(&request).unwrap();
        // The misspelled key and the numeric phone are the wire contract.
        assert_eq!(json["refferal"], "FRIEND");
        assert_eq!(json["phone"], serde_json::json!(81_234_567_890_u64));
        assert!(json.get("referral_code").is_none());
    }
}
