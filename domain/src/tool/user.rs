//! User profile tools.

use super::entities::{ParamType, ToolDefinition, ToolParameter};
use super::traits::{AirlineTool, parse_args};
use super::value_objects::{ToolError, ToolOutcome};
use crate::airline::{AirlineData, PaymentMethod};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const GET_USER_DETAILS: &str = "get_user_details";
pub const SEND_CERTIFICATE: &str = "send_certificate";

/// Numeric suffixes for issued certificates, tried in order.
pub const CERTIFICATE_ID_POOL: [u32; 5] = [3221322, 9643417, 7815826, 7273485, 9643419];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserDetailsArgs {
    pub user_id: String,
}

pub fn get_user_details(data: &AirlineData, args: &GetUserDetailsArgs) -> ToolOutcome {
    let user = data.users.get(&args.user_id).ok_or(ToolError::UserNotFound)?;
    Ok(serde_json::to_string(user)?)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCertificateArgs {
    pub user_id: String,
    pub amount: f64,
}

/// Add a certificate under the first unused id of [`CERTIFICATE_ID_POOL`].
pub fn send_certificate(data: &mut AirlineData, args: &SendCertificateArgs) -> ToolOutcome {
    let user = data
        .users
        .get_mut(&args.user_id)
        .ok_or(ToolError::UserNotFound)?;

    let payment_id = CERTIFICATE_ID_POOL
        .iter()
        .map(|n| format!("certificate_{n}"))
        .find(|id| !user.payment_methods.contains_key(id))
        .ok_or_else(|| ToolError::CertificateIdsExhausted(args.user_id.clone()))?;

    user.payment_methods.insert(
        payment_id.clone(),
        PaymentMethod::certificate(payment_id.clone(), args.amount),
    );
    Ok(format!(
        "Certificate {} added to user {} with amount {}.",
        payment_id, args.user_id, args.amount
    ))
}

pub struct GetUserDetails;

impl AirlineTool for GetUserDetails {
    fn name(&self) -> &'static str {
        GET_USER_DETAILS
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(GET_USER_DETAILS, "Get the details of an user.").with_parameter(
            ToolParameter::new("user_id", "The user id, such as 'sara_doe_496'.", true),
        )
    }

    fn invoke(&self, data: &mut AirlineData, kwargs: &Value) -> ToolOutcome {
        get_user_details(data, &parse_args(GET_USER_DETAILS, kwargs)?)
    }
}

pub struct SendCertificate;

impl AirlineTool for SendCertificate {
    fn name(&self) -> &'static str {
        SEND_CERTIFICATE
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            SEND_CERTIFICATE,
            "Send a certificate to a user. Be careful!",
        )
        .with_parameter(ToolParameter::new(
            "user_id",
            "The ID of the user to book the reservation, such as 'sara_doe_496'.",
            true,
        ))
        .with_parameter(
            ToolParameter::new("amount", "Certificate amount to send.", true)
                .with_type(ParamType::Number),
        )
    }

    fn invoke(&self, data: &mut AirlineData, kwargs: &Value) -> ToolOutcome {
        send_certificate(data, &parse_args(SEND_CERTIFICATE, kwargs)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::fixtures::sample_data;

    fn certificate(user_id: &str, amount: f64) -> SendCertificateArgs {
        SendCertificateArgs {
            user_id: user_id.into(),
            amount,
        }
    }

    #[test]
    fn test_get_user_details() {
        let data = sample_data();
        let out = get_user_details(
            &data,
            &GetUserDetailsArgs {
                user_id: "mia_li_3668".into(),
            },
        )
        .unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["user_id"], "mia_li_3668");
        assert_eq!(parsed["reservations"][0], "ZFA04Y");

        assert_eq!(
            get_user_details(
                &data,
                &GetUserDetailsArgs {
                    user_id: "nobody".into()
                }
            ),
            Err(ToolError::UserNotFound)
        );
    }

    #[test]
    fn test_send_certificate() {
        let mut data = sample_data();
        assert_eq!(
            send_certificate(&mut data, &certificate("mia_li_3668", 150.0)).unwrap(),
            "Certificate certificate_3221322 added to user mia_li_3668 with amount 150."
        );
        assert_eq!(
            data.users["mia_li_3668"].payment_methods["certificate_3221322"].balance(),
            Some(150.0)
        );

        let second = send_certificate(&mut data, &certificate("mia_li_3668", 50.0)).unwrap();
        assert!(second.starts_with("Certificate certificate_9643417"));
    }

    #[test]
    fn test_send_certificate_pool_exhausted() {
        let mut data = sample_data();
        for _ in 0..CERTIFICATE_ID_POOL.len() {
            send_certificate(&mut data, &certificate("mia_li_3668", 10.0)).unwrap();
        }
        let original = data.clone();
        assert_eq!(
            send_certificate(&mut data, &certificate("mia_li_3668", 10.0))
                .unwrap_err()
                .to_wire(),
            "Error: too many certificates for user mia_li_3668"
        );
        assert_eq!(data, original);
    }

    #[test]
    fn test_send_certificate_unknown_user() {
        let mut data = sample_data();
        assert_eq!(
            send_certificate(&mut data, &certificate("nobody", 10.0)),
            Err(ToolError::UserNotFound)
        );
    }
}
