//! Per-field validation rules for user records.
//!
//! Each rule returns the cleaned value or the message of the first rule the
//! field breaks. Checks run in a fixed order:
//!
//! | field   | order                                                          |
//! |---------|----------------------------------------------------------------|
//! | account | missing, not a string, length 4-20 (after trim), alphanumeric |
//! | email   | missing, not a string, email grammar                           |

use regex::Regex;
use serde_json::{Number, Value};
use std::sync::LazyLock;
use validator::ValidateEmail;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUserInput, NewUser, UpdateUserInput, UserChanges};

pub const ACCOUNT_MIN_LEN: usize = 4;
pub const ACCOUNT_MAX_LEN: usize = 20;

static ACCOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("account pattern is valid"));

/// Turn a raw JSON value into text the way the record mapper casts it.
///
/// `null` yields `Ok(None)`; numbers and booleans become their textual form;
/// arrays and objects are rejected.
fn coerce(field: &str, value: Option<&Value>) -> Result<Option<String>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(number_text(n))),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(Value::Array(_)) | Some(Value::Object(_)) => Err(format!("{field} must be a string")),
    }
}

/// Integral floats render without a fractional part (`12345.0` -> `"12345"`).
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            format!("{f:.0}")
        }
        _ => n.to_string(),
    }
}

pub fn validate_account(value: Option<&Value>) -> Result<String, String> {
    let account = coerce("account", value)?
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "missing account".to_string())?;

    // Length in UTF-16 code units, so astral characters count twice
    let len = account.encode_utf16().count();
    if !(ACCOUNT_MIN_LEN..=ACCOUNT_MAX_LEN).contains(&len) {
        return Err(format!(
            "account must be {ACCOUNT_MIN_LEN}-{ACCOUNT_MAX_LEN} characters"
        ));
    }

    if !ACCOUNT_PATTERN.is_match(&account) {
        return Err("account must be alphanumeric".to_string());
    }

    Ok(account)
}

pub fn validate_email(value: Option<&Value>) -> Result<String, String> {
    let email = coerce("email", value)?
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "missing email".to_string())?;

    if !email.validate_email() {
        return Err("invalid email format".to_string());
    }

    Ok(email)
}

/// Validate both fields of a create body; account is checked first.
pub fn validate_new_user(input: &CreateUserInput) -> UserResult<NewUser> {
    let account = validate_account(input.account.as_ref()).map_err(UserError::Validation)?;
    let email = validate_email(input.email.as_ref()).map_err(UserError::Validation)?;
    Ok(NewUser { account, email })
}

/// Validate only the fields present in a patch body.
pub fn validate_changes(input: &UpdateUserInput) -> UserResult<UserChanges> {
    let account = input
        .account
        .as_ref()
        .map(|v| validate_account(Some(v)))
        .transpose()
        .map_err(UserError::Validation)?;
    let email = input
        .email
        .as_ref()
        .map(|v| validate_email(Some(v)))
        .transpose()
        .map_err(UserError::Validation)?;
    Ok(UserChanges { account, email })
}
