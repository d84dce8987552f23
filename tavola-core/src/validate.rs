//! Request-body validation.
//!
//! Creation requests arrive as loosely typed `*In` structs whose fields are optional
//! [`BodyValue`]s, so that a missing field or a value of the wrong type becomes a
//! field-level [`FieldError`] rather than a deserialization failure of the whole body.
//! [`Validate::validate`] turns such an input into the strongly typed entity, reporting
//! every violated field at once.
//!
//! Only presence, types and ranges are checked. `date`, `time` and `email` are not parsed.

use serde::{Deserialize, Serialize, de::IgnoredAny};
use thiserror::Error;

use crate::model::{ContactMessage, MenuItem, Reservation};

/// Smallest party a reservation may be made for.
pub const MIN_GUESTS: i64 = 1;
/// Largest party a reservation may be made for.
pub const MAX_GUESTS: i64 = 20;

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Location of the offending value, e.g. `["body", "guests"]`.
    pub loc: Vec<String>,
    /// Human readable description.
    pub msg: String,
    /// Machine readable error kind.
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    /// Builds an error located at a top-level field of the request body.
    pub fn body_field(field: &str, kind: &str, msg: impl Into<String>) -> Self {
        Self {
            loc: vec!["body".to_string(), field.to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }

    /// Builds an error about the request body as a whole.
    pub fn body(kind: &str, msg: impl Into<String>) -> Self {
        Self {
            loc: vec!["body".to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }

    /// The field this error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        self.loc.get(1).map(String::as_str)
    }
}

/// Client-supplied data violated one or more field constraints.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed for {} field(s)", .errors.len())]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Returns the names of every offending field.
    pub fn fields(&self) -> Vec<&str> {
        self.errors
            .iter()
            .filter_map(FieldError::field)
            .collect()
    }
}

/// Conversion from an unchecked request body into a validated value.
pub trait Validate {
    type Valid;

    /// # Errors
    ///
    /// Returns every violated constraint as a [`ValidationError`].
    fn validate(self) -> Result<Self::Valid, ValidationError>;
}

/// A request-body value whose type has not been checked yet.
///
/// Absent fields and `null` both decode to `None` around this type.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BodyValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    /// Arrays and objects.
    Other(IgnoredAny),
}

/// Collects field errors while individual fields are checked.
#[derive(Debug, Default)]
struct FieldChecks {
    errors: Vec<FieldError>,
}

impl FieldChecks {
    fn push(&mut self, field: &str, kind: &str, msg: impl Into<String>) {
        self.errors.push(FieldError::body_field(field, kind, msg));
    }

    fn text(&mut self, field: &str, value: BodyValue) -> Option<String> {
        match value {
            BodyValue::Text(text) => Some(text),
            _ => {
                self.push(field, "string_type", "Input should be a valid string");
                None
            }
        }
    }

    fn required_text(&mut self, field: &str, value: Option<BodyValue>) -> Option<String> {
        let Some(value) = value else {
            self.push(field, "missing", "Field required");
            return None;
        };

        let text = self.text(field, value)?;
        if text.is_empty() {
            self.push(field, "string_too_short", "String should have at least 1 character");
            return None;
        }

        Some(text)
    }

    fn optional_text(&mut self, field: &str, value: Option<BodyValue>) -> Option<String> {
        match value {
            Some(value) => self.text(field, value),
            None => None,
        }
    }

    /// Integral floats such as `4.0` and numeric strings such as `"4"` are accepted.
    fn integer(&mut self, field: &str, value: BodyValue) -> Option<i64> {
        match value {
            BodyValue::Integer(n) => Some(n),
            // saturates, so huge values still fail the range check
            BodyValue::Float(x) if x.fract() == 0.0 => Some(x as i64),
            BodyValue::Float(_) => {
                self.push(
                    field,
                    "int_from_float",
                    "Input should be a valid integer, got a number with a fractional part",
                );
                None
            }
            BodyValue::Text(text) => match text.trim().parse() {
                Ok(n) => Some(n),
                Err(_) => {
                    self.push(
                        field,
                        "int_parsing",
                        "Input should be a valid integer, unable to parse string as an integer",
                    );
                    None
                }
            },
            BodyValue::Bool(_) | BodyValue::Other(_) => {
                self.push(field, "int_type", "Input should be a valid integer");
                None
            }
        }
    }

    fn integer_in_range(
        &mut self,
        field: &str,
        value: Option<BodyValue>,
        min: i64,
        max: i64,
    ) -> Option<i64> {
        let Some(value) = value else {
            self.push(field, "missing", "Field required");
            return None;
        };

        match self.integer(field, value)? {
            n if n < min => {
                self.push(
                    field,
                    "greater_than_equal",
                    format!("Input should be greater than or equal to {min}"),
                );
                None
            }
            n if n > max => {
                self.push(
                    field,
                    "less_than_equal",
                    format!("Input should be less than or equal to {max}"),
                );
                None
            }
            n => Some(n),
        }
    }

    fn non_negative(&mut self, field: &str, value: f64) {
        if !value.is_finite() {
            self.push(field, "finite_number", "Input should be a finite number");
        } else if value < 0.0 {
            self.push(
                field,
                "greater_than_equal",
                "Input should be greater than or equal to 0",
            );
        }
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.errors))
        }
    }
}

/// Body of `POST /api/reservations`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationIn {
    pub name: Option<BodyValue>,
    pub email: Option<BodyValue>,
    pub phone: Option<BodyValue>,
    pub date: Option<BodyValue>,
    pub time: Option<BodyValue>,
    pub guests: Option<BodyValue>,
    pub notes: Option<BodyValue>,
}

/// Body of `POST /api/contact`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactMessageIn {
    pub name: Option<BodyValue>,
    pub email: Option<BodyValue>,
    pub message: Option<BodyValue>,
}

/// Checks a reservation request: `name`, `phone`, `date` and `time` must be present and
/// non-empty, `guests` must be an integer in `[MIN_GUESTS, MAX_GUESTS]`.
pub fn validate_reservation(input: ReservationIn) -> Result<Reservation, ValidationError> {
    let mut checks = FieldChecks::default();

    let name = checks.required_text("name", input.name);
    let email = checks.optional_text("email", input.email);
    let phone = checks.required_text("phone", input.phone);
    let date = checks.required_text("date", input.date);
    let time = checks.required_text("time", input.time);
    let guests = checks.integer_in_range("guests", input.guests, MIN_GUESTS, MAX_GUESTS);
    let notes = checks.optional_text("notes", input.notes);

    checks.finish()?;

    match (name, phone, date, time, guests) {
        (Some(name), Some(phone), Some(date), Some(time), Some(guests)) => Ok(Reservation {
            name,
            email,
            phone,
            date,
            time,
            // bounded by MAX_GUESTS above
            guests: guests as i32,
            notes,
        }),
        _ => Err(ValidationError::new(vec![FieldError::body(
            "value_error",
            "Incomplete reservation",
        )])),
    }
}

/// Checks a contact message: `name`, `email` and `message` must be present and non-empty.
pub fn validate_contact_message(
    input: ContactMessageIn,
) -> Result<ContactMessage, ValidationError> {
    let mut checks = FieldChecks::default();

    let name = checks.required_text("name", input.name);
    let email = checks.required_text("email", input.email);
    let message = checks.required_text("message", input.message);

    checks.finish()?;

    match (name, email, message) {
        (Some(name), Some(email), Some(message)) => Ok(ContactMessage {
            name,
            email,
            message,
        }),
        _ => Err(ValidationError::new(vec![FieldError::body(
            "value_error",
            "Incomplete contact message",
        )])),
    }
}

/// Checks that a menu item has a non-negative, finite price.
///
/// Runs before every menu item write, seeding included.
pub fn validate_menu_item(item: &MenuItem) -> Result<(), ValidationError> {
    let mut checks = FieldChecks::default();
    checks.non_negative("price", item.price);
    checks.finish()
}

impl Validate for ReservationIn {
    type Valid = Reservation;

    fn validate(self) -> Result<Reservation, ValidationError> {
        validate_reservation(self)
    }
}

impl Validate for ContactMessageIn {
    type Valid = ContactMessage;

    fn validate(self) -> Result<ContactMessage, ValidationError> {
        validate_contact_message(self)
    }
}
