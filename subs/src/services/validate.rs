use std::str::FromStr;

use chrono::{DateTime, Utc};
use common::{
    error::{AppError, Res, ValidationErrors},
    misc::{Category, Currency, Frequency, SubscriptionStatus},
};
use serde_json::Value;

use crate::{
    dtos::sub::{SubscriptionInput, ValidatedSubscription},
    services::cast,
};

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 100;

/// Checks every field constraint of a candidate record against `now`.
///
/// All failing fields, including values of the wrong type, are reported
/// together in one `AppError::Validation`. Text fields are trimmed, and unset
/// enum fields take their defaults.
pub fn validate(input: SubscriptionInput, now: DateTime<Utc>) -> Res<ValidatedSubscription> {
    let mut errors = ValidationErrors::default();

    let name = match cast_field(&mut errors, "name", input.name.as_ref(), cast::to_text)
        .as_deref()
        .map(str::trim)
    {
        Some("") => {
            errors.push("name", "Subscription Name is required");
            None
        }
        Some(name) => {
            let len = name.chars().count();
            if len < NAME_MIN_LEN {
                errors.push(
                    "name",
                    format!("Subscription Name must be at least {} characters", NAME_MIN_LEN),
                );
                None
            } else if len > NAME_MAX_LEN {
                errors.push(
                    "name",
                    format!("Subscription Name must be at most {} characters", NAME_MAX_LEN),
                );
                None
            } else {
                Some(name.to_string())
            }
        }
        None => {
            if input.name.is_none() {
                errors.push("name", "Subscription Name is required");
            }
            None
        }
    };

    let price = match cast_field(&mut errors, "price", input.price.as_ref(), cast::to_number) {
        Some(price) if !price.is_finite() => {
            errors.push("price", "Subscription Price must be a finite number");
            None
        }
        Some(price) if price < 0.0 => {
            errors.push("price", "Subscription Price must not be negative");
            None
        }
        Some(price) => Some(price),
        None => {
            if input.price.is_none() {
                errors.push("price", "Subscription Price is required");
            }
            None
        }
    };

    let currency: Option<Currency> = parse_enum(&mut errors, "currency", input.currency.as_ref());
    let frequency: Option<Frequency> =
        parse_enum(&mut errors, "frequency", input.frequency.as_ref());
    let status: Option<SubscriptionStatus> =
        parse_enum(&mut errors, "status", input.status.as_ref());

    let category: Option<Category> = if input.category.is_none() {
        errors.push("category", "Subscription Category is required");
        None
    } else {
        parse_enum(&mut errors, "category", input.category.as_ref())
    };

    let payment_method = match cast_field(
        &mut errors,
        "paymentMethod",
        input.payment_method.as_ref(),
        cast::to_text,
    )
    .as_deref()
    .map(str::trim)
    {
        Some("") => {
            errors.push("paymentMethod", "Subscription Payment Method is required");
            None
        }
        Some(method) => Some(method.to_string()),
        None => {
            if input.payment_method.is_none() {
                errors.push("paymentMethod", "Subscription Payment Method is required");
            }
            None
        }
    };

    let start_raw = cast_field(&mut errors, "startDate", input.start_date.as_ref(), cast::to_date);
    let renewal_date = cast_field(
        &mut errors,
        "renewalDate",
        input.renewal_date.as_ref(),
        cast::to_date,
    );

    let start_date = match start_raw {
        Some(start) if start > now => {
            errors.push("startDate", "Subscription Start Date must be in the past");
            None
        }
        Some(start) => Some(start),
        None => {
            if input.start_date.is_none() {
                errors.push("startDate", "Subscription Start Date is required");
            }
            None
        }
    };

    if let (Some(start), Some(renewal)) = (start_raw, renewal_date) {
        if renewal <= start {
            errors.push("renewalDate", "Renewal Date must be after the Start Date");
        }
    }

    let owner_id = cast_field(&mut errors, "ownerId", input.owner_id.as_ref(), cast::to_uuid);
    if input.owner_id.is_none() {
        errors.push("ownerId", "Subscription Owner is required");
    }

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    match (name, price, category, payment_method, start_date, owner_id) {
        (
            Some(name),
            Some(price),
            Some(category),
            Some(payment_method),
            Some(start_date),
            Some(owner_id),
        ) => Ok(ValidatedSubscription {
            name,
            price,
            currency: currency.unwrap_or_default(),
            frequency,
            category,
            payment_method,
            status: status.unwrap_or_default(),
            start_date,
            renewal_date,
            owner_id,
        }),
        _ => Err(AppError::Internal(
            "validation accepted an incomplete subscription".to_string(),
        )),
    }
}

/// Casts a present value; a failed cast is recorded as a field error.
fn cast_field<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: Option<&Value>,
    cast: fn(&Value) -> Result<T, String>,
) -> Option<T> {
    match cast(raw?) {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(field, message);
            None
        }
    }
}

/// Parses an optional enum field; an unrecognized value is recorded as a field error.
fn parse_enum<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: Option<&Value>,
) -> Option<T>
where
    T: FromStr<Err = String>,
{
    let text = cast_field(errors, field, raw, cast::to_text)?;
    match text.parse::<T>() {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(field, message);
            None
        }
    }
}
