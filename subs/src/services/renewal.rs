use chrono::{DateTime, Duration, Months, Utc};
use common::{
    env_config::RenewalArithmetic,
    error::{AppError, Res},
    misc::{Frequency, SubscriptionStatus},
};
use db::dtos::subscription::SubscriptionCreateRequest;

use crate::dtos::sub::ValidatedSubscription;

/// Computes the next renewal after `start` for the given billing frequency.
pub fn renewal_date_for(
    start: DateTime<Utc>,
    frequency: Frequency,
    arithmetic: RenewalArithmetic,
) -> Res<DateTime<Utc>> {
    let renewal = match (arithmetic, frequency) {
        (RenewalArithmetic::Calendar, Frequency::Monthly) => {
            start.checked_add_months(Months::new(1))
        }
        (RenewalArithmetic::Calendar, Frequency::Yearly) => {
            start.checked_add_months(Months::new(12))
        }
        _ => start.checked_add_signed(Duration::days(frequency.offset_days())),
    };

    renewal.ok_or_else(|| {
        AppError::Derivation(format!(
            "renewal date for {} starting {} is out of range",
            frequency, start
        ))
    })
}

/// Pre-write step: fills in a missing renewal date and expires the record
/// when that date already lies before `now`.
///
/// A `cancelled` record keeps its status even when past its renewal date.
pub fn derive(
    record: ValidatedSubscription,
    now: DateTime<Utc>,
    arithmetic: RenewalArithmetic,
) -> Res<SubscriptionCreateRequest> {
    let renewal_date = match record.renewal_date {
        Some(renewal) => renewal,
        None => {
            let frequency = record.frequency.ok_or_else(|| {
                AppError::Derivation("frequency required to derive renewal date".to_string())
            })?;
            renewal_date_for(record.start_date, frequency, arithmetic)?
        }
    };

    if renewal_date <= record.start_date {
        return Err(AppError::Derivation(
            "Renewal Date must be after the Start Date".to_string(),
        ));
    }

    let status = if renewal_date < now {
        record
            .status
            .transition_to(SubscriptionStatus::Expired)
            .unwrap_or_else(|e| {
                log::debug!("renewal date {} has passed: {}", renewal_date, e);
                record.status
            })
    } else {
        record.status
    };

    Ok(SubscriptionCreateRequest {
        name: record.name,
        price: record.price,
        currency: record.currency,
        frequency: record.frequency,
        category: record.category,
        payment_method: record.payment_method,
        status,
        start_date: record.start_date,
        renewal_date,
        owner_id: record.owner_id,
        created_at: now,
    })
}
