use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Res};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "subscription_currency", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        };
        f.write_str(s)
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            other => Err(format!("`{}` is not a supported currency", other)),
        }
    }
}

/// Billing frequency of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "subscription_frequency", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Fixed number of days between two renewals.
    ///
    /// Monthly and yearly are approximations (30 and 365 days), not calendar months.
    pub fn offset_days(self) -> i64 {
        match self {
            Frequency::Daily => 1,
            Frequency::Weekly => 7,
            Frequency::Monthly => 30,
            Frequency::Yearly => 365,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        };
        f.write_str(s)
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(format!("`{}` is not a supported frequency", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "subscription_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sports,
    Movies,
    News,
    Music,
    Lifestyle,
    Technology,
    Fashion,
    Education,
    Food,
    Travel,
    Other,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Sports,
        Category::Movies,
        Category::News,
        Category::Music,
        Category::Lifestyle,
        Category::Technology,
        Category::Fashion,
        Category::Education,
        Category::Food,
        Category::Travel,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Sports => "sports",
            Category::Movies => "movies",
            Category::News => "news",
            Category::Music => "music",
            Category::Lifestyle => "lifestyle",
            Category::Technology => "technology",
            Category::Fashion => "fashion",
            Category::Education => "education",
            Category::Food => "food",
            Category::Travel => "travel",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("`{}` is not a supported category", s))
    }
}

/// Lifecycle status of a subscription.
///
/// Transitions only go forward: `active` may become `cancelled` or `expired`,
/// and both of those are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "subscription_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Cancelled,
    Expired,
}

impl SubscriptionStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SubscriptionStatus::Active)
    }

    pub fn can_transition_to(self, next: SubscriptionStatus) -> bool {
        self == next || !self.is_terminal()
    }

    pub fn transition_to(self, next: SubscriptionStatus) -> Res<SubscriptionStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(AppError::StatusTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Cancelled => "cancelled",
            SubscriptionStatus::Expired => "expired",
        };
        f.write_str(s)
    }
}

impl FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SubscriptionStatus::Active),
            "cancelled" => Ok(SubscriptionStatus::Cancelled),
            "expired" => Ok(SubscriptionStatus::Expired),
            other => Err(format!("`{}` is not a supported status", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_cover_every_frequency() {
        assert_eq!(Frequency::Daily.offset_days(), 1);
        assert_eq!(Frequency::Weekly.offset_days(), 7);
        assert_eq!(Frequency::Monthly.offset_days(), 30);
        assert_eq!(Frequency::Yearly.offset_days(), 365);
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert_eq!("USD".parse::<Currency>(), Ok(Currency::Usd));
        assert!("usd".parse::<Currency>().is_err());
        assert_eq!("weekly".parse::<Frequency>(), Ok(Frequency::Weekly));
        assert!("Weekly".parse::<Frequency>().is_err());
        assert!("fortnightly".parse::<Frequency>().is_err());
    }

    #[test]
    fn category_round_trips_through_display() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>(), Ok(category));
        }
        assert!("gardening".parse::<Category>().is_err());
    }

    #[test]
    fn serde_uses_wire_spelling() {
        assert_eq!(serde_json::to_string(&Currency::Gbp).unwrap(), "\"GBP\"");
        assert_eq!(
            serde_json::to_string(&SubscriptionStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
        let parsed: Category = serde_json::from_str("\"technology\"").unwrap();
        assert_eq!(parsed, Category::Technology);
    }

    #[test]
    fn active_moves_to_either_terminal_state() {
        let active = SubscriptionStatus::Active;
        assert_eq!(
            active.transition_to(SubscriptionStatus::Expired).unwrap(),
            SubscriptionStatus::Expired
        );
        assert_eq!(
            active.transition_to(SubscriptionStatus::Cancelled).unwrap(),
            SubscriptionStatus::Cancelled
        );
    }

    #[test]
    fn terminal_states_reject_overwrite() {
        let err = SubscriptionStatus::Cancelled
            .transition_to(SubscriptionStatus::Expired)
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::StatusTransition {
                from: SubscriptionStatus::Cancelled,
                to: SubscriptionStatus::Expired
            }
        ));
        assert!(!SubscriptionStatus::Expired.can_transition_to(SubscriptionStatus::Active));
        assert!(SubscriptionStatus::Cancelled.can_transition_to(SubscriptionStatus::Cancelled));
    }
}
