//! History DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::CarId;
use domain_history::{CarHistory, HistoryEvent};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarHistoryResponse {
    pub car_id: CarId,
    pub events: Vec<HistoryEventResponse>,
}

/// One event, tagged by `type`
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum HistoryEventResponse {
    #[serde(rename = "Insurance Policy", rename_all = "camelCase")]
    Policy {
        date: NaiveDate,
        provider: Option<String>,
        end_date: Option<DateTime<Utc>>,
    },

    #[serde(rename = "Insurance Claim")]
    Claim {
        date: NaiveDate,
        description: Option<String>,
        #[serde(with = "rust_decimal::serde::float")]
        amount: Decimal,
    },
}

impl From<HistoryEvent> for HistoryEventResponse {
    fn from(event: HistoryEvent) -> Self {
        match event {
            HistoryEvent::Policy { date, provider, end, .. } => HistoryEventResponse::Policy {
                date,
                provider,
                end_date: end,
            },
            HistoryEvent::Claim { date, description, amount, .. } => HistoryEventResponse::Claim {
                date,
                description,
                amount: amount.amount(),
            },
        }
    }
}

impl From<CarHistory> for CarHistoryResponse {
    fn from(history: CarHistory) -> Self {
        Self {
            car_id: history.car_id,
            events: history.events.into_iter().map(HistoryEventResponse::from).collect(),
        }
    }
}
