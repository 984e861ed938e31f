//! Newsletter subscription types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscription {
    pub id: String,
    pub email: String,
    pub subscribed: bool,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/newsletter/subscribe`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubscription {
    pub email: String,
    #[serde(default)]
    pub subscribed: Option<bool>,
}

impl NewSubscription {
    pub fn into_record(self, id: String, now: DateTime<Utc>) -> NewsletterSubscription {
        NewsletterSubscription {
            id,
            email: self.email,
            subscribed: self.subscribed.unwrap_or(true),
            created_at: now,
        }
    }
}

/// Body of `POST /api/newsletter/unsubscribe`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsubscribeRequest {
    pub email: String,
}
