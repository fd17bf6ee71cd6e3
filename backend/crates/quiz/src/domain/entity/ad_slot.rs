//! Ad Slot Entity

use chrono::{DateTime, Utc};
use kernel::id::AdSlotId;

/// Ad slot registration
#[derive(Debug, Clone)]
pub struct AdSlot {
    pub ad_slot_id: AdSlotId,
    pub name: String,
    pub ad_unit_id: String,
    pub ad_code: String,
    /// "header", "footer", "sidebar", "between-questions", ...
    pub placement: String,
    /// "adsense", "adx", "prebid"
    pub ad_type: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdSlot {
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
