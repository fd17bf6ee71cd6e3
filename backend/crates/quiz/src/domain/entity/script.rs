//! Script Injection Entity

use chrono::{DateTime, Utc};
use kernel::id::ScriptId;

/// Script injected into the site head or footer
#[derive(Debug, Clone)]
pub struct ScriptInjection {
    pub script_id: ScriptId,
    pub name: String,
    pub script_code: String,
    /// "header" or "footer"
    pub placement: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScriptInjection {
    pub fn new(name: String, script_code: String, placement: String, is_active: bool) -> Self {
        let now = Utc::now();
        Self {
            script_id: ScriptId::new(),
            name,
            script_code,
            placement,
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
