//! Entity Module

pub mod ad_slot;
pub mod analytics;
pub mod category;
pub mod question;
pub mod rewarded_config;
pub mod script;
pub mod site_config;
