pub mod gift_service;
pub mod notification_service;
pub mod profile_service;
pub mod referrer_service;
