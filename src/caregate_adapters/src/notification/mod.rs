pub mod mock_notification_gateway;
pub mod postmark_notification_gateway;
