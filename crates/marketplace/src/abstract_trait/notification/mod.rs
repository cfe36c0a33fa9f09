mod repository;
mod service;
mod sink;

pub use self::repository::{DynNotificationStore, NotificationStoreTrait};
pub use self::service::{DynNotificationService, NotificationServiceTrait};
pub use self::sink::{DynNotificationSink, NotificationSinkTrait, notify_all};
