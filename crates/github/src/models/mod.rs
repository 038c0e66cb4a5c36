//! Response models for the notifications API

mod notification;
mod subscription;
mod thread;

pub use notification::{Notification, Owner, Repository, Subject};
pub use subscription::{Subscription, SubscriptionStatus};
pub use thread::ThreadId;
