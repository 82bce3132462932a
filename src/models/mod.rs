pub mod account;
pub mod asset;
pub mod booking;
pub mod event;
pub mod invitation_template;
pub mod partner;
pub mod payment;
pub mod service;
pub mod subscription;
pub mod vendor_profile;

pub use account::Account;
pub use asset::EditorAsset;
pub use booking::Booking;
pub use event::{Event, EventTask, EventVendor, SubEvent};
pub use invitation_template::InvitationTemplate;
pub use partner::PartnerApplication;
pub use payment::Payment;
pub use service::{Service, ServiceFeedback};
pub use subscription::{Subscription, SubscriptionPlan};
pub use vendor_profile::VendorProfile;
