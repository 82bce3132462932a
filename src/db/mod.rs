pub mod accounts;
pub mod assets;
pub mod bookings;
pub mod events;
pub mod invitations;
pub mod partners;
pub mod payments;
pub mod services;
pub mod subscriptions;
pub mod vendor_profiles;
