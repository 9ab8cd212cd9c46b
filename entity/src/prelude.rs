pub use super::membership_purchases::Entity as MembershipPurchases;
pub use super::profiles::Entity as Profiles;
