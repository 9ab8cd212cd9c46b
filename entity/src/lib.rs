pub mod prelude;

pub mod membership_purchases;
pub mod profiles;
