use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row per user. `membership` holds the tier label (`Gold`, `VIP`, ...);
/// NULL means the user never bought anything and is on Standard.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub membership: Option<String>,
    pub membership_period: Option<String>,
    pub created_at: TimeDateTimeWithTimeZone,
    pub updated_at: TimeDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::membership_purchases::Entity")]
    MembershipPurchases,
}

impl Related<super::membership_purchases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MembershipPurchases.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
