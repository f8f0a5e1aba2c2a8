use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub is_male: bool,
    pub year_of_birth: i32,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub member_type_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::member_type::Entity",
        from = "Column::MemberTypeId",
        to = "super::member_type::Column::Id",
        on_delete = "Restrict"
    )]
    MemberType,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::member_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MemberType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
