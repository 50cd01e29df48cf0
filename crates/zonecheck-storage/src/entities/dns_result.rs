use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "dns_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub dns_check_id: i32,
    pub level: String,
    pub module: String,
    pub tag: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::dns_check::Entity",
        from = "Column::DnsCheckId",
        to = "super::dns_check::Column::Id",
        on_delete = "Cascade"
    )]
    DnsCheck,
}

impl Related<super::dns_check::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DnsCheck.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
