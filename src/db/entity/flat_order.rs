use sea_orm::entity::prelude::*;
use serde::Deserialize;
use serde::Serialize;

use crate::model::Customer;
use crate::model::Order;

/// A denormalized order row: the order joined with the customer who placed it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "app", table_name = "flat_orders")]
#[serde(deny_unknown_fields)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub order_id:     i32,
    pub customer_id:  i32,
    pub first_name:   String,
    pub last_name:    String,
    pub state:        String,
    pub category:     String,
    pub sub_category: String,
    pub order_date:   Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn from_parts(order: &Order, customer: &Customer) -> Self {
        Self {
            order_id:     order.id,
            customer_id:  order.customer_id,
            first_name:   customer.first_name.clone(),
            last_name:    customer.last_name.clone(),
            state:        customer.state.to_string(),
            category:     order.category.to_string(),
            sub_category: order.sub_category.to_string(),
            order_date:   order.order_date,
        }
    }
}

/// Every column except the primary key. These are overwritten when an upsert hits an existing `order_id`.
pub fn update_columns() -> [Column; 7] {
    [
        Column::CustomerId,
        Column::FirstName,
        Column::LastName,
        Column::State,
        Column::Category,
        Column::SubCategory,
        Column::OrderDate,
    ]
}
