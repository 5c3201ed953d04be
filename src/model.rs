//! In-memory records produced by the generator. They live only for the duration of a run.

use sea_orm::prelude::Date;

use crate::reference::Category;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Customer {
    pub id:         i32,
    pub first_name: String,
    pub last_name:  String,
    pub state:      &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub id:           i32,
    pub customer_id:  i32,
    pub category:     Category,
    pub sub_category: &'static str,
    pub order_date:   Date,
}
