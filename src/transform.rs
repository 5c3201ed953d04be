//! The join stage: enrich every order with the attributes of its customer.

use std::collections::HashMap;

use tracing::debug;
use tracing::instrument;

use crate::db::entity::FlatOrderRecord;
use crate::model::Customer;
use crate::model::Order;
use crate::types::EtlError;
use crate::types::Result;

/// Produce one flat record per order, preserving the order sequence.
///
/// Fails with [`EtlError::Lookup`] on the first order whose customer is not in `customers`.
#[instrument(level = "debug", skip_all, fields(customers = customers.len(), orders = orders.len()))]
pub fn transform(customers: &[Customer], orders: &[Order]) -> Result<Vec<FlatOrderRecord>> {
    let by_id: HashMap<i32, &Customer> = customers.iter().map(|c| (c.id, c)).collect();

    let flat = orders
        .iter()
        .map(|order| {
            by_id
                .get(&order.customer_id)
                .map(|customer| FlatOrderRecord::from_parts(order, customer))
                .ok_or(EtlError::Lookup {
                    order_id:    order.id,
                    customer_id: order.customer_id,
                })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Joined {} flat records", flat.len());

    Ok(flat)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::generator::Generator;
    use crate::reference::Category;

    fn customer(id: i32, first: &str, last: &str, state: &'static str) -> Customer {
        Customer {
            id,
            first_name: first.into(),
            last_name: last.into(),
            state,
        }
    }

    fn order(id: i32, customer_id: i32) -> Order {
        Order {
            id,
            customer_id,
            category: Category::Books,
            sub_category: "comics",
            order_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        }
    }

    #[test]
    fn joins_customer_fields() {
        let customers = vec![customer(1, "Ada", "Lovelace", "NY"), customer(2, "Alan", "Turing", "CA")];
        let orders = vec![order(10, 2), order(11, 1), order(12, 2)];

        let flat = transform(&customers, &orders).unwrap();

        assert_eq!(flat.len(), 3);
        assert_eq!(flat.iter().map(|r| r.order_id).collect::<Vec<_>>(), vec![10, 11, 12]);
        assert_eq!(
            flat[0],
            FlatOrderRecord {
                order_id:     10,
                customer_id:  2,
                first_name:   "Alan".into(),
                last_name:    "Turing".into(),
                state:        "CA".into(),
                category:     "books".into(),
                sub_category: "comics".into(),
                order_date:   NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            }
        );
        assert_eq!(flat[1].first_name, "Ada");
        assert_eq!(flat[1].state, "NY");
    }

    #[test]
    fn missing_customer_is_a_lookup_error() {
        let customers = vec![customer(1, "Ada", "Lovelace", "NY")];
        let orders = vec![order(1, 2)];

        let err = transform(&customers, &orders).unwrap_err();
        assert!(matches!(
            err,
            EtlError::Lookup {
                order_id:    1,
                customer_id: 2,
            }
        ));
    }

    #[test]
    fn empty_orders() {
        assert!(transform(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn generated_data_joins_cleanly() {
        let generator = Generator::builder().customers(3).orders(5).build().unwrap();
        let (customers, orders) = generator.extract(&mut StdRng::seed_from_u64(7)).unwrap();

        let flat = transform(&customers, &orders).unwrap();

        assert_eq!(flat.len(), orders.len());
        for (record, order) in flat.iter().zip(&orders) {
            let customer = &customers[(order.customer_id - 1) as usize];
            assert_eq!(record.order_id, order.id);
            assert_eq!(record.first_name, customer.first_name);
            assert_eq!(record.last_name, customer.last_name);
            assert_eq!(record.state, customer.state);
            assert_eq!(record.category, order.category.as_str());
            assert_eq!(record.sub_category, order.sub_category);
        }
    }
}
