//! Synthetic customer and order generation.
//!
//! All randomness comes from the `Rng` passed in by the caller. Seed it to get reproducible data sets.

use chrono::Local;
use fake::faker::name::en::FirstName;
use fake::faker::name::en::LastName;
use fake::Fake;
use fieldx::fxstruct;
use rand::seq::IndexedRandom;
use rand::Rng;
use sea_orm::prelude::Date;
use strum::VariantArray;
use tracing::debug;
use tracing::instrument;

use crate::model::Customer;
use crate::model::Order;
use crate::reference::Category;
use crate::reference::DEFAULT_CUSTOMERS;
use crate::reference::DEFAULT_ORDERS;
use crate::reference::STATES;
use crate::types::EtlError;
use crate::types::Result;

/// Ids are `i32` in the warehouse, so a count must fit into one.
fn id_range(what: &'static str, count: u32) -> Result<std::ops::RangeInclusive<i32>> {
    let last = i32::try_from(count).map_err(|_| EtlError::CountTooLarge { what, count })?;
    Ok(1..=last)
}

/// Produce `count` customers with ids `1..=count`.
pub fn generate_customers<R: Rng + ?Sized>(rng: &mut R, count: u32) -> Result<Vec<Customer>> {
    let ids = id_range("customers", count)?;

    let mut customers = Vec::with_capacity(count as usize);
    for id in ids {
        let first_name = FirstName().fake_with_rng(rng);
        let last_name = LastName().fake_with_rng(rng);
        let state = *STATES.choose(rng).ok_or_else(|| crate::types::etlerr!("No states defined"))?;

        customers.push(Customer {
            id,
            first_name,
            last_name,
            state,
        });
    }

    Ok(customers)
}

/// Produce `order_count` orders with ids `1..=order_count`, each placed by a customer picked uniformly from
/// `customers`.
pub fn generate_orders<R: Rng + ?Sized>(
    rng: &mut R,
    order_count: u32,
    customers: &[Customer],
    order_date: Date,
) -> Result<Vec<Order>> {
    let ids = id_range("orders", order_count)?;
    if order_count > 0 && customers.is_empty() {
        return Err(EtlError::NoCustomers { order_count });
    }

    let mut orders = Vec::with_capacity(order_count as usize);
    for id in ids {
        let customer = customers.choose(rng).ok_or(EtlError::NoCustomers { order_count })?;
        let category = *Category::VARIANTS
            .choose(rng)
            .ok_or_else(|| crate::types::etlerr!("No categories defined"))?;
        let sub_category = *category
            .sub_categories()
            .choose(rng)
            .ok_or_else(|| crate::types::etlerr!("Category '{category}' has no sub-categories"))?;

        orders.push(Order {
            id,
            customer_id: customer.id,
            category,
            sub_category,
            order_date,
        });
    }

    Ok(orders)
}

/// Holds the parameters of the extract stage.
#[derive(Debug, Clone)]
#[fxstruct(no_new, builder, get(copy))]
pub struct Generator {
    #[fieldx(default(DEFAULT_CUSTOMERS))]
    customers:  u32,
    #[fieldx(default(DEFAULT_ORDERS))]
    orders:     u32,
    /// The date stamped on every order of the run.
    #[fieldx(default(Local::now().date_naive()))]
    order_date: Date,
}

impl Generator {
    /// Generate the customer set and the orders referencing it in one go.
    #[instrument(level = "debug", skip(self, rng), fields(customers = self.customers(), orders = self.orders()))]
    pub fn extract<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(Vec<Customer>, Vec<Order>)> {
        let customers = generate_customers(rng, self.customers())?;
        let orders = generate_orders(rng, self.orders(), &customers, self.order_date())?;
        debug!(
            "Generated {} customers and {} orders dated {}",
            customers.len(),
            orders.len(),
            self.order_date()
        );
        Ok((customers, orders))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::reference::is_valid_state;

    fn date() -> Date {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn customers_have_sequential_ids_and_valid_states() {
        let mut rng = StdRng::seed_from_u64(1);
        for count in [0, 1, 7, 250] {
            let customers = generate_customers(&mut rng, count).unwrap();
            assert_eq!(customers.len(), count as usize);
            let ids: Vec<i32> = customers.iter().map(|c| c.id).collect();
            assert_eq!(ids, (1..=count as i32).collect::<Vec<_>>());
            for customer in &customers {
                assert!(is_valid_state(customer.state), "bad state {}", customer.state);
                assert!(!customer.first_name.is_empty());
                assert!(!customer.last_name.is_empty());
            }
        }
    }

    #[test]
    fn orders_reference_existing_customers() {
        let mut rng = StdRng::seed_from_u64(2);
        let customers = generate_customers(&mut rng, 5).unwrap();
        let orders = generate_orders(&mut rng, 500, &customers, date()).unwrap();

        assert_eq!(orders.len(), 500);
        for (idx, order) in orders.iter().enumerate() {
            assert_eq!(order.id, idx as i32 + 1);
            assert!((1..=5).contains(&order.customer_id));
            assert!(order.category.sub_categories().contains(&order.sub_category));
            assert_eq!(order.order_date, date());
        }

        // With 500 draws over 5 customers every customer should show up.
        let referenced: HashSet<i32> = orders.iter().map(|o| o.customer_id).collect();
        assert_eq!(referenced.len(), 5);
    }

    #[test]
    fn zero_orders_is_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(generate_orders(&mut rng, 0, &[], date()).unwrap().is_empty());
    }

    #[test]
    fn orders_without_customers_fail() {
        let mut rng = StdRng::seed_from_u64(4);
        let err = generate_orders(&mut rng, 3, &[], date()).unwrap_err();
        assert!(matches!(err, EtlError::NoCustomers { order_count: 3 }));
    }

    #[test]
    fn counts_beyond_id_range_are_rejected() {
        let mut rng = StdRng::seed_from_u64(5);
        let too_many = i32::MAX as u32 + 1;

        let err = generate_customers(&mut rng, too_many).unwrap_err();
        assert!(matches!(err, EtlError::CountTooLarge { what: "customers", count } if count == too_many));

        let customers = generate_customers(&mut rng, 1).unwrap();
        let err = generate_orders(&mut rng, u32::MAX, &customers, date()).unwrap_err();
        assert!(matches!(err, EtlError::CountTooLarge { what: "orders", count: u32::MAX }));
    }

    #[test]
    fn same_seed_same_data() {
        let generator = Generator::builder().customers(10).orders(20).order_date(date()).build().unwrap();

        let (c1, o1) = generator.extract(&mut StdRng::seed_from_u64(42)).unwrap();
        let (c2, o2) = generator.extract(&mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(c1, c2);
        assert_eq!(o1, o2);

        let (c3, _) = generator.extract(&mut StdRng::seed_from_u64(43)).unwrap();
        assert_ne!(c1, c3);
    }

    #[test]
    fn builder_defaults() {
        let generator = Generator::builder().build().unwrap();
        assert_eq!(generator.customers(), DEFAULT_CUSTOMERS);
        assert_eq!(generator.orders(), DEFAULT_ORDERS);
    }
}
