use anyhow::Result;
use fake::{
    Fake,
    faker::{
        address::en::{CityName, StateAbbr},
        name::en::Name,
    },
};
use rand::Rng;

use crate::{
    config::GeneratorConfig,
    model::{ActivityStatus, Customer, Segment},
    sampling::{self, WeightedChoice},
};

pub const COUNTRY: &str = "USA";

const SEGMENT_WEIGHTS: &[(Segment, f64)] = &[
    (Segment::Retail, 0.65),
    (Segment::Corporate, 0.25),
    (Segment::Wholesale, 0.10),
];

const STATUS_WEIGHTS: &[(ActivityStatus, f64)] = &[
    (ActivityStatus::Active, 0.9),
    (ActivityStatus::Inactive, 0.1),
];

/// Builds the CRM table: `config.customers` unique records followed by
/// verbatim copies of `defects.duplicate_customers` of them.
pub fn build_customers<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Vec<Customer>> {
    let segments = WeightedChoice::new(SEGMENT_WEIGHTS)?;
    let statuses = WeightedChoice::new(STATUS_WEIGHTS)?;

    let mut customers = Vec::with_capacity(config.customers + config.defects.duplicate_customers);
    for idx in 0..config.customers {
        customers.push(Customer {
            id: customer_id(idx + 1),
            full_name: Name().fake_with_rng(rng),
            segment: segments.sample(rng),
            city: CityName().fake_with_rng(rng),
            state: StateAbbr().fake_with_rng(rng),
            country: COUNTRY.to_string(),
            status: statuses.sample(rng),
        });
    }

    let copies = sampling::pick_subset(rng, customers.len(), config.defects.duplicate_customers)
        .into_iter()
        .map(|idx| customers[idx].clone())
        .collect::<Vec<_>>();
    customers.extend(copies);
    Ok(customers)
}

pub fn customer_id(position: usize) -> String {
    format!("C{position:05}")
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn duplicates_are_appended_verbatim() {
        let config = GeneratorConfig::default();
        let mut rng = sampling::seeded_rng(config.seed);
        let customers = build_customers(&config, &mut rng).expect("customers");
        assert_eq!(customers.len(), 825);
        assert_eq!(customers[0].id, "C00001");
        assert_eq!(customers[799].id, "C00800");

        let (base, copies) = customers.split_at(config.customers);
        for copy in copies {
            let original = base.iter().find(|c| c.id == copy.id).expect("original exists");
            assert_eq!(original, copy);
        }
        let repeated = customers
            .iter()
            .map(|c| c.id.as_str())
            .counts()
            .into_values()
            .filter(|n| *n > 1)
            .count();
        assert_eq!(repeated, config.defects.duplicate_customers);
    }

    #[test]
    fn every_customer_is_domestic_with_a_name() {
        let config = GeneratorConfig {
            customers: 50,
            ..Default::default()
        };
        let mut rng = sampling::seeded_rng(9);
        let customers = build_customers(&config, &mut rng).expect("customers");
        assert!(customers.iter().all(|c| c.country == "USA"));
        assert!(customers.iter().all(|c| !c.full_name.is_empty()));
        assert!(customers.iter().all(|c| c.state.len() == 2));
    }
}
