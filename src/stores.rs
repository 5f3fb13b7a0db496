use log::debug;
use rand::Rng;

use crate::{
    config::GeneratorConfig,
    model::{ActivityStatus, Region, Store},
    sampling,
};

pub struct RosterEntry {
    pub name: &'static str,
    pub city: &'static str,
    pub state: &'static str,
    pub region: Region,
}

const fn entry(
    name: &'static str,
    city: &'static str,
    state: &'static str,
    region: Region,
) -> RosterEntry {
    RosterEntry {
        name,
        city,
        state,
        region,
    }
}

/// Store locations in ID order. Geography is deliberately uneven.
pub const ROSTER: &[RosterEntry] = &[
    entry("NYC Downtown", "New York", "NY", Region::Northeast),
    entry("Brooklyn Hub", "New York", "NY", Region::Northeast),
    entry("Los Angeles Central", "Los Angeles", "CA", Region::West),
    entry("San Jose Tech Park", "San Jose", "CA", Region::West),
    entry("Chicago Loop", "Chicago", "IL", Region::Midwest),
    entry("Houston Galleria", "Houston", "TX", Region::South),
    entry("Dallas Uptown", "Dallas", "TX", Region::South),
    entry("Austin Central", "Austin", "TX", Region::South),
    entry("Miami Beach", "Miami", "FL", Region::South),
    entry("Atlanta Midtown", "Atlanta", "GA", Region::South),
    entry("Seattle Downtown", "Seattle", "WA", Region::West),
    entry("Boston Harbor", "Boston", "MA", Region::Northeast),
    entry("Philadelphia Center", "Philadelphia", "PA", Region::Northeast),
    entry("Detroit Central", "Detroit", "MI", Region::Midwest),
    entry("Cleveland Market", "Cleveland", "OH", Region::Midwest),
    entry("Newark Plaza", "Newark", "NJ", Region::Northeast),
    entry("St. Louis Downtown", "St. Louis", "MO", Region::Midwest),
    entry("Kansas City Plaza", "Kansas City", "MO", Region::Midwest),
    entry("Phoenix Metro", "Phoenix", "AZ", Region::West),
    entry("Denver Central", "Denver", "CO", Region::Midwest),
    entry("Portland Pearl", "Portland", "OR", Region::West),
    entry("San Diego Plaza", "San Diego", "CA", Region::West),
    entry("Las Vegas Strip", "Las Vegas", "NV", Region::West),
    entry("Orlando Outlet", "Orlando", "FL", Region::South),
    entry("Minneapolis Hub", "Minneapolis", "MN", Region::Midwest),
];

pub fn build_stores<R: Rng + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> Vec<Store> {
    ROSTER
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let status = if contains_city(&config.inactive_cities, entry.city) {
                ActivityStatus::Inactive
            } else {
                ActivityStatus::Active
            };
            Store {
                id: store_id(idx + 1),
                name: entry.name.to_string(),
                city: entry.city.to_string(),
                state: entry.state.to_string(),
                region: entry.region,
                status,
                open_date: sampling::uniform_date(
                    rng,
                    config.store_open_start,
                    config.store_open_end,
                ),
            }
        })
        .collect()
}

/// IDs of the stores located in one of the configured top cities.
pub fn top_store_ids(stores: &[Store], config: &GeneratorConfig) -> Vec<String> {
    let ids = stores
        .iter()
        .filter(|store| contains_city(&config.top_cities, &store.city))
        .map(|store| store.id.clone())
        .collect::<Vec<_>>();
    debug!("Top stores: {ids:?}");
    ids
}

pub fn store_id(position: usize) -> String {
    format!("S{position:03}")
}

fn contains_city(cities: &[String], city: &str) -> bool {
    cities.iter().any(|c| c == city)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stores() -> (GeneratorConfig, Vec<Store>) {
        let config = GeneratorConfig::default();
        let mut rng = sampling::seeded_rng(config.seed);
        let stores = build_stores(&config, &mut rng);
        (config, stores)
    }

    #[test]
    fn ids_follow_roster_order() {
        let (_, stores) = stores();
        assert_eq!(stores.len(), 25);
        assert_eq!(stores[0].id, "S001");
        assert_eq!(stores[0].name, "NYC Downtown");
        assert_eq!(stores[24].id, "S025");
        assert_eq!(stores[24].city, "Minneapolis");
    }

    #[test]
    fn detroit_cleveland_newark_are_inactive() {
        let (_, stores) = stores();
        let inactive = stores
            .iter()
            .filter(|s| !s.is_active())
            .map(|s| s.city.as_str())
            .collect::<Vec<_>>();
        assert_eq!(inactive, ["Detroit", "Cleveland", "Newark"]);
    }

    #[test]
    fn top_stores_cover_dominant_cities() {
        let (config, stores) = stores();
        let top = top_store_ids(&stores, &config);
        assert_eq!(top, ["S001", "S002", "S003", "S004", "S005", "S006"]);
    }

    #[test]
    fn open_dates_fall_in_configured_window() {
        let (config, stores) = stores();
        assert!(stores.iter().all(|s| {
            s.open_date >= config.store_open_start && s.open_date <= config.store_open_end
        }));
    }
}
