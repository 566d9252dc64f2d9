use crate::core::catalog::Catalog;
use crate::core::Category;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

pub const DEFAULT_CATALOG_SIZE: usize = 100;

pub const MIN_PRODUCT_COUNT: u32 = 10;
pub const MAX_PRODUCT_COUNT: u32 = 1000;

const ONE_YEAR_SECS: i64 = 365 * 24 * 60 * 60;

/// 商品部門名稱，重複時加上數字後綴
pub const DEPARTMENTS: [&str; 22] = [
    "Automotive",
    "Baby",
    "Beauty",
    "Books",
    "Clothing",
    "Computers",
    "Electronics",
    "Games",
    "Garden",
    "Grocery",
    "Health",
    "Home",
    "Industrial",
    "Jewelery",
    "Kids",
    "Movies",
    "Music",
    "Outdoors",
    "Shoes",
    "Sports",
    "Tools",
    "Toys",
];

pub struct FixtureGenerator {
    size: usize,
    rng: StdRng,
}

impl FixtureGenerator {
    pub fn new(size: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self { size, rng }
    }

    pub fn generate(self) -> Catalog {
        self.generate_at(Utc::now())
    }

    /// Timestamps fall within the year before `now`.
    pub fn generate_at(mut self, now: DateTime<Utc>) -> Catalog {
        let mut names = NameAllocator::default();
        let mut categories = Vec::with_capacity(self.size);

        while categories.len() < self.size {
            let base = DEPARTMENTS[self.rng.gen_range(0..DEPARTMENTS.len())];
            let name = names.allocate(base);

            let id = uuid::Builder::from_random_bytes(self.rng.gen()).into_uuid();
            let age = Duration::seconds(self.rng.gen_range(1..=ONE_YEAR_SECS));

            categories.push(Category {
                id: id.to_string(),
                name,
                product_count: self.rng.gen_range(MIN_PRODUCT_COUNT..=MAX_PRODUCT_COUNT),
                created_at: now - age,
            });
        }

        tracing::debug!("Generated {} fixture categories", categories.len());

        // 名稱已保證唯一
        Catalog::from_categories(categories).unwrap_or_default()
    }
}

/// 記錄每個部門下一個可用的後綴；部門名稱本身不含數字後綴，不會互相衝突
#[derive(Debug, Default)]
struct NameAllocator {
    next_suffix: HashMap<&'static str, u32>,
}

impl NameAllocator {
    fn allocate(&mut self, base: &'static str) -> String {
        let suffix = self.next_suffix.entry(base).or_insert(0);
        let name = match *suffix {
            0 => base.to_string(),
            n => format!("{} {}", base, n),
        };
        *suffix += 1;
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_generates_requested_size_with_unique_names() {
        let catalog = FixtureGenerator::new(DEFAULT_CATALOG_SIZE, Some(7)).generate_at(fixed_now());

        assert_eq!(catalog.len(), 100);
        let names: HashSet<&str> = catalog.items().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names.len(), 100);

        let ids: HashSet<&str> = catalog.items().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_fields_within_bounds() {
        let now = fixed_now();
        let catalog = FixtureGenerator::new(50, Some(42)).generate_at(now);

        for category in catalog.items() {
            assert!((MIN_PRODUCT_COUNT..=MAX_PRODUCT_COUNT).contains(&category.product_count));
            assert!(category.created_at < now);
            assert!(category.created_at >= now - Duration::seconds(ONE_YEAR_SECS));
            assert!(uuid::Uuid::parse_str(&category.id).is_ok());
        }
    }

    #[test]
    fn test_output_is_sorted() {
        let catalog = FixtureGenerator::new(100, Some(3)).generate_at(fixed_now());
        let items = catalog.items();

        for pair in items.windows(2) {
            assert_ne!(
                crate::core::catalog::compare_names(&pair[0].name, &pair[1].name),
                std::cmp::Ordering::Greater
            );
        }
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = FixtureGenerator::new(30, Some(99)).generate_at(fixed_now());
        let b = FixtureGenerator::new(30, Some(99)).generate_at(fixed_now());

        assert_eq!(a.items(), b.items());
    }

    #[test]
    fn test_repeated_department_gets_next_suffix() {
        let mut names = NameAllocator::default();

        assert_eq!(names.allocate("Books"), "Books");
        assert_eq!(names.allocate("Books"), "Books 1");
        assert_eq!(names.allocate("Toys"), "Toys");
        assert_eq!(names.allocate("Books"), "Books 2");
    }

    #[test]
    fn test_large_catalog_keeps_names_unique() {
        let size = 50_000;
        let started = std::time::Instant::now();
        let catalog = FixtureGenerator::new(size, Some(1)).generate_at(fixed_now());

        assert_eq!(catalog.len(), size);
        let names: HashSet<&str> = catalog.items().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names.len(), size);
        assert!(started.elapsed() < std::time::Duration::from_secs(30));
    }

    #[test]
    fn test_zero_size_yields_empty_catalog() {
        let catalog = FixtureGenerator::new(0, None).generate();
        assert!(catalog.is_empty());
    }
}
