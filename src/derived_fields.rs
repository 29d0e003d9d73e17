/// Synthetic storefront fields seeded only by a product's global position.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedFields {
    pub rating: f64,
    pub reviews_count: u32,
    pub is_best_seller: bool,
}

impl DerivedFields {
    pub fn for_position(position: u32) -> Self {
        Self {
            rating: Self::rating(position),
            reviews_count: Self::reviews_count(position),
            is_best_seller: Self::is_best_seller(position),
        }
    }

    // Tenths are summed as integers so the value is the nearest f64 to `4.x`.
    fn rating(position: u32) -> f64 {
        f64::from(40 + position % 10) / 10.0
    }

    const fn reviews_count(position: u32) -> u32 {
        position % 500 + 50
    }

    const fn is_best_seller(position: u32) -> bool {
        position % 7 == 0
    }

    pub fn badges(&self, bestseller_badge: &str) -> Vec<String> {
        if self.is_best_seller {
            vec![bestseller_badge.to_string()]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_position() {
        let fields = DerivedFields::for_position(1);
        assert_eq!(fields.rating, 4.1);
        assert_eq!(fields.reviews_count, 51);
        assert!(!fields.is_best_seller);
        assert!(fields.badges("Bestseller").is_empty());
    }

    #[test]
    fn seventh_position_is_a_bestseller() {
        let fields = DerivedFields::for_position(7);
        assert!(fields.is_best_seller);
        assert_eq!(fields.badges("Bestseller"), vec!["Bestseller".to_string()]);
    }

    #[test]
    fn wraps_at_modulus_boundaries() {
        assert_eq!(DerivedFields::for_position(10).rating, 4.0);
        assert_eq!(DerivedFields::for_position(19).rating, 4.9);
        assert_eq!(DerivedFields::for_position(500).reviews_count, 50);
        assert_eq!(DerivedFields::for_position(499).reviews_count, 549);
    }

    #[test]
    fn ranges_hold_for_many_positions() {
        for position in 1..=9999 {
            let fields = DerivedFields::for_position(position);

            assert!((4.0..=4.9).contains(&fields.rating), "rating out of range at {position}");
            let rendered = serde_json::to_string(&fields.rating).unwrap();
            assert_eq!(rendered.len(), 3, "rating {rendered} at {position} is not one decimal");

            assert!((50..=549).contains(&fields.reviews_count));
            assert_eq!(fields.is_best_seller, position % 7 == 0);
            assert_eq!(fields.badges("Bestseller").len(), usize::from(fields.is_best_seller));
        }
    }
}
