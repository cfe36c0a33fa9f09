use crate::model::review::RatingCount;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use utoipa::ToSchema;

/// Arithmetic mean rounded half away from zero to one decimal place.
/// No ratings yields zero.
pub fn average_rating(ratings: &[i32]) -> Decimal {
    if ratings.is_empty() {
        return Decimal::ZERO;
    }

    let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
    let mean = Decimal::from(sum) / Decimal::from(ratings.len() as i64);
    mean.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct RatingDistribution {
    #[serde(rename = "5")]
    pub five: i64,
    #[serde(rename = "4")]
    pub four: i64,
    #[serde(rename = "3")]
    pub three: i64,
    #[serde(rename = "2")]
    pub two: i64,
    #[serde(rename = "1")]
    pub one: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RatingStats {
    pub average: Decimal,
    pub count: i64,
    pub distribution: RatingDistribution,
}

impl RatingStats {
    pub fn from_counts(counts: &[RatingCount]) -> Self {
        let mut distribution = RatingDistribution::default();
        let mut total: i64 = 0;
        let mut weighted: i64 = 0;

        for c in counts {
            let slot = match c.rating {
                5 => &mut distribution.five,
                4 => &mut distribution.four,
                3 => &mut distribution.three,
                2 => &mut distribution.two,
                1 => &mut distribution.one,
                _ => continue,
            };
            *slot += c.count;
            total += c.count;
            weighted += i64::from(c.rating) * c.count;
        }

        let average = if total == 0 {
            Decimal::ZERO
        } else {
            (Decimal::from(weighted) / Decimal::from(total))
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        };

        Self {
            average,
            count: total,
            distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn mean_is_rounded_to_one_decimal() {
        assert_eq!(average_rating(&[5, 4, 4, 4]), dec!(4.3));
        assert_eq!(average_rating(&[5, 4]), dec!(4.5));
        assert_eq!(average_rating(&[1, 2, 2]), dec!(1.7));
    }

    #[test]
    fn no_ratings_is_zero() {
        assert_eq!(average_rating(&[]), Decimal::ZERO);
    }

    #[test]
    fn stats_fill_distribution() {
        let stats = RatingStats::from_counts(&[
            RatingCount { rating: 5, count: 3 },
            RatingCount { rating: 2, count: 1 },
        ]);

        assert_eq!(stats.count, 4);
        assert_eq!(stats.average, dec!(4.3));
        assert_eq!(stats.distribution.five, 3);
        assert_eq!(stats.distribution.two, 1);
        assert_eq!(stats.distribution.one, 0);
    }
}
