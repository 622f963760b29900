use super::repository::{self, Review, TargetType};
use crate::{
    modules::{delivery_person, menu_item, restaurant},
    types::Context,
};
use bigdecimal::BigDecimal;
use std::{str::FromStr, sync::Arc};

/// Arithmetic mean rounded to two decimal places, zero when nothing was rated.
pub fn aggregate_rating(ratings: &[BigDecimal]) -> BigDecimal {
    if ratings.is_empty() {
        return BigDecimal::from(0);
    }

    let sum = ratings
        .iter()
        .fold(BigDecimal::from(0), |sum, rating| sum + rating);

    (sum / BigDecimal::from(ratings.len() as u64)).round(2)
}

pub fn to_rating(raw: f64) -> Option<BigDecimal> {
    BigDecimal::from_str(&raw.to_string())
        .ok()
        .map(|rating| rating.round(2))
}

#[derive(Debug)]
pub enum Error {
    TargetNotFound,
    InvalidRating,
    UnexpectedError,
}

pub struct RatePayload {
    pub user_id: String,
    pub target_type: TargetType,
    pub target_id: String,
    pub rating: f64,
    pub comment: Option<String>,
}

async fn target_exists(ctx: Arc<Context>, target_type: TargetType, id: String) -> Result<bool, Error> {
    let pool = &ctx.db_conn.pool;

    match target_type {
        TargetType::Restaurant => restaurant::repository::find_by_id(pool, id)
            .await
            .map(|found| found.is_some())
            .map_err(|_| Error::UnexpectedError),
        TargetType::MenuItem => menu_item::repository::find_by_id(pool, id)
            .await
            .map(|found| found.is_some())
            .map_err(|_| Error::UnexpectedError),
        TargetType::DeliveryPerson => delivery_person::repository::find_by_id(pool, id)
            .await
            .map(|found| found.is_some())
            .map_err(|_| Error::UnexpectedError),
    }
}

/// Stores the user's review of the target, replacing any earlier one, and
/// refreshes the target's aggregate rating in the same transaction.
pub async fn rate(ctx: Arc<Context>, payload: RatePayload) -> Result<(Review, BigDecimal), Error> {
    let rating = to_rating(payload.rating).ok_or(Error::InvalidRating)?;

    if !target_exists(ctx.clone(), payload.target_type, payload.target_id.clone()).await? {
        return Err(Error::TargetNotFound);
    }

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        Error::UnexpectedError
    })?;

    let review = repository::upsert(
        &mut *tx,
        repository::UpsertReviewPayload {
            user_id: payload.user_id,
            target_type: payload.target_type,
            target_id: payload.target_id.clone(),
            rating,
            comment: payload.comment,
        },
    )
    .await
    .map_err(|_| Error::UnexpectedError)?;

    let ratings = repository::find_ratings_by_target(
        &mut *tx,
        payload.target_type,
        payload.target_id.clone(),
    )
    .await
    .map_err(|_| Error::UnexpectedError)?;

    let aggregate = aggregate_rating(&ratings);

    match payload.target_type {
        TargetType::Restaurant => {
            restaurant::repository::set_rating(&mut *tx, payload.target_id, aggregate.clone())
                .await
                .map_err(|_| Error::UnexpectedError)?
        }
        TargetType::MenuItem => {
            menu_item::repository::set_rating(&mut *tx, payload.target_id, aggregate.clone())
                .await
                .map_err(|_| Error::UnexpectedError)?
        }
        TargetType::DeliveryPerson => {
            delivery_person::repository::set_rating(
                &mut *tx,
                payload.target_id,
                aggregate.clone(),
            )
            .await
            .map_err(|_| Error::UnexpectedError)?
        }
    };

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        Error::UnexpectedError
    })?;

    Ok((review, aggregate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(raw: &[&str]) -> Vec<BigDecimal> {
        raw.iter()
            .map(|rating| BigDecimal::from_str(rating).unwrap())
            .collect()
    }

    #[test]
    fn mean_is_rounded_to_two_places() {
        assert_eq!(
            aggregate_rating(&ratings(&["5", "4", "4"])),
            BigDecimal::from_str("4.33").unwrap()
        );
        assert_eq!(
            aggregate_rating(&ratings(&["5", "5", "4"])),
            BigDecimal::from_str("4.67").unwrap()
        );
        assert_eq!(
            aggregate_rating(&ratings(&["5", "4"])),
            BigDecimal::from_str("4.5").unwrap()
        );
    }

    #[test]
    fn no_reviews_means_zero() {
        assert_eq!(aggregate_rating(&[]), BigDecimal::from(0));
    }

    #[test]
    fn single_review_is_the_rating() {
        assert_eq!(
            aggregate_rating(&ratings(&["3.5"])),
            BigDecimal::from_str("3.5").unwrap()
        );
    }

    #[test]
    fn raw_ratings_convert_exactly() {
        assert_eq!(to_rating(4.0), Some(BigDecimal::from(4)));
        assert_eq!(
            to_rating(4.5),
            Some(BigDecimal::from_str("4.5").unwrap())
        );
        assert_eq!(
            to_rating(3.333),
            Some(BigDecimal::from_str("3.33").unwrap())
        );
    }
}
