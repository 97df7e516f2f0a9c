use crate::{
    config::Config,
    db::{self, establish_connection},
    error::{HomesError, NO_RECOMMENDATION},
    models::home::{Home, NewHome},
    pricing,
};

pub const DEFAULT_LIST_LIMIT: u32 = 100;
pub const DEFAULT_RECOMMENDATION_LIMIT: u32 = 20;

pub fn create(config: &Config, new_home: &NewHome) -> Result<Home, HomesError> {
    let mut conn = establish_connection(config)?;
    Ok(db::home::insert(&mut conn, new_home)?)
}

pub fn list(config: &Config, skip: u32, limit: u32) -> Result<Vec<Home>, HomesError> {
    let mut conn = establish_connection(config)?;
    Ok(db::home::list(&mut conn, skip.into(), limit.into())?)
}

/// Homes whose `medv` is nearest to the dirham `price`. An empty result is
/// reported as [`HomesError::NotFound`].
pub fn recommend(config: &Config, price: f64, limit: u32) -> Result<Vec<Home>, HomesError> {
    let target = pricing::to_medv(price, config.dirham_rate());
    let mut conn = establish_connection(config)?;
    let homes = db::home::nearest_by_medv(&mut conn, target, limit.into())?;

    if homes.is_empty() {
        return Err(HomesError::NotFound(NO_RECOMMENDATION));
    }
    Ok(homes)
}
