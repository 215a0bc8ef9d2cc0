use crate::{ReadError, TrendBasis, UpdateError, WeightUnit};

#[allow(async_fn_in_trait)]
pub trait PreferencesService: Send + Sync + 'static {
    async fn get_preferences(&self) -> Result<Preferences, ReadError>;
    async fn set_preferences(&self, preferences: Preferences) -> Result<(), UpdateError>;
}

#[allow(async_fn_in_trait)]
pub trait PreferencesRepository: Send + Sync + 'static {
    async fn read_preferences(&self) -> Result<Preferences, ReadError>;
    async fn write_preferences(&self, preferences: Preferences) -> Result<(), UpdateError>;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub weight_unit: WeightUnit,
    pub trend_basis: TrendBasis,
}
