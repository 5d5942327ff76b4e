/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize` with upper-case field names mapped
/// from lower-case struct fields (`database_url` ← `DATABASE_URL`) and call
/// `Config::from_env()` once at startup.
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Load from an explicit iterator of `(KEY, value)` pairs instead of the
    /// process environment.
    fn from_iter<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }
}
