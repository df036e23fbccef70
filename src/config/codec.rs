use std::env;

/// Secret key for the credential codec.
///
/// The key is never embedded in source; it is injected at process start
/// through `CREDENTIAL_SECRET_KEY`. Deployments that must read tokens
/// written by the legacy system have to configure the legacy key string
/// here, since the XOR keystream only reverses under the identical key.
#[derive(Clone, Debug)]
pub struct CodecConfig {
    pub secret_key: String,
}

impl CodecConfig {
    /// # Panics
    ///
    /// Panics when `CREDENTIAL_SECRET_KEY` is unset or empty. An empty
    /// key would make the XOR keystream a no-op.
    pub fn from_env() -> Self {
        let secret_key =
            env::var("CREDENTIAL_SECRET_KEY").expect("CREDENTIAL_SECRET_KEY must be set");
        assert!(
            !secret_key.is_empty(),
            "CREDENTIAL_SECRET_KEY must not be empty"
        );

        Self { secret_key }
    }
}
