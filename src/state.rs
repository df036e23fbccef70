use sqlx::PgPool;

use crate::config::codec::CodecConfig;
use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub codec_config: CodecConfig,
    pub cors_config: CorsConfig,
}

pub async fn init_app_state() -> AppState {
    AppState {
        db: init_db_pool().await,
        codec_config: CodecConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    }
}
