use std::sync::Arc;

use super::{config::Config, database::init_redis, email::Mailer, pending::PendingStore};

pub struct AppState {
    pub config: Config,
    pub store: PendingStore,
    pub mailer: Mailer,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let redis_connection = init_redis(&config.redis_url).await;
        let store = PendingStore::new(redis_connection);
        let mailer = Mailer::new(&config.mail);

        Arc::new(Self {
            config,
            store,
            mailer,
        })
    }
}
