pub mod serve;

// re-export
pub use serve::serve;

use std::{net::SocketAddr, sync::Arc};

use derive_more::Deref;
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    analytics::FathomTracker, config::AppConfig, newsletter::NewsletterClient,
    podcast::PodcastFeed, templ_manager::TemplateManager, Result,
};

// ###################################
// ->  Structs
// ###################################
pub struct App {
    pub app_state: AppState,
    pub listener: TcpListener,
}
impl App {
    pub fn new(app_state: AppState, listener: TcpListener) -> Self {
        App {
            app_state,
            listener,
        }
    }

    pub async fn build_from_config(config: AppConfig) -> Result<Self> {
        let tm = TemplateManager::init();
        let newsletter_client = NewsletterClient::new(
            &config.newsletter_config.base_url,
            config.newsletter_config.timeout(),
        )?;
        let goal_tracker =
            FathomTracker::new(&config.analytics_config, config.net_config.hostname())?;
        let podcast_feed = PodcastFeed::new(
            &config.podcast_config.feed_url,
            config.podcast_config.timeout(),
        )?;

        let app_state = AppState::new(
            tm,
            newsletter_client,
            goal_tracker,
            config.analytics_config.goal_id,
            podcast_feed,
        );

        let addr = SocketAddr::from((config.net_config.host, config.net_config.app_port));
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        info!("{:<20} - {}", "Listening on:", addr);

        let app = App::new(app_state, listener);
        Ok(app)
    }
}

pub struct InternalState {
    pub templ_mgr: TemplateManager,
    pub newsletter_client: NewsletterClient,
    pub goal_tracker: FathomTracker,
    /// Conversion goal reported after a successful newsletter signup.
    pub goal_id: String,
    pub podcast_feed: PodcastFeed,
}

/// Application state containing all global data.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned around.
#[derive(Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(
        templ_mgr: TemplateManager,
        newsletter_client: NewsletterClient,
        goal_tracker: FathomTracker,
        goal_id: String,
        podcast_feed: PodcastFeed,
    ) -> Self {
        AppState(Arc::new(InternalState {
            templ_mgr,
            newsletter_client,
            goal_tracker,
            goal_id,
            podcast_feed,
        }))
    }
}
