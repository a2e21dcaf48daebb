use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api::rate_limiting::RateLimiters;
use crate::api::reporting::{ErrorReporter, TracingErrorReporter};
use crate::services::ai::AiClient;
use crate::services::prober::{DependencyProber, SupabaseProber};
use crate::services::supabase::SupabaseClient;
use crate::settings::Settings;
use crate::stop_flag::{self, StopFlag};

pub struct AppState {
    pub settings: Settings,
    pub stop_flag: StopFlag,
    pub supabase: SupabaseClient,
    pub ai: AiClient,
    pub prober: Arc<dyn DependencyProber>,
    pub reporter: Arc<dyn ErrorReporter>,
    pub limiters: RateLimiters,
    started_at: Instant,
}

pub type SharedAppState = Arc<AppState>;

impl AppState {
    pub async fn new() -> anyhow::Result<SharedAppState> {
        let settings = Settings::new()?;

        let state = Self::from_settings(settings)?;
        stop_flag::register_signal_handler(&state.stop_flag);
        Ok(state)
    }

    /// Build the full state from resolved settings with the production
    /// collaborators wired in.
    pub fn from_settings(settings: Settings) -> anyhow::Result<SharedAppState> {
        let supabase = SupabaseClient::new(&settings.supabase)?;
        let prober = Arc::new(SupabaseProber::new(
            supabase.clone(),
            settings.supabase.probe_table.clone(),
            settings.supabase.probe_column.clone(),
        ));

        Self::with_collaborators(settings, supabase, prober, Arc::new(TracingErrorReporter))
    }

    /// Full control over the injected collaborators. Tests substitute
    /// deterministic probers and capturing reporters here.
    pub fn with_collaborators(
        settings: Settings,
        supabase: SupabaseClient,
        prober: Arc<dyn DependencyProber>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> anyhow::Result<SharedAppState> {
        let ai = AiClient::new(&settings.ai)?;
        let limiters = RateLimiters::from_config(&settings.rate_limiting);

        Ok(Arc::new(AppState {
            settings,
            stop_flag: StopFlag::new(),
            supabase,
            ai,
            prober,
            reporter,
            limiters,
            started_at: Instant::now(),
        }))
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
