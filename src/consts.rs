pub mod dashboard_consts {
    //! Dashboard Configuration Constants
    //!
    //! Defaults for timing, HTTP and page output, grouped by concern.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// Maximum number of buffered dashboard events
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // ENGINE READINESS
    // =============================================================================

    /// Engine readiness wait configuration
    pub mod engine_wait {
        use std::time::Duration;

        /// Interval between readiness checks (milliseconds)
        pub const POLL_INTERVAL_MS: u64 = 100;

        /// Number of checks before giving up (50 x 100ms = 5 seconds)
        pub const MAX_ATTEMPTS: u32 = 50;

        pub const fn poll_interval() -> Duration {
            Duration::from_millis(POLL_INTERVAL_MS)
        }
    }

    // =============================================================================
    // REFRESH CONFIGURATION
    // =============================================================================

    pub mod refresh {
        /// Interval between automatic chart refreshes (seconds)
        pub const INTERVAL_SECS: u64 = 5 * 60;
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    pub mod network {
        use std::time::Duration;

        /// Connect and request timeout for chart data requests (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // PAGE
    // =============================================================================

    /// Title of the rendered dashboard page
    pub const PAGE_TITLE: &str = "Dashboard de Apostas";

    /// Message shown in a container when no specific message is given
    pub const DEFAULT_ERROR_MESSAGE: &str = "Erro ao carregar dados";
}
