//! Test utilities and shared test helpers for the modlog bot.
//!
//! This module provides common testing utilities, fixtures, and helper functions
//! that can be used across all crates in the workspace for unit and integration testing.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Test fixture for creating a mock timestamp.
pub fn mock_timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}

/// Discord-related test utilities.
pub mod discord_fixtures {
    /// Guild every fixture lives in.
    pub const TEST_GUILD_ID: u64 = 111_111_111_111_111_111;

    /// Channel that is updated in channel fixtures.
    pub const TEST_CHANNEL_ID: u64 = 123_456_789_012_345_678;

    /// Channel configured as a log destination.
    pub const TEST_LOG_CHANNEL_ID: u64 = 222_222_222_222_222_222;

    /// A moderator role used in overwrite fixtures.
    pub const TEST_ROLE_ID: u64 = 333_333_333_333_333_333;

    /// A regular member.
    pub const TEST_USER_ID: u64 = 987_654_321_098_765_432;

    /// A bot owner.
    pub const TEST_OWNER_ID: u64 = 444_444_444_444_444_444;
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Create a minimal valid test configuration as YAML string.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
discord:
  token: "test_token"
  owner_ids: [444444444444444444]
"#
    }

    /// Create a full test configuration as YAML string.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "discord:\n",
            "  token: \"test_token_full\"\n",
            "  prefix: \"?\"\n",
            "  owner_ids:\n",
            "    - 444444444444444444\n",
            "    - 555555555555555555\n",
            "\n",
            "database:\n",
            "  path: \"/tmp/modlog-test.db\"\n",
            "  in_memory: false\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  format: \"json\"\n",
            "  file_path: \"logs/modlog.log\"\n",
            "\n",
            "bot:\n",
            "  creator: \"Modlog\"\n"
        )
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use proptest::prelude::*;

    /// Strategy for generating valid Discord snowflakes.
    pub fn snowflake_strategy() -> impl Strategy<Value = u64> {
        100_000_000_000_000_000u64..=999_999_999_999_999_999u64
    }

    /// Strategy for generating channel names as Discord allows them.
    pub fn channel_name_strategy() -> impl Strategy<Value = String> {
        r"[a-z0-9_-]{1,32}".prop_map(|s| s.to_string())
    }

    /// Strategy for generating non-empty channel topics.
    pub fn topic_strategy() -> impl Strategy<Value = String> {
        r"[a-zA-Z0-9 .,!?]{1,64}".prop_map(|s| s.to_string())
    }
}
